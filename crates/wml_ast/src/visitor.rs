//! Document visitor for traversing a parsed tree.
//!
//! Provides both an `AstVisitor` trait for customizable traversal and
//! a `for_each_child` function for generic iteration over all children.

use crate::node::*;
use crate::types::NodeId;

/// A visitor over a [`Document`]. Implement the methods for the node kinds
/// of interest; default implementations walk into children.
pub trait AstVisitor {
    fn visit_document(&mut self, doc: &Document) {
        for &id in doc.root() {
            self.visit_node(doc, id);
        }
    }

    fn visit_node(&mut self, doc: &Document, id: NodeId) {
        match doc.node(id) {
            Node::Tag(n) => self.visit_tag(doc, id, n),
            Node::Key(n) => self.visit_key(doc, id, n),
            Node::Value(n) => self.visit_value(doc, id, n),
            Node::MacroCall(n) => self.visit_macro_call(doc, id, n),
            Node::MacroToken(n) => self.visit_macro_token(doc, id, n),
            Node::MacroDefine(n) => self.visit_macro_define(doc, id, n),
            Node::PreprocIf(n) => self.visit_preproc_if(doc, id, n),
            Node::Textdomain(n) => self.visit_textdomain(doc, id, n),
            Node::LuaCode(n) => self.visit_lua_code(doc, id, n),
            Node::ArrayCall(n) => self.visit_array_call(doc, id, n),
        }
    }

    fn visit_tag(&mut self, doc: &Document, id: NodeId, _node: &Tag) {
        walk_children(self, doc, id);
    }

    fn visit_key(&mut self, doc: &Document, id: NodeId, _node: &Key) {
        walk_children(self, doc, id);
    }

    fn visit_value(&mut self, _doc: &Document, _id: NodeId, _node: &Value) {}

    fn visit_macro_call(&mut self, doc: &Document, id: NodeId, _node: &MacroCall) {
        walk_children(self, doc, id);
    }

    fn visit_macro_token(&mut self, _doc: &Document, _id: NodeId, _node: &MacroToken) {}

    fn visit_macro_define(&mut self, doc: &Document, id: NodeId, _node: &MacroDefine) {
        walk_children(self, doc, id);
    }

    fn visit_preproc_if(&mut self, doc: &Document, id: NodeId, _node: &PreprocIf) {
        walk_children(self, doc, id);
    }

    fn visit_textdomain(&mut self, _doc: &Document, _id: NodeId, _node: &Textdomain) {}

    fn visit_lua_code(&mut self, _doc: &Document, _id: NodeId, _node: &LuaCode) {}

    fn visit_array_call(&mut self, doc: &Document, id: NodeId, _node: &ArrayCall) {
        walk_children(self, doc, id);
    }
}

/// Visit every direct child of `id` with `visitor`.
pub fn walk_children<V: AstVisitor + ?Sized>(visitor: &mut V, doc: &Document, id: NodeId) {
    for child in doc.children(id) {
        visitor.visit_node(doc, child);
    }
}

/// Call `f` on each direct child of `id`, in source order.
pub fn for_each_child<F: FnMut(NodeId)>(doc: &Document, id: NodeId, mut f: F) {
    for child in doc.children(id) {
        f(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind::SyntaxKind;
    use wml_core::text::TextRange;

    struct CountValues(usize);

    impl AstVisitor for CountValues {
        fn visit_value(&mut self, _doc: &Document, _id: NodeId, _node: &Value) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_visitor_reaches_nested_values() {
        let mut builder = DocumentBuilder::new("t.cfg", "{M a b}");
        let mut params = Vec::new();
        for (text, pos) in [("a", 3), ("b", 5)] {
            params.push(builder.alloc(Node::Value(Value {
                data: NodeData::new(SyntaxKind::Value, TextRange::new(pos, pos + 1)),
                token: SyntaxKind::Identifier,
                text: text.to_string(),
            })));
        }
        let name = builder.intern("M");
        let call = builder.alloc(Node::MacroCall(MacroCall {
            data: NodeData::new(SyntaxKind::MacroCall, TextRange::new(0, 7)),
            point: false,
            relative: false,
            name: Name { text: name, range: TextRange::new(1, 2) },
            params,
        }));
        let doc = builder.finish(vec![call], Vec::new());

        let mut counter = CountValues(0);
        counter.visit_document(&doc);
        assert_eq!(counter.0, 2);

        let mut seen = Vec::new();
        for_each_child(&doc, call, |id| seen.push(id));
        assert_eq!(seen.len(), 2);
    }
}
