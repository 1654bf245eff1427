//! Document node definitions.
//!
//! A parsed file is a [`Document`]: every node lives in one arena and refers
//! to its children, parent and enclosing tag by [`NodeId`]. Nodes are never
//! mutated after [`DocumentBuilder::finish`] returns.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use wml_core::arena::Arena;
use wml_core::collections::MultiMap;
use wml_core::intern::{InternedString, StringInterner};
use wml_core::text::{LineMap, TextRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all nodes.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Source position range, from the first to the last token of the node.
    pub range: TextRange,
    pub flags: NodeFlags,
    /// The syntactic parent, `None` for top-level nodes.
    pub parent: Option<NodeId>,
    /// The innermost tag containing this node, if any.
    pub enclosing_tag: Option<NodeId>,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            flags: NodeFlags::NONE,
            parent: None,
            enclosing_tag: None,
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// A token kept in the tree: its kind and where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self { kind, range }
    }
}

/// An interned tag, key or macro name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name {
    pub text: InternedString,
    pub range: TextRange,
}

/// A preprocessor directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: SyntaxKind,
    /// The whole directive line, line terminator included.
    pub range: TextRange,
    /// The raw text after the directive keyword, trimmed, uninterpreted.
    pub argument: String,
}

impl Directive {
    /// The whitespace separated words following the keyword.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.argument.split_whitespace()
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// `[name] ... [/name]`
#[derive(Debug, Clone)]
pub struct Tag {
    pub data: NodeData,
    pub name: Name,
    /// `[+name]` merges into the previous tag of the same name.
    pub plus: bool,
    pub children: Vec<NodeId>,
    /// `None` when the tag was closed implicitly at a boundary.
    pub end_name: Option<Name>,
}

/// `name = value [+ value ...]` terminated by end of line or a comment.
#[derive(Debug, Clone)]
pub struct Key {
    pub data: NodeData,
    pub name: Name,
    /// Value, MacroCall, LuaCode and ArrayCall nodes in source order.
    pub values: Vec<NodeId>,
    /// Ranges of the `+` tokens joining continuation groups.
    pub joins: Vec<TextRange>,
    /// The terminating end of line or comment; `None` when the key ran into
    /// end of input or an unexpected token.
    pub eol: Option<Token>,
}

/// A single value token.
#[derive(Debug, Clone)]
pub struct Value {
    pub data: NodeData,
    /// The token kind this value was made from.
    pub token: SyntaxKind,
    /// Identifier text, decoded string contents, or the punctuation itself.
    pub text: String,
}

/// `{./~NAME param...}`
#[derive(Debug, Clone)]
pub struct MacroCall {
    pub data: NodeData,
    /// Leading `./` (path relative to the current file).
    pub point: bool,
    /// Leading `~` (path relative to the user data directory).
    pub relative: bool,
    pub name: Name,
    /// Value, MacroToken and nested MacroCall nodes.
    pub params: Vec<NodeId>,
}

/// A raw `=`, `+`, `[`, `]` or `[/` passed through a macro call.
#[derive(Debug, Clone)]
pub struct MacroToken {
    pub data: NodeData,
    pub token: SyntaxKind,
}

impl MacroToken {
    pub fn text(&self) -> &'static str {
        self.token.punctuation_text().unwrap_or("")
    }
}

/// `#define NAME ARGS...` ... `#enddef`
#[derive(Debug, Clone)]
pub struct MacroDefine {
    pub data: NodeData,
    pub header: Directive,
    /// The declared macro name, the first word of the header.
    pub name: Option<Name>,
    /// Expression and Value nodes of the body.
    pub body: Vec<NodeId>,
    pub end: Option<Directive>,
}

impl MacroDefine {
    pub fn macro_name(&self) -> Option<&str> {
        self.header.words().next()
    }

    /// Declared parameter names, the words after the macro name.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.header.words().skip(1)
    }
}

/// `#ifdef`/`#ifndef`/`#ifhave`/`#ifnhave` ... [`#else` ...] `#endif`
#[derive(Debug, Clone)]
pub struct PreprocIf {
    pub data: NodeData,
    pub kind: PreprocKind,
    pub header: Directive,
    pub body: Vec<NodeId>,
    pub else_directive: Option<Directive>,
    pub else_body: Vec<NodeId>,
    pub end: Option<Directive>,
}

impl PreprocIf {
    /// The condition text after the directive keyword, uninterpreted.
    pub fn condition(&self) -> &str {
        &self.header.argument
    }
}

/// `#textdomain name`
#[derive(Debug, Clone)]
pub struct Textdomain {
    pub data: NodeData,
    pub header: Directive,
}

impl Textdomain {
    pub fn domain(&self) -> Option<&str> {
        self.header.words().next()
    }
}

/// `<<code>>`, captured verbatim.
#[derive(Debug, Clone)]
pub struct LuaCode {
    pub data: NodeData,
    pub code: String,
}

/// `[value ...]` in value position.
#[derive(Debug, Clone)]
pub struct ArrayCall {
    pub data: NodeData,
    pub values: Vec<NodeId>,
}

/// Any node of a document.
#[derive(Debug, Clone)]
pub enum Node {
    Tag(Tag),
    Key(Key),
    Value(Value),
    MacroCall(MacroCall),
    MacroToken(MacroToken),
    MacroDefine(MacroDefine),
    PreprocIf(PreprocIf),
    Textdomain(Textdomain),
    LuaCode(LuaCode),
    ArrayCall(ArrayCall),
}

impl Node {
    pub fn data(&self) -> &NodeData {
        match self {
            Node::Tag(n) => &n.data,
            Node::Key(n) => &n.data,
            Node::Value(n) => &n.data,
            Node::MacroCall(n) => &n.data,
            Node::MacroToken(n) => &n.data,
            Node::MacroDefine(n) => &n.data,
            Node::PreprocIf(n) => &n.data,
            Node::Textdomain(n) => &n.data,
            Node::LuaCode(n) => &n.data,
            Node::ArrayCall(n) => &n.data,
        }
    }

    fn data_mut(&mut self) -> &mut NodeData {
        match self {
            Node::Tag(n) => &mut n.data,
            Node::Key(n) => &mut n.data,
            Node::Value(n) => &mut n.data,
            Node::MacroCall(n) => &mut n.data,
            Node::MacroToken(n) => &mut n.data,
            Node::MacroDefine(n) => &mut n.data,
            Node::PreprocIf(n) => &mut n.data,
            Node::Textdomain(n) => &mut n.data,
            Node::LuaCode(n) => &mut n.data,
            Node::ArrayCall(n) => &mut n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// Direct children in source order. For a [`PreprocIf`] the else body
    /// follows the main body.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        let (first, second): (&[NodeId], &[NodeId]) = match self {
            Node::Tag(n) => (&n.children, &[]),
            Node::Key(n) => (&n.values, &[]),
            Node::MacroCall(n) => (&n.params, &[]),
            Node::MacroDefine(n) => (&n.body, &[]),
            Node::PreprocIf(n) => (&n.body, &n.else_body),
            Node::ArrayCall(n) => (&n.values, &[]),
            Node::Value(_) | Node::MacroToken(_) | Node::Textdomain(_) | Node::LuaCode(_) => (&[], &[]),
        };
        first.iter().chain(second.iter()).copied()
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Tag(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&Key> {
        match self {
            Node::Key(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_macro_call(&self) -> Option<&MacroCall> {
        match self {
            Node::MacroCall(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_macro_define(&self) -> Option<&MacroDefine> {
        match self {
            Node::MacroDefine(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_preproc_if(&self) -> Option<&PreprocIf> {
        match self {
            Node::PreprocIf(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_lua_code(&self) -> Option<&LuaCode> {
        match self {
            Node::LuaCode(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array_call(&self) -> Option<&ArrayCall> {
        match self {
            Node::ArrayCall(n) => Some(n),
            _ => None,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed WML file: the root expressions plus the arena owning every node.
#[derive(Debug)]
pub struct Document {
    file_name: String,
    text: String,
    nodes: Arena<Node>,
    root: Vec<NodeId>,
    interner: StringInterner,
    trivia: Vec<Token>,
    line_map: LineMap,
    tags_by_name: MultiMap<InternedString, NodeId>,
    macros_by_name: MultiMap<InternedString, NodeId>,
    /// `#textdomain` nodes in source order.
    textdomains: Vec<NodeId>,
}

impl Document {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The full source text the document was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Top-level expressions in source order.
    pub fn root(&self) -> &[NodeId] {
        &self.root
    }

    /// The node for `id`.
    ///
    /// Ids handed out by this document are always valid; an id from another
    /// document may panic.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in allocation order (children before their parents).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(i, n)| (NodeId(i), n))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).data().parent
    }

    /// The innermost tag containing `id`, in constant time.
    pub fn enclosing_tag(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).data().enclosing_tag
    }

    /// The source slice covered by a node.
    pub fn node_text(&self, id: NodeId) -> &str {
        self.slice(self.node(id).range())
    }

    pub fn slice(&self, range: TextRange) -> &str {
        self.text.get(range.to_range()).unwrap_or("")
    }

    pub fn resolve(&self, name: &Name) -> &str {
        self.interner.resolve(name.text)
    }

    /// All tags named `name`, in source order.
    pub fn tags_named(&self, name: &str) -> &[NodeId] {
        match self.interner.get(name) {
            Some(key) => self.tags_by_name.get(&key),
            None => &[],
        }
    }

    /// All `#define` blocks declaring a macro called `name`, in source order.
    pub fn macro_definitions(&self, name: &str) -> &[NodeId] {
        match self.interner.get(name) {
            Some(key) => self.macros_by_name.get(&key),
            None => &[],
        }
    }

    /// The last `#textdomain` starting before `offset`.
    pub fn textdomain_at(&self, offset: u32) -> Option<&Textdomain> {
        let count = self
            .textdomains
            .partition_point(|&id| self.node(id).range().pos < offset);
        let id = *self.textdomains.get(count.checked_sub(1)?)?;
        match self.node(id) {
            Node::Textdomain(t) => Some(t),
            _ => None,
        }
    }

    /// Horizontal whitespace tokens removed from the structural stream.
    pub fn trivia(&self) -> &[Token] {
        &self.trivia
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }
}

/// Incrementally assembles a [`Document`]. Children are allocated before
/// their parents; parent links are filled in by [`finish`](Self::finish).
#[derive(Debug)]
pub struct DocumentBuilder {
    file_name: String,
    text: String,
    nodes: Arena<Node>,
    interner: StringInterner,
}

impl DocumentBuilder {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        // Roughly one node per eight bytes of typical WML.
        let capacity = text.len() / 8;
        Self {
            file_name: file_name.into(),
            text,
            nodes: Arena::with_capacity(capacity),
            interner: StringInterner::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn intern(&mut self, text: &str) -> InternedString {
        self.interner.intern(text)
    }

    pub fn resolve(&self, text: InternedString) -> &str {
        self.interner.resolve(text)
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        NodeId(self.nodes.alloc(node))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Link parents and enclosing tags, build the name indexes and freeze
    /// the tree.
    pub fn finish(mut self, root: Vec<NodeId>, trivia: Vec<Token>) -> Document {
        let mut tags_by_name = MultiMap::new();
        let mut macros_by_name = MultiMap::new();
        let mut textdomains = Vec::new();

        // Pre-order walk so indexes list nodes in source order.
        let mut stack: Vec<(NodeId, Option<NodeId>, Option<NodeId>)> =
            root.iter().rev().map(|&id| (id, None, None)).collect();
        let mut children = Vec::new();
        while let Some((id, parent, enclosing_tag)) = stack.pop() {
            let node = &mut self.nodes[id.0];
            let data = node.data_mut();
            data.parent = parent;
            data.enclosing_tag = enclosing_tag;

            let inner_tag = match node {
                Node::Tag(tag) => {
                    tags_by_name.insert(tag.name.text, id);
                    Some(id)
                }
                Node::MacroDefine(define) => {
                    if let Some(name) = define.name {
                        macros_by_name.insert(name.text, id);
                    }
                    enclosing_tag
                }
                Node::Textdomain(_) => {
                    textdomains.push(id);
                    enclosing_tag
                }
                _ => enclosing_tag,
            };

            children.clear();
            children.extend(node.children());
            stack.extend(children.iter().rev().map(|&child| (child, Some(id), inner_tag)));
        }

        let line_map = LineMap::new(&self.text);
        Document {
            file_name: self.file_name,
            text: self.text,
            nodes: self.nodes,
            root,
            interner: self.interner,
            trivia,
            line_map,
            tags_by_name,
            macros_by_name,
            textdomains,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(builder: &mut DocumentBuilder, text: &str, pos: u32) -> NodeId {
        let range = TextRange::new(pos, pos + text.len() as u32);
        builder.alloc(Node::Value(Value {
            data: NodeData::new(SyntaxKind::Value, range),
            token: SyntaxKind::Identifier,
            text: text.to_string(),
        }))
    }

    #[test]
    fn test_finish_links_parents_and_enclosing_tags() {
        let source = "[a]\nk=v\n[/a]";
        let mut builder = DocumentBuilder::new("test.cfg", source);
        let v = value(&mut builder, "v", 6);
        let key_name = builder.intern("k");
        let key = builder.alloc(Node::Key(Key {
            data: NodeData::new(SyntaxKind::Key, TextRange::new(4, 8)),
            name: Name { text: key_name, range: TextRange::new(4, 5) },
            values: vec![v],
            joins: Vec::new(),
            eol: Some(Token::new(SyntaxKind::NewLineToken, TextRange::new(7, 8))),
        }));
        let tag_name = builder.intern("a");
        let name = Name { text: tag_name, range: TextRange::new(1, 2) };
        let tag = builder.alloc(Node::Tag(Tag {
            data: NodeData::new(SyntaxKind::Tag, TextRange::new(0, 12)),
            name,
            plus: false,
            children: vec![key],
            end_name: Some(name),
        }));
        let doc = builder.finish(vec![tag], Vec::new());

        assert_eq!(doc.parent(v), Some(key));
        assert_eq!(doc.parent(key), Some(tag));
        assert_eq!(doc.parent(tag), None);
        assert_eq!(doc.enclosing_tag(v), Some(tag));
        assert_eq!(doc.enclosing_tag(tag), None);
        assert_eq!(doc.tags_named("a"), &[tag]);
        assert!(doc.tags_named("b").is_empty());
        assert_eq!(doc.node_text(key), "k=v\n");
        assert_eq!(doc.children(tag).collect::<Vec<_>>(), vec![key]);
    }

    #[test]
    fn test_directive_words() {
        let directive = Directive {
            kind: SyntaxKind::DefineDirective,
            range: TextRange::new(0, 24),
            argument: "UNIT TYPE  SIDE".to_string(),
        };
        assert_eq!(directive.words().collect::<Vec<_>>(), vec!["UNIT", "TYPE", "SIDE"]);
    }
}
