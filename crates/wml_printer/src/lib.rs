//! wml_printer: document and token dumps.
//!
//! Renders a parsed document as an indented tree, one node per line with its
//! kind, label and byte range, and a token stream as one token per line.
//! Output depends only on the input, so it can be compared across runs.

use wml_ast::node::*;
use wml_ast::types::{NodeFlags, NodeId};
use wml_ast::visitor::{walk_children, AstVisitor};
use wml_core::text::TextRange;
use wml_scanner::Scanner;

/// Options for the printer.
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to print byte ranges.
    pub ranges: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            new_line: "\n".to_string(),
            ranges: true,
        }
    }
}

/// The printer renders a document tree to text.
pub struct Printer {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
        }
    }

    /// Print a whole document to a string.
    pub fn print(&mut self, doc: &Document) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.visit_document(doc);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write_line(&mut self, kind: &str, label: &str, range: TextRange, flags: NodeFlags) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
        self.output.push_str(kind);
        if !label.is_empty() {
            self.output.push(' ');
            self.output.push_str(label);
        }
        if self.options.ranges {
            self.output.push_str(&format!(" {}..{}", range.pos, range.end));
        }
        let names: Vec<String> = flags.iter_names().map(|(name, _)| name.to_lowercase()).collect();
        if !names.is_empty() {
            self.output.push_str(&format!(" ({})", names.join(", ")));
        }
        self.output.push_str(&self.options.new_line);
    }

    fn write_node(&mut self, doc: &Document, id: NodeId, kind: &str, label: &str) {
        let data = doc.node(id).data();
        self.write_line(kind, label, data.range, data.flags);
    }

    fn nested(&mut self, doc: &Document, children: &[NodeId]) {
        self.indent_level += 1;
        for &child in children {
            self.visit_node(doc, child);
        }
        self.indent_level -= 1;
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl AstVisitor for Printer {
    fn visit_tag(&mut self, doc: &Document, id: NodeId, node: &Tag) {
        let plus = if node.plus { "+" } else { "" };
        let mut label = format!("[{}{}]", plus, doc.resolve(&node.name));
        if let Some(end) = node.end_name.filter(|end| end.text != node.name.text) {
            label.push_str(&format!(" [/{}]", doc.resolve(&end)));
        }
        self.write_node(doc, id, "Tag", &label);
        self.nested(doc, &node.children);
    }

    fn visit_key(&mut self, doc: &Document, id: NodeId, node: &Key) {
        self.write_node(doc, id, "Key", doc.resolve(&node.name));
        self.indent_level += 1;
        walk_children(self, doc, id);
        self.indent_level -= 1;
    }

    fn visit_value(&mut self, doc: &Document, id: NodeId, node: &Value) {
        self.write_node(doc, id, "Value", &format!("{:?}", node.text));
    }

    fn visit_macro_call(&mut self, doc: &Document, id: NodeId, node: &MacroCall) {
        let label = format!(
            "{{{}{}{}}}",
            if node.point { "./" } else { "" },
            if node.relative { "~" } else { "" },
            doc.resolve(&node.name)
        );
        self.write_node(doc, id, "MacroCall", &label);
        self.nested(doc, &node.params);
    }

    fn visit_macro_token(&mut self, doc: &Document, id: NodeId, node: &MacroToken) {
        self.write_node(doc, id, "MacroToken", node.text());
    }

    fn visit_macro_define(&mut self, doc: &Document, id: NodeId, node: &MacroDefine) {
        self.write_node(doc, id, "MacroDefine", &node.header.argument);
        self.nested(doc, &node.body);
    }

    fn visit_preproc_if(&mut self, doc: &Document, id: NodeId, node: &PreprocIf) {
        let label = format!("{} {}", node.kind, node.condition());
        self.write_node(doc, id, "PreprocIf", label.trim_end());
        self.nested(doc, &node.body);
        if let Some(else_directive) = &node.else_directive {
            self.write_line("Else", "", else_directive.range, NodeFlags::NONE);
            self.nested(doc, &node.else_body);
        }
    }

    fn visit_textdomain(&mut self, doc: &Document, id: NodeId, node: &Textdomain) {
        self.write_node(doc, id, "Textdomain", node.domain().unwrap_or_default());
    }

    fn visit_lua_code(&mut self, doc: &Document, id: NodeId, node: &LuaCode) {
        self.write_node(doc, id, "LuaCode", &format!("{:?}", node.code));
    }

    fn visit_array_call(&mut self, doc: &Document, id: NodeId, node: &ArrayCall) {
        self.write_node(doc, id, "ArrayCall", "");
        self.nested(doc, &node.values);
    }
}

/// Print `doc` as an indented tree with default options.
pub fn print_document(doc: &Document) -> String {
    Printer::new().print(doc)
}

/// Print every token of `source`, end of file included, one per line.
pub fn print_tokens(file_name: &str, source: &str) -> String {
    let mut output = String::new();
    for token in Scanner::new(file_name, source) {
        output.push_str(&format!("{}..{} {:?} {:?}", token.pos, token.end, token.kind, token.text));
        let names: Vec<String> = token.flags.iter_names().map(|(name, _)| name.to_lowercase()).collect();
        if !names.is_empty() {
            output.push_str(&format!(" ({})", names.join(", ")));
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_tokens() {
        let output = print_tokens("test.cfg", "a=b");
        assert_eq!(
            output,
            "0..1 Identifier \"a\" (preceding_line_break)\n1..2 EqualsToken \"=\"\n2..3 Identifier \"b\"\n3..3 EndOfFileToken \"\"\n"
        );
    }

    #[test]
    fn test_print_token_flags() {
        let output = print_tokens("test.cfg", "a\n b");
        assert!(output.contains("3..4 Identifier \"b\" (preceding_whitespace, preceding_line_break)"));
    }
}
