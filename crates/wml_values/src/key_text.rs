//! Reassembling the text of a parsed key.

use wml_ast::{Document, Node, NodeId, SyntaxKind};
use wml_core::text::TextRange;

use crate::error::ValueError;
use crate::refine::{classify, RefinedValue};

/// The value of a key as one string.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyText {
    pub name: String,
    pub text: String,
    /// A `_` marked at least one string of the value for translation.
    pub translatable: bool,
    /// The value contains a macro call, so the text is not final.
    pub has_macros: bool,
    /// Domain of the nearest preceding `#textdomain`, for translatable values.
    pub textdomain: Option<String>,
    pub range: TextRange,
}

impl KeyText {
    /// Join the value segments of the key `id`.
    ///
    /// Segments on one line keep the source spacing between them; segments
    /// joined with `+` are concatenated directly. Strings are decoded, macro
    /// calls and array calls are kept as source text.
    pub fn from_key(doc: &Document, id: NodeId) -> Result<Self, ValueError> {
        let key = doc.node(id).as_key().ok_or(ValueError::NotAKey(id))?;

        let mut text = String::new();
        let mut translatable = false;
        let mut has_macros = false;
        let mut previous_end: Option<u32> = None;

        for &value_id in &key.values {
            let node = doc.node(value_id);
            let range = node.range();

            if let Some(end) = previous_end {
                let gap = TextRange::new(end, range.pos.max(end));
                let joined = key.joins.iter().any(|join| join.pos >= gap.pos && join.end <= gap.end);
                if !joined {
                    text.push_str(doc.slice(gap));
                }
            }
            previous_end = Some(range.end);

            match node {
                Node::Value(value) if value.token == SyntaxKind::UnderscoreToken => {
                    // The marker itself is not part of the text.
                    translatable = true;
                    previous_end = None;
                }
                Node::Value(value) => text.push_str(&value.text),
                Node::LuaCode(lua) => text.push_str(&lua.code),
                Node::MacroCall(_) => {
                    has_macros = true;
                    text.push_str(doc.node_text(value_id));
                }
                _ => text.push_str(doc.node_text(value_id)),
            }
        }

        let textdomain = if translatable {
            textdomain_at(doc, key.data.range.pos).map(str::to_string)
        } else {
            None
        };

        Ok(Self {
            name: doc.resolve(&key.name).to_string(),
            text,
            translatable,
            has_macros,
            textdomain,
            range: key.data.range,
        })
    }

    pub fn refine(&self) -> RefinedValue {
        classify(&self.text)
    }
}

/// The domain declared by the last `#textdomain` directive starting before
/// `offset`.
pub fn textdomain_at(doc: &Document, offset: u32) -> Option<&str> {
    doc.textdomain_at(offset).and_then(|t| t.domain())
}
