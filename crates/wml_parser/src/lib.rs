//! wml_parser: Recursive descent parser for WML.
//!
//! Parses the scanner's token stream into an arena-backed [`Document`]
//! plus diagnostics. Parsing never fails outright: malformed input yields a
//! best-effort tree and a diagnostic per problem.
//!
//! [`Document`]: wml_ast::Document

mod error;
mod parser;
mod token_stream;
mod utilities;

pub use error::{PResult, ParseError};
pub use parser::{parse_document, ParseResult, Parser};
pub use token_stream::{Mark, TokenStream};
