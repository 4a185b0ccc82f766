/*!
 * ICU MessageFormat parsing.
 *
 * - `ast`: nodes and source spans
 * - `error`: the closed set of grammar violations
 * - `parser`: the recursive-descent parser
 */

pub mod ast;
pub mod error;
pub mod parser;

// Re-export main types
pub use ast::{is_trivial, Node, Position, Span};
pub use error::{ErrorKind, ParseError, UnknownErrorKind};
pub use parser::{parse, ParserOptions};
