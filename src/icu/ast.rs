/*!
 * Syntax tree produced by the ICU message parser.
 */

use serde::Serialize;
use std::fmt;

/// A point in the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    /// Byte offset from the start of the message
    pub offset: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

/// A range of the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}

/// Style attached to a number, date or time argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentStyle {
    /// A named style such as `percent` or `short`
    Named(String),
    /// A `::`-prefixed skeleton, stored without the prefix
    Skeleton(String),
}

/// One branch of a select or plural argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// `other`, `one`, `male`, `=0` ...
    pub selector: String,
    pub value: Vec<Node>,
    pub location: Option<Span>,
}

/// A node of a parsed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain text, with quoting already resolved
    Literal {
        value: String,
        location: Option<Span>,
    },
    /// `{name}`
    Argument {
        value: String,
        location: Option<Span>,
    },
    /// `{n, number}` or `{n, number, style}`
    Number {
        value: String,
        style: Option<ArgumentStyle>,
        location: Option<Span>,
    },
    /// `{d, date}` or `{d, date, style}`
    Date {
        value: String,
        style: Option<ArgumentStyle>,
        location: Option<Span>,
    },
    /// `{t, time}` or `{t, time, style}`
    Time {
        value: String,
        style: Option<ArgumentStyle>,
        location: Option<Span>,
    },
    /// `{g, select, a {...} other {...}}`
    Select {
        value: String,
        options: Vec<SelectOption>,
        location: Option<Span>,
    },
    /// `{n, plural, ...}` or `{n, selectordinal, ...}`
    Plural {
        value: String,
        ordinal: bool,
        offset: i64,
        options: Vec<SelectOption>,
        location: Option<Span>,
    },
    /// `#` inside a plural branch
    Pound { location: Option<Span> },
    /// `<b>...</b>`, only produced when tags are not ignored
    Tag {
        value: String,
        children: Vec<Node>,
        location: Option<Span>,
    },
}

impl Node {
    /// Whether this node is plain text
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal { .. })
    }

    pub fn location(&self) -> Option<Span> {
        match self {
            Node::Literal { location, .. }
            | Node::Argument { location, .. }
            | Node::Number { location, .. }
            | Node::Date { location, .. }
            | Node::Time { location, .. }
            | Node::Select { location, .. }
            | Node::Plural { location, .. }
            | Node::Pound { location }
            | Node::Tag { location, .. } => *location,
        }
    }
}

/// A message is trivial when it carries no formatting at all:
/// either no nodes, or a single plain literal.
pub fn is_trivial(nodes: &[Node]) -> bool {
    match nodes {
        [] => true,
        [only] => only.is_literal(),
        _ => false,
    }
}
