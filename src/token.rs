//! The token definition for the textual filter syntax.

/// A token is a single unit of the language, with a specific kind and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

/// The kind of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'a> {
    // Keywords
    And,   // "AND"
    Or,    // "OR"
    Not,   // "NOT"
    Is,    // "IS"
    Like,  // "LIKE"
    Null,  // "NULL"
    True,  // "TRUE"
    False, // "FALSE"

    // Literals
    Identifier(&'a str), // Property path, dots included: `Foo.Id`
    String(&'a str),     // Contents between the quotes
    Integer(i64),
    Decimal(f64),
    DateTime(&'a str), // Text after '@'

    // Punctuation
    LParen, // (
    RParen, // )

    // Operators
    Eq,    // =
    NotEq, // !=
    Gt,    // >
    Lt,    // <
    Gte,   // >=
    Lte,   // <=

    // Special
    Illegal, // An illegal/unknown character
}

/// Represents a span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// The starting byte offset.
    pub start: usize,
    /// The ending byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
