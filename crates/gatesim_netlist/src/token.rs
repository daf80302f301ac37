//! Token types for the netlist lexer.
//!
//! Identifier and number text is not stored in the token; it is sliced from
//! the source with the token's byte range.

use serde::{Deserialize, Serialize};

/// A netlist token kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NetToken {
    /// A name: `[A-Za-z_][A-Za-z0-9_.]*`.
    Ident,
    /// A decimal integer.
    Number,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `=`
    Equals,
    /// End of a non-empty line.
    Newline,
    /// A character that cannot start any token.
    Error,
    /// End of input.
    Eof,
}

impl NetToken {
    /// Human-readable description used in syntax errors.
    pub fn describe(self) -> &'static str {
        match self {
            NetToken::Ident => "a name",
            NetToken::Number => "a number",
            NetToken::LeftBracket => "'['",
            NetToken::RightBracket => "']'",
            NetToken::LeftParen => "'('",
            NetToken::RightParen => "')'",
            NetToken::Equals => "'='",
            NetToken::Newline => "end of line",
            NetToken::Error => "an invalid character",
            NetToken::Eof => "end of file",
        }
    }
}

/// A token with its byte range and 1-based line number.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Kind of token.
    pub kind: NetToken,
    /// Byte offset of the first character.
    pub start: u32,
    /// Byte offset one past the last character.
    pub end: u32,
    /// Line the token starts on.
    pub line: u32,
}

impl Token {
    /// Source text covered by this token.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start as usize..self.end as usize]
    }
}
