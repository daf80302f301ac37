//! Lexical analyzer for netlist text.
//!
//! Lines are significant: each non-empty line ends in a [`NetToken::Newline`].
//! `#` starts a comment that runs to the end of the line. Characters that
//! cannot start a token become [`NetToken::Error`] tokens and are reported by
//! the parser.

use crate::token::{NetToken, Token};

/// Lexes `source` into tokens.
///
/// Blank and comment-only lines produce no tokens. The returned vector always
/// ends with a [`NetToken::Eof`] token.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        line: 1,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        loop {
            self.skip_blanks_and_comments();
            if self.pos >= self.source.len() {
                if tokens.last().is_some_and(|t| t.kind != NetToken::Newline) {
                    tokens.push(self.token(NetToken::Newline, self.pos));
                }
                tokens.push(self.token(NetToken::Eof, self.pos));
                break;
            }
            if self.peek() == b'\n' {
                if tokens.last().is_some_and(|t| t.kind != NetToken::Newline) {
                    let start = self.pos;
                    self.pos += 1;
                    tokens.push(self.token(NetToken::Newline, start));
                } else {
                    self.pos += 1;
                }
                self.line += 1;
                continue;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn peek(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(0)
    }

    fn token(&self, kind: NetToken, start: usize) -> Token {
        Token {
            kind,
            start: start as u32,
            end: self.pos as u32,
            line: self.line,
        }
    }

    fn skip_blanks_and_comments(&mut self) {
        while self.pos < self.source.len() {
            match self.peek() {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'#' => {
                    while self.pos < self.source.len() && self.peek() != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();
        self.pos += 1;
        let kind = match b {
            b'[' => NetToken::LeftBracket,
            b']' => NetToken::RightBracket,
            b'(' => NetToken::LeftParen,
            b')' => NetToken::RightParen,
            b'=' => NetToken::Equals,
            b'0'..=b'9' => {
                while self.peek().is_ascii_digit() {
                    self.pos += 1;
                }
                NetToken::Number
            }
            _ if is_ident_start(b) => {
                while is_ident_char(self.peek()) {
                    self.pos += 1;
                }
                NetToken::Ident
            }
            _ => {
                // Swallow the rest of a multi-byte character.
                while self.pos < self.source.len() && (self.peek() & 0xC0) == 0x80 {
                    self.pos += 1;
                }
                NetToken::Error
            }
        };
        self.token(kind, start)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}
