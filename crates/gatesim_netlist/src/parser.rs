//! Recursive descent parser over the token stream.
//!
//! ```text
//! netlist  := { line }
//! line     := ( decl | instance ) NEWLINE
//! decl     := ("input" | "output" | "wire") NAME [ "[" NUM "]" [ REPR ] ]
//! instance := KIND [ "(" NUM ")" ] NAME { PORT "=" netref }
//! netref   := NAME [ "[" NUM "]" ]
//! ```
//!
//! Parsing stops at the first error.

use gatesim_ir::Representation;

use crate::ast::{Binding, Instance, NetDecl, NetRef, NetRole, Netlist};
use crate::error::NetlistError;
use crate::lexer::lex;
use crate::token::{NetToken, Token};

/// Parses netlist text.
pub fn parse(source: &str) -> Result<Netlist, NetlistError> {
    let mut parser = Parser {
        tokens: lex(source),
        pos: 0,
        source,
    };
    parser.parse_netlist()
}

struct Parser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
}

impl<'src> Parser<'src> {
    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    fn at(&self, kind: NetToken) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) {
        if !self.at(NetToken::Eof) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: NetToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: NetToken) -> Result<Token, NetlistError> {
        let token = self.current();
        if token.kind != kind {
            return Err(self.expected(kind.describe()));
        }
        self.advance();
        Ok(token)
    }

    fn expect_name(&mut self) -> Result<&'src str, NetlistError> {
        let token = self.expect(NetToken::Ident)?;
        Ok(token.text(self.source))
    }

    fn expect_number(&mut self) -> Result<usize, NetlistError> {
        let token = self.expect(NetToken::Number)?;
        token.text(self.source).parse().map_err(|_| NetlistError::Syntax {
            line: token.line as usize,
            message: format!("number '{}' is too large", token.text(self.source)),
        })
    }

    fn line(&self) -> usize {
        self.current().line as usize
    }

    fn expected(&self, what: &str) -> NetlistError {
        let token = self.current();
        let found = match token.kind {
            NetToken::Ident | NetToken::Number | NetToken::Error => {
                format!("'{}'", token.text(self.source))
            }
            other => other.describe().to_string(),
        };
        NetlistError::Syntax {
            line: token.line as usize,
            message: format!("expected {what}, found {found}"),
        }
    }

    // ========================================================================
    // Grammar
    // ========================================================================

    fn parse_netlist(&mut self) -> Result<Netlist, NetlistError> {
        let mut netlist = Netlist::default();
        while !self.at(NetToken::Eof) {
            let line = self.line();
            let head = self.expect_name()?;
            match head {
                "input" => netlist.nets.push(self.parse_decl(NetRole::Input, line)?),
                "output" => netlist.nets.push(self.parse_decl(NetRole::Output, line)?),
                "wire" => netlist.nets.push(self.parse_decl(NetRole::Wire, line)?),
                kind => netlist.instances.push(self.parse_instance(kind, line)?),
            }
            self.expect(NetToken::Newline)?;
        }
        Ok(netlist)
    }

    fn parse_decl(&mut self, role: NetRole, line: usize) -> Result<NetDecl, NetlistError> {
        let name = self.expect_name()?.to_string();
        let mut width = None;
        if self.eat(NetToken::LeftBracket) {
            width = Some(self.expect_number()?);
            self.expect(NetToken::RightBracket)?;
        }
        let mut repr = Representation::default();
        if self.at(NetToken::Ident) {
            if width.is_none() {
                return Err(NetlistError::Syntax {
                    line,
                    message: format!("representation given for single wire '{name}'"),
                });
            }
            repr = self
                .expect_name()?
                .parse::<Representation>()
                .map_err(|message| NetlistError::Syntax { line, message })?;
        }
        Ok(NetDecl {
            role,
            name,
            width,
            repr,
            line,
        })
    }

    fn parse_instance(&mut self, kind: &str, line: usize) -> Result<Instance, NetlistError> {
        let mut param = None;
        if self.eat(NetToken::LeftParen) {
            param = Some(self.expect_number()?);
            self.expect(NetToken::RightParen)?;
        }
        let name = self.expect_name()?.to_string();
        let mut bindings = Vec::new();
        while self.at(NetToken::Ident) {
            let port = self.expect_name()?.to_string();
            self.expect(NetToken::Equals)?;
            let net = self.parse_net_ref()?;
            bindings.push(Binding { port, net });
        }
        Ok(Instance {
            kind: kind.to_string(),
            param,
            name,
            bindings,
            line,
        })
    }

    fn parse_net_ref(&mut self) -> Result<NetRef, NetlistError> {
        let name = self.expect_name()?.to_string();
        let mut index = None;
        if self.eat(NetToken::LeftBracket) {
            index = Some(self.expect_number()?);
            self.expect(NetToken::RightBracket)?;
        }
        Ok(NetRef { name, index })
    }
}
