//! Textual netlist format for the gatesim simulator.
//!
//! A netlist is a line-oriented list of net declarations and component
//! instances:
//!
//! ```text
//! input  A[4] twos      # global input bundle
//! input  cin            # global input wire
//! output S[4]
//! output cout
//! ripple_adder(4) rca A=A B=B CIN=cin S=S COUT=cout
//! ```
//!
//! [`parse`] produces the [`ast::Netlist`]; [`build_system`] and
//! [`load_netlist`] go all the way to an unsealed [`System`].

#![warn(missing_docs)]

pub mod ast;
pub mod builder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

use std::path::Path;

use gatesim_sim::System;

pub use error::NetlistError;
pub use parser::parse;

/// Parses `source` and builds a system named `name`.
pub fn build_system(name: &str, source: &str) -> Result<System, NetlistError> {
    let netlist = parse(source)?;
    builder::build(name, &netlist)
}

/// Reads and builds the netlist at `path`, naming the system after the file
/// stem.
pub fn load_netlist(path: &Path) -> Result<System, NetlistError> {
    let source = std::fs::read_to_string(path).map_err(|source| NetlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("netlist");
    build_system(name, &source)
}
