//! Error types for netlist loading.

use std::path::PathBuf;

use gatesim_sim::SimError;

/// Errors raised while reading, parsing or building a netlist.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// The netlist file could not be read.
    #[error("failed to read netlist {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The text does not follow the netlist grammar.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What was expected or found.
        message: String,
    },

    /// No component kind has this keyword, or its `(N)` parameter is wrong.
    #[error("line {line}: unknown component kind '{kind}'")]
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// Keyword as written, including any parameter.
        kind: String,
    },

    /// An instance refers to a net that was never declared.
    #[error("line {line}: net '{net}' is not declared")]
    UndeclaredNet {
        /// 1-based line number.
        line: usize,
        /// Net reference as written.
        net: String,
    },

    /// A net is bound to a port of a different width.
    #[error("line {line}: cannot bind {found}-bit net '{net}' to {expected}-bit port '{port}'")]
    WidthMismatch {
        /// 1-based line number.
        line: usize,
        /// Net reference as written.
        net: String,
        /// Port name.
        port: String,
        /// Port width.
        expected: usize,
        /// Net width.
        found: usize,
    },

    /// The simulator rejected a declaration or instance on this line.
    #[error("line {line}: {source}")]
    Rejected {
        /// 1-based line number.
        line: usize,
        /// Structural error.
        #[source]
        source: SimError,
    },

    /// The simulator rejected the finished netlist.
    #[error(transparent)]
    Build(#[from] SimError),
}

impl NetlistError {
    /// Line the error refers to, if it refers to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            NetlistError::Syntax { line, .. }
            | NetlistError::UnknownKind { line, .. }
            | NetlistError::UndeclaredNet { line, .. }
            | NetlistError::WidthMismatch { line, .. }
            | NetlistError::Rejected { line, .. } => Some(*line),
            NetlistError::Io { .. } | NetlistError::Build(_) => None,
        }
    }
}
