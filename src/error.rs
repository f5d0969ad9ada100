//! # Error
//!
//! The closed error taxonomy from `SPEC_FULL.md` §7, rendered in the donor's manual
//! `Display` + `std::error::Error` style (see `typechecker/error.rs`, `loader/loaderror.rs` in
//! the donor codebase) rather than a derive-macro error crate.

use std::error::Error;
use std::fmt::{self, Display};

/// A source position, carried on tokens and threaded into every error that names one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    // lex errors
    UnterminatedQuote,
    InvalidLexeme,
    BadEscape,

    // parse errors
    MalformedTerm,
    UnexpectedListClose,
    UnexpectedListSeparator,
    InvalidCommand,
    MalformedStatement,
    NoEol,

    // execution errors
    NotAFile,
    FileOpenFailed,
    DeclTheoremFailed,
    DeclRedirFailed,
    InferenceFailed,
    ReferCycle,

    // engine errors
    UnifyFailed,
    ConsListFailed,
    GetAtomCharsFailed,
    PutAtomCharsFailed,
    PutNilFailed,
}

impl ErrorKind {
    /// The short phrase used in diagnostics, mirroring `original_source/src/err_msg.hpp`.
    fn phrase(&self) -> &'static str {
        match self {
            ErrorKind::UnterminatedQuote => "no closing quote",
            ErrorKind::InvalidLexeme => "invalid lexeme",
            ErrorKind::BadEscape => "invalid escape sequence",
            ErrorKind::MalformedTerm => "malformed term",
            ErrorKind::UnexpectedListClose => "unexpected list close",
            ErrorKind::UnexpectedListSeparator => "unexpected list separator",
            ErrorKind::InvalidCommand => "invalid command",
            ErrorKind::MalformedStatement => "malformed statement",
            ErrorKind::NoEol => "expected end-of-line (;)",
            ErrorKind::NotAFile => "not a file",
            ErrorKind::FileOpenFailed => "file failed to open",
            ErrorKind::DeclTheoremFailed => "failed to declare theorem",
            ErrorKind::DeclRedirFailed => "failed to declare redirect",
            ErrorKind::InferenceFailed => "inference failed",
            ErrorKind::ReferCycle => "refer cycle detected",
            ErrorKind::UnifyFailed => "failed to unify terms",
            ErrorKind::ConsListFailed => "failed to cons list",
            ErrorKind::GetAtomCharsFailed => "failed to get atom chars",
            ErrorKind::PutAtomCharsFailed => "failed to put atom chars",
            ErrorKind::PutNilFailed => "failed to put nil",
        }
    }
}

/// The crate-wide error value. Unlike the donor's per-stage error structs (one struct per
/// module), the kind set here is small and closed enough per `SPEC_FULL.md` §7 to live in one
/// type; each stage still constructs it through its own small set of constructors below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnilogError {
    pub kind: ErrorKind,
    pub detail: Option<String>,
    pub file: Option<String>,
    pub position: Option<Position>,
}

impl UnilogError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            detail: None,
            file: None,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl Display for UnilogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.kind.phrase())?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        match (&self.file, &self.position) {
            (Some(file), Some(position)) => write!(f, " ({file}:{position})"),
            (Some(file), None) => write!(f, " ({file})"),
            (None, Some(position)) => write!(f, " ({position})"),
            (None, None) => Ok(()),
        }
    }
}

impl Error for UnilogError {}

pub type UnilogResult<T> = Result<T, UnilogError>;
