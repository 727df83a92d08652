use thiserror::Error;

/// Specific kinds of parsing errors that can occur when reading JSON text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("invalid json literal at byte {0}")]
    MalformedLiteral(usize),

    #[error("invalid json number at byte {0}")]
    MalformedNumber(usize),

    #[error("unterminated json string starting at byte {0}")]
    UnterminatedString(usize),

    #[error("unsupported escape sequence at byte {0}")]
    InvalidEscape(usize),

    #[error("invalid json array at byte {0}")]
    MalformedArray(usize),

    #[error("invalid json object at byte {0}")]
    MalformedObject(usize),

    #[error("unexpected character {0:#02x} at byte {1}")]
    UnexpectedCharacter(u8, usize),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("trailing content after top-level value: {remaining} bytes remaining")]
    TrailingContent { remaining: usize },
}

/// Error type returned when parsing JSON text fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error: {kind}")]
pub struct ParseError {
    /// The specific kind of parse error that occurred.
    kind: ParseErrorKind,
}

impl ParseError {
    /// Creates a new ParseError with the given kind.
    pub const fn new(kind: ParseErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the specific kind of parse error that occurred.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type returned when a typed accessor is called on a value holding a
/// different variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("type mismatch: expected {expected}, got {actual}")]
pub struct TypeMismatch {
    /// The variant the caller asked for.
    pub expected: &'static str,
    /// The variant actually stored.
    pub actual: &'static str,
}
