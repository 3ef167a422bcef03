//! FILENAME: core/parser/src/error.rs

use thiserror::Error;

/// What went wrong. The message is the part before the shared context suffix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Expected one or more integers.")]
    MissingDigits,

    #[error("Expected one or more integers after decimal point.")]
    MissingFraction,

    #[error("Expected operator.")]
    ExpectedOperator,

    #[error("Expected comma.")]
    ExpectedComma,

    #[error("Expected opening parenthesis.")]
    ExpectedOpeningParenthesis,

    #[error("Expected closing parenthesis.")]
    ExpectedClosingParenthesis,

    #[error("Expected closing square bracket.")]
    ExpectedClosingBracket,

    #[error("Expected expression.")]
    ExpectedExpression,

    #[error("Variable {0} is not defined.")]
    UndefinedVariable(String),

    #[error("Expression nested deeper than {0} levels.")]
    NestingTooDeep(usize),
}

/// A parse failure with the input consumed so far and the character found.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} Parsed \"{parsed}\". Got \"{found}\"")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub parsed: String,
    /// The character under the cursor, empty at end of input.
    pub found: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, parsed: impl Into<String>, found: Option<char>) -> Self {
        ParseError {
            kind,
            parsed: parsed.into(),
            found: found.map(String::from).unwrap_or_default(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
