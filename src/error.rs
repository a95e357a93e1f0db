use failure::Fail;
use std::fmt;

/// Sometimes, bad stuff happens.
///
/// These are caller or data-source mistakes: malformed text, out of range arguments.  They are
/// never recovered from inside the library.  Illegal chess moves are reported separately through
/// `EngineError`.
#[derive(Debug, Fail, PartialEq, Eq, Clone)]
pub enum Error {
    /// The FEN string is invalid
    #[fail(display = "Invalid FEN string '{}': {}", fen, reason)]
    InvalidFen { fen: String, reason: String },

    /// An attempt was made to convert a string not equal to "a1".."h8" or an index >= 64 to a
    /// square
    #[fail(display = "The string or index specified does not represent a valid square")]
    InvalidSquare,

    /// A constructor or setter was handed a value outside of its domain
    #[fail(display = "Invalid argument: {}", reason)]
    InvalidArgument { reason: String },

    /// The text is not a coordinate move like "e2e4" or "e7e8q"
    #[fail(
        display = "Invalid UCI move '{}'.  Expected something like 'e2e4' or 'e7e8q'",
        text
    )]
    InvalidUciMove { text: String },

    /// The text does not match any legal move in standard algebraic notation
    #[fail(display = "Invalid SAN move '{}'", text)]
    InvalidSanMove { text: String },

    /// The PGN text could not be replayed
    #[fail(display = "Invalid PGN: {}", reason)]
    InvalidPgn { reason: String },
}

impl Error {
    pub(crate) fn invalid_fen(fen: &str, reason: impl Into<String>) -> Error {
        Error::InvalidFen {
            fen: fen.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Error {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Why did the engine refuse to do what was asked?
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum EngineErrorCode {
    Unknown,
    IllegalMove,
    InvalidMoveFormat,
}

impl fmt::Display for EngineErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EngineErrorCode::Unknown => write!(f, "unknown"),
            EngineErrorCode::IllegalMove => write!(f, "illegal move"),
            EngineErrorCode::InvalidMoveFormat => write!(f, "invalid move format"),
        }
    }
}

/// A chess legality failure.  Unlike `Error`, this is an expected outcome that callers check
/// frequently (every candidate move in the legal move filter goes through it).
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
#[fail(display = "{}: {}", code, message)]
pub struct EngineError {
    code: EngineErrorCode,
    message: String,
}

impl EngineError {
    pub fn new(code: EngineErrorCode, message: impl Into<String>) -> EngineError {
        EngineError {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for an `IllegalMove` error.
    pub fn illegal(message: impl Into<String>) -> EngineError {
        EngineError::new(EngineErrorCode::IllegalMove, message)
    }

    /// Shorthand for an `InvalidMoveFormat` error.
    pub fn invalid_format(message: impl Into<String>) -> EngineError {
        EngineError::new(EngineErrorCode::InvalidMoveFormat, message)
    }

    pub fn code(&self) -> EngineErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The result of a legality-checked engine operation.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_display() {
        let err = EngineError::illegal("No piece on the source square.");
        assert_eq!(err.code(), EngineErrorCode::IllegalMove);
        assert_eq!(
            err.to_string(),
            "illegal move: No piece on the source square."
        );
    }

    #[test]
    fn fen_error_echoes_input() {
        let err = Error::invalid_fen("8/8 w", "expected 8 ranks");
        assert_eq!(
            err.to_string(),
            "Invalid FEN string '8/8 w': expected 8 ranks"
        );
    }
}
