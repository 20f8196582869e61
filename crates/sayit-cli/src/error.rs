//! CLI-specific error types and exit-code mappings.

use sayit_core::SpeakError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing or validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A speech session failed (the taxonomy lives in the core).
    #[error("{0}")]
    Speak(#[from] SpeakError),

    /// Audio output could not be initialised.
    #[error("Audio error: {0}")]
    Audio(String),

    /// IO error (terminal, stdin, preferences path).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 2: Misuse of shell command (invalid arguments, empty input)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) | Self::Speak(SpeakError::EmptyText) => 2, // EX_USAGE
            Self::Speak(SpeakError::Transport(_)) => 69,                  // EX_UNAVAILABLE
            Self::Speak(SpeakError::Service(_)) => 76,                    // EX_PROTOCOL
            Self::Speak(SpeakError::Media(_)) => 65,                      // EX_DATAERR
            Self::Audio(_) => 69,                                         // EX_UNAVAILABLE
            Self::Io(_) => 74,                                            // EX_IOERR
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_taxonomy() {
        assert_eq!(CliError::Speak(SpeakError::EmptyText).exit_code(), 2);
        assert_eq!(
            CliError::Speak(SpeakError::Transport("x".into())).exit_code(),
            69
        );
        assert_eq!(
            CliError::Speak(SpeakError::Service("x".into())).exit_code(),
            76
        );
        assert_eq!(CliError::Speak(SpeakError::Media("x".into())).exit_code(), 65);
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
    }
}
