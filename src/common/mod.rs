/// Simplifies the return signature when a function can fail and we don't care about the specific error type
pub type ResultError<T> = Result<T, Box<dyn std::error::Error>>;

/// A plain message error, used to surface parse problems at the prompt
#[derive(Debug, PartialEq)]
pub(crate) struct Error {
    message: String,
}

impl Error {
    pub(crate) fn new(message: String) -> Error {
        Error { message }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
