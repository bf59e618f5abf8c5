//! Conversions from common error types into `OptionFailure`.

use super::OptionFailure;

impl From<serde_json::Error> for OptionFailure {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e)
    }
}

impl From<String> for OptionFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for OptionFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
