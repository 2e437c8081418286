use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read or written.
    Io(String),
    /// Settings file is not valid JSON for `Settings`.
    Parse(String),
    /// A value parsed but is out of range (e.g. minZoom > maxZoom).
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "settings IO error: {msg}"),
            Self::Parse(msg) => write!(f, "settings parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
