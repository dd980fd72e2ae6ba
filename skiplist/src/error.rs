use std::error::Error;
use std::fmt;

use config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipListError {
    /// The value is already in the list.
    DuplicateValue,
    /// The value is not in the list.
    ValueNotFound,
    /// A level ceiling, probability or level generator produced something unusable.
    InvalidConfiguration(String),
    /// The value cannot be ordered against the values in the list.
    Incomparable,
}

impl fmt::Display for SkipListError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SkipListError::DuplicateValue => f.write_str("value already present"),
            SkipListError::ValueNotFound => f.write_str("value not found"),
            SkipListError::InvalidConfiguration(ref reason) => {
                write!(f, "invalid configuration: {}", reason)
            }
            SkipListError::Incomparable => f.write_str("value cannot be ordered"),
        }
    }
}

impl Error for SkipListError {}

impl From<ConfigError> for SkipListError {
    fn from(e: ConfigError) -> SkipListError {
        SkipListError::InvalidConfiguration(e.to_string())
    }
}
