use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupportsError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("can not parse value to carbon: {text:?}")]
    Parse { text: String },
    #[error("invalid layout: {layout:?}")]
    Format { layout: String },
    #[error("Number error: {0}")]
    Number(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SupportsError>;

// Helper conversions
impl From<rusqlite::Error> for SupportsError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<serde_json::Error> for SupportsError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e.to_string()) }
}
impl From<config::ConfigError> for SupportsError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::num::ParseIntError> for SupportsError {
    fn from(e: std::num::ParseIntError) -> Self { Self::Number(e.to_string()) }
}
impl From<std::num::ParseFloatError> for SupportsError {
    fn from(e: std::num::ParseFloatError) -> Self { Self::Number(e.to_string()) }
}
