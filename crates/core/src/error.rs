use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The scraper reported that the page held no usable data.
    Scrape(String),
    /// Malformed date text, id-subset or batch descriptor.
    Parse(String),
    StoreIo(std::io::Error),
    StoreFormat { line: usize, message: String },
    ConfigParse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Scrape(msg) => write!(f, "Scrape failed: {}", msg),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::StoreIo(err) => write!(f, "Store IO error: {}", err),
            Error::StoreFormat { line, message } => {
                write!(f, "Store format error on line {}: {}", line, message)
            }
            Error::ConfigParse(msg) => write!(f, "Configuration parse error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::StoreIo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StoreIo(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
