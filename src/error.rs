use std::fmt;

#[derive(Debug)]
pub enum CatalogError {
    InvalidConfiguration(String),
    InvalidDocument(String),
    Io(std::io::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidConfiguration(message) => {
                write!(f, "invalid configuration: {}", message)
            }
            CatalogError::InvalidDocument(message) => {
                write!(f, "invalid catalog document: {}", message)
            }
            CatalogError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(value: std::io::Error) -> Self {
        CatalogError::Io(value)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        CatalogError::InvalidDocument(value.to_string())
    }
}
