use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Unknown export format [{name}], available formats: {available}")]
    UnknownFormat {
        name: String,
        available: String
    }
}
