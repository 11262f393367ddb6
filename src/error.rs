use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request method. It must be either 'PUT', 'POST' or 'GET'. Request method called was: {0}")]
    InvalidRequestMethod(String),

    #[error("VMstore error {code}: {message}")]
    Server { message: String, code: String },

    #[error("Login rejected: {0}")]
    LoginRejected(String),

    #[error("Error reaching VMstore: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Error decoding response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
