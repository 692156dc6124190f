/// Reasons the form refuses to submit.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please complete all fields.")]
    Incomplete,
    #[error("a submission is already in flight")]
    Busy,
}

/// Outcome of a failed delivery to the injuries endpoint. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("submission worker stopped before reporting a result")]
    Abandoned,
}

#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("failed to read diagram image {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode diagram image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type SubmitResult = Result<(), SubmitError>;
