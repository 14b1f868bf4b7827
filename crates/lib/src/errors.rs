use thiserror::Error;

/// Errors raised while talking to a text-generation provider.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to AI provider failed: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    Deserialization(reqwest::Error),
    #[error("AI provider authentication failed: {0}")]
    Auth(String),
    #[error("Model not found: {0}")]
    ModelNotFound(String),
    #[error("AI provider quota exhausted: {0}")]
    QuotaExhausted(String),
    #[error("AI provider returned an error: {0}")]
    Api(String),
    #[error("AI provider returned no candidates")]
    EmptyResponse,
    #[error("No available model supports text generation")]
    NoUsableModel,
    #[error("API key is missing")]
    MissingApiKey,
}

/// Errors raised by session state transitions.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No document has been uploaded for this session")]
    NoDocument,
    #[error("History index {0} is out of range")]
    HistoryIndex(usize),
}
