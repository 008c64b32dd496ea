use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("API key not configured. Set GEMINI_API_KEY environment variable or run: photoscene config set api.key <your-key>")]
    MissingApiKey,

    #[error("No photo selected. Provide an image file before rendering")]
    MissingImage,

    #[error("API error: {message}")]
    ApiError {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Image processing error: {0}")]
    ImageError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Variation batch failed: {0}")]
    VariationFailed(String),

    #[error("Request timeout")]
    Timeout,
}

impl From<reqwest::Error> for SceneError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return SceneError::Timeout;
        }
        SceneError::ApiError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
