pub type GrowResult<T> = Result<T, GrowError>;

#[derive(thiserror::Error, Debug)]
pub enum GrowError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GrowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GrowError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
