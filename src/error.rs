use crate::state::QueryKind;

#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("Weaviate client not initialized. Call connect() first.")]
    NotConnected,

    #[error("failed to build Weaviate client: {0}")]
    Connection(String),

    #[error("{kind} query failed: {message}")]
    Query { kind: QueryKind, message: String },

    #[error("not an image: {0}")]
    InvalidImage(String),

    #[error("cache error: {0}")]
    Cache(String),
}

impl ArenaError {
    pub fn query(kind: QueryKind, err: impl std::fmt::Display) -> Self {
        ArenaError::Query {
            kind,
            message: err.to_string(),
        }
    }

    pub fn is_not_connected(&self) -> bool {
        matches!(self, ArenaError::NotConnected)
    }
}
