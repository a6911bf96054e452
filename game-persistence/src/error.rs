use thiserror::Error;

/// Failures at the store boundary. Callers treat every variant as a
/// best-effort persistence failure: in-memory game state is never rolled back
/// because one of these surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("series {id} update conflicted after retries")]
    Conflict { id: String },

    #[error("update rejected: {0}")]
    Rejected(String),

    #[error("stored document is corrupt: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("stored document is corrupt: {0}")]
    Corrupt(String),
}
