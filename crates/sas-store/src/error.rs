/// Errors from like storage and stream assembly.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or timed out. Retrying is safe.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// No local user with this nickname.
    #[error("unknown stream owner: {0}")]
    UnknownOwner(String),

    /// An activity names an actor that is not a local user.
    #[error("unknown actor: {0}")]
    UnknownActor(String),

    /// The nickname is already taken.
    #[error("nickname already registered: {0}")]
    DuplicateUser(String),

    /// A record was rejected before storage.
    #[error("invalid record: {0}")]
    Invalid(String),

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    /// Returns `true` if the failure is transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
