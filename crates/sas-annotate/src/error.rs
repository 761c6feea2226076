use sas_store::StoreError;

/// Errors that fail an annotation request.
///
/// None of these is ever turned into a default `liked` value.
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// The batched like lookup failed. The whole request may be retried.
    #[error("like store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// The like store failed in a way a retry will not fix.
    #[error("like store failed: {0}")]
    Store(#[source] StoreError),

    /// A stream item has no identity usable as a lookup key, or the wrong
    /// shape for its stream.
    #[error("malformed stream item at index {index}: {reason}")]
    MalformedItem { index: usize, reason: String },

    /// The viewer context violates the credential resolver's contract.
    #[error("invalid viewer context: {0}")]
    InvalidViewer(String),
}

impl AnnotateError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedItem {
            index,
            reason: reason.into(),
        }
    }

    /// Returns `true` if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl From<StoreError> for AnnotateError {
    fn from(err: StoreError) -> Self {
        if err.is_transient() {
            Self::StoreUnavailable(err)
        } else {
            Self::Store(err)
        }
    }
}

/// Result alias for annotation operations.
pub type AnnotateResult<T> = Result<T, AnnotateError>;
