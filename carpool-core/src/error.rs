use uuid::Uuid;

/// Engine-wide error type.
///
/// Every operation surfaces its failure through this enum; nothing is
/// logged-and-swallowed inside the engine, so API layers always get the
/// reason to render.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: Uuid },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error("not enough seats available, only {available} seat(s) remaining")]
    InsufficientSeats { requested: u8, available: u8 },

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Coarse classification for callers that render errors by class
/// (404 vs 400/403 vs 409 style).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    BusinessRule,
    Internal,
}

impl Error {
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        Error::NotFound { resource, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Error::BusinessRule(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Validation(_) => ErrorKind::Validation,
            Error::BusinessRule(_) | Error::InsufficientSeats { .. } => ErrorKind::BusinessRule,
            Error::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// Failures raised by repository implementations on writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    Missing(Uuid),

    #[error("duplicate record: {0}")]
    Duplicate(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_seats_names_remaining_count() {
        let err = Error::InsufficientSeats {
            requested: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "not enough seats available, only 1 seat(s) remaining"
        );
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
    }

    #[test]
    fn kinds_map_to_taxonomy() {
        let id = Uuid::new_v4();
        assert_eq!(Error::not_found("ride", id).kind(), ErrorKind::NotFound);
        assert_eq!(Error::validation("bad").kind(), ErrorKind::Validation);
        assert_eq!(Error::business_rule("conflict").kind(), ErrorKind::BusinessRule);
        assert_eq!(
            Error::Storage(StoreError::Missing(id)).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn not_found_names_resource_and_id() {
        let id = Uuid::new_v4();
        let err = Error::not_found("booking", id);
        assert_eq!(err.to_string(), format!("booking not found: {id}"));
    }
}
