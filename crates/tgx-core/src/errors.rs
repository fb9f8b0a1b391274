/// Core error type for the SDK domain layer.
///
/// Transport adapters map their own failures into [`Error::Transport`] so
/// callers see one error type regardless of which backend sent the request.
/// Nothing in this crate logs or swallows these; they always reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The raw record carries a constructor the peer model does not know.
    #[error("unexpected raw peer variant: {constructor}")]
    UnexpectedVariant { constructor: String },

    /// A peer type was built from a raw variant it cannot wrap.
    #[error("cannot build {expected} from {found}: {reason}")]
    InvalidConstruction {
        expected: &'static str,
        found: &'static str,
        reason: &'static str,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Opaque failure reported by the transport collaborator.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_error_names_both_sides() {
        let e = Error::InvalidConstruction {
            expected: "Group",
            found: "Channel",
            reason: "broadcast channels are not groups",
        };
        assert_eq!(
            e.to_string(),
            "cannot build Group from Channel: broadcast channels are not groups"
        );
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: Error = err.into();
        assert!(matches!(e, Error::Json(_)));
    }
}
