use thiserror::Error;

/// Why a path could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    /// The named resource does not exist or cannot be reached
    #[error("path resource not found: {identifier}")]
    NotFound { identifier: String },

    /// The resource exists but is not a usable point sequence
    #[error("failed to parse path resource {identifier}: {reason}")]
    Parse { identifier: String, reason: String },

    /// The resource exists but reading it failed
    #[error("failed to read path resource {identifier}")]
    Io {
        identifier: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
        }
    }

    pub fn parse(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Identifier of the resource that failed
    pub fn identifier(&self) -> &str {
        match self {
            Self::NotFound { identifier }
            | Self::Parse { identifier, .. }
            | Self::Io { identifier, .. } => identifier,
        }
    }
}

/// Sampling failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    /// Fewer than two points, nothing to travel along
    #[error("path has {len} point(s), at least 2 are required")]
    DegeneratePath { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_messages_name_the_resource() {
        let err = LoadError::not_found("curve.json");
        assert_eq!(err.to_string(), "path resource not found: curve.json");
        assert_eq!(err.identifier(), "curve.json");

        let err = LoadError::parse("curve.json", "empty point list");
        assert!(err.to_string().contains("empty point list"));
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;

        let err = LoadError::Io {
            identifier: "curve.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.identifier(), "curve.json");
    }

    #[test]
    fn degenerate_path_message() {
        let err = SampleError::DegeneratePath { len: 1 };
        assert_eq!(err.to_string(), "path has 1 point(s), at least 2 are required");
    }
}
