use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("no validation adapter registered for resource type '{0}'")]
    UnknownResourceType(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_yaml::Error> for ImportError {
    fn from(err: serde_yaml::Error) -> Self {
        ImportError::Parse(err.to_string())
    }
}

impl ImportError {
    /// True for failures caused by the document's content rather than by
    /// reading or parsing it.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ImportError::Validation(_) | ImportError::UnknownResourceType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_preserved_verbatim() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ImportError::from(io);
        match &err {
            ImportError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
        assert!(err.to_string().contains("no such file"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_yaml_error_maps_to_parse() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let err = ImportError::from(yaml_err);
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn test_validation_classification() {
        assert!(ImportError::Validation("x".into()).is_validation());
        assert!(ImportError::UnknownResourceType("Foo".into()).is_validation());
        assert!(!ImportError::Parse("x".into()).is_validation());
    }

    #[test]
    fn test_messages_are_lowercase() {
        let err = ImportError::InvalidFormat("bad tag".into());
        assert_eq!(err.to_string(), "invalid format: bad tag");
    }
}
