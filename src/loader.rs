use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ImportError;
use crate::types::Config;

/// Deserialize a legacy configuration document.
///
/// Malformed YAML, or YAML of the wrong shape, is mapped into
/// `ImportError::Parse`. No business rules are checked.
///
/// Example:
/// ```rust
/// use btp_import_core::parse_config_document;
/// let text = r#"
/// resources:
///   - subaccount:
///       displayName: dev
///       managementPolicies: [Observe]
/// providerConfigRef:
///   name: default
/// "#;
/// let config = parse_config_document(text).unwrap();
/// assert_eq!(config.resources.len(), 1);
/// ```
pub fn parse_config_document(text: &str) -> Result<Config, ImportError> {
    parse_document(text.as_bytes())
}

/// Read and deserialize a legacy configuration file.
pub fn read_config(path: impl AsRef<Path>) -> Result<Config, ImportError> {
    read_document(path)
}

pub(crate) fn read_document<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, ImportError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(
        event = "Load",
        phase = "Read",
        path = %path.display(),
        bytes = bytes.len()
    );
    parse_document(&bytes)
}

pub(crate) fn parse_document<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ImportError> {
    Ok(serde_yaml::from_slice(bytes)?)
}
