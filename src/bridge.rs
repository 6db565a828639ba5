use std::path::Path;

use crate::error::ImportError;
use crate::import_config::{ImportConfig, ImportConfigParser};
use crate::registry::AdapterRegistry;

/// Load a configuration in the newer import format and validate every
/// resource filter through `registry`.
///
/// Callers still on the legacy format use [`crate::parse_config`]; this is
/// the entry point to migrate to. Errors from the parser are returned as-is.
///
/// Example:
/// ```rust,no_run
/// use btp_import_core::{AdapterRegistry, load_and_validate};
///
/// let registry = AdapterRegistry::with_defaults();
/// let config = load_and_validate("config.yaml", &registry).unwrap();
/// println!("{} resources", config.resources.len());
/// ```
pub fn load_and_validate(
    path: impl AsRef<Path>,
    registry: &AdapterRegistry,
) -> Result<ImportConfig, ImportError> {
    ImportConfigParser::new(registry).load_and_validate_cli_config(path)
}
