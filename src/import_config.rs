//! The newer import configuration format, validated through an
//! [`AdapterRegistry`].
//!
//! ```yaml
//! providerConfigRef:
//!   name: default
//! resources:
//!   - type: Subaccount
//!     filter:
//!       displayName: dev
//!     managementPolicies: [Observe]
//!   - type: Entitlement
//!     filter:
//!       serviceName: hana
//!       servicePlanName: standard
//!     managementPolicies: ["*"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ImportError;
use crate::loader;
use crate::registry::AdapterRegistry;
use crate::types::{ManagementAction, ProviderConfigRef};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportConfig {
    #[serde(default)]
    pub provider_config_ref: ProviderConfigRef,
    #[serde(default)]
    pub resources: Vec<ImportResource>,
}

/// One resource to import: its type, the filter selecting it, and the
/// actions allowed on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub filter: BTreeMap<String, String>,
    #[serde(default)]
    pub management_policies: Vec<ManagementAction>,
}

/// Reads import configurations and validates them against the adapters in a
/// registry.
#[derive(Debug, Clone, Copy)]
pub struct ImportConfigParser<'a> {
    registry: &'a AdapterRegistry,
}

impl<'a> ImportConfigParser<'a> {
    pub fn new(registry: &'a AdapterRegistry) -> Self {
        ImportConfigParser { registry }
    }

    /// Read, parse and validate an import configuration file.
    pub fn load_and_validate_cli_config(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ImportConfig, ImportError> {
        let config: ImportConfig = loader::read_document(path)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Parse and validate configuration text already in memory.
    pub fn parse_and_validate(&self, text: &str) -> Result<ImportConfig, ImportError> {
        let config: ImportConfig = loader::parse_document(text.as_bytes())?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Validate a parsed configuration, reporting the first problem found.
    pub fn validate(&self, config: &ImportConfig) -> Result<(), ImportError> {
        if config.provider_config_ref.name.is_empty() {
            return Err(ImportError::Validation(
                "providerConfigRef.name must not be empty".to_string(),
            ));
        }

        for (index, resource) in config.resources.iter().enumerate() {
            self.validate_resource(index, resource)?;
        }

        debug!(
            event = "Validate",
            phase = "ImportConfig",
            resources = config.resources.len(),
            provider_config = config.provider_config_ref.name.as_str()
        );
        Ok(())
    }

    fn validate_resource(
        &self,
        index: usize,
        resource: &ImportResource,
    ) -> Result<(), ImportError> {
        let adapter = self
            .registry
            .lookup(&resource.resource_type)
            .ok_or_else(|| ImportError::UnknownResourceType(resource.resource_type.clone()))?;

        if resource.management_policies.is_empty() {
            return Err(ImportError::Validation(format!(
                "resource {index} ({}): managementPolicies must not be empty",
                resource.resource_type
            )));
        }

        if let Some(custom) = resource.management_policies.iter().find(|a| a.is_custom()) {
            return Err(ImportError::Validation(format!(
                "resource {index} ({}): unknown management policy '{custom}'",
                resource.resource_type
            )));
        }

        adapter
            .validate_criteria(&resource.filter)
            .map_err(|reason| {
                ImportError::Validation(format!(
                    "resource {index} ({}): {reason}",
                    resource.resource_type
                ))
            })?;

        debug!(
            event = "Validate",
            phase = "Resource",
            index = index,
            resource_type = resource.resource_type.as_str()
        );
        Ok(())
    }
}
