//! Provider configuration reference and the legacy configuration gate.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::error::ImportError;

use super::schema::{ResourceEntry, null_as_empty};

/// Named pointer to provider credentials held elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct ProviderConfigRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

impl ProviderConfigRef {
    pub fn new(name: impl Into<String>) -> Self {
        ProviderConfigRef { name: name.into() }
    }
}

/// The provider side of a compiled legacy configuration. Keeps the original
/// descriptors so [`ProviderConfig::validate`] can inspect them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    resources: Vec<ResourceEntry>,
    provider_config_ref: ProviderConfigRef,
}

impl ProviderConfig {
    pub fn new(resources: Vec<ResourceEntry>, provider_config_ref: ProviderConfigRef) -> Self {
        ProviderConfig {
            resources,
            provider_config_ref,
        }
    }

    pub fn provider_config_ref(&self) -> &ProviderConfigRef {
        &self.provider_config_ref
    }

    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }

    /// Check every entry, then the provider reference. Stops at the first
    /// violation: within an entry the subaccount is checked before the
    /// entitlement, and the provider reference is checked last.
    pub fn check(&self) -> Result<(), ImportError> {
        for (index, entry) in self.resources.iter().enumerate() {
            for descriptor in entry.descriptors() {
                if let Some(violation) = descriptor.policy_violation() {
                    return Err(ImportError::Validation(format!(
                        "resource {index}: {violation}"
                    )));
                }
            }
        }

        if self.provider_config_ref.name.is_empty() {
            return Err(ImportError::Validation(
                "providerConfigRef.name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Boolean form of [`ProviderConfig::check`]. The reason for a rejection
    /// is logged.
    pub fn validate(&self) -> bool {
        match self.check() {
            Ok(()) => {
                debug!(
                    event = "Validate",
                    phase = "Result",
                    resources = self.resources.len(),
                    provider_config = self.provider_config_ref.name.as_str(),
                    valid = true
                );
                true
            }
            Err(err) => {
                warn!(event = "Validate", phase = "Result", valid = false, reason = %err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntitlementConfig, ManagementPolicy, SubaccountConfig};
    use yare::parameterized;

    fn policies(tags: &[&str]) -> Option<Vec<ManagementPolicy>> {
        Some(tags.iter().map(|t| ManagementPolicy::new(*t)).collect())
    }

    fn subaccount(name: &str, tags: Option<Vec<ManagementPolicy>>) -> ResourceEntry {
        ResourceEntry::subaccount(SubaccountConfig {
            display_name: name.to_string(),
            management_policies: tags,
            ..Default::default()
        })
    }

    fn entitlement(
        service: &str,
        plan: &str,
        guid: &str,
        tags: Option<Vec<ManagementPolicy>>,
    ) -> ResourceEntry {
        ResourceEntry::entitlement(EntitlementConfig {
            service_name: service.to_string(),
            service_plan_name: plan.to_string(),
            subaccount_guid: guid.to_string(),
            management_policies: tags,
            ..Default::default()
        })
    }

    #[parameterized(
        named_with_policies = { "acct1", policies(&["Observe"]), true },
        named_without_policies = { "acct1", None, false },
        named_with_empty_policies = { "acct1", policies(&[]), false },
        unnamed_without_policies = { "", None, true },
        unnamed_with_policies = { "", policies(&["Observe"]), true },
    )]
    fn test_subaccount_policy_requirement(
        name: &str,
        tags: Option<Vec<ManagementPolicy>>,
        valid: bool,
    ) {
        let config =
            ProviderConfig::new(vec![subaccount(name, tags)], ProviderConfigRef::new("cfg1"));
        assert_eq!(config.validate(), valid);
    }

    #[parameterized(
        service_only = { "hana", "", "", None, false },
        plan_only = { "", "standard", "", None, false },
        guid_only = { "", "", "guid", None, false },
        all_with_policies = { "hana", "standard", "guid", policies(&["*"]), true },
        none_without_policies = { "", "", "", None, true },
    )]
    fn test_entitlement_policy_requirement(
        service: &str,
        plan: &str,
        guid: &str,
        tags: Option<Vec<ManagementPolicy>>,
        valid: bool,
    ) {
        let config = ProviderConfig::new(
            vec![entitlement(service, plan, guid, tags)],
            ProviderConfigRef::new("cfg1"),
        );
        assert_eq!(config.validate(), valid);
    }

    #[test]
    fn test_empty_provider_name_is_invalid() {
        let config = ProviderConfig::new(
            vec![subaccount("acct1", policies(&["Observe"]))],
            ProviderConfigRef::default(),
        );
        assert!(!config.validate());
        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("providerConfigRef.name"));
    }

    #[parameterized(
        tilde = { "name: ~" },
        null = { "name: null" },
        empty = { "name:" },
    )]
    fn test_null_provider_name_is_empty(yaml: &str) {
        let reference: ProviderConfigRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(reference.name, "");
    }

    #[test]
    fn test_empty_config_with_provider_is_valid() {
        let config = ProviderConfig::new(Vec::new(), ProviderConfigRef::new("cfg1"));
        assert!(config.validate());
    }

    #[test]
    fn test_first_violation_wins() {
        let config = ProviderConfig::new(
            vec![
                subaccount("ok", policies(&["Observe"])),
                entitlement("hana", "", "", None),
                subaccount("broken", None),
            ],
            ProviderConfigRef::default(),
        );
        match config.check() {
            Err(ImportError::Validation(msg)) => {
                assert_eq!(
                    msg,
                    "resource 1: Entitlement configuration is missing management policies"
                );
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_subaccount_checked_before_entitlement_in_same_entry() {
        let entry = ResourceEntry {
            subaccount: Some(SubaccountConfig {
                display_name: "acct1".to_string(),
                ..Default::default()
            }),
            entitlement: Some(EntitlementConfig {
                service_name: "hana".to_string(),
                ..Default::default()
            }),
        };
        let config = ProviderConfig::new(vec![entry], ProviderConfigRef::new("cfg1"));
        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("Subaccount"));
    }
}
