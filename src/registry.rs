//! Registry of per-resource-type filter validation.
//!
//! The import config parser looks up a [`ValidationAdapter`] for every
//! resource it reads and asks it whether the filter is usable:
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use btp_import_core::AdapterRegistry;
//!
//! let registry = AdapterRegistry::with_defaults();
//! let adapter = registry.lookup("Subaccount").unwrap();
//! let filter = BTreeMap::from([("displayName".to_string(), "dev".to_string())]);
//! assert!(adapter.validate_criteria(&filter).is_ok());
//! assert!(registry.lookup("ServiceInstance").is_none());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{ResourceType, criterion};

static GUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("GUID pattern is a valid regex")
});

pub trait ValidationAdapter: Send + Sync {
    /// e.g. "Subaccount", "Entitlement"
    fn resource_type(&self) -> &str;

    /// Check a filter's criteria, returning a human readable reason on
    /// rejection.
    fn validate_criteria(&self, criteria: &BTreeMap<String, String>) -> Result<(), String>;
}

fn reject_unknown_keys(
    criteria: &BTreeMap<String, String>,
    known: &[&str],
) -> Result<(), String> {
    let unknown = criteria
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .join(", ");
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(format!("unsupported filter fields: {unknown}"))
    }
}

fn require_non_empty(criteria: &BTreeMap<String, String>, key: &str) -> Result<(), String> {
    match criteria.get(key) {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(format!("filter field '{key}' is required")),
    }
}

/// Subaccounts are matched by display name, optionally narrowed further.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubaccountAdapter;

impl ValidationAdapter for SubaccountAdapter {
    fn resource_type(&self) -> &str {
        ResourceType::Subaccount.as_str()
    }

    fn validate_criteria(&self, criteria: &BTreeMap<String, String>) -> Result<(), String> {
        reject_unknown_keys(
            criteria,
            &[
                criterion::DISPLAY_NAME,
                criterion::SUBDOMAIN,
                criterion::REGION,
                criterion::DESCRIPTION,
                criterion::USED_FOR_PRODUCTION,
                criterion::GLOBAL_ACCOUNT_GUID,
                criterion::DIRECTORY_GUID,
            ],
        )?;
        require_non_empty(criteria, criterion::DISPLAY_NAME)
    }
}

/// Entitlements need service and plan; a subaccount GUID, when given, must
/// look like one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitlementAdapter;

impl ValidationAdapter for EntitlementAdapter {
    fn resource_type(&self) -> &str {
        ResourceType::Entitlement.as_str()
    }

    fn validate_criteria(&self, criteria: &BTreeMap<String, String>) -> Result<(), String> {
        reject_unknown_keys(
            criteria,
            &[
                criterion::SERVICE_NAME,
                criterion::SERVICE_PLAN_NAME,
                criterion::SERVICE_PLAN_UNIQUE_IDENTIFIER,
                criterion::SUBACCOUNT_GUID,
            ],
        )?;
        require_non_empty(criteria, criterion::SERVICE_NAME)?;
        require_non_empty(criteria, criterion::SERVICE_PLAN_NAME)?;
        match criteria.get(criterion::SUBACCOUNT_GUID) {
            Some(guid) if !GUID_PATTERN.is_match(guid) => Err(format!(
                "filter field '{}' is not a GUID: '{guid}'",
                criterion::SUBACCOUNT_GUID
            )),
            _ => Ok(()),
        }
    }
}

/// Validation adapters keyed by resource type. Immutable once shared, so a
/// single registry can serve concurrent parsers.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn ValidationAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in subaccount and entitlement adapters.
    pub fn with_defaults() -> Self {
        AdapterRegistryBuilder::new()
            .add_adapter(Arc::new(SubaccountAdapter))
            .add_adapter(Arc::new(EntitlementAdapter))
            .build()
    }

    /// Register `adapter` for `resource_type`, returning the adapter it
    /// replaced, if any.
    pub fn register(
        &mut self,
        resource_type: impl Into<String>,
        adapter: Arc<dyn ValidationAdapter>,
    ) -> Option<Arc<dyn ValidationAdapter>> {
        self.adapters.insert(resource_type.into(), adapter)
    }

    pub fn lookup(&self, resource_type: &str) -> Option<Arc<dyn ValidationAdapter>> {
        self.adapters.get(resource_type).cloned()
    }

    /// Registered resource types, sorted.
    pub fn resource_types(&self) -> Vec<&str> {
        self.adapters.keys().map(String::as_str).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Debug for AdapterRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AdapterRegistry")
            .field("resource_types", &self.resource_types())
            .finish()
    }
}

/// Builds an [`AdapterRegistry`], keying each adapter by its own
/// [`ValidationAdapter::resource_type`]. Later adapters replace earlier ones
/// for the same type.
#[derive(Default)]
pub struct AdapterRegistryBuilder {
    adapters: Vec<Arc<dyn ValidationAdapter>>,
}

impl AdapterRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_adapter(mut self, adapter: Arc<dyn ValidationAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    pub fn build(self) -> AdapterRegistry {
        let mut registry = AdapterRegistry::new();
        for adapter in self.adapters {
            registry.register(adapter.resource_type().to_string(), adapter);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    const GUID: &str = "6aa4a3a2-5d2e-4bfc-9a4c-0f3c1b7e9d21";

    fn criteria(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    struct RejectAll;

    impl ValidationAdapter for RejectAll {
        fn resource_type(&self) -> &str {
            "Subaccount"
        }

        fn validate_criteria(&self, _criteria: &BTreeMap<String, String>) -> Result<(), String> {
            Err("rejected".to_string())
        }
    }

    #[test]
    fn test_defaults_register_both_types() {
        let registry = AdapterRegistry::with_defaults();
        assert_eq!(registry.resource_types(), vec!["Entitlement", "Subaccount"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("Subaccount").is_some());
        assert!(registry.lookup("subaccount").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = AdapterRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("Subaccount").is_none());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = AdapterRegistry::with_defaults();
        let replaced = registry.register("Subaccount", Arc::new(RejectAll));
        assert!(replaced.is_some());
        let adapter = registry.lookup("Subaccount").unwrap();
        assert_eq!(
            adapter.validate_criteria(&criteria(&[("displayName", "dev")])),
            Err("rejected".to_string())
        );
    }

    #[test]
    fn test_builder_last_adapter_wins() {
        let registry = AdapterRegistryBuilder::new()
            .add_adapter(Arc::new(SubaccountAdapter))
            .add_adapter(Arc::new(RejectAll))
            .build();
        assert_eq!(registry.len(), 1);
        let adapter = registry.lookup("Subaccount").unwrap();
        assert!(adapter.validate_criteria(&BTreeMap::new()).is_err());
    }

    #[test]
    fn test_debug_lists_types() {
        let registry = AdapterRegistry::with_defaults();
        assert_eq!(
            format!("{registry:?}"),
            r#"AdapterRegistry { resource_types: ["Entitlement", "Subaccount"] }"#
        );
    }

    #[parameterized(
        name_only = { &[("displayName", "dev")], true },
        name_and_region = { &[("displayName", "dev"), ("region", "eu10")], true },
        missing_name = { &[("region", "eu10")], false },
        empty_name = { &[("displayName", "")], false },
        unknown_field = { &[("displayName", "dev"), ("owner", "me")], false },
    )]
    fn test_subaccount_adapter(pairs: &[(&str, &str)], ok: bool) {
        let result = SubaccountAdapter.validate_criteria(&criteria(pairs));
        assert_eq!(result.is_ok(), ok, "{result:?}");
    }

    #[parameterized(
        service_and_plan = { &[("serviceName", "hana"), ("servicePlanName", "standard")], true },
        with_guid = { &[("serviceName", "hana"), ("servicePlanName", "standard"), ("subaccountGuid", GUID)], true },
        bad_guid = { &[("serviceName", "hana"), ("servicePlanName", "standard"), ("subaccountGuid", "abc")], false },
        missing_plan = { &[("serviceName", "hana")], false },
        unknown_field = { &[("serviceName", "hana"), ("servicePlanName", "standard"), ("amount", "2")], false },
    )]
    fn test_entitlement_adapter(pairs: &[(&str, &str)], ok: bool) {
        let result = EntitlementAdapter.validate_criteria(&criteria(pairs));
        assert_eq!(result.is_ok(), ok, "{result:?}");
    }

    #[test]
    fn test_unknown_fields_are_named() {
        let err = SubaccountAdapter
            .validate_criteria(&criteria(&[("displayName", "dev"), ("b", "1"), ("a", "2")]))
            .unwrap_err();
        assert_eq!(err, "unsupported filter fields: a, b");
    }
}
