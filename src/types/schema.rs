//! Deserialized shape of a legacy import configuration file.
//!
//! ```yaml
//! resources:
//!   - subaccount:
//!       displayName: dev
//!       region: eu10
//!       managementPolicies: [Observe]
//!   - entitlement:
//!       serviceName: hana
//!       servicePlanName: standard
//!       subaccountGuid: 6aa4a3a2-...
//!       managementPolicies: ["*"]
//! providerConfigRef:
//!   name: default
//! ```
//!
//! Only structure is checked here. Business rules live in the validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::IdentifiedDescriptor;

use super::filter::ResourceType;
use super::management::ManagementPolicy;
use super::provider::ProviderConfigRef;

/// Read a string field where an explicit YAML null (`~`, `null`) counts as
/// empty rather than as the literal text.
pub(super) fn null_as_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Option::unwrap_or_default)
}

/// Root of a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    #[serde(default)]
    pub provider_config_ref: ProviderConfigRef,
}

/// One entry of the `resources` list.
///
/// The file format allows both keys on the same entry; the compiler and the
/// validator only ever see the entry through [`ResourceEntry::descriptors`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<SubaccountConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitlement: Option<EntitlementConfig>,
}

impl ResourceEntry {
    pub fn subaccount(config: SubaccountConfig) -> Self {
        ResourceEntry {
            subaccount: Some(config),
            entitlement: None,
        }
    }

    pub fn entitlement(config: EntitlementConfig) -> Self {
        ResourceEntry {
            subaccount: None,
            entitlement: Some(config),
        }
    }

    /// The descriptors present on this entry, subaccount first.
    pub fn descriptors(&self) -> impl Iterator<Item = Descriptor<'_>> {
        self.subaccount
            .as_ref()
            .map(Descriptor::Subaccount)
            .into_iter()
            .chain(self.entitlement.as_ref().map(Descriptor::Entitlement))
    }
}

/// A single resource descriptor borrowed from a [`ResourceEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor<'a> {
    Subaccount(&'a SubaccountConfig),
    Entitlement(&'a EntitlementConfig),
}

impl Descriptor<'_> {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Descriptor::Subaccount(_) => SubaccountConfig::resource_type(),
            Descriptor::Entitlement(_) => EntitlementConfig::resource_type(),
        }
    }

    pub fn is_identified(&self) -> bool {
        match self {
            Descriptor::Subaccount(config) => config.is_identified(),
            Descriptor::Entitlement(config) => config.is_identified(),
        }
    }

    pub fn policy_violation(&self) -> Option<String> {
        match self {
            Descriptor::Subaccount(config) => config.policy_violation(),
            Descriptor::Entitlement(config) => config.policy_violation(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubaccountConfig {
    /// The only identifying field of a subaccount
    #[serde(default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subaccount_admins: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_for_production: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_account_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_policies: Option<Vec<ManagementPolicy>>,
}

impl IdentifiedDescriptor for SubaccountConfig {
    fn resource_type() -> ResourceType {
        ResourceType::Subaccount
    }

    fn is_identified(&self) -> bool {
        !self.display_name.is_empty()
    }

    fn management_policies(&self) -> Option<&[ManagementPolicy]> {
        self.management_policies.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementConfig {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_plan_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_plan_unique_identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subaccount_guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_policies: Option<Vec<ManagementPolicy>>,
}

impl IdentifiedDescriptor for EntitlementConfig {
    fn resource_type() -> ResourceType {
        ResourceType::Entitlement
    }

    /// Any one of service name, plan name or subaccount GUID identifies an
    /// entitlement.
    fn is_identified(&self) -> bool {
        !self.service_name.is_empty()
            || !self.service_plan_name.is_empty()
            || !self.subaccount_guid.is_empty()
    }

    fn management_policies(&self) -> Option<&[ManagementPolicy]> {
        self.management_policies.as_deref()
    }
}
