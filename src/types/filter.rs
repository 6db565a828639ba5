//! Compiled resource filters handed to the import engine.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumDiscriminants, EnumString, IntoStaticStr};
use utoipa::ToSchema;

use super::management::ManagementAction;
use super::schema::{EntitlementConfig, SubaccountConfig};

/// Criterion names used as keys in [`Filter::criteria`].
pub mod criterion {
    pub const DISPLAY_NAME: &str = "displayName";
    pub const SUBDOMAIN: &str = "subdomain";
    pub const REGION: &str = "region";
    pub const DESCRIPTION: &str = "description";
    pub const USED_FOR_PRODUCTION: &str = "usedForProduction";
    pub const GLOBAL_ACCOUNT_GUID: &str = "globalAccountGuid";
    pub const DIRECTORY_GUID: &str = "directoryGuid";

    pub const SERVICE_NAME: &str = "serviceName";
    pub const SERVICE_PLAN_NAME: &str = "servicePlanName";
    pub const SERVICE_PLAN_UNIQUE_IDENTIFIER: &str = "servicePlanUniqueIdentifier";
    pub const SUBACCOUNT_GUID: &str = "subaccountGuid";
}

/// Empty strings count as "not specified".
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Match data for a subaccount. Optional strings are never `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubaccountFilter {
    pub display_name: String,
    pub subdomain: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
    pub beta_enabled: Option<bool>,
    pub labels: Option<BTreeMap<String, Vec<String>>>,
    pub subaccount_admins: Option<Vec<String>>,
    pub used_for_production: Option<String>,
    pub global_account_guid: Option<String>,
    pub directory_guid: Option<String>,
}

impl SubaccountFilter {
    pub fn from_config(config: &SubaccountConfig) -> Self {
        SubaccountFilter {
            display_name: config.display_name.clone(),
            subdomain: non_empty(config.subdomain.as_ref()),
            region: non_empty(config.region.as_ref()),
            description: non_empty(config.description.as_ref()),
            beta_enabled: config.beta_enabled,
            labels: config.labels.clone(),
            subaccount_admins: config.subaccount_admins.clone(),
            used_for_production: non_empty(config.used_for_production.as_ref()),
            global_account_guid: non_empty(config.global_account_guid.as_ref()),
            directory_guid: non_empty(config.directory_guid.as_ref()),
        }
    }

    pub fn criteria(&self) -> BTreeMap<String, String> {
        let mut criteria = BTreeMap::new();
        if !self.display_name.is_empty() {
            criteria.insert(
                criterion::DISPLAY_NAME.to_string(),
                self.display_name.clone(),
            );
        }

        let optional = [
            (criterion::SUBDOMAIN, &self.subdomain),
            (criterion::REGION, &self.region),
            (criterion::DESCRIPTION, &self.description),
            (criterion::USED_FOR_PRODUCTION, &self.used_for_production),
            (criterion::GLOBAL_ACCOUNT_GUID, &self.global_account_guid),
            (criterion::DIRECTORY_GUID, &self.directory_guid),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                criteria.insert(key.to_string(), value.clone());
            }
        }
        criteria
    }
}

/// Match data for an entitlement.
///
/// The identifying fields are kept exactly as configured, empty strings
/// included, and all of them end up in the criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementFilter {
    pub service_name: String,
    pub service_plan_name: String,
    pub service_plan_unique_identifier: Option<String>,
    pub subaccount_guid: String,
    pub enable: Option<bool>,
    pub amount: Option<i64>,
}

impl EntitlementFilter {
    pub fn from_config(config: &EntitlementConfig) -> Self {
        EntitlementFilter {
            service_name: config.service_name.clone(),
            service_plan_name: config.service_plan_name.clone(),
            service_plan_unique_identifier: config.service_plan_unique_identifier.clone(),
            subaccount_guid: config.subaccount_guid.clone(),
            enable: config.enable,
            amount: config.amount,
        }
    }

    pub fn criteria(&self) -> BTreeMap<String, String> {
        let mut criteria = BTreeMap::from([
            (
                criterion::SERVICE_NAME.to_string(),
                self.service_name.clone(),
            ),
            (
                criterion::SERVICE_PLAN_NAME.to_string(),
                self.service_plan_name.clone(),
            ),
            (
                criterion::SUBACCOUNT_GUID.to_string(),
                self.subaccount_guid.clone(),
            ),
        ]);
        if let Some(identifier) = &self.service_plan_unique_identifier {
            criteria.insert(
                criterion::SERVICE_PLAN_UNIQUE_IDENTIFIER.to_string(),
                identifier.clone(),
            );
        }
        criteria
    }
}

/// What a filter matches against. The discriminant doubles as the
/// resource type tag.
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(
    name(ResourceType),
    derive(EnumString, Display, AsRefStr, IntoStaticStr, Hash)
)]
pub enum FilterTarget {
    Subaccount(SubaccountFilter),
    Entitlement(EntitlementFilter),
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A compiled match predicate: resource type, criteria and the actions the
/// import engine is allowed to take on matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    target: FilterTarget,
    management_actions: Vec<ManagementAction>,
}

impl Filter {
    pub fn new(target: FilterTarget, management_actions: Vec<ManagementAction>) -> Self {
        Filter {
            target,
            management_actions,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        ResourceType::from(&self.target)
    }

    pub fn criteria(&self) -> BTreeMap<String, String> {
        match &self.target {
            FilterTarget::Subaccount(filter) => filter.criteria(),
            FilterTarget::Entitlement(filter) => filter.criteria(),
        }
    }

    pub fn management_actions(&self) -> &[ManagementAction] {
        &self.management_actions
    }

    pub fn target(&self) -> &FilterTarget {
        &self.target
    }

    pub fn as_subaccount(&self) -> Option<&SubaccountFilter> {
        match &self.target {
            FilterTarget::Subaccount(filter) => Some(filter),
            FilterTarget::Entitlement(_) => None,
        }
    }

    pub fn as_entitlement(&self) -> Option<&EntitlementFilter> {
        match &self.target {
            FilterTarget::Entitlement(filter) => Some(filter),
            FilterTarget::Subaccount(_) => None,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let criteria = self
            .criteria()
            .iter()
            .map(|(k, v)| format!("{k}={v:?}"))
            .join(", ");
        let actions = self.management_actions.iter().join(",");
        write!(f, "{}{{{criteria}}} [{actions}]", self.resource_type())
    }
}

impl Serialize for Filter {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = ser.serialize_struct("Filter", 3)?;
        state.serialize_field("resourceType", self.resource_type().as_str())?;
        state.serialize_field("criteria", &self.criteria())?;
        state.serialize_field("managementActions", &self.management_actions)?;
        state.end()
    }
}
