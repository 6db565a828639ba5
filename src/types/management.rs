//! Management policy tags and the actions they resolve to.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ImportError;

/// A management policy tag exactly as written in a configuration file,
/// e.g. `Observe` or `*`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ManagementPolicy(String);

impl ManagementPolicy {
    pub fn new(tag: impl Into<String>) -> Self {
        ManagementPolicy(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ManagementPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A lifecycle operation the import engine may perform on a matched resource.
///
/// Tags outside the well-known set are kept verbatim in `Custom` so that a
/// policy list always converts one-for-one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManagementAction {
    /// `Observe`: read the external resource, never change it
    Observe,
    /// `Create`
    Create,
    /// `Update`
    Update,
    /// `Delete`
    Delete,
    /// `LateInitialize`: fill unset fields from the observed resource
    LateInitialize,
    /// `*`: every action above
    All,
    Custom(String),
}

impl ManagementAction {
    /// Convert a policy tag without rejecting unknown values.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse()
            .unwrap_or_else(|_| ManagementAction::Custom(tag.to_string()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ManagementAction::Custom(_))
    }
}

impl AsRef<str> for ManagementAction {
    fn as_ref(&self) -> &str {
        match self {
            Self::Observe => "Observe",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::LateInitialize => "LateInitialize",
            Self::All => "*",
            Self::Custom(tag) => tag,
        }
    }
}

impl FromStr for ManagementAction {
    type Err = ImportError;

    /// Strict parse: only the well-known actions are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Observe" => Ok(Self::Observe),
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            "LateInitialize" => Ok(Self::LateInitialize),
            "*" => Ok(Self::All),
            _ => Err(ImportError::InvalidFormat(format!(
                "unknown management action '{s}' (expected one of Observe, Create, Update, Delete, LateInitialize, *)"
            ))),
        }
    }
}

impl Display for ManagementAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_ref())
    }
}

impl From<&ManagementPolicy> for ManagementAction {
    fn from(policy: &ManagementPolicy) -> Self {
        ManagementAction::from_tag(policy.as_str())
    }
}

impl Serialize for ManagementAction {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for ManagementAction {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(de)?;
        Ok(ManagementAction::from_tag(&tag))
    }
}

/// Resolve an optional policy list into actions, preserving order.
/// An absent list resolves to no actions.
pub fn resolve_actions(policies: Option<&[ManagementPolicy]>) -> Vec<ManagementAction> {
    policies
        .unwrap_or_default()
        .iter()
        .map(ManagementAction::from)
        .collect()
}
