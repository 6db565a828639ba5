use crate::types::{ManagementAction, ManagementPolicy, ResourceType, resolve_actions};

/// A configuration descriptor that may identify a live resource, e.g. a
/// subaccount by `displayName` or an entitlement by service and plan.
pub trait IdentifiedDescriptor {
    /// The resource type a filter built from this descriptor carries.
    fn resource_type() -> ResourceType;

    /// Whether any identifying field is filled in. Unidentified descriptors
    /// are treated as absent.
    fn is_identified(&self) -> bool;

    /// The policy tags as written, `None` when the key was omitted
    fn management_policies(&self) -> Option<&[ManagementPolicy]>;

    fn has_management_policies(&self) -> bool {
        self.management_policies()
            .is_some_and(|policies| !policies.is_empty())
    }

    /// Policy tags converted one-for-one, order preserved.
    fn management_actions(&self) -> Vec<ManagementAction> {
        resolve_actions(self.management_policies())
    }

    /// Describe why this descriptor is unusable, if it is.
    fn policy_violation(&self) -> Option<String> {
        if self.is_identified() && !self.has_management_policies() {
            Some(format!(
                "{} configuration is missing management policies",
                Self::resource_type()
            ))
        } else {
            None
        }
    }
}
