//! Data model for legacy import configurations and compiled filters.
//!
//! - `schema`: the file as written (`resources`, `providerConfigRef`)
//! - `filter`: compiled [`Filter`]s, one per identified descriptor
//! - `provider`: the provider reference and the configuration gate
//! - `management`: policy tags and the actions they grant

mod filter;
mod management;
mod provider;
mod schema;

pub use filter::{
    EntitlementFilter, Filter, FilterTarget, ResourceType, SubaccountFilter, criterion,
};
pub use management::{ManagementAction, ManagementPolicy, resolve_actions};
pub use provider::{ProviderConfig, ProviderConfigRef};
pub use schema::{Config, Descriptor, EntitlementConfig, ResourceEntry, SubaccountConfig};
