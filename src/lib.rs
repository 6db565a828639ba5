//! Compile BTP import configurations into resource filters.
//!
//! The legacy format lists `subaccount` / `entitlement` descriptors under
//! `resources`; [`parse_config`] turns it into a [`ProviderConfig`] and the
//! [`Filter`]s the import engine matches live resources with. The newer
//! format is read with [`load_and_validate`].
pub use bridge::load_and_validate;
pub use compiler::{
    LegacyConfigParser, compile, compile_descriptor, compile_entry, parse_config,
    parse_config_str,
};
pub use error::ImportError;
pub use import_config::{ImportConfig, ImportConfigParser, ImportResource};
pub use loader::{parse_config_document, read_config};
pub use registry::{
    AdapterRegistry, AdapterRegistryBuilder, EntitlementAdapter, SubaccountAdapter,
    ValidationAdapter,
};
pub use traits::IdentifiedDescriptor;
pub use types::*;

mod bridge;
mod compiler;
mod error;
mod import_config;
mod loader;
mod registry;
mod traits;
mod types;

#[cfg(test)]
mod tests;
