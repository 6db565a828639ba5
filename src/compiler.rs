use std::path::Path;

use tracing::debug;

use crate::error::ImportError;
use crate::loader;
use crate::traits::IdentifiedDescriptor;
use crate::types::{
    Config, Descriptor, EntitlementFilter, Filter, FilterTarget, ProviderConfig, ResourceEntry,
    SubaccountFilter,
};

/// Compile a parsed configuration into its provider config and filters.
///
/// Filters follow the order of `resources`; an entry carrying both a
/// subaccount and an entitlement yields the subaccount filter first.
/// Compilation never fails. Use [`ProviderConfig::validate`] to gate the
/// result.
pub fn compile(config: Config) -> (ProviderConfig, Vec<Filter>) {
    let filters: Vec<Filter> = config.resources.iter().flat_map(compile_entry).collect();

    debug!(
        event = "Compile",
        phase = "Result",
        resources = config.resources.len(),
        filters = filters.len(),
        provider_config = config.provider_config_ref.name.as_str()
    );

    (
        ProviderConfig::new(config.resources, config.provider_config_ref),
        filters,
    )
}

/// Zero, one or two filters for a single entry.
pub fn compile_entry(entry: &ResourceEntry) -> Vec<Filter> {
    entry.descriptors().filter_map(compile_descriptor).collect()
}

/// A filter for the descriptor, or `None` when no identifying field is set.
pub fn compile_descriptor(descriptor: Descriptor<'_>) -> Option<Filter> {
    if !descriptor.is_identified() {
        return None;
    }

    let filter = match descriptor {
        Descriptor::Subaccount(config) => Filter::new(
            FilterTarget::Subaccount(SubaccountFilter::from_config(config)),
            config.management_actions(),
        ),
        Descriptor::Entitlement(config) => Filter::new(
            FilterTarget::Entitlement(EntitlementFilter::from_config(config)),
            config.management_actions(),
        ),
    };

    debug!(event = "Compile", phase = "Filter", filter = %filter);
    Some(filter)
}

/// Read, parse and compile a legacy configuration file.
///
/// Fails only if the file cannot be read (`ImportError::Io`) or parsed
/// (`ImportError::Parse`). The result is not validated.
pub fn parse_config(
    path: impl AsRef<Path>,
) -> Result<(ProviderConfig, Vec<Filter>), ImportError> {
    let config = loader::read_config(path)?;
    Ok(compile(config))
}

/// [`parse_config`] for configuration text already in memory.
pub fn parse_config_str(text: &str) -> Result<(ProviderConfig, Vec<Filter>), ImportError> {
    let config = loader::parse_config_document(text)?;
    Ok(compile(config))
}

/// Parser for the legacy configuration format.
///
/// New code should prefer [`crate::load_and_validate`], which reads the
/// newer format and validates filters through an
/// [`crate::AdapterRegistry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyConfigParser;

impl LegacyConfigParser {
    pub fn new() -> Self {
        LegacyConfigParser
    }

    pub fn parse_config(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(ProviderConfig, Vec<Filter>), ImportError> {
        parse_config(path)
    }
}
