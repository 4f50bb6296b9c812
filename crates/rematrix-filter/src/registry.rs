//! Filter registry: what this module offers the host.
//!
//! At module load the host walks the registry, shows each descriptor in its
//! filter menu, and creates instances by id.

use std::sync::Arc;

use rematrix_config::Settings;

use crate::error::FilterError;
use crate::filter::RematrixFilter;
use crate::host::AudioHost;
use crate::properties::{RouteProperty, defaults, properties};

/// Id the Rematrix filter is registered under.
pub const REMATRIX_FILTER_ID: &str = "rematrix_filter";

/// What kind of source a filter attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Filters the audio of its parent source.
    Audio,
}

impl FilterKind {
    /// Returns a human-readable name for the kind.
    pub const fn name(&self) -> &'static str {
        match self {
            FilterKind::Audio => "Audio Filter",
        }
    }
}

/// Describes a filter in the registry.
#[derive(Debug, Clone)]
pub struct FilterDescriptor {
    /// Unique identifier (lowercase, no spaces).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description.
    pub description: &'static str,
    /// Kind of filter.
    pub kind: FilterKind,
    /// Installs default settings.
    pub defaults: fn(&mut Settings),
    /// Describes the UI for the host's current layout.
    pub properties: fn(&dyn AudioHost) -> Vec<RouteProperty>,
}

type FilterFactory = fn(&Settings, Arc<dyn AudioHost>) -> Result<RematrixFilter, FilterError>;

struct RegistryEntry {
    descriptor: FilterDescriptor,
    factory: FilterFactory,
}

/// Registry of the filters this module provides.
pub struct FilterRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRegistry {
    /// Create a registry with all built-in filters registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(1),
        };
        registry.register(
            FilterDescriptor {
                id: REMATRIX_FILTER_ID,
                name: "Rematrix",
                description: "Re-route, duplicate, or mute the channels of an audio source",
                kind: FilterKind::Audio,
                defaults,
                properties,
            },
            RematrixFilter::create,
        );
        registry
    }

    fn register(&mut self, descriptor: FilterDescriptor, factory: FilterFactory) {
        tracing::debug!(id = descriptor.id, "registering filter");
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
    }

    /// Returns descriptors for all registered filters.
    pub fn all_filters(&self) -> Vec<&FilterDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Get a descriptor by filter id.
    pub fn get(&self, id: &str) -> Option<&FilterDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| &e.descriptor)
    }

    /// Create a filter instance by id.
    pub fn create(
        &self,
        id: &str,
        settings: &Settings,
        host: Arc<dyn AudioHost>,
    ) -> Result<RematrixFilter, FilterError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .ok_or_else(|| FilterError::UnknownFilter(id.to_string()))?;
        (entry.factory)(settings, host)
    }

    /// Returns the number of registered filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no filters are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FixedHost;

    #[test]
    fn test_registry_creation() {
        let registry = FilterRegistry::new();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_all_filters() {
        let registry = FilterRegistry::new();
        let ids: Vec<&str> = registry.all_filters().iter().map(|d| d.id).collect();
        assert_eq!(ids, [REMATRIX_FILTER_ID]);
    }

    #[test]
    fn test_rematrix_descriptor() {
        let registry = FilterRegistry::new();
        let desc = registry.get("rematrix_filter").unwrap();
        assert_eq!(desc.name, "Rematrix");
        assert_eq!(desc.kind, FilterKind::Audio);
        assert_eq!(desc.kind.name(), "Audio Filter");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_descriptor_callbacks() {
        let registry = FilterRegistry::new();
        let desc = registry.get(REMATRIX_FILTER_ID).unwrap();

        let mut settings = Settings::new();
        (desc.defaults)(&mut settings);
        assert_eq!(settings.get_int("route 3"), Some(3));

        assert_eq!((desc.properties)(&FixedHost::new(6)).len(), 6);
    }

    #[test]
    fn test_create_by_id() {
        let registry = FilterRegistry::new();
        let filter = registry
            .create(REMATRIX_FILTER_ID, &Settings::new(), Arc::new(FixedHost::new(2)))
            .unwrap();
        assert_eq!(filter.channels(), 2);

        let err = registry
            .create("reverb", &Settings::new(), Arc::new(FixedHost::new(2)))
            .unwrap_err();
        assert!(matches!(err, FilterError::UnknownFilter(ref id) if id == "reverb"));
    }
}
