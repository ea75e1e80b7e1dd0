//! Kind tag to adapter family lookup.

use super::{ObjectGeometry, ObjectKind};
use crate::error::{ManipulationError, ManipulationResult};
use std::collections::HashMap;

/// Which native representation (and which extra behavior) a kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterFamily {
    /// Rotatable box.
    Box,
    /// Rotatable box whose resize also asks for descendant re-layout.
    Frame,
    /// Two-point connector.
    Connector,
    /// Freehand point cloud.
    Ink,
}

impl AdapterFamily {
    /// Representation name matching [`ObjectGeometry::representation`].
    pub fn representation(&self) -> &'static str {
        match self {
            AdapterFamily::Box | AdapterFamily::Frame => "box",
            AdapterFamily::Connector => "connector",
            AdapterFamily::Ink => "ink",
        }
    }

    pub fn supports_rotation(&self) -> bool {
        matches!(self, AdapterFamily::Box | AdapterFamily::Frame)
    }

    /// Whether a resize must be followed by re-layout of contained objects.
    pub fn needs_relayout(&self) -> bool {
        matches!(self, AdapterFamily::Frame)
    }
}

/// Registered adapters, keyed by kind tag.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    families: HashMap<ObjectKind, AdapterFamily>,
}

impl AdapterRegistry {
    /// An empty registry. Every kind must be registered before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in kind registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in [
            ObjectKind::Rectangle,
            ObjectKind::Ellipse,
            ObjectKind::Diamond,
            ObjectKind::Sticky,
            ObjectKind::Text,
        ] {
            registry.register(kind, AdapterFamily::Box);
        }
        registry.register(ObjectKind::Frame, AdapterFamily::Frame);
        registry.register(ObjectKind::Line, AdapterFamily::Connector);
        registry.register(ObjectKind::Arrow, AdapterFamily::Connector);
        registry.register(ObjectKind::Ink, AdapterFamily::Ink);
        registry
    }

    /// Register (or replace) the adapter family for a kind.
    pub fn register(&mut self, kind: ObjectKind, family: AdapterFamily) {
        self.families.insert(kind, family);
    }

    pub fn family(&self, kind: &ObjectKind) -> Option<AdapterFamily> {
        self.families.get(kind).copied()
    }

    /// Resolve the adapter for `kind` and check `geometry` matches it.
    pub fn resolve(
        &self,
        kind: &ObjectKind,
        geometry: &ObjectGeometry,
    ) -> ManipulationResult<AdapterFamily> {
        let family = self
            .family(kind)
            .ok_or_else(|| ManipulationError::NoAdapter { kind: kind.clone() })?;
        if family.representation() != geometry.representation() {
            return Err(ManipulationError::AdapterMismatch {
                kind: kind.clone(),
                expected: family.representation(),
                found: geometry.representation(),
            });
        }
        Ok(family)
    }
}
