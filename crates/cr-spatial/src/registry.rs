//! Named-location registry.
//!
//! Binds human-readable place names to coordinates and snaps each one to a
//! road node exactly once, at registration.  Lookups afterwards are pure
//! reads, so a registry that has finished registering can be shared freely.
//! Only [`LocationRegistry::rebuild`] changes a cached node, and only for a
//! new spatial index.

use rustc_hash::FxHashMap;

use cr_core::{GeoPoint, NodeId};

use crate::index::SpatialIndex;
use crate::{SpatialError, SpatialResult};

/// What a named location represents to the rider-facing interface.
///
/// Homes are offered as trip origins and facilities (hospitals, clinics)
/// as destinations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationKind {
    Home,
    Facility,
    #[default]
    Other,
}

/// A registered place and its cached road node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedLocation {
    pub name: String,
    pub pos:  GeoPoint,
    pub kind: LocationKind,
    pub node: NodeId,
}

/// Name → location table in registration order.
#[derive(Default)]
pub struct LocationRegistry {
    entries: Vec<NamedLocation>,
    by_name: FxHashMap<String, usize>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at `pos`, snap it through `index` and cache the node.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::DuplicateName`] if `name` is already registered;
    ///   the existing entry is untouched.
    /// - Any error from [`SpatialIndex::nearest`] (empty graph, non-finite
    ///   point); nothing is registered.
    pub fn register(
        &mut self,
        index: &SpatialIndex,
        name: impl Into<String>,
        pos: GeoPoint,
        kind: LocationKind,
    ) -> SpatialResult<NodeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SpatialError::DuplicateName(name));
        }
        let node = index.nearest(pos)?;
        self.by_name.insert(name.clone(), self.entries.len());
        self.entries.push(NamedLocation { name, pos, kind, node });
        Ok(node)
    }

    /// Cached road node of `name`.
    pub fn resolve(&self, name: &str) -> SpatialResult<NodeId> {
        self.get(name)
            .map(|loc| loc.node)
            .ok_or_else(|| SpatialError::UnknownLocation(name.to_owned()))
    }

    pub fn get(&self, name: &str) -> Option<&NamedLocation> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Names of every location of `kind`, in registration order.
    pub fn names_of_kind(&self, kind: LocationKind) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |loc| loc.kind == kind)
            .map(|loc| loc.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedLocation> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-snap every entry against `index` (a different network).
    ///
    /// All-or-nothing: on error the previous nodes are kept.
    pub fn rebuild(&mut self, index: &SpatialIndex) -> SpatialResult<()> {
        let nodes = self
            .entries
            .iter()
            .map(|loc| index.nearest(loc.pos))
            .collect::<SpatialResult<Vec<_>>>()?;
        for (loc, node) in self.entries.iter_mut().zip(nodes) {
            loc.node = node;
        }
        Ok(())
    }
}
