//! In-memory package model.

use crate::opc::part::PackagePart;
use crate::opc::rel::Relationships;

/// The complete set of parts and package-level relationships for one
/// synthesis run, ready to be serialized by the package writer.
///
/// Parts keep their insertion order; together with the per-part monotonic
/// relationship ids this makes the serialized archive fully deterministic.
#[derive(Debug, Default)]
pub struct OpcPackage {
    rels: Relationships,
    parts: Vec<PackagePart>,
}

impl OpcPackage {
    /// Create a new empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part to the package.
    pub fn add_part(&mut self, part: PackagePart) {
        self.parts.push(part);
    }

    /// Add a package-level relationship and return its assigned id.
    pub fn relate_to(&mut self, reltype: &'static str, target: impl Into<String>) -> String {
        self.rels.add(reltype, target)
    }

    /// Package-level relationships (`/_rels/.rels`).
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Iterate over all parts in insertion order.
    #[inline]
    pub fn iter_parts(&self) -> impl Iterator<Item = &PackagePart> {
        self.parts.iter()
    }

    /// Number of parts in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check whether the package holds no parts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
