//! Relationship lists for generated parts.
//!
//! Every part that references other parts carries its own relationship
//! list, serialized as a companion `.rels` file. Relationship ids are
//! assigned by a monotonic counter local to the list, so no two parts ever
//! share identifier state.

use crate::common::xml::escape_xml;
use crate::opc::constants::namespace as ns;
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,
    /// Relationship type URI
    reltype: &'static str,
    /// Target reference, relative to the source part's directory
    target: String,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &'static str {
        self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Ordered collection of relationships from a single source part.
///
/// Ids run `rId1`, `rId2`, ... in insertion order, which keeps `.rels`
/// serialization deterministic without any sorting step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its assigned id.
    pub fn add(&mut self, reltype: &'static str, target: impl Into<String>) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            r_id: r_id.clone(),
            reltype,
            target: target.into(),
        });
        r_id
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize the collection as a `.rels` document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 128);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(xml, r#"<Relationships xmlns="{}">"#, ns::OPC_RELATIONSHIPS);

        for rel in &self.rels {
            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                escape_xml(&rel.r_id),
                escape_xml(rel.reltype),
                escape_xml(&rel.target)
            );
        }

        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::relationship_type as rt;

    #[test]
    fn ids_are_monotonic_per_collection() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml"), "rId1");
        assert_eq!(rels.add(rt::SLIDE, "slides/slide1.xml"), "rId2");
        assert_eq!(rels.add(rt::SLIDE, "slides/slide2.xml"), "rId3");

        // A fresh collection starts over; counters are never shared.
        let mut other = Relationships::new();
        assert_eq!(other.add(rt::THEME, "theme/theme1.xml"), "rId1");
    }

    #[test]
    fn to_xml_lists_relationships_in_insertion_order() {
        let mut rels = Relationships::new();
        rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        rels.add(rt::NOTES_SLIDE, "../notesSlides/notesSlide1.xml");

        let xml = rels.to_xml();
        let layout_pos = xml.find("slideLayout1.xml").unwrap();
        let notes_pos = xml.find("notesSlide1.xml").unwrap();
        assert!(layout_pos < notes_pos);
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Id="rId2""#));
    }

    #[test]
    fn to_xml_escapes_targets() {
        let mut rels = Relationships::new();
        rels.add(rt::SLIDE, "slides/a&b.xml".to_string());
        assert!(rels.to_xml().contains("slides/a&amp;b.xml"));
    }
}
