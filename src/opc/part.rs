//! Package parts and their internal paths.

use crate::error::{Error, Result};
use crate::opc::rel::Relationships;

/// Internal path of a part within the package.
///
/// Always absolute (leading `/`), e.g. `/ppt/slides/slide1.xml`. The path
/// doubles as the part's identity: two parts with the same `PackUri` cannot
/// coexist in one package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackUri(String);

impl PackUri {
    /// Create a pack URI, validating the path shape.
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') || uri.len() < 2 {
            return Err(Error::Packaging(format!(
                "part path must be absolute: {uri:?}"
            )));
        }
        if uri.ends_with('/') || uri.contains("//") || uri.contains('\\') {
            return Err(Error::Packaging(format!("malformed part path: {uri:?}")));
        }
        Ok(Self(uri))
    }

    /// The absolute path, as used in `[Content_Types].xml` overrides.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The archive member name (the path without its leading slash).
    #[inline]
    pub fn membername(&self) -> &str {
        &self.0[1..]
    }

    /// File extension of the part, empty if none.
    pub fn ext(&self) -> &str {
        self.0.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }

    /// The companion `.rels` path for this part
    /// (`/ppt/presentation.xml` -> `/ppt/_rels/presentation.xml.rels`).
    pub fn rels_uri(&self) -> PackUri {
        let (dir, name) = self.0.rsplit_once('/').expect("pack uri has a slash");
        PackUri(format!("{dir}/_rels/{name}.rels"))
    }
}

impl std::fmt::Display for PackUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The companion `.rels` path for the package root.
pub fn package_rels_uri() -> PackUri {
    PackUri("/_rels/.rels".to_string())
}

/// One logical file inside the package: a path, a payload, a declared
/// content type, and the relationships it holds to other parts.
#[derive(Debug, Clone)]
pub struct PackagePart {
    partname: PackUri,
    content_type: &'static str,
    blob: Vec<u8>,
    rels: Relationships,
}

impl PackagePart {
    /// Create a part from rendered markup.
    pub fn new(partname: PackUri, content_type: &'static str, blob: Vec<u8>) -> Self {
        Self {
            partname,
            content_type,
            blob,
            rels: Relationships::new(),
        }
    }

    /// Add a relationship from this part and return its assigned id.
    ///
    /// `target` is relative to this part's directory, matching how `.rels`
    /// targets are written (e.g. `slides/slide1.xml` from
    /// `/ppt/presentation.xml`).
    pub fn relate_to(&mut self, reltype: &'static str, target: impl Into<String>) -> String {
        self.rels.add(reltype, target)
    }

    /// Replace the part's payload.
    ///
    /// Used when a part's markup can only be finalized after its
    /// relationship ids are known.
    pub fn set_blob(&mut self, blob: Vec<u8>) {
        self.blob = blob;
    }

    #[inline]
    pub fn partname(&self) -> &PackUri {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::content_type as ct;

    #[test]
    fn pack_uri_validation() {
        assert!(PackUri::new("/ppt/presentation.xml").is_ok());
        assert!(PackUri::new("ppt/presentation.xml").is_err());
        assert!(PackUri::new("/").is_err());
        assert!(PackUri::new("/ppt//slide.xml").is_err());
        assert!(PackUri::new("/ppt/").is_err());
    }

    #[test]
    fn rels_uri_is_a_sibling_companion() {
        let uri = PackUri::new("/ppt/presentation.xml").unwrap();
        assert_eq!(uri.rels_uri().as_str(), "/ppt/_rels/presentation.xml.rels");
        assert_eq!(package_rels_uri().as_str(), "/_rels/.rels");
    }

    #[test]
    fn membername_and_ext() {
        let uri = PackUri::new("/ppt/slides/slide3.xml").unwrap();
        assert_eq!(uri.membername(), "ppt/slides/slide3.xml");
        assert_eq!(uri.ext(), "xml");
    }

    #[test]
    fn part_assigns_rel_ids_locally() {
        let uri = PackUri::new("/ppt/slides/slide1.xml").unwrap();
        let mut part = PackagePart::new(uri, ct::PML_SLIDE, b"<p:sld/>".to_vec());
        let id = part.relate_to(
            crate::opc::constants::relationship_type::SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        );
        assert_eq!(id, "rId1");
        assert_eq!(part.rels().len(), 1);
    }
}
