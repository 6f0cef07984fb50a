//! Package writer: serializes an [`OpcPackage`] into the final archive.
//!
//! This is a structural packer with no business logic. It writes the
//! content-types manifest first, then the package relationships, then every
//! part with its companion `.rels` file, all deflate-compressed with fixed
//! timestamps so identical part sets produce byte-identical archives.

use crate::common::xml::escape_xml;
use crate::error::{Error, Result};
use crate::opc::constants::{content_type as ct, namespace as ns};
use crate::opc::package::OpcPackage;
use crate::opc::part::{package_rels_uri, PackUri};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Reserved path of the content-types manifest.
const CONTENT_TYPES_MEMBER: &str = "[Content_Types].xml";

/// Package writer that serializes an OPC package to a ZIP archive.
pub struct PackageWriter;

impl PackageWriter {
    /// Serialize an OPC package to archive bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        if package.is_empty() {
            return Err(Error::Packaging("package holds no parts".to_string()));
        }
        Self::check_unique_paths(package)?;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        // Fixed timestamp: archive bytes must not depend on the wall clock.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let cti = ContentTypesItem::from_package(package);
        Self::write_member(&mut writer, options, CONTENT_TYPES_MEMBER, cti.to_xml().as_bytes())?;

        Self::write_member(
            &mut writer,
            options,
            package_rels_uri().membername(),
            package.rels().to_xml().as_bytes(),
        )?;

        for part in package.iter_parts() {
            Self::write_member(&mut writer, options, part.partname().membername(), part.blob())?;

            if !part.rels().is_empty() {
                Self::write_member(
                    &mut writer,
                    options,
                    part.partname().rels_uri().membername(),
                    part.rels().to_xml().as_bytes(),
                )?;
            }
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::Packaging(format!("failed to finalize archive: {e}")))?;
        Ok(cursor.into_inner())
    }

    fn write_member(
        writer: &mut ZipWriter<Cursor<Vec<u8>>>,
        options: SimpleFileOptions,
        name: &str,
        data: &[u8],
    ) -> Result<()> {
        writer
            .start_file(name, options)
            .map_err(|e| Error::Packaging(format!("failed to start member {name:?}: {e}")))?;
        writer
            .write_all(data)
            .map_err(|e| Error::Packaging(format!("failed to write member {name:?}: {e}")))?;
        Ok(())
    }

    /// Reject duplicate internal paths.
    ///
    /// The part-set builder's invariants make a collision unreachable, so
    /// hitting one here is an internal defect and is logged loudly.
    fn check_unique_paths(package: &OpcPackage) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for part in package.iter_parts() {
            if !seen.insert(part.partname().as_str()) {
                log::error!(
                    "duplicate part path {} in assembled package; this is a bug",
                    part.partname()
                );
                return Err(Error::Packaging(format!(
                    "duplicate part path: {}",
                    part.partname()
                )));
            }
        }
        Ok(())
    }
}

/// Helper for building `[Content_Types].xml` content.
///
/// Manages Default and Override elements for content type mapping. Every
/// distinct extension and part present in the package appears exactly once.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,
    /// Override content types by partname
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();

        // Standard defaults carried by every package
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    /// Build a ContentTypesItem covering every part in the package.
    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    /// Register a part's content type as a default or an override.
    fn add_content_type(&mut self, partname: &PackUri, content_type: &str) {
        let ext = partname.ext();
        if Self::is_default_content_type(ext, content_type) {
            self.defaults.insert(ext.to_string(), content_type.to_string());
        } else {
            self.overrides
                .insert(partname.to_string(), content_type.to_string());
        }
    }

    /// Check if an extension/content-type pair is a standard default.
    fn is_default_content_type(ext: &str, content_type: &str) -> bool {
        matches!((ext, content_type), ("rels", ct::OPC_RELATIONSHIPS) | ("xml", ct::XML))
    }

    /// Generate the XML for `[Content_Types].xml`.
    ///
    /// BTreeMap iteration gives sorted, deterministic output.
    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(xml, r#"<Types xmlns="{}">"#, ns::OPC_CONTENT_TYPES);

        for (ext, content_type) in &self.defaults {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            );
        }

        for (partname, content_type) in &self.overrides {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            );
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::relationship_type as rt;
    use crate::opc::part::PackagePart;
    use std::io::Read;

    fn sample_package() -> OpcPackage {
        let mut package = OpcPackage::new();
        let mut pres = PackagePart::new(
            PackUri::new("/ppt/presentation.xml").unwrap(),
            ct::PML_PRESENTATION_MAIN,
            b"<p:presentation/>".to_vec(),
        );
        pres.relate_to(rt::SLIDE, "slides/slide1.xml");
        package.add_part(pres);
        package.add_part(PackagePart::new(
            PackUri::new("/ppt/slides/slide1.xml").unwrap(),
            ct::PML_SLIDE,
            b"<p:sld/>".to_vec(),
        ));
        package.relate_to(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");
        package
    }

    #[test]
    fn archive_opens_and_contains_expected_members() {
        let bytes = PackageWriter::to_bytes(&sample_package()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names[0], "[Content_Types].xml");
        assert!(names.contains(&"_rels/.rels".to_string()));
        assert!(names.contains(&"ppt/presentation.xml".to_string()));
        assert!(names.contains(&"ppt/_rels/presentation.xml.rels".to_string()));
        assert!(names.contains(&"ppt/slides/slide1.xml".to_string()));

        let mut content = String::new();
        archive
            .by_name("ppt/presentation.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<p:presentation/>");
    }

    #[test]
    fn content_types_cover_every_part_exactly_once() {
        let bytes = PackageWriter::to_bytes(&sample_package()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut manifest = String::new();
        archive
            .by_name("[Content_Types].xml")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();

        assert_eq!(manifest.matches(r#"PartName="/ppt/presentation.xml""#).count(), 1);
        assert_eq!(manifest.matches(r#"PartName="/ppt/slides/slide1.xml""#).count(), 1);
        assert_eq!(manifest.matches(r#"Extension="rels""#).count(), 1);
        assert_eq!(manifest.matches(r#"Extension="xml""#).count(), 1);
    }

    #[test]
    fn duplicate_part_path_is_a_packaging_failure() {
        let mut package = sample_package();
        package.add_part(PackagePart::new(
            PackUri::new("/ppt/slides/slide1.xml").unwrap(),
            ct::PML_SLIDE,
            b"<p:sld/>".to_vec(),
        ));
        assert!(matches!(
            PackageWriter::to_bytes(&package),
            Err(Error::Packaging(_))
        ));
    }

    #[test]
    fn empty_package_is_a_packaging_failure() {
        assert!(matches!(
            PackageWriter::to_bytes(&OpcPackage::new()),
            Err(Error::Packaging(_))
        ));
    }

    #[test]
    fn serialization_is_deterministic() {
        let a = PackageWriter::to_bytes(&sample_package()).unwrap();
        let b = PackageWriter::to_bytes(&sample_package()).unwrap();
        assert_eq!(a, b);
    }
}
