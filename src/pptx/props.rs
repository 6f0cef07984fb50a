//! Document property parts (`docProps/core.xml`, `docProps/app.xml`).
//!
//! No timestamps are written: artifact bytes must depend only on the input
//! deck and template, never on the wall clock.

use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Generate `docProps/core.xml` with the deck title.
pub(crate) fn core_props_xml(deck_title: &str) -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
        r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    let _ = write!(xml, "<dc:title>{}</dc:title>", escape_xml(deck_title));
    xml.push_str("<dc:creator>longan</dc:creator>");
    xml.push_str("<cp:lastModifiedBy>longan</cp:lastModifiedBy>");
    xml.push_str("<cp:revision>1</cp:revision>");
    xml.push_str("</cp:coreProperties>");
    xml
}

/// Generate `docProps/app.xml` with the slide count.
pub(crate) fn app_props_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(384);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
    ));
    xml.push_str("<Application>longan</Application>");
    let _ = write!(xml, "<Slides>{slide_count}</Slides>");
    xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
    xml.push_str("<ScaleCrop>false</ScaleCrop>");
    xml.push_str("<LinksUpToDate>false</LinksUpToDate>");
    xml.push_str("</Properties>");
    xml
}
