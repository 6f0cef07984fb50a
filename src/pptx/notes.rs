//! Speaker-notes parts: per-slide notes slides and the notes master.

use crate::common::xml::escape_xml;
use crate::error::{Error, Result};
use crate::opc::constants::namespace as ns;
use crate::pptx::master::{COLOR_MAP_ATTRS, EMPTY_SP_TREE};
use std::fmt::Write as FmtWrite;

/// Generate a notes slide part for one slide's speaker notes.
///
/// Notes keep their line structure: each line becomes its own paragraph in
/// the body placeholder.
pub(crate) fn notes_slide_xml(notes: &str) -> Result<String> {
    let mut xml = String::with_capacity(1024);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(
        xml,
        r#"<p:notes xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        ns::DML_MAIN,
        ns::OFC_RELATIONSHIPS,
        ns::PML_MAIN
    )
    .map_err(|e| Error::Render(e.to_string()))?;

    xml.push_str("<p:cSld>");
    xml.push_str(EMPTY_SP_TREE);

    xml.push_str("<p:sp><p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="2" name="Notes Placeholder"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr><p:spPr/><p:txBody>");
    xml.push_str("<a:bodyPr/><a:lstStyle/>");

    for line in notes.lines() {
        xml.push_str("<a:p><a:r>");
        xml.push_str(r#"<a:rPr lang="en-US" dirty="0"/>"#);
        write!(xml, "<a:t>{}</a:t>", escape_xml(line))
            .map_err(|e| Error::Render(e.to_string()))?;
        xml.push_str("</a:r></a:p>");
    }

    xml.push_str("</p:txBody></p:sp>");
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:notes>");

    Ok(xml)
}

/// Generate `ppt/notesMasters/notesMaster1.xml`.
pub(crate) fn notes_master_xml() -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = write!(
        xml,
        r#"<p:notesMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        ns::DML_MAIN,
        ns::OFC_RELATIONSHIPS,
        ns::PML_MAIN
    );
    xml.push_str("<p:cSld>");
    xml.push_str(concat!(
        "<p:bg><p:bgPr>",
        r#"<a:solidFill><a:schemeClr val="bg1"/></a:solidFill>"#,
        "<a:effectLst/></p:bgPr></p:bg>",
    ));
    xml.push_str(EMPTY_SP_TREE);
    xml.push_str("</p:spTree></p:cSld>");
    let _ = write!(xml, "<p:clrMap {COLOR_MAP_ATTRS}/>");
    xml.push_str("<p:notesStyle/>");
    xml.push_str("</p:notesMaster>");
    xml
}
