//! Presentation manifest part (`ppt/presentation.xml`).

use crate::error::{Error, Result};
use crate::layout::{SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
use crate::opc::constants::namespace as ns;
use std::fmt::Write as FmtWrite;

/// First slide id in `p:sldIdLst`; ids below 256 are reserved.
const FIRST_SLIDE_ID: u32 = 256;

/// Generate `ppt/presentation.xml`.
///
/// `slide_rel_ids` must be in input order: the manifest's slide list is the
/// single mechanism that determines perceived slide order.
pub(crate) fn presentation_xml(
    master_rel_id: &str,
    notes_master_rel_id: Option<&str>,
    slide_rel_ids: &[String],
) -> Result<String> {
    let mut xml = String::with_capacity(1024);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        ns::DML_MAIN,
        ns::OFC_RELATIONSHIPS,
        ns::PML_MAIN
    )
    .map_err(|e| Error::Render(e.to_string()))?;

    write!(
        xml,
        r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="{master_rel_id}"/></p:sldMasterIdLst>"#
    )
    .map_err(|e| Error::Render(e.to_string()))?;

    if let Some(rel_id) = notes_master_rel_id {
        write!(
            xml,
            r#"<p:notesMasterIdLst><p:notesMasterId r:id="{rel_id}"/></p:notesMasterIdLst>"#
        )
        .map_err(|e| Error::Render(e.to_string()))?;
    }

    if !slide_rel_ids.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (index, rel_id) in slide_rel_ids.iter().enumerate() {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{rel_id}"/>"#,
                FIRST_SLIDE_ID + index as u32
            )
            .map_err(|e| Error::Render(e.to_string()))?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{SLIDE_WIDTH_EMU}" cy="{SLIDE_HEIGHT_EMU}"/>"#
    )
    .map_err(|e| Error::Render(e.to_string()))?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");

    Ok(xml)
}
