//! Slide master and slide layout parts.
//!
//! The synthesizer writes slides with explicit geometry and colors, so the
//! master and its single layout stay minimal: an empty shape tree, the
//! theme-driven background, the color map, and the required text styles.

use crate::opc::constants::namespace as ns;
use std::fmt::Write as FmtWrite;

/// Shared empty shape-tree scaffold (group shape id 1 is reserved).
pub(crate) const EMPTY_SP_TREE: &str = concat!(
    "<p:spTree>",
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    "<p:grpSpPr><a:xfrm>",
    r#"<a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/>"#,
    "</a:xfrm></p:grpSpPr>",
);

/// The full color map attribute set every master carries.
pub(crate) const COLOR_MAP_ATTRS: &str = concat!(
    r#"bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" "#,
    r#"accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" "#,
    r#"accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink""#,
);

/// Generate `ppt/slideMasters/slideMaster1.xml`.
///
/// `layout_rel_id` is the master's relationship id for its single layout.
pub(crate) fn slide_master_xml(layout_rel_id: &str) -> String {
    let mut xml = String::with_capacity(1024);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = write!(
        xml,
        r#"<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
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

    let _ = write!(
        xml,
        r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="{layout_rel_id}"/></p:sldLayoutIdLst>"#
    );
    xml.push_str("<p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>");
    xml.push_str("</p:sldMaster>");
    xml
}

/// Generate `ppt/slideLayouts/slideLayout1.xml` (blank layout).
pub(crate) fn slide_layout_xml() -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = write!(
        xml,
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank">"#,
        ns::DML_MAIN,
        ns::OFC_RELATIONSHIPS,
        ns::PML_MAIN
    );
    xml.push_str(r#"<p:cSld name="Blank">"#);
    xml.push_str(EMPTY_SP_TREE);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    xml
}
