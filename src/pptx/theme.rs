//! Theme part generation (`ppt/theme/themeN.xml`).
//!
//! The resolved palette flows into the `a:clrScheme` and the template's
//! typeface into the `a:fontScheme`. The format scheme is the minimal
//! schema-valid set: three solid fill styles, three line styles, three
//! effect styles, and three background fill styles.

use crate::common::xml::escape_xml;
use crate::opc::constants::namespace as ns;
use crate::theme::Theme;
use std::fmt::Write as FmtWrite;

/// Generate a theme part for the given palette.
///
/// `name` distinguishes the slide-master theme from the notes-master theme
/// within one package.
pub(crate) fn theme_xml(theme: &Theme, name: &str) -> String {
    let mut xml = String::with_capacity(2048);
    let primary = theme.primary.to_hex();
    let accent = theme.accent.to_hex();
    let background = theme.background.to_hex();
    let title_bg = theme.title_background.to_hex();
    let font = escape_xml(theme.font_family);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = write!(
        xml,
        r#"<a:theme xmlns:a="{}" name="{}">"#,
        ns::DML_MAIN,
        escape_xml(name)
    );
    xml.push_str("<a:themeElements>");

    // Color scheme: dark text, light surfaces, template palette as accents.
    let _ = write!(xml, r#"<a:clrScheme name="{}">"#, escape_xml(name));
    xml.push_str(r#"<a:dk1><a:srgbClr val="1F2937"/></a:dk1>"#);
    let _ = write!(xml, r#"<a:lt1><a:srgbClr val="{background}"/></a:lt1>"#);
    let _ = write!(xml, r#"<a:dk2><a:srgbClr val="{title_bg}"/></a:dk2>"#);
    let _ = write!(xml, r#"<a:lt2><a:srgbClr val="{accent}"/></a:lt2>"#);
    let _ = write!(xml, r#"<a:accent1><a:srgbClr val="{primary}"/></a:accent1>"#);
    let _ = write!(xml, r#"<a:accent2><a:srgbClr val="{accent}"/></a:accent2>"#);
    let _ = write!(xml, r#"<a:accent3><a:srgbClr val="{title_bg}"/></a:accent3>"#);
    let _ = write!(xml, r#"<a:accent4><a:srgbClr val="{primary}"/></a:accent4>"#);
    let _ = write!(xml, r#"<a:accent5><a:srgbClr val="{accent}"/></a:accent5>"#);
    let _ = write!(xml, r#"<a:accent6><a:srgbClr val="{title_bg}"/></a:accent6>"#);
    let _ = write!(xml, r#"<a:hlink><a:srgbClr val="{primary}"/></a:hlink>"#);
    let _ = write!(xml, r#"<a:folHlink><a:srgbClr val="{accent}"/></a:folHlink>"#);
    xml.push_str("</a:clrScheme>");

    // Font scheme: one typeface across major and minor fonts.
    let _ = write!(xml, r#"<a:fontScheme name="{}">"#, escape_xml(name));
    let _ = write!(
        xml,
        r#"<a:majorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#
    );
    let _ = write!(
        xml,
        r#"<a:minorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#
    );
    xml.push_str("</a:fontScheme>");

    // Format scheme: exactly three entries per style list.
    xml.push_str(r#"<a:fmtScheme name="Office">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        let _ = write!(
            xml,
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#
        );
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_carries_palette_and_font() {
        let theme = Theme::resolve("creative-vibrant");
        let xml = theme_xml(&theme, "Longan Theme");
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="EC4899"/></a:accent1>"#));
        assert!(xml.contains(r#"<a:lt1><a:srgbClr val="FDF2F8"/></a:lt1>"#));
        assert!(xml.contains(r#"typeface="Trebuchet MS""#));
    }

    #[test]
    fn format_scheme_has_three_of_each_style() {
        let theme = Theme::resolve("modern-professional");
        let xml = theme_xml(&theme, "Longan Theme");
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
        assert_eq!(xml.matches("<a:ln w=").count(), 3);
    }
}
