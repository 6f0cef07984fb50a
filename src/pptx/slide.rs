//! Per-slide part generation.
//!
//! Renders one positioned slide into a self-contained `p:sld` document.
//! All user-supplied text passes through `escape_xml`; shape ids come from
//! a monotonic counter local to the part, so no two parts share identifier
//! state.

use crate::common::unit::pt_to_centipoint;
use crate::common::xml::escape_xml;
use crate::error::{Error, Result};
use crate::layout::{BodyColumn, Frame, PositionedSlide};
use crate::opc::constants::namespace as ns;
use crate::pptx::master::EMPTY_SP_TREE;
use std::fmt::Write as FmtWrite;

// Font sizes, as hundredths of a point for the `sz` run attribute.
const HEADLINE_TITLE_SZ: u32 = pt_to_centipoint(40);
const BODY_TITLE_SZ: u32 = pt_to_centipoint(28);
const SUBTITLE_SZ: u32 = pt_to_centipoint(20);
const BULLET_SZ: u32 = pt_to_centipoint(18);

/// Hanging indent for bullet paragraphs, in EMUs.
const BULLET_INDENT: i64 = 285_750;

/// Monotonic shape id counter, local to one slide part.
///
/// Id 1 is reserved for the shape-tree group, so allocation starts at 2.
struct ShapeIds {
    next: u32,
}

impl ShapeIds {
    fn new() -> Self {
        Self { next: 2 }
    }

    fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Render one slide part.
pub(crate) fn slide_xml(slide: &PositionedSlide, font: &str) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    let mut ids = ShapeIds::new();

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        ns::DML_MAIN,
        ns::OFC_RELATIONSHIPS,
        ns::PML_MAIN
    )
    .map_err(render_err)?;

    xml.push_str("<p:cSld>");

    // Background comes before the shape tree.
    write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        slide.colors.background.to_hex()
    )
    .map_err(render_err)?;

    xml.push_str(EMPTY_SP_TREE);

    write_title_shape(&mut xml, slide, ids.next())?;

    if let Some(subtitle) = &slide.subtitle {
        // Only rendered when present; an absent subtitle emits no node.
        if let Some(frame) = slide.subtitle_frame {
            write_subtitle_shape(&mut xml, subtitle, &frame, slide, font, ids.next())?;
        }
    }

    for column in &slide.columns {
        write_body_column(&mut xml, column, slide, font, ids.next())?;
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    Ok(xml)
}

#[inline]
fn render_err(e: std::fmt::Error) -> Error {
    Error::Render(e.to_string())
}

/// Write an `a:xfrm` block for a frame, EMU coordinates via itoa.
fn write_frame(xml: &mut String, frame: &Frame) {
    let mut buf = itoa::Buffer::new();
    xml.push_str(r#"<a:xfrm><a:off x=""#);
    xml.push_str(buf.format(frame.x));
    xml.push_str(r#"" y=""#);
    xml.push_str(buf.format(frame.y));
    xml.push_str(r#""/><a:ext cx=""#);
    xml.push_str(buf.format(frame.cx));
    xml.push_str(r#"" cy=""#);
    xml.push_str(buf.format(frame.cy));
    xml.push_str(r#""/></a:xfrm>"#);
}

fn write_run(xml: &mut String, text: &str, sz: u32, bold: bool, color_hex: &str, font: &str) -> Result<()> {
    let b = if bold { r#" b="1""# } else { "" };
    write!(
        xml,
        r#"<a:r><a:rPr lang="en-US" sz="{sz}"{b} dirty="0"><a:solidFill><a:srgbClr val="{color_hex}"/></a:solidFill><a:latin typeface="{}"/></a:rPr><a:t>{}</a:t></a:r>"#,
        escape_xml(font),
        escape_xml(text)
    )
    .map_err(render_err)
}

/// Write the title placeholder shape.
fn write_title_shape(xml: &mut String, slide: &PositionedSlide, shape_id: u32) -> Result<()> {
    let headline = slide.layout.is_headline();
    let ph_type = if headline { "ctrTitle" } else { "title" };
    let sz = if headline { HEADLINE_TITLE_SZ } else { BODY_TITLE_SZ };

    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{shape_id}" name="Title {shape_id}"/>"#).map_err(render_err)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    write!(xml, r#"<p:nvPr><p:ph type="{ph_type}"/></p:nvPr>"#).map_err(render_err)?;
    xml.push_str("</p:nvSpPr><p:spPr>");
    write_frame(xml, &slide.title_frame);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr><p:txBody>");
    if headline {
        xml.push_str(r#"<a:bodyPr anchor="ctr"><a:normAutofit/></a:bodyPr>"#);
    } else {
        xml.push_str(r#"<a:bodyPr anchor="b"><a:normAutofit/></a:bodyPr>"#);
    }
    xml.push_str("<a:lstStyle/><a:p>");
    if headline {
        xml.push_str(r#"<a:pPr algn="ctr"/>"#);
    }
    // Title face follows the theme via the master; color and weight are explicit.
    write_run(
        xml,
        &slide.title,
        sz,
        true,
        &slide.colors.title.to_hex(),
        "+mj-lt",
    )?;
    xml.push_str("</a:p></p:txBody></p:sp>");
    Ok(())
}

fn write_subtitle_shape(
    xml: &mut String,
    subtitle: &str,
    frame: &Frame,
    slide: &PositionedSlide,
    font: &str,
    shape_id: u32,
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{shape_id}" name="Subtitle {shape_id}"/>"#).map_err(render_err)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/>"#);
    xml.push_str("</p:nvSpPr><p:spPr>");
    write_frame(xml, frame);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr><p:txBody>");
    xml.push_str(r#"<a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#);
    xml.push_str(r#"<a:p><a:pPr algn="ctr"/>"#);
    write_run(
        xml,
        subtitle,
        SUBTITLE_SZ,
        false,
        &slide.colors.body.to_hex(),
        font,
    )?;
    xml.push_str("</a:p></p:txBody></p:sp>");
    Ok(())
}

/// Write one bulleted body column as a text box.
fn write_body_column(
    xml: &mut String,
    column: &BodyColumn,
    slide: &PositionedSlide,
    font: &str,
    shape_id: u32,
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{shape_id}" name="Content {shape_id}"/>"#).map_err(render_err)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/>"#);
    xml.push_str("</p:nvSpPr><p:spPr>");
    write_frame(xml, &column.frame);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr><p:txBody>");
    xml.push_str(r#"<a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#);

    let marker = slide.colors.marker.to_hex();
    let body = slide.colors.body.to_hex();
    for bullet in &column.bullets {
        write!(
            xml,
            r#"<a:p><a:pPr marL="{BULLET_INDENT}" indent="-{BULLET_INDENT}"><a:buClr><a:srgbClr val="{marker}"/></a:buClr><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr>"#
        )
        .map_err(render_err)?;
        write_run(xml, bullet, BULLET_SZ, false, &body, font)?;
        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::place;
    use crate::model::{validate, SlideContent, SlideLayout};
    use crate::theme::Theme;

    fn render(slides: &[SlideContent]) -> Vec<String> {
        let theme = Theme::resolve("modern-professional");
        place(validate(slides).unwrap(), &theme)
            .iter()
            .map(|s| slide_xml(s, theme.font_family).unwrap())
            .collect()
    }

    fn slide(title: &str) -> SlideContent {
        SlideContent {
            title: title.to_string(),
            subtitle: None,
            content: Vec::new(),
            notes: None,
            layout: SlideLayout::Auto,
        }
    }

    #[test]
    fn hostile_title_is_escaped_and_recoverable() {
        let xml = render(&[slide("A & B <script>")]).remove(0);
        assert!(!xml.contains("<script>"));
        assert!(xml.contains("A &amp; B &lt;script&gt;"));
        assert_eq!(
            crate::common::xml::unescape_xml("A &amp; B &lt;script&gt;"),
            "A & B <script>"
        );
    }

    #[test]
    fn fake_closing_tag_cannot_break_structure() {
        let xml = render(&[slide("</a:t></a:r></a:p>")]).remove(0);
        assert_eq!(xml.matches("</a:t>").count(), 1);
        assert!(xml.contains("&lt;/a:t&gt;&lt;/a:r&gt;&lt;/a:p&gt;"));
    }

    #[test]
    fn absent_subtitle_emits_no_node() {
        let xml = render(&[slide("Intro")]).remove(0);
        assert!(!xml.contains("Subtitle"));
    }

    #[test]
    fn present_subtitle_is_rendered_centered() {
        let mut s = slide("Intro");
        s.subtitle = Some("A closer look".to_string());
        let xml = render(&[s]).remove(0);
        assert!(xml.contains("A closer look"));
        assert!(xml.contains(r#"name="Subtitle 3""#));
    }

    #[test]
    fn headline_slide_uses_centered_title_placeholder() {
        let xml = render(&[slide("Intro")]).remove(0);
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"sz="4000""#));
        // Inverted colors: background takes the title background.
        assert!(xml.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="4F46E5"/>"#));
    }

    #[test]
    fn body_slide_renders_bullets_with_markers() {
        let slides = [
            slide("Intro"),
            SlideContent {
                content: vec!["First point".to_string(), "Second point".to_string()],
                ..slide("Details")
            },
            slide("Summary"),
        ];
        let xml = render(&slides).remove(1);
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains("<a:buChar"));
        assert!(xml.contains("First point"));
        assert!(xml.contains("Second point"));
    }

    #[test]
    fn shape_ids_are_unique_within_a_part() {
        let mut s = slide("Everything");
        s.subtitle = Some("sub".to_string());
        s.content = vec!["a".to_string(), "b".to_string()];
        let xml = render(&[s]).remove(0);
        for id in 2..=4 {
            assert_eq!(xml.matches(&format!(r#"<p:cNvPr id="{id}""#)).count(), 1);
        }
    }
}
