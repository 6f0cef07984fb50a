//! Part-set assembly for one synthesis run.
//!
//! Builds every part and the full relationship graph for a deck. Parts
//! whose markup references relationship ids (the presentation manifest)
//! are created rels-first: the ids handed out by the part's relationship
//! counter are captured and then flow into the generated XML, so a
//! reference can never point at a relationship that does not exist.

use crate::error::Result;
use crate::layout::PositionedSlide;
use crate::opc::constants::{content_type as ct, relationship_type as rt};
use crate::opc::{OpcPackage, PackUri, PackagePart};
use crate::pptx::theme::theme_xml;
use crate::pptx::{master, notes, pres, slide};
use crate::theme::Theme;
use crate::Deadline;

/// Build the complete part set for a deck.
pub(crate) fn build_package(
    slides: &[PositionedSlide],
    theme: &Theme,
    deadline: &Deadline,
) -> Result<OpcPackage> {
    let any_notes = slides.iter().any(|s| s.notes.is_some());
    let mut package = OpcPackage::new();

    // Presentation manifest: relationships first, markup once ids are known.
    let mut pres_part = PackagePart::new(
        PackUri::new("/ppt/presentation.xml")?,
        ct::PML_PRESENTATION_MAIN,
        Vec::new(),
    );
    let master_rid = pres_part.relate_to(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    let slide_rids: Vec<String> = slides
        .iter()
        .map(|s| pres_part.relate_to(rt::SLIDE, format!("slides/slide{}.xml", s.index + 1)))
        .collect();
    let notes_master_rid =
        any_notes.then(|| pres_part.relate_to(rt::NOTES_MASTER, "notesMasters/notesMaster1.xml"));
    pres_part.set_blob(
        pres::presentation_xml(&master_rid, notes_master_rid.as_deref(), &slide_rids)?.into_bytes(),
    );
    package.add_part(pres_part);

    // Slide master, its single layout, and the theme they share.
    let mut master_part = PackagePart::new(
        PackUri::new("/ppt/slideMasters/slideMaster1.xml")?,
        ct::PML_SLIDE_MASTER,
        Vec::new(),
    );
    let layout_rid = master_part.relate_to(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_part.relate_to(rt::THEME, "../theme/theme1.xml");
    master_part.set_blob(master::slide_master_xml(&layout_rid).into_bytes());
    package.add_part(master_part);

    let mut layout_part = PackagePart::new(
        PackUri::new("/ppt/slideLayouts/slideLayout1.xml")?,
        ct::PML_SLIDE_LAYOUT,
        master::slide_layout_xml().into_bytes(),
    );
    layout_part.relate_to(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    package.add_part(layout_part);

    package.add_part(PackagePart::new(
        PackUri::new("/ppt/theme/theme1.xml")?,
        ct::OFC_THEME,
        theme_xml(theme, "Longan Theme").into_bytes(),
    ));

    // Slide parts, filenames contiguous with display order.
    for positioned in slides {
        deadline.check()?;
        let n = positioned.index + 1;
        let mut part = PackagePart::new(
            PackUri::new(format!("/ppt/slides/slide{n}.xml"))?,
            ct::PML_SLIDE,
            slide::slide_xml(positioned, theme.font_family)?.into_bytes(),
        );
        part.relate_to(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        if positioned.notes.is_some() {
            part.relate_to(rt::NOTES_SLIDE, format!("../notesSlides/notesSlide{n}.xml"));
        }
        package.add_part(part);
    }

    // Notes slides and the notes master they hang from.
    for positioned in slides {
        let Some(note_text) = &positioned.notes else {
            continue;
        };
        deadline.check()?;
        let n = positioned.index + 1;
        let mut part = PackagePart::new(
            PackUri::new(format!("/ppt/notesSlides/notesSlide{n}.xml"))?,
            ct::PML_NOTES_SLIDE,
            notes::notes_slide_xml(note_text)?.into_bytes(),
        );
        part.relate_to(rt::NOTES_MASTER, "../notesMasters/notesMaster1.xml");
        part.relate_to(rt::SLIDE, format!("../slides/slide{n}.xml"));
        package.add_part(part);
    }

    if any_notes {
        let mut notes_master_part = PackagePart::new(
            PackUri::new("/ppt/notesMasters/notesMaster1.xml")?,
            ct::PML_NOTES_MASTER,
            notes::notes_master_xml().into_bytes(),
        );
        notes_master_part.relate_to(rt::THEME, "../theme/theme2.xml");
        package.add_part(notes_master_part);

        package.add_part(PackagePart::new(
            PackUri::new("/ppt/theme/theme2.xml")?,
            ct::OFC_THEME,
            theme_xml(theme, "Longan Notes Theme").into_bytes(),
        ));
    }

    // Document properties.
    let deck_title = slides.first().map(|s| s.title.as_str()).unwrap_or_default();
    package.add_part(PackagePart::new(
        PackUri::new("/docProps/core.xml")?,
        ct::OPC_CORE_PROPERTIES,
        super::props::core_props_xml(deck_title).into_bytes(),
    ));
    package.add_part(PackagePart::new(
        PackUri::new("/docProps/app.xml")?,
        ct::OFC_EXTENDED_PROPERTIES,
        super::props::app_props_xml(slides.len()).into_bytes(),
    ));

    // Package-level relationships.
    package.relate_to(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");
    package.relate_to(rt::CORE_PROPERTIES, "docProps/core.xml");
    package.relate_to(rt::EXTENDED_PROPERTIES, "docProps/app.xml");

    Ok(package)
}
