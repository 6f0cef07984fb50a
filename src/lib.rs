//! Longan - a deterministic PowerPoint (.pptx) deck synthesizer
//!
//! This library takes an in-memory slide deck plus a named visual template
//! and produces a byte-correct PresentationML package that office software
//! opens without repair. It is the synthesis core of a slide-generation
//! product: upstream collaborators produce the slide records, downstream
//! collaborators serve the returned bytes as a file download.
//!
//! # Features
//!
//! - **Closed template set**: four built-in themes, unknown ids degrade to
//!   the default theme instead of failing
//! - **Deterministic output**: identical input produces byte-identical
//!   archives, enabling snapshot testing and content-addressed caching
//! - **Injection-safe rendering**: arbitrary user/AI text can never break
//!   part structure
//! - **All-or-nothing contract**: a complete artifact or an error, never a
//!   truncated file
//!
//! # Example - Synthesizing a deck
//!
//! ```no_run
//! use longan::{synthesize, SlideContent, SlideLayout};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let slides = vec![
//!     SlideContent {
//!         title: "Quarterly Review".to_string(),
//!         subtitle: Some("Q3 2025".to_string()),
//!         content: vec![],
//!         notes: None,
//!         layout: SlideLayout::Auto,
//!     },
//!     SlideContent {
//!         title: "Highlights".to_string(),
//!         subtitle: None,
//!         content: vec!["Revenue up 12%".to_string(), "Two new regions".to_string()],
//!         notes: Some("Keep this section short.".to_string()),
//!         layout: SlideLayout::Auto,
//!     },
//! ];
//!
//! let bytes = synthesize(&slides, "modern-professional")?;
//! std::fs::write("review.pptx", bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Bounding worst-case latency
//!
//! ```no_run
//! use longan::{synthesize_with_options, SlideContent, SynthesisOptions};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let slides: Vec<SlideContent> = vec![];
//! let options = SynthesisOptions {
//!     timeout: Duration::from_millis(500),
//! };
//! let bytes = synthesize_with_options(&slides, "minimal-elegant", &options)?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod error;
pub mod layout;
pub mod model;
pub mod opc;
mod pptx;
pub mod theme;

pub use error::{Error, Result};
pub use model::{CanonicalSlide, ResolvedLayout, SlideContent, SlideLayout};
pub use theme::{TemplateId, Theme};

use std::time::{Duration, Instant};

/// Media type of the produced artifact, for the download collaborator.
pub const PPTX_CONTENT_TYPE: &str = opc::constants::content_type::PML_PRESENTATION;

/// Tunables for one synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Wall-clock budget for the whole pipeline. Exceeding it surfaces
    /// [`Error::Timeout`] instead of blocking indefinitely on pathological
    /// input.
    pub timeout: Duration,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Wall-clock budget checked between pipeline stages and per-slide renders.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    fn start(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now().checked_add(budget),
        }
    }

    /// A deadline that never expires (used by part-level tests).
    #[cfg(test)]
    pub(crate) fn unbounded() -> Self {
        Self { expires_at: None }
    }

    pub(crate) fn check(&self) -> Result<()> {
        match self.expires_at {
            Some(expires_at) if Instant::now() >= expires_at => Err(Error::Timeout),
            _ => Ok(()),
        }
    }
}

/// Synthesize a deck with default options.
///
/// Returns the complete `.pptx` archive bytes, suitable for byte-for-byte
/// transfer to a client as a file download. See [`synthesize_with_options`]
/// for the pipeline contract.
pub fn synthesize(slides: &[SlideContent], template_id: &str) -> Result<Vec<u8>> {
    synthesize_with_options(slides, template_id, &SynthesisOptions::default())
}

/// Synthesize a deck.
///
/// The pipeline runs validate -> place -> render -> assemble over the input
/// and holds no state beyond its own buffers, so concurrent calls never
/// interfere. Either the full artifact comes back or one [`Error`] does;
/// nothing partial ever escapes, and an unknown `template_id` is not an
/// error (the default theme is used instead).
pub fn synthesize_with_options(
    slides: &[SlideContent],
    template_id: &str,
    options: &SynthesisOptions,
) -> Result<Vec<u8>> {
    let deadline = Deadline::start(options.timeout);

    let theme = Theme::resolve(template_id);
    let canonical = model::validate(slides)?;
    deadline.check()?;

    let positioned = layout::place(canonical, &theme);
    deadline.check()?;

    let package = pptx::build_package(&positioned, &theme, &deadline)?;
    deadline.check()?;

    let bytes = opc::PackageWriter::to_bytes(&package)?;
    log::debug!(
        "synthesized {}-slide deck ({} bytes) with template {}",
        positioned.len(),
        bytes.len(),
        theme.template.as_str()
    );
    Ok(bytes)
}

/// Synthesize a deck and write it to a file.
///
/// Convenience over [`synthesize`] for callers that want a file on disk;
/// the synthesis core itself never touches the filesystem.
pub fn synthesize_to_file<P: AsRef<std::path::Path>>(
    slides: &[SlideContent],
    template_id: &str,
    path: P,
) -> Result<()> {
    let bytes = synthesize(slides, template_id)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::collections::HashMap;
    use std::io::{Cursor, Read};
    use std::time::Duration;

    fn slide(title: &str) -> SlideContent {
        SlideContent {
            title: title.to_string(),
            subtitle: None,
            content: Vec::new(),
            notes: None,
            layout: SlideLayout::Auto,
        }
    }

    fn sample_deck() -> Vec<SlideContent> {
        vec![
            SlideContent {
                subtitle: Some("An introduction".to_string()),
                ..slide("Intro")
            },
            SlideContent {
                content: (1..=3).map(|i| format!("Point {i}")).collect(),
                notes: Some("Speak slowly.".to_string()),
                ..slide("Body")
            },
            slide("Conclusion"),
        ]
    }

    fn unzip(bytes: &[u8]) -> HashMap<String, Vec<u8>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut members = HashMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            members.insert(file.name().to_string(), data);
        }
        members
    }

    fn assert_well_formed(name: &str, data: &[u8]) {
        let text = std::str::from_utf8(data).unwrap_or_else(|_| panic!("{name} is not UTF-8"));
        let mut reader = Reader::from_str(text);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("{name} is not well-formed: {e}"),
            }
        }
    }

    /// Resolve a relationship target against the source part's directory.
    fn resolve_target(base_dir: &str, target: &str) -> String {
        let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
        for segment in target.split('/') {
            if segment == ".." {
                segments.pop();
            } else {
                segments.push(segment);
            }
        }
        segments.join("/")
    }

    /// Extract every `Target` attribute from a `.rels` member.
    fn rel_targets(data: &[u8]) -> Vec<String> {
        let text = std::str::from_utf8(data).unwrap();
        text.split(r#"Target=""#)
            .skip(1)
            .map(|rest| rest.split('"').next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn synthesis_is_byte_deterministic() {
        let deck = sample_deck();
        let a = synthesize(&deck, "modern-professional").unwrap();
        let b = synthesize(&deck, "modern-professional").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn slide_order_matches_input_order() {
        let deck = sample_deck();
        let members = unzip(&synthesize(&deck, "academic-classic").unwrap());

        // The manifest lists rIds in input order; map them through the rels.
        let pres = std::str::from_utf8(&members["ppt/presentation.xml"]).unwrap();
        let rels = std::str::from_utf8(&members["ppt/_rels/presentation.xml.rels"]).unwrap();

        let manifest_rids: Vec<&str> = pres
            .split("<p:sldId ")
            .skip(1)
            .map(|rest| {
                let rest = rest.split(r#"r:id=""#).nth(1).unwrap();
                rest.split('"').next().unwrap()
            })
            .collect();
        assert_eq!(manifest_rids.len(), deck.len());

        for (index, rid) in manifest_rids.iter().enumerate() {
            let rel = rels
                .split(r#"<Relationship Id=""#)
                .skip(1)
                .find(|r| r.starts_with(&format!("{rid}\"")))
                .unwrap();
            let target = rel.split(r#"Target=""#).nth(1).unwrap();
            let target = target.split('"').next().unwrap();
            assert_eq!(target, format!("slides/slide{}.xml", index + 1));

            let slide_xml = std::str::from_utf8(&members[&format!("ppt/slides/slide{}.xml", index + 1)]).unwrap();
            assert!(slide_xml.contains(&crate::common::xml::escape_xml(&deck[index].title)));
        }
    }

    #[test]
    fn every_part_is_well_formed_xml() {
        let members = unzip(&synthesize(&sample_deck(), "creative-vibrant").unwrap());
        for (name, data) in &members {
            assert_well_formed(name, data);
        }
    }

    #[test]
    fn no_relationship_dangles_and_content_types_cover_all_parts() {
        let members = unzip(&synthesize(&sample_deck(), "modern-professional").unwrap());

        // Every .rels target resolves to a member of the archive.
        for (name, data) in &members {
            if !name.ends_with(".rels") {
                continue;
            }
            let base_dir = name
                .trim_end_matches(|c| c != '/')
                .trim_end_matches("_rels/");
            for target in rel_targets(data) {
                let resolved = resolve_target(base_dir, &target);
                assert!(
                    members.contains_key(&resolved),
                    "{name} references missing part {resolved}"
                );
            }
        }

        // The content-types manifest names every xml part exactly once.
        let manifest = std::str::from_utf8(&members["[Content_Types].xml"]).unwrap();
        for name in members.keys() {
            if name == "[Content_Types].xml" || name.ends_with(".rels") {
                continue;
            }
            assert_eq!(
                manifest.matches(&format!(r#"PartName="/{name}""#)).count(),
                1,
                "content types must cover /{name} exactly once"
            );
        }
    }

    #[test]
    fn unknown_template_falls_back_instead_of_failing() {
        let bytes = synthesize(&sample_deck(), "does-not-exist").unwrap();
        let members = unzip(&bytes);
        // Default theme palette shows up in the theme part.
        let theme = std::str::from_utf8(&members["ppt/theme/theme1.xml"]).unwrap();
        assert!(theme.contains("4F46E5"));
    }

    #[test]
    fn single_slide_deck_gets_title_styling() {
        let deck = vec![slide("Intro")];
        let members = unzip(&synthesize(&deck, "modern-professional").unwrap());
        let slide_xml = std::str::from_utf8(&members["ppt/slides/slide1.xml"]).unwrap();
        assert!(slide_xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        // Inverted colors: canvas takes the title background.
        assert!(slide_xml.contains(r#"<a:srgbClr val="4F46E5"/></a:solidFill><a:effectLst/></p:bgPr>"#));
    }

    #[test]
    fn eight_bullet_two_column_slide_splits() {
        let deck = vec![SlideContent {
            content: (1..=8).map(|i| format!("Item {i}")).collect(),
            layout: SlideLayout::TwoColumn,
            ..slide("Columns")
        }];
        let members = unzip(&synthesize(&deck, "modern-professional").unwrap());
        let slide_xml = std::str::from_utf8(&members["ppt/slides/slide1.xml"]).unwrap();
        // Title box plus two content boxes.
        assert!(slide_xml.contains(r#"name="Content 3""#));
        assert!(slide_xml.contains(r#"name="Content 4""#));
        assert!(slide_xml.contains("Item 4"));
        assert!(slide_xml.contains("Item 5"));
    }

    #[test]
    fn empty_deck_is_invalid_input() {
        assert!(matches!(
            synthesize(&[], "modern-professional"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn hostile_text_survives_end_to_end() {
        let deck = vec![slide(r#"A & B <script>alert("x")</script>"#)];
        let bytes = synthesize(&deck, "modern-professional").unwrap();
        let members = unzip(&bytes);
        let slide_xml = std::str::from_utf8(&members["ppt/slides/slide1.xml"]).unwrap();
        assert!(!slide_xml.contains("<script>"));
        assert!(slide_xml.contains("A &amp; B &lt;script&gt;"));
        assert_well_formed("ppt/slides/slide1.xml", slide_xml.as_bytes());
    }

    #[test]
    fn exhausted_budget_surfaces_timeout() {
        let result = synthesize_with_options(
            &sample_deck(),
            "modern-professional",
            &SynthesisOptions {
                timeout: Duration::ZERO,
            },
        );
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[test]
    fn notes_are_rendered_and_linked() {
        let members = unzip(&synthesize(&sample_deck(), "modern-professional").unwrap());
        let notes = std::str::from_utf8(&members["ppt/notesSlides/notesSlide2.xml"]).unwrap();
        assert!(notes.contains("Speak slowly."));
        let slide_rels = std::str::from_utf8(&members["ppt/slides/_rels/slide2.xml.rels"]).unwrap();
        assert!(slide_rels.contains("notesSlide2.xml"));
        // Slides without notes get no notes part.
        assert!(!members.contains_key("ppt/notesSlides/notesSlide1.xml"));
    }

    #[test]
    fn save_convenience_writes_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        synthesize_to_file(&sample_deck(), "minimal-elegant", &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, synthesize(&sample_deck(), "minimal-elegant").unwrap());
    }

    #[test]
    fn concurrent_requests_do_not_interfere() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let deck = vec![slide(&format!("Deck {i}")), slide("End")];
                    synthesize(&deck, "creative-vibrant").unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let bytes = handle.join().unwrap();
            let members = unzip(&bytes);
            let slide_xml = std::str::from_utf8(&members["ppt/slides/slide1.xml"]).unwrap();
            assert!(slide_xml.contains(&format!("Deck {i}")));
        }
    }
}
