//! Input slide model and validation.
//!
//! The upstream generation step hands the synthesizer an ordered list of
//! [`SlideContent`] records. Validation normalizes them into
//! [`CanonicalSlide`] values: text is trimmed, control characters are
//! stripped, lengths are capped, and the `auto` layout is disambiguated.
//! Input is never mutated; slide order is preserved exactly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum characters kept from a slide title.
pub(crate) const MAX_TITLE_LEN: usize = 200;
/// Maximum characters kept from a subtitle.
pub(crate) const MAX_SUBTITLE_LEN: usize = 300;
/// Maximum characters kept from a single bullet line.
pub(crate) const MAX_BULLET_LEN: usize = 400;
/// Maximum characters kept from speaker notes.
pub(crate) const MAX_NOTES_LEN: usize = 4000;

/// Bullet count above which a two-column slide actually splits into columns.
pub(crate) const TWO_COLUMN_THRESHOLD: usize = 6;

/// Layout kind requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    /// Centered title slide with optional subtitle.
    Title,
    /// Title band with a single bulleted column.
    Bullets,
    /// Title band with bullets split across two columns when long enough.
    TwoColumn,
    /// Closing slide styled like the title slide.
    Summary,
    /// Resolve from the slide's position and content shape.
    #[default]
    Auto,
}

/// One slide as produced by the upstream generation step.
///
/// Immutable once handed to the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    /// Slide title. Required; a slide with an empty title is rejected.
    pub title: String,
    /// Optional subtitle, rendered on title/summary slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Ordered bullet lines.
    #[serde(default)]
    pub content: Vec<String>,
    /// Optional speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Requested layout; defaults to `auto`.
    #[serde(default)]
    pub layout: SlideLayout,
}

/// Layout after `auto` disambiguation. No `Auto` value survives validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedLayout {
    Title,
    Bullets,
    TwoColumn,
    Summary,
}

impl ResolvedLayout {
    /// Title and summary slides share the inverted color treatment.
    #[inline]
    pub fn is_headline(self) -> bool {
        matches!(self, Self::Title | Self::Summary)
    }
}

/// The normalized, fully resolved representation of one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSlide {
    /// 0-based position; defines output ordering.
    pub index: usize,
    /// Resolved layout kind.
    pub layout: ResolvedLayout,
    /// Normalized title, guaranteed non-empty.
    pub title: String,
    /// Normalized subtitle, `None` when absent or blank.
    pub subtitle: Option<String>,
    /// Normalized bullet lines; blank lines are dropped.
    pub bullets: Vec<String>,
    /// Normalized speaker notes, `None` when absent or blank.
    pub notes: Option<String>,
}

/// Validate and normalize an input deck.
///
/// Rejects an empty deck and slides whose trimmed title is empty. Everything
/// else is normalized deterministically: same input, same canonical output.
pub fn validate(slides: &[SlideContent]) -> Result<Vec<CanonicalSlide>> {
    if slides.is_empty() {
        return Err(Error::InvalidInput("slide list is empty".to_string()));
    }

    let last = slides.len() - 1;
    let mut canonical = Vec::with_capacity(slides.len());

    for (index, slide) in slides.iter().enumerate() {
        let title = normalize(&slide.title, MAX_TITLE_LEN);
        if title.is_empty() {
            return Err(Error::InvalidInput(format!(
                "slide {} has no title",
                index
            )));
        }

        let bullets: Vec<String> = slide
            .content
            .iter()
            .map(|line| normalize(line, MAX_BULLET_LEN))
            .filter(|line| !line.is_empty())
            .collect();

        let layout = resolve_layout(slide.layout, index, last, bullets.len());

        canonical.push(CanonicalSlide {
            index,
            layout,
            title,
            subtitle: normalize_opt(slide.subtitle.as_deref(), MAX_SUBTITLE_LEN),
            bullets,
            notes: normalize_opt(slide.notes.as_deref(), MAX_NOTES_LEN),
        });
    }

    Ok(canonical)
}

/// Resolve the `auto` layout from slide position and content shape.
///
/// An explicit layout always wins; positional inference never overrides it.
/// For `auto`: index 0 is the title slide, the last index is the summary
/// slide (first wins for a single-slide deck), and interior slides pick
/// two-column when the bullet list is long enough.
fn resolve_layout(
    requested: SlideLayout,
    index: usize,
    last: usize,
    bullet_count: usize,
) -> ResolvedLayout {
    match requested {
        SlideLayout::Title => ResolvedLayout::Title,
        SlideLayout::Bullets => ResolvedLayout::Bullets,
        SlideLayout::TwoColumn => ResolvedLayout::TwoColumn,
        SlideLayout::Summary => ResolvedLayout::Summary,
        SlideLayout::Auto => {
            if index == 0 {
                ResolvedLayout::Title
            } else if index == last {
                ResolvedLayout::Summary
            } else if bullet_count > TWO_COLUMN_THRESHOLD {
                ResolvedLayout::TwoColumn
            } else {
                ResolvedLayout::Bullets
            }
        },
    }
}

/// Trim, strip control characters, and cap length on a char boundary.
///
/// Tab and newline survive (they are valid in XML text); every other control
/// character is dropped so no part can become ill-formed. Truncation is
/// silent and stable.
fn normalize(text: &str, cap: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    cleaned.trim().chars().take(cap).collect()
}

fn normalize_opt(text: Option<&str>, cap: usize) -> Option<String> {
    let normalized = normalize(text?, cap);
    (!normalized.is_empty()).then_some(normalized)
}
