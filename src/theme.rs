//! Template resolution.
//!
//! Maps a template identifier to a concrete style sheet. The set of known
//! templates is closed: dispatch happens over [`TemplateId`] exactly once per
//! synthesis run, and an unknown identifier degrades to the default template
//! instead of failing (a deck without the requested theme is still usable).

use crate::common::RGBColor;

/// Identifier of a known visual template.
///
/// This is the closed set the product's template catalog offers. Resolution
/// from the caller-supplied string happens in [`TemplateId::resolve`]; no
/// string-keyed lookups survive past that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateId {
    /// Clean corporate design, indigo palette. The fallback template.
    #[default]
    ModernProfessional,
    /// Traditional scholarly design, slate palette, serif typography.
    AcademicClassic,
    /// Bold colorful design, pink palette.
    CreativeVibrant,
    /// Sophisticated minimalist design, emerald palette.
    MinimalElegant,
}

impl TemplateId {
    /// Resolve a template identifier string.
    ///
    /// Unknown or empty identifiers fall back to
    /// [`TemplateId::ModernProfessional`]. Same input always yields the same
    /// value; no side effects beyond a debug log on fallback.
    pub fn resolve(id: &str) -> Self {
        match id {
            "modern-professional" => Self::ModernProfessional,
            "academic-classic" => Self::AcademicClassic,
            "creative-vibrant" => Self::CreativeVibrant,
            "minimal-elegant" => Self::MinimalElegant,
            other => {
                log::debug!("unknown template id {other:?}, using default template");
                Self::default()
            },
        }
    }

    /// The canonical identifier string for this template.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ModernProfessional => "modern-professional",
            Self::AcademicClassic => "academic-classic",
            Self::CreativeVibrant => "creative-vibrant",
            Self::MinimalElegant => "minimal-elegant",
        }
    }

    /// The concrete style sheet for this template.
    pub fn theme(self) -> Theme {
        match self {
            Self::ModernProfessional => Theme {
                template: self,
                primary: RGBColor::new(0x4F, 0x46, 0xE5),
                accent: RGBColor::new(0xC7, 0xD2, 0xFE),
                background: RGBColor::new(0xF8, 0xFA, 0xFC),
                title_background: RGBColor::new(0x4F, 0x46, 0xE5),
                font_family: "Calibri",
            },
            Self::AcademicClassic => Theme {
                template: self,
                primary: RGBColor::new(0x0F, 0x17, 0x2A),
                accent: RGBColor::new(0x94, 0xA3, 0xB8),
                background: RGBColor::new(0xFF, 0xFF, 0xFF),
                title_background: RGBColor::new(0x0F, 0x17, 0x2A),
                font_family: "Cambria",
            },
            Self::CreativeVibrant => Theme {
                template: self,
                primary: RGBColor::new(0xEC, 0x48, 0x99),
                accent: RGBColor::new(0xFB, 0xCF, 0xE8),
                background: RGBColor::new(0xFD, 0xF2, 0xF8),
                title_background: RGBColor::new(0xEC, 0x48, 0x99),
                font_family: "Trebuchet MS",
            },
            Self::MinimalElegant => Theme {
                template: self,
                primary: RGBColor::new(0x05, 0x96, 0x69),
                accent: RGBColor::new(0xA7, 0xF3, 0xD0),
                background: RGBColor::new(0xF0, 0xFD, 0xF4),
                title_background: RGBColor::new(0x05, 0x96, 0x69),
                font_family: "Georgia",
            },
        }
    }
}

/// The resolved style sheet for one synthesis run.
///
/// Constructed once per run by the resolver and shared read-only by every
/// slide in that run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// The template this theme was resolved from.
    pub template: TemplateId,
    /// Primary brand color; title text on body slides.
    pub primary: RGBColor,
    /// Accent color; bullet markers and subtitle text.
    pub accent: RGBColor,
    /// Slide background on body slides; text color on title/summary slides.
    pub background: RGBColor,
    /// Slide background on title/summary slides.
    pub title_background: RGBColor,
    /// Typeface applied across the deck.
    pub font_family: &'static str,
}

impl Theme {
    /// Resolve a caller-supplied template identifier into a theme.
    pub fn resolve(template_id: &str) -> Self {
        TemplateId::resolve(template_id).theme()
    }
}
