//! Geometry assignment for canonical slides.
//!
//! Computes, for every slide, where the title, subtitle, and body frames
//! sit on the canvas and which color role each element takes. All values
//! are EMUs in the writer's default 10" x 7.5" canvas. `place` is a pure
//! function: identical `(slides, theme)` input yields identical geometry,
//! which is what makes the snapshot-style tests below possible.

use crate::common::unit::EMUS_PER_INCH;
use crate::common::RGBColor;
use crate::model::{CanonicalSlide, ResolvedLayout, TWO_COLUMN_THRESHOLD};
use crate::theme::Theme;

/// Slide canvas width in EMUs (10 inches, standard 4:3).
pub const SLIDE_WIDTH_EMU: i64 = 10 * EMUS_PER_INCH;
/// Slide canvas height in EMUs (7.5 inches).
pub const SLIDE_HEIGHT_EMU: i64 = 15 * EMUS_PER_INCH / 2;

/// Outer margin on every side (0.5 inch).
const MARGIN: i64 = EMUS_PER_INCH / 2;
/// Horizontal gap between the two body columns (0.25 inch).
const COLUMN_GAP: i64 = EMUS_PER_INCH / 4;

/// Neutral dark tone for body text on light backgrounds.
const BODY_TEXT: RGBColor = RGBColor::new(0x33, 0x41, 0x55);

/// An axis-aligned rectangle on the slide canvas, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    /// Whether the frame lies entirely within the slide canvas.
    pub fn within_canvas(&self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.cx > 0
            && self.cy > 0
            && self.x + self.cx <= SLIDE_WIDTH_EMU
            && self.y + self.cy <= SLIDE_HEIGHT_EMU
    }
}

/// Color assignments for one slide.
///
/// Title/summary slides invert foreground and background relative to body
/// slides: the canvas takes the theme's title background and text drops to
/// the light background tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRoles {
    /// Canvas fill.
    pub background: RGBColor,
    /// Title text.
    pub title: RGBColor,
    /// Bullet and subtitle text.
    pub body: RGBColor,
    /// Bullet marker glyph.
    pub marker: RGBColor,
}

/// One body column with the bullets assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyColumn {
    pub frame: Frame,
    pub bullets: Vec<String>,
}

/// A canonical slide with concrete geometry and colors attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSlide {
    pub index: usize,
    pub layout: ResolvedLayout,
    pub title: String,
    pub subtitle: Option<String>,
    pub notes: Option<String>,
    pub colors: ColorRoles,
    pub title_frame: Frame,
    pub subtitle_frame: Option<Frame>,
    pub columns: Vec<BodyColumn>,
}

/// Assign geometry and color roles to every slide.
pub fn place(slides: Vec<CanonicalSlide>, theme: &Theme) -> Vec<PositionedSlide> {
    slides
        .into_iter()
        .map(|slide| place_slide(slide, theme))
        .collect()
}

fn place_slide(slide: CanonicalSlide, theme: &Theme) -> PositionedSlide {
    let content_width = SLIDE_WIDTH_EMU - 2 * MARGIN;

    let colors = if slide.layout.is_headline() {
        ColorRoles {
            background: theme.title_background,
            title: theme.background,
            body: theme.accent,
            marker: theme.accent,
        }
    } else {
        ColorRoles {
            background: theme.background,
            title: theme.primary,
            body: BODY_TEXT,
            marker: theme.accent,
        }
    };

    let (title_frame, subtitle_frame, body_frame) = if slide.layout.is_headline() {
        // Centered block: title, subtitle beneath, recap bullets below that.
        let title = Frame::new(MARGIN, 1_828_800, content_width, 1_371_600);
        let subtitle = slide
            .subtitle
            .is_some()
            .then(|| Frame::new(MARGIN, 3_276_600, content_width, 685_800));
        let body = Frame::new(MARGIN, 4_114_800, content_width, 2_286_000);
        (title, subtitle, body)
    } else {
        // Title band on top, body filling the rest.
        let title = Frame::new(MARGIN, 304_800, content_width, 1_143_000);
        let body_y = 1_600_200;
        let body = Frame::new(MARGIN, body_y, content_width, SLIDE_HEIGHT_EMU - body_y - MARGIN);
        (title, None, body)
    };

    let columns = split_columns(slide.layout, slide.bullets, body_frame);

    PositionedSlide {
        index: slide.index,
        layout: slide.layout,
        title: slide.title,
        subtitle: slide.subtitle,
        notes: slide.notes,
        colors,
        title_frame,
        subtitle_frame,
        columns,
    }
}

/// Split bullets into one or two columns.
///
/// Two equal columns only when the layout asks for them and the list is
/// long enough to justify the split; the divide falls at the ceiling
/// midpoint so the left column is never the shorter one.
fn split_columns(layout: ResolvedLayout, bullets: Vec<String>, body: Frame) -> Vec<BodyColumn> {
    if bullets.is_empty() {
        return Vec::new();
    }

    let split = layout == ResolvedLayout::TwoColumn && bullets.len() > TWO_COLUMN_THRESHOLD;
    if !split {
        return vec![BodyColumn {
            frame: body,
            bullets,
        }];
    }

    let col_width = (body.cx - COLUMN_GAP) / 2;
    let mut left = bullets;
    let right = left.split_off(left.len().div_ceil(2));

    vec![
        BodyColumn {
            frame: Frame::new(body.x, body.y, col_width, body.cy),
            bullets: left,
        },
        BodyColumn {
            frame: Frame::new(body.x + col_width + COLUMN_GAP, body.y, col_width, body.cy),
            bullets: right,
        },
    ]
}
