//! Shared plumbing used across the synthesizer.
//!
//! This module provides color values, EMU unit conversions, and XML text
//! escaping shared by the layout engine and the part generators.

pub mod color;
pub mod unit;
pub mod xml;

pub use color::RGBColor;
