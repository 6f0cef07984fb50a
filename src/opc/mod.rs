//! Open Packaging Convention layer.
//!
//! Structural packing only: parts, relationship graphs, the content-types
//! manifest, and archive serialization. Everything presentation-specific
//! lives in [`crate::pptx`].

pub mod constants;
pub mod package;
pub mod part;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use part::{PackUri, PackagePart};
pub use pkgwriter::PackageWriter;
pub use rel::Relationships;
