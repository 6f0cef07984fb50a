//! PresentationML part generation.
//!
//! Each submodule renders one family of parts; `package` stitches them into
//! the complete part set with its relationship graph.

mod master;
mod notes;
mod package;
mod pres;
mod props;
mod slide;
mod theme;

pub(crate) use package::build_package;
