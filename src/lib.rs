//! Draw, select and label boxes and polygons over an image
//!
//! Shapes live in natural image coordinates. An [`session::EditorSession`]
//! turns display-space pointer events into shape edits, and
//! [`metadata`] converts the shape list to and from the JSON record stored
//! in the image's metadata.

pub mod config;
pub mod domain;
pub mod metadata;
pub mod render;
pub mod session;
