//! Pure domain types with minimal dependencies
//!
//! Geometry, shapes and selection logic, all in natural image
//! coordinates. Nothing here knows about rendering or input devices.

pub mod geometry;
pub mod selection;
pub mod shape;

pub use geometry::*;
pub use selection::*;
pub use shape::*;
