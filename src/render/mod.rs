//! Renderer-facing view of the session
//!
//! This module contains:
//! - Style constants shared by whatever draws the shapes
//! - RenderFrame, the display-space snapshot handed to the renderer

pub mod frame;
pub mod style;

pub use frame::RenderFrame;
