//! Shape style constants
//!
//! Colors are straight RGBA. Sizes are in display pixels.

/// Fill of unselected shapes (translucent purple)
pub const FILL: [u8; 4] = [120, 10, 120, 30];
/// Fill of the selected shape (translucent yellow)
pub const SELECTED_FILL: [u8; 4] = [200, 200, 10, 30];
/// Side length of the square drawn on each vertex of the selected shape
pub const HANDLE_SIZE: f64 = 6.0;
