//! Draws the structure of a feed-forward neural network: neurons as circles
//! colored by their bias, connections as lines colored by their weight.
//!
//! Values are normalized per layer (and per weight matrix) by their largest
//! magnitude, then mapped through [`activation_color`]: pink for negative,
//! green for positive. Drawing goes through the [`Surface`] trait, so the
//! same code paints into an egui window or into a [`RecordingSurface`].

pub mod color;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod surface;

pub use color::{activation_color, Rgb};
pub use error::{Error, Result};
pub use layout::Layout;
pub use model::{Matrix, Network};
pub use render::{draw_connections, draw_layer, draw_network};
pub use surface::{DrawCall, Point, RecordingSurface, Surface};
