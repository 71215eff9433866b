//! Geometry parameters for [`crate::render::draw_network`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::surface::Point;

/// Caller-supplied geometry, in pixels. Nothing here is cached between
/// renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Top-left corner of the drawing, also the top margin.
    pub offset: Point,
    /// Space left free below the tallest layer.
    pub bottom_margin: i32,
    pub neuron_radius: i32,
    /// Gap between the circles of adjacent layers, not counting diameters.
    pub layer_margin: i32,
    pub weight_thickness: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            bottom_margin: 30,
            neuron_radius: 40,
            layer_margin: 150,
            weight_thickness: 3,
        }
    }
}

impl Layout {
    /// Horizontal distance between the centers of adjacent layers.
    pub fn layer_pitch(&self) -> i32 {
        self.neuron_radius * 2 + self.layer_margin
    }

    /// Vertical space shared by every layer on a surface of `surface_height`.
    pub fn available_height(&self, surface_height: i32) -> i32 {
        surface_height - self.offset.y - self.bottom_margin
    }

    /// Width a network with `layers` layers occupies, including the last
    /// layer's circles.
    pub fn network_width(&self, layers: usize) -> i32 {
        match layers {
            0 => 0,
            n => (n as i32 - 1) * self.layer_pitch() + 2 * self.neuron_radius,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.neuron_radius < 0 {
            return Err(Error::InvalidLayout(format!(
                "neuron_radius must not be negative, got {}",
                self.neuron_radius
            )));
        }
        if self.weight_thickness < 1 {
            return Err(Error::InvalidLayout(format!(
                "weight_thickness must be at least 1, got {}",
                self.weight_thickness
            )));
        }
        if self.layer_margin < 0 || self.bottom_margin < 0 {
            return Err(Error::InvalidLayout("margins must not be negative".into()));
        }
        Ok(())
    }

    /// Reads a layout from JSON; absent fields keep their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let layout: Layout = serde_json::from_reader(BufReader::new(file))?;
        layout.validate()?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_viewer_geometry() {
        let l = Layout::default();
        assert_eq!(l.layer_pitch(), 230);
        assert_eq!(l.available_height(600), 570);
        assert_eq!(l.network_width(3), 2 * 230 + 80);
        assert_eq!(l.network_width(0), 0);
        assert!(l.validate().is_ok());
    }

    #[test]
    fn offset_reduces_available_height() {
        let l = Layout {
            offset: Point::new(10, 50),
            ..Layout::default()
        };
        assert_eq!(l.available_height(600), 520);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let l: Layout = serde_json::from_str(r#"{"neuron_radius": 12, "offset": [5, 6]}"#).unwrap();
        assert_eq!(l.neuron_radius, 12);
        assert_eq!(l.offset, Point::new(5, 6));
        assert_eq!(l.layer_margin, 150);
        assert_eq!(l.weight_thickness, 3);
    }

    #[test]
    fn rejects_bad_geometry() {
        let thin = Layout {
            weight_thickness: 0,
            ..Layout::default()
        };
        assert!(matches!(thin.validate(), Err(Error::InvalidLayout(_))));

        let negative = Layout {
            neuron_radius: -1,
            ..Layout::default()
        };
        assert!(negative.validate().is_err());
    }
}
