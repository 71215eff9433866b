//! Drawing a network onto a [`Surface`].
//!
//! Every function here is stateless: identical inputs on identically sized
//! surfaces produce identical draw calls.

use tracing::{debug, trace};

use crate::color::activation_color;
use crate::layout::Layout;
use crate::model::{max_abs, Matrix, Network};
use crate::surface::{Point, Surface};

/// Divides by the largest magnitude, mapping everything to 0 when that is 0.
fn normalize(value: f64, max: f64) -> f64 {
    if max == 0.0 { 0.0 } else { value / max }
}

/// Vertical distance between neurons of a layer with `neurons` neurons
/// spread over `height` pixels.
///
/// Floor division, so the spacing leaves equal margins above the first and
/// below the last neuron.
pub fn neuron_spacing(height: i32, neurons: usize) -> i32 {
    height.div_euclid(neurons as i32 + 1)
}

/// Y coordinate of neuron `index` (0-based).
pub fn neuron_y(spacing: i32, index: usize, offset_y: i32) -> i32 {
    spacing * (index as i32 + 1) + offset_y
}

/// Draws one filled circle per bias, stacked vertically in `height`.
pub fn draw_layer<S: Surface + ?Sized>(
    surface: &mut S,
    biases: &[f64],
    height: i32,
    neuron_radius: i32,
    offset: Point,
) {
    let m = max_abs(biases);
    let spacing = neuron_spacing(height, biases.len());
    let x = offset.x + neuron_radius;
    for (i, &b) in biases.iter().enumerate() {
        let y = neuron_y(spacing, i, offset.y);
        surface.draw_circle(activation_color(normalize(b, m)), Point::new(x, y), neuron_radius);
    }
}

/// Draws one line per (source, destination) pair of `weights`.
///
/// `weights` has a row per destination neuron and a column per source
/// neuron. `spacing_l1`/`spacing_l2` are the source and destination layers'
/// neuron spacing, `l_margin` the distance between the two layer centers.
#[allow(clippy::too_many_arguments)]
pub fn draw_connections<S: Surface + ?Sized>(
    surface: &mut S,
    weights: &Matrix,
    spacing_l1: i32,
    spacing_l2: i32,
    l_margin: i32,
    offset: Point,
    thickness: i32,
    neuron_radius: i32,
) {
    let m = weights.max_abs();
    let x1 = offset.x + neuron_radius;
    let x2 = offset.x + l_margin + neuron_radius;
    for i in 0..weights.cols() {
        let y1 = neuron_y(spacing_l1, i, offset.y);
        for j in 0..weights.rows() {
            let y2 = neuron_y(spacing_l2, j, offset.y);
            let color = activation_color(normalize(weights.get(j, i), m));
            surface.draw_line(color, Point::new(x1, y1), Point::new(x2, y2), thickness);
        }
    }
}

/// Draws the whole network: every connection first, then every layer's
/// neurons on top of them.
pub fn draw_network<S: Surface + ?Sized>(surface: &mut S, network: &Network, layout: &Layout) {
    let height = layout.available_height(surface.height());
    let l_margin = layout.layer_pitch();
    let biases = network.biases();
    debug!(
        layers = biases.len(),
        height,
        surface_width = surface.width(),
        "drawing network"
    );

    let mut x = layout.offset.x;
    for (k, weights) in network.weights().iter().enumerate() {
        let spacing1 = neuron_spacing(height, biases[k].len());
        let spacing2 = neuron_spacing(height, biases[k + 1].len());
        trace!(gap = k, rows = weights.rows(), cols = weights.cols(), "connections");
        draw_connections(
            surface,
            weights,
            spacing1,
            spacing2,
            l_margin,
            Point::new(x, layout.offset.y),
            layout.weight_thickness,
            layout.neuron_radius,
        );
        x += l_margin;
    }

    let mut x = layout.offset.x;
    for (k, layer) in biases.iter().enumerate() {
        trace!(layer = k, neurons = layer.len(), "neurons");
        draw_layer(
            surface,
            layer,
            height,
            layout.neuron_radius,
            Point::new(x, layout.offset.y),
        );
        x += l_margin;
    }
}

/// Centers of every neuron as [`draw_network`] places them, one vector per
/// layer. Used for hit-testing against what was drawn.
pub fn neuron_centers(network: &Network, layout: &Layout, surface_height: i32) -> Vec<Vec<Point>> {
    let height = layout.available_height(surface_height);
    let mut x = layout.offset.x + layout.neuron_radius;
    let mut centers = Vec::with_capacity(network.num_layers());
    for layer in network.biases() {
        let spacing = neuron_spacing(height, layer.len());
        centers.push(
            (0..layer.len())
                .map(|i| Point::new(x, neuron_y(spacing, i, layout.offset.y)))
                .collect(),
        );
        x += layout.layer_pitch();
    }
    centers
}
