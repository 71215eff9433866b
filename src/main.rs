mod painter;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use nn_visualizer::render::neuron_centers;
use nn_visualizer::{draw_network, Layout, Network, Point};
use painter::PainterSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nn-visualizer", about = "Draw a feed-forward network's biases and weights")]
struct Args {
    /// JSON file with `biases` and `weights`
    #[arg(long)]
    network: Option<PathBuf>,

    /// Neuron count per layer for a randomly generated network
    #[arg(long, value_delimiter = ',', default_value = "3,5,4,2")]
    layers: Vec<usize>,

    /// JSON file with layout overrides
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Seed for random networks
    #[arg(long)]
    seed: Option<u64>,
}

struct ViewerApp {
    status: String,
    network: Network,
    layout: Layout,
    rng: StdRng,

    // Editable layer sizes, applied by regenerating the network
    editable_layers: Vec<usize>,
}

impl ViewerApp {
    fn new(network: Network, layout: Layout, rng: StdRng, status: String) -> Self {
        let editable_layers = network.layer_sizes();
        Self {
            status,
            network,
            layout,
            rng,
            editable_layers,
        }
    }

    fn randomize(&mut self) {
        self.network = Network::random(&self.editable_layers, &mut self.rng);
        self.status = format!("Random network {:?}", self.editable_layers);
        info!(layers = ?self.editable_layers, "generated random network");
    }

    fn draw_layer_editor(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        let mut remove = None;
        let count = self.editable_layers.len();
        for (i, n) in self.editable_layers.iter_mut().enumerate() {
            let label = match i {
                0 => "Input".to_string(),
                i if i + 1 == count => "Output".to_string(),
                i => format!("Hidden {i}"),
            };
            ui.horizontal(|ui| {
                ui.label(label);
                ui.add(egui::DragValue::new(n).range(1..=32));
                if i != 0 && i + 1 != count && ui.button("Remove").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            self.editable_layers.remove(i);
        }
        if ui.button("Add Hidden Layer").clicked() {
            let at = self.editable_layers.len().saturating_sub(1).max(1);
            self.editable_layers.insert(at.min(self.editable_layers.len()), 3);
        }
        if ui.button("Randomize").clicked() {
            self.randomize();
        }
    }

    fn draw_layout_editor(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layout");
        ui.add(egui::Slider::new(&mut self.layout.neuron_radius, 2..=80).text("Neuron radius"));
        ui.add(egui::Slider::new(&mut self.layout.layer_margin, 0..=400).text("Layer margin"));
        ui.add(egui::Slider::new(&mut self.layout.bottom_margin, 0..=200).text("Bottom margin"));
        ui.add(egui::Slider::new(&mut self.layout.weight_thickness, 1..=12).text("Weight thickness"));
        ui.horizontal(|ui| {
            ui.label("Offset:");
            ui.add(egui::DragValue::new(&mut self.layout.offset.x).range(0..=400));
            ui.add(egui::DragValue::new(&mut self.layout.offset.y).range(0..=400));
        });
        if ui.button("Reset layout").clicked() {
            self.layout = Layout::default();
        }
    }

    fn draw_network(&self, ui: &mut egui::Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(20, 20, 24));

        let mut surface = PainterSurface::new(&painter, rect);
        draw_network(&mut surface, &self.network, &self.layout);

        // Readout for the neuron under the pointer
        let Some(pos) = response.hover_pos() else {
            return;
        };
        let p = surface.to_surface(pos);
        let r2 = self.layout.neuron_radius * self.layout.neuron_radius;
        let centers = neuron_centers(&self.network, &self.layout, rect.height() as i32);
        let hit = centers.iter().enumerate().find_map(|(layer, points)| {
            points
                .iter()
                .position(|c| squared_distance(*c, p) <= r2)
                .map(|node| (layer, node))
        });
        if let Some((layer, node)) = hit {
            let bias = self.network.biases()[layer][node];
            let text = format!("Layer {layer}, neuron {node}\nBias: {bias:.4}");
            let anchor = surface.to_screen(centers[layer][node])
                + egui::vec2(self.layout.neuron_radius as f32 + 8.0, 0.0);
            let galley = painter.layout_no_wrap(text, egui::FontId::proportional(13.0), egui::Color32::BLACK);
            let box_rect = egui::Rect::from_min_size(anchor, galley.size() + egui::vec2(16.0, 16.0));
            painter.rect_filled(box_rect, 8.0, egui::Color32::from_rgba_unmultiplied(255, 255, 220, 230));
            painter.galley(box_rect.min + egui::vec2(8.0, 8.0), galley, egui::Color32::BLACK);
        }
    }
}

fn squared_distance(a: Point, b: Point) -> i32 {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx * dx + dy * dy
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.label(&self.status);
            ui.separator();
            self.draw_layer_editor(ui);
            ui.separator();
            self.draw_layout_editor(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Err(e) = self.layout.validate() {
                warn!(error = %e, "layout rejected, restoring defaults");
                self.layout = Layout::default();
            }
            self.draw_network(ui);
        });
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let layout = match &args.layout {
        Some(path) => Layout::load_json(path)
            .with_context(|| format!("failed to load layout from {}", path.display()))?,
        None => Layout::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (network, status) = match &args.network {
        Some(path) => {
            let network = Network::load_json(path)
                .with_context(|| format!("failed to load network from {}", path.display()))?;
            (network, format!("Loaded {}", path.display()))
        }
        None => {
            if args.layers.is_empty() {
                return Err(anyhow!("--layers needs at least one layer size"));
            }
            let network = Network::random(&args.layers, &mut rng);
            (network, format!("Random network {:?}", args.layers))
        }
    };
    info!(layers = ?network.layer_sizes(), "starting viewer");

    let app = ViewerApp::new(network, layout, rng, status);
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "NN Visualizer",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("viewer exited with error: {e}"))
}
