use nn_visualizer::{Point, Rgb, Surface};

/// Paints into an egui rectangle, with surface coordinates relative to its
/// top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    pub fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x as f32, p.y as f32)
    }

    pub fn to_surface(&self, pos: egui::Pos2) -> Point {
        let v = pos - self.rect.min;
        Point::new(v.x.round() as i32, v.y.round() as i32)
    }
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

impl Surface for PainterSurface<'_> {
    fn width(&self) -> i32 {
        self.rect.width() as i32
    }

    fn height(&self) -> i32 {
        self.rect.height() as i32
    }

    fn draw_circle(&mut self, color: Rgb, center: Point, radius: i32) {
        self.painter
            .circle_filled(self.to_screen(center), radius as f32, color32(color));
    }

    fn draw_line(&mut self, color: Rgb, a: Point, b: Point, thickness: i32) {
        self.painter.line_segment(
            [self.to_screen(a), self.to_screen(b)],
            egui::Stroke::new(thickness as f32, color32(color)),
        );
    }
}
