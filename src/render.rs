use nalgebra::{ArrayStorage, Point2, Point3, Vector2, Vector3};

use crate::consts::{LABEL_FONT_SIZE, SCALE};

/// RGB, each channel in [0, 1]
pub type Color = Point3<f32>;

// Point3::new isn't const, so these are spelled out from their storage
pub const WHITE: Color = Point3 {
    coords: Vector3::from_array_storage(ArrayStorage([[1.0, 1.0, 1.0]])),
};
pub const BLACK: Color = Point3 {
    coords: Vector3::from_array_storage(ArrayStorage([[0.0, 0.0, 0.0]])),
};

/// Maps world coordinates (meters) to screen coordinates (pixels, origin in
/// the top-left corner, y pointing down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_size(width as f64, height as f64)
    }

    /// Like `new`, but for sizes that aren't whole pixels, e.g. a physical
    /// window size divided by a fractional scale factor.
    pub fn with_size(width: f64, height: f64) -> Self {
        Projection {
            scale: SCALE,
            width,
            height,
        }
    }

    pub fn to_screen(&self, world: &Point2<f64>) -> Point2<f32> {
        let x = world.x * self.scale + self.width / 2.0;
        let y = world.y * self.scale + self.height / 2.0;
        Point2::new(x as f32, y as f32)
    }
}

/// Something we can draw a frame onto. All coordinates are screen
/// coordinates, as produced by `Projection::to_screen`.
pub trait Surface {
    fn fill(&mut self, color: Color);

    fn draw_polyline(&mut self, points: &[Point2<f32>], color: Color);

    fn draw_filled_circle(&mut self, center: Point2<f32>, radius: f32, color: Color);

    /// `top_left` is the corner of the text's bounding box.
    fn draw_text(&mut self, text: &str, top_left: Point2<f32>, color: Color);

    /// Width and height of the box `draw_text` would fill.
    fn text_size(&self, text: &str) -> Vector2<f32>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Polyline(Vec<Point2<f32>>, Color),
    Circle(Point2<f32>, f32, Color),
    Text(String, Point2<f32>, Color),
}

/// A `Surface` that just remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[Point2<f32>]> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Polyline(points, _) => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point2<f32>, f32)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Circle(center, radius, _) => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point2<f32>)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(text, pos, _) => Some((text.as_str(), *pos)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn draw_polyline(&mut self, points: &[Point2<f32>], color: Color) {
        self.commands
            .push(DrawCommand::Polyline(points.to_vec(), color));
    }

    fn draw_filled_circle(&mut self, center: Point2<f32>, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, top_left: Point2<f32>, color: Color) {
        self.commands
            .push(DrawCommand::Text(text.to_owned(), top_left, color));
    }

    fn text_size(&self, text: &str) -> Vector2<f32> {
        monospace_text_size(text)
    }
}

/// Rough size of a line of text, assuming every glyph is 0.6 em wide.
pub fn monospace_text_size(text: &str) -> Vector2<f32> {
    let width = 0.6 * LABEL_FONT_SIZE * text.chars().count() as f32;
    Vector2::new(width, LABEL_FONT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::consts::AU;

    #[test]
    fn test_projection_is_affine() {
        let projection = Projection::new(1580, 920);

        // center of the world is center of the screen
        assert_eq!(
            projection.to_screen(&Point2::origin()),
            Point2::new(790.0, 460.0)
        );

        let samples = [
            (1.0, 0.0),
            (-1.0, 0.0),
            (0.387, -2.5),
            (-4.1, 3.3),
            (1e-3, 1e-3),
        ];
        for (x_au, y_au) in samples.iter() {
            let world = Point2::new(x_au * AU, y_au * AU);
            let screen = projection.to_screen(&world);
            assert_relative_eq!(screen.x, (x_au * 100.0 + 790.0) as f32, max_relative = 1e-6);
            assert_relative_eq!(screen.y, (y_au * 100.0 + 460.0) as f32, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_projection_respects_size() {
        let projection = Projection {
            scale: 2.0,
            width: 10.0,
            height: 20.0,
        };
        assert_eq!(
            projection.to_screen(&Point2::new(3.0, -4.0)),
            Point2::new(11.0, 2.0)
        );
    }

    #[test]
    fn test_projection_keeps_fractional_size() {
        // 1580x920 physical pixels at a 1.5x scale factor
        let projection = Projection::with_size(1580.0 / 1.5, 920.0 / 1.5);
        let center = projection.to_screen(&Point2::origin());
        assert_relative_eq!(center.x, (1580.0 / 3.0) as f32);
        assert_relative_eq!(center.y, (920.0 / 3.0) as f32);
        assert_eq!(Projection::new(800, 600), Projection::with_size(800.0, 600.0));
    }

    #[test]
    fn test_color_constants() {
        assert_eq!(WHITE, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(BLACK, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(WHITE.x, 1.0);
        assert_eq!(BLACK.z, 0.0);
    }

    #[test]
    fn test_recording_surface() {
        let mut surface = RecordingSurface::new();
        surface.fill(BLACK);
        surface.draw_filled_circle(Point2::new(1.0, 2.0), 3.0, WHITE);
        surface.draw_text("hi", Point2::new(4.0, 5.0), WHITE);

        assert_eq!(surface.commands.len(), 3);
        assert_eq!(surface.commands[0], DrawCommand::Fill(BLACK));
        assert_eq!(
            surface.circles().collect::<Vec<_>>(),
            vec![(Point2::new(1.0, 2.0), 3.0)]
        );
        assert_eq!(
            surface.texts().collect::<Vec<_>>(),
            vec![("hi", Point2::new(4.0, 5.0))]
        );
        assert_eq!(surface.polylines().count(), 0);
    }
}
