use std::rc::Rc;

use kiss3d::scene::PlanarSceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Translation2, Vector2};

use crate::consts::LABEL_FONT_SIZE;
use crate::render::{monospace_text_size, Color, Projection, Surface};

/// Planar circle nodes, reused from frame to frame. kiss3d draws scene nodes
/// every frame until they're removed, so anything we didn't draw this frame
/// gets hidden instead.
pub struct CirclePool {
    nodes: Vec<PlanarSceneNode>,
    in_use: usize,
}

impl CirclePool {
    pub fn new() -> Self {
        CirclePool {
            nodes: vec![],
            in_use: 0,
        }
    }

    fn begin_frame(&mut self) {
        self.in_use = 0;
    }

    fn acquire(&mut self, window: &mut Window) -> &mut PlanarSceneNode {
        if self.in_use == self.nodes.len() {
            // Unit circle; the real radius is applied as a scale
            self.nodes.push(window.add_circle(1.0));
        }
        let node = &mut self.nodes[self.in_use];
        self.in_use += 1;
        node.set_visible(true);
        node
    }

    fn end_frame(&mut self) {
        for node in self.nodes[self.in_use..].iter_mut() {
            node.set_visible(false);
        }
    }
}

/// Draws onto a kiss3d window for the duration of one frame.
///
/// Screen coordinates have their origin in the top-left and y pointing down;
/// kiss3d's planar camera puts the origin in the middle with y pointing up,
/// in logical pixels. Text, on the other hand, is placed in physical pixels
/// from the top-left.
pub struct WindowSurface<'a> {
    window: &'a mut Window,
    circles: &'a mut CirclePool,
    font: &'a Rc<Font>,
    size: Vector2<f32>,
    scale_factor: f32,
}

impl<'a> WindowSurface<'a> {
    pub fn new(window: &'a mut Window, circles: &'a mut CirclePool, font: &'a Rc<Font>) -> Self {
        // The same factor kiss3d's planar camera divides by
        let scale_factor = window.scale_factor() as f32;
        let size = logical_size(window.width(), window.height(), scale_factor);
        circles.begin_frame();

        WindowSurface {
            window,
            circles,
            font,
            size,
            scale_factor,
        }
    }

    /// Projection that centers the world on this window.
    pub fn projection(&self) -> Projection {
        Projection::with_size(self.size.x as f64, self.size.y as f64)
    }

    /// Hides any circles left over from previous frames.
    pub fn finish(self) {
        self.circles.end_frame();
    }

    fn to_planar(&self, pt: &Point2<f32>) -> Point2<f32> {
        screen_to_planar(&self.size, pt)
    }
}

fn logical_size(physical_width: u32, physical_height: u32, scale_factor: f32) -> Vector2<f32> {
    Vector2::new(physical_width as f32, physical_height as f32) / scale_factor
}

fn screen_to_planar(size: &Vector2<f32>, pt: &Point2<f32>) -> Point2<f32> {
    Point2::new(pt.x - size.x / 2.0, size.y / 2.0 - pt.y)
}

impl Surface for WindowSurface<'_> {
    fn fill(&mut self, color: Color) {
        self.window.set_background_color(color.x, color.y, color.z);
    }

    fn draw_polyline(&mut self, points: &[Point2<f32>], color: Color) {
        for pts in points.windows(2) {
            let a = self.to_planar(&pts[0]);
            let b = self.to_planar(&pts[1]);
            self.window.draw_planar_line(&a, &b, &color);
        }
    }

    fn draw_filled_circle(&mut self, center: Point2<f32>, radius: f32, color: Color) {
        let center = self.to_planar(&center);
        let node = self.circles.acquire(self.window);
        node.set_local_translation(Translation2::new(center.x, center.y));
        node.set_local_scale(radius, radius);
        node.set_color(color.x, color.y, color.z);
    }

    fn draw_text(&mut self, text: &str, top_left: Point2<f32>, color: Color) {
        let pos = top_left * self.scale_factor;
        self.window.draw_text(
            text,
            &pos,
            LABEL_FONT_SIZE * self.scale_factor,
            self.font,
            &color,
        );
    }

    fn text_size(&self, text: &str) -> Vector2<f32> {
        // kiss3d doesn't expose glyph metrics, so this is an estimate
        monospace_text_size(text)
    }
}
