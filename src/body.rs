use log::warn;
use nalgebra::{Point2, Vector2};

use crate::config::{BodyDef, BodyInfo};
use crate::consts::G;
use crate::render::{Projection, Surface, WHITE};

// Label offsets relative to the body's center, in pixels
const NAME_OFFSET: f32 = 35.0;
const DISTANCE_OFFSET: f32 = -15.0;

/// What one body looks like to the others during a force pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub position: Point2<f64>,
    pub mass: f64,
    pub is_anchor: bool,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub info: BodyInfo,
    position: Point2<f64>,
    velocity: Vector2<f64>,
    trail: Vec<Point2<f64>>,
    distance_to_anchor: f64,
}

impl Body {
    pub fn new(def: &BodyDef) -> Self {
        Body {
            info: def.info.clone(),
            position: def.position,
            velocity: def.velocity,
            trail: vec![],
            distance_to_anchor: 0.0,
        }
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.info.mass
    }

    pub fn is_anchor(&self) -> bool {
        self.info.is_anchor
    }

    /// Every position this body has been integrated to, oldest first.
    pub fn trail(&self) -> &[Point2<f64>] {
        &self.trail
    }

    /// Distance to the anchor as of the last force pass, in meters.
    pub fn distance_to_anchor(&self) -> f64 {
        self.distance_to_anchor
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.info.mass * self.velocity.norm_squared()
    }

    pub fn point_mass(&self) -> PointMass {
        PointMass {
            position: self.position,
            mass: self.info.mass,
            is_anchor: self.info.is_anchor,
        }
    }

    /// Returns the gravitational force that `other` exerts on this body.
    ///
    /// If `other` is the anchor, the distance to it is remembered for display.
    /// Two bodies in exactly the same place exert no force on each other,
    /// since the direction between them is undefined.
    pub fn attraction(&mut self, other: &PointMass) -> Vector2<f64> {
        let delta = other.position - self.position;
        let distance = delta.norm();

        if other.is_anchor {
            self.distance_to_anchor = distance;
        }

        if distance == 0.0 {
            warn!("{} coincides with another body; skipping their attraction", self.info.name);
            return Vector2::zeros();
        }

        let force = G * self.info.mass * other.mass / (distance * distance);
        let theta = delta.y.atan2(delta.x);
        Vector2::new(theta.cos(), theta.sin()) * force
    }

    /// Advances this body by `dt` seconds under the pull of every entry in
    /// `bodies` except the one at `own_index`, which is this body.
    ///
    /// Explicit Euler: velocity first, then position with the new velocity.
    pub fn update_position(&mut self, own_index: usize, bodies: &[PointMass], dt: f64) {
        let mut total_force = Vector2::zeros();
        for (idx, other) in bodies.iter().enumerate() {
            if idx == own_index {
                continue;
            }
            total_force += self.attraction(other);
        }

        let acceleration = total_force / self.info.mass;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
        self.trail.push(self.position);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, projection: &Projection) {
        let center = projection.to_screen(&self.position);
        let color = self.info.color;

        if self.trail.len() > 2 {
            let points: Vec<_> = self
                .trail
                .iter()
                .map(|pt| projection.to_screen(pt))
                .collect();
            surface.draw_polyline(&points, color);
        }
        surface.draw_filled_circle(center, self.info.radius, color);

        if self.info.is_anchor {
            let size = surface.text_size(&self.info.name);
            let corner = Point2::new(center.x - size.x / 2.0, center.y - size.y / 2.0);
            surface.draw_text(&self.info.name, corner, WHITE);
        } else {
            let size = surface.text_size(&self.info.name);
            let corner = Point2::new(center.x - size.x / 2.0, center.y - size.y + NAME_OFFSET);
            surface.draw_text(&self.info.name, corner, WHITE);

            let distance = self.distance_label();
            let size = surface.text_size(&distance);
            let corner = Point2::new(
                center.x - size.x / 2.0,
                center.y - size.y + DISTANCE_OFFSET,
            );
            surface.draw_text(&distance, corner, WHITE);
        }
    }

    fn distance_label(&self) -> String {
        format!("{:.1}KM", self.distance_to_anchor / 1000.0)
    }
}
