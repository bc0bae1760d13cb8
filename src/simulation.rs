use crate::body::{Body, PointMass};
use crate::config::SystemConfig;
use crate::consts::{G, TIMESTEP};
use crate::render::{Projection, Surface};

pub struct Simulation {
    bodies: Vec<Body>,
    timestep: f64,
    elapsed: f64,
    frames: u64,
}

impl Simulation {
    pub fn new(config: &SystemConfig) -> Self {
        Simulation {
            bodies: config.bodies().iter().map(Body::new).collect(),
            timestep: TIMESTEP,
            elapsed: 0.0,
            frames: 0,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn anchor(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_anchor())
    }

    pub fn body_named(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.info.name == name)
    }

    /// Simulated seconds since the start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of steps taken so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Moves every body forward by `dt` seconds.
    ///
    /// All forces are computed from where the bodies were at the start of the
    /// call, so the order of `bodies` doesn't affect the physics.
    pub fn advance(&mut self, dt: f64) {
        let snapshot: Vec<PointMass> = self.bodies.iter().map(Body::point_mass).collect();
        for (idx, body) in self.bodies.iter_mut().enumerate() {
            body.update_position(idx, &snapshot, dt);
        }

        self.elapsed += dt;
        self.frames += 1;
    }

    /// One frame's worth of simulation.
    pub fn step(&mut self) {
        self.advance(self.timestep);
    }

    /// Draws every body, in order. Later bodies end up on top.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, projection: &Projection) {
        for body in self.bodies.iter() {
            body.draw(surface, projection);
        }
    }

    /// Kinetic plus gravitational potential energy of the whole system, in
    /// joules. Explicit Euler doesn't conserve this, so watching it tells us
    /// how far the integration has drifted.
    pub fn total_energy(&self) -> f64 {
        let kinetic: f64 = self.bodies.iter().map(Body::kinetic_energy).sum();

        let mut potential = 0.0;
        for (i, a) in self.bodies.iter().enumerate() {
            for b in self.bodies[i + 1..].iter() {
                let r = (a.position() - b.position()).norm();
                if r > 0.0 {
                    potential -= G * a.mass() * b.mass() / r;
                }
            }
        }

        kinetic + potential
    }
}
