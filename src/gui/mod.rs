use std::rc::Rc;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::text::Font;
use kiss3d::window::{State, Window};
use log::{debug, info};
use nalgebra::Point2;

use self::controller::Controller;
use self::surface::{CirclePool, WindowSurface};
use crate::consts::SECONDS_PER_DAY;
use crate::render::{Surface, BLACK, WHITE};
use crate::simulation::Simulation;

mod controller;
mod surface;

// How often to log the energy drift
const FRAMES_PER_REPORT: u64 = 365;

pub struct Viewer {
    simulation: Simulation,
    controller: Controller,
    circles: CirclePool,
    font: Rc<Font>,
}

impl Viewer {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            controller: Controller::new(),
            circles: CirclePool::new(),
            font: Font::default(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller.process_event(event);
        }
    }

    fn report_progress(&self) {
        let frames = self.simulation.frames();
        if frames % FRAMES_PER_REPORT == 0 {
            debug!(
                "{}: total energy {:.6e} J",
                format_elapsed(self.simulation.elapsed()),
                self.simulation.total_energy()
            );
        }
    }
}

impl State for Viewer {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (None, None, None, None)
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        if self.controller.should_quit() {
            info!(
                "Stopping after {} frames ({})",
                self.simulation.frames(),
                format_elapsed(self.simulation.elapsed())
            );
            window.close();
            return;
        }

        // Physics first, then drawing
        self.simulation.step();
        self.report_progress();

        let status = status_text(self.simulation.elapsed(), self.controller.fps());
        let mut surface = WindowSurface::new(window, &mut self.circles, &self.font);
        surface.fill(BLACK);
        let projection = surface.projection();
        self.simulation.render(&mut surface, &projection);
        surface.draw_text(&status, Point2::new(10.0, 10.0), WHITE);
        surface.finish();

        self.controller.increment_frame_counter();
    }
}

/// Formats a number of simulated seconds as whole years and days.
pub fn format_elapsed(seconds: f64) -> String {
    let total_days = (seconds / SECONDS_PER_DAY) as u64;
    format!("{}y, {}d", total_days / 365, total_days % 365)
}

fn status_text(elapsed: f64, fps: f64) -> String {
    format!("Time: {}\nFPS: {:.0}", format_elapsed(elapsed), fps)
}
