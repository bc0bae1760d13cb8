use anyhow::{Context, Result};
use kiss3d::window::Window;
use log::info;

use planet_sim::config::SystemConfig;
use planet_sim::consts::{FRAME_RATE, WINDOW_HEIGHT, WINDOW_WIDTH};
use planet_sim::gui::Viewer;
use planet_sim::simulation::Simulation;

fn main() -> Result<()> {
    env_logger::init();

    let config = SystemConfig::solar_system().context("bad built-in solar system table")?;
    let simulation = Simulation::new(&config);
    info!(
        "Simulating {} bodies, {} s per frame",
        simulation.bodies().len(),
        simulation.timestep()
    );

    let mut window = Window::new_with_size("Planet Simulation", WINDOW_WIDTH, WINDOW_HEIGHT);
    window.set_background_color(0.0, 0.0, 0.0);
    window.set_framerate_limit(Some(FRAME_RATE));
    info!("Opened {}x{} window", WINDOW_WIDTH, WINDOW_HEIGHT);

    window.render_loop(Viewer::new(simulation));
    Ok(())
}
