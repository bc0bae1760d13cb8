use std::f64::consts::PI;

/// One astronomical unit, in meters.
pub const AU: f64 = 149.6e6 * 1000.0;
pub const G: f64 = 6.67428e-11;

pub const SECONDS_PER_DAY: f64 = 3600.0 * 24.0;

/// Simulated seconds per frame: one day.
pub const TIMESTEP: f64 = SECONDS_PER_DAY;

pub const PIXELS_PER_AU: f64 = 100.0;
/// Screen pixels per meter
pub const SCALE: f64 = PIXELS_PER_AU / AU;

pub const WINDOW_WIDTH: u32 = 1580;
pub const WINDOW_HEIGHT: u32 = 920;
pub const FRAME_RATE: u64 = 60;

// Only the plot tool honors this. kiss3d draws planar lines at a fixed
// one-pixel width, so trails in the window are thinner.
pub const TRAIL_WIDTH: u32 = 2;
pub const LABEL_FONT_SIZE: f32 = 16.0;

pub fn circular_velocity(radius: f64, mu: f64) -> f64 {
    (mu / radius).sqrt()
}

pub fn orbital_period(a: f64, mu: f64) -> f64 {
    (4.0 * PI * PI * a.powi(3) / mu).sqrt()
}
