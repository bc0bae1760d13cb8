use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use plotters::prelude::*;

use planet_sim::config::SystemConfig;
use planet_sim::consts::{AU, TRAIL_WIDTH};
use planet_sim::simulation::Simulation;

/// Runs the solar system without a window and plots the orbit trails.
#[derive(Debug, Parser)]
struct Args {
    /// Number of simulated days (one step each)
    #[arg(long, default_value_t = 365)]
    days: u64,
    /// Where to write the PNG
    #[arg(long, default_value = "plots/orbits.png")]
    output: PathBuf,
    /// Width and height of the image, in pixels
    #[arg(long, default_value_t = 1000)]
    size: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SystemConfig::solar_system().context("bad built-in solar system table")?;
    let mut simulation = Simulation::new(&config);

    let initial_energy = simulation.total_energy();
    for _ in 0..args.days {
        simulation.step();
    }
    let final_energy = simulation.total_energy();

    println!("Simulated {} days", simulation.frames());
    println!("- Initial energy: {:e} J", initial_energy);
    println!("- Final energy: {:e} J", final_energy);
    println!(
        "- Relative drift: {:e}",
        (final_energy - initial_energy) / initial_energy.abs()
    );
    for body in simulation.bodies().iter().filter(|b| !b.is_anchor()) {
        println!(
            "- {}: {:.3} AU from the anchor",
            body.info.name,
            body.distance_to_anchor() / AU
        );
    }

    if let Some(dir) = args.output.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("could not create {}", dir.display()))?;
        }
    }

    draw_trails(&args.output, args.size, &simulation)
        .map_err(|e| anyhow!("failed to draw {}: {}", args.output.display(), e))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}

fn draw_trails(
    path: &Path,
    size: u32,
    simulation: &Simulation,
) -> Result<(), Box<dyn std::error::Error>> {
    // Square plot that fits every trail, in AU
    let extent = simulation
        .bodies()
        .iter()
        .flat_map(|b| b.trail().iter())
        .flat_map(|pt| pt.coords.iter().map(|c| c.abs() / AU))
        .fold(1.0, f64::max)
        * 1.1;

    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&BLACK)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart
        .configure_mesh()
        .bold_line_style(&WHITE.mix(0.2))
        .light_line_style(&WHITE.mix(0.05))
        .axis_style(&WHITE)
        .label_style(("sans-serif", 12).into_font().color(&WHITE))
        .draw()?;

    for body in simulation.bodies() {
        let c = body.info.color;
        let color = RGBColor(
            (c.x * 255.0).round() as u8,
            (c.y * 255.0).round() as u8,
            (c.z * 255.0).round() as u8,
        );

        let points: Vec<(f64, f64)> = body
            .trail()
            .iter()
            .map(|pt| (pt.x / AU, pt.y / AU))
            .collect();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(TRAIL_WIDTH)))?
            .label(body.info.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));

        let here = body.position();
        chart.draw_series(std::iter::once(Circle::new(
            (here.x / AU, here.y / AU),
            4,
            color.filled(),
        )))?;
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 14).into_font().color(&WHITE))
        .border_style(&WHITE)
        .background_style(&BLACK.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
