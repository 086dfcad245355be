//! Example: click segmentation of a synthetic plateau stack.
//!
//! Builds a stack of identical planes holding a bright square block on a dark
//! background, clicks the block center on the first plane, and propagates the
//! fill across the requested number of adjacent planes. Per-plane results are
//! written as JSON to stdout.
//!
//! Run from the workspace root:
//!   cargo run -p trace-select --example plateau -- --help
//!   cargo run -p trace-select --example plateau -- --planes 4 --steps 3

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use trace_select::{
    Cell, Plane, PlaneStack, Segmenter, SessionConfig, StackHost,
};

#[derive(Parser, Debug)]
#[command(about = "Segment a synthetic plateau and propagate across planes")]
struct Args {
    /// Plane side length in cells
    #[arg(long, default_value_t = 64)]
    size: usize,

    /// Number of planes in the stack
    #[arg(long, default_value_t = 3)]
    planes: usize,

    /// Signed number of adjacent planes to propagate across
    #[arg(long, default_value_t = 2)]
    steps: i32,

    /// Block intensity
    #[arg(long, default_value_t = 500.0)]
    intensity: f32,

    /// Lower threshold bound
    #[arg(long, default_value_t = 400.0)]
    low: f32,

    /// Upper threshold bound
    #[arg(long, default_value_t = 600.0)]
    high: f32,

    /// Pixel budget per fill pass
    #[arg(long, default_value_t = 2500)]
    budget: usize,
}

#[derive(Serialize)]
struct PlaneResult {
    plane: usize,
    loop_cells: usize,
    dead_ends: i32,
    newly_labeled: usize,
}

fn plateau(size: usize, intensity: f32) -> Plane<f32> {
    let mut plane = Plane::new_fill(size, size, 0.0f32);
    let lo = size / 4;
    let hi = size - size / 4;
    for r in lo..hi {
        for c in lo..hi {
            plane.data_mut()[r * size + c] = intensity;
        }
    }
    plane
}

fn main() -> Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.size >= 8, "plane size must be at least 8");
    anyhow::ensure!(args.planes > 0, "stack needs at least one plane");

    let grid = PlaneStack::repeat(&plateau(args.size, args.intensity), args.planes);
    let labels = PlaneStack::new_fill(args.planes, args.size, args.size, 0i32);
    let mut host = StackHost::new(grid, labels, 0).context("building stack host")?;

    let segmenter = Segmenter::new(SessionConfig {
        threshold_low: args.low,
        threshold_high: args.high,
        max_pixels_per_pass: args.budget,
        plane_step_count: args.steps,
        ..SessionConfig::default()
    })
    .context("building segmenter")?;

    let center = Cell::new(args.size as i32 / 2, args.size as i32 / 2);
    let sweep = segmenter
        .propagate(&mut host, center, 1)
        .context("running the sweep")?;

    println!(
        "completed {} plane(s), {} forward move(s)",
        sweep.planes_completed,
        host.moves().iter().filter(|&&d| d == args.steps.signum()).count()
    );

    let results: Vec<PlaneResult> = sweep
        .passes
        .iter()
        .zip(host.notified())
        .map(|(pass, &plane)| PlaneResult {
            plane,
            loop_cells: pass.path.len(),
            dead_ends: pass.dead_ends,
            newly_labeled: pass.newly_labeled(),
        })
        .collect();

    serde_json::to_writer_pretty(std::io::stdout(), &results).context("writing JSON")?;
    println!();
    Ok(())
}
