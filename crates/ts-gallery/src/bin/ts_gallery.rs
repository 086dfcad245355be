use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, ImageReader};
use serde::Serialize;
use ts_core::{to_f32, Cell, Plane, PlaneStack, PlaneView};
use ts_session::{PassReport, Segmenter, SessionConfig, StackHost};

#[derive(Parser, Debug)]
#[command(name = "ts_gallery")]
#[command(about = "Run trace-select segmentation on PNG fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Segment one plane from a grayscale PNG.
    #[command(name = "segment")]
    Segment(SegmentArgs),
    /// Segment a horizontally-merged stack of equal-width planes and
    /// propagate across them.
    #[command(name = "propagate")]
    Propagate(PropagateArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Input grayscale PNG.
    #[arg(long, required = true)]
    input: PathBuf,
    /// Output directory for masks and reports.
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Seed row of the click.
    #[arg(long, required = true)]
    seed_row: i32,
    /// Seed column of the click.
    #[arg(long, required = true)]
    seed_col: i32,
    /// Lower threshold bound.
    #[arg(long, required = true)]
    low: f32,
    /// Upper threshold bound.
    #[arg(long, required = true)]
    high: f32,
    /// Pixel budget per fill pass.
    #[arg(long, default_value_t = 2500)]
    budget: usize,
    /// Seed search radius.
    #[arg(long, default_value_t = 200)]
    radius: i32,
}

#[derive(Args, Debug, Clone)]
struct SegmentArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct PropagateArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Number of equal-width planes merged in the image.
    #[arg(long, default_value_t = 3)]
    n_planes: usize,
    /// Plane to click on.
    #[arg(long, default_value_t = 0)]
    start_plane: usize,
    /// Signed number of adjacent planes to propagate across.
    #[arg(long, default_value_t = 0)]
    steps: i32,
}

#[derive(Debug, Clone, Serialize)]
struct PassDto {
    plane: usize,
    loop_cells: usize,
    dead_ends: i32,
    newly_labeled: usize,
}

fn pass_dto(plane: usize, pass: &PassReport) -> PassDto {
    PassDto {
        plane,
        loop_cells: pass.path.len(),
        dead_ends: pass.dead_ends,
        newly_labeled: pass.newly_labeled(),
    }
}

fn load_gray(path: &Path) -> Result<GrayImage> {
    Ok(ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .into_luma8())
}

fn gray_to_plane(img: &GrayImage) -> Result<Plane<f32>> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let plane =
        Plane::from_vec(h, w, img.as_raw().clone()).context("building intensity plane")?;
    Ok(to_f32(&plane.as_view()))
}

fn mask_image(labels: &PlaneView<'_, i32>, target: i32) -> GrayImage {
    let (rows, cols) = (labels.rows(), labels.cols());
    let mut out = GrayImage::new(cols as u32, rows as u32);
    for r in 0..rows {
        for (c, &v) in labels.row(r).iter().enumerate() {
            if v == target {
                out.put_pixel(c as u32, r as u32, image::Luma([255u8]));
            }
        }
    }
    out
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn segmenter(common: &CommonArgs, steps: i32) -> Result<Segmenter> {
    Segmenter::new(SessionConfig {
        threshold_low: common.low,
        threshold_high: common.high,
        max_pixels_per_pass: common.budget,
        seed_search_radius: common.radius,
        plane_step_count: steps,
        ..SessionConfig::default()
    })
    .context("building segmenter")
}

fn run_segment(args: &SegmentArgs) -> Result<()> {
    let common = &args.common;
    let gray = load_gray(&common.input)?;
    let grid = gray_to_plane(&gray)?;
    let mut labels = Plane::new_fill(grid.rows(), grid.cols(), 0i32);

    let seg = segmenter(common, 0)?;
    let seed = Cell::new(common.seed_row, common.seed_col);
    let report = seg
        .run_pass(seed, &grid.as_view(), &mut labels.as_view_mut(), 1)
        .context("running the click pass")?;

    fs::create_dir_all(&common.out)
        .with_context(|| format!("creating {}", common.out.display()))?;
    let mask_path = common.out.join("mask.png");
    mask_image(&labels.as_view(), 1)
        .save(&mask_path)
        .with_context(|| format!("saving {}", mask_path.display()))?;
    write_json(&common.out.join("report.json"), &pass_dto(0, &report))?;

    println!(
        "loop {} cells, {} dead ends, {} newly labeled -> {}",
        report.path.len(),
        report.dead_ends,
        report.newly_labeled(),
        mask_path.display()
    );
    Ok(())
}

/// Split a horizontally-merged image into a plane stack.
fn split_planes(gray: &GrayImage, n_planes: usize) -> Result<PlaneStack<f32>> {
    let full_w = gray.width() as usize;
    let h = gray.height() as usize;
    anyhow::ensure!(n_planes > 0, "n_planes must be > 0");
    anyhow::ensure!(
        full_w % n_planes == 0,
        "image width {full_w} is not divisible by n_planes={n_planes}"
    );
    let w = full_w / n_planes;

    let pixels = gray.as_raw();
    let mut data = Vec::with_capacity(full_w * h);
    for k in 0..n_planes {
        for row in 0..h {
            let start = row * full_w + k * w;
            data.extend(pixels[start..start + w].iter().map(|&p| p as f32));
        }
    }
    PlaneStack::from_vec(n_planes, h, w, data).context("building plane stack")
}

fn run_propagate(args: &PropagateArgs) -> Result<()> {
    let common = &args.common;
    let gray = load_gray(&common.input)?;
    let grid = split_planes(&gray, args.n_planes)?;
    let (planes, rows, cols) = (grid.planes(), grid.rows(), grid.cols());
    let labels = PlaneStack::new_fill(planes, rows, cols, 0i32);

    let mut host =
        StackHost::new(grid, labels, args.start_plane).context("building stack host")?;
    let seg = segmenter(common, args.steps)?;
    let seed = Cell::new(common.seed_row, common.seed_col);

    let sweep = seg
        .propagate(&mut host, seed, 1)
        .context("running the sweep")?;

    fs::create_dir_all(&common.out)
        .with_context(|| format!("creating {}", common.out.display()))?;
    let reports: Vec<PassDto> = sweep
        .passes
        .iter()
        .zip(host.notified())
        .map(|(pass, &plane)| pass_dto(plane, pass))
        .collect();
    write_json(&common.out.join("report.json"), &reports)?;

    for &plane in host.notified() {
        let view = host.labels().plane_view(plane).context("reading labels")?;
        let mask_path = common.out.join(format!("mask_{plane}.png"));
        mask_image(&view, 1)
            .save(&mask_path)
            .with_context(|| format!("saving {}", mask_path.display()))?;
    }

    println!(
        "completed {} plane(s) -> {}",
        sweep.planes_completed,
        common.out.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Segment(args) => run_segment(&args),
        Command::Propagate(args) => run_propagate(&args),
    }
}
