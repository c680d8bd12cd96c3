use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "segoverlay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a ground-truth polygon into a binary mask PNG.
    Rasterize(RasterizeArgs),
    /// Score a predicted class mask against a ground-truth polygon.
    Iou(IouArgs),
    /// Blend legend colors for a predicted class mask into an image.
    Overlay(OverlayArgs),
    /// Run the full still-image flow: overlay, category readout and optional IoU.
    Score(ScoreArgs),
}

#[derive(Args, Debug, Clone, Copy)]
struct RasterOpts {
    /// Winding rule for the polygon fill.
    #[arg(long, value_enum, default_value_t = FillChoice::NonZero)]
    fill_rule: FillChoice,

    /// Channel thresholded into the mask.
    #[arg(long, value_enum, default_value_t = ChannelChoice::Alpha)]
    channel: ChannelChoice,
}

#[derive(Parser, Debug)]
struct RasterizeArgs {
    /// Polygon JSON (`all_points_x` / `all_points_y`).
    #[arg(long)]
    polygon: PathBuf,

    /// Mask width in pixels.
    #[arg(long)]
    width: u32,

    /// Mask height in pixels.
    #[arg(long)]
    height: u32,

    /// Output PNG path (foreground written as 255).
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    raster: RasterOpts,
}

#[derive(Parser, Debug)]
struct IouArgs {
    /// Predicted class-id mask (8-bit grayscale image).
    #[arg(long)]
    mask: PathBuf,

    /// Ground-truth polygon JSON, in mask pixel coordinates.
    #[arg(long)]
    polygon: PathBuf,

    /// Print `1 - IoU` instead of IoU.
    #[arg(long)]
    distance: bool,

    #[command(flatten)]
    raster: RasterOpts,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Predicted class-id mask (8-bit grayscale image).
    #[arg(long)]
    mask: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScoreArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Predicted class-id mask (8-bit grayscale image).
    #[arg(long)]
    mask: PathBuf,

    /// Ground-truth polygon JSON, in mask pixel coordinates.
    #[arg(long)]
    polygon: Option<PathBuf>,

    /// Output PNG path for the overlay.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    raster: RasterOpts,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FillChoice {
    NonZero,
    EvenOdd,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChannelChoice {
    Alpha,
    Red,
}

impl From<RasterOpts> for segoverlay::RasterSettings {
    fn from(o: RasterOpts) -> Self {
        Self {
            fill_rule: match o.fill_rule {
                FillChoice::NonZero => segoverlay::FillRule::NonZero,
                FillChoice::EvenOdd => segoverlay::FillRule::EvenOdd,
            },
            channel: match o.channel {
                ChannelChoice::Alpha => segoverlay::CoverageChannel::Alpha,
                ChannelChoice::Red => segoverlay::CoverageChannel::Red,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Rasterize(args) => cmd_rasterize(args),
        Command::Iou(args) => cmd_iou(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Score(args) => cmd_score(args),
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_rasterize(args: RasterizeArgs) -> anyhow::Result<()> {
    let polygon = segoverlay::Polygon::load(&args.polygon)?;
    let canvas = segoverlay::Canvas::new(args.width, args.height)?;
    let mask = segoverlay::rasterize(&polygon, canvas, args.raster.into())?;

    ensure_parent_dir(&args.out)?;
    mask.to_luma_image(true)?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} foreground pixels)",
        args.out.display(),
        mask.foreground_count()
    );
    Ok(())
}

fn cmd_iou(args: IouArgs) -> anyhow::Result<()> {
    let predicted = segoverlay::Mask::from_luma_png(&args.mask)?;
    let polygon = segoverlay::Polygon::load(&args.polygon)?;
    let truth = segoverlay::rasterize(&polygon, predicted.canvas(), args.raster.into())?;
    let stats = segoverlay::mask_iou(&predicted, &truth)?;

    let value = if args.distance {
        stats.distance()
    } else {
        stats.iou()
    };
    println!("{value:.4}");
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let mask = segoverlay::Mask::from_luma_png(&args.mask)?;
    let mut frame = segoverlay::FrameRGBA::load(&args.image)?.resized(mask.canvas())?;
    segoverlay::composite(&mut frame, &mask, &segoverlay::Legend::default())?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_score(args: ScoreArgs) -> anyhow::Result<()> {
    let mask = segoverlay::Mask::from_luma_png(&args.mask)?;
    let image = segoverlay::FrameRGBA::load(&args.image)?;
    let ground_truth = args
        .polygon
        .as_deref()
        .map(segoverlay::Polygon::load)
        .transpose()?;

    let opts = segoverlay::SessionOpts {
        ground_truth,
        raster: args.raster.into(),
        ..segoverlay::SessionOpts::default()
    };
    let mut session =
        segoverlay::SegmentationSession::new(segoverlay::StaticMaskSegmenter::new(mask), opts);
    let report = session
        .segment_image(&image)?
        .context("segmenter was not ready")?;

    report.overlay.save_png(&args.out)?;

    let category = report.category.as_deref().unwrap_or("none");
    match report.iou {
        Some(stats) => println!("Category: {category}, IoU: {:.4}", stats.iou()),
        None => println!("Category: {category}"),
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
