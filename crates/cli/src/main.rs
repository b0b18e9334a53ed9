use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use chromaframe_core::capture::domain::capture_source::CaptureSource;
use chromaframe_core::capture::infrastructure::ffmpeg_capture_source::FfmpegCaptureSource;
use chromaframe_core::capture::infrastructure::image_file_source::ImageFileSource;
use chromaframe_core::compositing::domain::filter_mode::FilterMode;
use chromaframe_core::compositing::infrastructure::extension_renderer::ExtensionRenderer;
use chromaframe_core::compositing::infrastructure::sticker_store::StickerStore;
use chromaframe_core::detection::domain::face_detector::FaceDetector;
use chromaframe_core::detection::infrastructure::fixed_face_detector::FixedFaceDetector;
use chromaframe_core::detection::infrastructure::replay_face_detector::ReplayFaceDetector;
use chromaframe_core::persistence::domain::contact_sheet::{
    compose_contact_sheet, flag_cell, ContactSheetLayout, CELL_FLAG_HEIGHT,
};
use chromaframe_core::persistence::domain::image_writer::ImageWriter;
use chromaframe_core::persistence::infrastructure::png_image_writer::PngImageWriter;
use chromaframe_core::pipeline::frame_orchestrator::FrameOrchestrator;
use chromaframe_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use chromaframe_core::pipeline::pipeline_settings::PipelineSettings;
use chromaframe_core::pipeline::tick_output::TickOutput;
use chromaframe_core::shared::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, IMAGE_EXTENSIONS};
use chromaframe_core::shared::region::FaceBox;

/// Runs the color-space inspection pipeline over an image or video and
/// writes a contact sheet per tick.
#[derive(Parser)]
#[command(name = "chromaframe")]
struct Cli {
    /// Input image or video file, played back as the live feed.
    input: PathBuf,

    /// Directory for contact sheets and frames.
    #[arg(long, short, default_value = "chromaframe-out")]
    output: PathBuf,

    /// Number of ticks to run.
    #[arg(long, default_value = "1")]
    ticks: usize,

    /// JSON settings file; flags below override its values.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to this file after the run.
    #[arg(long)]
    save_settings: Option<PathBuf>,

    /// Red threshold cutoff (clamped to 0-255).
    #[arg(long, allow_hyphen_values = true)]
    red_cutoff: Option<i64>,

    /// Green threshold cutoff (clamped to 0-255).
    #[arg(long, allow_hyphen_values = true)]
    green_cutoff: Option<i64>,

    /// Blue threshold cutoff (clamped to 0-255).
    #[arg(long, allow_hyphen_values = true)]
    blue_cutoff: Option<i64>,

    /// Filter for the face region: none, grayscale, blur, hsv, pixelate,
    /// sepia, invert, edge.
    #[arg(long)]
    face_filter: Option<FilterMode>,

    /// Face filter by shortcut key: 0 none, 1 grayscale, 2 blur, 3 hsv, 4 pixelate.
    #[arg(long, conflicts_with = "face_filter")]
    face_key: Option<char>,

    /// Filter for the extension view, including stickers: hat, glasses,
    /// sunglasses, cat-ears, dog-nose.
    #[arg(long)]
    extension_filter: Option<FilterMode>,

    /// Fixed face box in detector space (160x120): x,y,width,height.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    face_box: Option<Vec<i32>>,

    /// JSON file of recorded face boxes keyed by tick.
    #[arg(long, conflicts_with = "face_box")]
    face_boxes: Option<PathBuf>,

    /// Freeze the feed on this tick (as if the capture button was pressed).
    #[arg(long)]
    freeze_at: Option<usize>,

    /// Directory with hat.png, glasses.png, sunglasses.png, cat-ears.png,
    /// dog-nose.png.
    #[arg(long)]
    stickers: Option<PathBuf>,

    /// Extension canvas size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    canvas: Option<(u32, u32)>,

    /// Also write every derived frame of every tick as its own image.
    #[arg(long)]
    all_frames: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = build_settings(&cli)?;
    let source = open_source(&cli.input)?;
    let detector = build_detector(&cli)?;
    let stickers = match &cli.stickers {
        Some(dir) => StickerStore::from_dir(dir)?,
        None => StickerStore::new(),
    };
    if settings.extension_filter.sticker().is_some() && stickers.is_empty() {
        log::warn!("Sticker filter selected but no stickers loaded; pass --stickers");
    }

    let canvas = cli.canvas.unwrap_or((CANVAS_WIDTH, CANVAS_HEIGHT));
    let mut orchestrator = FrameOrchestrator::new(
        source,
        detector,
        Arc::new(stickers),
        Box::new(StdoutPipelineLogger::default()),
    )?
    .with_extension_renderer(ExtensionRenderer::new(canvas))
    .with_expected_ticks(cli.ticks);

    let writer = PngImageWriter::new();
    let layout = ContactSheetLayout::default();
    for tick in 0..cli.ticks {
        if cli.freeze_at == Some(tick) {
            orchestrator.capture();
        }
        let output = orchestrator.tick(&settings);
        if !output.face_detected() {
            log::info!("Tick {tick}: no face detected");
        }
        write_outputs(&writer, &cli.output, &output, &layout, cli.all_frames)?;
    }
    orchestrator.finish();

    if let Some(path) = &cli.save_settings {
        settings.save(path)?;
        log::info!("Settings written to {}", path.display());
    }
    log::info!("Output written to {}", cli.output.display());
    Ok(())
}

fn write_outputs(
    writer: &dyn ImageWriter,
    dir: &Path,
    output: &TickOutput,
    layout: &ContactSheetLayout,
    all_frames: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sheet = compose_contact_sheet(&output.grid(), layout);
    if !output.face_detected() {
        flag_cell(&mut sheet, layout, 0, 0, CELL_FLAG_HEIGHT);
    }
    writer.write(&dir.join(format!("tick-{:04}.png", output.tick)), &sheet, None)?;

    if all_frames {
        let tick_dir = dir.join(format!("tick-{:04}", output.tick));
        for (name, frame) in output.named_frames() {
            writer.write(&tick_dir.join(format!("{name}.png")), frame, None)?;
        }
    }
    Ok(())
}

fn build_settings(cli: &Cli) -> Result<PipelineSettings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.settings {
        Some(path) => PipelineSettings::load(path)?,
        None => PipelineSettings::default(),
    };
    if let Some(v) = cli.red_cutoff {
        settings.red_cutoff = v;
    }
    if let Some(v) = cli.green_cutoff {
        settings.green_cutoff = v;
    }
    if let Some(v) = cli.blue_cutoff {
        settings.blue_cutoff = v;
    }
    if let Some(mode) = cli.face_filter {
        settings.face_filter = mode;
    }
    if let Some(key) = cli.face_key {
        settings.face_filter =
            FilterMode::from_key(key).ok_or_else(|| format!("No filter bound to key '{key}'"))?;
    }
    if let Some(mode) = cli.extension_filter {
        settings.extension_filter = mode;
    }
    log::info!(
        "Cutoffs r={} g={} b={}, face filter: {}, extension: {}",
        settings.red_cutoff,
        settings.green_cutoff,
        settings.blue_cutoff,
        settings.face_filter,
        settings.extension_filter
    );
    Ok(settings)
}

fn open_source(input: &Path) -> Result<Box<dyn CaptureSource>, Box<dyn std::error::Error>> {
    if is_image(input) {
        Ok(Box::new(ImageFileSource::open(input)?))
    } else {
        Ok(Box::new(FfmpegCaptureSource::open(input)?))
    }
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.face_boxes {
        return Ok(Box::new(ReplayFaceDetector::from_json_file(path)?));
    }
    match cli.face_box.as_deref() {
        Some(&[x, y, w, h]) => Ok(Box::new(FixedFaceDetector::new(Some(FaceBox::new(x, y, w, h))))),
        _ => {
            log::info!("No face boxes given; face preview will show the unfiltered frame");
            Ok(Box::new(FixedFaceDetector::default()))
        }
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.ticks == 0 {
        return Err("Ticks must be at least 1".into());
    }
    if let Some(b) = &cli.face_box {
        if b.len() != 4 {
            return Err(format!("Face box needs x,y,width,height, got {} values", b.len()).into());
        }
        if b[2] <= 0 || b[3] <= 0 {
            return Err("Face box width and height must be positive".into());
        }
    }
    if let Some(path) = &cli.face_boxes {
        if !path.exists() {
            return Err(format!("Face boxes file not found: {}", path.display()).into());
        }
    }
    if let Some(mode) = cli.face_filter {
        if mode.sticker().is_some() {
            return Err(format!("'{mode}' is an extension filter; use --extension-filter").into());
        }
    }
    Ok(())
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w == 0 || h == 0 {
        return Err("canvas dimensions must be positive".into());
    }
    Ok((w, h))
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
