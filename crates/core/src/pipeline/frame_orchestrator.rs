use std::sync::Arc;
use std::time::Instant;

use crate::capture::domain::capture_source::CaptureSource;
use crate::compositing::domain::face_region_compositor::FaceRegionCompositor;
use crate::compositing::infrastructure::extension_renderer::ExtensionRenderer;
use crate::compositing::infrastructure::filter_factory::create_region_filter;
use crate::compositing::infrastructure::sticker_store::StickerStore;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::channel::{ChannelSelector, ColorChannel};
use crate::shared::constants::DERIVED_THRESHOLD_CUTOFF;
use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;
use crate::transform::color_space::{grayscale_boost, isolate_channel, to_hsv, to_ycbcr};
use crate::transform::resize::resize;
use crate::transform::threshold::threshold;

use super::pipeline_logger::PipelineLogger;
use super::pipeline_settings::PipelineSettings;
use super::tick_output::TickOutput;

/// Runs one full pipeline pass per tick: capture, derived frames, detection,
/// face compositing and the extension view, always in that order.
///
/// Owns the current source frame. While live, each tick replaces it with a
/// fresh capture; while frozen, every tick reprocesses the same frame.
/// A tick never fails: a capture error keeps the previous frame and a
/// detector error reads as "no face".
pub struct FrameOrchestrator {
    source: Box<dyn CaptureSource>,
    detector: Box<dyn FaceDetector>,
    stickers: Arc<StickerStore>,
    logger: Box<dyn PipelineLogger>,
    compositor: FaceRegionCompositor,
    extension: ExtensionRenderer,
    current: Frame,
    live: bool,
    tick: usize,
    expected_ticks: Option<usize>,
}

impl FrameOrchestrator {
    /// Pulls the first frame so the pipeline has something to show even if
    /// the source later stalls.
    pub fn new(
        mut source: Box<dyn CaptureSource>,
        detector: Box<dyn FaceDetector>,
        stickers: Arc<StickerStore>,
        logger: Box<dyn PipelineLogger>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let current = source.current_frame()?;
        log::info!(
            "Capture source ready at {}x{}",
            current.width(),
            current.height()
        );
        Ok(Self {
            source,
            detector,
            stickers,
            logger,
            compositor: FaceRegionCompositor::default(),
            extension: ExtensionRenderer::default(),
            current,
            live: true,
            tick: 0,
            expected_ticks: None,
        })
    }

    pub fn with_compositor(mut self, compositor: FaceRegionCompositor) -> Self {
        let (w, h) = compositor.detector_size();
        self.extension = self.extension.with_detector_size(w, h);
        self.compositor = compositor;
        self
    }

    pub fn with_extension_renderer(mut self, extension: ExtensionRenderer) -> Self {
        let (w, h) = self.compositor.detector_size();
        self.extension = extension.with_detector_size(w, h);
        self
    }

    /// Lets progress logging report a percentage.
    pub fn with_expected_ticks(mut self, ticks: usize) -> Self {
        self.expected_ticks = Some(ticks);
        self
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Freezes on a fresh capture. Later ticks reuse it until [`go_live`].
    ///
    /// [`go_live`]: FrameOrchestrator::go_live
    pub fn capture(&mut self) {
        match self.source.current_frame() {
            Ok(frame) => self.current = frame,
            Err(e) => self
                .logger
                .warn(&format!("Capture failed, freezing previous frame: {e}")),
        }
        self.live = false;
        log::info!("Frozen on tick {}", self.tick);
    }

    pub fn go_live(&mut self) {
        self.live = true;
        log::info!("Live from tick {}", self.tick);
    }

    pub fn current_frame(&self) -> &Frame {
        &self.current
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> usize {
        self.tick
    }

    pub fn finish(&self) {
        self.logger.summary();
    }

    pub fn tick(&mut self, settings: &PipelineSettings) -> TickOutput {
        let tick = self.tick;

        if self.live && settings.live {
            let started = Instant::now();
            match self.source.current_frame() {
                Ok(frame) => self.current = frame,
                Err(e) => self
                    .logger
                    .warn(&format!("Tick {tick}: capture failed, reusing previous frame: {e}")),
            }
            self.record("capture", started);
        }
        let source = self.current.clone().with_index(tick);

        let started = Instant::now();
        let grayscale = grayscale_boost(&source);
        self.record("grayscale", started);

        let started = Instant::now();
        let red = isolate_channel(&source, ColorChannel::Red);
        let green = isolate_channel(&source, ColorChannel::Green);
        let blue = isolate_channel(&source, ColorChannel::Blue);
        self.record("channels", started);

        let started = Instant::now();
        let red_threshold = settings.channel_threshold(ColorChannel::Red).apply(&red);
        let green_threshold = settings.channel_threshold(ColorChannel::Green).apply(&green);
        let blue_threshold = settings.channel_threshold(ColorChannel::Blue).apply(&blue);
        self.record("threshold", started);

        let started = Instant::now();
        let hsv = to_hsv(&source);
        let ycbcr = to_ycbcr(&source);
        self.record("color_space", started);

        let started = Instant::now();
        let hsv_threshold = threshold(&hsv, DERIVED_THRESHOLD_CUTOFF, ChannelSelector::All);
        let ycbcr_threshold = threshold(&ycbcr, DERIVED_THRESHOLD_CUTOFF, ChannelSelector::All);
        self.record("derived_threshold", started);

        let started = Instant::now();
        let face = self.detect(&source);
        self.record("detect", started);
        self.logger.face(face.is_some());

        let started = Instant::now();
        let filter = create_region_filter(settings.face_filter, &hsv);
        let face_preview = self
            .compositor
            .compose(&source, face.as_ref(), filter.as_ref());
        drop(filter);
        self.record("compose", started);

        let started = Instant::now();
        let extension = self.extension.render(
            &source,
            &hsv,
            settings.extension_filter,
            face.as_ref(),
            &self.stickers,
        );
        self.record("extension", started);

        self.logger.tick(tick, self.expected_ticks);
        self.tick += 1;

        TickOutput {
            tick,
            source,
            grayscale,
            red,
            green,
            blue,
            red_threshold,
            green_threshold,
            blue_threshold,
            hsv,
            ycbcr,
            hsv_threshold,
            ycbcr_threshold,
            face,
            face_preview,
            extension,
        }
    }

    /// Runs the detector on a detector-resolution copy of `source`; any
    /// failure is logged and treated as no face.
    fn detect(&mut self, source: &Frame) -> Option<FaceBox> {
        let (dw, dh) = self.compositor.detector_size();
        let input = resize(source, dw, dh);
        match self.detector.detect(&input) {
            Ok(boxes) => boxes.into_iter().next(),
            Err(e) => {
                self.logger
                    .warn(&format!("Tick {}: face detection failed: {e}", self.tick));
                None
            }
        }
    }

    fn record(&mut self, stage: &str, started: Instant) {
        self.logger
            .timing(stage, started.elapsed().as_secs_f64() * 1000.0);
    }
}
