use std::path::Path;

use crate::capture::domain::capture_source::CaptureSource;
use crate::shared::constants::{DETECTOR_HEIGHT, DETECTOR_WIDTH};
use crate::shared::frame::{Frame, CHANNELS};

/// Plays a video file as a live feed via ffmpeg-next.
///
/// Each poll decodes the next frame, scaled straight to the capture
/// resolution in RGBA. Once the stream ends the last frame is held, the way
/// a camera that stops delivering keeps its last image on screen.
pub struct FfmpegCaptureSource {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    video_stream_index: usize,
    width: u32,
    height: u32,
    decoded: usize,
    flushing: bool,
    done: bool,
    last: Option<Frame>,
}

// Safety: FfmpegCaptureSource is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegCaptureSource {}

impl FfmpegCaptureSource {
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::open_with_size(path, DETECTOR_WIDTH, DETECTOR_HEIGHT)
    }

    pub fn open_with_size(
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;
        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        log::info!(
            "Opened {} ({}x{} {}), capturing at {}x{}",
            path.display(),
            decoder.width(),
            decoder.height(),
            decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            width,
            height
        );

        Ok(Self {
            ictx,
            decoder,
            scaler,
            video_stream_index,
            width,
            height,
            decoded: 0,
            flushing: false,
            done: false,
            last: None,
        })
    }

    /// Number of frames decoded so far.
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    pub fn is_exhausted(&self) -> bool {
        self.done
    }

    fn try_receive(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return Ok(None);
        }
        let mut rgba = ffmpeg_next::util::frame::video::Video::empty();
        self.scaler.run(&decoded, &mut rgba)?;
        let pixels = extract_rgba_pixels(&rgba, self.width, self.height);
        let frame = Frame::new(pixels, self.width, self.height, self.decoded);
        self.decoded += 1;
        Ok(Some(frame))
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        if self.done {
            return Ok(None);
        }
        if let Some(frame) = self.try_receive()? {
            return Ok(Some(frame));
        }
        if self.flushing {
            self.done = true;
            return Ok(None);
        }

        loop {
            let Some((stream, packet)) = self.ictx.packets().next() else {
                let _ = self.decoder.send_eof();
                self.flushing = true;
                if let Some(frame) = self.try_receive()? {
                    return Ok(Some(frame));
                }
                self.done = true;
                log::debug!("End of stream after {} frames", self.decoded);
                return Ok(None);
            };

            if stream.index() != self.video_stream_index {
                continue;
            }
            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }
            if let Some(frame) = self.try_receive()? {
                return Ok(Some(frame));
            }
        }
    }
}

impl CaptureSource for FfmpegCaptureSource {
    fn current_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        if let Some(frame) = self.next_frame()? {
            self.last = Some(frame);
        }
        self.last
            .clone()
            .ok_or_else(|| "Video contains no decodable frames".into())
    }
}

/// Copies RGBA rows out of an ffmpeg frame, dropping stride padding.
fn extract_rgba_pixels(
    rgba_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgba_frame.stride(0);
    let data = rgba_frame.data(0);
    let row_len = width as usize * CHANNELS;

    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + row_len]);
    }
    pixels
}
