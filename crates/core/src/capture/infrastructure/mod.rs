pub mod channel_capture_source;
pub mod ffmpeg_capture_source;
pub mod image_file_source;
