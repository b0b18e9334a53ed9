use crossbeam_channel::{Receiver, TryRecvError};

use crate::capture::domain::capture_source::CaptureSource;
use crate::shared::frame::Frame;

/// Capture source fed by another thread (a camera callback, a decoder).
///
/// Polling never blocks: queued frames are drained and the newest one wins.
/// Between deliveries, and after the sender hangs up, the last frame is
/// repeated.
pub struct ChannelCaptureSource {
    rx: Receiver<Frame>,
    latest: Option<Frame>,
}

impl ChannelCaptureSource {
    pub fn new(rx: Receiver<Frame>) -> Self {
        Self { rx, latest: None }
    }
}

impl CaptureSource for ChannelCaptureSource {
    fn current_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        loop {
            match self.rx.try_recv() {
                Ok(frame) => self.latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.latest.is_none() {
                        return Err("Capture channel closed before any frame arrived".into());
                    }
                    break;
                }
            }
        }
        self.latest
            .clone()
            .ok_or_else(|| "No frame captured yet".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(value: u8) -> Frame {
        Frame::filled(2, 2, [value, value, value, 255], 0)
    }

    #[test]
    fn test_latest_frame_wins() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut source = ChannelCaptureSource::new(rx);
        tx.send(frame(1)).unwrap();
        tx.send(frame(2)).unwrap();
        tx.send(frame(3)).unwrap();
        assert_eq!(source.current_frame().unwrap(), frame(3));
    }

    #[test]
    fn test_repeats_last_frame_when_idle() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut source = ChannelCaptureSource::new(rx);
        tx.send(frame(7)).unwrap();
        assert_eq!(source.current_frame().unwrap(), frame(7));
        assert_eq!(source.current_frame().unwrap(), frame(7));
        drop(tx);
        assert_eq!(source.current_frame().unwrap(), frame(7));
    }

    #[test]
    fn test_no_frame_yet_is_error() {
        let (_tx, rx) = crossbeam_channel::unbounded::<Frame>();
        let mut source = ChannelCaptureSource::new(rx);
        assert!(source.current_frame().is_err());
    }

    #[test]
    fn test_closed_without_frames_is_error() {
        let (tx, rx) = crossbeam_channel::unbounded::<Frame>();
        drop(tx);
        let mut source = ChannelCaptureSource::new(rx);
        assert!(source.current_frame().is_err());
    }

    #[test]
    fn test_fed_from_another_thread() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = std::thread::spawn(move || {
            for v in 0..5 {
                tx.send(frame(v)).unwrap();
            }
        });
        handle.join().unwrap();
        let mut source = ChannelCaptureSource::new(rx);
        assert_eq!(source.current_frame().unwrap(), frame(4));
    }
}
