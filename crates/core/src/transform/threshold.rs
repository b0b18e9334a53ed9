use crate::shared::channel::ChannelSelector;
use crate::shared::frame::Frame;

/// A cutoff and the intensity it is compared against.
///
/// Cutoffs are bytes, so the `0..=255` domain holds by construction;
/// [`ThresholdSpec::from_raw`] clamps wider integers coming from config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdSpec {
    pub selector: ChannelSelector,
    pub cutoff: u8,
}

impl ThresholdSpec {
    pub fn new(selector: ChannelSelector, cutoff: u8) -> Self {
        Self { selector, cutoff }
    }

    pub fn from_raw(selector: ChannelSelector, cutoff: i64) -> Self {
        Self::new(selector, clamp_cutoff(cutoff))
    }

    pub fn apply(&self, frame: &Frame) -> Frame {
        threshold(frame, self.cutoff, self.selector)
    }
}

/// Clamps an out-of-range cutoff to the nearest valid byte.
pub fn clamp_cutoff(cutoff: i64) -> u8 {
    cutoff.clamp(0, 255) as u8
}

/// Binarizes `frame`: white where the selected intensity is strictly above
/// `cutoff`, black elsewhere.
pub fn threshold(frame: &Frame, cutoff: u8, selector: ChannelSelector) -> Frame {
    let cutoff = cutoff as f64;
    frame.map_pixels(|px| {
        let intensity = match selector {
            ChannelSelector::All => (px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0,
            ChannelSelector::Single(channel) => px[channel.offset()] as f64,
        };
        let bin = if intensity > cutoff { 255 } else { 0 };
        [bin, bin, bin]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::channel::ColorChannel;
    use rstest::rstest;

    fn noisy_frame() -> Frame {
        let mut frame = Frame::filled(8, 8, [0, 0, 0, 255], 0);
        for y in 0..8u32 {
            for x in 0..8u32 {
                let v = (x * 37 + y * 91) as u8;
                frame.set_pixel(x, y, [v, v.wrapping_mul(3), v.wrapping_add(77), 200]);
            }
        }
        frame
    }

    #[test]
    fn test_concrete_red_threshold_is_white() {
        let frame = Frame::filled(4, 4, [200, 100, 50, 255], 0);
        let out = threshold(&frame, 150, ColorChannel::Red.into());
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[rstest]
    #[case::all(ChannelSelector::All)]
    #[case::red(ChannelSelector::Single(ColorChannel::Red))]
    #[case::green(ChannelSelector::Single(ColorChannel::Green))]
    #[case::blue(ChannelSelector::Single(ColorChannel::Blue))]
    fn test_output_is_two_valued_and_opaque(#[case] selector: ChannelSelector) {
        let out = threshold(&noisy_frame(), 100, selector);
        for px in out.data().chunks_exact(4) {
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[rstest]
    #[case::just_below(127, 255)]
    #[case::equal(128, 0)]
    #[case::just_above(129, 0)]
    fn test_cutoff_is_strict(#[case] cutoff: u8, #[case] expected: u8) {
        let frame = Frame::filled(1, 1, [128, 128, 128, 255], 0);
        assert_eq!(threshold(&frame, cutoff, ChannelSelector::All).pixel(0, 0)[0], expected);
    }

    #[test]
    fn test_all_uses_unweighted_mean() {
        // mean = 100, red alone would pass
        let frame = Frame::filled(1, 1, [240, 30, 30, 255], 0);
        assert_eq!(threshold(&frame, 100, ChannelSelector::All).pixel(0, 0)[0], 0);
        assert_eq!(threshold(&frame, 99, ChannelSelector::All).pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_fractional_mean_compares_exactly() {
        // mean = 100.33, above 100
        let frame = Frame::filled(1, 1, [101, 100, 100, 255], 0);
        assert_eq!(threshold(&frame, 100, ChannelSelector::All).pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_single_channel_ignores_others() {
        let frame = Frame::filled(1, 1, [0, 0, 255, 255], 0);
        assert_eq!(threshold(&frame, 10, ColorChannel::Red.into()).pixel(0, 0)[0], 0);
        assert_eq!(threshold(&frame, 10, ColorChannel::Blue.into()).pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_cutoff_255_is_always_black() {
        let frame = Frame::filled(2, 2, [255, 255, 255, 255], 0);
        assert!(threshold(&frame, 255, ChannelSelector::All)
            .data()
            .chunks_exact(4)
            .all(|p| p[0] == 0));
    }

    #[rstest]
    #[case(0)]
    #[case(64)]
    #[case(200)]
    fn test_threshold_is_idempotent(#[case] cutoff: u8) {
        let once = threshold(&noisy_frame(), cutoff, ChannelSelector::All);
        let twice = threshold(&once, cutoff, ChannelSelector::All);
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case(-20, 0)]
    #[case(0, 0)]
    #[case(128, 128)]
    #[case(255, 255)]
    #[case(900, 255)]
    fn test_from_raw_clamps_cutoff(#[case] raw: i64, #[case] expected: u8) {
        let spec = ThresholdSpec::from_raw(ChannelSelector::All, raw);
        assert_eq!(spec.cutoff, expected);
    }

    #[test]
    fn test_spec_apply_matches_function() {
        let frame = noisy_frame();
        let spec = ThresholdSpec::new(ColorChannel::Green.into(), 90);
        assert_eq!(spec.apply(&frame), threshold(&frame, 90, ColorChannel::Green.into()));
    }
}
