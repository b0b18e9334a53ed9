use ndarray::{ArrayView3, ArrayViewMut3};

use super::region::Region;

/// Bytes per pixel: red, green, blue, opacity.
pub const CHANNELS: usize = 4;

/// Opacity value carried by every frame the pipeline produces.
pub const OPAQUE: u8 = 255;

/// A single RGBA frame: contiguous bytes in row-major order.
///
/// Transforms never mutate their input; they build a new `Frame`. The
/// `index` is the tick that produced the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// A frame where every pixel has the given RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4], index: usize) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self::new(data, width, height, index)
    }

    /// Builds an opaque frame of the same size by mapping each source pixel's
    /// color channels through `f`.
    pub fn map_pixels<F>(&self, f: F) -> Frame
    where
        F: Fn([u8; 3]) -> [u8; 3],
    {
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(CHANNELS) {
            let [r, g, b] = f([px[0], px[1], px[2]]);
            data.extend_from_slice(&[r, g, b, OPAQUE]);
        }
        Frame::new(data, self.width, self.height, self.index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Region covering the whole frame.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Copies the part of `region` that lies inside the frame into a new frame.
    ///
    /// Returns an empty (0×0) frame when the region misses the frame entirely.
    pub fn crop(&self, region: &Region) -> Frame {
        let Some(r) = region.clamped(self.width, self.height) else {
            return Frame::new(Vec::new(), 0, 0, self.index);
        };
        let (rx, ry, rw, rh) = (r.x as usize, r.y as usize, r.width as usize, r.height as usize);
        let fw = self.width as usize;

        let mut data = Vec::with_capacity(rw * rh * CHANNELS);
        for row in ry..ry + rh {
            let start = (row * fw + rx) * CHANNELS;
            data.extend_from_slice(&self.data[start..start + rw * CHANNELS]);
        }
        Frame::new(data, rw as u32, rh as u32, self.index)
    }

    /// Writes `src` with its top-left corner at `(x, y)`, clipping whatever
    /// falls outside this frame.
    pub fn paste(&mut self, src: &Frame, x: i32, y: i32) {
        let target = Region::new(x, y, src.width as i32, src.height as i32);
        let Some(visible) = target.clamped(self.width, self.height) else {
            return;
        };
        let fw = self.width as usize;
        let sw = src.width as usize;
        let src_x = (visible.x - x) as usize;
        let src_y = (visible.y - y) as usize;
        let len = visible.width as usize * CHANNELS;

        for row in 0..visible.height as usize {
            let dst = ((visible.y as usize + row) * fw + visible.x as usize) * CHANNELS;
            let from = ((src_y + row) * sw + src_x) * CHANNELS;
            self.data[dst..dst + len].copy_from_slice(&src.data[from..from + len]);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Frame {
        let mut frame = Frame::filled(width, height, [0, 0, 0, 255], 0);
        for y in 0..height {
            for x in 0..width {
                frame.set_pixel(x, y, [x as u8, y as u8, (x + y) as u8, 255]);
            }
        }
        frame
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 16]; // 2x2x4
        let frame = Frame::new(data.clone(), 2, 2, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 4")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 12], 2, 2, 0);
    }

    #[test]
    fn test_filled_repeats_pixel() {
        let frame = Frame::filled(3, 2, [1, 2, 3, 4], 0);
        assert_eq!(frame.data().len(), 24);
        assert_eq!(frame.pixel(2, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_map_pixels_forces_opacity() {
        let frame = Frame::filled(2, 2, [10, 20, 30, 7], 3);
        let mapped = frame.map_pixels(|[r, g, b]| [b, g, r]);
        assert_eq!(mapped.pixel(1, 1), [30, 20, 10, 255]);
        assert_eq!(mapped.index(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::filled(2, 2, [100, 100, 100, 255], 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    fn test_crop_copies_region() {
        let frame = gradient(6, 5);
        let crop = frame.crop(&Region::new(2, 1, 3, 2));
        assert_eq!((crop.width(), crop.height()), (3, 2));
        assert_eq!(crop.pixel(0, 0), frame.pixel(2, 1));
        assert_eq!(crop.pixel(2, 1), frame.pixel(4, 2));
    }

    #[test]
    fn test_crop_clamps_to_frame() {
        let frame = gradient(6, 5);
        let crop = frame.crop(&Region::new(4, 3, 10, 10));
        assert_eq!((crop.width(), crop.height()), (2, 2));
        assert_eq!(crop.pixel(1, 1), frame.pixel(5, 4));
    }

    #[test]
    fn test_crop_outside_is_empty() {
        let frame = gradient(6, 5);
        let crop = frame.crop(&Region::new(10, 10, 3, 3));
        assert!(crop.is_empty());
        assert!(crop.data().is_empty());
    }

    #[test]
    fn test_paste_writes_at_offset() {
        let mut frame = Frame::filled(4, 4, [0, 0, 0, 255], 0);
        let patch = Frame::filled(2, 2, [9, 9, 9, 255], 0);
        frame.paste(&patch, 1, 2);
        assert_eq!(frame.pixel(1, 2), [9, 9, 9, 255]);
        assert_eq!(frame.pixel(2, 3), [9, 9, 9, 255]);
        assert_eq!(frame.pixel(0, 2), [0, 0, 0, 255]);
        assert_eq!(frame.pixel(1, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn test_paste_clips_negative_and_overflowing_offsets() {
        let mut frame = Frame::filled(3, 3, [0, 0, 0, 255], 0);
        let patch = gradient(3, 3);
        frame.paste(&patch, -1, 1);
        // patch (1,0) lands on (0,1); patch (2,1) lands on (1,2)
        assert_eq!(frame.pixel(0, 1), patch.pixel(1, 0));
        assert_eq!(frame.pixel(1, 2), patch.pixel(2, 1));
        assert_eq!(frame.pixel(2, 1), [0, 0, 0, 255]);
        assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_crop_then_paste_is_identity() {
        let frame = gradient(8, 8);
        let region = Region::new(2, 3, 4, 3);
        let mut copy = frame.clone();
        copy.paste(&frame.crop(&region), region.x, region.y);
        assert_eq!(copy, frame);
    }

    #[test]
    fn test_as_ndarray_shape_and_access() {
        let frame = gradient(4, 2);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 4]); // (height, width, channels)
        assert_eq!(arr[[1, 3, 0]], 3);
        assert_eq!(arr[[1, 3, 1]], 1);
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::filled(2, 2, [0, 0, 0, 255], 0);
        {
            let mut arr = frame.as_ndarray_mut();
            arr[[0, 1, 2]] = 128;
        }
        assert_eq!(frame.pixel(1, 0), [0, 0, 128, 255]);
    }
}
