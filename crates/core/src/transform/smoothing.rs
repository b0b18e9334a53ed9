use crate::shared::frame::{Frame, CHANNELS, OPAQUE};

/// Precompute a normalized 1D Gaussian kernel of the given odd size.
///
/// Sigma is derived as `kernel_size / 6.0` (OpenCV's sigma=0 convention).
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let sigma = kernel_size as f64 / 6.0;
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Gaussian smoothing confined to `frame`.
///
/// Samples past the edge are clamped to the nearest edge pixel, so a crop
/// blurred in isolation never mixes in pixels from outside it.
pub struct GaussianSmoother {
    kernel: Vec<f32>,
}

impl GaussianSmoother {
    pub fn with_radius(radius: usize) -> Self {
        Self {
            kernel: gaussian_kernel_1d(radius * 2 + 1),
        }
    }

    pub fn smooth(&self, frame: &Frame) -> Frame {
        let mut out = frame.map_pixels(|p| p);
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let mut temp = Vec::new();
        separable_blur_rgba(out.data_mut(), w, h, &self.kernel, &mut temp);
        out
    }
}

/// Horizontal then vertical pass over the color channels; opacity is
/// forced to 255.
fn separable_blur_rgba(
    data: &mut [u8],
    width: usize,
    height: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = kernel_size / 2;
    temp.resize(width * height * CHANNELS, 0.0);

    // Horizontal pass: data → temp
    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sx = (x as isize + k as isize - half as isize).clamp(0, width as isize - 1)
                        as usize;
                    sum += data[(y * width + sx) * CHANNELS + c] as f32 * w;
                }
                temp[(y * width + x) * CHANNELS + c] = sum;
            }
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            let base = (y * width + x) * CHANNELS;
            for c in 0..3 {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sy = (y as isize + k as isize - half as isize)
                        .clamp(0, height as isize - 1) as usize;
                    sum += temp[(sy * width + x) * CHANNELS + c] * w;
                }
                data[base + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
            data[base + 3] = OPAQUE;
        }
    }
}
