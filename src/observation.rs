use crate::error::{EnvError, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// The channel order of a raw camera frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit blue, green, red. Cameras in the simulator deliver this.
    #[default]
    Bgr8,
    /// 8-bit red, green, blue.
    Rgb8,
}

/// A raw camera frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Row-major pixels, three bytes each.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }
}

/// An RGB image at the training resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    image: RgbImage,
}

impl Observation {
    /// Converts a camera frame into an observation of the given size,
    /// swapping the channels into RGB order if needed.
    pub fn from_frame(frame: &Frame, width: u32, height: u32) -> Result<Self> {
        if frame.width == 0 || frame.height == 0 {
            return Err(EnvError::InvalidFrame(format!(
                "{}x{} frame has no pixels",
                frame.width, frame.height
            )));
        }
        let expected = 3 * frame.width as usize * frame.height as usize;
        if frame.data.len() != expected {
            return Err(EnvError::InvalidFrame(format!(
                "{}x{} frame has {} bytes, expected {}",
                frame.width,
                frame.height,
                frame.data.len(),
                expected
            )));
        }

        let mut data = frame.data.clone();
        if frame.format == PixelFormat::Bgr8 {
            data.chunks_exact_mut(3).for_each(|px| px.swap(0, 2));
        }
        let image = RgbImage::from_raw(frame.width, frame.height, data)
            .ok_or_else(|| EnvError::InvalidFrame("frame buffer is too small".to_owned()))?;

        let image = if image.dimensions() == (width, height) {
            image
        } else {
            imageops::resize(&image, width, height, FilterType::Triangle)
        };
        Ok(Self { image })
    }

    /// The shape of the observation as `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        let (w, h) = self.image.dimensions();
        (h as usize, w as usize, 3)
    }

    /// The pixel data in row-major RGB order.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// The RGB value of a pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    /// Consumes the observation, returning the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.image.into_raw()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn solid(width: u32, height: u32, format: PixelFormat, px: [u8; 3]) -> Frame {
        let data = (0..width * height).flat_map(|_| px).collect();
        Frame::new(width, height, format, data)
    }

    #[test]
    fn bgr_is_swapped() {
        let frame = solid(4, 2, PixelFormat::Bgr8, [10, 20, 30]);
        let obs = Observation::from_frame(&frame, 4, 2).unwrap();
        assert_eq!(obs.pixel(0, 0), [30, 20, 10]);
        assert_eq!(obs.pixel(3, 1), [30, 20, 10]);
    }

    #[test]
    fn rgb_is_untouched() {
        let frame = solid(4, 2, PixelFormat::Rgb8, [10, 20, 30]);
        let obs = Observation::from_frame(&frame, 4, 2).unwrap();
        assert_eq!(obs.pixel(1, 1), [10, 20, 30]);
    }

    #[test]
    fn resized_to_training_resolution() {
        let frame = solid(640, 480, PixelFormat::Bgr8, [0, 128, 255]);
        let obs = Observation::from_frame(&frame, 160, 120).unwrap();
        assert_eq!(obs.shape(), (120, 160, 3));
        assert_eq!(obs.pixels().len(), 160 * 120 * 3);
        assert_eq!(obs.pixel(80, 60), [255, 128, 0]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let frame = Frame::new(4, 4, PixelFormat::Bgr8, vec![0; 10]);
        assert!(matches!(
            Observation::from_frame(&frame, 4, 4),
            Err(EnvError::InvalidFrame(_))
        ));
    }

    #[test]
    fn zero_sized_frame_is_rejected() {
        for (w, h) in [(0, 0), (0, 10), (10, 0)] {
            let frame = Frame::new(w, h, PixelFormat::Bgr8, vec![]);
            assert!(matches!(
                Observation::from_frame(&frame, 160, 120),
                Err(EnvError::InvalidFrame(_))
            ));
        }
    }

    #[test]
    fn into_pixels_is_row_major_rgb() {
        let mut data = vec![0; 2 * 2 * 3];
        data[3..6].copy_from_slice(&[1, 2, 3]);
        let frame = Frame::new(2, 2, PixelFormat::Bgr8, data);
        let pixels = Observation::from_frame(&frame, 2, 2).unwrap().into_pixels();
        assert_eq!(pixels.len(), 12);
        assert_eq!(&pixels[3..6], &[3, 2, 1]);
        assert_eq!(&pixels[0..3], &[0, 0, 0]);
    }
}
