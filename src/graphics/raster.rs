extern crate image;

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use serde::{Serialize, Deserialize};
use crate::{Error, command::Command};

/// Rows sent per raster command
pub const MAX_RASTER_ROWS: usize = 256;

/// 8x8 ordered dither matrix, values 0 to 63
const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21]
];

/// What to do with images wider than the printable area
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFit {
    /// Shrink to the printer width, keeping the aspect ratio
    Scale,
    /// Keep the left part that fits
    Crop,
    /// Fail with [ImageTooWide](crate::Error::ImageTooWide)
    Reject
}

/// Black and white conversion
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dither {
    /// Pixels darker than the value print black
    Threshold(u8),
    /// Bayer 8x8 ordered dithering, keeps some gray levels
    Ordered
}

/// How bitmaps become raster data
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterOptions {
    pub fit: ImageFit,
    pub dither: Dither
}

impl Default for RasterOptions {
    fn default() -> RasterOptions {
        RasterOptions {
            fit: ImageFit::Scale,
            dither: Dither::Threshold(128)
        }
    }
}

/// Decodes png, jpeg, gif or bmp data
pub fn decode_image(source: &[u8]) -> Result<DynamicImage, Error> {
    image::load_from_memory(source).map_err(|e| Error::UnsupportedImageFormat(e.to_string()))
}

/// Packed 1 bit per pixel bitmap, most significant bit first, 1 meaning black
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    /// Row length in bytes
    pub width_bytes: usize,
    pub height: usize,
    pub data: Vec<u8>
}

impl Raster {
    /// Converts an image that is at most `max_width` dots wide once fitted
    pub fn from_image(image: &DynamicImage, max_width: u32, options: &RasterOptions) -> Result<Raster, Error> {
        let (im_width, im_height) = image.dimensions();
        if im_width == 0 || im_height == 0 {
            return Err(Error::UnsupportedImageFormat("image has no pixels".to_string()));
        }
        // No printable area at all, not even a single dot column
        if max_width == 0 {
            return Err(Error::ImageTooWide{width: im_width, max: max_width});
        }

        let fitted = if im_width > max_width {
            match options.fit {
                ImageFit::Scale => {
                    // With the aspect ratio, we determine the height
                    let height = ((im_height as f64) * (max_width as f64) / (im_width as f64)).round().max(1.0) as u32;
                    image.resize_exact(max_width, height, FilterType::Triangle)
                },
                ImageFit::Crop => image.crop_imm(0, 0, max_width, im_height),
                ImageFit::Reject => return Err(Error::ImageTooWide{width: im_width, max: max_width})
            }
        } else {
            image.clone()
        };

        let rgba = fitted.to_rgba8();
        let (width, height) = rgba.dimensions();
        let width_bytes = ((width + 7) / 8) as usize;
        let mut data = vec![0u8; width_bytes * height as usize];

        for (x, y, pixel) in rgba.enumerate_pixels() {
            let ps = pixel.0;
            let grayscale = 0.2126*(ps[0] as f64) + 0.7152*(ps[1] as f64) + 0.0722*(ps[2] as f64);
            // Transparent areas are paper
            let alpha = (ps[3] as f64) / 255.0;
            let value = grayscale * alpha + 255.0 * (1.0 - alpha);

            let black = match options.dither {
                Dither::Threshold(threshold) => value < threshold as f64,
                Dither::Ordered => {
                    let intensity = 1.0 - value / 255.0;
                    let threshold = (BAYER8[(y & 7) as usize][(x & 7) as usize] as f64 + 0.5) / 64.0;
                    intensity > threshold
                }
            };
            if black {
                data[(y as usize) * width_bytes + (x as usize) / 8] |= 0x80 >> (x % 8);
            }
        }

        Ok(Raster {
            width_bytes,
            height: height as usize,
            data
        })
    }

    /// Raster commands, each one carrying at most [MAX_RASTER_ROWS] rows
    pub fn feed(&self) -> Vec<u8> {
        if self.width_bytes == 0 {
            return Vec::new();
        }
        let mut feed = Vec::with_capacity(self.data.len() + 8 * (self.height / MAX_RASTER_ROWS + 1));
        for chunk in self.data.chunks(self.width_bytes * MAX_RASTER_ROWS) {
            let rows = chunk.len() / self.width_bytes;
            feed.extend_from_slice(&Command::Raster{width: self.width_bytes as u16, height: rows as u16}.as_bytes());
            feed.extend_from_slice(chunk);
        }
        log::debug!("raster of {}x{} bytes split in {} commands", self.width_bytes, self.height, (self.height + MAX_RASTER_ROWS - 1) / MAX_RASTER_ROWS);
        feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, RgbaImage, Rgba};
    use pretty_assertions::assert_eq;

    fn striped(width: u32, height: u32) -> DynamicImage {
        // Even columns black, odd ones white
        DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, _| {
            if x % 2 == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        }))
    }

    #[test]
    fn packs_most_significant_bit_first() {
        let raster = Raster::from_image(&striped(10, 1), 576, &RasterOptions::default()).unwrap();
        assert_eq!(raster.width_bytes, 2);
        assert_eq!(raster.data, vec![0b1010_1010, 0b1000_0000]);
    }

    #[test]
    fn transparent_pixels_stay_white() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 2, Rgba([0, 0, 0, 0])));
        let raster = Raster::from_image(&image, 576, &RasterOptions::default()).unwrap();
        assert!(raster.data.iter().all(|b| *b == 0));
    }

    #[test]
    fn wide_images_are_scaled_down() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(1152, 100, Luma([0])));
        let raster = Raster::from_image(&image, 576, &RasterOptions::default()).unwrap();
        assert_eq!((raster.width_bytes, raster.height), (72, 50));
        assert!(raster.data.iter().all(|b| *b == 0xff));
    }

    #[test]
    fn wide_images_can_be_cropped_or_rejected() {
        let image = striped(600, 4);
        let cropped = Raster::from_image(&image, 576, &RasterOptions{fit: ImageFit::Crop, ..RasterOptions::default()}).unwrap();
        assert_eq!((cropped.width_bytes, cropped.height), (72, 4));
        match Raster::from_image(&image, 576, &RasterOptions{fit: ImageFit::Reject, ..RasterOptions::default()}) {
            Err(Error::ImageTooWide{width, max}) => assert_eq!((width, max), (600, 576)),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn ordered_dither_mixes_gray() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([128])));
        let raster = Raster::from_image(&image, 576, &RasterOptions{dither: Dither::Ordered, ..RasterOptions::default()}).unwrap();
        let black: u32 = raster.data.iter().map(|b| b.count_ones()).sum();
        assert!(black > 16 && black < 48, "{} black dots", black);
    }

    #[test]
    fn tall_images_are_chunked() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 300, Luma([0])));
        let raster = Raster::from_image(&image, 576, &RasterOptions::default()).unwrap();
        let feed = raster.feed();
        assert_eq!(feed.len(), 8 + 2 * 256 + 8 + 2 * 44);
        assert_eq!(feed[..8].to_vec(), vec![0x1d, 0x76, 0x30, 0x00, 2, 0, 0, 1]);
        let second = 8 + 2 * 256;
        assert_eq!(feed[second..second + 8].to_vec(), vec![0x1d, 0x76, 0x30, 0x00, 2, 0, 44, 0]);
    }

    #[test]
    fn zero_width_paper_is_rejected() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([0])));
        match Raster::from_image(&image, 0, &RasterOptions::default()) {
            Err(Error::ImageTooWide{width, max}) => assert_eq!((width, max), (8, 0)),
            other => panic!("unexpected result {:?}", other)
        }
        let empty = Raster {
            width_bytes: 0,
            height: 0,
            data: Vec::new()
        };
        assert!(empty.feed().is_empty());
    }

    #[test]
    fn empty_images_are_unsupported() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(matches!(Raster::from_image(&image, 576, &RasterOptions::default()), Err(Error::UnsupportedImageFormat(_))));
    }

    #[test]
    fn garbage_bytes_do_not_decode() {
        assert!(matches!(decode_image(b"definitely not a png"), Err(Error::UnsupportedImageFormat(_))));
    }
}
