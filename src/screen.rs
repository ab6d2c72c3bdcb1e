use crate::camera::PerspectiveCamera;
use crate::marcher::{trace_with, MarchSettings, Renderable};
use crate::math::Color;
use crate::SdfError;
use image::{imageops, ImageBuffer, ImageResult, Rgb, RgbImage};
use log::debug;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

const TITLE: &str = "Signed Distance Fields Demo";

/// Rectangle of pixels. Extents past the surface are clipped by [`Region::clamp_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn full(width: u32, height: u32) -> Self {
        Region {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Region {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Splits a surface into at most `count` disjoint horizontal bands covering
/// every row.
pub fn bands(width: u32, height: u32, count: u32) -> Vec<Region> {
    let count = count.clamp(1, height.max(1));
    let band = height.div_ceil(count);
    (0..count)
        .map(|i| {
            Region {
                x: 0,
                y: band.saturating_mul(i),
                width,
                height: band,
            }
            .clamp_to(width, height)
        })
        .filter(|r| !r.is_empty())
        .collect()
}

/// Traces every pixel of `region` into its own sub-surface. Pixel `(0, 0)` of
/// the result is pixel `(region.x, region.y)` of the `width` x `height` surface.
pub fn render_region(
    camera: &PerspectiveCamera,
    object: &dyn Renderable,
    settings: &MarchSettings,
    width: u32,
    height: u32,
    region: Region,
) -> RgbImage {
    let region = region.clamp_to(width, height);
    ImageBuffer::from_fn(region.width, region.height, |x0, y0| {
        let ray = camera.pixel_ray(x0 + region.x, y0 + region.y, width, height);
        Rgb(trace_with(object, ray, settings).to_rgb8())
    })
}

/// Mean of the per-band frame rates.
pub fn average_fps(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

/// Output surface. Frames are drawn band by band and presented as PNG files.
pub struct Screen {
    frame: RgbImage,
    title: String,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Result<Self, SdfError> {
        if width == 0 || height == 0 {
            return Err(SdfError::EmptySurface(width, height));
        }
        debug!("Created Surface with size [{},{}]", width, height);
        Ok(Screen {
            frame: RgbImage::new(width, height),
            title: TITLE.to_string(),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    pub fn frame(&self) -> &RgbImage {
        &self.frame
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn draw(&mut self, x: u32, y: u32, color: Color) {
        let (width, height) = self.size();
        if x < width && y < height {
            self.frame.put_pixel(x, y, Rgb(color.to_rgb8()));
        }
    }

    /// Copies `surface` into the frame with its top left corner at `(x, y)`,
    /// dropping whatever falls outside.
    pub fn blit(&mut self, surface: &RgbImage, x: u32, y: u32) {
        imageops::replace(&mut self.frame, surface, x as i64, y as i64);
    }

    pub fn set_fps(&mut self, fps: f32) {
        self.title = format!("{} | FPS:{}", TITLE, fps);
    }

    /// Renders one frame as `band_count` horizontal strips in parallel. Each strip
    /// is traced into a surface of its own and blitted afterwards, so workers
    /// never share pixels. Returns the frame rate each strip would have
    /// reached on its own.
    pub fn render(
        &mut self,
        camera: &PerspectiveCamera,
        object: &dyn Renderable,
        settings: &MarchSettings,
        band_count: u32,
    ) -> Vec<f32> {
        let (width, height) = self.size();
        let strips: Vec<(Region, RgbImage, f32)> = bands(width, height, band_count)
            .into_par_iter()
            .map(|region| {
                let start = Instant::now();
                let surface = render_region(camera, object, settings, width, height, region);
                (region, surface, 1. / start.elapsed().as_secs_f32())
            })
            .collect();
        strips
            .into_iter()
            .map(|(region, surface, fps)| {
                self.blit(&surface, region.x, region.y);
                fps
            })
            .collect()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.frame.save(path)
    }
}
