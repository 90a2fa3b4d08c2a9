use std::sync::Arc;

use crate::redaction::domain::region_pixelator::RegionPixelator;
use crate::shared::constants::DEFAULT_PIXEL_SIZE_DIVISOR;
use crate::shared::frame::Frame;
use crate::shared::rect::Rect;

/// Block size from `(image_w, image_h, region_w, region_h)`.
pub type PixelSizeFn = Arc<dyn Fn(u32, u32, u32, u32) -> u32 + Send + Sync>;

/// Border stroke drawn over a redacted region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutlineStyle {
    pub rgb: [u8; 3],
    pub thickness: u32,
}

/// Default block size: the larger region dimension divided by 16, at
/// least 1.
pub fn default_pixel_size(_img_w: u32, _img_h: u32, region_w: u32, region_h: u32) -> u32 {
    (region_w.max(region_h) / DEFAULT_PIXEL_SIZE_DIVISOR).max(1)
}

/// Pixelates regions by box-downsampling the source sub-bitmap and
/// blitting the nearest-neighbor upscale back onto the canvas.
#[derive(Clone)]
pub struct BlockPixelator {
    pixel_size: PixelSizeFn,
    outline: Option<OutlineStyle>,
}

impl BlockPixelator {
    pub fn new(pixel_size: PixelSizeFn, outline: Option<OutlineStyle>) -> Self {
        Self {
            pixel_size,
            outline,
        }
    }

    pub fn with_outline(outline: Option<OutlineStyle>) -> Self {
        Self::new(Arc::new(default_pixel_size), outline)
    }
}

impl Default for BlockPixelator {
    fn default() -> Self {
        Self::with_outline(None)
    }
}

impl RegionPixelator for BlockPixelator {
    fn pixelate(
        &self,
        source: &Frame,
        canvas: &mut Frame,
        rect: &Rect,
    ) -> Result<(), Box<dyn std::error::Error>> {
        debug_assert_eq!(source.width(), canvas.width());
        debug_assert_eq!(source.height(), canvas.height());

        let width = source.width() as i32;
        let height = source.height() as i32;

        // Detection backends occasionally report boxes nudged past the
        // frame; clamp instead of failing.
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(width);
        let y1 = rect.bottom().min(height);
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }

        let rw = (x1 - x0) as usize;
        let rh = (y1 - y0) as usize;
        let block = (self.pixel_size)(source.width(), source.height(), rw as u32, rh as u32)
            .max(1) as usize;

        // Downscale to at least 1x1; a block larger than the region
        // collapses it to a single flat cell.
        let dw = (rw / block).max(1);
        let dh = (rh / block).max(1);

        let channels = source.channels() as usize;
        let src = source.as_ndarray();
        let mut down = vec![0u8; dw * dh * channels];
        for j in 0..dh {
            let sy = y0 as usize + j * rh / dh;
            for i in 0..dw {
                let sx = x0 as usize + i * rw / dw;
                for c in 0..channels {
                    down[(j * dw + i) * channels + c] = src[[sy, sx, c]];
                }
            }
        }

        let mut out = canvas.as_ndarray_mut();
        for y in 0..rh {
            let dj = y * dh / rh;
            for x in 0..rw {
                let di = x * dw / rw;
                for c in 0..channels {
                    out[[y0 as usize + y, x0 as usize + x, c]] =
                        down[(dj * dw + di) * channels + c];
                }
            }
        }
        drop(out);

        if let Some(outline) = self.outline {
            stroke_border(canvas, x0, y0, x1, y1, outline);
        }

        Ok(())
    }
}

fn stroke_border(canvas: &mut Frame, x0: i32, y0: i32, x1: i32, y1: i32, style: OutlineStyle) {
    let t = style.thickness.max(1) as i32;
    let mut out = canvas.as_ndarray_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            let on_border = x < x0 + t || x >= x1 - t || y < y0 + t || y >= y1 - t;
            if on_border {
                for (c, v) in style.rgb.iter().enumerate() {
                    out[[y as usize, x as usize, c]] = *v;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Frame whose pixel values encode their own position, so block
    /// averaging artifacts are easy to spot.
    fn gradient_frame(w: u32, h: u32) -> Frame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8]);
            }
        }
        Frame::new(data, w, h, 3)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let arr = frame.as_ndarray();
        [arr[[y, x, 0]], arr[[y, x, 1]], arr[[y, x, 2]]]
    }

    fn fixed_block(size: u32) -> PixelSizeFn {
        Arc::new(move |_, _, _, _| size)
    }

    #[test]
    fn test_block_cells_are_uniform() {
        let source = gradient_frame(64, 64);
        let mut canvas = source.clone();
        let pixelator = BlockPixelator::new(fixed_block(8), None);
        pixelator
            .pixelate(&source, &mut canvas, &Rect::new(0, 0, 64, 64))
            .unwrap();

        // Any 2x2 neighborhood inside one 8x8 cell is constant.
        for (x, y) in [(1, 1), (9, 17), (33, 40), (50, 50)] {
            let p = pixel(&canvas, x, y);
            assert_eq!(pixel(&canvas, x + 1, y), p);
            assert_eq!(pixel(&canvas, x, y + 1), p);
            assert_eq!(pixel(&canvas, x + 1, y + 1), p);
        }
    }

    #[test]
    fn test_pixels_outside_rect_untouched() {
        let source = gradient_frame(32, 32);
        let mut canvas = source.clone();
        let pixelator = BlockPixelator::new(fixed_block(4), None);
        pixelator
            .pixelate(&source, &mut canvas, &Rect::new(8, 8, 16, 16))
            .unwrap();

        assert_eq!(pixel(&canvas, 0, 0), pixel(&source, 0, 0));
        assert_eq!(pixel(&canvas, 7, 7), pixel(&source, 7, 7));
        assert_eq!(pixel(&canvas, 24, 24), pixel(&source, 24, 24));
        assert_eq!(pixel(&canvas, 31, 31), pixel(&source, 31, 31));
    }

    #[test]
    fn test_samples_come_from_source_not_canvas() {
        let source = gradient_frame(16, 16);
        let mut canvas = Frame::new(vec![0u8; 16 * 16 * 3], 16, 16, 3);
        let pixelator = BlockPixelator::new(fixed_block(16), None);
        pixelator
            .pixelate(&source, &mut canvas, &Rect::new(0, 0, 16, 16))
            .unwrap();
        // The single cell takes its color from the source corner, not the
        // zeroed canvas.
        assert_eq!(pixel(&canvas, 8, 8), pixel(&source, 0, 0));
    }

    #[rstest]
    #[case::zero_width(Rect::new(4, 4, 0, 8))]
    #[case::zero_height(Rect::new(4, 4, 8, 0))]
    #[case::fully_left_of_frame(Rect::new(-20, 4, 10, 10))]
    #[case::fully_below_frame(Rect::new(4, 100, 10, 10))]
    fn test_degenerate_rects_are_noops(#[case] rect: Rect) {
        let source = gradient_frame(32, 32);
        let mut canvas = source.clone();
        BlockPixelator::new(fixed_block(4), None)
            .pixelate(&source, &mut canvas, &rect)
            .unwrap();
        assert_eq!(canvas, source);
    }

    #[test]
    fn test_rect_overhanging_frame_is_clamped() {
        let source = gradient_frame(32, 32);
        let mut canvas = source.clone();
        BlockPixelator::new(fixed_block(4), None)
            .pixelate(&source, &mut canvas, &Rect::new(24, 24, 20, 20))
            .unwrap();
        // Inside the clamped region something changed...
        assert_ne!(canvas, source);
        // ...and nothing outside it did.
        assert_eq!(pixel(&canvas, 23, 23), pixel(&source, 23, 23));
    }

    #[test]
    fn test_block_larger_than_region_flattens_it() {
        let source = gradient_frame(32, 32);
        let mut canvas = source.clone();
        BlockPixelator::new(fixed_block(100), None)
            .pixelate(&source, &mut canvas, &Rect::new(0, 0, 8, 8))
            .unwrap();
        let p = pixel(&canvas, 0, 0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(pixel(&canvas, x, y), p);
            }
        }
    }

    #[test]
    fn test_outline_strokes_border() {
        let source = gradient_frame(32, 32);
        let mut canvas = source.clone();
        let outline = OutlineStyle {
            rgb: [255, 0, 0],
            thickness: 1,
        };
        BlockPixelator::new(fixed_block(4), Some(outline))
            .pixelate(&source, &mut canvas, &Rect::new(8, 8, 16, 16))
            .unwrap();

        assert_eq!(pixel(&canvas, 8, 8), [255, 0, 0]);
        assert_eq!(pixel(&canvas, 23, 8), [255, 0, 0]);
        assert_eq!(pixel(&canvas, 8, 23), [255, 0, 0]);
        assert_eq!(pixel(&canvas, 23, 23), [255, 0, 0]);
        // Interior stays pixelated, not stroked.
        assert_ne!(pixel(&canvas, 16, 16), [255, 0, 0]);
    }

    #[rstest]
    #[case(16, 16, 64, 64, 4)]
    #[case(16, 16, 8, 8, 1)] // divisor larger than the region clamps to 1
    #[case(100, 100, 0, 0, 1)]
    fn test_default_pixel_size(
        #[case] img_w: u32,
        #[case] img_h: u32,
        #[case] region_w: u32,
        #[case] region_h: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(default_pixel_size(img_w, img_h, region_w, region_h), expected);
    }
}
