use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Error;
use crate::render::Layers;
use ab_glyph::{FontArc, PxScale};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use nalgebra as na;
use std::path::Path;

const LABEL_SCALE: f32 = 12.0;
const ARROW_HEAD: f32 = 8.0;

#[inline]
fn rgba(c: Color) -> Rgba<u8> {
    Rgba([c.r, c.g, c.b, 255])
}

/// RGBA image surface, transparent when cleared. Labels are drawn only when a font is set.
#[derive(Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
    font: Option<FontArc>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            font: None,
        }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn segment(&mut self, a: na::Point2<f32>, b: na::Point2<f32>, color: Color, thickness: f32) {
        let px = rgba(color);
        let dir = b - a;
        let len = dir.norm();

        // normal offsets approximate a thick stroke
        let normal = if len > f32::EPSILON {
            na::Vector2::new(-dir.y, dir.x) / len
        } else {
            na::Vector2::zeros()
        };

        let passes = thickness.round().max(1.0) as i32;
        for i in 0..passes {
            let off = normal * (i as f32 - (passes - 1) as f32 / 2.0);
            draw_line_segment_mut(
                &mut self.image,
                (a.x + off.x, a.y + off.y),
                (b.x + off.x, b.y + off.y),
                px,
            );
        }
    }
}

impl Canvas for RasterCanvas {
    #[inline]
    fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.image.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[na::Point2<f32>],
        color: Color,
        thickness: f32,
    ) -> Result<(), Error> {
        for w in points.windows(2) {
            self.segment(w[0], w[1], color, thickness);
        }

        Ok(())
    }

    fn fill_disc(
        &mut self,
        center: na::Point2<f32>,
        radius: f32,
        color: Color,
    ) -> Result<(), Error> {
        draw_filled_circle_mut(
            &mut self.image,
            (center.x.round() as i32, center.y.round() as i32),
            radius.round() as i32,
            rgba(color),
        );

        Ok(())
    }

    fn arrow(
        &mut self,
        from: na::Point2<f32>,
        to: na::Point2<f32>,
        color: Color,
    ) -> Result<(), Error> {
        self.segment(from, to, color, 2.0);

        let dir = from - to;
        if dir.norm() > f32::EPSILON {
            let back = dir.normalize() * ARROW_HEAD;
            for angle in [0.5f32, -0.5] {
                let rot = na::Rotation2::new(angle);
                self.segment(to, to + rot * back, color, 2.0);
            }
        }

        Ok(())
    }

    fn label(&mut self, at: na::Point2<f32>, text: &str, color: Color) -> Result<(), Error> {
        if let Some(font) = &self.font {
            draw_text_mut(
                &mut self.image,
                rgba(color),
                at.x.round() as i32,
                at.y.round() as i32,
                PxScale::from(LABEL_SCALE),
                font,
                text,
            );
        }

        Ok(())
    }
}

impl Layers<RasterCanvas> {
    /// Flattens layout, trails and markers (in that order) over an opaque background.
    pub fn composite(&self, background: Color) -> RgbaImage {
        let (w, h) = self.dims();
        let mut out = RgbaImage::from_pixel(w, h, rgba(background));

        for layer in [&self.layout, &self.trails, &self.markers] {
            imageops::overlay(&mut out, layer.image(), 0, 0);
        }

        out
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P, background: Color) -> Result<(), Error> {
        self.composite(background).save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_makes_surface_transparent() {
        let mut c = RasterCanvas::new(20, 20);
        c.fill_disc(na::Point2::new(10.0, 10.0), 3.0, Color::WHITE).unwrap();
        assert_eq!(c.image().get_pixel(10, 10), &Rgba([255, 255, 255, 255]));

        c.clear().unwrap();
        assert!(c.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn polyline_touches_its_endpoints() {
        let mut c = RasterCanvas::new(20, 20);
        let red = Color::new(255, 0, 0);
        c.stroke_polyline(
            &[na::Point2::new(2.0, 2.0), na::Point2::new(15.0, 2.0)],
            red,
            1.0,
        )
        .unwrap();

        assert_eq!(c.image().get_pixel(2, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(c.image().get_pixel(15, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(c.image().get_pixel(8, 10).0[3], 0);
    }

    #[test]
    fn labels_without_font_are_skipped() {
        let mut c = RasterCanvas::new(20, 20);
        c.label(na::Point2::new(2.0, 2.0), "x", Color::WHITE).unwrap();

        assert!(c.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn composite_stacks_layers() {
        let mut layers = Layers::new(
            RasterCanvas::new(10, 10),
            RasterCanvas::new(10, 10),
            RasterCanvas::new(10, 10),
        )
        .unwrap();

        layers
            .markers
            .fill_disc(na::Point2::new(5.0, 5.0), 1.0, Color::WHITE)
            .unwrap();

        let img = layers.composite(Color::BLACK);
        assert_eq!(img.get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn save_png_writes_composited_frame() {
        let mut layers = Layers::new(
            RasterCanvas::new(16, 12),
            RasterCanvas::new(16, 12),
            RasterCanvas::new(16, 12),
        )
        .unwrap();

        layers
            .trails
            .stroke_polyline(
                &[na::Point2::new(1.0, 1.0), na::Point2::new(10.0, 1.0)],
                Color::new(0, 255, 0),
                1.0,
            )
            .unwrap();

        let path = std::env::temp_dir().join(format!("bevtrail_frame_{}.png", std::process::id()));
        layers.save_png(&path, Color::BLACK).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(img.dimensions(), (16, 12));
        assert_eq!(img.get_pixel(5, 1), &Rgba([0, 255, 0, 255]));
        assert_eq!(img.get_pixel(5, 8), &Rgba([0, 0, 0, 255]));
    }
}
