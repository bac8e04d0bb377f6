use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Error;
use nalgebra as na;
use opencv::{
    core::{self, Mat, Scalar},
    imgproc,
    prelude::*,
};

#[inline]
fn scalar(c: Color) -> Scalar {
    Scalar::new(c.b as f64, c.g as f64, c.r as f64, 255.0)
}

#[inline]
fn point(p: na::Point2<f32>) -> core::Point {
    core::Point::new(p.x.round() as i32, p.y.round() as i32)
}

/// BGRA OpenCV surface.
pub struct MatCanvas {
    mat: Mat,
    width: i32,
    height: i32,
}

impl MatCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        let (width, height) = (width as i32, height as i32);
        let mat = Mat::new_rows_cols_with_default(height, width, core::CV_8UC4, Scalar::all(0.0))?;

        Ok(Self { mat, width, height })
    }

    #[inline]
    pub fn mat(&self) -> &Mat {
        &self.mat
    }
}

impl Canvas for MatCanvas {
    #[inline]
    fn width(&self) -> u32 {
        self.width as u32
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height as u32
    }

    fn clear(&mut self) -> Result<(), Error> {
        imgproc::rectangle(
            &mut self.mat,
            core::Rect::new(0, 0, self.width, self.height),
            Scalar::all(0.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;

        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[na::Point2<f32>],
        color: Color,
        thickness: f32,
    ) -> Result<(), Error> {
        let thickness = (thickness.round() as i32).max(1);

        for w in points.windows(2) {
            imgproc::line(
                &mut self.mat,
                point(w[0]),
                point(w[1]),
                scalar(color),
                thickness,
                imgproc::LINE_AA,
                0,
            )?;
        }

        Ok(())
    }

    fn fill_disc(
        &mut self,
        center: na::Point2<f32>,
        radius: f32,
        color: Color,
    ) -> Result<(), Error> {
        imgproc::circle(
            &mut self.mat,
            point(center),
            radius.round() as i32,
            scalar(color),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;

        Ok(())
    }

    fn arrow(
        &mut self,
        from: na::Point2<f32>,
        to: na::Point2<f32>,
        color: Color,
    ) -> Result<(), Error> {
        imgproc::arrowed_line(
            &mut self.mat,
            point(from),
            point(to),
            scalar(color),
            2,
            imgproc::LINE_AA,
            0,
            0.25,
        )?;

        Ok(())
    }

    fn label(&mut self, at: na::Point2<f32>, text: &str, color: Color) -> Result<(), Error> {
        imgproc::put_text(
            &mut self.mat,
            text,
            point(at),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.4,
            scalar(color),
            1,
            imgproc::LINE_AA,
            false,
        )?;

        Ok(())
    }
}
