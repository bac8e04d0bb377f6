use crate::color::Color;
use crate::error::Error;
use nalgebra as na;

/// A drawable region of fixed pixel size. The engine only draws into it.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn clear(&mut self) -> Result<(), Error>;
    fn stroke_polyline(
        &mut self,
        points: &[na::Point2<f32>],
        color: Color,
        thickness: f32,
    ) -> Result<(), Error>;
    fn fill_disc(&mut self, center: na::Point2<f32>, radius: f32, color: Color)
        -> Result<(), Error>;
    fn arrow(
        &mut self,
        from: na::Point2<f32>,
        to: na::Point2<f32>,
        color: Color,
    ) -> Result<(), Error>;
    fn label(&mut self, at: na::Point2<f32>, text: &str, color: Color) -> Result<(), Error>;

    #[inline]
    fn dims(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Polyline {
        points: Vec<na::Point2<f32>>,
        color: Color,
    },
    Disc {
        center: na::Point2<f32>,
        color: Color,
    },
    Arrow {
        from: na::Point2<f32>,
        to: na::Point2<f32>,
    },
    Label {
        at: na::Point2<f32>,
        text: String,
    },
}

/// Keeps the ops drawn since the last clear.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    clears: usize,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clears: 0,
            ops: Vec::new(),
        }
    }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// How many times the surface has been cleared.
    #[inline]
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[na::Point2<f32>], Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Polyline { points, color } => Some((points.as_slice(), *color)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn discs(&self) -> impl Iterator<Item = (na::Point2<f32>, Color)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Disc { center, color } => Some((*center, *color)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.clears += 1;
        self.ops.clear();
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[na::Point2<f32>],
        color: Color,
        _thickness: f32,
    ) -> Result<(), Error> {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            color,
        });
        Ok(())
    }

    fn fill_disc(
        &mut self,
        center: na::Point2<f32>,
        _radius: f32,
        color: Color,
    ) -> Result<(), Error> {
        self.ops.push(DrawOp::Disc { center, color });
        Ok(())
    }

    fn arrow(
        &mut self,
        from: na::Point2<f32>,
        to: na::Point2<f32>,
        _color: Color,
    ) -> Result<(), Error> {
        self.ops.push(DrawOp::Arrow { from, to });
        Ok(())
    }

    fn label(&mut self, at: na::Point2<f32>, text: &str, _color: Color) -> Result<(), Error> {
        self.ops.push(DrawOp::Label {
            at,
            text: text.to_string(),
        });
        Ok(())
    }
}
