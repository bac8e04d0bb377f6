use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Error;
use crate::key::TrackKey;
use crate::layout::CameraLayout;
use crate::segment::Segmenter;
use crate::store::TrackStore;
use nalgebra as na;

const CAMERA_RADIUS: f32 = 7.0;
const HEADING_LENGTH: f32 = 30.0;

/// The three independently cleared surfaces, bottom to top.
#[derive(Debug)]
pub struct Layers<C> {
    pub layout: C,
    pub trails: C,
    pub markers: C,
}

impl<C: Canvas> Layers<C> {
    pub fn new(layout: C, trails: C, markers: C) -> Result<Self, Error> {
        let expected = layout.dims();

        for (name, canvas) in [("trails", &trails), ("markers", &markers)] {
            if canvas.dims() != expected {
                return Err(Error::SurfaceMismatch {
                    layer: name,
                    expected,
                    actual: canvas.dims(),
                });
            }
        }

        Ok(Self {
            layout,
            trails,
            markers,
        })
    }

    #[inline]
    pub fn dims(&self) -> (u32, u32) {
        self.layout.dims()
    }
}

/// An entity present in the latest snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: TrackKey,
    pub pos: na::Point2<f32>,
    pub color: Color,
}

pub fn paint_layout<C: Canvas>(canvas: &mut C, layout: &CameraLayout) -> Result<(), Error> {
    canvas.clear()?;

    for cam in layout.iter() {
        let pos = match cam.position {
            Some(pos) => pos,
            None => continue,
        };

        canvas.fill_disc(pos, CAMERA_RADIUS, Color::CAMERA)?;
        canvas.arrow(pos, pos + cam.heading() * HEADING_LENGTH, Color::CAMERA)?;
        canvas.label(
            pos + na::Vector2::new(CAMERA_RADIUS + 3.0, -CAMERA_RADIUS - 3.0),
            &cam.name,
            Color::WHITE,
        )?;
    }

    Ok(())
}

pub fn paint_trails<C: Canvas>(
    canvas: &mut C,
    store: &TrackStore,
    segmenter: &Segmenter,
    thickness: f32,
) -> Result<(), Error> {
    canvas.clear()?;

    for (_, track) in store.entries() {
        for path in segmenter.segment(track.history().iter()) {
            canvas.stroke_polyline(&path, track.color(), thickness)?;
        }
    }

    Ok(())
}

pub fn paint_markers<C: Canvas>(
    canvas: &mut C,
    markers: &[Marker],
    radius: f32,
) -> Result<(), Error> {
    canvas.clear()?;

    for m in markers {
        canvas.fill_disc(m.pos, radius, m.color)?;
        canvas.label(
            m.pos + na::Vector2::new(radius + 3.0, -radius - 3.0),
            &m.key.to_string(),
            Color::WHITE,
        )?;
    }

    Ok(())
}
