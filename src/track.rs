use crate::circular_queue::CircularQueue;
use crate::color::Color;
use nalgebra as na;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct TrailPoint {
    // in px, clamped to the surface
    pub pos: na::Point2<f32>,
    pub camera_id: Rc<str>,
    pub tick: u64,
}

impl TrailPoint {
    #[inline]
    pub fn new(x: f32, y: f32, camera_id: Rc<str>, tick: u64) -> Self {
        Self {
            pos: na::Point2::new(x, y),
            camera_id,
            tick,
        }
    }

    #[inline]
    pub fn distance(&self, other: &TrailPoint) -> f32 {
        na::distance(&self.pos, &other.pos)
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub(crate) history: CircularQueue<TrailPoint>,
    pub(crate) last_seen_tick: u64,
    pub(crate) color: Color,
}

impl Track {
    pub(crate) fn new(capacity: usize, tick: u64, color: Color) -> Self {
        Self {
            history: CircularQueue::with_capacity(capacity),
            last_seen_tick: tick,
            color,
        }
    }

    /// Oldest point first.
    #[inline]
    pub fn history(&self) -> &CircularQueue<TrailPoint> {
        &self.history
    }

    #[inline]
    pub fn last_seen_tick(&self) -> u64 {
        self.last_seen_tick
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn latest(&self) -> Option<&TrailPoint> {
        self.history.latest()
    }
}
