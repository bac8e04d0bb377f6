use crate::color::{Color, ColorScheme, Palette};
use crate::error::Error;
use crate::key::TrackKey;
use crate::track::{Track, TrailPoint};
use nalgebra as na;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Owns every live track, the logical clock and the key colors.
///
/// All mutation goes through [`TrackStore::advance`], [`TrackStore::upsert`] and the
/// eviction sweep; readers get shared references only.
#[derive(Debug)]
pub struct TrackStore {
    bounds: (f32, f32),
    capacity: usize,
    tick: u64,
    pub(crate) tracks: BTreeMap<TrackKey, Track>,
    palette: Palette,
}

impl TrackStore {
    pub fn new(width: u32, height: u32, capacity: usize, scheme: ColorScheme) -> Self {
        Self {
            bounds: (width as f32, height as f32),
            capacity,
            tick: 0,
            tracks: BTreeMap::new(),
            palette: Palette::new(scheme),
        }
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Moves the logical clock forward by one and returns the new tick.
    #[inline]
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Appends a point for `key` at the current tick, creating the track on first sight.
    ///
    /// Non-finite coordinates are refused with [`Error::InvalidPoint`] and leave the
    /// store untouched. Accepted coordinates are clamped into the surface bounds.
    pub fn upsert(
        &mut self,
        key: &TrackKey,
        camera_id: &Rc<str>,
        x: f64,
        y: f64,
    ) -> Result<na::Point2<f32>, Error> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidPoint {
                key: key.to_string(),
            });
        }

        let (w, h) = self.bounds;
        let x = (x as f32).clamp(0.0, w);
        let y = (y as f32).clamp(0.0, h);
        let tick = self.tick;
        let capacity = self.capacity;
        let palette = &mut self.palette;

        let track = self
            .tracks
            .entry(key.clone())
            .or_insert_with(|| Track::new(capacity, tick, palette.color_of(key)));

        track.history.push(TrailPoint::new(x, y, camera_id.clone(), tick));
        track.last_seen_tick = tick;

        Ok(na::Point2::new(x, y))
    }

    /// Memoized color of `key`, assigned on first request.
    #[inline]
    pub fn color_of(&mut self, key: &TrackKey) -> Color {
        match self.tracks.get(key) {
            Some(track) => track.color,
            None => self.palette.color_of(key),
        }
    }

    #[inline]
    pub fn get(&self, key: &TrackKey) -> Option<&Track> {
        self.tracks.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &TrackKey) -> bool {
        self.tracks.contains_key(key)
    }

    /// Live tracks in key order. Each call reflects the store as it is now.
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (&TrackKey, &Track)> {
        self.tracks.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
