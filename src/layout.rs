use crate::message::{finite, CameraEntry};
use nalgebra as na;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraDescriptor {
    pub id: String,
    pub name: String,
    // None when no position convention resolved; such cameras are not drawn
    pub position: Option<na::Point2<f32>>,
    pub heading_degrees: f32,
    // 3x3 image -> BEV projection, carried along but not used here
    pub homography: Option<Value>,
}

impl CameraDescriptor {
    pub fn from_entry(id: &str, entry: &CameraEntry) -> Self {
        Self {
            id: id.to_string(),
            name: entry
                .name
                .clone()
                .unwrap_or_else(|| format!("Camera {}", id)),
            position: resolve_position(entry),
            heading_degrees: entry.theta.as_ref().and_then(finite).unwrap_or(0.0) as f32,
            homography: entry.homography.clone(),
        }
    }

    /// Unit vector of the heading on a y-down surface.
    #[inline]
    pub fn heading(&self) -> na::Vector2<f32> {
        let rad = self.heading_degrees.to_radians();

        na::Vector2::new(rad.cos(), rad.sin())
    }
}

/// Tries `x`/`y`, then `pos: [x, y]`, then `bev_x`/`bev_y`.
fn resolve_position(entry: &CameraEntry) -> Option<na::Point2<f32>> {
    pair(&entry.x, &entry.y)
        .or_else(|| array_pair(&entry.pos))
        .or_else(|| pair(&entry.bev_x, &entry.bev_y))
        .map(|(x, y)| na::Point2::new(x as f32, y as f32))
}

fn pair(x: &Option<Value>, y: &Option<Value>) -> Option<(f64, f64)> {
    Some((x.as_ref().and_then(finite)?, y.as_ref().and_then(finite)?))
}

fn array_pair(pos: &Option<Value>) -> Option<(f64, f64)> {
    match pos.as_ref()?.as_array()?.as_slice() {
        [x, y] => Some((finite(x)?, finite(y)?)),
        _ => None,
    }
}

/// Static camera layout, replaced wholesale on every camera_init.
#[derive(Debug, Clone, Default)]
pub struct CameraLayout {
    cameras: Vec<CameraDescriptor>,
}

impl CameraLayout {
    pub fn from_entries(entries: &BTreeMap<String, CameraEntry>) -> Self {
        Self {
            cameras: entries
                .iter()
                .map(|(id, entry)| CameraDescriptor::from_entry(id, entry))
                .collect(),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &CameraDescriptor> {
        self.cameras.iter()
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&CameraDescriptor> {
        self.cameras.iter().find(|c| c.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
