use crate::config::EngineConfig;
use crate::track::TrailPoint;
use nalgebra as na;

pub type Polyline = Vec<na::Point2<f32>>;

/// Splits a trail wherever a straight connection would misrepresent the motion: a camera
/// handoff, a detection gap, or a jump longer than the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    pub gap_frames: u64,
    pub jump_threshold_px: f32,
    pub break_on_camera_change: bool,
}

impl Segmenter {
    pub fn new(gap_frames: u64, jump_threshold_px: f32, break_on_camera_change: bool) -> Self {
        Self {
            gap_frames,
            jump_threshold_px,
            break_on_camera_change,
        }
    }

    #[inline]
    pub fn connects(&self, prev: &TrailPoint, cur: &TrailPoint) -> bool {
        if self.break_on_camera_change && prev.camera_id != cur.camera_id {
            return false;
        }

        if cur.tick.saturating_sub(prev.tick) > self.gap_frames {
            return false;
        }

        prev.distance(cur) <= self.jump_threshold_px
    }

    /// Strokable sub-paths of `history` (oldest first). Sub-paths shorter than two points
    /// draw nothing and are left out.
    pub fn segment<'a, I>(&self, history: I) -> Vec<Polyline>
    where
        I: IntoIterator<Item = &'a TrailPoint>,
    {
        let mut paths = Vec::new();
        let mut current: Polyline = Vec::new();
        let mut prev: Option<&TrailPoint> = None;

        for cur in history {
            if let Some(prev) = prev {
                if !self.connects(prev, cur) {
                    flush(&mut paths, &mut current);
                }
            }

            current.push(cur.pos);
            prev = Some(cur);
        }

        flush(&mut paths, &mut current);

        paths
    }
}

impl From<&EngineConfig> for Segmenter {
    fn from(cfg: &EngineConfig) -> Self {
        Segmenter::new(
            cfg.gap_frames,
            cfg.jump_threshold_px,
            cfg.break_on_camera_change,
        )
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        (&EngineConfig::default()).into()
    }
}

fn flush(paths: &mut Vec<Polyline>, current: &mut Polyline) {
    if current.len() >= 2 {
        paths.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
