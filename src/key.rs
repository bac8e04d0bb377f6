use crate::message::RawDetection;
use serde_json::Value;
use std::fmt;

/// Identity a detection is tracked under.
///
/// A detection that carries an upstream `global_id` joins the global namespace, so the
/// same entity seen by several cameras (under different local ids) shares one track.
/// Everything else is scoped to the camera that reported it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackKey {
    Global(String),
    Scoped { camera: String, local: String },
}

impl TrackKey {
    pub fn resolve(camera_id: &str, local_id: &str, det: &RawDetection) -> Self {
        match det.global_id.as_ref().and_then(global_id_text) {
            Some(gid) => TrackKey::Global(gid),
            None => TrackKey::Scoped {
                camera: camera_id.to_string(),
                local: local_id.to_string(),
            },
        }
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        matches!(self, TrackKey::Global(_))
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // scoped labels always carry a ':', so global ones must not
            TrackKey::Global(gid) => write!(f, "G{}", gid.replace('%', "%25").replace(':', "%3A")),
            TrackKey::Scoped { camera, local } => write!(f, "{}:{}", camera, local),
        }
    }
}

fn global_id_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
