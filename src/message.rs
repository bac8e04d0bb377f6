use crate::error::Error;
use serde::Deserialize as _;
use serde_derive::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// cameraId -> local track id -> detection record, decoded one by one with
/// [`RawDetection::from_value`].
pub type FrameSnapshot = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    CameraInit {
        cameras: BTreeMap<String, CameraEntry>,
    },
    DetectedData {
        data: FrameSnapshot,
    },
    #[serde(other)]
    Other,
}

impl Message {
    #[inline]
    pub fn from_json(payload: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// One detection as delivered on the wire. Coordinates are kept untyped so that a bad
/// value invalidates only this detection instead of the whole snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDetection {
    pub x: Option<Value>,
    pub y: Option<Value>,
    pub bev_x: Option<Value>,
    pub bev_y: Option<Value>,
    pub global_id: Option<Value>,
}

impl RawDetection {
    /// `None` unless `record` is a JSON object.
    pub fn from_value(record: &Value) -> Option<Self> {
        match record {
            Value::Object(_) => RawDetection::deserialize(record).ok(),
            _ => None,
        }
    }

    /// `bev_*` wins over the plain field. `None` unless both axes are finite numbers.
    pub fn coords(&self) -> Option<(f64, f64)> {
        let x = self.bev_x.as_ref().or(self.x.as_ref()).and_then(finite)?;
        let y = self.bev_y.as_ref().or(self.y.as_ref()).and_then(finite)?;

        Some((x, y))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CameraEntry {
    pub name: Option<String>,
    pub theta: Option<Value>,
    pub x: Option<Value>,
    pub y: Option<Value>,
    pub pos: Option<Value>,
    pub bev_x: Option<Value>,
    pub bev_y: Option<Value>,
    #[serde(rename = "H")]
    pub homography: Option<Value>,
}

#[inline]
pub(crate) fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
