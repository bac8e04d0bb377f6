use crate::color::ColorScheme;
use crate::error::Error;
use serde_derive::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Points kept per track.
    pub history_len: usize,
    /// Ticks a track may go unseen before it is evicted.
    pub ttl_frames: u64,
    pub jump_threshold_px: f32,
    /// Largest tick difference still drawn as a continuous segment.
    pub gap_frames: u64,
    pub break_on_camera_change: bool,
    pub color_scheme: ColorScheme,
    pub marker_radius: f32,
    pub trail_thickness: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_len: 50,
            ttl_frames: 15,
            jump_threshold_px: 80.0,
            gap_frames: 2,
            break_on_camera_change: true,
            color_scheme: ColorScheme::Hashed,
            marker_radius: 5.0,
            trail_thickness: 2.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(src: &str) -> Result<Self, Error> {
        let cfg: EngineConfig =
            serde_json::from_str(src).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.history_len == 0 {
            return Err(Error::Config("history_len must be at least 1".into()));
        }

        let positive = [
            ("jump_threshold_px", self.jump_threshold_px),
            ("marker_radius", self.marker_radius),
            ("trail_thickness", self.trail_thickness),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{"history_len": 3, "ttl_frames": 2}"#).unwrap();

        assert_eq!(cfg.history_len, 3);
        assert_eq!(cfg.ttl_frames, 2);
        assert_eq!(cfg.gap_frames, 2);
        assert_eq!(cfg.jump_threshold_px, 80.0);
        assert!(cfg.break_on_camera_change);
    }

    #[test]
    fn color_scheme_from_json() {
        let cfg =
            EngineConfig::from_json(r#"{"color_scheme": {"kind": "random", "seed": 9}}"#).unwrap();

        assert_eq!(cfg.color_scheme, ColorScheme::Random { seed: Some(9) });
    }

    #[test]
    fn rejects_empty_history() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"history_len": 0}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn rejects_negative_threshold() {
        let cfg = EngineConfig {
            jump_threshold_px: -1.0,
            ..Default::default()
        };

        assert!(cfg.validate().is_err());
    }
}
