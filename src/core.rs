use crate::error::{TrackError, TrackResult};

pub use kurbo::{Affine, Point, Vec2};

/// Largest last-frame index a composition may sample.
pub const MAX_FRAME_INDEX: u64 = u32::MAX as u64;

/// Sampling grid of a composition: `floor(duration * frame_rate) + 1` frames,
/// frame `n` sitting at `n / frame_rate` seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameTiming {
    pub duration: f64,   // seconds
    pub frame_rate: f64, // frames per second, > 0
}

impl FrameTiming {
    pub fn new(duration: f64, frame_rate: f64) -> TrackResult<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(TrackError::read(
                "frameRate",
                0.0,
                format!("frame rate must be finite and > 0, got {frame_rate}"),
            ));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(TrackError::read(
                "duration",
                0.0,
                format!("duration must be finite and >= 0, got {duration}"),
            ));
        }
        if (duration * frame_rate).floor() > MAX_FRAME_INDEX as f64 {
            return Err(TrackError::read(
                "duration",
                0.0,
                format!("{duration}s at {frame_rate} fps exceeds {MAX_FRAME_INDEX} frames"),
            ));
        }
        Ok(Self {
            duration,
            frame_rate,
        })
    }

    /// Index of the last sampled frame.
    pub fn total_frames(self) -> u64 {
        (self.duration * self.frame_rate)
            .floor()
            .clamp(0.0, MAX_FRAME_INDEX as f64) as u64
    }

    /// Number of samples, last frame included.
    pub fn frame_count(self) -> u64 {
        self.total_frames().saturating_add(1)
    }

    pub fn time_of(self, frame: u64) -> f64 {
        frame as f64 / self.frame_rate
    }

    pub fn frames(self) -> impl Iterator<Item = (u64, f64)> {
        (0..=self.total_frames()).map(move |f| (f, self.time_of(f)))
    }
}

/// Layer transform in host units: scale in percent, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub position: Vec2,
    pub anchor_point: Vec2,
    pub scale: Vec2, // percent, default (100,100)
    pub rotation_deg: f64,
    pub skew_deg: f64,
    pub skew_axis_deg: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            anchor_point: Vec2::ZERO,
            scale: Vec2::new(100.0, 100.0),
            rotation_deg: 0.0,
            skew_deg: 0.0,
            skew_axis_deg: 0.0,
        }
    }
}

impl Transform2D {
    pub fn to_affine(self) -> Affine {
        let t_position = Affine::translate(self.position);
        let t_unanchor = Affine::translate(-self.anchor_point);
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale_non_uniform(self.scale.x / 100.0, self.scale.y / 100.0);

        let axis = self.skew_axis_deg.to_radians();
        let t_skew = Affine::rotate(axis)
            * Affine::skew(self.skew_deg.to_radians().tan(), 0.0)
            * Affine::rotate(-axis);

        // T(position) * R(rotation) * K(skew about axis) * S(scale) * T(-anchor)
        t_position * t_rotate * t_skew * t_scale * t_unanchor
    }
}
