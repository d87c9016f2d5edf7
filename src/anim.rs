use crate::{
    anim_ease::Ease,
    core::{Point, Vec2},
    error::{TrackError, TrackResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

/// A host property value over time, sampled at arbitrary seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim<T> {
    Constant(T),
    Keyframes(Keyframes<T>),
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// `property` names the value in read-failure errors.
    pub fn sample(&self, property: &str, time: f64) -> TrackResult<T> {
        if !time.is_finite() {
            return Err(TrackError::read(property, time, "time must be finite"));
        }
        match self {
            Self::Constant(v) => Ok(v.clone()),
            Self::Keyframes(kf) => kf.sample(property, time),
        }
    }

    pub fn validate(&self, property: &str) -> TrackResult<()> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Keyframes(kf) => kf.validate(property),
        }
    }
}

impl<T: Default> Default for Anim<T> {
    fn default() -> Self {
        Self::Constant(T::default())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by time
    #[serde(default)]
    pub mode: InterpMode,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self, property: &str) -> TrackResult<()> {
        if self.keys.is_empty() {
            return Err(TrackError::validation(format!(
                "'{property}' keyframes must have at least one key"
            )));
        }
        if self.keys.iter().any(|k| !k.time.is_finite()) {
            return Err(TrackError::validation(format!(
                "'{property}' keyframe times must be finite"
            )));
        }
        if !self.keys.windows(2).all(|w| w[0].time <= w[1].time) {
            return Err(TrackError::validation(format!(
                "'{property}' keyframes must be sorted by time"
            )));
        }
        Ok(())
    }

    /// Holds the first/last value outside the keyed range.
    pub fn sample(&self, property: &str, time: f64) -> TrackResult<T> {
        let Some(last) = self.keys.last() else {
            return Err(TrackError::read(property, time, "no keyframes"));
        };

        let idx = self.keys.partition_point(|k| k.time <= time);
        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(last.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.time - a.time;
        if span <= 0.0 {
            return Ok(a.value.clone());
        }

        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => {
                let t = a.ease.apply((time - a.time) / span);
                Ok(T::lerp(&a.value, &b.value, t))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub time: f64, // seconds
    pub value: T,
    #[serde(default)]
    pub ease: Ease, // toward the next key
}

impl<T> Keyframe<T> {
    pub fn new(time: f64, value: T) -> Self {
        Self {
            time,
            value,
            ease: Ease::Linear,
        }
    }

    pub fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    Hold,
    #[default]
    Linear,
}
