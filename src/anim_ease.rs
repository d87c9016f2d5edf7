/// Temporal ease of a keyframe segment, named after the host's keyframe
/// assistants.
///
/// The ease is stored on the key that starts the segment. `EasyEaseOut`
/// leaves that key slowly, `EasyEaseIn` arrives slowly at the next key and
/// `EasyEase` does both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    EasyEaseIn,
    EasyEaseOut,
    EasyEase,
}

impl Ease {
    /// Maps segment progress `t` to eased progress. `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EasyEaseOut => t * t,
            Self::EasyEaseIn => t * (2.0 - t),
            Self::EasyEase => t * t * (3.0 - 2.0 * t),
        }
    }
}
