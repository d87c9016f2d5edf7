pub type TrackResult<T> = Result<T, TrackError>;

/// Failure taxonomy for scene reads and exports.
///
/// Absence of an optional feature (tracker, mesh, corner pin, puppet) is not
/// represented here: samplers report it as `None` or an empty list.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    /// No usable scene to traverse (empty project, unknown composition).
    #[error("no active scene: {0}")]
    NoScene(String),

    /// The scene could not resolve a property at the requested time.
    #[error("read failure: '{property}' at {time}s: {reason}")]
    Read {
        property: String,
        time: f64,
        reason: String,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackError {
    pub fn no_scene(msg: impl Into<String>) -> Self {
        Self::NoScene(msg.into())
    }

    pub fn read(property: impl Into<String>, time: f64, reason: impl Into<String>) -> Self {
        Self::Read {
            property: property.into(),
            time,
            reason: reason.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
