//! Read-only query surface a host scene exposes to the sampling engine.
//!
//! Every time-indexed accessor evaluates the property at an arbitrary time in
//! seconds without mutating the host. Optional capabilities are reported as
//! `None` when the layer does not carry them.

use crate::{
    core::{Affine, Point, Vec2},
    error::TrackResult,
};

/// Version of this query surface.
pub const INTERFACE_VERSION: u32 = 1;

/// Kind tag of a puppet sub-property that is a positional pin.
pub const POSITION_PIN_KIND: &str = "ADBE FreePin3 PosPin";

pub trait CompositionSource {
    fn name(&self) -> &str;
    fn duration(&self) -> TrackResult<f64>;
    fn frame_rate(&self) -> TrackResult<f64>;
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Layers in the composition's index order.
    fn layers(&self) -> TrackResult<Vec<Box<dyn LayerSource + '_>>>;
}

pub trait LayerSource {
    fn name(&self) -> &str;
    /// 1-based position in the owning composition.
    fn index(&self) -> u32;
    fn kind(&self) -> &str;

    fn position_at(&self, time: f64) -> TrackResult<Vec2>;
    fn anchor_point_at(&self, time: f64) -> TrackResult<Vec2>;
    fn scale_at(&self, time: f64) -> TrackResult<Vec2>;
    fn rotation_at(&self, time: f64) -> TrackResult<f64>;
    fn opacity_at(&self, time: f64) -> TrackResult<f64>;
    /// Full layer transform, translation included.
    fn matrix_at(&self, time: f64) -> TrackResult<Affine>;

    fn motion_tracker(&self) -> Option<&dyn MotionTrackerSource> {
        None
    }

    fn mesh_warp(&self) -> Option<&dyn MeshWarpSource> {
        None
    }

    fn corner_pin(&self) -> Option<&dyn CornerPinSource> {
        None
    }

    fn puppet(&self) -> Option<&dyn PuppetSource> {
        None
    }
}

pub trait MotionTrackerSource {
    fn num_track_points(&self) -> usize;
    /// `index` is 1-based.
    fn track_point(&self, index: usize) -> TrackResult<&dyn TrackPointSource>;
}

pub trait TrackPointSource {
    fn attach_at(&self, time: f64) -> TrackResult<Point>;
    fn confidence_at(&self, time: f64) -> TrackResult<f64>;
}

pub trait MeshWarpSource {
    fn rows(&self) -> u32;
    fn columns(&self) -> u32;
    fn vertex_at(&self, row: u32, col: u32, time: f64) -> TrackResult<Point>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Property name of the corner on the host effect.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "Top Left",
            Self::TopRight => "Top Right",
            Self::BottomRight => "Bottom Right",
            Self::BottomLeft => "Bottom Left",
        }
    }
}

pub trait CornerPinSource {
    fn corner_at(&self, corner: Corner, time: f64) -> TrackResult<Point>;
}

pub trait PuppetSource {
    fn num_properties(&self) -> usize;
    /// `index` is 1-based.
    fn property(&self, index: usize) -> TrackResult<&dyn PuppetPropertySource>;
}

pub trait PuppetPropertySource {
    fn name(&self) -> &str;
    fn kind(&self) -> &str;
    fn position_at(&self, time: f64) -> TrackResult<Point>;

    fn is_position_pin(&self) -> bool {
        self.kind() == POSITION_PIN_KIND
    }
}
