//! Per-frame transform and motion-tracking extraction for layered compositions.
//!
//! The engine walks a composition through the read-only [`scene`] query
//! surface: every layer is sampled on the composition's frame grid, its
//! transform matrix is decomposed to recover skew, and its optional tracker,
//! mesh-warp, corner-pin and puppet-pin features are read at each frame. The
//! result is a [`CompositionRecord`] that [`export`] writes as JSON.
//!
//! [`document`] provides a standalone host: projects loaded from JSON whose
//! layer properties are keyframed.
#![forbid(unsafe_code)]

pub mod anim;
pub mod anim_ease;
pub mod collect;
pub mod core;
pub mod document;
pub mod dsl;
pub mod error;
pub mod export;
pub mod features;
pub mod geometry;
pub mod record;
pub mod sample;
pub mod scene;

pub use anim::{Anim, InterpMode, Keyframe, Keyframes};
pub use anim_ease::Ease;
pub use collect::{collect_composition, collect_layer};
pub use crate::core::{Affine, FrameTiming, Point, Transform2D, Vec2};
pub use document::{Composition, Layer, LayerTransform, Project};
pub use dsl::{CompositionBuilder, LayerBuilder, puppet_pin};
pub use error::{TrackError, TrackResult};
pub use export::{ExportOptions, read_json, to_json_string, write_json};
pub use features::LayerFeatures;
pub use geometry::{DecomposedTransform, LinearBlock, decompose, radians_to_degrees};
pub use record::{
    CompositionRecord, CornerPin, FrameRecord, LayerRecord, MeshVertex, MeshWarpGrid, PuppetPin,
    TrackerPoint, TransformRecord,
};
pub use sample::sample_frame;
pub use scene::{CompositionSource, INTERFACE_VERSION, LayerSource, POSITION_PIN_KIND};
