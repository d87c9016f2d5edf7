//! The exported document: composition → layers → frames → features.
//!
//! Field names serialize in camelCase. Absent optional features serialize as
//! `null`, absent list features as `[]`.

use crate::core::{Point, Vec2};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionRecord {
    pub name: String,
    pub duration: f64,
    pub frame_rate: f64,
    pub width: u32,
    pub height: u32,
    pub layers: Vec<LayerRecord>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerRecord {
    pub name: String,
    pub index: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub frames: Vec<FrameRecord>, // frame-ascending, no gaps
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub frame: u64,
    pub time: f64,
    pub transform: TransformRecord,
    pub corner_pin: Option<CornerPin>,
    pub puppet_pins: Vec<PuppetPin>,
    pub tracker_points: Vec<TrackerPoint>,
    pub mesh_warp: Option<MeshWarpGrid>,
}

/// Headline values come from the layer's own properties; `skew` is recovered
/// from the layer matrix.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRecord {
    pub position: Vec2,
    pub anchor_point: Vec2,
    pub scale: Vec2,
    pub rotation: f64,
    pub opacity: f64,
    pub skew: Vec2,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackerPoint {
    pub name: String,
    pub position: Point,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshWarpGrid {
    pub rows: u32,
    pub columns: u32,
    pub vertices: Vec<MeshVertex>, // row-major, rows * columns entries
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshVertex {
    pub row: u32,
    pub col: u32,
    pub position: Point,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerPin {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PuppetPin {
    pub name: String,
    pub position: Point,
}
