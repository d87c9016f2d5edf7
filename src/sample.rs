use crate::{
    error::TrackResult,
    features::{
        LayerFeatures, sample_corner_pin, sample_mesh_warp, sample_puppet_pins,
        sample_tracker_points,
    },
    geometry::{LinearBlock, decompose},
    record::{FrameRecord, TransformRecord},
    scene::LayerSource,
};

/// Builds the record of `layer` at `time`.
///
/// Scale and rotation are the layer's own property values; the layer matrix is
/// decomposed only to recover skew, which the host does not expose as a
/// property. Any failing transform read aborts the frame.
pub fn sample_frame(
    layer: &dyn LayerSource,
    features: &LayerFeatures<'_>,
    frame: u64,
    time: f64,
) -> TrackResult<FrameRecord> {
    let position = layer.position_at(time)?;
    let anchor_point = layer.anchor_point_at(time)?;
    let scale = layer.scale_at(time)?;
    let rotation = layer.rotation_at(time)?;
    let opacity = layer.opacity_at(time)?;

    let matrix = layer.matrix_at(time)?;
    let decomposed = decompose(LinearBlock::from_affine(matrix));

    Ok(FrameRecord {
        frame,
        time,
        transform: TransformRecord {
            position,
            anchor_point,
            scale,
            rotation,
            opacity,
            skew: decomposed.skew,
        },
        corner_pin: sample_corner_pin(features.corner_pin, time)?,
        puppet_pins: sample_puppet_pins(features.puppet, time)?,
        tracker_points: sample_tracker_points(features.tracker, time)?,
        mesh_warp: sample_mesh_warp(features.mesh, time)?,
    })
}
