//! Per-feature extractors. Each one reads an optional layer capability at a
//! single time; a missing capability yields `None` or an empty list, never an
//! error. Read failures of a capability that is present do propagate.

use crate::{
    error::TrackResult,
    record::{CornerPin, MeshVertex, MeshWarpGrid, PuppetPin, TrackerPoint},
    scene::{
        Corner, CornerPinSource, LayerSource, MeshWarpSource, MotionTrackerSource, PuppetSource,
    },
};

/// Optional capabilities of one layer, probed once before its frames are
/// sampled.
#[derive(Clone, Copy)]
pub struct LayerFeatures<'a> {
    pub tracker: Option<&'a dyn MotionTrackerSource>,
    pub mesh: Option<&'a dyn MeshWarpSource>,
    pub corner_pin: Option<&'a dyn CornerPinSource>,
    pub puppet: Option<&'a dyn PuppetSource>,
}

impl<'a> LayerFeatures<'a> {
    pub const NONE: LayerFeatures<'static> = LayerFeatures {
        tracker: None,
        mesh: None,
        corner_pin: None,
        puppet: None,
    };

    pub fn probe(layer: &'a dyn LayerSource) -> Self {
        let features = Self {
            tracker: layer.motion_tracker(),
            mesh: layer.mesh_warp(),
            corner_pin: layer.corner_pin(),
            puppet: layer.puppet(),
        };
        tracing::debug!(
            layer = layer.name(),
            tracker = features.tracker.is_some(),
            mesh = features.mesh.is_some(),
            corner_pin = features.corner_pin.is_some(),
            puppet = features.puppet.is_some(),
            "probed layer capabilities"
        );
        features
    }
}

impl std::fmt::Debug for LayerFeatures<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerFeatures")
            .field("tracker", &self.tracker.is_some())
            .field("mesh", &self.mesh.is_some())
            .field("corner_pin", &self.corner_pin.is_some())
            .field("puppet", &self.puppet.is_some())
            .finish()
    }
}

/// One entry per track point, named `Track Point 1..=N`.
pub fn sample_tracker_points(
    tracker: Option<&dyn MotionTrackerSource>,
    time: f64,
) -> TrackResult<Vec<TrackerPoint>> {
    let Some(tracker) = tracker else {
        return Ok(Vec::new());
    };

    let n = tracker.num_track_points();
    let mut out = Vec::with_capacity(n);
    for i in 1..=n {
        let point = tracker.track_point(i)?;
        out.push(TrackerPoint {
            name: format!("Track Point {i}"),
            position: point.attach_at(time)?,
            confidence: point.confidence_at(time)?,
        });
    }
    Ok(out)
}

/// Every vertex in row-major order. A present 0×0 mesh is `Some` with no
/// vertices, distinct from an absent mesh.
pub fn sample_mesh_warp(
    mesh: Option<&dyn MeshWarpSource>,
    time: f64,
) -> TrackResult<Option<MeshWarpGrid>> {
    let Some(mesh) = mesh else {
        return Ok(None);
    };

    let (rows, columns) = (mesh.rows(), mesh.columns());
    let mut vertices = Vec::with_capacity(rows as usize * columns as usize);
    for row in 0..rows {
        for col in 0..columns {
            vertices.push(MeshVertex {
                row,
                col,
                position: mesh.vertex_at(row, col, time)?,
            });
        }
    }

    Ok(Some(MeshWarpGrid {
        rows,
        columns,
        vertices,
    }))
}

pub fn sample_corner_pin(
    pin: Option<&dyn CornerPinSource>,
    time: f64,
) -> TrackResult<Option<CornerPin>> {
    let Some(pin) = pin else {
        return Ok(None);
    };

    Ok(Some(CornerPin {
        top_left: pin.corner_at(Corner::TopLeft, time)?,
        top_right: pin.corner_at(Corner::TopRight, time)?,
        bottom_right: pin.corner_at(Corner::BottomRight, time)?,
        bottom_left: pin.corner_at(Corner::BottomLeft, time)?,
    }))
}

/// Positional pins only, in the puppet's property order.
pub fn sample_puppet_pins(
    puppet: Option<&dyn PuppetSource>,
    time: f64,
) -> TrackResult<Vec<PuppetPin>> {
    let Some(puppet) = puppet else {
        return Ok(Vec::new());
    };

    let mut pins = Vec::new();
    for i in 1..=puppet.num_properties() {
        let prop = puppet.property(i)?;
        if !prop.is_position_pin() {
            continue;
        }
        pins.push(PuppetPin {
            name: prop.name().to_string(),
            position: prop.position_at(time)?,
        });
    }
    Ok(pins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anim::{Anim, InterpMode, Keyframe, Keyframes},
        core::Point,
        document::{
            CornerPinEffect, MeshWarp, MotionTracker, PuppetEffect, PuppetProperty, TrackPoint,
        },
        scene::POSITION_PIN_KIND,
    };

    fn moving(from: Point, to: Point) -> Anim<Point> {
        Anim::Keyframes(Keyframes {
            keys: vec![Keyframe::new(0.0, from), Keyframe::new(1.0, to)],
            mode: InterpMode::Linear,
        })
    }

    fn grid(rows: u32, columns: u32) -> MeshWarp {
        let vertices = (0..rows)
            .flat_map(|r| {
                (0..columns).map(move |c| Anim::constant(Point::new(c as f64, r as f64)))
            })
            .collect();
        MeshWarp {
            rows,
            columns,
            vertices,
        }
    }

    #[test]
    fn absent_features_are_empty_not_errors() {
        assert!(sample_tracker_points(None, 0.0).unwrap().is_empty());
        assert!(sample_mesh_warp(None, 0.0).unwrap().is_none());
        assert!(sample_corner_pin(None, 0.0).unwrap().is_none());
        assert!(sample_puppet_pins(None, 0.0).unwrap().is_empty());
    }

    #[test]
    fn tracker_points_are_numbered_from_one() {
        let tracker = MotionTracker {
            track_points: vec![
                TrackPoint {
                    name: "Feature A".to_string(),
                    attach: moving(Point::new(0.0, 0.0), Point::new(10.0, 20.0)),
                    confidence: Anim::constant(0.9),
                },
                TrackPoint {
                    name: "Feature B".to_string(),
                    attach: Anim::constant(Point::new(5.0, 5.0)),
                    confidence: Anim::constant(0.25),
                },
            ],
        };

        let points = sample_tracker_points(Some(&tracker), 0.5).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "Track Point 1");
        assert_eq!(points[0].position, Point::new(5.0, 10.0));
        assert_eq!(points[0].confidence, 0.9);
        assert_eq!(points[1].name, "Track Point 2");
        assert_eq!(points[1].confidence, 0.25);
    }

    #[test]
    fn tracker_without_points_is_empty() {
        let tracker = MotionTracker::default();
        assert!(sample_tracker_points(Some(&tracker), 0.0).unwrap().is_empty());
    }

    #[test]
    fn mesh_vertices_are_row_major_and_complete() {
        let mesh = grid(3, 4);
        let out = sample_mesh_warp(Some(&mesh), 0.0).unwrap().unwrap();
        assert_eq!((out.rows, out.columns), (3, 4));
        assert_eq!(out.vertices.len(), 12);

        let pairs: Vec<(u32, u32)> = out.vertices.iter().map(|v| (v.row, v.col)).collect();
        let expected: Vec<(u32, u32)> = (0..3).flat_map(|r| (0..4).map(move |c| (r, c))).collect();
        assert_eq!(pairs, expected);
        assert_eq!(out.vertices[6].position, Point::new(2.0, 1.0));
    }

    #[test]
    fn empty_mesh_is_present_but_has_no_vertices() {
        let mesh = grid(0, 0);
        let out = sample_mesh_warp(Some(&mesh), 0.0).unwrap();
        let out = out.expect("0x0 mesh is still a mesh");
        assert!(out.vertices.is_empty());
    }

    #[test]
    fn corner_pin_reads_all_four_corners() {
        let pin = CornerPinEffect {
            top_left: Anim::constant(Point::new(0.0, 0.0)),
            top_right: Anim::constant(Point::new(10.0, 0.0)),
            bottom_right: moving(Point::new(10.0, 10.0), Point::new(20.0, 20.0)),
            bottom_left: Anim::constant(Point::new(0.0, 10.0)),
        };
        let out = sample_corner_pin(Some(&pin), 1.0).unwrap().unwrap();
        assert_eq!(out.top_right, Point::new(10.0, 0.0));
        assert_eq!(out.bottom_right, Point::new(20.0, 20.0));
        assert_eq!(out.bottom_left, Point::new(0.0, 10.0));
    }

    #[test]
    fn puppet_keeps_only_position_pins_in_order() {
        let pin = |name: &str, x: f64| PuppetProperty {
            name: name.to_string(),
            kind: POSITION_PIN_KIND.to_string(),
            position: Some(Anim::constant(Point::new(x, 0.0))),
        };
        let puppet = PuppetEffect {
            properties: vec![
                PuppetProperty {
                    name: "Mesh 1".to_string(),
                    kind: "ADBE FreePin3 Mesh".to_string(),
                    position: None,
                },
                pin("Puppet Pin 2", 2.0),
                PuppetProperty {
                    name: "Starch 1".to_string(),
                    kind: "ADBE FreePin3 Starch Pin".to_string(),
                    position: Some(Anim::constant(Point::new(99.0, 99.0))),
                },
                pin("Puppet Pin 1", 1.0),
            ],
        };

        let pins = sample_puppet_pins(Some(&puppet), 0.0).unwrap();
        let names: Vec<&str> = pins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Puppet Pin 2", "Puppet Pin 1"]);
        assert_eq!(pins[1].position, Point::new(1.0, 0.0));
    }

    #[test]
    fn puppet_without_properties_is_empty() {
        let puppet = PuppetEffect::default();
        assert!(sample_puppet_pins(Some(&puppet), 0.0).unwrap().is_empty());
    }

    #[test]
    fn present_feature_read_failure_propagates() {
        let mesh = MeshWarp {
            rows: 1,
            columns: 1,
            vertices: vec![Anim::Keyframes(Keyframes {
                keys: vec![],
                mode: InterpMode::Linear,
            })],
        };
        let err = sample_mesh_warp(Some(&mesh), 0.0).unwrap_err();
        assert!(err.is_read_failure());
    }
}
