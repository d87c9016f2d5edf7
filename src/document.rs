//! Standalone scene host: a project of compositions whose layer properties are
//! keyframed, loaded from JSON and exposed through the [`crate::scene`] query
//! surface.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    anim::Anim,
    core::{Affine, MAX_FRAME_INDEX, Point, Transform2D, Vec2},
    error::{TrackError, TrackResult},
    scene::{
        CompositionSource, Corner, CornerPinSource, LayerSource, MeshWarpSource,
        MotionTrackerSource, PuppetPropertySource, PuppetSource, TrackPointSource,
    },
};

/// Effect name the corner-pin capability is resolved by.
pub const CORNER_PIN_EFFECT: &str = "Corner Pin";
/// Effect name the puppet capability is resolved by.
pub const PUPPET_EFFECT: &str = "Puppet";
pub const DEFAULT_LAYER_KIND: &str = "ADBE AV Layer";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub compositions: Vec<Composition>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    pub name: String,
    pub duration: f64,   // seconds
    pub frame_rate: f64, // frames per second
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default = "default_layer_kind")]
    pub kind: String,
    #[serde(default)]
    pub transform: LayerTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_tracker: Option<MotionTracker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_warp: Option<MeshWarp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
}

fn default_layer_kind() -> String {
    DEFAULT_LAYER_KIND.to_string()
}

/// Transform properties in host units: scale and opacity in percent, angles in
/// degrees.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerTransform {
    pub position: Anim<Vec2>,
    pub anchor_point: Anim<Vec2>,
    pub scale: Anim<Vec2>,
    pub rotation: Anim<f64>,
    pub opacity: Anim<f64>,
    pub skew: Anim<f64>,
    pub skew_axis: Anim<f64>,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            position: Anim::constant(Vec2::ZERO),
            anchor_point: Anim::constant(Vec2::ZERO),
            scale: Anim::constant(Vec2::new(100.0, 100.0)),
            rotation: Anim::constant(0.0),
            opacity: Anim::constant(100.0),
            skew: Anim::constant(0.0),
            skew_axis: Anim::constant(0.0),
        }
    }
}

impl LayerTransform {
    pub fn sample(&self, time: f64) -> TrackResult<Transform2D> {
        Ok(Transform2D {
            position: self.position.sample("transform.position", time)?,
            anchor_point: self.anchor_point.sample("transform.anchorPoint", time)?,
            scale: self.scale.sample("transform.scale", time)?,
            rotation_deg: self.rotation.sample("transform.rotation", time)?,
            skew_deg: self.skew.sample("transform.skew", time)?,
            skew_axis_deg: self.skew_axis.sample("transform.skewAxis", time)?,
        })
    }

    fn validate(&self) -> TrackResult<()> {
        self.position.validate("transform.position")?;
        self.anchor_point.validate("transform.anchorPoint")?;
        self.scale.validate("transform.scale")?;
        self.rotation.validate("transform.rotation")?;
        self.opacity.validate("transform.opacity")?;
        self.skew.validate("transform.skew")?;
        self.skew_axis.validate("transform.skewAxis")
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionTracker {
    pub track_points: Vec<TrackPoint>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackPoint {
    pub name: String,
    pub attach: Anim<Point>,
    pub confidence: Anim<f64>, // 0..1
}

/// Row-major grid: vertex `(r, c)` lives at `vertices[r * columns + c]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshWarp {
    pub rows: u32,
    pub columns: u32,
    pub vertices: Vec<Anim<Point>>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Effect {
    pub name: String,
    #[serde(flatten)]
    pub kind: EffectKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    CornerPin(CornerPinEffect),
    Puppet(PuppetEffect),
    Other,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CornerPinEffect {
    pub top_left: Anim<Point>,
    pub top_right: Anim<Point>,
    pub bottom_right: Anim<Point>,
    pub bottom_left: Anim<Point>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PuppetEffect {
    #[serde(default)]
    pub properties: Vec<PuppetProperty>,
}

/// A puppet sub-property. Only pins of kind
/// [`crate::scene::POSITION_PIN_KIND`] are exported.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PuppetProperty {
    pub name: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Anim<Point>>,
}

impl Project {
    pub fn from_json_str(s: &str) -> TrackResult<Self> {
        let project: Project = serde_json::from_str(s)?;
        project.validate()?;
        Ok(project)
    }

    pub fn from_path(path: &Path) -> TrackResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read project '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> TrackResult<()> {
        for comp in &self.compositions {
            comp.validate()?;
        }
        Ok(())
    }

    pub fn composition_names(&self) -> Vec<&str> {
        self.compositions.iter().map(|c| c.name.as_str()).collect()
    }

    /// Resolves a composition by exact name, falling back to a 1-based index.
    pub fn composition(&self, selector: &str) -> TrackResult<&Composition> {
        if self.compositions.is_empty() {
            return Err(TrackError::no_scene("project has no compositions"));
        }
        if let Some(comp) = self.compositions.iter().find(|c| c.name == selector) {
            return Ok(comp);
        }
        selector
            .parse::<usize>()
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.compositions.get(i))
            .ok_or_else(|| TrackError::no_scene(format!("no composition matches '{selector}'")))
    }

    /// The composition preselected when none is named.
    pub fn first_composition(&self) -> TrackResult<&Composition> {
        self.compositions
            .first()
            .ok_or_else(|| TrackError::no_scene("project has no compositions"))
    }
}

impl Composition {
    pub fn validate(&self) -> TrackResult<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(TrackError::validation(format!(
                "composition '{}' frame_rate must be > 0",
                self.name
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TrackError::validation(format!(
                "composition '{}' duration must be >= 0",
                self.name
            )));
        }
        if (self.duration * self.frame_rate).floor() > MAX_FRAME_INDEX as f64 {
            return Err(TrackError::validation(format!(
                "composition '{}' spans more than {MAX_FRAME_INDEX} frames",
                self.name
            )));
        }
        for layer in &self.layers {
            layer.validate().map_err(|e| match e {
                TrackError::Validation(msg) => TrackError::validation(format!(
                    "composition '{}', layer '{}': {msg}",
                    self.name, layer.name
                )),
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Layer {
    pub fn validate(&self) -> TrackResult<()> {
        self.transform.validate()?;

        if let Some(tracker) = &self.motion_tracker {
            for p in &tracker.track_points {
                p.attach.validate("attach")?;
                p.confidence.validate("confidence")?;
            }
        }

        if let Some(mesh) = &self.mesh_warp {
            let expected = mesh.rows as usize * mesh.columns as usize;
            if mesh.vertices.len() != expected {
                return Err(TrackError::validation(format!(
                    "mesh warp is {}x{} but has {} vertices",
                    mesh.rows,
                    mesh.columns,
                    mesh.vertices.len()
                )));
            }
            for v in &mesh.vertices {
                v.validate("mesh vertex")?;
            }
        }

        for effect in &self.effects {
            match &effect.kind {
                EffectKind::CornerPin(pin) => {
                    for corner in Corner::ALL {
                        pin.corner(corner).validate(corner.name())?;
                    }
                }
                EffectKind::Puppet(puppet) => {
                    for prop in &puppet.properties {
                        if let Some(pos) = &prop.position {
                            pos.validate(&prop.name)?;
                        }
                    }
                }
                EffectKind::Other => {}
            }
        }

        Ok(())
    }

    /// First effect with this name, like a host's by-name effect lookup.
    pub fn effect(&self, name: &str) -> Option<&Effect> {
        self.effects.iter().find(|e| e.name == name)
    }
}

impl CornerPinEffect {
    pub fn corner(&self, corner: Corner) -> &Anim<Point> {
        match corner {
            Corner::TopLeft => &self.top_left,
            Corner::TopRight => &self.top_right,
            Corner::BottomRight => &self.bottom_right,
            Corner::BottomLeft => &self.bottom_left,
        }
    }
}

impl CompositionSource for Composition {
    fn name(&self) -> &str {
        &self.name
    }

    fn duration(&self) -> TrackResult<f64> {
        Ok(self.duration)
    }

    fn frame_rate(&self) -> TrackResult<f64> {
        Ok(self.frame_rate)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn layers(&self) -> TrackResult<Vec<Box<dyn LayerSource + '_>>> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let index = u32::try_from(i + 1)
                    .map_err(|_| TrackError::validation("too many layers in composition"))?;
                Ok(Box::new(LayerView { index, layer }) as Box<dyn LayerSource + '_>)
            })
            .collect()
    }
}

/// A document layer paired with its position in the composition.
#[derive(Clone, Copy, Debug)]
pub struct LayerView<'a> {
    pub index: u32,
    pub layer: &'a Layer,
}

impl LayerSource for LayerView<'_> {
    fn name(&self) -> &str {
        &self.layer.name
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn kind(&self) -> &str {
        &self.layer.kind
    }

    fn position_at(&self, time: f64) -> TrackResult<Vec2> {
        self.layer
            .transform
            .position
            .sample("transform.position", time)
    }

    fn anchor_point_at(&self, time: f64) -> TrackResult<Vec2> {
        self.layer
            .transform
            .anchor_point
            .sample("transform.anchorPoint", time)
    }

    fn scale_at(&self, time: f64) -> TrackResult<Vec2> {
        self.layer.transform.scale.sample("transform.scale", time)
    }

    fn rotation_at(&self, time: f64) -> TrackResult<f64> {
        self.layer
            .transform
            .rotation
            .sample("transform.rotation", time)
    }

    fn opacity_at(&self, time: f64) -> TrackResult<f64> {
        self.layer
            .transform
            .opacity
            .sample("transform.opacity", time)
    }

    fn matrix_at(&self, time: f64) -> TrackResult<Affine> {
        Ok(self.layer.transform.sample(time)?.to_affine())
    }

    fn motion_tracker(&self) -> Option<&dyn MotionTrackerSource> {
        self.layer
            .motion_tracker
            .as_ref()
            .map(|t| t as &dyn MotionTrackerSource)
    }

    fn mesh_warp(&self) -> Option<&dyn MeshWarpSource> {
        self.layer
            .mesh_warp
            .as_ref()
            .map(|m| m as &dyn MeshWarpSource)
    }

    fn corner_pin(&self) -> Option<&dyn CornerPinSource> {
        match &self.layer.effect(CORNER_PIN_EFFECT)?.kind {
            EffectKind::CornerPin(pin) => Some(pin as &dyn CornerPinSource),
            _ => None,
        }
    }

    fn puppet(&self) -> Option<&dyn PuppetSource> {
        match &self.layer.effect(PUPPET_EFFECT)?.kind {
            EffectKind::Puppet(puppet) => Some(puppet as &dyn PuppetSource),
            _ => None,
        }
    }
}

impl MotionTrackerSource for MotionTracker {
    fn num_track_points(&self) -> usize {
        self.track_points.len()
    }

    fn track_point(&self, index: usize) -> TrackResult<&dyn TrackPointSource> {
        index
            .checked_sub(1)
            .and_then(|i| self.track_points.get(i))
            .map(|p| p as &dyn TrackPointSource)
            .ok_or_else(|| {
                TrackError::read(
                    format!("track point {index}"),
                    0.0,
                    format!("tracker has {} points", self.track_points.len()),
                )
            })
    }
}

impl TrackPointSource for TrackPoint {
    fn attach_at(&self, time: f64) -> TrackResult<Point> {
        self.attach.sample(&format!("{}.attach", self.name), time)
    }

    fn confidence_at(&self, time: f64) -> TrackResult<f64> {
        self.confidence
            .sample(&format!("{}.confidence", self.name), time)
    }
}

impl MeshWarpSource for MeshWarp {
    fn rows(&self) -> u32 {
        self.rows
    }

    fn columns(&self) -> u32 {
        self.columns
    }

    fn vertex_at(&self, row: u32, col: u32, time: f64) -> TrackResult<Point> {
        let property = format!("meshWarp.vertex({row}, {col})");
        if row >= self.rows || col >= self.columns {
            return Err(TrackError::read(
                property,
                time,
                format!("outside {}x{} grid", self.rows, self.columns),
            ));
        }
        let idx = row as usize * self.columns as usize + col as usize;
        match self.vertices.get(idx) {
            Some(v) => v.sample(&property, time),
            None => Err(TrackError::read(property, time, "vertex missing from grid")),
        }
    }
}

impl CornerPinSource for CornerPinEffect {
    fn corner_at(&self, corner: Corner, time: f64) -> TrackResult<Point> {
        self.corner(corner).sample(corner.name(), time)
    }
}

impl PuppetSource for PuppetEffect {
    fn num_properties(&self) -> usize {
        self.properties.len()
    }

    fn property(&self, index: usize) -> TrackResult<&dyn PuppetPropertySource> {
        index
            .checked_sub(1)
            .and_then(|i| self.properties.get(i))
            .map(|p| p as &dyn PuppetPropertySource)
            .ok_or_else(|| {
                TrackError::read(
                    format!("puppet property {index}"),
                    0.0,
                    format!("puppet has {} properties", self.properties.len()),
                )
            })
    }
}

impl PuppetPropertySource for PuppetProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn position_at(&self, time: f64) -> TrackResult<Point> {
        match &self.position {
            Some(pos) => pos.sample(&format!("{}.position", self.name), time),
            None => Err(TrackError::read(
                format!("{}.position", self.name),
                time,
                "property has no position",
            )),
        }
    }
}
