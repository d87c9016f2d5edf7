use crate::{
    anim::Anim,
    core::{Point, Vec2},
    document::{
        CORNER_PIN_EFFECT, Composition, CornerPinEffect, DEFAULT_LAYER_KIND, Effect, EffectKind,
        Layer, LayerTransform, MeshWarp, MotionTracker, PUPPET_EFFECT, PuppetEffect,
        PuppetProperty, TrackPoint,
    },
    error::{TrackError, TrackResult},
    scene::POSITION_PIN_KIND,
};

pub struct CompositionBuilder {
    name: String,
    duration: f64,
    frame_rate: f64,
    width: u32,
    height: u32,
    layers: Vec<Layer>,
}

impl CompositionBuilder {
    pub fn new(name: impl Into<String>, duration: f64, frame_rate: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            frame_rate,
            width: 1920,
            height: 1080,
            layers: Vec::new(),
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn build(self) -> TrackResult<Composition> {
        let comp = Composition {
            name: self.name,
            duration: self.duration,
            frame_rate: self.frame_rate,
            width: self.width,
            height: self.height,
            layers: self.layers,
        };
        comp.validate()?;
        Ok(comp)
    }
}

pub struct LayerBuilder {
    name: String,
    kind: String,
    transform: LayerTransform,
    track_points: Option<Vec<TrackPoint>>,
    mesh_warp: Option<MeshWarp>,
    effects: Vec<Effect>,
}

impl LayerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DEFAULT_LAYER_KIND.to_string(),
            transform: LayerTransform::default(),
            track_points: None,
            mesh_warp: None,
            effects: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn position(mut self, a: Anim<Vec2>) -> Self {
        self.transform.position = a;
        self
    }

    pub fn anchor_point(mut self, a: Anim<Vec2>) -> Self {
        self.transform.anchor_point = a;
        self
    }

    /// Percent.
    pub fn scale(mut self, a: Anim<Vec2>) -> Self {
        self.transform.scale = a;
        self
    }

    /// Degrees.
    pub fn rotation(mut self, a: Anim<f64>) -> Self {
        self.transform.rotation = a;
        self
    }

    /// Percent.
    pub fn opacity(mut self, a: Anim<f64>) -> Self {
        self.transform.opacity = a;
        self
    }

    /// Degrees, sheared along `axis` (degrees).
    pub fn skew(mut self, skew: Anim<f64>, axis: Anim<f64>) -> Self {
        self.transform.skew = skew;
        self.transform.skew_axis = axis;
        self
    }

    /// Adds a point to the layer's tracker, creating the tracker if needed.
    pub fn track_point(
        mut self,
        name: impl Into<String>,
        attach: Anim<Point>,
        confidence: Anim<f64>,
    ) -> Self {
        self.track_points.get_or_insert_with(Vec::new).push(TrackPoint {
            name: name.into(),
            attach,
            confidence,
        });
        self
    }

    /// A tracker with no points is still a tracker.
    pub fn empty_tracker(mut self) -> Self {
        self.track_points.get_or_insert_with(Vec::new);
        self
    }

    /// `vertices` are row-major.
    pub fn mesh_warp(mut self, rows: u32, columns: u32, vertices: Vec<Anim<Point>>) -> Self {
        self.mesh_warp = Some(MeshWarp {
            rows,
            columns,
            vertices,
        });
        self
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corner_pin(mut self, corners: [Anim<Point>; 4]) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = corners;
        self.effects.push(Effect {
            name: CORNER_PIN_EFFECT.to_string(),
            kind: EffectKind::CornerPin(CornerPinEffect {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            }),
        });
        self
    }

    pub fn puppet(mut self, properties: Vec<PuppetProperty>) -> Self {
        self.effects.push(Effect {
            name: PUPPET_EFFECT.to_string(),
            kind: EffectKind::Puppet(PuppetEffect { properties }),
        });
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn build(self) -> TrackResult<Layer> {
        if self.name.trim().is_empty() {
            return Err(TrackError::validation("layer name must be non-empty"));
        }
        let layer = Layer {
            name: self.name,
            kind: self.kind,
            transform: self.transform,
            motion_tracker: self
                .track_points
                .map(|track_points| MotionTracker { track_points }),
            mesh_warp: self.mesh_warp,
            effects: self.effects,
        };
        layer.validate()?;
        Ok(layer)
    }
}

/// A positional puppet pin.
pub fn puppet_pin(name: impl Into<String>, position: Anim<Point>) -> PuppetProperty {
    PuppetProperty {
        name: name.into(),
        kind: POSITION_PIN_KIND.to_string(),
        position: Some(position),
    }
}
