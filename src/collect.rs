use crate::{
    core::FrameTiming,
    error::TrackResult,
    features::LayerFeatures,
    record::{CompositionRecord, LayerRecord},
    sample::sample_frame,
    scene::{CompositionSource, LayerSource},
};

/// Samples every frame of `layer` on the composition's grid.
///
/// Capabilities are probed once; frames come out ascending from 0 to
/// `timing.total_frames()` inclusive.
#[tracing::instrument(skip(layer), fields(layer = layer.name(), index = layer.index()))]
pub fn collect_layer(layer: &dyn LayerSource, timing: FrameTiming) -> TrackResult<LayerRecord> {
    let features = LayerFeatures::probe(layer);

    let mut frames = Vec::with_capacity(usize::try_from(timing.frame_count()).unwrap_or(0));
    for (frame, time) in timing.frames() {
        frames.push(sample_frame(layer, &features, frame, time)?);
    }
    tracing::debug!(frames = frames.len(), "layer sampled");

    Ok(LayerRecord {
        name: layer.name().to_string(),
        index: layer.index(),
        kind: layer.kind().to_string(),
        frames,
    })
}

/// Assembles the full document for `comp`, layers in index order.
///
/// Composition metadata is read once, before any layer is visited. The first
/// read failure aborts the whole traversal; no partial record is returned.
#[tracing::instrument(skip(comp), fields(comp = tracing::field::Empty))]
pub fn collect_composition(comp: &dyn CompositionSource) -> TrackResult<CompositionRecord> {
    let name = comp.name().to_string();
    tracing::Span::current().record("comp", name.as_str());
    let duration = comp.duration()?;
    let frame_rate = comp.frame_rate()?;
    let width = comp.width();
    let height = comp.height();
    let timing = FrameTiming::new(duration, frame_rate)?;

    let layers = comp
        .layers()?
        .iter()
        .map(|layer| collect_layer(layer.as_ref(), timing))
        .collect::<TrackResult<Vec<_>>>()?;

    tracing::debug!(
        layers = layers.len(),
        frames_per_layer = timing.frame_count(),
        "composition collected"
    );

    Ok(CompositionRecord {
        name,
        duration,
        frame_rate,
        width,
        height,
        layers,
    })
}
