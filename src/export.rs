//! JSON persistence for collected documents.

use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    error::{TrackError, TrackResult},
    record::CompositionRecord,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Two-space indented output; compact otherwise.
    pub pretty: bool,
    /// Replace an existing file at the destination.
    pub overwrite: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            overwrite: true,
        }
    }
}

pub fn to_json_string(record: &CompositionRecord, opts: &ExportOptions) -> TrackResult<String> {
    let s = if opts.pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(s)
}

pub fn from_json_str(s: &str) -> TrackResult<CompositionRecord> {
    Ok(serde_json::from_str(s)?)
}

pub fn ensure_parent_dir(path: &Path) -> TrackResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Writes `record` to `path`.
///
/// The document is written to a sibling `.partial` file first and renamed over
/// `path` once complete, so `path` never holds a truncated document.
#[tracing::instrument(skip(record), fields(comp = %record.name))]
pub fn write_json(record: &CompositionRecord, path: &Path, opts: &ExportOptions) -> TrackResult<()> {
    if !opts.overwrite && path.exists() {
        return Err(TrackError::validation(format!(
            "output '{}' already exists",
            path.display()
        )));
    }

    let json = to_json_string(record, opts)?;
    ensure_parent_dir(path)?;

    let tmp = partial_path(path);
    let written = write_file(&tmp, json.as_bytes()).and_then(|()| {
        std::fs::rename(&tmp, path)
            .with_context(|| format!("failed to move output into '{}'", path.display()))
    });
    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(err.into());
    }

    tracing::info!(path = %path.display(), bytes = json.len(), "tracking data written");
    Ok(())
}

pub fn read_json(path: &Path) -> TrackResult<CompositionRecord> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    from_json_str(&s)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut f = std::fs::File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    f.write_all(bytes)
        .and_then(|()| f.sync_all())
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}
