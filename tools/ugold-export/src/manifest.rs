//! Manifest parsing and build orchestration
//!
//! Parses models.toml and coordinates batch exports.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::animation::FrameRange;
use crate::export::{self, ExportConfig, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use crate::scene;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub models: HashMap<String, ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Models/")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ModelEntry {
    Simple(PathBuf),
    Detailed {
        scene: PathBuf,
        #[serde(default)]
        scale: Option<f32>,
        #[serde(default)]
        frames: Option<FrameSpec>,
    },
}

/// Inclusive frame range override for one model
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct FrameSpec {
    pub start: i32,
    pub end: i32,
}

impl ModelEntry {
    pub fn scene_path(&self) -> &Path {
        match self {
            ModelEntry::Simple(p) => p,
            ModelEntry::Detailed { scene, .. } => scene,
        }
    }

    pub fn scale(&self) -> f32 {
        match self {
            ModelEntry::Simple(_) => DEFAULT_SCALE,
            ModelEntry::Detailed { scale, .. } => scale.unwrap_or(DEFAULT_SCALE),
        }
    }

    pub fn frames(&self) -> Option<FrameSpec> {
        match self {
            ModelEntry::Simple(_) => None,
            ModelEntry::Detailed { frames, .. } => *frames,
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    for (name, entry) in &manifest.models {
        if !entry.scene_path().exists() {
            anyhow::bail!(
                "Model '{}' scene snapshot not found: {:?}",
                name,
                entry.scene_path()
            );
        }
        let scale = entry.scale();
        if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            anyhow::bail!(
                "Model '{}' scale {} outside [{}, {}]",
                name,
                scale,
                MIN_SCALE,
                MAX_SCALE
            );
        }
        if let Some(frames) = entry.frames() {
            if frames.end < frames.start {
                anyhow::bail!(
                    "Model '{}' frame range {}..{} is empty",
                    name,
                    frames.start,
                    frames.end
                );
            }
            if frames.end as i64 - frames.start as i64 + 1 > u16::MAX as i64 {
                anyhow::bail!(
                    "Model '{}' frame range spans more than 65535 frames",
                    name
                );
            }
        }
    }
    Ok(())
}

/// Build all models from a manifest
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<()> {
    validate(manifest)?;

    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {:?}", output_dir))?;

    // Stable build order regardless of map iteration
    let mut names: Vec<&String> = manifest.models.keys().collect();
    names.sort();

    for name in names {
        let entry = &manifest.models[name];
        let base = output_dir.join(name);
        tracing::info!("Exporting model: {} -> {:?}", name, base);

        let doc = scene::load_scene(entry.scene_path())?;
        let range = match entry.frames() {
            Some(spec) => FrameRange::new(spec.start, spec.end),
            None => FrameRange::new(doc.frame_start, doc.frame_end),
        };
        let config = ExportConfig {
            scale: entry.scale(),
        };

        let bundle = export::export_scene(&doc, name, range, &config)?;
        export::write_bundle(&base, &bundle)?;
    }

    Ok(())
}
