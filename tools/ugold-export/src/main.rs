//! ugold-export - legacy vertex-mesh export tool
//!
//! Converts animated-mesh scene snapshots to the legacy binary pair
//! (_d.3d geometry, _a.3d vertex animation) plus the .uc script stub.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Use modules from library
use ugold_export::animation::FrameRange;
use ugold_export::error::ExportError;
use ugold_export::export::{self, ExportConfig, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use ugold_export::{manifest, scene};

#[derive(Parser)]
#[command(name = "ugold-export")]
#[command(about = "Legacy vertex-mesh asset export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all models from a manifest file
    Build {
        /// Path to models.toml manifest
        #[arg(default_value = "models.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to models.toml manifest
        #[arg(default_value = "models.toml")]
        manifest: PathBuf,
    },

    /// Export a single scene snapshot
    Export {
        /// Input scene snapshot (JSON)
        scene: PathBuf,

        /// Output base path, producing <base>_d.3d, <base>_a.3d, <base>.uc
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model scale applied before quantization
        #[arg(short, long, default_value_t = DEFAULT_SCALE)]
        scale: f32,

        /// Inclusive frame range override, e.g. 1:30 (defaults to the scene's)
        #[arg(short, long, value_parser = parse_frame_range)]
        frames: Option<FrameRange>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn parse_frame_range(s: &str) -> std::result::Result<FrameRange, String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected start:end, got '{}'", s))?;
    let start: i32 = start.trim().parse().map_err(|_| "bad start frame")?;
    let end: i32 = end.trim().parse().map_err(|_| "bad end frame")?;
    if end < start {
        return Err(format!("frame range {}:{} is empty", start, end));
    }
    if end as i64 - start as i64 + 1 > u16::MAX as i64 {
        return Err("frame range spans more than 65535 frames".to_string());
    }
    Ok(FrameRange::new(start, end))
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; --verbose raises the default level to DEBUG
    let verbose = matches!(
        cli.command,
        Commands::Build { verbose: true, .. } | Commands::Export { verbose: true, .. }
    );
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(err) = run(cli) {
        tracing::error!("{:#}", err);
        let status = err
            .downcast_ref::<ExportError>()
            .map(ExportError::exit_code)
            .unwrap_or(1);
        std::process::exit(status);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            manifest, output, ..
        } => {
            tracing::info!("Building models from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Export {
            scene: scene_path,
            output,
            scale,
            frames,
            ..
        } => {
            anyhow::ensure!(
                (MIN_SCALE..=MAX_SCALE).contains(&scale),
                "scale {} outside [{}, {}]",
                scale,
                MIN_SCALE,
                MAX_SCALE
            );

            let base = output.unwrap_or_else(|| scene_path.with_extension(""));
            let name = base
                .file_name()
                .and_then(|n| n.to_str())
                .context("output base path has no usable file name")?
                .to_string();
            tracing::info!("Converting {:?} -> {:?}", scene_path, base);

            let doc = scene::load_scene(&scene_path)?;
            let range = frames.unwrap_or_else(|| FrameRange::new(doc.frame_start, doc.frame_end));

            let bundle = export::export_scene(&doc, &name, range, &ExportConfig { scale })?;
            export::write_bundle(&base, &bundle)?;
            tracing::info!("Done! {} frames exported", bundle.frame_count);
        }
    }

    Ok(())
}
