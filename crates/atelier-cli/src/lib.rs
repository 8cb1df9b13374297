//! CLI logic for the Atelier canvas tool.
//!
//! Loads an artifact manifest, runs the layout engine, and writes an SVG
//! rendering or a JSON layout dump.

pub mod error_adapter;

mod args;
mod config;
mod store;

pub use args::{Args, FormatArg, GroupArg, ModeArg, ViewportArg};

use std::fs;

use log::info;
use serde::Serialize;

use atelier::{
    AtelierError, CanvasEngine,
    artifact::{Artifact, ArtifactSet},
    layout::{LayoutMode, LayoutResult, grid::GroupingMode},
    route::ConnectionEdge,
    state::{PersistedState, StateStore},
};

use store::JsonFileStore;

/// Machine-readable output for `--format json`.
#[derive(Serialize)]
struct LayoutDump<'a> {
    layout: &'a LayoutResult,
    edges: &'a [ConnectionEdge],
}

/// Run the Atelier CLI application
///
/// Loads the manifest and optional persisted state, computes the layout for
/// the requested mode, and writes the result to the output file.
///
/// # Errors
///
/// Returns `AtelierError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Manifest parsing errors
/// - State store errors
pub fn run(args: &Args) -> Result<(), AtelierError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing artifact manifest"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and parse the manifest
    let manifest = fs::read_to_string(&args.input)?;
    let artifacts: Vec<Artifact> = serde_json::from_str(&manifest)
        .map_err(|err| AtelierError::Manifest(err.to_string()))?;
    let set = ArtifactSet::new(artifacts, 0);
    info!(artifacts = set.len(); "Manifest loaded");

    // Load persisted state when a state file was given; its custom position
    // overrides apply to routing and export
    let mut store = args.state.as_ref().map(JsonFileStore::new);
    let mut persisted = match store.as_mut() {
        Some(store) => store.load()?.unwrap_or_default(),
        None => PersistedState::default(),
    };

    let mode = LayoutMode::from(args.mode);
    let grouping = GroupingMode::from(args.group);
    let viewport = args.viewport.into();

    // Compute the layout
    let engine = CanvasEngine::new(app_config);
    let layout = engine.compute_layout(&set, mode, grouping, viewport);
    if layout.is_empty() {
        info!("Artifact set is empty; writing an empty canvas");
    }

    let overrides = persisted.custom_positions().clone();
    match args.format {
        FormatArg::Svg => {
            let svg = engine.render_svg(&set, &layout, &overrides, viewport);
            fs::write(&args.output, svg)?;
        }
        FormatArg::Json => {
            let edges = engine.route(&set, &layout, &overrides, viewport);
            let dump = LayoutDump {
                layout: &layout,
                edges: &edges,
            };
            let json = serde_json::to_string_pretty(&dump)
                .map_err(|err| AtelierError::Export(Box::new(err)))?;
            fs::write(&args.output, json)?;
        }
    }

    // Record the modes used back into the state file
    if let Some(store) = store.as_mut() {
        persisted.set_layout_mode(mode);
        persisted.set_grouping_mode(grouping);
        store.save(&persisted)?;
    }

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
