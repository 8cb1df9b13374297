//! Command-line argument definitions for the Atelier CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, layout and grouping
//! modes, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use atelier::{
    config::ViewportMode,
    layout::{LayoutMode, grid::GroupingMode},
};

/// Command-line arguments for the Atelier canvas tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the artifact manifest (JSON)
    #[arg(help = "Path to the artifact manifest (JSON)")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Layout strategy
    #[arg(short, long, value_enum, default_value_t = ModeArg::Grid)]
    pub mode: ModeArg,

    /// Grouping rule for grid layout
    #[arg(short, long, value_enum, default_value_t = GroupArg::Prefix)]
    pub group: GroupArg,

    /// Responsive preview mode for page frames
    #[arg(long, value_enum, default_value_t = ViewportArg::Desktop)]
    pub viewport: ViewportArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Svg)]
    pub format: FormatArg,

    /// Path to a persisted state file (JSON); custom positions and modes
    /// stored there apply unless overridden by flags
    #[arg(short, long)]
    pub state: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Layout strategy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Category grid with forced row breaks
    Grid,
    /// Relationship-graph layout
    Flow,
}

impl From<ModeArg> for LayoutMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Grid => LayoutMode::Grid,
            ModeArg::Flow => LayoutMode::Flow,
        }
    }
}

/// Grouping rule flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupArg {
    /// Numeric filename prefix
    Prefix,
    /// Folder path
    Folder,
    /// First tag
    Tag,
}

impl From<GroupArg> for GroupingMode {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Prefix => GroupingMode::Prefix,
            GroupArg::Folder => GroupingMode::Folder,
            GroupArg::Tag => GroupingMode::Tag,
        }
    }
}

/// Responsive preview mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewportArg {
    Desktop,
    Tablet,
    Mobile,
}

impl From<ViewportArg> for ViewportMode {
    fn from(arg: ViewportArg) -> Self {
        match arg {
            ViewportArg::Desktop => ViewportMode::Desktop,
            ViewportArg::Tablet => ViewportMode::Tablet,
            ViewportArg::Mobile => ViewportMode::Mobile,
        }
    }
}

/// Output format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// SVG rendering of frames and connections
    Svg,
    /// Machine-readable layout dump
    Json,
}
