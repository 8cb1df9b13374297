//! Category-grid layout planner.
//!
//! Arranges the flat artifact list into a grid grouped by category. Every
//! group starts a new row: spacer entries pad the plan to a row boundary
//! before the group header and again before the group's first artifact, so
//! both land at column 0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use atelier_core::{
    artifact::{Artifact, ArtifactSet},
    geometry::{Point, Size},
    identifier::ArtifactId,
};

use crate::{config::LayoutConfig, layout::HeaderLabel};

/// Vertical distance between a header label and the row it introduces.
const HEADER_LIFT: f32 = 16.0;

/// How artifacts are grouped into grid sections.
///
/// A closed set of grouping rules; each variant has one pure key function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Group pages by their numeric filename prefix (`01-home` → `01`).
    #[default]
    Prefix,
    /// Group components by folder path (`marketing/hero` → `marketing`).
    Folder,
    /// Group artifacts by their first tag.
    Tag,
}

/// One slot in the ordered grid plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEntry {
    /// A group header occupying the first slot of its row.
    Header(String),
    /// An empty slot inserted to force a row break.
    Spacer,
    /// An artifact frame.
    File(ArtifactId),
}

/// The ordered plan produced by [`GridPlanner::plan`].
#[derive(Debug)]
pub struct GridPlan {
    entries: Vec<PlanEntry>,
    index_of: IndexMap<ArtifactId, usize>,
    frames_per_row: usize,
}

impl GridPlan {
    /// The ordered plan entries.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Number of slots per row.
    pub fn frames_per_row(&self) -> usize {
        self.frames_per_row
    }

    /// The plan index of an artifact, if it appears in the plan.
    pub fn index_of(&self, id: ArtifactId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// The column a plan index falls in.
    pub fn column_of(&self, index: usize) -> usize {
        index % self.frames_per_row
    }

    /// Computes the content-space position of a plan slot.
    ///
    /// The cell grows to fit artifacts larger than the default frame.
    pub fn position_for_index(&self, index: usize, size: Size, config: &LayoutConfig) -> Point {
        let col = (index % self.frames_per_row) as f32;
        let row = (index / self.frames_per_row) as f32;
        let cell = config.frame_size().max(size);
        Point::new(
            col * (cell.width() + config.spacing()),
            row * (cell.height() + config.spacing()) + config.header_allowance(),
        )
    }

    /// Materializes positions for every file entry and every header.
    pub fn positions(
        &self,
        sizes: &IndexMap<ArtifactId, Size>,
        config: &LayoutConfig,
    ) -> (IndexMap<ArtifactId, Point>, Vec<HeaderLabel>) {
        let mut positions = IndexMap::new();
        let mut headers = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            match entry {
                PlanEntry::File(id) => {
                    let size = sizes.get(id).copied().unwrap_or_default();
                    positions.insert(*id, self.position_for_index(index, size, config));
                }
                PlanEntry::Header(text) => {
                    let slot = self.position_for_index(index, Size::default(), config);
                    let lifted = Point::new(slot.x(), slot.y() - HEADER_LIFT);
                    headers.push(HeaderLabel::new(text.clone(), lifted));
                }
                PlanEntry::Spacer => {}
            }
        }

        (positions, headers)
    }
}

/// Plans the category grid for one artifact set.
pub struct GridPlanner<'a> {
    config: &'a LayoutConfig,
    mode: GroupingMode,
}

impl<'a> GridPlanner<'a> {
    /// Creates a planner for the given grouping mode.
    pub fn new(config: &'a LayoutConfig, mode: GroupingMode) -> Self {
        Self { config, mode }
    }

    /// Produces the ordered plan for `set`.
    ///
    /// Groups are ordered by the mode's sort rule; artifacts sort by name
    /// within their group. Artifacts without a group key fall into a
    /// synthetic trailing group.
    pub fn plan(&self, set: &ArtifactSet) -> GridPlan {
        let frames_per_row = self.config.frames_per_row().max(1);

        let mut grouped: IndexMap<String, Vec<&Artifact>> = IndexMap::new();
        let mut ungrouped: Vec<&Artifact> = Vec::new();
        for artifact in set.iter() {
            match self.group_key(artifact) {
                Some(key) => grouped.entry(key).or_default().push(artifact),
                None => ungrouped.push(artifact),
            }
        }

        let mut keys: Vec<String> = grouped.keys().cloned().collect();
        self.sort_group_keys(&mut keys);

        let mut entries = Vec::new();
        let mut index_of = IndexMap::new();
        let mut emit_group = |label: String, mut artifacts: Vec<&Artifact>| {
            if artifacts.is_empty() {
                return;
            }
            artifacts.sort_by_key(|artifact| artifact.id().name());

            pad_to_row(&mut entries, frames_per_row);
            entries.push(PlanEntry::Header(label));
            pad_to_row(&mut entries, frames_per_row);
            for artifact in artifacts {
                index_of.insert(artifact.id(), entries.len());
                entries.push(PlanEntry::File(artifact.id()));
            }
        };

        for key in keys {
            let artifacts = grouped.shift_remove(&key).unwrap_or_default();
            emit_group(key, artifacts);
        }
        emit_group("ungrouped".to_owned(), ungrouped);

        GridPlan {
            entries,
            index_of,
            frames_per_row,
        }
    }

    /// The grouping key for one artifact, or `None` when unmatched.
    fn group_key(&self, artifact: &Artifact) -> Option<String> {
        match self.mode {
            GroupingMode::Prefix => numeric_prefix(&artifact.id().name()),
            GroupingMode::Folder => Some(folder_of(&artifact.id().name())),
            GroupingMode::Tag => artifact.tags().first().cloned(),
        }
    }

    fn sort_group_keys(&self, keys: &mut [String]) {
        match self.mode {
            GroupingMode::Prefix => {
                keys.sort_by(|a, b| {
                    let a_num = a.parse::<u64>().unwrap_or(u64::MAX);
                    let b_num = b.parse::<u64>().unwrap_or(u64::MAX);
                    a_num.cmp(&b_num).then_with(|| a.cmp(b))
                });
            }
            GroupingMode::Folder => {
                // "default" sorts ahead of every named folder
                keys.sort_by(|a, b| {
                    let a_default = a == "default";
                    let b_default = b == "default";
                    b_default.cmp(&a_default).then_with(|| a.cmp(b))
                });
            }
            GroupingMode::Tag => keys.sort(),
        }
    }
}

/// Pads with spacers until the next entry lands at column 0.
fn pad_to_row(entries: &mut Vec<PlanEntry>, frames_per_row: usize) {
    while entries.len() % frames_per_row != 0 {
        entries.push(PlanEntry::Spacer);
    }
}

/// The leading decimal digits of a name, or `None` if there are none.
fn numeric_prefix(name: &str) -> Option<String> {
    let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// The folder part of a path-like name; names without a path separator fall
/// into the `default` group.
fn folder_of(name: &str) -> String {
    match name.rfind('/') {
        Some(idx) => name[..idx].to_owned(),
        None => "default".to_owned(),
    }
}
