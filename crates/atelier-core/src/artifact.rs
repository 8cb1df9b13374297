//! The artifact data model.
//!
//! Artifacts are the visual units on the canvas: generated pages, components,
//! and groups, together with the relationships declared between them. The
//! whole set is produced by an external build step and replaced wholesale on
//! each rebuild; it is never mutated during a layout pass.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{geometry::Size, identifier::ArtifactId};

/// The kind of one artifact on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    #[default]
    Page,
    Component,
    Group,
}

impl FromStr for ArtifactKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(ArtifactKind::Page),
            "component" => Ok(ArtifactKind::Component),
            "group" => Ok(ArtifactKind::Group),
            _ => Err("Invalid artifact kind"),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Page => "page",
            ArtifactKind::Component => "component",
            ArtifactKind::Group => "group",
        };
        write!(f, "{name}")
    }
}

/// The relationships one artifact declares against others.
///
/// Targets may dangle: the manifest can reference artifacts that do not
/// exist in the current set. Consumers filter against the live set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationships {
    next: Vec<ArtifactId>,
    prev: Vec<ArtifactId>,
    parent: Vec<ArtifactId>,
    children: Vec<ArtifactId>,
    related: Vec<ArtifactId>,
}

impl Relationships {
    /// Sequential successors, in declaration order.
    pub fn next(&self) -> &[ArtifactId] {
        &self.next
    }

    /// Sequential predecessors, in declaration order.
    pub fn prev(&self) -> &[ArtifactId] {
        &self.prev
    }

    /// Declared parents.
    pub fn parent(&self) -> &[ArtifactId] {
        &self.parent
    }

    /// Hierarchical children, in declaration order.
    pub fn children(&self) -> &[ArtifactId] {
        &self.children
    }

    /// Loosely related artifacts.
    pub fn related(&self) -> &[ArtifactId] {
        &self.related
    }

    /// Sets the sequential successors (builder style).
    pub fn with_next(mut self, next: Vec<ArtifactId>) -> Self {
        self.next = next;
        self
    }

    /// Sets the hierarchical children (builder style).
    pub fn with_children(mut self, children: Vec<ArtifactId>) -> Self {
        self.children = children;
        self
    }

    /// Sets the related artifacts (builder style).
    pub fn with_related(mut self, related: Vec<ArtifactId>) -> Self {
        self.related = related;
        self
    }
}

/// One visual unit on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    id: ArtifactId,
    #[serde(default)]
    kind: ArtifactKind,
    #[serde(default)]
    relationships: Relationships,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    size_hint: Option<Size>,
}

impl Artifact {
    /// Creates an artifact with no relationships, tags, or size hint.
    pub fn new(id: ArtifactId, kind: ArtifactKind) -> Self {
        Self {
            id,
            kind,
            relationships: Relationships::default(),
            tags: Vec::new(),
            size_hint: None,
        }
    }

    /// The artifact identity.
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// The artifact kind.
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Declared relationships.
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Declared tags, in manifest order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Intrinsic size hint, if the producer declared one.
    pub fn size_hint(&self) -> Option<Size> {
        self.size_hint
    }

    /// Replaces the relationships (builder style).
    pub fn with_relationships(mut self, relationships: Relationships) -> Self {
        self.relationships = relationships;
        self
    }

    /// Replaces the tags (builder style).
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the intrinsic size hint (builder style).
    pub fn with_size_hint(mut self, size: Size) -> Self {
        self.size_hint = Some(size);
        self
    }
}

/// An insertion-ordered snapshot of the current artifact set.
///
/// Replaced wholesale on each rebuild. The `generation` counter orders
/// snapshots so that a layout result computed from an older snapshot can be
/// recognized and discarded (last-write-wins).
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    artifacts: IndexMap<ArtifactId, Artifact>,
    generation: u64,
}

impl ArtifactSet {
    /// Creates a set from artifacts in manifest order.
    ///
    /// A later artifact with a duplicate id replaces the earlier one without
    /// disturbing its position in the order.
    pub fn new(artifacts: impl IntoIterator<Item = Artifact>, generation: u64) -> Self {
        let artifacts = artifacts
            .into_iter()
            .map(|artifact| (artifact.id(), artifact))
            .collect();
        Self {
            artifacts,
            generation,
        }
    }

    /// The snapshot generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of artifacts in the set.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if the set holds no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Returns true if `id` names an artifact in this set.
    pub fn contains(&self, id: ArtifactId) -> bool {
        self.artifacts.contains_key(&id)
    }

    /// Looks up an artifact by identity.
    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.get(&id)
    }

    /// Iterates artifacts in set order.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }
}
