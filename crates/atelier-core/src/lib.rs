//! Atelier Core Types and Data Model
//!
//! This crate provides the foundational types for the Atelier canvas engine.
//! It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::ArtifactId`])
//! - **Geometry**: Content-space geometric types ([`geometry`] module)
//! - **Artifacts**: The artifact and relationship model ([`artifact`] module)
//! - **Transform**: The pan/zoom mapping between content and screen space
//!   ([`transform::Transform`])

pub mod artifact;
pub mod geometry;
pub mod identifier;
pub mod transform;
