//! Export of computed layouts for inspection.

pub mod svg;
