//! Block statistics used to score candidate placements

/// Per-block mean colors and the filler-to-skeleton cost matrix
pub mod cost;
