//! View components for the CanSight application.

pub mod chart;
pub mod formatting;
pub mod graphs;
pub mod header;
pub mod theme;
