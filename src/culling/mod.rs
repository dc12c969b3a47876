//! Geometry Culling
//!
//! Render-distance box culling used by the pipeline to reject off-screen
//! world geometry before draw submission.

pub mod box_culler;

pub use box_culler::{BoxCuller, BoxIntersection};
