//! Hilbertscope library - live phase-space view of a mono audio input
//!
//! Each frame tick captures one PCM block, turns it into its analytic
//! signal, smooths it, and projects it into pixel space for the renderer.

pub mod audio;
pub mod cli;
pub mod controls;
pub mod geometry;
pub mod params;
pub mod rendering;
pub mod scheduler;
pub mod snapshot;
