// lib.rs - Threaded Game of Life on a torus
//
// The grid is cut into one band of rows or columns per worker thread. Every
// round each worker writes its band into the next buffer, the workers meet at
// a barrier, fold their alive-cell deltas into a shared counter, meet again
// while the buffers swap, and optionally let worker 0 render the result.

pub mod barrier;
pub mod cli;
pub mod config;
pub mod counter;
pub mod error;
pub mod grid;
pub mod partition;
pub mod patterns;
pub mod render;
pub mod rule;
pub mod simulation;
mod worker;

pub use config::{RunConfig, WorldFile};
pub use error::{GolError, Result};
pub use grid::{Board, GridState};
pub use partition::{Axis, Region, partition};
pub use render::{Frame, NullRenderer, Renderer, TextRenderer};
pub use simulation::{RunSummary, Simulation};
pub use worker::RENDER_REGION;
