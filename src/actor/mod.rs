//! Actor Model: Message-passing glue between a stage and a renderer.
//!
//! A single layout actor owns the roster and the grid:
//! - **Stage side**: SDK callbacks (any thread) send [`StageEvent`]s
//! - **Layout Actor**: applies events, recomputes tiles
//! - **Render side**: receives full [`LayoutUpdate`] snapshots
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     StageEvent      ┌──────────────┐    LayoutUpdate    ┌──────────────┐
//! │ Stage / SDK  │ ─────────────────▶  │ Layout Actor │ ─────────────────▶ │   Renderer   │
//! └──────────────┘                     └──────────────┘                    └──────────────┘
//!                                        owns Roster +
//!                                         StageLayout
//! ```

mod messages;
mod stage;
mod engine;

pub use messages::{ConnectionState, LayoutUpdate, ParticipantInfo, StageEvent, Tile};
pub use engine::{Engine, EngineConfig};
