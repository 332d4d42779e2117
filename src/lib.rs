//! # Stagegrid
//!
//! Participant grid layouts for multi-party video stages.
//!
//! Stagegrid splits a container into one tile per participant using a
//! fixed table of row/column templates, and keeps that grid in sync with a
//! live participant roster.
//!
//! ## Core Concepts
//!
//! - **Templates**: per-count row lists, e.g. `[1, 2]` for three people
//! - **Orientation**: portrait containers stack rows, landscape ones transpose them
//! - **Roster**: ordered participants with the local user pinned first
//! - **Actor model**: stage events in, full layout snapshots out
//!
//! ## Example
//!
//! ```rust
//! use stagegrid::{calculate_frames, Rect};
//!
//! // Three participants in a 300x200 landscape container
//! let frames = calculate_frames(3, 300.0, 200.0, 0.0).unwrap();
//! assert_eq!(frames[0], Rect::new(0.0, 0.0, 150.0, 200.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod error;
pub mod ffi;
pub mod layout;
pub mod roster;

// Re-exports for convenience
pub use actor::{ConnectionState, Engine, EngineConfig, LayoutUpdate, ParticipantInfo, StageEvent, Tile};
pub use error::{LayoutError, RosterError};
pub use layout::{calculate_frames, GridLayout, Orientation, Rect, Region, StageLayout, TemplateTable, TileId, Viewport, MAX_PARTICIPANTS};
pub use roster::{ChangeKind, MediaKind, MediaKinds, Participant, PublishState, Roster, RosterChange, StreamInfo, SubscribeState};
