//! Layout module: Participant grid calculation.
//!
//! Grids are computed once per roster or container change. There is no
//! per-frame work: readers get a flat `Vec<Region>`.

mod grid;
mod rect;
mod region;
mod template;

pub use grid::{calculate_frames, GridLayout, Orientation, Viewport};
pub use rect::Rect;
pub use region::{Region, StageLayout, TileId};
pub use template::{TemplateTable, MAX_PARTICIPANTS, STANDARD_TEMPLATES};
