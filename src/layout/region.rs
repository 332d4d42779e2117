//! Region and StageLayout: Cached participant tiles with dirty tracking.

use super::grid::{GridLayout, Viewport};
use super::rect::Rect;
use crate::error::LayoutError;

/// Identifier for a tile: its slot in the current grid, in template order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl TileId {
    /// Create a new tile ID.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }
}

/// A participant tile with position and dirty tracking.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Unique identifier.
    pub id: TileId,
    /// Position and size.
    pub rect: Rect,
    /// Dirty generation (incremented when the rectangle moves).
    pub dirty_generation: u64,
}

impl Region {
    /// Create a new region.
    pub const fn new(id: TileId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            dirty_generation: 0,
        }
    }

    /// Mark the region as dirty.
    pub fn mark_dirty(&mut self) {
        self.dirty_generation += 1;
    }

    /// Check whether the region changed since the last [`StageLayout::clear_dirty`].
    pub const fn is_dirty(&self) -> bool {
        self.dirty_generation > 0
    }
}

/// The current grid of participant tiles for one container.
///
/// Regions are recomputed only when the viewport or participant count
/// changes; readers get a flat list with no recalculation.
#[derive(Clone, Debug)]
pub struct StageLayout {
    grid: GridLayout,
    viewport: Viewport,
    regions: Vec<Region>,
    /// Bumped on every recompute.
    generation: u64,
}

impl StageLayout {
    /// Create an empty layout for the given viewport.
    pub fn new(grid: GridLayout, viewport: Viewport) -> Result<Self, LayoutError> {
        viewport.validate()?;
        Ok(Self {
            grid,
            viewport,
            regions: Vec::new(),
            generation: 0,
        })
    }

    /// Current viewport.
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check if there are no tiles.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Recompute count.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Largest tile count the underlying grid supports.
    pub fn capacity(&self) -> usize {
        self.grid.max_participants()
    }

    /// All tiles in display order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Get a tile by ID.
    pub fn get(&self, id: TileId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    /// Tiles whose rectangle changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn dirty_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.is_dirty())
    }

    /// Clear all dirty flags.
    pub fn clear_dirty(&mut self) {
        for region in &mut self.regions {
            region.dirty_generation = 0;
        }
    }

    /// Resize the container and recompute tile positions.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        let viewport = Viewport::new(width, height, self.viewport.padding)?;
        let frames = self.grid.frames(self.regions.len(), viewport)?;
        self.viewport = viewport;
        self.apply(frames);
        Ok(())
    }

    /// Change the number of tiles and recompute.
    ///
    /// On error the previous tiles are left untouched.
    pub fn set_participant_count(&mut self, count: usize) -> Result<(), LayoutError> {
        let frames = self.grid.frames(count, self.viewport)?;
        self.apply(frames);
        Ok(())
    }

    fn apply(&mut self, frames: Vec<Rect>) {
        self.generation += 1;
        self.regions.truncate(frames.len());
        for (index, rect) in frames.into_iter().enumerate() {
            match self.regions.get_mut(index) {
                Some(region) if region.rect == rect => {}
                Some(region) => {
                    region.rect = rect;
                    region.mark_dirty();
                }
                None => {
                    let mut region = Region::new(TileId::new(index), rect);
                    region.mark_dirty();
                    self.regions.push(region);
                }
            }
        }
        tracing::debug!(
            generation = self.generation,
            tiles = self.regions.len(),
            dirty = self.dirty_regions().count(),
            "stage layout recomputed"
        );
    }
}
