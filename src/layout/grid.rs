//! Grid: Partition a container into one tile per participant.
//!
//! The grid is driven by a [`TemplateTable`]. In a portrait container
//! (`height > width`) each template row is a horizontal band split into
//! equal columns. Otherwise the template is applied transposed: rows
//! become vertical bands split into equal-height cells. Tiles are inset by
//! half the padding on every edge so neighbours are separated by exactly
//! one padding and the outer border carries half of one.

use super::rect::Rect;
use super::template::TemplateTable;
use crate::error::LayoutError;

/// Which way template rows run inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Rows are stacked top to bottom (portrait containers).
    Vertical,
    /// Rows run left to right as columns (landscape and square containers).
    Horizontal,
}

impl Orientation {
    /// Pick the orientation for a container.
    #[inline]
    pub fn for_size(width: f64, height: f64) -> Self {
        if height > width {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }
}

/// Container dimensions and inter-tile padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Container width.
    pub width: f64,
    /// Container height.
    pub height: f64,
    /// Gutter between adjacent tiles.
    pub padding: f64,
}

impl Viewport {
    /// Create a viewport, rejecting negative or non-finite values.
    pub fn new(width: f64, height: f64, padding: f64) -> Result<Self, LayoutError> {
        let viewport = Self { width, height, padding };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Check every field is finite and non-negative.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        check_dimension("padding", self.padding)
    }

    /// The whole container as a rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Orientation the grid takes inside this viewport.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation::for_size(self.width, self.height)
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidInput { field, value })
    }
}

/// Grid calculator bound to a template table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLayout {
    table: TemplateTable,
}

impl GridLayout {
    /// Create a calculator over `table`.
    pub const fn new(table: TemplateTable) -> Self {
        Self { table }
    }

    /// The template table in use.
    pub const fn table(&self) -> &TemplateTable {
        &self.table
    }

    /// Largest participant count this calculator can place.
    pub fn max_participants(&self) -> usize {
        self.table.max_participants()
    }

    /// Compute one tile per participant, in template row-major order.
    pub fn frames(&self, participant_count: usize, viewport: Viewport) -> Result<Vec<Rect>, LayoutError> {
        viewport.validate()?;
        let Some(template) = self.table.template(participant_count)? else {
            return Ok(Vec::new());
        };

        // Lay out as if portrait, transposing in and out for landscape.
        let orientation = viewport.orientation();
        let container = match orientation {
            Orientation::Vertical => viewport.bounds(),
            Orientation::Horizontal => viewport.bounds().transpose(),
        };
        let half_padding = viewport.padding / 2.0;

        let mut frames = Vec::with_capacity(participant_count);
        for (band, &columns) in container.split_rows(template.len()).zip(template) {
            for cell in band.split_columns(columns) {
                let tile = cell.inset(half_padding);
                frames.push(match orientation {
                    Orientation::Vertical => tile,
                    Orientation::Horizontal => tile.transpose(),
                });
            }
        }

        tracing::trace!(
            participant_count,
            width = viewport.width,
            height = viewport.height,
            ?orientation,
            "computed grid frames"
        );
        Ok(frames)
    }
}

/// Compute participant tiles for a `width` x `height` container using the
/// standard template table.
///
/// `participant_count` is signed so that callers passing through untrusted
/// roster sizes get [`LayoutError::InvalidInput`] rather than a wrap-around.
///
/// ```
/// let frames = stagegrid::calculate_frames(4, 400.0, 400.0, 0.0).unwrap();
/// assert_eq!(frames.len(), 4);
/// assert_eq!(frames[0], stagegrid::Rect::new(0.0, 0.0, 200.0, 200.0));
/// ```
pub fn calculate_frames(
    participant_count: i64,
    width: f64,
    height: f64,
    padding: f64,
) -> Result<Vec<Rect>, LayoutError> {
    let count = usize::try_from(participant_count).map_err(|_| LayoutError::InvalidInput {
        field: "participant_count",
        value: participant_count as f64,
    })?;
    let viewport = Viewport::new(width, height, padding)?;
    GridLayout::default().frames(count, viewport)
}
