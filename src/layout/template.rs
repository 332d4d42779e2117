//! Template tables: how many rows a grid has and how many columns each row holds.
//!
//! Entry `n - 1` of a table describes the grid for `n` participants. Each
//! entry lists one column count per row, so `[1, 2]` is a full-width tile
//! above two half-width tiles.

use std::borrow::Cow;

use crate::error::LayoutError;

/// The built-in templates for one to twelve participants.
pub const STANDARD_TEMPLATES: [&[usize]; 12] = [
    &[1],
    &[1, 1],
    &[1, 2],
    &[2, 2],
    &[1, 2, 2],
    &[2, 2, 2],
    &[2, 2, 3],
    &[2, 3, 3],
    &[3, 3, 3],
    &[2, 3, 2, 3],
    &[2, 3, 3, 3],
    &[3, 3, 3, 3],
];

/// Largest participant count the standard table supports.
pub const MAX_PARTICIPANTS: usize = STANDARD_TEMPLATES.len();

/// An ordered set of grid templates indexed by participant count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateTable {
    rows: Vec<Cow<'static, [usize]>>,
}

impl TemplateTable {
    /// The built-in table.
    pub fn standard() -> Self {
        Self {
            rows: STANDARD_TEMPLATES.iter().map(|t| Cow::Borrowed(*t)).collect(),
        }
    }

    /// Build a custom table.
    ///
    /// Entry `i` must have positive column counts that add up to `i + 1`.
    pub fn custom(templates: Vec<Vec<usize>>) -> Result<Self, LayoutError> {
        for (index, template) in templates.iter().enumerate() {
            validate(index, template)?;
        }
        Ok(Self {
            rows: templates.into_iter().map(Cow::Owned).collect(),
        })
    }

    /// Largest participant count this table can lay out.
    #[inline]
    pub fn max_participants(&self) -> usize {
        self.rows.len()
    }

    /// Look up the template for `count` participants.
    ///
    /// Zero participants have no template and yield `Ok(None)`.
    pub fn template(&self, count: usize) -> Result<Option<&[usize]>, LayoutError> {
        if count == 0 {
            return Ok(None);
        }
        self.rows
            .get(count - 1)
            .map(|t| Some(&**t))
            .ok_or(LayoutError::UnsupportedCount {
                count,
                max: self.max_participants(),
            })
    }
}

impl Default for TemplateTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate(index: usize, template: &[usize]) -> Result<(), LayoutError> {
    if template.is_empty() {
        return Err(LayoutError::InvalidTemplate {
            index,
            reason: "template has no rows".to_string(),
        });
    }
    if let Some(row) = template.iter().position(|&columns| columns == 0) {
        return Err(LayoutError::InvalidTemplate {
            index,
            reason: format!("row {row} has zero columns"),
        });
    }
    let total: usize = template.iter().sum();
    if total != index + 1 {
        return Err(LayoutError::InvalidTemplate {
            index,
            reason: format!("columns sum to {total}, expected {}", index + 1),
        });
    }
    Ok(())
}
