use log::debug;

use super::{Rect, round_up_power_of_two};
use crate::error::AtlasError;

/// Top-left corner of a padded cell in the atlas plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Where one image ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the slice handed to [`ShelfPlanner::plan`]
    pub index: usize,
    /// Unpadded origin; content starts at `origin + (padding, padding)`
    pub origin: Point,
}

/// Result of a planning run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Placements in the order they were discovered
    pub placements: Vec<Placement>,
    /// Indices that never fit under the row height, in input order
    pub unplaced: Vec<usize>,
    /// Widest extent reached by any padded cell, before rounding
    pub used_width: u32,
    /// Atlas width, a power of two (0 for an empty plan)
    pub width: u32,
    /// Fixed row height, a power of two (0 for an empty plan)
    pub height: u32,
}

/// One pending region of the gap-fill scan.
///
/// The outer row is the bottom frame; every placed image pushes a frame for
/// the column of free space beneath it.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    position: Point,
    row_limit_x: u32,
    next: usize,
}

/// Shelf packer that recursively fills the space below each placed image.
///
/// Expects sizes sorted by descending height. The row height is fixed from the
/// first entry and never grows, so anything taller than that is reported in
/// [`Plan::unplaced`] instead of being placed.
#[derive(Debug, Clone, Copy)]
pub struct ShelfPlanner {
    padding: u32,
}

impl ShelfPlanner {
    pub fn new(padding: u32) -> Self {
        Self { padding }
    }

    /// Size of an image once the border is added on all four sides.
    ///
    /// `None` when the padded size does not fit in a `u32`.
    pub fn padded_size(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let border = self.padding.checked_mul(2)?;
        Some((width.checked_add(border)?, height.checked_add(border)?))
    }

    /// Padded cell occupied by `placement` for an image of the given size
    pub fn cell(&self, placement: &Placement, width: u32, height: u32) -> Option<Rect> {
        let (padded_w, padded_h) = self.padded_size(width, height)?;
        Some(Rect::new(
            placement.origin.x,
            placement.origin.y,
            padded_w,
            padded_h,
        ))
    }

    /// Assign an origin to every `(width, height)` entry that fits.
    pub fn plan(&self, sizes: &[(u32, u32)]) -> Result<Plan, AtlasError> {
        let padded: Vec<(u32, u32)> = sizes
            .iter()
            .map(|&(w, h)| {
                self.padded_size(w, h)
                    .ok_or(AtlasError::AtlasTooLarge { width: w, height: h })
            })
            .collect::<Result<_, _>>()?;

        let Some(&(first_w, first_padded_h)) = padded.first() else {
            return Ok(Plan::default());
        };

        let row_height =
            round_up_power_of_two(first_padded_h).ok_or(AtlasError::AtlasTooLarge {
                width: first_w,
                height: first_padded_h,
            })?;

        let mut placed = vec![false; sizes.len()];
        let mut placements = Vec::with_capacity(sizes.len());
        let mut used_width = 0u32;

        let mut stack = vec![Cursor {
            position: Point::default(),
            row_limit_x: u32::MAX,
            next: 0,
        }];

        while let Some(cursor) = stack.last_mut() {
            if placements.len() == sizes.len() {
                break;
            }

            let Point { x, y } = cursor.position;
            let limit = u64::from(cursor.row_limit_x);
            let candidate = (cursor.next..sizes.len()).find(|&i| {
                let (w, h) = padded[i];
                !placed[i]
                    && u64::from(y) + u64::from(h) <= u64::from(row_height)
                    && u64::from(x) + u64::from(w) <= limit
            });

            let Some(index) = candidate else {
                stack.pop();
                continue;
            };

            let (padded_w, padded_h) = padded[index];
            placed[index] = true;
            placements.push(Placement {
                index,
                origin: cursor.position,
            });
            debug!("Placed image #{} at ({}, {})", index, x, y);

            cursor.position.x += padded_w;
            cursor.next = index + 1;
            used_width = used_width.max(cursor.position.x);

            let below = Point::new(x, y + padded_h);
            let row_limit_x = cursor.position.x;
            if below.y < row_height {
                stack.push(Cursor {
                    position: below,
                    row_limit_x,
                    next: 0,
                });
            }
        }

        let unplaced: Vec<usize> = placed
            .iter()
            .enumerate()
            .filter(|(_, done)| !**done)
            .map(|(i, _)| i)
            .collect();

        let width = round_up_power_of_two(used_width).ok_or(AtlasError::AtlasTooLarge {
            width: used_width,
            height: row_height,
        })?;

        Ok(Plan {
            placements,
            unplaced,
            used_width,
            width,
            height: row_height,
        })
    }
}
