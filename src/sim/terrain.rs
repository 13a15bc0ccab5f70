//! Destructible block terrain
//!
//! A fixed rectangular grid of equally sized blocks. Cells start solid and can
//! only ever be removed; nothing regrows. Queries walk only the columns and
//! rows a shape can touch rather than the whole grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::column_center_x;
use crate::tuning::Tuning;

/// Grid cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockRef {
    pub col: u32,
    pub row: u32,
}

/// Destructible ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainGrid {
    cols: u32,
    rows: u32,
    block_size: Vec2,
    /// Center y of row 0
    start_y: f32,
    /// Row-major solid flags
    solid: Vec<bool>,
}

impl TerrainGrid {
    /// Build a grid with every cell solid
    pub fn new(cols: u32, rows: u32, block_w: f32, block_h: f32, start_y: f32) -> Self {
        Self {
            cols,
            rows,
            block_size: Vec2::new(block_w, block_h),
            start_y,
            solid: vec![true; (cols * rows) as usize],
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.grid_cols,
            tuning.grid_rows,
            tuning.block_width,
            tuning.block_height,
            tuning.grid_start_y,
        )
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn block_size(&self) -> Vec2 {
        self.block_size
    }

    #[inline]
    fn index(&self, block: BlockRef) -> Option<usize> {
        (block.col < self.cols && block.row < self.rows)
            .then(|| (block.row * self.cols + block.col) as usize)
    }

    /// Whether the cell exists and still holds a block
    pub fn is_solid(&self, block: BlockRef) -> bool {
        self.index(block).is_some_and(|i| self.solid[i])
    }

    pub fn block_center(&self, block: BlockRef) -> Vec2 {
        Vec2::new(
            column_center_x(block.col, self.block_size.x),
            self.start_y + block.row as f32 * self.block_size.y,
        )
    }

    pub fn block_aabb(&self, block: BlockRef) -> Aabb {
        Aabb::new(self.block_center(block), self.block_size / 2.0)
    }

    /// Number of blocks still standing
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// All standing blocks in row-major order
    pub fn solid_blocks(&self) -> impl Iterator<Item = BlockRef> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| BlockRef { col, row }))
            .filter(move |&b| self.is_solid(b))
    }

    /// Remove a single block. Returns false if it was already gone.
    pub fn remove_block(&mut self, block: BlockRef) -> bool {
        match self.index(block) {
            Some(i) if self.solid[i] => {
                self.solid[i] = false;
                log::trace!("Block ({}, {}) removed", block.col, block.row);
                true
            }
            _ => false,
        }
    }

    /// Remove every standing block whose center is strictly closer than
    /// `radius` to `center`. Returns the removed cells in row-major order.
    pub fn remove_within_radius(&mut self, center: Vec2, radius: f32) -> Vec<BlockRef> {
        let reach = Aabb::new(center, Vec2::splat(radius));
        let candidates: Vec<BlockRef> = self
            .cells_touching(&reach)
            .filter(|&b| self.block_center(b).distance(center) < radius)
            .collect();

        candidates
            .into_iter()
            .filter(|&b| self.remove_block(b))
            .collect()
    }

    /// Standing blocks whose box strictly overlaps `aabb`, row-major
    pub fn overlapping<'a>(&'a self, aabb: &'a Aabb) -> impl Iterator<Item = BlockRef> + 'a {
        self.cells_touching(aabb)
            .filter(move |&b| self.block_aabb(b).overlaps(aabb))
    }

    /// Solid cells in the column/row range covered by `aabb` (inclusive)
    fn cells_touching<'a>(&'a self, aabb: &Aabb) -> impl Iterator<Item = BlockRef> + 'a {
        let min = aabb.min();
        let max = aabb.max();
        let top = self.start_y - self.block_size.y / 2.0;

        let col_range = span(min.x, max.x, 0.0, self.block_size.x, self.cols);
        let row_range = span(min.y, max.y, top, self.block_size.y, self.rows);

        row_range
            .flat_map(move |row| col_range.clone().map(move |col| BlockRef { col, row }))
            .filter(move |&b| self.is_solid(b))
    }
}

/// Cell indices along one axis whose extent may intersect [lo, hi]
fn span(lo: f32, hi: f32, origin: f32, size: f32, count: u32) -> std::ops::Range<u32> {
    if count == 0 || hi < origin || lo > origin + size * count as f32 {
        return 0..0;
    }
    let first = ((lo - origin) / size).floor().max(0.0) as u32;
    let last = ((hi - origin) / size).floor().max(0.0) as u32;
    first.min(count)..(last + 1).min(count)
}
