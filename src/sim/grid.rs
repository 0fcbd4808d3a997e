//! Uniform spatial grid for neighbourhood queries
//!
//! Buckets hold agent indices, never agents. The grid is refilled from scratch
//! every tick; bucket storage is reused so steady-state rebuilds do not allocate.

use glam::DVec2;

use super::agent::Agent;

/// Fixed-resolution partition of the canvas into rectangular cells
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_width: f64,
    cell_height: f64,
    rows: usize,
    cols: usize,
    /// Row-major buckets, `index = row * cols + col`
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Grid with the given cell size covering `rows x cols` cells
    pub fn new(cell_width: f64, cell_height: f64, rows: usize, cols: usize) -> Self {
        Self {
            cell_width,
            cell_height,
            rows,
            cols,
            cells: vec![Vec::new(); rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell_size(&self) -> DVec2 {
        DVec2::new(self.cell_width, self.cell_height)
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Replace every bucket with the agents' current positions
    pub fn build(&mut self, agents: &[Agent]) {
        for bucket in &mut self.cells {
            bucket.clear();
        }
        for (idx, agent) in agents.iter().enumerate() {
            let (row, col) = self.cell_of(agent.pos);
            self.cells[row * self.cols + col].push(idx);
        }
    }

    /// `(row, col)` of the cell containing `pos`.
    ///
    /// Out-of-range coordinates are clamped to the border cells.
    pub fn cell_of(&self, pos: DVec2) -> (usize, usize) {
        let row = (pos.y / self.cell_height).floor().max(0.0) as usize;
        let col = (pos.x / self.cell_width).floor().max(0.0) as usize;
        (row.min(self.rows - 1), col.min(self.cols - 1))
    }

    /// Linear index of `(row, col)`
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// `(row, col)` of a linear cell index
    #[inline]
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// The cell itself plus every in-range neighbour (N, S, E, W, diagonals).
    ///
    /// Interior cells yield 9 indices, edge cells 6, corner cells 4.
    pub fn neighbor_indices(&self, row: usize, col: usize) -> impl Iterator<Item = usize> + '_ {
        let row_lo = row.saturating_sub(1);
        let row_hi = (row + 1).min(self.rows - 1);
        let col_lo = col.saturating_sub(1);
        let col_hi = (col + 1).min(self.cols - 1);
        (row_lo..=row_hi)
            .flat_map(move |r| (col_lo..=col_hi).map(move |c| self.index_of(r, c)))
    }

    /// Agent indices bucketed in cell `index`
    #[inline]
    pub fn agents_in(&self, index: usize) -> &[usize] {
        &self.cells[index]
    }

    /// Top-left corner of cell `index` in canvas coordinates
    pub fn cell_origin(&self, index: usize) -> DVec2 {
        let (row, col) = self.row_col(index);
        DVec2::new(col as f64 * self.cell_width, row as f64 * self.cell_height)
    }
}
