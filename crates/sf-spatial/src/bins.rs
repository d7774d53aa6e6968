//! Uniform bin grid for neighbor lookup.
//!
//! # Layout
//!
//! The world rectangle `[xmin, xmax] × [ymin, ymax]` is split into
//! `bins_x × bins_y` equal cells stored row-major:
//!
//! ```text
//! cells[ y * bins_x + x ]
//! cell_x = floor((pos.x - xmin) / ((xmax - xmin) / bins_x))
//! ```
//!
//! Every indexed agent also has a slot remembering the cell it was filed
//! under.  An agent whose position maps outside the grid (or is not finite)
//! stays in the slot table but sits in no cell; it is filed again by
//! [`BinIndex::update`] once it walks back in.  Queries against cells outside
//! the grid return nothing rather than failing.

use rustc_hash::FxHashMap;

use sf_core::{AgentId, Rect, Vec2};

use crate::{SpatialError, SpatialResult};

/// Integer bin coordinates.  May lie outside the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    /// Cell assigned to non-finite positions; never inside any grid.
    pub const OUTSIDE: Cell = Cell { x: i64::MIN, y: i64::MIN };

    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

pub struct BinIndex {
    bounds: Rect,
    bins_x: usize,
    bins_y: usize,
    cell_w: f64,
    cell_h: f64,
    cells:  Vec<Vec<AgentId>>,
    slots:  FxHashMap<AgentId, Cell>,
}

impl BinIndex {
    /// Allocate an empty `bins_x × bins_y` grid over `bounds`.
    pub fn new(bounds: Rect, bins_x: usize, bins_y: usize) -> SpatialResult<Self> {
        if bins_x == 0 || bins_y == 0 {
            return Err(SpatialError::InvalidGrid(format!(
                "bin counts must be positive, got {bins_x} × {bins_y}"
            )));
        }
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(SpatialError::InvalidGrid(format!(
                "world bounds must have area, got {:?}",
                bounds
            )));
        }
        Ok(Self {
            bounds,
            bins_x,
            bins_y,
            cell_w: bounds.width() / bins_x as f64,
            cell_h: bounds.height() / bins_y as f64,
            cells: vec![Vec::new(); bins_x * bins_y],
            slots: FxHashMap::default(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn bins_x(&self) -> usize {
        self.bins_x
    }

    pub fn bins_y(&self) -> usize {
        self.bins_y
    }

    /// Number of indexed agents, including those parked outside the grid.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.slots.contains_key(&agent)
    }

    // ── Cell arithmetic ───────────────────────────────────────────────────

    /// The cell `pos` falls into.  The result may be outside the grid.
    pub fn cell_of(&self, pos: Vec2) -> Cell {
        if !pos.is_finite() {
            return Cell::OUTSIDE;
        }
        let x = ((pos.x - self.bounds.min.x) / self.cell_w).floor();
        let y = ((pos.y - self.bounds.min.y) / self.cell_h).floor();
        Cell::new(x as i64, y as i64)
    }

    /// Cell an agent is currently filed under (as of the last add/update).
    pub fn cell_of_agent(&self, agent: AgentId) -> Option<Cell> {
        self.slots.get(&agent).copied()
    }

    #[inline]
    fn slot_index(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        if x >= self.bins_x || y >= self.bins_y {
            return None;
        }
        Some(y * self.bins_x + x)
    }

    /// `true` if `cell` lies inside the grid.
    pub fn in_grid(&self, cell: Cell) -> bool {
        self.slot_index(cell).is_some()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Index `agent` at `pos`.
    ///
    /// An out-of-grid position is accepted: the agent is tracked but placed in
    /// no cell until a later [`update`](Self::update) sees it inside.
    pub fn add(&mut self, agent: AgentId, pos: Vec2) -> SpatialResult<()> {
        if self.slots.contains_key(&agent) {
            return Err(SpatialError::AlreadyIndexed(agent));
        }
        let cell = self.cell_of(pos);
        if let Some(i) = self.slot_index(cell) {
            self.cells[i].push(agent);
        }
        self.slots.insert(agent, cell);
        Ok(())
    }

    /// Remove `agent` from the index.
    ///
    /// Removing an agent that was never added is a caller bug and returns
    /// [`SpatialError::NotIndexed`] without touching any cell.
    pub fn remove(&mut self, agent: AgentId) -> SpatialResult<()> {
        let cell = self.slots.remove(&agent).ok_or(SpatialError::NotIndexed(agent))?;
        if let Some(i) = self.slot_index(cell) {
            let bin = &mut self.cells[i];
            match bin.iter().position(|&a| a == agent) {
                Some(at) => {
                    bin.remove(at);
                }
                None => {
                    debug_assert!(false, "{agent} slot points at {cell:?} but the cell lacks it");
                }
            }
        }
        Ok(())
    }

    /// Re-file every agent whose position now maps to a different cell.
    ///
    /// All movers are collected first and only then removed and re-added, so
    /// no cell is mutated while it is being scanned.  Agents are processed in
    /// ascending id order, which keeps cell contents deterministic.
    ///
    /// Returns the number of agents that changed cell.
    pub fn update<F>(&mut self, position_of: F) -> SpatialResult<usize>
    where
        F: Fn(AgentId) -> Vec2,
    {
        let mut moved: Vec<(AgentId, Vec2)> = self
            .slots
            .iter()
            .filter_map(|(&agent, &cell)| {
                let pos = position_of(agent);
                (self.cell_of(pos) != cell).then_some((agent, pos))
            })
            .collect();
        moved.sort_unstable_by_key(|&(agent, _)| agent);

        for &(agent, pos) in &moved {
            self.remove(agent)?;
            self.add(agent, pos)?;
        }
        Ok(moved.len())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Agents filed in cell `(x, y)`; empty for cells outside the grid.
    pub fn get(&self, x: i64, y: i64) -> &[AgentId] {
        match self.slot_index(Cell::new(x, y)) {
            Some(i) => &self.cells[i],
            None => &[],
        }
    }

    /// Agents in every cell within `radius` cells (Chebyshev distance) of the
    /// cell containing `pos`.
    pub fn surrounding(&self, pos: Vec2, radius: u32) -> Vec<AgentId> {
        let centre = self.cell_of(pos);
        if centre == Cell::OUTSIDE {
            return Vec::new();
        }
        self.around(centre, radius)
    }

    /// Like [`surrounding`](Self::surrounding), centred on the cell `agent`
    /// is filed under.
    pub fn surrounding_agent(&self, agent: AgentId, radius: u32) -> SpatialResult<Vec<AgentId>> {
        let centre = self.cell_of_agent(agent).ok_or(SpatialError::NotIndexed(agent))?;
        if centre == Cell::OUTSIDE {
            return Ok(Vec::new());
        }
        Ok(self.around(centre, radius))
    }

    fn around(&self, centre: Cell, radius: u32) -> Vec<AgentId> {
        let r = radius as i64;
        let mut out = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                let (x, y) = (centre.x.saturating_add(dx), centre.y.saturating_add(dy));
                out.extend_from_slice(self.get(x, y));
            }
        }
        out
    }

    /// Every agent currently filed in a cell, in row-major cell order.
    pub fn all(&self) -> Vec<AgentId> {
        self.cells.iter().flatten().copied().collect()
    }

    /// Agent count per cell, row-major (for drawing density overlays).
    pub fn occupancy(&self) -> Vec<usize> {
        self.cells.iter().map(Vec::len).collect()
    }
}
