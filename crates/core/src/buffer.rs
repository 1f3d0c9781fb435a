//! Double-buffered wave state with structurally enforced read/write separation.
//!
//! A [`DoubleBuffer`] owns two physically distinct [`WaveState`] regions and a
//! front index. Exactly one region is "current" (readable) and one is
//! "alternate" (the kernel write target) at any instant. [`DoubleBuffer::split`]
//! hands out a shared reference to the current state and an exclusive
//! reference to the alternate state at the same time, so the central
//! correctness invariant — a kernel pass never reads the buffer it writes —
//! is enforced by the borrow checker rather than by convention.
//! [`DoubleBuffer::swap`] is a pure index flip, never a data copy.

use crate::error::EngineError;
use crate::field::{EdgeMode, Field};

/// One buffer region: the `(height, previous)` pair for every cell.
///
/// `previous` encodes the inertia term of the discretized second-order wave
/// equation; a kernel tick writes `(new_height, old_height)` so the prior
/// height becomes the next tick's inertia input.
#[derive(Debug, Clone)]
pub struct WaveState {
    height: Field,
    previous: Field,
}

impl WaveState {
    /// Creates a zero-initialized state of the given dimensions.
    pub fn new(width: usize, height: usize, edge_mode: EdgeMode) -> Result<Self, EngineError> {
        Ok(Self {
            height: Field::new(width, height, edge_mode)?,
            previous: Field::new(width, height, edge_mode)?,
        })
    }

    /// Creates a state whose height **and** previous components both equal
    /// the given seeded field (zero initial velocity).
    pub fn from_seeded(field: Field) -> Self {
        Self {
            previous: field.clone(),
            height: field,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.height.width()
    }

    /// Grid height in cells.
    pub fn grid_height(&self) -> usize {
        self.height.height()
    }

    /// The height component.
    pub fn height(&self) -> &Field {
        &self.height
    }

    /// The previous-height component.
    pub fn previous(&self) -> &Field {
        &self.previous
    }

    /// Mutable height component, for kernel writes into the alternate state.
    pub fn height_mut(&mut self) -> &mut Field {
        &mut self.height
    }

    /// Mutable previous-height component, for kernel writes into the
    /// alternate state.
    pub fn previous_mut(&mut self) -> &mut Field {
        &mut self.previous
    }

    /// Both components mutably at once, `(height, previous)`. Kernel hot
    /// paths write the pair per cell and need simultaneous access.
    pub fn components_mut(&mut self) -> (&mut Field, &mut Field) {
        (&mut self.height, &mut self.previous)
    }
}

/// Two [`WaveState`] regions with swapping current/alternate roles.
#[derive(Debug)]
pub struct DoubleBuffer {
    states: [WaveState; 2],
    front: usize,
}

impl DoubleBuffer {
    /// Creates a double buffer with both regions initialized to copies of
    /// the seeded state. Region 0 starts as current.
    pub fn new(seeded: WaveState) -> Self {
        Self {
            states: [seeded.clone(), seeded],
            front: 0,
        }
    }

    /// The index of the current (readable) region: 0 or 1.
    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Read-only access to the current region.
    pub fn current(&self) -> &WaveState {
        &self.states[self.front]
    }

    /// Simultaneous access to `(current, alternate)`: the current region is
    /// read-only, the alternate region is the exclusive write target.
    pub fn split(&mut self) -> (&WaveState, &mut WaveState) {
        let (lo, hi) = self.states.split_at_mut(1);
        if self.front == 0 {
            (&lo[0], &mut hi[0])
        } else {
            (&hi[0], &mut lo[0])
        }
    }

    /// Swaps the current and alternate roles. Pure index exchange; no cell
    /// data moves, so a sampler holding no borrow across the swap can never
    /// observe a partially updated region.
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }
}
