//! Frame Arena - Single-generation bump allocator for per-frame records.
//!
//! The arena hands out storage for interaction records while the UI tree is
//! being built. Nothing is freed individually: `reset()` at the start of the
//! next frame drops every record at once and moves the cursor back to zero.
//!
//! Records are typed. The byte cursor enforces the fixed capacity the
//! session was configured with, while the records themselves live in a slab
//! sized for that capacity up front, so a frame never reallocates.
//!
//! Handles carry the generation they were issued in. Looking up a handle from
//! an earlier frame yields `None` instead of whatever record now occupies the
//! slot.
//!
//! # Overflow
//!
//! Exceeding the capacity is a hard failure for the current frame:
//! [`FrameArena::allocate`] returns [`ViewerError::ArenaExhausted`] and leaves
//! the cursor untouched. The arena never grows and never wraps.

use std::mem;

use tracing::error;

use crate::error::{Result, ViewerError};

// =============================================================================
// Handles
// =============================================================================

/// Byte offset of an allocation inside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArenaOffset(usize);

impl ArenaOffset {
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Non-owning reference to a record, valid until the next `reset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaHandle {
    generation: u32,
    slot: u32,
}

impl ArenaHandle {
    /// Frame generation this handle was issued in.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

// =============================================================================
// FrameArena
// =============================================================================

/// Fixed-capacity bump allocator reset once per frame.
#[derive(Debug)]
pub struct FrameArena<T> {
    capacity: usize,
    offset: usize,
    generation: u32,
    slots: Vec<T>,
}

impl<T> FrameArena<T> {
    /// Create an arena with `capacity` bytes of record storage.
    pub fn new(capacity: usize) -> Self {
        let slot_capacity = capacity / mem::size_of::<T>().max(1);
        Self {
            capacity,
            offset: 0,
            generation: 0,
            slots: Vec::with_capacity(slot_capacity),
        }
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes handed out since the last reset.
    pub fn used(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.offset
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of records stored this frame.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Start a new generation: cursor to zero, all handles invalidated.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.slots.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Reserve `size` bytes and return where they start.
    pub fn allocate(&mut self, size: usize) -> Result<ArenaOffset> {
        match self.offset.checked_add(size) {
            Some(end) if end <= self.capacity => {
                let start = self.offset;
                self.offset = end;
                Ok(ArenaOffset(start))
            }
            _ => {
                error!(
                    requested = size,
                    offset = self.offset,
                    capacity = self.capacity,
                    "frame arena exhausted"
                );
                Err(ViewerError::ArenaExhausted {
                    requested: size,
                    offset: self.offset,
                    capacity: self.capacity,
                })
            }
        }
    }

    /// Store a record for the rest of this frame.
    ///
    /// Reserves `size_of::<T>()` bytes aligned to `align_of::<T>()`.
    pub fn alloc(&mut self, value: T) -> Result<ArenaHandle> {
        let align = mem::align_of::<T>();
        let padding = (align - self.offset % align) % align;
        self.allocate(padding + mem::size_of::<T>())?;

        let slot = self.slots.len() as u32;
        self.slots.push(value);
        Ok(ArenaHandle {
            generation: self.generation,
            slot,
        })
    }

    /// Resolve a handle issued during the current generation.
    pub fn get(&self, handle: ArenaHandle) -> Option<&T> {
        if handle.generation != self.generation {
            return None;
        }
        self.slots.get(handle.slot as usize)
    }
}
