//! Rotating ring of accumulator windows.
//!
//! A [`Series`] holds a fixed number of accumulator instances. Exactly
//! one -- the slot under the cursor -- is "open" and receives new
//! data; every other slot holds the frozen result of a previously
//! closed measurement window. The external cadence driver calls
//! [`Series::advance`] at each window boundary, which moves the cursor
//! forward and resets the slot that becomes current. The vacated slot
//! keeps its frozen result until the ring wraps back around to it.
//!
//! The saturating closed-window count bounds how much of the ring a
//! snapshot may read, so consumers never observe slots that were never
//! populated. A freshly created series therefore snapshots to an empty
//! result set rather than an error.
//!
//! All ring-index arithmetic lives in [`Series::advance`]; no caller
//! computes modular indices itself.

use crate::Error;

/// One window position in a [`Series`].
///
/// Implemented by the accumulator kinds that can live in a ring. The
/// series only ever needs to clear a slot for reuse and read its
/// frozen output; all recording goes through the concrete series
/// aliases.
pub trait Slot {
    /// The snapshot value this slot produces when read.
    type Output;

    /// Return the slot to its freshly-created state.
    fn reset(&mut self);

    /// Read the slot's accumulated output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the slot kind distinguishes "never
    /// populated" from a valid zero result and no data has arrived.
    fn output(&self) -> Result<Self::Output, Error>;
}

/// A fixed-length ring of accumulators: a rolling history of closed
/// windows plus one open window.
#[derive(Debug)]
pub struct Series<S> {
    slots: Vec<S>,
    /// Cursor of the single open slot, always `< slots.len()`.
    index: usize,
    /// How many slots hold an ever-populated result. Saturates at
    /// `slots.len()` and never decreases.
    closed: usize,
}

impl<S> Series<S>
where
    S: Slot,
{
    /// Create a series of `length` windows, each built by `make_slot`.
    ///
    /// All slots are allocated eagerly; after this returns the series
    /// never reallocates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the slot storage cannot be
    /// reserved. Nothing is leaked on failure.
    ///
    /// # Panics
    ///
    /// A zero `length` is a caller bug and fails fast.
    pub(crate) fn new_with<F>(length: usize, mut make_slot: F) -> Result<Self, Error>
    where
        F: FnMut() -> S,
    {
        assert!(length > 0, "series length must be non-zero");
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(length)
            .map_err(|_| Error::OutOfMemory { length })?;
        for _ in 0..length {
            slots.push(make_slot());
        }
        Ok(Self {
            slots,
            index: 0,
            closed: 0,
        })
    }

    /// Number of windows in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a series cannot be constructed with zero windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cursor of the currently open window.
    ///
    /// The composition layer stamps this into the window head metadata
    /// so management reads can tell which slot is still accumulating.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// How many windows hold a valid, ever-populated result.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.closed
    }

    /// The open slot. Recording forwards here and nowhere else.
    pub(crate) fn current_mut(&mut self) -> &mut S {
        &mut self.slots[self.index]
    }

    /// Rotate the ring at a window boundary.
    ///
    /// Moves the cursor to the next slot, resets that slot so the new
    /// window starts empty, and bumps the closed-window count
    /// (saturating at the ring length). The vacated slot is left
    /// untouched; its frozen result stays readable until the ring
    /// wraps back to it.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.slots.len();
        self.slots[self.index].reset();
        if self.closed < self.slots.len() {
            self.closed += 1;
        }
    }

    /// Snapshot the outputs of every valid window, in storage order.
    ///
    /// Reads slots `0..closed_count()` only; slots beyond the
    /// closed-window count are never touched. Before the first
    /// `advance` this returns an empty vector.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Error::Empty`] from a window that was
    /// closed without ever receiving data; in that case the whole
    /// snapshot is abandoned.
    pub fn results(&self) -> Result<Vec<S::Output>, Error> {
        let mut out = Vec::with_capacity(self.closed);
        for slot in self.slots.iter().take(self.closed) {
            out.push(slot.output()?);
        }
        Ok(out)
    }
}
