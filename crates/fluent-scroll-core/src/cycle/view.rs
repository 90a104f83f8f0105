//! Slot space of a wrap-around picker column.
//!
//! A column longer than its viewport is materialised twice back to back so
//! that the current slot can always be moved back into the middle by `±N`
//! without the viewer noticing. A short column is padded with inert
//! placeholder slots on both sides instead and never wraps.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// What sits in a materialised slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a, T> {
    /// Logical index and the item itself
    Item(usize, &'a T),
    /// Padding, never selectable
    Placeholder,
}

impl<'a, T> Slot<'a, T> {
    pub fn item(&self) -> Option<&'a T> {
        match self {
            Slot::Item(_, item) => Some(item),
            Slot::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }
}

/// Immutable once built; rebuild it when the items change.
#[derive(Debug, Clone)]
pub struct CyclicSequenceView<T> {
    items: Vec<T>,
    visible_count: usize,
    cyclic: bool,
}

impl<T> CyclicSequenceView<T> {
    pub fn new(items: Vec<T>, visible_count: usize) -> Result<Self> {
        if visible_count == 0 {
            return Err(Error::invalid("visible_count", "must be greater than zero"));
        }
        let cyclic = items.len() > visible_count;
        Ok(Self {
            items,
            visible_count,
            cyclic,
        })
    }

    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of logical items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Placeholder slots on each side of a short column
    pub fn pad(&self) -> usize {
        if self.cyclic {
            0
        } else {
            self.visible_count / 2
        }
    }

    pub fn slot_count(&self) -> usize {
        if self.cyclic {
            2 * self.items.len()
        } else {
            self.items.len() + 2 * self.pad()
        }
    }

    fn check(&self, slot: usize) -> Result<()> {
        if slot >= self.slot_count() {
            return Err(Error::OutOfRange {
                index: slot,
                len: self.slot_count(),
            });
        }
        Ok(())
    }

    /// Logical index shown in `slot`, `None` for padding
    pub fn resolve_slot(&self, slot: usize) -> Result<Option<usize>> {
        self.check(slot)?;
        if self.cyclic {
            return Ok(Some(slot % self.items.len()));
        }
        Ok(slot
            .checked_sub(self.pad())
            .filter(|index| *index < self.items.len()))
    }

    pub fn slot(&self, slot: usize) -> Result<Slot<'_, T>> {
        Ok(match self.resolve_slot(slot)? {
            Some(index) => Slot::Item(index, &self.items[index]),
            None => Slot::Placeholder,
        })
    }

    /// Slots that may become current
    pub fn selectable_slots(&self) -> Option<RangeInclusive<usize>> {
        if self.items.is_empty() {
            return None;
        }
        if self.cyclic {
            Some(0..=self.slot_count() - 1)
        } else {
            let pad = self.pad();
            Some(pad..=pad + self.items.len() - 1)
        }
    }

    /// Where the current slot starts: the second copy, or the first real item
    pub fn home_slot(&self) -> usize {
        if self.cyclic {
            self.items.len()
        } else {
            self.pad()
        }
    }

    /// Slot showing logical item `index`, taken from the second copy when cyclic
    pub fn slot_for_index(&self, index: usize) -> Option<usize> {
        (index < self.items.len()).then(|| self.home_slot() + index)
    }

    /// Size of the edge zones that trigger re-centring
    fn edge(&self) -> usize {
        (self.visible_count + 1) / 2
    }

    pub fn needs_recenter(&self, slot: usize) -> bool {
        self.recenter(slot) != slot
    }

    /// Move a cyclic slot out of an edge zone by one copy length.
    ///
    /// The logical index is unchanged. Short columns never move.
    pub fn recenter(&self, slot: usize) -> usize {
        if !self.cyclic {
            return slot;
        }
        let n = self.items.len();
        let m = self.edge();
        if slot >= self.slot_count().saturating_sub(m) {
            slot - n
        } else if slot < m {
            slot + n
        } else {
            slot
        }
    }

    /// Scroll offset that centres `slot` in the viewport
    pub fn offset_for_slot(&self, slot: usize, item_extent: f64) -> f64 {
        item_extent * (slot as f64 - (self.visible_count / 2) as f64)
    }

    /// Slot centred at scroll `offset`, clamped to the slot space
    pub fn slot_at_offset(&self, offset: f64, item_extent: f64) -> usize {
        let last = self.slot_count().saturating_sub(1);
        if item_extent <= 0.0 || !offset.is_finite() {
            return self.home_slot().min(last);
        }
        let top = (offset / item_extent).round().max(0.0) as usize;
        (top + self.visible_count / 2).min(last)
    }

    /// Largest scroll offset
    pub fn max_offset(&self, item_extent: f64) -> f64 {
        item_extent * self.slot_count().saturating_sub(self.visible_count) as f64
    }
}
