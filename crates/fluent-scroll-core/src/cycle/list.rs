//! Picker column: a cyclic view plus the current slot and its scroll bar.

use std::time::Duration;

use tracing::debug;

use super::view::{CyclicSequenceView, Slot};
use crate::config::AnimationConfig;
use crate::error::Result;
use crate::scroll::curve::Curve;
use crate::scroll::scroll_bar::SmoothScrollBar;
use crate::scroll::tween::OffsetChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// The selection moved to logical item `index`
    CurrentItemChanged { index: usize },
}

#[derive(Debug, Clone)]
pub struct CycleList<T> {
    view: CyclicSequenceView<T>,
    current: usize,
    bar: SmoothScrollBar,
    item_extent: f64,
}

impl<T> CycleList<T> {
    pub fn new(
        items: Vec<T>,
        visible_count: usize,
        item_extent: f64,
        scroll_duration: Duration,
    ) -> Result<Self> {
        let view = CyclicSequenceView::new(items, visible_count)?;
        let mut bar = SmoothScrollBar::new(&AnimationConfig::default());
        bar.set_scroll_animation(scroll_duration, Curve::OutCubic);

        let mut list = Self {
            current: view.home_slot(),
            view,
            bar,
            item_extent,
        };
        list.sync_range();
        Ok(list)
    }

    /// Replace the items, starting over at the home slot
    pub fn set_items(&mut self, items: Vec<T>) -> Result<()> {
        self.view = CyclicSequenceView::new(items, self.view.visible_count())?;
        self.current = self.view.home_slot();
        self.sync_range();
        Ok(())
    }

    /// Update the height of one row
    pub fn set_item_extent(&mut self, item_extent: f64) {
        self.item_extent = item_extent;
        self.sync_range();
    }

    fn sync_range(&mut self) {
        self.bar.stop();
        self.bar
            .set_range(0.0, self.view.max_offset(self.item_extent));
        self.bar
            .scroll_to(self.view.offset_for_slot(self.current, self.item_extent), false);
    }

    fn jump_to_slot(&mut self, slot: usize) {
        let offset = self.view.offset_for_slot(slot, self.item_extent);
        self.bar.scroll_to(offset, false);
    }

    /// Clamp and, for cyclic columns, move out of the edge zones first.
    ///
    /// The jump lands on the neighbour of the new slot so that the following
    /// animation still covers one row.
    fn set_current(&mut self, slot: usize) {
        let Some(range) = self.view.selectable_slots() else {
            return;
        };
        let slot = slot.clamp(*range.start(), *range.end());

        let moved = self.view.recenter(slot);
        if moved < slot {
            debug!(from = slot, to = moved, "Recentered cycle list");
            self.jump_to_slot(moved.saturating_sub(1));
        } else if moved > slot {
            debug!(from = slot, to = moved, "Recentered cycle list");
            self.jump_to_slot(moved + 1);
        }
        self.current = moved;
    }

    /// Animate to the current slot and report the selection
    fn scroll_to_current(&mut self) -> Option<CycleEvent> {
        let offset = self.view.offset_for_slot(self.current, self.item_extent);
        self.bar.scroll_to(offset, true);
        self.current_index()
            .map(|index| CycleEvent::CurrentItemChanged { index })
    }

    pub fn set_current_slot(&mut self, slot: usize) -> Option<CycleEvent> {
        self.set_current(slot);
        self.scroll_to_current()
    }

    pub fn scroll_down(&mut self) -> Option<CycleEvent> {
        self.set_current_slot(self.current + 1)
    }

    pub fn scroll_up(&mut self) -> Option<CycleEvent> {
        self.set_current_slot(self.current.saturating_sub(1))
    }

    /// Negative angle deltas move down the list
    pub fn wheel(&mut self, angle_delta: f64) -> Option<CycleEvent> {
        if angle_delta < 0.0 {
            self.scroll_down()
        } else {
            self.scroll_up()
        }
    }

    /// Click on a materialised slot; placeholders are inert
    pub fn click_slot(&mut self, slot: usize) -> Result<Option<CycleEvent>> {
        if self.view.slot(slot)?.is_placeholder() {
            return Ok(None);
        }
        Ok(self.set_current_slot(slot))
    }

    /// Slot under row `row` of the viewport (0 = top)
    pub fn slot_at_row(&self, row: usize) -> Option<usize> {
        let centre = self.view.slot_at_offset(self.bar.value(), self.item_extent);
        let slot = (centre + row).checked_sub(self.view.visible_count() / 2)?;
        (slot < self.view.slot_count()).then_some(slot)
    }

    /// Select logical item `index` without animating.
    ///
    /// Reports a change only when the selection actually moved.
    pub fn select_index(&mut self, index: usize) -> Option<CycleEvent> {
        let slot = self.view.slot_for_index(index)?;
        let before = self.current_index();
        self.set_current(slot);
        self.jump_to_slot(self.current);
        let after = self.current_index();
        (after != before)
            .then_some(after)
            .flatten()
            .map(|index| CycleEvent::CurrentItemChanged { index })
    }

    /// Select the first item matching `pred`, as shown in the second copy
    pub fn select_where<F>(&mut self, pred: F) -> Option<CycleEvent>
    where
        F: Fn(&T) -> bool,
    {
        let index = self.view.items().iter().position(pred)?;
        self.select_index(index)
    }

    /// Drag the column by `delta` offset units; the current slot follows
    pub fn drag_by(&mut self, delta: f64) {
        self.bar.stop();
        self.bar.scroll_value(delta, false);
        let slot = self
            .view
            .slot_at_offset(self.bar.value(), self.item_extent);
        if let Some(range) = self.view.selectable_slots() {
            self.current = slot.clamp(*range.start(), *range.end());
        }
    }

    /// End of a drag: settle on the current slot
    pub fn release(&mut self) -> Option<CycleEvent> {
        let event = self.scroll_to_current();
        if !self.bar.is_animating() {
            self.recenter_if_idle();
        }
        event
    }

    /// Drive the scroll animation; re-centres once it has settled
    pub fn advance(&mut self, dt: Duration) -> Option<OffsetChange> {
        let change = self.bar.advance(dt);
        if change.map(|c| c.finished).unwrap_or(false) {
            self.recenter_if_idle();
        }
        change
    }

    /// Re-map a current slot left in an edge zone, only while nothing animates
    pub fn recenter_if_idle(&mut self) -> bool {
        if self.bar.is_animating() || !self.view.needs_recenter(self.current) {
            return false;
        }
        let moved = self.view.recenter(self.current);
        debug!(from = self.current, to = moved, "Recentered idle cycle list");
        self.current = moved;
        self.jump_to_slot(moved);
        true
    }

    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn current_index(&self) -> Option<usize> {
        self.view.resolve_slot(self.current).ok().flatten()
    }

    pub fn current_item(&self) -> Option<&T> {
        match self.view.slot(self.current).ok()? {
            Slot::Item(_, item) => Some(item),
            Slot::Placeholder => None,
        }
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.bar.value()
    }

    pub fn is_animating(&self) -> bool {
        self.bar.is_animating()
    }

    pub fn is_cyclic(&self) -> bool {
        self.view.is_cyclic()
    }

    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    pub fn view(&self) -> &CyclicSequenceView<T> {
        &self.view
    }
}
