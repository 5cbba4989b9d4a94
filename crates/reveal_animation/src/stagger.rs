//! Stagger planning
//!
//! Spreads reveal start times across a list so items animate in sequence.
//! The plan is linear and unbounded: item `i` starts at
//! `base + i * step`, in index order, with no cap and no reordering.
//!
//! ```rust
//! use reveal_animation::plan_stagger;
//!
//! assert_eq!(plan_stagger(5, 100, 200), vec![200, 300, 400, 500, 600]);
//! ```

use rustc_hash::FxHashSet;
use serde::Serialize;

/// Convert seconds to whole milliseconds
///
/// Rounds to the nearest millisecond. Negative and non-finite inputs map to
/// zero.
pub fn secs_to_ms(secs: f32) -> u32 {
    if !secs.is_finite() || secs <= 0.0 {
        if secs != 0.0 {
            tracing::warn!(secs, "invalid duration, using 0");
        }
        return 0;
    }
    let ms = (secs as f64 * 1000.0).round();
    if ms >= u32::MAX as f64 {
        u32::MAX
    } else {
        ms as u32
    }
}

/// Convert a stagger step in seconds to milliseconds
///
/// Like [`secs_to_ms`], except a positive step never rounds down to zero:
/// sub-millisecond steps become 1ms so items still start in index order.
pub fn step_secs_to_ms(secs: f32) -> u32 {
    let ms = secs_to_ms(secs);
    if ms == 0 && secs.is_finite() && secs > 0.0 {
        1
    } else {
        ms
    }
}

/// Delay schedule for a list of items
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StaggerPlan {
    pub item_count: usize,
    /// Delay added per index
    pub step_delay_ms: u32,
    /// Delay of the first item
    pub base_delay_ms: u32,
}

impl StaggerPlan {
    pub fn new(item_count: usize, step_delay_ms: u32, base_delay_ms: u32) -> Self {
        Self {
            item_count,
            step_delay_ms,
            base_delay_ms,
        }
    }

    /// Plan from delays given in seconds
    ///
    /// A positive step shorter than a millisecond is planned as 1ms.
    pub fn from_secs(item_count: usize, step_delay: f32, base_delay: f32) -> Self {
        Self::new(item_count, step_secs_to_ms(step_delay), secs_to_ms(base_delay))
    }

    /// Start delay for item `index`
    ///
    /// Saturates at `u32::MAX` milliseconds rather than wrapping.
    pub fn delay_for_index(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay_ms
            .saturating_add(self.step_delay_ms.saturating_mul(index))
    }

    /// Delays for every item, in index order
    pub fn delays(&self) -> Vec<u32> {
        self.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.item_count).map(move |i| self.delay_for_index(i))
    }

    /// Delay of the last item, if any
    pub fn last_delay(&self) -> Option<u32> {
        self.item_count
            .checked_sub(1)
            .map(|last| self.delay_for_index(last))
    }
}

/// Per-item start delays: `base + i * step` for `i` in `0..item_count`
pub fn plan_stagger(item_count: usize, step_delay_ms: u32, base_delay_ms: u32) -> Vec<u32> {
    StaggerPlan::new(item_count, step_delay_ms, base_delay_ms).delays()
}

/// Which items of a group have individually been seen
///
/// Items in a group may enter the viewport at different scroll positions, so
/// each is tracked separately. With `once` the set only grows.
#[derive(Clone, Debug, Default)]
pub struct GroupVisibility {
    once: bool,
    visible: FxHashSet<usize>,
}

impl GroupVisibility {
    pub fn new(once: bool) -> Self {
        Self {
            once,
            visible: FxHashSet::default(),
        }
    }

    /// Mark an item visible; returns true if it was not visible before
    pub fn mark_visible(&mut self, index: usize) -> bool {
        self.visible.insert(index)
    }

    /// Mark an item hidden; ignored when the group reveals once
    ///
    /// Returns true if the item was removed.
    pub fn mark_hidden(&mut self, index: usize) -> bool {
        if self.once {
            return false;
        }
        self.visible.remove(&index)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.contains(&index)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Visible indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let mut indices: Vec<usize> = self.visible.iter().copied().collect();
        indices.sort_unstable();
        indices.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_five_items() {
        let plan = StaggerPlan::from_secs(5, 0.1, 0.2);
        assert_eq!(plan.delays(), vec![200, 300, 400, 500, 600]);

        let secs: Vec<f64> = plan.iter().map(|ms| ms as f64 / 1000.0).collect();
        assert_eq!(secs, vec![0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_plan_three_items_no_base() {
        assert_eq!(StaggerPlan::from_secs(3, 0.15, 0.0).delays(), vec![0, 150, 300]);
    }

    #[test]
    fn test_plan_empty() {
        let plan = StaggerPlan::new(0, 100, 50);
        assert!(plan.delays().is_empty());
        assert_eq!(plan.last_delay(), None);
    }

    #[test]
    fn test_plan_monotonic_and_unbounded() {
        let plan = StaggerPlan::new(10_000, 250, 0);
        let delays = plan.delays();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(plan.last_delay(), Some(9_999 * 250));
    }

    #[test]
    fn test_zero_step_is_simultaneous() {
        assert_eq!(plan_stagger(4, 0, 120), vec![120; 4]);
    }

    #[test]
    fn test_sub_millisecond_step_keeps_index_order() {
        let plan = StaggerPlan::from_secs(3, 0.0004, 0.0);
        assert_eq!(plan.delays(), vec![0, 1, 2]);
        assert_eq!(step_secs_to_ms(0.0), 0);
        assert_eq!(step_secs_to_ms(-0.001), 0);
        assert_eq!(step_secs_to_ms(0.15), 150);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let plan = StaggerPlan::new(3, u32::MAX / 2 + 1, 0);
        assert_eq!(plan.delay_for_index(2), u32::MAX);
    }

    #[test]
    fn test_secs_to_ms() {
        assert_eq!(secs_to_ms(0.15), 150);
        assert_eq!(secs_to_ms(0.6), 600);
        assert_eq!(secs_to_ms(-1.0), 0);
        assert_eq!(secs_to_ms(f32::NAN), 0);
        assert_eq!(secs_to_ms(f32::INFINITY), 0);
    }

    #[test]
    fn test_group_visibility_once_grows_monotonically() {
        let mut group = GroupVisibility::new(true);
        assert!(group.mark_visible(2));
        assert!(group.mark_visible(0));
        assert!(!group.mark_visible(2));
        assert!(!group.mark_hidden(2));
        assert_eq!(group.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(group.visible_count(), 2);
    }

    #[test]
    fn test_group_visibility_repeatable() {
        let mut group = GroupVisibility::new(false);
        group.mark_visible(1);
        assert!(group.mark_hidden(1));
        assert!(!group.is_visible(1));
        assert!(!group.mark_hidden(1));
    }
}
