use crate::geom::{self, Axis, Vector};
use crate::item::Item;

/// Pending displacements for one relaxation step, indexed parallel to the item slice.
///
/// Nothing moves until [`ForceMap::apply`]; every force in a step is computed against the same
/// snapshot of positions.
#[derive(Debug, Clone, Default)]
pub struct ForceMap {
    slots: Vec<Option<Vector>>,
}

impl ForceMap {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Number of items the map was sized for, whether or not they have an entry.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether no item has an entry yet.
    pub fn has_no_entries(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, index: usize) -> Option<Vector> {
        self.slots.get(index).copied().flatten()
    }

    /// Adds `v` to the entry for `index`, creating a zero entry first if needed.
    pub fn add(&mut self, index: usize, v: Vector) {
        let Some(slot) = self.slot_mut(index) else {
            return;
        };
        *slot.get_or_insert_with(Vector::zero) += v;
    }

    pub fn set(&mut self, index: usize, v: Vector) {
        if let Some(slot) = self.slot_mut(index) {
            *slot = Some(v);
        }
    }

    /// Overwrites one axis of the entry for `index`, keeping the other component.
    pub fn set_component(&mut self, index: usize, axis: Axis, value: f64) {
        let Some(slot) = self.slot_mut(index) else {
            return;
        };
        axis.set_vector(slot.get_or_insert_with(Vector::zero), value);
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut Option<Vector>> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index);
        debug_assert!(slot.is_some(), "force index {index} out of range (len {len})");
        slot
    }

    /// Commits every pending displacement. Returns whether any item moved.
    pub fn apply(self, items: &mut [Item]) -> bool {
        let mut moved = false;
        for (index, (slot, item)) in self.slots.into_iter().zip(items.iter_mut()).enumerate() {
            let Some(v) = slot else {
                continue;
            };
            if !geom::is_finite_vector(v) {
                tracing::warn!(index, ?v, "dropping non-finite force");
                continue;
            }
            if v.x != 0.0 || v.y != 0.0 {
                item.position += v;
                moved = true;
            }
        }
        moved
    }
}

/// Free-function form of [`ForceMap::apply`].
pub fn apply_forces(forces: ForceMap, items: &mut [Item]) -> bool {
    forces.apply(items)
}
