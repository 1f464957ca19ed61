use std::collections::HashMap;

use super::common::{EntityId, round_to};

/// Per-entity "debt": the time an entity must wait before it may act again.
///
/// Entries persist across turns and across an entity leaving the map; only
/// [`AccumulatorTable::reset`] clears them. Values never drop below zero.
#[derive(Clone, Debug, Default)]
pub struct AccumulatorTable {
    debts: HashMap<EntityId, f64>,
    was_reset: bool,
}

impl AccumulatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entity's debt, `0.0` for entities never seen. Does not insert.
    pub fn get_or_default(&self, entity: EntityId) -> f64 {
        self.debts.get(&entity).copied().unwrap_or(0.0)
    }

    /// Returns true if the entity has an entry.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.debts.contains_key(&entity)
    }

    /// First-touch registration: inserts a zero entry if the entity is unseen.
    pub fn touch(&mut self, entity: EntityId) {
        self.debts.entry(entity).or_insert(0.0);
    }

    /// Overwrites the entity's debt, clamped at zero.
    pub fn set(&mut self, entity: EntityId, debt: f64) {
        self.debts.insert(entity, debt.max(0.0));
    }

    /// Re-arms an entity after it acted with an action costing `cost`.
    ///
    /// Adds `cost + step * (cost - 1)`. Actions cheaper than a full turn pay
    /// back slightly less than their nominal cost. Returns the new debt.
    pub fn charge(&mut self, entity: EntityId, cost: f64, step: f64) -> f64 {
        let debt = self.debts.entry(entity).or_insert(0.0);
        *debt = (*debt + cost + step * (cost - 1.0)).max(0.0);
        *debt
    }

    /// Decrements every tracked entry by `step`, clamping at zero.
    ///
    /// Results are rounded to `precision` decimals so a debt of `1.0` reaches
    /// exactly zero after ten steps of `0.1`.
    pub fn decay(&mut self, step: f64, precision: u32) {
        for debt in self.debts.values_mut() {
            *debt = round_to((*debt - step).max(0.0), precision);
        }
    }

    /// Wipes the whole table and raises the "was just reset" flag.
    pub fn reset(&mut self) {
        self.debts = HashMap::new();
        self.was_reset = true;
    }

    /// Whether [`reset`](Self::reset) ran since the flag was last cleared.
    pub fn was_reset(&self) -> bool {
        self.was_reset
    }

    pub fn clear_reset_flag(&mut self) {
        self.was_reset = false;
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, f64)> + '_ {
        self.debts.iter().map(|(&id, &debt)| (id, debt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 0.1;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unseen_entity_reads_zero_without_insert() {
        let table = AccumulatorTable::new();
        assert_eq!(table.get_or_default(EntityId(7)), 0.0);
        assert!(!table.contains(EntityId(7)));
    }

    #[test]
    fn full_turn_cost_charges_exactly_one() {
        let mut table = AccumulatorTable::new();
        assert_eq!(table.charge(EntityId(1), 1.0, STEP), 1.0);
    }

    #[test]
    fn fast_action_pays_back_less_than_nominal() {
        let mut table = AccumulatorTable::new();
        let debt = table.charge(EntityId(1), 0.2, STEP);
        assert!(approx(debt, 0.12));
    }

    #[test]
    fn zero_cost_leaves_entity_eligible() {
        let mut table = AccumulatorTable::new();
        // 0 + 0.1 * (0 - 1) is negative and clamps to zero
        assert_eq!(table.charge(EntityId(1), 0.0, STEP), 0.0);
    }

    #[test]
    fn decay_clamps_at_zero() {
        let mut table = AccumulatorTable::new();
        table.set(EntityId(1), 0.05);
        table.set(EntityId(2), 0.5);
        table.decay(STEP, 4);
        assert_eq!(table.get_or_default(EntityId(1)), 0.0);
        assert_eq!(table.get_or_default(EntityId(2)), 0.4);
    }

    #[test]
    fn full_debt_settles_after_one_turn_of_steps() {
        let mut table = AccumulatorTable::new();
        table.set(EntityId(1), 1.0);
        for _ in 0..9 {
            table.decay(STEP, 4);
        }
        assert!(table.get_or_default(EntityId(1)) > 0.0);
        table.decay(STEP, 4);
        assert_eq!(table.get_or_default(EntityId(1)), 0.0);
    }

    #[test]
    fn reset_wipes_entries_and_raises_flag() {
        let mut table = AccumulatorTable::new();
        table.set(EntityId(1), 2.0);
        table.touch(EntityId(2));

        table.reset();

        assert!(table.is_empty());
        assert!(table.was_reset());
        table.clear_reset_flag();
        assert!(!table.was_reset());
    }
}
