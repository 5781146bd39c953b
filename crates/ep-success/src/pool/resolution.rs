//! Per-test pool bookkeeping: what is available and which pool is in use.

use super::{Pool, PoolAction, PoolType};

/// The pools one test can draw from and the single active pool action.
///
/// The displayed pools carry both the reservation and the point the
/// active pair will pay.
#[derive(Debug, Clone, Default)]
pub struct PoolResolution {
    base: Vec<Pool>,
    reserved: u32,
    unreserved: Vec<Pool>,
    available: Vec<Pool>,
    active: Option<(Pool, PoolAction)>,
}

impl PoolResolution {
    /// Start from a character's pools as persisted.
    pub fn new(base: Vec<Pool>) -> Self {
        Self {
            unreserved: base.clone(),
            available: base.clone(),
            base,
            reserved: 0,
            active: None,
        }
    }

    /// Pools as this test displays them, after reservations and the
    /// active pair's point.
    pub fn available(&self) -> &[Pool] {
        &self.available
    }

    /// The displayed pool of a type.
    pub fn pool(&self, pool_type: PoolType) -> Option<&Pool> {
        self.available.iter().find(|p| p.pool_type() == pool_type)
    }

    /// The active pool before paying, and what it is spent on.
    pub fn active(&self) -> Option<(Pool, PoolAction)> {
        self.active
    }

    /// The active action, if any.
    pub fn active_action(&self) -> Option<PoolAction> {
        self.active.map(|(_, action)| action)
    }

    /// Points reserved on every non-flex pool.
    pub fn reserved(&self) -> u32 {
        self.reserved
    }

    /// Select the active pool action, replacing any other.
    ///
    /// Selecting the pair that is already active clears it, as does `None`.
    /// A pool type this test cannot draw from, or one with nothing left,
    /// leaves the slot empty. Returns whether a pair is now active.
    pub fn toggle_active(&mut self, pair: Option<(PoolType, PoolAction)>) -> bool {
        let current = self.active.map(|(pool, action)| (pool.pool_type(), action));
        self.active = match pair {
            Some(pair) if current == Some(pair) => None,
            Some((pool_type, action)) => self.drawable(pool_type).map(|pool| (pool, action)),
            None => None,
        };
        self.refresh_available();
        self.active.is_some()
    }

    /// Reserve `amount` points on every non-flex pool, replacing any
    /// earlier reservation. Reservations are clamped to each pool's cap.
    ///
    /// The active pair is refreshed against the new snapshot and dropped if
    /// its pool is now empty.
    pub fn set_reserved(&mut self, amount: u32) {
        self.reserved = amount;
        self.unreserved = self
            .base
            .iter()
            .map(|pool| {
                if pool.pool_type().is_flexible() {
                    *pool
                } else {
                    pool.after_spending(amount)
                }
            })
            .collect();

        if let Some((pool, action)) = self.active {
            self.active = self.drawable(pool.pool_type()).map(|p| (p, action));
        }
        self.refresh_available();
    }

    /// The active pool after paying its point, as it will be recorded.
    pub fn committed(&self) -> Option<(Pool, PoolAction)> {
        self.active.map(|(pool, action)| (pool.after_spending(1), action))
    }

    fn drawable(&self, pool_type: PoolType) -> Option<Pool> {
        self.unreserved
            .iter()
            .find(|p| p.pool_type() == pool_type)
            .filter(|p| !p.is_exhausted())
            .copied()
    }

    fn refresh_available(&mut self) {
        let paying = self.active.map(|(pool, _)| pool.pool_type());
        self.available = self
            .unreserved
            .iter()
            .map(|pool| {
                if Some(pool.pool_type()) == paying {
                    pool.after_spending(1)
                } else {
                    *pool
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools() -> PoolResolution {
        PoolResolution::new(vec![
            Pool::new(PoolType::Insight, 3),
            Pool::with_spent(PoolType::Vigor, 2, 2),
            Pool::new(PoolType::Flex, 1),
        ])
    }

    #[test]
    fn starts_with_base_pools() {
        let p = pools();
        assert_eq!(p.available().len(), 3);
        assert!(p.active().is_none());
    }

    #[test]
    fn one_active_pair_at_a_time() {
        let mut p = pools();
        assert!(p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus))));
        assert!(p.toggle_active(Some((PoolType::Flex, PoolAction::Improve))));
        let (pool, action) = p.active().unwrap();
        assert_eq!(pool.pool_type(), PoolType::Flex);
        assert_eq!(action, PoolAction::Improve);
    }

    #[test]
    fn same_pair_toggles_off() {
        let mut p = pools();
        p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus)));
        assert!(!p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus))));
        assert!(p.active().is_none());
    }

    #[test]
    fn none_clears() {
        let mut p = pools();
        p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus)));
        assert!(!p.toggle_active(None));
        assert!(p.active().is_none());
    }

    #[test]
    fn exhausted_or_missing_pool_cannot_be_active() {
        let mut p = pools();
        assert!(!p.toggle_active(Some((PoolType::Vigor, PoolAction::Bonus))));
        assert!(!p.toggle_active(Some((PoolType::Moxie, PoolAction::Bonus))));
    }

    #[test]
    fn reservation_spares_flex() {
        let mut p = pools();
        p.set_reserved(2);
        assert_eq!(p.pool(PoolType::Insight).unwrap().available(), 1);
        assert_eq!(p.pool(PoolType::Vigor).unwrap().spent(), 2);
        assert_eq!(p.pool(PoolType::Flex).unwrap().available(), 1);
    }

    #[test]
    fn reservation_replaces_not_accumulates() {
        let mut p = pools();
        p.set_reserved(2);
        p.set_reserved(1);
        assert_eq!(p.reserved(), 1);
        assert_eq!(p.pool(PoolType::Insight).unwrap().available(), 2);
    }

    #[test]
    fn reservation_drops_exhausted_active() {
        let mut p = pools();
        p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus)));
        p.set_reserved(3);
        assert!(p.active().is_none());
    }

    #[test]
    fn reservation_refreshes_active_snapshot() {
        let mut p = pools();
        p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus)));
        p.set_reserved(1);
        let (pool, _) = p.active().unwrap();
        assert_eq!(pool.spent(), 1);
    }

    #[test]
    fn committed_pays_one_point() {
        let mut p = pools();
        p.toggle_active(Some((PoolType::Insight, PoolAction::Improve)));
        let (pool, action) = p.committed().unwrap();
        assert_eq!(pool.spent(), 1);
        assert_eq!(action, PoolAction::Improve);
        assert_eq!(p.pool(PoolType::Insight), Some(&pool));
    }

    #[test]
    fn active_pair_shows_as_spent() {
        let mut p = PoolResolution::new(vec![Pool::new(PoolType::Insight, 1)]);
        p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus)));
        assert_eq!(p.pool(PoolType::Insight).unwrap().available(), 0);

        // Switching the action on the same pool still draws from it.
        assert!(p.toggle_active(Some((PoolType::Insight, PoolAction::Improve))));
        assert_eq!(p.pool(PoolType::Insight).unwrap().available(), 0);

        assert!(!p.toggle_active(Some((PoolType::Insight, PoolAction::Improve))));
        assert_eq!(p.pool(PoolType::Insight).unwrap().available(), 1);
    }

    #[test]
    fn reservation_and_active_point_stack() {
        let mut p = pools();
        p.toggle_active(Some((PoolType::Insight, PoolAction::Bonus)));
        p.set_reserved(1);
        assert_eq!(p.pool(PoolType::Insight).unwrap().available(), 1);
        assert_eq!(p.active().unwrap().0.spent(), 1);
        assert_eq!(p.committed().unwrap().0.spent(), 2);

        p.toggle_active(None);
        assert_eq!(p.pool(PoolType::Insight).unwrap().available(), 2);
    }
}
