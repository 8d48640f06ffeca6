//! Per-category vote delegation — entrust voting power to a representative.
//!
//! Delegations form a directed graph per category. Setting one never checks
//! acyclicity; chains are resolved lazily at vote-cast time with a visited
//! set and a depth bound, and a chain that cycles or runs too deep resolves
//! to nothing — it contributes zero weight rather than failing the vote.

use std::collections::{HashMap, HashSet, VecDeque};

use agora_types::{CategoryId, MemberAddress};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Manages per-category delegation, including transitive resolution.
pub struct DelegationResolver {
    /// (delegator, category) → delegate.
    delegations: HashMap<(MemberAddress, CategoryId), MemberAddress>,
    /// Reverse index: (delegate, category) → set of direct delegators.
    reverse: HashMap<(MemberAddress, CategoryId), HashSet<MemberAddress>>,
    /// Maximum transitive chain depth.
    max_depth: usize,
}

impl DelegationResolver {
    pub fn new(max_depth: usize) -> Self {
        Self {
            delegations: HashMap::new(),
            reverse: HashMap::new(),
            max_depth,
        }
    }

    /// Set or overwrite the delegation of `from` for one category.
    pub fn set_delegation(
        &mut self,
        from: &MemberAddress,
        category: CategoryId,
        to: &MemberAddress,
    ) -> Result<(), GovernanceError> {
        if from == to {
            return Err(GovernanceError::SelfDelegation);
        }
        if !to.is_valid() {
            return Err(GovernanceError::InvalidDelegate(to.clone()));
        }
        if let Some(old_to) = self.delegations.get(&(from.clone(), category)) {
            let key = (old_to.clone(), category);
            if let Some(set) = self.reverse.get_mut(&key) {
                set.remove(from);
                if set.is_empty() {
                    self.reverse.remove(&key);
                }
            }
        }
        self.delegations
            .insert((from.clone(), category), to.clone());
        self.reverse
            .entry((to.clone(), category))
            .or_default()
            .insert(from.clone());
        Ok(())
    }

    /// Remove the delegation of `from` for one category, if any.
    pub fn undelegate(&mut self, from: &MemberAddress, category: CategoryId) {
        if let Some(old_to) = self.delegations.remove(&(from.clone(), category)) {
            let key = (old_to, category);
            if let Some(set) = self.reverse.get_mut(&key) {
                set.remove(from);
                if set.is_empty() {
                    self.reverse.remove(&key);
                }
            }
        }
    }

    /// The direct delegate of `from` for a category (`None` if undelegated).
    pub fn delegate_of(
        &self,
        from: &MemberAddress,
        category: CategoryId,
    ) -> Option<&MemberAddress> {
        self.delegations.get(&(from.clone(), category))
    }

    /// Resolve the terminal delegate of `from` for a category.
    /// Returns `None` if the chain contains a cycle or exceeds the depth
    /// bound; a member with no delegation resolves to themselves.
    pub fn resolve(&self, from: &MemberAddress, category: CategoryId) -> Option<MemberAddress> {
        let mut current = from.clone();
        let mut visited = HashSet::new();
        for _ in 0..self.max_depth {
            if !visited.insert(current.clone()) {
                return None; // Cycle detected
            }
            match self.delegations.get(&(current.clone(), category)) {
                Some(next) => current = next.clone(),
                None => return Some(current), // End of chain
            }
        }
        None // Exceeded max depth
    }

    /// Every member whose delegation chain for `category` terminates at
    /// `target`, excluding `target` itself.
    ///
    /// Collects candidates via reverse-index BFS, then verifies each one
    /// with [`resolve`](Self::resolve) — a candidate can sit upstream of the
    /// target yet terminate elsewhere or in a cycle. The result is sorted so
    /// callers observe a deterministic order.
    pub fn delegators_resolving_to(
        &self,
        target: &MemberAddress,
        category: CategoryId,
    ) -> Vec<MemberAddress> {
        let mut candidates = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(target.clone());
        while let Some(current) = queue.pop_front() {
            if let Some(delegators) = self.reverse.get(&(current, category)) {
                for d in delegators {
                    if candidates.insert(d.clone()) {
                        queue.push_back(d.clone());
                    }
                }
            }
        }

        let mut resolved = Vec::new();
        for candidate in candidates {
            if candidate == *target {
                continue;
            }
            match self.resolve(&candidate, category) {
                Some(terminal) if terminal == *target => resolved.push(candidate),
                Some(_) => {}
                None => tracing::warn!(
                    member = %candidate,
                    category = %category,
                    "delegation chain pruned (cycle or depth limit), contributes zero weight"
                ),
            }
        }
        resolved.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        resolved
    }
}

/// Meta-store key used for persisting the delegation graph.
const DELEGATIONS_META_KEY: &str = "governance/delegations";

/// Serializable snapshot of the delegation graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DelegationSnapshot {
    pub delegations: HashMap<(MemberAddress, CategoryId), MemberAddress>,
    pub max_depth: usize,
}

impl DelegationResolver {
    /// Serialize the delegation graph for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let snapshot = DelegationSnapshot {
            delegations: self.delegations.clone(),
            max_depth: self.max_depth,
        };
        bincode::serialize(&snapshot).unwrap_or_default()
    }

    /// Restore the delegation graph from serialized bytes, rebuilding the
    /// reverse index. Falls back to an empty resolver on corrupt input.
    pub fn load_state(data: &[u8], default_max_depth: usize) -> Self {
        match bincode::deserialize::<DelegationSnapshot>(data) {
            Ok(snapshot) => {
                let mut reverse =
                    HashMap::<(MemberAddress, CategoryId), HashSet<MemberAddress>>::new();
                for ((from, category), to) in &snapshot.delegations {
                    reverse
                        .entry((to.clone(), *category))
                        .or_default()
                        .insert(from.clone());
                }
                Self {
                    delegations: snapshot.delegations,
                    reverse,
                    max_depth: snapshot.max_depth,
                }
            }
            Err(_) => Self::new(default_max_depth),
        }
    }

    /// The meta-store key used for delegation persistence.
    pub fn meta_key() -> &'static str {
        DELEGATIONS_META_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> MemberAddress {
        MemberAddress::new(format!("agr_{name}"))
    }

    const CAT: CategoryId = CategoryId::GENERAL;

    #[test]
    fn test_simple_delegation() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let b = member("b");
        resolver.set_delegation(&a, CAT, &b).unwrap();

        assert_eq!(resolver.resolve(&a, CAT), Some(b.clone()));
        assert_eq!(resolver.delegators_resolving_to(&b, CAT), vec![a]);
    }

    #[test]
    fn test_transitive_chain() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let b = member("b");
        let c = member("c");
        resolver.set_delegation(&a, CAT, &b).unwrap();
        resolver.set_delegation(&b, CAT, &c).unwrap();

        assert_eq!(resolver.resolve(&a, CAT), Some(c.clone()));
        assert_eq!(resolver.resolve(&b, CAT), Some(c.clone()));
        // Both A and B terminate at C; no one terminates at B.
        assert_eq!(
            resolver.delegators_resolving_to(&c, CAT),
            vec![a.clone(), b.clone()]
        );
        assert!(resolver.delegators_resolving_to(&b, CAT).is_empty());
    }

    #[test]
    fn test_cycle_resolves_to_none() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let b = member("b");
        resolver.set_delegation(&a, CAT, &b).unwrap();
        resolver.set_delegation(&b, CAT, &a).unwrap();

        assert_eq!(resolver.resolve(&a, CAT), None);
        assert_eq!(resolver.resolve(&b, CAT), None);
        assert!(resolver.delegators_resolving_to(&a, CAT).is_empty());
        assert!(resolver.delegators_resolving_to(&b, CAT).is_empty());
    }

    #[test]
    fn test_max_depth_exceeded() {
        let mut resolver = DelegationResolver::new(5);
        let members: Vec<MemberAddress> = (0..7).map(|i| member(&format!("m{i}"))).collect();
        for i in 0..6 {
            resolver
                .set_delegation(&members[i], CAT, &members[i + 1])
                .unwrap();
        }

        // Chain length is 6 hops, max_depth is 5 → pruned.
        assert_eq!(resolver.resolve(&members[0], CAT), None);
        // Shorter chains still work.
        assert_eq!(
            resolver.resolve(&members[3], CAT),
            Some(members[6].clone())
        );
    }

    #[test]
    fn test_self_delegation_rejected() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        assert!(matches!(
            resolver.set_delegation(&a, CAT, &a),
            Err(GovernanceError::SelfDelegation)
        ));
    }

    #[test]
    fn test_null_shaped_delegate_rejected() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let null = MemberAddress::new("agr_");
        assert!(matches!(
            resolver.set_delegation(&a, CAT, &null),
            Err(GovernanceError::InvalidDelegate(_))
        ));
    }

    #[test]
    fn test_overwrite_moves_delegation() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let b = member("b");
        let c = member("c");
        resolver.set_delegation(&a, CAT, &b).unwrap();
        resolver.set_delegation(&a, CAT, &c).unwrap();

        assert_eq!(resolver.resolve(&a, CAT), Some(c.clone()));
        assert!(resolver.delegators_resolving_to(&b, CAT).is_empty());
        assert_eq!(resolver.delegators_resolving_to(&c, CAT), vec![a]);
    }

    #[test]
    fn test_undelegate_restores_self_resolution() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let b = member("b");
        resolver.set_delegation(&a, CAT, &b).unwrap();
        resolver.undelegate(&a, CAT);

        assert_eq!(resolver.resolve(&a, CAT), Some(a.clone()));
        assert!(resolver.delegators_resolving_to(&b, CAT).is_empty());
    }

    #[test]
    fn test_categories_are_independent() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let b = member("b");
        let c = member("c");
        let economics = CategoryId::new(7);
        resolver.set_delegation(&a, CAT, &b).unwrap();
        resolver.set_delegation(&a, economics, &c).unwrap();

        assert_eq!(resolver.resolve(&a, CAT), Some(b));
        assert_eq!(resolver.resolve(&a, economics), Some(c));
    }

    #[test]
    fn test_fan_in() {
        let mut resolver = DelegationResolver::new(10);
        let delegate = member("delegate");
        for i in 0..5 {
            let d = member(&format!("d{i}"));
            resolver.set_delegation(&d, CAT, &delegate).unwrap();
        }
        assert_eq!(resolver.delegators_resolving_to(&delegate, CAT).len(), 5);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut resolver = DelegationResolver::new(10);
        let a = member("a");
        let b = member("b");
        resolver.set_delegation(&a, CAT, &b).unwrap();

        let bytes = resolver.save_state();
        let restored = DelegationResolver::load_state(&bytes, 10);
        assert_eq!(restored.resolve(&a, CAT), Some(b.clone()));
        assert_eq!(restored.delegators_resolving_to(&b, CAT), vec![a]);
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_empty() {
        let restored = DelegationResolver::load_state(b"not a snapshot", 10);
        let a = member("a");
        assert_eq!(restored.resolve(&a, CAT), Some(a));
    }
}
