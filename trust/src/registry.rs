//! The trust registry — member records and trust accounting.

use std::collections::{HashMap, HashSet};

use agora_store::{StoreError, TrustStore};
use agora_types::{MemberAddress, Weight};
use serde::{Deserialize, Serialize};

use crate::error::TrustError;

/// Per-member record. Created lazily on first interaction, never deleted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct User {
    /// Accrued trust. Monotonically non-decreasing; no upper bound.
    pub trust_score: u64,
}

/// Meta-store key holding the serialized governance-member set.
const MEMBERS_META_KEY: &str = "trust/members";

/// The trust registry — governance-member set and per-member trust scores.
pub struct TrustRegistry {
    /// Members allowed to grant trust.
    members: HashSet<MemberAddress>,
    /// All users the registry has seen.
    users: HashMap<MemberAddress, User>,
    /// Trust granted per `add_trust` call.
    trust_unit: u64,
}

impl TrustRegistry {
    pub fn new(trust_unit: u64) -> Self {
        Self {
            members: HashSet::new(),
            users: HashMap::new(),
            trust_unit,
        }
    }

    /// Register a governance member. Idempotent; returns whether the member
    /// was newly inserted. The owner gate is applied by the caller.
    pub fn add_governance_member(&mut self, member: MemberAddress) -> bool {
        self.members.insert(member)
    }

    pub fn is_governance_member(&self, member: &MemberAddress) -> bool {
        self.members.contains(member)
    }

    /// Ensure a user record exists for `member`.
    pub fn touch(&mut self, member: MemberAddress) {
        self.users.entry(member).or_default();
    }

    /// Whether the registry has ever seen this member.
    pub fn knows(&self, member: &MemberAddress) -> bool {
        self.users.contains_key(member)
    }

    /// Grant one trust unit to `target`. The caller must be a governance
    /// member; the target record is created if absent. Returns the new score.
    pub fn add_trust(
        &mut self,
        caller: &MemberAddress,
        target: MemberAddress,
    ) -> Result<u64, TrustError> {
        if !self.is_governance_member(caller) {
            return Err(TrustError::NotGovernanceMember(caller.clone()));
        }
        let user = self.users.entry(target).or_default();
        user.trust_score = user.trust_score.saturating_add(self.trust_unit);
        Ok(user.trust_score)
    }

    /// The trust score of a member, `None` if never seen.
    pub fn trust_score(&self, member: &MemberAddress) -> Option<u64> {
        self.users.get(member).map(|u| u.trust_score)
    }

    /// Base voting weight: `1 + trust_score`. Total over all members — a
    /// member with no record weighs 1, same as one with zero trust.
    pub fn base_weight(&self, member: &MemberAddress) -> Weight {
        1 + self.trust_score(member).unwrap_or(0) as Weight
    }

    /// The power `member` would exercise by casting a vote directly.
    /// Pure query; fails for a member the registry has never seen.
    pub fn effective_weight(&self, member: &MemberAddress) -> Result<Weight, TrustError> {
        match self.users.get(member) {
            Some(user) => Ok(1 + user.trust_score as Weight),
            None => Err(TrustError::UnknownMember(member.clone())),
        }
    }
}

impl TrustRegistry {
    /// Persist the registry to a trust store.
    pub fn save_to_store(&self, store: &dyn TrustStore) -> Result<(), StoreError> {
        let bytes = bincode::serialize(&self.members)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        store.put_meta(MEMBERS_META_KEY, &bytes)?;

        for (member, user) in &self.users {
            let bytes = bincode::serialize(user)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            store.put_user(member, &bytes)?;
        }
        Ok(())
    }

    /// Restore a registry from a trust store.
    pub fn load_from_store(
        store: &dyn TrustStore,
        trust_unit: u64,
    ) -> Result<Self, StoreError> {
        let members = match store.get_meta(MEMBERS_META_KEY)? {
            Some(bytes) => bincode::deserialize::<HashSet<MemberAddress>>(&bytes)
                .map_err(|e| StoreError::Corruption(e.to_string()))?,
            None => HashSet::new(),
        };

        let mut users = HashMap::new();
        for (member, bytes) in store.iter_users()? {
            let user: User = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            users.insert(member, user);
        }

        Ok(Self {
            members,
            users,
            trust_unit,
        })
    }
}
