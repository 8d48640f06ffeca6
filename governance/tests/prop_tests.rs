use proptest::prelude::*;

use agora_governance::VotingEngine;
use agora_trust::TrustRegistry;
use agora_types::{CategoryId, GovParams, MemberAddress, Timestamp, Weight};

const CAT: CategoryId = CategoryId::GENERAL;

fn member(i: usize) -> MemberAddress {
    MemberAddress::new(format!("agr_member{i}"))
}

/// Build a registry where member `i` holds `trust[i]` trust.
fn registry(trust: &[u64]) -> TrustRegistry {
    let mut registry = TrustRegistry::new(1);
    let gov = MemberAddress::new("agr_governor");
    registry.add_governance_member(gov.clone());
    for (i, score) in trust.iter().enumerate() {
        for _ in 0..*score {
            registry.add_trust(&gov, member(i)).unwrap();
        }
    }
    registry
}

proptest! {
    /// Across any delegation graph (cycles included) and any cast order,
    /// the tally equals exactly the sum of base weights of the members
    /// marked as voted — every member's weight is counted at most once,
    /// and counted members are exactly the marked ones.
    #[test]
    fn tally_equals_base_weight_of_marked_voters(
        trust in proptest::collection::vec(0u64..4, 8),
        delegations in proptest::collection::vec(proptest::option::of(0usize..8), 8),
        casts in proptest::collection::vec((0usize..8, any::<bool>()), 1..8),
    ) {
        let registry = registry(&trust);
        let mut engine = VotingEngine::new(&GovParams::default());
        let now = Timestamp::new(1000);

        for (i, delegate) in delegations.iter().enumerate() {
            if let Some(d) = delegate {
                if *d != i {
                    engine.set_delegation(&member(i), CAT, &member(*d)).unwrap();
                }
            }
        }

        let id = engine
            .create_proposal(MemberAddress::new("agr_owner"), "p", CAT, now)
            .unwrap();

        for (i, support) in &casts {
            // Later casts by already-counted members must fail cleanly.
            let _ = engine.cast_vote(&registry, &member(*i), id, *support, now);
        }

        let proposal = engine.proposal(id).unwrap();
        let marked_weight: Weight = proposal
            .has_voted
            .iter()
            .map(|m| registry.base_weight(m))
            .sum();
        prop_assert_eq!(proposal.votes_for + proposal.votes_against, marked_weight);
    }

    /// A second cast by the same member always fails and never changes the
    /// tally, whatever the delegation graph looks like.
    #[test]
    fn second_cast_never_recounts(
        trust in proptest::collection::vec(0u64..4, 4),
        delegations in proptest::collection::vec(proptest::option::of(0usize..4), 4),
        voter in 0usize..4,
    ) {
        let registry = registry(&trust);
        let mut engine = VotingEngine::new(&GovParams::default());
        let now = Timestamp::new(1000);

        for (i, delegate) in delegations.iter().enumerate() {
            if let Some(d) = delegate {
                if *d != i {
                    engine.set_delegation(&member(i), CAT, &member(*d)).unwrap();
                }
            }
        }

        let id = engine
            .create_proposal(MemberAddress::new("agr_owner"), "p", CAT, now)
            .unwrap();
        engine.cast_vote(&registry, &member(voter), id, true, now).unwrap();

        let before = {
            let p = engine.proposal(id).unwrap();
            (p.votes_for, p.votes_against)
        };
        prop_assert!(engine.cast_vote(&registry, &member(voter), id, false, now).is_err());
        let p = engine.proposal(id).unwrap();
        prop_assert_eq!((p.votes_for, p.votes_against), before);
    }

    /// Resolution terminates on every graph shape; a resolved terminal is
    /// never a member with an outgoing delegation.
    #[test]
    fn resolution_terminates_at_undelegated_member(
        delegations in proptest::collection::vec(proptest::option::of(0usize..8), 8),
    ) {
        let mut engine = VotingEngine::new(&GovParams::default());
        for (i, delegate) in delegations.iter().enumerate() {
            if let Some(d) = delegate {
                if *d != i {
                    engine.set_delegation(&member(i), CAT, &member(*d)).unwrap();
                }
            }
        }
        for i in 0..8 {
            if let Some(terminal) = engine.delegations().resolve(&member(i), CAT) {
                prop_assert!(engine.delegations().delegate_of(&terminal, CAT).is_none());
            }
        }
    }
}
