//! Unit tests for capability set membership.

use crate::access::domain::{Capability, CapabilitySet};

#[test]
fn empty_set_contains_nothing() {
    let set = CapabilitySet::empty();
    assert!(set.is_empty());
    for capability in Capability::ALL {
        assert!(!set.contains(capability));
    }
}

#[test]
fn grant_and_revoke_are_per_capability() {
    let mut set = CapabilitySet::empty()
        .with(Capability::CreateTasks)
        .with(Capability::RevertCompletions);

    assert!(set.contains(Capability::CreateTasks));
    assert!(set.contains(Capability::RevertCompletions));
    assert!(!set.contains(Capability::ApproveCompletions));

    set.revoke(Capability::CreateTasks);
    assert!(!set.contains(Capability::CreateTasks));
    assert!(set.contains(Capability::RevertCompletions));

    set.grant(Capability::ManageReceives);
    assert!(set.contains(Capability::ManageReceives));
}

#[test]
fn collects_from_iterator() {
    let set: CapabilitySet = Capability::ALL.into_iter().collect();
    for capability in Capability::ALL {
        assert!(set.contains(capability));
    }
}
