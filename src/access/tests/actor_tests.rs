//! Unit tests for actor policy checks.

use crate::access::domain::{Actor, Capability, CapabilitySet, Role, UserId};
use rstest::rstest;

fn actor(role: Role, capabilities: CapabilitySet) -> Actor {
    Actor::new(UserId::new(), role, capabilities)
}

#[rstest]
#[case(Role::Employee, false, false)]
#[case(Role::Employee, true, true)]
#[case(Role::Superadmin, false, true)]
#[case(Role::Director, false, false)]
fn revert_requires_grant_unless_superadmin(
    #[case] role: Role,
    #[case] granted: bool,
    #[case] expected: bool,
) {
    let capabilities = if granted {
        CapabilitySet::empty().with(Capability::RevertCompletions)
    } else {
        CapabilitySet::empty()
    };
    assert_eq!(actor(role, capabilities).can_revert_task(), expected);
}

#[rstest]
#[case(Role::Employee, false, false)]
#[case(Role::Incharge, true, true)]
#[case(Role::Superadmin, false, true)]
fn acknowledge_follows_same_override_pattern(
    #[case] role: Role,
    #[case] granted: bool,
    #[case] expected: bool,
) {
    let capabilities = if granted {
        CapabilitySet::empty().with(Capability::ApproveCompletions)
    } else {
        CapabilitySet::empty()
    };
    assert_eq!(actor(role, capabilities).can_acknowledge_task(), expected);
}

#[rstest]
#[case(Role::Employee, false, false)]
#[case(Role::Employee, true, true)]
#[case(Role::Manager, false, true)]
#[case(Role::Director, false, true)]
fn create_tasks_accepts_grant_or_manager_rank(
    #[case] role: Role,
    #[case] granted: bool,
    #[case] expected: bool,
) {
    let capabilities = if granted {
        CapabilitySet::empty().with(Capability::CreateTasks)
    } else {
        CapabilitySet::empty()
    };
    assert_eq!(actor(role, capabilities).can_create_tasks(), expected);
}

#[rstest]
#[case(Role::Superadmin, false, true)]
#[case(Role::Director, false, false)]
#[case(Role::Employee, true, true)]
fn manage_receives_accepts_superadmin_or_grant(
    #[case] role: Role,
    #[case] granted: bool,
    #[case] expected: bool,
) {
    let capabilities = if granted {
        CapabilitySet::empty().with(Capability::ManageReceives)
    } else {
        CapabilitySet::empty()
    };
    assert_eq!(actor(role, capabilities).can_manage_receives(), expected);
}
