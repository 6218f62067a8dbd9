//! Unit tests for role ranking and rank-derived policy checks.

use crate::access::domain::Role;
use rstest::rstest;

#[test]
fn ranks_are_strictly_ordered() {
    let ranks: Vec<u8> = Role::ALL.into_iter().map(Role::rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn has_permission_matches_rank_comparison_for_all_pairs() {
    for actor in Role::ALL {
        for required in Role::ALL {
            assert_eq!(
                actor.has_permission(required),
                actor.rank() >= required.rank(),
                "{actor} vs {required}"
            );
        }
    }
}

#[rstest]
#[case(Role::Superadmin, true)]
#[case(Role::Director, true)]
#[case(Role::DeputyDirector, false)]
#[case(Role::Manager, false)]
#[case(Role::Incharge, false)]
#[case(Role::Employee, false)]
fn close_and_edit_ceilings(#[case] role: Role, #[case] expected: bool) {
    assert_eq!(role.can_close_task(), expected);
    assert_eq!(role.can_edit_task(), expected);
}

#[rstest]
#[case(Role::Superadmin, true)]
#[case(Role::Director, false)]
#[case(Role::Employee, false)]
fn superadmin_only_checks(#[case] role: Role, #[case] expected: bool) {
    assert_eq!(role.can_access_database(), expected);
    assert_eq!(role.can_manage_users(), expected);
}

#[test]
fn visible_roles_include_self_and_subordinates() {
    let visible = Role::Manager.visible_roles();
    assert_eq!(
        visible,
        vec![Role::Employee, Role::Incharge, Role::Manager]
    );
}

#[test]
fn assignable_roles_exclude_self_rank() {
    let assignable = Role::Superadmin.assignable_roles();
    assert_eq!(assignable.len(), 5);
    assert!(!assignable.contains(&Role::Superadmin));

    assert!(Role::Employee.assignable_roles().is_empty());
}

#[rstest]
#[case(Role::Incharge, Role::Manager, false)]
#[case(Role::Director, Role::Manager, true)]
#[case(Role::Superadmin, Role::Superadmin, false)]
#[case(Role::Manager, Role::Manager, false)]
#[case(Role::Superadmin, Role::Director, true)]
fn modify_user_role_requires_strictly_greater_rank(
    #[case] actor: Role,
    #[case] target: Role,
    #[case] expected: bool,
) {
    assert_eq!(actor.can_modify_user_role(target), expected);
}

#[rstest]
#[case("superadmin", Role::Superadmin)]
#[case("deputy_director", Role::DeputyDirector)]
#[case(" Employee ", Role::Employee)]
fn parse_round_trips_storage_form(#[case] input: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(input), Ok(expected));
    assert_eq!(Role::try_from(expected.as_str()), Ok(expected));
}

#[test]
fn parse_rejects_unknown_role() {
    assert!(Role::try_from("chief").is_err());
}
