//! Who may move a complaint where.
//!
//! A declarative table of `(role, current status) -> allowed next statuses`.
//! Customers have no rows: they never change status. Admins have no row for
//! `filed` because they do not stamp an assignee, and a non-filed complaint
//! must always carry one.

use crate::domain::foundation::{Role, StateMachine};

use super::ComplaintStatus;
use ComplaintStatus::{Assigned, Completed, Filed, Pending, Rejected};

const WORKING: &[ComplaintStatus] = &[Assigned, Pending, Completed, Rejected];
const RECORD_RESOLUTION: &[ComplaintStatus] = &[Completed];
const NONE: &[ComplaintStatus] = &[];

/// One row of the transition table.
#[derive(Debug, Clone, Copy)]
pub struct PolicyRow {
    pub role: Role,
    pub from: ComplaintStatus,
    pub to: &'static [ComplaintStatus],
}

const TABLE: &[PolicyRow] = &[
    PolicyRow { role: Role::Technician, from: Filed, to: WORKING },
    PolicyRow { role: Role::Technician, from: Assigned, to: WORKING },
    PolicyRow { role: Role::Technician, from: Pending, to: WORKING },
    PolicyRow { role: Role::Technician, from: Completed, to: RECORD_RESOLUTION },
    PolicyRow { role: Role::Admin, from: Assigned, to: WORKING },
    PolicyRow { role: Role::Admin, from: Pending, to: WORKING },
    PolicyRow { role: Role::Admin, from: Completed, to: RECORD_RESOLUTION },
];

/// Transition policy backed by the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionPolicy;

impl TransitionPolicy {
    /// All rows, for inspection and exhaustive tests.
    pub fn rows() -> &'static [PolicyRow] {
        TABLE
    }

    /// Statuses `role` may move a complaint to from `from`.
    pub fn allowed_targets(role: Role, from: ComplaintStatus) -> &'static [ComplaintStatus] {
        TABLE
            .iter()
            .find(|row| row.role == role && row.from == from)
            .map(|row| row.to)
            .unwrap_or(NONE)
    }

    /// The move must be an edge of the lifecycle graph and listed for `role`.
    pub fn permits(role: Role, from: ComplaintStatus, to: ComplaintStatus) -> bool {
        from.can_transition_to(&to) && Self::allowed_targets(role, from).contains(&to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::select;

    fn any_role() -> impl Strategy<Value = Role> {
        select(vec![Role::Customer, Role::Technician, Role::Admin])
    }

    fn any_status() -> impl Strategy<Value = ComplaintStatus> {
        select(ComplaintStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn every_permitted_move_is_a_lifecycle_edge(
            role in any_role(),
            from in any_status(),
            to in any_status(),
        ) {
            if TransitionPolicy::permits(role, from, to) {
                prop_assert!(from.can_transition_to(&to));
            }
        }

        #[test]
        fn customers_are_never_permitted(from in any_status(), to in any_status()) {
            prop_assert!(!TransitionPolicy::permits(Role::Customer, from, to));
        }

        #[test]
        fn nobody_moves_a_complaint_back_into_the_pool(role in any_role(), from in any_status()) {
            prop_assert!(!TransitionPolicy::permits(role, from, ComplaintStatus::Filed));
        }

        #[test]
        fn rejected_is_final_for_everyone(role in any_role(), to in any_status()) {
            prop_assert!(!TransitionPolicy::permits(role, ComplaintStatus::Rejected, to));
        }
    }

    #[test]
    fn every_table_entry_is_a_lifecycle_edge() {
        for row in TransitionPolicy::rows() {
            for to in row.to {
                assert!(row.from.can_transition_to(to), "{:?} -> {:?}", row.from, to);
            }
        }
    }

    #[test]
    fn admins_cannot_move_filed_complaints() {
        assert!(TransitionPolicy::allowed_targets(Role::Admin, Filed).is_empty());
    }

    #[test]
    fn technician_may_pause_and_resume() {
        assert!(TransitionPolicy::permits(Role::Technician, Assigned, Pending));
        assert!(TransitionPolicy::permits(Role::Technician, Pending, Assigned));
    }

    #[test]
    fn completed_only_accepts_resolution_recording() {
        for role in [Role::Technician, Role::Admin] {
            assert_eq!(TransitionPolicy::allowed_targets(role, Completed), &[Completed]);
        }
    }

    #[test]
    fn table_has_no_duplicate_rows() {
        let rows = TransitionPolicy::rows();
        for (i, a) in rows.iter().enumerate() {
            for b in &rows[i + 1..] {
                assert!(!(a.role == b.role && a.from == b.from), "{:?}", a);
            }
        }
    }
}
