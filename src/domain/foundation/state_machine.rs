//! State machine trait for status enums.
//!
//! Gives lifecycle enums one place to declare their edge set. Role-dependent
//! rules live one level up, in the complaint transition policy; this trait
//! only knows the raw lifecycle graph.

use std::fmt;

/// Trait for status enums that represent state machines.
///
/// Implementors list the outgoing edges of each state; `can_transition_to`
/// is derived from that list.
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }
}
