//! Hand validation rules.
//!
//! Everything here is a pure function of its inputs; sessions call into it
//! when a player declares a win.

pub mod validator;

pub use validator::{
    can_partition, find_partition, Group, GroupShape, HandValidator, MIN_GROUP_SIZE,
    WINNING_HAND_SIZE,
};
