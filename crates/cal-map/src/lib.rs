//! Course matching for the course activity loader.
//!
//! A course becomes an activity only when a [`Matcher`] accepts it: one of
//! its instructors is in the [`IdentitySet`], its processing unit resolves
//! through the [`OrgUnitResolver`] to the rule's organizational unit, and
//! its status and term agree with the rule.

#![deny(unsafe_code)]

mod identity;
mod matcher;
mod resolver;

pub use identity::IdentitySet;
pub use matcher::{MatchFailure, Matcher};
pub use resolver::OrgUnitResolver;
