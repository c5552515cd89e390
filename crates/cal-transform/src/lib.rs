//! Turns matched courses into teaching activities.

#![deny(unsafe_code)]

mod activity;
mod dates;

pub use activity::{ActivityOptions, Transformer};
pub use dates::normalize_date;
