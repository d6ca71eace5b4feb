// src/lib.rs
pub mod cli;
pub mod logging;
pub mod tags;

pub use tags::{TagRules, TagSet};
