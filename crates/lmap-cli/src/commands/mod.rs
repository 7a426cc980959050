//! Command implementations

pub(crate) mod common;
pub(crate) mod lineage;
pub(crate) mod parse;
pub(crate) mod render;
