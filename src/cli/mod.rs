//! CLI module for the mim-mapper binary

pub mod output;
