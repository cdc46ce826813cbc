//! fontbake CLI library.

pub mod cli;
