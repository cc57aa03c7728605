//! Input readers.

pub mod olb;
