//! Library side of the `mcsync` command line tool.

pub mod commands;
pub mod document;
pub mod edit;
pub mod logging;
pub mod summary;
