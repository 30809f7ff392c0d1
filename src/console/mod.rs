//! Console module - logging facilities.
//!
//! Test progress is written by the runner itself; this module only carries
//! the coloured `log` backend.

pub mod logger;

pub use logger::init as init_logger;
