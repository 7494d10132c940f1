//! File helpers shared by the option store and site snapshots.

pub mod atomic;
pub mod backup;

pub use atomic::write_atomic;
