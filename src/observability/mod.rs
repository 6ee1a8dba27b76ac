//! Tracing setup for the surface threads.
//!
//! The state-machine handlers instrument themselves with `tracing` spans and
//! structured events; this module wires those to a file-backed subscriber so
//! sessions can be reconstructed after the fact without attaching a debugger
//! to the host process.

pub mod init;

pub use init::init_tracing;
