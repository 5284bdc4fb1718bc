//! Editing and execution front-end for the PseudoLang interpreted
//! language.
//!
//! The language runtime itself is an external artifact — an in-process
//! engine supplied through [`backend::Engine`], or a remote execution
//! server spoken to over HTTP. This crate owns everything around it:
//! the editable source buffer, durable settings, backend lifecycle, and
//! the per-session run state machine.

pub mod backend;
pub mod cli;
pub mod model;
pub mod session;
pub mod storage;
