//! Interactive tutor-chat client runtime.
//!
//! The session state machine lives in [`app::App`]: it owns the transcript,
//! serializes user and environment events, and is the only component allowed
//! to reset or append to the conversation history. Network calls go through
//! the `tutor_api` transport crate via the [`app::HostOps`] seam, and
//! rendering goes through the [`sink::PresentationSink`] seam, so both sides
//! can be replaced by test doubles.
//!
//! Concurrency contract: the `App` is driven from one logical task. Fetches
//! run in spawned tasks owned by [`runtime::RuntimeController`]; their
//! outcomes return over a channel tagged with the session generation they
//! were issued under, and stale outcomes are discarded rather than applied
//! to a transcript that has since been reset.

pub mod app;
pub mod commands;
pub mod runtime;
pub mod session;
pub mod sink;
