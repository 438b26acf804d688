//! Request middleware.
//!
//! Purpose: correlate each request with a trace identifier carried through
//! logs, error payloads and the `trace-id` response header.

pub mod trace;

pub use trace::Trace;
