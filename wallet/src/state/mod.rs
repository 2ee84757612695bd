//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `storage` owns the single persisted key (the bearer token); `session`
//! layers the in-memory session on top of it and is the only writer.

pub mod session;
pub mod storage;
