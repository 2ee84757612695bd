//! Networking modules for the wallet backend.
//!
//! DESIGN
//! ======
//! `types` holds the wire DTOs, `api` the bearer-authenticated client that
//! every view goes through, `error` its single failure type, and `token` the
//! unverified JWT payload decoding used to judge expiry on startup.

pub mod api;
pub mod error;
pub mod token;
pub mod types;
