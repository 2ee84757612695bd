//! View-side helpers shared by every front end.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules hold the decisions views would otherwise duplicate: which
//! routes need a session, what form input is acceptable, and how money and
//! timestamps are shown. None of them perform I/O.

pub mod format;
pub mod guard;
pub mod validate;
