//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the plain session snapshot read by guards and chrome, `session`
//! owns the transitions that produce it, and `notice` backs the toast tray.

pub mod auth;
pub mod notice;
pub mod session;
