//! Client-side authentication state.
//!
//! This module provides:
//! - `Session`: token/user/expiry lifecycle over an injected `Storage`
//! - `Clock`: the wall-clock capability sessions compare expiry against
//!
//! The session record is the token plus an absolute epoch-millisecond expiry.
//! A token without an expiry is treated as absent.

pub mod clock;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use session::{Session, EXPIRY_KEY, TOKEN_KEY, USER_KEY};
