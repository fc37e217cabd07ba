//! Session classification for the academy gateway.
//!
//! Two different-strength notions of "authenticated" live here on purpose:
//! the auth callback trusts cookie presence (a fast heuristic), while the
//! root page asks the identity backend (authoritative). Collapsing them into
//! one check is how the weak heuristic ends up where the strong one was
//! intended, so they stay two named operations.

#![deny(unsafe_code)]

mod classifier;
mod guard;
mod lookup;

pub use classifier::classify_callback;
pub use guard::{RouteGuard, DEFAULT_PUBLIC_ROUTES};
pub use lookup::{classify_root, SessionLookup, SessionLookupError};
