//! Game Logic
//!
//! Pure match semantics: input validation, battle sessions, the
//! matchmaking queue, and ladder ratings. Nothing in here touches the
//! network or the clock; callers pass timestamps in explicitly.

pub mod input;
pub mod matchmaking;
pub mod rating;
pub mod session;
pub mod validate;
