//! Bonus features
//!
//! ```text
//! base grid ── TriggerCheck ──▶ RespinFeature ──(advance × N)──▶ Resolved
//!                                                                   │
//!                                                        reveal_prizes ──▶ PrizeBoard
//! ```

mod prize;
mod respin;
mod trigger;

pub use prize::*;
pub use respin::*;
pub use trigger::*;
