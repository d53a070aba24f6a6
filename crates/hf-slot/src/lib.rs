//! # hf-slot - Sticky-tile respin slot engine
//!
//! Resolution engine for a 5×3, 25-line slot with wild substitution and a
//! HOLD-triggered respin bonus. The engine is presentation-agnostic: it takes a
//! bet and a random source and returns plain result values. It never sleeps,
//! draws or owns a balance.
//!
//! ## Features
//!
//! - **Spin Resolver**: one uniform stop per reel, visible grid from the strips
//! - **Payline Evaluator**: leftmost non-wild target, run-length matching, 3/4/5 tiers
//! - **Feature Trigger**: enough HOLD symbols start the respin round
//! - **Respin State Machine**: explicit one-tick `advance`, skip at any point
//! - **Prize Revealer**: per-tile prizes with Mini/Minor/Major jackpots
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine
//!     │
//!     ├── GameConfig (ReelSet, PayTable, paylines, RespinConfig, PrizeConfig)
//!     │
//!     ├── spin(bet, rng) ──▶ SpinOutcome { grid, line_wins, total_win, feature_triggered }
//!     │
//!     └── start_feature ──▶ RespinFeature
//!                               │  advance(rng) × N ──▶ TickOutcome
//!                               v
//!                           PrizeBoard
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use hf_slot::{Bet, SlotEngine};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let engine = SlotEngine::three_pigs();
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = engine.spin(Bet::new(1)?, &mut rng);
//!
//! if let Some(mut feature) = engine.start_feature(&outcome) {
//!     while !feature.is_resolved() {
//!         engine.advance(&mut feature, &mut rng)?;
//!     }
//!     println!("bonus win {}", feature.total_win());
//! }
//! # Ok::<(), hf_slot::SlotError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod paytable;
pub mod rng;
pub mod spin;
pub mod symbols;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use features::*;
pub use paytable::*;
pub use rng::*;
pub use spin::*;
pub use symbols::*;
