//! # hf-sim
//!
//! Simulation and session driving for the hf-slot engine.
//!
//! ## Features
//!
//! - **Batch Simulation**: Seeded, rayon-parallel RTP runs with reproducible batches
//! - **Session Driver**: Balance and bet bookkeeping around base spins and respin ticks
//! - **Feature Scheduler**: Drives a respin round one tick at a time to completion
//! - **Reports**: Text, JSON and Markdown summaries of a run
//!
//! ## Example
//!
//! ```rust,ignore
//! use hf_sim::{SimConfig, Simulator};
//! use hf_slot::SlotEngine;
//!
//! let config = SimConfig::ci().with_seed(42);
//! let report = Simulator::new(SlotEngine::three_pigs(), config)?.run()?;
//! println!("{}", report.to_text());
//! ```

pub mod config;
pub mod generators;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod simulator;
pub mod stats;

pub use config::SimConfig;
pub use generators::*;
pub use report::{ReportFormat, SimReport};
pub use scheduler::{FeatureRun, run_feature, run_feature_with};
pub use session::{Session, SessionEvent};
pub use simulator::Simulator;
pub use stats::{JackpotCounts, SessionStats};

use thiserror::Error;

/// Errors raised by the simulator and session driver
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Balance {balance} cannot cover bet {bet}")]
    InsufficientBalance { balance: u64, bet: u64 },

    #[error("A respin feature is in progress")]
    FeatureActive,

    #[error("No respin feature is in progress")]
    NoActiveFeature,

    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Slot(#[from] hf_slot::SlotError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<hf_slot::FeatureError> for SimError {
    fn from(err: hf_slot::FeatureError) -> Self {
        Self::Slot(err.into())
    }
}

impl From<hf_slot::BetError> for SimError {
    fn from(err: hf_slot::BetError) -> Self {
        Self::Slot(err.into())
    }
}

impl From<hf_slot::ConfigError> for SimError {
    fn from(err: hf_slot::ConfigError) -> Self {
        Self::Slot(err.into())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
