//! Training and evaluation pipeline
//!
//! This module provides:
//! - The episode loop pairing the player with the environment
//! - Block statistics and resumable training results
//! - Observers recording progress during training

pub mod observers;
pub mod statistics;
pub mod training;

pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use statistics::{BlockSummary, TrainingResult};
pub use training::{TrainingConfig, TrainingPipeline};

pub use crate::ports::{Agent, Observer};
