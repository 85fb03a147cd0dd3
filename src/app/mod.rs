//! Application layer with dependency injection container.
//!
//! This module wires infrastructure (weight repositories) into domain objects
//! (the TD player and the random environment), following hexagonal
//! architecture principles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │          App (DI Container)          │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                       │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - BinaryWeightRepository            │   │
//! │  │  - InMemoryRepository (testing)      │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                 │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - WeightRepository trait            │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ used by                    │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Logic                        │   │
//! │  │  - TdPlayer                          │   │
//! │  │  - RandomEnvironment                 │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use threes_td::app::{App, EnvironmentConfig, PlayerConfig};
//!
//! let app = App::new();
//! let player = app.create_player("alpha=0.05 init=8".parse::<PlayerConfig>()?)?;
//! let env = app.create_environment("seed=1".parse::<EnvironmentConfig>()?);
//! # Ok::<(), threes_td::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{AgentOptions, EnvironmentConfig, PlayerConfig};
pub use container::{App, AppBuilder};
