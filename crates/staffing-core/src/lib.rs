//! # Call Center Staffing Engine for RVOIP
//!
//! This crate computes staffing requirements and service-level metrics for a
//! single-queue, single-skill call center over one planning interval, using
//! steady-state queueing theory (Erlang C, Erlang A).
//!
//! ## Features
//!
//! - **Traffic Model**: call volume over a window to offered load in Erlangs
//! - **Erlang C**: probability an arriving call has to wait, numerically stable
//!   for thousands of agents
//! - **Service Level**: probability a call is answered within a target time
//! - **Staffing Search**: minimum agents meeting a service level target, with an
//!   optional iteration cap
//! - **Derived Metrics**: ASA, answered immediately, occupancy, shrinkage and
//!   Erlang A abandonment
//! - **Interval Planning**: many intervals staffed in parallel
//!
//! ## Architecture
//!
//! Data flows one way and every stage is a pure function of its inputs:
//!
//! ```text
//! traffic ──▶ erlang (C) ──▶ erlang (service level) ──▶ search ──▶ metrics
//! ```
//!
//! - [`model`]: validated input value types
//! - [`traffic`]: calls per hour and traffic intensity
//! - [`erlang`]: Erlang B / Erlang C / service level formulas
//! - [`search`]: minimum staffing search and [`StaffingResult`]
//! - [`metrics`]: KPIs derived from a staffing result
//! - [`calculator`]: per-interval calculator with cached staffing and reports
//! - [`plan`]: multi-interval plans
//! - [`config`]: engine configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use rvoip_staffing_core::prelude::*;
//!
//! # fn example() -> Result<()> {
//! // 390 calls in one hour, 5 minute handling time
//! let erlangs = compute_traffic_intensity(390, 3600.0, 300.0)?;
//!
//! // 80% of calls answered within 30 seconds
//! let staffing = find_staffing(erlangs, 300.0, 30.0, 0.8, Some(10_000))?;
//! assert_eq!(staffing.agents, 38);
//!
//! println!("ASA: {:.1}s", staffing.average_speed_of_answer(300.0)?);
//! println!("Occupancy: {:.1}%", staffing.occupancy() * 100.0);
//! println!("Scheduled with 30% shrinkage: {}", staffing.agents_with_shrinkage(0.3)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// Core modules
pub mod error;
pub mod config;

// Calculation pipeline
pub mod model;
pub mod traffic;
pub mod erlang;
pub mod search;
pub mod metrics;

// Higher-level entry points
pub mod calculator;
pub mod plan;

// Re-exports for convenience
pub use error::{Result, StaffingError};
pub use config::StaffingConfig;
pub use calculator::{StaffingCalculator, StaffingReport};
pub use search::StaffingResult;

/// Prelude module for convenient imports
pub mod prelude {
    // Core types
    pub use crate::{Result, StaffingConfig, StaffingError};

    // Configuration types
    pub use crate::config::{PlanningConfig, SearchConfig};

    // Inputs
    pub use crate::model::{StaffingTarget, TimeWindow, WorkloadObservation};

    // Pipeline functions
    pub use crate::traffic::{calls_per_hour, compute_traffic_intensity, traffic_from_calls_per_hour};
    pub use crate::erlang::{erlang_b, erlang_c, service_level};
    pub use crate::search::{find_staffing, first_stable_agents, minimum_agents_required, StaffingResult};
    pub use crate::metrics::{
        average_speed_of_answer, erlang_a_abandonment, occupancy,
        percentage_answered_immediately, shrinkage_adjusted_agents,
    };

    // Calculators and plans
    pub use crate::calculator::{StaffingCalculator, StaffingReport};
    pub use crate::plan::{plan_intervals, split_window, PlanSummary, StaffingPlan};
}
