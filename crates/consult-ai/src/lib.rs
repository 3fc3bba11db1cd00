//! Consultation intake and rule-based triage.
//!
//! The [`workflows::consultation`] module holds the symptom scorer, the advisory reporter and
//! the service that persists consultations through a pluggable repository.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
