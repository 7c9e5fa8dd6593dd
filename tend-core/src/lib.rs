//! Core types, configuration, errors, and collaborator traits for Tend.
//!
//! Tend monitors a corpus of knowledge artifacts (notebooks, runbooks,
//! scripts, templates) for decay and produces curation guidance. This crate
//! holds the shared vocabulary: the artifact index model, the four health
//! axes, drift alerts, curation recommendations, revalidation schedules,
//! and the traits through which external collaborators (runtime probe,
//! execution-history source, content validators) plug in.

pub mod config;
pub mod errors;
pub mod time;
pub mod trace;
pub mod traits;
pub mod types;
