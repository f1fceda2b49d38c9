//! Multi-step onboarding form workflow: typed wizard records, step
//! validation, a mock submission backend and a local submission log.

pub mod config;
pub mod modules;
