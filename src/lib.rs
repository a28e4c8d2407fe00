//! Personal finance calculators.
//!
//! [`core`] holds the pure calculation engine: fixed-deposit projection, car
//! loan affordability, budgeting rules of thumb and slab-based income tax.
//! [`config`] supplies the reference data those calculators run against, and
//! [`api`] / [`cli`] are thin callers that validate input and render results.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
