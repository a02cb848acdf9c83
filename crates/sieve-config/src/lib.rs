//! Configuration for sieve
//!
//! This crate provides engine configuration (SieveConfig) and its lookup
//! across `SIEVE_CONFIG`, the working directory and the home directory.

pub mod sieve_config;

pub use sieve_config::SieveConfig;
