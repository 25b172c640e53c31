// src/core/mod.rs

/// Typed records passed between the audit stages: request, target, fetch result,
/// page features, certificate info, findings and the final report.
pub mod models;

/// The audit orchestrator and its two network branches (HTTP and TLS).
pub mod scanner;

/// Static findings database: codes, messages and remediation hints.
pub mod knowledge_base;

pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod normalizer;
