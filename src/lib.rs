#![forbid(unsafe_code)]

//! kube_fault_drill (kfd) — reproducible Kubernetes troubleshooting drills.
//!
//! A drill is a rendered set of manifests (namespace, deployment, service,
//! PVC, sometimes a network policy) with a seeded, deterministic subset of
//! cataloged misconfigurations injected. The dual diagnosis engine re-derives
//! which faults a rendered set carries and prints the matching fixes.
//!
//! The fault catalog is the single source of truth: every entry pairs an
//! injector with the detector and remediation that recognize exactly what it
//! broke, as one record.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use kube_fault_drill::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use kube_fault_drill::catalog::CATALOG;
//! use kube_fault_drill::scenario::select::select_faults;
//! ```

pub mod prelude;

pub mod catalog;
pub mod core;
pub mod logger;
pub mod manifest;
pub mod scenario;
