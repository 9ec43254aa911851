//! worldarea-cli
//! =============
//!
//! Command-line runner for the `worldarea-core` country area analysis.
//!
//! This crate primarily provides a binary (`worldarea`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! worldarea --help
//! worldarea
//! worldarea --out-dir results --exclude Greenland --top 10
//! ```
//!
//! For programmatic access use the `worldarea-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
