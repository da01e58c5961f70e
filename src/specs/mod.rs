// src/specs/mod.rs
//! # Extraction "specs" module
//!
//! This module hosts the **page-specific extraction specifications** for the
//! portal. Each spec focuses on a single page and encodes *where the ground
//! truth lives in its markup* and *how to extract it tolerantly*.
//!
//! ## What lives here
//! - **Pure tree walking** over `core::markup::Node` sequences.
//! - **Fixed child paths** for the known page layout, expressed through the
//!   `Option`-returning accessors (`Node::descend`, `Node::text`) so a missing
//!   step skips one row instead of aborting the pass.
//! - **Light shaping** of results into small row records and plain strings.
//!
//! ## What does **not** live here
//! - **Fetching or I/O** – callers hand in a saved page or fragment; how it
//!   was obtained (browser session, cron dump) is their business.
//! - **Output phrasing** – `sentence` turns the extracted list into the
//!   spoken reply.
//! - **Configuration policy** – valid labels and rewrites arrive as explicit
//!   `config::options` values, never as module-level tables.
//!
//! ## Conventions & invariants
//! - **Best-effort extraction**: a row that doesn't parse is dropped
//!   silently; malformed rows are normal (headers, separators, notices).
//! - **Document order is preserved**; specs never reorder or deduplicate.
//! - Specs must be testable **offline** against fixture markup.

pub mod timetable;
