//! recast-codegen — Rust source emitters for the schema compiler
//!
//! Turns a parsed [`recast_schema::Schema`] into a standalone Rust source
//! file targeting the `recast-event` runtime:
//!
//! - **[`generate_rust`]** — record struct, slot table, checked slot writes,
//!   and the event encoder
//! - **[`generate_tests`]** — seeded random-fixture round-trip test module
//! - **[`generate_rust_with_tests`]** — both in one document
//!
//! All output is token-stream based (`quote`) and formatted with
//! `prettyplease`, so the emitted file needs no post-processing.
//!
//! # Usage
//!
//! ```rust
//! use recast_codegen::generate_rust;
//! use recast_schema::Schema;
//!
//! let json = r#"
//! {
//!     "title": "Point",
//!     "properties": {
//!         "x": { "title": "x", "type": "integer" },
//!         "y": { "title": "y", "type": "integer" }
//!     }
//! }
//! "#;
//!
//! let schema = Schema::from_json(json).unwrap();
//! let source = generate_rust(&schema).unwrap();
//!
//! assert!(source.contains("pub struct Point"));
//! assert!(source.contains("impl Record for Point"));
//! ```

pub mod fixture;
pub mod rust;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use fixture::generate_tests;
pub use rust::{generate_rust, generate_rust_with_tests, to_snake_case};
