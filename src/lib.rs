//! # Repz Architecture
//!
//! Repz is a **UI-agnostic workout-tracking engine**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! The engine owns one user's workout templates and logged workouts entirely
//! in memory. There is no database and no implicit persistence: the only
//! thing that survives the process is a tiny session marker (who was logged
//! in), and the only way data survives is an explicit export to a JSON
//! snapshot file, restored later by an explicit import.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (main.rs + bin-local modules)                       │
//! │  - Parses command lines, formats output, owns the terminal  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - Single entry point; owns the store and the session       │
//! │  - Enforces preconditions (no session → no data operations) │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                     │
//!                    ▼                     ▼
//! ┌──────────────────────────┐ ┌──────────────────────────────┐
//! │  Session (session.rs)    │ │  Data Store (store.rs)       │
//! │  - login/logout/import   │ │  - CRUD + lookup             │
//! │  - marker persistence    │ │  - id uniqueness, sort order │
//! │  - route guard           │ │  - in-memory only            │
//! └──────────────────────────┘ └──────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Interchange (interchange.rs)                               │
//! │  - Snapshot serialization and validation                    │
//! │  - Legacy-shape normalization on import                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! `Result` types, never writes to stdout/stderr, and never calls
//! `std::process::exit`. The same core could back a GUI or a web view.
//!
//! The session marker is the one persistence concern the core has, and it
//! sits behind the [`session::MarkerStore`] trait so tests swap in an
//! in-memory implementation.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade—entry point for all operations
//! - [`model`]: Core entity types and legacy-shape normalization
//! - [`store`]: The in-memory data store and its invariants
//! - [`session`]: Session lifecycle, marker persistence, route guard
//! - [`interchange`]: Snapshot export/parse, the sole durability path
//! - [`error`]: Error types

pub mod api;
pub mod error;
pub mod interchange;
pub mod model;
pub mod session;
pub mod store;
