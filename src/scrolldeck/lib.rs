//! # Scrolldeck Architecture
//!
//! Scrolldeck is a **UI-agnostic site-building library** with a CLI client.
//! It maintains a JSON-persisted collection of page records and assembles
//! them into a single scrollable HTML document.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Chains rebuilds after mutating operations                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic per command                               │
//! │  - Returns CmdResult; never touches stdout/stderr           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store/, render, assemble, pipeline)                  │
//! │  - PageStore over an abstract Backend                       │
//! │  - FileBackend (production), MemoryBackend (testing)        │
//! │  - Renderer → Assembler → output validation                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The build pipeline
//!
//! A build keeps three page-count representations in sync: the
//! `{{TOTAL_PAGES}}` token in the template, the `page-<n>` section
//! containers in the output, and the `totalPages = <N>;` constant in the
//! client script. The assembler validates the first two after every write;
//! the third is patched best-effort.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`PageRecord`, `StoreData`)
//! - [`render`]: Page fragment rendering
//! - [`assemble`]: Template substitution and output validation
//! - [`pipeline`]: Build orchestration, clean, and restore
//! - [`generate`]: Injectable prompt-to-content generation
//! - [`migrate`]: Best-effort extraction from legacy page files
//! - [`config`]: Site layout configuration
//! - [`error`]: Error types

pub mod api;
pub mod assemble;
pub mod commands;
pub mod config;
pub mod error;
pub mod generate;
pub mod migrate;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod store;
