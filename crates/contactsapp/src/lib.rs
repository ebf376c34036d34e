//! # Contacts Architecture
//!
//! Contacts is a **UI-agnostic contact-management library** over a REST
//! backend. The CLI is one client; nothing below the API layer knows about a
//! terminal.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/contacts)                                │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Persists ViewState between invocations                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the query cache and invalidation                    │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Query pipeline: filter, paginate, sort                   │
//! │  - Mutation pipeline: validate, dedupe, merge               │
//! │  - Export encoders                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract async ContactStore trait                        │
//! │  - HttpStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward code takes Rust arguments and returns
//! `Result<CmdResult>`. It never writes to stdout/stderr and never exits the
//! process. Export writes a file because producing the file is the operation.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: thorough unit tests against `InMemoryStore`.
//! 2. **API**: cache hits and invalidation after mutations.
//! 3. **CLI**: argument parsing and output through `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade and cache owner
//! - [`cache`]: Query-key cache with stale time and generations
//! - [`commands`]: Business logic
//! - [`config`]: Layered configuration and paths
//! - [`model`]: Contact, form, patch and page types
//! - [`state`]: Persisted view state
//! - [`store`]: Backend abstraction
//! - [`validation`]: Form rules

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod store;
pub mod validation;
