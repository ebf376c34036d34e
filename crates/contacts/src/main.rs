//! # Contacts CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only starts the runtime, invokes `cli::run()` and handles process
//! termination.
//!
//! ## Workspace Structure
//!
//! - `crates/contactsapp/`: UI-agnostic library (store, cache, commands, API)
//! - `crates/contacts/`: this CLI, depends on `contactsapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/contacts/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch, logging and view-state wiring (commands.rs)    │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/contactsapp/src/api.rs)                  │
//! │  - Dispatches to command modules                            │
//! │  - Caches reads, invalidates after writes                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns argument
//! parsing, context initialization, error reporting and rendering.

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        cli::report_error(&e);
        std::process::exit(1);
    }
}
