//! # CLI Behavior
//!
//! This is **one possible UI client** for contacts, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Session State
//!
//! A browser session keeps the search box, the favourites toggle and the
//! current page in memory. The CLI keeps the same [`ViewState`] in
//! `state.json` so separate invocations behave like one session:
//!
//! - `contacts list --search ali` narrows the list and resets to page 1
//! - `contacts next` / `contacts prev` move through the narrowed list
//! - `contacts export csv` exports what the list currently shows, all pages
//! - `contacts reset` clears search and filter
//!
//! ### Naked Execution (`contacts`)
//!
//! Running `contacts` with no arguments defaults to `contacts list`.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (rows, detail, messages, errors)
//! - `setup`: Argument parsing via clap
//!
//! [`ViewState`]: contactsapp::state::ViewState

mod commands;
mod render;
pub mod setup;

pub use commands::run;
pub use render::report_error;
