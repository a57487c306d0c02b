//! # Assistant Architecture
//!
//! A personal assistant that keeps an address book and a notebook and is driven one
//! command line at a time. The library holds everything except the terminal; the
//! binary is a thin read-print loop around it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Flags, logging, prompt loop, signal handling, colors     │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Tokenizes a line and dispatches it                       │
//! │  - Turns every error into a printable message               │
//! │  - Checkpoints both collections to the store                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Argument count checks, usage lines                       │
//! │  - Calls into AddressBook / Notebook, formats the outcome   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (fields, record, note, address_book, notebook)      │
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, FileStore and InMemoryStore             │
//! │  - On-disk schema and legacy-shape migration                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the core
//!
//! From `api.rs` inward nothing prints, reads stdin or exits the process, and
//! "today" can be pinned with [`api::AssistantApi::with_today`]. Tests drive the
//! whole stack through [`store::memory::InMemoryStore`].
//!
//! ## Module Overview
//!
//! - [`api`]: The facade: `execute(line)` and `checkpoint()`
//! - [`commands`]: One function per command
//! - [`input`]: Tokenizer and command catalogue
//! - [`fields`]: Validated field values and the strict policy
//! - [`record`], [`address_book`]: Contacts and upcoming birthdays
//! - [`note`], [`notebook`]: Notes and tags
//! - [`store`]: Persistence
//! - [`config`]: `config.json` in the data directory
//! - [`error`]: Error types

pub mod address_book;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fields;
pub mod input;
pub mod note;
pub mod notebook;
pub mod record;
pub mod store;
