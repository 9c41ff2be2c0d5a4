//! # Dexplore Architecture
//!
//! Dexplore is a **UI-agnostic Pokémon catalog explorer library**: browse the catalog a
//! page at a time, look entries up, filter by type, ability, move and effort yield,
//! and keep a list of favorites plus a six-member team. The `dex` binary is one client
//! of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, normalizes names → ids, 1-based → 0-based   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session + Commands (session.rs, commands/*.rs)             │
//! │  - Intent dispatch, page loads, collection mutations        │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │  Provider (provider/)        │  Storage (store/)            │
//! │  HttpProvider, MemProvider   │  FileStore, InMemoryStore    │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Between the session and the provider sit the [`cache`], the [`filter`] engine and
//! the [`pagination`] cursor; [`collections`] holds the favorites and team rules.
//!
//! ## Concurrency
//!
//! Everything runs on one logical thread. Provider calls are `async` and the traits
//! are `?Send`; detail fetches for a page are issued concurrently and joined before
//! anything is shown, and filter detail batches run one after another.
//!
//! ## Testing Strategy
//!
//! - **Core modules**: unit tests against [`provider::memory::MemProvider`] and
//!   [`store::memory::InMemoryStore`], no network and no filesystem
//! - **FileStore / config**: `tempfile` directories
//! - **CLI**: `assert_cmd` integration tests in `tests/`, offline commands only

pub mod api;
pub mod cache;
pub mod collections;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod model;
pub mod pagination;
pub mod provider;
pub mod session;
pub mod store;
