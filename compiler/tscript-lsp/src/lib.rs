// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! TScript Language Server Protocol implementation.
//!
//! This crate provides LSP server functionality for TScript, enabling IDE
//! integration with features like:
//!
//! - Incremental document synchronisation
//! - Code completion, including `.`-triggered member completion
//! - Hover information

pub mod buffer;
pub mod completion;
pub mod config;
pub mod hover;
pub mod position;
pub mod server;

pub use buffer::{Buffer, BufferStore};
pub use config::Config;
pub use server::TScriptLanguageServer;
