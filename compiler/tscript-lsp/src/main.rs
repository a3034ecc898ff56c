// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! TScript Language Server

use std::process::ExitCode;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tscript_lsp::{Config, TScriptLanguageServer};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    if let Err(error) = config.init_logging() {
        eprintln!("tscript-lsp: {error}");
        return ExitCode::FAILURE;
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting language server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(TScriptLanguageServer::new);

    Server::new(stdin, stdout, socket).serve(service).await;
    ExitCode::SUCCESS
}
