// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! LSP server implementation for TScript.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::buffer::BufferStore;
use crate::{completion, hover};

/// The TScript language server.
pub struct TScriptLanguageServer {
    /// LSP client handle for sending messages to the editor
    client: Client,
    /// Open documents keyed by URI
    buffers: BufferStore,
}

impl TScriptLanguageServer {
    /// Create a new language server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            buffers: BufferStore::new(),
        }
    }

    /// The open documents.
    pub fn buffers(&self) -> &BufferStore {
        &self.buffers
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for TScriptLanguageServer {
    async fn initialize(&self, _params: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![".".to_string()]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "tscript-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "TScript language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        self.buffers
            .update_full(uri.as_str(), params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        for change in params.content_changes {
            match change.range {
                Some(range) => {
                    self.buffers.update_range(uri.as_str(), &change.text, range);
                }
                None => {
                    self.buffers.update_full(uri.as_str(), change.text);
                }
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.buffers.remove(params.text_document.uri.as_str());
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(buffer) = self.buffers.get(uri.as_str()) else {
            tracing::debug!(%uri, "hover on unknown document");
            return Ok(None);
        };
        Ok(hover::hover(&buffer, position))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let trigger = params.context.map(|context| context.trigger_kind);

        let Some(buffer) = self.buffers.get(uri.as_str()) else {
            tracing::debug!(%uri, "completion on unknown document");
            return Ok(Some(CompletionResponse::Array(Vec::new())));
        };
        let list = completion::completions(&buffer, position, trigger);
        Ok(Some(CompletionResponse::List(list)))
    }
}
