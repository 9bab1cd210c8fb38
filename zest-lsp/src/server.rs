//! Implementation of the LSP server.

use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tower_lsp::Client;
use tower_lsp::LanguageServer;
use tower_lsp::LspService;
use tower_lsp::jsonrpc::Error as RpcError;
use tower_lsp::jsonrpc::Result as RpcResult;
use tower_lsp::lsp_types::*;
use tracing::debug;
use tracing::error;
use tracing::info;
use zest_analysis::Workspace;

/// Maps a handler's [`anyhow::Error`] — a `FacadeError` contract
/// violation or any other fatal failure — to a JSON-RPC internal-error
/// response, per §7: these are surfaced to the client, not swallowed.
fn to_rpc_error(err: anyhow::Error) -> RpcError {
    RpcError {
        code: tower_lsp::jsonrpc::ErrorCode::InternalError,
        message: err.to_string().into(),
        data: None,
    }
}

/// Represents options for running the LSP server.
#[derive(Debug, Default)]
pub struct ServerOptions {
    /// The name of the server.
    ///
    /// Defaults to the `zest-lsp` crate name.
    pub name: Option<String>,

    /// The version of the server.
    ///
    /// Defaults to the version of the `zest-lsp` crate.
    pub version: Option<String>,
}

/// Represents an LSP server for analyzing Zest documents.
#[derive(Debug)]
pub struct Server {
    /// The options for the server.
    options: ServerOptions,
    /// The workspace holding every open document and the shared symbol
    /// graph, mutated only through this single lock.
    workspace: Arc<RwLock<Workspace>>,
}

impl Server {
    /// Runs the server until a request is received to shut down.
    pub async fn run(options: ServerOptions) -> Result<()> {
        debug!("running LSP server: {options:#?}");

        let (service, socket) = LspService::new(|_client: Client| {
            let mut workspace = Workspace::new();
            workspace.set_content_provider(crate::content::FsContentProvider);
            Self {
                options,
                workspace: Arc::new(RwLock::new(workspace)),
            }
        });

        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        tower_lsp::Server::new(stdin, stdout, socket)
            .serve(service)
            .await;

        Ok(())
    }

    /// Gets the name of the server.
    fn name(&self) -> &str {
        self.options
            .name
            .as_deref()
            .unwrap_or(env!("CARGO_CRATE_NAME"))
    }

    /// Gets the version of the server.
    fn version(&self) -> &str {
        self.options
            .version
            .as_deref()
            .unwrap_or(env!("CARGO_PKG_VERSION"))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Server {
    async fn initialize(&self, params: InitializeParams) -> RpcResult<InitializeResult> {
        debug!("received `initialize` request: {params:#?}");

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                definition_provider: Some(OneOf::Left(true)),
                references_provider: Some(OneOf::Left(true)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: self.name().to_string(),
                version: Some(self.version().to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!(
            "{name} (v{version}) server initialized",
            name = self.name(),
            version = self.version()
        );
    }

    async fn shutdown(&self) -> RpcResult<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("received `textDocument/didOpen` request for {}", params.text_document.uri);
        self.workspace
            .write()
            .open_document(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, mut params: DidChangeTextDocumentParams) {
        debug!("received `textDocument/didChange` request for {}", params.text_document.uri);

        // Text document sync is full, so the last content change carries the
        // entire new document text.
        let Some(change) = params.content_changes.pop() else {
            return;
        };
        self.workspace
            .write()
            .update_document(&params.text_document.uri, change.text);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("received `textDocument/didClose` request for {}", params.text_document.uri);
        self.workspace.write().close_document(&params.text_document.uri);
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> RpcResult<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let workspace = self.workspace.read();
        match zest_analysis::handlers::goto_definition(&workspace, &uri, position) {
            Ok(location) => Ok(location.map(GotoDefinitionResponse::Scalar)),
            Err(e) => {
                error!("goto_definition request failed: {e}");
                Err(to_rpc_error(e))
            }
        }
    }

    async fn references(&self, params: ReferenceParams) -> RpcResult<Option<Vec<Location>>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let workspace = self.workspace.read();
        match zest_analysis::handlers::find_references(&workspace, &uri, position) {
            Ok(locations) => Ok(Some(locations)),
            Err(e) => {
                error!("references request failed: {e}");
                Err(to_rpc_error(e))
            }
        }
    }

    async fn hover(&self, params: HoverParams) -> RpcResult<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let workspace = self.workspace.read();
        match zest_analysis::handlers::hover(&workspace, &uri, position) {
            Ok(hover) => Ok(hover),
            Err(e) => {
                error!("hover request failed: {e}");
                Err(to_rpc_error(e))
            }
        }
    }
}
