//! MCP server implementation.
//!
//! The server handles the MCP protocol lifecycle:
//! 1. Initialize - exchange capabilities
//! 2. Serve resource reads through the resource handler
//! 3. Shutdown on EOF

use serde_json::Value;

use crate::handler::ResourceHandler;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ReadResourceParams, RequestId, ResourcesCapability, ResourcesListResult,
    ResourceTemplatesListResult, ServerCapabilities, ServerInfo, MCP_VERSION,
};
use crate::transport::{IncomingMessage, StdioTransport};

/// MCP server exposing Azure DevOps pull request resources.
pub struct McpServer {
    handler: ResourceHandler,
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server around a resource handler.
    pub fn new(handler: ResourceHandler) -> Self {
        Self {
            handler,
            initialized: false,
        }
    }

    /// Run the MCP server main loop over stdio.
    pub async fn run(&mut self) -> adopr_core::Result<()> {
        tracing::info!("starting MCP server");

        let mut transport = StdioTransport::stdio();

        loop {
            match transport.read_message() {
                Ok(Some(msg)) => {
                    if let Some(resp) = self.handle_message(msg).await {
                        if let Err(e) = transport.write_response(&resp) {
                            tracing::error!("failed to write response: {}", e);
                            break;
                        }
                    }
                }
                Ok(None) => {
                    tracing::info!("EOF received, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!("transport error: {}", e);
                    let error_resp = JsonRpcResponse::error(
                        RequestId::Null,
                        JsonRpcError::parse_error(&e.to_string()),
                    );
                    let _ = transport.write_response(&error_resp);
                }
            }
        }

        tracing::info!("MCP server stopped");
        Ok(())
    }

    /// Handle an incoming message.
    async fn handle_message(&mut self, msg: IncomingMessage) -> Option<JsonRpcResponse> {
        match msg {
            IncomingMessage::Request(req) => Some(self.handle_request(req).await),
            IncomingMessage::Notification(notif) => {
                self.handle_notification(&notif.method);
                None // Notifications don't get responses
            }
        }
    }

    /// Handle a JSON-RPC request.
    async fn handle_request(&mut self, req: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!("handling request: {} (id: {:?})", req.method, req.id);

        match req.method.as_str() {
            "initialize" => self.handle_initialize(req.id, req.params),
            "resources/list" => self.handle_resources_list(req.id),
            "resources/templates/list" => self.handle_resource_templates_list(req.id),
            "resources/read" => self.handle_resources_read(req.id, req.params).await,
            "ping" => self.handle_ping(req.id),
            method => {
                tracing::warn!("unknown method: {}", method);
                JsonRpcResponse::error(req.id, JsonRpcError::method_not_found(method))
            }
        }
    }

    /// Handle notifications (no response).
    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                tracing::info!("client initialized");
            }
            "notifications/cancelled" => {
                tracing::debug!("request cancelled by client");
            }
            _ => {
                tracing::debug!("ignoring notification: {}", method);
            }
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        if self.initialized {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("Server already initialized"),
            );
        }

        if let Some(params) = params {
            match serde_json::from_value::<InitializeParams>(params) {
                Ok(init_params) => {
                    tracing::info!(
                        "client: {} v{} (protocol: {})",
                        init_params.client_info.name,
                        init_params.client_info.version,
                        init_params.protocol_version
                    );
                }
                Err(e) => {
                    tracing::warn!("failed to parse initialize params: {}", e);
                }
            }
        }

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
                tools: None,
                prompts: None,
            },
            server_info: ServerInfo {
                name: "adopr-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle resources/list request.
    fn handle_resources_list(&self, id: RequestId) -> JsonRpcResponse {
        let result = ResourcesListResult {
            resources: self.handler.available_resources(),
        };
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle resources/templates/list request.
    fn handle_resource_templates_list(&self, id: RequestId) -> JsonRpcResponse {
        let result = ResourceTemplatesListResult {
            resource_templates: self.handler.available_templates(),
        };
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle resources/read request.
    async fn handle_resources_read(&self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        let params: ReadResourceParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, JsonRpcError::invalid_params(&e.to_string()));
                }
            },
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params"));
            }
        };

        tracing::info!("reading resource: {}", params.uri);

        match self.handler.read(&params.uri).await {
            Ok(result) => JsonRpcResponse::success(id, serde_json::to_value(result).unwrap()),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }

    /// Handle ping request.
    fn handle_ping(&self, id: RequestId) -> JsonRpcResponse {
        JsonRpcResponse::success(id, serde_json::json!({}))
    }
}
