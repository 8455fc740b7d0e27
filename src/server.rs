//! MCP server adapter: exposes the [`ToolRegistry`] over the SDK's SSE
//! transport and serves a liveness endpoint beside it.
//!
//! The SDK owns sessions, framing, and the message POST endpoint; this
//! module only converts between registry types and protocol types.

use std::borrow::Cow;
use std::io;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::tools::ToolRegistry;

pub const SSE_PATH: &str = "/sse";

/// One MCP service instance per client session, all sharing the same
/// read-only registry.
#[derive(Clone)]
pub struct TextToolServer {
    registry: Arc<ToolRegistry>,
}

impl TextToolServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

impl ServerHandler for TextToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                completions: None,
                experimental: None,
                logging: None,
                prompts: None,
                resources: None,
                tools: Some(ToolsCapability::default()),
            },
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Text utilities server. Provides reverse, uppercase, lowercase, word count, \
                 character count, and shuffle operations on strings."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self.registry.schemas().iter().map(to_tool).collect();
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());
        match self.registry.dispatch(&request.name, &arguments) {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(ErrorData::invalid_params(e.to_string(), None)),
        }
    }
}

/// Convert a registry schema value into the protocol's tool type.
fn to_tool(schema: &Value) -> Tool {
    let input_schema = schema["input_schema"]
        .as_object()
        .cloned()
        .unwrap_or_default();
    Tool {
        name: Cow::Owned(schema["name"].as_str().unwrap_or_default().to_string()),
        title: None,
        description: schema["description"]
            .as_str()
            .map(|s| Cow::Owned(s.to_string())),
        input_schema: Arc::new(input_schema),
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    name: &'static str,
    version: &'static str,
    tools: Vec<String>,
}

fn health_response(registry: &ToolRegistry) -> HealthResponse {
    HealthResponse {
        status: "ok",
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        tools: registry
            .tool_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

async fn health(State(registry): State<Arc<ToolRegistry>>) -> Json<HealthResponse> {
    Json(health_response(&registry))
}

/// Liveness route, independent of the dispatch path.
pub fn health_router(registry: Arc<ToolRegistry>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(registry)
}

/// Bind the listener, mount the SSE transport plus the health route, and
/// start serving. Returns the token that cancels the whole server.
pub async fn serve(
    config: &ServerConfig,
    registry: Arc<ToolRegistry>,
) -> io::Result<CancellationToken> {
    let addr = config.bind_addr();
    let sse_config = SseServerConfig {
        bind: addr,
        sse_path: SSE_PATH.to_string(),
        post_path: config.message_path.clone(),
        ct: CancellationToken::new(),
        sse_keep_alive: None,
    };

    let (sse_server, router) = SseServer::new(sse_config);
    let router = router.merge(health_router(registry.clone()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, sse = SSE_PATH, message = %config.message_path, "listening");

    let shutdown = sse_server.config.ct.child_token();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown.cancelled().await;
    });
    tokio::spawn(async move {
        if let Err(e) = server.await {
            error!(error = %e, "server task exited with error");
        }
    });

    let ct = sse_server.with_service(move || TextToolServer::new(registry.clone()));
    Ok(ct)
}
