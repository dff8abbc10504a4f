//! MCP server for domain availability checking.
//!
//! Exposes the availability resolver over stdio as two MCP tools
//! (`check_domain_availability`, `batch_check_domains`) plus a readable
//! `domain://check/{domain}` resource that returns the same verdict as
//! formatted JSON. All verdict logic lives in domain-avail-lib; this
//! binary is only the transport shell.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, ListResourceTemplatesResult,
        PaginatedRequestParams, RawResourceTemplate, ReadResourceRequestParams,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;

use domain_avail_lib::AvailabilityResolver;

/// URI prefix for the readable verdict resource.
const RESOURCE_PREFIX: &str = "domain://check/";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckDomainRequest {
    /// The domain name to check (e.g., "example.com")
    pub domain: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BatchCheckRequest {
    /// List of domain names to check
    pub domains: Vec<String>,
}

#[derive(Clone)]
pub struct DomainAvailService {
    resolver: Arc<AvailabilityResolver>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DomainAvailService {
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(AvailabilityResolver::new()))
    }

    /// Build a service around an existing resolver, e.g. one wired with
    /// custom collaborators.
    pub fn with_resolver(resolver: Arc<AvailabilityResolver>) -> Self {
        Self {
            resolver,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Check if a domain name is available for registration")]
    async fn check_domain_availability(
        &self,
        Parameters(CheckDomainRequest { domain }): Parameters<CheckDomainRequest>,
    ) -> Result<CallToolResult, McpError> {
        let verdict = self.resolver.check_one(&domain).await;
        Ok(CallToolResult::success(vec![Content::json(&verdict)?]))
    }

    #[tool(description = "Check multiple domains for availability in a single request")]
    async fn batch_check_domains(
        &self,
        Parameters(BatchCheckRequest { domains }): Parameters<BatchCheckRequest>,
    ) -> Result<CallToolResult, McpError> {
        let results = self.resolver.check_many(&domains).await;
        Ok(CallToolResult::success(vec![Content::json(&results)?]))
    }
}

impl Default for DomainAvailService {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for DomainAvailService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "When you are asked about domain availability or to check if a domain \
                 is available for registration, call the appropriate function."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            meta: None,
            next_cursor: None,
            resource_templates: vec![RawResourceTemplate {
                uri_template: format!("{}{{domain}}", RESOURCE_PREFIX),
                name: "domain-availability".to_string(),
                title: None,
                description: Some(
                    "Availability verdict for a domain, as formatted JSON".to_string(),
                ),
                mime_type: Some("application/json".to_string()),
                icons: None,
            }
            .no_annotation()],
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParams { uri, .. }: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let domain = uri.strip_prefix(RESOURCE_PREFIX).ok_or_else(|| {
            McpError::resource_not_found(format!("unknown resource uri: {}", uri), None)
        })?;

        let verdict = self.resolver.check_one(domain).await;
        let text = serde_json::to_string_pretty(&verdict)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri.clone())],
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the MCP transport; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("starting domain availability MCP server");

    let service = DomainAvailService::new().serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
