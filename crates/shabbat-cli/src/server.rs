use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use shabbat_config::Config;
use shabbat_core::{
    LockDecision, Location, ShabbatWindowCalculator, SpaSunsetProvider, format_clock_time,
    format_duration, resolve_instant,
};

#[derive(Clone)]
pub struct ShabbatServer {
    location: Arc<Location>,
    calculator: Arc<ShabbatWindowCalculator<SpaSunsetProvider>>,
    tool_router: ToolRouter<Self>,
}

impl ShabbatServer {
    pub fn new(config: Config) -> shabbat_config::Result<Self> {
        let location = config.location()?;
        Ok(Self {
            location: Arc::new(location),
            calculator: Arc::new(config.calculator()),
            tool_router: Self::tool_router(),
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    fn instant(at: Option<&str>) -> Result<chrono::DateTime<chrono::Utc>, McpError> {
        resolve_instant(at).map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    fn json_result(value: &serde_json::Value) -> CallToolResult {
        CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(value).unwrap_or_default(),
        )])
    }
}

// --- Tool parameter types ---

#[derive(Debug, Deserialize, JsonSchema)]
struct AtRequest {
    /// RFC 3339 instant to evaluate at (defaults to now)
    at: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DurationRequest {
    /// Whole minutes to format
    minutes: u64,
}

#[tool_router]
impl ShabbatServer {
    #[tool(
        description = "Current Shabbat status at the configured location: whether the rest window is open, the next boundary (candle-lighting or Havdalah) and a human countdown. Poll about once per minute to refresh a countdown."
    )]
    async fn shabbat_status(
        &self,
        Parameters(req): Parameters<AtRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = Self::instant(req.at.as_deref())?;
        let status = self
            .calculator
            .status(now, &self.location)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let tz = self.location.timezone();
        let mut json = serde_json::to_value(&status)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        json["location"] = serde_json::json!(self.location.name());
        json["countdown"] = serde_json::json!(status.countdown());
        json["boundary_local"] =
            serde_json::json!(status.next_boundary().map(|t| format_clock_time(t, tz)));

        Ok(Self::json_result(&json))
    }

    #[tool(
        description = "Candle-lighting and Havdalah for the week containing the given instant, as UTC timestamps and local HH:MM."
    )]
    async fn shabbat_window(
        &self,
        Parameters(req): Parameters<AtRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = Self::instant(req.at.as_deref())?;
        let window = self
            .calculator
            .compute_window(now, &self.location)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let tz = self.location.timezone();
        let json = serde_json::json!({
            "location": self.location.name(),
            "candle_lighting": window.candle_lighting,
            "havdalah": window.havdalah,
            "candle_lighting_local": format_clock_time(window.candle_lighting, tz),
            "havdalah_local": format_clock_time(window.havdalah, tz),
        });
        Ok(Self::json_result(&json))
    }

    #[tool(
        description = "Whether interactive app functionality should be locked right now. Fails open: if the window cannot be determined the result is unlocked."
    )]
    async fn shabbat_lock(
        &self,
        Parameters(req): Parameters<AtRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = Self::instant(req.at.as_deref())?;
        let result = self.calculator.status(now, &self.location);
        if let Err(e) = &result {
            tracing::warn!("treating app as unlocked: {e}");
        }
        let decision = LockDecision::evaluate(&result, self.location.timezone());

        let json = serde_json::to_value(&decision)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(Self::json_result(&json))
    }

    #[tool(description = "Format a number of minutes for display, e.g. 90 -> \"1h 30m\".")]
    async fn shabbat_format_duration(
        &self,
        Parameters(req): Parameters<DurationRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(format_duration(
            req.minutes,
        ))]))
    }
}

#[tool_handler]
impl ServerHandler for ShabbatServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Shabbat time-window calculator for a single configured location.\n\n\
                 - shabbat_status: is the rest window open now, and the countdown to its next boundary.\n\
                 - shabbat_window: candle-lighting and Havdalah for a week.\n\
                 - shabbat_lock: lock decision for interactive functionality (fails open).\n\
                 - shabbat_format_duration: render minutes as a short duration.\n\n\
                 All time arguments are optional RFC 3339 strings; omit them to use the current time."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
