use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, ErrorData, ServerCapabilities, ServerInfo},
    ServerHandler,
};
use rmcp_macros::{tool, tool_handler, tool_router};

use crate::config::SequentialThinkingConfig;
use crate::error::Result as ThinkingResult;
use crate::ledger::ThoughtLedger;
use crate::models::{ThinkingStatus, ThoughtArguments};
use crate::visual::VisualOutput;

/// MCP server exposing the thought ledger of one agent session
#[derive(Clone)]
pub struct SequentialThinkingService {
    tool_router: ToolRouter<Self>,
    ledger: Arc<Mutex<ThoughtLedger>>,
    display: Option<VisualOutput>,
    config: SequentialThinkingConfig,
}

impl SequentialThinkingService {
    /// Create a service with a fresh, empty ledger
    pub fn new(config: SequentialThinkingConfig) -> Self {
        let ledger = ThoughtLedger::with_validator(config.validator());
        tracing::info!(
            "Initializing sequential thinking service, session {}",
            ledger.session_id()
        );

        let display = config
            .display
            .enabled
            .then(|| VisualOutput::new(config.display.colored));

        Self {
            tool_router: Self::tool_router(),
            ledger: Arc::new(Mutex::new(ledger)),
            display,
            config,
        }
    }

    pub fn config(&self) -> &SequentialThinkingConfig {
        &self.config
    }

    /// Shared handle to the session ledger
    pub fn ledger(&self) -> Arc<Mutex<ThoughtLedger>> {
        Arc::clone(&self.ledger)
    }

    /// Validate, record and optionally display one step
    pub fn submit(&self, args: &ThoughtArguments) -> ThinkingResult<ThinkingStatus> {
        let mut ledger = self.ledger.lock();
        let status = ledger.submit(args)?;
        if let (Some(display), Some(step)) = (self.display, ledger.last()) {
            display.thought(step);
        }
        Ok(status)
    }
}

/// Text payload returned for an accepted step
pub fn completion_text(status: &ThinkingStatus) -> ThinkingResult<String> {
    Ok(format!(
        "Sequential thinking step completed.\n\nStatus:\n{}",
        serde_json::to_string_pretty(status)?
    ))
}

#[tool_router]
impl SequentialThinkingService {
    #[tool(
        name = "sequentialthinking",
        description = r#"A detailed tool for dynamic and reflective problem-solving through thoughts.
This tool helps analyze problems through a flexible thinking process that can adapt and evolve.
Each thought can build on, question, or revise previous insights as understanding deepens.

When to use this tool:
- Breaking down complex problems into steps
- Planning and design with room for revision
- Analysis that might need course correction
- Problems where the full scope might not be clear initially
- Problems that require a multi-step solution
- Tasks that need to maintain context over multiple steps
- Situations where irrelevant information needs to be filtered out

Key features:
- You can adjust total_thoughts up or down as you progress
- You can question or revise previous thoughts
- You can add more thoughts even after reaching what seemed like the end
- You can express uncertainty and explore alternative approaches
- Not every thought needs to build linearly - you can branch or backtrack
- Generates a solution hypothesis
- Verifies the hypothesis based on the Chain of Thought steps
- Repeats the process until satisfied
- Provides a correct answer

Parameters explained:
- thought: Your current thinking step, which can include:
* Regular analytical steps
* Revisions of previous thoughts
* Questions about previous decisions
* Realizations about needing more analysis
* Changes in approach
* Hypothesis generation
* Hypothesis verification
- next_thought_needed: True if you need more thinking, even if at what seemed like the end
- thought_number: Current number in sequence (can go beyond initial total)
- total_thoughts: Current estimate of thoughts needed (can be adjusted up/down)
- is_revision: A boolean indicating if this thought revises previous thinking
- revises_thought: If is_revision is true, which thought number is being reconsidered
- branch_from_thought: If branching, which thought number is the branching point
- branch_id: Identifier for the current branch (if any)
- needs_more_thoughts: If reaching end but realizing more thoughts needed

You should:
1. Start with an initial estimate of needed thoughts, but be ready to adjust
2. Feel free to question or revise previous thoughts
3. Don't hesitate to add more thoughts if needed, even at the "end"
4. Express uncertainty when present
5. Mark thoughts that revise previous thinking or branch into new paths
6. Ignore information that is irrelevant to the current step
7. Generate a solution hypothesis when appropriate
8. Verify the hypothesis based on the Chain of Thought steps
9. Repeat the process until satisfied with the solution
10. Provide a single, ideally correct answer as the final output
11. Only set next_thought_needed to false when truly done and a satisfactory answer is reached"#
    )]
    pub async fn sequential_thinking(
        &self,
        params: Parameters<ThoughtArguments>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        match self.submit(&params.0).and_then(|status| completion_text(&status)) {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                tracing::error!("sequentialthinking error: {}", e);
                Err(ErrorData::from(e))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for SequentialThinkingService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: rmcp::model::ProtocolVersion::V_2024_11_05,
            server_info: rmcp::model::Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "Sequential thinking server: record numbered thought steps, revise earlier steps and fork named branches".into(),
            ),
        }
    }
}
