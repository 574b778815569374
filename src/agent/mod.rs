//! Zero-shot reasoning agent
//!
//! THOUGHT → ACTION → OBSERVATION → ... → FINAL ANSWER
//!
//! The loop is description-driven: the model sees each registered tool as
//! `name: description` and decides on its own whether and when to call
//! one. This component only honors the tool contract; it never forces a
//! retrieval. Every step is appended to a reasoning trace that is also
//! logged verbosely.

use crate::chat::ChatClient;
use crate::error::AnalyzerError;
use crate::models::{AgentResponse, ToolInput};
use crate::tools::ToolRegistry;
use crate::Result;
use serde_json::json;
use tracing::{debug, info, warn};

/// Zero-shot, single-tool reasoning agent.
pub struct ZeroShotAgent {
    chat: ChatClient,
    registry: ToolRegistry,
    max_steps: u32,
}

impl ZeroShotAgent {
    pub fn new(chat: ChatClient, registry: ToolRegistry, max_steps: u32) -> Self {
        Self {
            chat,
            registry,
            max_steps,
        }
    }

    /// Runs the reasoning loop for one question and returns the final
    /// answer plus the accumulated trace.
    pub async fn run(&self, question: &str) -> Result<AgentResponse> {
        if self.registry.is_empty() {
            return Err(AnalyzerError::Agent(
                "no tools registered for the agent".to_string(),
            ));
        }

        let system_prompt = self.build_system_prompt();
        let mut scratchpad = format!("Question: {}\nThought:", question);
        let mut reasoning_trace = Vec::new();

        info!(question = %question, "agent: starting reasoning loop");

        for step in 1..=self.max_steps {
            debug!(step, "agent: requesting next thought");
            let reply = self.chat.complete(&system_prompt, &scratchpad).await?;
            reasoning_trace.push(format!("THOUGHT {}: {}", step, reply.trim()));
            info!(step, reply = %reply.trim(), "agent: model reply");

            if let Some(answer) = parse_final_answer(&reply) {
                reasoning_trace.push("COMPLETE: final answer produced".to_string());
                info!(step, "agent: final answer produced");
                return Ok(AgentResponse {
                    answer,
                    reasoning_trace,
                });
            }

            let (tool_name, tool_question) = parse_action(&reply).ok_or_else(|| {
                AnalyzerError::Agent(format!(
                    "model reply contained neither an action nor a final answer: {}",
                    reply.trim()
                ))
            })?;

            let tool = self
                .registry
                .get(&tool_name)
                .ok_or_else(|| AnalyzerError::ToolNotFound(tool_name.clone()))?;

            info!(step, tool = %tool_name, input = %tool_question, "agent: invoking tool");
            let output = tool
                .execute(&ToolInput {
                    tool_name: tool_name.clone(),
                    parameters: json!({ "question": tool_question }),
                })
                .await?;

            let observation = output
                .data
                .get("answer")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| output.data.to_string());

            reasoning_trace.push(format!("OBSERVATION {}: {}", step, observation));
            scratchpad.push_str(&format!(
                " {}\nObservation: {}\nThought:",
                reply.trim(),
                observation
            ));
        }

        warn!(max_steps = self.max_steps, "agent: step budget exhausted");
        Err(AnalyzerError::Agent(format!(
            "no final answer after {} reasoning steps",
            self.max_steps
        )))
    }

    fn build_system_prompt(&self) -> String {
        let tool_lines: Vec<String> = self
            .registry
            .descriptions()
            .into_iter()
            .map(|(name, description)| format!("{}: {}", name, description))
            .collect();
        let tool_names: Vec<String> = self
            .registry
            .descriptions()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        format!(
            "Answer the following question as best you can. You have access to these tools:\n\n\
             {}\n\n\
             Use the following format:\n\n\
             Question: the input question you must answer\n\
             Thought: you should always think about what to do\n\
             Action: the action to take, must be one of [{}]\n\
             Action Input: the input to the action\n\
             Observation: the result of the action\n\
             ... (this Thought/Action/Action Input/Observation can repeat)\n\
             Thought: I now know the final answer\n\
             Final Answer: the final answer to the original input question",
            tool_lines.join("\n"),
            tool_names.join(", ")
        )
    }
}

/// Extracts the text following a "Final Answer:" marker, if present.
fn parse_final_answer(reply: &str) -> Option<String> {
    let idx = reply.find("Final Answer:")?;
    let answer = reply[idx + "Final Answer:".len()..].trim();
    if answer.is_empty() {
        None
    } else {
        Some(answer.to_string())
    }
}

/// Extracts the first `Action:` / `Action Input:` pair from a reply.
fn parse_action(reply: &str) -> Option<(String, String)> {
    let action_idx = reply.find("Action:")?;
    let after_action = &reply[action_idx + "Action:".len()..];
    let input_idx = after_action.find("Action Input:")?;

    let tool_name = after_action[..input_idx]
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '`' || c == '"' || c == '[' || c == ']')
        .to_string();

    let raw_input = after_action[input_idx + "Action Input:".len()..]
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '`' || c == '"')
        .to_string();

    if tool_name.is_empty() || raw_input.is_empty() {
        return None;
    }
    Some((tool_name, raw_input))
}
