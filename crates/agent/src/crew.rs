//! Sequential crew runtime.
//!
//! One agent works through its tasks in order. Per turn, the model is shown
//! the persona, the task, the tool descriptors, and the transcript so far, and
//! must answer with a single JSON object: either a tool invocation
//! (`{"tool": ..., "input": {...}}`) or a final answer (`{"final": ...}`).
//! Tool results and protocol violations are fed back as observations; only
//! LLM transport errors abort the run.

use anyhow::{bail, Result};
use serde_json::Value;
use tracing::debug;

use crate::llm::LlmClient;
use crate::tools::ToolRegistry;

#[derive(Clone, Debug)]
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub verbose: bool,
}

#[derive(Clone, Debug)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Process {
    #[default]
    Sequential,
}

pub struct Crew {
    agent: Agent,
    tasks: Vec<Task>,
    tools: ToolRegistry,
    llm: Box<dyn LlmClient>,
    process: Process,
    max_turns: usize,
}

const DEFAULT_MAX_TURNS: usize = 8;

impl Crew {
    pub fn new(agent: Agent, tasks: Vec<Task>, tools: ToolRegistry, llm: Box<dyn LlmClient>) -> Self {
        Self { agent, tasks, tools, llm, process: Process::Sequential, max_turns: DEFAULT_MAX_TURNS }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    /// Run every task in order and return the output of the last one.
    pub async fn kickoff(&self) -> Result<String> {
        let Process::Sequential = self.process;
        if self.tasks.is_empty() {
            bail!("crew has no tasks to run");
        }

        let mut last_output = String::new();
        for task in &self.tasks {
            last_output = self.run_task(task).await?;
        }
        Ok(last_output)
    }

    async fn run_task(&self, task: &Task) -> Result<String> {
        let mut transcript = self.seed_prompt(task);

        for turn in 0..self.max_turns {
            let reply = self.llm.complete(&transcript).await?;
            if self.agent.verbose {
                debug!(turn, reply = reply.as_str(), "agent turn");
            }

            let observation = match parse_reply(&reply) {
                Ok(AgentReply::Final(answer)) => return Ok(answer),
                Ok(AgentReply::ToolCall { tool, input }) => self.dispatch(&tool, input).await,
                Err(problem) => problem,
            };

            transcript.push_str("\nAssistant: ");
            transcript.push_str(&reply);
            transcript.push_str("\nObservation: ");
            transcript.push_str(&observation);
            transcript.push('\n');
        }

        bail!("agent did not produce a final answer within {} turns", self.max_turns)
    }

    async fn dispatch(&self, name: &str, input: Value) -> String {
        match self.tools.get(name) {
            Some(tool) => match tool.execute(input).await {
                Ok(value) => value.to_string(),
                Err(error) => format!("tool `{name}` failed: {error}"),
            },
            None => {
                format!("unknown tool `{name}`; available tools: {}", self.tools.names().join(", "))
            }
        }
    }

    fn seed_prompt(&self, task: &Task) -> String {
        let descriptors = serde_json::to_string_pretty(&self.tools.descriptors())
            .unwrap_or_else(|_| "[]".to_string());

        format!(
            "You are {role}.\nGoal: {goal}\nBackstory: {backstory}\n\n\
             You can call these tools:\n{descriptors}\n\n\
             Task: {description}\nExpected output: {expected}\n\n\
             Reply with exactly one JSON object per message.\n\
             To call a tool: {{\"tool\": \"<name>\", \"input\": {{...}}}}\n\
             To finish: {{\"final\": \"<answer>\"}}\n",
            role = self.agent.role,
            goal = self.agent.goal,
            backstory = self.agent.backstory,
            descriptors = descriptors,
            description = task.description,
            expected = task.expected_output,
        )
    }
}

enum AgentReply {
    ToolCall { tool: String, input: Value },
    Final(String),
}

fn parse_reply(reply: &str) -> Result<AgentReply, String> {
    let Some(json) = extract_json_object(reply) else {
        return Err(
            "reply was not a JSON object; answer with {\"tool\": ..., \"input\": ...} or {\"final\": ...}"
                .to_string(),
        );
    };

    if let Some(answer) = json.get("final").and_then(Value::as_str) {
        return Ok(AgentReply::Final(answer.to_string()));
    }

    let Some(tool) = json.get("tool").and_then(Value::as_str) else {
        return Err("JSON object had neither `final` nor `tool`".to_string());
    };
    let input = json.get("input").cloned().unwrap_or_else(|| Value::Object(Default::default()));

    Ok(AgentReply::ToolCall { tool: tool.to_string(), input })
}

/// Models often wrap the JSON in prose or code fences; take the outermost
/// braced region and parse that.
fn extract_json_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::{extract_json_object, Agent, Crew, Task};
    use crate::llm::LlmClient;
    use crate::tools::{Tool, ToolRegistry};

    struct ScriptedLlm {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedLlm {
        fn new(replies: &[&str]) -> Self {
            Self { replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()) }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }
    }

    struct RecordingTool {
        seen: Arc<Mutex<Vec<Value>>>,
    }

    #[async_trait]
    impl Tool for RecordingTool {
        fn name(&self) -> &'static str {
            "recording_tool"
        }

        fn description(&self) -> &'static str {
            "records its input and replies with a canned payload"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {"q": {"type": "string"}}})
        }

        async fn execute(&self, input: Value) -> Result<Value> {
            self.seen.lock().unwrap().push(input);
            Ok(json!({"rows": [[1]]}))
        }
    }

    fn agent() -> Agent {
        Agent {
            role: "Query Executor Agent".to_string(),
            goal: "Execute the SQL query and return the results.".to_string(),
            backstory: "Expert in SQL.".to_string(),
            verbose: false,
        }
    }

    fn task() -> Task {
        Task {
            description: "run the query".to_string(),
            expected_output: "query results".to_string(),
        }
    }

    #[tokio::test]
    async fn crew_returns_final_answer_without_tool_calls() {
        let llm = ScriptedLlm::new(&[r#"{"final": "all done"}"#]);
        let crew = Crew::new(agent(), vec![task()], ToolRegistry::default(), Box::new(llm));

        assert_eq!(crew.kickoff().await.unwrap(), "all done");
    }

    #[tokio::test]
    async fn crew_dispatches_tool_call_then_finishes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut tools = ToolRegistry::default();
        tools.register(RecordingTool { seen: Arc::clone(&seen) });

        let llm = ScriptedLlm::new(&[
            r#"{"tool": "recording_tool", "input": {"q": "SELECT 1"}}"#,
            r#"{"final": "rows: [[1]]"}"#,
        ]);
        let crew = Crew::new(agent(), vec![task()], tools, Box::new(llm));

        assert_eq!(crew.kickoff().await.unwrap(), "rows: [[1]]");
        assert_eq!(*seen.lock().unwrap(), vec![json!({"q": "SELECT 1"})]);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_and_the_loop_continues() {
        let llm = ScriptedLlm::new(&[
            r#"{"tool": "missing_tool", "input": {}}"#,
            r#"{"final": "recovered"}"#,
        ]);
        let crew = Crew::new(agent(), vec![task()], ToolRegistry::default(), Box::new(llm));

        assert_eq!(crew.kickoff().await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn malformed_reply_is_fed_back_as_observation() {
        let llm = ScriptedLlm::new(&["just some prose", r#"{"final": "ok"}"#]);
        let crew = Crew::new(agent(), vec![task()], ToolRegistry::default(), Box::new(llm));

        assert_eq!(crew.kickoff().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn turn_limit_aborts_a_run_that_never_finishes() {
        let llm = ScriptedLlm::new(&["nope", "nope", "nope"]);
        let crew = Crew::new(agent(), vec![task()], ToolRegistry::default(), Box::new(llm))
            .with_max_turns(3);

        let error = crew.kickoff().await.unwrap_err();
        assert!(error.to_string().contains("within 3 turns"));
    }

    #[tokio::test]
    async fn empty_task_list_is_an_error() {
        let llm = ScriptedLlm::new(&[]);
        let crew = Crew::new(agent(), vec![], ToolRegistry::default(), Box::new(llm));

        assert!(crew.kickoff().await.is_err());
    }

    #[test]
    fn json_is_extracted_from_fenced_replies() {
        let value =
            extract_json_object("Sure!\n```json\n{\"final\": \"done\"}\n```").unwrap();
        assert_eq!(value["final"], "done");
        assert!(extract_json_object("no braces here").is_none());
    }
}
