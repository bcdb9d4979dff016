//! Chat completions request body.

use rcore::{Call, FunctionSchema};
use serde::Serialize;
use serde_json::{Value, json};

/// OpenAI chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// A single user message carrying the prompt.
    pub messages: Vec<Value>,
    /// Temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Tools the model may call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    /// Tool choice control; `auto` whenever tools are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

impl Request {
    fn with_tools(self, functions: &[FunctionSchema]) -> Self {
        if functions.is_empty() {
            return self;
        }
        let tools = functions
            .iter()
            .map(|function| {
                json!({
                    "type": "function",
                    "function": function,
                })
            })
            .collect();
        Self {
            tools: Some(tools),
            tool_choice: Some(json!("auto")),
            ..self
        }
    }
}

impl From<&Call<'_>> for Request {
    fn from(call: &Call<'_>) -> Self {
        Self {
            model: call.model.to_owned(),
            messages: vec![json!({ "role": "user", "content": call.prompt })],
            temperature: call.temperature,
            max_tokens: call.max_tokens,
            tools: None,
            tool_choice: None,
        }
        .with_tools(call.functions)
    }
}
