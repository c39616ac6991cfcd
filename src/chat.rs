//! Chat transcript models for the debug/preview panel. Field names follow
//! the wire payloads, which mix snake_case and camelCase; the serde renames
//! pin the exact shapes.

use serde::{Deserialize, Serialize};

/// One file attached to a message.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct MessageFile {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    pub size: Option<u64>,
}

/// Retrieval citation shown under an answer.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Citation {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: Option<String>,
}

/// One step of an agent's reasoning, with optional tool round-trip.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AgentThought {
    pub id: String,
    pub tool: Option<String>,
    pub thought: String,
    pub observation: Option<String>,
    pub tool_input: Option<serde_json::Value>,
    pub tool_output: Option<serde_json::Value>,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStepStatus {
    Succeeded,
    Failed,
    Running,
    Pending,
}

/// One node execution inside the per-message workflow trace.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct WorkflowProcessStep {
    pub id: String,
    pub title: String,
    pub status: WorkflowStepStatus,
    pub elapsed_time: Option<f64>,
    pub error: Option<String>,
}

/// Files grouped by the workflow variable that produced them.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct VarFileGroup {
    #[serde(rename = "varName")]
    pub var_name: String,
    pub list: Vec<MessageFile>,
}

/// Reviewer annotation attached to an answer.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Annotation {
    pub id: String,
    pub content: String,
    #[serde(rename = "authorName")]
    pub author_name: Option<String>,
}

/// Token/latency stats for an answer.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct ChatItemMore {
    pub time: f64,
    pub tokens: u64,
    pub latency: Option<f64>,
}

/// One entry of the transcript, either a question or an answer.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ChatItem {
    pub id: String,
    pub content: String,
    #[serde(rename = "isAnswer")]
    pub is_answer: bool,
    pub message_files: Option<Vec<MessageFile>>,
    pub citation: Option<Vec<Citation>>,
    pub agent_thoughts: Option<Vec<AgentThought>>,
    #[serde(rename = "workflowProcess")]
    pub workflow_process: Option<Vec<WorkflowProcessStep>>,
    #[serde(rename = "allFiles")]
    pub all_files: Option<Vec<VarFileGroup>>,
    pub annotation: Option<Annotation>,
    pub more: Option<ChatItemMore>,
    #[serde(rename = "prevSibling")]
    pub prev_sibling: Option<String>,
    #[serde(rename = "nextSibling")]
    pub next_sibling: Option<String>,
    #[serde(rename = "siblingIndex")]
    pub sibling_index: Option<u32>,
    #[serde(rename = "siblingCount")]
    pub sibling_count: Option<u32>,
}

impl ChatItem {
    /// Minimal item; everything optional stays unset.
    pub fn new(id: impl Into<String>, content: impl Into<String>, is_answer: bool) -> Self {
        ChatItem {
            id: id.into(),
            content: content.into(),
            is_answer,
            message_files: None,
            citation: None,
            agent_thoughts: None,
            workflow_process: None,
            all_files: None,
            annotation: None,
            more: None,
            prev_sibling: None,
            next_sibling: None,
            sibling_index: None,
            sibling_count: None,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default)]
pub struct FeatureToggle {
    pub enabled: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct TextToSpeechConfig {
    pub enabled: bool,
    pub voice: Option<String>,
    pub language: Option<String>,
}

/// Per-app chat behavior switches, straight from the app config endpoint.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct ChatConfig {
    pub opening_statement: Option<String>,
    pub suggested_questions: Option<Vec<String>>,
    pub speech_to_text: Option<FeatureToggle>,
    pub text_to_speech: Option<TextToSpeechConfig>,
    pub retriever_resource: Option<FeatureToggle>,
    pub sensitive_word_avoidance: Option<FeatureToggle>,
    pub more_like_this: Option<FeatureToggle>,
}

/// Embedded-chat color overrides.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub chat_bubble_color_user: String,
    pub chat_bubble_color_assistant: String,
    pub chat_bubble_text_color_user: String,
    pub chat_bubble_text_color_assistant: String,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum LoadingAnimType {
    Text,
    Avatar,
}
