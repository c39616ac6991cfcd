//! Display models for the workflow editor. These mirror the backend wire
//! shapes exactly; the session store holds them without inspecting or
//! validating the open payload parts.

use serde::{Deserialize, Serialize};

/// Lifecycle of one workflow run.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowRunningStatus {
    Running,
    Succeeded,
    Failed,
}

impl Default for WorkflowRunningStatus {
    fn default() -> Self {
        WorkflowRunningStatus::Running
    }
}

/// The block types a workflow node can be.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Start,
    End,
    Llm,
    KnowledgeRetrieval,
    Code,
    TemplateTransform,
    QuestionClassifier,
    HttpRequest,
    Tool,
    ParameterExtractor,
    Iteration,
    Agent,
    DocExtractor,
    Loop,
    IfElse,
    VariableAggregator,
    Assigner,
}

/// Whether a node of this kind can be run on its own, outside a full
/// workflow run. A child node sits inside an iteration or loop; letting an
/// assigner run there can write variables the backend no longer knows
/// about, so that combination is refused.
pub fn can_run_by_single(kind: BlockKind, is_child_node: bool) -> bool {
    if is_child_node && kind == BlockKind::Assigner {
        return false;
    }
    match kind {
        BlockKind::End => false,
        _ => true,
    }
}

/// Who started the run, as reported by the backend.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct RunAuthor {
    pub name: String,
}

/// Result block of one workflow run. Inputs, outputs and files are kept as
/// raw JSON; only the fields the panels actually read get concrete types.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct RunResult {
    pub status: WorkflowRunningStatus,
    pub finished_at: Option<i64>,
    pub error: Option<String>,
    pub files: Option<Vec<serde_json::Value>>,
    pub inputs: Option<serde_json::Value>,
    pub outputs: Option<serde_json::Value>,
    pub elapsed_time: Option<f64>,
    pub total_tokens: Option<u64>,
    pub created_at: Option<String>,
    pub created_by: Option<RunAuthor>,
    pub total_steps: Option<u64>,
    pub exceptions_count: Option<u64>,
}

/// Everything the preview panel shows about the latest run.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct WorkflowRunningData {
    pub result: RunResult,
    /// Streamed answer text; some runs deliver structured output here.
    #[serde(rename = "resultText")]
    pub result_text: Option<serde_json::Value>,
    /// Per-node trace entries, untouched.
    pub tracing: Option<Vec<serde_json::Value>>,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Extra per-node payload next to the fields the editor reads.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct NodeData {
    pub selected: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Node represents a visual element in the workflow graph.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: NodeData,
}

/// Edge connects two nodes, optionally through named handles.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "sourceHandle")]
    pub source_handle: Option<String>,
    #[serde(rename = "targetHandle")]
    pub target_handle: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
