use crate::{
    annotation::{Annotation, AnnotationDraft, AnnotationError, AnnotationId},
    dna_sequence::DnaSequence,
    layout::{compute_layout, SequenceLayout},
    samples,
    search::find_matches,
    view_state::ViewState,
};
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

pub type OpId = String;
pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    pub scroll_rows: usize,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self { scroll_rows: 5 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectState {
    pub sequence: DnaSequence,
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub view: ViewState,
    #[serde(default)]
    pub parameters: EngineParameters,
    #[serde(default)]
    pub next_annotation_id: u64,
}

impl ProjectState {
    pub fn load_from_path(path: &str) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| EngineError {
            code: ErrorCode::Io,
            message: format!("Could not read state file '{path}': {e}"),
        })?;
        serde_json::from_str(&text).map_err(|e| EngineError {
            code: ErrorCode::InvalidInput,
            message: format!("Could not parse state JSON '{path}': {e}"),
        })
    }

    pub fn save_to_path(&self, path: &str) -> Result<(), EngineError> {
        let text = serde_json::to_string_pretty(self).map_err(|e| EngineError {
            code: ErrorCode::Internal,
            message: format!("Could not serialize state: {e}"),
        })?;
        std::fs::write(path, text).map_err(|e| EngineError {
            code: ErrorCode::Io,
            message: format!("Could not write state file '{path}': {e}"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Previous,
    Next,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Operation {
    SetSequence {
        sequence: String,
        sanitize: Option<bool>,
    },
    LoadSampleSequence {
        name: String,
    },
    LoadFasta {
        path: String,
    },
    AddAnnotation {
        annotation: AnnotationDraft,
    },
    EditAnnotation {
        id: AnnotationId,
        annotation: AnnotationDraft,
    },
    DeleteAnnotation {
        id: AnnotationId,
    },
    ClearAnnotations,
    LoadSampleAnnotations,
    SetView {
        window_start: Option<usize>,
        row_width: Option<usize>,
        row_count: Option<usize>,
    },
    SetSearch {
        query: String,
    },
    Scroll {
        direction: ScrollDirection,
    },
    JumpToMatch {
        index: usize,
    },
    SetParameter {
        name: String,
        value: serde_json::Value,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub run_id: RunId,
    pub ops: Vec<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
    pub op_id: OpId,
    pub created_annotation_ids: Vec<AnnotationId>,
    pub removed_annotation_ids: Vec<AnnotationId>,
    pub warnings: Vec<String>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub run_id: RunId,
    pub op: Operation,
    pub result: OpResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidInput,
    NotFound,
    Unsupported,
    Io,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineError {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for EngineError {}

impl From<AnnotationError> for EngineError {
    fn from(err: AnnotationError) -> Self {
        EngineError {
            code: ErrorCode::InvalidInput,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub protocol_version: String,
    pub supported_operations: Vec<String>,
    pub sample_sequences: Vec<String>,
    pub deterministic_operation_log: bool,
}

pub trait Engine {
    fn apply(&mut self, op: Operation) -> Result<OpResult, EngineError>;
    fn apply_workflow(&mut self, wf: Workflow) -> Result<Vec<OpResult>, EngineError>;
    fn snapshot(&self) -> &ProjectState;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerEngine {
    state: ProjectState,
    journal: Vec<OperationRecord>,
    op_counter: u64,
}

impl ViewerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(mut state: ProjectState) -> Self {
        let highest = state
            .annotations
            .iter()
            .filter_map(|a| a.id.strip_prefix("annotation-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        state.next_annotation_id = state.next_annotation_id.max(highest);
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn layout(&self) -> SequenceLayout {
        compute_layout(
            &self.state.sequence,
            &self.state.annotations,
            &self.state.view,
        )
    }

    pub fn capabilities() -> Capabilities {
        Capabilities {
            protocol_version: "v1".to_string(),
            supported_operations: vec![
                "SetSequence".to_string(),
                "LoadSampleSequence".to_string(),
                "LoadFasta".to_string(),
                "AddAnnotation".to_string(),
                "EditAnnotation".to_string(),
                "DeleteAnnotation".to_string(),
                "ClearAnnotations".to_string(),
                "LoadSampleAnnotations".to_string(),
                "SetView".to_string(),
                "SetSearch".to_string(),
                "Scroll".to_string(),
                "JumpToMatch".to_string(),
                "SetParameter".to_string(),
            ],
            sample_sequences: samples::SAMPLE_SEQUENCES
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            deterministic_operation_log: true,
        }
    }

    pub fn operation_log(&self) -> &[OperationRecord] {
        &self.journal
    }

    fn next_op_id(&mut self) -> OpId {
        self.op_counter += 1;
        format!("op-{}", self.op_counter)
    }

    fn next_annotation_id(&mut self) -> AnnotationId {
        self.state.next_annotation_id += 1;
        format!("annotation-{}", self.state.next_annotation_id)
    }

    fn annotation_index(&self, id: &str) -> Result<usize, EngineError> {
        self.state
            .annotations
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| EngineError {
                code: ErrorCode::NotFound,
                message: format!("Annotation '{id}' not found"),
            })
    }

    // Annotations never outlive the sequence they were placed on.
    fn replace_sequence(&mut self, dna: DnaSequence, result: &mut OpResult) {
        result.removed_annotation_ids = self
            .state
            .annotations
            .drain(..)
            .map(|a| a.id)
            .collect();
        if !result.removed_annotation_ids.is_empty() {
            result.warnings.push(format!(
                "Cleared {} annotation(s) of the previous sequence",
                result.removed_annotation_ids.len()
            ));
        }
        self.state.sequence = dna;
        self.state.view.window_start = 0;
        result.messages.push(format!(
            "Sequence set ({} bp)",
            self.state.sequence.len()
        ));
    }

    fn scroll_target(&self, direction: ScrollDirection) -> Option<usize> {
        let view = &self.state.view;
        let seq_len = self.state.sequence.len();
        let step = view.row_width.saturating_mul(self.state.parameters.scroll_rows);
        let current = view.clamped_start(seq_len);
        match direction {
            ScrollDirection::Previous => Some(current.saturating_sub(step)),
            ScrollDirection::Next => {
                if current.saturating_add(view.window_span()) >= seq_len {
                    return None;
                }
                Some(current.saturating_add(step).min(seq_len - 1))
            }
        }
    }

    fn apply_internal(&mut self, op: Operation) -> Result<OpResult, EngineError> {
        let op_id = self.next_op_id();
        let mut result = OpResult {
            op_id,
            created_annotation_ids: vec![],
            removed_annotation_ids: vec![],
            warnings: vec![],
            messages: vec![],
        };

        match op {
            Operation::SetSequence { sequence, sanitize } => {
                let dna = if sanitize.unwrap_or(true) {
                    DnaSequence::sanitized(&sequence)
                } else {
                    DnaSequence::from_sequence(&sequence)
                };
                self.replace_sequence(dna, &mut result);
            }
            Operation::LoadSampleSequence { name } => {
                let seq = samples::sample_sequence(&name).ok_or_else(|| EngineError {
                    code: ErrorCode::NotFound,
                    message: format!("Sample sequence '{name}' not found"),
                })?;
                self.replace_sequence(DnaSequence::from_sequence(seq), &mut result);
            }
            Operation::LoadFasta { path } => {
                let dna = DnaSequence::from_fasta_file(&path)
                    .map_err(|e| EngineError {
                        code: ErrorCode::Io,
                        message: format!("Could not read FASTA file '{path}': {e}"),
                    })?
                    .into_iter()
                    .next()
                    .ok_or_else(|| EngineError {
                        code: ErrorCode::InvalidInput,
                        message: format!("FASTA file '{path}' contains no records"),
                    })?;
                self.replace_sequence(dna, &mut result);
            }
            Operation::AddAnnotation { annotation } => {
                annotation.validate(self.state.sequence.len())?;
                let id = self.next_annotation_id();
                let annotation = annotation.into_annotation(id.clone());
                result
                    .messages
                    .push(format!("Added annotation '{}' as '{id}'", annotation.label));
                self.state.annotations.push(annotation);
                result.created_annotation_ids.push(id);
            }
            Operation::EditAnnotation { id, annotation } => {
                let idx = self.annotation_index(&id)?;
                annotation.validate(self.state.sequence.len())?;
                self.state.annotations[idx] = annotation.into_annotation(id.clone());
                result.messages.push(format!("Updated annotation '{id}'"));
            }
            Operation::DeleteAnnotation { id } => {
                let idx = self.annotation_index(&id)?;
                self.state.annotations.remove(idx);
                result.messages.push(format!("Deleted annotation '{id}'"));
                result.removed_annotation_ids.push(id);
            }
            Operation::ClearAnnotations => {
                result.removed_annotation_ids = self
                    .state
                    .annotations
                    .drain(..)
                    .map(|a| a.id)
                    .collect();
                result.messages.push(format!(
                    "Cleared {} annotation(s)",
                    result.removed_annotation_ids.len()
                ));
            }
            Operation::LoadSampleAnnotations => {
                let seq_len = self.state.sequence.len();
                for draft in samples::sample_annotation_drafts() {
                    draft.validate(seq_len)?;
                }
                result.removed_annotation_ids = self
                    .state
                    .annotations
                    .drain(..)
                    .map(|a| a.id)
                    .collect();
                self.state.annotations = samples::sample_annotations();
                result.created_annotation_ids =
                    self.state.annotations.iter().map(|a| a.id.clone()).collect();
                result.messages.push(format!(
                    "Loaded {} sample annotation(s)",
                    self.state.annotations.len()
                ));
            }
            Operation::SetView {
                window_start,
                row_width,
                row_count,
            } => {
                if row_width == Some(0) {
                    return Err(EngineError {
                        code: ErrorCode::InvalidInput,
                        message: "Row width must be greater than 0".to_string(),
                    });
                }
                let view = &mut self.state.view;
                if let Some(window_start) = window_start {
                    view.window_start = window_start;
                }
                if let Some(row_width) = row_width {
                    view.row_width = row_width;
                }
                if let Some(row_count) = row_count {
                    view.row_count = row_count;
                }
                let clamped = view.clamped_start(self.state.sequence.len());
                if clamped != view.window_start {
                    result.warnings.push(format!(
                        "Window start {} is past the sequence end, showing from {clamped}",
                        view.window_start
                    ));
                    view.window_start = clamped;
                }
                result.messages.push(format!(
                    "View at {} with {} row(s) of {} bp",
                    view.window_start, view.row_count, view.row_width
                ));
            }
            Operation::SetSearch { query } => {
                let count =
                    find_matches(self.state.sequence.forward(), &query).len();
                result
                    .messages
                    .push(format!("Found {count} matches for \"{query}\""));
                self.state.view.search_query = query;
            }
            Operation::Scroll { direction } => {
                match self.scroll_target(direction) {
                    Some(start) => self.state.view.window_start = start,
                    None => result
                        .warnings
                        .push("Already showing the end of the sequence".to_string()),
                }
                result.messages.push(format!(
                    "Position: {} - {} of {}",
                    self.state.view.window_start + 1,
                    self.state
                        .view
                        .window_start
                        .saturating_add(self.state.view.window_span())
                        .min(self.state.sequence.len()),
                    self.state.sequence.len()
                ));
            }
            Operation::JumpToMatch { index } => {
                let matches = find_matches(
                    self.state.sequence.forward(),
                    &self.state.view.search_query,
                );
                let position = *matches.positions().get(index).ok_or_else(|| EngineError {
                    code: ErrorCode::NotFound,
                    message: format!(
                        "Match {index} not found ({} match(es) for \"{}\")",
                        matches.len(),
                        self.state.view.search_query
                    ),
                })?;
                self.state.view.window_start =
                    position.saturating_sub(self.state.view.row_width);
                result
                    .messages
                    .push(format!("Jumped to match at {}", position + 1));
            }
            Operation::SetParameter { name, value } => match name.as_str() {
                "scroll_rows" => {
                    let raw = value.as_u64().ok_or_else(|| EngineError {
                        code: ErrorCode::InvalidInput,
                        message: "scroll_rows must be a positive integer".to_string(),
                    })?;
                    if raw == 0 {
                        return Err(EngineError {
                            code: ErrorCode::InvalidInput,
                            message: "scroll_rows must be >= 1".to_string(),
                        });
                    }
                    self.state.parameters.scroll_rows = raw as usize;
                    result.messages.push(format!("Set parameter '{name}' to {raw}"));
                }
                _ => {
                    return Err(EngineError {
                        code: ErrorCode::Unsupported,
                        message: format!("Unknown parameter '{name}'"),
                    });
                }
            },
        }

        Ok(result)
    }
}

impl Engine for ViewerEngine {
    fn apply(&mut self, op: Operation) -> Result<OpResult, EngineError> {
        let run_id = "interactive".to_string();
        log::info!("Applying {op:?}");
        let result = self.apply_internal(op.clone())?;
        self.journal.push(OperationRecord {
            run_id,
            op,
            result: result.clone(),
        });
        Ok(result)
    }

    fn apply_workflow(&mut self, wf: Workflow) -> Result<Vec<OpResult>, EngineError> {
        let mut results = Vec::new();
        log::info!("Running workflow '{}' with {} op(s)", wf.run_id, wf.ops.len());
        for op in &wf.ops {
            let result = self.apply_internal(op.clone())?;
            self.journal.push(OperationRecord {
                run_id: wf.run_id.clone(),
                op: op.clone(),
                result: result.clone(),
            });
            results.push(result);
        }
        Ok(results)
    }

    fn snapshot(&self) -> &ProjectState {
        &self.state
    }
}
