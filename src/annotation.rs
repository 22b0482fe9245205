use crate::{annotation_types::AnnotationTypes, ANNOTATION_TYPES};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type AnnotationId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[default]
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub start: usize,
    pub end: usize,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    #[serde(default)]
    pub strand: Strand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Annotation {
    #[inline(always)]
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    #[inline(always)]
    pub fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    #[inline(always)]
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        self.start <= to && self.end >= from
    }

    pub fn tooltip(&self) -> String {
        format!(
            "{} ({}-{}) {}\n{}",
            self.label,
            self.start,
            self.end,
            self.strand,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("Please enter valid start and end positions: start {start} is after end {end}")]
    StartAfterEnd { start: usize, end: usize },
    #[error(
        "Please enter valid start and end positions: end {end} is outside the sequence (length {seq_len})"
    )]
    OutOfRange { end: usize, seq_len: usize },
}

/// An annotation as submitted for creation or editing; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationDraft {
    pub start: usize,
    pub end: usize,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: Option<String>,
    pub strand: Strand,
    pub description: Option<String>,
}

impl AnnotationDraft {
    pub fn new(start: usize, end: usize, kind: &str) -> Self {
        Self {
            start,
            end,
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn validate(&self, seq_len: usize) -> Result<(), AnnotationError> {
        if self.start > self.end {
            return Err(AnnotationError::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }
        if self.end >= seq_len {
            return Err(AnnotationError::OutOfRange {
                end: self.end,
                seq_len,
            });
        }
        Ok(())
    }

    pub fn into_annotation(self, id: AnnotationId) -> Annotation {
        self.into_annotation_with(id, &ANNOTATION_TYPES)
    }

    pub fn into_annotation_with(self, id: AnnotationId, types: &AnnotationTypes) -> Annotation {
        let kind = if self.kind.trim().is_empty() {
            "gene".to_string()
        } else {
            self.kind.trim().to_ascii_lowercase()
        };
        let label = if self.label.trim().is_empty() {
            format!("{} {}-{}", types.label(&kind), self.start, self.end)
        } else {
            self.label
        };
        let color = self
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| types.color(&kind).to_string());
        Annotation {
            id,
            start: self.start,
            end: self.end,
            label,
            kind,
            color,
            strand: self.strand,
            description: self.description.filter(|d| !d.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub kind: String,
    pub label: String,
    pub color: String,
}

pub fn legend(annotations: &[Annotation]) -> Vec<LegendEntry> {
    ANNOTATION_TYPES
        .types()
        .iter()
        .filter(|t| annotations.iter().any(|a| a.kind.eq_ignore_ascii_case(&t.key)))
        .map(|t| LegendEntry {
            kind: t.key.clone(),
            label: t.label.clone(),
            color: t.color.clone(),
        })
        .collect()
}
