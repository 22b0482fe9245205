use serde::{Deserialize, Serialize};

pub const FALLBACK_COLOR: &str = "#9E9E9E";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationType {
    pub key: String,
    pub label: String,
    pub color: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnotationTypes {
    types: Vec<AnnotationType>,
}

impl AnnotationTypes {
    pub fn get(&self, key: &str) -> Option<&AnnotationType> {
        self.types.iter().find(|t| t.key.eq_ignore_ascii_case(key))
    }

    pub fn types(&self) -> &[AnnotationType] {
        &self.types
    }

    pub fn color(&self, key: &str) -> &str {
        self.get(key)
            .map(|t| t.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Display label of a kind; unknown kinds are shown as given.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map(|t| t.label.as_str()).unwrap_or(key)
    }
}

impl Default for AnnotationTypes {
    fn default() -> Self {
        let types = [
            ("gene", "Gene", "#4CAF50"),
            ("promoter", "Promoter", "#FF9800"),
            ("enhancer", "Enhancer", "#9C27B0"),
            ("exon", "Exon", "#2196F3"),
            ("intron", "Intron", "#607D8B"),
            ("utr", "UTR", "#795548"),
            ("restriction", "Restriction Site", "#F44336"),
            ("custom", "Custom", "#00BCD4"),
        ]
        .into_iter()
        .map(|(key, label, color)| AnnotationType {
            key: key.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        })
        .collect();
        Self { types }
    }
}
