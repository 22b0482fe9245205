use serde::{Deserialize, Serialize};

pub const DEFAULT_ROW_WIDTH: usize = 20;
pub const DEFAULT_ROW_COUNT: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub window_start: usize,
    pub row_width: usize,
    pub row_count: usize,
    pub search_query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            window_start: 0,
            row_width: DEFAULT_ROW_WIDTH,
            row_count: DEFAULT_ROW_COUNT,
            search_query: String::new(),
        }
    }
}

impl ViewState {
    #[inline(always)]
    pub fn window_span(&self) -> usize {
        self.row_width.saturating_mul(self.row_count)
    }

    /// `window_start` clamped to `[0, seq_len)`; 0 for an empty sequence.
    pub fn clamped_start(&self, seq_len: usize) -> usize {
        self.window_start.min(seq_len.saturating_sub(1))
    }

    pub fn window(&self, seq_len: usize) -> (usize, usize) {
        if seq_len == 0 {
            return (0, 0);
        }
        let start = self.clamped_start(seq_len);
        let end = start.saturating_add(self.window_span()).min(seq_len);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let view = ViewState::default();
        assert_eq!(view.row_width, 20);
        assert_eq!(view.row_count, 15);
        assert_eq!(view.window_span(), 300);
    }

    #[test]
    fn test_window_clamps_past_end() {
        let view = ViewState {
            window_start: 500,
            row_width: 4,
            row_count: 2,
            ..ViewState::default()
        };
        assert_eq!(view.window(10), (9, 10));
        assert_eq!(view.window(0), (0, 0));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let view: ViewState = serde_json::from_str(r#"{"row_width":10}"#).unwrap();
        assert_eq!(view.row_width, 10);
        assert_eq!(view.row_count, DEFAULT_ROW_COUNT);
        assert!(view.search_query.is_empty());
    }
}
