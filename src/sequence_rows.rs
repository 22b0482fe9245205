use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    start_offset: usize,
    symbols: Vec<u8>,
}

impl Row {
    #[inline(always)]
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline(always)]
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.symbols.len().saturating_sub(1)
    }
}

pub fn partition_rows(
    sequence: &[u8],
    window_start: usize,
    row_width: usize,
    row_count: usize,
) -> Vec<Row> {
    if sequence.is_empty() || row_width == 0 || row_count == 0 {
        return vec![];
    }
    let start = window_start.min(sequence.len() - 1);
    let end = start
        .saturating_add(row_width.saturating_mul(row_count))
        .min(sequence.len());
    sequence[start..end]
        .chunks(row_width)
        .enumerate()
        .map(|(i, chunk)| Row {
            start_offset: start + i * row_width,
            symbols: chunk.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_full_rows() {
        let rows = partition_rows(b"ATGCATGC", 0, 4, 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].start_offset(), 0);
        assert_eq!(rows[0].symbols(), b"ATGC");
        assert_eq!(rows[0].end_offset(), 3);
        assert_eq!(rows[1].start_offset(), 4);
        assert_eq!(rows[1].symbols(), b"ATGC");
        assert_eq!(rows[1].end_offset(), 7);
    }

    #[test]
    fn test_last_row_may_be_short() {
        let rows = partition_rows(b"ATGCATGCA", 0, 4, 10);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].symbols(), b"A");
        assert_eq!(rows[2].start_offset(), 8);
    }

    #[test]
    fn test_row_count_limits_window() {
        let rows = partition_rows(b"AAAACCCCGGGGTTTT", 2, 4, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbols(), b"AACC");
        assert_eq!(rows[1].symbols(), b"CCGG");
        assert_eq!(rows[1].start_offset(), 6);
    }

    #[test]
    fn test_window_start_is_clamped() {
        let rows = partition_rows(b"ATGC", 99, 4, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start_offset(), 3);
        assert_eq!(rows[0].symbols(), b"C");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(partition_rows(b"", 0, 4, 2).is_empty());
        assert!(partition_rows(b"ATGC", 0, 0, 2).is_empty());
        assert!(partition_rows(b"ATGC", 0, 4, 0).is_empty());
    }
}
