use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    query_len: usize,
    positions: Vec<usize>,
}

impl MatchSet {
    #[inline(always)]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn covers(&self, offset: usize) -> bool {
        if self.query_len == 0 {
            return false;
        }
        // Last match starting at or before offset is the only candidate
        // that can reach it, since all matches have the same length.
        let idx = self.positions.partition_point(|&m| m <= offset);
        idx > 0 && offset < self.positions[idx - 1] + self.query_len
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() || start >= haystack.len() {
        return None;
    }
    let end = haystack.len() - needle.len();
    (start..=end).find(|idx| haystack[*idx..*idx + needle.len()].eq_ignore_ascii_case(needle))
}

pub fn find_matches(sequence: &[u8], query: &str) -> MatchSet {
    let needle = query.as_bytes();
    let mut ret = MatchSet {
        query_len: needle.len(),
        positions: vec![],
    };
    if needle.is_empty() || sequence.len() < needle.len() {
        return ret;
    }
    let mut start = 0usize;
    while let Some(pos) = find_subsequence(sequence, needle, start) {
        ret.positions.push(pos);
        start = pos + 1;
    }
    ret
}
