use crate::nucleotide::Nucleotide;
use serde::{Deserialize, Serialize};

/// Composition of a sequence over the A/C/G/T alphabet. Other symbols are
/// ignored rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceStats {
    counts: [usize; 4],
    total: usize,
    gc_content: f64,
}

impl SequenceStats {
    pub fn from_sequence(sequence: &[u8]) -> Self {
        let mut counts = [0usize; 4];
        sequence
            .iter()
            .filter_map(|c| Nucleotide::from_letter(*c))
            .for_each(|n| counts[n.index()] += 1);
        let total = counts.iter().sum();
        let gc = Nucleotide::ALL
            .iter()
            .filter(|n| n.is_gc())
            .map(|n| counts[n.index()])
            .sum();
        Self {
            counts,
            total,
            gc_content: Self::percentage(gc, total),
        }
    }

    /// Empty or all-unrecognized input is 0%, never NaN.
    #[inline(always)]
    fn percentage(count: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        count as f64 / total as f64 * 100.0
    }

    #[inline(always)]
    pub fn count(&self, nucleotide: Nucleotide) -> usize {
        self.counts[nucleotide.index()]
    }

    #[inline(always)]
    pub fn total(&self) -> usize {
        self.total
    }

    #[inline(always)]
    pub fn gc_content(&self) -> f64 {
        self.gc_content
    }

    pub fn percent(&self, nucleotide: Nucleotide) -> f64 {
        Self::percentage(self.count(nucleotide), self.total)
    }

    pub fn counts(&self) -> impl Iterator<Item = (Nucleotide, usize)> + '_ {
        Nucleotide::ALL.into_iter().map(|n| (n, self.count(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::SAMPLE_SEQUENCES;

    #[test]
    fn test_gc_contents() {
        let stats = SequenceStats::from_sequence(b"AAAGGGTTTCCC");
        assert_eq!(stats.total(), 12);
        assert_eq!(stats.count(Nucleotide::G), 3);
        assert_eq!(stats.gc_content(), 50.0);
        assert_eq!(stats.percent(Nucleotide::A), 25.0);
    }

    #[test]
    fn test_unrecognized_symbols_are_ignored() {
        let stats = SequenceStats::from_sequence(b"gcNNxx--");
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.gc_content(), 100.0);
    }

    #[test]
    fn test_empty_sequence_is_zero_percent() {
        for seq in [&b""[..], &b"NNNN"[..]] {
            let stats = SequenceStats::from_sequence(seq);
            assert_eq!(stats.total(), 0);
            assert_eq!(stats.gc_content(), 0.0);
            assert_eq!(stats.percent(Nucleotide::T), 0.0);
        }
    }

    #[test]
    fn test_sample_sequence_matches_hand_count() {
        let (_, seq) = SAMPLE_SEQUENCES[0];
        let stats = SequenceStats::from_sequence(seq.as_bytes());
        assert_eq!(stats.total(), 77);
        assert_eq!(stats.count(Nucleotide::G) + stats.count(Nucleotide::C), 39);
        assert_eq!(stats.counts().map(|(_, c)| c).sum::<usize>(), stats.total());
        assert!((stats.gc_content() - 39.0 / 77.0 * 100.0).abs() < 1e-9);
    }
}
