use crate::{
    annotation::{Annotation, AnnotationId},
    dna_sequence::DnaSequence,
    gc_contents::SequenceStats,
    lanes::{allocate_lanes, lane_count, AnnotationFragment},
    search::{find_matches, MatchSet},
    sequence_rows::{partition_rows, Row},
    view_state::ViewState,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSymbol {
    pub offset: usize,
    pub symbol: char,
    pub is_match: bool,
    /// Annotations covering this offset, in annotation order.
    pub annotation_ids: Vec<AnnotationId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub start_offset: usize,
    pub symbols: Vec<LayoutSymbol>,
    pub fragments: Vec<AnnotationFragment>,
    pub lane_count: usize,
}

impl LayoutRow {
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.symbol).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceLayout {
    pub sequence_length: usize,
    pub window_start: usize,
    /// Exclusive.
    pub window_end: usize,
    pub row_width: usize,
    pub query: String,
    pub matches: Vec<usize>,
    pub stats: SequenceStats,
    pub rows: Vec<LayoutRow>,
}

impl SequenceLayout {
    pub fn symbol_at(&self, offset: usize) -> Option<&LayoutSymbol> {
        let first = self.rows.first()?.start_offset;
        if offset < first || self.row_width == 0 {
            return None;
        }
        let row = self.rows.get((offset - first) / self.row_width)?;
        row.symbols.get(offset - row.start_offset)
    }
}

fn assemble_row(
    row: Row,
    fragments: Vec<AnnotationFragment>,
    matches: &MatchSet,
    annotations: &[Annotation],
) -> LayoutRow {
    let row_annotations: Vec<&Annotation> = annotations
        .iter()
        .filter(|a| a.is_well_formed() && a.overlaps(row.start_offset(), row.end_offset()))
        .collect();
    let symbols = row
        .symbols()
        .iter()
        .enumerate()
        .map(|(i, base)| {
            let offset = row.start_offset() + i;
            LayoutSymbol {
                offset,
                symbol: *base as char,
                is_match: matches.covers(offset),
                annotation_ids: row_annotations
                    .iter()
                    .filter(|a| a.covers(offset))
                    .map(|a| a.id.clone())
                    .collect(),
            }
        })
        .collect();
    LayoutRow {
        start_offset: row.start_offset(),
        symbols,
        lane_count: lane_count(&fragments),
        fragments,
    }
}

pub fn assemble(
    rows: Vec<Row>,
    fragments: Vec<Vec<AnnotationFragment>>,
    matches: &MatchSet,
    annotations: &[Annotation],
) -> Vec<LayoutRow> {
    rows.into_iter()
        .zip(fragments)
        .map(|(row, frags)| assemble_row(row, frags, matches, annotations))
        .collect()
}

pub fn compute_layout(
    dna: &DnaSequence,
    annotations: &[Annotation],
    view: &ViewState,
) -> SequenceLayout {
    let seq = dna.forward();
    let (window_start, window_end) = view.window(seq.len());
    let rows = partition_rows(seq, window_start, view.row_width, view.row_count);
    let matches = find_matches(seq, &view.search_query);
    let stats = SequenceStats::from_sequence(seq);
    let fragments = rows
        .iter()
        .map(|row| allocate_lanes(row, annotations))
        .collect();
    let rows = assemble(rows, fragments, &matches, annotations);
    log::debug!(
        "Laid out {} row(s) for window {}..{} with {} match(es)",
        rows.len(),
        window_start,
        window_end,
        matches.len()
    );
    SequenceLayout {
        sequence_length: seq.len(),
        window_start,
        window_end,
        row_width: view.row_width,
        query: view.search_query.clone(),
        matches: matches.positions().to_vec(),
        stats,
        rows,
    }
}
