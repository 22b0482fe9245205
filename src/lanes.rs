use crate::{
    annotation::{Annotation, AnnotationId},
    sequence_rows::Row,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationFragment {
    pub annotation_id: AnnotationId,
    pub row_start_offset: usize,
    pub clipped_start: usize,
    pub clipped_end: usize,
    pub lane: usize,
}

impl AnnotationFragment {
    pub fn overlaps(&self, other: &AnnotationFragment) -> bool {
        self.clipped_start <= other.clipped_end && other.clipped_start <= self.clipped_end
    }
}

fn lane_allocate(lanes: &mut Vec<usize>, start: usize, end: usize) -> usize {
    for (idx, lane_end) in lanes.iter_mut().enumerate() {
        if *lane_end < start {
            *lane_end = end;
            return idx;
        }
    }
    lanes.push(end);
    lanes.len() - 1
}

pub fn allocate_lanes(row: &Row, annotations: &[Annotation]) -> Vec<AnnotationFragment> {
    if row.is_empty() {
        return vec![];
    }
    let row_start = row.start_offset();
    let row_end = row.end_offset();

    // Lane numbers are local to this row.
    let mut lanes: Vec<usize> = vec![];
    let fragments: Vec<AnnotationFragment> = annotations
        .iter()
        .filter(|ann| {
            if !ann.is_well_formed() {
                log::debug!(
                    "Skipping annotation '{}' with start {} after end {}",
                    ann.id,
                    ann.start,
                    ann.end
                );
                return false;
            }
            ann.overlaps(row_start, row_end)
        })
        .map(|ann| (ann, ann.start.max(row_start), ann.end.min(row_end)))
        // Stable sort: ties stay in annotation order.
        .sorted_by_key(|(_, clipped_start, _)| *clipped_start)
        .map(|(ann, clipped_start, clipped_end)| AnnotationFragment {
            annotation_id: ann.id.clone(),
            row_start_offset: row_start,
            clipped_start,
            clipped_end,
            lane: lane_allocate(&mut lanes, clipped_start, clipped_end),
        })
        .collect();
    debug_assert_eq!(lanes.len(), max_depth(&fragments));
    fragments
}

pub fn lane_count(fragments: &[AnnotationFragment]) -> usize {
    fragments.iter().map(|f| f.lane + 1).max().unwrap_or(0)
}

pub fn max_depth(fragments: &[AnnotationFragment]) -> usize {
    let mut events: Vec<(usize, i32)> = fragments
        .iter()
        .flat_map(|f| [(f.clipped_start, 1), (f.clipped_end + 1, -1)])
        .collect();
    // Ends sort before starts at the same offset, fragments are inclusive.
    events.sort_unstable();
    let mut depth = 0i32;
    let mut best = 0i32;
    for (_, delta) in events {
        depth += delta;
        best = best.max(depth);
    }
    best as usize
}
