use proptest::prelude::*;
use seqview::{
    annotation::{Annotation, AnnotationDraft},
    dna_sequence::DnaSequence,
    engine::{Engine, Operation, ViewerEngine},
    gc_contents::SequenceStats,
    lanes::{allocate_lanes, lane_count, max_depth},
    layout::compute_layout,
    samples,
    search::find_matches,
    sequence_rows::partition_rows,
    view_state::ViewState,
};

fn sequence_strategy() -> impl Strategy<Value = String> {
    "[ACGTacgtN]{0,200}".prop_map(|s| s.to_string())
}

fn annotations_strategy() -> impl Strategy<Value = Vec<Annotation>> {
    prop::collection::vec((0usize..120, 0usize..40), 0..25).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (start, len))| {
                AnnotationDraft::new(start, start + len, "gene").into_annotation(format!("a{i}"))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn test_empty_query_never_matches(seq in sequence_strategy()) {
        prop_assert!(find_matches(seq.as_bytes(), "").is_empty());
    }

    #[test]
    fn test_matches_ascending_and_verified(
        seq in sequence_strategy(),
        query in "[ACGTacgt]{1,4}",
    ) {
        let bytes = seq.as_bytes();
        let matches = find_matches(bytes, &query);
        let positions = matches.positions();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for &pos in positions {
            prop_assert!(bytes[pos..pos + query.len()].eq_ignore_ascii_case(query.as_bytes()));
        }
        let expected = (0..=bytes.len().saturating_sub(query.len()))
            .filter(|&i| i + query.len() <= bytes.len())
            .filter(|&i| bytes[i..i + query.len()].eq_ignore_ascii_case(query.as_bytes()))
            .count();
        prop_assert_eq!(positions.len(), expected);
    }

    #[test]
    fn test_rows_reproduce_window_slice(
        seq in "[ACGT]{1,200}",
        window_start in 0usize..250,
        row_width in 1usize..30,
        row_count in 1usize..10,
    ) {
        let bytes = seq.as_bytes();
        let rows = partition_rows(bytes, window_start, row_width, row_count);
        let view = ViewState {
            window_start,
            row_width,
            row_count,
            search_query: String::new(),
        };
        let (start, end) = view.window(bytes.len());
        let joined: Vec<u8> = rows.iter().flat_map(|r| r.symbols().to_vec()).collect();
        prop_assert_eq!(&joined[..], &bytes[start..end]);
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.start_offset(), start + i * row_width);
            if i + 1 < rows.len() {
                prop_assert_eq!(row.len(), row_width);
            } else {
                prop_assert!(row.len() <= row_width);
            }
        }
    }

    #[test]
    fn test_lanes_are_disjoint_and_minimal(
        annotations in annotations_strategy(),
        window_start in 0usize..100,
        row_width in 1usize..60,
    ) {
        let seq = "ACGT".repeat(50);
        let rows = partition_rows(seq.as_bytes(), window_start, row_width, 3);
        for row in &rows {
            let fragments = allocate_lanes(row, &annotations);
            for f in &fragments {
                prop_assert!(row.start_offset() <= f.clipped_start);
                prop_assert!(f.clipped_start <= f.clipped_end);
                prop_assert!(f.clipped_end <= row.end_offset());
            }
            for (i, a) in fragments.iter().enumerate() {
                for b in &fragments[i + 1..] {
                    if a.overlaps(b) {
                        prop_assert_ne!(a.lane, b.lane);
                    }
                }
            }
            prop_assert_eq!(lane_count(&fragments), max_depth(&fragments));
        }
    }

    #[test]
    fn test_stats_are_consistent(seq in sequence_strategy()) {
        let stats = SequenceStats::from_sequence(seq.as_bytes());
        let sum: usize = stats.counts().map(|(_, count)| count).sum();
        prop_assert_eq!(sum, stats.total());
        if stats.total() == 0 {
            prop_assert_eq!(stats.gc_content(), 0.0);
        } else {
            prop_assert!((0.0..=100.0).contains(&stats.gc_content()));
        }
    }
}

#[test]
fn test_two_rows_of_four() {
    let rows = partition_rows(b"ATGCATGC", 0, 4, 15);
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].start_offset(), rows[0].end_offset()), (0, 3));
    assert_eq!((rows[1].start_offset(), rows[1].end_offset()), (4, 7));
    assert_eq!(rows[0].symbols(), b"ATGC");
    assert_eq!(rows[1].symbols(), b"ATGC");
}

#[test]
fn test_overlapping_annotations_get_separate_lanes() {
    let rows = partition_rows(b"ATGCATGCAT", 0, 10, 1);
    let anns = vec![
        AnnotationDraft::new(0, 5, "gene").into_annotation("A".to_string()),
        AnnotationDraft::new(3, 8, "exon").into_annotation("B".to_string()),
    ];
    let fragments = allocate_lanes(&rows[0], &anns);
    assert_eq!(fragments[0].annotation_id, "A");
    assert_eq!(fragments[0].lane, 0);
    assert_eq!(fragments[1].annotation_id, "B");
    assert_eq!(fragments[1].lane, 1);
}

#[test]
fn test_overlapping_matches() {
    assert_eq!(find_matches(b"ATGATG", "ATG").positions(), &[0, 3]);
}

#[test]
fn test_replacing_sequence_drops_annotations() {
    let mut engine = ViewerEngine::new();
    engine
        .apply(Operation::LoadSampleSequence {
            name: "Sample 1".to_string(),
        })
        .unwrap();
    for draft in samples::sample_annotation_drafts().into_iter().take(2) {
        engine
            .apply(Operation::AddAnnotation { annotation: draft })
            .unwrap();
    }
    assert_eq!(engine.state().annotations.len(), 2);
    let result = engine
        .apply(Operation::SetSequence {
            sequence: "GGGGCCCC".to_string(),
            sanitize: None,
        })
        .unwrap();
    assert!(engine.state().annotations.is_empty());
    assert_eq!(result.removed_annotation_ids.len(), 2);
}

#[test]
fn test_sample_gc_content_matches_hand_count() {
    let seq = samples::SAMPLE_SEQUENCES[0].1;
    let gc = seq.bytes().filter(|b| matches!(b, b'G' | b'C')).count();
    let stats = SequenceStats::from_sequence(seq.as_bytes());
    assert_eq!(stats.total(), seq.len());
    assert!((stats.gc_content() - gc as f64 * 100.0 / seq.len() as f64).abs() < 1e-9);
}

#[test]
fn test_layout_of_sample_with_annotations() {
    let dna = DnaSequence::from_sequence(samples::SAMPLE_SEQUENCES[0].1);
    let view = ViewState {
        search_query: "gcatgc".to_string(),
        ..ViewState::default()
    };
    let layout = compute_layout(&dna, &samples::sample_annotations(), &view);
    assert_eq!(layout.rows.len(), 4);
    assert!(!layout.matches.is_empty());
    for &pos in &layout.matches {
        assert!(layout.symbol_at(pos).unwrap().is_match);
    }
    let exon_rows: Vec<usize> = layout
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.fragments.iter().any(|f| f.annotation_id == "sample-2"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(exon_rows, vec![2, 3]);
}
