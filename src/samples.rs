use crate::annotation::{Annotation, AnnotationDraft, Strand};

pub const SAMPLE_SEQUENCES: [(&str, &str); 3] = [
    (
        "Sample 1",
        "ATGCGATCGTAGCTAGCATGCTAGCTAGCATGCTAGCTAGCATGCTAGCATGCTAGCTAGCATGCTAGCTAGCATGC",
    ),
    (
        "Sample 2",
        "GGCCTTAAGGATCCGGAATTCCTGCAGCCCGGGGGATCCACTAGTTCTAGAGCGGCCGCCACCGCGGTGGAGCTC",
    ),
    (
        "Sample 3",
        "AAAAAAAAAAAAAAAAAAAATTTTTTTTTTTTTTTTTTGGGGGGGGGGGGGGGGGGCCCCCCCCCCCCCCCCCC",
    ),
];

pub fn sample_sequence(name: &str) -> Option<&'static str> {
    SAMPLE_SEQUENCES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|(_, seq)| *seq)
}

pub fn sample_annotation_drafts() -> Vec<AnnotationDraft> {
    vec![
        AnnotationDraft::new(0, 20, "gene")
            .with_label("Gene A")
            .with_description("Important gene coding for protein A"),
        AnnotationDraft::new(25, 35, "promoter")
            .with_label("Promoter")
            .with_description("Regulatory sequence"),
        AnnotationDraft::new(40, 60, "exon")
            .with_label("Exon 1")
            .with_description("First exon of gene B")
            .with_strand(Strand::Reverse),
    ]
}

pub fn sample_annotations() -> Vec<Annotation> {
    sample_annotation_drafts()
        .into_iter()
        .enumerate()
        .map(|(i, draft)| draft.into_annotation(format!("sample-{i}")))
        .collect()
}
