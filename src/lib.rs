use annotation_types::AnnotationTypes;
use lazy_static::lazy_static;

pub mod about;
pub mod annotation;
pub mod annotation_types;
pub mod dna_sequence;
pub mod engine;
pub mod gc_contents;
pub mod lanes;
pub mod layout;
pub mod nucleotide;
pub mod samples;
pub mod search;
pub mod sequence_rows;
pub mod view_state;
pub mod worker;

lazy_static! {
    // Annotation kinds with display labels and colors
    pub static ref ANNOTATION_TYPES: AnnotationTypes = AnnotationTypes::default();
}
