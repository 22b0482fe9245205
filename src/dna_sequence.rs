use crate::nucleotide::Nucleotide;
use anyhow::Result;
use bio::io::fasta;
use serde::{Deserialize, Serialize};
use std::{fs::File, path::Path};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaSequence {
    seq: String,
    #[serde(default)]
    name: Option<String>,
}

impl DnaSequence {
    pub fn from_sequence(sequence: &str) -> Self {
        let seq = sequence
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                if c.is_ascii() {
                    c.to_ascii_uppercase()
                } else {
                    'N'
                }
            })
            .collect();
        Self { seq, name: None }
    }

    /// Strips every character outside the A/C/G/T alphabet.
    pub fn sanitized(sequence: &str) -> Self {
        Self::from_u8(&Self::sanitize_bytes(sequence.as_bytes()))
    }

    pub fn sanitize_bytes(v: &[u8]) -> Vec<u8> {
        v.iter()
            .filter_map(|c| Nucleotide::from_letter(*c))
            .map(Nucleotide::letter)
            .collect()
    }

    pub fn from_fasta_file<P: AsRef<Path>>(filename: P) -> Result<Vec<DnaSequence>> {
        let file = File::open(filename)?;
        Ok(fasta::Reader::new(file)
            .records()
            .filter_map(|record| record.ok())
            .map(|record| DnaSequence::from_fasta_record(&record))
            .collect())
    }

    pub fn from_fasta_record(record: &fasta::Record) -> Self {
        let mut ret = Self::from_u8(&Self::sanitize_bytes(record.seq()));
        ret.name = Some(record.id().to_string());
        ret
    }

    fn from_u8(s: &[u8]) -> Self {
        Self {
            seq: String::from_utf8_lossy(s).to_ascii_uppercase(),
            name: None,
        }
    }

    #[inline(always)]
    pub fn forward(&self) -> &[u8] {
        self.seq.as_bytes()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn get_forward_string(&self) -> &str {
        &self.seq
    }

    pub fn name(&self) -> &Option<String> {
        &self.name
    }
}
