//! Stats command: whole-file summary of a MAF stream.

use crate::maf::{MafReader, Result};
use crate::parallel::{aligned_bases_by_species, map_blocks};
use crate::record::MafBlock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::io::{Read, Write};

/// Summary of a MAF file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MafStats {
    pub header_lines: usize,
    /// Alignment blocks, header excluded.
    pub blocks: usize,
    pub sequence_lines: usize,
    /// Sum over blocks of the longest sequence text.
    pub columns: u64,
    /// Aligned residues per species, sorted by species name.
    pub species: Vec<(String, u64)>,
}

impl fmt::Display for MafStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "header_lines\t{}", self.header_lines)?;
        writeln!(f, "blocks\t{}", self.blocks)?;
        writeln!(f, "sequence_lines\t{}", self.sequence_lines)?;
        writeln!(f, "columns\t{}", self.columns)?;
        for (species, bases) in &self.species {
            writeln!(f, "species\t{}\t{}", species, bases)?;
        }
        Ok(())
    }
}

/// Stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsCommand;

struct BlockSummary {
    sequence_lines: usize,
    columns: usize,
    bases: FxHashMap<String, u64>,
}

impl StatsCommand {
    pub fn new() -> Self {
        Self
    }

    /// Summarize blocks as returned by `MafReader::read_all`.
    pub fn compute(&self, blocks: &[MafBlock]) -> MafStats {
        let (header, body) = match blocks.split_first() {
            Some((first, rest)) if first.is_header() => (Some(first), rest),
            _ => (None, blocks),
        };

        let summaries = map_blocks(body, |block| BlockSummary {
            sequence_lines: block.sequence_count(),
            columns: block.longest_sequence_field(),
            bases: aligned_bases_by_species(block),
        });

        let mut stats = MafStats {
            header_lines: header.map_or(0, |h| h.line_count()),
            blocks: body.len(),
            ..MafStats::default()
        };
        let mut bases: FxHashMap<String, u64> = FxHashMap::default();
        for summary in summaries {
            stats.sequence_lines += summary.sequence_lines;
            stats.columns += summary.columns as u64;
            for (species, n) in summary.bases {
                *bases.entry(species).or_default() += n;
            }
        }
        stats.species = bases.into_iter().collect();
        stats.species.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        stats
    }

    /// Read the whole stream, then write its summary.
    pub fn run<R: Read, W: Write>(
        &self,
        mut reader: MafReader<R>,
        output: &mut W,
    ) -> Result<MafStats> {
        let blocks = reader.read_all()?;
        let stats = self.compute(&blocks);
        write!(output, "{}", stats)?;
        Ok(stats)
    }
}
