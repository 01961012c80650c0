//! Coords command: one tab-delimited row per sequence line.
//!
//! Columns: block number (1-based, header excluded), species, strand,
//! start, size, source size, forward-strand start, forward-strand left.

use crate::maf::{MafReader, Result};
use crate::output::TsvWriter;
use crate::record::MafBlock;
use std::io::{Read, Write};

/// Coords command.
#[derive(Debug, Clone, Default)]
pub struct CoordsCommand {
    /// Write a `#`-prefixed column header first.
    pub header: bool,
}

const COLUMNS: &[u8] =
    b"#block\tspecies\tstrand\tstart\tsize\tsrc_size\tpos_start\tpos_left\n";

impl CoordsCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Stream blocks and write their coordinates. Returns the row count.
    pub fn run<R: Read, W: Write>(
        &self,
        mut reader: MafReader<R>,
        writer: &mut TsvWriter<W>,
    ) -> Result<usize> {
        if self.header {
            writer.write_bytes(COLUMNS)?;
        }
        let mut rows = 0;
        let mut block_number = 0usize;
        while let Some(block) = reader.read_block()? {
            if block.is_header() {
                continue;
            }
            block_number += 1;
            rows += write_block_rows(writer, block_number, &block)?;
        }
        writer.flush()?;
        Ok(rows)
    }
}

fn write_block_rows<W: Write>(
    writer: &mut TsvWriter<W>,
    block_number: usize,
    block: &MafBlock,
) -> Result<usize> {
    let species = block.species();
    let strands = block.strand_array();
    let starts = block.starts();
    let lengths = block.aligned_lengths();
    let source_lengths = block.source_lengths();
    let positive_starts = block.positive_starts();
    let positive_lefts = block.positive_lefts();

    for (i, strand) in strands.bytes().enumerate() {
        writer.write_int(block_number)?;
        writer.write_tab()?;
        writer.write_bytes(species[i].as_bytes())?;
        writer.write_tab()?;
        writer.write_bytes(&[strand])?;
        writer.write_tab()?;
        writer.write_int(starts[i])?;
        writer.write_tab()?;
        writer.write_int(lengths[i])?;
        writer.write_tab()?;
        writer.write_int(source_lengths[i])?;
        writer.write_tab()?;
        writer.write_int(positive_starts[i])?;
        writer.write_tab()?;
        writer.write_int(positive_lefts[i])?;
        writer.write_newline()?;
    }
    Ok(species.len())
}
