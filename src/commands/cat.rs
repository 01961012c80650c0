//! Cat command: re-emit a MAF stream through the writer.
//!
//! Runs of blank lines collapse to a single block delimiter and the output
//! always ends with one trailing blank line. Malformed alignment blocks can
//! be dropped instead of aborting the run.

use crate::maf::{MafError, MafReader, Result};
use crate::output::MafWriter;
use log::warn;
use std::fmt;
use std::io::{Read, Write};

/// Cat command configuration.
#[derive(Debug, Clone, Default)]
pub struct CatCommand {
    /// Drop alignment blocks that fail to parse instead of stopping.
    pub skip_invalid: bool,
    /// Drop alignment blocks with fewer sequence lines than this.
    pub min_sequences: usize,
}

/// Counts reported by a cat run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatStats {
    pub blocks_written: usize,
    pub blocks_filtered: usize,
    pub blocks_invalid: usize,
}

impl fmt::Display for CatStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "blocks_written={} blocks_filtered={} blocks_invalid={}",
            self.blocks_written, self.blocks_filtered, self.blocks_invalid
        )
    }
}

impl CatCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip malformed alignment blocks.
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// Set the minimum number of sequence lines per alignment block.
    pub fn with_min_sequences(mut self, n: usize) -> Self {
        self.min_sequences = n;
        self
    }

    /// Stream every block from `reader` to `writer`, header first.
    pub fn run<R: Read, W: Write>(
        &self,
        reader: MafReader<R>,
        mut writer: MafWriter<W>,
    ) -> Result<CatStats> {
        let mut stats = CatStats::default();

        for (index, result) in reader.blocks().enumerate() {
            let block = match result {
                Ok(block) => block,
                Err(e) if self.skip_invalid && index > 0 && is_block_error(&e) => {
                    warn!("skipping malformed block: {}", e);
                    stats.blocks_invalid += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if index > 0 && block.sequence_count() < self.min_sequences {
                stats.blocks_filtered += 1;
                continue;
            }
            writer.write_block(&block)?;
            stats.blocks_written += 1;
        }

        let mut out = writer.finish()?;
        out.flush()?;
        Ok(stats)
    }
}

/// Errors confined to a single alignment block.
fn is_block_error(e: &MafError) -> bool {
    matches!(
        e,
        MafError::InvalidUtf8 { .. }
            | MafError::MissingField { .. }
            | MafError::InvalidStrand { .. }
            | MafError::InvalidNumber { .. }
    )
}
