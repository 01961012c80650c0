//! Buffered output for MAF blocks and tabular summaries.
//!
//! Uses itoa for integer formatting to avoid allocation in the hot path.

use crate::buffers::DEFAULT_OUTPUT_BUFFER;
use crate::maf::{MafError, Result};
use crate::record::MafBlock;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// MAF block writer.
///
/// Every block is written as its raw lines followed by one blank line.
/// [`MafWriter::finish`] and [`MafWriter::write_all`] take the writer by
/// value, so nothing can be written after the trailing blank line.
pub struct MafWriter<W: Write> {
    writer: BufWriter<W>,
    line_number: usize,
}

impl MafWriter<File> {
    /// Create (or truncate) a MAF file at a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> MafWriter<W> {
    /// Create a new MafWriter with the default 2MB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    /// Create a new MafWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            line_number: 0,
        }
    }

    /// Number of lines written so far, blank lines included.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Write one block followed by its blank delimiter line.
    pub fn write_block(&mut self, block: &MafBlock) -> Result<()> {
        for line in block.lines() {
            self.write_line(line.raw().as_bytes())?;
        }
        self.write_line(b"")
    }

    /// Write all blocks, then the trailing blank line, then release the output.
    pub fn write_all(mut self, blocks: &[MafBlock]) -> Result<W> {
        for block in blocks {
            self.write_block(block)?;
        }
        self.finish()
    }

    /// Write the trailing blank line, flush, and hand back the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.write_line(b"")?;
        self.writer
            .into_inner()
            .map_err(|e| MafError::Io(e.into_error()))
    }

    #[inline]
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line)?;
        self.writer.write_all(b"\n")?;
        self.line_number += 1;
        Ok(())
    }
}

/// Tab-delimited writer for per-sequence summaries.
pub struct TsvWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> TsvWriter<W> {
    /// Create a new TsvWriter with the default 2MB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<()> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    #[inline]
    pub fn write_tab(&mut self) -> Result<()> {
        self.writer.write_all(b"\t")?;
        Ok(())
    }

    #[inline]
    pub fn write_newline(&mut self) -> Result<()> {
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
