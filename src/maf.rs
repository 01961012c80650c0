//! Streaming MAF file reader.
//!
//! A MAF stream is a header section followed by alignment blocks separated
//! by blank lines. [`MafReader`] returns the header as the first block and
//! then one block per call.

use crate::buffers::{DEFAULT_INPUT_BUFFER, DEFAULT_LINE_BUFFER};
use crate::output::MafWriter;
use crate::parsing::{is_blank_bytes, is_blank_line, parse_line, strip_line_terminator};
use crate::record::{MafBlock, MafLine, SequenceField};
use log::{debug, trace};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during MAF reading and writing.
#[derive(Error, Debug)]
pub enum MafError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid MAF header at line {line}: expected a 'track' or '##maf' line")]
    InvalidHeader { line: usize },

    #[error("Line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("Premature end of MAF stream after line {line} while reading the header")]
    IncompleteStream { line: usize },

    #[error("Sequence line {line} is incorrectly formatted: missing {field} field")]
    MissingField { line: usize, field: SequenceField },

    #[error("Sequence line {line} is incorrectly formatted: strand must be either + or -, not '{found}'")]
    InvalidStrand { line: usize, found: String },

    #[error("Sequence line {line} is incorrectly formatted: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: SequenceField,
        value: String,
    },
}

impl MafError {
    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            MafError::Io(_) => None,
            MafError::InvalidHeader { line }
            | MafError::InvalidUtf8 { line }
            | MafError::IncompleteStream { line }
            | MafError::MissingField { line, .. }
            | MafError::InvalidStrand { line, .. }
            | MafError::InvalidNumber { line, .. } => Some(*line),
        }
    }
}

pub type Result<T> = std::result::Result<T, MafError>;

/// Where the reader is in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Header,
    Body,
    Done,
}

/// Header detection steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    ExpectTrack,
    ExpectMafDirective,
    ConsumeMetadata,
    Done,
}

/// A streaming MAF reader.
pub struct MafReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    raw: Vec<u8>,
    buffer: String,
    state: ReadState,
    /// `a` line that ended the header, waiting to open the first block.
    pending: Option<(String, usize)>,
}

impl MafReader<File> {
    /// Open a MAF file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> MafReader<R> {
    /// Create a new MAF reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_INPUT_BUFFER)
    }

    /// Create a MAF reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            raw: Vec::with_capacity(DEFAULT_LINE_BUFFER),
            buffer: String::with_capacity(DEFAULT_LINE_BUFFER),
            state: ReadState::Header,
            pending: None,
        }
    }

    /// Number of the last line read from the stream.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next block.
    ///
    /// The first call returns the header block. Returns `Ok(None)` once the
    /// stream has no more blocks, and after a header error.
    pub fn read_block(&mut self) -> Result<Option<MafBlock>> {
        match self.state {
            ReadState::Header => match self.read_header() {
                Ok(header) => {
                    self.state = ReadState::Body;
                    Ok(Some(header))
                }
                Err(e) => {
                    self.state = ReadState::Done;
                    Err(e)
                }
            },
            ReadState::Body => {
                let block = self.read_body()?;
                if block.is_empty() {
                    self.state = ReadState::Done;
                    Ok(None)
                } else {
                    Ok(Some(block))
                }
            }
            ReadState::Done => Ok(None),
        }
    }

    /// Read every remaining block, stopping at the first error.
    pub fn read_all(&mut self) -> Result<Vec<MafBlock>> {
        let mut blocks = Vec::new();
        while let Some(block) = self.read_block()? {
            blocks.push(block);
        }
        debug!(
            "read {} blocks ({} lines)",
            blocks.len(),
            self.line_number
        );
        Ok(blocks)
    }

    /// Get an iterator over all blocks.
    ///
    /// A malformed alignment block yields an error and iteration resumes
    /// with the block after it.
    pub fn blocks(self) -> MafBlockIter<R> {
        MafBlockIter { reader: self }
    }

    /// Read the next line's bytes, without its terminator, into `raw`.
    /// Returns false at end of stream.
    fn next_raw_line(&mut self) -> Result<bool> {
        self.raw.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.raw)?;
        if bytes_read == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        let len = strip_line_terminator(&self.raw).len();
        self.raw.truncate(len);
        Ok(true)
    }

    /// Read the next line as text into the buffer. Returns false at end of stream.
    ///
    /// The line counter advances even when the line is not valid UTF-8.
    fn next_line(&mut self) -> Result<bool> {
        if !self.next_raw_line()? {
            return Ok(false);
        }
        self.buffer.clear();
        match std::str::from_utf8(&self.raw) {
            Ok(text) => self.buffer.push_str(text),
            Err(_) => {
                return Err(MafError::InvalidUtf8 {
                    line: self.line_number,
                })
            }
        }
        trace!("line {}: {}", self.line_number, self.buffer);
        Ok(true)
    }

    /// Like `next_line`, but end of stream is an error.
    fn require_line(&mut self) -> Result<()> {
        if self.next_line()? {
            Ok(())
        } else {
            Err(MafError::IncompleteStream {
                line: self.line_number,
            })
        }
    }

    fn read_header(&mut self) -> Result<MafBlock> {
        let mut header = MafBlock::new();
        let mut state = HeaderState::ExpectTrack;
        self.require_line()?;

        while state != HeaderState::Done {
            state = match state {
                HeaderState::ExpectTrack => {
                    if self.buffer.starts_with("track") {
                        header.push(MafLine::header(self.buffer.as_str(), self.line_number));
                        self.require_line()?;
                    }
                    HeaderState::ExpectMafDirective
                }
                HeaderState::ExpectMafDirective => {
                    if self.buffer.starts_with("##maf") {
                        header.push(MafLine::header(self.buffer.as_str(), self.line_number));
                        self.require_line()?;
                    } else if header.is_empty() {
                        return Err(MafError::InvalidHeader {
                            line: self.line_number,
                        });
                    }
                    HeaderState::ConsumeMetadata
                }
                HeaderState::ConsumeMetadata => {
                    if self.buffer.starts_with('a') {
                        self.pending = Some((self.buffer.clone(), self.line_number));
                        HeaderState::Done
                    } else if is_blank_line(&self.buffer) {
                        HeaderState::Done
                    } else {
                        header.push(MafLine::header(self.buffer.as_str(), self.line_number));
                        self.require_line()?;
                        HeaderState::ConsumeMetadata
                    }
                }
                HeaderState::Done => HeaderState::Done,
            };
        }

        debug!(
            "header: {} lines, first alignment line {}",
            header.line_count(),
            match &self.pending {
                Some((_, n)) => n.to_string(),
                None => "after blank line".to_string(),
            }
        );
        Ok(header)
    }

    fn read_body(&mut self) -> Result<MafBlock> {
        let mut block = MafBlock::new();

        if let Some((raw, line_number)) = self.pending.take() {
            match parse_line(&raw, line_number) {
                Ok(line) => block.push(line),
                Err(e) => {
                    self.skip_rest_of_block()?;
                    return Err(e);
                }
            }
        }

        loop {
            match self.next_line() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e @ MafError::InvalidUtf8 { .. }) => {
                    self.skip_rest_of_block()?;
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
            if is_blank_line(&self.buffer) {
                if block.is_empty() {
                    // Runs of blank lines between blocks
                    continue;
                }
                break;
            }
            match parse_line(&self.buffer, self.line_number) {
                Ok(line) => block.push(line),
                Err(e) => {
                    self.skip_rest_of_block()?;
                    return Err(e);
                }
            }
        }

        if !block.is_empty() {
            debug!(
                "block at line {}: {} lines, {} sequences",
                block.start_line(),
                block.line_count(),
                block.sequence_count()
            );
        }
        Ok(block)
    }

    /// Consume lines up to and including the next blank line.
    ///
    /// Works on raw bytes so undecodable lines are skipped too.
    fn skip_rest_of_block(&mut self) -> Result<()> {
        while self.next_raw_line()? {
            if is_blank_bytes(&self.raw) {
                break;
            }
        }
        Ok(())
    }
}

/// Iterator over MAF blocks.
pub struct MafBlockIter<R: Read> {
    reader: MafReader<R>,
}

impl<R: Read> Iterator for MafBlockIter<R> {
    type Item = Result<MafBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read all blocks from a MAF file, header block first.
pub fn read_blocks<P: AsRef<Path>>(path: P) -> Result<Vec<MafBlock>> {
    let mut reader = MafReader::from_path(path)?;
    reader.read_all()
}

/// Parse blocks from a string (useful for testing).
pub fn parse_blocks(content: &str) -> Result<Vec<MafBlock>> {
    let mut reader = MafReader::new(content.as_bytes());
    reader.read_all()
}

/// Write blocks to a new MAF file, replacing any existing file.
pub fn write_blocks<P: AsRef<Path>>(path: P, blocks: &[MafBlock]) -> Result<()> {
    let writer = MafWriter::from_path(path)?;
    writer.write_all(blocks)?;
    Ok(())
}
