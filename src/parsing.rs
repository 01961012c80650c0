//! Line-level MAF parsing utilities.
//!
//! These functions turn one raw line into a [`MafLine`], splitting `s` lines
//! into typed fields. Field splitting uses memchr to find spaces and tabs
//! without collecting the tokens into a Vec.

use crate::config::parse_count;
use crate::maf::{MafError, Result};
use crate::record::{LineKind, MafLine, SequenceField, SequenceFields, Strand};
use memchr::memchr2;

/// Iterator over the whitespace-separated tokens of a line.
///
/// Runs of spaces and tabs count as a single separator.
pub struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Fields<'a> {
    #[inline]
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        let line: &'a str = self.rest;
        let skip = line
            .bytes()
            .position(|b| b != b' ' && b != b'\t')
            .unwrap_or(line.len());
        let rest = &line[skip..];
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }
        let end = memchr2(b' ', b'\t', rest.as_bytes()).unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

/// Check if a line holds nothing but whitespace.
#[inline]
pub fn is_blank_line(line: &str) -> bool {
    is_blank_bytes(line.as_bytes())
}

/// Byte-level [`is_blank_line`], usable before UTF-8 validation.
#[inline]
pub fn is_blank_bytes(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
}

/// Strip a trailing `\n` or `\r\n` from a line read with `read_until`.
#[inline]
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse one body line of an alignment block.
///
/// Only `s` lines are split into fields; every other kind keeps just its raw
/// text. Header lines never come through here, the reader tags them itself.
pub fn parse_line(raw: &str, line_number: usize) -> Result<MafLine> {
    let kind = LineKind::of_body_line(raw);
    if kind != LineKind::Sequence {
        return Ok(MafLine::unparsed(raw, line_number, kind));
    }
    let fields = parse_sequence_fields(raw, line_number)?;
    Ok(MafLine::with_fields(raw.to_string(), line_number, fields))
}

/// Split an `s` line into its six fields.
///
/// Tokens after the sequence text are ignored.
pub fn parse_sequence_fields(raw: &str, line_number: usize) -> Result<SequenceFields> {
    let mut tokens = Fields::new(raw);
    // Line type token
    tokens.next();

    let mut take = |field: SequenceField| {
        tokens.next().ok_or(MafError::MissingField {
            line: line_number,
            field,
        })
    };

    let species = take(SequenceField::Species)?;
    let start = parse_number(take(SequenceField::Start)?, SequenceField::Start, line_number)?;
    let length = parse_number(take(SequenceField::Length)?, SequenceField::Length, line_number)?;
    let strand_token = take(SequenceField::Strand)?;
    let strand = Strand::from_token(strand_token).ok_or_else(|| MafError::InvalidStrand {
        line: line_number,
        found: strand_token.to_string(),
    })?;
    let source_length = parse_number(
        take(SequenceField::SourceLength)?,
        SequenceField::SourceLength,
        line_number,
    )?;
    let text = take(SequenceField::Sequence)?;

    Ok(SequenceFields::new(
        species,
        start,
        length,
        strand,
        source_length,
        text,
    ))
}

fn parse_number(token: &str, field: SequenceField, line_number: usize) -> Result<u64> {
    parse_count(token).ok_or_else(|| MafError::InvalidNumber {
        line: line_number,
        field,
        value: token.to_string(),
    })
}
