//! Core record types for MAF lines and blocks.

use std::fmt;

/// Strand orientation of an aligned component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    /// Parse a strand token. Only the exact tokens `+` and `-` are accepted.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Strand::Plus),
            "-" => Some(Strand::Minus),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }

    /// `1` for the plus strand, `-1` for the minus strand.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Strand::Plus => 1,
            Strand::Minus => -1,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Kind of a MAF line, derived from its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// A line of the file header (`track`, `##maf` and the metadata after them).
    Header,
    /// `a` line opening an alignment block.
    AlignmentStart,
    /// `s` line; the only kind decomposed into fields.
    Sequence,
    /// `i` line.
    Information,
    /// `q` line.
    Quality,
    /// Whitespace-only line.
    Empty,
    /// `e` line.
    AlignmentInfo,
    /// Any other leading character inside an alignment block.
    Other,
}

impl LineKind {
    /// Classify a body line by its first character.
    pub fn of_body_line(line: &str) -> Self {
        match line.as_bytes().first() {
            Some(b'a') => LineKind::AlignmentStart,
            Some(b's') => LineKind::Sequence,
            Some(b'i') => LineKind::Information,
            Some(b'q') => LineKind::Quality,
            Some(b'e') => LineKind::AlignmentInfo,
            _ if crate::parsing::is_blank_line(line) => LineKind::Empty,
            _ => LineKind::Other,
        }
    }
}

/// Named fields of an `s` line, in file order after the `s` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceField {
    Species,
    Start,
    Length,
    Strand,
    SourceLength,
    Sequence,
}

impl SequenceField {
    pub const ALL: [SequenceField; 6] = [
        SequenceField::Species,
        SequenceField::Start,
        SequenceField::Length,
        SequenceField::Strand,
        SequenceField::SourceLength,
        SequenceField::Sequence,
    ];
}

impl fmt::Display for SequenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequenceField::Species => "species",
            SequenceField::Start => "start position",
            SequenceField::Length => "length",
            SequenceField::Strand => "strand",
            SequenceField::SourceLength => "source length",
            SequenceField::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// Decomposed fields of an `s` line.
///
/// `start` is 0-based and relative to the 5' end of `strand`, so on the minus
/// strand it counts from the end of the forward sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceFields {
    pub species: String,
    pub start: u64,
    /// Aligned residues, excluding gaps.
    pub length: u64,
    pub strand: Strand,
    /// Length of the whole unaligned source sequence.
    pub source_length: u64,
    /// Aligned text, gaps included.
    pub text: String,
}

impl SequenceFields {
    pub fn new(
        species: impl Into<String>,
        start: u64,
        length: u64,
        strand: Strand,
        source_length: u64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            start,
            length,
            strand,
            source_length,
            text: text.into(),
        }
    }
}

impl fmt::Display for SequenceFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s {} {} {} {} {} {}",
            self.species, self.start, self.length, self.strand, self.source_length, self.text
        )
    }
}

/// One physical line of a MAF stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MafLine {
    raw: String,
    line_number: usize,
    kind: LineKind,
    fields: Option<SequenceFields>,
}

impl MafLine {
    /// A header line, kept verbatim.
    pub fn header(raw: impl Into<String>, line_number: usize) -> Self {
        Self {
            raw: raw.into(),
            line_number,
            kind: LineKind::Header,
            fields: None,
        }
    }

    /// A non-sequence body line of the given kind, kept verbatim.
    pub(crate) fn unparsed(raw: impl Into<String>, line_number: usize, kind: LineKind) -> Self {
        Self {
            raw: raw.into(),
            line_number,
            kind,
            fields: None,
        }
    }

    /// A sequence line with already-split fields.
    pub(crate) fn with_fields(raw: String, line_number: usize, fields: SequenceFields) -> Self {
        Self {
            raw,
            line_number,
            kind: LineKind::Sequence,
            fields: Some(fields),
        }
    }

    /// Build an `s` line from fields, rendering its raw text.
    pub fn from_fields(fields: SequenceFields, line_number: usize) -> Self {
        Self::with_fields(fields.to_string(), line_number, fields)
    }

    /// The original line text without its terminator.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    #[inline]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        self.kind == LineKind::Sequence
    }

    /// Fields of an `s` line; `None` for every other kind.
    #[inline]
    pub fn sequence_fields(&self) -> Option<&SequenceFields> {
        self.fields.as_ref()
    }

    pub fn species(&self) -> Option<&str> {
        self.fields.as_ref().map(|f| f.species.as_str())
    }

    pub fn strand(&self) -> Option<Strand> {
        self.fields.as_ref().map(|f| f.strand)
    }

    pub fn sequence_text(&self) -> Option<&str> {
        self.fields.as_ref().map(|f| f.text.as_str())
    }
}

impl fmt::Display for MafLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A header section or one alignment block.
///
/// `Display` renders the block as it is written to a file: every raw line
/// followed by a blank delimiter line.
///
/// Lines are kept in file order. `sequence_count` always matches the number
/// of `s` lines because lines only enter the block through [`MafBlock::push`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MafBlock {
    lines: Vec<MafLine>,
    start_line: usize,
    sequence_count: usize,
}

impl MafBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from lines, recomputing its counts.
    pub fn from_lines(lines: Vec<MafLine>) -> Self {
        let mut block = Self::with_capacity(lines.len());
        for line in lines {
            block.push(line);
        }
        block
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            start_line: 0,
            sequence_count: 0,
        }
    }

    /// Append a line, keeping the counts and start line in step.
    ///
    /// Line numbers are not checked. Callers building blocks by hand keep
    /// them increasing, as [`MafReader`](crate::maf::MafReader) does.
    pub fn push(&mut self, line: MafLine) {
        if self.lines.is_empty() {
            self.start_line = line.line_number();
        }
        if line.is_sequence() {
            self.sequence_count += 1;
        }
        self.lines.push(line);
    }

    #[inline]
    pub fn lines(&self) -> &[MafLine] {
        &self.lines
    }

    /// Consume the block, returning its lines.
    pub fn into_lines(self) -> Vec<MafLine> {
        self.lines
    }

    #[inline]
    pub fn line(&self, index: usize) -> Option<&MafLine> {
        self.lines.get(index)
    }

    /// Line number of the first line, 0 for an empty block.
    #[inline]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn sequence_count(&self) -> usize {
        self.sequence_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn contains_sequence(&self) -> bool {
        self.sequence_count > 0
    }

    /// True when every line is a header line.
    pub fn is_header(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.kind() == LineKind::Header)
    }

    /// The `s` lines of the block, in order.
    pub fn sequence_lines(&self) -> impl Iterator<Item = &MafLine> + '_ {
        self.lines.iter().filter(|l| l.is_sequence())
    }

    /// Fields of the `s` lines of the block, in order.
    pub fn sequence_fields(&self) -> impl Iterator<Item = &SequenceFields> + '_ {
        self.lines.iter().filter_map(|l| l.sequence_fields())
    }
}

impl fmt::Display for MafBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(species: &str, line_number: usize) -> MafLine {
        MafLine::from_fields(
            SequenceFields::new(species, 10, 4, Strand::Plus, 100, "AC-GT"),
            line_number,
        )
    }

    #[test]
    fn test_strand_tokens() {
        assert_eq!(Strand::from_token("+"), Some(Strand::Plus));
        assert_eq!(Strand::from_token("-"), Some(Strand::Minus));
        assert_eq!(Strand::from_token("."), None);
        assert_eq!(Strand::from_token("+-"), None);
        assert_eq!(Strand::Minus.sign(), -1);
        assert_eq!(Strand::Plus.to_string(), "+");
    }

    #[test]
    fn test_body_line_kinds() {
        assert_eq!(LineKind::of_body_line("a score=0"), LineKind::AlignmentStart);
        assert_eq!(LineKind::of_body_line("s hg18 0 1 + 10 A"), LineKind::Sequence);
        assert_eq!(LineKind::of_body_line("i hg18 C 0 C 0"), LineKind::Information);
        assert_eq!(LineKind::of_body_line("q hg18 99"), LineKind::Quality);
        assert_eq!(LineKind::of_body_line("e mm4 0 10 + 100 I"), LineKind::AlignmentInfo);
        assert_eq!(LineKind::of_body_line(" \t"), LineKind::Empty);
        assert_eq!(LineKind::of_body_line(""), LineKind::Empty);
        assert_eq!(LineKind::of_body_line("# note"), LineKind::Other);
    }

    #[test]
    fn test_from_fields_renders_raw() {
        let line = seq("hg18.chr7", 3);
        assert_eq!(line.raw(), "s hg18.chr7 10 4 + 100 AC-GT");
        assert_eq!(line.kind(), LineKind::Sequence);
        assert_eq!(line.species(), Some("hg18.chr7"));
        assert_eq!(line.sequence_text(), Some("AC-GT"));
    }

    #[test]
    fn test_block_push_tracks_counts() {
        let mut block = MafBlock::new();
        assert!(block.is_empty());
        block.push(MafLine::unparsed("a score=1", 5, LineKind::AlignmentStart));
        block.push(seq("hg18", 6));
        block.push(MafLine::unparsed("i hg18 C 0 C 0", 7, LineKind::Information));
        block.push(seq("mm4", 8));

        assert_eq!(block.start_line(), 5);
        assert_eq!(block.line_count(), 4);
        assert_eq!(block.sequence_count(), 2);
        assert!(block.contains_sequence());
        assert!(!block.is_header());
        let names: Vec<_> = block.sequence_lines().filter_map(|l| l.species()).collect();
        assert_eq!(names, vec!["hg18", "mm4"]);
    }

    #[test]
    fn test_from_lines_matches_push() {
        let lines = vec![
            MafLine::header("##maf version=1", 1),
            MafLine::header("# comment", 2),
        ];
        let block = MafBlock::from_lines(lines);
        assert!(block.is_header());
        assert_eq!(block.sequence_count(), 0);
        assert_eq!(block.line_count(), 2);
        assert_eq!(block.start_line(), 1);
    }

    #[test]
    fn test_push_accepts_unordered_line_numbers() {
        let block = MafBlock::from_lines(vec![
            MafLine::unparsed("a score=1", 4, LineKind::AlignmentStart),
            seq("hg18", 4),
            seq("mm4", 2),
        ]);
        assert_eq!(block.start_line(), 4);
        assert_eq!(block.line_count(), 3);
        assert_eq!(block.sequence_count(), 2);
    }

    #[test]
    fn test_block_display() {
        let block = MafBlock::from_lines(vec![
            MafLine::unparsed("a score=1", 3, LineKind::AlignmentStart),
            MafLine::unparsed("s hg18 0 1 + 5 A", 4, LineKind::Sequence),
        ]);
        assert_eq!(block.to_string(), "a score=1\ns hg18 0 1 + 5 A\n\n");
        assert_eq!(MafBlock::new().to_string(), "\n");
    }
}
