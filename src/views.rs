//! Derived views over the sequence lines of a block.
//!
//! Nothing here is cached: every call scans the block's lines once and
//! returns freshly allocated output owned by the caller. Rows always follow
//! the order of the `s` lines in the block.

use crate::record::{MafBlock, SequenceFields, Strand};

/// Character used to pad matrix rows shorter than the requested width.
pub const GAP: char = '-';

impl SequenceFields {
    /// Start in forward-strand coordinates.
    ///
    /// For the minus strand this is the rightmost forward-strand position of
    /// the aligned segment: `source_length - start - 1`.
    #[inline]
    pub fn positive_start(&self) -> u64 {
        match self.strand {
            Strand::Plus => self.start,
            Strand::Minus => self
                .source_length
                .saturating_sub(self.start.saturating_add(1)),
        }
    }

    /// Leftmost forward-strand position covered by the aligned segment.
    ///
    /// For the minus strand: `source_length - (start + length)`.
    #[inline]
    pub fn positive_left(&self) -> u64 {
        match self.strand {
            Strand::Plus => self.start,
            Strand::Minus => self
                .source_length
                .saturating_sub(self.start.saturating_add(self.length)),
        }
    }
}

impl MafBlock {
    /// Alignment rows, one per `s` line up to `rows`, each cut or padded
    /// with [`GAP`] to exactly `width` characters.
    pub fn sequence_matrix(&self, rows: usize, width: usize) -> Vec<String> {
        self.sequence_fields()
            .take(rows)
            .map(|f| {
                let mut row: String = f.text.chars().take(width).collect();
                let filled = row.chars().count();
                row.extend(std::iter::repeat_n(GAP, width - filled));
                row
            })
            .collect()
    }

    /// Full alignment matrix: every `s` line, padded to the longest row.
    pub fn alignment_matrix(&self) -> Vec<String> {
        self.sequence_matrix(self.sequence_count(), self.longest_sequence_field())
    }

    /// Strands as a string of `+` and `-`.
    pub fn strand_array(&self) -> String {
        self.sequence_fields().map(|f| f.strand.as_char()).collect()
    }

    /// Strands as `1` / `-1`.
    pub fn strand_signs(&self) -> Vec<i32> {
        self.sequence_fields().map(|f| f.strand.sign()).collect()
    }

    pub fn starts(&self) -> Vec<u64> {
        self.sequence_fields().map(|f| f.start).collect()
    }

    pub fn source_lengths(&self) -> Vec<u64> {
        self.sequence_fields().map(|f| f.source_length).collect()
    }

    /// The `size` fields: aligned residues excluding gaps.
    pub fn aligned_lengths(&self) -> Vec<u64> {
        self.sequence_fields().map(|f| f.length).collect()
    }

    pub fn species(&self) -> Vec<String> {
        self.sequence_fields().map(|f| f.species.clone()).collect()
    }

    /// See [`SequenceFields::positive_start`].
    pub fn positive_starts(&self) -> Vec<u64> {
        self.sequence_fields().map(|f| f.positive_start()).collect()
    }

    /// See [`SequenceFields::positive_left`].
    pub fn positive_lefts(&self) -> Vec<u64> {
        self.sequence_fields().map(|f| f.positive_left()).collect()
    }

    /// Character length of the longest sequence text, 0 without `s` lines.
    pub fn longest_sequence_field(&self) -> usize {
        self.sequence_fields()
            .map(|f| f.text.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maf::parse_blocks;

    fn block() -> MafBlock {
        let content = "##maf version=1\n\
                       a score=23262.0\n\
                       s hg18.chr7    27578828 38 + 158545518 AAA-GGGAATGTTAACCAAATGA---ATTGTCTCTTACGGTG\n\
                       i hg18.chr7    C 0 C 0\n\
                       s mm4.chr6     53215344 38 - 151104725 -AATGGGAATGTTAAGCAAACGA---ATTGTCTCTCAGTGTG\n\
                       s baboon         116834 38 +   4622798 AAA-GGGAATG\n\
                       \n";
        parse_blocks(content).unwrap().remove(1)
    }

    #[test]
    fn test_positive_coordinates() {
        let minus = SequenceFields::new("x", 10, 5, Strand::Minus, 100, "ACGTA");
        assert_eq!(minus.positive_start(), 89);
        assert_eq!(minus.positive_left(), 85);

        let plus = SequenceFields::new("x", 10, 5, Strand::Plus, 100, "ACGTA");
        assert_eq!(plus.positive_start(), 10);
        assert_eq!(plus.positive_left(), 10);
    }

    #[test]
    fn test_positive_coordinates_saturate() {
        // Segment runs past the end of its source.
        let past_end = SequenceFields::new("x", 100, 5, Strand::Minus, 50, "ACGTA");
        assert_eq!(past_end.positive_start(), 0);
        assert_eq!(past_end.positive_left(), 0);

        let at_end = SequenceFields::new("x", 48, 5, Strand::Minus, 50, "ACGTA");
        assert_eq!(at_end.positive_start(), 1);
        assert_eq!(at_end.positive_left(), 0);

        let huge = SequenceFields::new("x", u64::MAX, u64::MAX, Strand::Minus, 50, "A");
        assert_eq!(huge.positive_start(), 0);
        assert_eq!(huge.positive_left(), 0);
    }

    #[test]
    fn test_field_arrays() {
        let b = block();
        assert_eq!(b.strand_array(), "+-+");
        assert_eq!(b.strand_signs(), vec![1, -1, 1]);
        assert_eq!(b.starts(), vec![27578828, 53215344, 116834]);
        assert_eq!(b.source_lengths(), vec![158545518, 151104725, 4622798]);
        assert_eq!(b.aligned_lengths(), vec![38, 38, 38]);
        assert_eq!(b.species(), vec!["hg18.chr7", "mm4.chr6", "baboon"]);
        assert_eq!(
            b.positive_starts(),
            vec![27578828, 151104725 - 53215344 - 1, 116834]
        );
        assert_eq!(
            b.positive_lefts(),
            vec![27578828, 151104725 - (53215344 + 38), 116834]
        );
    }

    #[test]
    fn test_sequence_matrix_truncates_and_pads() {
        let b = block();
        let m = b.sequence_matrix(3, 5);
        assert_eq!(m, vec!["AAA-G", "-AATG", "AAA-G"]);

        let m = b.sequence_matrix(2, 45);
        assert_eq!(m.len(), 2);
        assert!(m.iter().all(|row| row.len() == 45));
        assert!(m[0].ends_with("TACGGTG---"));
    }

    #[test]
    fn test_alignment_matrix() {
        let b = block();
        assert_eq!(b.longest_sequence_field(), 42);
        let m = b.alignment_matrix();
        assert_eq!(m.len(), 3);
        assert_eq!(m[2], format!("AAA-GGGAATG{}", "-".repeat(31)));
    }

    #[test]
    fn test_views_without_sequences() {
        let b = parse_blocks("##maf version=1\n\na score=0\n").unwrap().remove(1);
        assert!(!b.contains_sequence());
        assert_eq!(b.strand_array(), "");
        assert!(b.positive_starts().is_empty());
        assert_eq!(b.longest_sequence_field(), 0);
        assert!(b.sequence_matrix(4, 10).is_empty());
    }
}
