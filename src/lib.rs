//! mafkit: MAF multiple alignment reading, writing and coordinate views.
//!
//! This library reads MAF (Multiple Alignment Format) files block by block,
//! keeps every line's original text for lossless re-emission, and builds
//! per-block views such as alignment matrices and forward-strand coordinates.
//!
//! # Features
//!
//! - **Streaming reads**: one block in memory at a time with [`MafReader`]
//! - **Lossless writes**: blocks are written back from their raw lines
//! - **Typed errors**: malformed input is reported, never fatal to the process
//!
//! # Example
//!
//! ```rust,no_run
//! use mafkit::maf::MafReader;
//!
//! let mut reader = MafReader::from_path("alignment.maf").unwrap();
//! while let Some(block) = reader.read_block().unwrap() {
//!     if block.contains_sequence() {
//!         println!("{} {:?}", block.strand_array(), block.positive_starts());
//!     }
//! }
//! ```

pub mod buffers;
pub mod commands;
pub mod config;
pub mod maf;
pub mod output;
pub mod parallel;
pub mod parsing;
pub mod record;
pub mod views;

// Re-export commonly used types
pub use maf::{parse_blocks, read_blocks, write_blocks, MafError, MafReader};
pub use output::MafWriter;
pub use record::{LineKind, MafBlock, MafLine, SequenceField, SequenceFields, Strand};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{CatCommand, CoordsCommand, StatsCommand};
    pub use crate::maf::{parse_blocks, read_blocks, write_blocks, MafError, MafReader};
    pub use crate::output::MafWriter;
    pub use crate::record::{LineKind, MafBlock, MafLine, SequenceFields, Strand};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_workflow() {
        use crate::maf::parse_blocks;
        use crate::output::MafWriter;

        let content = "##maf version=1\n\na score=0\ns hg18.chr7 0 3 + 10 ACG\n\n";
        let blocks = parse_blocks(content).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].strand_array(), "+");

        let output = MafWriter::new(Vec::new()).write_all(&blocks).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), format!("{}\n", content));
    }
}
