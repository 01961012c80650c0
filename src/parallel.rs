//! Parallel processing utilities using Rayon.
//!
//! View builders never mutate a block, so already-read blocks can be
//! summarized on several threads at once.

use crate::record::MafBlock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Minimum number of blocks before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 1_000;

/// Apply `f` to every block, in parallel for large inputs.
/// Results keep block order.
pub fn map_blocks<F, T>(blocks: &[MafBlock], f: F) -> Vec<T>
where
    F: Fn(&MafBlock) -> T + Sync + Send,
    T: Send,
{
    if blocks.len() < PARALLEL_THRESHOLD {
        blocks.iter().map(f).collect()
    } else {
        blocks.par_iter().map(f).collect()
    }
}

/// Aligned residues per species within one block.
pub fn aligned_bases_by_species(block: &MafBlock) -> FxHashMap<String, u64> {
    let mut counts: FxHashMap<String, u64> = FxHashMap::default();
    for fields in block.sequence_fields() {
        *counts.entry(fields.species.clone()).or_default() += fields.length;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maf::parse_blocks;

    #[test]
    fn test_map_blocks_keeps_order() {
        let content = "##maf version=1\n\n\
                       a score=1\ns a 0 1 + 5 A\n\n\
                       a score=2\ns a 1 1 + 5 C\ns b 1 1 + 5 C\n";
        let blocks = parse_blocks(content).unwrap();
        let counts = map_blocks(&blocks, |b| b.sequence_count());
        assert_eq!(counts, vec![0, 1, 2]);
    }

    #[test]
    fn test_map_blocks_parallel_path() {
        let mut content = String::from("##maf version=1\n\n");
        for i in 0..(PARALLEL_THRESHOLD + 10) {
            content.push_str(&format!("a score={}\ns a {} 1 + 100000 A\n\n", i, i));
        }
        let blocks = parse_blocks(&content).unwrap();
        let starts = map_blocks(&blocks[1..], |b| b.starts()[0]);
        assert_eq!(starts.len(), PARALLEL_THRESHOLD + 10);
        assert!(starts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_aligned_bases_by_species() {
        let content = "##maf version=1\na score=1\n\
                       s hg18.chr1 0 4 + 50 AC-GT\n\
                       s mm4.chr2 0 3 - 50 A--GT\n\
                       s hg18.chr1 10 2 + 50 A---T\n";
        let block = parse_blocks(content).unwrap().remove(1);
        let counts = aligned_bases_by_species(&block);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["hg18.chr1"], 6);
        assert_eq!(counts["mm4.chr2"], 3);
    }
}
