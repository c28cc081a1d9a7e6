//! Per-row building blocks of the blocked recursive filter.
//!
//! A row is partitioned into fixed-size tiles along the scan dimension. The
//! local pass computes, for every tile independently, the carry the tile
//! would hand downstream under a zero incoming state together with the
//! tile's sensitivity to a nonzero incoming state. The propagation scan then
//! walks the tiles in order and turns those zero-state records into the true
//! incoming carries, and the fixup pass re-runs each tile's recurrence
//! seeded with its corrected carry to produce the final output.

use std::ops::Range;

use crate::recurrence::{PassDirection, RecursiveFilter};

/// Per-tile boundary record.
///
/// After the local pass `carry` holds the tile's zero-state outgoing carry;
/// after propagation it holds the corrected incoming carry for the same
/// tile, which is what the fixup pass seeds the recurrence with.
#[derive(Clone, Copy)]
pub(crate) struct CarryEntry<F: RecursiveFilter> {
    pub carry: F::Carry,
    pub sens: F::Sensitivity,
}

impl<F: RecursiveFilter> CarryEntry<F> {
    pub fn new(filter: &F) -> Self {
        Self {
            carry: filter.zero_carry(),
            sens: filter.identity(),
        }
    }
}

/// Number of tiles covering a dimension of length `len`.
pub(crate) fn num_tiles(len: usize, block_size: usize) -> usize {
    len.div_ceil(block_size)
}

/// Sample range of tile `k`; the last tile may be shorter.
pub(crate) fn tile_range(k: usize, block_size: usize, len: usize) -> Range<usize> {
    let start = k * block_size;
    start..(start + block_size).min(len)
}

/// Local pass over one row: fill `entries` with each tile's zero-state
/// outgoing carry and sensitivity. Tiles are mutually independent.
pub(crate) fn local_pass_row<F: RecursiveFilter>(
    filter: &F,
    row: &[f32],
    block_size: usize,
    direction: PassDirection,
    entries: &mut [CarryEntry<F>],
) {
    for (k, entry) in entries.iter_mut().enumerate() {
        let range = tile_range(k, block_size, row.len());
        let mut carry = filter.zero_carry();
        let mut sens = filter.identity();
        match direction {
            PassDirection::Forward => {
                for i in range {
                    filter.step(row[i], &mut carry);
                    filter.extend(&mut sens);
                }
            }
            PassDirection::Backward => {
                for i in range.rev() {
                    filter.step(row[i], &mut carry);
                    filter.extend(&mut sens);
                }
            }
        }
        entry.carry = carry;
        entry.sens = sens;
    }
}

/// Carry propagation over one row: a strictly sequential scan in tile order
/// (reverse tile order for backward passes) rewriting each entry's carry
/// from zero-state outgoing to corrected incoming.
///
/// The upstream-most tile receives the zero border condition; every other
/// tile receives its neighbor's zero-state response plus the neighbor's
/// sensitivity applied to the neighbor's own corrected incoming carry.
pub(crate) fn propagate_row<F: RecursiveFilter>(
    filter: &F,
    entries: &mut [CarryEntry<F>],
    direction: PassDirection,
) {
    let mut incoming = filter.zero_carry();
    let mut scan = |entry: &mut CarryEntry<F>| {
        let zero_state = entry.carry;
        entry.carry = incoming;
        incoming = filter.propagate(zero_state, entry.sens, incoming);
    };
    match direction {
        PassDirection::Forward => entries.iter_mut().for_each(&mut scan),
        PassDirection::Backward => entries.iter_mut().rev().for_each(&mut scan),
    }
}

/// Fixup pass over one row: re-run each tile's recurrence seeded with its
/// corrected incoming carry, writing the final values in place. Tiles are
/// mutually independent once the carries are corrected.
pub(crate) fn fixup_row<F: RecursiveFilter>(
    filter: &F,
    row: &mut [f32],
    block_size: usize,
    direction: PassDirection,
    entries: &[CarryEntry<F>],
) {
    let len = row.len();
    for (k, entry) in entries.iter().enumerate() {
        let range = tile_range(k, block_size, len);
        let mut carry = entry.carry;
        match direction {
            PassDirection::Forward => {
                for i in range {
                    row[i] = filter.step(row[i], &mut carry);
                }
            }
            PassDirection::Backward => {
                for i in range.rev() {
                    row[i] = filter.step(row[i], &mut carry);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::{FirstOrder, SecondOrder};

    #[test]
    fn test_tile_partition_is_exact() {
        for (len, block) in [(8, 4), (10, 4), (7, 7), (5, 2), (1, 1)] {
            let nt = num_tiles(len, block);
            let mut covered = 0;
            for k in 0..nt {
                let range = tile_range(k, block, len);
                assert_eq!(range.start, covered);
                assert!(!range.is_empty());
                covered = range.end;
            }
            assert_eq!(covered, len);
        }
    }

    #[test]
    fn test_corrected_carry_matches_sequential_boundary_first_order() {
        let filter = FirstOrder {
            b0: 1.26795,
            a1: -0.26795,
        };
        let row = [0.7, -0.3, 0.9, 0.2, 0.0, 1.0, -0.5, 0.4];
        let block = 4;

        // sequential scan over tile 0 gives the true state at the boundary
        let mut boundary = filter.zero_carry();
        for &x in &row[..block] {
            filter.step(x, &mut boundary);
        }

        let mut entries = vec![CarryEntry::new(&filter); num_tiles(row.len(), block)];
        local_pass_row(&filter, &row, block, PassDirection::Forward, &mut entries);
        propagate_row(&filter, &mut entries, PassDirection::Forward);

        assert!((entries[1].carry - boundary).abs() < 1e-6);
    }

    #[test]
    fn test_corrected_carry_matches_sequential_boundary_second_order() {
        let filter = SecondOrder {
            b0: 0.992817,
            a1: -0.00719617,
            a2: 1.29475e-05,
        };
        let row = [0.7, -0.3, 0.9, 0.2, 0.0, 1.0, -0.5, 0.4];
        let block = 4;

        let mut boundary = filter.zero_carry();
        for &x in &row[..block] {
            filter.step(x, &mut boundary);
        }

        let mut entries = vec![CarryEntry::new(&filter); num_tiles(row.len(), block)];
        local_pass_row(&filter, &row, block, PassDirection::Forward, &mut entries);
        propagate_row(&filter, &mut entries, PassDirection::Forward);

        assert!((entries[1].carry[0] - boundary[0]).abs() < 1e-6);
        assert!((entries[1].carry[1] - boundary[1]).abs() < 1e-6);
    }

    #[test]
    fn test_three_phases_match_sequential_row() {
        let filter = FirstOrder { b0: 0.6, a1: -0.7 };
        let row = [0.1, 0.9, -0.4, 0.3, 0.8, -1.0, 0.2, 0.5, 0.0, -0.6];

        for direction in [PassDirection::Forward, PassDirection::Backward] {
            let mut expected = row;
            {
                let mut carry = filter.zero_carry();
                match direction {
                    PassDirection::Forward => {
                        for x in expected.iter_mut() {
                            *x = filter.step(*x, &mut carry);
                        }
                    }
                    PassDirection::Backward => {
                        for x in expected.iter_mut().rev() {
                            *x = filter.step(*x, &mut carry);
                        }
                    }
                }
            }

            for block in [1, 2, 3, 4, 10] {
                let mut out = row;
                let mut entries = vec![CarryEntry::new(&filter); num_tiles(row.len(), block)];
                local_pass_row(&filter, &out, block, direction, &mut entries);
                propagate_row(&filter, &mut entries, direction);
                fixup_row(&filter, &mut out, block, direction, &entries);

                for (a, b) in out.iter().zip(expected.iter()) {
                    assert!((a - b).abs() < 1e-5, "block={block} {a} vs {b}");
                }
            }
        }
    }
}
