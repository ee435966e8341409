// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoder entry points.
//!
//! The top-level table routes on the high opcode bits into one category
//! table. Words that fall through every routed row get one pass over the
//! FP/SIMD table and then a retry of every category in a fixed order; that
//! chain catches encodings whose category bits sit on the edge of the coarse
//! routing masks.

use crate::inst::{InstKind, Instruction};
use crate::table::{row, run, Entry};
use crate::{branch, dataproc_imm, dataproc_reg, fp, loadstore};

static TOP_TABLE: [Entry; 5] = [
    // Data-processing (immediate): bits[28:26] = 100
    row!(b"xxx100xxxxxxxxxxxxxxxxxxxxxxxxxx", dataproc_imm::decode),
    // Branches and system: bits[28:26] = 101
    row!(b"xxx101xxxxxxxxxxxxxxxxxxxxxxxxxx", branch::decode),
    // Loads and stores: bit[27] = 1, bit[25] = 0
    row!(b"xxxx1x0xxxxxxxxxxxxxxxxxxxxxxxxx", loadstore::decode),
    // Loads and stores: bits[28:26] = 110
    row!(b"xxx110xxxxxxxxxxxxxxxxxxxxxxxxxx", loadstore::decode),
    // Data-processing (register): bits[27:25] = 101
    row!(b"xxxx101xxxxxxxxxxxxxxxxxxxxxxxxx", dataproc_reg::decode),
];

/// Category decoders retried in order for words the routed rows declined.
static RETRY: [fn(u32, u64, &mut Instruction) -> bool; 5] = [
    branch::decode,
    dataproc_imm::decode,
    dataproc_reg::decode,
    loadstore::decode,
    fp::decode,
];

/// Decode one instruction word into `out`. Returns `true` when a concrete
/// encoding was recognised; on failure `out` is left as a blank `Unknown`
/// record for the word.
pub fn decode(word: u32, address: u64, out: &mut Instruction) -> bool {
    *out = Instruction::new(word, address);

    if run(&TOP_TABLE, word, address, out) {
        return out.kind != InstKind::Unknown;
    }
    if fp::decode(word, address, out) {
        return out.kind != InstKind::Unknown;
    }
    for retry in RETRY {
        if retry(word, address, out) {
            return out.kind != InstKind::Unknown;
        }
    }

    *out = Instruction::new(word, address);
    log::trace!("undecoded word {word:#010X} at {address:#x}");
    false
}

/// Decode one instruction word, returning the record on success.
pub fn decode_one(word: u32, address: u64) -> Option<Instruction> {
    let mut inst = Instruction::new(word, address);
    decode(word, address, &mut inst).then_some(inst)
}
