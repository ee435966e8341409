// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of whole code images.
//!
//! A64 code is a dense stream of 4-byte little-endian words; this module
//! walks a byte slice and decodes every word at its virtual address. Words
//! the decoder declines come back as `Unknown` records so a listing can
//! still show them.

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

use crate::decode::decode;
use crate::inst::Instruction;

/// Instruction word size in bytes.
pub const WORD_SIZE: usize = 4;

/// Code-image error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("code length {0} is not a multiple of the 4-byte instruction size")]
    Misaligned(usize),
}

/// Decode an entire code image starting at `base`.
pub fn decode_block(code: &[u8], base: u64) -> Result<Vec<Instruction>, CodeError> {
    if code.len() % WORD_SIZE != 0 {
        return Err(CodeError::Misaligned(code.len()));
    }

    let mut out = Vec::with_capacity(code.len() / WORD_SIZE);
    for (i, chunk) in code.chunks_exact(WORD_SIZE).enumerate() {
        let word = LittleEndian::read_u32(chunk);
        let address = base + (i * WORD_SIZE) as u64;
        let mut inst = Instruction::new(word, address);
        decode(word, address, &mut inst);
        out.push(inst);
    }
    Ok(out)
}
