// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! A64 (AArch64) single-instruction disassembler.
//!
//! [`decode`] turns a 32-bit instruction word plus its virtual address into
//! an [`Instruction`] record: operation kind, operand registers with their
//! classes, sign-extended immediate, addressing mode, shift/extend
//! descriptor, condition code, and the acquire/release and flag-setting
//! bits. Alias rewrites (`mov`, `cmp`, `cset`, `mul`, the shift forms of the
//! bitfield group, ...) happen during decoding, so consumers always see the
//! canonical shape.
//!
//! Decoding is pure: no allocation, no I/O, read-only tables, safe to call
//! from any number of threads.
//!
//! ```rust
//! use ruda_a64::{decode_one, format_instruction, InstKind};
//!
//! let inst = decode_one(0xF9400421, 0x1000).unwrap();
//! assert_eq!(inst.kind, InstKind::Ldr);
//! assert_eq!(format_instruction(&inst), "ldr      x1, [x1, #8]");
//! ```

mod bits;
mod block;
mod branch;
mod dataproc_imm;
mod dataproc_reg;
mod decode;
mod format;
mod fp;
mod helpers;
mod inst;
mod loadstore;
mod table;

pub use block::{decode_block, CodeError, WORD_SIZE};
pub use decode::{decode, decode_one};
pub use format::{format_instruction, register_name};
pub use helpers::{branch_target, immediate_value, is_branch, is_load_store, used_registers};
pub use inst::{AddrMode, ExtendKind, InstKind, Instruction, Mnemonic, RegClass, COND_NAMES};
