// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The decoded-instruction record and its supporting enums.
//!
//! A decoder fills exactly the fields that are meaningful for the matched
//! encoding; everything else keeps the deterministic defaults set by
//! [`Instruction::new`]. Records are plain `Copy` data and are never mutated
//! after decoding succeeds.

use std::fmt;

// ---------------------------------------------------------------------------
// Register classes
// ---------------------------------------------------------------------------

/// Operand register class, deciding both width and name space.
///
/// Encoding 31 in a general-purpose slot is ambiguous between the stack
/// pointer and the zero register; decoders resolve it per encoding, so a
/// consumer never has to guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegClass {
    /// 64-bit general-purpose register.
    #[default]
    GpX,
    /// 32-bit general-purpose register.
    GpW,
    /// Stack pointer (encoding 31 only).
    Sp,
    /// 64-bit zero register.
    Xzr,
    /// 32-bit zero register.
    Wzr,
    /// SIMD register referenced by vector name.
    VFull,
    /// 8-bit scalar SIMD view.
    VB,
    /// 16-bit scalar SIMD view.
    VH,
    /// 32-bit scalar SIMD view.
    VS,
    /// 64-bit scalar SIMD view.
    VD,
    /// 128-bit scalar SIMD view.
    VQ,
}

impl RegClass {
    /// General-purpose class selected by the architectural `sf` bit.
    #[inline]
    pub fn gpr(sf: bool) -> Self {
        if sf {
            Self::GpX
        } else {
            Self::GpW
        }
    }
}

// ---------------------------------------------------------------------------
// Addressing modes
// ---------------------------------------------------------------------------

/// Memory addressing mode of a load/store encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddrMode {
    /// Not a memory operand.
    #[default]
    None,
    /// `[Xn, #imm]` with a scaled unsigned offset.
    ImmUnsigned,
    /// `[Xn, #imm]` with an unscaled signed offset.
    ImmSigned,
    /// `[Xn, #imm]!` — base updated before the access.
    PreIndex,
    /// `[Xn], #imm` — base updated after the access.
    PostIndex,
    /// `[Xn, Xm]` — plain register offset.
    RegOffset,
    /// `[Xn, Wm, <extend> #s]` — extended register offset.
    RegExtend,
    /// PC-relative literal pool load.
    Literal,
}

// ---------------------------------------------------------------------------
// Extend / shift kinds
// ---------------------------------------------------------------------------

/// Extend operators (bit-exact with the architectural `option` field) plus
/// the shift operators used by shifted-register data processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ExtendKind {
    #[default]
    UxtB = 0,
    UxtH = 1,
    UxtW = 2,
    UxtX = 3,
    SxtB = 4,
    SxtH = 5,
    SxtW = 6,
    SxtX = 7,
    Lsl = 8,
    Lsr = 9,
    Asr = 10,
    Ror = 11,
}

impl ExtendKind {
    /// Map a 3-bit `option` field to its extend operator.
    pub fn from_option(option: u32) -> Self {
        match option & 7 {
            0 => Self::UxtB,
            1 => Self::UxtH,
            2 => Self::UxtW,
            3 => Self::UxtX,
            4 => Self::SxtB,
            5 => Self::SxtH,
            6 => Self::SxtW,
            _ => Self::SxtX,
        }
    }

    /// Map a 2-bit `shift` field to its shift operator.
    pub fn from_shift(shift: u32) -> Self {
        match shift & 3 {
            0 => Self::Lsl,
            1 => Self::Lsr,
            2 => Self::Asr,
            _ => Self::Ror,
        }
    }
}

/// Condition names in canonical encoding order.
pub const COND_NAMES: [&str; 16] = [
    "eq", "ne", "cs", "cc", "mi", "pl", "vs", "vc", "hi", "ls", "ge", "lt", "gt", "le", "al", "nv",
];

// ---------------------------------------------------------------------------
// Operation kinds
// ---------------------------------------------------------------------------

/// Canonical operation kind of a decoded instruction.
///
/// Alias rewrites happen in the decoder, so consumers see one kind per
/// architectural behaviour (`mov x0, x1` is `Mov`, never `Orr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstKind {
    #[default]
    Unknown,
    // Loads and stores
    Ldr,
    Ldrb,
    Ldrh,
    Ldrsw,
    Ldrsb,
    Ldrsh,
    Str,
    Strb,
    Strh,
    Ldp,
    Stp,
    // Moves
    Mov,
    Movz,
    Movn,
    Movk,
    // Arithmetic
    Add,
    Sub,
    Adds,
    Subs,
    Adr,
    Adrp,
    // Branches
    B,
    Bl,
    Br,
    Blr,
    Ret,
    Cbz,
    Cbnz,
    Tbz,
    Tbnz,
    // Logical and shifts
    And,
    Orr,
    Eor,
    Lsl,
    Lsr,
    Asr,
    Ror,
    // Compares
    Cmp,
    Cmn,
    Tst,
    // Multiply / divide
    Mul,
    Madd,
    Msub,
    Sdiv,
    Udiv,
    // Conditional select family
    Csel,
    Csinc,
    Csinv,
    Csneg,
    Cset,
    Csetm,
    Cinc,
    Cinv,
    Cneg,
    // Bit manipulation
    Clz,
    Cls,
    Rbit,
    Rev,
    Rev16,
    Rev32,
    Extr,
    // Exclusive / ordered / atomic memory
    Ldxr,
    Stxr,
    Ldaxr,
    Stlxr,
    Ldar,
    Stlr,
    Ldadd,
    Ldclr,
    Ldeor,
    Ldset,
    Ldsmax,
    Ldsmin,
    Ldumax,
    Ldumin,
    Swp,
    Cas,
    // System
    Nop,
    Mrs,
    // Floating point / scalar SIMD
    Fmov,
    Fadd,
    Fsub,
    Fmul,
    Fdiv,
    Fabs,
    Fneg,
    Fsqrt,
    Fmadd,
    Fmsub,
    Fnmadd,
    Fnmsub,
    Fcmp,
    Fcmpe,
    Fccmp,
    Fcsel,
    Fcvt,
    Fcvtzs,
    Fcvtzu,
    Scvtf,
    Ucvtf,
    Frint,
    Fmax,
    Fmin,
}

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// Inline fixed-capacity mnemonic string.
///
/// Atomic and ordered load/store mnemonics are composed from a base plus
/// acquire/release and size suffixes (`ldadd` + `al` + `h`); keeping the
/// buffer inline lets decoders do that without allocating. The longest
/// composed mnemonic is well under the 15-byte capacity.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Mnemonic {
    buf: [u8; 15],
    len: u8,
}

impl Mnemonic {
    pub const fn empty() -> Self {
        Self { buf: [0; 15], len: 0 }
    }

    pub fn new(s: &str) -> Self {
        let mut m = Self::empty();
        m.push(s);
        m
    }

    /// Append `s`, truncating at capacity.
    pub fn push(&mut self, s: &str) {
        for &b in s.as_bytes() {
            if self.len as usize == self.buf.len() {
                break;
            }
            self.buf[self.len as usize] = b;
            self.len += 1;
        }
    }

    pub fn as_str(&self) -> &str {
        // Only ever built from ASCII mnemonic fragments.
        std::str::from_utf8(&self.buf[..self.len as usize]).unwrap_or("")
    }
}

impl Default for Mnemonic {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl PartialEq<&str> for Mnemonic {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// ---------------------------------------------------------------------------
// Instruction record
// ---------------------------------------------------------------------------

/// A fully decoded A64 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Virtual address of the instruction.
    pub address: u64,
    /// Canonical operation kind.
    pub kind: InstKind,
    /// Rendered mnemonic, aliases and suffixes applied.
    pub mnemonic: Mnemonic,

    /// Destination / transfer register.
    pub rd: u8,
    /// First source register (base register for memory operands).
    pub rn: u8,
    /// Second source register (status register for exclusive stores).
    pub rm: u8,
    /// Second transfer register for pair encodings.
    pub rt2: u8,
    /// Third source register for multiply-accumulate encodings.
    pub ra: u8,
    pub rd_class: RegClass,
    pub rn_class: RegClass,
    pub rm_class: RegClass,

    /// Sign-extended immediate; meaningful only when `has_imm` is set.
    pub imm: i64,
    pub has_imm: bool,

    pub addr_mode: AddrMode,

    /// Extend or shift operator applied to `rm`.
    pub extend: ExtendKind,
    /// Shift amount; doubles as the tested bit for TBZ/TBNZ and as `immr`
    /// for bitfield encodings.
    pub shift_amount: u8,

    /// Condition code (canonical `eq..nv` order) for conditional kinds.
    pub cond: u8,

    pub is_64bit: bool,
    pub set_flags: bool,
    pub is_acquire: bool,
    pub is_release: bool,
}

impl Instruction {
    /// Blank record for `raw` at `address`, all fields at their defaults.
    pub fn new(raw: u32, address: u64) -> Self {
        Self {
            raw,
            address,
            kind: InstKind::Unknown,
            mnemonic: Mnemonic::new("unknown"),
            rd: 0,
            rn: 0,
            rm: 0,
            rt2: 0,
            ra: 0,
            rd_class: RegClass::GpX,
            rn_class: RegClass::GpX,
            rm_class: RegClass::GpX,
            imm: 0,
            has_imm: false,
            addr_mode: AddrMode::None,
            extend: ExtendKind::UxtB,
            shift_amount: 0,
            cond: 0,
            is_64bit: false,
            set_flags: false,
            is_acquire: false,
            is_release: false,
        }
    }

    /// Set the mnemonic from a literal.
    #[inline]
    pub fn set_mnemonic(&mut self, s: &str) {
        self.mnemonic = Mnemonic::new(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_compose() {
        let mut m = Mnemonic::new("ldadd");
        m.push("al");
        m.push("h");
        assert_eq!(m.as_str(), "ldaddalh");
        assert_eq!(m, "ldaddalh");
    }

    #[test]
    fn test_mnemonic_truncates_at_capacity() {
        let mut m = Mnemonic::new("abcdefghijklmno");
        assert_eq!(m.as_str().len(), 15);
        m.push("xyz");
        assert_eq!(m.as_str(), "abcdefghijklmno");
    }

    #[test]
    fn test_blank_record_defaults() {
        let inst = Instruction::new(0xDEAD_BEEF, 0x1000);
        assert_eq!(inst.raw, 0xDEAD_BEEF);
        assert_eq!(inst.address, 0x1000);
        assert_eq!(inst.kind, InstKind::Unknown);
        assert_eq!(inst.mnemonic, "unknown");
        assert_eq!(inst.rd_class, RegClass::GpX);
        assert_eq!(inst.addr_mode, AddrMode::None);
        assert!(!inst.has_imm);
        assert!(!inst.set_flags);
    }

    #[test]
    fn test_extend_from_option_is_bit_exact() {
        assert_eq!(ExtendKind::from_option(2), ExtendKind::UxtW);
        assert_eq!(ExtendKind::from_option(3), ExtendKind::UxtX);
        assert_eq!(ExtendKind::from_option(6), ExtendKind::SxtW);
        assert_eq!(ExtendKind::from_shift(0), ExtendKind::Lsl);
        assert_eq!(ExtendKind::from_shift(3), ExtendKind::Ror);
    }
}
