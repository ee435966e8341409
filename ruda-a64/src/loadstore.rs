// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Load/store instructions: exclusive and ordered accesses, compare-and-swap,
//! atomic read-modify-write, register pairs, literal loads, and the scalar
//! addressing-mode family (unsigned offset, register offset, unscaled and
//! pre/post-indexed).
//!
//! Row order matters in this table: the exclusive mask also covers CAS words,
//! so the CAS row runs first.

use crate::bits::{bit, bits, sign_extend};
use crate::inst::{AddrMode, ExtendKind, InstKind, Instruction, RegClass};
use crate::table::{row, run, Entry};

/// Memory base register: encoding 31 is always the stack pointer.
#[inline]
fn base_class(rn: u8) -> RegClass {
    if rn == 31 {
        RegClass::Sp
    } else {
        RegClass::GpX
    }
}

/// Acquire/release mnemonic infix.
#[inline]
fn acq_rel_suffix(acquire: bool, release: bool) -> &'static str {
    match (acquire, release) {
        (true, true) => "al",
        (true, false) => "a",
        (false, true) => "l",
        (false, false) => "",
    }
}

/// Scalar SIMD transfer class by the `size` field.
const SIMD_CLASS: [RegClass; 4] = [RegClass::VB, RegClass::VH, RegClass::VS, RegClass::VD];

/// Scalar GPR access forms keyed by `(size << 2) | opc`.
struct GprAccess {
    size_opc: u8,
    name: &'static str,
    unscaled_name: &'static str,
    kind: InstKind,
    class: RegClass,
    wide: bool,
}

static GPR_ACCESS: [GprAccess; 13] = [
    GprAccess { size_opc: 0x00, name: "strb", unscaled_name: "sturb", kind: InstKind::Strb, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x01, name: "ldrb", unscaled_name: "ldurb", kind: InstKind::Ldrb, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x02, name: "ldrsb", unscaled_name: "ldursb", kind: InstKind::Ldrsb, class: RegClass::GpX, wide: true },
    GprAccess { size_opc: 0x03, name: "ldrsb", unscaled_name: "ldursb", kind: InstKind::Ldrsb, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x04, name: "strh", unscaled_name: "sturh", kind: InstKind::Strh, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x05, name: "ldrh", unscaled_name: "ldurh", kind: InstKind::Ldrh, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x06, name: "ldrsh", unscaled_name: "ldursh", kind: InstKind::Ldrsh, class: RegClass::GpX, wide: true },
    GprAccess { size_opc: 0x07, name: "ldrsh", unscaled_name: "ldursh", kind: InstKind::Ldrsh, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x08, name: "str", unscaled_name: "stur", kind: InstKind::Str, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x09, name: "ldr", unscaled_name: "ldur", kind: InstKind::Ldr, class: RegClass::GpW, wide: false },
    GprAccess { size_opc: 0x0A, name: "ldrsw", unscaled_name: "ldursw", kind: InstKind::Ldrsw, class: RegClass::GpX, wide: true },
    GprAccess { size_opc: 0x0C, name: "str", unscaled_name: "stur", kind: InstKind::Str, class: RegClass::GpX, wide: true },
    GprAccess { size_opc: 0x0D, name: "ldr", unscaled_name: "ldur", kind: InstKind::Ldr, class: RegClass::GpX, wide: true },
];

fn gpr_access(size_opc: u32) -> Option<&'static GprAccess> {
    GPR_ACCESS.iter().find(|info| u32::from(info.size_opc) == size_opc)
}

/// CAS: `size 0010001 o1 1 Rs o0 11111 Rn Rt`. Suffixes compose from the
/// acquire/release bits and the access size.
fn cas(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let o1 = bit(word, 22) != 0;
    let rs = bits(word, 16, 20) as u8;
    let o0 = bit(word, 15) != 0;
    let rn = bits(word, 5, 9) as u8;

    out.rd = bits(word, 0, 4) as u8;
    out.rn = rn;
    out.rm = rs;
    out.rn_class = base_class(rn);
    out.addr_mode = AddrMode::ImmUnsigned;
    out.is_acquire = o0;
    out.is_release = o1;
    out.kind = InstKind::Cas;
    out.is_64bit = size == 3;
    out.rd_class = if size == 3 { RegClass::GpX } else { RegClass::GpW };
    out.rm_class = out.rd_class;

    out.set_mnemonic("cas");
    out.mnemonic.push(acq_rel_suffix(o0, o1));
    if size == 0 {
        out.mnemonic.push("b");
    } else if size == 1 {
        out.mnemonic.push("h");
    }
    true
}

/// Load/store exclusive and ordered: `size 001000 o2 L o1 Rs o0 Rt2 Rn Rt`.
/// `Rs` rides in the `rm` slot as the store status register.
fn exclusive(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let o2 = bit(word, 23);
    let l = bit(word, 22);
    let o1 = bit(word, 21);
    let rs = bits(word, 16, 20) as u8;
    let o0 = bit(word, 15);
    let rt2 = bits(word, 10, 14) as u8;
    let rn = bits(word, 5, 9) as u8;

    out.rd = bits(word, 0, 4) as u8;
    out.rn = rn;
    out.rm = rs;
    out.rt2 = rt2;
    out.rn_class = base_class(rn);
    out.addr_mode = AddrMode::ImmUnsigned;
    out.is_64bit = size == 3;
    out.rd_class = if size == 3 { RegClass::GpX } else { RegClass::GpW };
    out.rm_class = RegClass::GpW;
    out.is_acquire = o0 != 0;
    out.is_release = o1 != 0;

    if o2 == 0 {
        let (name, kind) = match (l, o1, o0) {
            (1, 0, 0) => ("ldxr", InstKind::Ldxr),
            (1, 0, 1) => ("ldaxr", InstKind::Ldaxr),
            (1, 1, 0) => ("ldxp", InstKind::Ldxr),
            (1, 1, 1) => ("ldaxp", InstKind::Ldaxr),
            (0, 0, 0) => ("stxr", InstKind::Stxr),
            (0, 0, 1) => ("stlxr", InstKind::Stlxr),
            (0, 1, 0) => ("stxp", InstKind::Stxr),
            _ => ("stlxp", InstKind::Stlxr),
        };
        out.set_mnemonic(name);
        out.kind = kind;
    } else if l == 1 {
        out.set_mnemonic(if o0 != 0 { "ldar" } else { "ldlar" });
        out.kind = InstKind::Ldar;
    } else {
        out.set_mnemonic(if o0 != 0 { "stlr" } else { "stllr" });
        out.kind = InstKind::Stlr;
    }

    if size == 0 {
        out.mnemonic.push("b");
        out.rd_class = RegClass::GpW;
    } else if size == 1 {
        out.mnemonic.push("h");
        out.rd_class = RegClass::GpW;
    }
    true
}

/// Atomic read-modify-write: `size 111 V 00 A R 1 Rs o3 opc 00 Rn Rt`.
fn atomic(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let acquire = bit(word, 23) != 0;
    let release = bit(word, 22) != 0;
    let rs = bits(word, 16, 20) as u8;
    let o3 = bit(word, 15);
    let opc = bits(word, 12, 14);
    let rn = bits(word, 5, 9) as u8;

    if v != 0 {
        return false;
    }

    out.rd = bits(word, 0, 4) as u8;
    out.rn = rn;
    out.rm = rs;
    out.rn_class = base_class(rn);
    out.addr_mode = AddrMode::ImmUnsigned;
    out.is_acquire = acquire;
    out.is_release = release;
    out.is_64bit = size == 3;
    out.rd_class = if size == 3 { RegClass::GpX } else { RegClass::GpW };
    out.rm_class = out.rd_class;

    if o3 == 0 {
        let (name, kind) = match opc {
            0b000 => ("ldadd", InstKind::Ldadd),
            0b001 => ("ldclr", InstKind::Ldclr),
            0b010 => ("ldeor", InstKind::Ldeor),
            0b011 => ("ldset", InstKind::Ldset),
            0b100 => ("ldsmax", InstKind::Ldsmax),
            0b101 => ("ldsmin", InstKind::Ldsmin),
            0b110 => ("ldumax", InstKind::Ldumax),
            _ => ("ldumin", InstKind::Ldumin),
        };
        out.set_mnemonic(name);
        out.kind = kind;
    } else {
        out.set_mnemonic("swp");
        out.kind = InstKind::Swp;
    }

    out.mnemonic.push(acq_rel_suffix(acquire, release));
    if size == 0 {
        out.mnemonic.push("b");
    } else if size == 1 {
        out.mnemonic.push("h");
    }
    true
}

/// LDP / STP / LDPSW and the SIMD pair forms:
/// `opc 101 V idx L imm7 Rt2 Rn Rt`.
fn pair(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let opc = bits(word, 30, 31);
    let v = bit(word, 26);
    let idx = bits(word, 23, 24);
    let l = bit(word, 22);
    let imm7 = bits(word, 15, 21);
    let rn = bits(word, 5, 9) as u8;

    out.rd = bits(word, 0, 4) as u8;
    out.rt2 = bits(word, 10, 14) as u8;
    out.rn = rn;
    out.rn_class = base_class(rn);
    out.has_imm = true;
    out.addr_mode = match idx {
        0b01 => AddrMode::PostIndex,
        0b10 => AddrMode::ImmSigned,
        0b11 => AddrMode::PreIndex,
        _ => return false,
    };

    if v == 0 {
        match opc {
            0b00 => {
                out.imm = sign_extend(imm7, 7) << 2;
                out.rd_class = RegClass::GpW;
                out.set_mnemonic(if l != 0 { "ldp" } else { "stp" });
                out.kind = if l != 0 { InstKind::Ldp } else { InstKind::Stp };
            }
            0b01 => {
                if l == 0 {
                    return false;
                }
                out.imm = sign_extend(imm7, 7) << 2;
                out.rd_class = RegClass::GpX;
                out.is_64bit = true;
                out.set_mnemonic("ldpsw");
                out.kind = InstKind::Ldp;
            }
            0b10 => {
                out.imm = sign_extend(imm7, 7) << 3;
                out.rd_class = RegClass::GpX;
                out.is_64bit = true;
                out.set_mnemonic(if l != 0 { "ldp" } else { "stp" });
                out.kind = if l != 0 { InstKind::Ldp } else { InstKind::Stp };
            }
            _ => return false,
        }
    } else {
        let (class, shift) = match opc {
            0b00 => (RegClass::VS, 2),
            0b01 => (RegClass::VD, 3),
            0b10 => (RegClass::VQ, 4),
            _ => return false,
        };
        out.imm = sign_extend(imm7, 7) << shift;
        out.rd_class = class;
        out.set_mnemonic(if l != 0 { "ldp" } else { "stp" });
        out.kind = if l != 0 { InstKind::Ldp } else { InstKind::Stp };
    }
    true
}

/// LDR (literal): `opc 011 V 00 imm19 Rt`. The offset is relative to the
/// instruction's own address.
fn literal(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let opc = bits(word, 30, 31);
    let v = bit(word, 26);
    let imm19 = bits(word, 5, 23);

    out.rd = bits(word, 0, 4) as u8;
    out.imm = sign_extend(imm19, 19) << 2;
    out.has_imm = true;
    out.addr_mode = AddrMode::Literal;
    out.set_mnemonic("ldr");
    out.kind = InstKind::Ldr;

    if v == 0 {
        match opc {
            0b00 => {
                out.rd_class = RegClass::GpW;
            }
            0b01 => {
                out.rd_class = RegClass::GpX;
                out.is_64bit = true;
            }
            0b10 => {
                out.rd_class = RegClass::GpX;
                out.is_64bit = true;
                out.set_mnemonic("ldrsw");
                out.kind = InstKind::Ldrsw;
            }
            _ => return false,
        }
    } else {
        out.rd_class = match opc {
            0b00 => RegClass::VS,
            0b01 => RegClass::VD,
            0b10 => RegClass::VQ,
            _ => return false,
        };
    }
    true
}

/// Load/store (unsigned immediate): `size 111 V 01 imm12 Rn Rt`, offset
/// scaled by the access size.
fn unsigned_imm(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let opc = bits(word, 22, 23);
    let imm12 = bits(word, 10, 21);
    let rn = bits(word, 5, 9) as u8;

    out.rd = bits(word, 0, 4) as u8;
    out.rn = rn;
    out.rn_class = base_class(rn);
    out.addr_mode = AddrMode::ImmUnsigned;
    out.has_imm = true;
    out.imm = i64::from(imm12) << size;

    if v == 0 {
        let Some(info) = gpr_access((size << 2) | opc) else {
            return false;
        };
        out.set_mnemonic(info.name);
        out.kind = info.kind;
        out.rd_class = info.class;
        out.is_64bit = info.wide;
    } else {
        out.rd_class = SIMD_CLASS[size as usize];
        match opc {
            0b00 => {
                out.set_mnemonic("str");
                out.kind = InstKind::Str;
            }
            0b01 => {
                out.set_mnemonic("ldr");
                out.kind = InstKind::Ldr;
            }
            _ => return false,
        }
    }
    true
}

/// Load/store (register offset): `size 111 V 00 1 Rm option S 10 Rn Rt`.
/// Option 0b011 is the plain register offset; everything else is an extended
/// index. The index register is an X register only for the UXTX/SXTX options.
fn reg_offset(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let opc = bits(word, 22, 23);
    let rm = bits(word, 16, 20) as u8;
    let option = bits(word, 13, 15);
    let s = bit(word, 12);
    let rn = bits(word, 5, 9) as u8;

    out.rd = bits(word, 0, 4) as u8;
    out.rn = rn;
    out.rm = rm;
    out.rn_class = base_class(rn);
    out.extend = ExtendKind::from_option(option);
    out.shift_amount = if s != 0 { size as u8 } else { 0 };
    out.rm_class = if option == 3 || option == 7 {
        RegClass::GpX
    } else {
        RegClass::GpW
    };
    out.addr_mode = if option == 3 {
        AddrMode::RegOffset
    } else {
        AddrMode::RegExtend
    };

    if v == 0 {
        let Some(info) = gpr_access((size << 2) | opc) else {
            return false;
        };
        out.set_mnemonic(info.name);
        out.kind = info.kind;
        out.rd_class = info.class;
        out.is_64bit = info.wide;
    } else {
        out.rd_class = SIMD_CLASS[size as usize];
        match opc {
            0b00 => {
                out.set_mnemonic("str");
                out.kind = InstKind::Str;
            }
            0b01 => {
                out.set_mnemonic("ldr");
                out.kind = InstKind::Ldr;
            }
            _ => return false,
        }
    }
    true
}

/// Load/store (unscaled immediate and pre/post-indexed):
/// `size 111 V 00 0 imm9 idx Rn Rt`. `idx = 0` is the STUR/LDUR family,
/// keeping the same kind under the unscaled name.
fn unscaled_indexed(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let opc = bits(word, 22, 23);
    let imm9 = bits(word, 12, 20);
    let idx = bits(word, 10, 11);
    let rn = bits(word, 5, 9) as u8;

    out.rd = bits(word, 0, 4) as u8;
    out.rn = rn;
    out.rn_class = base_class(rn);
    out.imm = sign_extend(imm9, 9);
    out.has_imm = true;
    out.addr_mode = match idx {
        0b00 => AddrMode::ImmSigned,
        0b01 => AddrMode::PostIndex,
        0b11 => AddrMode::PreIndex,
        _ => return false,
    };

    if v == 0 {
        let Some(info) = gpr_access((size << 2) | opc) else {
            return false;
        };
        out.set_mnemonic(if idx == 0 { info.unscaled_name } else { info.name });
        out.kind = info.kind;
        out.rd_class = info.class;
        out.is_64bit = info.wide;
    } else {
        out.rd_class = SIMD_CLASS[size as usize];
        match opc {
            0b00 => {
                out.set_mnemonic(if idx == 0 { "stur" } else { "str" });
                out.kind = InstKind::Str;
            }
            0b01 => {
                out.set_mnemonic(if idx == 0 { "ldur" } else { "ldr" });
                out.kind = InstKind::Ldr;
            }
            _ => return false,
        }
    }
    true
}

static TABLE: [Entry; 8] = [
    // CAS: size 0010001 o1 1 Rs o0 11111 Rn Rt — before the exclusive row,
    // whose mask also covers these words.
    row!(b"xx0010001x1xxxxxx11111xxxxxxxxxx", cas),
    // Load/store exclusive / ordered: size 001000 ...
    row!(b"xx001000xxxxxxxxxxxxxxxxxxxxxxxx", exclusive),
    // Atomic read-modify-write: size 111 V 00 A R 1 Rs o3 opc 00 Rn Rt
    row!(b"xx111x00xx1xxxxxxxxx00xxxxxxxxxx", atomic),
    // Load/store pair: opc 101 V idx L imm7 Rt2 Rn Rt
    row!(b"xx101x0xxxxxxxxxxxxxxxxxxxxxxxxx", pair),
    // LDR (literal): opc 011 V 00 imm19 Rt
    row!(b"xx011x00xxxxxxxxxxxxxxxxxxxxxxxx", literal),
    // Unsigned immediate: size 111 V 01 imm12 Rn Rt
    row!(b"xx111x01xxxxxxxxxxxxxxxxxxxxxxxx", unsigned_imm),
    // Register offset: size 111 V 00 1 Rm option S 10 Rn Rt
    row!(b"xx111x00xx1xxxxxxxxx10xxxxxxxxxx", reg_offset),
    // Unscaled / pre / post: size 111 V 00 0 imm9 idx Rn Rt
    row!(b"xx111x00xx0xxxxxxxxxxxxxxxxxxxxx", unscaled_indexed),
];

pub(crate) fn decode(word: u32, addr: u64, out: &mut Instruction) -> bool {
    run(&TABLE, word, addr, out)
}
