// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scalar floating-point and advanced-SIMD-scalar instructions.

use crate::bits::{bit, bits};
use crate::inst::{InstKind, Instruction, RegClass};
use crate::table::{row, run, Entry};

/// FP register class from the `ftype` field (`0=S, 1=D, 3=H`; 2 reserved).
fn fp_class(ftype: u32) -> RegClass {
    match ftype {
        1 => RegClass::VD,
        3 => RegClass::VH,
        _ => RegClass::VS,
    }
}

/// Scalar SIMD class from the `size` field.
const SIZE_CLASS: [RegClass; 4] = [RegClass::VB, RegClass::VH, RegClass::VS, RegClass::VD];

/// Common `M=0, S=0` guard of the scalar FP encodings.
#[inline]
fn fp_guard(word: u32) -> bool {
    bit(word, 31) == 0 && bit(word, 29) == 0
}

/// FP data-processing (1 source): `M 0 S 11110 ftype 1 opcode 10000 Rn Rd`.
/// FCVT takes its destination precision from the low opcode bits.
fn fp_1src(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if !fp_guard(word) {
        return false;
    }
    let ftype = bits(word, 22, 23);
    let opcode = bits(word, 15, 20);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.rd_class = fp_class(ftype);
    out.rn_class = fp_class(ftype);

    match opcode {
        0x00 => {
            out.set_mnemonic("fmov");
            out.kind = InstKind::Fmov;
        }
        0x01 => {
            out.set_mnemonic("fabs");
            out.kind = InstKind::Fabs;
        }
        0x02 => {
            out.set_mnemonic("fneg");
            out.kind = InstKind::Fneg;
        }
        0x03 => {
            out.set_mnemonic("fsqrt");
            out.kind = InstKind::Fsqrt;
        }
        0x04 | 0x05 | 0x07 => {
            out.set_mnemonic("fcvt");
            out.kind = InstKind::Fcvt;
            out.rd_class = match opcode & 0x3 {
                0 => RegClass::VS,
                1 => RegClass::VD,
                _ => RegClass::VH,
            };
        }
        0x08..=0x0F => {
            let name = match opcode {
                0x08 => "frintn",
                0x09 => "frintp",
                0x0A => "frintm",
                0x0B => "frintz",
                0x0C => "frinta",
                0x0E => "frintx",
                0x0F => "frinti",
                _ => return false,
            };
            out.set_mnemonic(name);
            out.kind = InstKind::Frint;
        }
        _ => return false,
    }
    true
}

/// FP data-processing (2 source): `M 0 S 11110 ftype 1 Rm opcode 10 Rn Rd`.
fn fp_2src(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if !fp_guard(word) {
        return false;
    }
    let ftype = bits(word, 22, 23);
    let opcode = bits(word, 12, 15);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.rm = bits(word, 16, 20) as u8;
    out.rd_class = fp_class(ftype);
    out.rn_class = fp_class(ftype);
    out.rm_class = fp_class(ftype);

    let (name, kind) = match opcode {
        0x0 => ("fmul", InstKind::Fmul),
        0x1 => ("fdiv", InstKind::Fdiv),
        0x2 => ("fadd", InstKind::Fadd),
        0x3 => ("fsub", InstKind::Fsub),
        0x4 => ("fmax", InstKind::Fmax),
        0x5 => ("fmin", InstKind::Fmin),
        0x6 => ("fmaxnm", InstKind::Fmax),
        0x7 => ("fminnm", InstKind::Fmin),
        0x8 => ("fnmul", InstKind::Fmul),
        _ => return false,
    };
    out.set_mnemonic(name);
    out.kind = kind;
    true
}

/// FP data-processing (3 source): `M 0 S 11111 ftype o1 Rm o0 Ra Rn Rd`.
fn fp_3src(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if !fp_guard(word) {
        return false;
    }
    let ftype = bits(word, 22, 23);
    let o1 = bit(word, 21);
    let o0 = bit(word, 15);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.rm = bits(word, 16, 20) as u8;
    out.ra = bits(word, 10, 14) as u8;
    out.rd_class = fp_class(ftype);
    out.rn_class = fp_class(ftype);
    out.rm_class = fp_class(ftype);

    let (name, kind) = match (o1 << 1) | o0 {
        0b00 => ("fmadd", InstKind::Fmadd),
        0b01 => ("fmsub", InstKind::Fmsub),
        0b10 => ("fnmadd", InstKind::Fnmadd),
        _ => ("fnmsub", InstKind::Fnmsub),
    };
    out.set_mnemonic(name);
    out.kind = kind;
    true
}

/// FCMP / FCMPE: `M 0 S 11110 ftype 1 Rm op 1000 Rn opcode2`. The `#0.0`
/// forms set a zero immediate.
fn fp_compare(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if !fp_guard(word) {
        return false;
    }
    if bits(word, 14, 15) != 0 {
        return false;
    }
    let ftype = bits(word, 22, 23);
    let opcode2 = bits(word, 0, 4);

    out.rn = bits(word, 5, 9) as u8;
    out.rm = bits(word, 16, 20) as u8;
    out.rn_class = fp_class(ftype);
    out.rm_class = fp_class(ftype);

    match opcode2 {
        0x00 => {
            out.set_mnemonic("fcmp");
            out.kind = InstKind::Fcmp;
        }
        0x08 => {
            out.set_mnemonic("fcmp");
            out.kind = InstKind::Fcmp;
            out.has_imm = true;
            out.imm = 0;
        }
        0x10 => {
            out.set_mnemonic("fcmpe");
            out.kind = InstKind::Fcmpe;
        }
        0x18 => {
            out.set_mnemonic("fcmpe");
            out.kind = InstKind::Fcmpe;
            out.has_imm = true;
            out.imm = 0;
        }
        _ => return false,
    }
    true
}

/// FCCMP / FCCMPE: `M 0 S 11110 ftype 1 Rm cond 01 Rn op nzcv`. The NZCV
/// pattern rides in `imm`.
fn fp_cond_compare(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if !fp_guard(word) {
        return false;
    }
    let ftype = bits(word, 22, 23);

    out.rn = bits(word, 5, 9) as u8;
    out.rm = bits(word, 16, 20) as u8;
    out.cond = bits(word, 12, 15) as u8;
    out.imm = i64::from(bits(word, 0, 3));
    out.has_imm = true;
    out.rn_class = fp_class(ftype);
    out.rm_class = fp_class(ftype);
    out.kind = InstKind::Fccmp;
    out.set_mnemonic(if bit(word, 4) != 0 { "fccmpe" } else { "fccmp" });
    true
}

/// FCSEL: `M 0 S 11110 ftype 1 Rm cond 11 Rn Rd`.
fn fp_cond_select(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if !fp_guard(word) {
        return false;
    }
    let ftype = bits(word, 22, 23);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.rm = bits(word, 16, 20) as u8;
    out.cond = bits(word, 12, 15) as u8;
    out.rd_class = fp_class(ftype);
    out.rn_class = fp_class(ftype);
    out.rm_class = fp_class(ftype);
    out.kind = InstKind::Fcsel;
    out.set_mnemonic("fcsel");
    true
}

/// Integer↔FP conversions and register FMOV:
/// `sf 0 S 11110 ftype 1 rmode opcode 000000 Rn Rd`. The composite
/// `(rmode << 3) | opcode` picks the operation and the per-slot classes.
fn fp_int_convert(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if bit(word, 29) != 0 {
        return false;
    }
    let sf = bit(word, 31) != 0;
    let ftype = bits(word, 22, 23);
    let rmode = bits(word, 19, 20);
    let opcode = bits(word, 16, 18);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;

    let fp = fp_class(ftype);
    let gpr = RegClass::gpr(sf);

    // (name, kind, fp destination?); the other slot gets the GPR class.
    let (name, kind, to_fp) = match (rmode << 3) | opcode {
        0x18 => ("fcvtzs", InstKind::Fcvtzs, false),
        0x19 => ("fcvtzu", InstKind::Fcvtzu, false),
        0x02 => ("scvtf", InstKind::Scvtf, true),
        0x03 => ("ucvtf", InstKind::Ucvtf, true),
        0x06 => ("fmov", InstKind::Fmov, true),
        0x07 => ("fmov", InstKind::Fmov, false),
        0x00 => ("fcvtns", InstKind::Fcvtzs, false),
        0x01 => ("fcvtnu", InstKind::Fcvtzu, false),
        0x08 => ("fcvtps", InstKind::Fcvtzs, false),
        0x09 => ("fcvtpu", InstKind::Fcvtzu, false),
        0x10 => ("fcvtms", InstKind::Fcvtzs, false),
        0x11 => ("fcvtmu", InstKind::Fcvtzu, false),
        0x04 => ("fcvtas", InstKind::Fcvtzs, false),
        0x05 => ("fcvtau", InstKind::Fcvtzu, false),
        _ => return false,
    };
    out.set_mnemonic(name);
    out.kind = kind;
    if to_fp {
        out.rd_class = fp;
        out.rn_class = gpr;
    } else {
        out.rd_class = gpr;
        out.rn_class = fp;
    }
    out.is_64bit = sf;
    true
}

/// FMOV (scalar, immediate): `M 0 S 11110 ftype 1 imm8 100 00000 Rd`. The
/// 8-bit pattern is stored raw.
fn fmov_imm(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    if !fp_guard(word) {
        return false;
    }
    if bits(word, 5, 9) != 0 {
        return false;
    }
    let ftype = bits(word, 22, 23);

    out.rd = bits(word, 0, 4) as u8;
    out.imm = i64::from(bits(word, 13, 20));
    out.has_imm = true;
    out.rd_class = fp_class(ftype);
    out.kind = InstKind::Fmov;
    out.set_mnemonic("fmov");
    true
}

/// DUP (element, scalar): `01 0 11110000 imm5 0 0000 1 Rn Rd`. The element
/// size comes from the lowest set bit of `imm5`; the index is what remains
/// above it.
fn scalar_dup(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let imm5 = bits(word, 16, 20);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.rn_class = RegClass::VFull;

    if imm5 & 0x1 != 0 {
        out.rd_class = RegClass::VB;
        out.imm = i64::from((imm5 >> 1) & 0xF);
    } else if imm5 & 0x2 != 0 {
        out.rd_class = RegClass::VH;
        out.imm = i64::from((imm5 >> 2) & 0x7);
    } else if imm5 & 0x4 != 0 {
        out.rd_class = RegClass::VS;
        out.imm = i64::from((imm5 >> 3) & 0x3);
    } else if imm5 & 0x8 != 0 {
        out.rd_class = RegClass::VD;
        out.imm = i64::from((imm5 >> 4) & 0x1);
    } else {
        return false;
    }
    out.has_imm = true;
    out.kind = InstKind::Mov;
    out.set_mnemonic("dup");
    true
}

/// Scalar three-same operation names keyed by `(U << 5) | opcode`. The
/// duplicate 0x3D entry is intentional: the first match (`facge`) wins and
/// the `fdiv` row below it is unreachable.
struct ThreeSameOp {
    op: u32,
    name: &'static str,
    kind: InstKind,
}

static THREE_SAME_OPS: [ThreeSameOp; 14] = [
    ThreeSameOp { op: 0x10, name: "add", kind: InstKind::Add },
    ThreeSameOp { op: 0x30, name: "sub", kind: InstKind::Sub },
    ThreeSameOp { op: 0x1B, name: "fmulx", kind: InstKind::Add },
    ThreeSameOp { op: 0x1C, name: "fcmeq", kind: InstKind::Add },
    ThreeSameOp { op: 0x1F, name: "frecps", kind: InstKind::Add },
    ThreeSameOp { op: 0x3C, name: "fcmge", kind: InstKind::Add },
    ThreeSameOp { op: 0x3D, name: "facge", kind: InstKind::Add },
    ThreeSameOp { op: 0x3F, name: "frsqrts", kind: InstKind::Add },
    ThreeSameOp { op: 0x1A, name: "fadd", kind: InstKind::Fadd },
    ThreeSameOp { op: 0x3A, name: "fsub", kind: InstKind::Fsub },
    ThreeSameOp { op: 0x1E, name: "fmax", kind: InstKind::Fmax },
    ThreeSameOp { op: 0x3E, name: "fmin", kind: InstKind::Fmin },
    ThreeSameOp { op: 0x1D, name: "fmul", kind: InstKind::Fmul },
    ThreeSameOp { op: 0x3D, name: "fdiv", kind: InstKind::Fdiv },
];

/// Scalar three-same: `01 U 11110 size 1 Rm opcode 1 Rn Rd`.
fn scalar_3same(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let u = bit(word, 29);
    let size = bits(word, 22, 23);
    let opcode = bits(word, 11, 15);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.rm = bits(word, 16, 20) as u8;
    out.rd_class = SIZE_CLASS[size as usize];
    out.rn_class = SIZE_CLASS[size as usize];
    out.rm_class = SIZE_CLASS[size as usize];

    let op = (u << 5) | opcode;
    for entry in &THREE_SAME_OPS {
        if entry.op == op {
            out.set_mnemonic(entry.name);
            out.kind = entry.kind;
            return true;
        }
    }
    false
}

/// Scalar two-register-misc operation names keyed by `(U << 5) | opcode`.
struct TwoRegOp {
    op: u32,
    name: &'static str,
    kind: InstKind,
}

static TWO_REG_OPS: [TwoRegOp; 23] = [
    TwoRegOp { op: 0x03, name: "suqadd", kind: InstKind::Mov },
    TwoRegOp { op: 0x07, name: "sqabs", kind: InstKind::Mov },
    TwoRegOp { op: 0x08, name: "cmgt", kind: InstKind::Mov },
    TwoRegOp { op: 0x09, name: "cmeq", kind: InstKind::Mov },
    TwoRegOp { op: 0x0A, name: "cmlt", kind: InstKind::Mov },
    TwoRegOp { op: 0x0B, name: "abs", kind: InstKind::Mov },
    TwoRegOp { op: 0x0C, name: "fcmgt", kind: InstKind::Mov },
    TwoRegOp { op: 0x0D, name: "fcmeq", kind: InstKind::Mov },
    TwoRegOp { op: 0x0E, name: "fcmlt", kind: InstKind::Mov },
    TwoRegOp { op: 0x1A, name: "fcvtns", kind: InstKind::Fcvtzs },
    TwoRegOp { op: 0x1B, name: "fcvtms", kind: InstKind::Fcvtzs },
    TwoRegOp { op: 0x1C, name: "fcvtas", kind: InstKind::Fcvtzs },
    TwoRegOp { op: 0x1D, name: "scvtf", kind: InstKind::Scvtf },
    TwoRegOp { op: 0x23, name: "usqadd", kind: InstKind::Mov },
    TwoRegOp { op: 0x27, name: "sqneg", kind: InstKind::Mov },
    TwoRegOp { op: 0x28, name: "cmge", kind: InstKind::Mov },
    TwoRegOp { op: 0x29, name: "cmle", kind: InstKind::Mov },
    TwoRegOp { op: 0x2B, name: "neg", kind: InstKind::Mov },
    TwoRegOp { op: 0x2C, name: "fcmge", kind: InstKind::Mov },
    TwoRegOp { op: 0x2D, name: "fcmle", kind: InstKind::Mov },
    TwoRegOp { op: 0x3A, name: "fcvtpu", kind: InstKind::Fcvtzu },
    TwoRegOp { op: 0x3B, name: "fcvtzu", kind: InstKind::Fcvtzu },
    TwoRegOp { op: 0x3D, name: "ucvtf", kind: InstKind::Ucvtf },
];

/// Scalar two-reg misc: `01 U 11110 size 10000 opcode 10 Rn Rd`. The source
/// is mirrored into the `rm` slot for the single-source rendering path.
fn scalar_2reg_misc(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let u = bit(word, 29);
    let size = bits(word, 22, 23);
    let opcode = bits(word, 12, 16);

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.rm = out.rn;
    out.rd_class = SIZE_CLASS[size as usize];
    out.rn_class = SIZE_CLASS[size as usize];
    out.rm_class = SIZE_CLASS[size as usize];

    let op = (u << 5) | opcode;
    for entry in &TWO_REG_OPS {
        if entry.op == op {
            out.set_mnemonic(entry.name);
            out.kind = entry.kind;
            return true;
        }
    }
    false
}

static TABLE: [Entry; 11] = [
    // FCMP / FCMPE: ... 1 Rm op 1000 Rn opcode2
    row!(b"x0x11110xx1xxxxxxx1000xxxxxxxxxx", fp_compare),
    // FCCMP / FCCMPE: ... 1 Rm cond 01 Rn op nzcv
    row!(b"x0x11110xx1xxxxxxxxx01xxxxxxxxxx", fp_cond_compare),
    // FCSEL: ... 1 Rm cond 11 Rn Rd
    row!(b"x0x11110xx1xxxxxxxxx11xxxxxxxxxx", fp_cond_select),
    // FP 2-source: ... 1 Rm opcode 10 Rn Rd
    row!(b"x0x11110xx1xxxxxxxxx10xxxxxxxxxx", fp_2src),
    // FP 1-source: ... 1 opcode 10000 Rn Rd
    row!(b"x0x11110xx1xxxxxx10000xxxxxxxxxx", fp_1src),
    // FMOV (scalar, immediate): ... 1 imm8 100 imm5 Rd
    row!(b"x0x11110xx1xxxxxxxx100xxxxxxxxxx", fmov_imm),
    // Integer <-> FP conversions: ... 1 rmode opcode 000000 Rn Rd
    row!(b"x0x11110xx1xxxxx000000xxxxxxxxxx", fp_int_convert),
    // FP 3-source: M 0 S 11111 ...
    row!(b"x0x11111xxxxxxxxxxxxxxxxxxxxxxxx", fp_3src),
    // DUP (element, scalar): 01011110000 imm5 000001 Rn Rd
    row!(b"01011110000xxxxx000001xxxxxxxxxx", scalar_dup),
    // Scalar three-same: 01 U 11110 size 1 Rm opcode 1 Rn Rd
    row!(b"01x11110xx1xxxxxxxxxx1xxxxxxxxxx", scalar_3same),
    // Scalar two-reg misc: 01 U 11110 size 10000 opcode 10 Rn Rd
    row!(b"01x11110xx10000xxxxx10xxxxxxxxxx", scalar_2reg_misc),
];

pub(crate) fn decode(word: u32, addr: u64, out: &mut Instruction) -> bool {
    run(&TABLE, word, addr, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(word: u32) -> Instruction {
        let mut inst = Instruction::new(word, 0x3000);
        assert!(decode(word, 0x3000, &mut inst), "word {word:#010X} rejected");
        inst
    }

    #[test]
    fn test_fcmp_forms() {
        let inst = dec(0x1E202000); // fcmp s0, s0
        assert_eq!(inst.kind, InstKind::Fcmp);
        assert_eq!((inst.rn, inst.rm), (0, 0));
        assert_eq!(inst.rn_class, RegClass::VS);
        assert_eq!(inst.rm_class, RegClass::VS);
        assert!(!inst.has_imm);

        let inst = dec(0x1E622020); // fcmp d1, d2
        assert_eq!(inst.rn_class, RegClass::VD);
        assert_eq!((inst.rn, inst.rm), (1, 2));

        let inst = dec(0x1E202008); // fcmp s0, #0.0
        assert!(inst.has_imm);
        assert_eq!(inst.imm, 0);

        let inst = dec(0x1E202010); // fcmpe s0, s0
        assert_eq!(inst.kind, InstKind::Fcmpe);

        let inst = dec(0x1E202018); // fcmpe s0, #0.0
        assert_eq!(inst.kind, InstKind::Fcmpe);
        assert!(inst.has_imm);
    }

    #[test]
    fn test_fccmp() {
        let inst = dec(0x1E210400); // fccmp s0, s1, #0, eq
        assert_eq!(inst.kind, InstKind::Fccmp);
        assert_eq!(inst.cond, 0);
        assert_eq!(inst.imm, 0);
        assert!(inst.has_imm);

        let inst = dec(0x1E210413); // fccmpe s0, s1, #3, eq
        assert_eq!(inst.mnemonic, "fccmpe");
        assert_eq!(inst.imm, 3);
    }

    #[test]
    fn test_fcsel() {
        let inst = dec(0x1E221C20); // fcsel s0, s1, s2, ne
        assert_eq!(inst.kind, InstKind::Fcsel);
        assert_eq!((inst.rd, inst.rn, inst.rm), (0, 1, 2));
        assert_eq!(inst.cond, 1);
        assert_eq!(inst.rd_class, RegClass::VS);
    }

    #[test]
    fn test_fp_2src() {
        let inst = dec(0x1E222820); // fadd s0, s1, s2
        assert_eq!(inst.kind, InstKind::Fadd);
        assert_eq!((inst.rd, inst.rn, inst.rm), (0, 1, 2));

        assert_eq!(dec(0x1E221820).kind, InstKind::Fdiv);
        assert_eq!(dec(0x1E220820).kind, InstKind::Fmul);
        assert_eq!(dec(0x1E223820).kind, InstKind::Fsub);
        assert_eq!(dec(0x1E224820).kind, InstKind::Fmax);
        assert_eq!(dec(0x1E225820).kind, InstKind::Fmin);

        let inst = dec(0x1E226820); // fmaxnm
        assert_eq!(inst.mnemonic, "fmaxnm");
        assert_eq!(inst.kind, InstKind::Fmax);

        let inst = dec(0x1E228820); // fnmul
        assert_eq!(inst.mnemonic, "fnmul");
        assert_eq!(inst.kind, InstKind::Fmul);
    }

    #[test]
    fn test_fp_1src() {
        let inst = dec(0x1E204020); // fmov s0, s1
        assert_eq!(inst.kind, InstKind::Fmov);
        assert!(!inst.has_imm);

        assert_eq!(dec(0x1E20C020).kind, InstKind::Fabs);
        assert_eq!(dec(0x1E214020).kind, InstKind::Fneg);
        assert_eq!(dec(0x1E21C020).kind, InstKind::Fsqrt);
    }

    #[test]
    fn test_fcvt_changes_precision() {
        let inst = dec(0x1E22C020); // fcvt d0, s1
        assert_eq!(inst.kind, InstKind::Fcvt);
        assert_eq!(inst.rd_class, RegClass::VD);
        assert_eq!(inst.rn_class, RegClass::VS);

        let inst = dec(0x1E624020); // fcvt s0, d1
        assert_eq!(inst.rd_class, RegClass::VS);
        assert_eq!(inst.rn_class, RegClass::VD);
    }

    #[test]
    fn test_frint() {
        let inst = dec(0x1E25C020); // frintz s0, s1
        assert_eq!(inst.kind, InstKind::Frint);
        assert_eq!(inst.mnemonic, "frintz");

        let inst = dec(0x1E254020); // frintm s0, s1
        assert_eq!(inst.mnemonic, "frintm");
    }

    #[test]
    fn test_fp_3src() {
        let inst = dec(0x1F420C20); // fmadd d0, d1, d2, d3
        assert_eq!(inst.kind, InstKind::Fmadd);
        assert_eq!((inst.rd, inst.rn, inst.rm, inst.ra), (0, 1, 2, 3));
        assert_eq!(inst.rd_class, RegClass::VD);

        assert_eq!(dec(0x1F428C20).kind, InstKind::Fmsub);
        assert_eq!(dec(0x1F620C20).kind, InstKind::Fnmadd);
        assert_eq!(dec(0x1F628C20).kind, InstKind::Fnmsub);
    }

    #[test]
    fn test_int_fp_conversions() {
        let inst = dec(0x9E620020); // scvtf d0, x1
        assert_eq!(inst.kind, InstKind::Scvtf);
        assert_eq!(inst.rd_class, RegClass::VD);
        assert_eq!(inst.rn_class, RegClass::GpX);
        assert!(inst.is_64bit);

        let inst = dec(0x9E780020); // fcvtzs x0, d1
        assert_eq!(inst.kind, InstKind::Fcvtzs);
        assert_eq!(inst.rd_class, RegClass::GpX);
        assert_eq!(inst.rn_class, RegClass::VD);

        let inst = dec(0x9E790020); // fcvtzu x0, d1
        assert_eq!(inst.kind, InstKind::Fcvtzu);

        let inst = dec(0x9E600020); // fcvtns x0, d1
        assert_eq!(inst.mnemonic, "fcvtns");
        assert_eq!(inst.kind, InstKind::Fcvtzs);
    }

    #[test]
    fn test_fmov_between_gpr_and_fp() {
        let inst = dec(0x9E670000); // fmov x0, d0
        assert_eq!(inst.kind, InstKind::Fmov);
        assert_eq!(inst.rd_class, RegClass::GpX);
        assert_eq!(inst.rn_class, RegClass::VD);

        let inst = dec(0x9E660000); // fmov d0, x0
        assert_eq!(inst.rd_class, RegClass::VD);
        assert_eq!(inst.rn_class, RegClass::GpX);

        let inst = dec(0x1E270000); // fmov w0, s0
        assert_eq!(inst.rd_class, RegClass::GpW);
        assert_eq!(inst.rn_class, RegClass::VS);
    }

    #[test]
    fn test_fmov_imm_keeps_raw_pattern() {
        let inst = dec(0x1E2E1000); // fmov s0, #1.0 (imm8 = 0x70)
        assert_eq!(inst.kind, InstKind::Fmov);
        assert!(inst.has_imm);
        assert_eq!(inst.imm, 0x70);
        assert_eq!(inst.rd_class, RegClass::VS);
    }

    #[test]
    fn test_fmov_imm_rejects_nonzero_imm5() {
        let mut inst = Instruction::new(0, 0);
        assert!(!decode(0x1E2E1020, 0, &mut inst));
    }

    #[test]
    fn test_scalar_dup() {
        let inst = dec(0x5E010420); // dup b0, v1.b[0]
        assert_eq!(inst.kind, InstKind::Mov);
        assert_eq!(inst.mnemonic, "dup");
        assert_eq!(inst.rd_class, RegClass::VB);
        assert_eq!(inst.rn_class, RegClass::VFull);
        assert_eq!(inst.imm, 0);

        let inst = dec(0x5E0C0462); // dup s2, v3.s[1]
        assert_eq!(inst.rd_class, RegClass::VS);
        assert_eq!((inst.rd, inst.rn), (2, 3));
        assert_eq!(inst.imm, 1);
    }

    #[test]
    fn test_scalar_3same() {
        let inst = dec(0x5EE28420); // add d0, d1, d2
        assert_eq!(inst.kind, InstKind::Add);
        assert_eq!(inst.rd_class, RegClass::VD);

        let inst = dec(0x7EE28420); // sub d0, d1, d2
        assert_eq!(inst.kind, InstKind::Sub);
    }

    #[test]
    fn test_scalar_3same_duplicate_op_first_match_wins() {
        // (U=1, opcode=0x1D) appears twice in the operation table; the scan
        // must resolve it to the first entry.
        let inst = dec(0x7EA2EC20);
        assert_eq!(inst.mnemonic, "facge");
    }

    #[test]
    fn test_scalar_2reg_misc() {
        let inst = dec(0x5EE0B820); // abs d0, d1
        assert_eq!(inst.mnemonic, "abs");
        assert_eq!(inst.rd_class, RegClass::VD);
        assert_eq!(inst.rm, inst.rn);

        let inst = dec(0x7EE0B820); // neg d0, d1
        assert_eq!(inst.mnemonic, "neg");

        let inst = dec(0x5EE09820); // cmeq d0, d1, #0
        assert_eq!(inst.mnemonic, "cmeq");

        let inst = dec(0x7EE1B820); // fcvtzu d0, d1
        assert_eq!(inst.kind, InstKind::Fcvtzu);
    }
}
