// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Data-processing (immediate) instructions.
//!
//! This group carries most of the alias rewrites that make disassembly read
//! like assembler output: CMP/CMN for flag-setting ADD/SUB with a zero-register
//! destination, MOV for ORR-from-zero and ADD-SP-with-zero, TST for ANDS with
//! a discarded result, the LSL/LSR/ASR shift aliases of the bitfield group,
//! and ROR for EXTR with equal sources.

use crate::bits::{bit, bits, sign_extend};
use crate::inst::{InstKind, Instruction, RegClass};
use crate::table::{row, run, Entry};

/// ADR / ADRP: `op immlo 10000 immhi Rd`.
fn pc_rel(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let op = bit(word, 31);
    let immlo = bits(word, 29, 30);
    let immhi = bits(word, 5, 23);
    let imm21 = (immhi << 2) | immlo;

    out.rd = bits(word, 0, 4) as u8;
    out.rd_class = RegClass::GpX;
    out.has_imm = true;
    out.is_64bit = true;
    if op == 0 {
        out.imm = sign_extend(imm21, 21);
        out.set_mnemonic("adr");
        out.kind = InstKind::Adr;
    } else {
        out.imm = sign_extend(imm21, 21) << 12;
        out.set_mnemonic("adrp");
        out.kind = InstKind::Adrp;
    }
    true
}

/// ADD / SUB (immediate): `sf op S 10001 shift imm12 Rn Rd`.
fn add_sub_imm(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let sf = bit(word, 31) != 0;
    let op = bit(word, 30);
    let s = bit(word, 29) != 0;
    let shift = bits(word, 22, 23);
    let imm12 = bits(word, 10, 21);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if shift > 1 {
        return false;
    }

    out.rd = rd;
    out.rn = rn;
    out.imm = i64::from(imm12);
    out.shift_amount = if shift == 1 { 12 } else { 0 };
    out.has_imm = true;
    out.is_64bit = sf;
    out.set_flags = s;
    out.rd_class = RegClass::gpr(sf);
    out.rn_class = RegClass::gpr(sf);

    let mut mov_sp = false;
    if op == 0 {
        out.set_mnemonic(if s { "adds" } else { "add" });
        out.kind = if s { InstKind::Adds } else { InstKind::Add };
        // MOV (to/from SP): ADD with nothing to add.
        if !s && imm12 == 0 && shift == 0 {
            out.set_mnemonic("mov");
            out.kind = InstKind::Mov;
            out.has_imm = false;
            mov_sp = true;
        }
    } else {
        out.set_mnemonic(if s { "subs" } else { "sub" });
        out.kind = if s { InstKind::Subs } else { InstKind::Sub };
    }

    // CMP/CMN discard the result; Rd=31 is the zero register there.
    if s && rd == 31 {
        if op == 1 {
            out.set_mnemonic("cmp");
            out.kind = InstKind::Cmp;
        } else {
            out.set_mnemonic("cmn");
            out.kind = InstKind::Cmn;
        }
        out.rd_class = RegClass::gpr(sf);
    }

    // Without flag setting, encoding 31 addresses the stack pointer.
    if !s {
        if rn == 31 {
            out.rn_class = RegClass::Sp;
        }
        if rd == 31 {
            out.rd_class = RegClass::Sp;
        }
    }
    if mov_sp {
        out.rm = rn;
        out.rm_class = out.rn_class;
    }

    true
}

/// Logical (immediate): `sf opc 100100 N immr imms Rn Rd`. The immediate is
/// kept in its compact `(immr << 6) | imms` form.
fn logical_imm(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let sf = bit(word, 31) != 0;
    let opc = bits(word, 29, 30);
    let immr = bits(word, 16, 21);
    let imms = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    out.rd = rd;
    out.rn = rn;
    out.imm = i64::from((immr << 6) | imms);
    out.has_imm = true;
    out.is_64bit = sf;
    out.rd_class = RegClass::gpr(sf);
    out.rn_class = RegClass::gpr(sf);

    match opc {
        0b00 => {
            out.set_mnemonic("and");
            out.kind = InstKind::And;
        }
        0b01 => {
            out.set_mnemonic("orr");
            out.kind = InstKind::Orr;
            if rn == 31 {
                out.set_mnemonic("mov");
                out.kind = InstKind::Mov;
            }
        }
        0b10 => {
            out.set_mnemonic("eor");
            out.kind = InstKind::Eor;
        }
        _ => {
            out.set_mnemonic("ands");
            out.kind = InstKind::And;
            out.set_flags = true;
            if rd == 31 {
                out.set_mnemonic("tst");
                out.kind = InstKind::Tst;
            }
        }
    }
    true
}

/// MOVN / MOVZ / MOVK: `sf opc 100101 hw imm16 Rd`.
fn move_wide(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let sf = bit(word, 31) != 0;
    let opc = bits(word, 29, 30);
    let hw = bits(word, 21, 22);

    // 32-bit forms only shift by 0 or 16.
    if !sf && hw >= 2 {
        return false;
    }

    out.rd = bits(word, 0, 4) as u8;
    out.imm = i64::from(bits(word, 5, 20));
    out.shift_amount = (hw * 16) as u8;
    out.has_imm = true;
    out.is_64bit = sf;
    out.rd_class = RegClass::gpr(sf);

    match opc {
        0b00 => {
            out.set_mnemonic("movn");
            out.kind = InstKind::Movn;
        }
        0b10 => {
            out.set_mnemonic("movz");
            out.kind = InstKind::Movz;
        }
        0b11 => {
            out.set_mnemonic("movk");
            out.kind = InstKind::Movk;
        }
        _ => return false,
    }
    true
}

/// Bitfield: `sf opc 100110 N immr imms Rn Rd`, with the LSL/LSR/ASR shift
/// aliases. `shift_amount` carries `immr`; `imm` keeps the compact pair.
fn bitfield(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let sf = bit(word, 31) != 0;
    let opc = bits(word, 29, 30);
    let n = bit(word, 22) != 0;
    let immr = bits(word, 16, 21);
    let imms = bits(word, 10, 15);

    if n != sf {
        return false;
    }

    out.rd = bits(word, 0, 4) as u8;
    out.rn = bits(word, 5, 9) as u8;
    out.imm = i64::from((immr << 6) | imms);
    out.shift_amount = immr as u8;
    out.has_imm = true;
    out.is_64bit = sf;
    out.rd_class = RegClass::gpr(sf);
    out.rn_class = RegClass::gpr(sf);

    let top = if sf { 63 } else { 31 };
    match opc {
        0b00 => {
            out.set_mnemonic("sbfm");
            out.kind = InstKind::Lsl;
            if immr != 0 && imms == top {
                out.set_mnemonic("asr");
                out.kind = InstKind::Asr;
            }
        }
        0b01 => {
            out.set_mnemonic("bfm");
            out.kind = InstKind::Lsl;
        }
        0b10 => {
            out.set_mnemonic("ubfm");
            out.kind = InstKind::Lsl;
            if imms == top {
                out.set_mnemonic("lsr");
                out.kind = InstKind::Lsr;
            }
            if immr == 0 && imms < top {
                out.set_mnemonic("lsl");
                out.kind = InstKind::Lsl;
            }
        }
        _ => return false,
    }
    true
}

/// EXTR: `sf 00 100111 N 0 Rm imms Rn Rd`, with the ROR alias when both
/// sources are the same register.
fn extract(word: u32, _addr: u64, out: &mut Instruction) -> bool {
    let sf = bit(word, 31) != 0;
    let n = bit(word, 22) != 0;
    let rm = bits(word, 16, 20) as u8;
    let imms = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;

    if n != sf {
        return false;
    }
    if !sf && imms >= 32 {
        return false;
    }

    out.rd = bits(word, 0, 4) as u8;
    out.rn = rn;
    out.rm = rm;
    out.imm = i64::from(imms);
    out.has_imm = true;
    out.is_64bit = sf;
    out.rd_class = RegClass::gpr(sf);
    out.rn_class = RegClass::gpr(sf);
    out.rm_class = RegClass::gpr(sf);

    if rn == rm {
        out.set_mnemonic("ror");
        out.kind = InstKind::Ror;
    } else {
        out.set_mnemonic("extr");
        out.kind = InstKind::Extr;
    }
    true
}

static TABLE: [Entry; 6] = [
    // ADR / ADRP: op immlo 10000 immhi Rd
    row!(b"xxx10000xxxxxxxxxxxxxxxxxxxxxxxx", pc_rel),
    // ADD / SUB (immediate): sf op S 10001 shift imm12 Rn Rd
    row!(b"xxx10001xxxxxxxxxxxxxxxxxxxxxxxx", add_sub_imm),
    // Logical (immediate): sf opc 100100 N immr imms Rn Rd
    row!(b"xxx100100xxxxxxxxxxxxxxxxxxxxxxx", logical_imm),
    // MOVN / MOVZ / MOVK: sf opc 100101 hw imm16 Rd
    row!(b"xxx100101xxxxxxxxxxxxxxxxxxxxxxx", move_wide),
    // Bitfield: sf opc 100110 N immr imms Rn Rd
    row!(b"xxx100110xxxxxxxxxxxxxxxxxxxxxxx", bitfield),
    // EXTR: sf 00 100111 N 0 Rm imms Rn Rd
    row!(b"x00100111x0xxxxxxxxxxxxxxxxxxxxx", extract),
];

pub(crate) fn decode(word: u32, addr: u64, out: &mut Instruction) -> bool {
    run(&TABLE, word, addr, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(word: u32) -> Instruction {
        let mut inst = Instruction::new(word, 0x2000);
        assert!(decode(word, 0x2000, &mut inst), "word {word:#010X} rejected");
        inst
    }

    fn rejected(word: u32) -> bool {
        let mut inst = Instruction::new(word, 0);
        !decode(word, 0, &mut inst)
    }

    #[test]
    fn test_adr_adrp() {
        let inst = dec(0x10000000);
        assert_eq!(inst.kind, InstKind::Adr);
        assert_eq!(inst.imm, 0);
        assert_eq!(inst.rd_class, RegClass::GpX);

        let inst = dec(0x30000000); // immlo = 1
        assert_eq!(inst.imm, 1);

        let inst = dec(0xB0000000); // adrp, immlo = 1
        assert_eq!(inst.kind, InstKind::Adrp);
        assert_eq!(inst.imm, 1 << 12);
    }

    #[test]
    fn test_add_imm() {
        let inst = dec(0x91000420); // add x0, x1, #1
        assert_eq!(inst.kind, InstKind::Add);
        assert_eq!((inst.rd, inst.rn), (0, 1));
        assert_eq!(inst.imm, 1);
        assert!(!inst.set_flags);

        let inst = dec(0x91400C20); // add x0, x1, #3, lsl #12
        assert_eq!(inst.shift_amount, 12);
        assert_eq!(inst.imm, 3);
    }

    #[test]
    fn test_adds_subs_imm() {
        let inst = dec(0xB1000420); // adds x0, x1, #1
        assert_eq!(inst.kind, InstKind::Adds);
        assert!(inst.set_flags);

        let inst = dec(0xF1000400); // subs x0, x0, #1
        assert_eq!(inst.kind, InstKind::Subs);
    }

    #[test]
    fn test_cmp_cmn_alias() {
        let inst = dec(0xF1000C3F); // cmp x1, #3
        assert_eq!(inst.kind, InstKind::Cmp);
        assert_eq!(inst.rn, 1);
        assert_eq!(inst.imm, 3);
        assert_eq!(inst.rd_class, RegClass::GpX); // zero register, not sp

        let inst = dec(0xB100043F); // cmn x1, #1
        assert_eq!(inst.kind, InstKind::Cmn);
    }

    #[test]
    fn test_mov_from_sp_alias() {
        let inst = dec(0x910003E0); // mov x0, sp
        assert_eq!(inst.kind, InstKind::Mov);
        assert!(!inst.has_imm);
        assert_eq!(inst.rm, 31);
        assert_eq!(inst.rm_class, RegClass::Sp);
        assert_eq!(inst.rn_class, RegClass::Sp);

        let inst = dec(0x9100001F); // mov sp, x0
        assert_eq!(inst.kind, InstKind::Mov);
        assert_eq!(inst.rd_class, RegClass::Sp);
        assert_eq!(inst.rm_class, RegClass::GpX);
    }

    #[test]
    fn test_add_sub_imm_rejects_bad_shift() {
        assert!(rejected(0x91800000)); // shift = 2
    }

    #[test]
    fn test_logical_imm() {
        let inst = dec(0x92400000); // and x0, x0, #...
        assert_eq!(inst.kind, InstKind::And);
        assert_eq!(inst.imm, 0);

        let inst = dec(0x927C0C41); // immr/imms packed
        assert_eq!(inst.kind, InstKind::And);
        assert_eq!(inst.imm, (0x3C << 6) | 0x03);
    }

    #[test]
    fn test_logical_imm_aliases() {
        let inst = dec(0xB24003E0); // orr x0, xzr, #... -> mov
        assert_eq!(inst.kind, InstKind::Mov);
        assert_eq!(inst.mnemonic, "mov");

        let inst = dec(0xF240003F); // ands xzr, x1, #... -> tst
        assert_eq!(inst.kind, InstKind::Tst);
        assert!(inst.set_flags);
        assert_eq!(inst.rn, 1);
    }

    #[test]
    fn test_move_wide() {
        let inst = dec(0xD2800540); // movz x0, #42
        assert_eq!(inst.kind, InstKind::Movz);
        assert_eq!(inst.imm, 42);
        assert_eq!(inst.shift_amount, 0);

        let inst = dec(0xD2A00000); // movz x0, #0, lsl #16
        assert_eq!(inst.shift_amount, 16);

        let inst = dec(0x92800000); // movn x0, #0
        assert_eq!(inst.kind, InstKind::Movn);

        let inst = dec(0xF2800000); // movk x0, #0
        assert_eq!(inst.kind, InstKind::Movk);

        let inst = dec(0x52800040); // movz w0, #2
        assert_eq!(inst.rd_class, RegClass::GpW);
    }

    #[test]
    fn test_move_wide_rejects_w_with_high_hw() {
        assert!(rejected(0x52C00000)); // movz w0, #0, lsl #32
    }

    #[test]
    fn test_bitfield_aliases() {
        let inst = dec(0xD37FFC20); // lsr x0, x1, #63
        assert_eq!(inst.kind, InstKind::Lsr);
        assert_eq!(inst.shift_amount, 63);

        let inst = dec(0xD3400C20); // ubfm with immr=0, imms=3 -> lsl shape
        assert_eq!(inst.kind, InstKind::Lsl);
        assert_eq!(inst.mnemonic, "lsl");

        let inst = dec(0x9342FC20); // asr x0, x1, #2
        assert_eq!(inst.kind, InstKind::Asr);
        assert_eq!(inst.shift_amount, 2);

        let inst = dec(0xB3400C20); // bfm keeps its raw name
        assert_eq!(inst.mnemonic, "bfm");
    }

    #[test]
    fn test_bitfield_requires_n_eq_sf() {
        assert!(rejected(0xD3000000)); // sf=1, N=0
        assert!(rejected(0x53400000)); // sf=0, N=1
    }

    #[test]
    fn test_extr_and_ror_alias() {
        let inst = dec(0x93C21020); // extr x0, x1, x2, #4
        assert_eq!(inst.kind, InstKind::Extr);
        assert_eq!((inst.rd, inst.rn, inst.rm), (0, 1, 2));
        assert_eq!(inst.imm, 4);

        let inst = dec(0x93C11024); // rn == rm -> ror x4, x1, #4
        assert_eq!(inst.kind, InstKind::Ror);
        assert_eq!(inst.mnemonic, "ror");
    }

    #[test]
    fn test_extr_rejects_wide_imms_for_w() {
        // sf=0, imms=32
        assert!(rejected(0x13828020));
    }
}
