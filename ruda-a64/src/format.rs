// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Assembly-text rendering of decoded instructions.
//!
//! Everything here is driven by the record: operand shapes by kind, register
//! names by class, memory operands by addressing mode. A handful of aliases
//! (`neg`, `mvn`, `dup`, the raw bitfield forms) share a kind with their base
//! instruction and are told apart by mnemonic, the same way the decoder
//! produced them.

use crate::bits::bits;
use crate::inst::{AddrMode, ExtendKind, InstKind, Instruction, RegClass, COND_NAMES};

/// X-register names; x29/x30 go by their ABI roles and 31 is the zero
/// register (the stack pointer has its own class).
static X_NAMES: [&str; 32] = [
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9", "x10", "x11", "x12", "x13", "x14",
    "x15", "x16", "x17", "x18", "x19", "x20", "x21", "x22", "x23", "x24", "x25", "x26", "x27",
    "x28", "fp", "lr", "xzr",
];

static W_NAMES: [&str; 32] = [
    "w0", "w1", "w2", "w3", "w4", "w5", "w6", "w7", "w8", "w9", "w10", "w11", "w12", "w13", "w14",
    "w15", "w16", "w17", "w18", "w19", "w20", "w21", "w22", "w23", "w24", "w25", "w26", "w27",
    "w28", "w29", "w30", "wzr",
];

static EXTEND_NAMES: [&str; 12] = [
    "uxtb", "uxth", "uxtw", "uxtx", "sxtb", "sxth", "sxtw", "sxtx", "lsl", "lsr", "asr", "ror",
];

/// Render a register operand.
pub fn register_name(num: u8, class: RegClass) -> String {
    if num > 31 {
        return format!("?{num}");
    }
    match class {
        RegClass::GpX => X_NAMES[num as usize].to_string(),
        RegClass::GpW => W_NAMES[num as usize].to_string(),
        RegClass::Sp => "sp".to_string(),
        RegClass::Xzr => "xzr".to_string(),
        RegClass::Wzr => "wzr".to_string(),
        RegClass::VFull => format!("v{num}"),
        RegClass::VB => format!("b{num}"),
        RegClass::VH => format!("h{num}"),
        RegClass::VS => format!("s{num}"),
        RegClass::VD => format!("d{num}"),
        RegClass::VQ => format!("q{num}"),
    }
}

fn extend_name(extend: ExtendKind) -> &'static str {
    EXTEND_NAMES[extend as usize]
}

fn cond_name(cond: u8) -> &'static str {
    COND_NAMES[(cond & 0xF) as usize]
}

/// System registers with friendly names; everything else renders in the
/// generic `S<op0>_<op1>_C<n>_C<m>_<op2>` form.
static SYS_REG_NAMES: [(u8, u8, u8, u8, u8, &str); 24] = [
    (3, 3, 4, 2, 0, "NZCV"),
    (3, 3, 4, 2, 1, "DAIF"),
    (3, 0, 4, 2, 2, "CurrentEL"),
    (3, 0, 4, 2, 0, "SPSel"),
    (3, 0, 4, 1, 0, "SP_EL0"),
    (3, 4, 4, 1, 0, "SP_EL1"),
    (3, 6, 4, 1, 0, "SP_EL2"),
    (3, 7, 4, 1, 0, "SP_EL3"),
    (3, 0, 4, 0, 0, "SPSR_EL1"),
    (3, 0, 4, 0, 1, "ELR_EL1"),
    (3, 4, 4, 0, 0, "SPSR_EL2"),
    (3, 4, 4, 0, 1, "ELR_EL2"),
    (3, 5, 4, 0, 0, "SPSR_EL12"),
    (3, 5, 4, 0, 1, "ELR_EL12"),
    (3, 6, 4, 0, 0, "SPSR_EL3"),
    (3, 6, 4, 0, 1, "ELR_EL3"),
    (3, 3, 13, 0, 2, "TPIDR_EL0"),
    (3, 3, 13, 0, 3, "TPIDRRO_EL0"),
    (3, 3, 13, 0, 5, "TPIDR2_EL0"),
    (3, 0, 13, 0, 4, "TPIDR_EL1"),
    (3, 4, 13, 0, 2, "TPIDR_EL2"),
    (3, 6, 13, 0, 2, "TPIDR_EL3"),
    (3, 3, 4, 4, 0, "FPCR"),
    (3, 3, 4, 4, 1, "FPSR"),
];

fn system_reg_name(op0: u8, op1: u8, crn: u8, crm: u8, op2: u8) -> String {
    for &(o0, o1, n, m, o2, name) in &SYS_REG_NAMES {
        if (o0, o1, n, m, o2) == (op0, op1, crn, crm, op2) {
            return name.to_string();
        }
    }
    format!("S{op0}_{op1}_C{crn}_C{crm}_{op2}")
}

/// Render the memory operand of a load/store record.
fn memory_operand(inst: &Instruction) -> String {
    let base = register_name(inst.rn, inst.rn_class);
    match inst.addr_mode {
        AddrMode::ImmUnsigned | AddrMode::ImmSigned => {
            if inst.imm == 0 {
                format!("[{base}]")
            } else {
                format!("[{base}, #{}]", inst.imm)
            }
        }
        AddrMode::PreIndex => format!("[{base}, #{}]!", inst.imm),
        AddrMode::PostIndex => format!("[{base}], #{}", inst.imm),
        AddrMode::RegOffset => {
            let index = register_name(inst.rm, inst.rm_class);
            if inst.shift_amount > 0 {
                format!("[{base}, {index}, lsl #{}]", inst.shift_amount)
            } else {
                format!("[{base}, {index}]")
            }
        }
        AddrMode::RegExtend => {
            let index = register_name(inst.rm, inst.rm_class);
            let ext = extend_name(inst.extend);
            if inst.shift_amount > 0 {
                format!("[{base}, {index}, {ext} #{}]", inst.shift_amount)
            } else {
                format!("[{base}, {index}, {ext}]")
            }
        }
        AddrMode::Literal => format!("{:#x}", inst.address.wrapping_add(inst.imm as u64)),
        AddrMode::None => format!("[{base}]"),
    }
}

fn operands(inst: &Instruction) -> String {
    let rd = || register_name(inst.rd, inst.rd_class);
    let rn = || register_name(inst.rn, inst.rn_class);
    let rm = || register_name(inst.rm, inst.rm_class);
    let target = || inst.address.wrapping_add(inst.imm as u64);

    match inst.kind {
        InstKind::Ldr
        | InstKind::Ldrb
        | InstKind::Ldrh
        | InstKind::Ldrsw
        | InstKind::Ldrsb
        | InstKind::Ldrsh
        | InstKind::Str
        | InstKind::Strb
        | InstKind::Strh => format!("{}, {}", rd(), memory_operand(inst)),

        InstKind::Ldp | InstKind::Stp => {
            let rt2 = register_name(inst.rt2, inst.rd_class);
            format!("{}, {}, {}", rd(), rt2, memory_operand(inst))
        }

        InstKind::Movz | InstKind::Movn | InstKind::Movk => {
            if inst.shift_amount > 0 {
                format!("{}, #{:#x}, lsl #{}", rd(), inst.imm, inst.shift_amount)
            } else {
                format!("{}, #{:#x}", rd(), inst.imm)
            }
        }

        InstKind::Mov => {
            if inst.mnemonic == "dup" {
                format!("{}, v{}[{}]", rd(), inst.rn, inst.imm)
            } else if inst.has_imm {
                format!("{}, #{:#x}", rd(), inst.imm)
            } else {
                format!("{}, {}", rd(), rm())
            }
        }

        InstKind::Add | InstKind::Sub | InstKind::Adds | InstKind::Subs => {
            if inst.mnemonic == "neg" {
                format!("{}, {}", rd(), rm())
            } else if inst.has_imm {
                if inst.shift_amount > 0 {
                    format!("{}, {}, #{:#x}, lsl #{}", rd(), rn(), inst.imm, inst.shift_amount)
                } else {
                    format!("{}, {}, #{:#x}", rd(), rn(), inst.imm)
                }
            } else if inst.shift_amount > 0 {
                format!(
                    "{}, {}, {}, {} #{}",
                    rd(),
                    rn(),
                    rm(),
                    extend_name(inst.extend),
                    inst.shift_amount
                )
            } else {
                format!("{}, {}, {}", rd(), rn(), rm())
            }
        }

        InstKind::Cmp | InstKind::Cmn | InstKind::Tst => {
            if inst.has_imm {
                format!("{}, #{:#x}", rn(), inst.imm)
            } else {
                format!("{}, {}", rn(), rm())
            }
        }

        InstKind::Adr | InstKind::Adrp => format!("{}, {:#x}", rd(), target()),

        InstKind::B | InstKind::Bl => format!("{:#x}", target()),

        InstKind::Br | InstKind::Blr | InstKind::Ret => {
            if inst.kind == InstKind::Ret
                && (inst.rn == 30 || inst.mnemonic == "eret" || inst.mnemonic == "drps")
            {
                String::new()
            } else {
                rn()
            }
        }

        InstKind::Cbz | InstKind::Cbnz => format!("{}, {:#x}", rd(), target()),

        InstKind::Tbz | InstKind::Tbnz => {
            format!("{}, #{}, {:#x}", rd(), inst.shift_amount, target())
        }

        InstKind::And | InstKind::Orr | InstKind::Eor => {
            if inst.mnemonic == "mvn" {
                format!("{}, {}", rd(), rm())
            } else if inst.has_imm {
                format!("{}, {}, #{:#x}", rd(), rn(), inst.imm)
            } else {
                format!("{}, {}, {}", rd(), rn(), rm())
            }
        }

        InstKind::Lsl | InstKind::Lsr | InstKind::Asr => {
            if inst.has_imm {
                if inst.mnemonic == "sbfm" || inst.mnemonic == "ubfm" || inst.mnemonic == "bfm" {
                    // Raw bitfield form: show the immr/imms pair.
                    format!(
                        "{}, {}, #{}, #{}",
                        rd(),
                        rn(),
                        inst.shift_amount,
                        inst.imm & 0x3F
                    )
                } else {
                    format!("{}, {}, #{}", rd(), rn(), inst.shift_amount)
                }
            } else {
                format!("{}, {}, {}", rd(), rn(), rm())
            }
        }

        InstKind::Ror => {
            if inst.has_imm {
                format!("{}, {}, #{}", rd(), rn(), inst.imm)
            } else {
                format!("{}, {}, {}", rd(), rn(), rm())
            }
        }

        InstKind::Extr => format!("{}, {}, {}, #{}", rd(), rn(), rm(), inst.imm),

        InstKind::Mul | InstKind::Sdiv | InstKind::Udiv => {
            format!("{}, {}, {}", rd(), rn(), rm())
        }

        InstKind::Madd | InstKind::Msub => {
            if inst.mnemonic == "mneg" {
                format!("{}, {}, {}", rd(), rn(), rm())
            } else {
                let ra = register_name(inst.ra, inst.rd_class);
                format!("{}, {}, {}, {}", rd(), rn(), rm(), ra)
            }
        }

        InstKind::Csel | InstKind::Csinc | InstKind::Csinv | InstKind::Csneg => {
            format!("{}, {}, {}, {}", rd(), rn(), rm(), cond_name(inst.cond))
        }

        InstKind::Cset | InstKind::Csetm => format!("{}, {}", rd(), cond_name(inst.cond)),

        InstKind::Cinc | InstKind::Cinv | InstKind::Cneg => {
            format!("{}, {}, {}", rd(), rn(), cond_name(inst.cond))
        }

        InstKind::Clz
        | InstKind::Cls
        | InstKind::Rbit
        | InstKind::Rev
        | InstKind::Rev16
        | InstKind::Rev32 => format!("{}, {}", rd(), rn()),

        InstKind::Ldxr | InstKind::Ldaxr | InstKind::Ldar => {
            let base = register_name(inst.rn, inst.rn_class);
            if inst.mnemonic == "ldxp" || inst.mnemonic == "ldaxp" {
                let rt2 = register_name(inst.rt2, inst.rd_class);
                format!("{}, {}, [{}]", rd(), rt2, base)
            } else {
                format!("{}, [{}]", rd(), base)
            }
        }

        InstKind::Stxr | InstKind::Stlxr => {
            let base = register_name(inst.rn, inst.rn_class);
            if inst.mnemonic == "stxp" || inst.mnemonic == "stlxp" {
                let rt2 = register_name(inst.rt2, inst.rd_class);
                format!("{}, {}, {}, [{}]", rm(), rd(), rt2, base)
            } else {
                format!("{}, {}, [{}]", rm(), rd(), base)
            }
        }

        InstKind::Stlr => {
            let base = register_name(inst.rn, inst.rn_class);
            format!("{}, [{}]", rd(), base)
        }

        InstKind::Ldadd
        | InstKind::Ldclr
        | InstKind::Ldeor
        | InstKind::Ldset
        | InstKind::Ldsmax
        | InstKind::Ldsmin
        | InstKind::Ldumax
        | InstKind::Ldumin
        | InstKind::Swp
        | InstKind::Cas => {
            let base = register_name(inst.rn, inst.rn_class);
            format!("{}, {}, [{}]", rm(), rd(), base)
        }

        InstKind::Nop => String::new(),

        InstKind::Mrs => {
            let raw = inst.raw;
            let op0 = bits(raw, 19, 20) as u8;
            let op1 = bits(raw, 16, 18) as u8;
            let crn = bits(raw, 12, 15) as u8;
            let crm = bits(raw, 8, 11) as u8;
            let op2 = bits(raw, 5, 7) as u8;
            format!("{}, {}", rd(), system_reg_name(op0, op1, crn, crm, op2))
        }

        InstKind::Fmov => {
            if inst.has_imm {
                format!("{}, #{}", rd(), inst.imm)
            } else {
                format!("{}, {}", rd(), rn())
            }
        }

        InstKind::Fabs
        | InstKind::Fneg
        | InstKind::Fsqrt
        | InstKind::Fcvt
        | InstKind::Frint
        | InstKind::Fcvtzs
        | InstKind::Fcvtzu
        | InstKind::Scvtf
        | InstKind::Ucvtf => format!("{}, {}", rd(), rn()),

        InstKind::Fadd
        | InstKind::Fsub
        | InstKind::Fmul
        | InstKind::Fdiv
        | InstKind::Fmax
        | InstKind::Fmin => format!("{}, {}, {}", rd(), rn(), rm()),

        InstKind::Fmadd | InstKind::Fmsub | InstKind::Fnmadd | InstKind::Fnmsub => {
            let ra = register_name(inst.ra, inst.rd_class);
            format!("{}, {}, {}, {}", rd(), rn(), rm(), ra)
        }

        InstKind::Fcmp | InstKind::Fcmpe => {
            if inst.has_imm {
                format!("{}, #0.0", rn())
            } else {
                format!("{}, {}", rn(), rm())
            }
        }

        InstKind::Fccmp => {
            format!("{}, {}, #{}, {}", rn(), rm(), inst.imm, cond_name(inst.cond))
        }

        InstKind::Fcsel => {
            format!("{}, {}, {}, {}", rd(), rn(), rm(), cond_name(inst.cond))
        }

        InstKind::Unknown => format!("; raw={:#010x}", inst.raw),
    }
}

/// Render a decoded instruction as assembly text.
pub fn format_instruction(inst: &Instruction) -> String {
    let ops = operands(inst);
    if ops.is_empty() {
        inst.mnemonic.to_string()
    } else {
        format!("{:<8} {}", inst.mnemonic.as_str(), ops)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_instruction(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_one;

    fn fmt_at(word: u32, addr: u64) -> String {
        match decode_one(word, addr) {
            Some(inst) => format_instruction(&inst),
            None => format_instruction(&Instruction::new(word, addr)),
        }
    }

    fn fmt(word: u32) -> String {
        fmt_at(word, 0x1000)
    }

    #[test]
    fn test_register_names() {
        assert_eq!(register_name(0, RegClass::GpX), "x0");
        assert_eq!(register_name(29, RegClass::GpX), "fp");
        assert_eq!(register_name(30, RegClass::GpX), "lr");
        assert_eq!(register_name(31, RegClass::GpX), "xzr");
        assert_eq!(register_name(31, RegClass::GpW), "wzr");
        assert_eq!(register_name(31, RegClass::Sp), "sp");
        assert_eq!(register_name(3, RegClass::VD), "d3");
        assert_eq!(register_name(3, RegClass::VQ), "q3");
        assert_eq!(register_name(3, RegClass::VFull), "v3");
    }

    #[test]
    fn test_format_loads_and_stores() {
        assert_eq!(fmt(0xF9400421), "ldr      x1, [x1, #8]");
        assert_eq!(fmt(0xF9400000), "ldr      x0, [x0]");
        assert_eq!(fmt(0xA9BF7BFD), "stp      fp, lr, [sp, #-16]!");
        assert_eq!(fmt(0xA8C17BFD), "ldp      fp, lr, [sp], #16");
        assert_eq!(fmt(0xF81F03E0), "stur     x0, [sp, #-16]");
        assert_eq!(fmt(0xF8408420), "ldr      x0, [x1], #8");
        assert_eq!(fmt(0xF8606820), "ldr      x0, [x1, x0]");
        assert_eq!(fmt(0xF8607820), "ldr      x0, [x1, x0, lsl #3]");
        assert_eq!(fmt(0xF862C820), "ldr      x0, [x1, w2, sxtw]");
    }

    #[test]
    fn test_format_literal_resolves_target() {
        assert_eq!(fmt_at(0x58000040, 0x1000), "ldr      x0, 0x1008");
    }

    #[test]
    fn test_format_moves() {
        assert_eq!(fmt(0xD2800540), "movz     x0, #0x2a");
        assert_eq!(fmt(0xD2A00540), "movz     x0, #0x2a, lsl #16");
        assert_eq!(fmt(0xAA0103E0), "mov      x0, x1");
        assert_eq!(fmt(0x910003E0), "mov      x0, sp");
    }

    #[test]
    fn test_format_arithmetic_and_compares() {
        assert_eq!(fmt(0x91000420), "add      x0, x1, #0x1");
        assert_eq!(fmt(0x8B000020), "add      x0, x1, x0");
        assert_eq!(fmt(0x8B000820), "add      x0, x1, x0, lsl #2");
        assert_eq!(fmt(0xEB00003F), "cmp      x1, x0");
        assert_eq!(fmt(0xF1000C3F), "cmp      x1, #0x3");
        assert_eq!(fmt(0xCB0103E0), "neg      x0, x1");
        assert_eq!(fmt(0xEA00003F), "tst      x1, x0");
        assert_eq!(fmt(0xAA2103E0), "mvn      x0, x1");
    }

    #[test]
    fn test_format_branches() {
        assert_eq!(fmt_at(0x14000010, 0x1000), "b        0x1040");
        assert_eq!(fmt_at(0x54000020, 0x1000), "b.eq     0x1004");
        assert_eq!(fmt_at(0xB4000040, 0x1000), "cbz      x0, 0x1008");
        assert_eq!(fmt_at(0x36000040, 0x1000), "tbz      w0, #0, 0x1008");
        assert_eq!(fmt(0xD61F0200), "br       x16");
        assert_eq!(fmt(0xD65F03C0), "ret");
        assert_eq!(fmt(0xD65F0000), "ret      x0");
        assert_eq!(fmt(0xD69F03E0), "eret");
    }

    #[test]
    fn test_format_cond_select_family() {
        assert_eq!(fmt(0x9A821020), "csel     x0, x1, x2, ne");
        assert_eq!(fmt(0x9A9F07E0), "cset     x0, ne");
        assert_eq!(fmt(0x9A810420), "cinc     x0, x1, ne");
    }

    #[test]
    fn test_format_mul_div_bitfield() {
        assert_eq!(fmt(0x9B027C20), "mul      x0, x1, x2");
        assert_eq!(fmt(0x9B020C20), "madd     x0, x1, x2, x3");
        assert_eq!(fmt(0x9B02FC20), "mneg     x0, x1, x2");
        assert_eq!(fmt(0x9AC00820), "udiv     x0, x1, x0");
        assert_eq!(fmt(0xD37FFC20), "lsr      x0, x1, #63");
        assert_eq!(fmt(0x93C21020), "extr     x0, x1, x2, #4");
        assert_eq!(fmt(0x93C11024), "ror      x4, x1, #4");
        assert_eq!(fmt(0xB3400C20), "bfm      x0, x1, #0, #3");
    }

    #[test]
    fn test_format_system() {
        assert_eq!(fmt(0xD503201F), "nop");
        assert_eq!(fmt(0xD5384100), "mrs      x0, SP_EL0");
        assert_eq!(fmt(0xD53B4200), "mrs      x0, NZCV");
        // Unmapped system register falls back to the encoded form.
        assert_eq!(fmt(0xD5380000), "mrs      x0, S3_0_C0_C0_0");
    }

    #[test]
    fn test_format_atomics() {
        assert_eq!(fmt(0xC85F7C20), "ldxr     x0, [x1]");
        assert_eq!(fmt(0xC8017C40), "stxr     w1, x0, [x2]");
        assert_eq!(fmt(0xC87F0C20), "ldxp     x0, x3, [x1]");
        assert_eq!(fmt(0xC8DFFC20), "ldar     x0, [x1]");
        assert_eq!(fmt(0xC8A07C20), "cas      x0, x0, [x1]");
        assert_eq!(fmt(0xF8210040), "ldadd    x1, x0, [x2]");
        assert_eq!(fmt(0xF8E10040), "ldaddal  x1, x0, [x2]");
    }

    #[test]
    fn test_format_fp() {
        assert_eq!(fmt(0x1E202000), "fcmp     s0, s0");
        assert_eq!(fmt(0x1E202008), "fcmp     s0, #0.0");
        assert_eq!(fmt(0x1E222820), "fadd     s0, s1, s2");
        assert_eq!(fmt(0x1F420C20), "fmadd    d0, d1, d2, d3");
        assert_eq!(fmt(0x9E670000), "fmov     x0, d0");
        assert_eq!(fmt(0x9E620020), "scvtf    d0, x1");
        assert_eq!(fmt(0x1E2E1000), "fmov     s0, #112");
        assert_eq!(fmt(0x1E221C20), "fcsel    s0, s1, s2, ne");
        assert_eq!(fmt(0x5E0C0462), "dup      s2, v3[1]");
    }

    #[test]
    fn test_format_unknown() {
        assert_eq!(fmt(0x00000000), "unknown  ; raw=0x00000000");
    }
}
