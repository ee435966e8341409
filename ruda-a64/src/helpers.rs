// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Small consumers of the decoded record: branch targets, kind-class
//! predicates, register extraction.

use crate::inst::{InstKind, Instruction, RegClass};

/// Resolved target of a PC-relative instruction.
pub fn branch_target(inst: &Instruction) -> Option<u64> {
    match inst.kind {
        InstKind::B
        | InstKind::Bl
        | InstKind::Cbz
        | InstKind::Cbnz
        | InstKind::Tbz
        | InstKind::Tbnz
        | InstKind::Adr
        | InstKind::Adrp => Some(inst.address.wrapping_add(inst.imm as u64)),
        _ => None,
    }
}

/// Whether the instruction changes control flow.
pub fn is_branch(inst: &Instruction) -> bool {
    matches!(
        inst.kind,
        InstKind::B
            | InstKind::Bl
            | InstKind::Br
            | InstKind::Blr
            | InstKind::Ret
            | InstKind::Cbz
            | InstKind::Cbnz
            | InstKind::Tbz
            | InstKind::Tbnz
    )
}

/// Whether the instruction is a plain load or store.
pub fn is_load_store(inst: &Instruction) -> bool {
    matches!(
        inst.kind,
        InstKind::Ldr
            | InstKind::Ldrb
            | InstKind::Ldrh
            | InstKind::Ldrsw
            | InstKind::Ldrsb
            | InstKind::Ldrsh
            | InstKind::Str
            | InstKind::Strb
            | InstKind::Strh
            | InstKind::Ldp
            | InstKind::Stp
    )
}

/// Register numbers referenced by the record, deduplicated in rd, rn, rm,
/// rt2 order. Encoding 31 only counts when the slot addresses the stack
/// pointer.
pub fn used_registers(inst: &Instruction) -> Vec<u8> {
    let mut regs = Vec::with_capacity(4);
    let slots = [
        (inst.rd, inst.rd_class),
        (inst.rn, inst.rn_class),
        (inst.rm, inst.rm_class),
        (inst.rt2, inst.rd_class),
    ];
    for (num, class) in slots {
        if (num < 31 || class == RegClass::Sp) && !regs.contains(&num) {
            regs.push(num);
        }
    }
    regs
}

/// The immediate, when the record carries one.
pub fn immediate_value(inst: &Instruction) -> Option<i64> {
    inst.has_imm.then_some(inst.imm)
}
