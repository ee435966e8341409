// SPDX-FileCopyrightText: 2025 ruda contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use ruda_a64::{
    branch_target, decode_block, format_instruction, immediate_value, is_branch, is_load_store,
    used_registers, Instruction,
};

/// ruda - ARM64 disassembly listing tool
#[derive(Parser, Debug)]
#[command(name = "ruda", version, about = "A64 (AArch64) disassembler")]
struct Args {
    /// Instruction words in hex (e.g. 0xF9400421 or F9400421)
    words: Vec<String>,

    /// Raw little-endian code image to disassemble
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Virtual address of the first instruction (hex or decimal)
    #[arg(short, long, default_value = "0x1000")]
    base: String,

    /// Print per-instruction details (registers, immediate, branch target)
    #[arg(short, long)]
    details: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_u64(text: &str) -> Result<u64> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.with_context(|| format!("invalid number: {text}"))
}

fn parse_word(text: &str) -> Result<u32> {
    let text = text.trim();
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(hex, 16).with_context(|| format!("invalid instruction word: {text}"))
}

fn print_listing(insts: &[Instruction], details: bool) {
    for inst in insts {
        println!(
            "{:#018x}:  {:08x}  {}",
            inst.address,
            inst.raw,
            format_instruction(inst)
        );
        if details {
            print_details(inst);
        }
    }
}

fn print_details(inst: &Instruction) {
    let regs = used_registers(inst);
    if !regs.is_empty() {
        let names: Vec<String> = regs.iter().map(|r| format!("r{r}")).collect();
        println!("    registers: {}", names.join(" "));
    }
    if let Some(imm) = immediate_value(inst) {
        println!("    immediate: {imm} ({imm:#x})");
    }
    if let Some(target) = branch_target(inst) {
        println!("    target:    {target:#x}");
    }
    if is_branch(inst) {
        println!("    class:     branch");
    } else if is_load_store(inst) {
        println!("    class:     load/store");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let base = parse_u64(&args.base)?;

    let code: Vec<u8> = if let Some(path) = &args.file {
        info!("disassembling {}", path.display());
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
    } else if !args.words.is_empty() {
        let mut bytes = Vec::with_capacity(args.words.len() * 4);
        for word in &args.words {
            bytes.extend_from_slice(&parse_word(word)?.to_le_bytes());
        }
        bytes
    } else {
        anyhow::bail!("nothing to disassemble: pass instruction words or --file <path>");
    };

    let insts = decode_block(&code, base)?;
    print_listing(&insts, args.details);
    Ok(())
}
