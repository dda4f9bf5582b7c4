// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Disassembles a Chip-8 ROM, one instruction per line

use chirp_term::*;
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(
        help = "Load address, in hex",
        default = "200",
        parse(try_from_str = "parse_hex")
    )]
    pub loadaddr: u16,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
    #[options(help = "Don't color the output")]
    pub plain: bool,
}

fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = &read(&options.file)?;
    let disassembler = match options.plain {
        true => Dis::plain(),
        false => Dis::default(),
    };
    let start = options.loadaddr as usize + options.offset;
    let body = contents.get(options.offset..).unwrap_or_default();
    for (index, insn) in body.chunks_exact(2).enumerate() {
        let insn = u16::from_be_bytes([insn[0], insn[1]]);
        let addr = start + 2 * index;
        match options.plain {
            true => println!("{addr:03x}: {} {insn:04x}", disassembler.once(insn)),
            false => println!(
                "{addr:03x}: {} {:04x}",
                disassembler.once(insn),
                insn.bright_black()
            ),
        }
    }
    Ok(())
}
