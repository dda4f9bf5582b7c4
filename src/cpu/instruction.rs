// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
/// A decoded Chip-8 instruction, carrying its operand fields
///
/// Every opcode is matched against its full pattern, so `00e0` and `00ee`
/// (or `8xy0` through `8xy4`) can never be confused with one another.
pub enum Insn {
    /// | 00e0 | Turns every pixel off
    #[opcode = "0x00e0"]
    cls,
    /// | 00ee | Pops the return address into pc. Fails on an empty stack.
    #[opcode = "0x00ee"]
    ret,
    /// | 1aaa | pc = a
    #[opcode = "0x1AAA"]
    jmp { A: u16 },
    /// | 2aaa | Pushes the next pc, then jumps to a. Fails 16 calls deep.
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// | 3xbb | Skips one instruction when vX == b
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// | 4xbb | Skips one instruction when vX != b
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// | 5xy0 | Skips one instruction when vX == vY
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// | 6xbb | vX = b
    #[opcode = "0x6xBB"]
    movb { B: u8, x: usize },
    /// | 7xbb | vX += b, wrapping. vF is left alone.
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// | 8xy0 | vX = vY
    #[opcode = "0x8xy0"]
    mov { x: usize, y: usize },
    /// | 8xy1 | vX |= vY
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// | 8xy2 | vX &= vY
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// | 8xy3 | vX ^= vY
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// | 8xy4 | vX += vY, then vF = carry
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// | 9xy0 | Skips one instruction when vX != vY
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// | aaaa | I = a
    #[opcode = "0xaAAA"]
    movI { A: u16 },
    /// | cxbb | vX = random byte & b
    #[opcode = "0xcxBB"]
    rand { B: u8, x: usize },
    /// | dxyn | XORs the n-row sprite at I onto the screen at (vX, vY). vF = collision.
    #[opcode = "0xdxyn"]
    draw { y: usize, x: usize, n: u8 },
    /// | exbb | Polls for a key, and skips one instruction if it equals vX. b is ignored.
    #[opcode = "0xexBB"]
    sek { B: u8, x: usize },
    /// | fx07 | vX = DT
    #[opcode = "0xfx07"]
    getdt { x: usize },
    /// | fx0a | Stays on this instruction until a key arrives, then vX = key
    #[opcode = "0xfx0a"]
    waitk { x: usize },
    /// | fx15 | DT = vX
    #[opcode = "0xfx15"]
    setdt { x: usize },
    /// | fx18 | ST = vX
    #[opcode = "0xfx18"]
    movst { x: usize },
    /// | fx1e | I += vX, wrapping at 16 bits
    #[opcode = "0xfx1e"]
    addI { x: usize },
    /// | fx29 | Points I at the font glyph for digit vX
    #[opcode = "0xfx29"]
    font { x: usize },
    /// | fx33 | Writes vX as three decimal digits to I, I+1, I+2
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// | fx55 | Copies v0..=vX to memory at I. I is unchanged.
    #[opcode = "0xfx55"]
    dmao { x: usize },
    /// | fx65 | Copies memory at I into v0..=vX. I is unchanged.
    #[opcode = "0xfx65"]
    dmai { x: usize },
}

impl Insn {
    /// Decodes a single big-endian instruction word
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// assert_eq!(Some(Insn::cls), Insn::from_word(0x00e0));
    /// assert_eq!(Some(Insn::movb { B: 0x42, x: 3 }), Insn::from_word(0x6342));
    /// assert_eq!(None, Insn::from_word(0x8fff));
    /// ```
    pub fn from_word(word: u16) -> Option<Insn> {
        Insn::decode(&word.to_be_bytes()).ok().map(|(_, insn)| insn)
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jmp { A }         => write!(f, "jmp    {A:03x}"),
            Insn::call { A }        => write!(f, "call   {A:03x}"),
            Insn::seb { B, x }      => write!(f, "se     #{B:02x}, v{x:X}"),
            Insn::sneb { B, x }     => write!(f, "sne    #{B:02x}, v{x:X}"),
            Insn::se { y, x }       => write!(f, "se     v{y:X}, v{x:X}"),
            Insn::movb { B, x }     => write!(f, "mov    #{B:02x}, v{x:X}"),
            Insn::addb { B, x }     => write!(f, "add    #{B:02x}, v{x:X}"),
            Insn::mov { x, y }      => write!(f, "mov    v{y:X}, v{x:X}"),
            Insn::or { y, x }       => write!(f, "or     v{y:X}, v{x:X}"),
            Insn::and { y, x }      => write!(f, "and    v{y:X}, v{x:X}"),
            Insn::xor { y, x }      => write!(f, "xor    v{y:X}, v{x:X}"),
            Insn::add { y, x }      => write!(f, "add    v{y:X}, v{x:X}"),
            Insn::sne { y, x }      => write!(f, "sne    v{y:X}, v{x:X}"),
            Insn::movI { A }        => write!(f, "mov    ${A:03x}, I"),
            Insn::rand { B, x }     => write!(f, "rand   #{B:02x}, v{x:X}"),
            Insn::draw { y, x, n }  => write!(f, "draw   #{n:x}, v{x:X}, v{y:X}"),
            Insn::sek { x, .. }     => write!(f, "sek    v{x:X}"),
            Insn::getdt { x }       => write!(f, "mov    DT, v{x:X}"),
            Insn::waitk { x }       => write!(f, "waitk  v{x:X}"),
            Insn::setdt { x }       => write!(f, "mov    v{x:X}, DT"),
            Insn::movst { x }       => write!(f, "mov    v{x:X}, ST"),
            Insn::addI { x }        => write!(f, "add    v{x:X}, I"),
            Insn::font { x }        => write!(f, "font   v{x:X}, I"),
            Insn::bcd { x }         => write!(f, "bcd    v{x:X}, &I"),
            Insn::dmao { x }        => write!(f, "dmao   v{x:X}"),
            Insn::dmai { x }        => write!(f, "dmai   v{x:X}"),
        }
    }
}
