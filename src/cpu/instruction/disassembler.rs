// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A disassembler for Chip-8 opcodes
use super::Insn;
use owo_colors::{OwoColorize, Style};

/// Disassembles Chip-8 instructions
pub trait Disassembler {
    /// Disassemble a single instruction
    fn once(&self, insn: u16) -> String;
}

/// Disassembles Chip-8 instructions, printing them in the provided [owo_colors::Style]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dis {
    /// Styles invalid instructions
    pub invalid: Style,
    /// Styles valid instruction
    pub normal: Style,
    /// When unset, styles are ignored
    pub color: bool,
}

impl Dis {
    /// A disassembler that emits no color codes, for log files and pipes
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Default::default()
        }
    }
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            invalid: Style::new().bold().red(),
            normal: Style::new().green(),
            color: true,
        }
    }
}

impl Disassembler for Dis {
    fn once(&self, insn: u16) -> String {
        match (Insn::from_word(insn), self.color) {
            (Some(insn), true) => format!("{}", insn.style(self.normal)),
            (Some(insn), false) => insn.to_string(),
            (None, true) => format!("{}", format!("inval  {insn:04x}").style(self.invalid)),
            (None, false) => format!("inval  {insn:04x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output() {
        let dis = Dis::plain();
        assert_eq!("cls    ", dis.once(0x00e0));
        assert_eq!("draw   #5, v1, v2", dis.once(0xd125));
        assert_eq!("inval  8fff", dis.once(0x8fff));
    }
}
