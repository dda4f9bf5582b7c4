// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for chirp-term

use std::ops::Range;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chirp-term.
#[derive(Debug, Error)]
pub enum Error {
    /// The word at `pc` does not decode to a known instruction
    #[error("opcode {word:04x} at {pc:03x} not recognized")]
    UnknownOpcode {
        /// The address of the offending word
        pc: u16,
        /// The offending word
        word: u16,
    },
    /// A call was made with all 16 stack entries in use
    #[error("stack overflow calling from {pc:03x}")]
    StackOverflow {
        /// The address of the call
        pc: u16,
    },
    /// A return was made with nothing on the stack
    #[error("stack underflow returning from {pc:03x}")]
    StackUnderflow {
        /// The address of the return
        pc: u16,
    },
    /// Tried to touch memory outside of the 4K address space
    #[error("range {range:04x?} is out of bounds")]
    OutOfBounds {
        /// The offending range
        range: Range<usize>,
    },
    /// The input device failed, as opposed to having no key ready
    #[error("input unavailable: {reason}")]
    InputUnavailable {
        /// What went wrong
        reason: String,
    },
    /// The program does not fit in program memory
    #[error("rom is {len:#x} bytes, but only {max:#x} fit in program memory")]
    RomTooLarge {
        /// Length of the rejected rom
        len: usize,
        /// Size of program memory
        max: usize,
    },
    /// The machine stopped on a fatal error
    #[error("halted at {addr:03x} ({word:04x}): {source}")]
    Halted {
        /// Address of the faulting instruction
        addr: u16,
        /// The faulting instruction, as fetched
        word: u16,
        /// What went wrong
        source: Box<Error>,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
