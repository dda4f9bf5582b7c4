// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;
pub mod timer;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, Region, MEM_SIZE, PROGRAM_ADDR},
    timer::Timers,
};
use crate::{
    error::{Error, Result},
    io::Input,
    screen::Screen,
};
use log::trace;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// The number of return addresses the stack can hold
pub const STACK_DEPTH: usize = 16;

/// What happened during a single [CPU::tick]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// An instruction ran to completion
    Ran,
    /// `Fx0A` is waiting for a key. The pc has not moved; ticking again retries.
    KeyWait,
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone, Debug)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes debug mode and key polling timeouts.
    pub flags: Flags,
    // memory
    mem: Mem,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    timers: Timers,
    // Execution data
    cycle: usize,
    rng: StdRng,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the provided [Flags], and an entropy-seeded random number generator
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// let cpu = CPU::new(Flags::default());
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(flags: Flags) -> Self {
        CPU {
            flags,
            mem: Mem::new(),
            stack: Vec::with_capacity(STACK_DEPTH),
            pc: PROGRAM_ADDR,
            i: 0,
            v: [0; 16],
            timers: Timers::new(Instant::now()),
            cycle: 0,
            rng: StdRng::from_entropy(),
            disassembler: Dis::default(),
        }
    }

    /// Reseeds the random number generator, making `Cxbb` deterministic
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the disassembler used by debug mode
    pub fn disassembler(mut self, disassembler: Dis) -> Self {
        self.disassembler = disassembler;
        self
    }

    /// Loads a program into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space
    ///
    /// Returns [Error::RomTooLarge] if the program is longer than `0xe00` bytes.
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x00, 0xe0])?;
    /// assert_eq!(0x00e0, cpu.mem().read_word(0x200u16)?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.clear_region(Region::Program);
        self.mem.load_region(Region::Program, rom)?;
        Ok(self)
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::OutOfBounds]
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// assert!(cpu.set_v(0x10, 0).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                range: reg..reg + 1,
            })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the stack pointer, which is the number of return addresses on the stack
    pub fn sp(&self) -> usize {
        self.stack.len()
    }

    /// Gets the return addresses on the stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        &self.stack
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.timers.delay
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.timers.sound
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.timers.sound > 0
    }

    /// Gets the number of instructions the CPU has executed
    ///
    /// Ticks spent waiting on `Fx0A` don't count.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the CPU's memory, mutably
    pub fn mem_mut(&mut self) -> &mut Mem {
        &mut self.mem
    }

    /// Counts the timers down by the whole seconds elapsed up to `now`
    pub fn update_timers(&mut self, now: Instant) {
        self.timers.update(now);
    }

    /// Restarts the timers' clock at `now`, without touching their values
    pub fn resync_timers(&mut self, now: Instant) {
        self.timers.resync(now);
    }

    /// Resets the emulator.
    ///
    /// Touches the keypause flag, stack, pc, registers, timers, and cycle count.
    ///
    /// Does not touch memory, the random number generator, or the rest of the [Flags].
    pub fn reset(&mut self) {
        self.flags.keypause = false;
        // clear the stack
        self.stack.truncate(0);
        // Reset the program counter
        self.pc = PROGRAM_ADDR;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.timers = Timers::new(Instant::now());
        // Execution data
        self.cycle = 0;
    }

    /// Fetches the instruction word at pc, without executing it
    ///
    /// Returns [Error::OutOfBounds] if pc has left program memory.
    pub fn fetch(&self) -> Result<u16> {
        let pc = self.pc as usize;
        if !(PROGRAM_ADDR as usize..MEM_SIZE - 1).contains(&pc) {
            return Err(Error::OutOfBounds { range: pc..pc + 2 });
        }
        self.mem.read_word(pc)
    }

    /// Executes a single instruction
    ///
    /// Returns [Error::UnknownOpcode] if the instruction at `pc` is not recognized.
    /// If the instruction fails, the pc is left pointing at it.
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// let mut cpu = CPU::default();
    /// let (mut screen, mut input) = (Screen::default(), ScriptedInput::default());
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x22, 0x02, // call 0x202 (pc)
    /// ]).unwrap();
    /// cpu.tick(&mut screen, &mut input)
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::UnknownOpcode] if the instruction is not implemented.
    /// ```rust
    /// # use chirp_term::*;
    /// let mut cpu = CPU::default();
    /// let (mut screen, mut input) = (Screen::default(), ScriptedInput::default());
    /// cpu.load_program_bytes(&[0xff, 0xff]).unwrap();
    /// dbg!(cpu.tick(&mut screen, &mut input))
    ///     .expect_err("Should return Error::UnknownOpcode { pc: 0x200, word: 0xffff }");
    /// ```
    pub fn tick(&mut self, screen: &mut Screen, input: &mut impl Input) -> Result<Step> {
        let (pc, word) = (self.pc, self.fetch()?);

        // decode opcode
        let insn = Insn::from_word(word).ok_or(Error::UnknownOpcode { pc, word })?;

        // Print opcode disassembly:
        if self.flags.debug {
            trace!(
                "{:3} {:03x}: {:<36}",
                self.cycle,
                pc,
                self.disassembler.once(word)
            );
        }

        self.pc = self.pc.wrapping_add(2);
        match self.execute(screen, input, insn) {
            Ok(step) => {
                if step == Step::Ran {
                    self.cycle += 1;
                }
                Ok(step)
            }
            Err(e) => {
                self.pc = pc;
                Err(e)
            }
        }
    }

    /// Dumps the current state of all CPU registers, and the cycle count, to stderr
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::eprintln!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.timers.delay,
            self.timers.sound,
            self.cycle,
        );
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0050` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    ///
    /// # Examples
    /// ```rust
    /// use chirp_term::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU::new(Flags::default())
    }
}
