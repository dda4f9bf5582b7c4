// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements a Chip-8 interpreter as if it were a real CPU architecture,
//! wired up to a terminal instead of a window.
//!
//! The [CPU] owns memory, registers, the stack and the timers. It draws to a [Screen],
//! and reads keys from anything that implements [Input]. A [Chip8] ties the two together
//! and runs the fetch-decode-execute loop, handing finished frames to a [Render]er.

#![warn(missing_docs)]

pub mod cpu;
pub mod error;
pub mod io;
pub mod screen;
pub mod traits;

use log::{error, info};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

// Common imports for chirp-term
pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, Region::*},
    Step, CPU,
};
pub use error::{Error, Result};
pub use io::{Input, Render, ScriptedInput, TextRenderer};
pub use screen::Screen;
pub use traits::Grab;

/// Holds the state of a Chip-8: a [CPU], and the [Screen] it draws to
#[derive(Clone, Debug, Default)]
pub struct Chip8 {
    /// Registers, memory, stack, and timers
    pub cpu: CPU,
    /// The 64x32 framebuffer
    pub screen: Screen,
}

impl Chip8 {
    /// Wraps a [CPU] with a blank [Screen]
    pub fn new(cpu: CPU) -> Self {
        Chip8 {
            cpu,
            screen: Screen::new(),
        }
    }

    /// Catches the timers up to `now`, then runs a single instruction
    ///
    /// Any error is fatal, and comes back as [Error::Halted] naming the faulting
    /// instruction.
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// # use std::time::Instant;
    /// let mut ch8 = Chip8::default();
    /// ch8.cpu.load_program_bytes(&[0x6a, 0x42, 0xff, 0xff]).unwrap();
    /// let mut input = ScriptedInput::default();
    /// assert_eq!(Step::Ran, ch8.step(Instant::now(), &mut input).unwrap());
    /// assert_eq!(0x42, ch8.cpu.v()[0xa]);
    /// assert!(matches!(
    ///     ch8.step(Instant::now(), &mut input),
    ///     Err(Error::Halted { addr: 0x202, word: 0xffff, .. })
    /// ));
    /// ```
    pub fn step(&mut self, now: Instant, input: &mut impl Input) -> Result<Step> {
        self.cpu.update_timers(now);
        let addr = self.cpu.pc();
        self.cpu
            .tick(&mut self.screen, input)
            .map_err(|source| Error::Halted {
                addr,
                word: self.cpu.fetch().unwrap_or_default(),
                source: Box::new(source),
            })
    }

    /// Runs until `stop` is raised, or the program fails
    ///
    /// After each instruction, the screen is handed to `render` if it changed.
    /// `Fx0A` never blocks here: while it waits, the timers keep counting and
    /// `stop` keeps being checked.
    pub fn run(
        &mut self,
        input: &mut impl Input,
        render: &mut impl Render,
        stop: &AtomicBool,
    ) -> Result<()> {
        self.cpu.resync_timers(Instant::now());
        while !stop.load(Ordering::Relaxed) {
            if let Err(e) = self.step(Instant::now(), input) {
                error!("{e}");
                return Err(e);
            }
            if self.screen.take_dirty() {
                render.render(&self.screen)?;
            }
        }
        info!(
            "stopped at {:03x} after {} cycles",
            self.cpu.pc(),
            self.cpu.cycle()
        );
        Ok(())
    }
}
