//! Represents flags that aid in implementation but aren't a part of the Chip-8 itself

use std::time::Duration;

/// Represents flags that aid in operation, but aren't inherent to the CPU
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flags {
    /// Set when debug (live disassembly) mode enabled
    pub debug: bool,
    /// Set while the program is stalled on `Fx0A`, waiting for a keypress
    pub keypause: bool,
    /// How long an `Ex__` instruction polls for a keypress
    pub key_poll: Duration,
    /// How long a single attempt of `Fx0A` waits before handing control back to the loop
    pub key_wait: Duration,
}

impl Flags {
    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(false, cpu.flags.debug);
    /// // Toggle debug mode
    /// cpu.flags.debug();
    /// assert_eq!(true, cpu.flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            debug: false,
            keypause: false,
            key_poll: Duration::from_millis(100),
            key_wait: Duration::from_millis(10),
        }
    }
}
