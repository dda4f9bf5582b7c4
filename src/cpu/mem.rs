// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Contains some handy utils for reading and writing

use crate::{
    error::{Error, Result},
    traits::Grab,
};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
    slice::SliceIndex,
};

/// Size of the Chip-8 address space
pub const MEM_SIZE: usize = 0x1000;
/// Where the hex font lives
pub const FONT_ADDR: u16 = 0x050;
/// Where programs are loaded, and where execution starts
pub const PROGRAM_ADDR: u16 = 0x200;

/// The standard 4x5 hexadecimal font, one glyph per 5 bytes
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

impl Grab<u8> for Mem {
    /// Gets a slice of [Mem] memory
    /// # Examples
    /// ```rust
    ///# use chirp_term::*;
    ///     let mem = Mem::new();
    ///     assert!([0;10].as_slice() == mem.grab(0x200..0x20a).unwrap());
    /// ```
    #[inline(always)]
    fn grab<I>(&self, index: I) -> Option<&<I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get(index)
    }

    /// Gets a mutable slice of [Mem] memory
    #[inline(always)]
    fn grab_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get_mut(index)
    }
}

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The range of addresses covered by this region
    pub fn range(self) -> Range<usize> {
        match self {
            Region::Charset => FONT_ADDR as usize..FONT_ADDR as usize + FONT.len(),
            Region::Program => PROGRAM_ADDR as usize..MEM_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// The 4K of Chip-8 memory, with the font preloaded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mem {
    memory: Box<[u8; MEM_SIZE]>,
}

impl Mem {
    /// Constructs a new mem, with the font loaded into [Region::Charset]
    /// # Examples
    /// ```rust
    ///# use chirp_term::*;
    ///     let mem = Mem::new();
    ///     assert_eq!(0xf0, mem.read_byte(0x050u16).unwrap());
    /// ```
    pub fn new() -> Self {
        let mut mem = Mem {
            memory: Box::new([0; MEM_SIZE]),
        };
        mem.memory[Region::Charset.range()].copy_from_slice(&FONT);
        mem
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Because clippy is so kind:
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Reads the byte at `addr`
    pub fn read_byte(&self, addr: impl Into<usize>) -> Result<u8> {
        let addr = addr.into();
        self.grab(addr)
            .copied()
            .ok_or(Error::OutOfBounds { range: addr..addr + 1 })
    }

    /// Reads the big-endian word at `addr`
    /// # Examples
    /// ```rust
    ///# use chirp_term::*;
    ///# fn main() -> Result<()> {
    ///     let mut mem = Mem::new();
    ///     mem.write_range(0x200u16, &[0x12, 0x34])?;
    ///     assert_eq!(0x1234, mem.read_word(0x200u16)?);
    ///     assert!(mem.read_word(0xfffu16).is_err());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn read_word(&self, addr: impl Into<usize>) -> Result<u16> {
        let bytes = self.read_range(addr, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads `len` bytes starting at `addr`
    pub fn read_range(&self, addr: impl Into<usize>, len: usize) -> Result<&[u8]> {
        let addr = addr.into();
        let range = addr..addr + len;
        self.grab(range.clone()).ok_or(Error::OutOfBounds { range })
    }

    /// Writes a byte to `addr`
    pub fn write_byte(&mut self, addr: impl Into<usize>, data: u8) -> Result<()> {
        let addr = addr.into();
        let byte = self
            .grab_mut(addr)
            .ok_or(Error::OutOfBounds { range: addr..addr + 1 })?;
        *byte = data;
        Ok(())
    }

    /// Copies `data` into memory at `addr`. Nothing is written unless all of it fits.
    pub fn write_range(&mut self, addr: impl Into<usize>, data: &[u8]) -> Result<()> {
        let addr = addr.into();
        let range = addr..addr + data.len();
        self.grab_mut(range.clone())
            .ok_or(Error::OutOfBounds { range })?
            .copy_from_slice(data);
        Ok(())
    }

    /// Loads data into the start of a named [Region]
    ///
    /// Returns [Error::RomTooLarge] if the data doesn't fit in the region.
    /// # Examples
    /// ```rust
    ///# use chirp_term::*;
    ///# fn main() -> Result<()> {
    ///     let mut mem = Mem::new();
    ///     mem.load_region(Program, b"Hello, world!")?;
    ///     assert_eq!(b"Hello", mem.read_range(0x200u16, 5)?);
    ///     assert!(mem.load_region(Program, &[0; 0xe01]).is_err());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let range = name.range();
        if data.len() > range.len() {
            return Err(Error::RomTooLarge {
                len: data.len(),
                max: range.len(),
            });
        }
        self.write_range(range.start, data)?;
        Ok(self)
    }

    /// Loads data into a [Region] on an *owned* [Mem], for use during initialization
    pub fn load_region_owned(mut self, name: Region, data: &[u8]) -> Result<Self> {
        self.load_region(name, data)?;
        Ok(self)
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.memory[name.range()].fill(0);
        self
    }

    /// Gets a slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_is_loaded() {
        let mem = Mem::new();
        assert_eq!(mem.get_region(Region::Charset), FONT.as_slice());
        assert!(mem.get_region(Region::Program).iter().all(|&b| b == 0));
    }

    #[test]
    fn bounds() {
        let mut mem = Mem::new();
        assert!(matches!(
            mem.read_byte(0x1000usize),
            Err(Error::OutOfBounds { range }) if range == (0x1000..0x1001)
        ));
        assert!(mem.write_byte(0x1000usize, 1).is_err());
        assert!(mem.read_word(0xfffusize).is_err());
        assert!(mem.read_word(0xffeusize).is_ok());
    }

    #[test]
    fn write_range_is_all_or_nothing() {
        let mut mem = Mem::new();
        assert!(mem.write_range(0xffeusize, &[1, 2, 3]).is_err());
        assert_eq!(0, mem.read_byte(0xffeusize).unwrap());
        assert_eq!(0, mem.read_byte(0xfffusize).unwrap());
    }

    #[test]
    fn load_full_program() {
        let mut mem = Mem::new();
        mem.load_region(Region::Program, &[0xaa; 0xe00]).unwrap();
        assert_eq!(0xaa, mem.read_byte(0xfffusize).unwrap());
        mem.clear_region(Region::Program);
        assert_eq!(0, mem.read_byte(0xfffusize).unwrap());
    }

    #[test]
    fn load_too_large() {
        let mut mem = Mem::new();
        assert!(matches!(
            mem.load_region(Region::Program, &[0; 0xe01]),
            Err(Error::RomTooLarge { len: 0xe01, max: 0xe00 })
        ));
    }
}
