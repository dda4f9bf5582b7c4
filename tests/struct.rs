//! Testing methods on chirp-term's structs
use chirp_term::*;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    ops::Range,
    time::Duration,
};

#[test]
fn chip8() {
    let ch8 = Chip8::default(); // Default
    let ch82 = ch8.clone(); // Clone
    assert_eq!(ch8.cpu.pc(), ch82.cpu.pc());
    assert_eq!(ch8.screen, ch82.screen); // PartialEq
    println!("{ch8:?}"); // Debug
}

mod error {
    use super::*;
    #[test]
    fn display() {
        let error = Error::UnknownOpcode {
            pc: 0x200,
            word: 0x8fff,
        };
        assert_eq!("opcode 8fff at 200 not recognized", error.to_string());
        println!("{error:?}");
    }
    #[test]
    fn halted() {
        let error = Error::Halted {
            addr: 0x2a4,
            word: 0x00ee,
            source: Box::new(Error::StackUnderflow { pc: 0x2a4 }),
        };
        assert_eq!(
            "halted at 2a4 (00ee): stack underflow returning from 2a4",
            error.to_string()
        );
        // the cause is reachable through the standard error chain
        let source = std::error::Error::source(&error).expect("Halted has a source");
        assert_eq!("stack underflow returning from 2a4", source.to_string());
    }
    #[test]
    fn out_of_bounds() {
        let range: Range<usize> = 0xfff..0x1001;
        println!("{}", Error::OutOfBounds { range });
    }
    #[test]
    fn from_io() {
        let error: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(error, Error::IoError(_)));
    }
}

mod region {
    use super::*;
    //  #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[test]
    fn copy() {
        let r1 = Program;
        let r2 = r1;
        assert_eq!(r1, r2);
    }
    #[test]
    fn display() {
        assert_eq!("Charset Program", format!("{Charset} {Program}"));
    }
    #[test]
    fn debug() {
        println!("{Charset:?}{Program:?}");
    }
    #[test]
    fn ord() {
        assert!(Charset < Program);
        assert_eq!(Program, Charset.max(Program));
    }
    #[test]
    fn ranges() {
        assert_eq!(0x050..0x0a0, Charset.range());
        assert_eq!(0x200..0x1000, Program.range());
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Program.hash(&mut hasher);
        println!("{:x}", hasher.finish());
    }
}

mod mem {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Mem::default(), Mem::new());
    }
    #[test]
    fn len() {
        let mem = Mem::new();
        assert_eq!(0x1000, mem.len());
        assert!(!mem.is_empty());
    }
    #[test]
    fn grab() {
        let mem = Mem::new();
        assert_eq!(Some(&[0xf0, 0x90][..]), mem.grab(0x050..0x052));
        assert_eq!(None, mem.grab(0xfff..0x1001));
    }
    #[test]
    fn load_region_owned() -> Result<()> {
        let mem = Mem::new().load_region_owned(Program, &[0x12, 0x00])?;
        assert_eq!(0x1200, mem.read_word(0x200u16)?);
        Ok(())
    }
}

mod cpu {
    use super::*;
    #[test]
    fn default() {
        let cpu = CPU::default();
        assert_eq!(0x200, cpu.pc());
        assert_eq!(0, cpu.i());
        assert_eq!(0, cpu.sp());
        assert_eq!([0; 16], cpu.v());
        assert_eq!((0, 0), (cpu.delay(), cpu.sound()));
        assert!(!cpu.sound_active());
    }
    #[test]
    fn clone() {
        let cpu = CPU::default().seed(1);
        let cpu2 = cpu.clone();
        assert_eq!(cpu.mem(), cpu2.mem());
    }
    #[test]
    fn debug() {
        println!("{:?}", CPU::default());
    }
    #[test]
    fn rom_too_large() {
        let mut cpu = CPU::default();
        assert!(matches!(
            cpu.load_program_bytes(&[0; 0xe01]),
            Err(Error::RomTooLarge { len: 0xe01, .. })
        ));
    }
    #[test]
    fn load_program_clears_old_program() -> Result<()> {
        let mut cpu = CPU::default();
        cpu.load_program_bytes(&[0xff; 0x10])?;
        cpu.load_program_bytes(&[0x00, 0xe0])?;
        assert_eq!([0x00, 0xe0, 0x00, 0x00], cpu.mem().read_range(0x200u16, 4)?);
        Ok(())
    }
    #[test]
    fn load_program_missing_file() {
        let mut cpu = CPU::default();
        assert!(matches!(
            cpu.load_program("this/rom/does/not/exist.ch8"),
            Err(Error::IoError(_))
        ));
    }
    #[test]
    fn mem_mut() -> Result<()> {
        let mut cpu = CPU::default();
        cpu.mem_mut().write_byte(0x300u16, 0xab)?;
        assert_eq!(0xab, cpu.mem().read_byte(0x300u16)?);
        Ok(())
    }
}

mod flags {
    use super::*;
    //#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[test]
    fn default() {
        let flags = Flags::default();
        assert!(!flags.debug && !flags.keypause);
        assert_eq!(Duration::from_millis(100), flags.key_poll);
        assert_eq!(Duration::from_millis(10), flags.key_wait);
    }
    #[test]
    fn debug_toggles() {
        let mut flags = Flags::default();
        flags.debug();
        assert!(flags.debug);
        flags.debug();
        assert!(!flags.debug);
    }
    #[test]
    fn ord() {
        let on = Flags {
            debug: true,
            ..Default::default()
        };
        assert!(Flags::default() < on);
        assert_eq!(on, Flags::default().max(on.clone()));
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Flags::default().hash(&mut hasher);
        println!("{:x}", hasher.finish());
    }
}

mod insn {
    use super::*;
    #[test]
    fn display() {
        assert_eq!("call   2a4", Insn::call { A: 0x2a4 }.to_string());
        assert_eq!("mov    #42, v3", Insn::movb { B: 0x42, x: 3 }.to_string());
        assert_eq!("bcd    vE, &I", Insn::bcd { x: 0xe }.to_string());
    }
    #[test]
    fn exact_decode() {
        assert_eq!(Some(Insn::cls), Insn::from_word(0x00e0));
        assert_eq!(Some(Insn::ret), Insn::from_word(0x00ee));
        assert_eq!(None, Insn::from_word(0x00e1));
        assert_eq!(Some(Insn::add { y: 2, x: 1 }), Insn::from_word(0x8124));
        assert_eq!(None, Insn::from_word(0x8125));
        assert_eq!(None, Insn::from_word(0x5121));
        assert_eq!(Some(Insn::sek { B: 0xa1, x: 4 }), Insn::from_word(0xe4a1));
    }
}

mod dis {
    use super::*;
    #[test]
    fn colored_output_contains_mnemonic() {
        let dis = Dis::default();
        assert!(dis.once(0x00e0).contains("cls"));
        assert!(dis.once(0x0000).contains("inval  0000"));
    }
    #[test]
    #[allow(clippy::clone_on_copy)]
    fn clone() {
        let dis = Dis::plain();
        assert_eq!(dis, dis.clone());
    }
}

mod screen {
    use super::*;
    #[test]
    fn default() {
        let screen = Screen::default();
        assert_eq!(64 * 32, screen.as_slice().len());
        assert_eq!(32, screen.rows().count());
        assert!(!screen.is_dirty());
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Screen::default().hash(&mut hasher);
        println!("{:x}", hasher.finish());
    }
}

mod scripted_input {
    use super::*;
    #[test]
    fn clone() {
        let input = ScriptedInput::new(b"abc").idle(2);
        assert_eq!(input, input.clone());
    }
    #[test]
    fn default_is_empty() {
        assert!(ScriptedInput::default().is_exhausted());
    }
}
