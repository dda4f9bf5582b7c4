// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Chirp: A chip-8 interpreter in Rust
//! Hello, terminal!

mod error;
mod ui;

use chirp_term::*;
use error::Result;
use gumdrop::*;
use log::{info, LevelFilter};
use owo_colors::OwoColorize;
use std::{
    fs::File,
    io::stdout,
    path::PathBuf,
    sync::{atomic::AtomicBool, Arc},
    time::Duration,
};
use ui::*;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Chirp.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Disassemble each instruction to the log, at trace level.")]
    pub debug: bool,
    #[options(help = "Write the log to FILE instead of stderr.", meta = "FILE")]
    pub log: Option<PathBuf>,
    #[options(help = "Seed the random number generator.", meta = "N")]
    pub seed: Option<u64>,
    #[options(
        help = "How long Ex9E waits for a key, in milliseconds.",
        default = "100",
        meta = "MS"
    )]
    pub poll: u64,
}

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    init_logger(&options)?;

    let mut ch8 = Chip8::new(load_cpu(&options)?);
    let stop = Arc::new(AtomicBool::new(false));
    info!("running {}", options.file.display());

    let result = {
        let _raw = RawMode::enable()?;
        let mut input = TtyInput::new(stop.clone());
        let mut render = TextRenderer::new(stdout()).line_ending("\r\n");
        ch8.run(&mut input, &mut render, &stop)
        // the terminal is restored here
    };

    if let Err(e) = result {
        eprintln!("{}", e.bold().red());
        ch8.cpu.dump();
        std::process::exit(1);
    }
    Ok(())
}

/// Installs env_logger. `RUST_LOG` is honoured; `--debug` turns on the disassembly trace.
fn init_logger(options: &Arguments) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if options.debug {
        builder.filter_module("chirp_term", LevelFilter::Trace);
    }
    if let Some(path) = &options.log {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.try_init()?;
    Ok(())
}

/// Builds a [CPU] from the command line, and loads the ROM into it
fn load_cpu(options: &Arguments) -> Result<CPU> {
    let flags = Flags {
        debug: options.debug,
        key_poll: Duration::from_millis(options.poll),
        ..Default::default()
    };
    // Colors don't belong in a log file
    let dis = match options.log {
        Some(_) => Dis::plain(),
        None => Dis::default(),
    };
    let mut cpu = CPU::new(flags).disassembler(dis);
    if let Some(seed) = options.seed {
        cpu = cpu.seed(seed);
    }
    cpu.load_program(&options.file)?;
    Ok(cpu)
}
