// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Terminal plumbing: raw mode, and keys read on a background thread

use chirp_term::{Error, Input, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};
use std::{
    io::stdout,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, Receiver, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

/// Holds the terminal in raw mode, with the cursor hidden, until dropped
#[derive(Debug)]
pub struct RawMode(());

impl RawMode {
    pub fn enable() -> std::io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), Hide)?;
        Ok(RawMode(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
        let _ = disable_raw_mode();
    }
}

/// Reads keypresses from the terminal.
///
/// A thread drains crossterm's event queue, raising `stop` on Esc or Ctrl-C,
/// and forwarding every other character as its byte value.
#[derive(Debug)]
pub struct TtyInput {
    keys: Receiver<u8>,
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl TtyInput {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        let (tx, keys) = channel();
        let reader = {
            let stop = stop.clone();
            thread::spawn(move || {
                if let Err(e) = read_keys(&tx, &stop) {
                    warn!("key reader stopped: {e}");
                }
            })
        };
        TtyInput {
            keys,
            stop,
            reader: Some(reader),
        }
    }
}

/// Forwards keys until `stop` is raised, or nobody is listening
fn read_keys(tx: &Sender<u8>, stop: &AtomicBool) -> std::io::Result<()> {
    while !stop.load(Ordering::Relaxed) {
        if !poll(Duration::from_millis(50))? {
            continue;
        }
        let key = match read()? {
            Event::Key(KeyEvent { code: KeyCode::Esc, .. }) => None,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => None,
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                ..
            }) if c.is_ascii() => Some(c as u8),
            Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }) => Some(b'\r'),
            _ => continue,
        };
        match key {
            Some(key) => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            None => {
                debug!("stop requested");
                stop.store(true, Ordering::Relaxed);
            }
        }
    }
    Ok(())
}

impl Input for TtyInput {
    fn try_read_key(&mut self, timeout: Duration) -> Result<Option<u8>> {
        match self.keys.recv_timeout(timeout) {
            Ok(key) => Ok(Some(key)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::InputUnavailable {
                reason: "terminal key reader has stopped".to_owned(),
            }),
        }
    }
}

impl Drop for TtyInput {
    fn drop(&mut self) {
        // The reader notices `stop` within one poll
        self.stop.store(true, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}
