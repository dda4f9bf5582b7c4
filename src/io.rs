// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Boundaries between the interpreter and the outside world: key input and frame output

use crate::{
    error::{Error, Result},
    screen::Screen,
};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::{collections::VecDeque, io::Write, time::Duration};

/// Supplies keypresses to the interpreter
///
/// A key is a single raw byte, compared directly against register contents.
pub trait Input {
    /// Waits at most `timeout` for a key.
    ///
    /// `Ok(None)` means no key arrived in time; [Error::InputUnavailable] means the
    /// device itself failed.
    fn try_read_key(&mut self, timeout: Duration) -> Result<Option<u8>>;

    /// Waits for a key, for as long as it takes
    fn wait_key(&mut self) -> Result<u8> {
        loop {
            if let Some(key) = self.try_read_key(Duration::from_millis(100))? {
                return Ok(key);
            }
        }
    }
}

/// An [Input] that plays back a fixed script, for tests and replays
///
/// Each poll consumes one entry: a key, or an idle poll which reports no key.
/// # Examples
/// ```rust
/// # use chirp_term::*;
/// # use std::time::Duration;
/// # fn main() -> Result<()> {
/// let mut input = ScriptedInput::new(b"a").idle(1).key(b'b');
/// assert_eq!(Some(b'a'), input.try_read_key(Duration::ZERO)?);
/// assert_eq!(None, input.try_read_key(Duration::ZERO)?);
/// assert_eq!(b'b', input.wait_key()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedInput {
    script: VecDeque<Option<u8>>,
    closed: bool,
    polls: usize,
}

impl ScriptedInput {
    /// Creates a script which presses each of `keys` in turn
    pub fn new(keys: &[u8]) -> Self {
        ScriptedInput {
            script: keys.iter().copied().map(Some).collect(),
            ..Default::default()
        }
    }
    /// Appends a keypress to the script
    pub fn key(mut self, key: u8) -> Self {
        self.script.push_back(Some(key));
        self
    }
    /// Appends `polls` polls which see no key
    pub fn idle(mut self, polls: usize) -> Self {
        self.script.extend(std::iter::repeat(None).take(polls));
        self
    }
    /// Once the script runs out, report [Error::InputUnavailable] instead of no key
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }
    /// The number of times the script has been polled
    pub fn polls(&self) -> usize {
        self.polls
    }
    /// Whether the script has been played to the end
    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
    fn exhausted(&self) -> Error {
        Error::InputUnavailable {
            reason: "input script exhausted".to_owned(),
        }
    }
}

impl Input for ScriptedInput {
    fn try_read_key(&mut self, _timeout: Duration) -> Result<Option<u8>> {
        self.polls += 1;
        match self.script.pop_front() {
            Some(entry) => Ok(entry),
            None if self.closed => Err(self.exhausted()),
            None => Ok(None),
        }
    }

    fn wait_key(&mut self) -> Result<u8> {
        while let Some(entry) = self.script.pop_front() {
            self.polls += 1;
            if let Some(key) = entry {
                return Ok(key);
            }
        }
        Err(self.exhausted())
    }
}

/// Shows frames to the user
pub trait Render {
    /// Presents the current contents of the screen
    fn render(&mut self, screen: &Screen) -> Result<()>;
}

/// Renders frames as text: a clear-screen and cursor-home sequence,
/// then one line of `0`s and spaces per row
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    line_ending: &'static str,
    frames: usize,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer writing to `out`, ending lines with `\n`
    pub fn new(out: W) -> Self {
        TextRenderer {
            out,
            line_ending: "\n",
            frames: 0,
        }
    }
    /// Changes the line ending. Raw-mode terminals want `\r\n`.
    pub fn line_ending(mut self, line_ending: &'static str) -> Self {
        self.line_ending = line_ending;
        self
    }
    /// The number of frames rendered so far
    pub fn frames(&self) -> usize {
        self.frames
    }
    /// Gets the writer back
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for TextRenderer<W> {
    fn render(&mut self, screen: &Screen) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        let mut frame = String::new();
        for row in screen.rows() {
            frame.extend(row.iter().map(|&pixel| if pixel { '0' } else { ' ' }));
            frame.push_str(self.line_ending);
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_runs_dry() {
        let mut input = ScriptedInput::new(&[1]);
        assert_eq!(Some(1), input.try_read_key(Duration::ZERO).unwrap());
        assert!(input.is_exhausted());
        assert_eq!(None, input.try_read_key(Duration::ZERO).unwrap());
        assert_eq!(2, input.polls());
    }

    #[test]
    fn closed_script_fails() {
        let mut input = ScriptedInput::new(&[]).closed();
        assert!(matches!(
            input.try_read_key(Duration::ZERO),
            Err(Error::InputUnavailable { .. })
        ));
    }

    #[test]
    fn wait_key_skips_idle_polls() {
        let mut input = ScriptedInput::default().idle(3).key(7);
        assert_eq!(7, input.wait_key().unwrap());
        assert_eq!(4, input.polls());
        assert!(input.wait_key().is_err());
    }

    #[test]
    fn text_frame() {
        let mut screen = Screen::new();
        screen.draw(0, 0, &[0x80]);
        let mut renderer = TextRenderer::new(vec![]);
        renderer.render(&screen).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        // clear, home, then the grid
        let grid = out.find('0').unwrap();
        assert!(out[..grid].contains("\x1b[2J"));
        assert_eq!(screen.to_string(), out[grid..]);
    }
}
