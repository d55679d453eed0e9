use crate::sim::{Pacer, StopSignal};
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Alternate screen + raw mode for the lifetime of the value.
pub(crate) struct TerminalSession {
    out: io::Stdout,
    active: bool,
}

impl TerminalSession {
    pub(crate) fn begin() -> Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide, DisableLineWrap)
            .context("could not enter the alternate screen")?;
        terminal::enable_raw_mode().context("could not enable raw mode")?;
        Ok(Self { out, active: true })
    }

    /// Stdout with `\n` expanded for raw mode.
    pub(crate) fn writer(&mut self) -> RawLines<&mut io::Stdout> {
        RawLines(&mut self.out)
    }

    pub(crate) fn end(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.out, cursor::Show, EnableLineWrap, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.end();
    }
}

/// Raw mode turns off output post-processing, so a bare `\n` no longer returns
/// the carriage. This puts the `\r` back.
pub(crate) struct RawLines<W: Write>(pub(crate) W);

impl<W: Write> Write for RawLines<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for chunk in buf.split_inclusive(|&b| b == b'\n') {
            match chunk.split_last() {
                Some((&b'\n', head)) => {
                    self.0.write_all(head)?;
                    self.0.write_all(b"\r\n")?;
                }
                _ => self.0.write_all(chunk)?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Waits out the frame period while watching for q / Esc / Ctrl-C.
pub(crate) struct KeyPacer;

impl Pacer for KeyPacer {
    fn pause(&mut self, period: Duration, stop: &StopSignal) -> Result<()> {
        let end = Instant::now() + period;
        loop {
            let left = end.saturating_duration_since(Instant::now());
            if left.is_zero() || !event::poll(left)? {
                return Ok(());
            }
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if is_quit_key(k.code, k.modifiers) {
                    stop.stop();
                    return Ok(());
                }
            }
        }
    }
}

fn is_quit_key(code: KeyCode, mods: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => mods.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
