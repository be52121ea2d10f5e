use std::{
    io::{Stdout, Write},
    sync::mpsc::Receiver,
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{GridEvent, Pixel};

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
/// even if the panic occurs in a different thread
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Paints grid events to the terminal as they arrive from the build.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Pixel dimension of the current bitmap
    grid_size: Option<u16>,
    /// Whether the bitmap fits the terminal; when it does not, events are
    /// drained without painting so the builder never blocks on the channel
    painting: bool,
    /// Time to wait between rendering events to pace the animation
    refresh_time: Duration,
}

impl Renderer {
    pub fn new(refresh_time: Duration) -> Self {
        Self {
            stdout: std::io::stdout(),
            grid_size: None,
            painting: true,
            refresh_time,
        }
    }

    /// Per-event delay that keeps a full build animation in the low
    /// seconds regardless of maze size. Lattice setup and carving touch
    /// on the order of 30 pixels per cell.
    pub fn calibrated_refresh_time(side: u8) -> Duration {
        let events = 30 * side as u64 * side as u64;
        Duration::from_micros((4_000_000 / events.max(1)).min(2_000))
    }

    /// Check if the terminal is large enough for the bitmap
    /// If not, display an advisory clipped to the terminal width and
    /// return Ok(false); the render loop then drains events unpainted
    fn check_size(stdout: &mut Stdout, size: u16) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        if term_width < size * Pixel::CELL_WIDTH || term_height < size {
            let msg = format!(
                "Terminal is too small ({}x{} needed) to display the maze. Resize and rerun.",
                size * Pixel::CELL_WIDTH,
                size
            );
            let (clipped, _) = msg.unicode_truncate(term_width as usize);
            queue!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(clipped.with(Color::Yellow).attribute(Attribute::Bold)),
            )?;
            stdout.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Render a single grid event to the terminal
    fn render_event(&mut self, event: &GridEvent) -> std::io::Result<()> {
        match event {
            GridEvent::Initial { pixel, size } => {
                self.grid_size = Some(*size);
                self.painting = Renderer::check_size(&mut self.stdout, *size)?;
                if !self.painting {
                    return Ok(());
                }
                self.stdout.queue(cursor::MoveTo(0, 0))?;
                for _y in 0..*size {
                    for _x in 0..*size {
                        self.stdout.queue(style::Print(pixel))?;
                    }
                    self.stdout.queue(style::Print("\r\n"))?;
                }
                self.stdout.flush()?;
            }
            GridEvent::Update {
                coord,
                old: _old,
                new,
            } => {
                if !self.painting {
                    return Ok(());
                }
                // Move the cursor to the pixel and repaint it
                queue!(
                    self.stdout,
                    cursor::MoveTo(coord.0 * Pixel::CELL_WIDTH, coord.1),
                    style::Print(new)
                )?;
                self.stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Render loop; runs until the sending side hangs up.
    pub fn render(&mut self, grid_event_rx: Receiver<GridEvent>) -> std::io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
        self.stdout.flush()?;

        loop {
            match grid_event_rx.recv() {
                Err(_e) => {
                    // Channel disconnected, the build is over
                    break;
                }
                Ok(event) => {
                    self.render_event(&event)?;
                    if self.painting {
                        std::thread::sleep(self.refresh_time);
                    }
                }
            }
        }
        // Move cursor below the maze after exiting
        if let Some(size) = self.grid_size {
            queue!(self.stdout, cursor::MoveTo(0, size))?;
            self.stdout.flush()?;
        }
        Ok(())
    }
}
