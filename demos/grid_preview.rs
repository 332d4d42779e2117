//! Grid preview: Draw the participant grid for a given count in the terminal.
//!
//! Usage: `cargo run --example grid_preview -- [count] [padding]`
//!
//! Resize the terminal to flip between portrait and landscape layouts.
//! Press any other key to exit.

use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use stagegrid::{calculate_frames, Rect};
use std::io::{self, Write};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let count: i64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(5);
    let padding: f64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1.0);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut stdout, count, padding);

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut io::Stdout, count: i64, padding: f64) -> io::Result<()> {
    let (mut width, mut height) = terminal::size()?;
    loop {
        draw(stdout, count, padding, width, height)?;
        match event::read()? {
            Event::Resize(w, h) => {
                width = w;
                height = h;
            }
            Event::Key(_) => return Ok(()),
            _ => {}
        }
    }
}

fn draw(stdout: &mut io::Stdout, count: i64, padding: f64, width: u16, height: u16) -> io::Result<()> {
    queue!(stdout, Clear(ClearType::All))?;

    // Terminal cells are roughly twice as tall as wide. Lay out against double
    // the row count to get real screen proportions, then halve the frames.
    let frames = match calculate_frames(count, f64::from(width), f64::from(height) * 2.0, padding) {
        Ok(frames) => frames,
        Err(e) => {
            queue!(stdout, cursor::MoveTo(0, 0), Print(format!("{e}")))?;
            return stdout.flush();
        }
    };

    for (index, frame) in frames.iter().enumerate() {
        let scaled = Rect::new(frame.x, frame.y / 2.0, frame.width, frame.height / 2.0);
        draw_box(stdout, &scaled, index + 1)?;
    }
    stdout.flush()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_box(stdout: &mut io::Stdout, rect: &Rect, label: usize) -> io::Result<()> {
    let left = rect.x.round() as u16;
    let top = rect.y.round() as u16;
    let right = rect.right().round() as u16;
    let bottom = rect.bottom().round() as u16;
    if right <= left + 1 || bottom <= top + 1 {
        return Ok(());
    }

    let inner = usize::from(right - left - 2);
    queue!(stdout, cursor::MoveTo(left, top), Print(format!("┌{}┐", "─".repeat(inner))))?;
    for row in top + 1..bottom - 1 {
        queue!(stdout, cursor::MoveTo(left, row), Print("│"), cursor::MoveTo(right - 1, row), Print("│"))?;
    }
    queue!(stdout, cursor::MoveTo(left, bottom - 1), Print(format!("└{}┘", "─".repeat(inner))))?;
    queue!(
        stdout,
        cursor::MoveTo(left + 2, top + (bottom - top) / 2),
        Print(format!("#{label}"))
    )
}
