use std::{
    io::{stdout, Stdout, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
        SetTitle,
    },
};
use log::{debug, warn};

use crate::{
    config::Config,
    grid::{is_alive, Cell},
    session::Session,
};

type Err = Box<dyn std::error::Error + Send + Sync>;
type Result<T> = std::result::Result<T, Err>;

const STATUS_LINES: u16 = 2;
const IDLE_POLL: Duration = Duration::from_millis(150);

/// Blue fading with age up to 150 generations, then red growing with age.
pub fn shade(c: Cell) -> Color {
    match c {
        0 => Color::Reset,
        1..=150 => Color::Rgb { r: 0, g: 0, b: 255 - c },
        _ => Color::Rgb { r: c, g: 0, b: 0 },
    }
}

pub struct App {
    pub session: Session,
    pub should_exit: bool,
    cursor: (usize, usize),
    message: String,
    pattern: Option<PathBuf>,
    out: PathBuf,
}

impl App {
    #[inline]
    pub fn new(session: Session, config: &Config) -> Self {
        App {
            session,
            should_exit: false,
            cursor: (0, 0),
            message: String::new(),
            pattern: config.pattern.clone(),
            out: config.out.clone(),
        }
    }

    #[inline]
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the cell under the cursor lives.
    pub fn cursor_alive(&self) -> bool {
        let (dr, dc) = self.session.window_offset();
        let (i, j) = self.cursor;
        self.session.grid().is_alive(i + dr, j + dc).unwrap_or(false)
    }

    fn say(&mut self, m: impl Into<String>) {
        self.message = m.into();
    }

    /// Keeps the cursor inside the window after it changed size.
    fn clamp_cursor(&mut self) {
        let w = self.session.window();
        self.cursor = (
            self.cursor.0.min(w.rows().saturating_sub(1)),
            self.cursor.1.min(w.cols().saturating_sub(1)),
        );
    }

    fn move_cursor(&mut self, di: isize, dj: isize) {
        let w = self.session.window();
        let (i, j) = self.cursor;
        self.cursor = (
            i.saturating_add_signed(di).min(w.rows().saturating_sub(1)),
            j.saturating_add_signed(dj).min(w.cols().saturating_sub(1)),
        );
    }

    /// Applies one key press. Failures end up on the status line.
    pub fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if code == KeyCode::Char('c') {
                self.should_exit = true;
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                let running = self.session.play();
                self.say(if running { "Running" } else { "Paused!" });
            }
            KeyCode::Char('n') if !self.session.running() => self.session.step(),
            KeyCode::Char('c') => {
                self.session.clear();
                self.say("Cleared");
            }
            KeyCode::Char('j') => {
                let f = self.session.fps().saturating_sub(1);
                self.session.set_fps(f);
            }
            KeyCode::Char('k') => {
                let f = self.session.fps() + 1;
                self.session.set_fps(f);
            }
            KeyCode::Char('[') | KeyCode::Char(']') => {
                let w = self.session.cycle_window(code == KeyCode::Char(']'));
                self.clamp_cursor();
                self.say(format!("Window {w}"));
            }
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter => {
                let (i, j) = self.cursor;
                if let Err(e) = self.session.toggle(i, j) {
                    self.say(e.to_string());
                }
            }
            KeyCode::Char('s') => {
                let r = self.session.save(&self.out);
                match r {
                    Ok(()) => self.say(format!("Saved {}", self.out.display())),
                    Err(e) => {
                        warn!("save failed: {e}");
                        self.say(format!("Save error: {e}"));
                    }
                }
            }
            KeyCode::Char('l') => match self.pattern.clone() {
                Some(p) => match self.session.load(&p) {
                    Ok(size) => {
                        self.clamp_cursor();
                        self.say(format!("Loaded {size} pattern"));
                    }
                    Err(e) => {
                        warn!("load failed: {e}");
                        self.say(format!("Load error: {e}"));
                    }
                },
                None => self.say("No pattern file given"),
            },
            _ => {}
        }
    }
}

/// Runs its closure when dropped, on early return and on unwind alike.
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

pub fn run(a: &mut App) -> Result<()> {
    let _screen = runup()?;
    draw(a)
}

fn runup() -> Result<OnDrop<fn()>> {
    execute!(std::io::stderr(), EnterAlternateScreen, SetTitle("Life a game"), Hide)?;
    let screen = OnDrop(restore as fn());
    enable_raw_mode()?;
    clear()?;
    Ok(screen)
}

fn restore() {
    if let Err(e) = shutdown() {
        warn!("could not restore the terminal: {e}");
    }
}

fn shutdown() -> Result<()> {
    execute!(std::io::stderr(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

fn draw(a: &mut App) -> Result<()> {
    let mut out = stdout();
    let mut last = Instant::now();

    while !a.should_exit {
        if a.session.running() && last.elapsed() >= a.session.interval() {
            a.session.step();
            last = Instant::now();
        }

        render(&mut out, a)?;

        let wait = if a.session.running() {
            a.session.interval().saturating_sub(last.elapsed())
        } else {
            IDLE_POLL
        };
        hotkeys(a, wait)?;
    }
    debug!("leaving after {} generations", a.session.step_count());
    Ok(())
}

fn clear() -> Result<()> {
    use terminal::{Clear, ClearType};

    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

fn render(out: &mut Stdout, a: &App) -> Result<()> {
    let (tw, th) = terminal::size()?;
    let visible = a.session.visible();
    let (ci, cj) = a.cursor;

    queue!(out, MoveTo(0, 0))?;
    for (i, row) in visible.rows().enumerate().take(th.saturating_sub(STATUS_LINES) as usize) {
        queue!(out, MoveTo(0, i as u16))?;
        for (j, c) in row.iter().enumerate().take(tw as usize / 2) {
            let glyph = if (i, j) == (ci, cj) { "[]" } else if is_alive(*c) { "##" } else { ". " };
            queue!(out, SetForegroundColor(shade(*c)), Print(glyph), ResetColor)?;
        }
        queue!(out, terminal::Clear(terminal::ClearType::UntilNewLine))?;
    }

    let s = &a.session;
    let status = format!(
        "Step : {}  Fps : {}  Window : {}  Alive : {}  Cursor : {}  {}",
        s.step_count(),
        s.fps(),
        s.window(),
        s.grid().population(),
        if a.cursor_alive() { "alive" } else { "dead" },
        if s.running() { "running" } else { "paused" },
    );
    let y = status_row(visible.size().rows(), th);
    queue!(
        out,
        MoveTo(0, y),
        terminal::Clear(terminal::ClearType::FromCursorDown),
        SetBackgroundColor(Color::Reset),
        Print(status),
        MoveTo(0, y + 1),
        Print(&a.message),
    )?;
    out.flush()?;
    Ok(())
}

/// First line below the grid, kept inside a terminal of `height` lines.
fn status_row(grid_rows: usize, height: u16) -> u16 {
    let last = height.saturating_sub(STATUS_LINES);
    // clamp before narrowing, a tall grid must not wrap around
    grid_rows.min(usize::from(last)) as u16
}

fn hotkeys(a: &mut App, wait: Duration) -> Result<()> {
    if event::poll(wait)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                a.press(key.code, key.modifiers);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let c = Config::default();
        App::new(Session::from_config(&c).unwrap(), &c)
    }

    #[test]
    fn shades_follow_age() {
        assert_eq!(shade(0), Color::Reset);
        assert_eq!(shade(1), Color::Rgb { r: 0, g: 0, b: 254 });
        assert_eq!(shade(150), Color::Rgb { r: 0, g: 0, b: 105 });
        assert_eq!(shade(151), Color::Rgb { r: 151, g: 0, b: 0 });
        assert_eq!(shade(255), Color::Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn keys_drive_the_session() {
        let mut a = app();
        let none = KeyModifiers::NONE;

        a.press(KeyCode::Right, none);
        a.press(KeyCode::Down, none);
        a.press(KeyCode::Enter, none);
        assert_eq!(a.cursor(), (1, 1));
        assert_eq!(a.session.grid().get(21, 21).unwrap(), 1);

        a.press(KeyCode::Char('n'), none);
        assert_eq!(a.session.step_count(), 1);
        assert_eq!(a.session.grid().population(), 0);

        a.press(KeyCode::Char('k'), none);
        assert_eq!(a.session.fps(), 2);
        a.press(KeyCode::Char('p'), none);
        assert!(a.session.running());
        a.press(KeyCode::Char('n'), none);
        assert_eq!(a.session.step_count(), 1);

        a.press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(a.should_exit);
    }

    #[test]
    fn cursor_stays_in_window() {
        let mut a = app();
        for _ in 0..30 {
            a.press(KeyCode::Right, KeyModifiers::NONE);
        }
        a.press(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(a.cursor(), (0, 9));

        a.press(KeyCode::Char(']'), KeyModifiers::NONE);
        a.press(KeyCode::Char('['), KeyModifiers::NONE);
        assert_eq!(a.session.window().cols(), 10);
        assert_eq!(a.cursor(), (0, 9));
    }

    #[test]
    fn status_row_clamps_tall_grids() {
        assert_eq!(status_row(10, 40), 10);
        assert_eq!(status_row(100, 40), 38);
        // 65546 would wrap to 10 if narrowed first
        assert_eq!(status_row(65_546, 40), 38);
        assert_eq!(status_row(5, 1), 0);
    }

    #[test]
    fn terminal_is_restored_on_panic() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let restored = AtomicBool::new(false);
        let r = std::panic::catch_unwind(|| {
            let _screen = OnDrop(|| restored.store(true, Ordering::SeqCst));
            panic!("render failed");
        });
        assert!(r.is_err());
        assert!(restored.load(Ordering::SeqCst));
    }

    #[test]
    fn cursor_reports_cell_state() {
        let mut a = app();
        assert!(!a.cursor_alive());
        a.press(KeyCode::Enter, KeyModifiers::NONE);
        assert!(a.cursor_alive());
        assert!(a.session.grid().is_alive(20, 20).unwrap());
    }

    #[test]
    fn load_without_pattern_reports() {
        let mut a = app();
        a.press(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(a.message(), "No pattern file given");
    }
}
