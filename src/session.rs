use std::{path::Path, time::Duration};

use log::{debug, info};

use crate::{
    compat::Compat,
    config::{Config, MAX_FPS},
    error::{Error, Result},
    grid::{Cell, Grid, Rect},
    pattern,
    resize::{self, offset},
};

/// Square window sizes offered by the window hotkeys.
pub static WINDOW_PRESETS: [usize; 5] = [10, 20, 30, 40, 50];

/// State a front end drives: the fixed-size board, which part of it is shown, and the
/// playback settings.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    window: Rect,
    fps: u32,
    running: bool,
    step: u64,
    compat: Compat,
}

impl Session {
    pub fn new(rows: usize, cols: usize) -> Self {
        Session {
            grid: Grid::new(rows, cols),
            window: Rect::new(rows, cols),
            fps: 1,
            running: false,
            step: 0,
            compat: Compat::default(),
        }
    }

    pub fn from_config(c: &Config) -> Result<Self> {
        let mut s = Self::new(c.size.rows(), c.size.cols());
        s.compat = c.compat;
        s.set_fps(c.fps);
        s.set_window(c.window.rows(), c.window.cols())?;
        if let Some(p) = &c.pattern {
            s.load(p)?;
            // keep the window asked for on the command line
            s.set_window(c.window.rows(), c.window.cols())?;
        }
        Ok(s)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn window(&self) -> Rect {
        self.window
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step
    }

    pub fn set_compat(&mut self, compat: Compat) {
        self.compat = compat;
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        self.grid.tick();
        self.step += 1;
        debug!("generation {} population {}", self.step, self.grid.population());
    }

    /// Starts or stops playback.
    pub fn play(&mut self) -> bool {
        self.running = !self.running;
        info!("{}", if self.running { "running" } else { "paused" });
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops playback and kills every cell.
    pub fn clear(&mut self) {
        self.running = false;
        self.step = 0;
        self.grid.clear();
        info!("grid cleared");
    }

    pub fn set_fps(&mut self, fps: u32) -> u32 {
        self.fps = fps.clamp(1, MAX_FPS);
        self.fps
    }

    /// Time between two generations while running.
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps))
    }

    pub fn set_window(&mut self, rows: usize, cols: usize) -> Result<()> {
        let w = Rect::new(rows, cols);
        let size = self.grid.size();
        if !w.fits_in(&size) || rows == 0 || cols == 0 {
            return Err(Error::WindowTooLarge {
                rows,
                cols,
                max_rows: size.rows(),
                max_cols: size.cols(),
            });
        }
        debug!("window {} -> {}", self.window, w);
        self.window = w;
        Ok(())
    }

    /// Moves to the next (or previous) preset that fits, the full grid being the last.
    pub fn cycle_window(&mut self, forward: bool) -> Rect {
        let size = self.grid.size();
        let mut sizes: Vec<Rect> = WINDOW_PRESETS
            .iter()
            .map(|&n| Rect::new(n, n))
            .filter(|r| r.fits_in(&size) && *r != size)
            .collect();
        sizes.push(size);

        let next = match sizes.iter().position(|r| *r == self.window) {
            Some(i) if forward => sizes[(i + 1) % sizes.len()],
            Some(i) => sizes[(i + sizes.len() - 1) % sizes.len()],
            None => sizes[0],
        };
        self.window = next;
        next
    }

    /// Top-left cell of the window in full grid coordinates.
    #[inline]
    pub fn window_offset(&self) -> (usize, usize) {
        let (rows, cols) = self.grid.dimensions();
        (
            offset(rows, self.window.rows()),
            offset(cols, self.window.cols()),
        )
    }

    /// The part of the grid inside the window.
    pub fn visible(&self) -> Grid {
        resize::resize(&self.grid, self.window.rows(), self.window.cols())
    }

    /// Flips the cell at window coordinates `(row, col)`.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell> {
        if !self.window.contains(row, col) {
            return Err(Error::OutOfRange {
                row,
                col,
                rows: self.window.rows(),
                cols: self.window.cols(),
            });
        }
        let (dr, dc) = self.window_offset();
        self.grid.toggle(row + dr, col + dc)
    }

    /// Replaces the grid with the pattern in `path`, centered, and shows all of it.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Rect> {
        if self.running {
            return Err(Error::Running);
        }
        let path = path.as_ref();
        let fragment = pattern::read(path)?;
        self.grid = resize::embed(&fragment, self.grid.size())?;
        self.window = self.grid.size();
        info!(
            "loaded {} pattern from {}",
            fragment.size(),
            path.display()
        );
        Ok(fragment.size())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        if self.running {
            return Err(Error::Running);
        }
        let path = path.as_ref();
        pattern::write(path, &self.grid, self.compat)?;
        info!("saved grid to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centered() {
        let mut s = Session::new(50, 50);
        s.set_window(10, 10).unwrap();
        assert_eq!(s.window_offset(), (20, 20));

        s.toggle(0, 0).unwrap();
        assert_eq!(s.grid().get(20, 20).unwrap(), 1);
        assert_eq!(s.visible().get(0, 0).unwrap(), 1);

        s.set_window(21, 30).unwrap();
        assert_eq!(s.window_offset(), (14, 10));
        assert_eq!(s.visible().get(6, 10).unwrap(), 1);
    }

    #[test]
    fn toggle_outside_window_fails() {
        let mut s = Session::new(20, 20);
        s.set_window(10, 10).unwrap();
        assert!(matches!(s.toggle(10, 0), Err(Error::OutOfRange { .. })));
        assert_eq!(s.grid().population(), 0);
    }

    #[test]
    fn window_must_fit() {
        let mut s = Session::new(20, 30);
        assert!(matches!(
            s.set_window(21, 10),
            Err(Error::WindowTooLarge { max_rows: 20, max_cols: 30, .. })
        ));
        assert!(s.set_window(0, 10).is_err());
        assert_eq!(s.window(), Rect::new(20, 30));
    }

    #[test]
    fn presets_cycle_up_to_full_grid() {
        let mut s = Session::new(35, 35);
        s.set_window(10, 10).unwrap();
        assert_eq!(s.cycle_window(true), Rect::new(20, 20));
        assert_eq!(s.cycle_window(true), Rect::new(30, 30));
        assert_eq!(s.cycle_window(true), Rect::new(35, 35));
        assert_eq!(s.cycle_window(true), Rect::new(10, 10));
        assert_eq!(s.cycle_window(false), Rect::new(35, 35));
    }

    #[test]
    fn step_clear_and_speed() {
        let mut s = Session::new(5, 5);
        for j in 1..4 {
            s.grid.set(2, j, 1).unwrap();
        }
        s.step();
        s.step();
        assert_eq!(s.step_count(), 2);
        assert_eq!(s.grid().get(2, 2).unwrap(), 3);

        assert!(s.play());
        s.clear();
        assert!(!s.running());
        assert_eq!(s.step_count(), 0);
        assert_eq!(s.grid().population(), 0);

        assert_eq!(s.set_fps(0), 1);
        assert_eq!(s.set_fps(500), MAX_FPS);
        s.set_fps(4);
        assert_eq!(s.interval(), Duration::from_millis(250));
    }

    #[test]
    fn load_and_save_refused_while_running() {
        let mut s = Session::new(5, 5);
        s.play();
        assert!(matches!(s.load("missing.cells"), Err(Error::Running)));
        assert!(matches!(s.save("missing.cells"), Err(Error::Running)));
        s.pause();
        assert!(matches!(s.load("/nonexistent/missing.cells"), Err(Error::FileRead { .. })));
    }
}
