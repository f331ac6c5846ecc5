use std::path::PathBuf;

use clap::{App, Arg, ArgMatches};

use crate::{
    compat::Compat,
    error::{Error, Result},
    grid::Rect,
};

pub const MAX_FPS: u32 = 60;
pub const DEFAULT_OUT: &str = "pattern.cells";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub size: Rect,
    pub window: Rect,
    pub fps: u32,
    pub pattern: Option<PathBuf>,
    pub out: PathBuf,
    pub compat: Compat,
    pub log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: Rect::new(50, 50),
            window: Rect::new(10, 10),
            fps: 1,
            pattern: None,
            out: PathBuf::from(DEFAULT_OUT),
            compat: Compat::legacy(),
            log: None,
        }
    }
}

/// Parses `RxC`, e.g. `20x30`.
pub fn parse_size(s: &str) -> Result<Rect> {
    let bad = || Error::Config(format!("size `{s}` should look like 20x20"));
    let (r, c) = s.rsplit_once(['x', 'X']).ok_or_else(bad)?;
    let rows = r.trim().parse::<usize>().map_err(|_| bad())?;
    let cols = c.trim().parse::<usize>().map_err(|_| bad())?;
    if rows == 0 || cols == 0 {
        return Err(bad());
    }
    Ok(Rect::new(rows, cols))
}

pub fn app() -> App<'static, 'static> {
    App::new("aging_life")
        .about("Conway's Game of Life that remembers how long each cell has lived")
        .arg(
            Arg::with_name("size")
                .long("size")
                .takes_value(true)
                .value_name("RxC")
                .help("size of the full grid, fixed while running [default: 50x50]"),
        )
        .arg(
            Arg::with_name("window")
                .long("window")
                .takes_value(true)
                .value_name("RxC")
                .help("visible window, centered in the full grid [default: 10x10]"),
        )
        .arg(
            Arg::with_name("fps")
                .long("fps")
                .takes_value(true)
                .value_name("N")
                .help("generations per second while running, 1 to 60 [default: 1]"),
        )
        .arg(
            Arg::with_name("pattern")
                .long("pattern")
                .takes_value(true)
                .value_name("FILE")
                .help("plaintext pattern to load at startup"),
        )
        .arg(
            Arg::with_name("out")
                .long("out")
                .takes_value(true)
                .value_name("FILE")
                .help("where the save key writes the grid [default: pattern.cells]"),
        )
        .arg(
            Arg::with_name("fix-quirks")
                .long("fix-quirks")
                .help("grow/crop each axis on its own and save cells of any age"),
        )
        .arg(
            Arg::with_name("log")
                .long("log")
                .takes_value(true)
                .value_name("FILE")
                .help("write log records to FILE"),
        )
}

impl Config {
    pub fn from_args() -> Result<Self> {
        Self::from_matches(&app().get_matches())
    }

    pub fn from_matches(m: &ArgMatches) -> Result<Self> {
        let mut c = Config::default();

        if let Some(s) = m.value_of("size") {
            c.size = parse_size(s)?;
        }
        if let Some(s) = m.value_of("window") {
            c.window = parse_size(s)?;
        } else {
            c.window = Rect::new(
                c.window.rows().min(c.size.rows()),
                c.window.cols().min(c.size.cols()),
            );
        }
        if !c.window.fits_in(&c.size) {
            return Err(Error::Config(format!(
                "window {} is larger than the grid {}",
                c.window, c.size
            )));
        }

        if let Some(s) = m.value_of("fps") {
            c.fps = s
                .parse::<u32>()
                .ok()
                .filter(|f| (1..=MAX_FPS).contains(f))
                .ok_or_else(|| Error::Config(format!("fps `{s}` should be 1 to {MAX_FPS}")))?;
        }

        c.pattern = m.value_of("pattern").map(PathBuf::from);
        // never the --pattern file by default, a save may drop old cells
        c.out = m
            .value_of("out")
            .map_or_else(|| PathBuf::from(DEFAULT_OUT), PathBuf::from);

        if m.is_present("fix-quirks") {
            c.compat = Compat::fixed();
        }
        c.log = m.value_of("log").map(PathBuf::from);

        Ok(c)
    }
}
