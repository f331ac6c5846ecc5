//! Plaintext pattern files.
//!
//! ```text
//! !Name: blinker
//! ...
//! OOO
//! ...
//! ```
//!
//! Lines starting with `!` are comments. Every other non-empty line is a row, `.` dead
//! and `O` alive. Rows are read right to left and short rows are padded on the left, so
//! the grid holds the file mirrored; [`serialize`] mirrors back when writing.

use std::{fs, path::Path};

use crate::{
    compat::Compat,
    error::{Error, Result},
    grid::{is_alive, Cell, Grid, DEAD, NEWBORN},
};

pub const COMMENT: char = '!';
pub const ALIVE: char = 'O';
pub const EMPTY: char = '.';

#[inline]
fn symbol(c: char) -> Option<Cell> {
    match c {
        EMPTY => Some(DEAD),
        ALIVE => Some(NEWBORN),
        _ => None,
    }
}

/// Smallest grid holding every row of `text`; `0x0` when there are none.
///
/// Characters other than `.` and `O` are dropped without a placeholder, so a row
/// containing them ends up shifted.
pub fn parse(text: &str) -> Grid {
    let mut data: Vec<Vec<Cell>> = vec![];
    let mut cols = 0;

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        cols = cols.max(line.chars().count());
        data.push(line.chars().rev().filter_map(symbol).collect());
    }

    let mut g = Grid::new(data.len(), cols);
    for (src, dst) in data.iter().zip(g.rows_mut()) {
        dst[cols - src.len()..].copy_from_slice(src);
    }
    g
}

/// Text of `grid` with a `!Name:` header.
pub fn serialize(grid: &Grid, name: &str, compat: Compat) -> String {
    let (rows, cols) = grid.dimensions();
    let mut s = String::with_capacity(name.len() + 8 + rows * (cols + 1));

    s.push(COMMENT);
    s.push_str("Name: ");
    s.push_str(name);
    s.push('\n');

    for row in grid.rows() {
        for &c in row.iter().rev() {
            let alive = if compat.save_newborn_only {
                c == NEWBORN
            } else {
                is_alive(c)
            };
            s.push(if alive { ALIVE } else { EMPTY });
        }
        s.push('\n');
    }
    s
}

pub fn read(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes)
        .map_err(|_| Error::Parse(format!("{} is not a text file", path.display())))?;
    Ok(parse(&text))
}

pub fn write(path: impl AsRef<Path>, grid: &Grid, compat: Compat) -> Result<()> {
    let path = path.as_ref();
    let text = serialize(grid, &path.display().to_string(), compat);
    fs::write(path, text).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let g = parse("!Name: blinker\n!\n...\n\nOOO\n...\n");
        assert_eq!(g.dimensions(), (3, 3));
        assert_eq!(g.population(), 3);
        assert_eq!(g.get(1, 0).unwrap(), 1);
    }

    #[test]
    fn rows_are_mirrored_and_left_padded() {
        let g = parse("O\n.O..\nOO\n");
        assert_eq!(g.dimensions(), (3, 4));
        let rows: Vec<Vec<Cell>> = g.rows().map(<[Cell]>::to_vec).collect();
        assert_eq!(
            rows,
            vec![vec![0, 0, 0, 1], vec![0, 0, 1, 0], vec![0, 0, 1, 1]]
        );
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let g = parse("!x\r\nO.\r\n.O");
        assert_eq!(g.dimensions(), (2, 2));
        assert_eq!(g.get(0, 1).unwrap(), 1);
        assert_eq!(g.get(1, 0).unwrap(), 1);
    }

    #[test]
    fn unknown_characters_shift_the_row() {
        let g = parse("O.x\n...\n");
        assert_eq!(g.dimensions(), (2, 3));
        // "x" is dropped: reversed [., O] padded to [0, 0, 1]
        assert_eq!(g.get(0, 2).unwrap(), 1);
    }

    #[test]
    fn nothing_to_read() {
        assert_eq!(parse("").dimensions(), (0, 0));
        assert_eq!(parse("!only\n!comments\n").dimensions(), (0, 0));
    }

    #[test]
    fn serialize_header_and_glyphs() {
        let mut g = Grid::new(2, 3);
        g.set(0, 0, 1).unwrap();
        g.set(1, 2, 9).unwrap();
        assert_eq!(
            serialize(&g, "glider.cells", Compat::legacy()),
            "!Name: glider.cells\n..O\n...\n"
        );
        assert_eq!(
            serialize(&g, "glider.cells", Compat::fixed()),
            "!Name: glider.cells\n..O\nO..\n"
        );
    }

    #[test]
    fn newborn_cells_survive_a_round_trip() {
        let mut g = Grid::new(3, 4);
        for (i, j) in [(0, 0), (0, 3), (1, 1), (2, 2)] {
            g.set(i, j, 1).unwrap();
        }
        assert_eq!(parse(&serialize(&g, "x", Compat::legacy())), g);
    }

    #[test]
    fn legacy_save_drops_old_cells() {
        let mut g = Grid::new(1, 2);
        g.set(0, 0, 1).unwrap();
        g.set(0, 1, 4).unwrap();

        let back = parse(&serialize(&g, "x", Compat::legacy()));
        assert_eq!(back.get(0, 0).unwrap(), 1);
        assert_eq!(back.get(0, 1).unwrap(), 0);

        let back = parse(&serialize(&g, "x", Compat::fixed()));
        assert_eq!(back.population(), 2);
    }
}
