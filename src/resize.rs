use crate::{
    compat::Compat,
    error::{Error, Result},
    grid::{Grid, Rect},
};

/// Margin that centres a span of `inner` cells in a span of `outer` cells (or the
/// reverse); floor of half the difference.
#[inline]
pub fn offset(outer: usize, inner: usize) -> usize {
    outer.abs_diff(inner) / 2
}

/// Rows or columns copied along one axis.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Span {
    src: usize,
    dst: usize,
    len: usize,
}

impl Span {
    /// Grow places the old axis in the middle of the new one, shrink keeps the middle
    /// of the old axis.
    fn centered(old: usize, new: usize) -> Self {
        let d = offset(old, new);
        if new >= old {
            Span { src: 0, dst: d, len: old }
        } else {
            Span { src: d, dst: 0, len: new }
        }
    }

    /// Shrink form applied regardless of direction; a growing axis is shifted by the
    /// margin and loses whatever no longer lines up.
    fn cropped(old: usize, new: usize) -> Self {
        let d = offset(old, new);
        Span {
            src: d,
            dst: 0,
            len: new.min(old.saturating_sub(d)),
        }
    }
}

/// Same as [`resize_with`] under the legacy compatibility settings.
pub fn resize(old: &Grid, rows: usize, cols: usize) -> Grid {
    resize_with(old, rows, cols, Compat::legacy())
}

/// New `rows x cols` grid holding the centred content of `old`.
///
/// Growing on both axes (zoom-out) puts all of `old` in the middle of the new grid.
/// Otherwise (zoom-in) the middle of `old` is cut out. With
/// [`Compat::crop_mixed_resize`] a resize that grows one axis and shrinks the other
/// is handled as zoom-in on both.
pub fn resize_with(old: &Grid, rows: usize, cols: usize, compat: Compat) -> Grid {
    let (old_rows, old_cols) = old.dimensions();
    let zoom_out = rows >= old_rows && cols >= old_cols;

    let (r, c) = if compat.crop_mixed_resize && !zoom_out {
        (
            Span::cropped(old_rows, rows),
            Span::cropped(old_cols, cols),
        )
    } else {
        (
            Span::centered(old_rows, rows),
            Span::centered(old_cols, cols),
        )
    };

    let mut next = Grid::new(rows, cols);
    let src = old.rows().skip(r.src).take(r.len);
    let dst = next.rows_mut().skip(r.dst);
    for (s, d) in src.zip(dst) {
        d[c.dst..c.dst + c.len].copy_from_slice(&s[c.src..c.src + c.len]);
    }
    next
}

/// Places `fragment` in the middle of an empty grid of `size`.
pub fn embed(fragment: &Grid, size: Rect) -> Result<Grid> {
    if !fragment.size().fits_in(&size) {
        return Err(Error::Parse(format!(
            "{} pattern does not fit in the {} grid",
            fragment.size(),
            size
        )));
    }
    Ok(resize(fragment, size.rows(), size.cols()))
}
