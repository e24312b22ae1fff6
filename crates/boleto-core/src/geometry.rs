//! Page geometry: quadrant rectangles and named region flags.
//!
//! A page is split into four quadrants numbered clockwise from top-right.
//! Named flags compose half-page and whole-page regions by borrowing edges
//! from individual quadrants, shrunk inward by a reduction percentage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Names accepted by [`RegionFlag::from_str`], in display order.
pub const FLAG_NAMES: [&str; 9] = [
    "all",
    "left",
    "right",
    "top",
    "bottom",
    "1-quadrant",
    "2-quadrant",
    "3-quadrant",
    "4-quadrant",
];

/// Region-of-interest selector on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionFlag {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "bottom")]
    Bottom,
    #[serde(rename = "1-quadrant")]
    Quadrant1,
    #[serde(rename = "2-quadrant")]
    Quadrant2,
    #[serde(rename = "3-quadrant")]
    Quadrant3,
    #[serde(rename = "4-quadrant")]
    Quadrant4,
}

impl RegionFlag {
    /// Which quadrant supplies, respectively, the top, bottom, left and
    /// right edge of the composed rectangle.
    const fn borrow_table(self) -> [usize; 4] {
        match self {
            RegionFlag::All => [1, 3, 3, 1],
            RegionFlag::Left => [2, 3, 2, 2],
            RegionFlag::Right => [1, 4, 1, 1],
            RegionFlag::Top => [1, 1, 2, 1],
            RegionFlag::Bottom => [3, 3, 3, 4],
            RegionFlag::Quadrant1 => [1, 1, 1, 1],
            RegionFlag::Quadrant2 => [2, 2, 2, 2],
            RegionFlag::Quadrant3 => [3, 3, 3, 3],
            RegionFlag::Quadrant4 => [4, 4, 4, 4],
        }
    }

    /// Canonical string form of the flag.
    pub fn as_str(self) -> &'static str {
        match self {
            RegionFlag::All => "all",
            RegionFlag::Left => "left",
            RegionFlag::Right => "right",
            RegionFlag::Top => "top",
            RegionFlag::Bottom => "bottom",
            RegionFlag::Quadrant1 => "1-quadrant",
            RegionFlag::Quadrant2 => "2-quadrant",
            RegionFlag::Quadrant3 => "3-quadrant",
            RegionFlag::Quadrant4 => "4-quadrant",
        }
    }
}

impl fmt::Display for RegionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionFlag {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(RegionFlag::All),
            "left" => Ok(RegionFlag::Left),
            "right" => Ok(RegionFlag::Right),
            "top" => Ok(RegionFlag::Top),
            "bottom" => Ok(RegionFlag::Bottom),
            "1-quadrant" => Ok(RegionFlag::Quadrant1),
            "2-quadrant" => Ok(RegionFlag::Quadrant2),
            "3-quadrant" => Ok(RegionFlag::Quadrant3),
            "4-quadrant" => Ok(RegionFlag::Quadrant4),
            other => Err(GeometryError::UnknownFlag(
                other.to_string(),
                FLAG_NAMES.join(", "),
            )),
        }
    }
}

/// Pixel bounds of a page region, in (row, column) space.
///
/// Bounds may be negative: a negative bound counts back from the far edge
/// of the raster the rectangle is later applied to, the way a negative
/// slice index does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Rect {
    /// Resolve the row and column spans against a raster of `rows` by
    /// `cols` pixels. Negative bounds wrap around from the far edge and
    /// everything is clamped to the raster; a degenerate span collapses
    /// to zero width.
    pub fn resolve(&self, rows: u32, cols: u32) -> ((u32, u32), (u32, u32)) {
        (
            span(self.top, self.bottom, rows),
            span(self.left, self.right, cols),
        )
    }
}

fn span(start: f64, end: f64, extent: u32) -> (u32, u32) {
    let extent = i64::from(extent);
    let norm = |v: f64| -> i64 {
        let v = v as i64;
        let v = if v < 0 { v + extent } else { v };
        v.clamp(0, extent)
    };
    let (a, b) = (norm(start), norm(end));
    if a >= b {
        (a as u32, a as u32)
    } else {
        (a as u32, b as u32)
    }
}

/// Compute the four quadrant rectangles for a page of `dims` =
/// `(rows, cols)`, shrunk inward by `reduction`.
///
/// The result is indexed by quadrant number minus one, quadrants numbered
/// clockwise from top-right. The inner column boundary moves with the
/// reduction: `(reduction + 0.5) * cols` on the right half and
/// `(reduction - 0.5) * cols` on the left half, so the left-half bound is
/// negative and resolves from the far edge.
pub fn quadrant_rects(dims: (f64, f64), reduction: f64) -> Result<[Rect; 4], GeometryError> {
    let (rows, cols) = dims;

    if !(0.0..0.5).contains(&reduction) {
        return Err(GeometryError::ReductionOutOfRange(reduction));
    }

    // Row parameters
    let sup_row = (reduction * rows).trunc();
    let inf_row = ((1.0 - reduction) * rows).trunc();
    let mid_row = (rows / 2.0).floor();

    // Column parameters
    let left_col = 0.0;
    let right_col = cols.trunc();
    let inner_right = ((reduction + 0.5) * right_col).trunc();
    let inner_left = ((reduction - 0.5) * right_col).trunc();

    Ok([
        Rect { top: sup_row, bottom: mid_row, left: inner_right, right: right_col },
        Rect { top: sup_row, bottom: mid_row, left: left_col, right: inner_left },
        Rect { top: mid_row, bottom: inf_row, left: left_col, right: inner_left },
        Rect { top: mid_row, bottom: inf_row, left: inner_right, right: right_col },
    ])
}

/// Compose the rectangle for a named flag out of the quadrant rectangles.
///
/// Pure function of its inputs; `dims` is `(rows, cols)`.
pub fn flag_rect(flag: RegionFlag, dims: (f64, f64), reduction: f64) -> Result<Rect, GeometryError> {
    let quads = quadrant_rects(dims, reduction)?;
    let [t, b, l, r] = flag.borrow_table();

    Ok(Rect {
        top: quads[t - 1].top,
        bottom: quads[b - 1].bottom,
        left: quads[l - 1].left,
        right: quads[r - 1].right,
    })
}
