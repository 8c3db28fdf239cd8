use anyhow::{Context, Result};
use itertools::Itertools;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {pub x: i64, pub y: i64}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {Self {x, y}}

    pub fn manhattan(self, other: Point) -> u64 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {Self {x, y}}
}

impl FromStr for Point {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = s.split_once(',').with_context(|| format!("cannot parse {:?} as x,y", s))?;
        Ok(Self {
            x: x.trim().parse().with_context(|| format!("bad x coordinate in {:?}", s))?,
            y: y.trim().parse().with_context(|| format!("bad y coordinate in {:?}", s))?,
        })
    }
}

// orders like a * b; the product of two i64 differences needs 129 bits with its sign
fn product_key(a: i128, b: i128) -> (bool, u128) {
    let magnitude = a.unsigned_abs() * b.unsigned_abs();
    if magnitude == 0 || (a < 0) == (b < 0) {(true, magnitude)} else {(false, u128::MAX - magnitude)}
}

/// Sign of the z-component of OA × OB, exact over the whole `i64` range.
/// `Greater` when O, A, B turn counter-clockwise, `Equal` when collinear.
pub fn turn(o: Point, a: Point, b: Point) -> Ordering {
    let d = |p: Point, q: Point| (q.x as i128 - p.x as i128, q.y as i128 - p.y as i128);
    let ((ax, ay), (bx, by)) = (d(o, a), d(o, b));
    product_key(ax, by).cmp(&product_key(ay, bx))
}

/// Convex hull by Andrew's monotone chain.
///
/// Vertices come out counter-clockwise starting at the lexicographically
/// smallest point. Duplicates are ignored and collinear boundary points are
/// dropped, so only strictly extreme vertices remain. Zero or one distinct
/// point is returned as is.
pub fn convex_hull(points: impl IntoIterator<Item = Point>) -> Vec<Point> {
    let points = points.into_iter().sorted_unstable().dedup().collect::<Vec<_>>();
    if points.len() <= 1 {return points}

    let mut lower: Vec<Point> = Vec::with_capacity(points.len());
    for &p in &points {
        while matches!(lower[..], [.., o, a] if turn(o, a, p) != Ordering::Greater) {lower.pop();}
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        while matches!(upper[..], [.., o, a] if turn(o, a, p) != Ordering::Greater) {upper.pop();}
        upper.push(p);
    }

    // each chain ends where the other one starts
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Lower-left and upper-right corners enclosing every point.
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let (min_x, max_x) = points.iter().map(|p| p.x).minmax().into_option()?;
    let (min_y, max_y) = points.iter().map(|p| p.y).minmax().into_option()?;
    Some((Point::new(min_x, min_y), Point::new(max_x, max_y)))
}
