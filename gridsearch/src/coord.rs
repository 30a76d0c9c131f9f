use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A cell position on a 2-D grid. `y` grows downwards, as in puzzle text.
///
/// Points order in reading order (row first, then column), which is what the
/// searches use to break ties between equally cheap states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours, in north, east, south, west order.
    pub fn neighbors4(self) -> [Point; 4] {
        Heading::ALL.map(|h| self + h.offset())
    }

    /// The eight surrounding cells, row by row.
    pub fn neighbors8(self) -> [Point; 8] {
        let mut out = [self; 8];
        let mut i = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                out[i] = self + Point::new(dx, dy);
                i += 1;
            }
        }
        out
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;
    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// A cell in 3-D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The six face-adjacent cells.
    pub fn neighbors6(self) -> [Point3; 6] {
        let Point3 { x, y, z } = self;
        [
            Point3::new(x + 1, y, z),
            Point3::new(x - 1, y, z),
            Point3::new(x, y + 1, z),
            Point3::new(x, y - 1, z),
            Point3::new(x, y, z + 1),
            Point3::new(x, y, z - 1),
        ]
    }

    pub fn min_component(self) -> i32 {
        self.x.min(self.y).min(self.z)
    }

    pub fn max_component(self) -> i32 {
        self.x.max(self.y).max(self.z)
    }
}

impl Add for Point3 {
    type Output = Point3;
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// One of the four compass directions on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Clockwise from north.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub const fn offset(self) -> Point {
        match self {
            Heading::North => Point::new(0, -1),
            Heading::East => Point::new(1, 0),
            Heading::South => Point::new(0, 1),
            Heading::West => Point::new(-1, 0),
        }
    }

    pub const fn turn_right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    pub const fn turn_left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::East => Heading::North,
            Heading::South => Heading::East,
            Heading::West => Heading::South,
        }
    }

    pub const fn reverse(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
        }
    }

    /// Parse one of `^ > v <`.
    pub fn from_arrow(b: u8) -> Option<Heading> {
        match b {
            b'^' => Some(Heading::North),
            b'>' => Some(Heading::East),
            b'v' => Some(Heading::South),
            b'<' => Some(Heading::West),
            _ => None,
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Heading::North | Heading::South)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_order() {
        let mut pts = vec![Point::new(2, 0), Point::new(0, 1), Point::new(1, 0)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(1, 0), Point::new(2, 0), Point::new(0, 1)]);
    }

    #[test]
    fn turning_round_trips() {
        for h in Heading::ALL {
            assert_eq!(h.turn_left().turn_right(), h);
            assert_eq!(h.turn_right().turn_right(), h.reverse());
            assert_eq!(h.offset() + h.reverse().offset(), Point::ORIGIN);
        }
    }

    #[test]
    fn neighbor_counts() {
        let p = Point::new(5, 5);
        assert!(p.neighbors4().iter().all(|&n| n.manhattan(p) == 1));
        assert!(!p.neighbors8().contains(&p));
        assert_eq!(Point3::new(0, 0, 0).neighbors6().len(), 6);
    }

    #[test]
    fn arrows() {
        assert_eq!(Heading::from_arrow(b'<'), Some(Heading::West));
        assert_eq!(Heading::from_arrow(b'.'), None);
    }
}
