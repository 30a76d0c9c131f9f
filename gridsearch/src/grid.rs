use std::fmt;
use std::ops::{Index, IndexMut};

use arrayvec::ArrayVec;

use crate::error::{Error, Result};
use crate::Point;

/// A dense rectangle of cells stored row by row.
///
/// Built once from puzzle text; most puzzles only read it afterwards, a few
/// (tilting, falling sand) mutate it in place through [`IndexMut`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    /// Parse one row per line of `text`, converting each byte with `cell`.
    ///
    /// Blank lines before the first row and after the last are ignored; spaces
    /// inside rows are cells. Every row must have the width of the first one.
    pub fn parse(text: &str, mut cell: impl FnMut(u8, Point) -> Result<T>) -> Result<Self> {
        let lines = text.lines().map(|l| l.trim_end_matches('\r')).collect::<Vec<_>>();
        let blank = |l: &str| l.trim().is_empty();
        let first = lines.iter().position(|l| !blank(*l)).unwrap_or(lines.len());
        let last = lines.iter().rposition(|l| !blank(*l)).map_or(first, |i| i + 1);

        let mut cells = Vec::with_capacity(text.len());
        let mut width = None;
        let mut height = 0;
        for (row, line) in lines[first .. last].iter().enumerate() {
            let line = line.as_bytes();
            let expected = *width.get_or_insert(line.len());
            if line.len() != expected {
                return Err(Error::RaggedRow { row, expected, found: line.len() });
            }
            for (col, &b) in line.iter().enumerate() {
                cells.push(cell(b, Point::new(col as i32, row as i32))?);
            }
            height += 1;
        }
        match width {
            Some(width) if width > 0 => Ok(Self { cells, width, height }),
            _ => Err(Error::Empty),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn idx(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| p.y as usize * self.width + p.x as usize)
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.idx(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.idx(p).map(|i| &mut self.cells[i])
    }

    /// All positions in reading order.
    pub fn points(&self) -> impl Iterator<Item = Point> + 'static {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.points().zip(self.cells.iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks(0) panics; a zero-width grid has no cells anyway
        self.cells.chunks(self.width.max(1))
    }

    /// First position, in reading order, whose cell satisfies `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Point> {
        self.iter().find_map(|(p, c)| pred(c).then_some(p))
    }

    /// In-bounds orthogonal neighbours of `p`, north first and clockwise.
    pub fn neighbors4(&self, p: Point) -> ArrayVec<Point, 4> {
        p.neighbors4().into_iter().filter(|&n| self.contains(n)).collect()
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self { cells: vec![fill; width * height], width, height }
    }
}

impl Grid<u8> {
    /// The raw characters of `text`.
    pub fn from_bytes(text: &str) -> Result<Self> {
        Self::parse(text, |b, _| Ok(b))
    }

    /// A grid of single decimal digits.
    pub fn digits(text: &str) -> Result<Self> {
        Self::parse(text, |b, at| match b {
            b'0'..=b'9' => Ok(b - b'0'),
            _ => Err(Error::UnexpectedCell { cell: b as char, at }),
        })
    }

    /// The position of the only `tile` in the grid.
    pub fn find_unique(&self, tile: u8) -> Result<Point> {
        let mut found = self.iter().filter(|&(_, &c)| c == tile).map(|(p, _)| p);
        let first = found.next().ok_or(Error::MissingTile(tile as char))?;
        match found.next() {
            None => Ok(first),
            Some(second) => Err(Error::DuplicateTile { tile: tile as char, first, second }),
        }
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        match self.idx(p) {
            Some(i) => &self.cells[i],
            None => panic!("{p} is outside a {}x{} grid", self.width, self.height),
        }
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        let (width, height) = (self.width, self.height);
        match self.idx(p) {
            Some(i) => &mut self.cells[i],
            None => panic!("{p} is outside a {width}x{height} grid"),
        }
    }
}

impl fmt::Display for Grid<u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &b in row {
                write!(f, "{}", b as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
