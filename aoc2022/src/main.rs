use anyhow::{bail, ensure, Context, Result};
use arrayvec::ArrayVec;
use bitvec::prelude::*;
use gridsearch::{bfs_to, flood_fill, Grid, Heading, Point, Point3};
use itertools::Itertools;
use log::debug;
use puzzle_runner::Solver;
use regex::Regex;
use rustc_hash::FxHashSet;

fn gcd(a: usize, b: usize) -> usize {if b == 0 {a} else {gcd(b, a % b)}}
fn lcm(a: usize, b: usize) -> usize {a / gcd(a, b) * b}

fn day12(part: u8, input: &str) -> Result<String> {
    let map = Grid::parse(input, |b, at| match b {
        b'a' ..= b'z' | b'S' | b'E' => Ok(b),
        _ => Err(gridsearch::Error::UnexpectedCell { cell: b as char, at }),
    })?;
    let start = map.find_unique(b'S')?;
    let summit = map.find_unique(b'E')?;
    let height = |p: Point| match map[p] {b'S' => b'a', b'E' => b'z', c => c};

    // walk down from the summit so that both parts are a single search
    let downhill = |&p: &Point| {
        map.neighbors4(p).into_iter().filter(|&n| height(n) + 1 >= height(p)).collect::<ArrayVec<_, 4>>()
    };
    let found = if part == 1 {
        bfs_to([summit], downhill, |&p| p == start)
    } else {
        bfs_to([summit], downhill, |&p| height(p) == b'a')
    };
    Ok(found.context("no trail reaches the summit")?.1.to_string())
}

struct Cave {
    blocked: BitVec,
    left: i32,
    width: i32,
    depth: i32,
}

impl Cave {
    fn parse(input: &str) -> Result<Self> {
        let paths = input.trim().lines().map(|line| {
            line.split(" -> ").map(|corner| -> Result<Point> {
                let (x, y) = corner.split_once(',').with_context(|| format!("cannot parse corner {corner}"))?;
                Ok(Point::new(x.parse()?, y.parse()?))
            }).collect::<Result<Vec<_>>>()
        }).collect::<Result<Vec<_>>>()?;
        let rocks = paths.iter().flatten().copied().collect_vec();
        let depth = rocks.iter().map(|p| p.y).max().context("no rock in the cave")?;
        ensure!(rocks.iter().all(|p| p.y >= 0), "rock above the sand source");

        // sand piles up at most depth + 2 to either side of the source
        let left = rocks.iter().map(|p| p.x).min().unwrap_or(500).min(500 - depth - 2) - 1;
        let right = rocks.iter().map(|p| p.x).max().unwrap_or(500).max(500 + depth + 2) + 1;
        let width = right - left + 1;
        let mut cave = Cave { blocked: bitvec![0; (width * (depth + 3)) as usize], left, width, depth };
        for path in &paths {
            for (a, b) in path.iter().tuple_windows() {
                ensure!(a.x == b.x || a.y == b.y, "diagonal rock path from {a} to {b}");
                for x in a.x.min(b.x) ..= a.x.max(b.x) {
                    for y in a.y.min(b.y) ..= a.y.max(b.y) {
                        let at = cave.idx(Point::new(x, y));
                        cave.blocked.set(at, true);
                    }
                }
            }
        }
        Ok(cave)
    }

    fn idx(&self, p: Point) -> usize {
        (p.y * self.width + p.x - self.left) as usize
    }

    fn is_blocked(&self, p: Point, floor: bool) -> bool {
        floor && p.y == self.depth + 2 || self.blocked[self.idx(p)]
    }

    /// Drop grains from (500, 0) until one falls past the lowest rock, or,
    /// with a floor, until the source is covered.
    fn pour(&mut self, floor: bool) -> usize {
        let source = Point::new(500, 0);
        let mut grains = 0;
        while !self.is_blocked(source, floor) {
            let mut p = source;
            loop {
                if !floor && p.y > self.depth {return grains}
                let next = [Point::new(0, 1), Point::new(-1, 1), Point::new(1, 1)].into_iter()
                    .map(|d| p + d).find(|&n| !self.is_blocked(n, floor));
                match next {
                    Some(n) => p = n,
                    None => break,
                }
            }
            let at = self.idx(p);
            self.blocked.set(at, true);
            grains += 1;
        }
        grains
    }
}

fn day14(part: u8, input: &str) -> Result<String> {
    Ok(Cave::parse(input)?.pour(part == 2).to_string())
}

struct Sensor {
    pos: Point,
    beacon: Point,
}

impl Sensor {
    fn radius(&self) -> i32 {
        self.pos.manhattan(self.beacon) as i32
    }
}

/// Merged inclusive x intervals the sensors see on `row`.
fn coverage(sensors: &[Sensor], row: i32) -> Vec<(i64, i64)> {
    let mut spans = sensors.iter().filter_map(|s| {
        let reach = (s.radius() - (s.pos.y - row).abs()) as i64;
        (reach >= 0).then(|| (s.pos.x as i64 - reach, s.pos.x as i64 + reach))
    }).collect_vec();
    spans.sort_unstable();
    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(spans.len());
    for (lo, hi) in spans {
        match merged.last_mut() {
            Some(last) if lo <= last.1 + 1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

fn day15(part: u8, input: &str) -> Result<String> {
    let re = Regex::new(r"Sensor at x=(-?\d+), y=(-?\d+): closest beacon is at x=(-?\d+), y=(-?\d+)")?;
    let sensors = input.trim().lines().map(|line| -> Result<Sensor> {
        let caps = re.captures(line).with_context(|| format!("cannot parse {line}"))?;
        Ok(Sensor {
            pos: Point::new(caps[1].parse()?, caps[2].parse()?),
            beacon: Point::new(caps[3].parse()?, caps[4].parse()?),
        })
    }).collect::<Result<Vec<_>>>()?;
    // the worked example is drawn on a much smaller map
    let small = sensors.iter().all(|s| s.pos.x.abs() < 1000 && s.pos.y.abs() < 1000);

    if part == 1 {
        let row = if small {10} else {2_000_000};
        let covered = coverage(&sensors, row).iter().map(|(lo, hi)| hi - lo + 1).sum::<i64>();
        let beacons = sensors.iter().filter(|s| s.beacon.y == row).map(|s| s.beacon.x).unique().count();
        Ok((covered - beacons as i64).to_string())
    } else {
        let limit = if small {20} else {4_000_000};
        for y in 0 ..= limit {
            let mut x = 0;
            for (lo, hi) in coverage(&sensors, y) {
                if lo > x {break}
                x = x.max(hi + 1);
            }
            if x <= limit as i64 {
                debug!("distress beacon at {x},{y}");
                return Ok((x * 4_000_000 + y as i64).to_string());
            }
        }
        bail!("every position is covered")
    }
}

fn day18(part: u8, input: &str) -> Result<String> {
    let cubes = input.trim().lines().map(|line| -> Result<Point3> {
        let coords = line.split(',').map(str::parse::<i32>).collect::<Result<Vec<_>, _>>()?;
        let [x, y, z] = coords[..] else {bail!("cannot parse {line} as x,y,z")};
        Ok(Point3::new(x, y, z))
    }).collect::<Result<FxHashSet<_>>>()?;

    let exposed = |outside: &dyn Fn(Point3) -> bool| {
        cubes.iter().flat_map(|c| c.neighbors6()).filter(|&n| outside(n)).count()
    };
    if part == 1 {
        return Ok(exposed(&|n: Point3| !cubes.contains(&n)).to_string());
    }

    let lo = cubes.iter().map(|c| c.min_component()).min().context("no cubes")? - 1;
    let hi = cubes.iter().map(|c| c.max_component()).max().context("no cubes")? + 1;
    let inside_box = |p: Point3| [p.x, p.y, p.z].iter().all(|v| (lo ..= hi).contains(v));
    let air = flood_fill([Point3::new(lo, lo, lo)], |&p: &Point3| {
        p.neighbors6().into_iter().filter(|&n| inside_box(n) && !cubes.contains(&n)).collect::<ArrayVec<_, 6>>()
    }).into_iter().collect::<FxHashSet<_>>();
    debug!("{} cells of outside air", air.len());
    Ok(exposed(&|n: Point3| air.contains(&n)).to_string())
}

struct Basin {
    valley: Grid<u8>,
    width: i32,
    height: i32,
    period: usize,
    // one frame of width x height per minute of the blizzard cycle
    storms: BitVec,
}

impl Basin {
    fn parse(input: &str) -> Result<Self> {
        let valley = Grid::parse(input, |b, at| match b {
            b'#' | b'.' | b'<' | b'>' | b'^' | b'v' => Ok(b),
            _ => Err(gridsearch::Error::UnexpectedCell { cell: b as char, at }),
        })?;
        ensure!(valley.width() > 2 && valley.height() > 2, "the valley has no inside");
        let (width, height) = (valley.width() as i32 - 2, valley.height() as i32 - 2);
        let period = lcm(width as usize, height as usize);
        let frame = (width * height) as usize;

        let mut storms = bitvec![0; period * frame];
        for (p, &c) in valley.iter() {
            let Some(heading) = Heading::from_arrow(c) else {continue};
            let p = p - Point::new(1, 1);
            for t in 0 .. period {
                let at = p + heading.offset() * t as i32;
                let cell = at.y.rem_euclid(height) * width + at.x.rem_euclid(width);
                storms.set(t * frame + cell as usize, true);
            }
        }
        Ok(Basin { valley, width, height, period, storms })
    }

    fn gate(&self, y: i32) -> Result<Point> {
        let row = self.valley.rows().nth(y as usize).context("no such row")?;
        let x = row.iter().positions(|&c| c == b'.').exactly_one()
            .map_err(|_| anyhow::anyhow!("row {y} should have exactly one gap"))?;
        Ok(Point::new(x as i32, y))
    }

    fn is_clear(&self, p: Point, phase: usize) -> bool {
        match self.valley.get(p) {
            None | Some(b'#') => false,
            _ if p.y == 0 || p.y == self.height + 1 => true,
            _ => {
                let cell = (p.y - 1) * self.width + p.x - 1;
                !self.storms[phase * (self.width * self.height) as usize + cell as usize]
            }
        }
    }

    /// Minute of arrival at `to` when leaving `from` at minute `t0`.
    fn cross(&self, from: Point, to: Point, t0: usize) -> Option<usize> {
        let moves = [Point::ORIGIN, Heading::North.offset(), Heading::East.offset(),
                     Heading::South.offset(), Heading::West.offset()];
        bfs_to([(from, t0 % self.period)], |&(p, phase): &(Point, usize)| {
            let next = (phase + 1) % self.period;
            moves.iter().map(|&d| p + d).filter(|&n| self.is_clear(n, next))
                 .map(|n| (n, next)).collect::<ArrayVec<_, 5>>()
        }, |&(p, _)| p == to).map(|(_, minutes)| t0 + minutes as usize)
    }
}

fn day24(part: u8, input: &str) -> Result<String> {
    let basin = Basin::parse(input)?;
    let start = basin.gate(0)?;
    let end = basin.gate(basin.height + 1)?;
    let mut t = basin.cross(start, end, 0).context("no way through the blizzards")?;
    if part == 2 {
        t = basin.cross(end, start, t).context("no way back for the snacks")?;
        t = basin.cross(start, end, t).context("no way through the second time")?;
    }
    Ok(t.to_string())
}

const DAYS: &[(u8, Solver)] = &[(12, day12), (14, day14), (15, day15), (18, day18), (24, day24)];

fn main() -> Result<()> {
    puzzle_runner::run(2022, DAYS, concat!(env!("CARGO_MANIFEST_DIR"), "/inputs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hill_climbing() {
        let input = include_str!("../inputs/day12test1.in");
        assert_eq!(day12(1, input).unwrap(), "31");
        assert_eq!(day12(2, input).unwrap(), "29");
        assert!(day12(1, "SbE\nzzz").is_err());
    }

    #[test]
    fn regolith_reservoir() {
        let input = include_str!("../inputs/day14test1.in");
        assert_eq!(day14(1, input).unwrap(), "24");
        assert_eq!(day14(2, input).unwrap(), "93");
        assert!(day14(1, "498,4 -> 499,5").is_err());
    }

    #[test]
    fn beacon_exclusion_zone() {
        let input = include_str!("../inputs/day15test1.in");
        assert_eq!(day15(1, input).unwrap(), "26");
        assert_eq!(day15(2, input).unwrap(), "56000011");
    }

    #[test]
    fn merging_spans() {
        let sensors = [
            Sensor { pos: Point::new(0, 0), beacon: Point::new(2, 0) },
            Sensor { pos: Point::new(4, 1), beacon: Point::new(4, 3) },
            Sensor { pos: Point::new(20, 0), beacon: Point::new(20, 1) },
        ];
        assert_eq!(coverage(&sensors, 0), vec![(-2, 5), (19, 21)]);
    }

    #[test]
    fn boiling_boulders() {
        let input = include_str!("../inputs/day18test1.in");
        assert_eq!(day18(1, input).unwrap(), "64");
        assert_eq!(day18(2, input).unwrap(), "58");
        assert_eq!(day18(1, "1,1,1\n2,1,1").unwrap(), "10");
    }

    #[test]
    fn blizzard_basin() {
        let input = include_str!("../inputs/day24test1.in");
        assert_eq!(day24(1, input).unwrap(), "18");
        assert_eq!(day24(2, input).unwrap(), "54");
    }
}
