use anyhow::{Context, Result};
use gridsearch::{dijkstra_to, Cost, Grid, Point};
use log::debug;
use puzzle_runner::Solver;
use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Tool {Neither, Torch, Gear}

impl Tool {
    const ALL: [Tool; 3] = [Tool::Neither, Tool::Torch, Tool::Gear];

    // rocky rules out neither, wet the torch, narrow the gear
    fn fits(self, region: u64) -> bool {
        self as u64 != region
    }
}

struct ModeMaze {
    target: Point,
    regions: Grid<u64>,
}

impl ModeMaze {
    fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(r"depth: (\d+)\s+target: (\d+),(\d+)")?;
        let caps = re.captures(input).context("expected depth and target lines")?;
        let depth: u64 = caps[1].parse()?;
        let target = Point::new(caps[2].parse()?, caps[3].parse()?);
        Ok(Self::new(depth, target))
    }

    /// Surveys the target's rectangle plus room to walk around it.
    fn new(depth: u64, target: Point) -> Self {
        const MARGIN: usize = 100;
        let (w, h) = (target.x as usize + MARGIN, target.y as usize + MARGIN);
        let mut erosion = Grid::new(w, h, 0u64);
        for p in erosion.points() {
            let geologic = match (p.x, p.y) {
                _ if p == Point::ORIGIN || p == target => 0,
                (x, 0) => x as u64 * 16807,
                (0, y) => y as u64 * 48271,
                _ => erosion[p - Point::new(1, 0)] * erosion[p - Point::new(0, 1)],
            };
            erosion[p] = (geologic + depth) % 20183;
        }
        ModeMaze { target, regions: erosion.map(|e| e % 3) }
    }

    fn risk(&self) -> u64 {
        self.regions.iter().filter(|(p, _)| p.x <= self.target.x && p.y <= self.target.y).map(|(_, &r)| r).sum()
    }

    fn rescue(&self) -> Option<Cost> {
        dijkstra_to([(Point::ORIGIN, Tool::Torch)], |&(p, tool): &(Point, Tool)| {
            let here = self.regions[p];
            let switch = Tool::ALL.into_iter().filter(move |&t| t != tool && t.fits(here)).map(move |t| ((p, t), 7));
            let walk = self.regions.neighbors4(p).into_iter()
                .filter(move |&n| tool.fits(self.regions[n])).map(move |n| ((n, tool), 1));
            switch.chain(walk).collect::<Vec<_>>()
        }, |&s| s == (self.target, Tool::Torch)).map(|(_, minutes)| minutes)
    }
}

fn day22(part: u8, input: &str) -> Result<String> {
    let cave = ModeMaze::parse(input)?;
    if part == 1 {
        Ok(cave.risk().to_string())
    } else {
        debug!("surveyed {}x{} regions", cave.regions.width(), cave.regions.height());
        Ok(cave.rescue().context("the target cannot be reached")?.to_string())
    }
}

const DAYS: &[(u8, Solver)] = &[(22, day22)];

fn main() -> Result<()> {
    puzzle_runner::run(2018, DAYS, concat!(env!("CARGO_MANIFEST_DIR"), "/inputs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROCKY: u64 = 0;
    const NARROW: u64 = 2;

    #[test]
    fn mode_maze() {
        let input = include_str!("../inputs/day22test1.in");
        assert_eq!(day22(1, input).unwrap(), "114");
        assert_eq!(day22(2, input).unwrap(), "45");
        assert!(day22(1, "depth: 510").is_err());
    }

    #[test]
    fn region_types() {
        let cave = ModeMaze::new(510, Point::new(10, 10));
        assert_eq!(cave.regions[Point::ORIGIN], ROCKY);
        assert_eq!(cave.regions[Point::new(1, 1)], NARROW);
        assert_eq!(cave.regions[Point::new(10, 10)], ROCKY);
        assert!(Tool::Torch.fits(NARROW) && !Tool::Gear.fits(NARROW) && !Tool::Neither.fits(ROCKY));
    }
}
