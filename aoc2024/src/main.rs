use anyhow::{ensure, Context, Result};
use arrayvec::ArrayVec;
use bitvec::prelude::*;
use gridsearch::{bfs, bfs_to, components, dijkstra_paths, Cost, Grid, Heading, Point};
use itertools::Itertools;
use log::debug;
use puzzle_runner::Solver;

fn day10(part: u8, input: &str) -> Result<String> {
    let map = Grid::digits(input)?;
    let uphill = |&p: &Point| {
        map.neighbors4(p).into_iter().filter(|&n| map[n] == map[p] + 1).collect::<ArrayVec<_, 4>>()
    };
    let heads = map.iter().filter(|&(_, &h)| h == 0).map(|(p, _)| p).collect_vec();

    if part == 1 {
        Ok(heads.iter().map(|&head|
            bfs([head], uphill).states().iter().filter(|&&p| map[p] == 9).count()
        ).sum::<usize>().to_string())
    } else {
        // trails from a cell = trails from its uphill neighbours, so fill from the peaks down
        let mut trails = Grid::new(map.width(), map.height(), 0u64);
        for p in map.points().sorted_by_key(|&p| std::cmp::Reverse(map[p])) {
            let from_here = if map[p] == 9 {1} else {uphill(&p).iter().map(|&n| trails[n]).sum()};
            trails[p] = from_here;
        }
        Ok(heads.iter().map(|&head| trails[head]).sum::<u64>().to_string())
    }
}

fn day12(part: u8, input: &str) -> Result<String> {
    let garden = Grid::from_bytes(input)?;
    let same = |p: Point, n: Point| garden.get(n) == Some(&garden[p]);
    let regions = components(garden.points(), |&p: &Point| {
        p.neighbors4().into_iter().filter(|&n| same(p, n)).collect::<ArrayVec<_, 4>>()
    });
    debug!("{} regions", regions.len());

    Ok(regions.iter().map(|region| {
        let fences = if part == 1 {
            region.iter().map(|&p| p.neighbors4().iter().filter(|&&n| !same(p, n)).count()).sum::<usize>()
        } else {
            // a region has as many sides as corners
            region.iter().map(|&p| {
                [(1, 1), (1, -1), (-1, 1), (-1, -1)].iter().filter(|&&(dx, dy)| {
                    let across = same(p, p + Point::new(dx, 0));
                    let along = same(p, p + Point::new(0, dy));
                    let diagonal = same(p, p + Point::new(dx, dy));
                    !across && !along || across && along && !diagonal
                }).count()
            }).sum()
        };
        region.len() * fences
    }).sum::<usize>().to_string())
}

fn day16(part: u8, input: &str) -> Result<String> {
    let maze = Grid::from_bytes(input)?;
    let start = maze.find_unique(b'S')?;
    let end = maze.find_unique(b'E')?;
    let paths = dijkstra_paths([(start, Heading::East)], |&(p, h): &(Point, Heading)| {
        let mut next = ArrayVec::<_, 3>::new();
        let ahead = p + h.offset();
        if maze.get(ahead).is_some_and(|&c| c != b'#') {next.push(((ahead, h), 1))}
        next.push(((p, h.turn_left()), 1000));
        next.push(((p, h.turn_right()), 1000));
        next
    });
    debug!("{} reindeer states settled", paths.distances().len());

    let ends = Heading::ALL.map(|h| (end, h));
    let best = ends.iter().filter_map(|e| paths.get(e)).min().context("the end tile is walled off")?;
    if part == 1 {
        Ok(best.to_string())
    } else {
        let best_ends = ends.into_iter().filter(|e| paths.get(e) == Some(best));
        Ok(paths.on_paths(best_ends).iter().map(|&(p, _)| p).unique().count().to_string())
    }
}

fn escape(fallen: &[Point], size: i32) -> Option<Cost> {
    let mut corrupt = bitvec![0; (size * size) as usize];
    for p in fallen {corrupt.set((p.y * size + p.x) as usize, true)}
    let open = |p: Point| (0 .. size).contains(&p.x) && (0 .. size).contains(&p.y)
        && !corrupt[(p.y * size + p.x) as usize];
    let exit = Point::new(size - 1, size - 1);
    bfs_to(
        [Point::ORIGIN],
        |&p: &Point| p.neighbors4().into_iter().filter(|&n| open(n)).collect::<ArrayVec<_, 4>>(),
        |&p| p == exit,
    ).map(|(_, steps)| steps)
}

fn day18(part: u8, input: &str) -> Result<String> {
    let bytes = input.trim().lines().map(|line| -> Result<Point> {
        let (x, y) = line.split_once(',').with_context(|| format!("cannot parse {line} as x,y"))?;
        Ok(Point::new(x.parse()?, y.parse()?))
    }).collect::<Result<Vec<_>>>()?;
    // the worked example is a 7x7 space with 12 bytes down
    let (size, fallen) = if bytes.iter().all(|p| p.x < 7 && p.y < 7) {(7, 12)} else {(71, 1024)};
    let inside = |p: &Point| (0 .. size).contains(&p.x) && (0 .. size).contains(&p.y);
    ensure!(bytes.iter().all(inside), "byte outside the {size}x{size} memory");
    ensure!(bytes.len() >= fallen, "expected at least {fallen} bytes, got {}", bytes.len());

    if part == 1 {
        Ok(escape(&bytes[.. fallen], size).context("the exit is already cut off")?.to_string())
    } else {
        ensure!(escape(&bytes, size).is_none(), "the exit is never cut off");
        let (mut lo, mut hi) = (fallen, bytes.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            if escape(&bytes[.. mid], size).is_some() {lo = mid + 1} else {hi = mid}
        }
        debug!("byte #{} closes the last path", lo);
        Ok(bytes[lo - 1].to_string())
    }
}

fn cheats(track: &Grid<u8>, start: Point, max_cheat: i32, min_saving: Cost) -> usize {
    let dist = bfs([start], |&p: &Point| {
        track.neighbors4(p).into_iter().filter(|&n| track[n] != b'#').collect::<ArrayVec<_, 4>>()
    });
    dist.iter().map(|(&p, from_start)| {
        (-max_cheat ..= max_cheat).flat_map(|dx| {
            let reach = max_cheat - dx.abs();
            (-reach ..= reach).map(move |dy| p + Point::new(dx, dy))
        }).filter(|q| dist.get(q).is_some_and(|to|
            to >= from_start + p.manhattan(*q) as Cost + min_saving
        )).count()
    }).sum()
}

fn day20(part: u8, input: &str) -> Result<String> {
    let track = Grid::from_bytes(input)?;
    let start = track.find_unique(b'S')?;
    track.find_unique(b'E')?;
    let max_cheat = if part == 1 {2} else {20};
    let min_saving = match (track.width() < 20, part) {
        (false, _) => 100,
        (true, 1) => 20,
        (true, _) => 50,
    };
    Ok(cheats(&track, start, max_cheat, min_saving).to_string())
}

const DAYS: &[(u8, Solver)] = &[(10, day10), (12, day12), (16, day16), (18, day18), (20, day20)];

fn main() -> Result<()> {
    puzzle_runner::run(2024, DAYS, concat!(env!("CARGO_MANIFEST_DIR"), "/inputs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hoof_it() {
        let input = include_str!("../inputs/day10test1.in");
        assert_eq!(day10(1, input).unwrap(), "36");
        assert_eq!(day10(2, input).unwrap(), "81");
    }

    #[test]
    fn garden_groups() {
        let input = include_str!("../inputs/day12test1.in");
        assert_eq!(day12(1, input).unwrap(), "1930");
        assert_eq!(day12(2, input).unwrap(), "1206");
        assert_eq!(day12(1, "AAAA\nBBCD\nBBCC\nEEEC").unwrap(), "140");
        assert_eq!(day12(2, "AAAA\nBBCD\nBBCC\nEEEC").unwrap(), "80");
    }

    #[test]
    fn reindeer_maze() {
        let input = include_str!("../inputs/day16test1.in");
        assert_eq!(day16(1, input).unwrap(), "7036");
        assert_eq!(day16(2, input).unwrap(), "45");
        assert!(day16(1, "#####\n#S#E#\n#####").is_err());
    }

    #[test]
    fn ram_run() {
        let input = include_str!("../inputs/day18test1.in");
        assert_eq!(day18(1, input).unwrap(), "22");
        assert_eq!(day18(2, input).unwrap(), "6,1");
        assert!(day18(1, "1;2").is_err());
        assert!(day18(1, "-1,2").is_err());

        let off_grid = |stray: &str| std::iter::repeat("0,10").take(1023).chain([stray, "70,70"]).join("\n");
        assert!(day18(1, &off_grid("80,5")).is_err());
        assert!(day18(1, &off_grid("3,80")).is_err());
        assert_eq!(day18(1, &off_grid("9,6")).unwrap(), "140");
    }

    #[test]
    fn race_condition() {
        let input = include_str!("../inputs/day20test1.in");
        assert_eq!(day20(1, input).unwrap(), "5");
        assert_eq!(day20(2, input).unwrap(), "285");

        let track = Grid::from_bytes(input).unwrap();
        let start = track.find_unique(b'S').unwrap();
        assert_eq!(cheats(&track, start, 2, 1), 44);
        assert_eq!(cheats(&track, start, 2, 64), 1);
        assert_eq!(cheats(&track, start, 20, 76), 3);
    }
}
