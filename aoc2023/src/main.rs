use std::ops::Range;

use anyhow::{bail, ensure, Context, Result};
use gridsearch::{dijkstra_to, Cost, Grid, Heading, Point};
use itertools::Itertools;
use log::debug;
use puzzle_runner::Solver;
use rustc_hash::FxHashMap;

fn convert(map: &[(Range<u64>, u64)], mut todo: Vec<Range<u64>>) -> Vec<Range<u64>> {
    let mut done = Vec::with_capacity(todo.len());
    'todo: while let Some(r) = todo.pop() {
        for (src, dst) in map {
            let lo = r.start.max(src.start);
            let hi = r.end.min(src.end);
            if lo < hi {
                done.push(lo - src.start + dst .. hi - src.start + dst);
                if r.start < lo {todo.push(r.start .. lo)}
                if hi < r.end {todo.push(hi .. r.end)}
                continue 'todo;
            }
        }
        done.push(r);
    }
    done
}

fn day5(part: u8, input: &str) -> Result<String> {
    let mut blocks = input.trim().split("\n\n");
    let seeds = blocks.next().and_then(|line| line.strip_prefix("seeds:")).context("no seeds line")?
        .split_whitespace().map(str::parse::<u64>).collect::<Result<Vec<_>, _>>()?;
    let maps = blocks.map(|block| block.lines().skip(1).map(|line| -> Result<_> {
        let nums = line.split_whitespace().map(str::parse::<u64>).collect::<Result<Vec<_>, _>>()?;
        let [dst, src, len] = nums[..] else {bail!("cannot parse {line} as a mapping")};
        Ok((src .. src + len, dst))
    }).collect::<Result<Vec<_>>>()).collect::<Result<Vec<_>>>()?;

    let mut ranges = if part == 1 {
        seeds.iter().map(|&s| s .. s + 1).collect_vec()
    } else {
        ensure!(seeds.len() % 2 == 0, "seed ranges come in pairs");
        seeds.iter().tuples().map(|(&start, &len)| start .. start + len).collect_vec()
    };
    for map in &maps {
        ranges = convert(map, ranges);
    }
    Ok(ranges.iter().map(|r| r.start).min().context("no seeds")?.to_string())
}

fn extrapolate(history: &[i64]) -> i64 {
    if history.iter().all(|&v| v == 0) {return 0}
    let diffs = history.iter().tuple_windows().map(|(a, b)| b - a).collect_vec();
    history[history.len() - 1] + extrapolate(&diffs)
}

fn day9(part: u8, input: &str) -> Result<String> {
    let mut total = 0;
    for line in input.trim().lines() {
        let mut history = line.split_whitespace().map(str::parse::<i64>).collect::<Result<Vec<_>, _>>()?;
        if part == 2 {history.reverse()}
        total += extrapolate(&history);
    }
    Ok(total.to_string())
}

fn arrangements(springs: &[u8], groups: &[usize]) -> u64 {
    // ways[i][j]: arrangements of springs[i ..] into groups[j ..]; row n + 1 is
    // where a group that ends the row lands after its separator
    let (n, m) = (springs.len(), groups.len());
    let mut ways = vec![vec![0u64; m + 1]; n + 2];
    ways[n][m] = 1;
    ways[n + 1][m] = 1;
    for i in (0 .. n).rev() {
        for j in 0 ..= m {
            let mut w = 0;
            if springs[i] != b'#' {w += ways[i + 1][j]}
            if springs[i] != b'.' && j < m {
                let end = i + groups[j];
                if end <= n && !springs[i .. end].contains(&b'.') && springs.get(end) != Some(&b'#') {
                    w += ways[end + 1][j + 1];
                }
            }
            ways[i][j] = w;
        }
    }
    ways[0][0]
}

fn day12(part: u8, input: &str) -> Result<String> {
    let mut total = 0;
    for line in input.trim().lines() {
        let (springs, groups) = line.split_once(' ').with_context(|| format!("cannot parse {line}"))?;
        ensure!(springs.bytes().all(|b| matches!(b, b'.' | b'#' | b'?')), "unexpected spring in {springs}");
        let groups = groups.split(',').map(str::parse::<usize>).collect::<Result<Vec<_>, _>>()?;
        total += if part == 1 {
            arrangements(springs.as_bytes(), &groups)
        } else {
            let springs = std::iter::repeat(springs).take(5).join("?");
            arrangements(springs.as_bytes(), &groups.repeat(5))
        };
    }
    Ok(total.to_string())
}

fn tilt(dish: &mut Grid<u8>, toward: Heading) {
    let (w, h) = (dish.width() as i32, dish.height() as i32);
    let (lines, len) = if toward.is_vertical() {(w, h)} else {(h, w)};
    for line in 0 .. lines {
        // k counts away from the edge the rocks roll towards
        let cell = |k: i32| match toward {
            Heading::North => Point::new(line, k),
            Heading::South => Point::new(line, h - 1 - k),
            Heading::West => Point::new(k, line),
            Heading::East => Point::new(w - 1 - k, line),
        };
        let mut free = 0;
        for k in 0 .. len {
            match dish[cell(k)] {
                b'#' => free = k + 1,
                b'O' => {
                    dish[cell(k)] = b'.';
                    dish[cell(free)] = b'O';
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

fn north_load(dish: &Grid<u8>) -> usize {
    dish.iter().filter(|&(_, &c)| c == b'O').map(|(p, _)| dish.height() - p.y as usize).sum()
}

fn day14(part: u8, input: &str) -> Result<String> {
    let mut dish = Grid::parse(input, |b, at| match b {
        b'.' | b'#' | b'O' => Ok(b),
        _ => Err(gridsearch::Error::UnexpectedCell { cell: b as char, at }),
    })?;
    if part == 1 {
        tilt(&mut dish, Heading::North);
        return Ok(north_load(&dish).to_string());
    }

    const SPINS: usize = 1_000_000_000;
    let mut seen: FxHashMap<Grid<u8>, usize> = FxHashMap::default();
    let mut loads: Vec<usize> = vec![];
    let mut i = 0;
    loop {
        if let Some(&start) = seen.get(&dish) {
            debug!("spin {} repeats spin {}", i, start);
            return Ok(loads[start + (SPINS - start) % (i - start)].to_string());
        }
        loads.push(north_load(&dish));
        seen.insert(dish.clone(), i);
        for toward in [Heading::North, Heading::West, Heading::South, Heading::East] {
            tilt(&mut dish, toward);
        }
        i += 1;
    }
}

fn heat_loss(city: &Grid<u8>, min_run: u8, max_run: u8) -> Option<Cost> {
    let goal = Point::new(city.width() as i32 - 1, city.height() as i32 - 1);
    let starts = [(Point::ORIGIN, Heading::East, 0), (Point::ORIGIN, Heading::South, 0)];
    dijkstra_to(starts, |&(p, h, run): &(Point, Heading, u8)| {
        let mut next = Vec::with_capacity(3);
        for (nh, nrun) in [(h, run + 1), (h.turn_left(), 1), (h.turn_right(), 1)] {
            if nh != h && run < min_run || nrun > max_run {continue}
            let np = p + nh.offset();
            if let Some(&loss) = city.get(np) {next.push(((np, nh, nrun), loss as Cost))}
        }
        next
    }, |&(p, _, run)| p == goal && run >= min_run).map(|(_, loss)| loss)
}

fn day17(part: u8, input: &str) -> Result<String> {
    let city = Grid::digits(input)?;
    let (min_run, max_run) = if part == 1 {(1, 3)} else {(4, 10)};
    Ok(heat_loss(&city, min_run, max_run).context("the crucible cannot reach the factory")?.to_string())
}

const DAYS: &[(u8, Solver)] = &[(5, day5), (9, day9), (12, day12), (14, day14), (17, day17)];

fn main() -> Result<()> {
    puzzle_runner::run(2023, DAYS, concat!(env!("CARGO_MANIFEST_DIR"), "/inputs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_locations() {
        let input = include_str!("../inputs/day5test1.in");
        assert_eq!(day5(1, input).unwrap(), "35");
        assert_eq!(day5(2, input).unwrap(), "46");
    }

    #[test]
    fn range_splitting() {
        let map = [(10 .. 20, 100)];
        let mut out = convert(&map, vec![5 .. 25]);
        out.sort_by_key(|r| r.start);
        assert_eq!(out, vec![5 .. 10, 20 .. 25, 100 .. 110]);
    }

    #[test]
    fn mirage_maintenance() {
        let input = include_str!("../inputs/day9test1.in");
        assert_eq!(day9(1, input).unwrap(), "114");
        assert_eq!(day9(2, input).unwrap(), "2");
        assert_eq!(extrapolate(&[10, 13, 16, 21, 30, 45]), 68);
    }

    #[test]
    fn hot_springs() {
        let input = include_str!("../inputs/day12test1.in");
        assert_eq!(day12(1, input).unwrap(), "21");
        assert_eq!(day12(2, input).unwrap(), "525152");
        assert_eq!(arrangements(b"?###????????", &[3, 2, 1]), 10);
        assert_eq!(arrangements(b"#.#", &[1]), 0);
        assert!(day12(1, "??x 1").is_err());
    }

    #[test]
    fn reflector_dish() {
        let input = include_str!("../inputs/day14test1.in");
        assert_eq!(day14(1, input).unwrap(), "136");
        assert_eq!(day14(2, input).unwrap(), "64");
    }

    #[test]
    fn tilting_stops_at_cubes() {
        let mut dish = Grid::from_bytes(".O#.O").unwrap();
        tilt(&mut dish, Heading::West);
        assert_eq!(dish.to_string(), "O.#O.\n");
        tilt(&mut dish, Heading::East);
        assert_eq!(dish.to_string(), ".O#.O\n");
    }

    #[test]
    fn clumsy_crucible() {
        let input = include_str!("../inputs/day17test1.in");
        assert_eq!(day17(1, input).unwrap(), "102");
        assert_eq!(day17(2, input).unwrap(), "94");
        assert_eq!(day17(2, include_str!("../inputs/day17test2.in")).unwrap(), "71");
    }
}
