use anyhow::{anyhow, bail, Context, Result};
use itertools::Itertools;
use log::debug;
use puzzle_runner::Solver;

/// Inverse of `a` modulo `m`, or the common divisor that prevents one.
fn mod_inverse(a: i128, m: i128) -> Result<i128, i128> {
    let (mut prev_r, mut last_r) = (m, a.rem_euclid(m));
    let (mut prev_c, mut last_c) = (0, 1);
    while last_r != 0 {
        let q = prev_r / last_r;
        (prev_r, last_r) = (last_r, prev_r - q * last_r);
        (prev_c, last_c) = (last_c, prev_c - q * last_c);
    }
    if prev_r == 1 {Ok(prev_c.rem_euclid(m))} else {Err(prev_r)}
}

/// Earliest `t` such that bus `id` leaves at `t + offset` for every `(offset, id)`.
fn contest(buses: &[(i128, i128)]) -> Result<i128> {
    let (mut t, mut step) = (0, 1);
    for &(offset, id) in buses {
        let inv = mod_inverse(step, id).map_err(|g| anyhow!("bus {id} shares the factor {g} with an earlier bus"))?;
        let k = ((-offset - t) * inv).rem_euclid(id);
        t += step * k;
        step *= id;
    }
    Ok(t)
}

fn day13(part: u8, input: &str) -> Result<String> {
    let (earliest, schedule) = input.trim().split_once('\n').context("expected a timestamp and a schedule")?;
    let earliest: i128 = earliest.trim().parse()?;
    let buses = schedule.trim().split(',').enumerate().filter(|&(_, id)| id != "x")
        .map(|(offset, id)| -> Result<(i128, i128)> {
            let id: i128 = id.parse().with_context(|| format!("bad bus id {id}"))?;
            if id <= 0 {bail!("bus ids are positive, got {id}")}
            Ok((offset as i128, id))
        }).collect::<Result<Vec<_>>>()?;

    if part == 1 {
        let (id, wait) = buses.iter().map(|&(_, id)| (id, (id - earliest % id) % id))
            .min_by_key(|&(_, wait)| wait).context("no bus in service")?;
        debug!("bus {id} after {wait} minutes");
        Ok((id * wait).to_string())
    } else {
        debug!("contest buses: {}", buses.iter().map(|(_, id)| id).join(" "));
        Ok(contest(&buses)?.to_string())
    }
}

const DAYS: &[(u8, Solver)] = &[(13, day13)];

fn main() -> Result<()> {
    puzzle_runner::run(2020, DAYS, concat!(env!("CARGO_MANIFEST_DIR"), "/inputs"))
}
