//! Day 6: Wait For It

use anyhow::Result;
use num::integer::Roots;

use crate::{parse_numbers, Error};

fn beats(time: u64, record: u64, hold: u64) -> bool {
    u128::from(hold) * u128::from(time - hold) > u128::from(record)
}

/// Number of hold times in `0..=time` that travel further than `record`.
///
/// The distance `hold * (time - hold)` is a parabola symmetric around `time / 2`, so only the
/// smallest winning hold time is searched for; it sits right above the lower root.
fn ways_to_win(time: u64, record: u64) -> u64 {
    let squared = u128::from(time) * u128::from(time);
    let Some(discriminant) = squared.checked_sub(4 * u128::from(record)) else {
        return 0;
    };
    let root = discriminant.sqrt() as u64;

    let mut low = (time - root.min(time)) / 2;
    while low > 0 && beats(time, record, low - 1) {
        low -= 1;
    }
    while low <= time / 2 && !beats(time, record, low) {
        low += 1;
    }
    if low > time / 2 {
        return 0;
    }
    time - 2 * low + 1
}

fn row<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    label: &str,
) -> Result<(usize, &'a str), Error> {
    let (idx, line) = lines
        .next()
        .ok_or_else(|| Error::parse(0, format!("missing {:?} line", label)))?;
    line.strip_prefix(label)
        .map(|rest| (idx, rest))
        .ok_or_else(|| Error::parse(idx, format!("expected {:?}", label)))
}

fn table(input: &str) -> Result<[(usize, &str); 2], Error> {
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    Ok([row(&mut lines, "Time:")?, row(&mut lines, "Distance:")?])
}

pub fn part1(input: &str) -> Result<u64> {
    let [(time_idx, times), (record_idx, records)] = table(input)?;
    let times = parse_numbers(time_idx, times)?;
    let records = parse_numbers(record_idx, records)?;
    if times.len() != records.len() {
        return Err(Error::parse(record_idx, "expected one distance per race").into());
    }
    Ok(times
        .iter()
        .zip(&records)
        .map(|(&time, &record)| ways_to_win(time, record))
        .product())
}

pub fn part2(input: &str) -> Result<u64> {
    let [(time_idx, times), (record_idx, records)] = table(input)?;
    let time = parse_numbers(time_idx, &times.replace(' ', ""))?;
    let record = parse_numbers(record_idx, &records.replace(' ', ""))?;
    match (time.as_slice(), record.as_slice()) {
        (&[time], &[record]) => Ok(ways_to_win(time, record)),
        _ => Err(Error::parse(time_idx, "expected a single race").into()),
    }
}
