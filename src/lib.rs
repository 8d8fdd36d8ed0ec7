pub mod error;
pub mod solutions;

use std::path::Path;

use anyhow::{Context, Result};

pub use error::Error;
use solutions::*;

/// One half of a day: takes the raw puzzle input and produces the answer.
pub type Part = fn(&str) -> Result<u64>;

/// Both parts of every implemented day, indexed by `day - 1`.
pub const ALL_SOLUTIONS: [[Part; 2]; 8] = [
    [day01::part1, day01::part2],
    [day02::part1, day02::part2],
    [day03::part1, day03::part2],
    [day04::part1, day04::part2],
    [day05::part1, day05::part2],
    [day06::part1, day06::part2],
    [day07::part1, day07::part2],
    [day08::part1, day08::part2],
];

/// Accepts `5` as well as `05`.
pub fn parse_day(day: &str) -> Result<usize, Error> {
    match day.trim().parse::<usize>() {
        Ok(n @ 1..=25) => Ok(n),
        _ => Err(Error::InvalidDay(day.to_string())),
    }
}

pub fn solution(day: usize) -> Result<[Part; 2], Error> {
    match day {
        1..=25 => ALL_SOLUTIONS
            .get(day - 1)
            .copied()
            .ok_or(Error::NotImplemented(day)),
        _ => Err(Error::InvalidDay(day.to_string())),
    }
}

pub fn load_input(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn default_input(day: usize) -> Result<String> {
    load_input(format!("inputs/{}.txt", day))
}

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters!
pub fn parse_u64_from_bytes(bytes: &[u8]) -> u64 {
    let mut ret = 0;
    for b in bytes {
        ret = ret * 10 + (b - b'0') as u64;
    }
    ret
}

/// Whitespace separated list of numbers found on the 0-based line `idx`.
pub fn parse_numbers(idx: usize, text: &str) -> Result<Vec<u64>, Error> {
    text.split_ascii_whitespace()
        .map(|n| {
            n.parse()
                .map_err(|_| Error::parse(idx, format!("expected a number, found {:?}", n)))
        })
        .collect()
}

/// Groups the non-blank lines of `input` into blank-line separated blocks. Every line keeps its
/// 0-based index for error reporting.
pub fn blocks(input: &str) -> Vec<Vec<(usize, &str)>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((idx, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}
