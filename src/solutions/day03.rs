//! Day 3: Gear Ratios

use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::parse_u64_from_bytes;

/// A run of digits in the schematic.
struct PartNumber {
    value: u64,
    row: usize,
    start: usize,
    end: usize,
}

impl PartNumber {
    /// Every cell touching the number, diagonals included, clipped to the grid.
    fn neighbors<'a>(
        &self,
        grid: &'a [&'a [u8]],
    ) -> impl Iterator<Item = (usize, usize, u8)> + 'a {
        let rows = self.row.saturating_sub(1)..=self.row + 1;
        let cols = self.start.saturating_sub(1)..=self.end + 1;
        let (row, start, end) = (self.row, self.start, self.end);
        rows.flat_map(move |r| cols.clone().map(move |c| (r, c)))
            .filter(move |&(r, c)| r != row || c < start || c > end)
            .filter_map(move |(r, c)| grid.get(r)?.get(c).map(|&b| (r, c, b)))
    }
}

fn is_symbol(b: u8) -> bool {
    b != b'.' && !b.is_ascii_digit() && !b.is_ascii_whitespace()
}

fn scan(grid: &[&[u8]]) -> Vec<PartNumber> {
    let mut numbers = Vec::new();
    for (row, line) in grid.iter().enumerate() {
        let mut col = 0;
        while col < line.len() {
            if !line[col].is_ascii_digit() {
                col += 1;
                continue;
            }
            let start = col;
            while col < line.len() && line[col].is_ascii_digit() {
                col += 1;
            }
            numbers.push(PartNumber {
                value: parse_u64_from_bytes(&line[start..col]),
                row,
                start,
                end: col - 1,
            });
        }
    }
    numbers
}

fn grid(input: &str) -> Vec<&[u8]> {
    input.lines().map(str::as_bytes).collect()
}

pub fn part1(input: &str) -> Result<u64> {
    let grid = grid(input);
    Ok(scan(&grid)
        .iter()
        .filter(|number| number.neighbors(&grid).any(|(_, _, b)| is_symbol(b)))
        .map(|number| number.value)
        .sum())
}

pub fn part2(input: &str) -> Result<u64> {
    let grid = grid(input);
    let mut gears: FxHashMap<(usize, usize), Vec<u64>> = FxHashMap::default();
    for number in scan(&grid) {
        for (r, c, _) in number.neighbors(&grid).filter(|&(_, _, b)| b == b'*') {
            gears.entry((r, c)).or_default().push(number.value);
        }
    }
    Ok(gears
        .values()
        .filter(|numbers| numbers.len() == 2)
        .map(|numbers| numbers[0] * numbers[1])
        .sum())
}
