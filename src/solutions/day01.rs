//! Day 1: Trebuchet?!

use aho_corasick::AhoCorasick;
use anyhow::Result;

fn calibration_sum(input: &str, spelled: bool) -> Result<u64> {
    // NOTE: regex doesn't work since it doesn't support overlapping matches (look-around)
    let patterns = &[
        "\n", "1", "2", "3", "4", "5", "6", "7", "8", "9", "one", "two", "three", "four", "five",
        "six", "seven", "eight", "nine",
    ];
    let ac = AhoCorasick::new(patterns)?;

    let mut sum = 0;
    let mut first = None;
    let mut last = 0;

    for mat in ac.find_overlapping_iter(input) {
        let digit = match mat.pattern().as_usize() {
            0 => {
                sum += first.take().map_or(0, |first| first * 10 + last);
                continue;
            }
            d @ 1..=9 => d as u64,
            d if spelled => (d - 9) as u64,
            _ => continue,
        };

        first.get_or_insert(digit);
        last = digit;
    }
    // last line without a trailing newline
    sum += first.map_or(0, |first| first * 10 + last);

    Ok(sum)
}

pub fn part1(input: &str) -> Result<u64> {
    calibration_sum(input, false)
}

pub fn part2(input: &str) -> Result<u64> {
    calibration_sum(input, true)
}
