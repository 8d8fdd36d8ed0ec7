//! Day 4: Scratchcards

use anyhow::Result;
use memchr::memchr;
use rustc_hash::FxHashSet;

use crate::{parse_numbers, Error};

/// Number of scratched numbers that are also winning numbers, per card.
fn matches(input: &str) -> Result<Vec<usize>, Error> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let bytes = line.as_bytes();
            let (Some(colon), Some(bar)) = (memchr(b':', bytes), memchr(b'|', bytes)) else {
                return Err(Error::parse(idx, "expected `Card <id>: <winning> | <scratched>`"));
            };
            if bar < colon {
                return Err(Error::parse(idx, "`|` before `:`"));
            }
            let winning: FxHashSet<u64> = parse_numbers(idx, &line[colon + 1..bar])?
                .into_iter()
                .collect();
            let scratched = parse_numbers(idx, &line[bar + 1..])?;
            Ok(scratched.iter().filter(|&n| winning.contains(n)).count())
        })
        .collect()
}

pub fn part1(input: &str) -> Result<u64> {
    Ok(matches(input)?
        .into_iter()
        .filter(|&m| m > 0)
        .map(|m| 1u64 << (m - 1))
        .sum())
}

pub fn part2(input: &str) -> Result<u64> {
    let matches = matches(input)?;
    let mut copies = vec![1u64; matches.len()];
    for (i, &m) in matches.iter().enumerate() {
        // cards never make copies past the end of the table
        let end = (i + 1 + m).min(copies.len());
        for j in i + 1..end {
            copies[j] += copies[i];
        }
    }
    Ok(copies.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
        Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
        Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
        Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
        Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
        Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
    "};

    #[test]
    fn test_day4() -> Result<()> {
        assert_eq!(matches(EXAMPLE)?, [4, 2, 2, 1, 0, 0]);
        assert_eq!(part1(EXAMPLE)?, 13);
        assert_eq!(part2(EXAMPLE)?, 30);
        Ok(())
    }

    #[test]
    fn test_malformed_card() {
        assert_eq!(
            matches("Card 1: 1 2 3\n"),
            Err(Error::parse(0, "expected `Card <id>: <winning> | <scratched>`"))
        );
        assert!(matches("Card 1: 1 x | 3\n").is_err());
    }
}
