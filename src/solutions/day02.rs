//! Day 2: Cube Conundrum

use anyhow::Result;

use crate::Error;

/// Largest number of red, green and blue cubes seen in any draw of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cubes {
    red: u64,
    green: u64,
    blue: u64,
}

fn parse_game(idx: usize, line: &str) -> Result<(u64, Cubes), Error> {
    let (id, draws) = line
        .strip_prefix("Game ")
        .and_then(|rest| rest.split_once(':'))
        .ok_or_else(|| Error::parse(idx, "expected `Game <id>: ...`"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|_| Error::parse(idx, format!("invalid game id {:?}", id)))?;

    let mut max = Cubes::default();
    for cubes in draws.split([';', ',']) {
        let (count, color) = cubes.trim().split_once(' ').ok_or_else(|| {
            Error::parse(idx, format!("expected `<count> <color>`, found {:?}", cubes))
        })?;
        let count: u64 = count
            .parse()
            .map_err(|_| Error::parse(idx, format!("invalid count {:?}", count)))?;
        let slot = match color {
            "red" => &mut max.red,
            "green" => &mut max.green,
            "blue" => &mut max.blue,
            _ => return Err(Error::parse(idx, format!("unknown color {:?}", color))),
        };
        *slot = (*slot).max(count);
    }
    Ok((id, max))
}

fn games(input: &str) -> impl Iterator<Item = Result<(u64, Cubes), Error>> + '_ {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_game(idx, line))
}

pub fn part1(input: &str) -> Result<u64> {
    let mut sum = 0;
    for game in games(input) {
        let (id, max) = game?;
        if max.red <= 12 && max.green <= 13 && max.blue <= 14 {
            sum += id;
        }
    }
    Ok(sum)
}

pub fn part2(input: &str) -> Result<u64> {
    let mut sum = 0;
    for game in games(input) {
        let (_, max) = game?;
        sum += max.red * max.green * max.blue;
    }
    Ok(sum)
}
