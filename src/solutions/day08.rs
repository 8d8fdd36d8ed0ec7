//! Day 8: Haunted Wasteland

use std::{hash::BuildHasherDefault, str::FromStr};

use anyhow::{bail, Result};
use indexmap::IndexMap;
use regex::Regex;
use rustc_hash::FxHasher;

use crate::{blocks, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Non-empty list of directions that repeats forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instructions(Vec<Direction>);

impl Instructions {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for parsed instructions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            instructions: self,
            index: 0,
        }
    }
}

impl FromStr for Instructions {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Error> {
        let directions = line
            .trim()
            .bytes()
            .map(|b| match b {
                b'L' => Ok(Direction::Left),
                b'R' => Ok(Direction::Right),
                other => Err(Error::parse(
                    0,
                    format!("unexpected instruction {:?}", other as char),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if directions.is_empty() {
            return Err(Error::parse(0, "no instructions"));
        }
        Ok(Self(directions))
    }
}

/// Position inside [`Instructions`]; wraps around after the last direction.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    instructions: &'a Instructions,
    index: usize,
}

impl Cursor<'_> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) -> Direction {
        let direction = self.instructions.0[self.index];
        self.index = (self.index + 1) % self.instructions.len();
        direction
    }
}

impl Iterator for Cursor<'_> {
    type Item = Direction;

    fn next(&mut self) -> Option<Direction> {
        Some(self.advance())
    }
}

/// Node name -> (left, right). Insertion order is kept so ghost walks start in input order.
#[derive(Clone, Debug, Default)]
pub struct Network {
    nodes: IndexMap<String, (String, String), BuildHasherDefault<FxHasher>>,
}

impl Network {
    /// Returns `false` if the node was already known; the first definition is kept.
    pub fn add_node(&mut self, name: &str, left: &str, right: &str) -> bool {
        if self.nodes.contains_key(name) {
            return false;
        }
        self.nodes
            .insert(name.to_string(), (left.to_string(), right.to_string()));
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn successor(&self, node: &str, direction: Direction) -> Result<&str, Error> {
        let (left, right) = self
            .nodes
            .get(node)
            .ok_or_else(|| Error::UnknownNode(node.to_string()))?;
        Ok(match direction {
            Direction::Left => left,
            Direction::Right => right,
        })
    }
}

/// Current position of one walk. The network itself is shared and never changes.
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    network: &'a Network,
    position: &'a str,
}

impl<'a> Walk<'a> {
    pub fn new(network: &'a Network, start: &'a str) -> Self {
        Self {
            network,
            position: start,
        }
    }

    pub fn position(&self) -> &'a str {
        self.position
    }

    pub fn step(&mut self, direction: Direction) -> Result<&'a str, Error> {
        self.position = self.network.successor(self.position, direction)?;
        Ok(self.position)
    }
}

/// Upper bound for a walk that still can reach a terminal node: once every (node, instruction)
/// pair has been visited, the walk only repeats itself.
fn step_limit(network: &Network, instructions: &Instructions) -> u64 {
    ((network.len() + 1) * instructions.len()) as u64
}

/// Number of steps from `start` until the first node matching `is_terminal`.
pub fn steps_until(
    network: &Network,
    instructions: &Instructions,
    start: &str,
    is_terminal: impl Fn(&str) -> bool,
) -> Result<u64, Error> {
    let limit = step_limit(network, instructions);
    let mut walk = Walk::new(network, start);
    let mut cursor = instructions.cursor();
    let mut steps = 0;
    while !is_terminal(walk.position()) {
        if steps == limit {
            return Err(Error::NeverTerminates(start.to_string()));
        }
        walk.step(cursor.advance())?;
        steps += 1;
    }
    Ok(steps)
}

/// Walks every node ending with `start` at once, all following the same instructions. Each walk
/// stops at its first node ending with `end`. Returns the per-walk step counts in input order.
///
/// Combining these counts with [`lcm_all`] only gives the first common terminal step when every
/// walk keeps hitting its terminal node with a period equal to its first hit.
pub fn ghost_steps(
    network: &Network,
    instructions: &Instructions,
    start: &str,
    end: &str,
) -> Result<Vec<u64>, Error> {
    let limit = step_limit(network, instructions);
    let mut ghosts: Vec<_> = network
        .names()
        .filter(|name| name.ends_with(start))
        .map(|name| Ghost {
            start: name,
            walk: Walk::new(network, name),
            first_hit: None,
        })
        .collect();

    let mut cursor = instructions.cursor();
    let mut steps = 0;
    loop {
        for ghost in ghosts.iter_mut() {
            if ghost.first_hit.is_none() && ghost.walk.position().ends_with(end) {
                ghost.first_hit = Some(steps);
            }
        }
        match ghosts.iter().find(|ghost| ghost.first_hit.is_none()) {
            None => break,
            Some(ghost) if steps == limit => {
                return Err(Error::NeverTerminates(ghost.start.to_string()))
            }
            Some(_) => {}
        }

        let direction = cursor.advance();
        for ghost in ghosts.iter_mut() {
            if ghost.first_hit.is_none() {
                ghost.walk.step(direction)?;
            }
        }
        steps += 1;
    }

    Ok(ghosts.iter().filter_map(|ghost| ghost.first_hit).collect())
}

struct Ghost<'a> {
    start: &'a str,
    walk: Walk<'a>,
    first_hit: Option<u64>,
}

/// Least common multiple of all values, `1` for none.
pub fn lcm_all(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(1, num::integer::lcm)
}

fn parse(input: &str) -> Result<(Instructions, Network)> {
    let blocks = blocks(input);
    let (instructions, nodes) = match blocks.as_slice() {
        [first, nodes] if first.len() == 1 => (first[0], nodes),
        _ => bail!("expected an instruction line and a block of nodes"),
    };
    let instructions = instructions
        .1
        .parse::<Instructions>()
        .map_err(|e| match e {
            Error::Parse { message, .. } => Error::parse(instructions.0, message),
            other => other,
        })?;

    let re = Regex::new(r"^([0-9A-Za-z]+) = \(([0-9A-Za-z]+), ([0-9A-Za-z]+)\)$")?;
    let mut network = Network::default();
    for &(idx, line) in nodes {
        let caps = re
            .captures(line.trim())
            .ok_or_else(|| Error::parse(idx, "expected `<name> = (<left>, <right>)`"))?;
        if !network.add_node(&caps[1], &caps[2], &caps[3]) {
            return Err(Error::parse(idx, format!("node {:?} defined twice", &caps[1])).into());
        }
    }
    Ok((instructions, network))
}

pub fn part1(input: &str) -> Result<u64> {
    let (instructions, network) = parse(input)?;
    Ok(steps_until(&network, &instructions, "AAA", |node| node == "ZZZ")?)
}

pub fn part2(input: &str) -> Result<u64> {
    let (instructions, network) = parse(input)?;
    let steps = ghost_steps(&network, &instructions, "A", "Z")?;
    if steps.is_empty() {
        bail!("no node name ends with \"A\"");
    }
    Ok(lcm_all(steps))
}
