//! Day 7: Camel Cards

use anyhow::Result;

use crate::Error;

const CARDS: &[u8; 13] = b"23456789TJQKA";
const CARDS_WITH_JOKER: &[u8; 13] = b"J23456789TQKA";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl HandType {
    /// `strengths` uses the card order in effect; with jokers, strength `0` is the joker.
    fn of(strengths: &[u8; 5], jokers: bool) -> Self {
        let mut counts = [0u8; 13];
        for &s in strengths {
            counts[s as usize] += 1;
        }
        let jokers = if jokers {
            std::mem::take(&mut counts[0])
        } else {
            0
        };
        counts.sort_unstable_by(|a, b| b.cmp(a));
        // jokers always join the largest group
        match (counts[0] + jokers, counts[1]) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }
}

/// Sort key of a hand: its type first, then card by card from the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Hand {
    kind: HandType,
    strengths: [u8; 5],
}

impl Hand {
    fn parse(idx: usize, cards: &str, jokers: bool) -> Result<Self, Error> {
        let order = if jokers { CARDS_WITH_JOKER } else { CARDS };
        let mut strengths = [0; 5];
        let bytes = cards.as_bytes();
        if bytes.len() != strengths.len() {
            return Err(Error::parse(idx, format!("expected five cards, found {:?}", cards)));
        }
        for (strength, card) in strengths.iter_mut().zip(bytes) {
            let position = order
                .iter()
                .position(|c| c == card)
                .ok_or_else(|| Error::parse(idx, format!("unknown card {:?}", *card as char)))?;
            *strength = position as u8;
        }
        Ok(Self {
            kind: HandType::of(&strengths, jokers),
            strengths,
        })
    }
}

fn total_winnings(input: &str, jokers: bool) -> Result<u64> {
    let mut hands = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let (cards, bid) = line
                .split_once(' ')
                .ok_or_else(|| Error::parse(idx, "expected `<cards> <bid>`"))?;
            let bid: u64 = bid
                .trim()
                .parse()
                .map_err(|_| Error::parse(idx, format!("invalid bid {:?}", bid)))?;
            Ok((Hand::parse(idx, cards, jokers)?, bid))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    hands.sort_unstable();
    Ok(hands
        .iter()
        .zip(1u64..)
        .map(|((_, bid), rank)| bid * rank)
        .sum())
}

pub fn part1(input: &str) -> Result<u64> {
    total_winnings(input, false)
}

pub fn part2(input: &str) -> Result<u64> {
    total_winnings(input, true)
}
