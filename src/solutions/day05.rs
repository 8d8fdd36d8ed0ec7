//! Day 5: If You Give A Seed A Fertilizer
//!
//! Every map of the almanac is piecewise linear with slope 1, and so is the whole
//! seed-to-location chain. On a seed range, the chain can only start a new increasing segment
//! where some map in the chain changes its offset. Part 2 therefore never enumerates seeds: it
//! pulls the offset change points of every map back to seed numbers and evaluates the chain only
//! there.

use std::{collections::BTreeSet, fmt::Debug, marker::PhantomData, str::FromStr};

use anyhow::{bail, Context, Result};

use crate::{blocks, parse_numbers, Error};

/// Type-level tag for the kind of number a [`Value`] holds.
pub trait Category: Copy + Ord + Debug {
    const NAME: &'static str;
}

macro_rules! categories {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub enum $ty {}

            impl Category for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

categories! {
    Seed => "seed",
    Soil => "soil",
    Fertilizer => "fertilizer",
    Water => "water",
    Light => "light",
    Temperature => "temperature",
    Humidity => "humidity",
    Location => "location",
}

/// A number of category `C`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value<C> {
    raw: u64,
    category: PhantomData<C>,
}

impl<C> Value<C> {
    pub fn new(raw: u64) -> Self {
        Self {
            raw,
            category: PhantomData,
        }
    }

    pub fn get(self) -> u64 {
        self.raw
    }
}

/// Inclusive interval `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    start: u64,
    end: u64,
}

impl Range {
    /// `None` unless `start <= end`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// `None` for an empty range or one that runs past `u64::MAX`.
    pub fn with_len(start: u64, len: u64) -> Option<Self> {
        let end = start.checked_add(len.checked_sub(1)?)?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn contains(&self, value: u64) -> bool {
        self.start <= value && value <= self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OffsetRule {
    range: Range,
    offset: i64,
}

impl OffsetRule {
    fn apply(&self, value: u64) -> Option<u64> {
        self.range
            .contains(value)
            .then(|| value.wrapping_add_signed(self.offset))
    }
}

fn lookup(rules: &[OffsetRule], value: u64) -> u64 {
    rules
        .iter()
        .find_map(|rule| rule.apply(value))
        .unwrap_or(value)
}

/// Translation of `S` numbers into `D` numbers. Numbers not covered by any rule map to
/// themselves; the first registered rule wins when rules overlap.
#[derive(Clone, Debug)]
pub struct Mapping<S, D> {
    forward: Vec<OffsetRule>,
    backward: Vec<OffsetRule>,
    categories: PhantomData<(S, D)>,
}

impl<S, D> Default for Mapping<S, D> {
    fn default() -> Self {
        Self {
            forward: Vec::new(),
            backward: Vec::new(),
            categories: PhantomData,
        }
    }
}

impl<S: Category, D: Category> Mapping<S, D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `[source, source + length)` -> `[destination, destination + length)`.
    pub fn add_range(&mut self, source: u64, destination: u64, length: u64) -> Result<()> {
        let (Some(from), Some(to)) = (
            Range::with_len(source, length),
            Range::with_len(destination, length),
        ) else {
            bail!(
                "invalid range: source {}, destination {}, length {}",
                source,
                destination,
                length
            );
        };
        let offset = i64::try_from(i128::from(destination) - i128::from(source))
            .context("offset does not fit into i64")?;

        self.forward.push(OffsetRule {
            range: from,
            offset,
        });
        self.backward.push(OffsetRule {
            range: to,
            offset: -offset,
        });
        Ok(())
    }

    pub fn get(&self, value: Value<S>) -> Value<D> {
        Value::new(lookup(&self.forward, value.get()))
    }

    /// Inverse of [`Mapping::get`] for rules that overlap neither in their sources nor in their
    /// destinations. Even then `undo(get(v)) == v` only holds if `v` is covered by a rule or lies
    /// outside every destination range: an uncovered `v` inside a destination range maps to
    /// itself but is undone through that rule.
    pub fn undo(&self, value: Value<D>) -> Value<S> {
        Value::new(lookup(&self.backward, value.get()))
    }

    /// Domain floor plus both ends of every rule.
    pub fn source_cuts(&self) -> BTreeSet<Value<S>> {
        std::iter::once(0)
            .chain(
                self.forward
                    .iter()
                    .flat_map(|rule| [rule.range.start(), rule.range.end()]),
            )
            .map(Value::new)
            .collect()
    }

    /// Moves the cut points of the destination category one step back to the source category and
    /// adds the cut points of this mapping itself.
    pub fn pull_back(&self, cuts: &BTreeSet<Value<D>>) -> BTreeSet<Value<S>> {
        let mut pulled = self.source_cuts();
        for &cut in cuts {
            // up to two preimages: through the identity fallback and through a rule
            pulled.insert(Value::new(cut.get()));
            pulled.insert(self.undo(cut));
        }
        // where the identity fallback takes over again
        pulled.extend(
            self.forward
                .iter()
                .map(|rule| Value::new(rule.range.end().saturating_add(1))),
        );
        pulled
    }
}

#[derive(Clone, Debug)]
pub struct Almanac {
    seeds: Vec<Value<Seed>>,
    seed_to_soil: Mapping<Seed, Soil>,
    soil_to_fertilizer: Mapping<Soil, Fertilizer>,
    fertilizer_to_water: Mapping<Fertilizer, Water>,
    water_to_light: Mapping<Water, Light>,
    light_to_temperature: Mapping<Light, Temperature>,
    temperature_to_humidity: Mapping<Temperature, Humidity>,
    humidity_to_location: Mapping<Humidity, Location>,
}

impl Almanac {
    pub fn seeds(&self) -> &[Value<Seed>] {
        &self.seeds
    }

    /// The seed list read as `start length` pairs. Empty ranges are dropped.
    pub fn seed_ranges(&self) -> Result<Vec<Range>> {
        if self.seeds.len() % 2 != 0 {
            bail!("seed ranges need an even number of values");
        }
        self.seeds
            .chunks_exact(2)
            .filter(|pair| pair[1].get() != 0)
            .map(|pair| {
                let (start, len) = (pair[0].get(), pair[1].get());
                Range::with_len(start, len)
                    .with_context(|| format!("seed range starting at {} overflows", start))
            })
            .collect()
    }

    pub fn location(&self, seed: Value<Seed>) -> Value<Location> {
        let soil = self.seed_to_soil.get(seed);
        let fertilizer = self.soil_to_fertilizer.get(soil);
        let water = self.fertilizer_to_water.get(fertilizer);
        let light = self.water_to_light.get(water);
        let temperature = self.light_to_temperature.get(light);
        let humidity = self.temperature_to_humidity.get(temperature);
        self.humidity_to_location.get(humidity)
    }

    /// Every seed at which the seed-to-location chain may change its offset.
    pub fn seed_cuts(&self) -> BTreeSet<Value<Seed>> {
        let cuts = self.humidity_to_location.pull_back(&BTreeSet::new());
        let cuts = self.temperature_to_humidity.pull_back(&cuts);
        let cuts = self.light_to_temperature.pull_back(&cuts);
        let cuts = self.water_to_light.pull_back(&cuts);
        let cuts = self.fertilizer_to_water.pull_back(&cuts);
        let cuts = self.soil_to_fertilizer.pull_back(&cuts);
        self.seed_to_soil.pull_back(&cuts)
    }

    pub fn lowest_location(&self) -> Option<Value<Location>> {
        self.seeds.iter().map(|&seed| self.location(seed)).min()
    }

    pub fn lowest_location_in(&self, ranges: &[Range]) -> Option<Value<Location>> {
        self.seed_cuts()
            .into_iter()
            .chain(ranges.iter().map(|range| Value::new(range.start())))
            .filter(|seed| ranges.iter().any(|range| range.contains(seed.get())))
            .map(|seed| self.location(seed))
            .min()
    }
}

fn parse_mapping<S: Category, D: Category>(
    block: Option<Vec<(usize, &str)>>,
) -> Result<Mapping<S, D>> {
    let header = format!("{}-to-{} map:", S::NAME, D::NAME);
    let block = block.with_context(|| format!("missing {:?} block", header))?;
    let Some((&(idx, first), rules)) = block.split_first() else {
        bail!("missing {:?} block", header);
    };
    if first.trim() != header {
        return Err(Error::parse(idx, format!("expected {:?}", header)).into());
    }

    let mut mapping = Mapping::new();
    for &(idx, line) in rules {
        let numbers = parse_numbers(idx, line)?;
        let [destination, source, length] = numbers[..] else {
            return Err(Error::parse(idx, "expected `<destination> <source> <length>`").into());
        };
        mapping
            .add_range(source, destination, length)
            .with_context(|| format!("line {}", idx + 1))?;
    }
    Ok(mapping)
}

impl FromStr for Almanac {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut blocks = blocks(input).into_iter();

        let seeds = match blocks.next().as_deref() {
            Some(&[(idx, line)]) => {
                let list = line
                    .strip_prefix("seeds:")
                    .ok_or_else(|| Error::parse(idx, "expected \"seeds:\""))?;
                parse_numbers(idx, list)?
                    .into_iter()
                    .map(Value::new)
                    .collect()
            }
            Some(&[_, (idx, _), ..]) => {
                return Err(Error::parse(idx, "expected a blank line after the seeds").into())
            }
            _ => bail!("missing seeds line"),
        };

        let almanac = Almanac {
            seeds,
            seed_to_soil: parse_mapping(blocks.next())?,
            soil_to_fertilizer: parse_mapping(blocks.next())?,
            fertilizer_to_water: parse_mapping(blocks.next())?,
            water_to_light: parse_mapping(blocks.next())?,
            light_to_temperature: parse_mapping(blocks.next())?,
            temperature_to_humidity: parse_mapping(blocks.next())?,
            humidity_to_location: parse_mapping(blocks.next())?,
        };
        if let Some(&(idx, _)) = blocks.next().as_ref().and_then(|block| block.first()) {
            return Err(Error::parse(idx, "unexpected block after the last map").into());
        }
        Ok(almanac)
    }
}

pub fn part1(input: &str) -> Result<u64> {
    let almanac: Almanac = input.parse()?;
    almanac
        .lowest_location()
        .map(Value::get)
        .context("the almanac lists no seeds")
}

pub fn part2(input: &str) -> Result<u64> {
    let almanac: Almanac = input.parse()?;
    let ranges = almanac.seed_ranges()?;
    almanac
        .lowest_location_in(&ranges)
        .map(Value::get)
        .context("the almanac lists no seed ranges")
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use proptest::prelude::*;

    const EXAMPLE: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-fertilizer map:
        0 15 37
        37 52 2
        39 0 15

        fertilizer-to-water map:
        49 53 8
        0 11 42
        42 0 7
        57 7 4

        water-to-light map:
        88 18 7
        18 25 70

        light-to-temperature map:
        45 77 23
        81 45 19
        68 64 13

        temperature-to-humidity map:
        0 69 1
        1 0 69

        humidity-to-location map:
        60 56 37
        56 93 4
    "};

    const SOIL_ONLY: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2

        soil-to-fertilizer map:

        fertilizer-to-water map:

        water-to-light map:

        light-to-temperature map:

        temperature-to-humidity map:

        humidity-to-location map:
    "};

    #[test]
    fn test_day5_example() -> Result<()> {
        assert_eq!(part1(EXAMPLE)?, 35);
        assert_eq!(part2(EXAMPLE)?, 46);
        Ok(())
    }

    #[test]
    fn test_example_locations() -> Result<()> {
        let almanac: Almanac = EXAMPLE.parse()?;
        let locations: Vec<_> = almanac
            .seeds()
            .iter()
            .map(|&seed| almanac.location(seed).get())
            .collect();
        assert_eq!(locations, [82, 43, 86, 35]);
        Ok(())
    }

    #[test]
    fn test_single_rule_chain() -> Result<()> {
        // empty map blocks are only a header; `blocks` keeps them apart because of the blank lines
        let almanac: Almanac = SOIL_ONLY.parse()?;
        assert_eq!(almanac.location(Value::new(79)).get(), 79);
        assert_eq!(almanac.location(Value::new(98)).get(), 50);
        assert_eq!(almanac.location(Value::new(99)).get(), 51);
        assert_eq!(almanac.location(Value::new(100)).get(), 100);
        assert_eq!(part1(SOIL_ONLY)?, 13);
        Ok(())
    }

    #[test]
    fn test_mapping_lookup() -> Result<()> {
        let mut mapping = Mapping::<Seed, Soil>::new();
        mapping.add_range(98, 50, 2)?;
        mapping.add_range(50, 52, 48)?;

        assert_eq!(mapping.get(Value::new(0)).get(), 0);
        assert_eq!(mapping.get(Value::new(49)).get(), 49);
        assert_eq!(mapping.get(Value::new(50)).get(), 52);
        assert_eq!(mapping.get(Value::new(97)).get(), 99);
        assert_eq!(mapping.get(Value::new(98)).get(), 50);
        assert_eq!(mapping.get(Value::new(99)).get(), 51);
        assert_eq!(mapping.get(Value::new(100)).get(), 100);

        assert_eq!(mapping.undo(Value::new(50)).get(), 98);
        assert_eq!(mapping.undo(Value::new(99)).get(), 97);

        let cuts: Vec<_> = mapping.source_cuts().into_iter().map(Value::get).collect();
        assert_eq!(cuts, [0, 50, 97, 98, 99]);
        Ok(())
    }

    #[test]
    fn test_first_rule_wins() -> Result<()> {
        let mut mapping = Mapping::<Seed, Soil>::new();
        mapping.add_range(10, 100, 10)?;
        mapping.add_range(15, 200, 10)?;
        assert_eq!(mapping.get(Value::new(16)).get(), 106);
        assert_eq!(mapping.get(Value::new(20)).get(), 205);
        Ok(())
    }

    #[test]
    fn test_invalid_ranges() {
        let mut mapping = Mapping::<Seed, Soil>::new();
        assert!(mapping.add_range(1, 2, 0).is_err());
        assert!(mapping.add_range(u64::MAX, 2, 2).is_err());
        // offset past i64::MAX
        assert!(mapping.add_range(0, u64::MAX, 1).is_err());
        assert!(mapping.add_range(0, 1 << 40, 1).is_ok());
    }

    #[test]
    fn test_undo_of_uncovered_value() -> Result<()> {
        let mut mapping = Mapping::<Seed, Soil>::new();
        mapping.add_range(98, 50, 2)?;
        // 10 is neither a source nor a destination
        assert_eq!(mapping.undo(mapping.get(Value::new(10))), Value::new(10));
        // 50 is uncovered but inside the destination range, so it is undone through the rule
        assert_eq!(mapping.get(Value::new(50)), Value::new(50));
        assert_eq!(mapping.undo(mapping.get(Value::new(50))), Value::new(98));
        Ok(())
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(Range::new(5, 3), None);
        let range = Range::new(3, 5).expect("3 <= 5");
        assert!(range.contains(3) && range.contains(5) && !range.contains(6));
        assert_eq!(Range::with_len(3, 3), Some(range));
        assert_eq!(Range::with_len(3, 0), None);
    }

    #[test]
    fn test_seed_cuts_include_floor() -> Result<()> {
        let almanac: Almanac = EXAMPLE.parse()?;
        let cuts = almanac.seed_cuts();
        assert!(cuts.contains(&Value::new(0)));
        // 82 is the seed that ends up at location 46
        assert!(cuts.contains(&Value::new(82)));
        Ok(())
    }

    #[test]
    fn test_seed_range_without_inner_cuts() -> Result<()> {
        let almanac: Almanac = SOIL_ONLY.parse()?;
        assert_eq!(
            almanac.lowest_location_in(&[Range::new(200, 300).expect("200 <= 300")]),
            Some(Value::new(200))
        );
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert!(part1("").is_err());
        assert!(part1("seeds: 1 2\n\nseed-to-soil map:\n1 2\n").is_err());
        assert!(part1(&EXAMPLE.replace("water-to-light", "water-to-lamp")).is_err());
        assert!(part1(&EXAMPLE.replace("seeds: 79", "seeds: x")).is_err());
        assert!(part2(&EXAMPLE.replace("seeds: 79 14 55 13", "seeds: 79 14 55")).is_err());

        let err = part1(&EXAMPLE.replace("18 25 70", "18 25")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::parse(19, "expected `<destination> <source> <length>`"))
        );
    }

    /// `(source, destination, length)` triples whose sources are pairwise disjoint and whose
    /// destinations are pairwise disjoint, laid out in opposite order.
    fn disjoint_rules() -> impl Strategy<Value = Vec<(u64, u64, u64)>> {
        prop::collection::vec((1u64..8, 0u64..6, 0u64..6), 0..4).prop_map(|shapes| {
            let mut sources = Vec::with_capacity(shapes.len());
            let mut cursor = 0;
            for &(len, gap, _) in &shapes {
                cursor += gap;
                sources.push(cursor);
                cursor += len;
            }
            let mut destinations = vec![0; shapes.len()];
            let mut cursor = 0;
            for (i, &(len, _, gap)) in shapes.iter().enumerate().rev() {
                cursor += gap;
                destinations[i] = cursor;
                cursor += len;
            }
            shapes
                .iter()
                .zip(sources.into_iter().zip(destinations))
                .map(|(&(len, _, _), (source, destination))| (source, destination, len))
                .collect()
        })
    }

    fn mapping<S: Category, D: Category>(rules: &[(u64, u64, u64)]) -> Mapping<S, D> {
        let mut mapping = Mapping::new();
        for &(source, destination, length) in rules {
            mapping
                .add_range(source, destination, length)
                .expect("generated rules are valid");
        }
        mapping
    }

    proptest! {
        #[test]
        fn prop_mapping_offsets(rules in disjoint_rules(), value in 0u64..80) {
            let mapping = mapping::<Seed, Soil>(&rules);
            let covering = rules
                .iter()
                .find(|&&(source, _, length)| source <= value && value < source + length);
            match covering {
                Some(&(source, destination, _)) => {
                    let mapped = mapping.get(Value::new(value));
                    prop_assert_eq!(mapped.get(), value - source + destination);
                    prop_assert_eq!(mapping.undo(mapped), Value::new(value));
                }
                None => {
                    let mapped = mapping.get(Value::new(value));
                    prop_assert_eq!(mapped.get(), value);
                    let in_destination = rules.iter().any(|&(_, destination, length)| {
                        destination <= value && value < destination + length
                    });
                    if !in_destination {
                        prop_assert_eq!(mapping.undo(mapped), Value::new(value));
                    }
                }
            }
        }

        #[test]
        fn prop_cuts_match_brute_force(
            maps in prop::collection::vec(disjoint_rules(), 7),
            ranges in prop::collection::vec((0u64..60, 1u64..20), 1..4),
        ) {
            let almanac = Almanac {
                seeds: Vec::new(),
                seed_to_soil: mapping(&maps[0]),
                soil_to_fertilizer: mapping(&maps[1]),
                fertilizer_to_water: mapping(&maps[2]),
                water_to_light: mapping(&maps[3]),
                light_to_temperature: mapping(&maps[4]),
                temperature_to_humidity: mapping(&maps[5]),
                humidity_to_location: mapping(&maps[6]),
            };
            let ranges: Vec<_> = ranges
                .into_iter()
                .map(|(start, len)| Range::with_len(start, len).expect("small range"))
                .collect();

            let brute_force = ranges
                .iter()
                .flat_map(|range| range.start()..=range.end())
                .map(|seed| almanac.location(Value::new(seed)))
                .min();
            prop_assert_eq!(almanac.lowest_location_in(&ranges), brute_force);
        }
    }
}
