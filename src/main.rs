use std::{
    fmt::Display,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;

use aoc2023::{default_input, load_input, parse_day, solution, Error, Part, ALL_SOLUTIONS};

/// Advent of Code 2023 solutions
#[derive(Parser, Debug)]
#[command(name = "aoc2023", about = "Run Advent of Code 2023 solutions", version)]
struct Args {
    /// Day to run, e.g. `5` or `05` (runs every implemented day if omitted)
    day: Option<String>,

    /// Input file for the selected day [default: inputs/<day>.txt]
    #[arg(short, long, requires = "day")]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(day) = args.day else {
        let mut total = Duration::default();
        for (i, parts) in ALL_SOLUTIONS.into_iter().enumerate() {
            let input = default_input(i + 1)?;
            total += execute_day(i + 1, parts, &input)?;
        }
        println!("Total processing time: {}", format_duration(total));
        return Ok(());
    };

    let n = parse_day(&day)?;
    let parts = match solution(n) {
        Ok(parts) => parts,
        Err(e @ Error::NotImplemented(_)) => {
            println!("Day {}: {}", n, e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let input = match args.input {
        Some(path) => load_input(path)?,
        None => default_input(n)?,
    };
    execute_day(n, parts, &input)?;
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    format!("{:.6} s", dur.as_secs_f64())
}

fn execute_part<T: Display>(label: &str, f: impl FnOnce() -> Result<T>) -> Result<Duration> {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    match result {
        Ok(answer) => println!("  {}: {} ({})", label, answer, format_duration(elapsed)),
        Err(e) => match e.downcast_ref::<Error>() {
            Some(Error::NotImplemented(_)) => println!("  {}: {}", label, e),
            _ => return Err(e.context(format!("{} failed", label))),
        },
    }
    Ok(elapsed)
}

fn execute_day(n: usize, [part1, part2]: [Part; 2], input: &str) -> Result<Duration> {
    println!("Day {}:", n);
    let mut elapsed = execute_part("Part 1", || part1(input))?;
    elapsed += execute_part("Part 2", || part2(input))?;
    println!("---------------------");
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_in_seconds() {
        assert_eq!(format_duration(Duration::from_micros(1500)), "0.001500 s");
        assert_eq!(format_duration(Duration::from_millis(2250)), "2.250000 s");
        assert_eq!(format_duration(Duration::ZERO), "0.000000 s");
    }
}
