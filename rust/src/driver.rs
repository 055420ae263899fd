//! Line-oriented command interpreter for the event counter.
//!
//! Commands are one per line, verb first (case-insensitive), arguments
//! separated by whitespace:
//!
//! ```text
//! increase ID M     reduce ID M     inrange ID1 ID2
//! next ID           previous ID     count ID          quit
//! ```

use crate::config::TreeConfig;
use crate::error::{AvlResult, AvlTreeError, ModifyResult};
use crate::event_counter::EventCounter;
use crate::types::{Key, KvPair, Value};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Increase { id: Key, m: Value },
    Reduce { id: Key, m: Value },
    InRange { id1: Key, id2: Key },
    Next { id: Key },
    Previous { id: Key },
    Count { id: Key },
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> AvlResult<Option<Command>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

fn parse_number(token: &str) -> AvlResult<u64> {
    token
        .parse()
        .map_err(|e: std::num::ParseIntError| AvlTreeError::parse(token, &e.to_string()))
}

impl FromStr for Command {
    type Err = AvlTreeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = parts.split_first() else {
            return Err(AvlTreeError::parse(line, "empty command"));
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "increase" => {
                let [id, m] = numeric_args(line, args)?;
                Command::Increase { id, m }
            }
            "reduce" => {
                let [id, m] = numeric_args(line, args)?;
                Command::Reduce { id, m }
            }
            "inrange" => {
                let [id1, id2] = numeric_args(line, args)?;
                Command::InRange { id1, id2 }
            }
            "next" => {
                let [id] = numeric_args(line, args)?;
                Command::Next { id }
            }
            "previous" => {
                let [id] = numeric_args(line, args)?;
                Command::Previous { id }
            }
            "count" => {
                let [id] = numeric_args(line, args)?;
                Command::Count { id }
            }
            "quit" => {
                let [] = numeric_args(line, args)?;
                Command::Quit
            }
            _ => return Err(AvlTreeError::parse(line, "unknown command")),
        })
    }
}

/// Parse exactly `N` unsigned arguments.
fn numeric_args<const N: usize>(line: &str, args: &[&str]) -> AvlResult<[u64; N]> {
    if args.len() != N {
        return Err(AvlTreeError::parse(
            line,
            &format!("expected {} arguments, got {}", N, args.len()),
        ));
    }
    let mut nums = [0; N];
    for (slot, arg) in nums.iter_mut().zip(args) {
        *slot = parse_number(arg)?;
    }
    Ok(nums)
}

/// Read seed pairs: each line holding exactly two unsigned integers becomes
/// a pair, anything else is skipped. The result is sorted by key with
/// duplicates collapsed (the last occurrence wins), ready for bulk build.
pub fn load_pairs<R: BufRead>(reader: R) -> AvlResult<Vec<KvPair>> {
    let mut pairs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let (Some(k), Some(v), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            continue;
        };
        if let (Ok(k), Ok(v)) = (k.parse::<Key>(), v.parse::<Value>()) {
            pairs.push((k, v));
        }
    }

    // stable sort keeps file order among equal keys
    pairs.sort_by_key(|&(k, _)| k);
    let mut deduped: Vec<KvPair> = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        match deduped.last_mut() {
            Some(last) if last.0 == k => last.1 = v,
            _ => deduped.push((k, v)),
        }
    }
    Ok(deduped)
}

/// Executes commands against an [`EventCounter`].
#[derive(Debug, Clone)]
pub struct Driver {
    counter: EventCounter,
}

impl Driver {
    pub fn new(counter: EventCounter) -> Self {
        Self { counter }
    }

    /// Build a driver whose counter is bulk-built from seed data.
    pub fn from_seed<R: BufRead>(reader: R, config: TreeConfig) -> AvlResult<Self> {
        let pairs = load_pairs(reader)?;
        let counter = EventCounter::from_sorted_with_config(&pairs, config)?;
        Ok(Self::new(counter))
    }

    pub fn counter(&self) -> &EventCounter {
        &self.counter
    }

    /// Run one command and return its output line. `Quit` produces no output.
    pub fn execute(&mut self, command: &Command) -> ModifyResult<Option<String>> {
        let ec = &mut self.counter;
        let line = match *command {
            Command::Increase { id, m } => ec.increase(id, m)?.to_string(),
            Command::Reduce { id, m } => ec.reduce(id, m)?.to_string(),
            Command::InRange { id1, id2 } => ec.in_range(id1, id2).to_string(),
            Command::Next { id } => format_pair(ec.next(id)),
            Command::Previous { id } => format_pair(ec.previous(id)),
            Command::Count { id } => ec.count(id).to_string(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(line))
    }

    /// Process commands from `input` until end of input or `quit`, writing
    /// results to `output`. Bad lines are reported as `Exception: ...` and
    /// processing continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> AvlResult<()> {
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "Exception: {}", e)?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            match self.execute(&command) {
                Ok(Some(result)) => writeln!(output, "{}", result)?,
                Ok(None) => {}
                Err(e) => writeln!(output, "Exception: {}", e)?,
            }
        }
        output.flush()?;
        Ok(())
    }
}

fn format_pair(pair: Option<KvPair>) -> String {
    let (id, count) = pair.unwrap_or((0, 0));
    format!("{} {}", id, count)
}
