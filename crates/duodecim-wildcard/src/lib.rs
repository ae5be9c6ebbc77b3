//! Wildcard expansion for candidate path templates.
//!
//! Filename hunting works by hashing large families of hypothesized paths.
//! A template like `voice/sounds/battle_%3s1%1d0.at3` stands for one
//! candidate per combination of its placeholders:
//!
//! - `%2s` / `%3s` / `%5s` / `%6s` substitute entries from the supplied
//!   character-code lists
//! - `%1d` .. `%5d` substitute zero-padded decimals `0 ..= 10^N - 1`
//!
//! Expansion is a left-to-right cartesian product in first-occurrence order:
//! the leftmost placeholder varies slowest. There is no deduplication and no
//! arity cap; a template with two `%5d` tokens really does describe ten
//! billion candidates, and bounding that is the caller's problem.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, thiserror::Error)]
pub enum WildcardError {
    #[error("unrecognized placeholder {token:?} in template {template:?}")]
    MalformedPlaceholder { token: String, template: String },
}

/// Substitution lists for the `%Ns` placeholders, supplied by the caller.
///
/// The lists themselves are game data (character and series codes), not part
/// of the expansion engine.
#[derive(Debug, Clone, Copy)]
pub struct CodeLists<'a> {
    pub name_2: &'a [&'a str],
    pub name_3: &'a [&'a str],
    pub name_5: &'a [&'a str],
    pub name_6: &'a [&'a str],
}

impl<'a> CodeLists<'a> {
    fn list(&self, width: usize) -> &'a [&'a str] {
        match width {
            2 => self.name_2,
            3 => self.name_3,
            5 => self.name_5,
            6 => self.name_6,
            _ => &[],
        }
    }
}

/// String and digit tokens share one alternation; the first textual match
/// wins, so a `%` can never be claimed by two overlapping tokens.
fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%(\d+)([sd])").expect("token regex is valid"))
}

fn recognized_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%(?:[2356]s|[1-5]d)").expect("token regex is valid"))
}

/// Whether the template contains at least one recognized placeholder.
///
/// Near-miss tokens such as `%4s` do not count; a template containing only
/// those is treated as a literal path, exactly like any other plain string.
pub fn has_placeholder(template: &str) -> bool {
    recognized_regex().is_match(template)
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    /// `%2s`/`%3s`/`%5s`/`%6s`, substituting from the list of that width.
    Names(usize),
    /// `%1d`..`%5d`, substituting zero-padded decimals of that width.
    Digits(usize),
}

fn parse_segments(template: &str) -> Result<Vec<Segment>, WildcardError> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in token_regex().captures_iter(template) {
        let token = caps.get(0).expect("group 0 always present");
        if token.start() > last {
            segments.push(Segment::Literal(template[last..token.start()].to_string()));
        }
        let malformed = || WildcardError::MalformedPlaceholder {
            token: token.as_str().to_string(),
            template: template.to_string(),
        };
        let width: usize = caps[1].parse().map_err(|_| malformed())?;
        let segment = match (&caps[2], width) {
            ("s", 2 | 3 | 5 | 6) => Segment::Names(width),
            ("d", 1..=5) => Segment::Digits(width),
            _ => return Err(malformed()),
        };
        segments.push(segment);
        last = token.end();
    }
    if last < template.len() {
        segments.push(Segment::Literal(template[last..].to_string()));
    }
    Ok(segments)
}

/// A finite, restartable sequence of candidate strings.
///
/// Works as an odometer over the placeholder segments (rightmost digit spins
/// fastest) instead of recursive re-substitution, so deeply nested templates
/// cost no stack and the ordering guarantee is explicit.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    segments: Vec<Segment>,
    lists: CodeLists<'a>,
    counters: Vec<usize>,
    arities: Vec<usize>,
    done: bool,
}

impl<'a> Expansion<'a> {
    fn new(segments: Vec<Segment>, lists: CodeLists<'a>) -> Self {
        let arities: Vec<usize> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Literal(_) => None,
                Segment::Names(width) => Some(lists.list(*width).len()),
                Segment::Digits(width) => Some(10usize.pow(*width as u32)),
            })
            .collect();
        // A zero-arity placeholder (empty substitution list) has no
        // combinations at all.
        let done = arities.contains(&0);
        Expansion {
            counters: vec![0; arities.len()],
            segments,
            lists,
            arities,
            done,
        }
    }

    /// Total number of candidates this expansion will produce.
    pub fn combinations(&self) -> u128 {
        self.arities.iter().map(|&a| a as u128).product()
    }

    /// Rewinds to the first candidate.
    pub fn restart(&mut self) {
        self.counters.iter_mut().for_each(|c| *c = 0);
        self.done = self.arities.contains(&0);
    }

    fn render(&self) -> String {
        let mut out = String::new();
        let mut slot = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Names(width) => {
                    out.push_str(self.lists.list(*width)[self.counters[slot]]);
                    slot += 1;
                }
                Segment::Digits(width) => {
                    out.push_str(&format!("{:0w$}", self.counters[slot], w = *width));
                    slot += 1;
                }
            }
        }
        out
    }

    fn advance(&mut self) {
        for slot in (0..self.counters.len()).rev() {
            self.counters[slot] += 1;
            if self.counters[slot] < self.arities[slot] {
                return;
            }
            self.counters[slot] = 0;
        }
        // Every counter wrapped: the odometer rolled over.
        self.done = true;
    }
}

impl Iterator for Expansion<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let candidate = self.render();
        if self.counters.is_empty() {
            // No placeholders: the template itself is the only candidate.
            self.done = true;
        } else {
            self.advance();
        }
        Some(candidate)
    }
}

/// Expands a template into its candidate sequence.
///
/// A template without placeholders expands to the singleton sequence holding
/// the unchanged template.
pub fn expand<'a>(template: &str, lists: CodeLists<'a>) -> Result<Expansion<'a>, WildcardError> {
    Ok(Expansion::new(parse_segments(template)?, lists))
}
