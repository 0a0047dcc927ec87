use std::iter::Peekable;
use std::str::Chars;

use log::debug;
use regex::{Regex, RegexBuilder};

use super::types::{Employee, OrgNode};

/// Compiled search query.
#[derive(Clone, Debug)]
pub enum Matcher {
	/// Empty query: nothing is excluded.
	Everything,
	/// Case-insensitive pattern.
	Pattern(Regex),
}

impl Matcher {
	/// Compiles `query` as a case-insensitive pattern. A query that is not a
	/// valid pattern (`C++`, `(`) is matched as literal text instead.
	pub fn new(query: &str) -> Self {
		if query.is_empty() {
			return Matcher::Everything;
		}
		if stacks_repetitions(query) {
			debug!("search query {query:?} repeats a repetition, matching literally");
			return Matcher::literal(query);
		}
		let pattern = RegexBuilder::new(query).case_insensitive(true).build();
		match pattern {
			Ok(re) => Matcher::Pattern(re),
			Err(err) => {
				debug!("search query {query:?} is not a pattern ({err}), matching literally");
				Matcher::literal(query)
			}
		}
	}

	fn literal(query: &str) -> Self {
		let literal = RegexBuilder::new(&regex::escape(query))
			.case_insensitive(true)
			.build();
		match literal {
			Ok(re) => Matcher::Pattern(re),
			// Only reachable when the escaped literal exceeds the size limit.
			Err(_) => Matcher::Everything,
		}
	}

	/// Whether any searchable field of `employee` matches.
	pub fn matches(&self, employee: &Employee, include_mobile: bool) -> bool {
		let Matcher::Pattern(re) = self else {
			return true;
		};
		let mobile = include_mobile.then_some(&employee.mobile_number).into_iter().flatten();
		[
			&employee.display_name,
			&employee.job_title,
			&employee.department,
			&employee.telephone_number,
			&employee.email,
		]
		.into_iter()
		.flatten()
		.chain(mobile)
		.any(|field| re.is_match(field))
	}
}

/// Whether a repetition operator is applied straight to another one, as in
/// `C++` or `a*{2}`. A lazy `?` (`a+?`) is not a second repetition.
fn stacks_repetitions(query: &str) -> bool {
	let mut chars = query.chars().peekable();
	let mut after_repetition = false;
	while let Some(c) = chars.next() {
		let repetition = match c {
			'\\' => {
				chars.next();
				false
			}
			'[' => {
				skip_class(&mut chars);
				false
			}
			'*' | '+' | '?' => true,
			'{' => repetition_braces(&mut chars),
			_ => false,
		};
		if !repetition {
			after_repetition = false;
			continue;
		}
		if after_repetition {
			return true;
		}
		if chars.peek() == Some(&'?') {
			chars.next();
		}
		after_repetition = true;
	}
	false
}

/// Consumes a bracketed class up to and including its closing `]`.
fn skip_class(chars: &mut Peekable<Chars<'_>>) {
	if chars.peek() == Some(&'^') {
		chars.next();
	}
	if chars.peek() == Some(&']') {
		chars.next();
	}
	while let Some(c) = chars.next() {
		match c {
			'\\' => {
				chars.next();
			}
			']' => return,
			_ => {}
		}
	}
}

/// Consumes `n}`, `n,}` or `n,m}` after a `{`. Leaves `chars` untouched
/// when the brace is not a counted repetition.
fn repetition_braces(chars: &mut Peekable<Chars<'_>>) -> bool {
	let mut ahead = chars.clone();
	let mut digits = false;
	while let Some(c) = ahead.next() {
		match c {
			'0'..='9' => digits = true,
			',' => {}
			'}' if digits => {
				*chars = ahead;
				return true;
			}
			_ => return false,
		}
	}
	false
}

/// Outcome of one search pass over the node set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
	/// Non-match flag per node.
	pub non_match: Vec<bool>,
	/// Nodes still matching.
	pub match_count: usize,
	/// The single remaining match, if exactly one.
	pub unique_match: Option<usize>,
	/// `"(<n> matches)"`, or empty for an empty query.
	pub readout: String,
}

/// Recomputes every non-match flag from scratch for `query`.
pub fn search(nodes: &[OrgNode], query: &str, include_mobile: bool) -> SearchOutcome {
	let matcher = Matcher::new(query);
	let non_match: Vec<bool> = nodes
		.iter()
		.map(|n| !matcher.matches(&n.employee, include_mobile))
		.collect();

	let matching: Vec<usize> = non_match
		.iter()
		.enumerate()
		.filter_map(|(i, excluded)| (!excluded).then_some(i))
		.collect();
	let match_count = matching.len();
	let unique_match = match matching.as_slice() {
		[only] => Some(*only),
		_ => None,
	};
	let readout = if query.is_empty() {
		String::new()
	} else {
		format!("({match_count} matches)")
	};

	SearchOutcome {
		non_match,
		match_count,
		unique_match,
		readout,
	}
}
