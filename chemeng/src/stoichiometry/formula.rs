//! Chemical formula parsing: group expansion and element counting

use crate::config::SolverConfig;
use crate::{ChemEngError, ChemEngResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::iter::Peekable;
use std::str::CharIndices;

static ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][a-z]?)([0-9]*)").expect("element pattern is valid"));

const FORMULA_PATTERN: &str = "element symbols (an uppercase letter optionally followed by a \
lowercase letter) each followed by an optional count, e.g. 'CH3CH2OH'";

/// Expand parenthesized groups, innermost first: `CH3(CH2)2OH` becomes `CH3CH2CH2OH`
pub fn expand_groups(input: &str, config: &SolverConfig) -> ChemEngResult<String> {
    let mut expander = GroupExpander {
        input,
        chars: input.char_indices().peekable(),
        config,
    };
    let expanded = expander.sequence(0)?;
    if let Some((position, _)) = expander.chars.next() {
        return Err(ChemEngError::malformed(
            input,
            format!("balanced parentheses (unmatched ')' at byte {})", position),
        ));
    }
    Ok(expanded)
}

struct GroupExpander<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    config: &'a SolverConfig,
}

impl GroupExpander<'_> {
    // Reads until a ')' (left unconsumed) or the end of input
    fn sequence(&mut self, depth: usize) -> ChemEngResult<String> {
        let mut out = String::new();
        while let Some(&(position, c)) = self.chars.peek() {
            match c {
                ')' => break,
                '(' => {
                    self.chars.next();
                    let group = self.group(position, depth + 1)?;
                    out.push_str(&group);
                }
                _ => {
                    self.chars.next();
                    out.push(c);
                }
            }
            self.check_expanded_size(out.len())?;
        }
        Ok(out)
    }

    fn group(&mut self, open_position: usize, depth: usize) -> ChemEngResult<String> {
        if depth > self.config.max_group_depth {
            return Err(ChemEngError::limit_exceeded(
                "max_group_depth",
                self.config.max_group_depth,
                depth,
                "Reduce the nesting of parenthesized groups",
            ));
        }

        let inner = self.sequence(depth)?;
        match self.chars.next() {
            Some((_, ')')) => {}
            _ => {
                return Err(ChemEngError::malformed(
                    self.input,
                    format!(
                        "balanced parentheses (unclosed '(' at byte {})",
                        open_position
                    ),
                ))
            }
        }

        let mut digits = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }

        let count = if digits.is_empty() {
            1
        } else {
            digits.parse::<usize>().unwrap_or(usize::MAX)
        };
        let expanded_len = inner.len().saturating_mul(count);
        self.check_expanded_size(expanded_len)?;
        Ok(inner.repeat(count))
    }

    fn check_expanded_size(&self, len: usize) -> ChemEngResult<()> {
        if len > self.config.max_expanded_bytes {
            return Err(ChemEngError::limit_exceeded(
                "max_expanded_bytes",
                format!("{} bytes", self.config.max_expanded_bytes),
                format!("{} bytes", len),
                "Reduce group repeat counts",
            ));
        }
        Ok(())
    }
}

/// Element counts of one molecule in order of first appearance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub counts: Vec<(String, f64)>,
}

impl Composition {
    /// Count elements in an expanded formula; repeated elements are summed
    pub fn parse(formula: &str) -> ChemEngResult<Self> {
        if formula.is_empty() {
            return Err(ChemEngError::malformed(formula, FORMULA_PATTERN));
        }

        let mut counts: Vec<(String, f64)> = Vec::new();
        let mut covered = 0;
        for captures in ELEMENT.captures_iter(formula) {
            let (Some(whole), Some(symbol)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() != covered {
                break;
            }
            covered = whole.end();

            let count = match captures.get(2).map(|m| m.as_str()) {
                None | Some("") => 1.0,
                Some(digits) => digits
                    .parse::<f64>()
                    .map_err(|_| ChemEngError::malformed(formula, FORMULA_PATTERN))?,
            };
            match counts.iter_mut().find(|(element, _)| element == symbol.as_str()) {
                Some((_, total)) => *total += count,
                None => counts.push((symbol.as_str().to_string(), count)),
            }
        }

        if covered != formula.len() {
            return Err(ChemEngError::malformed(formula, FORMULA_PATTERN));
        }
        Ok(Self { counts })
    }

    pub fn get(&self, element: &str) -> f64 {
        self.counts
            .iter()
            .find(|(symbol, _)| symbol == element)
            .map(|(_, count)| *count)
            .unwrap_or(0.0)
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(symbol, _)| symbol.as_str())
    }
}

/// Drop a leading stoichiometric coefficient: `2 H2O` and `2H2O` both become `H2O`
pub fn strip_coefficient(molecule: &str) -> &str {
    molecule
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.')
        .trim_start()
}
