//! Step-to-content assignment
//!
//! Steps are placed greedily, one at a time, in input order. Each step takes
//! the best unused candidate whose action matches, scored by value similarity
//! and nudged toward forward document order. There is no backtracking: an
//! earlier step never gives up its match for a later one. Optimal bipartite
//! matching would cost more than it buys for documentation, where steps are
//! nearly always written in reading order.
//!
//! Scores:
//!
//! | Situation                                   | Score                                  |
//! |---------------------------------------------|----------------------------------------|
//! | action differs                              | ineligible                             |
//! | either side has no value                    | 0.3                                    |
//! | values equal                                | 1.0                                    |
//! | one value contains the other                | 0.8                                    |
//! | otherwise                                   | 0.5 × common words / max(word counts)  |
//!
//! After the first accepted step, a candidate starting after the previously
//! accepted match gets +0.2, any other candidate −0.1. A candidate is accepted
//! at 0.3 or above.

use crate::scanner::ContentMatch;
use crate::step::Step;
use std::collections::HashSet;

pub const ACCEPT_THRESHOLD: f64 = 0.3;
pub const FORWARD_BONUS: f64 = 0.2;
pub const BACKWARD_PENALTY: f64 = 0.1;

const EXACT: f64 = 1.0;
const CONTAINS: f64 = 0.8;
const OVERLAP_WEIGHT: f64 = 0.5;
const ACTION_ONLY: f64 = 0.3;

/// Where one step ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement<'m> {
    Matched {
        content: &'m ContentMatch,
        /// Index of `content` in the candidate slice.
        index: usize,
        score: f64,
    },
    Unmatched {
        suggested_offset: usize,
    },
}

/// The resolved (or unresolved) placement of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment<'s, 'm> {
    pub step: &'s Step,
    pub placement: Placement<'m>,
}

impl<'s, 'm> Assignment<'s, 'm> {
    pub fn content(&self) -> Option<&'m ContentMatch> {
        match self.placement {
            Placement::Matched { content, .. } => Some(content),
            Placement::Unmatched { .. } => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self.placement {
            Placement::Matched { score, .. } => Some(score),
            Placement::Unmatched { .. } => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.placement, Placement::Matched { .. })
    }
}

/// Greedy assigner over one document's candidates.
///
/// State survives across calls to [`Assigner::assign`], so several tests in
/// one document never share a match and keep a common notion of "previous".
pub struct Assigner<'m> {
    matches: &'m [ContentMatch],
    used: Vec<bool>,
    previous: Option<&'m ContentMatch>,
}

impl<'m> Assigner<'m> {
    pub fn new(matches: &'m [ContentMatch]) -> Self {
        Assigner {
            matches,
            used: vec![false; matches.len()],
            previous: None,
        }
    }

    /// Place each step in order. Returns one assignment per step, in input order.
    pub fn assign<'s>(&mut self, steps: &'s [Step]) -> Vec<Assignment<'s, 'm>> {
        steps.iter().map(|step| self.place(step)).collect()
    }

    fn place<'s>(&mut self, step: &'s Step) -> Assignment<'s, 'm> {
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in self.matches.iter().enumerate() {
            if self.used[index] || !candidate.supports(step.action()) {
                continue;
            }
            let score = similarity(step, candidate) + self.sequential_adjustment(candidate);
            // strict: the earliest candidate wins ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score >= ACCEPT_THRESHOLD => {
                let content = &self.matches[index];
                self.used[index] = true;
                self.previous = Some(content);
                tracing::debug!(
                    action = %step.action(),
                    line = content.line,
                    score,
                    "step matched"
                );
                Assignment {
                    step,
                    placement: Placement::Matched {
                        content,
                        index,
                        score,
                    },
                }
            }
            _ => {
                let suggested_offset = self.previous.map_or(0, |m| m.end);
                tracing::debug!(action = %step.action(), suggested_offset, "step unmatched");
                Assignment {
                    step,
                    placement: Placement::Unmatched { suggested_offset },
                }
            }
        }
    }

    fn sequential_adjustment(&self, candidate: &ContentMatch) -> f64 {
        match self.previous {
            None => 0.0,
            Some(previous) if candidate.start > previous.start => FORWARD_BONUS,
            Some(_) => -BACKWARD_PENALTY,
        }
    }
}

/// Assign a single step list against a fresh candidate set.
pub fn assign<'s, 'm>(steps: &'s [Step], matches: &'m [ContentMatch]) -> Vec<Assignment<'s, 'm>> {
    Assigner::new(matches).assign(steps)
}

/// Unadjusted similarity between a step and a candidate; 0.0 when the
/// candidate cannot carry the step's action.
pub fn similarity(step: &Step, candidate: &ContentMatch) -> f64 {
    if !candidate.supports(step.action()) {
        return 0.0;
    }

    let step_value = step.comparable_value();
    let step_value = step_value.as_deref().map(str::trim).unwrap_or_default();
    let match_value = candidate.value().map(str::trim).unwrap_or_default();
    value_similarity(step_value, match_value)
}

fn value_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return ACTION_ONLY;
    }
    if a == b || same_url(a, b) {
        return EXACT;
    }

    let (la, lb) = (a.to_lowercase(), b.to_lowercase());
    if la.contains(&lb) || lb.contains(&la) {
        return CONTAINS;
    }

    let wa = words(&la);
    let wb = words(&lb);
    let largest = wa.len().max(wb.len());
    if largest == 0 {
        return 0.0;
    }
    let common = wa.intersection(&wb).count();
    OVERLAP_WEIGHT * (common as f64 / largest as f64)
}

fn words(text: &str) -> HashSet<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn same_url(a: &str, b: &str) -> bool {
    match (url::Url::parse(a), url::Url::parse(b)) {
        (Ok(ua), Ok(ub)) => ua.has_host() && ua == ub,
        _ => false,
    }
}
