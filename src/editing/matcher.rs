// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Pattern matching of rule tables against a point's neighborhood.

use super::actions::{ActionKind, Neighbors};
use super::flags::{PointFlags, classify};
use super::rules::Rule;
use crate::path::Contour;

/// Physical offsets of the pattern slots in forward orientation
const FORWARD: [isize; 6] = [-3, -2, -1, 0, 1, 2];

/// The rule that matched a point, and in which orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub action: ActionKind,
    pub constrained: bool,
    /// `1` if the rule matched as written, `-1` if it matched reversed
    pub direction: isize,
}

impl Match {
    /// Resolve logical neighbors to physical indices
    pub fn neighbor_indices(&self, contour: &Contour, index: usize) -> Neighbors<usize> {
        let at = |offset: isize| contour.neighbor_index(index, offset * self.direction);
        Neighbors {
            prev_prev_prev: at(-3),
            prev_prev: at(-2),
            prev: at(-1),
            point: index,
            next: at(1),
            next_next: at(2),
        }
    }
}

/// Classify the 7-point window `[i-3 ..= i+3]`
fn window_flags(
    contour: &Contour,
    index: usize,
    is_selected: &impl Fn(usize) -> bool,
) -> [PointFlags; 7] {
    let mut flags = [PointFlags::NIL; 7];
    for (slot, offset) in (-3..=3).enumerate() {
        flags[slot] = match contour.neighbor_index(index, offset) {
            Some(i) => classify(contour.get(i), is_selected(i)),
            None => PointFlags::NIL,
        };
    }
    flags
}

fn rule_matches(rule: &Rule, window: &[PointFlags; 7], direction: isize) -> bool {
    rule.pattern
        .iter()
        .zip(FORWARD)
        .all(|(pattern, offset)| {
            // Window slot 3 is the point itself
            let slot = (3 + offset * direction) as usize;
            pattern.matches(window[slot])
        })
}

/// Find the first rule matching `index`, trying each rule forward then
/// reversed
pub fn find_match(
    rules: &[Rule],
    index: usize,
    contour: &Contour,
    is_selected: impl Fn(usize) -> bool,
) -> Option<Match> {
    if index >= contour.len() {
        return None;
    }
    let window = window_flags(contour, index, &is_selected);
    rules.iter().find_map(|rule| {
        [1, -1]
            .into_iter()
            .find(|&direction| rule_matches(rule, &window, direction))
            .map(|direction| Match {
                action: rule.action,
                constrained: rule.constrain,
                direction,
            })
    })
}
