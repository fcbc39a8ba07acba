// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Rule tables for the edit behaviors.
//!
//! A rule is six pattern slots covering the window `[i-3, i-2, i-1, i,
//! i+1, i+2]`, a constrain flag and the action to take. The matcher tries
//! each rule forward and reversed, so a rule only needs to be written for
//! one winding direction. Order matters: the first rule that matches wins,
//! and every set ends with the plain "move the selected point" fallback.

use super::actions::ActionKind;
use super::edit_types::RuleSetId;
use super::flags::PointFlags;

/// One row of a rule table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// Pattern slots for `[i-3, i-2, i-1, i, i+1, i+2]`
    pub pattern: [PointFlags; 6],
    /// Constrained entries run after all unconstrained ones
    pub constrain: bool,
    pub action: ActionKind,
}

impl Rule {
    const fn new(pattern: [PointFlags; 6], constrain: bool, action: ActionKind) -> Self {
        Self {
            pattern,
            constrain,
            action,
        }
    }
}

/// An ordered list of rules plus the helper rules that feed them
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub id: RuleSetId,
    /// Main rules, first match wins
    pub rules: Vec<Rule>,
    /// Rules producing helper-transform entries; matched independently of
    /// the main rules
    pub helpers: Vec<Rule>,
}

impl RuleSet {
    pub fn for_id(id: RuleSetId) -> Self {
        match id {
            RuleSetId::Default => Self::from_rules(id, default_rules(), Vec::new()),
            RuleSetId::Constrain => {
                let mut rules = constrain_rules();
                rules.extend(default_rules());
                Self::from_rules(id, rules, Vec::new())
            }
            RuleSetId::Alternate => Self::from_rules(id, alternate_rules(), alternate_helpers()),
            RuleSetId::AlternateConstrain => {
                let mut rules = constrain_rules();
                rules.extend(alternate_rules());
                Self::from_rules(id, rules, alternate_helpers())
            }
        }
    }

    /// Build a rule set from explicit tables
    pub fn from_rules(id: RuleSetId, rules: Vec<Rule>, helpers: Vec<Rule>) -> Self {
        Self { id, rules, helpers }
    }
}

const NIL: PointFlags = PointFlags::NIL;
const OFF: PointFlags = PointFlags::OFF;
const SMO: PointFlags = PointFlags::SMO;
const SHA: PointFlags = PointFlags::SHA;
const SEL: PointFlags = PointFlags::SEL;
const UNS: PointFlags = PointFlags::UNS;
const ANY: PointFlags = PointFlags::ANY;
const ON: PointFlags = PointFlags::ON;

/// Generic fallback, always last
pub fn fallback_rule() -> Rule {
    Rule::new(
        [ANY | NIL, ANY | NIL, ANY | NIL, ANY | SEL, ANY | NIL, ANY | NIL],
        false,
        ActionKind::Move,
    )
}

fn default_rules() -> Vec<Rule> {
    let mut rules = vec![default_pinned_smooth()];
    rules.extend(default_middle());
    rules.extend(default_tail());
    rules
}

/// Smooth point between two moving handles has no defined position
fn default_pinned_smooth() -> Rule {
    Rule::new(
        [ANY | NIL, ANY | NIL, OFF | SEL, SMO | UNS, OFF | SEL, ANY | NIL],
        false,
        ActionKind::DontMove,
    )
}

/// Default rules 2 to 10
fn default_middle() -> Vec<Rule> {
    vec![
        // Unselected smooth point between two selected on-curve points
        Rule::new(
            [ANY | NIL, ANY | NIL, ON | SEL, SMO | UNS, ON | SEL, ANY | NIL],
            true,
            ActionKind::Interpolate,
        ),
        Rule::new(
            [ANY | NIL, ON | SEL, OFF | UNS, SMO | UNS, ON | SEL, ANY | NIL],
            true,
            ActionKind::InterpolatePrevPrevNext,
        ),
        // Selected point on the far side of an unselected smooth point
        Rule::new(
            [ANY | NIL, ANY | SEL, SMO | UNS, ANY | SEL, ANY | NIL, ANY | NIL],
            true,
            ActionKind::ConstrainPrevAngle,
        ),
        // Selected tangent point together with its handle
        Rule::new(
            [ANY | NIL, ANY | NIL, ON | UNS, SMO | SEL, OFF | SEL, ANY | NIL],
            true,
            ActionKind::ConstrainMiddle,
        ),
        Rule::new(
            [ANY | NIL, ON | UNS, SMO | SEL, OFF | SEL, ANY | NIL, ANY | NIL],
            true,
            ActionKind::ConstrainPrevAngle,
        ),
        // Selected handle of a fixed tangent point slides along the line
        Rule::new(
            [ANY | NIL, ON | UNS, SMO | UNS, OFF | SEL, ANY | NIL, ANY | NIL],
            true,
            ActionKind::ConstrainPrevAngle,
        ),
        // Selected tangent point: its handle keeps the line's angle
        Rule::new(
            [ANY | NIL, ON | UNS, SMO | SEL, OFF | UNS, ANY | NIL, ANY | NIL],
            true,
            ActionKind::RotateNext,
        ),
        // Opposite handle of an unselected smooth point
        Rule::new(
            [ANY | NIL, ANY | SEL, SMO | UNS, OFF | UNS, ANY | NIL, ANY | NIL],
            true,
            ActionKind::RotateNext,
        ),
        Rule::new(
            [ANY | NIL, ANY, SMO | UNS, OFF | UNS, ON | SEL, ANY | NIL],
            true,
            ActionKind::TangentIntersect,
        ),
    ]
}

/// Default rules 11 to 13
fn default_tail() -> Vec<Rule> {
    vec![
        // Single handle between a moving and a fixed on-curve point
        Rule::new(
            [ANY | NIL, ANY | NIL, ON | SEL, OFF | UNS, ON | UNS, ANY | NIL],
            true,
            ActionKind::HandleIntersect,
        ),
        // Handle follows its selected on-curve point
        Rule::new(
            [ANY | NIL, ANY | NIL, ON | SEL, OFF | UNS, ANY | NIL, ANY | NIL],
            false,
            ActionKind::Move,
        ),
        fallback_rule(),
    ]
}

fn constrain_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            [ANY | NIL, ANY | NIL, SHA | UNS, OFF | SEL, SHA | UNS, ANY | NIL],
            true,
            ActionKind::ConstrainHandleIntersect,
        ),
        Rule::new(
            [ANY | NIL, ANY, SMO | UNS, OFF | SEL, SHA | UNS, ANY | NIL],
            true,
            ActionKind::ConstrainHandleIntersectPrev,
        ),
        Rule::new(
            [ANY | NIL, ANY | NIL, ON | UNS, OFF | SEL, ANY | NIL, ANY | NIL],
            true,
            ActionKind::ConstrainHandle,
        ),
        // Open contour end points snap around the previous on-curve point
        Rule::new(
            [ANY | NIL, ON | UNS, OFF | UNS, ON | SEL, NIL, ANY | NIL],
            false,
            ActionKind::ConstrainAroundPrevPrev,
        ),
        Rule::new(
            [ON | UNS, OFF | UNS, OFF | UNS, ON | SEL, NIL, ANY | NIL],
            false,
            ActionKind::ConstrainAroundPrevPrevPrev,
        ),
    ]
}

fn alternate_rules() -> Vec<Rule> {
    let mut rules = vec![
        default_pinned_smooth(),
        // Two selected smooth points slide along their shared tangent
        Rule::new(
            [ANY | NIL, ANY | UNS, SMO | SEL, SMO | SEL, ANY | UNS, ANY | NIL],
            true,
            ActionKind::ConstrainMiddleTwo,
        ),
        Rule::new(
            [ANY | NIL, ANY | SEL, SMO | UNS, OFF | UNS, SMO | UNS, ANY],
            true,
            ActionKind::TangentIntersectLive,
        ),
    ];
    rules.extend(default_middle());
    rules.push(scaled_segment_pattern(ActionKind::ScaleHandle));
    rules.push(Rule::new(
        [ANY | NIL, SHA | SEL, OFF | UNS, OFF | UNS, ON | UNS, ANY | NIL],
        true,
        ActionKind::ScaleHandleFromPrev,
    ));
    rules.extend(default_tail());
    rules
}

fn alternate_helpers() -> Vec<Rule> {
    vec![scaled_segment_pattern(ActionKind::ComputeHelperTransform)]
}

/// First handle of a cubic segment whose start corner is selected
fn scaled_segment_pattern(action: ActionKind) -> Rule {
    Rule::new(
        [ANY | NIL, ANY | NIL, SHA | SEL, OFF | UNS, OFF | UNS, ON | UNS],
        true,
        action,
    )
}
