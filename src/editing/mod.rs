// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Rule-driven point editing

pub mod actions;
pub mod behavior;
pub mod drag;
pub mod edit_types;
pub mod flags;
pub mod matcher;
pub mod path_behavior;
pub mod rules;
pub mod selection;

pub use actions::{Action, ActionKind, Neighbors};
pub use behavior::{EditBehavior, EditEntry};
pub use drag::DragTransform;
pub use edit_types::{Modifiers, PointPosition, PointUpdate, RuleSetId};
pub use flags::{PointFlags, classify};
pub use matcher::{Match, find_match};
pub use path_behavior::PathEditBehavior;
pub use rules::{Rule, RuleSet};
pub use selection::Selection;
