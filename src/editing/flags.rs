// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Point classification flags.
//!
//! Every point in a contour is reduced to one type bit (off-curve, smooth
//! or sharp) and one selection bit. A point that does not exist (past the
//! end of an open contour) is `NIL` and carries no other bits. Rule
//! patterns use the same bitset, where several bits in a slot mean "any of
//! these".

use crate::path::PathPoint;
use std::fmt;
use std::ops::BitOr;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointFlags(u8);

impl PointFlags {
    /// No point at this position
    pub const NIL: PointFlags = PointFlags(1 << 0);
    pub const OFF: PointFlags = PointFlags(1 << 1);
    pub const SMO: PointFlags = PointFlags(1 << 2);
    pub const SHA: PointFlags = PointFlags(1 << 3);
    pub const SEL: PointFlags = PointFlags(1 << 4);
    pub const UNS: PointFlags = PointFlags(1 << 5);

    /// Any point type
    pub const ANY: PointFlags = PointFlags(Self::OFF.0 | Self::SMO.0 | Self::SHA.0);
    /// Any on-curve point
    pub const ON: PointFlags = PointFlags(Self::SMO.0 | Self::SHA.0);

    const TYPE_MASK: u8 = Self::ANY.0;
    const SELECTION_MASK: u8 = Self::SEL.0 | Self::UNS.0;

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: PointFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: PointFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Does a classified point satisfy this pattern slot?
    ///
    /// A slot without type bits accepts any type; a slot without selection
    /// bits accepts both selected and unselected points. `NIL` only matches
    /// when the slot includes it.
    pub fn matches(self, point: PointFlags) -> bool {
        if point.is_nil() {
            return self.intersects(Self::NIL);
        }
        let types = self.0 & Self::TYPE_MASK;
        let selection = self.0 & Self::SELECTION_MASK;
        if types == 0 && selection == 0 {
            return false;
        }
        let type_ok = types == 0 || point.0 & types != 0;
        let selection_ok = selection == 0 || point.0 & selection != 0;
        type_ok && selection_ok
    }
}

impl BitOr for PointFlags {
    type Output = PointFlags;

    fn bitor(self, rhs: PointFlags) -> PointFlags {
        PointFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for PointFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(PointFlags, &str); 6] = [
            (PointFlags::NIL, "NIL"),
            (PointFlags::OFF, "OFF"),
            (PointFlags::SMO, "SMO"),
            (PointFlags::SHA, "SHA"),
            (PointFlags::SEL, "SEL"),
            (PointFlags::UNS, "UNS"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

/// Classify a point (or the absence of one) for pattern matching
pub fn classify(point: Option<&PathPoint>, is_selected: bool) -> PointFlags {
    let Some(point) = point else {
        return PointFlags::NIL;
    };
    let typ = if point.is_off_curve() {
        PointFlags::OFF
    } else if point.is_smooth() {
        PointFlags::SMO
    } else {
        PointFlags::SHA
    };
    let selection = if is_selected {
        PointFlags::SEL
    } else {
        PointFlags::UNS
    };
    typ | selection
}
