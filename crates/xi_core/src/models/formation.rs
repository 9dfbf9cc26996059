use serde::{Deserialize, Serialize};

/// Slot labels of the 4-3-3 starting formation, in output order
pub const FORMATION_433: [&str; 11] = [
    "Goalkeeper",
    "Centre-back",
    "Centre-back",
    "Right-back",
    "Left-back",
    "Pivot",
    "Attacking-midfielder",
    "Midfielder",
    "Striker",
    "Right-winger",
    "Left-winger",
];

/// Ordered multiset of slot labels to fill.
///
/// Labels may repeat (two centre-backs). Order only fixes the output order of
/// the lineup; it has no effect on which assignment is optimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    slots: Vec<String>,
}

impl Formation {
    pub fn new<S: Into<String>>(slots: impl IntoIterator<Item = S>) -> Self {
        Self {
            slots: slots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn four_three_three() -> Self {
        Self::new(FORMATION_433)
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for Formation {
    fn default() -> Self {
        Self::four_three_three()
    }
}
