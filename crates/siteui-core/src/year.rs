#![forbid(unsafe_code)]

//! Copyright-year slots.

use crate::effect::{Effect, Target};

/// Writes the current year into every year slot on the page.
#[derive(Debug, Clone, Copy)]
pub struct YearStamp {
    slots: usize,
}

impl YearStamp {
    #[must_use]
    pub const fn new(slots: usize) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn effects(self, year: i32) -> Vec<Effect> {
        let text = year.to_string();
        (0..self.slots)
            .map(|slot| Effect::set_text(Target::YearSlot(slot), text.clone()))
            .collect()
    }
}
