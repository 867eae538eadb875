//! Family composition and validation
//!
//! A `FamilyComposition` describes which heirs survive the deceased and in
//! what counts. It is a value object: constructed, validated, consumed by
//! one calculation, and discarded. Validation reports every violated
//! constraint at once so the caller can present all problems together.
//!
//! # Validation Rules
//!
//! - counts are non-negative by construction (`u32`)
//! - singular classes (Husband, Father, Mother, each grandparent) are
//!   capped at one
//! - Husband and Wife are mutually exclusive
//! - at least one heir must be present

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FaraidError;
use crate::heir::HeirClass;

/// Which heirs exist and in what counts
///
/// Absent classes are simply not stored; `count` returns 0 for them.
/// Multiple wives are a count on the Wife class sharing one fraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyComposition {
    heirs: BTreeMap<HeirClass, u32>,
}

impl FamilyComposition {
    /// Creates an empty composition; populate it with [`Self::with`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `count` of the given class
    ///
    /// A zero count removes the class, so the internal map only ever holds
    /// heirs that are actually present.
    pub fn with(mut self, class: HeirClass, count: u32) -> Self {
        if count == 0 {
            self.heirs.remove(&class);
        } else {
            self.heirs.insert(class, count);
        }
        self
    }

    /// Number of living heirs of the class
    pub fn count(&self, class: HeirClass) -> u32 {
        self.heirs.get(&class).copied().unwrap_or(0)
    }

    /// True if at least one heir of the class survives
    pub fn has(&self, class: HeirClass) -> bool {
        self.count(class) > 0
    }

    /// Classes present, in canonical presentation order
    pub fn present_classes(&self) -> impl Iterator<Item = HeirClass> + '_ {
        self.heirs.keys().copied()
    }

    /// The surviving spouse class, if any
    pub fn spouse(&self) -> Option<HeirClass> {
        if self.has(HeirClass::Husband) {
            Some(HeirClass::Husband)
        } else if self.has(HeirClass::Wife) {
            Some(HeirClass::Wife)
        } else {
            None
        }
    }

    /// True if any son or daughter survives
    pub fn has_descendant(&self) -> bool {
        self.has(HeirClass::Son) || self.has(HeirClass::Daughter)
    }

    /// True if a son survives
    pub fn has_male_descendant(&self) -> bool {
        self.has(HeirClass::Son)
    }

    /// Total sibling head count across every sibling type, from the raw
    /// composition. Blocked siblings still count: the mother's reduction
    /// from 1/3 to 1/6 looks at who exists, not at who inherits.
    pub fn sibling_count(&self) -> u32 {
        HeirClass::ALL
            .iter()
            .filter(|c| c.is_sibling())
            .map(|c| self.count(*c))
            .sum()
    }

    /// Validates the structural constraints, reporting every violation
    ///
    /// # Errors
    ///
    /// [`FaraidError::InvalidComposition`] listing all violated
    /// constraints, not just the first.
    pub fn validate(&self) -> Result<(), FaraidError> {
        let mut violations = Vec::new();

        if self.heirs.is_empty() {
            violations.push("At least one heir must be present".to_string());
        }

        if self.has(HeirClass::Husband) && self.has(HeirClass::Wife) {
            violations.push(
                "Husband and Wife are mutually exclusive: a deceased has at most \
                 one gender-appropriate spousal relation"
                    .to_string(),
            );
        }

        for class in HeirClass::ALL {
            let count = self.count(class);
            if class.is_singular() && count > 1 {
                violations.push(format!(
                    "{} count must be 0 or 1, got {}",
                    class.label(),
                    count
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(FaraidError::invalid_composition(violations))
        }
    }
}
