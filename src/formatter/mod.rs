//! Platform rule set formatting module
//!
//! Each platform maps Clash rule styles onto its own rule types and renders
//! the grouped values in its native layout.

pub mod egern;
pub mod readme;
pub mod singbox;

pub use egern::EgernFormatter;
pub use singbox::SingboxFormatter;

use crate::parser::RuleLine;

/// Values grouped by output rule type, in first-seen type order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleGroups {
    groups: Vec<(&'static str, Vec<String>)>,
}

impl RuleGroups {
    pub fn push(&mut self, rule_type: &'static str, value: String) {
        match self.groups.iter_mut().find(|(name, _)| *name == rule_type) {
            Some((_, values)) => values.push(value),
            None => self.groups.push((rule_type, vec![value])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.groups.iter().map(|(name, values)| (*name, values.as_slice()))
    }

    /// Total number of values across all groups
    pub fn value_count(&self) -> usize {
        self.groups.iter().map(|(_, values)| values.len()).sum()
    }
}

/// Renders parsed rule lines into a platform rule set file
pub trait RuleFormatter {
    /// Render the rule set named `name` from `rules`
    fn format(&self, name: &str, rules: &[RuleLine]) -> crate::error::RuleResult<String>;
}
