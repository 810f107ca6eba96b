//! sing-box source rule set rendering

use serde_json::{json, Map, Value};

use crate::error::RuleResult;
use crate::formatter::{RuleFormatter, RuleGroups};
use crate::parser::RuleLine;

/// Rule set format version written to every file
pub const SINGBOX_RULE_SET_VERSION: u64 = 3;

/// Map a Clash rule style to its sing-box headless rule key
pub fn singbox_rule_type(style: &str) -> Option<&'static str> {
    match style {
        "DOMAIN" => Some("domain"),
        "DOMAIN-SUFFIX" => Some("domain_suffix"),
        "DOMAIN-KEYWORD" => Some("domain_keyword"),
        "IP-CIDR" | "IP-CIDR6" => Some("ip_cidr"),
        _ => None,
    }
}

/// Formatter producing sing-box JSON rule sets
#[derive(Debug, Clone, Copy, Default)]
pub struct SingboxFormatter;

impl SingboxFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Build the rule set document
    pub fn document(&self, rules: &[RuleLine]) -> Value {
        let mut groups = RuleGroups::default();
        for rule in rules {
            if let Some(rule_type) = singbox_rule_type(&rule.style) {
                groups.push(rule_type, rule.value.clone());
            }
        }

        let rules: Vec<Value> = groups
            .iter()
            .map(|(rule_type, values)| {
                let mut entry = Map::new();
                entry.insert(rule_type.to_string(), json!(values));
                Value::Object(entry)
            })
            .collect();

        json!({
            "version": SINGBOX_RULE_SET_VERSION,
            "rules": rules,
        })
    }
}

impl RuleFormatter for SingboxFormatter {
    fn format(&self, _name: &str, rules: &[RuleLine]) -> RuleResult<String> {
        let mut out = serde_json::to_string_pretty(&self.document(rules))?;
        out.push('\n');
        Ok(out)
    }
}
