//! Egern rule set rendering

use crate::error::RuleResult;
use crate::formatter::{RuleFormatter, RuleGroups};
use crate::parser::RuleLine;

/// Map a Clash rule style to its Egern rule set key
pub fn egern_rule_type(style: &str) -> Option<&'static str> {
    match style {
        "DOMAIN" => Some("domain_set"),
        "DOMAIN-SUFFIX" => Some("domain_suffix_set"),
        "DOMAIN-KEYWORD" => Some("domain_keyword_set"),
        "DOMAIN-WILDCARD" => Some("domain_wildcard_set"),
        "IP-CIDR" => Some("ip_cidr_set"),
        "IP-CIDR6" => Some("ip_cidr6_set"),
        _ => None,
    }
}

/// Wildcard patterns must be quoted so YAML does not read `*` as an alias
fn needs_quoting(rule_type: &str) -> bool {
    rule_type == "domain_wildcard_set"
}

/// Formatter producing Egern YAML rule sets
#[derive(Debug, Clone, Copy, Default)]
pub struct EgernFormatter;

impl EgernFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Body lines without the header comments, plus the rule count
    pub fn body_lines(&self, rules: &[RuleLine]) -> (Vec<String>, usize) {
        let mut groups = RuleGroups::default();
        let mut no_resolve = false;

        for rule in rules {
            let Some(rule_type) = egern_rule_type(&rule.style) else {
                continue;
            };
            no_resolve |= rule.is_no_resolve();
            let value = if needs_quoting(rule_type) {
                format!("\"{}\"", rule.value)
            } else {
                rule.value.clone()
            };
            groups.push(rule_type, value);
        }

        let mut lines = Vec::new();
        if no_resolve {
            lines.push("no_resolve: true".to_string());
        }
        for (rule_type, values) in groups.iter() {
            lines.push(format!("{}:", rule_type));
            lines.extend(values.iter().map(|v| format!("  - {}", v)));
        }

        (lines, groups.value_count())
    }
}

impl RuleFormatter for EgernFormatter {
    fn format(&self, name: &str, rules: &[RuleLine]) -> RuleResult<String> {
        let (lines, count) = self.body_lines(rules);

        let mut out = format!("# 规则名称: {}\n# 规则统计: {}\n\n", name, count);
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}
