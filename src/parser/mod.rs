//! Rule file discovery and rule list parsing
//!
//! Discovery walks a tree for files matching a suffix or an extension. The
//! rule list parser reads the Clash-style `STYLE,value[,field]` lines the
//! platform converters consume.

pub mod directory;
pub mod filter;

pub use directory::{find_platform_files, find_rule_files};

/// One parsed rule list line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    /// Rule type, e.g. `DOMAIN-SUFFIX`
    pub style: String,
    /// Matched value, e.g. `apple.com`
    pub value: String,
    /// Trailing option such as `no-resolve`; empty when absent
    pub field: String,
}

impl RuleLine {
    /// Parse a single line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let mut parts = line.splitn(3, ',');
        let mut next = || parts.next().unwrap_or_default().to_string();
        Some(Self {
            style: next(),
            value: next(),
            field: next(),
        })
    }

    pub fn is_no_resolve(&self) -> bool {
        self.field == "no-resolve"
    }
}

/// Parse every rule line in `text`, skipping blanks and comments
pub fn parse_rules(text: &str) -> Vec<RuleLine> {
    text.lines().filter_map(RuleLine::parse).collect()
}
