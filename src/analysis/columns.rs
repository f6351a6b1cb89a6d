//! Tolerant column-name resolution.
//!
//! Producers rename columns between versions (`metric` vs `metric_name`,
//! `cpu` vs `cpu_percent`, ...). A [`ColumnResolver`] holds an ordered list
//! of matchers and returns the first column any of them accepts.

use std::fmt;

/// A single rule for recognizing a column header. Comparison is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMatcher {
    /// Header equals this name.
    Exact(String),
    /// Header contains any of these fragments. The first such header wins.
    Substring(Vec<String>),
}

impl ColumnMatcher {
    fn find(&self, lowered: &[String]) -> Option<usize> {
        match self {
            ColumnMatcher::Exact(name) => {
                let name = name.to_lowercase();
                lowered.iter().position(|h| *h == name)
            }
            ColumnMatcher::Substring(fragments) => {
                let fragments: Vec<String> = fragments.iter().map(|f| f.to_lowercase()).collect();
                lowered
                    .iter()
                    .position(|h| fragments.iter().any(|f| h.contains(f.as_str())))
            }
        }
    }
}

impl fmt::Display for ColumnMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnMatcher::Exact(name) => write!(f, "{}", name),
            ColumnMatcher::Substring(fragments) => write!(f, "*{}*", fragments.join("*|*")),
        }
    }
}

/// Ordered chain of matchers.
#[derive(Debug, Clone, Default)]
pub struct ColumnResolver {
    matchers: Vec<ColumnMatcher>,
}

impl ColumnResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver trying each name exactly, in order.
    pub fn exact<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new().with_exact(names)
    }

    /// Append exact-name matchers.
    pub fn with_exact<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.matchers.extend(
            names
                .iter()
                .map(|n| ColumnMatcher::Exact(n.as_ref().to_string())),
        );
        self
    }

    /// Append one substring matcher covering all `fragments`.
    pub fn with_substrings<S: AsRef<str>>(mut self, fragments: &[S]) -> Self {
        if !fragments.is_empty() {
            self.matchers.push(ColumnMatcher::Substring(
                fragments.iter().map(|f| f.as_ref().to_string()).collect(),
            ));
        }
        self
    }

    /// Index of the first header accepted by the earliest matcher.
    pub fn resolve(&self, headers: &[String]) -> Option<usize> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        self.matchers.iter().find_map(|m| m.find(&lowered))
    }

    /// Human-readable list of accepted names, for diagnostics.
    pub fn describe(&self) -> String {
        self.matchers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}
