use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::ScoreType;

/// Tree describing how a score was computed for one doc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub value: ScoreType,
    pub description: String,
    pub details: Vec<Explanation>,
}

impl Explanation {
    pub fn new(value: ScoreType, description: impl Into<String>) -> Self {
        Self { value, description: description.into(), details: vec![] }
    }

    pub fn with_details(
        value: ScoreType,
        description: impl Into<String>,
        details: Vec<Explanation>,
    ) -> Self {
        Self { value, description: description.into(), details }
    }

    pub fn add_detail(&mut self, detail: Explanation) {
        self.details.push(detail);
    }

    pub fn is_match(&self) -> bool {
        self.value > 0.0
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}{} = {}", "  ".repeat(depth), self.value, self.description)?;
        for detail in self.details.iter() {
            detail.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
