use crate::report::{Report, ReportSection};
use tracing::debug;

/// Accumulates sections during one evaluation pass.
///
/// Section keys are unique: adding a section whose key is already present
/// replaces the earlier one in place.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    sections: Vec<ReportSection>,
}

impl ReportBuilder {
    pub fn add_section(&mut self, section: ReportSection) {
        debug!(
            key = section.key(),
            is_ok = section.is_ok(),
            guidelines = section.guidelines().len(),
            "section added"
        );
        match self.sections.iter_mut().find(|s| s.key() == section.key()) {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
    }

    pub fn section(&self, key: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.key() == key)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn create_report(self, title: impl Into<String>) -> Report {
        Report::new(title, self.sections)
    }
}
