use crate::report::Guideline;
use serde::Serialize;

/// Outcome of one heuristic check: a titled list of guidelines plus flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    key: String,
    title: String,
    guidelines: Vec<Guideline>,
    include_in_report: bool,
    is_ok: bool,
}

/// Owned, render-ready snapshot of a [`ReportSection`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionMapping {
    pub guidelines: Vec<Guideline>,
    pub title: String,
    pub include_in_report: bool,
    pub is_ok: bool,
}

impl ReportSection {
    /// New section included in the report and not ok until a check says so.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_include(key, true)
    }

    pub fn with_include(key: impl Into<String>, include_in_report: bool) -> Self {
        let key = key.into();
        Self {
            title: key.replace('_', " "),
            key,
            guidelines: Vec::new(),
            include_in_report,
            is_ok: false,
        }
    }

    pub fn append_guideline(&mut self, guideline: impl Into<Guideline>) {
        self.guidelines.push(guideline.into());
    }

    pub fn set_is_ok(&mut self, is_ok: bool) {
        self.is_ok = is_ok;
    }

    pub fn set_include_in_report(&mut self, include: bool) {
        self.include_in_report = include;
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn guidelines(&self) -> &[Guideline] {
        &self.guidelines
    }

    pub fn is_ok(&self) -> bool {
        self.is_ok
    }

    pub fn include_in_report(&self) -> bool {
        self.include_in_report
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.guidelines.iter().filter_map(Guideline::as_text)
    }

    pub fn artifact_count(&self) -> usize {
        self.guidelines
            .iter()
            .filter(|g| g.as_artifact().is_some())
            .count()
    }

    pub fn to_mapping(&self) -> SectionMapping {
        SectionMapping {
            guidelines: self.guidelines.clone(),
            title: self.title.clone(),
            include_in_report: self.include_in_report,
            is_ok: self.is_ok,
        }
    }
}
