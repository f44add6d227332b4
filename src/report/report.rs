use crate::report::{ReportSection, SectionMapping};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

/// Finalized, read-only collection of sections under a title.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    title: String,
    sections: Vec<ReportSection>,
}

#[derive(Serialize)]
struct ReportMapping<'a> {
    title: &'a str,
    sections: Vec<SectionMapping>,
}

impl Report {
    pub(crate) fn new(title: impl Into<String>, sections: Vec<ReportSection>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn section(&self, key: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.key() == key)
    }

    /// Section snapshots in insertion order.
    pub fn to_mapping(&self) -> Vec<SectionMapping> {
        self.sections.iter().map(ReportSection::to_mapping).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ReportMapping {
            title: &self.title,
            sections: self.to_mapping(),
        })
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(self.to_json()?.as_bytes())?;
        writeln!(w)?;
        w.flush()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        for s in &self.sections {
            let status = if s.is_ok() { "ok" } else { "!!" };
            let shown = if s.include_in_report() { "" } else { " (hidden)" };
            writeln!(f, "  [{status}] {}{shown}", s.title())?;
            for t in s.texts() {
                writeln!(f, "       {t}")?;
            }
            let n = s.artifact_count();
            if n > 0 {
                writeln!(f, "       + {n} plot(s)")?;
            }
        }
        Ok(())
    }
}
