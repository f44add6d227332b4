mod builder;
mod error;
mod guideline;
mod report;
mod section;

pub use builder::ReportBuilder;
pub use error::ReportError;
pub use guideline::{Artifact, Guideline};
pub use report::Report;
pub use section::{ReportSection, SectionMapping};
