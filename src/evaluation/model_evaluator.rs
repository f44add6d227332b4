use crate::core::ScoreMatrix;
use crate::metrics::{
    ConfusionMatrix, CumulativeGain, MetricsError, Roc, RocCurve, TargetDistribution,
    accuracy_score,
};
use crate::models::Model;
use crate::report::{Artifact, Report, ReportBuilder, ReportError, ReportSection};
use crate::settings::HeuristicSettings;
use tracing::debug;

/// Outcome of the balance check, handed to the accuracy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Balanced,
    Imbalanced,
}

impl Balance {
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, Balance::Balanced)
    }
}

/// Where an AUC value falls among the configured ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AucBand {
    Low,
    Acceptable,
    /// Neither low nor acceptable: the gap between the two ranges, values
    /// above the acceptable range, and values outside `[0, 1]`.
    Unbanded,
}

/// Builds the single-model evaluation report, one section per check.
pub struct ModelEvaluator<'a> {
    model: &'a dyn Model,
    settings: HeuristicSettings,
    report: ReportBuilder,
}

impl<'a> ModelEvaluator<'a> {
    pub fn new(model: &'a dyn Model) -> Self {
        Self::with_settings(model, HeuristicSettings::default())
    }

    pub fn with_settings(model: &'a dyn Model, settings: HeuristicSettings) -> Self {
        Self {
            model,
            settings,
            report: ReportBuilder::default(),
        }
    }

    pub fn model(&self) -> &dyn Model {
        self.model
    }

    pub fn section(&self, key: &str) -> Option<&ReportSection> {
        self.report.section(key)
    }

    pub fn evaluate_balance(&mut self, y_true: &[usize]) -> Result<Balance, ReportError> {
        let mut section = ReportSection::new("balance");
        let distribution = TargetDistribution::from_labels(y_true)?;

        let balance = if distribution.is_balanced(self.settings.balance_tolerance) {
            section.set_is_ok(true);
            section.append_guideline("your model is balanced");
            Balance::Balanced
        } else {
            section.set_is_ok(false);
            section.append_guideline("Your test set is highly imbalanced");
            section.append_guideline(Artifact::TargetDistribution(distribution));
            section.append_guideline(self.settings.guide_link());
            Balance::Imbalanced
        };

        debug!(model = self.model.name(), ?balance, "balance evaluated");
        self.report.add_section(section);
        Ok(balance)
    }

    /// Reports the raw accuracy and, above the threshold, whether it can be
    /// trusted given the `balance` outcome.
    pub fn evaluate_accuracy(
        &mut self,
        y_true: &[usize],
        y_pred: &[usize],
        balance: Balance,
    ) -> Result<f64, ReportError> {
        let mut section = ReportSection::new("accuracy");
        let accuracy = accuracy_score(y_true, y_pred)?;

        section.append_guideline(format!("Accuracy is {accuracy:?}"));
        if accuracy >= self.settings.accuracy_threshold {
            if balance.is_ok() {
                section.set_is_ok(true);
                section.append_guideline("Your model is accurate");
            } else {
                section.set_is_ok(false);
                section.append_guideline(
                    "Please note your model is unbalanced, so high accuracy could be misleading",
                );
            }
        }

        debug!(model = self.model.name(), accuracy, "accuracy evaluated");
        self.report.add_section(section);
        Ok(accuracy)
    }

    /// Bands the AUC of every class curve built from `y_score`.
    ///
    /// A class whose curve is undefined on `y_true` (only positives or only
    /// negatives) is noted and counted as [`AucBand::Unbanded`].
    pub fn evaluate_auc(
        &mut self,
        y_true: &[usize],
        y_score: &ScoreMatrix,
    ) -> Result<Vec<AucBand>, ReportError> {
        let multiclass = y_score.is_multiclass();
        let mut curves = Vec::new();
        for (i, attempt) in Roc::per_class(y_true, y_score)?.into_iter().enumerate() {
            match attempt {
                Ok(curve) => curves.push(Ok(curve)),
                Err(e) if e.is_single_class() => {
                    let label = if multiclass {
                        format!("(class {i})")
                    } else {
                        format!("class {i}")
                    };
                    curves.push(Err((label, e)));
                }
                Err(e) => return Err(e.into()),
            }
        }
        self.band_curves(curves)
    }

    /// Bands the AUC of every curve of `roc`.
    ///
    /// One low curve is enough to keep the section in the report and not ok.
    pub fn evaluate_roc(&mut self, roc: &Roc) -> Result<Vec<AucBand>, ReportError> {
        self.band_curves(roc.curves.iter().cloned().map(Ok).collect())
    }

    fn band_curves(
        &mut self,
        curves: Vec<Result<RocCurve, (String, MetricsError)>>,
    ) -> Result<Vec<AucBand>, ReportError> {
        let mut section = ReportSection::new("auc");
        let mut bands = Vec::with_capacity(curves.len());

        for (i, curve) in curves.into_iter().enumerate() {
            let curve = match curve {
                Ok(curve) => curve,
                Err((label, e)) => {
                    debug!(label = %label, error = %e, "auc undefined");
                    section.append_guideline(format!(
                        "AUC is undefined for {}: {e}",
                        class_name(&label)
                    ));
                    bands.push(AucBand::Unbanded);
                    continue;
                }
            };

            let roc_auc = curve.auc()?;
            let label = curve.label.clone().unwrap_or_else(|| format!("class {i}"));
            let band = self.auc_band(roc_auc);
            debug!(label = %label, roc_auc, ?band, "auc banded");

            if band == AucBand::Low {
                section.append_guideline(format!(
                    "Area under curve is low for {}",
                    class_name(&label)
                ));
                let class_roc = Roc::from_curves(vec![curve.with_label(label)]);
                section.append_guideline(Artifact::Roc(class_roc));
                section.append_guideline(self.settings.guide_link());
            }
            bands.push(band);
        }

        let any_low = bands.contains(&AucBand::Low);
        section.set_is_ok(!any_low);
        section.set_include_in_report(any_low);

        self.report.add_section(section);
        Ok(bands)
    }

    /// Records an `auc` section stating that no scores were available.
    pub fn note_missing_scores(&mut self) {
        let mut section = ReportSection::with_include("auc", false);
        section.append_guideline("Scores were not provided, AUC was not evaluated");
        self.report.add_section(section);
    }

    pub fn auc_band(&self, roc_auc: f64) -> AucBand {
        if self.settings.auc_low_range.contains(roc_auc) {
            AucBand::Low
        } else if self.settings.auc_acceptable_range.contains(roc_auc) {
            AucBand::Acceptable
        } else {
            AucBand::Unbanded
        }
    }

    /// Confusion matrix, plus the ROC curves and (binary scores only) the
    /// cumulative gain curves when scores are given.
    ///
    /// Curves that are undefined on `y_true` are replaced by a note.
    pub fn generate_general_stats(
        &mut self,
        y_true: &[usize],
        y_pred: &[usize],
        y_score: Option<&ScoreMatrix>,
    ) -> Result<(), ReportError> {
        let mut section = ReportSection::new("general_stats");
        section.set_is_ok(true);

        let cm = ConfusionMatrix::from_labels(y_true, y_pred, None)?;
        section.append_guideline(Artifact::ConfusionMatrix(cm));

        if let Some(scores) = y_score {
            match Roc::from_raw_data(y_true, scores) {
                Ok(roc) => section.append_guideline(Artifact::Roc(roc)),
                Err(e) if e.is_single_class() => {
                    section.append_guideline(format!("ROC curve not plotted: {e}"))
                }
                Err(e) => return Err(e.into()),
            }
            if !scores.is_multiclass() {
                match CumulativeGain::from_raw_data(y_true, scores) {
                    Ok(gain) => section.append_guideline(Artifact::CumulativeGain(gain)),
                    Err(e) if e.is_single_class() => {
                        section.append_guideline(format!("Cumulative gain not plotted: {e}"))
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        self.report.add_section(section);
        Ok(())
    }

    pub fn create_report(self, title: impl Into<String>) -> Report {
        self.report.create_report(title)
    }
}

/// `"(class 3) ..."` becomes `"class 3"`; other labels are kept as they are.
fn class_name(label: &str) -> String {
    if let Some(rest) = label.strip_prefix("(class ") {
        if let Some(end) = rest.find(')') {
            return format!("class {}", &rest[..end]);
        }
    }
    label.to_string()
}
