use anyhow::Result;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, PathSpec, UIChoice, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

struct KindItem<K> {
    kind: K,
    text: String,
}

impl<K> Display for KindItem<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn kind_items<K>() -> Vec<KindItem<K>>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let desc = k.get_detailed_message().unwrap_or("");
            let text = if desc.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            };
            KindItem { kind: k, text }
        })
        .collect()
}

/// Asks for the kind with a select list, then for each of its parameters.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let mut select = inquire::Select::new(C::prompt_label(), kind_items::<C::Kind>());
    if let Some(help) = C::prompt_help() {
        select = select.with_help_message(help);
    }
    let kind = select.prompt()?.kind;
    collect_params::<C, D>(driver, kind)
}

/// Prompts every schema field of `kind` and builds the choice.
///
/// Optional fields answered with a blank line are left out.
pub fn collect_params<C: UIChoice, D: PromptDriver>(driver: &D, kind: C::Kind) -> Result<C> {
    let key: &'static str = kind.into();
    let specs = specs_for_kind(&C::schema(), key)?;
    let defaults = C::default_params(kind);

    let mut params = Map::new();
    for s in specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        let help = s.description.as_deref().unwrap_or("");

        let value = match s.kind {
            FieldKind::Boolean => {
                let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
                Some(Value::Bool(driver.ask_bool(&s.title, help, def)?))
            }
            FieldKind::String => {
                let def = init
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                let answer = match &s.path {
                    Some(spec) => {
                        prompt_path_until_ok(driver, &s.title, help, &def, spec, s.required)?
                            .map(|p| p.to_string_lossy().into_owned())
                    }
                    None if s.required => Some(driver.ask_string(&s.title, help, &def)?),
                    None => {
                        let answer = driver.ask_string(
                            &s.title,
                            &format!("{help}\n(leave blank for none)"),
                            &def,
                        )?;
                        Some(answer).filter(|a| !a.trim().is_empty())
                    }
                };
                answer.map(Value::String)
            }
        };

        if let Some(val) = value {
            params.insert(s.name.clone(), val);
        }
    }

    C::from_parts(kind, Value::Object(params))
}

fn validate_path_str(input: &str, spec: &PathSpec) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if spec.must_exist && !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if p.exists() && !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !spec.extensions.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if spec.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", spec.extensions.join(" / ."))),
        }
    }
    Ok(())
}

/// Re-asks until the answer is a valid path. Optional paths accept a blank answer.
fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    spec: &PathSpec,
    required: bool,
) -> Result<Option<PathBuf>> {
    let help = if required {
        help.to_string()
    } else {
        format!("{help}\n(leave blank for none)")
    };
    loop {
        let answer = driver.ask_string(title, &help, default)?;
        let trimmed = answer.trim();
        if !required && trimmed.is_empty() {
            return Ok(None);
        }
        match validate_path_str(trimmed, spec) {
            Ok(()) => return Ok(Some(PathBuf::from(trimmed))),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{TaskChoice, TaskKind};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;

    /// Replays canned answers; booleans always take the default.
    struct ScriptedDriver {
        answers: RefCell<VecDeque<String>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedDriver {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl PromptDriver for ScriptedDriver {
        fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
            self.asked.borrow_mut().push(title.to_string());
            Ok(default)
        }

        fn ask_string(&self, title: &str, _help: &str, _default: &str) -> Result<String> {
            self.asked.borrow_mut().push(title.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no answer left for {title}"))
        }
    }

    fn spec(must_exist: bool) -> PathSpec {
        PathSpec {
            must_exist,
            extensions: vec!["json".into()],
        }
    }

    #[test]
    fn path_validation_rules() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("in.json");
        fs::write(&existing, "{}").unwrap();
        let existing = existing.to_string_lossy().into_owned();

        assert!(validate_path_str("  ", &spec(false)).is_err());
        assert!(validate_path_str(&existing, &spec(true)).is_ok());
        assert!(validate_path_str("missing.json", &spec(true)).is_err());
        assert!(validate_path_str("missing.json", &spec(false)).is_ok());
        assert!(validate_path_str("report.txt", &spec(false)).is_err());
        let d = dir.path().to_string_lossy().into_owned();
        assert!(validate_path_str(&d, &PathSpec::default()).is_err());
    }

    #[test]
    fn evaluate_model_wizard_retries_bad_paths_and_skips_blank_optionals() {
        let dir = tempfile::tempdir().unwrap();
        let preds = dir.path().join("preds.json");
        fs::write(&preds, "{}").unwrap();
        let preds = preds.to_string_lossy().into_owned();

        // answers are consumed in schema property order
        let driver = ScriptedDriver::new(&["nope.json", &preds, "out.json", ""]);
        let task: TaskChoice = collect_params(&driver, TaskKind::EvaluateModel).unwrap();

        match task {
            TaskChoice::EvaluateModel(p) => {
                assert_eq!(p.predictions_path, PathBuf::from(&preds));
                assert_eq!(p.output_path, PathBuf::from("out.json"));
                assert!(p.settings_path.is_none());
                assert!(p.print_summary);
            }
            other => panic!("unexpected task: {other:?}"),
        }
        assert!(driver.answers.borrow().is_empty());
        assert_eq!(
            driver.asked.borrow().iter().filter(|t| *t == "Predictions Path").count(),
            2
        );
    }
}
