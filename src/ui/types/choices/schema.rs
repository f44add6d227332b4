use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
}

/// File path constraints declared through `x-*` schema extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSpec {
    pub must_exist: bool,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub path: Option<PathSpec>,
}

// Return the whole tagged-enum schema for T
pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schema_for!(T)
}

pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .context("missing oneOf/anyOf")?;

    for branch in alts {
        let bobj = branch.as_object().context("branch is not object")?;
        let Some(props) = bobj.get("properties").and_then(|v| v.as_object()) else {
            continue;
        };

        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let Some(params_obj) = props
            .get("params")
            .and_then(|v| v.as_object())
            .and_then(|o| resolve_ref_obj(root_obj, o))
        else {
            return Ok(vec![]);
        };

        let Some(params_props) = params_obj.get("properties").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };

        let required: Vec<&str> = params_obj
            .get("required")
            .and_then(|v| v.as_array())
            .map(|a| a.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        let mut out = Vec::new();
        for (name, field_schema) in params_props {
            let mut fs_obj = field_schema
                .as_object()
                .context("field schema not object")?;

            if fs_obj.get("$ref").is_some() {
                fs_obj = resolve_ref_obj(root_obj, fs_obj)
                    .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
            }

            let Some(kind) = detect_field_kind(fs_obj.get("type")) else {
                continue;
            };

            out.push(FieldSpec {
                name: name.clone(),
                title: fs_obj
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or(name)
                    .to_string(),
                description: fs_obj
                    .get("description")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                required: required.contains(&name.as_str()),
                kind,
                default: fs_obj.get("default").cloned(),
                path: path_spec(fs_obj),
            });
        }

        return Ok(out);
    }

    bail!("no branch found for type={kind_key}");
}

fn path_spec(obj: &Map<String, Value>) -> Option<PathSpec> {
    if obj.get("format").and_then(|v| v.as_str()) != Some("path") {
        return None;
    }
    Some(PathSpec {
        must_exist: obj
            .get("x-must-exist")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        extensions: obj
            .get("x-extensions")
            .and_then(|v| v.as_array())
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tobj) = props.get("type").and_then(|v| v.as_object()) else {
        return false;
    };

    if tobj.get("const").and_then(|v| v.as_str()) == Some(kind_key) {
        return true;
    }
    matches!(
        tobj.get("enum").and_then(|v| v.as_array()).map(Vec::as_slice),
        Some([only]) if only.as_str() == Some(kind_key)
    )
}

/// Resolve a local $ref like "#/$defs/EvaluateModelParams" against the root object.
/// Returns the referenced object map, or None if it can't be resolved.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn field_kind(name: &str) -> Option<FieldKind> {
    match name {
        "string" => Some(FieldKind::String),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty {
        Some(Value::String(s)) => field_kind(s),
        // unions like ["string","null"] for Option<T>
        Some(Value::Array(arr)) => arr.iter().filter_map(|v| v.as_str()).find_map(field_kind),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::TaskChoice;

    fn specs(kind: &str) -> Vec<FieldSpec> {
        specs_for_kind(&schema_for::<TaskChoice>(), kind).unwrap()
    }

    fn field<'a>(specs: &'a [FieldSpec], name: &str) -> &'a FieldSpec {
        specs.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn evaluate_model_fields_carry_path_constraints() {
        let s = specs("evaluate-model");
        let input = field(&s, "predictions_path");
        assert!(input.required);
        assert_eq!(input.kind, FieldKind::String);
        assert_eq!(
            input.path,
            Some(PathSpec {
                must_exist: true,
                extensions: vec!["json".into()]
            })
        );

        let output = field(&s, "output_path");
        assert!(!output.path.as_ref().unwrap().must_exist);

        let settings = field(&s, "settings_path");
        assert!(!settings.required);
        assert!(settings.path.as_ref().unwrap().must_exist);

        assert_eq!(field(&s, "print_summary").kind, FieldKind::Boolean);
    }

    #[test]
    fn compare_models_lists_three_inputs() {
        let s = specs("compare-models");
        let inputs = s
            .iter()
            .filter(|f| f.path.as_ref().is_some_and(|p| p.must_exist) && f.required)
            .count();
        assert_eq!(inputs, 3);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(specs_for_kind(&schema_for::<TaskChoice>(), "train-model").is_err());
    }
}
