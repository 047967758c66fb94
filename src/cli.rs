//! Minimal CLI: example JSON → (schema | shape)
use std::io::Read;
use std::path::PathBuf;
use anyhow::Context;
use clap::{Parser, Subcommand, Args};
use rayon::prelude::*;
use serde_json::Value;

use crate::error::SchemaGenError;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a draft-04 JSON schema from example JSON documents (one schema per document)
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print the JSON schema
    Schema(SchemaOut),
    /// print the intermediate shape tree (debug view)
    Shape(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line output
    #[arg(long)]
    compact: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputSource {
    Stdin,
    Path(PathBuf),
}

impl InputSource {
    fn label(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::Path(p) => p.to_string_lossy().to_string(),
        }
    }

    fn read(&self) -> Result<String, SchemaGenError> {
        match self {
            Self::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|source| SchemaGenError::Io { path: PathBuf::from("-"), source })?;
                Ok(buf)
            }
            Self::Path(p) => std::fs::read_to_string(p)
                .map_err(|source| SchemaGenError::Io { path: p.clone(), source }),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Every document after ndjson splitting, pointer selection and jq.
    fn load_documents(&self) -> Result<Vec<Value>, SchemaGenError> {
        let mut out = Vec::new();
        for source in resolve_file_path_patterns(&self.input)? {
            let label = source.label();
            let text = source.read()?;
            tracing::debug!(source = %label, bytes = text.len(), "read input");
            for json_value in parse_documents(&text, self.ndjson, &label)? {
                let json_value = match self.json_pointer.as_deref() {
                    None => json_value,
                    Some(pointer) => select_pointer(json_value, pointer, &label)?,
                };
                match self.jq_expr.as_ref() {
                    None => out.push(json_value),
                    Some(jq_expr) => out.extend(crate::jq_exec::run_jaq(jq_expr, &json_value)?),
                }
            }
        }
        Ok(out)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        let (target, shape_only) = match &self.cmd {
            Command::Schema(target) => (target, false),
            Command::Shape(target) => (target, true),
        };
        // debug path
        if target.no_op {
            eprintln!("{self:#?}");
            return Ok(())
        }

        // 1) load every document
        let documents = target.input_settings.load_documents()
            .context("failed to load input documents")?;
        tracing::info!(documents = documents.len(), "generating");

        // 2) one independent pass per document; order is kept
        let outputs: Vec<Value> = if shape_only {
            documents
                .par_iter()
                .map(|doc| serde_json::to_value(crate::shape::build(doc)))
                .collect::<Result<_, _>>()?
        } else {
            documents.par_iter().map(crate::generate).collect()
        };

        // 3) write
        let output = collapse_outputs(outputs);
        let src = if target.compact {
            serde_json::to_string(&output)?
        } else {
            serde_json::to_string_pretty(&output)?
        };
        if let Some(out) = target.out.as_ref() {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, &src)
                .with_context(|| format!("failed to write {}", out.display()))?;
        } else {
            println!("{src}");
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// One output is printed as-is; anything else becomes an array in input order.
fn collapse_outputs(mut outputs: Vec<Value>) -> Value {
    if outputs.len() == 1 {
        outputs.remove(0)
    } else {
        Value::Array(outputs)
    }
}

fn parse_documents(text: &str, ndjson: bool, label: &str) -> Result<Vec<Value>, SchemaGenError> {
    let with_label = |error: SchemaGenError| match error {
        SchemaGenError::InvalidInput(msg) => SchemaGenError::InvalidInput(format!("{label}: {msg}")),
        other => other,
    };
    if !ndjson {
        let value = crate::path_de::from_str_with_path::<Value>(text).map_err(with_label)?;
        return Ok(vec![value]);
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ix, line)| {
            crate::path_de::from_str_with_path::<Value>(line).map_err(|error| match with_label(error) {
                SchemaGenError::InvalidInput(msg) => SchemaGenError::InvalidInput(format!("line {}: {msg}", ix + 1)),
                other => other,
            })
        })
        .collect()
}

fn select_pointer(mut value: Value, pointer: &str, label: &str) -> Result<Value, SchemaGenError> {
    value
        .pointer_mut(pointer)
        .map(Value::take)
        .ok_or_else(|| SchemaGenError::Pointer {
            pointer: pointer.to_string(),
            origin: label.to_string(),
        })
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<InputSource>, SchemaGenError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<InputSource>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            out.push(InputSource::Stdin);
        } else if has_glob_chars(pattern) {
            // Treat as a glob pattern
            let mut matched_any = false;
            let entries = glob::glob(pattern)
                .map_err(|e| SchemaGenError::Glob(format!("{pattern}: {e}")))?;
            for entry in entries {
                let p = entry.map_err(|e| SchemaGenError::Glob(e.to_string()))?;
                matched_any = true;
                out.push(InputSource::Path(p));
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(SchemaGenError::Glob(format!("pattern matched no files: {pattern}")));
            }
        } else {
            // Treat as a literal path
            out.push(InputSource::Path(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stdin_and_literal_paths() {
        let got = resolve_file_path_patterns(["-", "data/a.json"]).unwrap();
        assert_eq!(got, vec![InputSource::Stdin, InputSource::Path(PathBuf::from("data/a.json"))]);
    }

    #[test]
    fn glob_matching_nothing_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely-not-here-9f1c/*.json"]).unwrap_err();
        assert!(matches!(err, SchemaGenError::Glob(_)));
    }

    #[test]
    fn glob_finds_sources() {
        let pattern = concat!(env!("CARGO_MANIFEST_DIR"), "/src/shape/*.rs");
        let got = resolve_file_path_patterns([pattern]).unwrap();
        assert!(got.len() >= 2);
    }

    #[test]
    fn ndjson_skips_blank_lines_and_reports_line_numbers() {
        let docs = parse_documents("{\"a\":1}\n\n[2]\n", true, "mem").unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!([2])]);

        let err = parse_documents("{}\n{oops\n", true, "mem").unwrap_err().to_string();
        assert!(err.contains("line 2"), "{err}");
        assert!(err.contains("mem"), "{err}");
    }

    #[test]
    fn pointer_selection() {
        let doc = json!({"data": {"items": [{"id": 1}]}});
        assert_eq!(select_pointer(doc.clone(), "/data/items/0", "mem").unwrap(), json!({"id": 1}));
        let err = select_pointer(doc, "/nope", "mem").unwrap_err();
        match &err {
            SchemaGenError::Pointer { pointer, origin } => {
                assert_eq!((pointer.as_str(), origin.as_str()), ("/nope", "mem"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(err.to_string(), "JSON pointer \"/nope\" did not resolve in mem");
    }

    #[test]
    fn single_output_is_not_wrapped() {
        assert_eq!(collapse_outputs(vec![json!({"a": 1})]), json!({"a": 1}));
        assert_eq!(collapse_outputs(vec![json!(1), json!(2)]), json!([1, 2]));
        assert_eq!(collapse_outputs(vec![]), json!([]));
    }

    fn run_args(args: &[&str]) {
        let argv = std::iter::once("json-sketch-schema").chain(args.iter().copied());
        CommandLineInterface::try_parse_from(argv).unwrap().run().unwrap();
    }

    #[test]
    fn run_writes_compact_array_for_several_documents() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.ndjson");
        std::fs::write(&a, r#"{"name": "Alice"}"#).unwrap();
        std::fs::write(&b, "[{\"k\": 1}, {\"k\": 2}]\n{\"id\": \"7\"}\n").unwrap();
        let out = dir.path().join("nested/deeper/out.json");

        // two ndjson documents collapse into an array of schemas
        run_args(&["schema", "-i", b.to_str().unwrap(), "--ndjson", "--compact", "-o", out.to_str().unwrap()]);
        let src = std::fs::read_to_string(&out).unwrap();
        assert!(!src.contains('\n'), "compact output is one line: {src}");
        let got: Value = serde_json::from_str(&src).unwrap();
        assert_eq!(got.as_array().unwrap().len(), 2);
        assert_eq!(got[0]["type"], json!("array"));
        assert_eq!(got[0]["items"]["properties"]["k"], json!({"type": "number"}));
        assert_eq!(got[1]["properties"]["id"], json!({"type": "number"}));

        // a single document is written unwrapped, pretty by default
        run_args(&["schema", "-i", a.to_str().unwrap(), "-o", out.to_str().unwrap()]);
        let src = std::fs::read_to_string(&out).unwrap();
        assert!(src.contains('\n'));
        let got: Value = serde_json::from_str(&src).unwrap();
        assert_eq!(got, crate::generate(&json!({"name": "Alice"})));
    }

    #[test]
    fn run_shape_subcommand_writes_shape_tree() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        std::fs::write(&a, r#"{"wrap": {"tags": ["x"], "gone": null}}"#).unwrap();
        let out = dir.path().join("shape.json");

        run_args(&["shape", "-i", a.to_str().unwrap(), "--json-pointer", "/wrap", "-o", out.to_str().unwrap()]);
        let got: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(got, json!({
            "kind": "object",
            "children": {
                "tags": {
                    "kind": "array",
                    "children": {"0": {"kind": "string", "required": true, "min_length": 1}},
                    "required": false
                },
                "gone": {"kind": null, "required": false}
            },
            "required": false
        }));
    }

    #[test]
    fn parses_schema_subcommand() {
        let cli = CommandLineInterface::try_parse_from([
            "json-sketch-schema", "schema", "-i", "a.json", "b.json", "--compact",
        ]).unwrap();
        match cli.cmd {
            Command::Schema(target) => {
                assert_eq!(target.input_settings.input, vec!["a.json", "b.json"]);
                assert!(target.compact);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
