//! Command handlers

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use takeoff_core::form::{FormValues, LABEL_FIELD};
use takeoff_core::report::{render, ReportOptions};
use takeoff_core::{CalcError, CalcResult, CalculationItem, CalculationOutput, CalculatorKind};
use tracing::{info, warn};

use crate::cli::OutputFormat;

/// Output settings resolved from config and flags
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub format: OutputFormat,
    pub report: ReportOptions,
}

/// One calculated item as written in JSON output.
#[derive(Debug, Serialize)]
struct Entry<'a> {
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    calculator: Option<CalculatorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a CalculationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a CalcError>,
}

impl<'a> Entry<'a> {
    fn new(label: &'a str, calculator: Option<CalculatorKind>, outcome: &'a CalcResult<CalculationOutput>) -> Self {
        Entry {
            label,
            calculator,
            result: outcome.as_ref().ok(),
            error: outcome.as_ref().err(),
        }
    }
}

/// A failure that stopped the whole command, as written in JSON output.
#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    error: &'a CalcError,
}

/// One element of a batch file after it has been parsed and calculated.
///
/// An element that does not parse as an item still gets a row, labelled
/// from whatever `label` and `type` the raw JSON carries.
#[derive(Debug)]
struct BatchRow {
    label: String,
    calculator: Option<CalculatorKind>,
    outcome: CalcResult<CalculationOutput>,
}

impl BatchRow {
    fn from_value(value: Value) -> Self {
        let raw_label = value.get("label").and_then(Value::as_str).unwrap_or_default().trim().to_string();
        let raw_kind = value.get("type").and_then(Value::as_str).and_then(|t| t.parse().ok());

        match serde_json::from_value::<CalculationItem>(value) {
            Ok(item) => BatchRow {
                label: item.label().to_string(),
                calculator: Some(item.kind()),
                outcome: item.calculate(),
            },
            Err(e) => BatchRow {
                label: raw_label,
                calculator: raw_kind,
                outcome: Err(CalcError::from(e)),
            },
        }
    }

    fn entry(&self) -> Entry<'_> {
        Entry::new(&self.label, self.calculator, &self.outcome)
    }
}

/// Calculate a single item and print it. Returns whether it succeeded.
pub fn run_single(item: &CalculationItem, settings: Settings) -> Result<bool> {
    single_to(&mut io::stdout().lock(), item, settings)
}

fn single_to<W: Write>(out: &mut W, item: &CalculationItem, settings: Settings) -> Result<bool> {
    let outcome = item.calculate();
    match settings.format {
        OutputFormat::Json => {
            let entry = Entry::new(item.label(), Some(item.kind()), &outcome);
            writeln!(out, "{}", serde_json::to_string_pretty(&entry)?)?;
        }
        OutputFormat::Table => {
            write_table(out, item.label(), Some(item.kind()), &outcome, settings.report)?;
        }
    }
    Ok(outcome.is_ok())
}

/// Calculate every item in a JSON batch file. Items are independent: a
/// failing item, including one that does not parse, is reported and the
/// rest still run.
pub fn run_batch(path: &Path, settings: Settings) -> Result<bool> {
    batch_to(&mut io::stdout().lock(), path, settings)
}

fn batch_to<W: Write>(out: &mut W, path: &Path, settings: Settings) -> Result<bool> {
    let values = match load_batch(path) {
        Ok(values) => values,
        Err(e) if settings.format == OutputFormat::Json => {
            write_error(out, &e)?;
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    info!(path = %path.display(), items = values.len(), "batch loaded");

    let rows: Vec<BatchRow> = values.into_iter().map(BatchRow::from_value).collect();
    let failures = rows.iter().filter(|row| row.outcome.is_err()).count();
    if failures > 0 {
        warn!(failures, total = rows.len(), "some batch items failed");
    }

    match settings.format {
        OutputFormat::Json => {
            let entries: Vec<_> = rows.iter().map(BatchRow::entry).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        }
        OutputFormat::Table => {
            for row in &rows {
                write_table(out, &row.label, row.calculator, &row.outcome, settings.report)?;
                writeln!(out)?;
            }
            writeln!(out, "{} item(s), {} failed", rows.len(), failures)?;
        }
    }
    Ok(failures == 0)
}

/// Read a batch file as a JSON array without interpreting its elements.
fn load_batch(path: &Path) -> CalcResult<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read batch file", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| CalcError::serialization(format!("{} is not a JSON array of items: {e}", path.display())))
}

/// Print a command-level failure as `{"error": ...}` on stdout.
pub fn print_error(error: &CalcError) -> Result<()> {
    write_error(&mut io::stdout().lock(), error)
}

fn write_error<W: Write>(out: &mut W, error: &CalcError) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&ErrorReport { error })?)?;
    Ok(())
}

/// Prompt for each field of `kind`, then calculate.
///
/// Prompts go to stderr so the result on stdout can be piped.
pub fn run_interactive(kind: CalculatorKind, settings: Settings) -> Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompts = io::stderr();

    writeln!(prompts, "{}", kind.title())?;
    writeln!(prompts, "{}", kind.description())?;
    writeln!(prompts)?;

    loop {
        let Some(form) = collect_form(kind, &mut input, &mut prompts)? else {
            return Ok(false);
        };
        match kind.parse_form(&form) {
            Ok(item) => return run_single(&item, settings),
            Err(e) => {
                writeln!(prompts, "Validation error: {e}")?;
                if !confirm("Try again? [y/N]: ", &mut input, &mut prompts)? {
                    return Ok(false);
                }
            }
        }
    }
}

/// Read one line per field. Returns `None` on end of input.
pub fn collect_form<R: BufRead, W: Write>(
    kind: CalculatorKind,
    input: &mut R,
    prompts: &mut W,
) -> io::Result<Option<FormValues>> {
    let mut form = FormValues::new();
    let Some(label) = prompt_text("Label (optional): ", input, prompts)? else {
        return Ok(None);
    };
    form.set(LABEL_FIELD, label);
    for field in kind.fields() {
        let Some(text) = prompt_text(&format!("{}: ", field.prompt), input, prompts)? else {
            return Ok(None);
        };
        form.set(field.name, text);
    }
    Ok(Some(form))
}

fn prompt_text<R: BufRead, W: Write>(prompt: &str, input: &mut R, prompts: &mut W) -> io::Result<Option<String>> {
    write!(prompts, "{prompt}")?;
    prompts.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, prompts: &mut W) -> io::Result<bool> {
    Ok(prompt_text(prompt, input, prompts)?
        .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
        .unwrap_or(false))
}

fn write_table<W: Write>(
    out: &mut W,
    label: &str,
    calculator: Option<CalculatorKind>,
    outcome: &CalcResult<CalculationOutput>,
    options: ReportOptions,
) -> io::Result<()> {
    match outcome {
        Ok(output) => write!(out, "{}", render(label, output, options)),
        Err(e) => {
            let title = calculator.map_or("Batch item", CalculatorKind::title);
            let label = if label.is_empty() { "(unlabeled)" } else { label };
            writeln!(out, "{title} {label}: [{}] {e}", e.error_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;
    use takeoff_core::calculations::FootingInput;

    const GOOD_FOOTING: &str = r#"{"type": "Footing", "label": "F-1", "length_mm": 2000, "width_mm": 1500,
        "depth_mm": 300, "bar_diameter_mm": 12, "bar_spacing_mm": 200}"#;
    const MISSING_SPACING: &str = r#"{"type": "Footing", "label": "F-2", "length_mm": 2000, "width_mm": 1500,
        "depth_mm": 300, "bar_diameter_mm": 12}"#;
    const ZERO_SPACING: &str = r#"{"type": "Footing", "label": "F-3", "length_mm": 2000, "width_mm": 1500,
        "depth_mm": 300, "bar_diameter_mm": 12, "bar_spacing_mm": 0}"#;

    fn footing() -> CalculationItem {
        CalculationItem::Footing(FootingInput {
            label: "F-1".to_string(),
            length_mm: 2000.0,
            width_mm: 1500.0,
            depth_mm: 300.0,
            bar_diameter_mm: 12.0,
            bar_spacing_mm: 200.0,
        })
    }

    fn settings(format: OutputFormat) -> Settings {
        Settings {
            format,
            report: ReportOptions::default(),
        }
    }

    fn batch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("takeoff-{name}-{}.json", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run_batch_file(name: &str, contents: &str, format: OutputFormat) -> (bool, String) {
        let path = batch_file(name, contents);
        let mut out = Vec::new();
        let ok = batch_to(&mut out, &path, settings(format)).unwrap();
        std::fs::remove_file(&path).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_collect_form() {
        let mut input = Cursor::new("F-9\n2000\n1500\n300\n12\n200\n");
        let mut prompts = Vec::new();
        let form = collect_form(CalculatorKind::Footing, &mut input, &mut prompts)
            .unwrap()
            .unwrap();
        assert_eq!(form.label(), "F-9");
        assert_eq!(form.get("bar_spacing"), Some("200"));

        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.contains("Bar spacing (mm): "));

        let item = CalculatorKind::Footing.parse_form(&form).unwrap();
        assert_eq!(item.label(), "F-9");
    }

    #[test]
    fn test_collect_form_eof() {
        let mut input = Cursor::new("B-1\n4000\n");
        let mut prompts = Vec::new();
        let form = collect_form(CalculatorKind::Beam, &mut input, &mut prompts).unwrap();
        assert!(form.is_none());
    }

    #[test]
    fn test_entry_json() {
        let item = footing();
        let outcome = item.calculate();
        let json = serde_json::to_value(Entry::new(item.label(), Some(item.kind()), &outcome)).unwrap();
        assert_eq!(json["label"], "F-1");
        assert_eq!(json["calculator"], "Footing");
        assert_eq!(json["result"]["type"], "Footing");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_entry_json_error() {
        let mut item = footing();
        if let CalculationItem::Footing(f) = &mut item {
            f.bar_spacing_mm = 0.0;
        }
        let outcome = item.calculate();
        let json = serde_json::to_value(Entry::new(item.label(), Some(item.kind()), &outcome)).unwrap();
        assert_eq!(json["error"]["type"], "InvalidInput");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_table_error_line() {
        let item = CalculationItem::Footing(FootingInput {
            label: String::new(),
            length_mm: -1.0,
            width_mm: 1500.0,
            depth_mm: 300.0,
            bar_diameter_mm: 12.0,
            bar_spacing_mm: 200.0,
        });
        let mut out = Vec::new();
        write_table(&mut out, item.label(), Some(item.kind()), &item.calculate(), ReportOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Footing Calculator (unlabeled): [INVALID_INPUT]"));
    }

    #[test]
    fn test_single_reports_failure() {
        let mut item = footing();
        if let CalculationItem::Footing(f) = &mut item {
            f.depth_mm = 0.0;
        }
        let mut out = Vec::new();
        assert!(!single_to(&mut out, &item, settings(OutputFormat::Table)).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Footing Calculator F-1: [INVALID_INPUT]"));

        let mut out = Vec::new();
        assert!(single_to(&mut out, &footing(), settings(OutputFormat::Json)).unwrap());
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["label"], "F-1");
        assert!(json["result"]["concrete_volume_m3"].is_number());
    }

    #[test]
    fn test_mixed_batch_table() {
        let contents = format!("[{GOOD_FOOTING}, {MISSING_SPACING}, {ZERO_SPACING}]");
        let (ok, text) = run_batch_file("mixed-table", &contents, OutputFormat::Table);
        assert!(!ok);
        assert!(text.contains("FOOTING CALCULATOR - F-1"));
        assert!(text.contains("Footing Calculator F-2: [SERIALIZATION_ERROR]"));
        assert!(text.contains("Footing Calculator F-3: [INVALID_INPUT]"));
        assert!(text.trim_end().ends_with("3 item(s), 2 failed"));
    }

    #[test]
    fn test_mixed_batch_json() {
        let contents = format!(r#"[{GOOD_FOOTING}, {MISSING_SPACING}, {{"type": "Wall", "label": "W-1"}}]"#);
        let (ok, text) = run_batch_file("mixed-json", &contents, OutputFormat::Json);
        assert!(!ok);

        let entries: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["label"], "F-1");
        assert_eq!(entries[0]["result"]["type"], "Footing");

        assert_eq!(entries[1]["label"], "F-2");
        assert_eq!(entries[1]["calculator"], "Footing");
        assert_eq!(entries[1]["error"]["type"], "SerializationError");
        assert!(entries[1].get("result").is_none());

        assert_eq!(entries[2]["label"], "W-1");
        assert!(entries[2].get("calculator").is_none());
        assert_eq!(entries[2]["error"]["type"], "SerializationError");
    }

    #[test]
    fn test_good_batch_succeeds() {
        let contents = format!("[{GOOD_FOOTING}, {GOOD_FOOTING}]");
        let (ok, text) = run_batch_file("good", &contents, OutputFormat::Table);
        assert!(ok);
        assert!(text.trim_end().ends_with("2 item(s), 0 failed"));
    }

    #[test]
    fn test_missing_batch_file() {
        let path = std::env::temp_dir().join("takeoff-no-such-batch.json");

        let mut out = Vec::new();
        assert!(!batch_to(&mut out, &path, settings(OutputFormat::Json)).unwrap());
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["error"]["type"], "FileError");
        assert_eq!(json["error"]["details"]["operation"], "read batch file");

        let mut out = Vec::new();
        let err = batch_to(&mut out, &path, settings(OutputFormat::Table)).unwrap_err();
        assert_eq!(err.downcast_ref::<CalcError>().map(CalcError::error_code), Some("FILE_ERROR"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_batch_file_not_an_array() {
        let (ok, text) = run_batch_file("object", GOOD_FOOTING, OutputFormat::Json);
        assert!(!ok);
        let json: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["error"]["type"], "SerializationError");
    }
}
