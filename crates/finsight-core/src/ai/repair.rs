//! Best-effort JSON repair for hosted model responses.
//!
//! Models frequently wrap their JSON in markdown fences, prepend prose, or
//! emit small syntax slips (trailing commas, stray `null` fragments). This
//! parser cleans those up before handing the text to serde. A payload that
//! still fails to parse is reported as [`Error::MalformedResponse`] so
//! callers can distinguish it from transport failures.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

static FIXUPS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

/// Regexes for the common JSON slips, compiled once per process.
fn fixups() -> &'static [(Regex, &'static str)] {
    FIXUPS.get_or_init(|| {
        [
            (r",\s*\}", "}"),            // trailing comma before }
            (r",\s*\]", "]"),            // trailing comma before ]
            (r"null\s*,", ""),           // stray "null," fragments
            (r",\s*null", ""),           // stray ",null" fragments
            (r#""\s*\*\s*[^"]*""#, ""),  // "* value" fragments
            (r#",\s*"[^"]*"\s*\*"#, ""), // ,"value"* fragments
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (Regex::new(pattern).expect("fixup pattern compiles"), replacement)
        })
        .collect()
    })
}

/// Clean a raw model response and parse it as a JSON object.
pub fn clean_and_parse(raw: &str) -> Result<Value> {
    let mut cleaned = raw.trim().to_string();

    // Remove markdown code fences.
    if cleaned.starts_with("```") {
        cleaned = cleaned
            .replace("```json\n", "")
            .replace("```json", "")
            .replace("```\n", "")
            .replace("```", "");
    }

    // Extract the outermost JSON object if the model wrapped it in text.
    let start = cleaned.find('{');
    let end = cleaned.rfind('}');
    let mut cleaned = match (start, end) {
        (Some(s), Some(e)) if s < e => cleaned[s..=e].to_string(),
        _ => {
            return Err(Error::MalformedResponse(format!(
                "No JSON object found in model response | Raw: {}",
                truncate(raw)
            )))
        }
    };

    // Fix common JSON slips before parsing.
    for (re, replacement) in fixups() {
        cleaned = re.replace_all(&cleaned, *replacement).into_owned();
    }

    serde_json::from_str(&cleaned).map_err(|e| {
        Error::MalformedResponse(format!(
            "Invalid JSON from model: {} | Cleaned: {}",
            e,
            truncate(&cleaned)
        ))
    })
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
