use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use super::{RecipeRecord, RecipeResponse};
use crate::food::error::FoodError;

#[derive(Debug, Deserialize)]
struct RawRecipe {
    name: String,
    ingredients: Vec<String>,
    daily_intake_percentage: Percentage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Percentage {
    Text(String),
    Number(serde_json::Number),
}

impl Percentage {
    fn into_text(self) -> String {
        match self {
            Percentage::Text(text) => text,
            Percentage::Number(number) => format!("{}%", number),
        }
    }
}

/// Turns a generated recommendation into recipe records.
///
/// Tries, in order: a single JSON array, blank-line separated JSON objects,
/// then plain text blocks. Fails with [`FoodError::NoRecipesFound`] only when
/// no shape produced a record.
pub fn parse(raw_text: &str) -> Result<RecipeResponse, FoodError> {
    let text = raw_text.replace("\r\n", "\n");
    let text = text.trim();

    if let Some((records, failures)) = parse_json_array(text) {
        if !records.is_empty() {
            report_failures(&failures);
            if !failures.is_empty() {
                debug!("Raw AI response: {}", raw_text);
            }
            return Ok(RecipeResponse::JsonArray { records, failures });
        }
        debug!("JSON array held no usable recipes ({} rejected)", failures.len());
    }

    let (records, failures) = parse_json_objects(text);
    if !records.is_empty() {
        report_failures(&failures);
        if !failures.is_empty() {
            debug!("Raw AI response: {}", raw_text);
        }
        return Ok(RecipeResponse::JsonObjects { records, failures });
    }
    debug!("No JSON recipe objects found, falling back to text blocks");

    let records = parse_free_text(text);
    if records.is_empty() {
        warn!("No valid recipes found in the response");
        debug!("Raw AI response: {}", raw_text);
        return Err(FoodError::NoRecipesFound);
    }
    Ok(RecipeResponse::FreeText(records))
}

fn report_failures(failures: &[FoodError]) {
    for failure in failures {
        warn!("Skipping recipe entry: {}", failure);
    }
}

// `None` when the text is not a JSON array at all
fn parse_json_array(text: &str) -> Option<(Vec<RecipeRecord>, Vec<FoodError>)> {
    let body = strip_code_fences(text);
    let mut candidates = vec![body.clone()];
    if let (Some(start), Some(end)) = (body.find('['), body.rfind(']')) {
        if end > start {
            candidates.push(body[start..=end].to_string());
        }
    }

    let entries = candidates
        .iter()
        .find_map(|candidate| match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Array(entries)) if entries.iter().all(Value::is_object) => Some(entries),
            _ => None,
        })?;

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match recipe_from_value(entry, index + 1) {
            Ok(record) => records.push(record),
            Err(failure) => failures.push(failure),
        }
    }
    Some((records, failures))
}

fn parse_json_objects(text: &str) -> (Vec<RecipeRecord>, Vec<FoodError>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    let segments = text.split("\n\n").map(str::trim).filter(|s| !s.is_empty());
    for (index, segment) in segments.enumerate() {
        match parse_segment(segment, index + 1) {
            Ok(record) => records.push(record),
            Err(failure) => failures.push(failure),
        }
    }

    (records, failures)
}

fn parse_segment(segment: &str, number: usize) -> Result<RecipeRecord, FoodError> {
    let body = strip_code_fences(segment);
    let value: Value = serde_json::from_str(&body).map_err(|e| FoodError::RecipeParseFailure {
        segment: number,
        reason: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(FoodError::RecipeParseFailure {
            segment: number,
            reason: "not a JSON object".to_string(),
        });
    }
    recipe_from_value(value, number)
}

fn recipe_from_value(value: Value, number: usize) -> Result<RecipeRecord, FoodError> {
    let failure = |reason: String| FoodError::RecipeParseFailure {
        segment: number,
        reason,
    };

    let raw: RawRecipe = serde_json::from_value(value).map_err(|e| failure(e.to_string()))?;

    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return Err(failure("empty recipe name".to_string()));
    }
    let ingredients: Vec<String> = raw
        .ingredients
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if ingredients.is_empty() {
        return Err(failure("no ingredients".to_string()));
    }

    Ok(RecipeRecord {
        name,
        ingredients,
        daily_intake_percentage: Some(raw.daily_intake_percentage.into_text()),
        raw_text: None,
    })
}

fn parse_free_text(text: &str) -> Vec<RecipeRecord> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .filter_map(free_text_record)
        .collect()
}

fn free_text_record(block: &str) -> Option<RecipeRecord> {
    // JSON that failed validation is not prose
    if serde_json::from_str::<Value>(&strip_code_fences(block)).is_ok() {
        return None;
    }

    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut name = clean_name(lines.next()?);
    if name.is_empty() {
        // bare "Recipe Name:" label with the name on the following line
        name = clean_name(lines.next()?);
    }
    if name.is_empty() {
        return None;
    }

    let mut ingredients = Vec::new();
    let mut in_ingredients = false;
    for line in lines {
        let line = line.trim_matches('*').trim();
        if let Some(rest) = strip_label(line, "ingredients:") {
            in_ingredients = true;
            let rest = rest.trim_matches('*').trim();
            ingredients.extend(
                rest.split(',')
                    .map(str::trim)
                    .filter(|i| !i.is_empty())
                    .map(String::from),
            );
            continue;
        }
        if !in_ingredients {
            continue;
        }
        if line.ends_with(':') {
            in_ingredients = false;
            continue;
        }
        let item = strip_list_marker(line);
        if !item.is_empty() {
            ingredients.push(item.to_string());
        }
    }

    Some(RecipeRecord {
        name,
        ingredients,
        daily_intake_percentage: None,
        raw_text: Some(block.to_string()),
    })
}

fn clean_name(line: &str) -> String {
    let line = line.trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace());
    let line = strip_list_number(line);
    let line = strip_label(line, "recipe name:").unwrap_or(line);
    line.trim_matches(|c: char| c == '*' || c.is_whitespace())
        .to_string()
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if head.eq_ignore_ascii_case(label) {
        Some(line[label.len()..].trim())
    } else {
        None
    }
}

fn strip_list_number(line: &str) -> &str {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c == '-' || c == '*' || c == '•' || c.is_whitespace());
    strip_list_number(line)
}

// Opening and closing fences are dropped independently, so a fence that
// spans several blank-line separated segments is removed from each end.
fn strip_code_fences(raw: &str) -> String {
    let mut body: Vec<&str> = raw.trim().lines().collect();
    if body.first().map_or(false, |first| first.trim().starts_with("```")) {
        body.remove(0);
    }
    while let Some(last) = body.last() {
        if last.trim().starts_with("```") {
            body.pop();
        } else {
            break;
        }
    }

    body.join("\n").trim().to_string()
}
