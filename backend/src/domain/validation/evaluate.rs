//! Interpreter walking a [`Schema`] tree over a JSON payload.

use std::borrow::Cow;

use chrono::DateTime;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::ValidateEmail;

use super::{ArrayRule, FieldViolation, NumberRule, Rule, Schema, StringFormat, StringRule, UnknownFields};

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

/// How scalar values are read before type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// JSON types must match exactly.
    Strict,
    /// Strings may stand in for numbers and booleans, as query strings and
    /// path segments only carry text.
    FromText,
}

pub(super) struct Walker {
    coercion: Coercion,
    violations: Vec<FieldViolation>,
}

impl Walker {
    pub(super) fn new(coercion: Coercion) -> Self {
        Self {
            coercion,
            violations: Vec::new(),
        }
    }

    pub(super) fn finish(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub(super) fn root(&mut self, schema: &Schema, payload: &Value, label: &str) {
        match payload {
            Value::Object(map) => self.object(schema, map, ""),
            _ => self.report(label, format!("\"{label}\" must be of type object")),
        }
    }

    fn report(&mut self, path: &str, message: String) {
        self.violations.push(FieldViolation::new(path, message));
    }

    fn object(&mut self, schema: &Schema, map: &Map<String, Value>, prefix: &str) {
        for field in &schema.fields {
            let path = join(prefix, field.name);
            match map.get(field.name) {
                Some(value) => self.rule(&field.rule, value, &path),
                None if field.required => self.report(&path, format!("\"{path}\" is required")),
                None => {}
            }
        }

        if schema.unknown_fields == UnknownFields::Reject {
            for key in map.keys().filter(|key| !schema.declares(key)) {
                let path = join(prefix, key);
                self.report(&path, format!("\"{path}\" is not allowed"));
            }
        }
    }

    fn rule(&mut self, rule: &Rule, value: &Value, path: &str) {
        let outcome = match rule {
            Rule::String(string) => check_string(string, value, path),
            Rule::Number(number) => check_number(number, value, path, self.coercion),
            Rule::Boolean => check_boolean(value, path, self.coercion),
            Rule::OneOf(allowed) => check_one_of(allowed, value, path),
            Rule::Array(array) => return self.array(array, value, path),
            Rule::Object(schema) => {
                return match value {
                    Value::Object(map) => self.object(schema, map, path),
                    _ => self.report(path, format!("\"{path}\" must be of type object")),
                };
            }
        };
        if let Err(message) = outcome {
            self.report(path, message);
        }
    }

    fn array(&mut self, rule: &ArrayRule, value: &Value, path: &str) {
        let items = match value {
            Value::Array(items) => Cow::Borrowed(items.as_slice()),
            // A single query value stands for a one-element list.
            Value::String(_) if self.coercion == Coercion::FromText => {
                Cow::Owned(vec![value.clone()])
            }
            _ => return self.report(path, format!("\"{path}\" must be an array")),
        };

        // Length and element violations are independent; report both.
        if let Some(min) = rule.min_items.filter(|min| items.len() < *min) {
            self.report(path, format!("\"{path}\" must contain at least {min} items"));
        }
        if let Some(max) = rule.max_items.filter(|max| items.len() > *max) {
            self.report(
                path,
                format!("\"{path}\" must contain less than or equal to {max} items"),
            );
        }

        for (index, item) in items.iter().enumerate() {
            let item_path = join(path, &index.to_string());
            self.rule(&rule.items, item, &item_path);
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

fn check_string(rule: &StringRule, value: &Value, path: &str) -> Result<(), String> {
    let Value::String(text) = value else {
        return Err(format!("\"{path}\" must be a string"));
    };
    if text.is_empty() {
        return if rule.allow_empty {
            Ok(())
        } else {
            Err(format!("\"{path}\" is not allowed to be empty"))
        };
    }

    let length = text.chars().count();
    if let Some(min) = rule.min_len.filter(|min| length < *min) {
        return Err(format!(
            "\"{path}\" length must be at least {min} characters long"
        ));
    }
    if let Some(max) = rule.max_len.filter(|max| length > *max) {
        return Err(format!(
            "\"{path}\" length must be less than or equal to {max} characters long"
        ));
    }

    match &rule.format {
        Some(format) => check_format(format, text, path),
        None => Ok(()),
    }
}

fn check_format(format: &StringFormat, text: &str, path: &str) -> Result<(), String> {
    let valid = match format {
        StringFormat::Email => text.validate_email(),
        StringFormat::Url => url::Url::parse(text)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host()),
        StringFormat::Uuid => Uuid::parse_str(text).is_ok(),
        StringFormat::DateTime => DateTime::parse_from_rfc3339(text).is_ok(),
        StringFormat::Phone => is_phone_number(text),
        StringFormat::Pattern { name, regex } => {
            if regex.is_match(text) {
                return Ok(());
            }
            return Err(format!(
                "\"{path}\" with value \"{text}\" fails to match the {name} pattern"
            ));
        }
    };
    if valid {
        return Ok(());
    }

    let expectation = match format {
        StringFormat::Email => "must be a valid email",
        StringFormat::Url => "must be a valid uri",
        StringFormat::Uuid => "must be a valid GUID",
        StringFormat::DateTime => "must be in ISO 8601 date format",
        StringFormat::Phone => "must be a valid phone number",
        StringFormat::Pattern { .. } => "fails to match the required pattern",
    };
    Err(format!("\"{path}\" {expectation}"))
}

fn is_phone_number(text: &str) -> bool {
    let body = text.strip_prefix('+').unwrap_or(text);
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.'));
    let digits = body.chars().filter(char::is_ascii_digit).count();
    allowed && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

fn check_number(rule: &NumberRule, value: &Value, path: &str, coercion: Coercion) -> Result<(), String> {
    let kind = if rule.integer { "an integer" } else { "a number" };
    let number = if rule.integer {
        integer_value(value, coercion)
    } else {
        match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) if coercion == Coercion::FromText => {
                text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    };
    let Some(number) = number else {
        return Err(format!("\"{path}\" must be {kind}"));
    };

    if let Some(min) = rule.min.filter(|min| number < *min) {
        return Err(format!("\"{path}\" must be greater than or equal to {min}"));
    }
    if let Some(max) = rule.max.filter(|max| number > *max) {
        return Err(format!("\"{path}\" must be less than or equal to {max}"));
    }
    Ok(())
}

/// Accepts only what an integer field deserializer would: integral JSON
/// numbers, or text that parses as an integer literal without padding.
#[expect(clippy::cast_precision_loss, reason = "bounds are compared as f64")]
fn integer_value(value: &Value, coercion: Coercion) -> Option<f64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(|n| n as f64)
            .or_else(|| number.as_u64().map(|n| n as f64)),
        Value::String(text) if coercion == Coercion::FromText => {
            text.parse::<i64>().ok().map(|n| n as f64)
        }
        _ => None,
    }
}

fn check_boolean(value: &Value, path: &str, coercion: Coercion) -> Result<(), String> {
    match value {
        Value::Bool(_) => Ok(()),
        Value::String(text)
            if coercion == Coercion::FromText && matches!(text.as_str(), "true" | "false") =>
        {
            Ok(())
        }
        _ => Err(format!("\"{path}\" must be a boolean")),
    }
}

fn check_one_of(allowed: &[&'static str], value: &Value, path: &str) -> Result<(), String> {
    match value {
        Value::String(text) if allowed.contains(&text.as_str()) => Ok(()),
        _ => Err(format!("\"{path}\" must be one of [{}]", allowed.join(", "))),
    }
}
