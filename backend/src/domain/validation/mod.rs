//! Declarative request payload schemas.
//!
//! A [`Schema`] is a tree of per-field [`Rule`]s built once at startup and
//! evaluated by a single interpreter ([`Schema::evaluate`]). Evaluation never
//! stops at the first failure: every declared field is checked and every
//! violation is reported, in declaration order, as a [`FieldViolation`].
//!
//! ```
//! use site_backend::domain::validation::{Rule, Schema, StringFormat};
//! use serde_json::json;
//!
//! let schema = Schema::strict()
//!     .required("email", Rule::string().format(StringFormat::Email))
//!     .optional("age", Rule::integer().min(18.0));
//!
//! let violations = schema.evaluate(&json!({ "email": "nope", "age": 12 }));
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations[0].field(), "email");
//! ```

mod evaluate;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use evaluate::Coercion;

/// Portion of an inbound request consulted by the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Slice {
    /// JSON request body.
    #[default]
    Body,
    /// URL query string.
    Query,
    /// Matched path parameters.
    Params,
}

impl Slice {
    /// Lower-case name used in logs and top-level violations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Params => "params",
        }
    }

    /// Query strings and path segments only ever carry text.
    pub fn coercion(self) -> Coercion {
        match self {
            Self::Body => Coercion::Strict,
            Self::Query | Self::Params => Coercion::FromText,
        }
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treatment of keys present in the payload but absent from the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFields {
    /// Ignore extra keys. The request is still forwarded untouched.
    Strip,
    /// Report each extra key as a violation.
    Reject,
}

/// One failed constraint, addressed by its dot-joined path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    field: String,
    message: String,
}

impl FieldViolation {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dot-joined path to the offending field, e.g. `address.zip`.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Human-readable description of the violated constraint.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An object schema: an ordered list of named fields plus an unknown-key policy.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    unknown_fields: UnknownFields,
}

#[derive(Debug, Clone)]
struct Field {
    name: &'static str,
    rule: Rule,
    required: bool,
}

impl Schema {
    /// Schema that rejects keys it does not declare.
    pub fn strict() -> Self {
        Self::with_policy(UnknownFields::Reject)
    }

    /// Schema that silently ignores keys it does not declare.
    pub fn lenient() -> Self {
        Self::with_policy(UnknownFields::Strip)
    }

    /// Schema with an explicit unknown-field policy.
    pub fn with_policy(unknown_fields: UnknownFields) -> Self {
        Self {
            fields: Vec::new(),
            unknown_fields,
        }
    }

    /// Declare a field that must be present.
    ///
    /// # Panics
    /// Panics when `name` is declared twice; schemas are built at startup and
    /// a duplicate is a programming error.
    #[must_use]
    pub fn required(self, name: &'static str, rule: impl Into<Rule>) -> Self {
        self.field(name, rule.into(), true)
    }

    /// Declare a field that may be absent.
    ///
    /// # Panics
    /// Panics when `name` is declared twice.
    #[must_use]
    pub fn optional(self, name: &'static str, rule: impl Into<Rule>) -> Self {
        self.field(name, rule.into(), false)
    }

    fn field(mut self, name: &'static str, rule: Rule, required: bool) -> Self {
        assert!(
            !self.declares(name),
            "schema field `{name}` declared more than once"
        );
        self.fields.push(Field {
            name,
            rule,
            required,
        });
        self
    }

    /// Policy applied to undeclared keys.
    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    /// Whether `name` is one of the declared fields.
    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    /// Evaluate a JSON payload without any type coercion.
    pub fn evaluate(&self, payload: &serde_json::Value) -> Vec<FieldViolation> {
        self.evaluate_with(payload, Coercion::Strict, "value")
    }

    /// Evaluate the given request slice.
    ///
    /// Query and path slices are coerced from text before type checks.
    pub fn evaluate_slice(&self, payload: &serde_json::Value, slice: Slice) -> Vec<FieldViolation> {
        self.evaluate_with(payload, slice.coercion(), slice.as_str())
    }

    fn evaluate_with(
        &self,
        payload: &serde_json::Value,
        coercion: Coercion,
        root_label: &str,
    ) -> Vec<FieldViolation> {
        let mut walker = evaluate::Walker::new(coercion);
        walker.root(self, payload, root_label);
        walker.finish()
    }
}

/// Constraint attached to a single field. New kinds are added as variants.
#[derive(Debug, Clone)]
pub enum Rule {
    /// See [`Rule::string`].
    String(StringRule),
    /// Number or integer with optional inclusive bounds.
    Number(NumberRule),
    /// JSON boolean, or `"true"`/`"false"` in text slices.
    Boolean,
    /// String equal to one of the listed values.
    OneOf(Vec<&'static str>),
    /// See [`Rule::array`].
    Array(ArrayRule),
    /// Nested object checked against its own schema; paths are dot-joined.
    Object(Schema),
}

impl Rule {
    /// Non-empty string with optional bounds and format.
    pub fn string() -> StringRule {
        StringRule::default()
    }

    /// Any finite number.
    pub fn number() -> NumberRule {
        NumberRule::default()
    }

    /// Whole number. A JSON float such as `5.0` is refused, and text slices
    /// accept only plain integer literals like `"12"`.
    pub fn integer() -> NumberRule {
        NumberRule {
            integer: true,
            ..NumberRule::default()
        }
    }

    /// `true` or `false`.
    pub fn boolean() -> Self {
        Self::Boolean
    }

    /// String drawn from a fixed set of values.
    pub fn one_of(values: &[&'static str]) -> Self {
        Self::OneOf(values.to_vec())
    }

    /// Array whose elements each satisfy `items`.
    pub fn array(items: impl Into<Rule>) -> ArrayRule {
        ArrayRule {
            items: Box::new(items.into()),
            min_items: None,
            max_items: None,
        }
    }

    /// Nested object.
    pub fn object(schema: Schema) -> Self {
        Self::Object(schema)
    }
}

/// Recognised string formats.
#[derive(Debug, Clone)]
pub enum StringFormat {
    /// Mailbox address such as `someone@example.org`.
    Email,
    /// Absolute `http` or `https` URL.
    Url,
    /// Hyphenated UUID of any version.
    Uuid,
    /// RFC 3339 timestamp.
    DateTime,
    /// Digits with optional leading `+` and separators; 7 to 15 digits.
    Phone,
    /// Custom pattern with a name used in messages.
    Pattern { name: &'static str, regex: Regex },
}

impl StringFormat {
    /// Build a named pattern format.
    ///
    /// # Panics
    /// Panics when `pattern` is not a valid regular expression.
    pub fn pattern(name: &'static str, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => Self::Pattern { name, regex },
            Err(err) => panic!("invalid `{name}` pattern: {err}"),
        }
    }
}

/// Bounds and format for string fields.
#[derive(Debug, Clone, Default)]
pub struct StringRule {
    pub(crate) min_len: Option<usize>,
    pub(crate) max_len: Option<usize>,
    pub(crate) format: Option<StringFormat>,
    pub(crate) allow_empty: bool,
}

impl StringRule {
    /// Minimum length in characters.
    #[must_use]
    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = Some(len);
        self
    }

    /// Maximum length in characters.
    #[must_use]
    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    /// Shape the string must match.
    #[must_use]
    pub fn format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Accept `""` as a value.
    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

impl From<StringRule> for Rule {
    fn from(value: StringRule) -> Self {
        Self::String(value)
    }
}

/// Bounds for numeric fields.
#[derive(Debug, Clone, Default)]
pub struct NumberRule {
    pub(crate) integer: bool,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
}

impl NumberRule {
    /// Inclusive lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl From<NumberRule> for Rule {
    fn from(value: NumberRule) -> Self {
        Self::Number(value)
    }
}

/// Element rule and length bounds for array fields.
#[derive(Debug, Clone)]
pub struct ArrayRule {
    pub(crate) items: Box<Rule>,
    pub(crate) min_items: Option<usize>,
    pub(crate) max_items: Option<usize>,
}

impl ArrayRule {
    /// Fewest elements allowed.
    #[must_use]
    pub fn min_items(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self
    }

    /// Most elements allowed.
    #[must_use]
    pub fn max_items(mut self, count: usize) -> Self {
        self.max_items = Some(count);
        self
    }
}

impl From<ArrayRule> for Rule {
    fn from(value: ArrayRule) -> Self {
        Self::Array(value)
    }
}

impl From<Schema> for Rule {
    fn from(value: Schema) -> Self {
        Self::Object(value)
    }
}
