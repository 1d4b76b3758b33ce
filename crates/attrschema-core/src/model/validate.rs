use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Validation rules declared on an attribute, keyed by rule name.
///
/// Rule names are those of the host framework's validation library (`min`,
/// `isEmail`, `len`, `notIn`, `is`, ...). Rules keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationRules {
    rules: IndexMap<String, RuleArg>,
}

/// The argument of a single validation rule.
///
/// The same rule can be written in several equivalent shapes, all of which
/// translate identically:
///
/// * a bare value: `min: 0`, `len: [2, 10]`, `contains: "foo"`
/// * an `{args, msg}` wrapper: `min: { args: [0], msg: "too small" }`
/// * for pattern rules, a native regular expression or a `[pattern, flags]`
///   pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleArg {
    /// A native regular expression.
    Regex(RegexLiteral),

    /// A JSON value. Objects of the form `{args, msg}` / `{args, message}`
    /// are recognized as wrappers when the rule is interpreted.
    Value(Value),

    /// An explicit wrapper. Use this to wrap a native regular expression.
    Args {
        args: Box<RuleArg>,
        message: Option<String>,
    },
}

/// The positional argument(s) of a rule once every wrapper is removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleArgs<'a> {
    /// The rule was given as a bare `{msg}` wrapper without `args`.
    None,
    Value(&'a Value),
    Regex(&'a RegexLiteral),
}

/// A regular expression as the validation library sees it: a source pattern
/// plus flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegexLiteral {
    pub pattern: String,
    #[serde(default)]
    pub flags: String,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, arg: impl Into<RuleArg>) {
        self.rules.insert(name.into(), arg.into());
    }

    pub fn get(&self, name: &str) -> Option<&RuleArg> {
        self.rules.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleArg)> {
        self.rules.iter().map(|(name, arg)| (name.as_str(), arg))
    }
}

impl<K: Into<String>, V: Into<RuleArg>> FromIterator<(K, V)> for ValidationRules {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(name, arg)| (name.into(), arg.into()))
                .collect(),
        }
    }
}

impl RuleArg {
    /// Wraps `args` together with a validation message.
    pub fn with_message(args: impl Into<RuleArg>, message: impl Into<String>) -> Self {
        Self::Args {
            args: Box::new(args.into()),
            message: Some(message.into()),
        }
    }

    /// Strips `{args, msg}` wrappers, whichever form they take.
    pub fn args(&self) -> RuleArgs<'_> {
        match self {
            Self::Regex(regex) => RuleArgs::Regex(regex),
            Self::Args { args, .. } => args.args(),
            Self::Value(value) => match wrapped_args(value) {
                Some(Some(args)) => RuleArgs::Value(args),
                Some(None) => RuleArgs::None,
                None => RuleArgs::Value(value),
            },
        }
    }

    /// The validation message, when the rule was given in wrapper form.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Regex(_) => None,
            Self::Args { message, .. } => message.as_deref(),
            Self::Value(Value::Object(object)) if is_wrapper(object) => object
                .get("msg")
                .or_else(|| object.get("message"))
                .and_then(Value::as_str),
            Self::Value(_) => None,
        }
    }

    /// Whether the rule is switched on.
    ///
    /// Follows the validation library: any wrapper counts as enabled unless
    /// its `args` are themselves falsy.
    pub fn is_enabled(&self) -> bool {
        match self.args() {
            RuleArgs::None | RuleArgs::Regex(_) => true,
            RuleArgs::Value(value) => is_truthy(value),
        }
    }
}

/// `Some(args)` if `value` is an `{args, msg}` wrapper.
fn wrapped_args(value: &Value) -> Option<Option<&Value>> {
    match value {
        Value::Object(object) if is_wrapper(object) => Some(object.get("args")),
        _ => None,
    }
}

fn is_wrapper(object: &serde_json::Map<String, Value>) -> bool {
    !object.is_empty()
        && object
            .keys()
            .all(|key| matches!(key.as_str(), "args" | "msg" | "message"))
}

/// JavaScript truthiness.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0 && !n.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<Value> for RuleArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<RegexLiteral> for RuleArg {
    fn from(regex: RegexLiteral) -> Self {
        Self::Regex(regex)
    }
}

impl From<bool> for RuleArg {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for RuleArg {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for RuleArg {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<f64> for RuleArg {
    fn from(value: f64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for RuleArg {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl RegexLiteral {
    pub fn new(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }

    /// The pattern source with the escaping applied when a regular
    /// expression is printed: bare `/` becomes `\/`, line terminators become
    /// escape sequences, and an empty pattern becomes `(?:)`.
    pub fn source(&self) -> String {
        if self.pattern.is_empty() {
            return "(?:)".to_string();
        }

        let mut out = String::with_capacity(self.pattern.len());
        let mut escaped = false;
        let mut in_class = false;

        for ch in self.pattern.chars() {
            if escaped {
                escaped = false;
                match ch {
                    '\n' => out.push('n'),
                    '\r' => out.push('r'),
                    '\u{2028}' => out.push_str("u2028"),
                    '\u{2029}' => out.push_str("u2029"),
                    ch => out.push(ch),
                }
                continue;
            }

            match ch {
                '\\' => {
                    escaped = true;
                    out.push(ch);
                }
                '[' => {
                    in_class = true;
                    out.push(ch);
                }
                ']' => {
                    in_class = false;
                    out.push(ch);
                }
                '/' if !in_class => out.push_str("\\/"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\u{2028}' => out.push_str("\\u2028"),
                '\u{2029}' => out.push_str("\\u2029"),
                ch => out.push(ch),
            }
        }

        out
    }
}

/// Renders the canonical `/pattern/flags` form.
impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags)
    }
}
