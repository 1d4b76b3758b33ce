use crate::{options::UnknownRulePolicy, Strategy};
use attrschema_core::{
    model::{is_truthy, AttributeDescriptor, RegexLiteral, RuleArg, RuleArgs},
    Error, Fragment, Result,
};
use serde_json::{json, Number, Value};

/// Rule names the mapper understands. Anything else is skipped.
pub const KNOWN_RULES: &[&str] = &[
    "min",
    "max",
    "isEmail",
    "isUUID",
    "notEmpty",
    "len",
    "isUrl",
    "isAlpha",
    "isNumeric",
    "isAlphanumeric",
    "isLowercase",
    "isUppercase",
    "contains",
    "notContains",
    "notIn",
    "is",
    "not",
];

/// Keywords a validation fragment may never set.
const RETYPING_KEYS: &[&str] = &["type", "anyOf", "nullable", "default"];

/// A validation rule with its argument normalized.
///
/// Every accepted argument shape of a rule parses to the same `Rule`, so
/// the rendered constraint only depends on what the rule means.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Min(Number),
    Max(Number),
    IsEmail,
    IsUuid,
    NotEmpty,
    Len {
        min: Option<Number>,
        max: Option<Number>,
    },
    IsUrl,
    IsAlpha,
    IsNumeric,
    IsAlphanumeric,
    IsLowercase,
    IsUppercase,

    /// The value contains this literal.
    Contains(String),

    /// The value contains none of these literals.
    NotContains(Vec<String>),

    /// The value is none of these.
    NotIn(Vec<Value>),

    /// The value matches this regular expression.
    Is(RegexLiteral),

    /// The value does not match this regular expression.
    Not(RegexLiteral),
}

impl Rule {
    /// Parses one named rule.
    ///
    /// Returns `Ok(None)` when the rule is switched off or its name is not
    /// one of [`KNOWN_RULES`].
    pub fn parse(name: &str, arg: &RuleArg) -> Result<Option<Rule>> {
        let args = arg.args();

        let rule = match name {
            "min" => bound(name, args)?.map(Rule::Min),
            "max" => bound(name, args)?.map(Rule::Max),
            "isEmail" => arg.is_enabled().then_some(Rule::IsEmail),
            "isUUID" => arg.is_enabled().then_some(Rule::IsUuid),
            "notEmpty" => arg.is_enabled().then_some(Rule::NotEmpty),
            "len" => length(name, args)?,
            "isUrl" => arg.is_enabled().then_some(Rule::IsUrl),
            "isAlpha" => arg.is_enabled().then_some(Rule::IsAlpha),
            "isNumeric" => arg.is_enabled().then_some(Rule::IsNumeric),
            "isAlphanumeric" => arg.is_enabled().then_some(Rule::IsAlphanumeric),
            "isLowercase" => arg.is_enabled().then_some(Rule::IsLowercase),
            "isUppercase" => arg.is_enabled().then_some(Rule::IsUppercase),
            "contains" => match args {
                RuleArgs::Value(value) => literal(name, first(value))?.map(Rule::Contains),
                RuleArgs::None => None,
                RuleArgs::Regex(_) => return Err(Error::invalid_type(name, "string")),
            },
            "notContains" => literals(name, args)?.map(Rule::NotContains),
            "notIn" => candidates(name, args)?.map(Rule::NotIn),
            "is" => regex(name, args)?.map(Rule::Is),
            "not" => regex(name, args)?.map(Rule::Not),
            _ => None,
        };

        Ok(rule)
    }

    pub fn is_known(name: &str) -> bool {
        KNOWN_RULES.contains(&name)
    }

    /// Sets this rule's keywords on `fragment`, overwriting earlier ones.
    pub fn apply(&self, fragment: &mut Fragment) {
        match self {
            Rule::Min(min) => fragment.insert("minimum", min.clone()),
            Rule::Max(max) => fragment.insert("maximum", max.clone()),
            Rule::IsEmail => fragment.insert("format", "email"),
            Rule::IsUuid => fragment.insert("format", "uuid"),
            Rule::NotEmpty => fragment.insert("minLength", 1),
            Rule::Len { min, max } => {
                if let Some(min) = min {
                    fragment.insert("minLength", min.clone());
                }
                if let Some(max) = max {
                    fragment.insert("maxLength", max.clone());
                }
            }
            Rule::IsUrl => fragment.insert("format", "url"),
            Rule::IsAlpha => fragment.insert("pattern", "^[a-zA-Z]+$"),
            Rule::IsNumeric => fragment.insert("pattern", "^[0-9]+$"),
            Rule::IsAlphanumeric => fragment.insert("pattern", "^[a-zA-Z0-9]+$"),
            Rule::IsLowercase => fragment.insert("pattern", "^[a-z]+$"),
            Rule::IsUppercase => fragment.insert("pattern", "^[A-Z]+$"),
            Rule::Contains(literal) => {
                fragment.insert("pattern", format!("^.*{}.*$", escape(literal)))
            }
            Rule::NotContains(literals) => {
                let pattern = match &literals[..] {
                    [literal] => format!("^(?!.*{}).*$", escape(literal)),
                    literals => {
                        let alternatives: Vec<_> =
                            literals.iter().map(|literal| escape(literal)).collect();
                        format!("^(?!.*({})).*$", alternatives.join("|"))
                    }
                };
                fragment.insert("pattern", pattern)
            }
            Rule::NotIn(candidates) => fragment.insert("not", json!({ "enum": candidates })),
            Rule::Is(regex) => fragment.insert("regexp", regex.to_string()),
            Rule::Not(regex) => fragment.insert("not", json!({ "regexp": regex.to_string() })),
        }
    }
}

/// The standard rendering of a rule list, in rule order.
pub fn render(rules: &[Rule]) -> Fragment {
    let mut fragment = Fragment::new();
    for rule in rules {
        rule.apply(&mut fragment);
    }
    fragment
}

/// Whether an attribute's validation rules take part in its schema.
///
/// Only numeric and free-text kinds are constrained. A `VIRTUAL` counts as
/// its return type.
pub fn applies_to(attr: &AttributeDescriptor) -> bool {
    let ty = attr.ty.resolve();
    ty.is_integer() || ty.is_number() || ty.is_text()
}

/// Translates an attribute's validation rules into a constraint fragment.
pub fn map(
    name: &str,
    attr: &AttributeDescriptor,
    strategy: &dyn Strategy,
    unknown_rules: UnknownRulePolicy,
) -> Result<Fragment> {
    if !applies_to(attr) || attr.validate.is_empty() {
        return Ok(Fragment::new());
    }

    let mut rules = Vec::with_capacity(attr.validate.len());

    for (rule, arg) in attr.validate.iter() {
        if !Rule::is_known(rule) {
            if unknown_rules.is_warn() {
                tracing::warn!(attribute = name, rule, "skipping unknown validation rule");
            }
            continue;
        }

        if let Some(rule) = Rule::parse(rule, arg)? {
            rules.push(rule);
        }
    }

    if rules.is_empty() {
        return Ok(Fragment::new());
    }

    let fragment = strategy.validation(&rules);

    if let Some(key) = RETYPING_KEYS.iter().find(|key| fragment.contains_key(key)) {
        return Err(Error::strategy_contract(
            "validation",
            format!("result must not set `{key}`"),
        ));
    }

    Ok(fragment)
}

/// Escapes `literal` for an ECMA-262 pattern.
///
/// Only syntax characters and `/` are escaped. Unicode-mode patterns reject
/// identity escapes of anything else (`\-`, `\#`, ...).
fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if matches!(
            ch,
            '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '/'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// `[x, ...]` means `x`.
fn first(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        value => value,
    }
}

fn bound(name: &str, args: RuleArgs<'_>) -> Result<Option<Number>> {
    match args {
        RuleArgs::None => Ok(None),
        RuleArgs::Regex(_) => Err(Error::invalid_type(name, "number")),
        RuleArgs::Value(value) => match first(value) {
            Value::Number(number) => Ok(Some(number.clone())),
            Value::Null | Value::Bool(false) => Ok(None),
            _ => Err(Error::invalid_type(name, "number")),
        },
    }
}

fn length(name: &str, args: RuleArgs<'_>) -> Result<Option<Rule>> {
    let invalid = || Error::invalid_type(name, "array of numbers");

    let items = match args {
        RuleArgs::None => return Ok(None),
        RuleArgs::Regex(_) => return Err(invalid()),
        RuleArgs::Value(Value::Array(items)) => items,
        RuleArgs::Value(value) if !is_truthy(value) => return Ok(None),
        RuleArgs::Value(_) => return Err(invalid()),
    };

    let number = |value: Option<&Value>| match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(Some(number.clone())),
        Some(_) => Err(invalid()),
    };

    let min = number(items.first())?;
    let max = number(items.get(1))?;

    if min.is_none() && max.is_none() {
        return Ok(None);
    }

    Ok(Some(Rule::Len { min, max }))
}

/// A non-empty string literal. Empty strings switch the rule off.
fn literal(name: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::String(literal) if literal.is_empty() => Ok(None),
        Value::String(literal) => Ok(Some(literal.clone())),
        value if !is_truthy(value) => Ok(None),
        _ => Err(Error::invalid_type(name, "string")),
    }
}

/// A single literal or a list of alternatives.
fn literals(name: &str, args: RuleArgs<'_>) -> Result<Option<Vec<String>>> {
    match args {
        RuleArgs::None => Ok(None),
        RuleArgs::Regex(_) => Err(Error::invalid_type(name, "string")),
        RuleArgs::Value(Value::Array(items)) => {
            let mut literals = Vec::with_capacity(items.len());
            for item in items {
                literals.extend(literal(name, item)?);
            }
            Ok((!literals.is_empty()).then_some(literals))
        }
        RuleArgs::Value(value) => Ok(literal(name, value)?.map(|literal| vec![literal])),
    }
}

/// Candidate values, flattened one level: `[["a"], ["b"]]` and `["a", "b"]`
/// are the same list.
fn candidates(name: &str, args: RuleArgs<'_>) -> Result<Option<Vec<Value>>> {
    match args {
        RuleArgs::None => Ok(None),
        RuleArgs::Value(Value::Array(items)) => {
            let mut candidates = vec![];
            for item in items {
                match item {
                    Value::Array(nested) => candidates.extend(nested.iter().cloned()),
                    item => candidates.push(item.clone()),
                }
            }
            Ok(Some(candidates))
        }
        RuleArgs::Value(value) if !is_truthy(value) => Ok(None),
        _ => Err(Error::invalid_type(name, "array")),
    }
}

/// A regular expression given as a native regex, a pattern string, a
/// `[pattern, flags]` pair or a `{pattern, flags}` object.
fn regex(name: &str, args: RuleArgs<'_>) -> Result<Option<RegexLiteral>> {
    let invalid = || Error::invalid_type(name, "regular expression");

    let regex = match args {
        RuleArgs::None | RuleArgs::Value(Value::Null) => return Ok(None),
        RuleArgs::Regex(regex) => regex.clone(),
        RuleArgs::Value(Value::String(pattern)) => RegexLiteral::new(pattern.as_str(), ""),
        RuleArgs::Value(Value::Array(items)) => match &items[..] {
            [Value::String(pattern)] => RegexLiteral::new(pattern.as_str(), ""),
            [Value::String(pattern), Value::String(flags)] => {
                RegexLiteral::new(pattern.as_str(), flags.as_str())
            }
            _ => return Err(invalid()),
        },
        RuleArgs::Value(value @ Value::Object(_)) => {
            serde_json::from_value(value.clone()).map_err(|_| invalid())?
        }
        RuleArgs::Value(_) => return Err(invalid()),
    };

    Ok(Some(regex))
}
