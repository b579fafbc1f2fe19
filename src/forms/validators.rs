use super::ValidationErrors;
use serde_json::{json, Value};
use std::fmt;
use std::rc::Rc;

/// A single validation rule. A failing rule contributes one entry to the
/// control's error map, keyed by [`Validator::code`].
#[derive(Clone)]
pub enum Validator {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Custom {
        code: String,
        check: Rc<dyn Fn(&str) -> Option<Value>>,
    },
}

impl Validator {
    /// `check` returns the error payload when the value fails.
    pub fn custom(code: impl Into<String>, check: impl Fn(&str) -> Option<Value> + 'static) -> Self {
        Validator::Custom {
            code: code.into(),
            check: Rc::new(check),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Validator::Required => "required",
            Validator::MinLength(_) => "minlength",
            Validator::MaxLength(_) => "maxlength",
            Validator::Email => "email",
            Validator::Custom { code, .. } => code,
        }
    }

    pub fn validate(&self, value: &str) -> Option<Value> {
        match self {
            Validator::Required => value.is_empty().then(|| Value::Bool(true)),
            // Length and format rules leave empty values to `Required`.
            Validator::MinLength(min) => {
                let actual = value.chars().count();
                (actual > 0 && actual < *min)
                    .then(|| json!({ "requiredLength": min, "actualLength": actual }))
            }
            Validator::MaxLength(max) => {
                let actual = value.chars().count();
                (actual > *max).then(|| json!({ "requiredLength": max, "actualLength": actual }))
            }
            Validator::Email => {
                (!value.is_empty() && !looks_like_email(value)).then(|| Value::Bool(true))
            }
            Validator::Custom { check, .. } => check(value),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::MinLength(n) => write!(f, "MinLength({n})"),
            Validator::MaxLength(n) => write!(f, "MaxLength({n})"),
            other => write!(f, "{}", other.code()),
        }
    }
}

pub(crate) fn run_all(validators: &[Validator], value: &str) -> ValidationErrors {
    validators
        .iter()
        .filter_map(|v| v.validate(value).map(|payload| (v.code().to_string(), payload)))
        .collect()
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
