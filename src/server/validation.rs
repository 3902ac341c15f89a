//! Declarative request-body validation shared by the three services.
//!
//! Fields are checked in declaration order; within a field the order is
//! missing, then allowed values, then empty. The first failure wins.

use crate::{Error, Result, advice::Scenario};
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub allowed: Option<&'static [&'static str]>,
    pub non_empty: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            allowed: None,
            non_empty: false,
        }
    }

    pub const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self {
            allowed: Some(allowed),
            ..self
        }
    }

    pub const fn non_empty(self) -> Self {
        Self {
            non_empty: true,
            ..self
        }
    }

    fn check(&self, body: &Value) -> Result<()> {
        let value = body.get(self.name).ok_or_else(|| {
            Error::validation(format!("Missing '{}' field in request", self.name))
        })?;

        if let Some(allowed) = self.allowed {
            let permitted = value.as_str().is_some_and(|v| allowed.contains(&v));
            if !permitted {
                return Err(Error::validation(format!(
                    "Invalid '{}' value. Must be one of: {}",
                    self.name,
                    allowed.join(", ")
                )));
            }
        }

        if self.non_empty && is_blank(value) {
            return Err(Error::validation(format!(
                "Empty '{}' field in request",
                self.name
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RequestRules(pub &'static [FieldRule]);

impl RequestRules {
    /// `body` is `None` when the request carried no parseable JSON.
    pub fn validate(&self, body: Option<&Value>) -> Result<()> {
        let body = match body {
            Some(body) if !is_blank(body) => body,
            _ => return Err(Error::validation("Request body is empty")),
        };

        self.0.iter().try_for_each(|rule| rule.check(body))
    }
}

const SCENARIOS: &[&str] = &[
    Scenario::Plant.as_str(),
    Scenario::Closet.as_str(),
    Scenario::Fridge.as_str(),
    Scenario::Kitchen.as_str(),
    Scenario::Bathroom.as_str(),
    Scenario::Bedroom.as_str(),
    Scenario::Other.as_str(),
];

pub const GATEWAY_RULES: RequestRules = RequestRules(&[
    FieldRule::required("scenario").one_of(SCENARIOS),
    FieldRule::required("image_data").non_empty(),
]);

pub const ANALYZER_RULES: RequestRules =
    RequestRules(&[FieldRule::required("image_data").non_empty()]);

pub const GENERATOR_RULES: RequestRules = RequestRules(&[
    FieldRule::required("scenario").one_of(SCENARIOS),
    FieldRule::required("analysis_result"),
]);

/// JSON values treated as "nothing there": null, false, zero and empty
/// strings, arrays or objects.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
