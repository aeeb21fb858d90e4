use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// One declarative HTTP request plus its expected-outcome assertion.
/// Built at suite-definition time, consumed once per run.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    /// Attach the run's bearer credential to this request.
    pub auth: bool,
    pub expect: Expectation,
}

impl Check {
    pub fn new(name: &str, method: Method, path: &str) -> Self {
        Self {
            name: name.to_string(),
            method,
            path: path.to_string(),
            body: None,
            headers: Vec::new(),
            auth: false,
            expect: Expectation::status([200]),
        }
    }

    pub fn get(name: &str, path: &str) -> Self {
        Self::new(name, Method::GET, path)
    }

    pub fn post(name: &str, path: &str, body: Value) -> Self {
        let mut check = Self::new(name, Method::POST, path);
        check.body = Some(body);
        check
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn authed(mut self) -> Self {
        self.auth = true;
        self
    }

    pub fn expecting(mut self, expect: Expectation) -> Self {
        self.expect = expect;
        self
    }
}

/// Declarative response expectation: an allowed-status list plus
/// JSON-pointer body predicates.
#[derive(Debug, Clone, Serialize)]
pub struct Expectation {
    pub statuses: Vec<u16>,
    pub body: Vec<BodyPredicate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyPredicate {
    /// Value at `pointer` must equal `value` exactly.
    FieldEquals { pointer: String, value: Value },
    /// Value at `pointer` must exist, be non-null, and (for strings)
    /// be non-empty.
    FieldPresent { pointer: String },
}

impl Expectation {
    pub fn status(statuses: impl IntoIterator<Item = u16>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            body: Vec::new(),
        }
    }

    pub fn field_equals(mut self, pointer: &str, value: Value) -> Self {
        self.body.push(BodyPredicate::FieldEquals {
            pointer: pointer.to_string(),
            value,
        });
        self
    }

    pub fn field_present(mut self, pointer: &str) -> Self {
        self.body.push(BodyPredicate::FieldPresent {
            pointer: pointer.to_string(),
        });
        self
    }

    /// Evaluate against an actual response. The Err carries the
    /// human-readable mismatch for the report.
    pub fn check(&self, status: u16, body: &Value) -> Result<(), String> {
        if !self.statuses.contains(&status) {
            return Err(format!(
                "expected status {:?}, got {status}",
                self.statuses
            ));
        }

        for predicate in &self.body {
            match predicate {
                BodyPredicate::FieldEquals { pointer, value } => match body.pointer(pointer) {
                    None => return Err(format!("missing field at {pointer}")),
                    Some(actual) if actual != value => {
                        return Err(format!(
                            "field {pointer}: expected {value}, got {actual}"
                        ));
                    }
                    Some(_) => {}
                },
                BodyPredicate::FieldPresent { pointer } => match body.pointer(pointer) {
                    None | Some(Value::Null) => {
                        return Err(format!("missing field at {pointer}"));
                    }
                    Some(Value::String(s)) if s.is_empty() => {
                        return Err(format!("field {pointer} is empty"));
                    }
                    Some(_) => {}
                },
            }
        }

        Ok(())
    }
}

/// Classification of an executed check. `Fail` points at the
/// application under test; `Error` points at the harness or the
/// environment between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail { mismatch: String },
    Error { reason: String },
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// Exactly one per executed check. `status` is absent when the request
/// never completed.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub outcome: Outcome,
    pub duration_ms: u64,
}
