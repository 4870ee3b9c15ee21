use crate::checks::{is_valid_email, is_valid_iso_date, is_valid_url};
use crate::error::{ValidationError, INVALID_STRUCTURE};
use crate::models::Dataset;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{error, info};

const USER_FIELDS: [&str; 5] = ["id", "name", "email", "department", "role"];

/// The six item sequences of a dataset, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    News,
    Events,
    NewHires,
    QuickLinks,
    Spaces,
    Applications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::News,
        Section::Events,
        Section::NewHires,
        Section::QuickLinks,
        Section::Spaces,
        Section::Applications,
    ];

    /// JSON key of the sequence in the fixture.
    pub fn key(&self) -> &'static str {
        match self {
            Section::News => "news",
            Section::Events => "events",
            Section::NewHires => "newHires",
            Section::QuickLinks => "quickLinks",
            Section::Spaces => "spaces",
            Section::Applications => "applications",
        }
    }

    fn item_label(&self) -> &'static str {
        match self {
            Section::News => "News article",
            Section::Events => "Event",
            Section::NewHires => "New hire",
            Section::QuickLinks => "Quick link",
            Section::Spaces => "Space",
            Section::Applications => "Application",
        }
    }

    fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Section::News => &["id", "title", "author", "publishDate"],
            Section::Events => &["id", "title", "startDate", "endDate"],
            Section::NewHires => &["id", "name", "position", "department", "startDate"],
            Section::QuickLinks => &["id", "title", "url", "category"],
            Section::Spaces => &["id", "name", "description", "lastActivity"],
            Section::Applications => &["id", "name", "url", "icon", "category"],
        }
    }

    fn date_fields(&self) -> &'static [&'static str] {
        match self {
            Section::News => &["publishDate"],
            Section::Events => &["startDate", "endDate"],
            Section::NewHires => &["startDate"],
            Section::Spaces => &["lastActivity"],
            Section::QuickLinks | Section::Applications => &[],
        }
    }

    fn url_fields(&self) -> &'static [&'static str] {
        match self {
            Section::QuickLinks | Section::Applications => &["url"],
            _ => &[],
        }
    }

    /// Checks one item, returning the diagnostic for the first failed rule.
    pub fn check_item(&self, item: &Value) -> Result<(), String> {
        let label = self.item_label();
        let Some(obj) = item.as_object() else {
            return Err(format!("{label} missing required fields"));
        };

        let typed_ok = match self {
            Section::Spaces => {
                obj.get("memberCount").is_some_and(Value::is_number)
                    && obj.get("isActive").is_some_and(Value::is_boolean)
            }
            _ => true,
        };
        if !typed_ok || !has_required_strings(obj, self.required_fields()) {
            return Err(format!("{label} missing required fields"));
        }

        if self
            .date_fields()
            .iter()
            .any(|f| !str_field(obj, f).is_some_and(is_valid_iso_date))
        {
            return Err(format!("{label} has invalid date format"));
        }

        if self
            .url_fields()
            .iter()
            .any(|f| !str_field(obj, f).is_some_and(is_valid_url))
        {
            return Err(format!("{label} has invalid URL"));
        }

        Ok(())
    }

    pub fn is_valid_item(&self, item: &Value) -> bool {
        self.check_item(item).is_ok()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One failed structural check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub message: String,
    /// Path of the offending field, e.g. `currentUser.email` or `news[2]`.
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Violation {
    fn new(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
            index: None,
            value: None,
        }
    }

    fn with_value(mut self, value: Option<&Value>) -> Self {
        self.value = value.cloned();
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<Violation> for ValidationError {
    fn from(v: Violation) -> Self {
        let err = ValidationError::new(INVALID_STRUCTURE).with_field(v.field);
        match v.value {
            Some(value) => err.with_value(value),
            None => err,
        }
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn has_required_strings(obj: &Map<String, Value>, fields: &[&str]) -> bool {
    fields
        .iter()
        .all(|f| str_field(obj, f).is_some_and(|s| !s.is_empty()))
}

pub(crate) fn check_current_user(user: Option<&Value>) -> Result<(), Violation> {
    let Some(obj) = user.and_then(Value::as_object) else {
        return Err(Violation::new("currentUser is missing or invalid", "currentUser").with_value(user));
    };

    if !has_required_strings(obj, &USER_FIELDS) {
        return Err(Violation::new("currentUser missing required fields", "currentUser").with_value(user));
    }

    if !str_field(obj, "email").is_some_and(is_valid_email) {
        return Err(
            Violation::new("currentUser email is invalid", "currentUser.email").with_value(obj.get("email")),
        );
    }

    Ok(())
}

/// Collects violations in check order; stops after the first unless
/// `exhaustive` is set.
struct Scan {
    violations: Vec<Violation>,
    exhaustive: bool,
}

impl Scan {
    /// Records a violation and tells the caller whether to keep going.
    fn report(&mut self, violation: Violation) -> bool {
        self.violations.push(violation);
        self.exhaustive
    }

    fn run(mut self, data: &Value) -> Vec<Violation> {
        let Some(obj) = data.as_object() else {
            self.report(Violation::new("Data is not an object", "data").with_value(Some(data)));
            return self.violations;
        };

        if let Err(v) = check_current_user(obj.get("currentUser")) {
            if !self.report(v) {
                return self.violations;
            }
        }

        for section in Section::ALL {
            if !obj.get(section.key()).is_some_and(Value::is_array) {
                let v = Violation::new(format!("{section} is not an array"), section.key())
                    .with_value(obj.get(section.key()));
                if !self.report(v) {
                    return self.violations;
                }
            }
        }

        for section in Section::ALL {
            let Some(items) = obj.get(section.key()).and_then(Value::as_array) else {
                continue;
            };
            for (index, item) in items.iter().enumerate() {
                if let Err(message) = section.check_item(item) {
                    let v = Violation {
                        message,
                        field: format!("{}[{}]", section.key(), index),
                        index: Some(index),
                        value: Some(item.clone()),
                    };
                    if !self.report(v) {
                        return self.violations;
                    }
                }
            }
        }

        self.violations
    }
}

/// First failing check, in the fixed check order, without logging.
pub fn first_violation(data: &Value) -> Option<Violation> {
    Scan {
        violations: Vec::new(),
        exhaustive: false,
    }
    .run(data)
    .into_iter()
    .next()
}

/// Every failing check. Each item contributes at most one violation, and a
/// non-object input stops the scan.
pub fn all_violations(data: &Value) -> Vec<Violation> {
    Scan {
        violations: Vec::new(),
        exhaustive: true,
    }
    .run(data)
}

/// Short-circuit shape check. Logs the first violation at error level, or a
/// single confirmation when everything passes.
pub fn is_structurally_valid(data: &Value) -> bool {
    match first_violation(data) {
        Some(v) => {
            error!(field = %v.field, "{}", v.message);
            false
        }
        None => {
            info!("Dashboard data validation passed");
            true
        }
    }
}

/// Returns the input as a typed [`Dataset`] or the first violation as a
/// [`ValidationError`]. Never returns a partial result.
pub fn validate_or_throw(data: &Value) -> Result<Dataset, ValidationError> {
    if let Some(v) = first_violation(data) {
        error!(field = %v.field, "{}", v.message);
        return Err(v.into());
    }
    info!("Dashboard data validation passed");

    serde_json::from_value(data.clone())
        .map_err(|e| ValidationError::new(format!("{INVALID_STRUCTURE}: {e}")))
}
