use crate::error::RecoveryError;
use crate::models::{fallback_dataset, CurrentUser, Dataset};
use crate::validator::{check_current_user, validate_or_throw, Section};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// All-or-nothing: the validated input, or the fallback dataset if any
/// single check fails.
pub fn sanitize_or_fallback(data: &Value) -> Dataset {
    match validate_or_throw(data) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!(error = %e, "Using fallback data due to validation error");
            fallback_dataset()
        }
    }
}

/// Salvages every field that passes on its own. Starts from the fallback
/// dataset and replaces one field at a time, so a failure in one field never
/// affects another. Never fails.
pub fn recover_partial(data: &Value) -> Dataset {
    let mut result = fallback_dataset();

    let Some(obj) = data.as_object() else {
        debug!("Input is not an object, returning fallback data");
        return result;
    };

    if let Some(Some(user)) = recover("currentUser", || recover_current_user(obj)) {
        result.current_user = user;
    }

    if let Some(items) = recover(Section::News.key(), || recover_items(obj, Section::News)) {
        result.news = items;
    }
    if let Some(items) = recover(Section::Events.key(), || recover_items(obj, Section::Events)) {
        result.events = items;
    }
    if let Some(items) = recover(Section::NewHires.key(), || recover_items(obj, Section::NewHires)) {
        result.new_hires = items;
    }
    if let Some(items) = recover(Section::QuickLinks.key(), || {
        recover_items(obj, Section::QuickLinks)
    }) {
        result.quick_links = items;
    }
    if let Some(items) = recover(Section::Spaces.key(), || recover_items(obj, Section::Spaces)) {
        result.spaces = items;
    }
    if let Some(items) = recover(Section::Applications.key(), || {
        recover_items(obj, Section::Applications)
    }) {
        result.applications = items;
    }

    let counts = result.counts();
    info!(
        news = counts.news,
        events = counts.events,
        new_hires = counts.new_hires,
        quick_links = counts.quick_links,
        spaces = counts.spaces,
        applications = counts.applications,
        "Partial data recovery completed"
    );

    result
}

/// Runs one isolated recovery step, logging and swallowing its failure.
fn recover<T>(field: &str, step: impl FnOnce() -> Result<T, RecoveryError>) -> Option<T> {
    match step() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(field, error = %e, "Failed to recover field");
            None
        }
    }
}

/// `Ok(None)` when the user is present but fails a check; the fallback user
/// is kept in that case.
fn recover_current_user(obj: &Map<String, Value>) -> Result<Option<CurrentUser>, RecoveryError> {
    let user = obj.get("currentUser");
    if let Err(v) = check_current_user(user) {
        debug!(field = %v.field, "{}, keeping fallback user", v.message);
        return Ok(None);
    }

    let Some(user) = user else {
        return Ok(None);
    };
    serde_json::from_value(user.clone())
        .map(Some)
        .map_err(|source| RecoveryError::Malformed {
            field: "currentUser",
            source,
        })
}

fn recover_items<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    section: Section,
) -> Result<Vec<T>, RecoveryError> {
    let items = obj
        .get(section.key())
        .and_then(Value::as_array)
        .ok_or(RecoveryError::NotAnArray(section.key()))?;

    let valid: Vec<Value> = items
        .iter()
        .filter(|item| section.is_valid_item(item))
        .cloned()
        .collect();
    if valid.len() < items.len() {
        debug!(
            field = section.key(),
            dropped = items.len() - valid.len(),
            "Dropped invalid items"
        );
    }

    serde_json::from_value(Value::Array(valid)).map_err(|source| RecoveryError::Malformed {
        field: section.key(),
        source,
    })
}
