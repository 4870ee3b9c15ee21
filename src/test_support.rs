use serde_json::Value;

pub const DASHBOARD_FIXTURE: &str = include_str!("../fixtures/dashboard.json");

/// A fixture that passes every check, two items per sequence.
pub fn valid_fixture() -> Value {
    serde_json::from_str(DASHBOARD_FIXTURE).unwrap()
}
