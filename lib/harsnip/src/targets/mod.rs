//! Built-in targets.

mod java;
mod javascript;
mod python;
mod shell;

use crate::Target;

/// Every built-in target, in registration order.
pub(crate) fn builtins() -> Vec<Target> {
    vec![
        shell::target(),
        python::target(),
        java::target(),
        javascript::target(),
    ]
}

/// A JSON string literal, also valid in Python, Java and JavaScript.
pub(crate) fn json_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
