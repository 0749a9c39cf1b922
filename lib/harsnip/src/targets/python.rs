//! Python target: `requests`.

use harsnip_core::{MimeKind, NormalizedRequest};
use serde_json::Value;

use super::json_string;
use crate::escape::escape_double_quotes;
use crate::{Client, ClientInfo, CodeBuilder, RenderOptions, Target, TargetInfo};

const INDENT: &str = "    ";

/// The `python` target.
pub(crate) fn target() -> Target {
    Target::new(TargetInfo::new("python", "Python", ".py", "requests")).client(Client::new(
        ClientInfo::new("requests", "Requests")
            .with_link("http://docs.python-requests.org/en/latest/api/#requests.request")
            .with_description("Requests HTTP library"),
        requests,
    ))
}

/// Render a `requests` script.
///
/// Options: `indent`, `pretty` (multi-line dictionaries for JSON payloads).
pub(crate) fn requests(request: &NormalizedRequest, options: &RenderOptions) -> String {
    let indent = options.indent_str(INDENT);
    let mut code = CodeBuilder::new(indent.as_str());

    code.push("import requests").blank();
    code.push(format!("url = {}", json_string(request.full_url())))
        .blank();

    let post_data = request.post_data();
    let mut arguments = Vec::new();
    let mut declared = false;
    match (MimeKind::of(post_data.mime_type()), post_data.json_obj()) {
        (MimeKind::Json, Some(json)) => {
            let literal = literal(json, &indent, 0, options.is_pretty());
            code.push(format!("payload = {literal}"));
            arguments.push("json=payload");
            declared = true;
        }
        _ if !post_data.is_empty() => {
            code.push(format!("payload = {}", json_string(post_data.text())));
            arguments.push("data=payload");
            declared = true;
        }
        _ => {}
    }

    let headers = request.all_headers();
    match headers.len() {
        0 => {}
        1 => {
            for (name, value) in headers {
                code.push(format!(
                    "headers = {{\"{}\": \"{}\"}}",
                    escape_double_quotes(name),
                    escape_double_quotes(value)
                ));
            }
        }
        count => {
            code.push("headers = {");
            for (index, (name, value)) in headers.iter().enumerate() {
                let comma = if index + 1 == count { "" } else { "," };
                code.push_indented(
                    1,
                    format!(
                        "\"{}\": \"{}\"{comma}",
                        escape_double_quotes(name),
                        escape_double_quotes(value)
                    ),
                );
            }
            code.push("}");
        }
    }
    if !headers.is_empty() {
        arguments.push("headers=headers");
        declared = true;
    }
    if declared {
        code.blank();
    }

    let mut call = format!(
        "response = requests.request({}, url",
        json_string(request.parsed_method().as_str())
    );
    for argument in arguments {
        call.push_str(", ");
        call.push_str(argument);
    }
    call.push(')');
    code.push(call).blank().push("print(response.text)");

    code.join()
}

/// Python literal for a JSON value.
fn literal(value: &Value, indent: &str, level: usize, pretty: bool) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => json_string(text),
        Value::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| literal(item, indent, level, pretty))
                .collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(entries) if entries.is_empty() => "{}".to_string(),
        Value::Object(entries) => {
            let entries = entries.iter().map(|(key, value)| {
                format!(
                    "{}: {}",
                    json_string(key),
                    literal(value, indent, level + 1, pretty)
                )
            });
            if pretty {
                let inner = indent.repeat(level + 1);
                let entries: Vec<String> = entries.map(|entry| format!("{inner}{entry}")).collect();
                format!("{{\n{}\n{}}}", entries.join(",\n"), indent.repeat(level))
            } else {
                format!("{{{}}}", entries.collect::<Vec<_>>().join(", "))
            }
        }
    }
}
