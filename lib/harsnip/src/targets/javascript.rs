//! JavaScript target: the browser `fetch` API.

use harsnip_core::{MimeKind, NormalizedRequest, PairMap};
use serde_json::Value;

use crate::escape::escape_single_quotes;
use crate::{Client, ClientInfo, CodeBuilder, RenderOptions, Target, TargetInfo};

const INDENT: &str = "  ";

/// The `javascript` target.
pub(crate) fn target() -> Target {
    Target::new(TargetInfo::new("javascript", "JavaScript", ".js", "fetch")).client(Client::new(
        ClientInfo::new("fetch", "fetch")
            .with_link("https://developer.mozilla.org/en-US/docs/Web/API/fetch")
            .with_description("Perform asynchronous HTTP requests with the Fetch API"),
        fetch,
    ))
}

/// Render a `fetch` call.
///
/// Options: `indent`.
pub(crate) fn fetch(request: &NormalizedRequest, options: &RenderOptions) -> String {
    let mut code = CodeBuilder::new(options.indent_str(INDENT));
    let post_data = request.post_data();
    let multipart = post_data.boundary().is_some();

    code.push(format!("const url = {};", quote(request.full_url())));
    if multipart {
        code.push("const form = new FormData();");
        for param in post_data.params() {
            let value = param
                .file_name
                .as_deref()
                .or(param.value.as_deref())
                .unwrap_or_default();
            code.push(format!(
                "form.append({}, {});",
                quote(&param.name),
                quote(value)
            ));
        }
    }

    let mut fields = vec![format!("method: {}", quote(request.parsed_method().as_str()))];

    // The browser writes its own multipart boundary.
    let headers: PairMap = request
        .all_headers()
        .iter()
        .filter(|(name, _)| !(multipart && name.eq_ignore_ascii_case("content-type")))
        .collect();
    if !headers.is_empty() {
        let entries: Vec<String> = headers
            .iter()
            .map(|(name, value)| format!("{}: {}", key(name), quote(value)))
            .collect();
        fields.push(format!("headers: {{{}}}", entries.join(", ")));
    }

    let body = match (MimeKind::of(post_data.mime_type()), post_data.params_obj()) {
        _ if multipart => Some("form".to_string()),
        (MimeKind::FormUrlEncoded, Some(params)) => {
            let entries: Vec<String> = params
                .iter()
                .map(|(name, value)| format!("{}: {}", key(name), quote(value)))
                .collect();
            Some(format!("new URLSearchParams({{{}}})", entries.join(", ")))
        }
        (MimeKind::Json, _) if post_data.json_obj().is_some() => post_data
            .json_obj()
            .map(|json| format!("JSON.stringify({})", literal(json))),
        _ if !post_data.is_empty() => Some(quote(post_data.text())),
        _ => None,
    };
    if let Some(body) = body {
        fields.push(format!("body: {body}"));
    }

    code.push("const options = {");
    let count = fields.len();
    for (index, field) in fields.into_iter().enumerate() {
        let comma = if index + 1 == count { "" } else { "," };
        code.push_indented(1, format!("{field}{comma}"));
    }
    code.push("};").blank();

    code.push("try {")
        .push_indented(1, "const response = await fetch(url, options);")
        .push_indented(1, "const data = await response.json();")
        .push_indented(1, "console.log(data);")
        .push("} catch (error) {")
        .push_indented(1, "console.error(error);")
        .push("}");

    code.join()
}

fn quote(value: &str) -> String {
    format!("'{}'", escape_single_quotes(value))
}

/// Object key: bare when it is a valid identifier, quoted otherwise.
fn key(name: &str) -> String {
    let mut chars = name.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if identifier {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Single-line JavaScript literal for a JSON value.
fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote(text),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(name, value)| format!("{}: {}", key(name), literal(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}
