//! Java target: `OkHttp`.

use harsnip_core::{Method, NormalizedRequest};

use super::json_string;
use crate::escape::escape_double_quotes;
use crate::{Client, ClientInfo, CodeBuilder, RenderOptions, Target, TargetInfo};

const INDENT: &str = "  ";

/// The `java` target.
pub(crate) fn target() -> Target {
    Target::new(TargetInfo::new("java", "Java", ".java", "okhttp")).client(Client::new(
        ClientInfo::new("okhttp", "OkHttp")
            .with_link("http://square.github.io/okhttp/")
            .with_description("An HTTP Request Client Library"),
        okhttp,
    ))
}

/// Render an `OkHttp` call.
///
/// Options: `indent`.
pub(crate) fn okhttp(request: &NormalizedRequest, options: &RenderOptions) -> String {
    let mut code = CodeBuilder::new(options.indent_str(INDENT));

    code.push("OkHttpClient client = new OkHttpClient();").blank();

    let post_data = request.post_data();
    let has_body = !post_data.is_empty();
    if has_body {
        let media_type = match post_data.boundary() {
            Some(boundary) => format!("{}; boundary={boundary}", post_data.mime_type()),
            None => post_data.mime_type().to_string(),
        };
        code.push(format!(
            "MediaType mediaType = MediaType.parse(\"{}\");",
            escape_double_quotes(&media_type)
        ));
        code.push(format!(
            "RequestBody body = RequestBody.create(mediaType, {});",
            json_string(post_data.text())
        ));
    }

    code.push("Request request = new Request.Builder()");
    code.push_indented(
        1,
        format!(".url(\"{}\")", escape_double_quotes(request.full_url())),
    );

    let body = if has_body { "body" } else { "null" };
    let method = request.parsed_method();
    code.push_indented(
        1,
        match method {
            // OkHttp has no shortcut for OPTIONS or extension methods.
            _ if !method.is_standard() || method == Method::Options => {
                format!(".method(\"{method}\", {body})")
            }
            _ if method.allows_body() => {
                format!(".{}({body})", method.as_str().to_lowercase())
            }
            _ => format!(".{}()", method.as_str().to_lowercase()),
        },
    );

    for (name, value) in request.all_headers() {
        code.push_indented(
            1,
            format!(
                ".addHeader(\"{}\", \"{}\")",
                escape_double_quotes(name),
                escape_double_quotes(value)
            ),
        );
    }
    code.push_indented(1, ".build();").blank();
    code.push("Response response = client.newCall(request).execute();");

    code.join()
}
