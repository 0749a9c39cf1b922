//! Shell target: `curl` and `wget` command lines.

use harsnip_core::{MimeKind, NormalizedRequest};

use crate::escape::shell_quote;
use crate::{Client, ClientInfo, CodeBuilder, RenderOptions, Target, TargetInfo};

const INDENT: &str = "  ";
const COOKIE: &str = "cookie";

/// The `shell` target.
pub(crate) fn target() -> Target {
    Target::new(TargetInfo::new("shell", "Shell", ".sh", "curl"))
        .client(Client::new(
            ClientInfo::new("curl", "cURL")
                .with_link("http://curl.haxx.se/")
                .with_description("cURL is a command line tool and library for transferring data with URL syntax"),
            curl,
        ))
        .client(Client::new(
            ClientInfo::new("wget", "Wget")
                .with_link("https://www.gnu.org/software/wget/")
                .with_description("a free software package for retrieving files using HTTP, HTTPS"),
            wget,
        ))
}

/// One argument per line, continued with ` \`, or a single line when
/// indentation is disabled.
fn command_builder(options: &RenderOptions) -> CodeBuilder {
    let join = options
        .indent_or(INDENT)
        .map_or_else(|| " ".to_string(), |indent| format!(" \\\n{indent}"));
    CodeBuilder::new("").with_join(join)
}

/// Render a `curl` command.
///
/// Options: `indent`, `short` (`-X`, `-H`, ...), `binary` (`--data-binary`).
pub(crate) fn curl(request: &NormalizedRequest, options: &RenderOptions) -> String {
    let short = options.is_short();
    let flag = |long: &'static str, short_flag: &'static str| if short { short_flag } else { long };

    let mut code = command_builder(options);
    code.push(format!(
        "curl {} {}",
        flag("--request", "-X"),
        request.parsed_method()
    ));
    code.push(format!("--url {}", shell_quote(request.full_url())));
    if request.http_version() == "HTTP/1.0" {
        code.push(flag("--http1.0", "-0"));
    }

    let post_data = request.post_data();
    let multipart = post_data.boundary().is_some();
    let cookie = request.all_headers().get(COOKIE);
    for (name, value) in request.headers_obj() {
        // curl writes its own boundary for --form bodies.
        if multipart && name.eq_ignore_ascii_case("content-type") {
            continue;
        }
        // Sent once, through --cookie.
        if cookie.is_some() && name.eq_ignore_ascii_case(COOKIE) {
            continue;
        }
        code.push(format!(
            "{} {}",
            flag("--header", "-H"),
            shell_quote(&format!("{name}: {value}"))
        ));
    }
    if let Some(cookie) = cookie {
        code.push(format!("{} {}", flag("--cookie", "-b"), shell_quote(cookie)));
    }

    match MimeKind::of(post_data.mime_type()) {
        MimeKind::Multipart if multipart => {
            for param in post_data.params() {
                let value = match &param.file_name {
                    Some(file_name) => format!("{}=@{file_name}", param.name),
                    None => format!(
                        "{}={}",
                        param.name,
                        param.value.as_deref().unwrap_or_default()
                    ),
                };
                code.push(format!("{} {}", flag("--form", "-F"), shell_quote(&value)));
            }
        }
        MimeKind::FormUrlEncoded if post_data.params_obj().is_some() => {
            for (name, value) in post_data.params_obj().into_iter().flatten() {
                code.push(format!(
                    "--data-urlencode {}",
                    shell_quote(&format!("{name}={value}"))
                ));
            }
        }
        _ if !post_data.is_empty() => {
            let data_flag = if options.is_binary() {
                "--data-binary"
            } else {
                flag("--data", "-d")
            };
            code.push(format!("{data_flag} {}", shell_quote(post_data.text())));
        }
        _ => {}
    }

    code.join()
}

/// Render a `wget` command.
///
/// Options: `indent`, `short` (`-q`, `-O`), `verbose`.
pub(crate) fn wget(request: &NormalizedRequest, options: &RenderOptions) -> String {
    let short = options.is_short();

    let mut code = command_builder(options);
    code.push(match (options.is_verbose(), short) {
        (true, true) => "wget -v",
        (true, false) => "wget --verbose",
        (false, true) => "wget -q",
        (false, false) => "wget --quiet",
    });
    code.push(format!(
        "--method {}",
        shell_quote(request.parsed_method().as_str())
    ));
    for (name, value) in request.all_headers() {
        code.push(format!(
            "--header {}",
            shell_quote(&format!("{name}: {value}"))
        ));
    }
    let post_data = request.post_data();
    if !post_data.is_empty() {
        code.push(format!("--body-data {}", shell_quote(post_data.text())));
    }
    code.push(if short { "-O" } else { "--output-document" });
    code.push(format!("- {}", shell_quote(request.full_url())));

    code.join()
}

#[cfg(test)]
mod tests {
    use assert2::let_assert;
    use harsnip_core::{Param, RawRequest};

    use super::*;

    fn normalize(request: RawRequest) -> NormalizedRequest {
        let_assert!(Ok(request) = NormalizedRequest::try_from(request));
        request
    }

    #[test]
    fn curl_get_with_cookie() {
        let request = normalize(
            RawRequest::new("get", "http://x.test/p?x=1")
                .query("y", "2")
                .header("accept", "application/json")
                .cookie("foo", "bar"),
        );

        assert_eq!(
            curl(&request, &RenderOptions::default()),
            "curl --request GET \\\n  \
             --url 'http://x.test/p?y=2&x=1' \\\n  \
             --header 'accept: application/json' \\\n  \
             --cookie foo=bar"
        );
    }

    #[test]
    fn curl_sends_cookies_once() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test/")
                .header("Cookie", "manual=1")
                .header("accept", "*/*")
                .cookie("foo", "bar"),
        );

        assert_eq!(
            curl(&request, &RenderOptions::default()),
            "curl --request GET \\\n  \
             --url https://x.test/ \\\n  \
             --header 'accept: */*' \\\n  \
             --cookie foo=bar"
        );

        let header_only = normalize(
            RawRequest::new("GET", "https://x.test/").header("cookie", "manual=1"),
        );
        assert_eq!(
            curl(&header_only, &RenderOptions::default()),
            "curl --request GET \\\n  \
             --url https://x.test/ \\\n  \
             --cookie manual=1"
        );
    }

    #[test]
    fn curl_short_single_line() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test/")
                .http_version("HTTP/1.0")
                .text_body("text/plain", "hello world"),
        );
        let options = RenderOptions::builder().short(true).no_indent().build();

        assert_eq!(
            curl(&request, &options),
            "curl -X POST --url https://x.test/ -0 -d 'hello world'"
        );
    }

    #[test]
    fn curl_multipart_drops_content_type() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test/upload")
                .header("Content-Type", "multipart/form-data")
                .params_body(
                    "multipart/form-data",
                    [Param::value("foo", "bar"), Param::file("doc", "hello.txt")],
                ),
        );

        assert_eq!(
            curl(&request, &RenderOptions::default()),
            "curl --request POST \\\n  \
             --url https://x.test/upload \\\n  \
             --form foo=bar \\\n  \
             --form doc=@hello.txt"
        );
    }

    #[test]
    fn curl_form_urlencoded() {
        let request = normalize(RawRequest::new("POST", "https://x.test/").params_body(
            "application/x-www-form-urlencoded",
            [Param::value("a", "1"), Param::value("b", "x y")],
        ));

        assert_eq!(
            curl(&request, &RenderOptions::builder().binary(true).build()),
            "curl --request POST \\\n  \
             --url https://x.test/ \\\n  \
             --data-urlencode a=1 \\\n  \
             --data-urlencode 'b=x y'"
        );
    }

    #[test]
    fn wget_verbose_short() {
        let request = normalize(
            RawRequest::new("PUT", "https://x.test/items/1")
                .header("content-type", "application/json")
                .text_body("application/json", r#"{"a":1}"#),
        );
        let options = RenderOptions::builder().short(true).verbose(true).build();

        assert_eq!(
            wget(&request, &options),
            "wget -v \\\n  \
             --method PUT \\\n  \
             --header 'content-type: application/json' \\\n  \
             --body-data '{\"a\":1}' \\\n  \
             -O \\\n  \
             - https://x.test/items/1"
        );
    }

    #[test]
    fn wget_custom_indent() {
        let request = normalize(RawRequest::new("GET", "https://x.test/").cookie("a", "b"));
        let options = RenderOptions::builder().indent("@").build();

        assert_eq!(
            wget(&request, &options),
            "wget --quiet \\\n@--method GET \\\n@--header 'cookie: a=b' \\\n@--output-document \\\n@- https://x.test/"
        );
    }
}
