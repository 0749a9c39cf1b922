//! Request normalization.
//!
//! [`NormalizedRequest::new`] resolves a validated [`HarRequest`] into the
//! shape every renderer consumes: merged query string, header/cookie maps,
//! the synthesized `cookie` header, and a canonical body.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::body::{self, MimeKind};
use crate::har::{NameValue, Param, RawRequest};
use crate::multipart::{Form, Part};
use crate::validate::{HarPostData, HarRequest, validate};
use crate::{Error, Method, PairMap};

/// Characters left as-is in cookie pairs and in the query of `fullUrl`: the
/// unreserved set `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const COOKIE_HEADER: &str = "cookie";
const CONTENT_TYPE_HEADER: &str = "content-type";

/// Canonical request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    mime_type: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    boundary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    json_obj: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params_obj: Option<PairMap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    params: Vec<Param>,
}

impl PostData {
    /// Canonical MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Body text, always present (possibly empty).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Multipart boundary, only set for generated multipart bodies.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }

    /// Parsed JSON body, only set for JSON bodies that parsed.
    #[must_use]
    pub const fn json_obj(&self) -> Option<&Value> {
        self.json_obj.as_ref()
    }

    /// Form fields, only set for url-encoded bodies with params.
    #[must_use]
    pub const fn params_obj(&self) -> Option<&PairMap> {
        self.params_obj.as_ref()
    }

    /// Original params, in input order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns `true` if the body text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A fully resolved request, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRequest {
    method: String,
    url: String,
    full_url: String,
    http_version: String,
    #[serde(skip)]
    uri: Url,
    query_string: Vec<NameValue>,
    headers: Vec<NameValue>,
    cookies: Vec<NameValue>,
    query_obj: PairMap,
    headers_obj: PairMap,
    cookies_obj: PairMap,
    all_headers: PairMap,
    post_data: PostData,
}

impl NormalizedRequest {
    /// Normalize a validated request.
    #[must_use]
    pub fn new(request: HarRequest) -> Self {
        let HarRequest {
            method,
            url,
            http_version,
            query_string,
            headers,
            cookies,
            post_data,
        } = request;

        let mut headers_obj = merge_headers(&http_version, &headers);
        let cookies_obj = merge_cookies(&cookies);
        let post_data = canonical_body(post_data, &mut headers_obj);

        let mut all_headers = PairMap::new();
        if let Some(cookie) = cookie_header(&cookies) {
            all_headers.insert(COOKIE_HEADER, cookie.clone());
            all_headers.extend_from(&headers_obj);
            all_headers.insert(COOKIE_HEADER, cookie);
        } else {
            all_headers.extend_from(&headers_obj);
        }

        let (base, full_url, uri, query_obj) = merge_query(url, &query_string);

        Self {
            method,
            url: base.into(),
            full_url,
            http_version,
            uri,
            query_string,
            headers,
            cookies,
            query_obj,
            headers_obj,
            cookies_obj,
            all_headers,
            post_data,
        }
    }

    /// HTTP method, as written in the input.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parsed HTTP method, for case-insensitive dispatch.
    #[must_use]
    pub fn parsed_method(&self) -> Method {
        Method::parse(&self.method)
    }

    /// URL without its query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL with the merged query string.
    #[must_use]
    pub fn full_url(&self) -> &str {
        &self.full_url
    }

    /// Parsed form of [`Self::full_url`].
    ///
    /// Its serialization may escape more characters than `full_url` does
    /// (`'` in the query of an `http` URL), the decoded pairs are the same.
    #[must_use]
    pub const fn uri(&self) -> &Url {
        &self.uri
    }

    /// HTTP version.
    #[must_use]
    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    /// Explicit query string entries, as provided.
    #[must_use]
    pub fn query_string(&self) -> &[NameValue] {
        &self.query_string
    }

    /// Headers, as provided.
    #[must_use]
    pub fn headers(&self) -> &[NameValue] {
        &self.headers
    }

    /// Cookies, as provided.
    #[must_use]
    pub fn cookies(&self) -> &[NameValue] {
        &self.cookies
    }

    /// Merged query parameters.
    #[must_use]
    pub const fn query_obj(&self) -> &PairMap {
        &self.query_obj
    }

    /// Header map, lower-cased for HTTP/2.
    #[must_use]
    pub const fn headers_obj(&self) -> &PairMap {
        &self.headers_obj
    }

    /// Cookie map; the first occurrence of a name wins.
    #[must_use]
    pub const fn cookies_obj(&self) -> &PairMap {
        &self.cookies_obj
    }

    /// Header map plus the synthesized `cookie` header.
    #[must_use]
    pub const fn all_headers(&self) -> &PairMap {
        &self.all_headers
    }

    /// Canonical body.
    #[must_use]
    pub const fn post_data(&self) -> &PostData {
        &self.post_data
    }
}

impl From<HarRequest> for NormalizedRequest {
    fn from(request: HarRequest) -> Self {
        Self::new(request)
    }
}

impl TryFrom<RawRequest> for NormalizedRequest {
    type Error = Error;

    /// Default, validate and normalize a raw request.
    ///
    /// A rejected request is reported as [`Error::Validation`].
    fn try_from(request: RawRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(validate(request)?))
    }
}

/// Split `url` into its query-less base, the full URL, its parsed form and
/// the merged query.
///
/// Explicit entries are folded first, then the URL's own query is applied on
/// top: on a name collision the URL value wins and the name keeps the
/// position of its first insertion. The query of the full URL encodes a
/// space as `%20`, never `+`.
fn merge_query(mut url: Url, query_string: &[NameValue]) -> (Url, String, Url, PairMap) {
    let mut query_obj = PairMap::new();
    if !query_string.is_empty() {
        debug!(count = query_string.len(), "queryString found, constructing query map");
    }
    for NameValue { name, value } in query_string {
        query_obj.insert(name.as_str(), value.as_str());
    }
    for (name, value) in url.query_pairs() {
        query_obj.insert(name, value);
    }

    url.set_query(None);
    let mut uri = url.clone();
    if query_obj.is_empty() {
        return (url, uri.to_string(), uri, query_obj);
    }

    let query = query_obj
        .iter()
        .map(|(name, value)| encode_pair(name, value))
        .collect::<Vec<_>>()
        .join("&");
    uri.set_query(Some(&query));

    let mut without_fragment = url.clone();
    without_fragment.set_fragment(None);
    let mut full_url = format!("{without_fragment}?{query}");
    if let Some(fragment) = url.fragment() {
        full_url.push('#');
        full_url.push_str(fragment);
    }
    (url, full_url, uri, query_obj)
}

fn encode_pair(name: &str, value: &str) -> String {
    format!(
        "{}={}",
        utf8_percent_encode(name, URI_COMPONENT),
        utf8_percent_encode(value, URI_COMPONENT)
    )
}

fn merge_headers(http_version: &str, headers: &[NameValue]) -> PairMap {
    let lower_case = http_version.starts_with("HTTP/2");
    headers
        .iter()
        .map(|NameValue { name, value }| {
            let name = if lower_case {
                name.to_lowercase()
            } else {
                name.clone()
            };
            (name, value.as_str())
        })
        .collect()
}

/// Applied from last to first so that the earliest occurrence of a name is
/// the one left standing.
fn merge_cookies(cookies: &[NameValue]) -> PairMap {
    cookies
        .iter()
        .rev()
        .map(|NameValue { name, value }| (name.as_str(), value.as_str()))
        .collect()
}

fn cookie_header(cookies: &[NameValue]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    let pairs: Vec<String> = cookies
        .iter()
        .map(|NameValue { name, value }| encode_pair(name, value))
        .collect();
    Some(pairs.join("; "))
}

fn canonical_body(post_data: HarPostData, headers_obj: &mut PairMap) -> PostData {
    let HarPostData {
        mime_type,
        text,
        params,
    } = post_data;
    let kind = MimeKind::of(&mime_type);
    let mut data = PostData {
        mime_type,
        text: text.unwrap_or_default(),
        boundary: None,
        json_obj: None,
        params_obj: None,
        params: params.clone().unwrap_or_default(),
    };

    if let Some(canonical) = kind.canonical() {
        data.mime_type = canonical.to_string();
    }

    match kind {
        MimeKind::Multipart => {
            data.text = String::new();
            if let Some(params) = params {
                let form: Form = params.iter().map(Part::from).collect();
                data.text = form.encode();
                data.boundary = Some(form.boundary().to_string());

                let header = headers_obj
                    .find_key_ignore_case(CONTENT_TYPE_HEADER)
                    .unwrap_or(CONTENT_TYPE_HEADER)
                    .to_string();
                headers_obj.insert(header, form.content_type());
            }
        }
        MimeKind::FormUrlEncoded => match params {
            Some(params) => {
                let params_obj: PairMap = params
                    .iter()
                    .map(|param| (param.name.as_str(), param.value.as_deref().unwrap_or_default()))
                    .collect();
                data.text = body::to_form(&params_obj).unwrap_or_else(|err| {
                    debug!(error = %err, "could not encode form params");
                    String::new()
                });
                data.params_obj = Some(params_obj);
            }
            None => data.text = String::new(),
        },
        MimeKind::Json => {
            if !data.text.is_empty() {
                match body::from_json::<Value>(&data.text) {
                    Ok(value) => data.json_obj = Some(value),
                    Err(err) => {
                        debug!(error = %err, "JSON body does not parse, falling back to text/plain");
                        data.mime_type = body::TEXT_PLAIN.to_string();
                    }
                }
            }
        }
        MimeKind::Other => {}
    }

    data
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn normalize(request: RawRequest) -> NormalizedRequest {
        let_assert!(Ok(request) = NormalizedRequest::try_from(request));
        request
    }

    #[test]
    fn query_merge_orders_explicit_entries_first() {
        let request = normalize(RawRequest::new("GET", "http://x.test/p?x=1").query("y", "2"));

        check!(request.url() == "http://x.test/p");
        check!(request.full_url() == "http://x.test/p?y=2&x=1");
        check!(request.query_obj().iter().collect::<Vec<_>>() == vec![("y", "2"), ("x", "1")]);
    }

    #[test]
    fn query_merge_url_wins_on_collision() {
        let request = normalize(
            RawRequest::new("GET", "http://x.test/p?a=url&b=2")
                .query("a", "explicit")
                .query("c", "3"),
        );

        check!(request.full_url() == "http://x.test/p?a=url&c=3&b=2");
        check!(request.query_obj().get("a") == Some("url"));
    }

    #[test]
    fn query_merge_later_explicit_entry_wins() {
        let request = normalize(
            RawRequest::new("GET", "http://x.test/")
                .query("a", "1")
                .query("a", "2"),
        );
        check!(request.full_url() == "http://x.test/?a=2");
    }

    #[test]
    fn full_url_round_trips_query_obj() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test/search?q=hello%20world&lang=en")
                .query("page", "a&b=c"),
        );

        let reparsed: PairMap = request.uri().query_pairs().collect();
        check!(&reparsed == request.query_obj());
        check!(request.query_obj().get("page") == Some("a&b=c"));
    }

    #[test]
    fn full_url_query_uses_uri_component_encoding() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test/s#top")
                .query("q", "it's (x)!")
                .query("tag", "a+b c"),
        );

        check!(request.full_url() == "https://x.test/s?q=it's%20(x)!&tag=a%2Bb%20c#top");
        check!(request.url() == "https://x.test/s#top");
        let reparsed: PairMap = request.uri().query_pairs().collect();
        check!(&reparsed == request.query_obj());
    }

    #[test]
    fn rejected_request_is_a_validation_error() {
        let_assert!(
            Err(Error::Validation(reason)) =
                NormalizedRequest::try_from(RawRequest::new("GET", "/relative"))
        );
        check!(matches!(reason, crate::Invalid::BadUrl { .. }));
        check!(!Error::Validation(reason).is_input());
    }

    #[test]
    fn url_without_query() {
        let request = normalize(RawRequest::new("GET", "https://x.test/a#frag"));
        check!(request.url() == "https://x.test/a#frag");
        check!(request.full_url() == "https://x.test/a#frag");
        check!(request.query_obj().is_empty());
    }

    #[test]
    fn headers_keep_case_for_http1() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test")
                .header("Accept", "text/html")
                .header("accept", "application/json"),
        );
        check!(request.headers_obj().len() == 2);
        check!(request.headers_obj().get("Accept") == Some("text/html"));
    }

    #[test]
    fn headers_lower_cased_for_http2() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test")
                .http_version("HTTP/2.0")
                .header("Accept", "text/html")
                .header("X-Custom", "1")
                .header("accept", "application/json"),
        );

        check!(request.headers_obj().keys().all(|key| key == key.to_lowercase()));
        check!(
            request.headers_obj().iter().collect::<Vec<_>>()
                == vec![("accept", "application/json"), ("x-custom", "1")]
        );
    }

    #[test]
    fn cookies_first_occurrence_wins() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test")
                .cookie("foo", "first")
                .cookie("bar", "baz")
                .cookie("foo", "second"),
        );

        check!(request.cookies_obj().get("foo") == Some("first"));
        check!(request.cookies_obj().len() == 2);
        check!(request.all_headers().get("cookie") == Some("foo=first; bar=baz; foo=second"));
    }

    #[test]
    fn cookie_header_is_percent_encoded() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test").cookie("se ssion", "a;b=c(d)"),
        );
        check!(request.all_headers().get("cookie") == Some("se%20ssion=a%3Bb%3Dc(d)"));
    }

    #[test]
    fn all_headers_without_cookies() {
        let request = normalize(RawRequest::new("GET", "https://x.test").header("accept", "*/*"));
        check!(request.all_headers() == request.headers_obj());
        check!(!request.all_headers().contains_key("cookie"));
    }

    #[test]
    fn synthesized_cookie_header_is_kept() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test")
                .header("cookie", "manual=1")
                .header("accept", "*/*")
                .cookie("foo", "bar"),
        );

        check!(
            request.all_headers().iter().collect::<Vec<_>>()
                == vec![("cookie", "foo=bar"), ("accept", "*/*")]
        );
    }

    #[test]
    fn multipart_body_is_generated() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test")
                .header("Content-Type", "multipart/mixed")
                .params_body("multipart/mixed", [Param::value("foo", "bar")]),
        );

        let post_data = request.post_data();
        check!(post_data.mime_type() == "multipart/form-data");
        let_assert!(Some(boundary) = post_data.boundary());
        check!(!boundary.is_empty());
        check!(
            post_data.text()
                == "-----011000010111000001101001\r\n\
                    Content-Disposition: form-data; name=\"foo\"\r\n\
                    \r\n\
                    bar\r\n\
                    -----011000010111000001101001--\r\n"
        );
        let_assert!(Some(content_type) = request.all_headers().get("Content-Type"));
        check!(content_type.contains(boundary));
        check!(!request.all_headers().contains_key("content-type"));
    }

    #[test]
    fn multipart_inserts_content_type_header() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test")
                .params_body("multipart/form-data", [Param::file("foo", "hello.txt")]),
        );

        check!(
            request.headers_obj().get("content-type")
                == Some("multipart/form-data; boundary=---011000010111000001101001")
        );
        check!(request.post_data().text().contains("filename=\"hello.txt\""));
        check!(request.post_data().text().contains("Content-Type: text/plain\r\n"));
    }

    #[test]
    fn multipart_without_params() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test")
                .text_body("multipart/related", "ignored"),
        );

        check!(request.post_data().mime_type() == "multipart/form-data");
        check!(request.post_data().text() == "");
        check!(request.post_data().boundary().is_none());
        check!(request.headers_obj().is_empty());
    }

    #[test]
    fn form_body_is_recomputed() {
        let mut raw = RawRequest::new("POST", "https://x.test").params_body(
            "application/x-www-form-urlencoded",
            [Param::value("a", "1"), Param::value("b", "2")],
        );
        if let Some(post_data) = raw.post_data.as_mut() {
            post_data.text = Some("stale=1".to_string());
        }
        let request = normalize(raw);

        check!(request.post_data().text() == "a=1&b=2");
        let_assert!(Some(params_obj) = request.post_data().params_obj());
        check!(params_obj.get("b") == Some("2"));
    }

    #[test]
    fn form_body_without_params() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test")
                .text_body("application/x-www-form-urlencoded", "a=1"),
        );
        check!(request.post_data().text() == "");
        check!(request.post_data().params_obj().is_none());
    }

    #[test]
    fn json_body_is_parsed() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test").text_body("text/x-json", r#"{"n":[1,2]}"#),
        );

        check!(request.post_data().mime_type() == "application/json");
        check!(request.post_data().json_obj() == Some(&json!({"n": [1, 2]})));
        check!(request.post_data().text() == r#"{"n":[1,2]}"#);
    }

    #[test]
    fn json_body_falls_back_to_text() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test").text_body("application/json", "{not json"),
        );

        check!(request.post_data().mime_type() == "text/plain");
        check!(request.post_data().json_obj().is_none());
        check!(request.post_data().text() == "{not json");
    }

    #[test]
    fn json_without_text() {
        let request = normalize(RawRequest::new("POST", "https://x.test").params_body(
            "application/json",
            [],
        ));
        check!(request.post_data().mime_type() == "application/json");
        check!(request.post_data().text() == "");
        check!(request.post_data().json_obj().is_none());
    }

    #[test]
    fn other_body_passes_through() {
        let request = normalize(
            RawRequest::new("POST", "https://x.test").text_body("text/plain; charset=utf-8", "hi"),
        );
        check!(request.post_data().mime_type() == "text/plain; charset=utf-8");
        check!(request.post_data().text() == "hi");
    }

    #[test]
    fn missing_body_defaults() {
        let request = normalize(RawRequest::new("GET", "https://x.test"));
        check!(request.post_data().mime_type() == "application/octet-stream");
        check!(request.post_data().is_empty());
    }

    #[test]
    fn method_is_kept_verbatim() {
        let request = normalize(RawRequest::new("post", "https://x.test"));
        check!(request.method() == "post");
        check!(request.parsed_method() == Method::Post);
    }

    #[test]
    fn serializes_with_har_field_names() {
        let request = normalize(
            RawRequest::new("GET", "https://x.test/?a=1").cookie("c", "d"),
        );
        let value = serde_json::to_value(&request).expect("serialize");

        check!(value["fullUrl"] == json!("https://x.test/?a=1"));
        check!(value["queryObj"] == json!({"a": "1"}));
        check!(value["allHeaders"] == json!({"cookie": "c=d"}));
        check!(value["postData"]["mimeType"] == json!("application/octet-stream"));
    }
}
