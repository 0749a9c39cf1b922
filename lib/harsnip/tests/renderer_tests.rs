//! Snapshot tests for the built-in renderers.

use harsnip::{RenderOptions, Snippet};
use insta::assert_snapshot;
use serde_json::json;

fn render(target: &str, client: &str, options: &RenderOptions) -> String {
    let input = json!({
        "method": "POST",
        "url": "https://api.test/v1/users?sort=asc",
        "httpVersion": "HTTP/1.1",
        "queryString": [{"name": "page", "value": "1"}],
        "headers": [
            {"name": "accept", "value": "application/json"},
            {"name": "content-type", "value": "application/json"}
        ],
        "cookies": [{"name": "session", "value": "a b"}],
        "postData": {"mimeType": "application/json", "text": "{\"name\":\"ada\"}"}
    });
    let snippet = Snippet::from_json(&input.to_string()).expect("input");
    let conversion = snippet
        .convert_with(target, Some(client), options)
        .expect("built-in target");
    conversion.as_single().expect("one request").to_string()
}

#[test]
fn shell_curl() {
    assert_snapshot!(render("shell", "curl", &RenderOptions::default()), @r#"
    curl --request POST \
      --url 'https://api.test/v1/users?page=1&sort=asc' \
      --header 'accept: application/json' \
      --header 'content-type: application/json' \
      --cookie session=a%20b \
      --data '{"name":"ada"}'
    "#);
}

#[test]
fn shell_curl_short_binary() {
    let options = RenderOptions::builder().short(true).binary(true).no_indent().build();
    assert_snapshot!(
        render("shell", "curl", &options),
        @r#"curl -X POST --url 'https://api.test/v1/users?page=1&sort=asc' -H 'accept: application/json' -H 'content-type: application/json' -b session=a%20b --data-binary '{"name":"ada"}'"#
    );
}

#[test]
fn shell_wget() {
    assert_snapshot!(render("shell", "wget", &RenderOptions::default()), @r#"
    wget --quiet \
      --method POST \
      --header 'cookie: session=a%20b' \
      --header 'accept: application/json' \
      --header 'content-type: application/json' \
      --body-data '{"name":"ada"}' \
      --output-document \
      - 'https://api.test/v1/users?page=1&sort=asc'
    "#);
}

#[test]
fn python_requests() {
    assert_snapshot!(render("python", "requests", &RenderOptions::default()), @r#"
    import requests

    url = "https://api.test/v1/users?page=1&sort=asc"

    payload = {
        "name": "ada"
    }
    headers = {
        "cookie": "session=a%20b",
        "accept": "application/json",
        "content-type": "application/json"
    }

    response = requests.request("POST", url, json=payload, headers=headers)

    print(response.text)
    "#);
}

#[test]
fn python_requests_compact() {
    let options = RenderOptions::builder().pretty(false).build();
    let code = render("python", "requests", &options);
    assert!(code.contains("payload = {\"name\": \"ada\"}\n"));
}

#[test]
fn java_okhttp() {
    assert_snapshot!(render("java", "okhttp", &RenderOptions::default()), @r#"
    OkHttpClient client = new OkHttpClient();

    MediaType mediaType = MediaType.parse("application/json");
    RequestBody body = RequestBody.create(mediaType, "{\"name\":\"ada\"}");
    Request request = new Request.Builder()
      .url("https://api.test/v1/users?page=1&sort=asc")
      .post(body)
      .addHeader("cookie", "session=a%20b")
      .addHeader("accept", "application/json")
      .addHeader("content-type", "application/json")
      .build();

    Response response = client.newCall(request).execute();
    "#);
}

#[test]
fn javascript_fetch() {
    assert_snapshot!(render("javascript", "fetch", &RenderOptions::default()), @r"
    const url = 'https://api.test/v1/users?page=1&sort=asc';
    const options = {
      method: 'POST',
      headers: {cookie: 'session=a%20b', accept: 'application/json', 'content-type': 'application/json'},
      body: JSON.stringify({name: 'ada'})
    };

    try {
      const response = await fetch(url, options);
      const data = await response.json();
      console.log(data);
    } catch (error) {
      console.error(error);
    }
    ");
}
