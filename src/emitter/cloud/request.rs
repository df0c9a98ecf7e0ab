// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `httpRequest`, `httpHeaders` and `httpQuery` fields.

use super::trace::TRACE_CONTEXT_HEADER;
use crate::context::{Context, HttpRequest};
use crate::emitter::encode::ObjectWriter;
use crate::sys::Duration;
use std::collections::BTreeMap;

/// Headers that are reported elsewhere (or are noise) and so never appear in `httpHeaders`.
const DENIED_HEADERS: [&str; 4] = ["Referer", "Referrer", "User-Agent", TRACE_CONTEXT_HEADER];

/// `1549284472ns` is `"1.549284472s"`.
pub(crate) fn format_latency(latency: Duration) -> String {
    format!("{}s", latency.as_secs_f64())
}

/// `content-type` is `Content-Type`.
pub(crate) fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}

/// The request URL without its fragment.
fn request_url(request: &HttpRequest) -> String {
    let mut url = request.uri().to_string();
    if let Some(idx) = url.find('#') {
        url.truncate(idx);
    }
    url
}

/// Reportable headers, canonical name to values, sorted by name.
fn reported_headers(request: &HttpRequest) -> BTreeMap<String, Vec<String>> {
    let headers = request.headers();
    let mut out = BTreeMap::new();
    for name in headers.keys() {
        let canonical = canonical_header_name(name.as_str());
        if DENIED_HEADERS.contains(&canonical.as_str()) {
            continue;
        }
        let values = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        out.insert(canonical, values);
    }
    out
}

/// Query parameters, name to values in order of appearance, sorted by name.
fn query_params(request: &HttpRequest) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(query) = request.uri().query() {
        for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
            out.entry(k.into_owned()).or_default().push(v.into_owned());
        }
    }
    out
}

fn write_multimap(obj: &mut ObjectWriter<'_>, key: &str, map: &BTreeMap<String, Vec<String>>) {
    if map.is_empty() {
        return;
    }
    let mut inner = obj.object(key);
    for (name, values) in map {
        inner.string_list(name, values.iter().map(String::as_str));
    }
    inner.close();
}

/// Writes the request fields bound on `ctx`, if any.
///
/// `httpRequest` appears when a request, a positive status or a non-zero
/// latency is bound.  `httpHeaders` and `httpQuery` need a request and are
/// omitted when empty.
pub(crate) fn write_http_request(ctx: &Context, obj: &mut ObjectWriter<'_>) {
    let request = ctx.request();
    let status = ctx.request_status().filter(|s| *s > 0);
    let latency = ctx.request_latency().filter(|l| !l.is_zero());
    if request.is_none() && status.is_none() && latency.is_none() {
        return;
    }

    let mut fields = obj.object("httpRequest");
    if let Some(status) = status {
        fields.display("status", status);
    }
    if let Some(latency) = latency {
        fields.string("latency", &format_latency(latency));
    }
    if let Some(request) = &request {
        fields.string("requestMethod", request.method().as_str());
        fields.string("requestUrl", &request_url(request));
        if let Some(agent) = request.user_agent() {
            fields.string("userAgent", agent);
        }
        if let Some(referer) = request.referer() {
            fields.string("referer", referer);
        }
    }
    fields.close();

    if let Some(request) = &request {
        write_multimap(obj, "httpHeaders", &reported_headers(request));
        write_multimap(obj, "httpQuery", &query_params(request));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_has_no_padding() {
        assert_eq!(format_latency(Duration::from_nanos(1_549_284_472)), "1.549284472s");
        assert_eq!(format_latency(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_latency(Duration::from_secs(2)), "2s");
    }

    #[test]
    fn header_names() {
        assert_eq!(canonical_header_name("user-agent"), "User-Agent");
        assert_eq!(canonical_header_name("x-cloud-trace-context"), "X-Cloud-Trace-Context");
        assert_eq!(canonical_header_name("accept"), "Accept");
    }

    #[test]
    fn headers_and_query() {
        let request = http::Request::get("https://example.com/p?b=2&a=1&b=3#frag")
            .header("accept", "text/html")
            .header("x-multi", "one")
            .header("x-multi", "two")
            .header("user-agent", "curl")
            .header("referer", "https://example.com")
            .header(TRACE_CONTEXT_HEADER, "t/1")
            .body(())
            .unwrap();
        let request = HttpRequest::from(&request);

        let headers = reported_headers(&request);
        assert_eq!(
            headers.keys().map(String::as_str).collect::<Vec<_>>(),
            ["Accept", "X-Multi"]
        );
        assert_eq!(headers["X-Multi"], ["one", "two"]);

        let query = query_params(&request);
        assert_eq!(query["a"], ["1"]);
        assert_eq!(query["b"], ["2", "3"]);

        assert!(!request_url(&request).contains('#'));
    }
}
