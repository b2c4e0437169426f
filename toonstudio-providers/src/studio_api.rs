use crate::request::{Body, HttpRequest, Method};
use anyhow::Context;
use serde::Serialize;
use toonstudio_core::api::{
    CountRequest, JsonToToonRequest, PATH_COUNT, PATH_HEALTH, PATH_JSON_TO_TOON, PATH_QUERY,
    PATH_STATUS, PATH_TOON_TO_JSON, QueryRequest, ToonToJsonRequest,
};

pub fn build_status_request(base_url: &str) -> HttpRequest {
    build_get(base_url, PATH_STATUS)
}

pub fn build_health_request(base_url: &str) -> HttpRequest {
    build_get(base_url, PATH_HEALTH)
}

pub fn build_json_to_toon_request(
    base_url: &str,
    req: &JsonToToonRequest,
) -> anyhow::Result<HttpRequest> {
    build_post_json(base_url, PATH_JSON_TO_TOON, req)
}

pub fn build_toon_to_json_request(
    base_url: &str,
    req: &ToonToJsonRequest,
) -> anyhow::Result<HttpRequest> {
    build_post_json(base_url, PATH_TOON_TO_JSON, req)
}

pub fn build_query_request(base_url: &str, req: &QueryRequest) -> anyhow::Result<HttpRequest> {
    build_post_json(base_url, PATH_QUERY, req)
}

pub fn build_count_request(base_url: &str, req: &CountRequest) -> anyhow::Result<HttpRequest> {
    build_post_json(base_url, PATH_COUNT, req)
}

fn build_get(base_url: &str, path: &str) -> HttpRequest {
    HttpRequest {
        method: Method::Get,
        url: join_url(base_url, path),
        headers: vec![("Accept".into(), "application/json".into())],
        body: Body::Empty,
    }
}

fn build_post_json<T: Serialize>(
    base_url: &str,
    path: &str,
    payload: &T,
) -> anyhow::Result<HttpRequest> {
    let body = serde_json::to_string(payload)
        .with_context(|| format!("encode request body for {path}"))?;

    Ok(HttpRequest {
        method: Method::Post,
        url: join_url(base_url, path),
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Accept".into(), "application/json".into()),
        ],
        body: Body::Json(body),
    })
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toonstudio_core::types::{DataFormat, Delimiter, IndentSize};

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("http://localhost:8000/", "/api/status"),
            "http://localhost:8000/api/status"
        );
        assert_eq!(
            join_url("http://localhost:8000", "api/status"),
            "http://localhost:8000/api/status"
        );
    }

    #[test]
    fn status_request_is_bodyless_get() {
        let req = build_status_request("http://localhost:8000");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url, "http://localhost:8000/api/status");
        assert_eq!(req.body, Body::Empty);
    }

    #[test]
    fn forward_conversion_carries_options() {
        let req = build_json_to_toon_request(
            "http://localhost:8000",
            &JsonToToonRequest {
                json_input: r#"{"id":1}"#.into(),
                indent: IndentSize::new(4).unwrap(),
                delimiter: Delimiter::Tab,
            },
        )
        .unwrap();

        assert_eq!(req.method, Method::Post);
        assert!(req.url.ends_with("/api/convert/json-to-toon"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        match req.body {
            Body::Json(s) => {
                let v: serde_json::Value = serde_json::from_str(&s).unwrap();
                assert_eq!(v["indent"], 4);
                assert_eq!(v["delimiter"], "\t");
            }
            _ => panic!("expected json"),
        }
    }

    #[test]
    fn query_request_sends_format_label() {
        let req = build_query_request(
            "http://localhost:8000",
            &QueryRequest {
                data_text: "[]".into(),
                question: "How many items?".into(),
                data_format: DataFormat::Toon,
            },
        )
        .unwrap();
        match req.body {
            Body::Json(s) => assert!(s.contains(r#""data_format":"TOON""#)),
            _ => panic!("expected json"),
        }
    }
}
