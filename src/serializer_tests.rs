// File: serializer_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::parser::RequestParser;
    use crate::request::{Headers, ParsedRequest, Protocol};
    use crate::serializer::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("GET /search?q=1 HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n")]
    #[case("POST /login HTTP/1.1\r\nHost: example.com\r\nContent-Length: 13\r\n\r\nuser=a&pass=b")]
    #[case("PUT /item HTTP/1.0\r\nhost: example.com\r\n\r\n{\"id\":1}")]
    fn test_round_trip_is_exact(#[case] raw: &str) {
        let req = RequestParser::parse(raw).unwrap();
        assert_eq!(RequestSerializer::serialize(&req).unwrap(), raw);
    }

    #[test]
    fn test_round_trip_normalises_line_endings() {
        let req = RequestParser::parse("GET /x HTTP/1.1\nHost: h\n\n").unwrap();
        assert_eq!(
            RequestSerializer::serialize(&req).unwrap(),
            "GET /x HTTP/1.1\r\nHost: h\r\n\r\n"
        );
    }

    #[test]
    fn test_http2_is_restored() {
        let raw = "GET /x HTTP/2\r\nHost: h\r\n\r\n";
        let req = RequestParser::parse(raw).unwrap();
        let out = RequestSerializer::serialize(&req).unwrap();

        assert!(out.starts_with("GET /x HTTP/2\r\n"));
        assert_eq!(out, raw);
    }

    #[test]
    fn test_restore_only_touches_start_line() {
        let raw = "POST /x HTTP/2\r\nVia: HTTP/1.1 proxy\r\n\r\nproto=HTTP/1.1";
        let req = RequestParser::parse(raw).unwrap();
        let out = RequestSerializer::serialize(&req).unwrap();
        assert_eq!(out, raw);
    }

    #[test]
    fn test_restore_ignores_http11_inside_target() {
        let mut headers = Headers::new();
        headers.push("Host", "h");
        let req = ParsedRequest::new(
            "GET".to_string(),
            "/v?p=HTTP/1.1".to_string(),
            headers,
            Vec::new(),
            Protocol::DowngradedFromHttp2,
        );
        assert_eq!(
            RequestSerializer::serialize(&req).unwrap(),
            "GET /v?p=HTTP/1.1 HTTP/2\r\nHost: h\r\n\r\n"
        );
    }

    #[test]
    fn test_mutated_body_carries_new_length() {
        let raw = "POST /x HTTP/1.1\r\nContent-Length: 3\r\n\r\na=1";
        let mut req = RequestParser::parse(raw).unwrap();
        req.set_body(b"a=1*".to_vec());
        assert_eq!(
            RequestSerializer::serialize(&req).unwrap(),
            "POST /x HTTP/1.1\r\nContent-Length: 4\r\n\r\na=1*"
        );
    }

    #[test]
    fn test_invalid_utf8_body_is_serialization_error() {
        let req = ParsedRequest::new(
            "POST".to_string(),
            "/bin".to_string(),
            Headers::new(),
            vec![0xc3],
            Protocol::Http11,
        );
        assert!(!RequestSerializer::serialize_bytes(&req).is_empty());
        let err = RequestSerializer::serialize(&req).unwrap_err();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
