// File: marker_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::marker::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn body_of(text: &str) -> &str {
        text.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default()
    }

    fn start_line(text: &str) -> &str {
        text.lines().next().unwrap_or_default()
    }

    #[test]
    fn test_query_pairs_are_marked() {
        let result =
            mark_all_injection_points("GET /x?a=1&b=2 HTTP/1.1\r\nHost: h\r\n\r\n").unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(start_line(&result.text), "GET /x?a=1*&b=2* HTTP/1.1");
        assert!(result.has_injection_points());
    }

    #[test]
    fn test_multi_valued_query_key_marks_every_value() {
        let result =
            mark_all_injection_points("DELETE /x?id=1&id=2 HTTP/1.1\r\nHost: h\r\n\r\n").unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(start_line(&result.text), "DELETE /x?id=1*&id=2* HTTP/1.1");
    }

    #[test]
    fn test_query_values_are_emitted_decoded() {
        let result =
            mark_all_injection_points("GET /x?q=a%20b&r=c+d HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(start_line(&result.text), "GET /x?q=a b*&r=c d* HTTP/1.1");
    }

    #[test]
    fn test_no_parameters_means_zero() {
        let raw = "GET /static/app HTTP/1.1\r\nHost: h\r\n\r\n";
        let result = mark_all_injection_points(raw).unwrap();
        assert_eq!(result.count, 0);
        assert_eq!(result.text, raw);
    }

    #[test]
    fn test_get_body_is_not_marked() {
        let raw = "GET /x HTTP/1.1\r\nHost: h\r\n\r\na=1";
        let result = mark_all_injection_points(raw).unwrap();
        assert_eq!(result.count, 0);
        assert_eq!(body_of(&result.text), "a=1");
    }

    #[test]
    fn test_other_methods_mark_query_only() {
        let raw = "OPTIONS /x?a=1 HTTP/1.1\r\nHost: h\r\n\r\nb=2";
        let result = mark_all_injection_points(raw).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(body_of(&result.text), "b=2");
    }

    #[test]
    fn test_json_strings_only() {
        let raw = "POST /api HTTP/1.1\r\nHost: h\r\nContent-Length: 15\r\n\r\n{\"a\":1,\"b\":\"x\"}";
        let result = mark_all_injection_points(raw).unwrap();

        assert_eq!(result.count, 1);
        assert_eq!(body_of(&result.text), r#"{"a":1,"b":"x*"}"#);
        assert!(result.text.contains("Content-Length: 16\r\n"));
    }

    #[test]
    fn test_json_nested_values_untouched() {
        let raw = "PUT /api HTTP/1.1\r\n\r\n{\"obj\":{\"s\":\"v\"},\"list\":[\"x\"],\"n\":null,\"ok\":true,\"name\":\"z\"}";
        let result = mark_all_injection_points(raw).unwrap();

        assert_eq!(result.count, 1);
        assert_eq!(
            body_of(&result.text),
            r#"{"obj":{"s":"v"},"list":["x"],"n":null,"ok":true,"name":"z*"}"#
        );
    }

    #[test]
    fn test_form_first_value_per_key() {
        let raw = "POST /f?t=9 HTTP/1.1\r\nContent-Length: 18\r\n\r\nuser=a&pw=b&user=c";
        let result = mark_all_injection_points(raw).unwrap();

        // one query pair plus two distinct form keys
        assert_eq!(result.count, 3);
        assert_eq!(start_line(&result.text), "POST /f?t=9* HTTP/1.1");
        assert_eq!(body_of(&result.text), "user=a*&pw=b*");
        assert!(result.text.contains("Content-Length: 13\r\n"));
    }

    #[test]
    fn test_form_repeated_key_drops_later_values() {
        let raw = "PATCH /f HTTP/1.1\r\n\r\nuser=a&user=c";
        let result = mark_all_injection_points(raw).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(body_of(&result.text), "user=a*");
    }

    #[test]
    fn test_empty_post_body_is_left_alone() {
        let raw = "POST /f?a=1 HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
        let result = mark_all_injection_points(raw).unwrap();
        assert_eq!(result.count, 1);
        assert!(result.text.ends_with("Content-Length: 0\r\n\r\n"));
    }

    #[test]
    fn test_unsupported_body_counts_query_only() {
        let raw = "POST /u?x=1 HTTP/1.1\r\n\r\nk=v;w=z";
        let result = mark_all_injection_points(raw).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(body_of(&result.text), "k=v;w=z");
    }

    #[test]
    fn test_http2_survives_marking() {
        let raw = "GET /x?a=1 HTTP/2\r\nHost: h\r\n\r\n";
        let result = mark_all_injection_points(raw).unwrap();
        assert_eq!(start_line(&result.text), "GET /x?a=1* HTTP/2");
    }

    #[test]
    fn test_unparsable_text_is_surfaced() {
        let err = mark_all_injection_points("this is not http").unwrap_err();
        assert!(err.is_parse());
    }

    #[rstest]
    #[case('*')]
    #[case('§')]
    fn test_custom_marker(#[case] marker: char) {
        let marker_impl = InjectionMarker::new(marker);
        let result = marker_impl
            .mark_all("POST /x HTTP/1.1\r\n\r\n{\"k\":\"v\"}")
            .unwrap();
        assert_eq!(body_of(&result.text), format!("{{\"k\":\"v{}\"}}", marker));
        assert_eq!(marker_impl.marker(), marker);
    }
}
