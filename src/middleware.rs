//! Front-of-pipeline concerns: request logging and the `_method` override.
//!
//! Both run once per request, before route matching. Handlers only ever
//! see the effective verb.

use tracing::info;

use crate::method::Method;

const OVERRIDE_PARAM: &str = "_method";

/// Rewrites a POST carrying `_method=PUT|DELETE` into that verb.
///
/// HTML forms can only submit GET and POST, so edit and delete forms
/// tunnel the real verb through the reserved parameter — checked in the
/// query string first, then in the form body. Non-POST requests and
/// unrecognized values pass through unchanged.
pub(crate) fn override_method(method: Method, query: Option<&str>, body: &[u8]) -> Method {
    if method != Method::Post {
        return method;
    }
    let from_query = query.and_then(find_override);
    let from_body = || std::str::from_utf8(body).ok().and_then(find_override);
    from_query.or_else(from_body).unwrap_or(method)
}

fn find_override(pairs: &str) -> Option<Method> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(pairs).ok()?;
    let value = pairs
        .iter()
        .find(|(key, _)| key == OVERRIDE_PARAM)
        .map(|(_, value)| value.as_str())?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::Put),
        "DELETE" => Some(Method::Delete),
        _ => None,
    }
}

/// One log line per inbound request, after the override has been applied.
pub(crate) fn log_request(method: Method, path: &str) {
    info!(%method, path, "request");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_with_query_override_becomes_delete() {
        let method = override_method(Method::Post, Some("_method=DELETE"), b"");
        assert_eq!(method, Method::Delete);
    }

    #[test]
    fn post_with_body_override_becomes_put() {
        let method = override_method(
            Method::Post,
            None,
            b"name=grape&color=purple&_method=PUT",
        );
        assert_eq!(method, Method::Put);
    }

    #[test]
    fn query_wins_over_body() {
        let method = override_method(
            Method::Post,
            Some("_method=PUT"),
            b"_method=DELETE",
        );
        assert_eq!(method, Method::Put);
    }

    #[test]
    fn plain_posts_and_other_verbs_pass_through() {
        assert_eq!(
            override_method(Method::Post, None, b"name=kiwi&color=brown"),
            Method::Post
        );
        assert_eq!(
            override_method(Method::Get, Some("_method=DELETE"), b""),
            Method::Get
        );
    }

    #[test]
    fn unrecognized_override_values_are_ignored() {
        let method = override_method(Method::Post, Some("_method=PATCH"), b"");
        assert_eq!(method, Method::Post);
    }
}
