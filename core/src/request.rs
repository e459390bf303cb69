//! Wire-format request builders.
//!
//! # Design
//! Requests are rendered straight to a `String`. The builders never touch the
//! network and never encode form data implicitly: `FormArgs` are written as
//! given, and callers that need escaping go through `FormArgs::encoded`.

use url::form_urlencoded;

/// Ordered `key=value` pairs for a form body. Insertion order is kept and
/// duplicate keys are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormArgs {
    pairs: Vec<(String, String)>,
}

impl FormArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse `key=value` arguments. An argument without `=` becomes a key
    /// with an empty value.
    pub fn from_assignments<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .map(|item| {
                let item = item.as_ref();
                match item.split_once('=') {
                    Some((k, v)) => (k.to_string(), v.to_string()),
                    None => (item.to_string(), String::new()),
                }
            })
            .collect()
    }

    /// Copy with every key and value `application/x-www-form-urlencoded`
    /// escaped.
    pub fn encoded(&self) -> Self {
        self.pairs
            .iter()
            .map(|(k, v)| (encode_component(k), encode_component(v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn encode_component(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Join the pairs as `k=v&k=v`, without a trailing `&`.
pub fn form_body(args: Option<&FormArgs>) -> String {
    let Some(args) = args else {
        return String::new();
    };
    let mut body = String::new();
    for (key, value) in args.iter() {
        body.push_str(key);
        body.push('=');
        body.push_str(value);
        body.push('&');
    }
    body.trim_end_matches('&').to_string()
}

pub fn build_get(path: &str, host: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n")
}

/// `Content-Length` is the UTF-8 byte length of the body, not its character
/// count. No `Connection` header is sent; the server is expected to close
/// the connection after replying.
pub fn build_post(path: &str, host: &str, args: Option<&FormArgs>) -> String {
    let body = form_body(args);
    format!(
        "POST {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: {}\r\n\
         \r\n\
         {body}\r\n",
        body.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_length(request: &str) -> usize {
        request
            .lines()
            .find_map(|l| l.strip_prefix("Content-Length: "))
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn get_has_one_host_header_and_blank_line() {
        let req = build_get("/x", "h");
        assert_eq!(req, "GET /x HTTP/1.1\r\nHost: h\r\nConnection: close\r\n\r\n");
        assert_eq!(req.matches("Host: h").count(), 1);
        assert!(req.ends_with("\r\n\r\n"));
    }

    #[test]
    fn post_joins_pairs_in_order() {
        let args: FormArgs = [("a", "1"), ("b", "2")].into_iter().collect();
        let req = build_post("/submit", "example.com", Some(&args));
        assert_eq!(
            req,
            "POST /submit HTTP/1.1\r\n\
             Host: example.com\r\n\
             Content-Type: application/x-www-form-urlencoded\r\n\
             Content-Length: 7\r\n\
             \r\n\
             a=1&b=2\r\n"
        );
    }

    #[test]
    fn post_carries_no_connection_header() {
        let args: FormArgs = [("a", "1"), ("b", "2")].into_iter().collect();
        let req = build_post("/p", "h", Some(&args));
        assert_eq!(
            req,
            "POST /p HTTP/1.1\r\nHost: h\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: 7\r\n\r\na=1&b=2\r\n"
        );
        assert!(!req.contains("Connection:"));
    }

    #[test]
    fn post_keeps_insertion_order_without_sorting() {
        let args: FormArgs = [("z", "1"), ("a", "2"), ("z", "3")].into_iter().collect();
        assert_eq!(form_body(Some(&args)), "z=1&a=2&z=3");
    }

    #[test]
    fn post_without_args_has_empty_body() {
        let req = build_post("/", "h", None);
        assert_eq!(content_length(&req), 0);
        assert!(req.ends_with("Content-Length: 0\r\n\r\n\r\n"));

        let req = build_post("/", "h", Some(&FormArgs::new()));
        assert_eq!(content_length(&req), 0);
    }

    #[test]
    fn content_length_counts_bytes_not_chars() {
        let args: FormArgs = [("name", "Łódź"), ("emoji", "🦀")].into_iter().collect();
        let body = form_body(Some(&args));
        assert_eq!(body.chars().count(), 17);
        assert_eq!(body.len(), 23);
        assert_eq!(content_length(&build_post("/", "h", Some(&args))), 23);
    }

    #[test]
    fn values_are_not_encoded_implicitly() {
        let args: FormArgs = [("q", "a b&c")].into_iter().collect();
        assert_eq!(form_body(Some(&args)), "q=a b&c");
    }

    #[test]
    fn encoded_escapes_keys_and_values() {
        let args: FormArgs = [("q y", "a b&c=d"), ("ü", "✓")].into_iter().collect();
        assert_eq!(
            form_body(Some(&args.encoded())),
            "q+y=a+b%26c%3Dd&%C3%BC=%E2%9C%93"
        );
    }

    #[test]
    fn trailing_ampersands_from_values_are_trimmed() {
        let args: FormArgs = [("a", "1&&")].into_iter().collect();
        assert_eq!(form_body(Some(&args)), "a=1");
    }

    #[test]
    fn assignments_split_on_first_equals() {
        let args = FormArgs::from_assignments(["a=1", "b=x=y", "flag"]);
        let pairs: Vec<_> = args.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "x=y"), ("flag", "")]);
        assert_eq!(args.len(), 3);
    }
}
