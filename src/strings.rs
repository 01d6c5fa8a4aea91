use crate::bytes;

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub fn starts_with(haystack: &str, needle: &str) -> bool {
    haystack.starts_with(needle)
}

pub fn ends_with(haystack: &str, needle: &str) -> bool {
    haystack.ends_with(needle)
}

pub fn duplicate(s: &str, times: usize) -> Vec<String> {
    vec![s.to_owned(); times]
}

/// A random string of `n` ASCII characters, see [`bytes::rand_bytes`].
pub fn rand_string(n: usize) -> String {
    bytes::rand_bytes(n).into_iter().map(char::from).collect()
}
