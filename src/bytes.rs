// Helpers over raw byte slices.
use rand::Rng;

use crate::error::{Result, SupportsError};

const LETTER_SEEDS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890-=_+';./?><`~!@#$%^&*()";

/// True when any of the needles occurs in the haystack. An empty needle always occurs.
pub fn contains_any(haystack: &[u8], needles: &[&[u8]]) -> bool {
    needles.iter().any(|needle| contains(haystack, needle))
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

pub fn starts_with(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.starts_with(needle)
}

pub fn ends_with(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.ends_with(needle)
}

pub fn duplicate(b: &[u8], times: usize) -> Vec<Vec<u8>> {
    vec![b.to_vec(); times]
}

/// `n` random bytes drawn from letters, digits and ASCII punctuation.
pub fn rand_bytes(n: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| LETTER_SEEDS[rng.gen_range(0..LETTER_SEEDS.len())])
        .collect()
}

pub fn to_string(b: &[u8]) -> String {
    String::from_utf8_lossy(b).into_owned()
}

pub fn to_u64(b: &[u8]) -> Result<u64> {
    Ok(to_string(b).parse::<u64>()?)
}

pub fn to_i64(b: &[u8]) -> Result<i64> {
    Ok(to_string(b).parse::<i64>()?)
}

pub fn to_f64(b: &[u8]) -> Result<f64> {
    Ok(to_string(b).parse::<f64>()?)
}

/// Accepts 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False.
pub fn to_bool(b: &[u8]) -> Result<bool> {
    match b {
        b"1" | b"t" | b"T" | b"TRUE" | b"true" | b"True" => Ok(true),
        b"0" | b"f" | b"F" | b"FALSE" | b"false" | b"False" => Ok(false),
        _ => Err(SupportsError::Number(format!(
            "invalid boolean {:?}",
            to_string(b)
        ))),
    }
}
