use soroban_sdk::{Env, String};

/// Longest string the byte-level helpers will inspect.
pub const MAX_TEXT_BYTES: usize = 1024;

/// Longest identifier or composed label `format_numbered` will produce.
const MAX_COMPOSED_BYTES: usize = 96;

/// Copies `value` into `buf` and returns the used prefix, or `None` when the
/// string does not fit.
pub fn read_bytes<'a>(value: &String, buf: &'a mut [u8; MAX_TEXT_BYTES]) -> Option<&'a [u8]> {
    let len = value.len() as usize;
    if len > MAX_TEXT_BYTES {
        return None;
    }
    value.copy_into_slice(&mut buf[..len]);
    Some(&buf[..len])
}

/// ASCII case-insensitive substring test on raw bytes. An empty needle
/// matches everything.
pub fn bytes_contain_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// Substring test with full Unicode lowercase folding. An empty needle
/// matches everything.
pub fn str_contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .char_indices()
        .any(|(start, _)| starts_with_folded(&haystack[start..], needle))
}

fn starts_with_folded(haystack: &str, needle: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    needle
        .chars()
        .flat_map(char::to_lowercase)
        .all(|c| hay.next() == Some(c))
}

/// Case-insensitive substring test on host strings, folding Unicode case
/// when both sides are valid UTF-8 and ASCII case otherwise. Strings longer
/// than `MAX_TEXT_BYTES` never match a non-empty needle.
pub fn contains_ignore_case(haystack: &String, needle: &String) -> bool {
    if needle.is_empty() {
        return true;
    }

    let mut hay_buf = [0u8; MAX_TEXT_BYTES];
    let mut needle_buf = [0u8; MAX_TEXT_BYTES];
    let (Some(hay), Some(pat)) = (
        read_bytes(haystack, &mut hay_buf),
        read_bytes(needle, &mut needle_buf),
    ) else {
        return false;
    };

    match (core::str::from_utf8(hay), core::str::from_utf8(pat)) {
        (Ok(hay), Ok(pat)) => str_contains_ignore_case(hay, pat),
        _ => bytes_contain_ignore_case(hay, pat),
    }
}

/// True for the empty string and for strings made only of ASCII whitespace.
pub fn is_blank(value: &String) -> bool {
    if value.is_empty() {
        return true;
    }
    let mut buf = [0u8; MAX_TEXT_BYTES];
    match read_bytes(value, &mut buf) {
        Some(bytes) => bytes.iter().all(|b| b.is_ascii_whitespace()),
        None => false,
    }
}

/// Builds `prefix` + zero-padded decimal `n` + `suffix`, e.g.
/// `format_numbered(env, "p", 7, 2, "@x")` is `"p07@x"`.
///
/// Prefix and suffix are truncated if the result would not fit.
#[allow(clippy::arithmetic_side_effects)]
pub fn format_numbered(env: &Env, prefix: &str, n: u64, min_width: usize, suffix: &str) -> String {
    let mut digits = [0u8; 20];
    let mut start = digits.len();
    let mut rest = n;
    loop {
        start -= 1;
        digits[start] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    while digits.len() - start < min_width && start > 0 {
        start -= 1;
        digits[start] = b'0';
    }
    let digits = &digits[start..];

    let mut out = [0u8; MAX_COMPOSED_BYTES];
    let room = MAX_COMPOSED_BYTES - digits.len();
    let prefix = &prefix.as_bytes()[..prefix.len().min(room)];
    let suffix = &suffix.as_bytes()[..suffix.len().min(room - prefix.len())];

    let mut len = 0;
    for part in [prefix, digits, suffix] {
        out[len..len + part.len()].copy_from_slice(part);
        len += part.len();
    }

    String::from_bytes(env, &out[..len])
}

/// `prefix` followed by `n`, the identifier shape used for stored records.
pub fn format_id(env: &Env, prefix: &str, n: u64) -> String {
    format_numbered(env, prefix, n, 0, "")
}
