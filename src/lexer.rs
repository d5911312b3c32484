//! Splitting a raw command line into argument tokens.

/// Characters that separate tokens. Besides the usual whitespace this
/// includes the bell character, which some terminals leave embedded in
/// pasted input.
const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\u{7}'];

/// Split a line into whitespace-delimited tokens.
///
/// Any maximal run of delimiter characters separates two tokens; leading
/// and trailing delimiters produce no empty tokens, and a line consisting
/// only of delimiters (or nothing at all) yields an empty vector.
///
/// There is no quoting, escaping or expansion of any kind: every byte of a
/// token is taken literally.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
