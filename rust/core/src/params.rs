// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter splitting and field decoding
//!
//! SFC quotes every parameter, so a record's argument text is split on
//! top-level commas with a single quote-state scan. Quote characters are
//! retained in the emitted tokens; field decoding strips them per-field.

use smallvec::SmallVec;

/// Token list for one record. Most records carry well under eight
/// parameters, so the common case stays on the stack.
pub type ParamTokens<'a> = SmallVec<[&'a str; 8]>;

/// Split a record's raw parameter text into ordered tokens.
///
/// Commas inside `'..'` quoted substrings do not split (polyline vertex
/// lists arrive as one quoted `'(0,1,2)'` token). The trailing token is
/// flushed at end of input; an empty parameter list yields an empty
/// sequence, not a single empty token.
pub fn split_params(params: &str) -> ParamTokens<'_> {
    let mut tokens = ParamTokens::new();
    if params.trim().is_empty() {
        return tokens;
    }

    let mut in_quotes = false;
    let mut start = 0;
    for (i, b) in params.bytes().enumerate() {
        match b {
            b'\'' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                tokens.push(params[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(params[start..].trim());
    tokens
}

/// Strip surrounding whitespace and quote characters from a token.
#[inline]
pub fn strip_quotes(token: &str) -> &str {
    token.trim().trim_matches('\'').trim()
}

/// Parse one numeric field.
///
/// Tolerates quoting and stray parentheses around the value. Returns `None`
/// for anything non-numeric or non-finite; callers reject the element or
/// declaration rather than carrying a partial value.
#[inline]
pub fn parse_f64_field(token: &str) -> Option<f64> {
    let cleaned = strip_quotes(token).trim_matches(|c| c == '(' || c == ')');
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    let value: f64 = fast_float::parse(cleaned).ok()?;
    value.is_finite().then_some(value)
}

/// Whether a token is a parenthesized list (after quote stripping).
#[inline]
pub fn is_list_token(token: &str) -> bool {
    strip_quotes(token).starts_with('(')
}

/// Split a parenthesized number-list token like `'(0,1.5,20)'`.
///
/// Each position parses independently; failures stay in place as `None` so
/// callers can pair X/Y lists element-wise and drop only the broken pairs.
pub fn split_number_list(token: &str) -> Vec<Option<f64>> {
    let inner = strip_quotes(token);
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|part| {
            let part = part.trim();
            let value: f64 = fast_float::parse(part).ok()?;
            value.is_finite().then_some(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let tokens = split_params("'1','2','3'");
        assert_eq!(tokens.as_slice(), &["'1'", "'2'", "'3'"]);
    }

    #[test]
    fn test_split_quoted_comma() {
        let tokens = split_params("'a,b','c'");
        assert_eq!(tokens.as_slice(), &["'a,b'", "'c'"]);
    }

    #[test]
    fn test_split_quoted_list() {
        let tokens = split_params("'4','(0,10,20)','(0,5,5)'");
        assert_eq!(tokens.as_slice(), &["'4'", "'(0,10,20)'", "'(0,5,5)'"]);
    }

    #[test]
    fn test_split_empty_is_empty() {
        assert!(split_params("").is_empty());
        assert!(split_params("   ").is_empty());
    }

    #[test]
    fn test_split_trailing_token() {
        let tokens = split_params("'a','b");
        assert_eq!(tokens.as_slice(), &["'a'", "'b"]);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes(" 'L1' "), "L1");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes("''"), "");
    }

    #[test]
    fn test_parse_f64_field() {
        assert_eq!(parse_f64_field("'10.5'"), Some(10.5));
        assert_eq!(parse_f64_field("-3"), Some(-3.0));
        assert_eq!(parse_f64_field("'(2.5'"), Some(2.5));
        assert_eq!(parse_f64_field("'abc'"), None);
        assert_eq!(parse_f64_field("''"), None);
        assert_eq!(parse_f64_field("'NaN'"), None);
        assert_eq!(parse_f64_field("'inf'"), None);
    }

    #[test]
    fn test_split_number_list() {
        assert_eq!(
            split_number_list("'(0,1.5,20)'"),
            vec![Some(0.0), Some(1.5), Some(20.0)]
        );
        assert_eq!(
            split_number_list("'(1,x,3)'"),
            vec![Some(1.0), None, Some(3.0)]
        );
        assert!(split_number_list("'()'").is_empty());
        assert!(split_number_list("''").is_empty());
    }
}
