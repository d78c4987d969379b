/// Removes one trailing line terminator (`\n` or `\r\n`).
pub fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Splits a line on ASCII spaces. Runs of spaces never yield empty tokens.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    strip_newline(line).split(' ').filter(|token| !token.is_empty())
}

/// Reads a non-negative decimal literal from the start of `token`.
///
/// Only the leading run of digits counts, so `12ab` reads as 12. Tokens that
/// don't start with a digit aren't literals. Values past `i32::MAX` wrap.
pub fn parse_literal(token: &str) -> Option<i32> {
    let digits = token.bytes().take_while(u8::is_ascii_digit);

    let mut value: Option<i32> = None;
    for digit in digits {
        let acc = value.unwrap_or(0);
        value = Some(acc.wrapping_mul(10).wrapping_add((digit - b'0') as i32));
    }

    value
}

#[test]
fn skips_empty_tokens() {
    let tokens = tokenize("  3   4 +\n").collect::<Vec<_>>();
    assert_eq!(tokens, vec!["3", "4", "+"]);
}

#[test]
fn only_spaces_delimit() {
    let tokens = tokenize("1\t2 .\r\n").collect::<Vec<_>>();
    assert_eq!(tokens, vec!["1\t2", "."]);
}

#[test]
fn blank_line_has_no_tokens() {
    assert_eq!(tokenize("   \n").count(), 0);
    assert_eq!(tokenize("").count(), 0);
}

#[test]
fn literals() {
    let cases = vec![
        ("0", Some(0)),
        ("42", Some(42)),
        ("007", Some(7)),
        ("12ab", Some(12)),
        ("3+", Some(3)),
        ("-3", None),
        ("x1", None),
        ("", None),
        ("2147483648", Some(i32::MIN)),
    ];

    for (token, expected) in cases {
        if parse_literal(token) != expected {
            panic!("{:?} parsed as {:?}", token, parse_literal(token));
        }
    }
}
