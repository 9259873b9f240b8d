use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::options::SyntaxOptions;
use crate::syntax::Span;

use super::trivia::long_bracket_level;

/// Decodes a string literal token (quotes or long brackets included) into
/// its byte value. `offset` is the token's position in the source, used to
/// place diagnostics on the offending escape.
pub fn decode_string(
    text: &str,
    offset: usize,
    options: &SyntaxOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<u8> {
    match long_bracket_level(text.as_bytes()) {
        Some(level) => decode_long_string(text, level),
        None => {
            let body = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
            ShortStringDecoder {
                bytes: body.as_bytes(),
                pos: 0,
                offset: offset + 1,
                options,
                diagnostics,
                out: Vec::with_capacity(body.len()),
            }
            .decode()
        }
    }
}

fn decode_long_string(text: &str, level: usize) -> Vec<u8> {
    let delimiter = level + 2;
    let bytes = text.as_bytes();
    let body = bytes
        .get(delimiter..bytes.len().saturating_sub(delimiter))
        .unwrap_or_default();

    let mut out = Vec::with_capacity(body.len());
    let mut pos = skip_newline(body, 0);
    while pos < body.len() {
        if matches!(body[pos], b'\r' | b'\n') {
            out.push(b'\n');
            pos = skip_newline(body, pos);
        } else {
            out.push(body[pos]);
            pos += 1;
        }
    }
    out
}

/// Skips one newline sequence (`\n`, `\r`, `\r\n` or `\n\r`) at `pos`.
fn skip_newline(bytes: &[u8], pos: usize) -> usize {
    match (bytes.get(pos), bytes.get(pos + 1)) {
        (Some(b'\r'), Some(b'\n')) | (Some(b'\n'), Some(b'\r')) => pos + 2,
        (Some(b'\r' | b'\n'), _) => pos + 1,
        _ => pos,
    }
}

struct ShortStringDecoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    offset: usize,
    options: &'a SyntaxOptions,
    diagnostics: &'a mut Vec<Diagnostic>,
    out: Vec<u8>,
}

impl ShortStringDecoder<'_> {
    fn decode(mut self) -> Vec<u8> {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'\\' {
                self.escape();
            } else {
                self.out.push(b);
                self.pos += 1;
            }
        }
        self.out
    }

    fn escape(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let Some(&c) = self.bytes.get(self.pos) else {
            self.error(start, DiagnosticCode::InvalidEscapeSequence, "unfinished escape sequence");
            return;
        };
        self.pos += 1;

        let simple = match c {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0B),
            b'\\' | b'"' | b'\'' => Some(c),
            _ => None,
        };
        if let Some(byte) = simple {
            self.out.push(byte);
            return;
        }

        match c {
            b'\n' | b'\r' => {
                self.out.push(b'\n');
                self.pos = skip_newline(self.bytes, self.pos - 1);
            }
            b'x' => self.hex_escape(start),
            b'z' => {
                if !self.options.accept_whitespace_escape {
                    self.feature(start, "Whitespace escapes ('\\z')");
                }
                while matches!(
                    self.bytes.get(self.pos),
                    Some(b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
                ) {
                    self.pos += 1;
                }
            }
            b'u' => self.unicode_escape(start),
            b'0'..=b'9' => self.decimal_escape(start, c),
            _ => {
                if self.options.accept_invalid_escapes {
                    self.diagnostics.push(Diagnostic::warning(
                        DiagnosticCode::InvalidEscapeSequence,
                        self.span(start),
                        format!("unrecognized escape sequence '\\{}'", c as char),
                    ));
                    self.out.push(c);
                } else {
                    self.error(
                        start,
                        DiagnosticCode::InvalidEscapeSequence,
                        &format!("invalid escape sequence '\\{}'", c as char),
                    );
                    self.out.extend_from_slice(&[b'\\', c]);
                }
            }
        }
    }

    fn hex_escape(&mut self, start: usize) {
        if !self.options.accept_hex_escapes {
            self.feature(start, "Hexadecimal escapes ('\\xXX')");
        }
        let digits = self.bytes[self.pos..]
            .iter()
            .take(2)
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        if digits < 2 {
            self.pos += digits;
            self.error(
                start,
                DiagnosticCode::HexadecimalDigitExpected,
                "hexadecimal digit expected",
            );
            return;
        }
        let text = &self.bytes[self.pos..self.pos + 2];
        self.pos += 2;
        let value = text
            .iter()
            .fold(0u8, |acc, b| acc * 16 + hex_value(*b));
        self.out.push(value);
    }

    fn decimal_escape(&mut self, start: usize, first: u8) {
        let mut value = u32::from(first - b'0');
        for _ in 0..2 {
            match self.bytes.get(self.pos) {
                Some(b) if b.is_ascii_digit() => {
                    value = value * 10 + u32::from(b - b'0');
                    self.pos += 1;
                }
                _ => break,
            }
        }
        match u8::try_from(value) {
            Ok(byte) => self.out.push(byte),
            Err(_) => self.error(
                start,
                DiagnosticCode::DecimalEscapeTooLarge,
                "decimal escape too large",
            ),
        }
    }

    fn unicode_escape(&mut self, start: usize) {
        if !self.options.accept_unicode_escape {
            self.feature(start, "Unicode escapes ('\\u{XXX}')");
        }
        if self.bytes.get(self.pos) != Some(&b'{') {
            self.error(start, DiagnosticCode::InvalidUnicodeEscape, "missing '{' in \\u{xxxx}");
            return;
        }
        self.pos += 1;

        let mut value: u64 = 0;
        let mut digits = 0;
        let mut too_large = false;
        while let Some(&b) = self.bytes.get(self.pos) {
            if !b.is_ascii_hexdigit() {
                break;
            }
            value = (value << 4) | u64::from(hex_value(b));
            too_large |= value > 0x7FFF_FFFF;
            digits += 1;
            self.pos += 1;
        }

        if digits == 0 {
            self.error(start, DiagnosticCode::HexadecimalDigitExpected, "hexadecimal digit expected");
            return;
        }
        if self.bytes.get(self.pos) != Some(&b'}') {
            self.error(start, DiagnosticCode::InvalidUnicodeEscape, "missing '}' in \\u{xxxx}");
            return;
        }
        self.pos += 1;
        if too_large {
            self.error(start, DiagnosticCode::UnicodeEscapeTooLarge, "UTF-8 value too large");
            return;
        }
        push_utf8_escape(&mut self.out, value as u32);
    }

    fn span(&self, start: usize) -> Span {
        Span::new(self.offset + start, self.offset + self.pos)
    }

    fn error(&mut self, start: usize, code: DiagnosticCode, message: &str) {
        let span = self.span(start);
        self.diagnostics.push(Diagnostic::error(code, span, message));
    }

    fn feature(&mut self, start: usize, feature: &str) {
        let span = Span::new(self.offset + start, self.offset + self.pos);
        self.diagnostics
            .push(Diagnostic::feature_not_available(span, feature));
    }
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// UTF-8 encoding extended to 31-bit values (up to six bytes), as Lua
/// does for `\u{...}`.
fn push_utf8_escape(out: &mut Vec<u8>, mut x: u32) {
    if x < 0x80 {
        out.push(x as u8);
        return;
    }
    let mut buf = [0u8; 8];
    let mut n = 1;
    let mut max_first: u32 = 0x3f;
    loop {
        buf[8 - n] = (0x80 | (x & 0x3f)) as u8;
        n += 1;
        x >>= 6;
        max_first >>= 1;
        if x <= max_first {
            break;
        }
    }
    buf[8 - n] = ((!max_first << 1) | x) as u8;
    out.extend_from_slice(&buf[8 - n..]);
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options::LuaVersion;

    fn decode(text: &str) -> (Vec<u8>, Vec<Diagnostic>) {
        decode_with(text, &SyntaxOptions::default())
    }

    fn decode_with(text: &str, options: &SyntaxOptions) -> (Vec<u8>, Vec<Diagnostic>) {
        let mut diagnostics = vec![];
        let value = decode_string(text, 0, options, &mut diagnostics);
        (value, diagnostics)
    }

    #[test]
    fn test_simple_escapes() {
        let (value, diagnostics) = decode(r#""a\tb\n\\\"\'\a\b\f\v\r""#);
        assert_eq!(value, b"a\tb\n\\\"'\x07\x08\x0C\x0B\r".to_vec());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_decimal_and_hex_escapes() {
        assert_eq!(decode(r#""\1\0""#).0, vec![1, 0]);
        assert_eq!(decode(r#""\65\066\0671""#).0, b"ABC1".to_vec());
        assert_eq!(decode(r#"'\xff\xAA\x00'"#).0, vec![0xff, 0xaa, 0x00]);
    }

    #[test]
    fn test_escaped_newlines() {
        assert_eq!(decode("\"a\\\nb\"").0, b"a\nb".to_vec());
        assert_eq!(decode("\"a\\\r\nb\"").0, b"a\nb".to_vec());
        assert_eq!(decode("\"a\\\rb\"").0, b"a\nb".to_vec());
        assert_eq!(decode("\"a\\\n\rb\"").0, b"a\nb".to_vec());
        assert_eq!(decode("\"a\\\n\\\nb\"").0, b"a\n\nb".to_vec());
    }

    #[test]
    fn test_whitespace_escape() {
        let (value, diagnostics) = decode("\"a,\\n\\z\n   \\tb\"");
        assert_eq!(value, b"a,\n\tb".to_vec());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(decode(r#""\u{48}\u{E9}\u{20AC}""#).0, "Hé€".as_bytes().to_vec());
        assert_eq!(
            decode(r#""\u{7FFFFFFF}""#).0,
            vec![0xFD, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF]
        );
        let (_, diagnostics) = decode(r#""\u{80000000}""#);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnicodeEscapeTooLarge);

        let (_, diagnostics) = decode(r#""\u{}""#);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::HexadecimalDigitExpected);

        let (_, diagnostics) = decode(r#""\u{48""#);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidUnicodeEscape);

        let (_, diagnostics) = decode(r#""\u48""#);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidUnicodeEscape);
    }

    #[test]
    fn test_escape_errors() {
        let (_, diagnostics) = decode(r#""\256""#);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DecimalEscapeTooLarge);
        assert_eq!(diagnostics[0].span, Span::new(1, 5));

        let (_, diagnostics) = decode(r#""\xg""#);
        assert_eq!(diagnostics[0].code, DiagnosticCode::HexadecimalDigitExpected);

        let (value, diagnostics) = decode(r#""\q""#);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidEscapeSequence);
        assert!(diagnostics[0].is_error());
        assert_eq!(value, b"\\q".to_vec());
    }

    #[test]
    fn test_lua51_escapes() {
        let options = LuaVersion::Lua51.options();
        let (value, diagnostics) = decode_with(r#""\q""#, &options);
        assert_eq!(value, b"q".to_vec());
        assert!(!diagnostics[0].is_error());

        let (_, diagnostics) = decode_with(r#""\x41""#, &options);
        assert_eq!(diagnostics[0].code, DiagnosticCode::FeatureNotAvailable);

        let (value, diagnostics) = decode_with("\"a\\z  b\"", &options);
        assert_eq!(value, b"ab".to_vec());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::FeatureNotAvailable);
        assert_eq!(diagnostics[0].span, Span::new(2, 4));

        let (value, diagnostics) = decode_with(r#""\u{48}""#, &options);
        assert_eq!(value, b"H".to_vec());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::FeatureNotAvailable);
    }

    #[test]
    fn test_lua52_escapes() {
        let options = LuaVersion::Lua52.options();
        let (value, diagnostics) = decode_with("\"a\\z\n b\\x41\"", &options);
        assert_eq!(value, b"abA".to_vec());
        assert!(diagnostics.is_empty());

        let (value, diagnostics) = decode_with(r#""\u{E9}""#, &options);
        assert_eq!(value, "é".as_bytes().to_vec());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::FeatureNotAvailable);

        let (_, diagnostics) = decode_with(r#""\q""#, &options);
        assert!(diagnostics[0].is_error());
    }

    #[test]
    fn test_long_strings() {
        assert_eq!(decode("[[\nline]]").0, b"line".to_vec());
        assert_eq!(decode("[==[\r\na]]\r\nb]==]").0, b"a]]\nb".to_vec());
        assert_eq!(decode("[[\\n]]").0, b"\\n".to_vec());
        assert_eq!(decode("[[]]").0, Vec::<u8>::new());
    }
}
