use crate::syntax::{Span, SyntaxKind, SyntaxTrivia};

/// Splits the text between two tokens into trivia pieces. `offset` is the
/// position of `text` in the source.
///
/// The grammar has already accepted this text as whitespace and comments,
/// so anything unrecognised ends up as `SkippedTokensTrivia` instead of an
/// error.
pub fn scan_trivia(text: &str, offset: usize) -> Vec<SyntaxTrivia> {
    let bytes = text.as_bytes();
    let mut trivia = vec![];
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let kind = match bytes[pos] {
            b'\r' => {
                pos += if bytes.get(pos + 1) == Some(&b'\n') { 2 } else { 1 };
                SyntaxKind::EndOfLineTrivia
            }
            b'\n' => {
                pos += 1;
                SyntaxKind::EndOfLineTrivia
            }
            b' ' | b'\t' | 0x0B | 0x0C => {
                while matches!(bytes.get(pos), Some(b' ' | b'\t' | 0x0B | 0x0C)) {
                    pos += 1;
                }
                SyntaxKind::WhitespaceTrivia
            }
            b'#' if offset + pos == 0 => {
                pos = line_end(bytes, pos);
                SyntaxKind::ShebangTrivia
            }
            b'-' if bytes.get(pos + 1) == Some(&b'-') => {
                match long_bracket_end(bytes, pos + 2) {
                    Some(end) => {
                        pos = end;
                        SyntaxKind::MultiLineCommentTrivia
                    }
                    None => {
                        pos = line_end(bytes, pos);
                        SyntaxKind::SingleLineCommentTrivia
                    }
                }
            }
            _ => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                SyntaxKind::SkippedTokensTrivia
            }
        };
        trivia.push(SyntaxTrivia::new(
            kind,
            text[start..pos].to_string(),
            Span::new(offset + start, offset + pos),
        ));
    }

    trivia
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| matches!(b, b'\r' | b'\n'))
        .map_or(bytes.len(), |len| from + len)
}

/// End of a `[==[ ... ]==]` bracket starting at `from`, if there is one
/// and it is closed.
pub(crate) fn long_bracket_end(bytes: &[u8], from: usize) -> Option<usize> {
    let level = long_bracket_level(&bytes[from..])?;
    let open_len = level + 2;
    let body = from + open_len;
    let mut close = Vec::with_capacity(open_len);
    close.push(b']');
    close.extend(std::iter::repeat(b'=').take(level));
    close.push(b']');
    bytes[body..]
        .windows(close.len())
        .position(|window| window == close.as_slice())
        .map(|at| body + at + close.len())
}

/// Number of `=` in an opening long bracket at the start of `bytes`.
pub(crate) fn long_bracket_level(bytes: &[u8]) -> Option<usize> {
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let level = bytes[1..].iter().take_while(|&&b| b == b'=').count();
    (bytes.get(level + 1) == Some(&b'[')).then_some(level)
}
