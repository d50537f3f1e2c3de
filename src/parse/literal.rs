//! Decoding of Go string and rune literals.

/// Decode a quoted Go literal the way `strconv.Unquote` does.
///
/// Accepts interpreted strings (`"..."`), raw strings (`` `...` ``) and
/// single-character rune literals. Returns `None` for anything malformed,
/// including escapes that decode to invalid UTF-8.
pub fn unquote(raw: &str) -> Option<String> {
    let quote = raw.chars().next().filter(|c| matches!(c, '"' | '`' | '\''))?;
    if raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    let body = &raw[1..raw.len() - 1];
    match quote {
        '`' => {
            if body.contains('`') {
                return None;
            }
            Some(body.replace('\r', ""))
        }
        '"' => unescape(body, b'"'),
        '\'' => {
            let decoded = unescape(body, b'\'')?;
            let mut chars = decoded.chars();
            match (chars.next(), chars.next()) {
                (Some(_), None) => Some(decoded),
                _ => None,
            }
        }
        _ => None,
    }
}

fn unescape(body: &str, quote: u8) -> Option<String> {
    let bytes = body.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == quote || b == b'\n' {
            return None;
        }
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }
        let escape = *bytes.get(i + 1)?;
        i += 2;
        match escape {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0B),
            b'\\' => out.push(b'\\'),
            c if c == quote => out.push(c),
            b'0'..=b'7' => {
                let digits = bytes.get(i - 1..i + 2)?;
                let value = parse_radix(digits, 8)?;
                out.push(u8::try_from(value).ok()?);
                i += 2;
            }
            b'x' => {
                let value = parse_radix(bytes.get(i..i + 2)?, 16)?;
                out.push(u8::try_from(value).ok()?);
                i += 2;
            }
            b'u' => {
                let ch = char::from_u32(parse_radix(bytes.get(i..i + 4)?, 16)?)?;
                push_char(&mut out, ch);
                i += 4;
            }
            b'U' => {
                let ch = char::from_u32(parse_radix(bytes.get(i..i + 8)?, 16)?)?;
                push_char(&mut out, ch);
                i += 8;
            }
            _ => return None,
        }
    }
    String::from_utf8(out).ok()
}

fn parse_radix(digits: &[u8], radix: u32) -> Option<u32> {
    let text = std::str::from_utf8(digits).ok()?;
    if text.starts_with('+') || text.starts_with('-') {
        return None;
    }
    u32::from_str_radix(text, radix).ok()
}

fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}
