/// Removes `//` and `/* */` comments, keeping every newline in place.
///
/// Quoted strings and template literals are copied through untouched so that
/// `'https://example.com'` survives. Regex literals are not recognized.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                // Line comment runs up to, not including, the newline
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            '\'' | '"' | '`' => {
                out.push(c);
                let mut escaped = false;
                while let Some(&next) = chars.peek() {
                    // Plain quotes never span lines; bail out on stray apostrophes
                    if next == '\n' && c != '`' {
                        break;
                    }
                    chars.next();
                    out.push(next);
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == c {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}
