/// Wraps a label in TeX math mode, the way tick labels are typeset when a
/// chart renders all of its text with TeX.
///
/// Runs of ASCII letters are taken back out of math mode (so that words like
/// `days` aren't set in italics), `-` and `:` are braced so they get ordinary
/// spacing, spaces become thin spaces (`\;`) and any empty math groups left
/// behind are removed.
///
/// # Example
///
/// ```
/// use tdaxis::fmt::wrap_in_tex;
///
/// assert_eq!(wrap_in_tex("12:00"), r"$\mathdefault{12{:}00}$");
/// assert_eq!(wrap_in_tex("0 days"), r"$\mathdefault{0\;}$days");
/// assert_eq!(wrap_in_tex("-1 day"), r"$\mathdefault{{-}1\;}$day");
/// ```
pub fn wrap_in_tex(text: &str) -> String {
    const OPEN: &str = r"$\mathdefault{";
    const CLOSE: &str = "}$";

    let mut body = String::with_capacity(text.len() * 2);
    let mut chars = text.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch.is_ascii_alphabetic() {
            let mut end = start + ch.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if !next.is_ascii_alphabetic() {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
            body.push_str(CLOSE);
            body.push_str(&text[start..end]);
            body.push_str(OPEN);
            continue;
        }
        match ch {
            '-' => body.push_str("{-}"),
            ':' => body.push_str("{:}"),
            ' ' => body.push_str(r"\;"),
            _ => body.push(ch),
        }
    }
    let wrapped = format!("{OPEN}{body}{CLOSE}");
    wrapped.replace(r"$\mathdefault{}$", "")
}
