use regex::Regex;
use std::sync::OnceLock;

fn csi_pattern() -> Option<&'static Regex> {
    static CSI: OnceLock<Option<Regex>> = OnceLock::new();
    CSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").ok())
        .as_ref()
}

/// Make API-supplied text safe to print: strips ANSI CSI sequences and
/// control characters, folds whitespace runs to one space, and cuts the
/// result at `max_chars`.
pub fn sanitize_for_terminal(s: &str, max_chars: usize) -> String {
    let no_ansi = match csi_pattern() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    };

    let mut out = String::with_capacity(no_ansi.len());
    let mut pending_space = false;
    for ch in no_ansi.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_control() {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out.chars().take(max_chars).collect()
}
