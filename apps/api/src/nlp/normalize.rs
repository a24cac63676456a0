use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,!?;:()]").expect("valid disallowed-chars regex"));

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalizes extracted document text.
///
/// Line endings are unified to `\n`, characters outside word characters,
/// whitespace and `. , ! ? ; : ( )` are dropped, every whitespace run
/// (newlines included) collapses to one space, and the ends are trimmed.
///
/// Stripping runs before collapsing so that removed characters cannot leave
/// double spaces behind; this keeps `clean(clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = DISALLOWED_CHARS_RE.replace_all(&unified, "");
    let collapsed = WHITESPACE_RUN_RE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
