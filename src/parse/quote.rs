//! Rendering resolved arguments back into a single line for display.

/// Whether an argument must be quoted to read back as one word.
fn needs_quote(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| matches!(c, '\'' | '"' | ' ' | '\t' | '\r' | '\n'))
}

/// Quote one resolved argument for a command log.
///
/// Arguments containing whitespace or quote characters are wrapped in
/// double quotes with `\`, CR, LF, tab and `"` escaped. An empty argument
/// renders as `""`. Anything else is returned unchanged.
pub fn quote_arg(arg: &str) -> String {
    if !needs_quote(arg) {
        return arg.to_string();
    }
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for c in arg.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '\r' => out.push_str(r"\r"),
            '\n' => out.push_str(r"\n"),
            '\t' => out.push_str(r"\t"),
            '"' => out.push_str(r#"\""#),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render resolved arguments as one space-separated display line.
pub fn quote_line<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote_arg(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render resolved arguments as POSIX shell words, suitable for pasting
/// into a terminal. Returns `None` if an argument contains a NUL byte.
pub fn shell_join<S: AsRef<str>>(args: &[S]) -> Option<String> {
    shlex::try_join(args.iter().map(|a| a.as_ref())).ok()
}
