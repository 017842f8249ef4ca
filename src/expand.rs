//! Expansion engine: resolve a tokenized [`Line`] into final argument strings.
//!
//! Reference grammar inside expandable segments:
//!
//! - `${name}`: braced reference; the name runs to the next `}`.
//! - `$name`: bare reference; the name is the longest run of ASCII
//!   letters, digits and `_`.
//! - A `$` followed by anything else is literal, as is a `${` with no
//!   closing brace and the empty reference `${}`.
//!
//! A reference the resolver does not find expands to the empty string.

use crate::parse::{Argument, Line, Segment};
use crate::resolve::Resolver;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Resolve one reference and append its value to `out`.
fn push_lookup(out: &mut String, name: &str, resolver: &dyn Resolver) {
    match resolver.lookup(name) {
        Some(value) => {
            log::trace!("expanded ${{{name}}}");
            out.push_str(&value);
        }
        None => log::trace!("${{{name}}} not found, expanding to empty"),
    }
}

/// Replace `${name}` and `$name` references in `text` using `resolver`.
pub fn expand(text: &str, resolver: &dyn Resolver) -> String {
    let Some(first) = text.find('$') else {
        return text.to_string();
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut rest = &text[first..];

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        rest = &rest[dollar..];
        let after = &rest[1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(0) | None => {
                    // `${}` or an unclosed `${`: keep the prefix, scan on.
                    out.push_str("${");
                    rest = braced;
                }
                Some(close) => {
                    push_lookup(&mut out, &braced[..close], resolver);
                    rest = &braced[close + 1..];
                }
            }
            continue;
        }

        let end = after
            .char_indices()
            .find(|&(_, c)| !is_name_char(c))
            .map_or(after.len(), |(i, _)| i);
        if end == 0 {
            out.push('$');
        } else {
            push_lookup(&mut out, &after[..end], resolver);
        }
        rest = &after[end..];
    }

    out.push_str(rest);
    out
}

fn expand_segment(segment: &Segment, resolver: &dyn Resolver) -> String {
    if segment.is_expandable() {
        expand(segment.text(), resolver)
    } else {
        segment.text().to_string()
    }
}

/// Resolve one argument: expand its expandable segments and concatenate.
pub fn resolve_argument(arg: &Argument, resolver: &dyn Resolver) -> String {
    arg.segments()
        .iter()
        .map(|s| expand_segment(s, resolver))
        .collect()
}

/// Resolve every argument of `line`, one output string per argument.
///
/// When the resolver reports itself disabled, no reference scanning happens
/// at all and each argument is its segments' original text.
pub fn resolve(line: &Line, resolver: &dyn Resolver) -> Vec<String> {
    if resolver.is_disabled() {
        return line.literal();
    }
    line.args()
        .iter()
        .map(|a| resolve_argument(a, resolver))
        .collect()
}
