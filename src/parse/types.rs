//! Types produced by the tokenizer and consumed by the expansion engine.

use serde::Serialize;

/// A run of text within one argument, either literal or subject to expansion.
///
/// Single-quoted text is literal. Unquoted and double-quoted text is
/// expandable: `$name` / `${name}` references inside it are resolved when
/// the line is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    text: String,
    expandable: bool,
}

impl Segment {
    pub fn new(text: impl Into<String>, expandable: bool) -> Self {
        Self {
            text: text.into(),
            expandable,
        }
    }

    /// A segment whose text is emitted verbatim.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// A segment whose variable references are resolved at expansion time.
    pub fn expandable(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_expandable(&self) -> bool {
        self.expandable
    }
}

/// One final command-line argument, assembled from one or more segments.
///
/// The argument's value is the concatenation of its segments' (possibly
/// expanded) text, with no separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Argument {
    segments: Vec<Segment>,
}

impl Argument {
    /// Build an argument from its segments.
    ///
    /// An empty segment list yields an argument holding one empty literal
    /// segment, so every argument has at least one segment.
    pub fn new(segments: Vec<Segment>) -> Self {
        if segments.is_empty() {
            return Self {
                segments: vec![Segment::literal("")],
            };
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The argument's raw text: every segment concatenated, nothing expanded.
    pub fn literal(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }
}

impl From<Segment> for Argument {
    fn from(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}

/// The tokenized form of one command line: one [`Argument`] per word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Line {
    args: Vec<Argument>,
}

impl Line {
    pub fn new(args: Vec<Argument>) -> Self {
        Self { args }
    }

    /// Build a line from pre-split arguments, skipping the tokenizer.
    ///
    /// Every argument becomes a single expandable segment spanning the whole
    /// string: no quote processing happens, but `$name` references are
    /// still resolved.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args
                .into_iter()
                .map(|a| Argument::from(Segment::expandable(a)))
                .collect(),
        }
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Every argument's raw text, with quotes stripped and nothing expanded.
    pub fn literal(&self) -> Vec<String> {
        self.args.iter().map(Argument::literal).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_never_empty() {
        let arg = Argument::new(Vec::new());
        assert_eq!(arg.segments(), &[Segment::literal("")]);
        assert_eq!(arg.literal(), "");
    }

    #[test]
    fn argument_literal_concatenates() {
        let arg = Argument::new(vec![
            Segment::expandable("ab"),
            Segment::literal("c def "),
            Segment::expandable("${x}"),
        ]);
        assert_eq!(arg.literal(), "abc def ${x}");
    }

    #[test]
    fn from_args_marks_everything_expandable() {
        let line = Line::from_args(["go", "'\"${hello}\"'"]);
        assert_eq!(line.len(), 2);
        assert!(line.args().iter().all(|a| a.segments().len() == 1));
        assert!(line.args()[1].segments()[0].is_expandable());
        assert_eq!(line.literal(), vec!["go", "'\"${hello}\"'"]);
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let line = Line::new(vec![Argument::from(Segment::literal("${x}"))]);
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"[[{"text":"${x}","expandable":false}]]"#);
    }
}
