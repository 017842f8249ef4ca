use super::types::{Argument, Line, Segment};

/// Quoting state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

impl Quote {
    /// Whether text collected in this state is subject to variable expansion.
    fn expandable(self) -> bool {
        !matches!(self, Quote::Single)
    }
}

/// Accumulates segments and arguments while the scanner walks the input.
struct Tokenizer {
    args: Vec<Argument>,
    segments: Vec<Segment>,
    text: String,
    quote: Quote,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            segments: Vec::new(),
            text: String::new(),
            quote: Quote::None,
        }
    }

    /// Append a segment to the argument under construction.
    ///
    /// An empty segment only survives as a placeholder for `''` / `""` when
    /// it is the whole argument; real text replaces it.
    fn push_segment(&mut self, segment: Segment) {
        if segment.text().is_empty() {
            if self.segments.is_empty() {
                self.segments.push(segment);
            }
            return;
        }
        if let [only] = self.segments.as_slice()
            && only.text().is_empty()
        {
            self.segments.clear();
        }
        self.segments.push(segment);
    }

    /// Flush pending unquoted text as an expandable segment.
    fn flush_unquoted(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.push_segment(Segment::expandable(text));
        }
    }

    fn open_quote(&mut self, quote: Quote) {
        self.flush_unquoted();
        self.quote = quote;
    }

    /// Flush the quoted text with the open quote's expandability.
    fn close_quote(&mut self) {
        let text = std::mem::take(&mut self.text);
        let expandable = self.quote.expandable();
        self.quote = Quote::None;
        self.push_segment(Segment::new(text, expandable));
    }

    fn end_argument(&mut self) {
        self.flush_unquoted();
        if !self.segments.is_empty() {
            let segments = std::mem::take(&mut self.segments);
            self.args.push(Argument::new(segments));
        }
    }

    fn finish(mut self) -> Line {
        // Unterminated quote: the rest of the input belongs to it.
        if self.quote != Quote::None {
            self.close_quote();
        }
        self.end_argument();
        Line::new(self.args)
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Tokenize a shell-style command line into arguments.
///
/// Whitespace separates arguments outside of quotes. Single quotes keep
/// their content literal; double quotes group whitespace but still allow
/// variable expansion, and recognize `\"` as an escaped quote. Quoted and
/// unquoted runs concatenate into one argument until unquoted whitespace.
/// An unterminated quote extends to the end of the input.
///
/// Never fails: every input produces some [`Line`].
pub fn parse(raw: &str) -> Line {
    let mut tok = Tokenizer::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match tok.quote {
            Quote::None => match c {
                c if is_separator(c) => tok.end_argument(),
                '\'' => tok.open_quote(Quote::Single),
                '"' => tok.open_quote(Quote::Double),
                _ => tok.text.push(c),
            },
            Quote::Single => match c {
                '\'' => tok.close_quote(),
                _ => tok.text.push(c),
            },
            Quote::Double => match c {
                '\\' if chars.peek() == Some(&'"') => {
                    chars.next();
                    tok.text.push('"');
                }
                '"' => tok.close_quote(),
                _ => tok.text.push(c),
            },
        }
    }

    let line = tok.finish();
    log::trace!("tokenized {raw:?} into {} argument(s)", line.len());
    line
}
