//! Resolution of function names to source ranges.

use crate::document::{DocumentView, Position, Range, utf16_len};

/// Finds the range of `display_name` on `line`.
///
/// The rightmost occurrence on the line is used so that return types and
/// qualifiers earlier in the declaration are not mistaken for the name.
/// Falls back to the trimmed line when the document cannot locate the token,
/// and to a zero-width range at column 0 when the name is not on the line.
pub fn resolve_range<D: DocumentView + ?Sized>(
    line: u32,
    display_name: &str,
    document: &D,
) -> Range {
    let line = line.min(document.line_count().saturating_sub(1));
    let Some(text) = document.line_text(line) else {
        return Range::point(line, 0);
    };

    let offset = match text.rfind(display_name) {
        Some(offset) if offset < text.len() => offset,
        _ => return Range::point(line, 0),
    };

    let start = Position::new(line, utf16_len(&text[..offset]));
    document
        .find_token_range(start, &regex::escape(display_name))
        .unwrap_or_else(|| trimmed_line(line, text))
}

fn trimmed_line(line: u32, text: &str) -> Range {
    let indent = text.len() - text.trim_start().len();
    Range::new(
        Position::new(line, utf16_len(&text[..indent])),
        Position::new(line, utf16_len(text)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;
    use pretty_assertions::assert_eq;

    /// A document view whose token lookup never succeeds.
    struct NoTokens(TextDocument);

    impl DocumentView for NoTokens {
        fn line_text(&self, line: u32) -> Option<&str> {
            self.0.line_text(line)
        }

        fn find_token_range(&self, _: Position, _: &str) -> Option<Range> {
            None
        }

        fn line_count(&self) -> u32 {
            self.0.line_count()
        }
    }

    fn range(line: u32, start: u32, end: u32) -> Range {
        Range::new(Position::new(line, start), Position::new(line, end))
    }

    #[test]
    fn test_resolves_function_name() {
        let doc = TextDocument::new("#include <x>\nint Widget::draw(int a) {\n}");
        assert_eq!(resolve_range(1, "draw", &doc), range(1, 12, 16));
    }

    #[test]
    fn test_prefers_rightmost_occurrence() {
        let doc = TextDocument::new("Value value(Value v) {");
        assert_eq!(resolve_range(0, "value", &doc), range(0, 6, 11));

        let doc = TextDocument::new("Widget* Widget::Widget(int parent)");
        assert_eq!(resolve_range(0, "Widget", &doc), range(0, 16, 22));
    }

    #[test]
    fn test_repeated_name_resolves_to_rightmost_copy() {
        let doc = TextDocument::new("void barbar();");
        assert_eq!(resolve_range(0, "bar", &doc), range(0, 8, 11));
    }

    #[test]
    fn test_operator_name_is_matched_literally() {
        let doc = TextDocument::new("  T& Vec::operator[](size_t i) {");
        assert_eq!(resolve_range(0, "operator[]", &doc), range(0, 10, 20));
    }

    #[test]
    fn test_missing_name_falls_back_to_line_start() {
        let doc = TextDocument::new("int a;\n  // nothing here\n");
        assert_eq!(resolve_range(1, "compute", &doc), Range::point(1, 0));
    }

    #[test]
    fn test_empty_name_falls_back_to_line_start() {
        let doc = TextDocument::new("int run();");
        assert_eq!(resolve_range(0, "", &doc), Range::point(0, 0));
    }

    #[test]
    fn test_unresolved_token_spans_trimmed_line() {
        let doc = NoTokens(TextDocument::new("\tvoid run() {"));
        assert_eq!(resolve_range(0, "run", &doc), range(0, 1, 13));
    }

    #[test]
    fn test_line_past_end_is_clamped() {
        let doc = TextDocument::new("void a();\nvoid b();");
        assert_eq!(resolve_range(40, "b", &doc), range(1, 5, 6));
    }

    #[test]
    fn test_utf16_columns() {
        let doc = TextDocument::new("/* ü */ int süß(int a);");
        assert_eq!(resolve_range(0, "süß", &doc), range(0, 12, 15));
    }
}
