const INDENT: &str = "    ";

/// The widest line that Javadoc comments are wrapped to.
const LINE_WIDTH: usize = 120;

/// Builds indented Java source text, one line at a time.
#[derive(Debug, Default)]
pub struct JavaWriter {
    out: String,
    depth: usize,
}

impl JavaWriter {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a line at the current indentation. Empty lines
    /// aren't indented.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    #[inline]
    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Writes the lines from `body` one level deeper.
    pub fn indent(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self
    }

    /// Writes `header {`, then `body` one level deeper, then `}`.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.block_with(header, "}", body)
    }

    /// Like [`JavaWriter::block`], but closes the block with `footer`,
    /// like `});`.
    pub fn block_with(
        &mut self,
        header: impl AsRef<str>,
        footer: impl AsRef<str>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(format!("{} {{", header.as_ref()));
        self.indent(body);
        self.line(footer)
    }

    /// Writes a Javadoc comment, wrapped to fit the current indentation.
    pub fn javadoc(&mut self, doc: &Javadoc) -> &mut Self {
        let width = LINE_WIDTH.saturating_sub(self.depth * INDENT.len());
        for line in doc.lines(width) {
            self.line(line);
        }
        self
    }

    #[inline]
    pub fn finish(self) -> String {
        self.out
    }
}

/// A Javadoc comment.
///
/// Text is escaped for HTML, so descriptions can mention types like
/// `List<Widget>`. Tags are written in the order that they're added.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Javadoc {
    description: Option<String>,
    tags: Vec<String>,
}

impl Javadoc {
    pub fn new(description: impl AsRef<str>) -> Self {
        Self {
            description: Some(escape(description.as_ref())),
            tags: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, description: impl AsRef<str>) -> Self {
        self.tags
            .push(format!("@param {name} {}", escape(description.as_ref())));
        self
    }

    pub fn throws(mut self, ty: &str, description: impl AsRef<str>) -> Self {
        self.tags
            .push(format!("@throws {ty} {}", escape(description.as_ref())));
        self
    }

    /// Adds an `@return` tag. `description` can contain inline tags,
    /// like `{@link Mono}`.
    pub fn returns(mut self, description: impl AsRef<str>) -> Self {
        self.tags
            .push(format!("@return {}", escape(description.as_ref())));
        self
    }

    pub fn deprecated(mut self, description: impl AsRef<str>) -> Self {
        self.tags
            .push(format!("@deprecated {}", escape(description.as_ref())));
        self
    }

    /// Returns the lines of this comment, each no wider than `width`
    /// where possible.
    pub fn lines(&self, width: usize) -> Vec<String> {
        // Leave room for the ` * ` prefix.
        let options = textwrap::Options::new(width.saturating_sub(3).max(20))
            .break_words(false)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let mut lines = vec!["/**".to_owned()];
        let mut push = |text: &str| {
            if text.trim().is_empty() {
                lines.push(" *".to_owned());
            } else {
                for wrapped in textwrap::wrap(text.trim_end(), &options) {
                    lines.push(format!(" * {wrapped}"));
                }
            }
        };
        if let Some(description) = &self.description {
            for text in description.lines() {
                push(text);
            }
            if !self.tags.is_empty() {
                push("");
            }
        }
        for tag in &self.tags {
            push(tag);
        }
        lines.push(" */".to_owned());
        lines
    }
}

/// Escapes text for a Javadoc comment.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace("*/", "*&#47;")
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blocks_indent() {
        let mut writer = JavaWriter::new();
        writer.block("public final class Widget", |w| {
            w.line("private String name;");
            w.blank();
            w.block("public String getName()", |w| {
                w.line("return this.name;");
            });
        });

        assert_eq!(
            writer.finish(),
            indoc! {"
                public final class Widget {
                    private String name;

                    public String getName() {
                        return this.name;
                    }
                }
            "}
        );
    }

    #[test]
    fn test_javadoc_tags() {
        let doc = Javadoc::new("Gets a widget.")
            .param("widgetName", "The name of the widget.")
            .returns("the widget.");

        let mut writer = JavaWriter::new();
        writer.indent(|w| {
            w.javadoc(&doc);
        });

        assert_eq!(
            writer.finish(),
            indoc! {"
                    /**
                     * Gets a widget.
                     *
                     * @param widgetName The name of the widget.
                     * @return the widget.
                     */
            "}
        );
    }

    #[test]
    fn test_javadoc_escapes_html() {
        let doc = Javadoc::new("A wrapper around List<Widget> & friends. */");

        assert_eq!(
            doc.lines(120),
            [
                "/**",
                " * A wrapper around List&lt;Widget&gt; &amp; friends. *&#47;",
                " */",
            ]
        );
    }

    #[test]
    fn test_javadoc_wraps_long_lines() {
        let doc = Javadoc::new("one two three four five six seven eight nine ten");

        assert_eq!(
            doc.lines(25),
            [
                "/**",
                " * one two three four",
                " * five six seven eight",
                " * nine ten",
                " */",
            ]
        );
    }

    #[test]
    fn test_javadoc_keeps_paragraphs() {
        let doc = Javadoc::new("Summary.\n\nDetails.");

        assert_eq!(
            doc.lines(120),
            ["/**", " * Summary.", " *", " * Details.", " */"]
        );
    }
}
