use miette::SourceSpan;
use winnow::{
    Parser,
    combinator::eof,
    error::{ContextError, ParseError},
};

/// Parses an operation path template, like
/// `/subscriptions/{subscriptionId}/widgets/{widgetName}`.
pub fn parse<'a>(input: &'a str) -> Result<Vec<PathSegment<'a>>, BadPath> {
    (self::parser::template, eof)
        .map(|(segments, _)| segments)
        .parse(input)
        .map_err(BadPath::from_parse_error)
}

/// Returns the names of all the parameters in a parsed path template,
/// in the order that they appear.
pub fn params<'a>(segments: &[PathSegment<'a>]) -> impl Iterator<Item = &'a str> {
    segments
        .iter()
        .flat_map(|segment| segment.fragments())
        .filter_map(|fragment| match fragment {
            PathFragment::Param(name) => Some(*name),
            PathFragment::Literal(_) => None,
        })
}

/// A slash-delimited path segment with zero or more fragments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathSegment<'input>(Vec<PathFragment<'input>>);

impl<'input> PathSegment<'input> {
    pub fn fragments(&self) -> &[PathFragment<'input>] {
        &self.0
    }
}

/// A fragment within a path segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathFragment<'input> {
    /// Literal text, sent as-is.
    Literal(&'input str),
    /// A parameter name, substituted when the request is sent.
    Param(&'input str),
}

mod parser {
    use super::*;

    use winnow::{
        Parser,
        combinator::{alt, delimited, repeat},
        token::take_while,
    };

    pub fn template<'a>(input: &mut &'a str) -> winnow::Result<Vec<PathSegment<'a>>> {
        alt((
            ('/', segment, template)
                .map(|(_, head, tail)| std::iter::once(head).chain(tail).collect()),
            ('/', segment).map(|(_, segment)| vec![segment]),
            '/'.map(|_| vec![PathSegment::default()]),
        ))
        .parse_next(input)
    }

    fn segment<'a>(input: &mut &'a str) -> winnow::Result<PathSegment<'a>> {
        repeat(1.., fragment).map(PathSegment).parse_next(input)
    }

    fn fragment<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
        alt((param, literal)).parse_next(input)
    }

    fn param<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
        delimited('{', take_while(1.., |c| c != '{' && c != '}' && c != '/'), '}')
            .map(PathFragment::Param)
            .parse_next(input)
    }

    fn literal<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
        take_while(1.., |c| {
            matches!(c,
                'A'..='Z' | 'a'..='z' | '0'..='9' |
                '-' | '.' | '_' | '~' | ':' | '@' |
                '!' | '$' | '&' | '\'' | '(' | ')' |
                '*' | '+' | ',' | ';' | '=' | '%'
            )
        })
        .map(PathFragment::Literal)
        .parse_next(input)
    }
}

#[derive(Debug, miette::Diagnostic, thiserror::Error)]
#[error("invalid path template")]
pub struct BadPath {
    #[source_code]
    code: String,
    #[label("unexpected character")]
    span: SourceSpan,
}

impl BadPath {
    fn from_parse_error(error: ParseError<&str, ContextError>) -> Self {
        let input = *error.input();
        Self {
            code: input.to_owned(),
            span: error.char_span().into(),
        }
    }
}
