/*!
 * Recursive-descent parser for ICU MessageFormat strings.
 *
 * The grammar and error taxonomy follow the formatjs message parser:
 * apostrophe quoting, `#` inside plural branches, `::` skeletons for
 * number/date/time styles, optional `offset:` on plurals and optional
 * rich-text tags.
 */

use std::collections::HashSet;

use super::ast::{ArgumentStyle, Node, Position, SelectOption, Span};
use super::error::{ErrorKind, ParseError};

/// Largest integer accepted for plural offsets and `=N` selectors
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Knobs controlling how strictly a message is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// Treat `<tag>` markup as literal text
    pub ignore_tag: bool,
    /// Attach source spans to every node
    pub capture_location: bool,
    /// Fail when a plural or select has no `other` option
    pub requires_other_clause: bool,
}

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Kind of the enclosing complex argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComplexKind {
    Select,
    Plural,
    SelectOrdinal,
}

impl ComplexKind {
    fn is_plural(self) -> bool {
        matches!(self, Self::Plural | Self::SelectOrdinal)
    }
}

/// Parse `message` into a list of nodes.
pub fn parse(message: &str, options: &ParserOptions) -> ParseResult<Vec<Node>> {
    MessageParser::new(message, *options).parse_message(0, false, false)
}

struct MessageParser<'a> {
    message: &'a str,
    position: Position,
    options: ParserOptions,
}

impl<'a> MessageParser<'a> {
    fn new(message: &'a str, options: ParserOptions) -> Self {
        Self {
            message,
            position: Position { offset: 0, line: 1, column: 1 },
            options,
        }
    }

    fn parse_message(
        &mut self,
        nesting_level: usize,
        in_plural: bool,
        expecting_close_tag: bool,
    ) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();

        while let Some(ch) = self.char() {
            match ch {
                '{' => nodes.push(self.parse_argument(nesting_level, expecting_close_tag)?),
                '}' if nesting_level > 0 => break,
                '#' if in_plural => {
                    let start = self.position;
                    self.bump();
                    nodes.push(Node::Pound { location: self.span_from(start) });
                }
                '<' if !self.options.ignore_tag && self.peek() == Some('/') => {
                    if expecting_close_tag {
                        break;
                    }
                    return Err(self.error(
                        ErrorKind::UnmatchedClosingTag,
                        Span::new(self.position, self.position),
                    ));
                }
                '<' if !self.options.ignore_tag && self.peek().is_some_and(is_alpha) => {
                    nodes.push(self.parse_tag(nesting_level, in_plural)?);
                }
                _ => nodes.push(self.parse_literal(nesting_level, in_plural)),
            }
        }

        Ok(nodes)
    }

    fn parse_tag(&mut self, nesting_level: usize, in_plural: bool) -> ParseResult<Node> {
        let start = self.position;
        self.bump(); // `<`

        let tag_name = self.parse_tag_name();
        self.bump_space();

        if self.bump_if("/>") {
            return Ok(Node::Literal {
                value: format!("<{}/>", tag_name),
                location: self.span_from(start),
            });
        }

        if !self.bump_if(">") {
            return Err(self.error(ErrorKind::InvalidTag, Span::new(start, self.position)));
        }

        let children = self.parse_message(nesting_level + 1, in_plural, true)?;

        let end_tag_start = self.position;
        if !self.bump_if("</") {
            return Err(self.error(ErrorKind::UnclosedTag, Span::new(start, self.position)));
        }

        if !self.char().is_some_and(is_alpha) {
            return Err(self.error(ErrorKind::InvalidTag, Span::new(end_tag_start, self.position)));
        }

        let closing_start = self.position;
        let closing_name = self.parse_tag_name();
        if closing_name != tag_name {
            return Err(self.error(
                ErrorKind::UnmatchedClosingTag,
                Span::new(closing_start, self.position),
            ));
        }

        self.bump_space();
        if !self.bump_if(">") {
            return Err(self.error(ErrorKind::InvalidTag, Span::new(end_tag_start, self.position)));
        }

        Ok(Node::Tag {
            value: tag_name,
            children,
            location: self.span_from(start),
        })
    }

    fn parse_tag_name(&mut self) -> String {
        let start = self.position.offset;
        while self.char().is_some_and(is_potential_element_name_char) {
            self.bump();
        }
        self.message[start..self.position.offset].to_string()
    }

    fn parse_literal(&mut self, nesting_level: usize, in_plural: bool) -> Node {
        let start = self.position;
        let mut value = String::new();

        loop {
            if let Some(quoted) = self.try_parse_quote(in_plural) {
                value.push_str(&quoted);
            } else if let Some(ch) = self.try_parse_unquoted(nesting_level, in_plural) {
                value.push(ch);
            } else if let Some(ch) = self.try_parse_left_angle_bracket() {
                value.push(ch);
            } else {
                break;
            }
        }

        Node::Literal {
            value,
            location: self.span_from(start),
        }
    }

    fn try_parse_left_angle_bracket(&mut self) -> Option<char> {
        if self.char() != Some('<') {
            return None;
        }
        // A `<` that cannot start a tag is plain text
        let starts_tag = self.peek().is_some_and(|c| is_alpha(c) || c == '/');
        if self.options.ignore_tag || !starts_tag {
            self.bump();
            return Some('<');
        }
        None
    }

    /// Apostrophe quoting: `''` is a literal quote, `'{'` and friends
    /// escape syntax characters, and an unterminated quote runs to the end.
    fn try_parse_quote(&mut self, in_plural: bool) -> Option<String> {
        if self.char() != Some('\'') {
            return None;
        }

        match self.peek() {
            Some('\'') => {
                self.bump();
                self.bump();
                return Some("'".to_string());
            }
            Some('{' | '<' | '>' | '}') => {}
            Some('#') if in_plural => {}
            _ => return None,
        }

        self.bump(); // opening quote
        let mut value = String::new();
        if let Some(first) = self.char() {
            value.push(first);
            self.bump();
        }

        while let Some(ch) = self.char() {
            if ch == '\'' {
                if self.peek() == Some('\'') {
                    value.push('\'');
                    self.bump();
                    self.bump();
                } else {
                    self.bump();
                    break;
                }
            } else {
                value.push(ch);
                self.bump();
            }
        }

        Some(value)
    }

    fn try_parse_unquoted(&mut self, nesting_level: usize, in_plural: bool) -> Option<char> {
        let ch = self.char()?;
        let stops = ch == '<'
            || ch == '{'
            || (ch == '#' && in_plural)
            || (ch == '}' && nesting_level > 0);
        if stops {
            return None;
        }
        self.bump();
        Some(ch)
    }

    fn parse_argument(&mut self, nesting_level: usize, expecting_close_tag: bool) -> ParseResult<Node> {
        let opening = self.position;
        self.bump(); // `{`
        self.bump_space();

        match self.char() {
            None => {
                return Err(self.error(
                    ErrorKind::ExpectArgumentClosingBrace,
                    Span::new(opening, self.position),
                ));
            }
            Some('}') => {
                self.bump();
                return Err(self.error(ErrorKind::EmptyArgument, Span::new(opening, self.position)));
            }
            Some(_) => {}
        }

        let (value, _) = self.parse_identifier();
        if value.is_empty() {
            return Err(self.error(ErrorKind::MalformedArgument, Span::new(opening, self.position)));
        }

        self.bump_space();

        match self.char() {
            None => Err(self.error(
                ErrorKind::ExpectArgumentClosingBrace,
                Span::new(opening, self.position),
            )),
            Some('}') => {
                self.bump();
                Ok(Node::Argument {
                    value,
                    location: self.span_from(opening),
                })
            }
            Some(',') => {
                self.bump();
                self.bump_space();
                if self.is_eof() {
                    return Err(self.error(
                        ErrorKind::ExpectArgumentClosingBrace,
                        Span::new(opening, self.position),
                    ));
                }
                self.parse_argument_options(nesting_level, expecting_close_tag, value, opening)
            }
            Some(_) => Err(self.error(ErrorKind::MalformedArgument, Span::new(opening, self.position))),
        }
    }

    fn parse_argument_options(
        &mut self,
        nesting_level: usize,
        expecting_close_tag: bool,
        value: String,
        opening: Position,
    ) -> ParseResult<Node> {
        let type_start = self.position;
        let (arg_type, _) = self.parse_identifier();
        let type_end = self.position;

        match arg_type.as_str() {
            "" => Err(self.error(ErrorKind::ExpectArgumentType, Span::new(type_start, type_end))),
            "number" | "date" | "time" => {
                self.bump_space();

                let mut style: Option<(String, Span)> = None;
                if self.bump_if(",") {
                    self.bump_space();
                    let style_start = self.position;
                    let raw = self.parse_simple_arg_style()?;
                    let trimmed = raw.trim_end();
                    if trimmed.is_empty() {
                        return Err(self.error(
                            ErrorKind::ExpectArgumentStyle,
                            Span::new(self.position, self.position),
                        ));
                    }
                    style = Some((trimmed.to_string(), Span::new(style_start, self.position)));
                }

                self.try_parse_argument_close(opening)?;
                let location = self.span_from(opening);

                let style = match style {
                    None => None,
                    Some((text, style_span)) => match text.strip_prefix("::") {
                        Some(skeleton) => {
                            let skeleton = skeleton.trim_start();
                            if arg_type == "number" {
                                if !is_valid_number_skeleton(skeleton) {
                                    return Err(self.error(ErrorKind::InvalidNumberSkeleton, style_span));
                                }
                            } else if skeleton.is_empty() {
                                return Err(self.error(ErrorKind::ExpectDateTimeSkeleton, style_span));
                            }
                            Some(ArgumentStyle::Skeleton(skeleton.to_string()))
                        }
                        None => Some(ArgumentStyle::Named(text)),
                    },
                };

                Ok(match arg_type.as_str() {
                    "number" => Node::Number { value, style, location },
                    "date" => Node::Date { value, style, location },
                    _ => Node::Time { value, style, location },
                })
            }
            "plural" | "selectordinal" | "select" => {
                let kind = match arg_type.as_str() {
                    "plural" => ComplexKind::Plural,
                    "selectordinal" => ComplexKind::SelectOrdinal,
                    _ => ComplexKind::Select,
                };

                let type_end = self.position;
                self.bump_space();
                if !self.bump_if(",") {
                    return Err(self.error(
                        ErrorKind::ExpectSelectArgumentOptions,
                        Span::new(type_end, type_end),
                    ));
                }
                self.bump_space();

                let (mut selector, mut selector_span) = self.parse_identifier();
                let mut offset = 0;

                if kind.is_plural() && selector == "offset" {
                    if !self.bump_if(":") {
                        return Err(self.error(
                            ErrorKind::ExpectPluralArgumentOffsetValue,
                            Span::new(self.position, self.position),
                        ));
                    }
                    self.bump_space();
                    offset = self.try_parse_decimal_integer(
                        ErrorKind::ExpectPluralArgumentOffsetValue,
                        ErrorKind::InvalidPluralArgumentOffsetValue,
                    )?;
                    self.bump_space();
                    (selector, selector_span) = self.parse_identifier();
                }

                let options = self.try_parse_plural_or_select_options(
                    nesting_level,
                    kind,
                    expecting_close_tag,
                    selector,
                    selector_span,
                )?;
                self.try_parse_argument_close(opening)?;
                let location = self.span_from(opening);

                Ok(match kind {
                    ComplexKind::Select => Node::Select { value, options, location },
                    _ => Node::Plural {
                        value,
                        ordinal: kind == ComplexKind::SelectOrdinal,
                        offset,
                        options,
                        location,
                    },
                })
            }
            _ => Err(self.error(ErrorKind::InvalidArgumentType, Span::new(type_start, type_end))),
        }
    }

    fn try_parse_plural_or_select_options(
        &mut self,
        nesting_level: usize,
        kind: ComplexKind,
        expecting_close_tag: bool,
        mut selector: String,
        mut selector_span: Span,
    ) -> ParseResult<Vec<SelectOption>> {
        let mut options = Vec::new();
        let mut seen = HashSet::new();
        let mut has_other = false;

        loop {
            if selector.is_empty() {
                let start = self.position;
                if kind.is_plural() && self.bump_if("=") {
                    self.try_parse_decimal_integer(
                        ErrorKind::ExpectPluralArgumentSelector,
                        ErrorKind::InvalidPluralArgumentSelector,
                    )?;
                    selector = self.message[start.offset..self.position.offset].to_string();
                    selector_span = Span::new(start, self.position);
                } else {
                    break;
                }
            }

            if seen.contains(&selector) {
                let kind = if kind == ComplexKind::Select {
                    ErrorKind::DuplicateSelectArgumentSelector
                } else {
                    ErrorKind::DuplicatePluralArgumentSelector
                };
                return Err(self.error(kind, selector_span));
            }

            if selector == "other" {
                has_other = true;
            }

            self.bump_space();
            let fragment_open = self.position;
            if !self.bump_if("{") {
                let kind = if kind == ComplexKind::Select {
                    ErrorKind::ExpectSelectArgumentSelectorFragment
                } else {
                    ErrorKind::ExpectPluralArgumentSelectorFragment
                };
                return Err(self.error(kind, Span::new(self.position, self.position)));
            }

            let value = self.parse_message(nesting_level + 1, kind.is_plural(), expecting_close_tag)?;
            self.try_parse_argument_close(fragment_open)?;

            seen.insert(selector.clone());
            options.push(SelectOption {
                selector,
                value,
                location: self.span_from(fragment_open),
            });

            self.bump_space();
            (selector, selector_span) = self.parse_identifier();
        }

        if options.is_empty() {
            let kind = if kind == ComplexKind::Select {
                ErrorKind::ExpectSelectArgumentSelector
            } else {
                ErrorKind::ExpectPluralArgumentSelector
            };
            return Err(self.error(kind, Span::new(self.position, self.position)));
        }

        if self.options.requires_other_clause && !has_other {
            return Err(self.error(
                ErrorKind::MissingOtherClause,
                Span::new(self.position, self.position),
            ));
        }

        Ok(options)
    }

    fn try_parse_decimal_integer(&mut self, expect: ErrorKind, invalid: ErrorKind) -> ParseResult<i64> {
        let start = self.position;
        let mut sign = 1;
        if !self.bump_if("+") && self.bump_if("-") {
            sign = -1;
        }

        let mut has_digits = false;
        let mut decimal: i64 = 0;
        let mut overflow = false;
        while let Some(digit) = self.char().and_then(|c| c.to_digit(10)) {
            has_digits = true;
            match decimal.checked_mul(10).and_then(|d| d.checked_add(i64::from(digit))) {
                Some(next) => decimal = next,
                None => overflow = true,
            }
            self.bump();
        }

        let span = Span::new(start, self.position);
        if !has_digits {
            return Err(self.error(expect, span));
        }
        if overflow || decimal > MAX_SAFE_INTEGER {
            return Err(self.error(invalid, span));
        }

        Ok(decimal * sign)
    }

    /// Read a number/date/time style up to the closing brace of the argument.
    fn parse_simple_arg_style(&mut self) -> ParseResult<String> {
        let start = self.position.offset;
        let mut nested_braces = 0usize;

        while let Some(ch) = self.char() {
            match ch {
                '\'' => {
                    self.bump();
                    let apostrophe = self.position;
                    if !self.bump_until('\'') {
                        return Err(self.error(
                            ErrorKind::UnclosedQuoteInArgumentStyle,
                            Span::new(apostrophe, self.position),
                        ));
                    }
                    self.bump();
                }
                '{' => {
                    nested_braces += 1;
                    self.bump();
                }
                '}' => {
                    if nested_braces == 0 {
                        break;
                    }
                    nested_braces -= 1;
                    self.bump();
                }
                _ => self.bump(),
            }
        }

        Ok(self.message[start..self.position.offset].to_string())
    }

    fn try_parse_argument_close(&mut self, opening: Position) -> ParseResult<()> {
        if self.char() != Some('}') {
            return Err(self.error(
                ErrorKind::ExpectArgumentClosingBrace,
                Span::new(opening, self.position),
            ));
        }
        self.bump();
        Ok(())
    }

    fn parse_identifier(&mut self) -> (String, Span) {
        let start = self.position;
        while self
            .char()
            .is_some_and(|c| !is_white_space(c) && !is_pattern_syntax(c))
        {
            self.bump();
        }
        let value = self.message[start.offset..self.position.offset].to_string();
        (value, Span::new(start, self.position))
    }

    // --- cursor helpers ---

    fn char(&self) -> Option<char> {
        self.message[self.position.offset..].chars().next()
    }

    fn peek(&self) -> Option<char> {
        self.message[self.position.offset..].chars().nth(1)
    }

    fn is_eof(&self) -> bool {
        self.position.offset >= self.message.len()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.char() {
            self.position.offset += ch.len_utf8();
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
    }

    fn bump_if(&mut self, prefix: &str) -> bool {
        if !self.message[self.position.offset..].starts_with(prefix) {
            return false;
        }
        for _ in prefix.chars() {
            self.bump();
        }
        true
    }

    /// Advance to the next `target`, or to the end when there is none.
    fn bump_until(&mut self, target: char) -> bool {
        while let Some(ch) = self.char() {
            if ch == target {
                return true;
            }
            self.bump();
        }
        false
    }

    fn bump_space(&mut self) {
        while self.char().is_some_and(is_white_space) {
            self.bump();
        }
    }

    fn span_from(&self, start: Position) -> Option<Span> {
        self.options
            .capture_location
            .then(|| Span::new(start, self.position))
    }

    fn error(&self, kind: ErrorKind, location: Span) -> ParseError {
        ParseError {
            kind,
            location,
            message: self.message.to_string(),
        }
    }
}

/// Number skeletons are whitespace separated `stem/option/option` tokens;
/// an empty skeleton or an empty option is rejected.
fn is_valid_number_skeleton(skeleton: &str) -> bool {
    let mut tokens = skeleton.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(|token| token.split('/').skip(1).all(|option| !option.is_empty()))
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_potential_element_name_char(c: char) -> bool {
    matches!(c,
        '-' | '.' | '0'..='9' | '_' | 'a'..='z' | 'A'..='Z'
        | '\u{B7}'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{203F}'..='\u{2040}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Unicode Pattern_White_Space
fn is_white_space(c: char) -> bool {
    matches!(c,
        '\u{9}'..='\u{D}'
        | '\u{20}'
        | '\u{85}'
        | '\u{200E}'..='\u{200F}'
        | '\u{2028}'..='\u{2029}')
}

/// Unicode Pattern_Syntax
fn is_pattern_syntax(c: char) -> bool {
    matches!(c,
        '!'..='/'
        | ':'..='@'
        | '['..='^'
        | '`'
        | '{'..='~'
        | '\u{A1}'..='\u{A7}'
        | '\u{A9}'
        | '\u{AB}'..='\u{AC}'
        | '\u{AE}'
        | '\u{B0}'..='\u{B1}'
        | '\u{B6}'
        | '\u{BB}'
        | '\u{BF}'
        | '\u{D7}'
        | '\u{F7}'
        | '\u{2010}'..='\u{2027}'
        | '\u{2030}'..='\u{203E}'
        | '\u{2041}'..='\u{2053}'
        | '\u{2055}'..='\u{205E}'
        | '\u{2190}'..='\u{245F}'
        | '\u{2500}'..='\u{2775}'
        | '\u{2794}'..='\u{2BFF}'
        | '\u{2E00}'..='\u{2E7F}'
        | '\u{3001}'..='\u{3003}'
        | '\u{3008}'..='\u{3020}'
        | '\u{3030}'
        | '\u{FD3E}'..='\u{FD3F}'
        | '\u{FE45}'..='\u{FE46}')
}
