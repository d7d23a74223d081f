//! Python literal values
//!
//! A small total parser for the literal text predictors emit in symbol
//! tables: numbers, strings, `True`/`False`/`None`, lists, tuples, sets,
//! dicts and builtin type names (`int`, `<class 'str'>`). Nothing is ever
//! evaluated.

use thiserror::Error;

/// Builtin type names accepted as bare identifiers
const TYPE_NAMES: &[&str] = &[
    "int", "float", "str", "bool", "list", "dict", "tuple", "set", "NoneType", "complex", "bytes",
    "range", "frozenset", "object",
];

/// Deepest container nesting the parser descends into
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i128),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Set(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
    /// Builtin type, e.g. `int`
    Type(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid literal at offset {position}: {reason}")]
pub struct LiteralError {
    pub position: usize,
    pub reason: String,
}

impl Literal {
    /// Parse a complete literal; trailing text is an error
    pub fn parse(text: &str) -> Result<Literal, LiteralError> {
        let mut parser = Parser::new(text);
        let value = parser.value()?;
        parser.skip_ws();
        if parser.pos < parser.chars.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(value)
    }

    /// Text Python's `str()` would produce
    pub fn to_python_str(&self) -> String {
        match self {
            Literal::Str(s) => s.clone(),
            other => other.to_repr(),
        }
    }

    /// Text Python's `repr()` would produce
    pub fn to_repr(&self) -> String {
        match self {
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => float_repr(*f),
            Literal::Str(s) => str_repr(s),
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::None => "None".to_string(),
            Literal::List(items) => format!("[{}]", join_repr(items)),
            Literal::Tuple(items) if items.len() == 1 => format!("({},)", items[0].to_repr()),
            Literal::Tuple(items) => format!("({})", join_repr(items)),
            Literal::Set(items) => format!("{{{}}}", join_repr(items)),
            Literal::Dict(entries) => {
                let body = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.to_repr(), v.to_repr()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", body)
            }
            Literal::Type(name) => format!("<class '{}'>", name),
        }
    }

    /// First element of a `(value, type)` pair, otherwise the value itself
    pub fn value_part(&self) -> &Literal {
        match self {
            Literal::Tuple(items) if items.len() == 2 => &items[0],
            other => other,
        }
    }
}

/// Top-level `key: value` pairs of a dict literal
///
/// Keys are parsed; values are returned as trimmed raw text so each one can
/// be parsed (and fail) on its own.
pub fn split_dict_entries(text: &str) -> Result<Vec<(Literal, String)>, LiteralError> {
    let trimmed = text.trim();
    let offset = text.len() - text.trim_start().len() + 1;
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or(LiteralError {
            position: 0,
            reason: "expected a dict".to_string(),
        })?;

    let mut entries = Vec::new();
    for (start, part) in split_top_level(inner, ',') {
        if part.trim().is_empty() {
            continue;
        }
        let pieces = split_top_level(part, ':');
        if pieces.len() < 2 {
            return Err(LiteralError {
                position: offset + start,
                reason: "expected ':'".to_string(),
            });
        }
        let key_text = pieces[0].1;
        let key = Literal::parse(key_text).map_err(|e| LiteralError {
            position: offset + start + e.position,
            reason: e.reason,
        })?;
        let value_text = &part[key_text.len() + 1..];
        entries.push((key, value_text.trim().to_string()));
    }
    Ok(entries)
}

/// Pieces of `text` between `sep` characters outside brackets and strings,
/// each with its byte offset
fn split_top_level(text: &str, sep: char) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push((start, &text[start..i]));
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push((start, &text[start..]));
    parts
}

fn join_repr(items: &[Literal]) -> String {
    items.iter().map(Literal::to_repr).collect::<Vec<_>>().join(", ")
}

fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Python float repr: shortest round-trip digits, exponent form outside 1e-4..1e16
fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", f);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let sign = if negative { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        let body = if point <= 0 {
            format!("0.{}{}", "0".repeat((-point) as usize), digits)
        } else if point as usize >= digits.len() {
            format!("{}{}.0", digits, "0".repeat(point as usize - digits.len()))
        } else {
            format!("{}.{}", &digits[..point as usize], &digits[point as usize..])
        };
        format!("{}{}", sign, body)
    } else {
        let (head, tail) = digits.split_at(1);
        let mantissa = if tail.is_empty() {
            head.to_string()
        } else {
            format!("{}.{}", head, tail)
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.abs())
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> LiteralError {
        LiteralError {
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('[') => self.nested(|p| {
                p.pos += 1;
                p.sequence(']').map(Literal::List)
            }),
            Some('(') => self.nested(Self::tuple),
            Some('{') => self.nested(Self::brace),
            Some('\'') | Some('"') => self.string().map(Literal::Str),
            Some('<') => self.class_repr(),
            Some(c) if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.name(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Literal, LiteralError>,
    ) -> Result<Literal, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Comma-separated values up to `close`, trailing comma allowed
    fn sequence(&mut self, close: char) -> Result<Vec<Literal>, LiteralError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.value()?);
            if self.eat(',') {
                continue;
            }
            if self.eat(close) {
                return Ok(items);
            }
            return Err(self.error(format!("expected ',' or '{}'", close)));
        }
    }

    fn tuple(&mut self) -> Result<Literal, LiteralError> {
        self.pos += 1;
        if self.eat(')') {
            return Ok(Literal::Tuple(Vec::new()));
        }
        let first = self.value()?;
        if self.eat(')') {
            // Parenthesized expression, not a tuple
            return Ok(first);
        }
        if !self.eat(',') {
            return Err(self.error("expected ',' or ')'"));
        }
        let mut items = vec![first];
        items.extend(self.sequence(')')?);
        Ok(Literal::Tuple(items))
    }

    fn brace(&mut self) -> Result<Literal, LiteralError> {
        self.pos += 1;
        if self.eat('}') {
            return Ok(Literal::Dict(Vec::new()));
        }
        let first = self.value()?;
        if self.eat(':') {
            let mut entries = vec![(first, self.value()?)];
            loop {
                if self.eat('}') {
                    return Ok(Literal::Dict(entries));
                }
                if !self.eat(',') {
                    return Err(self.error("expected ',' or '}'"));
                }
                if self.eat('}') {
                    return Ok(Literal::Dict(entries));
                }
                let key = self.value()?;
                if !self.eat(':') {
                    return Err(self.error("expected ':'"));
                }
                entries.push((key, self.value()?));
            }
        }
        let mut items = vec![first];
        if self.eat(',') {
            items.extend(self.sequence('}')?);
        } else if !self.eat('}') {
            return Err(self.error("expected ',' or '}'"));
        }
        Ok(Literal::Set(items))
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let Some(quote) = self.peek() else {
            return Err(self.error("expected string"));
        };
        self.pos += 1;
        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error("unterminated string"));
            };
            self.pos += 1;
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some(escaped) = self.peek() else {
                return Err(self.error("unterminated escape"));
            };
            self.pos += 1;
            match escaped {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                '\\' | '\'' | '"' => out.push(escaped),
                'x' => out.push(self.hex_escape(2)?),
                'u' => out.push(self.hex_escape(4)?),
                other => {
                    // Unknown escapes are kept verbatim
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }

    fn hex_escape(&mut self, len: usize) -> Result<char, LiteralError> {
        let end = self.pos + len;
        if end > self.chars.len() {
            return Err(self.error("truncated escape"));
        }
        let hex: String = self.chars[self.pos..end].iter().collect();
        let code = u32::from_str_radix(&hex, 16).map_err(|_| self.error("invalid hex escape"))?;
        self.pos = end;
        char::from_u32(code).ok_or_else(|| self.error("invalid code point"))
    }

    fn class_repr(&mut self) -> Result<Literal, LiteralError> {
        if !self.starts_with("<class ") {
            return Err(self.error("unexpected '<'"));
        }
        self.pos += "<class ".len();
        self.skip_ws();
        let name = self.string()?;
        if !self.eat('>') {
            return Err(self.error("expected '>'"));
        }
        Ok(Literal::Type(name))
    }

    fn name(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            w if TYPE_NAMES.contains(&w) => Ok(Literal::Type(word)),
            _ => Err(LiteralError {
                position: start,
                reason: format!("unknown name '{}'", word),
            }),
        }
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        let mut negative = false;
        while let Some(sign @ ('-' | '+')) = self.peek() {
            if sign == '-' {
                negative = !negative;
            }
            self.pos += 1;
            self.skip_ws();
        }

        let body_start = self.pos;
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => {}
                '.' => is_float = true,
                'e' | 'E' => {
                    is_float = true;
                    if matches!(self.chars.get(self.pos + 1), Some('-' | '+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
            self.pos += 1;
        }

        let body: String = self.chars[body_start..self.pos]
            .iter()
            .filter(|&&c| c != '_')
            .collect();
        if body.is_empty() || body == "." {
            return Err(LiteralError {
                position: start,
                reason: "expected a number".to_string(),
            });
        }

        let invalid = |_| LiteralError {
            position: start,
            reason: format!("invalid number '{}'", body),
        };
        if is_float {
            let value: f64 = body.parse().map_err(invalid)?;
            Ok(Literal::Float(if negative { -value } else { value }))
        } else {
            let value: i128 = body.parse().map_err(|_| LiteralError {
                position: start,
                reason: format!("invalid integer '{}'", body),
            })?;
            Ok(Literal::Int(if negative { -value } else { value }))
        }
    }
}
