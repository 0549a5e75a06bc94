//! Property-path expressions used inside `%{ }` placeholders.
//!
//! The grammar is deliberately tiny:
//!
//! ```text
//! expression := identifier accessor*
//! accessor   := "." identifier
//!             | "[" integer "]"
//!             | "[" quoted-string "]"
//! ```
//!
//! Whitespace is allowed between tokens. Nothing is ever executed: an
//! expression only walks a JSON value.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// `.name` or `["name"]`.
    Key(String),
    /// `[3]`.
    Index(usize),
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Why an expression could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// Nothing but whitespace.
    #[error("empty expression")]
    Empty,
    /// A character that does not fit the grammar.
    #[error("unexpected {found:?} at byte {position}")]
    Unexpected {
        /// The offending character.
        found: char,
        /// Its byte offset.
        position: usize,
    },
    /// Input ended in the middle of an accessor.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// A bracket index that does not fit in `usize`.
    #[error("index {0} is too large")]
    IndexOverflow(String),
}

/// A parsed property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    root: String,
    path: Vec<Accessor>,
}

impl Expression {
    /// Parses `source`.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        Parser::new(source).parse()
    }

    /// The first identifier.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The accessors after the root.
    pub fn path(&self) -> &[Accessor] {
        &self.path
    }

    /// Walks the path starting at `scope`.
    ///
    /// Returns `None` when any step does not exist, which is what sends the
    /// lookup on to the next context layer. `null` is a value, not a miss.
    pub fn evaluate<'v>(&self, scope: &'v Value) -> Option<Cow<'v, Value>> {
        let mut current = step(Cow::Borrowed(scope), &Accessor::Key(self.root.clone()))?;
        for accessor in &self.path {
            current = step(current, accessor)?;
        }
        Some(current)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for accessor in &self.path {
            write!(f, "{accessor}")?;
        }
        Ok(())
    }
}

fn step<'v>(value: Cow<'v, Value>, accessor: &Accessor) -> Option<Cow<'v, Value>> {
    match value {
        Cow::Borrowed(value) => step_borrowed(value, accessor),
        Cow::Owned(value) => step_borrowed(&value, accessor).map(|v| Cow::Owned(v.into_owned())),
    }
}

fn step_borrowed<'v>(value: &'v Value, accessor: &Accessor) -> Option<Cow<'v, Value>> {
    match (value, accessor) {
        (Value::Object(map), Accessor::Key(key)) => map.get(key).map(Cow::Borrowed),
        (Value::Object(map), Accessor::Index(index)) => {
            map.get(&index.to_string()).map(Cow::Borrowed)
        }
        (Value::Array(items), Accessor::Index(index)) => items.get(*index).map(Cow::Borrowed),
        (Value::Array(items), Accessor::Key(key)) => match array_index(key) {
            Some(index) => items.get(index).map(Cow::Borrowed),
            None if key == "length" => Some(Cow::Owned(Value::from(items.len()))),
            None => None,
        },
        (Value::String(text), Accessor::Index(index)) => char_at(text, *index),
        (Value::String(text), Accessor::Key(key)) => match array_index(key) {
            Some(index) => char_at(text, index),
            None if key == "length" => {
                Some(Cow::Owned(Value::from(text.encode_utf16().count())))
            }
            None => None,
        },
        _ => None,
    }
}

fn char_at<'v>(text: &str, index: usize) -> Option<Cow<'v, Value>> {
    text.chars()
        .nth(index)
        .map(|c| Cow::Owned(Value::String(c.to_string())))
}

/// Canonical decimal indices only: `"1"` is an index, `"01"` is a key.
fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}

/// Renders a resolved value the way it reads inside a sentence.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => render_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => render_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn render_number(number: &serde_json::Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(float) if float.is_finite() && float.fract() == 0.0 => format!("{float:.0}"),
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

struct Parser<'s> {
    source: &'s str,
    chars: Peekable<CharIndices<'s>>,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<Expression, ExpressionError> {
        self.skip_whitespace();
        if self.chars.peek().is_none() {
            return Err(ExpressionError::Empty);
        }
        let root = self.identifier()?;
        let mut path = Vec::new();

        loop {
            self.skip_whitespace();
            match self.chars.next() {
                None => break,
                Some((_, '.')) => {
                    self.skip_whitespace();
                    path.push(Accessor::Key(self.identifier()?));
                }
                Some((_, '[')) => {
                    self.skip_whitespace();
                    path.push(self.bracket()?);
                    self.skip_whitespace();
                    self.expect(']')?;
                }
                Some((position, found)) => {
                    return Err(ExpressionError::Unexpected { found, position })
                }
            }
        }

        Ok(Expression { root, path })
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn expect(&mut self, wanted: char) -> Result<(), ExpressionError> {
        match self.chars.next() {
            Some((_, c)) if c == wanted => Ok(()),
            Some((position, found)) => Err(ExpressionError::Unexpected { found, position }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn identifier(&mut self) -> Result<String, ExpressionError> {
        let start = match self.chars.next() {
            Some((position, c)) if is_identifier_start(c) => position,
            Some((position, found)) => return Err(ExpressionError::Unexpected { found, position }),
            None => return Err(ExpressionError::UnexpectedEnd),
        };
        let mut end = self.source.len();
        while let Some(&(position, c)) = self.chars.peek() {
            if is_identifier_part(c) {
                self.chars.next();
            } else {
                end = position;
                break;
            }
        }
        Ok(self.source[start..end].to_string())
    }

    fn bracket(&mut self) -> Result<Accessor, ExpressionError> {
        match self.chars.peek().copied() {
            Some((_, quote @ ('\'' | '"'))) => {
                self.chars.next();
                self.quoted(quote).map(Accessor::Key)
            }
            Some((_, c)) if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some((_, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
                    digits.push(c);
                }
                digits
                    .parse()
                    .map(Accessor::Index)
                    .map_err(|_| ExpressionError::IndexOverflow(digits))
            }
            Some((position, found)) => Err(ExpressionError::Unexpected { found, position }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, ExpressionError> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(text),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => return Err(ExpressionError::UnexpectedEnd),
                },
                Some((_, c)) => text.push(c),
                None => return Err(ExpressionError::UnexpectedEnd),
            }
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_paths() {
        let expression = Expression::parse(" user.profile [ 'first name' ][0] ").unwrap();
        assert_eq!(expression.root(), "user");
        assert_eq!(
            expression.path(),
            &[
                Accessor::Key("profile".into()),
                Accessor::Key("first name".into()),
                Accessor::Index(0)
            ]
        );
        assert_eq!(expression.to_string(), "user.profile.first name[0]");
    }

    #[test]
    fn test_rejects_code() {
        assert!(Expression::parse("alert(1)").is_err());
        assert!(Expression::parse("a = 1").is_err());
        assert!(Expression::parse("a + b").is_err());
        assert!(Expression::parse("constructor.constructor('x')()").is_err());
        assert!(Expression::parse("1abc").is_err());
        assert_eq!(Expression::parse("   "), Err(ExpressionError::Empty));
        assert_eq!(Expression::parse("a["), Err(ExpressionError::UnexpectedEnd));
    }

    #[test]
    fn test_evaluate() {
        let scope = json!({
            "user": { "name": "Bob", "tags": ["admin", "dev"] },
            "count": 3,
            "nothing": null
        });
        let eval = |source: &str| {
            Expression::parse(source)
                .unwrap()
                .evaluate(&scope)
                .map(|v| render_value(&v))
        };

        assert_eq!(eval("user.name").as_deref(), Some("Bob"));
        assert_eq!(eval("user.tags[1]").as_deref(), Some("dev"));
        assert_eq!(eval("user.tags.length").as_deref(), Some("2"));
        assert_eq!(eval("user['name'].length").as_deref(), Some("3"));
        assert_eq!(eval("user.name[0]").as_deref(), Some("B"));
        assert_eq!(eval("user.tags").as_deref(), Some("admin,dev"));
        assert_eq!(eval("count").as_deref(), Some("3"));
        assert_eq!(eval("nothing").as_deref(), Some("null"));
        assert_eq!(eval("user.age"), None);
        assert_eq!(eval("count.value"), None);
        assert_eq!(eval("nothing.value"), None);
        assert_eq!(eval("user.tags[5]"), None);
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(render_value(&json!(2.0)), "2");
        assert_eq!(render_value(&json!(2.5)), "2.5");
        assert_eq!(render_value(&json!(-7)), "-7");
        assert_eq!(render_value(&json!({"a": 1})), "[object Object]");
        assert_eq!(render_value(&json!([1, null, true])), "1,,true");
    }
}
