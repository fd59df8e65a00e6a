//! Minimal selection-set syntax: `seoSettings { separator }`
//!
//! Only field names and nesting are supported. Commas are whitespace, as in
//! GraphQL. An outer pair of braces is optional.

use crate::{
    error::{Error, Result},
    field::is_valid_name,
};
use std::fmt;

/// A selected field and its sub-selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub children: Vec<Selection>,
}

impl Selection {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Selection>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.children.is_empty() {
            f.write_str(" { ")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(" }")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() || c == ',' => {
                chars.next();
            }
            '{' => {
                chars.next();
                tokens.push((offset, Token::Open));
            }
            '}' => {
                chars.next();
                tokens.push((offset, Token::Close));
            }
            c if c == '_' || c.is_ascii_alphanumeric() => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c == '_' || c.is_ascii_alphanumeric() {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if !is_valid_name(&name) {
                    return Err(Error::SelectionParse {
                        offset,
                        message: format!("invalid field name '{name}'"),
                    });
                }
                tokens.push((offset, Token::Name(name)));
            }
            other => {
                return Err(Error::SelectionParse {
                    offset,
                    message: format!("unexpected character '{other}'"),
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.len)
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::SelectionParse {
            offset: self.offset(),
            message: message.into(),
        }
    }

    /// `item*` up to a closing brace or the end of input
    fn set(&mut self) -> Result<Vec<Selection>> {
        let mut items = Vec::new();
        while let Some(Token::Name(name)) = self.peek() {
            let name = name.clone();
            self.pos += 1;
            let children = if self.peek() == Some(&Token::Open) {
                self.braced()?
            } else {
                Vec::new()
            };
            items.push(Selection { name, children });
        }
        Ok(items)
    }

    /// `'{' item+ '}'`
    fn braced(&mut self) -> Result<Vec<Selection>> {
        self.pos += 1;
        let items = self.set()?;
        if items.is_empty() {
            return Err(self.error("empty selection set"));
        }
        match self.peek() {
            Some(Token::Close) => {
                self.pos += 1;
                Ok(items)
            }
            Some(_) => Err(self.error("expected '}'")),
            None => Err(self.error("unclosed '{'")),
        }
    }
}

/// Parse a selection set
pub fn parse_selection(input: &str) -> Result<Vec<Selection>> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        len: input.len(),
    };

    let items = if parser.peek() == Some(&Token::Open) {
        parser.braced()?
    } else {
        parser.set()?
    };

    if parser.peek().is_some() {
        return Err(parser.error("unexpected token"));
    }
    if items.is_empty() {
        return Err(parser.error("empty selection"));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_selection() {
        let selection = parse_selection("seoSettings { separator }").unwrap();
        assert_eq!(
            selection,
            vec![Selection::with_children(
                "seoSettings",
                vec![Selection::leaf("separator")]
            )]
        );
    }

    #[test]
    fn test_outer_braces_and_commas() {
        let selection = parse_selection("{ seo { title, socialImage { databaseId } } }").unwrap();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].to_string(), "seo { title socialImage { databaseId } }");
    }

    #[test]
    fn test_multiple_top_level_fields() {
        let selection = parse_selection("title description").unwrap();
        assert_eq!(
            selection,
            vec![Selection::leaf("title"), Selection::leaf("description")]
        );
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "seo {", "seo { }", "seo }", "seo { title } }", "se-o", "9seo"] {
            let err = parse_selection(input).unwrap_err();
            assert!(
                matches!(err, Error::SelectionParse { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_error_offset_points_at_problem() {
        match parse_selection("seo { title } }").unwrap_err() {
            Error::SelectionParse { offset, .. } => assert_eq!(offset, 14),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
