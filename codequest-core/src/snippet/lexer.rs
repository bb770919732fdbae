use crate::snippet::SnippetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Int(i64),
    Str(String),
    Ident(String),

    // Keywords
    Let,
    Fn,
    Return,
    For,
    In,
    While,
    If,
    Else,
    True,
    False,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semi,
    DotDot,

    // Operators
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Bang,

    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Split source text into tokens. Always ends with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SnippetError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(&ch) = chars.peek() {
        match ch {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' => {
                let mut digits = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '_' {
                        if d != '_' {
                            digits.push(d);
                        }
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = digits.parse::<i64>().map_err(|_| SnippetError::Syntax {
                    line,
                    message: format!("number {} is too large", digits),
                })?;
                tokens.push(Token {
                    kind: TokenKind::Int(value),
                    line,
                });
            }
            '"' | '\'' => {
                let quote = ch;
                chars.next();
                let start_line = line;
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => break,
                        Some('\\') => match chars.next() {
                            Some('n') => text.push('\n'),
                            Some('t') => text.push('\t'),
                            Some(other) => text.push(other),
                            None => {
                                return Err(SnippetError::UnterminatedString { line: start_line })
                            }
                        },
                        Some('\n') => {
                            return Err(SnippetError::UnterminatedString { line: start_line })
                        }
                        Some(c) => text.push(c),
                        None => return Err(SnippetError::UnterminatedString { line: start_line }),
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Str(text),
                    line,
                });
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&w) = chars.peek() {
                    if w.is_alphanumeric() || w == '_' {
                        word.push(w);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: keyword(&word).unwrap_or(TokenKind::Ident(word)),
                    line,
                });
            }
            _ => {
                chars.next();
                let next = chars.peek().copied();
                let (kind, pair) = match (ch, next) {
                    ('/', Some('/')) => {
                        // Line comment
                        for c in chars.by_ref() {
                            if c == '\n' {
                                line += 1;
                                break;
                            }
                        }
                        continue;
                    }
                    ('.', Some('.')) => (TokenKind::DotDot, true),
                    ('=', Some('=')) => (TokenKind::EqEq, true),
                    ('!', Some('=')) => (TokenKind::NotEq, true),
                    ('<', Some('=')) => (TokenKind::Le, true),
                    ('>', Some('=')) => (TokenKind::Ge, true),
                    ('&', Some('&')) => (TokenKind::AndAnd, true),
                    ('|', Some('|')) => (TokenKind::OrOr, true),
                    ('(', _) => (TokenKind::LParen, false),
                    (')', _) => (TokenKind::RParen, false),
                    ('{', _) => (TokenKind::LBrace, false),
                    ('}', _) => (TokenKind::RBrace, false),
                    (',', _) => (TokenKind::Comma, false),
                    (';', _) => (TokenKind::Semi, false),
                    ('=', _) => (TokenKind::Assign, false),
                    ('+', _) => (TokenKind::Plus, false),
                    ('-', _) => (TokenKind::Minus, false),
                    ('*', _) => (TokenKind::Star, false),
                    ('/', _) => (TokenKind::Slash, false),
                    ('%', _) => (TokenKind::Percent, false),
                    ('<', _) => (TokenKind::Lt, false),
                    ('>', _) => (TokenKind::Gt, false),
                    ('!', _) => (TokenKind::Bang, false),
                    (other, _) => return Err(SnippetError::UnexpectedChar { line, ch: other }),
                };
                if pair {
                    chars.next();
                }
                tokens.push(Token { kind, line });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
    });
    Ok(tokens)
}

fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "let" => TokenKind::Let,
        "fn" => TokenKind::Fn,
        "return" => TokenKind::Return,
        "for" => TokenKind::For,
        "in" => TokenKind::In,
        "while" => TokenKind::While,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_let_statement() {
        assert_eq!(
            kinds("let x = 42;"),
            vec![
                TokenKind::Let,
                TokenKind::Ident("x".to_string()),
                TokenKind::Assign,
                TokenKind::Int(42),
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("0..3 == != <= >= && ||"),
            vec![
                TokenKind::Int(0),
                TokenKind::DotDot,
                TokenKind::Int(3),
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(
            kinds(r#""a\"b" 'c'"#),
            vec![
                TokenKind::Str("a\"b".to_string()),
                TokenKind::Str("c".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_and_lines() {
        let tokens = tokenize("// hello\nlet y = 1;").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Let);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            tokenize("print(\"oops);"),
            Err(SnippetError::UnterminatedString { line: 1 })
        );
    }

    #[test]
    fn test_unexpected_char() {
        assert_eq!(
            tokenize("let a = 1 # 2;"),
            Err(SnippetError::UnexpectedChar { line: 1, ch: '#' })
        );
    }
}
