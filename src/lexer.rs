//! 过滤表达式的词法分析器

use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    /// 输入字符串中的当前位置（字节索引）
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// 返回当前位置的字符，不推进位置
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// 返回下一个位置的字符，不推进位置
    fn peek_next(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    /// 推进位置一个字符并返回该字符
    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    /// 跳过空白字符
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn token(&self, kind: TokenKind<'a>, start: usize) -> Token<'a> {
        Token { kind, span: Span::new(start, self.position) }
    }

    /// 读取整数或小数，可带前导负号（已被调用者消费）
    fn read_number(&mut self, start: usize) -> Token<'a> {
        let mut is_decimal = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump();
            } else if c == '.' && !is_decimal && self.peek_next().is_some_and(|n| n.is_ascii_digit()) {
                is_decimal = true;
                self.bump();
            } else {
                break;
            }
        }
        let text = &self.input[start..self.position];
        let kind = if is_decimal {
            text.parse::<f64>().map(TokenKind::Decimal).unwrap_or(TokenKind::Illegal)
        } else {
            text.parse::<i64>().map(TokenKind::Integer).unwrap_or(TokenKind::Illegal)
        };
        self.token(kind, start)
    }

    /// 读取双引号包围的字符串字面量
    /// 注意：开始的引号已经被调用者消费; 缺少结束引号时返回 Illegal
    fn read_string(&mut self, start: usize) -> Token<'a> {
        let content_start = self.position;
        while let Some(c) = self.peek() {
            if c == '"' {
                let content = &self.input[content_start..self.position];
                self.bump(); // 消费结束引号
                return self.token(TokenKind::String(content), start);
            }
            self.bump();
        }
        self.token(TokenKind::Illegal, start)
    }

    /// 读取 `@` 之后的日期时间文本, 直到空白或括号
    fn read_date_time(&mut self, start: usize) -> Token<'a> {
        let content_start = self.position;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            self.bump();
        }
        let content = &self.input[content_start..self.position];
        if content.is_empty() {
            return self.token(TokenKind::Illegal, start);
        }
        self.token(TokenKind::DateTime(content), start)
    }

    /// 读取标识符或关键字
    /// 标识符可以包含字母、数字、点和下划线, 例如 `Organization.ParentId`
    fn read_identifier(&mut self, start: usize) -> Token<'a> {
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '.' || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let literal = &self.input[start..self.position];
        self.token(match_keyword(literal), start)
    }
}

fn match_keyword(s: &str) -> TokenKind<'_> {
    match s.to_ascii_lowercase().as_str() {
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "is" => TokenKind::Is,
        "like" => TokenKind::Like,
        "null" => TokenKind::Null,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        _ => TokenKind::Identifier(s),
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let start = self.position;

        let c = self.bump()?; // 到达输入末尾

        let token = match c {
            '=' => self.token(TokenKind::Eq, start),
            '(' => self.token(TokenKind::LParen, start),
            ')' => self.token(TokenKind::RParen, start),
            '<' => {
                if self.peek() == Some('=') {
                    self.bump();
                    self.token(TokenKind::Lte, start)
                } else {
                    self.token(TokenKind::Lt, start)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.bump();
                    self.token(TokenKind::Gte, start)
                } else {
                    self.token(TokenKind::Gt, start)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.bump();
                    self.token(TokenKind::NotEq, start)
                } else {
                    self.token(TokenKind::Illegal, start)
                }
            }
            '-' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.read_number(start),
            '"' => self.read_string(start),
            '@' => self.read_date_time(start),
            c if c.is_ascii_digit() => self.read_number(start),
            c if c.is_alphabetic() || c == '_' => self.read_identifier(start),
            _ => self.token(TokenKind::Illegal, start),
        };
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind<'_>> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_comparison() {
        assert_eq!(
            kinds("Foo.Id = 1"),
            vec![
                TokenKind::Identifier("Foo.Id"),
                TokenKind::Eq,
                TokenKind::Integer(1),
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("and OR Not is LIKE null True false Name"),
            vec![
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Is,
                TokenKind::Like,
                TokenKind::Null,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Identifier("Name"),
            ]
        );
    }

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(
            kinds(r#"12345 -7 2.5 "hello world""#),
            vec![
                TokenKind::Integer(12345),
                TokenKind::Integer(-7),
                TokenKind::Decimal(2.5),
                TokenKind::String("hello world"),
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("= != > < >= <="),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Gte,
                TokenKind::Lte,
            ]
        );
    }

    #[test]
    fn test_date_time_literal() {
        assert_eq!(
            kinds("(ModifiedOn = @2017-03-09T14:05:07Z)"),
            vec![
                TokenKind::LParen,
                TokenKind::Identifier("ModifiedOn"),
                TokenKind::Eq,
                TokenKind::DateTime("2017-03-09T14:05:07Z"),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        assert_eq!(kinds(r#""open"#), vec![TokenKind::Illegal]);
    }

    #[test]
    fn test_spans_cover_source_text() {
        let tokens: Vec<_> = Lexer::new("Name = \"x\"").collect();
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 6));
        assert_eq!(tokens[2].span, Span::new(7, 10));
    }
}
