//! 过滤表达式的语法分析器
//!
//! ## 语法
//!
//! ```text
//! expression := and_expr (OR and_expr)*
//! and_expr   := primary (AND primary)*
//! primary    := "(" expression ")" | comparison
//! comparison := path op value
//!             | path [NOT] LIKE value
//!             | path IS [NOT] NULL
//! op         := "=" | "!=" | ">" | "<" | ">=" | "<="
//! value      := "string" | 123 | 1.5 | true | false | null | @2017-03-09T14:05:07Z
//! ```
//!
//! ## 语法优先级（从高到低）
//!
//! 1. **括号分组** `(expression)`
//! 2. **比较操作** `Foo.Id = 1`
//! 3. **AND操作** 左结合
//! 4. **OR操作** 左结合
//!
//! ## 解析示例
//!
//! ```text
//! Foo.Id = 1
//! Name = "Acme" AND (ParentId = 7 OR ParentId = null)
//! ModifiedOn = @2017-03-09T14:05:07Z
//! ```

use crate::ast::{ComparisonExpression, ComparisonOperator, ComparisonValue, Constant, Expression};
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};
use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    position: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Option<Span>,
}

impl ParseError {
    fn new(message: String, span: Option<Span>) -> Self {
        Self { message, span }
    }

    fn at_position(message: String, span: Span) -> Self {
        Self { message, span: Some(span) }
    }
}

/// 词法分析 + 语法分析的便捷入口
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    Parser::new(&tokens).parse()
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens, position: 0 }
    }

    /// 返回当前 token，不推进位置
    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.position)
    }

    /// 返回当前 token 并推进位置
    fn advance(&mut self) -> Option<&'a Token<'a>> {
        let tokens = self.tokens;
        let token = tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// 期望特定类型的 token 并推进，否则返回错误
    fn expect(&mut self, expected: TokenKind) -> Result<&'a Token<'a>, ParseError> {
        let tokens = self.tokens;
        match tokens.get(self.position) {
            Some(token) if std::mem::discriminant(&token.kind) == std::mem::discriminant(&expected) => {
                self.position += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::at_position(
                format!("Expected {:?}, found {:?}", expected, token.kind),
                token.span,
            )),
            None => Err(ParseError::new(
                format!("Expected {:?}, but reached end of input", expected),
                None,
            )),
        }
    }

    /// 检查当前 token 是否匹配给定类型
    fn match_token(&self, kind: &TokenKind) -> bool {
        self.peek()
            .is_some_and(|token| std::mem::discriminant(&token.kind) == std::mem::discriminant(kind))
    }

    /// 解析整个输入; 表达式之后不允许多余的 token
    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        let expression = self.parse_or_expression()?;
        if let Some(token) = self.peek() {
            return Err(ParseError::at_position(
                format!("Unexpected token: {:?}", token.kind),
                token.span,
            ));
        }
        Ok(expression)
    }

    /// 解析OR表达式 (最低优先级)
    fn parse_or_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_and_expression()?;

        while self.match_token(&TokenKind::Or) {
            self.advance(); // 消费 OR
            let right = self.parse_and_expression()?;
            left = Expression::or(left, right);
        }

        Ok(left)
    }

    /// 解析AND表达式
    fn parse_and_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_primary_expression()?;

        while self.match_token(&TokenKind::And) {
            self.advance(); // 消费 AND
            let right = self.parse_primary_expression()?;
            left = Expression::and(left, right);
        }

        Ok(left)
    }

    /// 解析基础表达式: 分组或比较
    fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        if self.match_token(&TokenKind::LParen) {
            self.advance(); // 消费 (
            let expression = self.parse_or_expression()?;
            self.expect(TokenKind::RParen)?;
            return Ok(expression);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        let path_token = self.expect(TokenKind::Identifier(""))?;
        let TokenKind::Identifier(path) = path_token.kind else {
            return Err(ParseError::at_position(
                "Expected property path".to_string(),
                path_token.span,
            ));
        };
        let left_value = Some(ComparisonValue::property(path));

        let Some(token) = self.advance() else {
            return Err(ParseError::new(
                format!("Expected comparison operator after {}", path),
                None,
            ));
        };
        let span = token.span;
        let operator = match &token.kind {
            TokenKind::Eq => ComparisonOperator::Equal,
            TokenKind::NotEq => ComparisonOperator::NotEqual,
            TokenKind::Gt => ComparisonOperator::Greater,
            TokenKind::Lt => ComparisonOperator::Less,
            TokenKind::Gte => ComparisonOperator::GreaterOrEqual,
            TokenKind::Lte => ComparisonOperator::LessOrEqual,
            TokenKind::Like => ComparisonOperator::Like,
            TokenKind::Not => {
                self.expect(TokenKind::Like)?;
                ComparisonOperator::NotLike
            }
            TokenKind::Is => {
                let operator = if self.match_token(&TokenKind::Not) {
                    self.advance(); // 消费 NOT
                    ComparisonOperator::IsNotNull
                } else {
                    ComparisonOperator::IsNull
                };
                self.expect(TokenKind::Null)?;
                return Ok(Expression::Comparison(ComparisonExpression {
                    operator,
                    left_value,
                    right_value: None,
                }));
            }
            other => {
                return Err(ParseError::at_position(
                    format!("Expected comparison operator, found {:?}", other),
                    span,
                ));
            }
        };

        let right_value = self.parse_value()?;
        Ok(Expression::Comparison(ComparisonExpression {
            operator,
            left_value,
            right_value: Some(right_value),
        }))
    }

    fn parse_value(&mut self) -> Result<ComparisonValue, ParseError> {
        let Some(token) = self.advance() else {
            return Err(ParseError::new("Expected literal value".to_string(), None));
        };
        let constant = match &token.kind {
            TokenKind::String(s) => Constant::String(s.to_string()),
            TokenKind::Integer(n) => Constant::Integer(*n),
            TokenKind::Decimal(n) => Constant::Decimal(*n),
            TokenKind::True => Constant::Boolean(true),
            TokenKind::False => Constant::Boolean(false),
            TokenKind::Null => return Ok(ComparisonValue::null_constant()),
            TokenKind::DateTime(text) => parse_date_time(text).ok_or_else(|| {
                ParseError::at_position(format!("Invalid date/time literal: {}", text), token.span)
            })?,
            other => {
                return Err(ParseError::at_position(
                    format!("Expected literal value, found {:?}", other),
                    token.span,
                ));
            }
        };
        Ok(ComparisonValue::constant(constant))
    }
}

/// 带偏移量的 RFC 3339 时间优先, 否则按本地时间解析
fn parse_date_time(text: &str) -> Option<Constant> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(Constant::DateTime(value));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(Constant::LocalDateTime)
}
