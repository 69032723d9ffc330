pub mod ast;
pub mod config;
pub mod domain;
pub mod lexer;
pub mod metadata;
pub mod parser;
pub mod token;
pub mod visitor;

pub use ast::Expression;
pub use parser::parse_expression;
pub use visitor::{ExpressionVisitor, FilterCandidate, TranslateError};
