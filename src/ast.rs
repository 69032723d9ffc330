//! 查询表达式树, 由宿主查询引擎提供给连接器
//!
//! The tree mirrors the host contract: values and children the host may leave
//! out are `Option`, so malformed trees can be represented and rejected by the
//! visitor instead of being ruled out by construction.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 表达式树的节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// 叶子节点: `property = constant`
    Comparison(ComparisonExpression),
    /// 逻辑运算节点 (AND / OR)
    Logical(LogicalExpression),
    /// 宿主语法中存在、但翻译器不处理的节点类型
    Unknown { expression_type: String },
}

impl Expression {
    /// `path = value` with a property on the left and a constant on the right.
    pub fn property_equals(path: impl Into<String>, value: impl Into<Constant>) -> Self {
        Expression::Comparison(ComparisonExpression {
            operator: ComparisonOperator::Equal,
            left_value: Some(ComparisonValue::property(path)),
            right_value: Some(ComparisonValue::constant(value)),
        })
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::Logical(LogicalExpression::new(LogicalOperator::And, left, right))
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Logical(LogicalExpression::new(LogicalOperator::Or, left, right))
    }

    /// The host's name for this node kind.
    pub fn expression_type(&self) -> &str {
        match self {
            Expression::Comparison(_) => "Comparison",
            Expression::Logical(_) => "Logical",
            Expression::Unknown { expression_type } => expression_type,
        }
    }
}

/// 比较表达式, 例如 `Foo.Id = 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonExpression {
    pub operator: ComparisonOperator,
    pub left_value: Option<ComparisonValue>,
    pub right_value: Option<ComparisonValue>,
}

/// 逻辑表达式, 独占其左右子树
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left_expression: Option<Box<Expression>>,
    pub right_expression: Option<Box<Expression>>,
}

impl LogicalExpression {
    pub fn new(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Self {
            operator,
            left_expression: Some(Box::new(left)),
            right_expression: Some(Box::new(right)),
        }
    }
}

/// 比较运算中的一侧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonValue {
    pub value_type: ComparisonValueType,
    pub value: Option<Constant>,
}

impl ComparisonValue {
    pub fn property(path: impl Into<String>) -> Self {
        Self {
            value_type: ComparisonValueType::Property,
            value: Some(Constant::String(path.into())),
        }
    }

    pub fn constant(value: impl Into<Constant>) -> Self {
        Self {
            value_type: ComparisonValueType::Constant,
            value: Some(value.into()),
        }
    }

    /// A constant whose value is null, e.g. `ParentId = null`.
    pub fn null_constant() -> Self {
        Self {
            value_type: ComparisonValueType::Constant,
            value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonValueType {
    Property,
    Constant,
}

impl fmt::Display for ComparisonValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonValueType::Property => f.write_str("Property"),
            ComparisonValueType::Constant => f.write_str("Constant"),
        }
    }
}

/// 比较运算符 (宿主定义的完整集合, 翻译器只支持 `Equal`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComparisonOperator::Equal => "Equal",
            ComparisonOperator::NotEqual => "NotEqual",
            ComparisonOperator::Less => "Less",
            ComparisonOperator::LessOrEqual => "LessOrEqual",
            ComparisonOperator::Greater => "Greater",
            ComparisonOperator::GreaterOrEqual => "GreaterOrEqual",
            ComparisonOperator::Like => "Like",
            ComparisonOperator::NotLike => "NotLike",
            ComparisonOperator::IsNull => "IsNull",
            ComparisonOperator::IsNotNull => "IsNotNull",
        };
        f.write_str(name)
    }
}

/// 逻辑运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => f.write_str("And"),
            LogicalOperator::Or => f.write_str("Or"),
        }
    }
}

/// 常量值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    /// An instant with a known offset.
    DateTime(DateTime<FixedOffset>),
    /// A wall-clock timestamp without offset information.
    LocalDateTime(NaiveDateTime),
}

/// Fractional digits are always nine so every instant parses back unchanged.
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";

impl Constant {
    /// The string a filter map carries for this constant.
    pub fn to_filter_value(&self) -> String {
        match self {
            Constant::DateTime(value) => value.to_rfc3339_opts(SecondsFormat::Nanos, true),
            Constant::LocalDateTime(value) => value.format(LOCAL_DATE_TIME_FORMAT).to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::String(value) => f.write_str(value),
            Constant::Integer(value) => write!(f, "{}", value),
            Constant::Decimal(value) => write!(f, "{}", value),
            Constant::Boolean(value) => write!(f, "{}", value),
            Constant::DateTime(value) => write!(f, "{}", value),
            Constant::LocalDateTime(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Constant::String(value.to_string())
    }
}

impl From<String> for Constant {
    fn from(value: String) -> Self {
        Constant::String(value)
    }
}

impl From<i64> for Constant {
    fn from(value: i64) -> Self {
        Constant::Integer(value)
    }
}

impl From<i32> for Constant {
    fn from(value: i32) -> Self {
        Constant::Integer(i64::from(value))
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Constant::Decimal(value)
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Constant::Boolean(value)
    }
}

impl From<DateTime<FixedOffset>> for Constant {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Constant::DateTime(value)
    }
}

impl From<DateTime<Utc>> for Constant {
    fn from(value: DateTime<Utc>) -> Self {
        Constant::DateTime(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for Constant {
    fn from(value: NaiveDateTime) -> Self {
        Constant::LocalDateTime(value)
    }
}
