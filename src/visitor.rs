//! Translator that turns a host expression tree into flat filter maps.
//!
//! The result is in disjunctive normal form: every returned map is one
//! AND-branch of `property = value` constraints and the list as a whole is
//! their OR.

use crate::ast::{ComparisonExpression, ComparisonOperator, ComparisonValueType, Expression, LogicalExpression, LogicalOperator};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::trace;

/// One AND-branch: property path to stringified constant (`None` for null).
pub type FilterCandidate = BTreeMap<String, Option<String>>;

/// Configuration for the expression visitor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorConfig {
    /// Reject `Or` nodes instead of splitting them into separate candidates
    pub throw_on_or_logical_operator: bool,
}

/// Two candidates of an AND-branch disagree on the same key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("An item with the same key has already been added. Key: {key}")]
pub struct MergeConflict {
    pub key: String,
    pub existing: Option<String>,
    pub incoming: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("Expression type {0} is not supported")]
    UnsupportedExpressionType(String),
    #[error("Logical operator {0} is not supported")]
    UnsupportedLogicalOperator(LogicalOperator),
    #[error("Comparison operator {operator} is not supported for property {property}")]
    UnsupportedComparisonOperator {
        operator: ComparisonOperator,
        property: String,
    },
    #[error("Left expression in logical expression cannot be null")]
    NullLeftExpression,
    #[error("Right expression in logical expression cannot be null")]
    NullRightExpression,
    #[error("Left value in comparison expression cannot be null")]
    NullLeftValue,
    #[error("Value of left value in comparison expression cannot be null")]
    NullLeftValueContent,
    #[error("Right value in comparison expression cannot be null")]
    NullRightValue,
    #[error("Comparison value type {0} is not supported in left value of expression")]
    UnsupportedLeftValueType(ComparisonValueType),
    #[error("Comparison value type {0} is not supported in right value of expression")]
    UnsupportedRightValueType(ComparisonValueType),
    #[error("Expression contains mutually exclusive comparisons")]
    MutuallyExclusiveComparisons {
        #[source]
        source: MergeConflict,
    },
}

/// Recursive translator from expression trees to filter candidates
#[derive(Debug, Clone, Default)]
pub struct ExpressionVisitor {
    config: VisitorConfig,
}

impl ExpressionVisitor {
    pub fn new() -> Self {
        Self {
            config: VisitorConfig::default(),
        }
    }

    pub fn with_config(config: VisitorConfig) -> Self {
        Self { config }
    }

    pub fn throw_on_or_logical_operator(&self) -> bool {
        self.config.throw_on_or_logical_operator
    }

    /// Translate `expression` into an OR-list of AND-maps.
    ///
    /// Candidate order is deterministic: `Or` keeps left before right and
    /// `And` iterates the left side slowest.
    pub fn visit(&self, expression: &Expression) -> Result<Vec<FilterCandidate>, TranslateError> {
        let candidates = self.visit_node(expression)?;
        trace!(candidates = candidates.len(), "expression translated");
        Ok(candidates)
    }

    fn visit_node(&self, expression: &Expression) -> Result<Vec<FilterCandidate>, TranslateError> {
        match expression {
            Expression::Logical(logical) => self.visit_logical(logical),
            Expression::Comparison(comparison) => self.visit_comparison(comparison),
            Expression::Unknown { expression_type } => Err(
                TranslateError::UnsupportedExpressionType(expression_type.clone()),
            ),
        }
    }

    fn visit_logical(&self, expression: &LogicalExpression) -> Result<Vec<FilterCandidate>, TranslateError> {
        let left = expression
            .left_expression
            .as_deref()
            .ok_or(TranslateError::NullLeftExpression)?;
        let right = expression
            .right_expression
            .as_deref()
            .ok_or(TranslateError::NullRightExpression)?;

        let left_result = self.visit_node(left)?;
        let right_result = self.visit_node(right)?;

        match expression.operator {
            LogicalOperator::And => {
                let mut result = Vec::with_capacity(left_result.len() * right_result.len());
                for left_candidate in &left_result {
                    for right_candidate in &right_result {
                        let merged = merge_candidates(left_candidate, right_candidate)
                            .map_err(|source| TranslateError::MutuallyExclusiveComparisons { source })?;
                        result.push(merged);
                    }
                }
                Ok(result)
            }
            LogicalOperator::Or if self.config.throw_on_or_logical_operator => {
                Err(TranslateError::UnsupportedLogicalOperator(LogicalOperator::Or))
            }
            LogicalOperator::Or => {
                let mut result = left_result;
                result.extend(right_result);
                Ok(result)
            }
        }
    }

    fn visit_comparison(&self, expression: &ComparisonExpression) -> Result<Vec<FilterCandidate>, TranslateError> {
        if expression.operator != ComparisonOperator::Equal {
            let property = expression
                .left_value
                .as_ref()
                .and_then(|value| value.value.as_ref())
                .map(|value| value.to_string())
                .unwrap_or_default();
            return Err(TranslateError::UnsupportedComparisonOperator {
                operator: expression.operator,
                property,
            });
        }

        let left_value = expression
            .left_value
            .as_ref()
            .ok_or(TranslateError::NullLeftValue)?;
        if left_value.value_type != ComparisonValueType::Property {
            return Err(TranslateError::UnsupportedLeftValueType(left_value.value_type));
        }
        let property = left_value
            .value
            .as_ref()
            .ok_or(TranslateError::NullLeftValueContent)?;

        let right_value = expression
            .right_value
            .as_ref()
            .ok_or(TranslateError::NullRightValue)?;
        if right_value.value_type != ComparisonValueType::Constant {
            return Err(TranslateError::UnsupportedRightValueType(right_value.value_type));
        }

        let mut candidate = FilterCandidate::new();
        candidate.insert(
            property.to_string(),
            right_value.value.as_ref().map(|value| value.to_filter_value()),
        );
        Ok(vec![candidate])
    }
}

/// Union of two candidates; equal pairs collapse, differing values conflict.
fn merge_candidates(left: &FilterCandidate, right: &FilterCandidate) -> Result<FilterCandidate, MergeConflict> {
    let mut merged = left.clone();
    for (key, value) in right {
        match merged.get(key) {
            Some(existing) if existing != value => {
                return Err(MergeConflict {
                    key: key.clone(),
                    existing: existing.clone(),
                    incoming: value.clone(),
                });
            }
            Some(_) => {}
            None => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(merged)
}
