use super::expression::{ArithmeticOperation, Expression, ExpressionKind, Span};
use crate::{ChemEngError, ChemEngResult};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "src/equation/equation.pest"]
pub struct TemplateParser;

const TEMPLATE_PATTERN: &str = "an arithmetic expression over numbers, {placeholders} and named \
constants using + - * / and ** (or ^)";

/// Parse an equation template into an expression tree
pub fn parse_template(template: &str) -> ChemEngResult<Expression> {
    let mut pairs = TemplateParser::parse(Rule::template, template).map_err(|e| {
        let (line, col) = match e.line_col {
            pest::error::LineColLocation::Pos(position) => position,
            pest::error::LineColLocation::Span(start, _) => start,
        };
        ChemEngError::malformed(
            template,
            format!("{} (parse error at {}:{})", TEMPLATE_PATTERN, line, col),
        )
    })?;

    let template_pair = pairs
        .next()
        .ok_or_else(|| ChemEngError::Engine("Empty template".to_string()))?;
    let expression = template_pair
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::expression)
        .ok_or_else(|| ChemEngError::Engine("Template has no expression".to_string()))?;

    parse_expression(expression)
}

fn spanned(kind: ExpressionKind, pair: &Pair<Rule>) -> Expression {
    Expression::new(kind, Span::from_pest_span(pair.as_span()))
}

fn parse_expression(pair: Pair<Rule>) -> ChemEngResult<Expression> {
    let mut pairs = pair.clone().into_inner();
    let mut left = parse_term(
        pairs
            .next()
            .ok_or_else(|| ChemEngError::Engine("Missing left term in expression".to_string()))?,
    )?;

    while let Some(op_pair) = pairs.next() {
        let operation = match op_pair.as_rule() {
            Rule::add_plus => ArithmeticOperation::Add,
            Rule::add_minus => ArithmeticOperation::Subtract,
            _ => {
                return Err(ChemEngError::Engine(format!(
                    "Unexpected operator in expression: {:?}",
                    op_pair.as_rule()
                )))
            }
        };

        let right = parse_term(pairs.next().ok_or_else(|| {
            ChemEngError::Engine("Missing right term in expression".to_string())
        })?)?;

        let kind = ExpressionKind::Arithmetic(Box::new(left), operation, Box::new(right));
        left = spanned(kind, &pair);
    }

    Ok(left)
}

fn parse_term(pair: Pair<Rule>) -> ChemEngResult<Expression> {
    let mut pairs = pair.clone().into_inner();
    let mut left = parse_factor(
        pairs
            .next()
            .ok_or_else(|| ChemEngError::Engine("Missing left factor in term".to_string()))?,
    )?;

    while let Some(op_pair) = pairs.next() {
        let operation = match op_pair.as_rule() {
            Rule::mul_star => ArithmeticOperation::Multiply,
            Rule::mul_slash => ArithmeticOperation::Divide,
            _ => {
                return Err(ChemEngError::Engine(format!(
                    "Unexpected operator in term: {:?}",
                    op_pair.as_rule()
                )))
            }
        };

        let right = parse_factor(
            pairs
                .next()
                .ok_or_else(|| ChemEngError::Engine("Missing right factor in term".to_string()))?,
        )?;

        let kind = ExpressionKind::Arithmetic(Box::new(left), operation, Box::new(right));
        left = spanned(kind, &pair);
    }

    Ok(left)
}

fn parse_factor(pair: Pair<Rule>) -> ChemEngResult<Expression> {
    let mut pairs = pair.clone().into_inner();
    let first = pairs
        .next()
        .ok_or_else(|| ChemEngError::Engine("Empty factor".to_string()))?;

    match first.as_rule() {
        Rule::unary_minus => {
            let operand = parse_factor(pairs.next().ok_or_else(|| {
                ChemEngError::Engine("Missing operand after unary minus".to_string())
            })?)?;
            Ok(spanned(ExpressionKind::Negate(Box::new(operand)), &pair))
        }
        Rule::power => parse_power(first),
        other => Err(ChemEngError::Engine(format!(
            "Unexpected rule in factor: {:?}",
            other
        ))),
    }
}

// Right-associative: the exponent is itself a factor
fn parse_power(pair: Pair<Rule>) -> ChemEngResult<Expression> {
    let mut pairs = pair.clone().into_inner();
    let base = parse_primary(
        pairs
            .next()
            .ok_or_else(|| ChemEngError::Engine("Missing base in power".to_string()))?,
    )?;

    if let Some(op_pair) = pairs.next() {
        if op_pair.as_rule() == Rule::pow_caret {
            let exponent = parse_factor(pairs.next().ok_or_else(|| {
                ChemEngError::Engine("Missing exponent in power".to_string())
            })?)?;
            let kind = ExpressionKind::Arithmetic(
                Box::new(base),
                ArithmeticOperation::Power,
                Box::new(exponent),
            );
            return Ok(spanned(kind, &pair));
        }
    }

    Ok(base)
}

fn parse_primary(pair: Pair<Rule>) -> ChemEngResult<Expression> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| ChemEngError::Engine("Empty primary expression".to_string()))?;

    match inner.as_rule() {
        Rule::number => {
            let value = inner.as_str().parse::<f64>().map_err(|_| {
                ChemEngError::malformed(inner.as_str(), "a decimal number")
            })?;
            Ok(spanned(ExpressionKind::Number(value), &inner))
        }
        Rule::placeholder => {
            let name = identifier_of(&inner)?;
            Ok(spanned(ExpressionKind::Parameter(name), &inner))
        }
        Rule::constant => {
            let name = identifier_of(&inner)?;
            Ok(spanned(ExpressionKind::Constant(name), &inner))
        }
        Rule::expression => parse_expression(inner),
        other => Err(ChemEngError::Engine(format!(
            "Unexpected rule in primary expression: {:?}",
            other
        ))),
    }
}

fn identifier_of(pair: &Pair<Rule>) -> ChemEngResult<String> {
    pair.clone()
        .into_inner()
        .find(|inner| inner.as_rule() == Rule::identifier)
        .map(|inner| inner.as_str().to_string())
        .ok_or_else(|| ChemEngError::Engine(format!("Missing identifier in '{}'", pair.as_str())))
}
