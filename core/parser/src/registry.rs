//! FILENAME: core/parser/src/registry.rs
//! PURPOSE: The closed catalog of operator and function descriptors.
//! CONTEXT: Descriptors are immutable and defined once. The driver finds them
//! by symbol through the prefix tries built here; the evaluator applies their
//! value rules to already-evaluated child values.
//!
//! PRECEDENCE (higher binds tighter):
//!   12  functions
//!   11  ^                  (right-associative)
//!   10  *  /  %
//!    9  +  -
//!    8  >  <  >=  <=
//!    7  ==  !=  IS
//!    6  AND
//!    5  OR

use once_cell::sync::Lazy;

use crate::ast::Value;
use crate::trie::{MatchPolicy, SymbolTrie};

/// Functions sit above every operator while waiting on the operator stack.
pub const FUNCTION_PRECEDENCE: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

pub type BinaryRule = fn(Value, Value) -> Value;
pub type FunctionRule = fn(&[Value]) -> Value;

#[derive(Debug)]
pub struct OperatorDescriptor {
    pub symbol: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    rule: BinaryRule,
}

impl OperatorDescriptor {
    const fn new(
        symbol: &'static str,
        precedence: u8,
        associativity: Associativity,
        rule: BinaryRule,
    ) -> Self {
        OperatorDescriptor {
            symbol,
            precedence,
            associativity,
            rule,
        }
    }

    pub fn apply(&self, lhs: Value, rhs: Value) -> Value {
        (self.rule)(lhs, rhs)
    }
}

#[derive(Debug)]
pub struct FunctionDescriptor {
    pub symbol: &'static str,
    /// Number of parameters. Zero-arity functions are written without parentheses.
    pub arity: usize,
    rule: FunctionRule,
}

impl FunctionDescriptor {
    const fn new(symbol: &'static str, arity: usize, rule: FunctionRule) -> Self {
        FunctionDescriptor {
            symbol,
            arity,
            rule,
        }
    }

    pub fn precedence(&self) -> u8 {
        FUNCTION_PRECEDENCE
    }

    /// Applies the rule to `arity` evaluated parameters, in source order.
    pub fn apply(&self, params: &[Value]) -> Value {
        debug_assert_eq!(params.len(), self.arity, "{} arity mismatch", self.symbol);
        (self.rule)(params)
    }
}

use Associativity::{Left, Right};

pub static OPERATORS: [OperatorDescriptor; 15] = [
    OperatorDescriptor::new("^", 11, Right, power),
    OperatorDescriptor::new("*", 10, Left, multiply),
    OperatorDescriptor::new("/", 10, Left, divide),
    OperatorDescriptor::new("%", 10, Left, modulo),
    OperatorDescriptor::new("+", 9, Left, plus),
    OperatorDescriptor::new("-", 9, Left, minus),
    OperatorDescriptor::new(">", 8, Left, greater_than),
    OperatorDescriptor::new("<", 8, Left, less_than),
    OperatorDescriptor::new(">=", 8, Left, greater_equal),
    OperatorDescriptor::new("<=", 8, Left, less_equal),
    OperatorDescriptor::new("==", 7, Left, equals),
    OperatorDescriptor::new("!=", 7, Left, not_equals),
    OperatorDescriptor::new("IS", 7, Left, equals),
    OperatorDescriptor::new("AND", 6, Left, and),
    OperatorDescriptor::new("OR", 5, Left, or),
];

pub static FUNCTIONS: [FunctionDescriptor; 7] = [
    FunctionDescriptor::new("PI", 0, pi),
    FunctionDescriptor::new("E", 0, euler),
    FunctionDescriptor::new("sqrt", 1, sqrt),
    FunctionDescriptor::new("log", 2, log),
    FunctionDescriptor::new("ln", 1, ln),
    FunctionDescriptor::new("sin", 1, sin),
    FunctionDescriptor::new("cos", 1, cos),
];

static OPERATOR_TRIE: Lazy<SymbolTrie<&'static OperatorDescriptor>> =
    Lazy::new(|| OPERATORS.iter().map(|d| (d.symbol, d)).collect());

static FUNCTION_TRIE: Lazy<SymbolTrie<&'static FunctionDescriptor>> =
    Lazy::new(|| FUNCTIONS.iter().map(|d| (d.symbol, d)).collect());

/// Matches an operator symbol starting at `position`.
/// Returns the descriptor and the number of characters it spans.
pub fn match_operator(
    input: &[char],
    position: usize,
    policy: MatchPolicy,
) -> Option<(&'static OperatorDescriptor, usize)> {
    OPERATOR_TRIE.find(input, position, policy)
}

/// Matches a function name starting at `position`.
pub fn match_function(
    input: &[char],
    position: usize,
    policy: MatchPolicy,
) -> Option<(&'static FunctionDescriptor, usize)> {
    FUNCTION_TRIE.find(input, position, policy)
}

/// Exact lookup by symbol.
pub fn operator(symbol: &str) -> Option<&'static OperatorDescriptor> {
    OPERATORS.iter().find(|d| d.symbol == symbol)
}

/// Exact lookup by name.
pub fn function(symbol: &str) -> Option<&'static FunctionDescriptor> {
    FUNCTIONS.iter().find(|d| d.symbol == symbol)
}

// ========================================
// OPERATOR RULES
// ========================================

fn power(lhs: Value, rhs: Value) -> Value {
    Value::Number(lhs.as_number().powf(rhs.as_number()))
}

fn multiply(lhs: Value, rhs: Value) -> Value {
    Value::Number(lhs.as_number() * rhs.as_number())
}

fn divide(lhs: Value, rhs: Value) -> Value {
    Value::Number(lhs.as_number() / rhs.as_number())
}

// Remainder keeps the sign of the dividend.
fn modulo(lhs: Value, rhs: Value) -> Value {
    Value::Number(lhs.as_number() % rhs.as_number())
}

fn plus(lhs: Value, rhs: Value) -> Value {
    Value::Number(lhs.as_number() + rhs.as_number())
}

fn minus(lhs: Value, rhs: Value) -> Value {
    Value::Number(lhs.as_number() - rhs.as_number())
}

fn greater_than(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(lhs.as_number() > rhs.as_number())
}

fn less_than(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(lhs.as_number() < rhs.as_number())
}

fn greater_equal(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(lhs.as_number() >= rhs.as_number())
}

fn less_equal(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(lhs.as_number() <= rhs.as_number())
}

fn equals(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(lhs.loose_eq(&rhs))
}

fn not_equals(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(!lhs.loose_eq(&rhs))
}

// AND and OR yield one of their operands, not a coerced boolean.
fn and(lhs: Value, rhs: Value) -> Value {
    if lhs.is_truthy() {
        rhs
    } else {
        lhs
    }
}

fn or(lhs: Value, rhs: Value) -> Value {
    if lhs.is_truthy() {
        lhs
    } else {
        rhs
    }
}

// ========================================
// FUNCTION RULES
// ========================================

fn pi(_: &[Value]) -> Value {
    Value::Number(std::f64::consts::PI)
}

fn euler(_: &[Value]) -> Value {
    Value::Number(std::f64::consts::E)
}

fn sqrt(p: &[Value]) -> Value {
    Value::Number(p[0].as_number().sqrt())
}

/// log(x, base). A falsy base leaves the natural logarithm undivided.
fn log(p: &[Value]) -> Value {
    let divisor = if p[1].is_truthy() {
        p[1].as_number().ln()
    } else {
        1.0
    };
    Value::Number(p[0].as_number().ln() / divisor)
}

fn ln(p: &[Value]) -> Value {
    Value::Number(p[0].as_number().ln())
}

fn sin(p: &[Value]) -> Value {
    Value::Number(p[0].as_number().sin())
}

fn cos(p: &[Value]) -> Value {
    Value::Number(p[0].as_number().cos())
}
