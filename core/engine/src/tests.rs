//! FILENAME: core/engine/src/tests.rs
//! PURPOSE: Consolidated unit tests for the engine crate.

use crate::engine::Engine;
use crate::evaluator::{prime_lists, Evaluator};
use crate::options::EngineOptions;
use crate::variables::VariableStore;
use formula_parser::{MatchPolicy, NodeKind, ParseError, ParseErrorKind, Value};

fn eval(text: &str) -> Vec<Value> {
    let mut engine = Engine::new();
    engine.parse(text).unwrap();
    engine.value().unwrap()
}

fn eval_number(text: &str) -> f64 {
    match eval(text).as_slice() {
        [Value::Number(n)] => *n,
        other => panic!("expected one number for {:?}, got {:?}", text, other),
    }
}

fn parse_error(text: &str) -> ParseError {
    Engine::new().parse(text).unwrap_err()
}

fn numbers(values: &[Value]) -> Vec<f64> {
    values.iter().map(Value::as_number).collect()
}

// ========================================
// DRIVER TESTS - NUMBERS
// ========================================

#[test]
fn driver_parses_integer_and_decimal() {
    assert_eq!(eval_number("42"), 42.0);
    assert_eq!(eval_number("3.25"), 3.25);
}

#[test]
fn driver_fuses_leading_minus_into_literal() {
    assert_eq!(eval_number("-2 + 5"), 3.0);
    assert_eq!(eval_number("2 - -3"), 5.0);
    assert_eq!(eval_number("2--3"), 5.0);
    assert_eq!(eval_number("2*-3"), -6.0);
}

#[test]
fn driver_rejects_number_without_digits() {
    assert_eq!(parse_error("-").kind, ParseErrorKind::MissingDigits);
    assert_eq!(parse_error("2 * -x").kind, ParseErrorKind::MissingDigits);
}

#[test]
fn driver_rejects_number_without_fraction() {
    let err = parse_error("1.");
    assert_eq!(err.kind, ParseErrorKind::MissingFraction);
    assert_eq!(err.parsed, "1.");
    assert_eq!(err.found, "");
}

// ========================================
// DRIVER TESTS - OPERATORS
// ========================================

#[test]
fn driver_applies_precedence() {
    assert_eq!(eval_number("2+3*4"), 14.0);
    assert_eq!(eval_number("2*3+4"), 10.0);
    assert_eq!(eval_number("2+3^2*2"), 20.0);
    assert_eq!(eval_number("7 % 3 + 1"), 2.0);
}

#[test]
fn driver_applies_associativity() {
    assert_eq!(eval_number("8-3-2"), 3.0);
    assert_eq!(eval_number("100/10/5"), 2.0);
    assert_eq!(eval_number("2^3^2"), 512.0);
}

#[test]
fn driver_comparisons_and_logic() {
    assert_eq!(eval("1 < 2 AND 3 > 2"), vec![Value::Boolean(true)]);
    assert_eq!(eval("1 + 2 == 3"), vec![Value::Boolean(true)]);
    assert_eq!(eval("2 IS 3"), vec![Value::Boolean(false)]);
    assert_eq!(eval("1 != 2 OR 0"), vec![Value::Boolean(true)]);
    assert_eq!(eval("0 OR 5"), vec![Value::Number(5.0)]);
    assert_eq!(eval("2 AND 3"), vec![Value::Number(3.0)]);
    assert_eq!(eval_number("(1 < 2) + 1"), 2.0);
}

#[test]
fn driver_matches_two_character_operators_with_longest_policy() {
    assert_eq!(eval("3 >= 3"), vec![Value::Boolean(true)]);
    assert_eq!(eval("4 <= 3"), vec![Value::Boolean(false)]);
}

#[test]
fn driver_first_accepting_policy_shadows_longer_operators() {
    let mut engine = Engine::with_options(EngineOptions {
        match_policy: MatchPolicy::FirstAccepting,
        ..EngineOptions::default()
    });
    let err = engine.parse("3 >= 3").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.parsed, "3 >");
    assert_eq!(err.found, "=");

    engine.parse("3 > 2").unwrap();
    assert_eq!(engine.value(), Some(vec![Value::Boolean(true)]));
}

#[test]
fn driver_requires_operator_between_operands() {
    let err = parse_error("1 2");
    assert_eq!(err.kind, ParseErrorKind::ExpectedOperator);
    assert_eq!(err.to_string(), "Expected operator. Parsed \"1 \". Got \"2\"");
}

#[test]
fn driver_rejects_stray_closers_at_top_level() {
    assert_eq!(parse_error("1 + 2)").kind, ParseErrorKind::ExpectedOperator);
    assert_eq!(parse_error("1]").kind, ParseErrorKind::ExpectedOperator);
    assert_eq!(parse_error("1, 2").kind, ParseErrorKind::ExpectedOperator);
}

#[test]
fn driver_rejects_empty_input() {
    assert_eq!(parse_error("").kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(parse_error("   ").kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(parse_error("1 +").kind, ParseErrorKind::ExpectedExpression);
}

// ========================================
// DRIVER TESTS - GROUPS AND FUNCTIONS
// ========================================

#[test]
fn driver_groups_override_precedence() {
    assert_eq!(eval_number("(2+3)*4"), 20.0);
    assert_eq!(eval_number("((1 + 1) * (2 + 2))"), 8.0);
}

#[test]
fn driver_reports_unclosed_group() {
    assert_eq!(
        parse_error("(1 + 2").kind,
        ParseErrorKind::ExpectedClosingParenthesis
    );
    assert_eq!(parse_error("()").kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(parse_error("(1, 2)").kind, ParseErrorKind::ExpectedOperator);
}

#[test]
fn driver_calls_functions() {
    assert_eq!(eval_number("sqrt(9)"), 3.0);
    assert_eq!(eval_number("sqrt(16) + 1"), 5.0);
    assert_eq!(eval_number("2 * sqrt(4) ^ 2"), 8.0);
    assert_eq!(eval_number("sqrt(sqrt(16))"), 2.0);
    assert!((eval_number("log(8, 2)") - 3.0).abs() < 1e-12);
    assert!((eval_number("PI") - std::f64::consts::PI).abs() < 1e-12);
    assert!((eval_number("E * 2") - 2.0 * std::f64::consts::E).abs() < 1e-12);
    assert_eq!(eval_number("cos(0) + sin(0) + ln(1)"), 1.0);
}

#[test]
fn driver_enforces_function_arity() {
    assert_eq!(parse_error("log(8)").kind, ParseErrorKind::ExpectedComma);
    assert_eq!(
        parse_error("log(8, 2, 3)").kind,
        ParseErrorKind::ExpectedClosingParenthesis
    );
    assert_eq!(
        parse_error("sqrt(1, 2)").kind,
        ParseErrorKind::ExpectedClosingParenthesis
    );
    assert_eq!(
        parse_error("sqrt 9").kind,
        ParseErrorKind::ExpectedOpeningParenthesis
    );
}

// ========================================
// DRIVER TESTS - LISTS
// ========================================

#[test]
fn driver_evaluates_list_elements_eagerly() {
    let mut engine = Engine::new();
    engine.parse("[1 + 1, 2 * 3, (4)]").unwrap();

    let root = engine.expression_tree_root().unwrap();
    let NodeKind::List(list) = &engine.node(root).unwrap().kind else {
        panic!("root should be a list");
    };
    assert_eq!(numbers(list.items()), vec![2.0, 6.0, 4.0]);
    // Element trees are discarded, only the list node remains
    assert_eq!(engine.arena().len(), 1);
}

#[test]
fn driver_list_literal_broadcasts() {
    assert_eq!(numbers(&eval("[1, 2, 3] * 2")), vec![2.0, 4.0, 6.0]);
}

#[test]
fn driver_nested_list_element_takes_first_value() {
    assert_eq!(numbers(&eval("[[1, 2], 3]")), vec![1.0, 3.0]);
}

#[test]
fn driver_reports_unclosed_list() {
    assert_eq!(
        parse_error("[1, 2").kind,
        ParseErrorKind::ExpectedClosingBracket
    );
    assert_eq!(parse_error("[]").kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(parse_error("[1)]").kind, ParseErrorKind::ExpectedOperator);
}

#[test]
fn driver_limits_nesting_depth() {
    let mut engine = Engine::with_options(EngineOptions {
        max_nesting_depth: 2,
        ..EngineOptions::default()
    });
    engine.parse("((1))").unwrap();
    engine.parse("[(1)]").unwrap();
    assert_eq!(
        engine.parse("(((1)))").unwrap_err().kind,
        ParseErrorKind::NestingTooDeep(2)
    );
    assert_eq!(
        engine.parse("sqrt((sqrt(1)))").unwrap_err().kind,
        ParseErrorKind::NestingTooDeep(2)
    );
}

// ========================================
// DRIVER TESTS - ASSIGNMENT
// ========================================

#[test]
fn driver_assignment_binds_and_sets_root() {
    let mut engine = Engine::new();
    engine.parse("total = 2 + 3").unwrap();
    assert!(engine.variables().contains("total"));
    assert_eq!(engine.value(), Some(vec![Value::Number(5.0)]));
}

#[test]
fn driver_assignment_requires_single_equals() {
    let mut engine = Engine::new();
    engine.parse("x = 1").unwrap();
    engine.parse("x == 1").unwrap();
    assert_eq!(engine.value(), Some(vec![Value::Boolean(true)]));
    assert_eq!(engine.variables().len(), 1);
}

#[test]
fn driver_assignment_tolerates_whitespace() {
    let mut engine = Engine::new();
    engine.parse("  rate_a   =   4  ").unwrap();
    engine.parse("rate_a*2").unwrap();
    assert_eq!(engine.value(), Some(vec![Value::Number(8.0)]));
}

#[test]
fn driver_assignment_without_expression_fails() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.parse("x = ").unwrap_err().kind,
        ParseErrorKind::ExpectedExpression
    );
    assert!(engine.variables().is_empty());
}

#[test]
fn driver_reads_function_prefixed_names_as_variables() {
    let mut engine = Engine::new();
    engine.parse("Energy = 1").unwrap();
    engine.parse("PIx = 2").unwrap();
    engine.parse("lnx = 3").unwrap();
    engine.parse("Energy + PIx * lnx").unwrap();
    assert_eq!(engine.value(), Some(vec![Value::Number(7.0)]));

    engine.parse("PI + ln(E)").unwrap();
    let value = engine.value().unwrap()[0].as_number();
    assert!((value - (std::f64::consts::PI + 1.0)).abs() < 1e-12);
}

#[test]
fn driver_reports_undefined_function_prefixed_name() {
    assert_eq!(
        parse_error("sqrtx + 1").kind,
        ParseErrorKind::UndefinedVariable("sqrtx".to_string())
    );
}

#[test]
fn driver_reports_undefined_variable() {
    let err = parse_error("y + 1");
    assert_eq!(err.kind, ParseErrorKind::UndefinedVariable("y".to_string()));
    assert_eq!(
        err.to_string(),
        "Variable y is not defined. Parsed \"y\". Got \" \""
    );
}

#[test]
fn driver_identifiers_stop_at_digits() {
    let mut engine = Engine::new();
    engine.parse("x = 1").unwrap();
    assert_eq!(parse_error("x1").kind, ParseErrorKind::UndefinedVariable("x".to_string()));
    assert_eq!(
        engine.parse("x1").unwrap_err().kind,
        ParseErrorKind::ExpectedOperator
    );
}

// ========================================
// EVALUATOR TESTS
// ========================================

#[test]
fn evaluator_broadcast_evaluates_at_least_once() {
    let mut engine = Engine::new();
    engine.parse("1 + 1").unwrap();
    let root = engine.expression_tree_root().unwrap();
    let evaluator = Evaluator::new(engine.arena());
    assert_eq!(evaluator.evaluate_broadcast(root, 0), vec![Value::Number(2.0)]);
    assert_eq!(evaluator.evaluate_broadcast(root, 2).len(), 2);
}

#[test]
fn evaluator_follows_variables_on_every_access() {
    let mut engine = Engine::new();
    engine.parse("a = [1, 2]").unwrap();
    engine.parse("b = a * 10").unwrap();
    let b = engine.variables().lookup("b").unwrap();

    let evaluator = Evaluator::new(engine.arena());
    prime_lists(engine.arena(), b.root());
    assert_eq!(evaluator.evaluate(b.root()), Value::Number(10.0));
    assert_eq!(evaluator.evaluate(b.root()), Value::Number(20.0));
}

#[test]
fn evaluator_handles_long_flat_chain() {
    let text = vec!["1"; 50_000].join("+");
    let mut engine = Engine::new();
    engine.parse(&text).unwrap();
    assert_eq!(engine.value(), Some(vec![Value::Number(50_000.0)]));
}

#[test]
fn evaluator_keeps_argument_order() {
    assert!((eval_number("log(2 ^ 6, 1 + 1) - 6")).abs() < 1e-12);
    assert_eq!(numbers(&eval("[1, 2] - [10, 20]")), vec![-9.0, -18.0]);
}

#[test]
fn prime_lists_resets_cursors_through_variables() {
    let mut engine = Engine::new();
    engine.parse("a = [1, 2, 3]").unwrap();
    engine.parse("b = a + [5, 6]").unwrap();
    engine.value();

    let a = engine.variables().lookup("a").unwrap();
    let b = engine.variables().lookup("b").unwrap();
    let NodeKind::List(list) = &engine.node(a.root()).unwrap().kind else {
        panic!("a should be bound to a list");
    };
    assert_ne!(list.cursor(), 0);

    assert_eq!(prime_lists(engine.arena(), b.root()), 3);
    assert_eq!(list.cursor(), 0);
}

#[test]
fn prime_lists_without_lists_is_zero() {
    let mut engine = Engine::new();
    engine.parse("1 + sqrt(4)").unwrap();
    let root = engine.expression_tree_root().unwrap();
    assert_eq!(prime_lists(engine.arena(), root), 0);
}

// ========================================
// VARIABLE STORE TESTS
// ========================================

#[test]
fn variable_store_rebinds_names() {
    let mut engine = Engine::new();
    engine.parse("1").unwrap();
    engine.parse("2").unwrap();
    let trees = engine.expression_trees().to_vec();

    let mut store = VariableStore::new();
    store.bind("x", trees[0]);
    store.bind("x", trees[1]);
    store.bind("a", trees[0]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.lookup("x").map(|v| v.root()), Some(trees[1]));
    assert_eq!(store.names(), vec!["a", "x"]);
    assert!(store.lookup("missing").is_none());
}

// ========================================
// TREE DUMP TESTS
// ========================================

#[test]
fn tree_dump_renders_outline() {
    let mut engine = Engine::new();
    engine.parse("2 + sqrt(9)").unwrap();
    assert_eq!(engine.print_tree(), "+\n·2\n·sqrt\n··9");
}

#[test]
fn tree_dump_renders_lists_and_variables() {
    let mut engine = Engine::new();
    engine.parse("k = 3").unwrap();
    engine.parse("[1, 2] * k").unwrap();
    assert_eq!(engine.print_tree(), "*\n·[1, 2]\n·k");
}

#[test]
fn tree_dump_handles_long_flat_chain() {
    let text = vec!["2"; 2_000].join("*");
    let mut engine = Engine::new();
    engine.parse(&text).unwrap();

    let dump = engine.print_tree();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 3_999);
    assert_eq!(lines[0], "*");
    assert_eq!(lines[1], "·*");
    assert_eq!(lines[lines.len() - 1], "·2");
}

#[test]
fn tree_dump_is_empty_before_parse() {
    assert_eq!(Engine::new().print_tree(), "");
}

// ========================================
// OPTIONS TESTS
// ========================================

#[test]
fn options_load_from_json() {
    let options: EngineOptions =
        serde_json::from_str(r#"{"matchPolicy": "firstAccepting", "maxNestingDepth": 8}"#)
            .unwrap();
    assert_eq!(options.match_policy, MatchPolicy::FirstAccepting);
    assert_eq!(options.max_nesting_depth, 8);

    let defaults: EngineOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, EngineOptions::default());
    assert_eq!(defaults.match_policy, MatchPolicy::Longest);
}
