//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for formula engine integration tests.

use formula_engine::{Engine, EngineOptions, ParseError, Value};

/// Test harness wrapping one engine across several formulas.
pub struct TestHarness {
    pub engine: Engine,
}

impl TestHarness {
    /// Create a new test harness with an empty engine.
    pub fn new() -> Self {
        TestHarness {
            engine: Engine::new(),
        }
    }

    pub fn with_options(options: EngineOptions) -> Self {
        TestHarness {
            engine: Engine::with_options(options),
        }
    }

    /// Create a harness with a few bound scalars and lists.
    pub fn with_sample_variables() -> Self {
        let mut harness = Self::new();
        harness.define("rate", "0.5");
        harness.define("count", "4");
        harness.define("prices", "[10, 20, 30]");
        harness.define("flags", "[1, 0]");
        harness
    }

    /// Bind `name` to `formula`, panicking on a parse error.
    pub fn define(&mut self, name: &str, formula: &str) {
        let text = format!("{} = {}", name, formula);
        self.engine
            .parse(&text)
            .unwrap_or_else(|err| panic!("failed to bind {}: {}", name, err));
    }

    /// Parse a formula and evaluate it once.
    pub fn eval(&mut self, formula: &str) -> Vec<Value> {
        self.engine
            .parse(formula)
            .unwrap_or_else(|err| panic!("failed to parse {:?}: {}", formula, err));
        self.engine.value().expect("a parsed formula has a value")
    }

    /// Parse and evaluate, returning the results as numbers.
    pub fn eval_numbers(&mut self, formula: &str) -> Vec<f64> {
        self.eval(formula).iter().map(Value::as_number).collect()
    }

    /// Evaluate the current formula again without reparsing.
    pub fn reevaluate_numbers(&self) -> Vec<f64> {
        self.engine
            .value()
            .expect("a formula was parsed")
            .iter()
            .map(Value::as_number)
            .collect()
    }

    pub fn parse_err(&mut self, formula: &str) -> ParseError {
        match self.engine.parse(formula) {
            Ok(()) => panic!("expected {:?} to fail", formula),
            Err(err) => err,
        }
    }
}

/// Assert two floats are within a small tolerance.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} to be close to {}",
        actual,
        expected
    );
}
