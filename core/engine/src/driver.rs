//! FILENAME: core/engine/src/driver.rs
//! PURPOSE: Recursive-descent driver that turns one formula into a tree.
//! CONTEXT: The driver owns the scanner for a single parse call. It decides
//! which kind of primary comes next, emits atoms into the active
//! ParseContext (shunting-yard), and finally builds the tree in the engine's
//! arena. List elements are parsed in a fresh context that is pushed onto an
//! explicit stack and popped as soon as the element is done, then evaluated
//! on the spot.
//!
//! GRAMMAR:
//!   formula    --> assignment | expression
//!   assignment --> IDENTIFIER "=" expression          // "=" not followed by "="
//!   expression --> primary ( OPERATOR primary )*
//!   primary    --> "(" expression ")"
//!             |  ["-"] DIGIT+ ["." DIGIT+]
//!             |  FUNCTION [ "(" expression ("," expression){arity-1} ")" ]
//!                                                   // name not followed by a letter or "_"
//!             |  IDENTIFIER                          // must already be bound
//!             |  "[" expression ("," expression)* "]"
//!
//! After a primary, the next character must start an operator or close the
//! innermost enclosure: "," or ")" in an argument list, ")" in a group,
//! "," or "]" in a list literal. Anything else is "Expected operator."

use formula_parser::registry::{match_function, match_operator};
use formula_parser::{
    Arena, Atom, AtomKind, FunctionDescriptor, ListValue, NodeId, ParseContext, ParseError,
    ParseErrorKind, ParseResult, Scanner, Value,
};

use crate::evaluator::{prime_lists, Evaluator};
use crate::options::EngineOptions;
use crate::variables::VariableStore;

/// The bracket the driver is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Enclosure {
    Group,
    Arguments,
    List,
}

/// Outcome of a successful parse call.
#[derive(Debug)]
pub struct ParsedFormula {
    pub root: NodeId,
    /// Name on the left of `=` when the formula was an assignment.
    pub assignment: Option<String>,
    /// Longest list seen while parsing, directly or through a variable.
    pub broadcast_width: usize,
}

pub struct Driver<'e> {
    scanner: Scanner,
    arena: &'e mut Arena,
    variables: &'e VariableStore,
    options: &'e EngineOptions,
    context: ParseContext,
    saved: Vec<ParseContext>,
    enclosures: Vec<Enclosure>,
    broadcast_width: usize,
}

impl<'e> Driver<'e> {
    pub fn new(
        text: &str,
        arena: &'e mut Arena,
        variables: &'e VariableStore,
        options: &'e EngineOptions,
    ) -> Self {
        Driver {
            scanner: Scanner::new(text),
            arena,
            variables,
            options,
            context: ParseContext::new(),
            saved: Vec::new(),
            enclosures: Vec::new(),
            broadcast_width: 0,
        }
    }

    /// Parses the whole text as an assignment or an expression.
    pub fn parse(mut self) -> ParseResult<ParsedFormula> {
        let assignment = self.parse_assignment_target();
        self.parse_expression()?;

        if self.scanner.has_more() {
            return Err(self.error(ParseErrorKind::ExpectedOperator));
        }

        let context = std::mem::take(&mut self.context);
        let root = context
            .finish(self.arena)
            .ok_or_else(|| self.error(ParseErrorKind::ExpectedExpression))?;

        Ok(ParsedFormula {
            root,
            assignment,
            broadcast_width: self.broadcast_width,
        })
    }

    /// Speculatively reads `name =`. On any mismatch the scanner is rewound
    /// so the text can be parsed as a plain expression.
    fn parse_assignment_target(&mut self) -> Option<String> {
        self.scanner.skip_whitespace();
        while self.scanner.is_identifier_char() {
            self.scanner.accumulate(1);
        }

        if !self.scanner.pending().is_empty() {
            self.scanner.skip_whitespace();
            if self.scanner.is_equals() && self.scanner.peek(1) != Some('=') {
                self.scanner.skip();
                return Some(self.scanner.take_pending());
            }
        }

        self.scanner.rewind();
        None
    }

    fn parse_expression(&mut self) -> ParseResult<()> {
        loop {
            self.parse_primary()?;
            self.scanner.skip_whitespace();

            if !self.scanner.has_more() || self.at_closer() {
                return Ok(());
            }

            let Some((descriptor, len)) = match_operator(
                self.scanner.input(),
                self.scanner.position(),
                self.options.match_policy,
            ) else {
                return Err(self.error(ParseErrorKind::ExpectedOperator));
            };
            self.scanner.accumulate(len);
            self.emit(AtomKind::Operator(descriptor));
        }
    }

    fn parse_primary(&mut self) -> ParseResult<()> {
        self.scanner.skip_whitespace();

        if self.scanner.is_open_paren() {
            return self.parse_group();
        }
        if self.scanner.is_digit() || self.scanner.is_minus() {
            return self.parse_number();
        }
        if let Some((descriptor, len)) = match_function(
            self.scanner.input(),
            self.scanner.position(),
            self.options.match_policy,
        ) {
            // `PIx` or `lnx` is a longer identifier, not a function
            if !self.scanner.is_identifier_char_at(len) {
                return self.parse_function(descriptor, len);
            }
        }
        if self.scanner.is_identifier_char() {
            return self.parse_variable();
        }
        if self.scanner.is_open_bracket() {
            return self.parse_list();
        }

        Err(self.error(ParseErrorKind::ExpectedExpression))
    }

    fn parse_group(&mut self) -> ParseResult<()> {
        self.enter(Enclosure::Group)?;
        self.scanner.accumulate(1);
        self.emit(AtomKind::LeftParen);

        self.parse_expression()?;

        self.expect_close_paren()?;
        self.leave();
        Ok(())
    }

    /// Reads a number literal. A leading '-' is part of the literal.
    fn parse_number(&mut self) -> ParseResult<()> {
        if self.scanner.is_minus() {
            self.scanner.accumulate(1);
        }
        if !self.scanner.is_digit() {
            return Err(self.error(ParseErrorKind::MissingDigits));
        }
        while self.scanner.is_digit() {
            self.scanner.accumulate(1);
        }

        if self.scanner.is_dot() {
            self.scanner.accumulate(1);
            if !self.scanner.is_digit() {
                return Err(self.error(ParseErrorKind::MissingFraction));
            }
            while self.scanner.is_digit() {
                self.scanner.accumulate(1);
            }
        }

        let value = self
            .scanner
            .pending()
            .parse::<f64>()
            .map_err(|_| self.error(ParseErrorKind::MissingDigits))?;
        self.emit(AtomKind::Number(value));
        Ok(())
    }

    fn parse_function(
        &mut self,
        descriptor: &'static FunctionDescriptor,
        len: usize,
    ) -> ParseResult<()> {
        self.scanner.accumulate(len);
        self.emit(AtomKind::Function(descriptor));

        if descriptor.arity == 0 {
            return Ok(());
        }
        if !self.scanner.is_open_paren() {
            return Err(self.error(ParseErrorKind::ExpectedOpeningParenthesis));
        }

        self.enter(Enclosure::Arguments)?;
        self.scanner.accumulate(1);
        self.emit(AtomKind::LeftParen);

        for index in 0..descriptor.arity {
            self.parse_expression()?;
            if index + 1 == descriptor.arity {
                break;
            }
            if !self.scanner.is_comma() {
                return Err(self.error(ParseErrorKind::ExpectedComma));
            }
            self.scanner.accumulate(1);
            self.emit(AtomKind::Comma);
        }

        self.expect_close_paren()?;
        self.leave();
        Ok(())
    }

    /// Reads a variable reference. The name must already be bound; any list
    /// it reaches is rewound and widens the broadcast.
    fn parse_variable(&mut self) -> ParseResult<()> {
        while self.scanner.is_identifier_char() {
            self.scanner.accumulate(1);
        }

        let name = self.scanner.pending().to_string();
        let Some(variable) = self.variables.lookup(&name) else {
            return Err(self.error(ParseErrorKind::UndefinedVariable(name)));
        };

        let target = variable.root();
        let width = prime_lists(&*self.arena, target);
        self.broadcast_width = self.broadcast_width.max(width);

        self.emit(AtomKind::Variable { name, target });
        Ok(())
    }

    /// Reads a list literal. Every element is a full expression that is
    /// evaluated to a scalar right away; its tree is discarded.
    fn parse_list(&mut self) -> ParseResult<()> {
        self.enter(Enclosure::List)?;
        self.scanner.skip();

        let mut list = ListValue::default();
        loop {
            self.scanner.skip_whitespace();
            list.push(self.parse_list_element()?);
            if !self.scanner.is_comma() {
                break;
            }
            self.scanner.skip();
        }

        if !self.scanner.is_close_bracket() {
            return Err(self.error(ParseErrorKind::ExpectedClosingBracket));
        }
        self.scanner.skip();
        self.leave();

        self.broadcast_width = self.broadcast_width.max(list.len());
        self.emit(AtomKind::List(list));
        Ok(())
    }

    fn parse_list_element(&mut self) -> ParseResult<Value> {
        let mark = self.arena.len();

        self.saved.push(std::mem::take(&mut self.context));
        let parsed = self.parse_expression();
        let context = std::mem::replace(&mut self.context, self.saved.pop().unwrap_or_default());
        parsed?;

        let root = context
            .finish(self.arena)
            .ok_or_else(|| self.error(ParseErrorKind::ExpectedExpression))?;
        let value = Evaluator::new(&*self.arena).evaluate(root);
        self.arena.truncate(mark);
        Ok(value)
    }

    fn expect_close_paren(&mut self) -> ParseResult<()> {
        if !self.scanner.is_close_paren() {
            return Err(self.error(ParseErrorKind::ExpectedClosingParenthesis));
        }
        self.scanner.accumulate(1);
        self.emit(AtomKind::RightParen);
        Ok(())
    }

    /// Whether the current character closes the innermost enclosure
    /// (or separates its items).
    fn at_closer(&self) -> bool {
        match self.enclosures.last() {
            Some(Enclosure::Group) => self.scanner.is_close_paren(),
            Some(Enclosure::Arguments) => {
                self.scanner.is_close_paren() || self.scanner.is_comma()
            }
            Some(Enclosure::List) => self.scanner.is_close_bracket() || self.scanner.is_comma(),
            None => false,
        }
    }

    fn enter(&mut self, enclosure: Enclosure) -> ParseResult<()> {
        let limit = self.options.max_nesting_depth;
        if self.enclosures.len() >= limit {
            return Err(self.error(ParseErrorKind::NestingTooDeep(limit)));
        }
        self.enclosures.push(enclosure);
        Ok(())
    }

    fn leave(&mut self) {
        self.enclosures.pop();
    }

    /// Pushes an atom built from the pending text into the active context.
    fn emit(&mut self, kind: AtomKind) {
        let text = self.scanner.take_pending();
        self.context.push(Atom::new(text, kind));
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.scanner.error(kind)
    }
}
