//! Rule-to-function resolution
//!
//! The resolver wires a parsed criterion tree to a single
//! [`EvaluationFunction`] once at startup. Composite rules become their
//! combinators with children wired recursively; leaf rules dispatch through
//! a registry of creators keyed by [`EligibilityRule`]. Any failure here is
//! a fatal configuration error, never a per-patient outcome.

use crate::combinators::{And, Not, Or, WarnIf};
use crate::functions;
use crate::{Evaluation, EvaluationFunction};
use std::collections::HashMap;
use std::sync::Arc;
use trialmatch_ast::{EligibilityFunction, EligibilityRule, FunctionParameter};
use trialmatch_diagnostics::{Result, TrialError, TRM0200, TRM0201, TRM0203};
use trialmatch_model::PatientRecord;

/// Builds an evaluation function for a leaf rule from its literal parameters
pub type FunctionCreator =
    Arc<dyn Fn(&[FunctionParameter]) -> Result<Box<dyn EvaluationFunction>> + Send + Sync>;

/// Registry mapping leaf rules to their evaluation function creators
///
/// Read-only after startup; safe for unsynchronized concurrent reads during
/// matching.
#[derive(Default)]
pub struct FunctionResolver {
    creators: HashMap<EligibilityRule, FunctionCreator>,
}

impl FunctionResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver preloaded with the reference predicates
    pub fn with_reference_functions() -> Self {
        let mut resolver = Self::new();
        functions::register_reference_functions(&mut resolver);
        resolver
    }

    /// Register a creator for a leaf rule
    pub fn register<F>(&mut self, rule: EligibilityRule, creator: F)
    where
        F: Fn(&[FunctionParameter]) -> Result<Box<dyn EvaluationFunction>>
            + Send
            + Sync
            + 'static,
    {
        self.creators.insert(rule, Arc::new(creator));
    }

    /// Register a placeholder that evaluates to `NOT_IMPLEMENTED`, keeping
    /// configurations loadable while a predicate is still being built
    pub fn register_not_implemented(&mut self, rule: EligibilityRule) {
        log::debug!("registering placeholder evaluation for rule {}", rule);
        self.register(rule, |_params| Ok(Box::new(NotImplementedFunction)));
    }

    /// Whether a creator is registered for the rule
    pub fn has_creator(&self, rule: EligibilityRule) -> bool {
        self.creators.contains_key(&rule)
    }

    /// Wire a parsed criterion tree into a single evaluation function
    pub fn resolve(&self, function: &EligibilityFunction) -> Result<Box<dyn EvaluationFunction>> {
        if function.rule().is_composite() {
            self.resolve_composite(function)
        } else {
            self.resolve_leaf(function)
        }
    }

    fn resolve_composite(
        &self,
        function: &EligibilityFunction,
    ) -> Result<Box<dyn EvaluationFunction>> {
        let rule = function.rule();

        if function.parameters().iter().any(|p| p.as_literal().is_some()) {
            return Err(TrialError::resolution(
                TRM0203,
                "composite rule holds literal parameters",
                rule.name(),
            ));
        }

        let children: Vec<Box<dyn EvaluationFunction>> = function
            .children()
            .map(|child| self.resolve(child))
            .collect::<Result<_>>()?;

        match rule {
            EligibilityRule::And => {
                require_at_least_one(rule, children.len())?;
                Ok(Box::new(And::new(children)))
            }
            EligibilityRule::Or => {
                require_at_least_one(rule, children.len())?;
                Ok(Box::new(Or::new(children)))
            }
            EligibilityRule::Not => {
                let child = exactly_one(rule, children)?;
                Ok(Box::new(Not::new(child)))
            }
            EligibilityRule::WarnIf => {
                let child = exactly_one(rule, children)?;
                Ok(Box::new(WarnIf::new(child)))
            }
            _ => unreachable!("is_composite covers exactly the four combinators"),
        }
    }

    fn resolve_leaf(&self, function: &EligibilityFunction) -> Result<Box<dyn EvaluationFunction>> {
        let rule = function.rule();

        if function.parameters().iter().any(|p| p.as_function().is_some()) {
            return Err(TrialError::resolution(
                TRM0203,
                "leaf rule holds nested criteria",
                rule.name(),
            ));
        }

        let creator = self.creators.get(&rule).ok_or_else(|| {
            TrialError::resolution(TRM0200, "no evaluation function registered", rule.name())
        })?;

        creator(function.parameters())
    }
}

fn require_at_least_one(rule: EligibilityRule, count: usize) -> Result<()> {
    if count == 0 {
        return Err(TrialError::resolution(
            TRM0201,
            "requires at least one nested criterion",
            rule.name(),
        ));
    }
    Ok(())
}

fn exactly_one(
    rule: EligibilityRule,
    mut children: Vec<Box<dyn EvaluationFunction>>,
) -> Result<Box<dyn EvaluationFunction>> {
    if children.len() != 1 {
        return Err(TrialError::resolution(
            TRM0201,
            format!("requires exactly one nested criterion, got {}", children.len()),
            rule.name(),
        ));
    }
    Ok(children.remove(0))
}

/// Placeholder for rules without a wired predicate
struct NotImplementedFunction;

impl EvaluationFunction for NotImplementedFunction {
    fn evaluate(&self, _record: &PatientRecord) -> Evaluation {
        Evaluation::not_implemented()
    }
}
