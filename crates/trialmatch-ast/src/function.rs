//! Criterion function trees
//!
//! A parsed criterion is a tree of `EligibilityFunction` nodes. Composite
//! nodes hold nested functions as parameters; leaf nodes hold literal
//! strings. The mixed parameter list maps to the `FunctionParameter` variant.

use crate::EligibilityRule;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A single parameter of an eligibility function: either a literal string
/// (leaf rules) or a nested function (composite rules)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum FunctionParameter {
    /// Literal parameter of a leaf rule
    Literal(String),
    /// Nested criterion of a composite rule
    Function(Box<EligibilityFunction>),
}

impl FunctionParameter {
    /// Get the literal text, if this parameter is a literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Function(_) => None,
        }
    }

    /// Get the nested function, if this parameter is one
    pub fn as_function(&self) -> Option<&EligibilityFunction> {
        match self {
            Self::Literal(_) => None,
            Self::Function(function) => Some(&**function),
        }
    }
}

/// Parameter list storage; composite nodes carry one or two children and
/// leaf nodes rarely carry more than one literal
pub type FunctionParameters = SmallVec<[FunctionParameter; 2]>;

/// One node of a parsed criterion tree
///
/// Invariant, enforced by the parser: composite-rule nodes hold exclusively
/// `Function` parameters (one or two of them); leaf-rule nodes hold
/// exclusively `Literal` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityFunction {
    rule: EligibilityRule,
    parameters: FunctionParameters,
}

impl EligibilityFunction {
    /// Create a leaf node from literal parameters
    pub fn leaf(rule: EligibilityRule, parameters: impl IntoIterator<Item = String>) -> Self {
        Self {
            rule,
            parameters: parameters
                .into_iter()
                .map(FunctionParameter::Literal)
                .collect(),
        }
    }

    /// Create a composite node from child functions
    pub fn composite(
        rule: EligibilityRule,
        children: impl IntoIterator<Item = EligibilityFunction>,
    ) -> Self {
        Self {
            rule,
            parameters: children
                .into_iter()
                .map(|child| FunctionParameter::Function(Box::new(child)))
                .collect(),
        }
    }

    /// The rule this node applies
    pub fn rule(&self) -> EligibilityRule {
        self.rule
    }

    /// The ordered parameter list
    pub fn parameters(&self) -> &[FunctionParameter] {
        &self.parameters
    }

    /// Nested functions of a composite node
    pub fn children(&self) -> impl Iterator<Item = &EligibilityFunction> {
        self.parameters.iter().filter_map(FunctionParameter::as_function)
    }

    /// Literal parameters of a leaf node
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().filter_map(FunctionParameter::as_literal)
    }
}

impl fmt::Display for EligibilityFunction {
    /// Renders the node back in the criterion grammar
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rule.is_composite() {
            write!(f, "{}(", self.rule)?;
            for (i, child) in self.children().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")
        } else if self.parameters.is_empty() {
            write!(f, "{}", self.rule)
        } else {
            write!(f, "{}[", self.rule)?;
            for (i, literal) in self.literals().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                f.write_str(literal)?;
            }
            write!(f, "]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_accessors() {
        let function =
            EligibilityFunction::leaf(EligibilityRule::HasSufficientLabValue, ["200".to_string()]);
        assert_eq!(function.rule(), EligibilityRule::HasSufficientLabValue);
        assert_eq!(function.literals().collect::<Vec<_>>(), vec!["200"]);
        assert_eq!(function.children().count(), 0);
    }

    #[test]
    fn test_composite_accessors() {
        let function = EligibilityFunction::composite(
            EligibilityRule::And,
            [
                EligibilityFunction::leaf(EligibilityRule::IsMale, []),
                EligibilityFunction::leaf(EligibilityRule::HasMetastaticCancer, []),
            ],
        );
        assert_eq!(function.children().count(), 2);
        assert_eq!(function.literals().count(), 0);
    }

    #[test]
    fn test_display_round_trips_grammar() {
        let bare = EligibilityFunction::leaf(EligibilityRule::IsMale, []);
        assert_eq!(bare.to_string(), "IS_MALE");

        let with_param =
            EligibilityFunction::leaf(EligibilityRule::IsAtLeastXYearsOld, ["18".to_string()]);
        assert_eq!(with_param.to_string(), "IS_AT_LEAST_X_YEARS_OLD[18]");

        let nested = EligibilityFunction::composite(
            EligibilityRule::Not,
            [EligibilityFunction::composite(
                EligibilityRule::Or,
                [
                    EligibilityFunction::leaf(EligibilityRule::HasActiveInfection, []),
                    EligibilityFunction::leaf(EligibilityRule::HasKnownHivInfection, []),
                ],
            )],
        );
        assert_eq!(
            nested.to_string(),
            "NOT(OR(HAS_ACTIVE_INFECTION, HAS_KNOWN_HIV_INFECTION))"
        );
    }
}
