//! The explain command: render one parsed criterion tree

use trialmatch_ast::{EligibilityFunction, FunctionParameter};
use trialmatch_parser::parse;

/// Configuration for the explain command
pub struct ExplainConfig {
    /// Criterion text to parse
    pub criterion: String,
}

pub fn explain(config: ExplainConfig) -> anyhow::Result<()> {
    let function = parse(&config.criterion)?;
    print_node(&function, 0);
    Ok(())
}

fn print_node(function: &EligibilityFunction, depth: usize) {
    let indent = "  ".repeat(depth);
    if function.parameters().is_empty() {
        println!("{}{}", indent, function.rule());
        return;
    }

    println!("{}{}", indent, function.rule());
    for parameter in function.parameters() {
        match parameter {
            FunctionParameter::Literal(text) => println!("{}  [{}]", indent, text),
            FunctionParameter::Function(child) => print_node(child, depth + 1),
        }
    }
}
