//! Composite combinators over the evaluation lattice
//!
//! Children are evaluated independently against the same patient snapshot
//! and their evaluations combined afterward. Combinators only ever produce
//! the four lattice results; the placeholder results pass through from
//! leaves but are never created here.

mod and;
mod not;
mod or;
mod warn_if;

pub use and::And;
pub use not::Not;
pub use or::Or;
pub use warn_if::WarnIf;
