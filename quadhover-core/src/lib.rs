#![warn(missing_docs)]
//! Core traits and types shared by quadhover environments.
//!
//! The crate is independent of any particular simulator. It defines how an
//! environment ([`Env`]) is driven by a [`Policy`], what one interaction step
//! produces ([`Step`]), how per-step diagnostics are reported ([`record`]),
//! and how episodes are rolled out for evaluation ([`DefaultEvaluator`],
//! [`util::eval_with_recorder`]).
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

pub use error::HoverError;
