//! Event-driven simulation of Boolean Delay Equation (BDE) systems.
//!
//! A BDE system evolves a set of Boolean-valued variables whose present
//! state is a function of their own and each other's state at one or more
//! fixed delays in the past. Rather than sampling on a fixed time grid, the
//! engine in this crate discovers exactly those instants at which some
//! variable's state can change (switch times), evaluates the transition
//! function only there, and represents each variable's trajectory as a
//! sparse step function.
//!
//! The pieces:
//!
//! - [`tolerance::ToleranceComparator`]: combined absolute/relative
//!   floating-point comparisons, threaded explicitly through every
//!   operation that compares times.
//! - [`series::BooleanSeries`]: a Boolean step-function time series with
//!   the construct/evaluate/cut/merge/threshold operations.
//! - [`forcing::ForcingView`]: a read-only, search-hint-caching adapter
//!   over a [`series::BooleanSeries`] for exogenous forcing input.
//! - [`model::Transition`]: the trait a user transition function
//!   implements; any matching closure satisfies it.
//! - [`engine::DelayEngine`]: the solver. Seeds candidate switch times from
//!   history and forcing data, evaluates the transition function at each,
//!   and commits real switches.
//! - [`adapters`]: plotting/printing helpers built on the public series
//!   API.

pub mod adapters;
pub mod engine;
pub mod error;
pub mod forcing;
pub mod model;
pub mod series;
pub mod tolerance;

pub use engine::DelayEngine;
pub use error::{EngineError, Result};
pub use forcing::ForcingView;
pub use model::Transition;
pub use series::BooleanSeries;
pub use tolerance::ToleranceComparator;
