use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Every distinguishable failure mode of the series/engine core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
	#[error("series shape invalid: {0}")]
	InvalidSeriesShape(String),

	#[error("switch times not strictly increasing at index {index}: t[{index}]={prev}, t[{index_next}]={next}")]
	TimesNotSorted { index: usize, index_next: usize, prev: f64, next: f64 },

	#[error("end ({end}) is before last switch time ({last_switch})")]
	EndBeforeLastSwitch { end: f64, last_switch: f64 },

	#[error("time {t} is out of range [{start}, {end}]")]
	OutOfRange { t: f64, start: f64, end: f64 },

	#[error("series domains differ: {0}")]
	DomainMismatch(String),

	#[error("delay at index {index} must be positive, got {value}")]
	InvalidDelay { index: usize, value: f64 },

	#[error("history for variable {var} spans only {span} but max delay is {max_delay}")]
	HistoryTooShort { var: usize, span: f64, max_delay: f64 },

	#[error("forcing series {var} does not cover required span [{required_start}, {required_end}]")]
	ForcingTooShort { var: usize, required_start: f64, required_end: f64 },

	#[error("history for variable {var} ends on a switch at t={t}")]
	HistoryEndsOnSwitch { var: usize, t: f64 },

	#[error("transition function returned {got} states, expected {expected}")]
	TransitionArityMismatch { expected: usize, got: usize },

	#[error("switch density exceeded: {committed} switches committed, bound is {bound}")]
	SwitchDensityExceeded { committed: usize, bound: usize },
}
