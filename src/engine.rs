use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::{trace, warn};

use crate::error::{EngineError, Result};
use crate::forcing::ForcingView;
use crate::model::Transition;
use crate::series::BooleanSeries;
use crate::tolerance::ToleranceComparator;

const DEFAULT_MAX_SWITCHES: usize = 200_000;

#[derive(Debug, Clone, Copy, PartialEq)]
struct CandidateTime(f64);

impl Eq for CandidateTime {}

impl PartialOrd for CandidateTime {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.0.partial_cmp(&other.0)
	}
}

impl Ord for CandidateTime {
	fn cmp(&self, other: &Self) -> Ordering {
		self.partial_cmp(other).unwrap_or(Ordering::Equal)
	}
}

pub struct DelayEngine<T: Transition> {
	transition: T,
	delays: Vec<f64>,
	histories: Vec<BooleanSeries>,
	forcings: Vec<BooleanSeries>,
	tol: ToleranceComparator,
	t_sim_start: f64,
	max_switches: usize,
}

impl<T: Transition> DelayEngine<T> {
	pub fn new(transition: T, delays: Vec<f64>, histories: Vec<BooleanSeries>, forcings: Vec<BooleanSeries>, tol: ToleranceComparator) -> Result<Self> {
		for (index, &value) in delays.iter().enumerate() {
			if value <= 0.0 {
				return Err(EngineError::InvalidDelay { index, value });
			}
		}
		if histories.is_empty() {
			return Err(EngineError::InvalidSeriesShape("at least one modelled variable is required".to_string()));
		}

		let t_sim_start = histories[0].end();
		for (var, h) in histories.iter().enumerate().skip(1) {
			if !tol.eq(h.end(), t_sim_start) {
				return Err(EngineError::DomainMismatch(format!(
					"history {var} ends at {} but history 0 ends at {t_sim_start}",
					h.end()
				)));
			}
		}

		let max_delay = delays.iter().copied().fold(f64::MIN, f64::max);
		for (var, h) in histories.iter().enumerate() {
			let span = t_sim_start - h.start();
			if tol.lt(span, max_delay) {
				return Err(EngineError::HistoryTooShort { var, span, max_delay });
			}
			if tol.eq(*h.t().last().expect("non-empty"), t_sim_start) {
				return Err(EngineError::HistoryEndsOnSwitch { var, t: t_sim_start });
			}
		}

		tracing::debug!(n_vars = histories.len(), n_forced = forcings.len(), n_delays = delays.len(), t_sim_start, "constructed delay engine");

		Ok(Self {
			transition,
			delays,
			histories,
			forcings,
			tol,
			t_sim_start,
			max_switches: DEFAULT_MAX_SWITCHES,
		})
	}

	#[must_use]
	pub fn with_max_switches(mut self, max_switches: usize) -> Self {
		self.max_switches = max_switches;
		self
	}

	#[must_use]
	pub fn t_sim_start(&self) -> f64 {
		self.t_sim_start
	}

	pub fn solve(&self, end_time: f64) -> Result<Vec<BooleanSeries>> {
		let tol = self.tol;
		if !tol.lt(self.t_sim_start, end_time) {
			return Err(EngineError::OutOfRange {
				t: end_time,
				start: self.t_sim_start,
				end: self.t_sim_start,
			});
		}

		let max_delay = self.delays.iter().copied().fold(f64::MIN, f64::max);
		let required_start = self.t_sim_start - max_delay;
		for (var, f) in self.forcings.iter().enumerate() {
			if tol.gt(f.start(), required_start) || tol.lt(f.end(), end_time) {
				return Err(EngineError::ForcingTooShort {
					var,
					required_start,
					required_end: end_time,
				});
			}
		}

		let mut series: Vec<BooleanSeries> = self.histories.clone();
		let forcing_views: Vec<ForcingView<'_>> = self.forcings.iter().map(ForcingView::new).collect();
		let n_vars = series.len();

		// Seeding is inclusive of t_sim_start: a history/forcing switch whose
		// delay projection lands exactly on t_sim_start is a legitimate first
		// event (e.g. a single-switch history whose span equals a delay).
		// Only post-commit projections (below) must be strictly after the
		// frontier, to avoid an event re-triggering itself.
		let mut queue: BinaryHeap<Reverse<CandidateTime>> = BinaryHeap::new();
		let seed_sources = self.histories.iter().chain(self.forcings.iter());
		for source in seed_sources {
			for &t_s in source.t() {
				for &delay in &self.delays {
					let cand = t_s + delay;
					if tol.ge(cand, self.t_sim_start) && tol.le(cand, end_time) {
						queue.push(Reverse(CandidateTime(cand)));
					}
				}
			}
		}

		let mut frontier = self.t_sim_start;
		let mut switches_committed = 0usize;

		while let Some(t_c) = pop_coalesced(&mut queue, tol) {
			if tol.lt(t_c, frontier) {
				continue;
			}

			for s in &mut series {
				s.set_end(t_c);
			}

			let z: Vec<Vec<bool>> = self
				.delays
				.iter()
				.map(|&delay| series.iter().map(|s| s.evaluate_at(t_c - delay, tol)).collect::<Result<Vec<_>>>())
				.collect::<Result<Vec<_>>>()?;

			let f: Option<Vec<Vec<bool>>> = if forcing_views.is_empty() {
				None
			} else {
				Some(
					self.delays
						.iter()
						.map(|&delay| forcing_views.iter().map(|v| v.evaluate_at(t_c - delay, tol)).collect::<Result<Vec<_>>>())
						.collect::<Result<Vec<_>>>()?,
				)
			};

			let new_state = self.transition.evaluate(&z, f.as_deref());
			if new_state.len() != n_vars {
				return Err(EngineError::TransitionArityMismatch { expected: n_vars, got: new_state.len() });
			}

			let mut any_committed = false;
			for (v, series_v) in series.iter_mut().enumerate() {
				if new_state[v] != series_v.last_state() {
					series_v.push_switch(t_c, new_state[v]);
					trace!(var = v, t = t_c, state = new_state[v], "committed switch");
					switches_committed += 1;
					any_committed = true;
				}
			}

			if any_committed {
				for &delay in &self.delays {
					let cand = t_c + delay;
					if tol.gt(cand, frontier) && tol.le(cand, end_time) {
						queue.push(Reverse(CandidateTime(cand)));
					}
				}
			}

			if switches_committed > self.max_switches {
				warn!(switches_committed, bound = self.max_switches, "switch density bound tripped");
				return Err(EngineError::SwitchDensityExceeded {
					committed: switches_committed,
					bound: self.max_switches,
				});
			}

			frontier = t_c;
		}

		for s in &mut series {
			s.set_end(end_time);
		}

		Ok(series)
	}
}

fn pop_coalesced(queue: &mut BinaryHeap<Reverse<CandidateTime>>, tol: ToleranceComparator) -> Option<f64> {
	let Reverse(CandidateTime(t_c)) = queue.pop()?;
	while let Some(&Reverse(CandidateTime(next))) = queue.peek() {
		if tol.eq(next, t_c) {
			queue.pop();
		} else {
			break;
		}
	}
	Some(t_c)
}
