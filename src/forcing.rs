use std::cell::Cell;

use crate::error::{EngineError, Result};
use crate::series::BooleanSeries;
use crate::tolerance::ToleranceComparator;

pub struct ForcingView<'a> {
	series: &'a BooleanSeries,
	last_index: Cell<usize>,
}

impl<'a> ForcingView<'a> {
	#[must_use]
	pub fn new(series: &'a BooleanSeries) -> Self {
		Self { series, last_index: Cell::new(0) }
	}

	pub fn evaluate_at(&self, t: f64, tol: ToleranceComparator) -> Result<bool> {
		let times = self.series.t();
		if tol.lt(t, self.series.start()) || tol.gt(t, self.series.end()) {
			return Err(EngineError::OutOfRange {
				t,
				start: self.series.start(),
				end: self.series.end(),
			});
		}

		let hint = self.last_index.get().min(times.len() - 1);
		let idx = if tol.le(times[hint], t) {
			// Search forward from the hint for the largest i with t[i] <= t.
			let mut i = hint;
			while i + 1 < times.len() && tol.le(times[i + 1], t) {
				i += 1;
			}
			i
		} else {
			// Hint overshot; fall back to a full binary search.
			let mut lo = 0usize;
			let mut hi = times.len();
			while lo < hi {
				let mid = lo + (hi - lo) / 2;
				if tol.le(times[mid], t) {
					lo = mid + 1;
				} else {
					hi = mid;
				}
			}
			lo.saturating_sub(1)
		};

		self.last_index.set(idx);
		Ok(self.series.y()[idx])
	}

	#[must_use]
	pub fn series(&self) -> &BooleanSeries {
		self.series
	}
}
