use crate::error::{EngineError, Result};
use crate::tolerance::ToleranceComparator;

/// The state of a single Boolean variable over the closed interval
/// `[t[0], end]`. `y[i]` is in force from `t[i]` (inclusive) until either
/// `t[i + 1]` (exclusive) or `end`.
///
/// Conceptually immutable once constructed: every operation here returns a
/// fresh instance rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooleanSeries {
	t: Vec<f64>,
	y: Vec<bool>,
	end: f64,
	pub label: Option<String>,
	pub style: Option<String>,
}

impl BooleanSeries {
	/// Construct and validate a series. If `values` has length 1 it is
	/// padded with alternating Booleans out to `times.len()`.
	pub fn new(times: Vec<f64>, mut values: Vec<bool>, end: f64, label: Option<String>, style: Option<String>) -> Result<Self> {
		if values.len() == 1 && times.len() > 1 {
			let seed = values[0];
			values = (0..times.len()).map(|i| if i % 2 == 0 { seed } else { !seed }).collect();
		}

		if times.is_empty() || times.len() != values.len() {
			return Err(EngineError::InvalidSeriesShape(format!(
				"len(t)={} must equal len(y)={} and both must be non-empty",
				times.len(),
				values.len()
			)));
		}

		let tol = ToleranceComparator::default();
		for (i, w) in times.windows(2).enumerate() {
			if !tol.lt(w[0], w[1]) {
				return Err(EngineError::TimesNotSorted {
					index: i,
					index_next: i + 1,
					prev: w[0],
					next: w[1],
				});
			}
		}

		let last = times[times.len() - 1];
		if tol.lt(end, last) {
			return Err(EngineError::EndBeforeLastSwitch { end, last_switch: last });
		}

		Ok(Self { t: times, y: values, end, label, style })
	}

	#[must_use]
	pub fn t(&self) -> &[f64] {
		&self.t
	}

	#[must_use]
	pub fn y(&self) -> &[bool] {
		&self.y
	}

	#[must_use]
	pub fn start(&self) -> f64 {
		self.t[0]
	}

	#[must_use]
	pub fn end(&self) -> f64 {
		self.end
	}

	pub(crate) fn set_end(&mut self, end: f64) {
		self.end = end;
	}

	pub(crate) fn push_switch(&mut self, t: f64, y: bool) {
		self.t.push(t);
		self.y.push(y);
	}

	#[must_use]
	pub fn last_state(&self) -> bool {
		self.y[self.y.len() - 1]
	}

	/// The state in force at `t`, using tolerant binary search. A time that
	/// tolerance-equals an existing switch resolves to the right limit: the
	/// state that begins at that switch.
	pub fn evaluate_at(&self, t: f64, tol: ToleranceComparator) -> Result<bool> {
		if tol.lt(t, self.t[0]) || tol.gt(t, self.end) {
			return Err(EngineError::OutOfRange { t, start: self.t[0], end: self.end });
		}

		// Largest i with t[i] <= t, tolerant.
		let mut lo = 0usize;
		let mut hi = self.t.len();
		while lo < hi {
			let mid = lo + (hi - lo) / 2;
			if tol.le(self.t[mid], t) {
				lo = mid + 1;
			} else {
				hi = mid;
			}
		}
		let idx = lo.saturating_sub(1);
		Ok(self.y[idx])
	}

	/// A sub-series on `[new_start, new_end]`, a subset of this series' domain.
	pub fn cut(&self, new_start: f64, new_end: f64, keep_switch_on_end: bool, tol: ToleranceComparator) -> Result<Self> {
		if tol.lt(new_start, self.t[0]) || tol.gt(new_end, self.end) || tol.gt(new_start, new_end) {
			return Err(EngineError::OutOfRange { t: new_start, start: self.t[0], end: self.end });
		}

		let start_state = self.evaluate_at(new_start, tol)?;
		let mut new_t = vec![new_start];
		let mut new_y = vec![start_state];

		for (&ti, &yi) in self.t.iter().zip(self.y.iter()) {
			let in_open_interval = tol.gt(ti, new_start) && tol.lt(ti, new_end);
			let on_kept_end = tol.eq(ti, new_end) && keep_switch_on_end;
			if in_open_interval || on_kept_end {
				new_t.push(ti);
				new_y.push(yi);
			}
		}

		Self::new(new_t, new_y, new_end, self.label.clone(), self.style.clone())
	}

	/// Total measure of time the two series disagree, over their common domain.
	pub fn hamming_distance(&self, other: &Self, tol: ToleranceComparator) -> Result<f64> {
		let overlap_start = self.t[0].max(other.t[0]);
		let overlap_end = self.end.min(other.end);
		if tol.gt(overlap_start, overlap_end) {
			return Err(EngineError::DomainMismatch(format!(
				"series domains [{}, {}] and [{}, {}] do not overlap",
				self.t[0],
				self.end,
				other.t[0],
				other.end
			)));
		}

		let mut breakpoints = vec![overlap_start];
		for &ti in self.t.iter().chain(other.t.iter()) {
			if tol.gt(ti, overlap_start) && tol.lt(ti, overlap_end) {
				breakpoints.push(ti);
			}
		}
		breakpoints.push(overlap_end);
		breakpoints.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
		breakpoints.dedup_by(|a, b| tol.eq(*a, *b));

		let mut total = 0.0;
		for w in breakpoints.windows(2) {
			let a = self.evaluate_at(w[0], tol)?;
			let b = other.evaluate_at(w[0], tol)?;
			if a != b {
				total += w[1] - w[0];
			}
		}
		Ok(total)
	}

	/// Convert sampled numeric data to Boolean form: `true` where
	/// `y_samples[i] >= theta`, with crossing times between samples found by
	/// linear interpolation.
	pub fn absolute_threshold(t_samples: &[f64], y_samples: &[f64], theta: f64, tol: ToleranceComparator) -> Result<Self> {
		if t_samples.len() != y_samples.len() || t_samples.is_empty() {
			return Err(EngineError::InvalidSeriesShape(format!(
				"threshold input lengths must match and be non-empty: t={}, y={}",
				t_samples.len(),
				y_samples.len()
			)));
		}

		let states: Vec<bool> = y_samples.iter().map(|&v| v >= theta).collect();
		let mut t = vec![t_samples[0]];
		let mut y = vec![states[0]];

		for i in 0..t_samples.len() - 1 {
			if states[i] == states[i + 1] {
				continue;
			}
			let (t0, t1) = (t_samples[i], t_samples[i + 1]);
			let (y0, y1) = (y_samples[i], y_samples[i + 1]);

			let t_cross = if tol.eq(y0, theta) {
				t0
			} else if tol.eq(y1, theta) {
				t1
			} else if tol.eq(y1, y0) {
				continue;
			} else {
				t0 + (theta - y0) / (y1 - y0) * (t1 - t0)
			};

			if let Some(&last) = t.last() {
				if tol.eq(t_cross, last) {
					continue;
				}
			}
			t.push(t_cross);
			y.push(states[i + 1]);
		}

		Self::new(t, y, *t_samples.last().expect("non-empty"), None, None)
	}

	/// Identical to `absolute_threshold` but with the threshold expressed as
	/// a fraction `theta` (in `[0, 1]`) of the sample range.
	pub fn relative_threshold(t_samples: &[f64], y_samples: &[f64], theta: f64, tol: ToleranceComparator) -> Result<Self> {
		let min = y_samples.iter().copied().fold(f64::INFINITY, f64::min);
		let max = y_samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
		let absolute_theta = min + theta * (max - min);
		Self::absolute_threshold(t_samples, y_samples, absolute_theta, tol)
	}

	/// Union of all switch times across `series` (tolerance-deduplicated,
	/// sorted) together with each series' state at every shared time. All
	/// series must share the same `end`.
	pub fn merge(series: &[Self], tol: ToleranceComparator) -> Result<(Vec<f64>, Vec<Vec<bool>>)> {
		if series.is_empty() {
			return Ok((Vec::new(), Vec::new()));
		}
		let end = series[0].end;
		for s in &series[1..] {
			if !tol.eq(s.end, end) {
				return Err(EngineError::DomainMismatch(format!("expected common end {end}, found {}", s.end)));
			}
		}

		let mut t_shared: Vec<f64> = series.iter().flat_map(|s| s.t.iter().copied()).collect();
		t_shared.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
		t_shared.dedup_by(|a, b| tol.eq(*a, *b));

		let mut y_shared = Vec::with_capacity(t_shared.len());
		for &t in &t_shared {
			let mut row = Vec::with_capacity(series.len());
			for s in series {
				row.push(s.evaluate_at(t, tol)?);
			}
			y_shared.push(row);
		}

		Ok((t_shared, y_shared))
	}

	/// Inverse of [`BooleanSeries::merge`]: splits a shared-grid multi-series
	/// back into one canonical (non-redundant-switch) series per variable.
	pub fn unmerge(t_shared: &[f64], y_shared: &[Vec<bool>], end: f64, tol: ToleranceComparator) -> Result<Vec<Self>> {
		if t_shared.is_empty() {
			return Err(EngineError::InvalidSeriesShape("unmerge requires at least one shared time".to_string()));
		}
		let n_vars = y_shared[0].len();

		let mut out = Vec::with_capacity(n_vars);
		for v in 0..n_vars {
			let mut t = vec![t_shared[0]];
			let mut y = vec![y_shared[0][v]];
			for i in 1..t_shared.len() {
				let state = y_shared[i][v];
				if state != *y.last().expect("non-empty") {
					t.push(t_shared[i]);
					y.push(state);
				}
			}
			out.push(Self::new(t, y, end, None, None)?);
		}
		let _ = tol;
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tol() -> ToleranceComparator {
		ToleranceComparator::default()
	}

	#[test]
	fn construct_pads_single_value() {
		let s = BooleanSeries::new(vec![0.0, 1.0, 2.0], vec![true], 3.0, None, None).unwrap();
		assert_eq!(s.y(), &[true, false, true]);
	}

	#[test]
	fn construct_rejects_unsorted_times() {
		let err = BooleanSeries::new(vec![0.0, 0.0], vec![true, false], 1.0, None, None).unwrap_err();
		assert!(matches!(err, EngineError::TimesNotSorted { .. }));
	}

	#[test]
	fn construct_rejects_end_before_last_switch() {
		let err = BooleanSeries::new(vec![0.0, 1.0], vec![true, false], 0.5, None, None).unwrap_err();
		assert!(matches!(err, EngineError::EndBeforeLastSwitch { .. }));
	}

	#[test]
	fn evaluate_at_uses_right_limit_on_switch() {
		let s = BooleanSeries::new(vec![0.0, 1.0, 2.0], vec![true, false, true], 3.0, None, None).unwrap();
		assert_eq!(s.evaluate_at(1.0, tol()).unwrap(), false);
		assert_eq!(s.evaluate_at(0.999, tol()).unwrap(), true);
		assert_eq!(s.evaluate_at(3.0, tol()).unwrap(), true);
	}

	#[test]
	fn evaluate_at_out_of_range() {
		let s = BooleanSeries::new(vec![0.0], vec![true], 1.0, None, None).unwrap();
		assert!(matches!(s.evaluate_at(-0.1, tol()), Err(EngineError::OutOfRange { .. })));
		assert!(matches!(s.evaluate_at(1.1, tol()), Err(EngineError::OutOfRange { .. })));
	}

	#[test]
	fn cut_synthesises_leading_switch() {
		let s = BooleanSeries::new(vec![0.0, 1.0, 2.0], vec![true, false, true], 3.0, None, None).unwrap();
		let c = s.cut(0.5, 2.5, false, tol()).unwrap();
		assert_eq!(c.t(), &[0.5, 1.0, 2.0]);
		assert_eq!(c.y(), &[true, false, true]);
		assert_eq!(c.end(), 2.5);
	}

	#[test]
	fn cut_drops_switch_on_end_unless_kept() {
		let s = BooleanSeries::new(vec![0.0, 1.0, 2.0], vec![true, false, true], 3.0, None, None).unwrap();
		let dropped = s.cut(0.0, 2.0, false, tol()).unwrap();
		assert_eq!(dropped.t(), &[0.0, 1.0]);
		let kept = s.cut(0.0, 2.0, true, tol()).unwrap();
		assert_eq!(kept.t(), &[0.0, 1.0, 2.0]);
	}

	#[test]
	fn cut_idempotent_over_full_domain() {
		let s = BooleanSeries::new(vec![0.0, 1.0, 2.0], vec![true, false, true], 3.0, None, None).unwrap();
		let c = s.cut(s.start(), s.end(), true, tol()).unwrap();
		assert_eq!(c.t(), s.t());
		assert_eq!(c.y(), s.y());
		assert_eq!(c.end(), s.end());
	}

	#[test]
	fn hamming_distance_is_symmetric_and_zero_for_self() {
		let a = BooleanSeries::new(vec![0.0, 1.0, 4.0], vec![true, false, true], 7.0, None, None).unwrap();
		let b = BooleanSeries::new(vec![0.0, 1.5, 4.3], vec![true, false, true], 7.0, None, None).unwrap();
		let d_ab = a.hamming_distance(&b, tol()).unwrap();
		let d_ba = b.hamming_distance(&a, tol()).unwrap();
		assert!((d_ab - d_ba).abs() < 1e-9);
		assert!((d_ab - 0.8).abs() < 1e-9);
		assert_eq!(a.hamming_distance(&a, tol()).unwrap(), 0.0);
	}

	#[test]
	fn hamming_distance_rejects_disjoint_domains() {
		let a = BooleanSeries::new(vec![0.0], vec![true], 1.0, None, None).unwrap();
		let b = BooleanSeries::new(vec![2.0], vec![true], 3.0, None, None).unwrap();
		assert!(matches!(a.hamming_distance(&b, tol()), Err(EngineError::DomainMismatch(_))));
	}

	#[test]
	fn absolute_threshold_matches_scenario_4() {
		let t = [0.0, 1.0, 2.0, 3.0, 4.0];
		let y = [0.0, 10.0, 8.0, 3.0, 12.0];
		let s = BooleanSeries::absolute_threshold(&t, &y, 5.0, tol()).unwrap();
		assert_eq!(s.y(), &[false, true, false, true]);
		assert!((s.t()[0] - 0.0).abs() < 1e-9);
		assert!((s.t()[1] - 0.5).abs() < 1e-9);
		assert!((s.t()[2] - 2.6).abs() < 1e-6);
		assert!((s.t()[3] - (3.0 + 2.0 / 9.0)).abs() < 1e-6);
		assert_eq!(s.end(), 4.0);
	}

	#[test]
	fn relative_threshold_matches_scenario_5() {
		let t = [0.0, 1.0, 2.0, 3.0, 4.0];
		let y = [4.0, 10.0, 8.0, 2.0, 12.0];
		let s = BooleanSeries::relative_threshold(&t, &y, 0.5, tol()).unwrap();
		assert_eq!(s.y(), &[false, true, false, true]);
		assert!((s.t()[1] - 0.5).abs() < 1e-6);
		assert!((s.t()[2] - (2.0 + 1.0 / 6.0)).abs() < 1e-6);
		assert!((s.t()[3] - 3.5).abs() < 1e-6);
	}

	#[test]
	fn merge_unmerge_round_trip() {
		let a = BooleanSeries::new(vec![0.0, 1.0, 2.0], vec![true, false, true], 3.0, None, None).unwrap();
		let b = BooleanSeries::new(vec![0.0, 1.5], vec![false, true], 3.0, None, None).unwrap();
		let (t_shared, y_shared) = BooleanSeries::merge(&[a.clone(), b.clone()], tol()).unwrap();
		assert_eq!(t_shared, vec![0.0, 1.0, 1.5, 2.0]);

		let restored = BooleanSeries::unmerge(&t_shared, &y_shared, 3.0, tol()).unwrap();
		assert_eq!(restored[0].t(), a.t());
		assert_eq!(restored[0].y(), a.y());
		assert_eq!(restored[1].t(), b.t());
		assert_eq!(restored[1].y(), b.y());
	}

	#[test]
	fn merge_rejects_mismatched_ends() {
		let a = BooleanSeries::new(vec![0.0], vec![true], 1.0, None, None).unwrap();
		let b = BooleanSeries::new(vec![0.0], vec![true], 2.0, None, None).unwrap();
		assert!(matches!(BooleanSeries::merge(&[a, b], tol()), Err(EngineError::DomainMismatch(_))));
	}
}
