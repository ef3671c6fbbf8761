/// Combined absolute/relative tolerance used everywhere timestamps are compared.
///
/// `eq(a, b)` holds iff `|a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)`.
/// Carried explicitly by every component that needs it (never a global), so
/// callers can tighten or relax tolerances per solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToleranceComparator {
	pub abs_tol: f64,
	pub rel_tol: f64,
}

impl ToleranceComparator {
	#[must_use]
	pub fn new(abs_tol: f64, rel_tol: f64) -> Self {
		Self { abs_tol, rel_tol }
	}

	#[must_use]
	pub fn eq(&self, a: f64, b: f64) -> bool {
		let scale = a.abs().max(b.abs());
		(a - b).abs() <= (self.rel_tol * scale).max(self.abs_tol)
	}

	#[must_use]
	pub fn lt(&self, a: f64, b: f64) -> bool {
		a < b && !self.eq(a, b)
	}

	#[must_use]
	pub fn le(&self, a: f64, b: f64) -> bool {
		a < b || self.eq(a, b)
	}

	#[must_use]
	pub fn gt(&self, a: f64, b: f64) -> bool {
		a > b && !self.eq(a, b)
	}

	#[must_use]
	pub fn ge(&self, a: f64, b: f64) -> bool {
		a > b || self.eq(a, b)
	}
}

impl Default for ToleranceComparator {
	fn default() -> Self {
		Self { abs_tol: 0.0, rel_tol: 1e-9 }
	}
}
