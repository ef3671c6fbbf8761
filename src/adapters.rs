use std::io::{self, Write};

use crate::series::BooleanSeries;

/// Edge-stepped `(xs, ys)` point arrays for a line-plot library: each switch
/// time is duplicated so consecutive segments render as square steps rather
/// than diagonal interpolation.
#[must_use]
pub fn to_step_plot_data(series: &BooleanSeries) -> (Vec<f64>, Vec<f64>) {
	let t = series.t();
	let y = series.y();
	let mut xs = Vec::with_capacity(t.len() * 2);
	let mut ys = Vec::with_capacity(t.len() * 2);

	for i in 0..t.len() {
		let level = if y[i] { 1.0 } else { 0.0 };
		xs.push(t[i]);
		ys.push(level);
		let segment_end = if i + 1 < t.len() { t[i + 1] } else { series.end() };
		xs.push(segment_end);
		ys.push(level);
	}

	(xs, ys)
}

/// Emit one line per interval of every series in `multi_series`:
/// `"  t_start  ->  t_end : S1 S2 ..."`, states rendered as `T`/`F`. Not a
/// stable format, human inspection only.
pub fn print_tabular(multi_series: &[BooleanSeries], tolerances: crate::tolerance::ToleranceComparator, stream: &mut dyn Write) -> io::Result<()> {
	let (t_shared, y_shared) = BooleanSeries::merge(multi_series, tolerances).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

	let end = multi_series.first().map_or(0.0, BooleanSeries::end);

	for (i, &t_start) in t_shared.iter().enumerate() {
		let t_end = t_shared.get(i + 1).copied().unwrap_or(end);
		let row = y_shared[i].iter().map(|&b| if b { "T" } else { "F" }).collect::<Vec<_>>().join(" ");
		writeln!(stream, "  {t_start:>8.4}  ->  {t_end:>8.4} : {row}")?;
	}
	Ok(())
}
