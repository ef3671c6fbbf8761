// demos/livestream_logic.rs
use bde_engine::{BooleanSeries, DelayEngine, ToleranceComparator};

fn main() -> bde_engine::Result<()> {
	tracing_subscriber::fmt::init();

	// A single variable that negates its own state one second in the past:
	// on, off, on, off, forever, with a one-second history of "on".
	let history = BooleanSeries::new(vec![0.0], vec![true], 1.0, Some("x".to_string()), None)?;

	let engine = DelayEngine::new(
		|z: &[Vec<bool>], _forcing: Option<&[Vec<bool>]>| vec![!z[0][0]],
		vec![1.0],
		vec![history],
		vec![],
		ToleranceComparator::default(),
	)?;

	let result = engine.solve(8.0)?;
	println!("--- t_sim_start: {} ---", engine.t_sim_start());
	print_series(&result[0]);

	// Now feed an external forcing signal: an "audience applause" pulse that
	// flips the modelled variable on with a 0.3s reaction delay.
	let forcing = BooleanSeries::new(vec![0.0, 2.0, 2.5, 5.0], vec![false, true, false, true], 8.0, Some("applause".to_string()), None)?;

	let history = BooleanSeries::new(vec![0.0], vec![false], 0.3, None, None)?;

	let reactive = DelayEngine::new(
		|_z: &[Vec<bool>], f: Option<&[Vec<bool>]>| vec![f.expect("forcing supplied")[0][0]],
		vec![0.3],
		vec![history],
		vec![forcing],
		ToleranceComparator::default(),
	)?;

	let result = reactive.solve(8.0)?;
	println!("\n--- reactive variable (0.3s behind applause) ---");
	print_series(&result[0]);

	Ok(())
}

fn print_series(series: &BooleanSeries) {
	println!("  label: {:?}", series.label);
	for (t, y) in series.t().iter().zip(series.y().iter()) {
		println!("    t={t:>6.3}  ->  {}", if *y { "T" } else { "F" });
	}
	println!("  end: {}", series.end());
}
