pub trait Transition {
	fn evaluate(&self, z: &[Vec<bool>], f: Option<&[Vec<bool>]>) -> Vec<bool>;
}

impl<F> Transition for F
where
	F: Fn(&[Vec<bool>], Option<&[Vec<bool>]>) -> Vec<bool>,
{
	fn evaluate(&self, z: &[Vec<bool>], f: Option<&[Vec<bool>]>) -> Vec<bool> {
		self(z, f)
	}
}
