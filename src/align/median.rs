//---------------------------------------------------------------------------------------------------- median
/// Median of `values`, sorting them in place.
///
/// An even count averages the two middle values.
///
/// ```rust
/// # use realign::align::median;
/// assert_eq!(median(&mut [3.0, 1.0, 2.0]), 2.0);
/// assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
/// ```
///
/// # Panics
/// If `values` is empty.
pub fn median(values: &mut [f64]) -> f64 {
	assert!(!values.is_empty(), "median of an empty window: alignment path is broken");

	values.sort_unstable_by(f64::total_cmp);

	let n = values.len();
	if n % 2 == 0 {
		(values[n / 2 - 1] + values[n / 2]) / 2.0
	} else {
		values[n / 2]
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn odd() {
		assert_eq!(median(&mut [5.0]), 5.0);
		assert_eq!(median(&mut [0.9, 1.2, 1.0]), 1.0);
		assert_eq!(median(&mut [-1.0, 7.0, 2.0, 2.0, 0.0]), 2.0);
	}

	#[test]
	fn even() {
		assert_eq!(median(&mut [1.0, 2.0]), 1.5);
		assert_eq!(median(&mut [10.0, -2.0, 4.0, 0.0]), 2.0);
	}

	#[test]
	fn sorts_in_place() {
		let mut v = [3.0, 1.0, 2.0];
		median(&mut v);
		assert_eq!(v, [1.0, 2.0, 3.0]);
	}

	#[test]
	#[should_panic(expected = "empty window")]
	fn empty_panics() {
		median(&mut []);
	}
}
