/// Render a parameter value the way statements show bounds: `10^{5}`,
/// `3 \times 10^{5}`, `2^{10}` or the plain decimal.
///
/// Multiples of `10^5` always take the power-of-ten form, even when the value
/// is also a power of two multiple. Powers of two are only used for exact
/// powers of at least `2^10`.
pub fn format_param(value: u64) -> String {
	if value == 0 {
		return "0".to_string();
	}

	if value % 100_000 == 0 {
		let mut mantissa = value / 100_000;
		let mut exponent = 5;

		while mantissa % 10 == 0 {
			mantissa /= 10;
			exponent += 1;
		}

		return if mantissa == 1 {
			format!("10^{{{exponent}}}")
		} else {
			format!("{mantissa} \\times 10^{{{exponent}}}")
		};
	}

	if value.trailing_zeros() >= 10 && value.is_power_of_two() {
		return format!("2^{{{}}}", value.trailing_zeros());
	}

	value.to_string()
}
