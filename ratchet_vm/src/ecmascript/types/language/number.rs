use crate::ecmascript::{execution::agent::Agent, types::language::string::String};

/// ### [6.1.6.1.14 Number::sameValue ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-number-sameValue)
pub(crate) fn number_same_value(x: f64, y: f64) -> bool {
    // NaN equals NaN, +0 is distinguished from -0.
    x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan())
}

/// ### [6.1.6.1.15 Number::sameValueZero ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-number-sameValueZero)
pub(crate) fn number_same_value_zero(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

/// ### [6.1.6.1.20 Number::toString ( x, radix )](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Only radix 10 is needed by the core; ryu-js produces the specification's
/// shortest round-trip form.
pub(crate) fn number_to_string(agent: &mut Agent, x: f64) -> String {
    let mut buffer = ryu_js::Buffer::new();
    let text = buffer.format(x);
    String::from_str(agent, text)
}

pub(crate) fn number_to_std_string(x: f64) -> std::string::String {
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(x).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_distinguishes_zeroes() {
        assert!(number_same_value(0.0, 0.0));
        assert!(!number_same_value(0.0, -0.0));
        assert!(number_same_value(f64::NAN, f64::NAN));
        assert!(number_same_value_zero(0.0, -0.0));
    }

    #[test]
    fn to_string_matches_ecmascript_format() {
        assert_eq!(number_to_std_string(0.0), "0");
        // ToString does not distinguish the zeroes.
        assert_eq!(number_to_std_string(-0.0), "0");
        assert_eq!(number_to_std_string(1.0), "1");
        assert_eq!(number_to_std_string(0.5), "0.5");
        assert_eq!(number_to_std_string(f64::NAN), "NaN");
        assert_eq!(number_to_std_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_std_string(1e21), "1e+21");
    }
}
