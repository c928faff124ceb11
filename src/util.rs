/// Numeric conversion helpers.
///
/// The language has a single numeric type, `f64`. This module provides the
/// checked conversions from it into indices and character codes, and the
/// textual rendering used by `send`.
///
/// All conversions return a `Result`, which is `Ok` if the conversion is
/// lossless and valid, or an error if the value is out of range or not an
/// integer.
pub mod num;
