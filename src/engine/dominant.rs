use super::tone::{ToneDimension, ToneVector};

/// Picks the dimension with the greatest value.
///
/// Walks `ToneDimension::ALL` and only replaces the running best on a
/// strictly greater value, so ties go to the earlier-declared dimension.
/// NaN components never win.
pub fn select_dominant(vector: &ToneVector) -> ToneDimension {
    let mut best = ToneDimension::ALL[0];
    let mut best_value = vector.get(best);
    for (dimension, value) in vector.iter().skip(1) {
        if value > best_value || (best_value.is_nan() && !value.is_nan()) {
            best = dimension;
            best_value = value;
        }
    }
    best
}
