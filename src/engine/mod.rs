pub mod dominant;
pub mod shift;
pub mod tone;

pub use dominant::select_dominant;
pub use shift::{detect_shifts, BaselineProfile, FieldShift, ShiftSeverity};
pub use tone::{ToneDimension, ToneEngine, ToneResult, ToneVector};
