/// Fewest observations on either side of a KS test.
pub const KS_MIN_SAMPLES: usize = 25;
/// Fewest observations per cell of a chi-squared contingency table.
pub const CHI2_MIN_CELL: usize = 5;
pub const DEFAULT_KS_STAT: f64 = 0.2;
pub const DEFAULT_CHI2_STAT: f64 = 0.2;
/// Width of the mean band, in reference standard deviations.
pub const MEAN_STD_BAND: f64 = 2.0;
/// Relative width of the standard deviation band.
pub const STD_BAND: f64 = 0.5;
