//! Default parameters and print widths.

pub const DEFAULT_BOOSTING_ITERATIONS: usize = 10;
pub const DEFAULT_CV_FOLDS:            usize = 10;
pub const DEFAULT_MAX_SOURCES:         usize = 15;
pub const DEFAULT_SEED:                  u64 = 1234;

pub const DEFAULT_MAX_DEPTH:           usize = 16;
pub const DEFAULT_MIN_LEAF_WEIGHT:       f64 = 0.0;

pub const PRINT_WIDTH:                 usize = 9;
pub const FULL_WIDTH:                  usize = 60;
pub const STAT_WIDTH:                  usize = (FULL_WIDTH - 4) / 2;
