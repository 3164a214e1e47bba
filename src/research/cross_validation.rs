use rand::prelude::*;
use colored::Colorize;

use crate::{InstanceSet, TransferError};
use crate::constants::{DEFAULT_CV_FOLDS, DEFAULT_SEED, PRINT_WIDTH};
use crate::error::Result;

use std::iter::Iterator;


/// A struct that generates
/// pairs of training/test sample for cross validation.
///
/// The instances are taken in their stored order unless
/// [`CrossValidation::shuffle`] is called.
/// With `n` instances and `k` folds,
/// the `i`'th test fold holds `n / k` instances,
/// plus one more if `i < n % k`.
/// The training set keeps the remaining instances in their relative order.
///
/// # Example
/// ```no_run
/// use twostage_transfer::prelude::*;
///
/// let sample = SampleReader::new()
///     .file("target.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// let cv = CrossValidation::new(&sample)
///     .n_folds(5)
///     .verbose(true)
///     .seed(777)
///     .shuffle();
/// let tree = DecisionTreeBuilder::new()
///     .max_depth(3)
///     .build();
/// for (train, test) in cv {
///     let f = tree.fit(&train).unwrap();
///     let loss = zero_one_loss(&test, &f).unwrap();
///     println!("[test: {loss}]");
/// }
/// ```
pub struct CrossValidation<'a> {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    sample: &'a InstanceSet,
    ix: Vec<usize>,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(sample: &'a InstanceSet) -> Self {
        let ix = (0..sample.len()).collect::<Vec<_>>();
        Self {
            current_fold: 0,
            n_folds: DEFAULT_CV_FOLDS,
            seed: DEFAULT_SEED,
            verbose: false,
            sample,
            ix,
        }
    }


    /// Set the number of folds.
    /// Default value is `10.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    /// Call this method before [`CrossValidation::shuffle`].
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the instances before partitioning.
    /// By default, `CrossValidation` does not shuffle the sample.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.ix.shuffle(&mut rng);
        self
    }


    /// Checks that the sample can be split into `n_folds` non-empty folds.
    pub fn validate(&self) -> Result<()> {
        let n_sample = self.sample.len();
        if n_sample < 2 {
            let message = format!(
                "cross validation needs at least 2 instances, got {n_sample}"
            );
            return Err(TransferError::InvalidConfiguration(message));
        }
        if self.n_folds < 2 || self.n_folds > n_sample {
            let message = format!(
                "the number of folds must be in [2, {n_sample}], got {}",
                self.n_folds
            );
            return Err(TransferError::InvalidConfiguration(message));
        }
        Ok(())
    }


    /// Returns all `(train, test)` pairs at once.
    pub fn folds(&self) -> Result<Vec<(InstanceSet, InstanceSet)>> {
        self.validate()?;
        let folds = (0..self.n_folds)
            .map(|i| {
                let fold = self.fold_at(i);
                if self.verbose { print_fold(i + 1, &fold); }
                fold
            })
            .collect();
        Ok(folds)
    }


    /// Returns the range `[start, end)` of the `i`th test fold.
    #[inline]
    fn bounds(&self, i: usize) -> (usize, usize) {
        let n_sample = self.sample.len();
        let base = n_sample / self.n_folds;
        let rest = n_sample % self.n_folds;

        let start = i * base + i.min(rest);
        let size = base + usize::from(i < rest);
        (start, start + size)
    }


    /// Returns the training/test sample for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (InstanceSet, InstanceSet) {
        let (start, end) = self.bounds(i);
        self.sample.split(&self.ix, start, end)
    }
}


impl<'a> Iterator for CrossValidation<'a> {
    type Item = (InstanceSet, InstanceSet);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }
        if self.validate().is_err() { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose { print_fold(self.current_fold, &output); }

        Some(output)
    }
}


fn print_fold(fold: usize, (train, test): &(InstanceSet, InstanceSet)) {
    println!(
        "{}    {}    {}",
        format!("  [{: >3}'th fold]", fold).bold().red(),
        format!("[TRAIN {:>PRINT_WIDTH$}]", train.len()).bold().green(),
        format!("[TEST {:>PRINT_WIDTH$}]", test.len()).bold().yellow(),
    );
}


#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> InstanceSet {
        InstanceSet::from_parts(
            (0..n).map(|i| vec![i as f64]).collect(),
            (0..n).map(|i| i as i64).collect(),
        ).unwrap()
    }

    #[test]
    fn folds_are_contiguous_and_cover_the_sample() {
        let sample = numbered(7);
        let folds = CrossValidation::new(&sample).n_folds(3).folds().unwrap();

        let tests = folds.iter()
            .map(|(_, test)| test.labels())
            .collect::<Vec<_>>();
        assert_eq!(tests, vec![vec![0, 1, 2], vec![3, 4], vec![5, 6]]);

        let (train, _) = &folds[1];
        assert_eq!(train.labels(), vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn leave_one_out() {
        let sample = numbered(4);
        let folds = CrossValidation::new(&sample).n_folds(4).folds().unwrap();
        assert!(folds.iter().all(|(train, test)| {
            train.len() == 3 && test.len() == 1
        }));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let sample = numbered(20);
        let a = CrossValidation::new(&sample).n_folds(5).seed(7).shuffle()
            .folds()
            .unwrap();
        let b = CrossValidation::new(&sample).n_folds(5).seed(7).shuffle()
            .folds()
            .unwrap();
        assert_eq!(a, b);

        let mut seen = a.iter()
            .flat_map(|(_, test)| test.labels())
            .collect::<Vec<_>>();
        seen.sort();
        assert_eq!(seen, (0..20).collect::<Vec<i64>>());
    }

    #[test]
    fn too_many_folds_are_rejected() {
        let sample = numbered(3);
        let cv = CrossValidation::new(&sample).n_folds(4);
        assert!(matches!(
            cv.folds(),
            Err(TransferError::InvalidConfiguration(_))
        ));
        assert_eq!(CrossValidation::new(&sample).n_folds(4).count(), 0);
    }

    #[test]
    fn iterator_matches_folds() {
        let sample = numbered(10);
        let folds = CrossValidation::new(&sample).n_folds(3).folds().unwrap();
        let iterated = CrossValidation::new(&sample).n_folds(3)
            .collect::<Vec<_>>();
        assert_eq!(folds, iterated);
    }
}
