use std::collections::BTreeSet;
use std::ops::Index;
use std::sync::Arc;

use polars::prelude::{DataFrame, DataType};

use super::instance::{check_weight, Instance, Label};
use crate::error::{Result, TransferError};
use crate::research::CrossValidation;


/// Struct `InstanceSet` holds the instances of one logical dataset,
/// either the target or one of the sources.
///
/// An `InstanceSet` is a value: `concat` and `with_weight`
/// return new sets and leave `self` untouched,
/// so that a weighted copy never aliases the original.
/// Cloning is cheap since the instances are reference counted.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSet {
    instances: Arc<[Instance]>,
    n_feature: usize,
}


impl Default for InstanceSet {
    fn default() -> Self {
        Self::empty()
    }
}


impl InstanceSet {
    /// Construct an empty set.
    /// An empty set has no features and adopts the dimensionality
    /// of the set it is concatenated with.
    #[inline]
    pub fn empty() -> Self {
        Self { instances: Arc::from(Vec::<Instance>::new()), n_feature: 0 }
    }


    /// Construct a new set from `instances`.
    /// Returns `Err` if the instances do not share
    /// the same number of features or if some weight is invalid.
    pub fn new(instances: Vec<Instance>) -> Result<Self> {
        let n_feature = instances.first()
            .map(|inst| inst.n_features())
            .unwrap_or(0);

        for inst in instances.iter() {
            if inst.n_features() != n_feature {
                return Err(TransferError::DimensionMismatch {
                    expected: n_feature,
                    got: inst.n_features(),
                });
            }
            check_weight(inst.weight())?;
        }

        let instances = Arc::from(instances);
        Ok(Self { instances, n_feature })
    }


    /// Construct a new set of unit-weight instances from
    /// row-major `features` and `labels`.
    pub fn from_parts<X>(features: Vec<X>, labels: Vec<Label>)
        -> Result<Self>
        where X: Into<Vec<f64>>,
    {
        if features.len() != labels.len() {
            return Err(TransferError::InvalidInput(format!(
                "{} feature rows but {} labels",
                features.len(), labels.len()
            )));
        }
        let instances = features.into_iter()
            .zip(labels)
            .map(|(x, y)| Instance::new(x, y))
            .collect::<Vec<_>>();
        Self::new(instances)
    }


    /// Convert a `polars::DataFrame` into `InstanceSet`.
    /// The column named `target` is cast to `i64` and used as the label,
    /// every other column is cast to `f64` and used as a feature.
    pub fn from_dataframe(data: &DataFrame, target: &str) -> Result<Self> {
        let labels = data.column(target)?
            .cast(&DataType::Int64)?;
        let labels = labels.i64()?
            .into_iter()
            .enumerate()
            .map(|(row, y)| {
                y.ok_or_else(|| TransferError::Parse {
                    line: row + 1,
                    reason: format!("missing value in column `{target}`"),
                })
            })
            .collect::<Result<Vec<Label>>>()?;

        let columns = data.get_columns()
            .iter()
            .filter(|series| series.name() != target)
            .map(|series| {
                let name = series.name().to_string();
                let series = series.cast(&DataType::Float64)?;
                series.f64()?
                    .into_iter()
                    .enumerate()
                    .map(|(row, x)| {
                        x.ok_or_else(|| TransferError::Parse {
                            line: row + 1,
                            reason: format!("missing value in column `{name}`"),
                        })
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = (0..labels.len())
            .map(|i| columns.iter().map(|col| col[i]).collect::<Vec<f64>>())
            .collect::<Vec<_>>();

        Self::from_parts(rows, labels)
    }


    /// Returns the number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }


    /// Alias of [`InstanceSet::len`].
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }


    /// Returns `true` if `self` has no instance.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }


    /// Returns the number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_feature
    }


    /// Returns the pair of the number of instances and
    /// the number of features
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.n_feature)
    }


    /// Returns the `idx`-th instance.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Instance> {
        self.instances.get(idx)
    }


    /// Returns an iterator over the instances.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }


    /// Returns the instances as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Instance] {
        &self.instances[..]
    }


    /// Returns the labels in order.
    pub fn labels(&self) -> Vec<Label> {
        self.iter().map(Instance::label).collect()
    }


    /// Returns the weights in order.
    pub fn weights(&self) -> Vec<f64> {
        self.iter().map(Instance::weight).collect()
    }


    /// Returns the sum of the weights.
    pub fn total_weight(&self) -> f64 {
        self.iter().map(Instance::weight).sum()
    }


    /// Returns the distinct labels in ascending order.
    pub fn unique_labels(&self) -> Vec<Label> {
        self.iter()
            .map(Instance::label)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }


    /// Returns the order-preserving concatenation `self ++ other`.
    /// No deduplication is performed.
    pub fn concat(&self, other: &Self) -> Result<Self> {
        if other.is_empty() { return Ok(self.clone()); }
        if self.is_empty() { return Ok(other.clone()); }

        if self.n_feature != other.n_feature {
            return Err(TransferError::DimensionMismatch {
                expected: self.n_feature,
                got: other.n_feature,
            });
        }

        let instances = self.iter()
            .chain(other.iter())
            .cloned()
            .collect::<Vec<_>>();
        let instances = Arc::from(instances);
        Ok(Self { instances, n_feature: self.n_feature })
    }


    /// Returns a new set where the weight of every instance is `weight`.
    ///
    /// Returns `TransferError::InvalidInput`
    /// if `weight` is negative or not finite.
    pub fn with_weight(&self, weight: f64) -> Result<Self> {
        check_weight(weight)?;
        let instances = self.iter()
            .map(|inst| inst.reweighted(weight))
            .collect::<Vec<_>>();
        let instances = Arc::from(instances);
        Ok(Self { instances, n_feature: self.n_feature })
    }


    /// Partition `self` into `k` `(train, test)` pairs.
    /// If `seed` is `Some(_)`, the instances are shuffled with that seed
    /// before the partitioning, otherwise the folds are contiguous.
    /// See [`CrossValidation`] for the exact partitioning policy.
    pub fn k_fold_split(&self, k: usize, seed: Option<u64>)
        -> Result<Vec<(Self, Self)>>
    {
        let cv = CrossValidation::new(self).n_folds(k);
        let cv = match seed {
            Some(seed) => cv.seed(seed).shuffle(),
            None => cv,
        };
        cv.folds()
    }


    /// Returns the sub-set of `self` at the positions `ix`.
    pub(crate) fn subset<T>(&self, ix: T) -> Self
        where T: AsRef<[usize]>
    {
        let instances = ix.as_ref()
            .iter()
            .map(|&i| self.instances[i].clone())
            .collect::<Vec<_>>();
        let instances = Arc::from(instances);
        Self { instances, n_feature: self.n_feature }
    }


    /// Split `self` into two sets.
    /// The test set consists of `ix[start..end]`,
    /// the training set consists of the rest of `ix`.
    pub(crate) fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Self, Self)
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();
        let mut train_ix = Vec::with_capacity(ix.len() - (end - start));
        train_ix.extend_from_slice(&ix[..start]);
        train_ix.extend_from_slice(&ix[end..]);

        let train = self.subset(train_ix);
        let test = self.subset(&ix[start..end]);
        (train, test)
    }
}


impl Index<usize> for InstanceSet {
    type Output = Instance;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.instances[idx]
    }
}


impl<'a> IntoIterator for &'a InstanceSet {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
