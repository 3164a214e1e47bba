//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use super::node::*;
use crate::{Classifier, LearnerError, Label};

use std::path::Path;
use std::fs::File;
use std::io::prelude::*;


/// Decision tree classifier.
/// This struct is a wrapper of `Node`
/// that remembers the dimension it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    root: Node,
    n_feature: usize,
}


impl DecisionTreeClassifier {
    #[inline]
    pub(super) fn new(root: Node, n_feature: usize) -> Self {
        Self { root, n_feature }
    }


    /// Returns the depth of the tree.
    /// A single leaf has depth `0`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Returns the number of leaves.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.root.leaves()
    }


    /// Returns the number of features this tree expects.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_feature
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph DecisionTree {\n")?;

        let info = self.root.to_dot_info(0).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;

        Ok(())
    }
}


impl Classifier for DecisionTreeClassifier {
    type Error = LearnerError;


    fn predict(&self, x: &[f64]) -> Result<Label, Self::Error> {
        if x.len() != self.n_feature {
            return Err(LearnerError::DimensionMismatch {
                expected: self.n_feature,
                got: x.len(),
            });
        }
        Ok(self.root.predict(x))
    }
}
