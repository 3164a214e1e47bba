use super::instance_set::InstanceSet;
use crate::error::{Result, TransferError};


/// An ordered collection of named source datasets.
///
/// The iteration order is the insertion order,
/// which is the stable key used to break ties between sources.
#[derive(Debug, Clone, Default)]
pub struct SourcePool {
    sources: Vec<(String, InstanceSet)>,
}


impl SourcePool {
    /// Construct an empty pool.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }


    /// Append the source `id`.
    /// Returns `Err` if `id` is already in the pool.
    pub fn push<S: Into<String>>(&mut self, id: S, sample: InstanceSet)
        -> Result<()>
    {
        let id = id.into();
        if self.contains(&id) {
            return Err(TransferError::InvalidInput(
                format!("duplicate source id `{id}`")
            ));
        }
        self.sources.push((id, sample));
        Ok(())
    }


    /// Builder-style version of [`SourcePool::push`].
    pub fn with_source<S: Into<String>>(mut self, id: S, sample: InstanceSet)
        -> Result<Self>
    {
        self.push(id, sample)?;
        Ok(self)
    }


    /// Returns `true` if a source named `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.sources.iter().any(|(name, _)| name == id)
    }


    /// Returns the source named `id`.
    pub fn get(&self, id: &str) -> Option<&InstanceSet> {
        self.sources.iter()
            .find(|(name, _)| name == id)
            .map(|(_, sample)| sample)
    }


    /// Returns the number of sources.
    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }


    /// Returns `true` if the pool has no source.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }


    /// Returns the source ids in pool order.
    pub fn ids(&self) -> Vec<&str> {
        self.sources.iter().map(|(id, _)| id.as_str()).collect()
    }


    /// Returns a slice of `(id, sample)` pairs in pool order.
    #[inline]
    pub fn as_slice(&self) -> &[(String, InstanceSet)] {
        &self.sources[..]
    }


    /// Returns an iterator over `(id, sample)` pairs in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InstanceSet)> {
        self.sources.iter().map(|(id, sample)| (id.as_str(), sample))
    }
}
