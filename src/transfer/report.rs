//! Diagnostics of a transfer run.
use serde::{Serialize, Deserialize};

use super::config::TransferConfig;
use crate::error::Result;
use crate::research::write_trace;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;


/// The two phases of the procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Each source against an empty auxiliary set.
    Ranking,
    /// Each ranked source against the accumulated auxiliary set.
    Accumulation,
}


impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ranking => "Ranking",
            Self::Accumulation => "Accumulation",
        };
        write!(f, "{name}")
    }
}


/// One evaluated weight candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// The phase the candidate was evaluated in.
    pub phase: Phase,
    /// The source the candidate weights.
    pub source_id: String,
    /// The round of the schedule.
    pub iteration: usize,
    /// Weight of each target instance.
    pub target_weight: f64,
    /// Weight of each source instance.
    pub source_weight: f64,
    /// Cross-validated error on the target.
    pub error: f64,
}


/// The outcome of the ranking phase for one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRankEntry {
    /// Id of the source in the pool.
    pub source_id: String,
    /// Optimal weight of each source instance.
    pub best_weight: f64,
    /// Cross-validated error at `best_weight`.
    pub best_error: f64,
    /// The round that produced `best_weight`.
    pub best_iteration: usize,
    /// Number of instances of the source.
    pub n_instances: usize,
}


/// A source merged into the auxiliary set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedSource {
    /// Position of the source in the ranking, starting from `1`.
    pub rank: usize,
    /// Id of the source in the pool.
    pub source_id: String,
    /// Weight of each instance of this source in the auxiliary set.
    pub weight: f64,
    /// Cross-validated error at `weight`.
    pub error: f64,
    /// Number of instances of the source.
    pub n_instances: usize,
    /// Size of the auxiliary set after merging this source.
    pub auxiliary_size: usize,
}


/// Everything a run decided, in a serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    /// Parameters of the run.
    pub config: TransferConfig,
    /// Name of the learner.
    pub learner: String,
    /// Number of target instances.
    pub n_target: usize,
    /// The sources in decreasing order of their optimal weight.
    pub ranking: Vec<SourceRankEntry>,
    /// The sources in the order they were merged.
    pub selected: Vec<SelectedSource>,
    /// Every evaluated candidate of both phases, in evaluation order.
    pub trace: Vec<CandidateRecord>,
}


impl TransferReport {
    /// Returns the ids of the merged sources in merge order.
    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter()
            .map(|s| s.source_id.as_str())
            .collect()
    }


    /// Serialize the report as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }


    /// Write the report to `path` as JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }


    /// Write the candidate trace to `path` as CSV.
    pub fn write_trace_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        write_trace(writer, &self.trace)
    }
}
