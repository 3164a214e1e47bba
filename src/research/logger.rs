use colored::Colorize;

use crate::transfer::{CandidateRecord, Phase, SelectedSource, SourceRankEntry};
use crate::error::Result;
use crate::constants::{FULL_WIDTH, STAT_WIDTH};

use std::io::prelude::*;

const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;

/// Header of the CSV trace written by [`write_trace`].
pub const TRACE_HEADER: &str
    = "Phase,Source,Iteration,TargetWeight,SourceWeight,Error\n";


/// Writes one CSV row per evaluated weight candidate,
/// preceded by [`TRACE_HEADER`].
pub fn write_trace<W>(mut writer: W, records: &[CandidateRecord])
    -> Result<()>
    where W: Write
{
    writer.write_all(TRACE_HEADER.as_bytes())?;
    for record in records {
        let line = format!(
            "{},{},{},{},{},{}\n",
            record.phase,
            escape(&record.source_id),
            record.iteration,
            record.target_weight,
            record.source_weight,
            record.error,
        );
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}


/// Quotes a CSV field if it contains a separator or a quote.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}


/// Prints the current settings.
pub(crate) fn print_stats(
    name: &str,
    info: Option<Vec<(&str, String)>>,
    learner_name: &str,
    learner_info: Option<Vec<(&str, String)>>,
)
{
    let header = format!(
        "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
        "", "STATS".bold(), "",
    );
    println!(
        "\n{header}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
        "Procedure".bold(),
        name.bold().green(),
    );
    if let Some(info) = info {
        println!("{}", info_lines(info));
    }

    println!(
        "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
        "Learner".bold(),
        learner_name.bold().green(),
    );
    if let Some(info) = learner_info {
        println!("{}", info_lines(info));
    }
    println!("{:=^FULL_WIDTH$}\n", "".bold());
}


fn info_lines(info: Vec<(&str, String)>) -> String {
    info.into_iter()
        .map(|(key, val)| {
            format!(
                "    + {:<STAT_WIDTH$}\t{:>width$}",
                key,
                val.bold().yellow(),
                width = STAT_WIDTH - 8
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}


pub(crate) fn print_log_header() {
    println!(
        "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
        "".bold().red(),
        "".bold().blue(),
        "TARGET".bold().green(),
        "SOURCE".bold().green(),
        "CV".bold().yellow(),
    );
    println!(
        "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
        "SOURCE".bold().red(),
        "ROUND".bold().blue(),
        "WEIGHT".bold().green(),
        "WEIGHT".bold().green(),
        "ERROR".bold().yellow(),
    );
}


pub(crate) fn print_candidate(record: &CandidateRecord) {
    let tag = match record.phase {
        Phase::Ranking => "[RNK]".bold().magenta(),
        Phase::Accumulation => "[ACC]".bold().cyan(),
    };
    println!(
        "{} {}\t{}\t{}\t{}\t{}",
        tag,
        format!("{:>WIDTH$}", record.source_id).red(),
        format!("{:>WIDTH$}", record.iteration).blue(),
        format!("{:>WIDTH$.PREC_WIDTH$}", record.target_weight).green(),
        format!("{:>WIDTH$.PREC_WIDTH$}", record.source_weight).green(),
        format!("{:>WIDTH$.PREC_WIDTH$}", record.error).yellow(),
    );
}


pub(crate) fn print_ranking(ranking: &[SourceRankEntry]) {
    println!();
    for (rank, entry) in ranking.iter().enumerate() {
        println!(
            "{} {}\t{}\t{}\t{}",
            "[ORD]".bold().bright_yellow(),
            format!("{:>WIDTH$}", entry.source_id).bold().red(),
            format!("{:>WIDTH$}", rank + 1).blue(),
            format!("{:>WIDTH$.PREC_WIDTH$}", entry.best_weight).bold().green(),
            format!("{:>WIDTH$.PREC_WIDTH$}", entry.best_error).bold().yellow(),
        );
    }
    println!();
}


pub(crate) fn print_selected(selected: &SelectedSource) {
    println!(
        "{} {}\t{}\t{}\t{}\t{}\n",
        "[ADD]".bold().bright_green(),
        format!("{:>WIDTH$}", selected.source_id).bold().red(),
        format!("{:>WIDTH$}", selected.rank).blue(),
        format!("{:>WIDTH$.PREC_WIDTH$}", selected.weight).bold().green(),
        format!("{:>WIDTH$}", selected.auxiliary_size).bold().green(),
        format!("{:>WIDTH$.PREC_WIDTH$}", selected.error).bold().yellow(),
    );
}
