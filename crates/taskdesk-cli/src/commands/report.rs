use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Subcommand;
use taskdesk_core::report::{department_report, parse_records, tally_by_status};

#[derive(Subcommand)]
pub enum ReportAction {
    /// Task counts per normalised status
    Status {
        /// JSON array of task records ({"id", "status", "department"})
        file: PathBuf,
    },
    /// Per-department totals and completion rate
    Departments {
        /// JSON array of task records ({"id", "status", "department"})
        file: PathBuf,
    },
}

pub fn run(action: ReportAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReportAction::Status { file } => {
            let records = parse_records(&std::fs::read_to_string(file)?)?;
            let tally: BTreeMap<String, usize> = tally_by_status(&records)
                .into_iter()
                .map(|(status, count)| (status.as_str().to_string(), count))
                .collect();
            println!("{}", serde_json::to_string_pretty(&tally)?);
        }
        ReportAction::Departments { file } => {
            let records = parse_records(&std::fs::read_to_string(file)?)?;
            println!("{}", serde_json::to_string_pretty(&department_report(&records))?);
        }
    }
    Ok(())
}
