mod interactive;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use endo_core::{
    CaseFile, CaseOverview, DiagnosisReport, PeriapicalSymptom, PulpalSymptom, ToothKind,
    ToothReference,
};

#[derive(Parser)]
#[command(name = "endo")]
#[command(about = "Endodontic diagnosis questionnaire CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a case file (YAML, or JSON when the file ends in .json)
    Evaluate {
        /// Path to the case file
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Walk through the questionnaire interactively
    Wizard,
    /// List the pulpal and periapical symptoms with their keys
    Vocabulary,
    /// List the selectable teeth and regions
    Teeth {
        /// Only list one kind (permanent, primary, region, other)
        #[arg(long)]
        kind: Option<ToothKind>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON shape printed by `endo evaluate --format json`.
#[derive(Serialize)]
struct Evaluation<'a> {
    tooth: &'a ToothReference,
    report: &'a DiagnosisReport,
    overview: &'a CaseOverview,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("endo=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Evaluate { file, format }) => {
            let case = CaseFile::load(&file)?;
            let report = case.evaluate();
            let overview = case.overview(&report);
            match format {
                OutputFormat::Text => println!("{overview}"),
                OutputFormat::Json => {
                    let evaluation = Evaluation {
                        tooth: &case.tooth,
                        report: &report,
                        overview: &overview,
                    };
                    println!("{}", serde_json::to_string_pretty(&evaluation)?);
                }
            }
        }
        Some(Commands::Wizard) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let completed = interactive::Session::new(stdin.lock(), stdout.lock()).run()?;
            if completed.is_empty() {
                println!("No case completed.");
            }
        }
        Some(Commands::Vocabulary) => {
            println!("Pulpal symptoms:");
            for symptom in PulpalSymptom::ALL {
                println!("  {:<24} {}", symptom.key(), symptom.label());
            }
            println!("Periapical symptoms:");
            for symptom in PeriapicalSymptom::ALL {
                println!("  {:<24} {}", symptom.key(), symptom.label());
            }
        }
        Some(Commands::Teeth { kind }) => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => ToothKind::ALL.to_vec(),
            };
            for kind in kinds {
                let catalogue = kind.catalogue();
                if catalogue.is_empty() {
                    println!("{kind}: any non-empty label");
                } else {
                    println!("{kind}: {}", catalogue.join(", "));
                }
            }
        }
        None => {
            println!("Use 'endo --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_evaluate_with_format() {
        let cli = Cli::try_parse_from(["endo", "evaluate", "case.json", "--format", "json"])
            .expect("valid arguments");
        match cli.command {
            Some(Commands::Evaluate { file, format }) => {
                assert_eq!(file, PathBuf::from("case.json"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected evaluate command"),
        }
    }

    #[test]
    fn parses_teeth_kind_case_insensitively() {
        let cli = Cli::try_parse_from(["endo", "teeth", "--kind", "Primary"]).expect("valid kind");
        assert!(matches!(
            cli.command,
            Some(Commands::Teeth {
                kind: Some(ToothKind::Primary)
            })
        ));

        assert!(Cli::try_parse_from(["endo", "teeth", "--kind", "molar"]).is_err());
    }
}
