use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use cars_core::models::risk::RiskLevel;
use cars_scoring::catalog::Language;

#[derive(Debug, Parser)]
#[command(name = "cars", version, about = "Behavioural risk screening")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "CARS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the questionnaire
    Questions {
        #[arg(long, value_enum, default_value_t = LangArg::En)]
        lang: LangArg,
    },
    /// Score a submitted form (JSON object with fields q0..q24)
    Score {
        /// Form file, or `-` for stdin
        #[arg(long, short)]
        input: PathBuf,
        /// Respondent identifier stored with the result
        #[arg(long)]
        respondent: Option<String>,
        /// Store the result
        #[arg(long)]
        save: bool,
        /// Reject answers outside their question's range instead of scoring them
        #[arg(long)]
        strict: bool,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one stored assessment
    Show { id: Uuid },
    /// List stored assessments, newest first
    History {
        #[arg(long, value_enum)]
        risk_level: Option<RiskArg>,
        #[arg(long)]
        respondent: Option<String>,
        /// Only assessments with the self-harm override
        #[arg(long)]
        self_harm: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Counts per risk level
    Stats,
    /// Summary of the configured store
    Status,
    /// Write all stored assessments to a file
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output path; defaults to a dated file name in the current directory
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Restore assessments from a JSON backup, replacing what is stored
    Import {
        file: PathBuf,
        /// Keep stored assessments and add or update the backup's records
        #[arg(long)]
        merge: bool,
        /// Confirm replacing every stored assessment
        #[arg(long)]
        yes: bool,
    },
    /// Delete every stored assessment
    Purge {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
    /// Inspect or write the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config path
    Init,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LangArg {
    En,
    #[value(alias = "tl")]
    Fil,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Language::English,
            LangArg::Fil => Language::Filipino,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RiskArg {
    Normal,
    AtRisk,
    HighRisk,
}

impl From<RiskArg> for RiskLevel {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Normal => RiskLevel::Normal,
            RiskArg::AtRisk => RiskLevel::AtRisk,
            RiskArg::HighRisk => RiskLevel::HighRisk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}
