use std::io::Read;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use uuid::Uuid;

use cars_core::models::assessment::AssessmentResult;
use cars_core::models::record::AssessmentRecord;
use cars_core::models::subscale::SubscaleKey;
use cars_scoring::catalog::{self, Language};
use cars_scoring::collect::collect_answers;
use cars_scoring::{Screening, validate};
use cars_storage::export;
use cars_storage::repository::{AssessmentRepository, RecordFilter, save_all};
use cars_storage::stats;

use crate::cli::ExportFormat;
use crate::config::{self, CarsConfig};
use crate::store::Store;

pub fn questions(language: Language) {
    for q in catalog::questions() {
        let marker = if q.is_special { " [yes/no]" } else { "" };
        println!("{:>2}. {}{}", q.id, q.text(language), marker);
    }
    let labels = |options: &[catalog::RatingOption]| {
        options
            .iter()
            .map(|o| format!("{} = {}", o.value, o.label))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("\nItems 1-24: {}", labels(catalog::rating_options()));
    println!("Item {}:    {}", catalog::SELF_HARM_ITEM_ID, labels(catalog::special_options()));
}

fn read_form(input: &Path) -> Result<serde_json::Value> {
    let contents = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)
            .wrap_err_with(|| format!("failed to read form at {}", input.display()))?
    };
    let form: serde_json::Value = serde_json::from_str(&contents).wrap_err("form is not valid JSON")?;
    if !form.is_object() {
        tracing::warn!("form is not a JSON object; every answer defaults to 0");
    }
    Ok(form)
}

pub struct ScoreArgs {
    pub input: PathBuf,
    pub respondent: Option<String>,
    pub save: bool,
    pub strict: bool,
    pub json: bool,
}

pub async fn score(config: &CarsConfig, args: ScoreArgs) -> Result<()> {
    let form = read_form(&args.input)?;

    if args.strict {
        validate::check_answers(&collect_answers(&form))?;
    }

    let screening = Screening::with_thresholds(config.thresholds)?;
    let result = screening.run(&form).map_err(|e| {
        tracing::error!(error = %e, "scoring pipeline failed");
        eyre::eyre!("scoring failed, please try again")
    })?;

    let record = AssessmentRecord::new(result, args.respondent);
    if args.save {
        let store = Store::open(&config.store).await;
        store.save(&record).await?;
        tracing::info!(id = %record.id, "assessment saved");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_result(&record.result);
        if args.save {
            println!("\nSaved as {}", record.id);
        }
    }
    Ok(())
}

fn print_result(result: &AssessmentResult) {
    println!("Date:       {}", result.taken_at());
    println!("Risk level: {}", result.risk_level());
    if result.self_harm_flagged() {
        println!("            (self-harm override)");
    }
    println!("{}\n", result.classification().interpretation);
    println!("{:<20} {:>5} {:>5}", "Subscale", "Raw", "T");
    for key in SubscaleKey::ALL {
        let show = |v: Option<i32>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:>5} {:>5}",
            key.label(),
            show(result.raw_scores().get(key)),
            show(result.standard_scores().get(key)),
        );
    }
}

pub async fn show(config: &CarsConfig, id: Uuid) -> Result<()> {
    let store = Store::open(&config.store).await;
    let record = store.get(id).await?;
    if let Some(respondent) = &record.respondent_id {
        println!("Respondent: {respondent}");
    }
    print_result(&record.result);
    Ok(())
}

pub async fn history(config: &CarsConfig, filter: RecordFilter) -> Result<()> {
    let store = Store::open(&config.store).await;
    let records = store.list(&filter).await?;
    if records.is_empty() {
        println!("No assessments stored.");
        return Ok(());
    }
    for r in &records {
        let total = r
            .result
            .standard_scores()
            .get(SubscaleKey::Total)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let flag = if r.result.self_harm_flagged() { " !" } else { "" };
        println!(
            "{}  {}  {:<14} T={:<4}{}  {}",
            r.id,
            r.result.taken_at(),
            r.result.risk_level().label(),
            total,
            flag,
            r.respondent_id.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub async fn statistics(config: &CarsConfig) -> Result<()> {
    let store = Store::open(&config.store).await;
    let records = store.list(&RecordFilter::all()).await?;
    let s = stats::statistics(&records);
    println!("Assessments: {}", s.total);
    for (level, entry) in &s.by_risk_level {
        println!(
            "  {:<16} {:>5} ({} respondents)",
            level.label(),
            entry.count,
            entry.unique_respondents
        );
    }
    println!("Self-harm flags: {}", stats::count_self_harm(&records));
    Ok(())
}

pub async fn status(config: &CarsConfig) -> Result<()> {
    let store = Store::open(&config.store).await;
    let records = store.list(&RecordFilter::all()).await?;
    let summary = stats::summarize(&records)?;
    println!("Assessments stored: {}", summary.stored);
    println!("Schema version:     {}", summary.schema_version);
    println!("Approx size:        {} bytes", summary.approx_size_bytes);
    if let Some(latest) = &summary.latest {
        println!("\nLatest ({}):", latest.id);
        print_result(&latest.result);
    }
    Ok(())
}

pub async fn export(config: &CarsConfig, format: ExportFormat, out: Option<PathBuf>) -> Result<()> {
    let store = Store::open(&config.store).await;
    let records = store.list(&RecordFilter::all()).await?;
    if records.is_empty() {
        println!("No data to export.");
        return Ok(());
    }

    let today = jiff::Zoned::now().date();
    let (body, default_name) = match format {
        ExportFormat::Json => (export::to_json(&records)?, export::backup_file_name(today)),
        ExportFormat::Csv => (export::to_csv(&records)?, export::export_file_name(today)),
    };
    let path = out.unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&path, body).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    println!("Exported {} assessments to {}", records.len(), path.display());
    Ok(())
}

pub async fn import(config: &CarsConfig, file: &Path, merge: bool, confirmed: bool) -> Result<()> {
    if !merge && !confirmed {
        return Err(eyre::eyre!(
            "importing replaces every stored assessment; re-run with --yes to confirm, \
             or --merge to keep existing ones"
        ));
    }
    let contents = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;
    let records = export::from_json(&contents)?;
    let store = Store::open(&config.store).await;
    let count = if merge {
        save_all(&store, &records).await?
    } else {
        store.replace_all(&records).await?
    };
    println!("Imported {count} assessments");
    Ok(())
}

pub async fn purge(config: &CarsConfig, confirmed: bool) -> Result<()> {
    if !confirmed {
        return Err(eyre::eyre!(
            "this deletes every stored assessment permanently; re-run with --yes to confirm"
        ));
    }
    let store = Store::open(&config.store).await;
    let count = store.delete_all().await?;
    println!("Deleted {count} assessments");
    Ok(())
}

pub fn config_show(config: &CarsConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn config_init(config: &CarsConfig, path: Option<&Path>) -> Result<()> {
    let written = config::save_config(config, path)?;
    println!("Wrote {}", written.display());
    Ok(())
}
