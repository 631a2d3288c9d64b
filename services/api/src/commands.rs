use award_eligibility::analysis::{
    AnalysisSummary, CategoryCatalog, EligibilityEngine, ExtractionOutcome, MatchResult,
    PlainTextExtractor, ScoringConfig, TextExtractor, ThresholdConfig,
};
use award_eligibility::config::{AnalysisSettings, AppConfig};
use award_eligibility::error::AppError;
use clap::Args;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Plain-text or markdown document to score
    pub(crate) file: PathBuf,
    /// JSON or CSV category dataset (defaults to AWARDS_CATALOG_PATH, then the bundled ICONS awards)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Minimum score for an Eligible status
    #[arg(long)]
    pub(crate) eligible: Option<f64>,
    /// Minimum score for a Partially Eligible status
    #[arg(long)]
    pub(crate) partial: Option<f64>,
    /// Scores at or below this value are left out of the ranking
    #[arg(long)]
    pub(crate) inclusion: Option<f64>,
    /// Print the ranking as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeReport {
    pub(crate) file: PathBuf,
    pub(crate) media_type: String,
    pub(crate) categories_evaluated: usize,
    pub(crate) results: Vec<MatchResult>,
    pub(crate) summary: AnalysisSummary,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let settings = AppConfig::load()?.analysis;
    let report = build_report(&args, settings)?;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("failed to render analysis as JSON: {err}"),
        }
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

pub(crate) fn build_report(
    args: &AnalyzeArgs,
    settings: AnalysisSettings,
) -> Result<AnalyzeReport, AppError> {
    let catalog = match &args.catalog {
        Some(path) => CategoryCatalog::from_path(path)?,
        None => settings.load_catalog()?,
    };
    let config = scoring_overrides(settings.scoring, args);

    let bytes = std::fs::read(&args.file)?;
    let media_type = mime_guess::from_path(&args.file)
        .first_or_text_plain()
        .essence_str()
        .to_string();
    debug!(file = %args.file.display(), %media_type, "extracting document");

    let text = match PlainTextExtractor.extract(&media_type, &bytes) {
        ExtractionOutcome::Extracted { text } => text,
        ExtractionOutcome::Failed { reason } => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("could not extract {}: {reason}", args.file.display()),
            )
            .into());
        }
    };

    let engine = EligibilityEngine::new(config);
    let results = engine.analyze(&text, catalog.categories());
    let summary = AnalysisSummary::from_results(&results);

    Ok(AnalyzeReport {
        file: args.file.clone(),
        media_type,
        categories_evaluated: catalog.len(),
        results,
        summary,
    })
}

fn scoring_overrides(mut config: ScoringConfig, args: &AnalyzeArgs) -> ScoringConfig {
    if args.eligible.is_some() || args.partial.is_some() {
        let current = config.thresholds;
        config = config.with_thresholds(ThresholdConfig::new(
            args.eligible.unwrap_or(current.eligible),
            args.partial.unwrap_or(current.partial),
        ));
    }
    if let Some(inclusion) = args.inclusion {
        config = config.with_inclusion_threshold(inclusion);
    }
    config
}

pub(crate) fn render_report(report: &AnalyzeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Award eligibility report for {}", report.file.display());
    let _ = writeln!(
        out,
        "{} of {} categories matched",
        report.results.len(),
        report.categories_evaluated
    );

    for (position, result) in report.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} [{}] score {:.2} ({})",
            position + 1,
            result.category,
            result.category_type.label(),
            result.score,
            result.status.label()
        );
        let _ = writeln!(
            out,
            "   criteria met: {}/{} ({:.0}%)",
            result.checklist.criteria_met,
            result.checklist.total_criteria,
            result.checklist.percentage_met
        );
        for item in &result.checklist.criteria {
            let mark = if item.met { "x" } else { " " };
            let _ = writeln!(out, "   [{mark}] {}", item.text);
        }
        let _ = writeln!(out, "   {}", result.recommendation);
    }

    let _ = writeln!(out);
    for sentence in report.summary.sentences() {
        let _ = writeln!(out, "{sentence}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_eligibility::analysis::EligibilityStatus;
    use std::path::Path;

    const REPORT_TEXT: &str = "The Global Citizenship program builds intercultural \
        understanding and community engagement. Students practice social responsibility, \
        celebrate diversity and inclusion, and align projects with the sustainable \
        development goals.";

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("award-eligibility-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write scratch file");
        path
    }

    fn args(file: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            file: file.to_path_buf(),
            catalog: None,
            eligible: None,
            partial: None,
            inclusion: None,
            json: false,
        }
    }

    #[test]
    fn text_documents_are_scored_against_the_bundled_catalog() {
        let path = scratch_file("citizenship.txt", REPORT_TEXT.as_bytes());

        let report = build_report(&args(&path), AnalysisSettings::default()).expect("report builds");

        assert_eq!(report.media_type, "text/plain");
        assert_eq!(report.categories_evaluated, 8);
        let top = report.results.first().expect("has matches");
        assert_eq!(top.category, "Global Citizenship Award");
        assert_eq!(top.status, EligibilityStatus::Eligible);

        let rendered = render_report(&report);
        assert!(rendered.contains("1. Global Citizenship Award [Individual]"));
        assert!(rendered.contains("[x] "));
    }

    #[test]
    fn threshold_flags_override_configured_scoring() {
        let mut flags = args(Path::new("report.txt"));
        flags.eligible = Some(85.0);
        flags.inclusion = Some(30.0);

        let config = scoring_overrides(ScoringConfig::default(), &flags);

        assert_eq!(config.thresholds.eligible, 85.0);
        assert_eq!(config.thresholds.partial, 60.0);
        assert_eq!(config.inclusion_threshold, 30.0);

        let mut partial_only = args(Path::new("report.txt"));
        partial_only.partial = Some(50.0);
        let config = scoring_overrides(ScoringConfig::default(), &partial_only);
        assert_eq!(config.thresholds.eligible, 80.0);
        assert_eq!(config.thresholds.partial, 50.0);

        assert_eq!(
            scoring_overrides(ScoringConfig::default(), &args(Path::new("report.txt"))),
            ScoringConfig::default()
        );
    }

    #[test]
    fn unsupported_documents_are_rejected() {
        let path = scratch_file("scan.pdf", b"%PDF-1.7");

        let error = build_report(&args(&path), AnalysisSettings::default())
            .expect_err("pdf is not plain text");

        assert!(error.to_string().contains("unsupported media type"));
    }

    #[test]
    fn empty_documents_report_no_matches() {
        let path = scratch_file("empty.txt", b"");

        let report = build_report(&args(&path), AnalysisSettings::default()).expect("report builds");

        assert!(report.results.is_empty());
        assert!(render_report(&report).contains("No strong award matches"));
    }
}
