use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use credit_ai::config::AppConfig;
use credit_ai::engine::{
    CreditAnalysisPipeline, CreditAnalysisResult, CreditRequest, CustomerProfile, EmploymentStatus,
    EngineConfig, NetworkWeights, ProductCatalog, ProductType,
};
use credit_ai::error::AppError;
use credit_ai::telemetry;
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Decision Engine",
    about = "Run the four-stage credit approval pipeline from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one applicant described in a JSON file
    Analyze(AnalyzeArgs),
    /// Walk a canned strong applicant through the pipeline
    Demo,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// JSON file holding `{ "profile": ..., "request": ... }`
    #[arg(long)]
    input: PathBuf,
    /// Override the product catalog with a CSV export
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Override the network weight artifact with a JSON export
    #[arg(long)]
    weights: Option<PathBuf>,
}

/// One analysis submission as accepted on the command line.
#[derive(Debug, Deserialize)]
struct AnalysisInput {
    profile: CustomerProfile,
    request: CreditRequest,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Demo => run_demo(&config),
    }
}

fn run_analyze(mut args: AnalyzeArgs, config: &AppConfig) -> Result<(), AppError> {
    let catalog_path = args.catalog.take().or_else(|| config.assets.catalog_path.clone());
    let weights_path = args.weights.take().or_else(|| config.assets.weights_path.clone());

    let mut engine_config = EngineConfig::standard();
    if let Some(path) = catalog_path {
        engine_config.catalog = ProductCatalog::from_path(path)?;
    }
    if let Some(path) = weights_path {
        engine_config.weights = NetworkWeights::from_path(path)?;
    }

    let input: AnalysisInput = serde_json::from_reader(File::open(&args.input)?)?;

    let pipeline = CreditAnalysisPipeline::new(engine_config)?;
    info!(input = %args.input.display(), "running credit analysis");

    let result = pipeline.analyze(&input.profile, &input.request)?;
    render_result(&result);
    Ok(())
}

fn run_demo(_config: &AppConfig) -> Result<(), AppError> {
    let profile = CustomerProfile {
        age: 35,
        income: 8_500.0,
        credit_score: 780,
        employment_status: EmploymentStatus::Employed,
        debt_to_income_ratio: 0.25,
        time_at_job_months: 48,
        has_bank_account: true,
        has_bacen_restriction: false,
        num_credit_inquiries: 1,
        num_existing_loans: 1,
    };
    let request = CreditRequest {
        requested_amount: 25_000.0,
        product_type: ProductType::PersonalLoan,
        requested_installments: Some(24),
        purpose: Some("working capital".to_string()),
    };

    let pipeline = CreditAnalysisPipeline::new(EngineConfig::standard())?;
    let result = pipeline.analyze(&profile, &request)?;
    render_result(&result);
    Ok(())
}

fn render_result(result: &CreditAnalysisResult) {
    println!("Credit analysis ({})", result.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();

    println!("Persona screening");
    match result.persona.tier() {
        Some(tier) => println!("- classified as {}", tier.label()),
        None => {
            let reason = result
                .persona
                .rejection()
                .map(|reason| reason.summary())
                .unwrap_or_default();
            println!("- rejected: {reason}");
        }
    }
    println!("- rules visited: {}", result.persona.decision_path.join(" -> "));

    if let Some(limit) = &result.limit {
        println!("\nCredit limit");
        match limit.offer() {
            Some(offer) => {
                println!(
                    "- {} up to {:.2}, {}x of {:.2} at {:.2}% a.m.",
                    offer.product_type.label(),
                    offer.approved_limit,
                    offer.max_installments,
                    offer.monthly_installment,
                    offer.interest_rate * 100.0
                );
            }
            None => println!("- no feasible offer in the catalog"),
        }
    }

    if let Some(risk) = &result.risk {
        println!("\nRisk assessment");
        println!("- score {:.2}/10 ({})", risk.risk_score, risk.risk_level.label());
        for (factor, contribution) in &risk.factor_contributions {
            println!(
                "- {}: {} ({:.2})",
                factor, contribution.dominant_term, contribution.weight
            );
        }
    }

    if let Some(decision) = &result.decision {
        println!("\nDecision");
        println!(
            "- {} at {:.1}% confidence",
            decision.status.label(),
            decision.confidence * 100.0
        );
        println!(
            "- probabilities: approved {:.3}, under_review {:.3}, rejected {:.3}",
            decision.class_probabilities[0],
            decision.class_probabilities[1],
            decision.class_probabilities[2]
        );
        for factor in &result.key_factors {
            println!("- {factor}");
        }
    }

    println!("\nSummary: {}", result.summary);
}
