use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use bcx_registry::assistant::{
    score_integrity_now, AssistantService, IntegrityScoreInput, PriceInput, ProjectDraft, Sector,
};
use bcx_registry::config::AppConfig;
use bcx_registry::error::AppError;
use bcx_registry::registry::{
    write_csv, AuthSession, Cart, CartItem, MarketplaceFilter, MemorySessionStore, Transaction,
    UserRole,
};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::infra::{demo_directory, seeded_registry, SeededRegistry};

const EXPORT_PAGE_SIZE: usize = 100;

#[derive(Subcommand, Debug)]
pub(crate) enum AssistantCommand {
    /// Pre-submission completeness check for a draft registration
    Validate(ValidateArgs),
    /// Integrity score, risk tier and findings for a project
    Score(ScoreArgs),
    /// Suggested credit price and range
    Price(PriceArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Sector label, e.g. "Blue Carbon"
    #[arg(long, default_value = "Renewable Energy")]
    pub(crate) sector: String,
    #[arg(long)]
    pub(crate) methodology: Option<String>,
    /// Estimated annual CO2 reduction in tonnes
    #[arg(long)]
    pub(crate) co2_reduction: Option<u64>,
    #[arg(long)]
    pub(crate) vintage: Option<i32>,
    /// Comma-separated UN SDG numbers
    #[arg(long, value_delimiter = ',')]
    pub(crate) sdg: Vec<u8>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[arg(long, default_value = "prj-cli")]
    pub(crate) project_id: String,
    #[arg(long)]
    pub(crate) sector: String,
    #[arg(long)]
    pub(crate) methodology: String,
    #[arg(long)]
    pub(crate) co2_reduction: u64,
    #[arg(long)]
    pub(crate) vintage: i32,
    #[arg(long, default_value = "India")]
    pub(crate) location: String,
}

#[derive(Args, Debug)]
pub(crate) struct PriceArgs {
    #[arg(long)]
    pub(crate) sector: String,
    #[arg(long)]
    pub(crate) integrity_score: i32,
    #[arg(long)]
    pub(crate) vintage: i32,
    /// Comma-separated UN SDG numbers
    #[arg(long, value_delimiter = ',')]
    pub(crate) sdg: Vec<u8>,
}

#[derive(Args, Debug)]
pub(crate) struct LedgerArgs {
    /// Write every ledger entry to this CSV file instead of printing a page
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    #[arg(long, default_value_t = 20)]
    pub(crate) page_size: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Stop after issuance and skip the buyer checkout and retirement steps.
    #[arg(long)]
    pub(crate) skip_checkout: bool,
}

pub(crate) async fn run_assistant(command: AssistantCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let assistant = AssistantService::new(config.assistant.latency_profile());

    match command {
        AssistantCommand::Validate(args) => {
            let draft = ProjectDraft {
                sector: Sector::parse(&args.sector),
                methodology: args.methodology,
                co2_reduction: args.co2_reduction,
                vintage: args.vintage,
                sdg_goals: Some(args.sdg),
                ..ProjectDraft::default()
            };
            print_json(&assistant.validate(&draft).await);
        }
        AssistantCommand::Score(args) => {
            let input = IntegrityScoreInput {
                project_id: args.project_id,
                methodology: args.methodology,
                co2_reduction: args.co2_reduction,
                vintage: args.vintage,
                location: args.location,
                sector: Sector::parse(&args.sector),
            };
            print_json(&assistant.integrity_score(&input).await);
        }
        AssistantCommand::Price(args) => {
            let input = PriceInput {
                sector: Sector::parse(&args.sector),
                integrity_score: args.integrity_score,
                vintage: args.vintage,
                sdg_goals: args.sdg,
            };
            print_json(&assistant.suggest_price(&input).await);
        }
    }

    Ok(())
}

pub(crate) fn run_ledger(args: LedgerArgs) -> Result<(), AppError> {
    let registry = seeded_registry();

    if let Some(path) = args.csv {
        let transactions = all_transactions(&registry)?;
        let file = File::create(&path)?;
        write_csv(&transactions, file)?;
        println!(
            "Exported {} ledger entries to {}",
            transactions.len(),
            path.display()
        );
        return Ok(());
    }

    let page = registry.ledger(args.page, args.page_size)?;
    println!(
        "Public ledger (page {} | {} per page | {} entries)",
        page.page, page.page_size, page.total
    );
    for transaction in &page.transactions {
        print_transaction(transaction);
    }
    Ok(())
}

fn all_transactions(registry: &SeededRegistry) -> Result<Vec<Transaction>, AppError> {
    let mut transactions = Vec::new();
    let mut page = 1;
    loop {
        let batch = registry.ledger(page, EXPORT_PAGE_SIZE)?;
        let total = batch.total;
        transactions.extend(batch.transactions);
        if transactions.len() >= total {
            return Ok(transactions);
        }
        page += 1;
    }
}

fn print_transaction(transaction: &Transaction) {
    let value = transaction
        .total_value
        .map(|value| format!(" | INR {value}"))
        .unwrap_or_default();
    println!(
        "- {} {} {:<10} {} x{} ({} -> {}){}",
        transaction.timestamp.format("%Y-%m-%d"),
        transaction.id,
        transaction.kind.label(),
        transaction.project_name,
        transaction.quantity,
        transaction.from,
        transaction.to,
        value
    );
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Result unavailable: {err}"),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let registry = seeded_registry();
    let directory = demo_directory();
    let store = Arc::new(MemorySessionStore::default());
    let mut session = AuthSession::new(store.clone());

    println!("BCX registry demo");

    let developer = session
        .login(&directory, "developer@bcx.in", "dev123")?
        .clone();
    session.require_role(UserRole::Developer)?;
    println!("\nSigned in as {} ({})", developer.name, developer.email);

    let draft = ProjectDraft {
        name: Some("Chilika Lagoon Seagrass Revival".to_string()),
        sector: Sector::BlueCarbon,
        methodology: Some("VM0033".to_string()),
        co2_reduction: Some(64_000),
        vintage: Some(2024),
        sdg_goals: Some(vec![13, 14]),
        location: Some("Chilika".to_string()),
        state: Some("Odisha".to_string()),
        description: Some("Seagrass meadow restoration across the outer channel".to_string()),
        total_credits: Some(12_000),
        price_per_credit: None,
        developer_id: Some(developer.id.clone()),
        developer_name: developer.organization.clone(),
    };

    let receipt = registry.register_project(draft)?;
    println!(
        "- Registered {} -> status {} (estimated score {})",
        receipt.project_id, receipt.status, receipt.verdict.estimated_score
    );
    for issue in &receipt.verdict.issues {
        println!("  Issue: {issue}");
    }
    for suggestion in &receipt.verdict.suggestions {
        println!("  Suggestion: {suggestion}");
    }

    let project = registry.project(&receipt.project_id)?;
    let integrity = score_integrity_now(&IntegrityScoreInput {
        project_id: project.id.0.clone(),
        methodology: project.methodology.clone(),
        co2_reduction: project.co2_reduction,
        vintage: project.vintage,
        location: project.location.clone(),
        sector: project.sector.clone(),
    });
    println!(
        "\nIntegrity review: {} / 100 ({} risk, {})",
        integrity.integrity_score,
        integrity.risk_level.label(),
        integrity.model
    );
    for finding in &integrity.findings {
        println!("  - {finding}");
    }

    session.logout();
    let admin = session.login(&directory, "admin@bcx.in", "admin123")?.clone();
    session.require_role(UserRole::Admin)?;
    println!("\nSigned in as {} ({})", admin.name, admin.email);

    let approved = registry.approve_project(&receipt.project_id)?;
    println!("- {} -> {}", approved.id, approved.status);
    let issuance = registry.issue_credits(&receipt.project_id, 2_000)?;
    println!(
        "- Issued {} credits; first serials: {}",
        issuance.quantity,
        issuance.serial_numbers.join(", ")
    );

    let advice = registry.price_suggestion(&receipt.project_id)?;
    println!(
        "- Price advice: INR {} (range {}-{}), listed at INR {}",
        advice.suggested_price,
        advice.price_range.0,
        advice.price_range.1,
        approved.price_per_credit
    );

    if args.skip_checkout {
        return Ok(());
    }

    session.logout();
    let buyer = session.login(&directory, "buyer@bcx.in", "buyer123")?.clone();
    session.require_role(UserRole::Buyer)?;
    println!("\nSigned in as {} ({})", buyer.name, buyer.email);

    let listings = registry.marketplace(&MarketplaceFilter {
        sector: Some(Sector::BlueCarbon),
        ..MarketplaceFilter::default()
    })?;
    println!("- {} blue carbon listings on the marketplace", listings.len());

    let mut cart = Cart::default();
    for (listing, quantity) in listings.iter().zip([250, 400]) {
        cart.add_item(CartItem {
            project_id: listing.id.clone(),
            project_name: listing.name.clone(),
            quantity,
            price_per_credit: listing.price_per_credit,
        });
    }
    cart.save(store.as_ref())?;

    let mut cart = Cart::load(store.as_ref())?;
    println!(
        "- Cart: {} credits worth INR {}",
        cart.total_items(),
        cart.total_value()
    );
    let purchases = registry.checkout(&mut cart, &buyer.id)?;
    for purchase in &purchases {
        print_transaction(purchase);
    }

    let retired_project = purchases
        .first()
        .map(|purchase| purchase.project_id.clone())
        .unwrap_or_else(|| receipt.project_id.clone());
    let retirement = registry.retire(&retired_project, 100, &buyer.id, "FY25 Scope 1 offset")?;
    println!("- Retired {} credits ({})", retirement.quantity, retirement.id);

    let portfolio = registry.buyer_portfolio(&buyer.id)?;
    println!(
        "- Portfolio: {} credits held, {} retired, INR {} spent",
        portfolio.total_credits_owned, portfolio.total_credits_retired, portfolio.total_spent
    );
    for holding in &portfolio.holdings {
        println!(
            "  - {} x{} (avg INR {}, now INR {})",
            holding.project_name, holding.quantity, holding.avg_price, holding.current_price
        );
    }

    let stats = registry.admin_stats()?;
    println!(
        "\nRegistry totals: {} issued | {} traded | {} retired | {} pending approvals",
        stats.total_credits_issued,
        stats.total_credits_traded,
        stats.total_credits_retired,
        stats.pending_approvals
    );

    let page = registry.ledger(1, 5)?;
    println!("\nLatest ledger entries ({} total)", page.total);
    for transaction in &page.transactions {
        print_transaction(transaction);
    }

    Ok(())
}
