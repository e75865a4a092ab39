use crate::infra::open_session;
use clap::{Args, Subcommand};
use funding_calc::catalog::{self, LevelFilter, ProgramView};
use funding_calc::config::AppConfig;
use funding_calc::error::AppError;
use funding_calc::report::labels::{format_currency, format_range};
use funding_calc::report::{render_document, ResultsPage};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub(crate) enum ProgramsCommand {
    /// List programs, optionally filtered by text and government level
    List(ListArgs),
    /// Show one program by slug
    Show { slug: String },
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Case-insensitive text matched against name and description
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// all, provincial, federal, municipal or private
    #[arg(long, default_value = "all")]
    pub(crate) level: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Write the printable funding document to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ResetArgs {
    /// Also clear the stored scoring result
    #[arg(long)]
    pub(crate) results: bool,
}

pub(crate) fn run_programs(command: ProgramsCommand) -> Result<(), AppError> {
    match command {
        ProgramsCommand::List(args) => {
            let level: LevelFilter = args.level.parse()?;
            let matches = catalog::search(args.search.as_deref().unwrap_or_default(), level);
            if matches.is_empty() {
                println!("No programs match.");
            }
            for program in matches {
                let view = ProgramView::from(program);
                println!(
                    "- {} [{}] {} | up to {} ({}%) | {:?}",
                    program.name,
                    program.slug,
                    view.level_label,
                    view.funding_cap_label,
                    program.funding_percentage,
                    program.status
                );
            }
        }
        ProgramsCommand::Show { slug } => {
            let program = catalog::find_by_slug(&slug)?;
            let view = ProgramView::from(program);
            println!("{} ({})", program.name, program.provider);
            println!("{}", program.description);
            println!(
                "Level: {} | Status: {:?} | Cap: {} | Coverage: {}%",
                view.level_label,
                program.status,
                view.funding_cap_label,
                program.funding_percentage
            );
            println!("Eligibility:");
            for rule in program.eligibility {
                println!("  - {rule}");
            }
            if !program.match_reason.is_empty() {
                println!("Why it matches:");
                for reason in program.match_reason {
                    println!("  - {reason}");
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let session = open_session(&config.calculator)?;
    let page = session.results();

    print_results(&page);

    if let Some(path) = args.output {
        let document = render_document(&session.export_request())?;
        std::fs::write(&path, document.body)?;
        println!("\nWrote {} to {}", document.filename, path.display());
    }
    Ok(())
}

fn print_results(page: &ResultsPage) {
    if let ResultsPage::CouldNotCalculate { message, .. } = page {
        println!("{message}");
    }
    let report = page.report();
    let summary = &report.summary;
    println!("{} ({})", report.company.company, report.source_label);
    println!("- Budget: {}", format_currency(summary.budget));
    println!(
        "- Estimated support: {}",
        format_range(summary.support_low, summary.support_high)
    );
    println!(
        "- Net project cost: {}",
        format_range(summary.net_low, summary.net_high)
    );
    if !report.notice.is_empty() {
        println!("- {}", report.notice);
    }
    println!("Top programs:");
    for program in &report.top_programs {
        println!(
            "  - {} ({}) {}",
            program.title,
            program.status_label,
            format_range(program.amount_low, program.amount_high)
        );
    }
}

pub(crate) fn run_reset(args: ResetArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut session = open_session(&config.calculator)?;
    session.reset();
    if args.results {
        session.clear_results();
    }
    println!(
        "Cleared saved answers in {}",
        config.calculator.state_dir.display()
    );
    Ok(())
}
