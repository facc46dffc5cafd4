//! lawnbook - Main CLI Entry Point

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};

use lawnbook::{
    book::fixtures,
    cli::{Args, Commands, Config},
    display,
    doctor::JobDoctor,
    season::month_of,
    telemetry, Job, JobBook, JobStore, SeasonCalendar,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    telemetry::init(args.verbosity().log_level(&config.logging.default_level))?;
    debug!(verbosity = args.verbosity().as_str(), "starting");

    let calendar = config.season_calendar()?;
    let store = JobStore::at(args.data.clone().unwrap_or_else(|| config.data_file()));
    let today = Local::now().date_naive();

    match &args.command {
        Commands::Init { force } => init_book(&store, *force)?,
        Commands::List { status, service } => {
            let book = store.load_or_seed()?;
            let jobs: Vec<&Job> = book
                .jobs()
                .filter(|j| status.map_or(true, |s| j.subscription_status == s))
                .filter(|j| service.map_or(true, |s| j.has_service(s)))
                .collect();
            list_jobs(&jobs);
        }
        Commands::Show { id } => {
            let book = store.load_or_seed()?;
            let job = book.get(*id)?;
            let cadence = calendar.effective_cadence(job, today).ok();
            println!("{}", display::job_detail(job, cadence));
        }
        Commands::Add {
            customer,
            address,
            services,
            subscription,
            frequency,
            scheduled,
        } => {
            let mut book = store.load_or_seed()?;
            let Some((first, rest)) = services.split_first() else {
                bail!("At least one --service is required");
            };

            let mut job = Job::new(
                book.next_id()?,
                customer.as_str(),
                address.as_str(),
                *first,
                *subscription,
                *frequency,
                *scheduled,
            );
            for service in rest {
                job = job.with_service(*service);
            }

            let id = job.id;
            book.insert(job)?;
            store.save(&book)?;
            println!("{} job {}", "Added".green(), id);
        }
        Commands::Complete { id, on } => {
            let on = on.unwrap_or(today);
            update_job(&store, *id, |book| book.complete(*id, on).map(|_| ()))?;
            println!("{} job {} on {}", "Completed".green(), id, on);
        }
        Commands::Activate { id } => {
            update_job(&store, *id, |book| book.activate(*id).map(|_| ()))?;
            println!("{} job {}", "Activated".green(), id);
        }
        Commands::Deactivate { id } => {
            update_job(&store, *id, |book| book.deactivate(*id).map(|_| ()))?;
            println!("{} job {}", "Deactivated".green(), id);
        }
        Commands::Cadence { id, on } => {
            let book = store.load_or_seed()?;
            show_cadence(&calendar, book.get(*id)?, on.unwrap_or(today))?;
        }
        Commands::Seasons => {
            println!("{}", display::season_table(&calendar));
        }
        Commands::Validate { today: reference } => {
            let healthy = validate_book(&store, &calendar, reference.unwrap_or(today))?;
            if !healthy {
                std::process::exit(1);
            }
        }
        Commands::Config => show_config(&args, &config, &store)?,
    }

    Ok(())
}

fn init_book(store: &JobStore, force: bool) -> Result<()> {
    if store.exists() && !force {
        bail!(
            "Job book {} already exists (use --force to overwrite)",
            store.path().display()
        );
    }

    let book = fixtures::sample_book()?;
    let path = store.save(&book)?;
    info!(path = %path.display(), "sample job book written");
    println!("{} {} ({} jobs)", "Wrote".green(), path.display(), book.len());
    Ok(())
}

fn list_jobs(jobs: &[&Job]) {
    if jobs.is_empty() {
        println!("No jobs.");
        return;
    }

    println!(
        "{}",
        format!(
            "{:>4}  {:<20} {:<28} {:<10} {:<13} {}",
            "ID", "Customer", "Address", "Status", "Frequency", "Services"
        )
        .bold()
    );
    for job in jobs {
        println!("{}", display::job_line(job));
    }
}

/// Load the book, apply a change, and save it back
fn update_job<F>(store: &JobStore, id: u32, change: F) -> Result<()>
where
    F: FnOnce(&mut JobBook) -> lawnbook::Result<()>,
{
    let mut book = store.load_or_seed()?;
    change(&mut book).with_context(|| format!("Failed to update job {}", id))?;
    store.save(&book)?;
    Ok(())
}

fn show_cadence(calendar: &SeasonCalendar, job: &Job, on: NaiveDate) -> Result<()> {
    let cadence = calendar.effective_cadence(job, on)?;

    if job.is_auto_seasonal() {
        let month = month_of(on);
        let season = calendar
            .season_for(month)
            .map(|rule| rule.label.as_str())
            .unwrap_or("?");
        println!(
            "Job {} on {}: {} ({} default for {})",
            job.id,
            on,
            cadence.to_string().bold(),
            season,
            month.name()
        );
    } else {
        println!("Job {} on {}: {} (explicit)", job.id, on, cadence.to_string().bold());
    }
    Ok(())
}

fn validate_book(store: &JobStore, calendar: &SeasonCalendar, today: NaiveDate) -> Result<bool> {
    let records = if store.exists() {
        store.load_records()?
    } else {
        println!("No job book at {}, checking sample records", store.path().display());
        fixtures::sample_jobs()?
    };

    let report = JobDoctor::new(&records, calendar, today).run_diagnostics();
    report.print();
    Ok(report.is_healthy())
}

fn show_config(args: &Args, config: &Config, store: &JobStore) -> Result<()> {
    println!("{}\n", "lawnbook Configuration".bold());

    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => Config::default_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string()),
    };
    println!("Source:     {}", source);
    println!("Job book:   {}", store.path().display());
    println!("Verbosity:  {}", args.verbosity().as_str());
    println!();

    let toml = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", toml);
    Ok(())
}
