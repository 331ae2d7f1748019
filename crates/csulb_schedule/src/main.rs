//! Scrapes the CSULB class-schedule pages and populates the database with
//! buildings, classrooms, and class schedules.
//!
//! ```text
//! csulb_schedule               # insert into the database
//! csulb_schedule --dry-run     # parse only, report counts
//! ```

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::blocking::Client;
use tracing::{info, warn};

use csulb_schedule::config::StoreConfig;
use csulb_schedule::directory::BuildingDirectory;
use csulb_schedule::hours::derive_building_hours;
use csulb_schedule::normalize::Ingestor;
use csulb_schedule::scrape::{self, RawSection};
use csulb_schedule::store::{ScheduleStore, SupabaseStore};

const DEFAULT_BASE_URL: &str =
    "https://web.csulb.edu/depts/enrollment/registration/class_schedule/Spring_2026/By_Subject/";
const DEFAULT_SEMESTER: &str = "Spring 2026";

/// Pause between page fetches; the schedule server is not ours to hammer.
const REQUEST_DELAY: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(about = "Scrape CSULB class-schedule pages into the study-space database")]
struct Args {
    /// Parse and classify everything but write nothing; report counts.
    #[arg(long)]
    dry_run: bool,

    /// Semester tag stamped on every schedule row.
    #[arg(long, default_value = DEFAULT_SEMESTER)]
    semester: String,

    /// Base URL of the by-subject schedule listing.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Skip the building-hours derivation pass after inserting.
    #[arg(long)]
    skip_hours: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    // Credentials are checked up front so a misconfigured write run aborts
    // before any fetching starts.
    let store = if args.dry_run {
        None
    } else {
        let config = StoreConfig::from_env()
            .context("store credentials are required unless --dry-run is given")?;
        Some(SupabaseStore::new(config))
    };

    if let Some(store) = &store {
        info!(semester = %args.semester, "clearing existing schedule rows for semester");
        store.clear_semester(&args.semester)?;
    }

    let client = Client::new();
    info!("fetching subject index");
    let index_html = fetch_page(&client, &format!("{}index.html", args.base_url))
        .context("could not fetch the subject index")?;
    let subject_urls = scrape::subject_page_urls(&index_html, &args.base_url);
    info!(pages = subject_urls.len(), "found subject pages");

    let mut sections: Vec<RawSection> = Vec::new();
    for (i, url) in subject_urls.iter().enumerate() {
        // One bad page must not sink the run; its sections are just absent.
        match fetch_page(&client, url) {
            Ok(html) => {
                let page_sections = scrape::parse_subject_page(&html);
                info!(
                    page = i + 1,
                    total = subject_urls.len(),
                    url = %url,
                    sections = page_sections.len(),
                    "scraped subject page"
                );
                sections.extend(page_sections);
            }
            Err(err) => warn!(url = %url, %err, "failed to fetch subject page, continuing"),
        }
        thread::sleep(REQUEST_DELAY);
    }
    info!(sections = sections.len(), "parsed sections across all subjects");

    let directory = BuildingDirectory::new();
    let mut ingestor = Ingestor::new(
        &directory,
        store.as_ref().map(|s| s as &dyn ScheduleStore),
        &args.semester,
    );
    for section in &sections {
        ingestor.ingest(section)?;
    }
    let summary = ingestor.finish()?;

    let verb = if args.dry_run { "would insert" } else { "inserted" };
    info!(
        "{verb} {} schedule rows ({} sections skipped, {} buildings, {} classrooms)",
        summary.rows_inserted,
        summary.sections_skipped,
        summary.buildings_seen,
        summary.classrooms_seen,
    );
    if !summary.unknown_building_codes.is_empty() {
        warn!(
            codes = ?summary.unknown_building_codes,
            "unknown building codes encountered; extend the building directory"
        );
    }

    if let Some(store) = &store {
        if !args.skip_hours {
            let updated = derive_building_hours(store)?;
            info!(buildings = updated, "building hours derived from schedules");
        }
    }

    Ok(())
}

fn fetch_page(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    client.get(url).send()?.error_for_status()?.text()
}
