use tracing::info;

use crate::analysis;
use crate::app::{AppContext, Result};
use crate::browser::{ChromeFetcher, PageFetcher, SOURCE_LABEL};
use crate::domain::{AnalysisReport, SearchSubject};
use crate::extract;

/// Scrape product listings for a raw query and print them.
pub async fn scrape(ctx: &AppContext, query: &str, json: bool) -> Result<()> {
    let records = fetch_and_extract(ctx, query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No products found for \"{query}\"");
        return Ok(());
    }

    println!("{} products found", records.len());
    for (index, record) in records.iter().enumerate() {
        println!("{}. {}", index + 1, record.display_line());
    }

    Ok(())
}

/// Run the full analysis pipeline for a subject: validate, search,
/// extract, aggregate, print.
pub async fn analyze(ctx: &AppContext, subject: SearchSubject, json: bool) -> Result<()> {
    if let Some(ref image_url) = subject.image_url {
        ctx.probe.validate(image_url).await?;
    }

    let query = subject.search_query();
    if !json {
        println!("Search query: {query}");
    }

    let records = fetch_and_extract(ctx, &query).await?;
    let observations = analysis::observations_from_records(&records, SOURCE_LABEL);
    info!(
        records = records.len(),
        observations = observations.len(),
        "collected price observations"
    );

    match analysis::analyze(&subject.name, &query, &observations) {
        Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(report) => print_report(&report),
        Err(e) => println!("Analysis failed: {e}"),
    }

    Ok(())
}

/// Print the composed search query without touching the network.
pub fn query(subject: &SearchSubject) {
    println!("{}", subject.search_query());
}

async fn fetch_and_extract(
    ctx: &AppContext,
    query: &str,
) -> Result<Vec<crate::domain::ProductRecord>> {
    let fetcher = ChromeFetcher::new(ctx.config.fetch.clone()).await?;
    let page = fetcher.fetch_results(query).await?;
    Ok(extract::extract_products(&page.html, ctx.config.fetch.max_cards))
}

fn print_report(report: &AnalysisReport) {
    println!();
    println!("=== Price analysis ===");
    println!("Product: {}", report.subject);
    println!("Query: {}", report.search_query);
    println!(
        "Observations: {} total, {} kept after filtering",
        report.total_observations, report.valid_count
    );
    println!("Average price: {:.2} {}", report.average_price, report.currency);
    println!("Median price: {:.2} {}", report.median_price, report.currency);
    println!("Price range: {}", report.price_range);

    if !report.source_averages.is_empty() {
        println!();
        println!("Average by source:");
        let mut sources: Vec<_> = report.source_averages.iter().collect();
        sources.sort_by(|a, b| a.0.cmp(b.0));
        for (source, average) in sources {
            println!("  {source}: {average:.2} {}", report.currency);
        }
    }
}
