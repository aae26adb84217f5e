pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::config::FetchConfig;
use crate::domain::SearchSubject;

#[derive(Parser)]
#[command(name = "centime")]
#[command(about = "Shopping price extraction and comparison", long_about = None)]
pub struct Cli {
    /// Maximum number of result cards to examine
    #[arg(long, global = true)]
    pub max_cards: Option<usize>,

    /// Run the browser with a visible window
    #[arg(long, global = true)]
    pub headed: bool,

    /// Emit machine-readable JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Use the speed-optimized fetch preset (shorter waits, no reader pass)
    #[arg(long, global = true, conflicts_with = "thorough")]
    pub fast: bool,

    /// Use the reliability-optimized fetch preset (longer waits)
    #[arg(long, global = true)]
    pub thorough: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    /// Presets replace the fetch settings wholesale; the individual flags
    /// are applied afterwards so they win over a preset.
    pub fn apply_fetch_overrides(&self, fetch: &mut FetchConfig) {
        if self.fast {
            *fetch = FetchConfig::fast();
        } else if self.thorough {
            *fetch = FetchConfig::thorough();
        }
        if let Some(max_cards) = self.max_cards {
            fetch.max_cards = Some(max_cards);
        }
        if self.headed {
            fetch.headless = false;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape product listings for a raw search query
    Scrape {
        /// Search query, e.g. "Apple iPhone 13 noir 128GB"
        query: String,
    },
    /// Analyze prices for a product subject
    Analyze(SubjectArgs),
    /// Print the composed search query for a subject without scraping
    Query(SubjectArgs),
}

#[derive(Args)]
pub struct SubjectArgs {
    /// Product name
    pub name: String,

    /// Brand, prepended to the query
    #[arg(long)]
    pub brand: Option<String>,

    /// Color, appended after the name
    #[arg(long)]
    pub color: Option<String>,

    /// Category, appended after the color
    #[arg(long)]
    pub category: Option<String>,

    /// Reference image URL, validated before any search
    #[arg(long)]
    pub image_url: Option<String>,

    /// Extra search keyword, repeatable
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,
}

impl SubjectArgs {
    pub fn into_subject(self) -> SearchSubject {
        let mut subject = SearchSubject::new(self.name);
        subject.brand = self.brand;
        subject.color = self.color;
        subject.category = self.category;
        subject.image_url = self.image_url;
        subject.extra_keywords = self.keywords;
        subject
    }
}
