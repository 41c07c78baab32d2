//! Look up a title on TMDB and print its season x episode rating table.
//! Usage:
//!   cargo run --bin tmdb_ratings -- <title...>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use tracing_subscriber::EnvFilter;
use tvheat::config::Config;
use tvheat::lookup::{lookup_series, LookupOptions};
use tvheat::models::Kind;
use tvheat::tmdb::TmdbClient;
use tvheat::widgets::heat_map::rating_label;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("usage: tmdb_ratings <title>");
    }

    let config = Config::from_env()?;
    let client = TmdbClient::new(&config)?;
    let options = LookupOptions {
        include_specials: config.include_specials,
    };
    let record = lookup_series(&client, &query, options)
        .await
        .with_context(|| format!("lookup for '{}' failed", query))?;

    println!("{}", record.title);
    match record.overall_rating {
        Some(r) => println!("Rating: {:.1}", r),
        None => println!("Rating: -"),
    }
    println!(
        "Cover: {}",
        record
            .cover
            .as_ref()
            .map(|c| format!("{}x{}", c.width(), c.height()))
            .unwrap_or_else(|| "none".to_string())
    );

    if record.kind != Kind::Series {
        println!("NOT A SERIES");
        return Ok(());
    }

    let columns = record.max_episodes();
    print!("    ");
    for e in 1..=columns {
        print!("{:>4}", e);
    }
    println!();
    for (s, season) in record.padded_episodes().iter().enumerate() {
        print!("{:>3} ", s + 1);
        for rating in season {
            match rating {
                Some(r) => print!("{:>4}", rating_label(*r)),
                None => print!("{:>4}", "."),
            }
        }
        println!();
    }
    Ok(())
}
