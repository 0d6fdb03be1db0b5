// src/main.rs
//
// Bootstrap binary. Wires the core the same way a request host would,
// then runs a single command taken from the argument list:
//
//   framerate-sync search <query> [page]
//   framerate-sync popular [page]
//   framerate-sync movie <tmdb_id>
//   framerate-sync refresh <tmdb_id>
//   framerate-sync track <user_id> <tmdb_id> <json payload>
//   framerate-sync rate <user_id> <tmdb_id> <rating>
//   framerate-sync review <user_id> <tmdb_id> <content> [--spoiler]
//   framerate-sync interaction <user_id> <tmdb_id>
//   framerate-sync stats <user_id>
//   framerate-sync credits <tmdb_id>
//   framerate-sync videos <tmdb_id>
//   framerate-sync person <person_id>
//   framerate-sync person-credits <person_id>

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use serde::Serialize;

use framerate_sync::application::commands::{self, CommandResult};
use framerate_sync::application::dto::{
    RateMovieDto, ReviewMovieDto, SearchMoviesDto, TrackMovieDto,
};
use framerate_sync::application::AppState;
use framerate_sync::cache::{CacheService, RedisCacheStore};
use framerate_sync::config::AppConfig;
use framerate_sync::db::{create_connection_pool, prepare_database};
use framerate_sync::integrations::tmdb::TmdbClient;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 1. LOGGING
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: framerate-sync <command> [args...]");
        return Ok(ExitCode::from(2));
    }

    // 2. CONFIGURATION
    let config = AppConfig::from_env().context("failed to load configuration")?;

    // 3. DATABASE
    let pool = Arc::new(
        create_connection_pool(&config.database_path)
            .with_context(|| format!("failed to open {}", config.database_path.display()))?,
    );
    let stats = prepare_database(&pool).context("database failed startup checks")?;
    log::info!(
        "Database ready: {} movies, {} tracks, {} ratings, {} reviews ({} bytes)",
        stats.movie_count,
        stats.track_count,
        stats.rate_count,
        stats.review_count,
        stats.size_bytes
    );

    // 4. CACHE (degrades to always-miss without a store)
    let cache = match &config.redis_url {
        Some(url) => CacheService::new(Arc::new(RedisCacheStore::new(url, &config.cache_prefix)?))
            .with_timeout(config.cache_timeout),
        None => {
            log::warn!("REDIS_URL not set, catalog cache disabled");
            CacheService::disabled()
        }
    };

    // 5. CATALOG CLIENT
    let catalog = Arc::new(TmdbClient::new(config.tmdb.clone(), cache)?);

    // 6. APPLICATION STATE
    let state = AppState::new(pool, catalog);

    // 7. DISPATCH
    run(&state, &args).await
}

async fn run(state: &AppState, args: &[String]) -> anyhow::Result<ExitCode> {
    let command = args[0].as_str();
    let rest = &args[1..];

    match command {
        "search" => {
            let dto = SearchMoviesDto {
                query: arg(rest, 0, "query")?.to_string(),
                page: rest.get(1).map(|p| parse(p, "page")).transpose()?,
                language: None,
            };
            emit(commands::search_movies(state, dto).await)
        }
        "popular" => {
            let page = rest.first().map(|p| parse(p, "page")).transpose()?;
            emit(commands::popular_movies(state, page.unwrap_or(1), None).await)
        }
        "movie" => emit(commands::get_movie(state, parse(arg(rest, 0, "tmdb_id")?, "tmdb_id")?).await),
        "refresh" => {
            emit(commands::refresh_movie(state, parse(arg(rest, 0, "tmdb_id")?, "tmdb_id")?).await)
        }
        "track" => {
            let (user_id, tmdb_id) = user_and_movie(rest)?;
            let dto: TrackMovieDto = serde_json::from_str(arg(rest, 2, "payload")?)
                .context("track payload must be a JSON object")?;
            emit(commands::track_movie(state, user_id, tmdb_id, dto).await)
        }
        "rate" => {
            let (user_id, tmdb_id) = user_and_movie(rest)?;
            let dto = RateMovieDto {
                rating: parse(arg(rest, 2, "rating")?, "rating")?,
            };
            emit(commands::rate_movie(state, user_id, tmdb_id, dto).await)
        }
        "review" => {
            let (user_id, tmdb_id) = user_and_movie(rest)?;
            let dto = ReviewMovieDto {
                content: arg(rest, 2, "content")?.to_string(),
                is_spoiler: rest.iter().skip(3).any(|a| a == "--spoiler"),
            };
            emit(commands::review_movie(state, user_id, tmdb_id, dto).await)
        }
        "interaction" => {
            let (user_id, tmdb_id) = user_and_movie(rest)?;
            emit(commands::get_movie_interaction(state, user_id, tmdb_id).await)
        }
        "stats" => {
            let user_id = parse(arg(rest, 0, "user_id")?, "user_id")?;
            emit(commands::get_user_stats(state, user_id).await)
        }
        "credits" => {
            emit(commands::movie_credits(state, parse(arg(rest, 0, "tmdb_id")?, "tmdb_id")?).await)
        }
        "videos" => {
            emit(commands::movie_videos(state, parse(arg(rest, 0, "tmdb_id")?, "tmdb_id")?).await)
        }
        "person" => {
            let person_id = parse(arg(rest, 0, "person_id")?, "person_id")?;
            emit(commands::person_details(state, person_id, None).await)
        }
        "person-credits" => {
            let person_id = parse(arg(rest, 0, "person_id")?, "person_id")?;
            emit(commands::person_movie_credits(state, person_id, None).await)
        }
        other => bail!("unknown command: {}", other),
    }
}

/// Prints the command result as JSON; error responses go to stderr
fn emit<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(response) => {
            eprintln!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument: {}", name))
}

fn parse<T>(raw: &str, name: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("invalid {}: {:?}", name, raw))
}

fn user_and_movie(args: &[String]) -> anyhow::Result<(i64, i64)> {
    Ok((
        parse(arg(args, 0, "user_id")?, "user_id")?,
        parse(arg(args, 1, "tmdb_id")?, "tmdb_id")?,
    ))
}
