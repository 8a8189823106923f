//! Rank command - score candidate meals for one or more goals

use super::{print_json, Context};
use anyhow::Result;
use clap::Args;
use mealfinder_cli::output::{
    format_count, format_duration, format_macros, format_miles, format_score, Status,
};
use mealfinder_core::Error as CoreError;
use mealfinder_geo::Coordinate;
use mealfinder_meals::{
    annotate_distances, infer_goal, sample_meals, FitnessGoal, GoalInference, GoalMatchResult,
    MealCandidate, Preferences, RankingPipeline, ScoredMeal,
};
use mealfinder_telemetry::{metrics, Event, Timer};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments for `mealfinder rank`
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Goal text; repeat to rank for several goals
    #[arg(short, long = "goal", required = true)]
    goals: Vec<String>,

    /// JSON file with an array of meal candidates (defaults to the sample catalog)
    #[arg(long)]
    candidates: Option<PathBuf>,

    /// Preferred cuisine
    #[arg(long)]
    cuisine: Option<String>,

    /// Preferred flavor profile
    #[arg(long)]
    flavor: Option<String>,

    /// Ingredient to avoid; repeatable
    #[arg(short = 'x', long)]
    exclude: Vec<String>,

    /// Maximum number of meals to print
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Drop meals farther than this many miles
    #[arg(long)]
    max_distance: Option<f64>,

    /// Latitude of the user, used with --lon to compute distances
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of the user
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Fail when no meal survives filtering
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Serialize)]
struct RankOutput<'a> {
    goals: &'a [GoalMatchResult],
    total_candidates: usize,
    results: Vec<RankedEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    #[serde(flatten)]
    meal: &'a ScoredMeal,
    suits: GoalInference,
}

/// Run rank command
pub fn run(ctx: &Context, args: RankArgs) -> Result<()> {
    let timer = Timer::start("rank.duration_ms");
    let _span = tracing::info_span!("rank", goals = args.goals.len()).entered();

    let matcher = ctx.matcher();
    let mut matches = Vec::with_capacity(args.goals.len());
    for text in &args.goals {
        let result = matcher.match_goal(text).map_err(CoreError::from)?;
        metrics().increment("goals.matched");
        if !result.is_confident() {
            metrics().increment("goals.low_confidence");
            Status::warning(&format!(
                "\"{}\" is a weak match for {} ({}%)",
                text.trim(),
                result.matched_goal.display_name(),
                result.confidence
            ));
        }
        matches.push(result);
    }
    let goals: Vec<FitnessGoal> = matches.iter().map(|m| m.matched_goal).collect();

    let mut candidates = load_candidates(args.candidates.as_deref())?;
    metrics().gauge("candidates.loaded", candidates.len() as u64);

    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let origin = Coordinate::try_new(lat, lon)
            .map_err(|e| CoreError::invalid_input(e.to_string()))?;
        let located = annotate_distances(&mut candidates, &origin);
        debug!(located, "Computed distances from origin");
    }

    let schema = &ctx.config.schema;
    let mut pipeline = RankingPipeline::from_config(schema).map_err(CoreError::from)?;
    if args.strict {
        pipeline = pipeline.require_results(true);
    }

    let preferences = build_preferences(&args);
    let limit = args.limit.unwrap_or(schema.ranking.default_limit);

    let ranked = if goals.len() == 1 {
        pipeline.rank(&candidates, goals[0], &preferences, limit)
    } else {
        pipeline.rank_many(&candidates, &goals, &preferences, limit)
    }
    .map_err(CoreError::from)?;

    metrics().increment_by("meals.ranked", ranked.len() as u64);
    Event::new(
        "recommendation",
        serde_json::json!({
            "goals": goals.iter().map(|g| g.id()).collect::<Vec<_>>(),
            "candidates": candidates.len(),
            "returned": ranked.len(),
        }),
    )
    .log();

    let elapsed = timer.stop();

    if ctx.json {
        let output = RankOutput {
            goals: &matches,
            total_candidates: candidates.len(),
            results: ranked
                .iter()
                .enumerate()
                .map(|(i, meal)| RankedEntry {
                    rank: i + 1,
                    meal,
                    suits: infer_goal(&meal.candidate),
                })
                .collect(),
        };
        return print_json(&output);
    }

    let title: Vec<&str> = goals.iter().map(|g| g.display_name()).collect();
    Status::header(&format!("Top meals for {}", title.join(" + ")));

    if ranked.is_empty() {
        Status::info("No meals matched your filters");
        return Ok(());
    }

    for (i, meal) in ranked.iter().enumerate() {
        print_meal(i + 1, meal);
    }

    println!();
    Status::success(&format!(
        "Ranked {} in {}",
        format_count(candidates.len(), "candidate", "candidates"),
        format_duration(elapsed)
    ));

    Ok(())
}

fn build_preferences(args: &RankArgs) -> Preferences {
    let mut preferences = Preferences::new();
    if let Some(cuisine) = &args.cuisine {
        preferences = preferences.with_cuisine(cuisine);
    }
    if let Some(flavor) = &args.flavor {
        preferences = preferences.with_flavor(flavor);
    }
    for ingredient in &args.exclude {
        preferences = preferences.exclude(ingredient);
    }
    if let Some(miles) = args.max_distance {
        preferences = preferences.with_max_distance(miles);
    }
    preferences
}

fn load_candidates(path: Option<&Path>) -> Result<Vec<MealCandidate>> {
    let Some(path) = path else {
        debug!("No candidate file given, using the sample catalog");
        return Ok(sample_meals());
    };

    if !path.exists() {
        return Err(CoreError::file_not_found(path)
            .with_context("While loading meal candidates")
            .into());
    }

    let content = std::fs::read_to_string(path).map_err(CoreError::from)?;
    let candidates: Vec<MealCandidate> = serde_json::from_str(&content).map_err(|e| {
        CoreError::from(e).with_context(format!("While parsing {}", path.display()))
    })?;

    debug!(path = %path.display(), count = candidates.len(), "Loaded candidates");
    Ok(candidates)
}

fn print_meal(position: usize, meal: &ScoredMeal) {
    let candidate = &meal.candidate;
    println!();
    println!(
        "{:>3}. {} {}",
        position,
        candidate.dish_name.bold(),
        format!("· {}", candidate.restaurant_name).dimmed()
    );

    let mut details = vec![format_score(meal.relevance_score).green().to_string()];
    match candidate.usable_nutrition() {
        Some(nutrition) => details.push(format_macros(nutrition)),
        None => details.push("nutrition unknown".dimmed().to_string()),
    }
    if let Some(miles) = candidate.distance_miles {
        details.push(format_miles(miles));
    }
    if let Some(cuisine) = &candidate.cuisine {
        details.push(cuisine.clone());
    }
    println!("     {}", details.join("  "));

    let suits = infer_goal(candidate);
    println!(
        "     {}",
        format!("suits {} ({}%)", suits.goal.display_name(), suits.confidence).dimmed()
    );
}
