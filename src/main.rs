use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use devtier::models::{
    EnhancedAnalysis, ExistingProfile, ProfileStats, ScoreBreakdown, TierAnalysis,
};
use devtier::{
    calculate_github_score, AnalysisStore, AnalyzerConfig, Config, GitHubClient, SqliteStore,
    TierAnalyzer,
};

#[derive(Parser, Debug)]
#[command(name = "devtier")]
#[command(version = "0.1.0")]
#[command(about = "Score GitHub profiles and classify developers into badge tiers")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format (json, text, markdown)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Database path for cached analyses (defaults to DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Heuristic tier analysis of a GitHub profile
    Analyze {
        /// GitHub username to analyze
        #[arg(short, long)]
        username: String,

        /// Use cached analysis if available
        #[arg(long)]
        cached: bool,
    },
    /// Badge score from known statistics, without network access
    Score {
        #[arg(long)]
        repos: u32,
        #[arg(long)]
        followers: u32,
        /// Account creation time (RFC 3339)
        #[arg(long)]
        created_at: DateTime<Utc>,
        /// Days with contributions over the last year
        #[arg(long)]
        active_days: u32,
    },
    /// Badge score for a GitHub user
    Badge {
        #[arg(short, long)]
        username: String,
    },
    /// Badge score and heuristic analysis, with the higher tier recommended
    Compare {
        #[arg(short, long)]
        username: String,
    },
    /// Drop a cached analysis
    Forget {
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("devtier=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    match &args.command {
        Command::Analyze { username, cached } => {
            let store = open_store(&args, &config)?;

            if *cached {
                if let Some(hit) = store.load(username)? {
                    tracing::info!("Using cached analysis from {}", hit.saved_at);
                    return emit(&hit.analysis, &args, format_analysis_text, format_analysis_markdown);
                }
                tracing::info!("No cached analysis found, performing fresh analysis");
            }

            let analyzer = TierAnalyzer::new(GitHubClient::from_config(&config)?, AnalyzerConfig::from(&config));
            let spinner = spinner(&format!("Analyzing {}", username))?;
            let analysis = analyzer.analyze_profile(username).await;
            spinner.finish_and_clear();
            let analysis = analysis?;

            store.save(&analysis)?;
            emit(&analysis, &args, format_analysis_text, format_analysis_markdown)
        }
        Command::Score {
            repos,
            followers,
            created_at,
            active_days,
        } => {
            let stats = ProfileStats {
                repo_count: *repos,
                follower_count: *followers,
                account_created_at: *created_at,
                annual_active_days: *active_days,
            };
            let breakdown = calculate_github_score(&stats);
            emit(&breakdown, &args, format_breakdown_text, format_breakdown_markdown)
        }
        Command::Badge { username } => {
            let github = GitHubClient::from_config(&config)?;
            let breakdown = badge_score(&github, username).await?;
            emit(&breakdown, &args, format_breakdown_text, format_breakdown_markdown)
        }
        Command::Compare { username } => {
            let analyzer = TierAnalyzer::new(GitHubClient::from_config(&config)?, AnalyzerConfig::from(&config));
            let spinner = spinner(&format!("Comparing tiers for {}", username))?;

            let result = async {
                let breakdown = badge_score(analyzer.provider(), username).await?;
                let existing = ExistingProfile::from_breakdown(username, &breakdown);
                anyhow::Ok(analyzer.enhanced_analysis(username, &existing).await?)
            }
            .await;
            spinner.finish_and_clear();
            let enhanced = result?;

            open_store(&args, &config)?.save(&enhanced.analysis)?;
            emit(&enhanced, &args, format_enhanced_text, format_enhanced_markdown)
        }
        Command::Forget { username } => {
            let store = open_store(&args, &config)?;
            if store.remove(username)? {
                println!("Removed cached analysis for {}", username);
            } else {
                println!("No cached analysis for {}", username);
            }
            Ok(())
        }
    }
}

fn open_store(args: &Args, config: &Config) -> anyhow::Result<SqliteStore> {
    let path = args.database.as_deref().unwrap_or(&config.database_path);
    Ok(SqliteStore::new(path)?)
}

fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

/// Badge input from live data. Missing event history only lowers the
/// activity estimate.
async fn badge_score(github: &GitHubClient, username: &str) -> anyhow::Result<ScoreBreakdown> {
    let user = github.get_user(username).await?;
    let events = github.get_user_events(username).await.unwrap_or_else(|e| {
        tracing::warn!("Could not fetch events for {}: {}", username, e);
        Vec::new()
    });

    if let Some(remaining) = github.rate_limiter().remaining().await {
        tracing::debug!("GitHub API quota remaining: {}", remaining);
    }

    let stats = ProfileStats::from_github(&user, &events, Utc::now());
    tracing::info!("Estimated {} active days for {}", stats.annual_active_days, username);
    Ok(calculate_github_score(&stats))
}

fn emit<T: Serialize>(
    value: &T,
    args: &Args,
    text: fn(&T) -> String,
    markdown: fn(&T) -> String,
) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(value)?,
        "markdown" => markdown(value),
        _ => text(value),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_breakdown_text(breakdown: &ScoreBreakdown) -> String {
    let info = breakdown.tier.info();
    let mut output = String::new();

    output.push_str(&format!("\n=== Developer Badge: {} {} ===\n\n", info.emoji, info.label));
    output.push_str(&format!("Repositories: {:>3}\n", breakdown.repo_score));
    output.push_str(&format!("Followers:    {:>3}\n", breakdown.follower_score));
    output.push_str(&format!("Account age:  {:>3}\n", breakdown.age_score));
    output.push_str(&format!("Activity:     {:>3}\n", breakdown.activity_score));
    output.push_str(&format!("Total:        {:>3}\n", breakdown.total_score));

    output
}

fn format_breakdown_markdown(breakdown: &ScoreBreakdown) -> String {
    let info = breakdown.tier.info();
    let mut output = String::new();

    output.push_str(&format!("# Developer Badge: {} {}\n\n", info.emoji, info.label));
    output.push_str("| Factor | Points |\n|--------|--------|\n");
    output.push_str(&format!("| Repositories | {} |\n", breakdown.repo_score));
    output.push_str(&format!("| Followers | {} |\n", breakdown.follower_score));
    output.push_str(&format!("| Account Age | {} |\n", breakdown.age_score));
    output.push_str(&format!("| Activity | {} |\n", breakdown.activity_score));
    output.push_str(&format!("| **Total** | **{}** |\n", breakdown.total_score));

    output
}

fn format_analysis_text(analysis: &TierAnalysis) -> String {
    let mut output = String::new();
    let info = analysis.tier.info();

    output.push_str(&format!("\n=== Tier Analysis: {} ===\n\n", analysis.username));
    output.push_str(&format!(
        "Tier: {} {} (score {}/100, confidence {}%)\n",
        info.emoji, info.label, analysis.overall_score, analysis.confidence
    ));
    output.push_str(&format!(
        "Developer Type: {} {}\n\n",
        analysis.developer_type_emoji, analysis.developer_type
    ));
    output.push_str(&format!("{}\n", analysis.reasoning));

    let d = &analysis.detailed_analysis;
    output.push_str("\nScores:\n");
    output.push_str(&format!("  Code Quality:       {}/100\n", d.code_quality));
    output.push_str(&format!("  Activity Level:     {}/100\n", d.activity_level));
    output.push_str(&format!("  Community Impact:   {}/100\n", d.community_impact));
    output.push_str(&format!("  Project Diversity:  {}/100\n", d.project_diversity));
    output.push_str(&format!(
        "  Project Quality:    {}/100\n",
        analysis.project_quality.quality_score
    ));

    if !analysis.languages.is_empty() {
        output.push_str("\nLanguages:\n");
        for lang in &analysis.languages {
            output.push_str(&format!(
                "  - {}: {}% ({} repos, {}⭐)\n",
                lang.name, lang.percentage, lang.repo_count, lang.stars
            ));
        }
    }

    if !analysis.expertise.is_empty() {
        output.push_str(&format!("\nExpertise: {}\n", analysis.expertise.join(", ")));
    }

    output.push_str("\nStrengths:\n");
    for strength in &analysis.strengths {
        output.push_str(&format!("  + {}\n", strength));
    }

    output.push_str("\nAreas for Improvement:\n");
    for improvement in &analysis.improvements {
        output.push_str(&format!("  - {}\n", improvement));
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_analysis_markdown(analysis: &TierAnalysis) -> String {
    let mut output = String::new();
    let info = analysis.tier.info();

    output.push_str(&format!("# Tier Analysis: {}\n\n", analysis.username));
    output.push_str(&format!("> {}\n\n", analysis.reasoning));

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Tier | {} {} |\n", info.emoji, info.label));
    output.push_str(&format!("| Overall Score | {}/100 |\n", analysis.overall_score));
    output.push_str(&format!("| Confidence | {}% |\n", analysis.confidence));
    output.push_str(&format!(
        "| Developer Type | {} {} |\n",
        analysis.developer_type_emoji, analysis.developer_type
    ));

    let d = &analysis.detailed_analysis;
    output.push_str("\n## Scores\n\n");
    output.push_str("| Area | Score |\n|------|-------|\n");
    output.push_str(&format!("| Code Quality | {}/100 |\n", d.code_quality));
    output.push_str(&format!("| Activity Level | {}/100 |\n", d.activity_level));
    output.push_str(&format!("| Community Impact | {}/100 |\n", d.community_impact));
    output.push_str(&format!("| Project Diversity | {}/100 |\n", d.project_diversity));
    output.push_str(&format!(
        "| Project Quality | {}/100 |\n",
        analysis.project_quality.quality_score
    ));

    if !analysis.languages.is_empty() {
        output.push_str("\n## Languages\n\n");
        output.push_str("| Language | Share | Repos | Stars |\n");
        output.push_str("|----------|-------|-------|-------|\n");
        for lang in &analysis.languages {
            output.push_str(&format!(
                "| {} | {}% | {} | {} |\n",
                lang.name, lang.percentage, lang.repo_count, lang.stars
            ));
        }
    }

    output.push_str("\n## Strengths\n\n");
    for strength in &analysis.strengths {
        output.push_str(&format!("- {}\n", strength));
    }

    output.push_str("\n## Areas for Improvement\n\n");
    for improvement in &analysis.improvements {
        output.push_str(&format!("- {}\n", improvement));
    }

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_enhanced_text(enhanced: &EnhancedAnalysis) -> String {
    let mut output = format_analysis_text(&enhanced.analysis);
    output.push_str(&format!(
        "\nBadge score: {} points\nRecommended tier: {} (from {})\n",
        enhanced.ipa_score, enhanced.recommended_tier, enhanced.tier_source
    ));
    output
}

fn format_enhanced_markdown(enhanced: &EnhancedAnalysis) -> String {
    let mut output = format_analysis_markdown(&enhanced.analysis);
    output.push_str(&format!(
        "\n**Badge score:** {} points  \n**Recommended tier:** {} (from {})\n",
        enhanced.ipa_score, enhanced.recommended_tier, enhanced.tier_source
    ));
    output
}
