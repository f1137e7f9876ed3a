//! Readgraph CLI: command-line interface for the Readgraph recommender
//!
//! Loads a content catalog into memory and runs graph queries and
//! recommendations against it.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use readgraph::graph::{sample_catalog, KnowledgeGraph, RelationType};
use readgraph::recommend::{load_catalog, objective_catalog, Explainer, Recommender, RecommenderConfig, UserContext};
use readgraph::algo::TraversalConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "readgraph", version, about = "Readgraph content graph and recommender CLI")]
struct Cli {
    /// Catalog JSON file (nodes and relations); the built-in sample catalog when omitted
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Recommender YAML configuration
    #[arg(long, global = true, env = "READGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// User context flags shared by recommendation commands
#[derive(clap::Args)]
struct UserArgs {
    /// User identifier
    #[arg(long, default_value = "anonymous")]
    user: String,

    /// Reading history, oldest first
    #[arg(long, value_delimiter = ',')]
    history: Vec<String>,

    /// Preferred cultures
    #[arg(long, value_delimiter = ',')]
    cultures: Vec<String>,

    /// Reading proficiency in [0, 1]
    #[arg(long)]
    proficiency: Option<f64>,
}

impl UserArgs {
    fn context(&self) -> UserContext {
        let context = UserContext::new()
            .with_history(self.history.iter().cloned())
            .with_cultural_preferences(self.cultures.iter().cloned());
        match self.proficiency {
            Some(level) => context.with_proficiency(level),
            None => context,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show graph statistics
    Stats,
    /// List content related to an item
    Related {
        content_id: String,

        #[arg(long, default_value_t = 2)]
        hops: usize,

        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Only follow these relation types
        #[arg(long = "relation", value_delimiter = ',')]
        relations: Vec<String>,
    },
    /// Find a difficulty-constrained learning path
    Path {
        start: String,
        end: String,

        /// Override the configured maximum difficulty jump
        #[arg(long)]
        max_jump: Option<f64>,
    },
    /// Rank candidate content for a user
    Recommend {
        /// Candidate ids; every book in the catalog when omitted
        candidates: Vec<String>,

        #[command(flatten)]
        user: UserArgs,

        #[arg(long, default_value_t = 10)]
        top_k: usize,

        /// Objective weight multipliers, e.g. novelty=2.0
        #[arg(long = "adjust", value_parser = parse_feedback)]
        adjustments: Vec<(String, f64)>,

        /// Also print Pareto fronts
        #[arg(long)]
        pareto: bool,
    },
    /// Explain a single candidate, including what would improve it
    Explain {
        content_id: String,

        #[command(flatten)]
        user: UserArgs,
    },
    /// List the built-in objectives
    Objectives,
}

/// `RUST_LOG` directives when set and valid, otherwise warnings from the library
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("readgraph=warn"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let graph = Arc::new(load_graph(cli.catalog.as_deref())?);
    let config = match &cli.config {
        Some(path) => RecommenderConfig::from_yaml_file(path)?,
        None => RecommenderConfig::default(),
    };
    let recommender = Recommender::with_config(Arc::clone(&graph), config)?;

    match cli.command {
        Commands::Stats => run_stats(&recommender, &cli.format),
        Commands::Related { content_id, hops, limit, relations } => {
            run_related(&graph, &recommender, &content_id, hops, limit, &relations, &cli.format)
        }
        Commands::Path { start, end, max_jump } => {
            run_path(&graph, &recommender, &start, &end, max_jump, &cli.format)
        }
        Commands::Recommend { candidates, user, top_k, adjustments, pareto } => run_recommend(
            &graph,
            recommender,
            candidates,
            &user,
            top_k,
            adjustments,
            pareto,
            &cli.format,
        ),
        Commands::Explain { content_id, user } => run_explain(&recommender, &content_id, &user, &cli.format),
        Commands::Objectives => run_objectives(&recommender, &cli.format),
    }
}

fn load_graph(catalog: Option<&Path>) -> anyhow::Result<KnowledgeGraph> {
    let graph = match catalog {
        Some(path) => load_catalog(path).with_context(|| format!("loading catalog {}", path.display()))?,
        None => KnowledgeGraph::from_seed(&sample_catalog())?,
    };
    info!("Loaded catalog: {} nodes, {} relations", graph.node_count(), graph.edge_count());
    Ok(graph)
}

fn parse_feedback(s: &str) -> Result<(String, f64), String> {
    let (name, factor) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FACTOR, got '{}'", s))?;
    let factor: f64 = factor
        .trim()
        .parse()
        .map_err(|e| format!("invalid factor '{}': {}", factor, e))?;
    Ok((name.trim().to_string(), factor))
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn run_stats(recommender: &Recommender, format: &OutputFormat) -> anyhow::Result<()> {
    let stats = recommender.get_statistics();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Table => {
            println!("Nodes:          {}", stats.num_nodes);
            println!("Edges:          {}", stats.num_edges);
            println!("Average degree: {:.3}", stats.average_degree);

            let mut table = new_table(&["kind", "type", "count"]);
            for (name, count) in &stats.node_types {
                table.add_row(vec!["node".to_string(), name.clone(), count.to_string()]);
            }
            for (name, count) in &stats.relation_types {
                table.add_row(vec!["relation".to_string(), name.clone(), count.to_string()]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn run_related(
    graph: &KnowledgeGraph,
    recommender: &Recommender,
    content_id: &str,
    hops: usize,
    limit: usize,
    relations: &[String],
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let related = if relations.is_empty() {
        recommender.find_related_content(content_id, hops, limit)
    } else {
        let types: Vec<RelationType> = relations.iter().map(|r| RelationType::from(r.as_str())).collect();
        let traversal = TraversalConfig {
            max_hops: hops,
            decay: recommender.config().decay,
            limit,
        };
        readgraph::find_related_content(graph, content_id, Some(&types), &traversal)
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&related)?),
        OutputFormat::Table => {
            if related.is_empty() {
                println!("(no related content)");
                return Ok(());
            }
            let mut table = new_table(&["content", "name", "score"]);
            for (id, score) in &related {
                let name = graph.get_node(id).map(|n| n.display_name()).unwrap_or(id.as_str());
                table.add_row(vec![id.clone(), name.to_string(), format!("{:.4}", score)]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn run_path(
    graph: &KnowledgeGraph,
    recommender: &Recommender,
    start: &str,
    end: &str,
    max_jump: Option<f64>,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let path = match max_jump {
        Some(jump) => readgraph::find_learning_path(graph, start, end, jump),
        None => recommender.find_learning_path(start, end),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&path)?),
        OutputFormat::Table => {
            if path.is_empty() {
                println!("(no learning path from {} to {})", start, end);
                return Ok(());
            }
            let mut table = new_table(&["step", "content", "difficulty"]);
            for (i, id) in path.iter().enumerate() {
                let difficulty = graph
                    .get_node(id)
                    .map(|n| format!("{:.2}", n.difficulty()))
                    .unwrap_or_default();
                table.add_row(vec![(i + 1).to_string(), id.clone(), difficulty]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_recommend(
    graph: &KnowledgeGraph,
    mut recommender: Recommender,
    candidates: Vec<String>,
    user: &UserArgs,
    top_k: usize,
    adjustments: Vec<(String, f64)>,
    pareto: bool,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    if !adjustments.is_empty() {
        let feedback: HashMap<String, f64> = adjustments.into_iter().collect();
        recommender.adjust_weights(&feedback)?;
    }

    let candidates = if candidates.is_empty() {
        graph
            .nodes()
            .filter(|n| n.node_type == readgraph::NodeType::Book)
            .map(|n| n.id.clone())
            .collect()
    } else {
        candidates
    };

    let recs = recommender.recommend(&user.user, &user.context(), &candidates, top_k);
    let fronts = if pareto { recommender.pareto_fronts(&recs) } else { Vec::new() };

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "recommendations": recs,
                "pareto_fronts": fronts,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            if recs.is_empty() {
                println!("(no recommendations)");
                return Ok(());
            }

            let names = recommender.objectives().names();
            let mut header = vec!["rank", "content", "score", "confidence"];
            header.extend(names.iter().copied());
            let mut table = new_table(&header);

            for rec in &recs {
                let mut row = vec![
                    rec.rank.to_string(),
                    rec.content_id.clone(),
                    format!("{:.3}", rec.overall_score),
                    format!("{:.2}", rec.confidence),
                ];
                row.extend(names.iter().map(|name| {
                    rec.objective_scores
                        .get(*name)
                        .map(|s| format!("{:.2}", s))
                        .unwrap_or_default()
                }));
                table.add_row(row);
            }
            println!("{}", table);

            for (i, front) in fronts.iter().enumerate() {
                println!("Front {}: {}", i + 1, front.join(", "));
            }
        }
    }

    Ok(())
}

fn run_explain(
    recommender: &Recommender,
    content_id: &str,
    user: &UserArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let context = user.context();
    let Some(rec) = recommender
        .recommend(&user.user, &context, &[content_id], 1)
        .into_iter()
        .next()
    else {
        bail!("could not score {}", content_id);
    };
    let counterfactual = recommender.counterfactual_explain(content_id, &user.user, &context);
    let summary = Explainer::summarize(&rec);

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "content_id": content_id,
                "explanation": rec.explanation,
                "reasoning": summary,
                "counterfactual": counterfactual,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("{}", summary);
            println!("Score: {:.3}  Confidence: {:.2}", rec.overall_score, rec.confidence);
            for reason in &rec.explanation.reasons {
                println!("  - {}", reason);
            }
            if !counterfactual.suggestions.is_empty() {
                println!(
                    "To improve (up to +{:.3}):",
                    counterfactual.potential_score_improvement
                );
                for suggestion in &counterfactual.suggestions {
                    println!("  - {}", suggestion);
                }
            }
        }
    }

    Ok(())
}

fn run_objectives(recommender: &Recommender, format: &OutputFormat) -> anyhow::Result<()> {
    let catalog = objective_catalog();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Table => {
            let mut table = new_table(&["name", "active weight", "default weight", "maximize", "description"]);
            for info in &catalog {
                let active = recommender
                    .objectives()
                    .get(info.name)
                    .map(|o| format!("{:.2}", o.weight))
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    info.name.to_string(),
                    active,
                    format!("{:.2}", info.default_weight),
                    info.maximize.to_string(),
                    info.description.to_string(),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}
