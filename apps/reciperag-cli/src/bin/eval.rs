use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use reciperag_cli::args::EvalArgs;
use reciperag_cli::{init_tracing, load_settings};
use reciperag_core::corpus::load_recipes;
use reciperag_embed::get_default_embedder;
use reciperag_eval::report::{format_json, format_markdown, format_run, format_summary};
use reciperag_eval::{AcceptanceRule, Benchmark, Harness};
use reciperag_llm::{LlmReranker, OpenAiChatClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = EvalArgs::parse();

    let mut settings = load_settings()?;
    args.apply(&mut settings.eval);
    settings.validate().context("invalid evaluation settings")?;

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let book = load_recipes(&settings.data.resolved_recipes_path(&cwd))
        .context("failed to load recipes")?;
    let embedder = get_default_embedder(&settings).context("failed to create embedder")?;
    let chat = OpenAiChatClient::for_rerank(&settings.openai)
        .context("failed to create rerank client")?;
    let reranker = LlmReranker::new(Arc::new(chat));

    let benchmark: Benchmark = args.benchmark.into();
    let queries = benchmark.queries();
    let runs = args.runs as usize;
    let k = args.k as usize;
    let rule = AcceptanceRule::new(settings.eval.improvement_threshold);

    let harness = Harness {
        book: &book,
        embedder: embedder.as_ref(),
        reranker: &reranker,
        eval: settings.eval.clone(),
        index_dir: settings.data.resolved_index_dir(&cwd),
    };

    let decision = harness
        .evaluate(&queries, runs, k, rule, |i, m| {
            if !args.json {
                println!("{}", format_run(i, runs, k, m));
            }
        })
        .await
        .context("evaluation aborted")?;

    if args.json {
        println!("{}", format_json(benchmark, k, &decision)?);
        return Ok(());
    }
    println!("{}", format_summary(k, &decision));
    println!("\n=== REPORT SNIPPET (MARKDOWN) ===");
    println!("{}", format_markdown(k, &decision));
    Ok(())
}
