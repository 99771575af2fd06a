use anyhow::Context;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use reciperag_cli::assistant::{classify_input, Assistant, Input};
use reciperag_cli::{init_tracing, load_settings};
use reciperag_core::corpus::load_recipes;
use reciperag_core::types::CollectionSpec;
use reciperag_embed::get_default_embedder;
use reciperag_llm::OpenAiChatClient;
use reciperag_vector::LanceIndex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = load_settings()?;

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let book = load_recipes(&settings.data.resolved_recipes_path(&cwd))
        .context("failed to load recipes")?;
    let embedder = get_default_embedder(&settings).context("failed to create embedder")?;
    let chat =
        OpenAiChatClient::for_chat(&settings.openai).context("failed to create chat client")?;
    let index = LanceIndex::open(&settings.data.resolved_index_dir(&cwd))
        .await
        .context("failed to open vector index")?;

    let assistant = Assistant {
        index: &index,
        embedder: embedder.as_ref(),
        chat: &chat,
        spec: CollectionSpec::document(&settings.assistant.collection, embedder.dim()),
        top_k: settings.assistant.top_k,
        max_context_chars: settings.assistant.max_context_chars,
    };
    assistant
        .ensure_ingested(&book, settings.assistant.insert_batch_size)
        .await
        .context("failed to ingest recipes")?;

    println!("\n✅ Recipe Assistant ready.");
    println!("Ask any cooking question, or type 'exit'.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Q: ");
        std::io::stdout().flush().ok();
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        let question = match classify_input(&line) {
            Input::Blank => continue,
            Input::Exit => break,
            Input::Question(q) => q,
        };

        let answers = match assistant.answer(question).await {
            Ok(answers) => answers,
            Err(e) => {
                error!(error = %e, "failed to answer");
                continue;
            }
        };
        println!("\n--- RAG ANSWER ---");
        println!("{}", answers.rag);
        println!("\n--- NO-RAG ANSWER (BASELINE LLM) ---");
        println!("{}\n", answers.no_rag);
    }

    drop(assistant);
    drop(index);
    println!("🔒 Closed vector index.");
    Ok(())
}
