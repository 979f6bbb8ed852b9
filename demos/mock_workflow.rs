//! Example: running the full workflow over MockBackend, no live LLM needed.
//!
//! Run with: `cargo run --example mock_workflow`

use sceneforge::{format_prompts, LlmCtx, MockBackend, TextToImagePrompts};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Script one reply per stage: rewrite, scenes, prompts
    let mock = MockBackend::new(vec![
        "A storm swept across the small harbor town at dusk.".to_string(),
        "Scene 1: Dark clouds gather over the harbor.\n\
         Scene 2: Fishing boats strain against their moorings."
            .to_string(),
        "Scene 1 - Prompt 1: Storm clouds over a harbor town, wide shot, dramatic lighting\n\
         Scene 1 - Prompt 2: Low angle of a church steeple against black clouds\n\
         Scene 2 - Prompt 1: Fishing boats rocking in choppy water, telephoto, overcast"
            .to_string(),
    ]);

    let ctx = LlmCtx::builder("http://unused")
        .backend(Arc::new(mock))
        .build();
    let workflow = TextToImagePrompts::with_model("llama3.2:3b");

    let run = workflow
        .run(&ctx, "A storm hit the harbor town one evening.")
        .await?;

    println!("Rewritten ({} words):", run.rewrite.rewritten_word_count);
    println!("{}\n", run.rewrite.rewritten_text);
    println!("Scenes found: {}", run.scenes.scene_count);
    println!("Prompts found: {}\n", run.prompts.prompt_count);

    let structured = format_prompts(&run.prompts.image_prompts_text, run.prompts.prompt_count);
    println!("{}", serde_json::to_string_pretty(&structured)?);

    Ok(())
}
