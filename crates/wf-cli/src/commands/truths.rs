use std::path::Path;

use wf_interact::AppConfig;

pub fn run(content: &Path, config: AppConfig) -> Result<(), String> {
    let mut app = super::load_app(content, config)?;
    let replies = app.truths();
    if replies.is_empty() {
        println!("  No truths defined.");
        return Ok(());
    }

    let mut first = 1;
    for reply in &replies {
        if reply.ephemeral {
            return Err(reply.content.clone());
        }
        super::print_reply(reply, first);
        first += reply.buttons.len();
    }
    Ok(())
}
