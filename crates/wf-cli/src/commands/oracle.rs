use std::path::Path;

use wf_interact::AppConfig;

pub fn run(content: &Path, config: AppConfig, id: &str, row: Option<usize>) -> Result<(), String> {
    let mut app = super::load_app(content, config)?;
    super::show(&app.oracle(id, row))
}
