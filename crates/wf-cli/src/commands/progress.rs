use wf_core::Library;
use wf_interact::{App, AppConfig};

/// Progress tracks need no content, so no library is loaded.
pub fn run(config: AppConfig, title: &str, rank: &str) -> Result<(), String> {
    let mut app = App::new(Library::default(), config);
    super::show(&app.progress(title, rank))
}
