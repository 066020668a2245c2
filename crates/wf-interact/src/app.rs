//! The transport-facing facade.
//!
//! [`App`] owns the library, the configuration, the dice, and the
//! handler registry. Every entry point returns a [`Reply`]; failures are
//! logged here and turned into ephemeral error replies.

use tracing::{debug, error, warn};
use wf_core::Library;
use wf_mechanics::{Dice, RandomSource};

use crate::commands;
use crate::config::AppConfig;
use crate::dispatch::{Context, Interaction, InteractionRegistry};
use crate::error::{InteractError, InteractResult};
use crate::handlers;
use crate::reply::{Choice, Reply};

/// A running Wayfinder instance.
pub struct App {
    library: Library,
    config: AppConfig,
    rng: Box<dyn RandomSource>,
    registry: InteractionRegistry,
}

impl App {
    /// Create an app with dice seeded from the configuration.
    pub fn new(library: Library, config: AppConfig) -> Self {
        let rng = Box::new(Dice::from_seed(config.seed));
        Self::with_random_source(library, config, rng)
    }

    /// Create an app with a specific random source.
    pub fn with_random_source(
        library: Library,
        config: AppConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            library,
            config,
            rng,
            registry: handlers::registry(),
        }
    }

    /// The content library.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// The configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn run<F>(&mut self, what: &str, f: F) -> Reply
    where
        F: FnOnce(&mut Context<'_>) -> InteractResult<Reply>,
    {
        let mut ctx = Context::new(&self.library, &self.config, self.rng.as_mut());
        f(&mut ctx).unwrap_or_else(|e| error_reply(what, &e))
    }

    /// `/oracle`.
    pub fn oracle(&mut self, id: &str, row: Option<usize>) -> Reply {
        self.run("oracle", |ctx| commands::oracle(ctx, id, row))
    }

    /// Autocomplete for `/oracle`.
    pub fn oracle_autocomplete(&self, query: &str) -> Vec<Choice> {
        commands::oracle_autocomplete(&self.library, &self.config, query)
    }

    /// `/move`.
    pub fn move_(&mut self, id: &str) -> Reply {
        self.run("move", |ctx| commands::move_(ctx, id))
    }

    /// Autocomplete for `/move`.
    pub fn move_autocomplete(&self, query: &str) -> Vec<Choice> {
        commands::move_autocomplete(&self.library, &self.config, query)
    }

    /// `/truths`.
    pub fn truths(&mut self) -> Vec<Reply> {
        let mut ctx = Context::new(&self.library, &self.config, self.rng.as_mut());
        commands::truths(&mut ctx).unwrap_or_else(|e| vec![error_reply("truths", &e)])
    }

    /// `/progress`.
    pub fn progress(&mut self, title: &str, rank: &str) -> Reply {
        self.run("progress", |ctx| commands::progress(ctx, title, rank))
    }

    /// A button press or modal submission.
    pub fn press(&mut self, interaction: &Interaction) -> Reply {
        let Some(handler) = self.registry.dispatch(&interaction.token) else {
            return error_reply(
                "interaction",
                &InteractError::NoHandler(interaction.token.clone()),
            );
        };
        let mut ctx = Context::new(&self.library, &self.config, self.rng.as_mut());
        handler
            .execute(&mut ctx, interaction)
            .unwrap_or_else(|e| error_reply("interaction", &e))
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Log a failure and turn it into an ephemeral reply.
fn error_reply(what: &str, err: &InteractError) -> Reply {
    if err.is_internal() {
        error!(what, error = %err, "content error");
    } else if matches!(err, InteractError::NoHandler(_) | InteractError::Token(_)) {
        warn!(what, error = %err, "rejected interaction");
    } else {
        debug!(what, error = %err, "request failed");
    }
    Reply::error(err.user_message())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing_subscriber::layer::{self, Layer, SubscriberExt};

    use super::*;
    use crate::reply::ReplyMode;
    use wf_core::{RollableItem, Row};
    use wf_mechanics::FixedRolls;

    fn app(rolls: &[u32]) -> App {
        let library = Library::new(
            vec![
                RollableItem::table(
                    "Oracles/AB",
                    "AB",
                    vec![Row::new(1, 50, "A"), Row::new(51, 100, "B")],
                ),
                RollableItem::table("Oracles/Gappy", "Gappy", vec![Row::new(1, 10, "A")]),
            ],
            vec![],
            vec![],
        );
        App::with_random_source(
            library,
            AppConfig::default(),
            Box::new(FixedRolls::new(rolls.to_vec())),
        )
    }

    #[test]
    fn command_errors_become_ephemeral_replies() {
        let mut app = app(&[30]);
        let reply = app.oracle("nonexistent", None);
        assert!(reply.ephemeral);
        assert_eq!(reply.content, "Could not find oracle \"nonexistent\".");
    }

    #[test]
    fn malformed_table_is_reported() {
        let mut app = app(&[50]);
        let reply = app.oracle("Oracles/Gappy", None);
        assert!(reply.ephemeral);
        assert!(reply.content.contains("malformed"));
    }

    /// Counts error-level events.
    #[derive(Clone, Default)]
    struct ErrorEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: layer::Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn content_errors_are_logged_once() {
        let events = ErrorEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        let mut app = app(&[50]);
        let reply = tracing::subscriber::with_default(subscriber, || {
            app.oracle("Oracles/Gappy", None)
        });
        assert!(reply.ephemeral);
        assert_eq!(events.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn press_round_trip() {
        let mut app = app(&[30, 75]);
        let first = app.oracle("Oracles/AB", None);
        assert!(first.content.starts_with("## 🔮 A"));

        let reroll = first.buttons.last().unwrap().token.clone();
        let second = app.press(&Interaction::button(reroll));
        assert_eq!(second.mode, ReplyMode::Update);
        assert!(second.content.starts_with("## 🔮 B"));

        let down = first.buttons[2].token.clone();
        let nudged = app.press(&Interaction::button(down));
        assert!(nudged.content.starts_with("## 🔮 B"));
        assert!(nudged.content.contains("`→ 51`"));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let mut app = app(&[1]);
        let reply = app.press(&Interaction::button("nope:eA=="));
        assert!(reply.ephemeral);
        assert_eq!(reply.content, "This interaction is invalid or has expired.");
    }

    #[test]
    fn seeded_apps_agree() {
        let library = || Library::new(
            vec![RollableItem::table(
                "Oracles/D100",
                "D100",
                (1..=100).map(|i| Row::new(i, i, i.to_string())).collect(),
            )],
            vec![],
            vec![],
        );
        let config = AppConfig::default().with_seed(42);
        let mut a = App::new(library(), config.clone());
        let mut b = App::new(library(), config);
        for _ in 0..5 {
            assert_eq!(
                a.oracle("Oracles/D100", None).content,
                b.oracle("Oracles/D100", None).content
            );
        }
    }
}
