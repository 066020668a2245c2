//! Routing of interaction tokens to handlers.
//!
//! The registry is built once at startup and only read afterwards.
//! Dispatch picks the first handler whose [`CustomId`] accepts the raw
//! token, so registration order matters when predicates overlap.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};
use wf_core::Library;
use wf_mechanics::{RandomSource, Resolver};

use crate::config::AppConfig;
use crate::error::InteractResult;
use crate::reply::{Button, Reply};
use crate::token::{TokenSchema, encode_token, ensure_fits, matches_token};

/// A pressed button or a submitted modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    /// The token of the control.
    pub token: String,
    /// Submitted modal fields by input id; empty for buttons.
    pub fields: BTreeMap<String, String>,
}

impl Interaction {
    /// A button press.
    pub fn button(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            fields: BTreeMap::new(),
        }
    }

    /// A modal submission.
    pub fn modal_submit(token: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            token: token.into(),
            fields,
        }
    }

    /// A submitted field, trimmed; `None` if missing or blank.
    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields
            .get(id)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// What a handler accepts.
pub enum CustomId {
    /// Exactly this token.
    Exact(String),
    /// Any token the predicate accepts.
    Matches(Box<dyn Fn(&str) -> bool + Send + Sync>),
}

impl CustomId {
    /// Accept every token of schema `S`.
    pub fn schema<S: TokenSchema>() -> Self {
        Self::Matches(Box::new(|token| matches_token::<S>(token)))
    }

    /// Returns true if the token is accepted.
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Exact(id) => id == token,
            Self::Matches(predicate) => predicate(token),
        }
    }
}

impl fmt::Debug for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(id) => f.debug_tuple("Exact").field(id).finish(),
            Self::Matches(_) => f.write_str("Matches(..)"),
        }
    }
}

/// Everything a handler may use while handling one interaction.
pub struct Context<'a> {
    /// The content library.
    pub library: &'a Library,
    /// Runtime configuration.
    pub config: &'a AppConfig,
    /// The dice.
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> Context<'a> {
    /// Create a context.
    pub fn new(library: &'a Library, config: &'a AppConfig, rng: &'a mut dyn RandomSource) -> Self {
        Self {
            library,
            config,
            rng,
        }
    }

    /// A resolver honoring the configured chain depth.
    pub fn resolver(&self) -> Resolver<'a> {
        Resolver::new(self.library).with_max_depth(self.config.max_chain_depth)
    }

    /// Encode a token, logging a warning when it exceeds the limit.
    ///
    /// Returns the token and whether it fits.
    pub fn token<S: TokenSchema>(&self, value: &S::Value) -> (String, bool) {
        let token = encode_token::<S>(value);
        match ensure_fits(&token, self.config.token_limit) {
            Ok(()) => (token, true),
            Err(e) => {
                warn!(schema = S::NAME, error = %e, "token exceeds limit");
                (token, false)
            }
        }
    }

    /// A button for schema `S`, disabled if its token does not fit.
    pub fn button<S: TokenSchema>(&self, value: &S::Value, emoji: &str) -> Button {
        let (token, fits) = self.token::<S>(value);
        Button::new(token, emoji).disable_if(!fits)
    }
}

/// Handles one kind of interaction.
pub trait InteractionHandler {
    /// The tokens this handler accepts.
    fn custom_id(&self) -> CustomId;

    /// Handle an interaction whose token was accepted by
    /// [`custom_id`](Self::custom_id).
    fn execute(&self, ctx: &mut Context<'_>, interaction: &Interaction) -> InteractResult<Reply>;
}

struct Registered {
    custom_id: CustomId,
    handler: Box<dyn InteractionHandler>,
}

/// The handler table.
#[derive(Default)]
pub struct InteractionRegistry {
    handlers: Vec<Registered>,
}

impl InteractionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Earlier registrations take precedence.
    pub fn register(&mut self, handler: impl InteractionHandler + 'static) {
        self.handlers.push(Registered {
            custom_id: handler.custom_id(),
            handler: Box::new(handler),
        });
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The first handler accepting `token`.
    pub fn dispatch(&self, token: &str) -> Option<&dyn InteractionHandler> {
        let (index, found) = self
            .handlers
            .iter()
            .enumerate()
            .find(|(_, r)| r.custom_id.matches(token))?;
        debug!(token, handler = index, custom_id = ?found.custom_id, "dispatching");
        Some(found.handler.as_ref())
    }
}

impl fmt::Debug for InteractionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
