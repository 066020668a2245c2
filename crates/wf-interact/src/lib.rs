//! Stateless chat interactions for Wayfinder.
//!
//! Every control a reply carries (button, modal) is identified by a
//! bounded token that encodes all the state needed to handle it later.
//! This crate defines the token codec and its schemas, the registry that
//! routes tokens to handlers, the handlers themselves, the slash-command
//! entry points, and the text rendering of results.
//!
//! [`App`] ties it together for a transport: it owns the library, the
//! configuration, the dice, and the registry.

pub mod app;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod render;
pub mod reply;
pub mod schemas;
pub mod token;

pub use app::App;
pub use config::AppConfig;
pub use dispatch::{Context, CustomId, Interaction, InteractionHandler, InteractionRegistry};
pub use error::{InteractError, InteractResult, TokenError, TokenResult};
pub use reply::{Button, Choice, Modal, ModalInput, Reply, ReplyMode, SelectOption};
pub use token::{TokenSchema, decode_token, encode_token, matches_token};
