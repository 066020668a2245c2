//! The reply model handed to the transport.
//!
//! A reply is plain data: rendered text plus the controls attached to it.
//! Transports decide how to draw buttons and modals.

/// How the transport should deliver a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    /// Answer the command or interaction with a new message.
    New,
    /// Replace the message the pressed control belongs to.
    Update,
    /// Post an additional message after the current one.
    FollowUp,
}

/// Rendered output plus interactive controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Delivery mode.
    pub mode: ReplyMode,
    /// Message text (markdown).
    pub content: String,
    /// Optional thumbnail image reference.
    pub thumbnail: Option<String>,
    /// Buttons attached below the message.
    pub buttons: Vec<Button>,
    /// A modal to open instead of posting a message.
    pub modal: Option<Modal>,
    /// Only visible to the user who triggered it.
    pub ephemeral: bool,
}

impl Reply {
    fn with_mode(mode: ReplyMode, content: impl Into<String>) -> Self {
        Self {
            mode,
            content: content.into(),
            thumbnail: None,
            buttons: Vec::new(),
            modal: None,
            ephemeral: false,
        }
    }

    /// A new message.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_mode(ReplyMode::New, content)
    }

    /// An in-place update of the originating message.
    pub fn update(content: impl Into<String>) -> Self {
        Self::with_mode(ReplyMode::Update, content)
    }

    /// A follow-up message.
    pub fn follow_up(content: impl Into<String>) -> Self {
        Self::with_mode(ReplyMode::FollowUp, content)
    }

    /// A reply that only opens a modal.
    pub fn with_modal(modal: Modal) -> Self {
        Self {
            modal: Some(modal),
            ..Self::with_mode(ReplyMode::New, "")
        }
    }

    /// An ephemeral error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ephemeral: true,
            ..Self::with_mode(ReplyMode::New, message)
        }
    }

    /// Attach buttons.
    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Attach a thumbnail.
    pub fn with_thumbnail(mut self, thumbnail: Option<&str>) -> Self {
        self.thumbnail = thumbnail.map(str::to_string);
        self
    }
}

/// A button carrying its interaction token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Token dispatched when the button is pressed.
    pub token: String,
    /// Emoji shown on the button.
    pub emoji: Option<String>,
    /// Text label.
    pub label: Option<String>,
    /// Greyed out and not pressable.
    pub disabled: bool,
}

impl Button {
    /// A button with only an emoji.
    pub fn new(token: impl Into<String>, emoji: &str) -> Self {
        Self {
            token: token.into(),
            emoji: Some(emoji.to_string()),
            label: None,
            disabled: false,
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Disable the button when `condition` holds. Never re-enables it.
    pub fn disable_if(mut self, condition: bool) -> Self {
        self.disabled |= condition;
        self
    }
}

/// A form shown to the user; submitting it dispatches `token` with the
/// filled-in inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    /// Token dispatched on submit.
    pub token: String,
    /// Modal title.
    pub title: String,
    /// Input fields, in display order.
    pub inputs: Vec<ModalInput>,
}

/// One input of a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalInput {
    /// Free text.
    Text {
        /// Field id in the submission.
        id: String,
        /// Label shown above the input.
        label: String,
        /// Hint shown when empty.
        placeholder: Option<String>,
        /// Pre-filled value.
        value: Option<String>,
        /// Must be filled in.
        required: bool,
    },
    /// A choice among fixed options.
    Select {
        /// Field id in the submission.
        id: String,
        /// Label shown above the input.
        label: String,
        /// The options.
        options: Vec<SelectOption>,
        /// Must be chosen.
        required: bool,
    },
}

impl ModalInput {
    /// The field id of the input.
    pub fn id(&self) -> &str {
        match self {
            Self::Text { id, .. } | Self::Select { id, .. } => id,
        }
    }

    /// The label of the input.
    pub fn label(&self) -> &str {
        match self {
            Self::Text { label, .. } | Self::Select { label, .. } => label,
        }
    }
}

/// One option of a select input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value submitted when chosen.
    pub value: String,
    /// Displayed label.
    pub label: String,
    /// Optional extra line.
    pub description: Option<String>,
}

impl SelectOption {
    /// An option without description.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Displayed text.
    pub label: String,
    /// Value submitted when chosen (an item or move id).
    pub value: String,
}
