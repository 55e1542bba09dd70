//! Reply model
//!
//! Describes what the chat front-end should show in response to an
//! interaction: message text, embeds and rows of interactive controls. The
//! model is independent of any chat SDK; a front-end translates it into its
//! own widgets and hands control identifiers back unchanged.

/// Maximum number of options a select menu can hold
pub const MAX_SELECT_OPTIONS: usize = 25;

/// Maximum length of an option label, in characters
pub const MAX_LABEL_CHARS: usize = 100;

/// Embed colour for listings
pub const COLOR_INFO: u32 = 0x0099FF;
/// Embed colour for completed adds
pub const COLOR_SUCCESS: u32 = 0x00FF00;
/// Embed colour for partially completed adds
pub const COLOR_WARNING: u32 = 0xFFA500;

/// How a reply is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    /// Post as a new, public message
    Message,
    /// Replace the controls of the message the interaction came from
    Update,
    /// Answer privately to the acting user
    Ephemeral,
}

/// A complete reply to one interaction
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub mode: ReplyMode,
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
}

impl Reply {
    /// A public text message
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            mode: ReplyMode::Message,
            content: Some(content.into()),
            embeds: Vec::new(),
            components: Vec::new(),
        }
    }

    /// A private text message
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            mode: ReplyMode::Ephemeral,
            ..Self::message(content)
        }
    }

    /// A public message consisting of an embed and controls
    pub fn listing(embed: Embed, components: Vec<ActionRow>) -> Self {
        Self {
            mode: ReplyMode::Message,
            content: None,
            embeds: vec![embed],
            components,
        }
    }

    /// Replaces the controls of the originating message
    pub fn update(components: Vec<ActionRow>) -> Self {
        Self {
            mode: ReplyMode::Update,
            content: None,
            embeds: Vec::new(),
            components,
        }
    }

    /// A private reply consisting of a single embed
    pub fn ephemeral_embed(embed: Embed) -> Self {
        Self {
            mode: ReplyMode::Ephemeral,
            content: None,
            embeds: vec![embed],
            components: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            fields: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A horizontal row of controls
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRow(pub Vec<Component>);

impl ActionRow {
    /// A row holding a single control
    pub fn single(component: Component) -> Self {
        Self(vec![component])
    }

    /// The first select menu in this row, if any
    pub fn select_menu(&self) -> Option<&SelectMenu> {
        self.0.iter().find_map(|component| match component {
            Component::Select(menu) => Some(menu),
            Component::Button(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Select(SelectMenu),
    Button(Button),
}

impl Component {
    pub fn custom_id(&self) -> &str {
        match self {
            Component::Select(menu) => &menu.custom_id,
            Component::Button(button) => &button.custom_id,
        }
    }

    /// Whether the user can currently act on this control
    pub fn is_enabled(&self) -> bool {
        match self {
            Component::Select(menu) => !menu.options.is_empty(),
            Component::Button(button) => !button.disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectMenu {
    pub custom_id: String,
    pub placeholder: String,
    pub options: Vec<SelectOption>,
}

impl SelectMenu {
    /// Creates a menu, keeping at most `MAX_SELECT_OPTIONS` options
    pub fn new(
        custom_id: impl Into<String>,
        placeholder: impl Into<String>,
        mut options: Vec<SelectOption>,
    ) -> Self {
        options.truncate(MAX_SELECT_OPTIONS);
        Self {
            custom_id: custom_id.into(),
            placeholder: placeholder.into(),
            options,
        }
    }

    /// The label of the option carrying `value`, if present
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// A copy of this menu with a different placeholder
    pub fn with_placeholder(&self, placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub description: String,
    pub value: String,
}

impl SelectOption {
    /// Creates an option, cutting the label to `MAX_LABEL_CHARS` characters
    pub fn new(
        label: impl AsRef<str>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: truncate_chars(label.as_ref(), MAX_LABEL_CHARS).to_string(),
            description: description.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
    pub disabled: bool,
}

impl Button {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Returns at most `max` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
