use crate::error::{ChirpError, Result};
use chrono_tz::Tz;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Environment helpers
// ---------------------------------------------------------------------------

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ChirpError::MissingEnv(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// OAuth 1.0a user-context credentials for one bot account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Load `{PREFIX}_CONSUMER_KEY`, `{PREFIX}_CONSUMER_SECRET`,
    /// `{PREFIX}_ACCESS_TOKEN`, `{PREFIX}_ACCESS_TOKEN_SECRET`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Ok(Self {
            consumer_key: required(&format!("{prefix}_CONSUMER_KEY"))?,
            consumer_secret: required(&format!("{prefix}_CONSUMER_SECRET"))?,
            access_token: required(&format!("{prefix}_ACCESS_TOKEN"))?,
            access_token_secret: required(&format!("{prefix}_ACCESS_TOKEN_SECRET"))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Corpus schema & label strategy
// ---------------------------------------------------------------------------

/// Field names used to read a corpus JSON document.
///
/// Different corpora embed the same structure under different field names
/// (e.g. `verses`/`verse_text` vs `lines`/`line_text`); the schema names them
/// explicitly instead of threading a loose string map through the poster.
#[derive(Debug, Clone)]
pub struct CorpusSchema {
    /// Field on each major unit holding the ordered minor-unit array.
    pub minor_list: String,
    /// Field on each minor unit holding the post text.
    pub text: String,
    /// Field on each major unit holding its human-readable label.
    pub major_label: String,
    /// Field on each minor unit holding its label, when embedded.
    pub minor_label: Option<String>,
}

/// How the minor-unit label is produced.
///
/// Resolved once at configuration time; the poster never re-derives it from
/// key-presence checks.
#[derive(Debug, Clone)]
pub enum LabelStrategy {
    /// Each corpus item embeds its own label (`CorpusSchema::minor_label`).
    Embedded,
    /// Positional lookup into an external ordered label table.
    Lookup(PathBuf),
    /// 1-based decimal rendering of the minor index.
    Ordinal,
}

// ---------------------------------------------------------------------------
// SequentialBotConfig
// ---------------------------------------------------------------------------

/// Configuration for one sequential corpus-walking bot.
#[derive(Debug, Clone)]
pub struct SequentialBotConfig {
    pub credentials: Credentials,
    /// Store key for the persisted cursor document.
    pub state_key: String,
    pub corpus_path: PathBuf,
    pub schema: CorpusSchema,
    pub label_strategy: LabelStrategy,
    /// Post body template with positional `{}` slots for
    /// (text, major label, minor label).
    pub post_template: String,
    /// Profile description template with a `{}` slot for the major label,
    /// applied at the start of each major unit.
    pub description_template: Option<String>,
}

impl SequentialBotConfig {
    /// Load a bot's configuration from `{PREFIX}_*` environment variables.
    ///
    /// Required: the four credential variables, `{PREFIX}_CORPUS_PATH`,
    /// `{PREFIX}_MINOR_LIST_KEY`, `{PREFIX}_TEXT_KEY`,
    /// `{PREFIX}_MAJOR_LABEL_KEY`, `{PREFIX}_TEMPLATE`.
    /// Optional: `{PREFIX}_STATE_KEY` (default `{prefix}_state.json`),
    /// `{PREFIX}_MINOR_LABEL_KEY`, `{PREFIX}_LABEL_TABLE_PATH`,
    /// `{PREFIX}_DESCRIPTION_TEMPLATE`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let minor_label = optional(&format!("{prefix}_MINOR_LABEL_KEY"));
        let label_table = optional(&format!("{prefix}_LABEL_TABLE_PATH"));

        let label_strategy = if minor_label.is_some() {
            LabelStrategy::Embedded
        } else if let Some(path) = &label_table {
            LabelStrategy::Lookup(PathBuf::from(path))
        } else {
            LabelStrategy::Ordinal
        };

        Ok(Self {
            credentials: Credentials::from_env(prefix)?,
            state_key: optional(&format!("{prefix}_STATE_KEY"))
                .unwrap_or_else(|| format!("{}_state.json", prefix.to_lowercase())),
            corpus_path: PathBuf::from(required(&format!("{prefix}_CORPUS_PATH"))?),
            schema: CorpusSchema {
                minor_list: required(&format!("{prefix}_MINOR_LIST_KEY"))?,
                text: required(&format!("{prefix}_TEXT_KEY"))?,
                major_label: required(&format!("{prefix}_MAJOR_LABEL_KEY"))?,
                minor_label,
            },
            label_strategy,
            post_template: required(&format!("{prefix}_TEMPLATE"))?,
            description_template: optional(&format!("{prefix}_DESCRIPTION_TEMPLATE")),
        })
    }
}

// ---------------------------------------------------------------------------
// PhraseBotConfig
// ---------------------------------------------------------------------------

/// Configuration for one constant-phrase bot.
#[derive(Debug, Clone)]
pub struct PhraseBotConfig {
    pub credentials: Credentials,
    /// Identity used to derive the override and kill-switch store keys.
    pub bot_name: String,
    pub constant_phrase: String,
    /// Timezone for date matching and the posting window.
    pub timezone: Tz,
    /// Local hour (0–23) at which the bot is permitted to post.
    pub target_hour: u32,
}

impl PhraseBotConfig {
    /// Load a bot's configuration from `{PREFIX}_*` environment variables.
    ///
    /// Required: the four credential variables, `{PREFIX}_PHRASE`,
    /// `{PREFIX}_TIMEZONE` (IANA name), `{PREFIX}_HOUR`.
    /// Optional: `{PREFIX}_BOT_NAME` (default lowercased prefix).
    pub fn from_env(prefix: &str) -> Result<Self> {
        let tz_var = format!("{prefix}_TIMEZONE");
        let tz_name = required(&tz_var)?;
        let timezone: Tz = tz_name.parse().map_err(|_| ChirpError::InvalidEnv {
            var: tz_var,
            reason: format!("unknown timezone '{tz_name}'"),
        })?;

        let hour_var = format!("{prefix}_HOUR");
        let target_hour: u32 =
            required(&hour_var)?
                .parse()
                .map_err(|_| ChirpError::InvalidEnv {
                    var: hour_var.clone(),
                    reason: "not an integer".to_string(),
                })?;
        if target_hour > 23 {
            return Err(ChirpError::InvalidEnv {
                var: hour_var,
                reason: format!("hour {target_hour} out of range 0-23"),
            });
        }

        Ok(Self {
            credentials: Credentials::from_env(prefix)?,
            bot_name: optional(&format!("{prefix}_BOT_NAME"))
                .unwrap_or_else(|| prefix.to_lowercase()),
            constant_phrase: required(&format!("{prefix}_PHRASE"))?,
            timezone,
            target_hour,
        })
    }
}

/// Store key for a phrase bot's override table.
pub fn overrides_key(bot_name: &str) -> String {
    format!("{bot_name}_overrides.json")
}

/// Store key for a phrase bot's kill-switch document.
pub fn enabled_key(bot_name: &str) -> String {
    format!("{bot_name}_enabled.json")
}
