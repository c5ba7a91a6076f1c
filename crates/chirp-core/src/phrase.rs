use crate::config::{self, PhraseBotConfig};
use crate::error::{ChirpError, Result};
use crate::publisher::{PostId, Publisher};
use crate::store::{self, StateStore};
use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, info, warn};

const DATE_FMT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// OverrideTable
// ---------------------------------------------------------------------------

/// Date-keyed phrases that preempt the constant phrase.
///
/// Invariant: immediately after any read that resolves today's phrase, every
/// remaining date is strictly in the future — consumed and past entries are
/// purged as a side effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable(BTreeMap<String, String>);

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &str) -> Option<&str> {
        self.0.get(date).map(String::as_str)
    }

    pub fn insert(&mut self, date: &str, phrase: &str) {
        self.0.insert(date.to_string(), phrase.to_string());
    }

    pub fn remove(&mut self, date: &str) -> bool {
        self.0.remove(date).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(d, p)| (d.as_str(), p.as_str()))
    }

    /// Drop every entry dated on or before `today`. Entries whose date does
    /// not parse are dropped too — recoverable corruption, not fatal.
    /// Returns how many entries were removed.
    pub fn purge_through(&mut self, today: NaiveDate) -> usize {
        let before = self.0.len();
        self.0.retain(|date, _| {
            match NaiveDate::parse_from_str(date, DATE_FMT) {
                Ok(d) => d > today,
                Err(_) => {
                    warn!("dropping override with unparseable date '{date}'");
                    false
                }
            }
        });
        before - self.0.len()
    }
}

// ---------------------------------------------------------------------------
// Kill switch document
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct EnabledDoc {
    enabled: bool,
}

// ---------------------------------------------------------------------------
// PhraseState — persisted state shared by poster, CLI, and management API
// ---------------------------------------------------------------------------

/// Override-table and kill-switch access for one phrase bot identity.
pub struct PhraseState<'a> {
    store: &'a dyn StateStore,
    overrides_key: String,
    enabled_key: String,
}

impl<'a> PhraseState<'a> {
    pub fn new(store: &'a dyn StateStore, bot_name: &str) -> Self {
        Self {
            store,
            overrides_key: config::overrides_key(bot_name),
            enabled_key: config::enabled_key(bot_name),
        }
    }

    /// Kill-switch check. Defaults to enabled when the document is absent or
    /// unreadable — the bot should keep posting through state-store hiccups.
    pub fn is_enabled(&self) -> bool {
        match store::read_json::<EnabledDoc>(self.store, &self.enabled_key) {
            Ok(Some(doc)) => doc.enabled,
            Ok(None) => true,
            Err(e) => {
                info!("no readable enabled state ({e}); defaulting to enabled");
                true
            }
        }
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        store::write_json(self.store, &self.enabled_key, &EnabledDoc { enabled })?;
        info!("bot {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Load the override table, treating a missing or unreadable document as
    /// empty.
    pub fn load_overrides(&self) -> OverrideTable {
        match store::read_json::<OverrideTable>(self.store, &self.overrides_key) {
            Ok(Some(table)) => table,
            Ok(None) => OverrideTable::new(),
            Err(e) => {
                info!("no readable overrides ({e}); starting empty");
                OverrideTable::new()
            }
        }
    }

    pub fn save_overrides(&self, table: &OverrideTable) -> Result<()> {
        store::write_json(self.store, &self.overrides_key, table)
    }

    /// Upsert an override. The date must be a valid `YYYY-MM-DD` string.
    pub fn add_override(&self, date: &str, phrase: &str) -> Result<()> {
        NaiveDate::parse_from_str(date, DATE_FMT)
            .map_err(|_| ChirpError::InvalidDate(date.to_string()))?;
        let mut table = self.load_overrides();
        table.insert(date, phrase);
        self.save_overrides(&table)?;
        info!("override added for {date}");
        Ok(())
    }

    /// Remove an override; `false` if no entry existed for `date`.
    pub fn remove_override(&self, date: &str) -> Result<bool> {
        let mut table = self.load_overrides();
        if !table.remove(date) {
            return Ok(false);
        }
        self.save_overrides(&table)?;
        info!("override removed for {date}");
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// PhrasePoster
// ---------------------------------------------------------------------------

/// What one invocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PhraseOutcome {
    /// Kill switch is off; deliberate no-op.
    Disabled,
    /// The current time does not round to the target hour.
    OutsideWindow,
    Posted { id: PostId },
    PublishFailed,
}

/// Posts a single phrase once per day at a target local hour, preferring a
/// dated override when one exists.
pub struct PhrasePoster<'a> {
    config: &'a PhraseBotConfig,
    state: PhraseState<'a>,
    publisher: &'a dyn Publisher,
}

impl<'a> PhrasePoster<'a> {
    pub fn new(
        config: &'a PhraseBotConfig,
        store: &'a dyn StateStore,
        publisher: &'a dyn Publisher,
    ) -> Self {
        Self {
            config,
            state: PhraseState::new(store, &config.bot_name),
            publisher,
        }
    }

    pub fn state(&self) -> &PhraseState<'a> {
        &self.state
    }

    /// Whether `now`, rounded to the nearest hour, hits the target hour.
    ///
    /// The trigger fires at two adjacent UTC hours to survive DST shifts in
    /// the bot's timezone; exactly one of those rounds to the target local
    /// hour, the other is a no-op.
    pub fn is_target_time(&self, now: DateTime<Tz>) -> bool {
        let rounded = (now + Duration::minutes(30)).hour();
        if rounded != self.config.target_hour {
            info!(
                "not the target hour: {} rounds to {rounded}:00, target {}:00",
                now.format("%H:%M"),
                self.config.target_hour
            );
            return false;
        }
        true
    }

    /// Resolve the phrase for `today`: a dated override wins over the
    /// constant phrase. Every override dated on or before `today` (including
    /// the one just consumed) is purged and the cleaned table persisted,
    /// regardless of what happens to the subsequent publish.
    pub fn phrase_for_today(&self, today: NaiveDate) -> String {
        let today_str = today.format(DATE_FMT).to_string();
        let mut overrides = self.state.load_overrides();

        let phrase = match overrides.get(&today_str) {
            Some(p) => {
                info!("using override phrase for {today_str}");
                p.to_string()
            }
            None => {
                info!("using constant phrase for {today_str}");
                self.config.constant_phrase.clone()
            }
        };

        let purged = overrides.purge_through(today);
        if purged > 0 {
            if let Err(e) = self.state.save_overrides(&overrides) {
                error!("failed to persist purged overrides: {e}");
            } else {
                info!("purged {purged} past override(s)");
            }
        }

        phrase
    }

    /// One timer-trigger invocation at the current wall-clock time.
    pub fn run(&self) -> PhraseOutcome {
        self.run_at(Utc::now().with_timezone(&self.config.timezone))
    }

    /// One invocation at an explicit time (tests, backfills).
    pub fn run_at(&self, now: DateTime<Tz>) -> PhraseOutcome {
        if !self.state.is_enabled() {
            info!("bot is disabled via kill switch");
            return PhraseOutcome::Disabled;
        }
        if !self.is_target_time(now) {
            return PhraseOutcome::OutsideWindow;
        }

        let phrase = self.phrase_for_today(now.date_naive());
        match self.publisher.publish(&phrase) {
            Ok(id) => {
                info!("posted phrase: id {}", id.0);
                PhraseOutcome::Posted { id }
            }
            Err(e) => {
                // No cursor to roll back; the override for today was already
                // purged, so the next window match posts the constant phrase.
                error!("failed to publish phrase: {e}");
                PhraseOutcome::PublishFailed
            }
        }
    }
}
