use crate::config::{LabelStrategy, SequentialBotConfig};
use crate::corpus::{self, Corpus};
use crate::cursor::Cursor;
use crate::error::{ChirpError, Result};
use crate::publisher::Publisher;
use crate::store::{self, StateStore};
use crate::template;
use serde::Serialize;
use tracing::{error, info};

/// What one invocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The unit was published; `cursor` is the advanced position.
    Posted { cursor: Cursor },
    /// Publishing failed; the cursor was left untouched and the same unit
    /// will be retried on the next scheduled invocation.
    PublishFailed,
}

/// Walks a two-level corpus, posting one minor unit per invocation.
///
/// The cursor advances only after a confirmed successful post: at-least-once
/// per unit, never skipping on the happy path.
pub struct SequentialPoster<'a> {
    config: &'a SequentialBotConfig,
    store: &'a dyn StateStore,
    publisher: &'a dyn Publisher,
}

impl<'a> SequentialPoster<'a> {
    pub fn new(
        config: &'a SequentialBotConfig,
        store: &'a dyn StateStore,
        publisher: &'a dyn Publisher,
    ) -> Self {
        Self {
            config,
            store,
            publisher,
        }
    }

    /// One timer-trigger invocation: load corpus and cursor, post the unit
    /// under the cursor, advance and persist on success.
    pub fn run(&self) -> Result<RunOutcome> {
        let corpus = Corpus::load(&self.config.corpus_path, &self.config.schema)?;
        if corpus.is_empty() {
            return Err(ChirpError::CorpusInvalid(
                "corpus has no major units".to_string(),
            ));
        }
        let label_table = match &self.config.label_strategy {
            LabelStrategy::Lookup(path) => Some(corpus::load_label_table(path)?),
            _ => None,
        };

        let cursor = Cursor::load(self.store, &self.config.state_key, &corpus);
        let major = &corpus.majors[cursor.major];
        let item = &major.minors[cursor.minor];

        let ordinal = || (cursor.minor + 1).to_string();
        let minor_label = match (&self.config.label_strategy, &label_table) {
            (LabelStrategy::Embedded, _) => item.label.clone().unwrap_or_else(ordinal),
            (LabelStrategy::Lookup(_), Some(table)) => {
                table.get(cursor.minor).cloned().unwrap_or_else(ordinal)
            }
            _ => ordinal(),
        };

        // A new major unit just started: refresh the profile description.
        // Failure is logged and swallowed; it never blocks the post.
        if cursor.minor == 0 {
            if let Some(tmpl) = &self.config.description_template {
                let description = template::render(tmpl, &[&major.label]);
                match self.publisher.update_profile_description(&description) {
                    Ok(()) => info!("updated profile description: {description}"),
                    Err(e) => error!("failed to update profile description: {e}"),
                }
            }
        }

        let body = template::render(
            &self.config.post_template,
            &[&item.text, &major.label, &minor_label],
        );
        match self.publisher.publish(&body) {
            Ok(id) => info!("posted unit {}/{}: id {}", cursor.major, cursor.minor, id.0),
            Err(e) => {
                // Leave the cursor alone; the next trigger retries this unit.
                error!("failed to publish: {e}");
                return Ok(RunOutcome::PublishFailed);
            }
        }

        let next = cursor.advanced(&corpus);
        if let Err(e) = store::write_json(self.store, &self.config.state_key, &next) {
            // Not retried: the next invocation recomputes, at the documented
            // risk of a duplicate post.
            error!("failed to persist cursor: {e}");
        }
        Ok(RunOutcome::Posted { cursor: next })
    }
}
