//! The quote bank - storage and emotion-indexed selection.

use log::warn;
use maze_rules::Emotion;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::{Quote, QuoteId};

/// Errors raised by quote bank operations.
#[derive(Debug, Error)]
pub enum QuoteBankError {
    #[error("quote text and author must not be empty")]
    EmptyField,

    #[error("failed to parse quote data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Holds all quote records, indexed by emotion for selection.
#[derive(Debug, Clone, Default)]
pub struct QuoteBank {
    quotes: HashMap<QuoteId, Quote>,
    by_emotion: HashMap<Emotion, HashSet<QuoteId>>,
}

impl QuoteBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the bank with the stock set: one quote per emotion.
    pub fn stoic_defaults() -> Self {
        let records = [
            (
                "The chief task in life is simply this: to identify and separate matters so that I can say clearly to myself which are externals not under my control, and which have to do with the choices I actually control.",
                "Epictetus",
                "Focus on what you can control, accept what you cannot.",
            ),
            (
                "You have power over your mind - not outside events. Realize this, and you will find strength.",
                "Marcus Aurelius",
                "Your mind is your strongest asset and the key to inner peace.",
            ),
            (
                "The happiness of your life depends upon the quality of your thoughts.",
                "Marcus Aurelius",
                "Your perspective shapes your reality.",
            ),
            (
                "Waste no more time arguing about what a good man should be. Be one.",
                "Marcus Aurelius",
                "Action speaks louder than words.",
            ),
            (
                "It's not what happens to you, but how you react to it that matters.",
                "Epictetus",
                "Your response to events determines their impact on you.",
            ),
            (
                "First say to yourself what you would be; then do what you have to do.",
                "Epictetus",
                "Self-improvement begins with clear intention and follows with dedicated action.",
            ),
            (
                "He who fears death will never do anything worthy of a living man.",
                "Seneca",
                "Fear of death prevents truly living.",
            ),
            (
                "The best revenge is to be unlike him who performed the injury.",
                "Marcus Aurelius",
                "Rise above negativity through noble character.",
            ),
        ];

        let mut bank = Self::new();
        for (index, (text, author, lesson)) in records.into_iter().enumerate() {
            let emotion = Emotion::ALL[index % Emotion::ALL.len()];
            let quote = Quote::new(text, author, lesson, emotion)
                .with_difficulty((index % 3) as u8 + 1);
            bank.insert(quote);
        }
        bank
    }

    /// Load a bank from a JSON array of quote records.
    pub fn from_json_str(data: &str) -> Result<Self, QuoteBankError> {
        let quotes: Vec<Quote> = serde_json::from_str(data)?;
        let mut bank = Self::new();
        for quote in quotes {
            bank.add_quote(quote)?;
        }
        Ok(bank)
    }

    /// Serialize all quote records as a JSON array.
    pub fn to_json_string(&self) -> Result<String, QuoteBankError> {
        let quotes: Vec<&Quote> = self.quotes.values().collect();
        Ok(serde_json::to_string_pretty(&quotes)?)
    }

    /// Add a quote to the bank.
    ///
    /// Returns the quote ID for reference. Quotes with blank text or author
    /// are rejected.
    pub fn add_quote(&mut self, quote: Quote) -> Result<QuoteId, QuoteBankError> {
        if quote.text.trim().is_empty() || quote.author.trim().is_empty() {
            return Err(QuoteBankError::EmptyField);
        }
        Ok(self.insert(quote))
    }

    fn insert(&mut self, quote: Quote) -> QuoteId {
        let id = quote.id;
        self.by_emotion.entry(quote.emotion).or_default().insert(id);
        self.quotes.insert(id, quote);
        id
    }

    /// Get quote by ID.
    pub fn get(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.get(&id)
    }

    /// Total number of quotes in the bank.
    pub fn quote_count(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// All quotes tagged with an emotion.
    pub fn quotes_for_emotion(&self, emotion: Emotion) -> Vec<&Quote> {
        self.by_emotion
            .get(&emotion)
            .map(|ids| ids.iter().filter_map(|id| self.quotes.get(id)).collect())
            .unwrap_or_default()
    }

    /// Pick a quote for an emotion uniformly at random. Emotions with no
    /// quotes fall back to an unrestricted random pick; `None` only when the
    /// bank is empty.
    pub fn quote_for_emotion<R: Rng>(&self, emotion: Emotion, rng: &mut R) -> Option<&Quote> {
        let matching = self.quotes_for_emotion(emotion);
        if matching.is_empty() {
            warn!("no quotes tagged {emotion}; falling back to a random quote");
            return self.random_quote(rng);
        }
        matching.choose(rng).copied()
    }

    /// Pick any quote uniformly at random; `None` when the bank is empty.
    pub fn random_quote<R: Rng>(&self, rng: &mut R) -> Option<&Quote> {
        let all: Vec<&Quote> = self.quotes.values().collect();
        all.choose(rng).copied()
    }

    /// Iterate over all quotes.
    pub fn all_quotes(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.values()
    }
}
