//! Campus-guide conversation service.
//!
//! [`CampusGuideService`] reads the location store, classifies the query, and
//! walks a fixed decision order:
//!
//! 1. a matched location gets a generated reply (canned on failure) and a map;
//! 2. a location question naming no known place gets a fixed hint;
//! 3. a greeting gets a fixed greeting;
//! 4. anything else gets a generated reply (canned on failure).
//!
//! Each generated branch makes exactly one completion call.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use super::classifier::{QueryClassification, classify};
use super::fallback::{
    GREETING_REPLY, LOCATION_INTENT_REPLY, conversation_fallback, fallback_line,
};
use super::location::{College, Location};
use super::prompts::{conversation_prompt, location_prompt};
use crate::domain::Error;
use crate::domain::ports::{
    CampusGuideQuery, CompletionService, LocationRepository, LocationRepositoryError,
    RandomSource,
};

/// College name used in prompts before the college row exists.
const UNSEEDED_COLLEGE_NAME: &str = "our college";

static GREETING_RE: OnceLock<Regex> = OnceLock::new();

fn greeting_regex() -> &'static Regex {
    GREETING_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(hello|hi|hey)\b")
            .unwrap_or_else(|error| panic!("greeting regex failed to compile: {error}"))
    })
}

/// Return `true` when `query` contains a greeting word.
pub fn is_greeting(query: &str) -> bool {
    greeting_regex().is_match(query)
}

/// Rejection reasons for a guide query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuideQueryError {
    #[error("Query is required")]
    Empty,
}

/// Non-blank, trimmed user question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideQuery(String);

impl GuideQuery {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, GuideQueryError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GuideQueryError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Reply returned to the chat client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuideReply {
    pub message: String,
    /// Whether the client should show `location` on the map.
    pub show_map: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl GuideReply {
    fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            show_map: false,
            location: None,
        }
    }

    fn with_map(message: String, location: Location) -> Self {
        Self {
            message,
            show_map: true,
            location: Some(location),
        }
    }
}

pub(crate) fn map_location_error(error: LocationRepositoryError) -> Error {
    error!(%error, "location store request failed");
    Error::storage(error.to_string())
}

/// Campus-guide service implementing [`CampusGuideQuery`].
#[derive(Clone)]
pub struct CampusGuideService<R> {
    locations: Arc<R>,
    completion: Arc<dyn CompletionService>,
    random: Arc<dyn RandomSource>,
}

impl<R> CampusGuideService<R> {
    pub fn new(
        locations: Arc<R>,
        completion: Arc<dyn CompletionService>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            locations,
            completion,
            random,
        }
    }

    /// Ask the completion service, treating blank output as a failure.
    async fn generated(&self, prompt: &str, branch: &'static str) -> Option<String> {
        match self.completion.complete(prompt).await {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
            Ok(_) => {
                warn!(branch, "completion service returned empty text; using canned reply");
                None
            }
            Err(error) => {
                warn!(branch, %error, "completion service failed; using canned reply");
                None
            }
        }
    }

    /// Build the reply for an already classified query.
    pub async fn generate(
        &self,
        query: &GuideQuery,
        classification: QueryClassification,
        college: Option<&College>,
    ) -> GuideReply {
        let college_name = college.map_or(UNSEEDED_COLLEGE_NAME, College::name);

        if let Some(location) = classification.matched {
            debug!(location = %location.id(), "answering matched location");
            let prompt = location_prompt(&location, college_name);
            let message = match self.generated(&prompt, "location").await {
                Some(text) => text,
                None => fallback_line(&location, self.random.as_ref()),
            };
            return GuideReply::with_map(message, location);
        }

        if classification.is_location_query {
            return GuideReply::text(LOCATION_INTENT_REPLY);
        }

        if is_greeting(query.as_str()) {
            return GuideReply::text(GREETING_REPLY);
        }

        let prompt = conversation_prompt(query.as_str(), college_name);
        match self.generated(&prompt, "conversation").await {
            Some(text) => GuideReply::text(text),
            None => GuideReply::text(conversation_fallback(self.random.as_ref())),
        }
    }
}

#[async_trait]
impl<R> CampusGuideQuery for CampusGuideService<R>
where
    R: LocationRepository,
{
    async fn locations(&self) -> Result<Vec<Location>, Error> {
        self.locations
            .list_locations()
            .await
            .map_err(map_location_error)
    }

    async fn college(&self) -> Result<Option<College>, Error> {
        self.locations.get_college().await.map_err(map_location_error)
    }

    async fn answer(&self, query: &GuideQuery) -> Result<GuideReply, Error> {
        let locations = self.locations().await?;
        let classification = classify(query.as_str(), &locations);
        let needs_college =
            classification.matched.is_some() || !classification.is_location_query;
        let college = if needs_college {
            self.college().await?
        } else {
            None
        };
        Ok(self.generate(query, classification, college.as_ref()).await)
    }
}

#[cfg(test)]
#[path = "guide_tests.rs"]
mod tests;
