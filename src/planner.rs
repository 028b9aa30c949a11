use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::ProviderConfig,
    error::{Result, TripError},
    parser::{parse_itinerary_with_report, ParseReport},
    prompt::build_itinerary_prompt,
    services::provider::{provider_from_config, TextProvider},
    types::{TripItinerary, TripRequest},
};

/// Outcome of a full generate-and-parse cycle.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedTrip {
    pub itinerary: TripItinerary,
    pub report: ParseReport,
    /// Text exactly as the provider returned it
    pub raw_text: String,
    pub duration: Duration,
}

/// Requests an itinerary from a generative provider and parses the answer.
#[derive(Debug)]
pub struct TripPlanner {
    provider: Box<dyn TextProvider>,
}

impl TripPlanner {
    pub fn new(provider: Box<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        Ok(Self::new(provider_from_config(config)?))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(ProviderConfig::from_env()?)
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn plan(&self, request: &TripRequest) -> Result<TripItinerary> {
        Ok(self.plan_with_report(request).await?.itinerary)
    }

    /// Validate the request, prompt the provider and parse its text.
    ///
    /// Fails only before parsing: an invalid request, a provider error, or a
    /// provider answer with no text at all.
    pub async fn plan_with_report(&self, request: &TripRequest) -> Result<PlannedTrip> {
        request.validate()?;

        let started = Instant::now();
        let duration_days = request.duration_days();
        info!(
            "Planning a {}-day trip to {} with {}",
            duration_days,
            request.destination,
            self.provider.name()
        );

        let prompt = build_itinerary_prompt(request);
        let raw_text = self.provider.generate(&prompt).await?;

        if raw_text.trim().is_empty() {
            warn!("Provider {} returned no itinerary text", self.provider.name());
            return Err(TripError::EmptyResponse);
        }

        let (itinerary, report) = parse_itinerary_with_report(&raw_text, request);
        info!(
            "Successfully parsed itinerary with {} days ({} slots extracted, {} synthesized)",
            itinerary.days.len(),
            report.slots_extracted,
            report.slots_synthesized
        );

        Ok(PlannedTrip {
            itinerary,
            report,
            raw_text,
            duration: started.elapsed(),
        })
    }
}
