//! Generation and refinement of itineraries.

use std::{future::Future, time::Duration};

use anyhow::anyhow;
use entity::prelude::{DayPlan, GenerationRequest, Itinerary, Language, RefineRequest};
use tracing::{debug, error, info};

use crate::{
    client::TextCompletion,
    completion::parse_json_from_completion,
    config::GenerationSettings,
    error::PlannerError,
    language::profile,
    normalize::{normalize_day_plan, normalize_itinerary},
    prompt::{build_generation_prompt, build_refine_prompt},
};

pub const MIN_DAYS: i64 = 1;
pub const MAX_DAYS: i64 = 14;

/// Awaits an upstream call, treating expiry like any other upstream failure.
pub(crate) async fn with_timeout<T>(
    timeout: Duration,
    call: impl Future<Output = anyhow::Result<T>>,
) -> anyhow::Result<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!("timed out after {:?}", timeout)),
    }
}

pub struct ItineraryService<C> {
    client: C,
    settings: GenerationSettings,
}

impl<C: TextCompletion + Sync> ItineraryService<C> {
    pub fn new(client: C, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, PlannerError> {
        debug!(task = "complete", system = system, user = user);

        let text = with_timeout(
            self.settings.timeout(),
            self.client
                .complete_text(system, user, max_tokens, temperature),
        )
        .await
        .map_err(|e| {
            error!(task = "complete", error = format!("{:#}", e));
            PlannerError::Upstream(e)
        })?;

        if text.trim().is_empty() {
            error!(task = "complete", error = "empty completion");
            return Err(PlannerError::Upstream(anyhow!("empty completion")));
        }

        info!(task = "complete", length = text.len());

        Ok(text)
    }

    pub async fn generate_itinerary(
        &self,
        request: &GenerationRequest,
    ) -> Result<Itinerary, PlannerError> {
        let messages = &profile(request.language).messages;

        let city = request.city.trim();
        if city.is_empty() {
            return Err(PlannerError::Validation(
                messages.city_required.to_string(),
            ));
        }
        if !(MIN_DAYS..=MAX_DAYS).contains(&request.days) {
            return Err(PlannerError::Validation(
                messages.days_out_of_range.to_string(),
            ));
        }
        let comment = request.comment.as_deref().unwrap_or_default();

        info!(
            task = "generate itinerary",
            city = city,
            days = request.days,
            language = request.language.to_string(),
            has_comment = !comment.trim().is_empty(),
        );

        let prompt =
            build_generation_prompt(city, request.days, comment, request.language);
        let text = self
            .complete(
                &prompt.system,
                &prompt.user,
                self.settings.max_tokens,
                self.settings.temperature,
            )
            .await?;

        let raw = parse_json_from_completion(&text)?;

        normalize_itinerary(&raw, city, request.days as usize, request.language)
    }

    pub async fn refine_day(
        &self,
        request: &RefineRequest,
    ) -> Result<DayPlan, PlannerError> {
        let language = request.language;
        let (city, day_index, original_day_plan, user_comment) =
            validate_refine(request, language)?;

        info!(
            task = "refine day",
            city = city,
            day_index = day_index,
            language = language.to_string(),
        );

        let prompt = build_refine_prompt(
            city,
            day_index,
            original_day_plan,
            user_comment,
            language,
        );
        let text = self
            .complete(
                &prompt.system,
                &prompt.user,
                self.settings.refine_max_tokens,
                self.settings.refine_temperature,
            )
            .await?;

        let raw = parse_json_from_completion(&text)?;

        Ok(normalize_day_plan(&raw, day_index, language))
    }
}

fn validate_refine(
    request: &RefineRequest,
    language: Language,
) -> Result<(&str, usize, &DayPlan, &str), PlannerError> {
    let messages = &profile(language).messages;
    let missing =
        || PlannerError::Validation(messages.refine_fields_missing.to_string());

    let city = request.city.trim();
    if city.is_empty() {
        return Err(missing());
    }
    let Some(original_day_plan) = request.original_day_plan.as_ref() else {
        return Err(missing());
    };
    let Some(day_index) = request.day_index.filter(|index| *index >= 0) else {
        return Err(missing());
    };
    if let Some(total_days) = request.total_days {
        if !(MIN_DAYS..=MAX_DAYS).contains(&total_days) {
            return Err(PlannerError::Validation(
                messages.days_out_of_range.to_string(),
            ));
        }
        if day_index >= total_days {
            return Err(missing());
        }
    }
    let user_comment = request
        .user_comment
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if user_comment.is_empty() {
        return Err(PlannerError::Validation(
            messages.comment_required.to_string(),
        ));
    }

    Ok((city, day_index as usize, original_day_plan, user_comment))
}

#[cfg(test)]
mod test {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
        time::Duration,
    };

    use anyhow::anyhow;
    use entity::prelude::{
        DayPlan, GenerationRequest, Language, RefineRequest, RouteItemType,
    };

    use super::ItineraryService;
    use crate::{
        client::TextCompletion, config::GenerationSettings, error::PlannerError,
    };

    /// Replies with a fixed completion and records the prompts it saw.
    struct FakeCompletion {
        reply: anyhow::Result<String>,
        calls: AtomicUsize,
        last_user_prompt: Mutex<String>,
        delay: Option<Duration>,
    }

    impl FakeCompletion {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_user_prompt: Mutex::new(String::new()),
                delay: None,
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                reply: Err(anyhow!(message)),
                ..Self::replying("")
            }
        }
    }

    impl TextCompletion for FakeCompletion {
        async fn complete_text(
            &self,
            _system_prompt: &str,
            user_prompt: &str,
            _max_tokens: u32,
            _temperature: f32,
        ) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user_prompt.lock().unwrap() = user_prompt.to_string();
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(anyhow!(e.to_string())),
            }
        }
    }

    fn service(client: FakeCompletion) -> ItineraryService<FakeCompletion> {
        ItineraryService::new(client, GenerationSettings::default())
    }

    fn generation(city: &str, days: i64) -> GenerationRequest {
        GenerationRequest {
            city: city.to_string(),
            days,
            comment: None,
            language: Language::En,
        }
    }

    fn refine(comment: Option<&str>) -> RefineRequest {
        RefineRequest {
            city: "Rome".to_string(),
            total_days: Some(3),
            day_index: Some(2),
            original_day_plan: Some(DayPlan {
                label: "Day 3".to_string(),
                items: vec![],
            }),
            user_comment: comment.map(str::to_string),
            language: Language::En,
        }
    }

    #[tokio::test]
    async fn test_generate_itinerary() {
        // Arrange
        let service = service(FakeCompletion::replying(
            "Here is your plan:\n```json\n{\"city\": \"Rome\", \"days\": [{\"label\": \"Day 1\", \"items\": [{\"type\": \"museum\", \"title\": \"Vatican Museums\"}, {\"type\": \"food\", \"title\": \"Roscioli\"}]}]}\n```",
        ));

        // Act
        let itinerary = service
            .generate_itinerary(&generation(" Rome ", 1))
            .await
            .unwrap();

        // Assert
        assert_eq!(itinerary.city, "Rome");
        assert_eq!(itinerary.days.len(), 1);
        assert_eq!(itinerary.days[0].items[0].kind, RouteItemType::Sight);
        assert_eq!(itinerary.days[0].items[1].kind, RouteItemType::Food);
        let prompt = service.client.last_user_prompt.lock().unwrap().clone();
        assert!(prompt.contains(r#""Rome""#));
    }

    #[tokio::test]
    async fn test_generate_validation_skips_model() {
        // Arrange
        let service = service(FakeCompletion::replying("{}"));

        // Act
        let empty_city = service.generate_itinerary(&generation("   ", 2)).await;
        let too_many = service.generate_itinerary(&generation("Rome", 15)).await;
        let zero = service.generate_itinerary(&generation("Rome", 0)).await;

        // Assert
        let Err(PlannerError::Validation(message)) = empty_city else {
            panic!("expected validation error");
        };
        assert_eq!(message, "City is required");
        assert!(matches!(too_many, Err(PlannerError::Validation(_))));
        assert!(matches!(zero, Err(PlannerError::Validation(_))));
        assert_eq!(service.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_upstream_failure() {
        let service = service(FakeCompletion::failing("status code: 500"));

        let result = service.generate_itinerary(&generation("Rome", 2)).await;

        assert!(matches!(result, Err(PlannerError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_generate_blank_completion_is_upstream_failure() {
        let service = service(FakeCompletion::replying("  \n "));

        let result = service.generate_itinerary(&generation("Rome", 2)).await;

        assert!(matches!(result, Err(PlannerError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_generate_parse_failure() {
        let service = service(FakeCompletion::replying("Sorry, I can't."));

        let result = service.generate_itinerary(&generation("Rome", 2)).await;

        assert!(matches!(result, Err(PlannerError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_generate_empty_itinerary() {
        let service = service(FakeCompletion::replying(r#"{"city": "Rome", "days": []}"#));

        let result = service.generate_itinerary(&generation("Rome", 2)).await;

        assert!(matches!(result, Err(PlannerError::EmptyItinerary)));
    }

    #[tokio::test]
    async fn test_generate_timeout_is_upstream_failure() {
        // Arrange
        let mut client = FakeCompletion::replying(r#"{"days": [{}]}"#);
        client.delay = Some(Duration::from_millis(200));
        let service = ItineraryService::new(
            client,
            GenerationSettings {
                timeout_secs: 0,
                ..Default::default()
            },
        );

        // Act
        let result = service.generate_itinerary(&generation("Rome", 1)).await;

        // Assert
        assert!(matches!(result, Err(PlannerError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_refine_day_relabels_missing_label() {
        // Arrange
        let service = service(FakeCompletion::replying(
            r#"{"items": [{"type": "walk", "title": "Villa Borghese"}]}"#,
        ));

        // Act
        let day = service
            .refine_day(&refine(Some("more parks")))
            .await
            .unwrap();

        // Assert
        assert_eq!(day.label, "Day 3");
        assert_eq!(day.items[0].kind, RouteItemType::Walk);
        let prompt = service.client.last_user_prompt.lock().unwrap().clone();
        assert!(prompt.contains("more parks"));
    }

    #[tokio::test]
    async fn test_refine_day_requires_comment() {
        // Arrange
        let service = service(FakeCompletion::replying("{}"));

        // Act
        let missing = service.refine_day(&refine(None)).await;
        let blank = service.refine_day(&refine(Some("   "))).await;

        // Assert
        assert!(matches!(missing, Err(PlannerError::Validation(_))));
        assert!(matches!(blank, Err(PlannerError::Validation(_))));
        assert_eq!(service.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refine_day_requires_fields() {
        let service = service(FakeCompletion::replying("{}"));
        let mut no_plan = refine(Some("x"));
        no_plan.original_day_plan = None;
        let mut negative = refine(Some("x"));
        negative.day_index = Some(-1);
        let mut out_of_range = refine(Some("x"));
        out_of_range.day_index = Some(3);

        for request in [no_plan, negative, out_of_range] {
            let result = service.refine_day(&request).await;
            assert!(matches!(result, Err(PlannerError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_refine_day_parse_failure() {
        let service = service(FakeCompletion::replying("no json here"));

        let result = service.refine_day(&refine(Some("more parks"))).await;

        assert!(matches!(result, Err(PlannerError::Parse { .. })));
    }
}
