//! Gemini narrative provider
//!
//! Sends one `generateContent` call per reading, asks for a JSON answer
//! constrained by a response schema, and decodes the first candidate's text
//! into a [`NarrativeResponse`]. Requests are never retried here; the
//! pipeline owns the timeout and the fallback.

use async_trait::async_trait;
use serde_json::{json, Value};

use aquai_scoring::{NarrativeError, NarrativeProvider, NarrativeRequest, NarrativeResponse};

use crate::config::NarrativeSettings;
use crate::http::{HttpConfig, HttpConnector, HttpError};
use crate::{ConnectionStats, Connector, ConnectorError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Narrative provider backed by the Gemini REST API
pub struct GeminiNarrativeProvider {
    http: HttpConnector,
    model: String,
}

impl GeminiNarrativeProvider {
    pub fn new(settings: &NarrativeSettings) -> Result<Self, ConnectorError> {
        let config = HttpConfig::new(settings.base_url.as_str())
            .api_key(API_KEY_HEADER, settings.api_key.as_str())
            .timeout(settings.timeout)
            .retries(0);

        Ok(Self {
            http: HttpConnector::new(config)?,
            model: settings.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request path for the configured model
    pub fn endpoint(&self) -> String {
        format!("/v1beta/models/{}:generateContent", self.model)
    }
}

impl Connector for GeminiNarrativeProvider {
    fn stats(&self) -> ConnectionStats {
        self.http.stats()
    }
}

#[async_trait]
impl NarrativeProvider for GeminiNarrativeProvider {
    async fn narrate(&self, request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        let body = generate_content_body(&build_prompt(request));
        let answer = self
            .http
            .post(&self.endpoint(), &body)
            .await
            .map_err(narrative_error)?;
        parse_generate_content(&answer)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

fn narrative_error(err: HttpError) -> NarrativeError {
    match err {
        HttpError::ServerError { status, message } => NarrativeError::Status { status, message },
        HttpError::Request(message) => NarrativeError::Transport(message),
        HttpError::Serialization(message) => NarrativeError::Malformed(message),
        HttpError::Config(message) => NarrativeError::Unavailable(message),
    }
}

/// Prompt text for one scored reading
pub fn build_prompt(request: &NarrativeRequest) -> String {
    let reading = &request.reading;
    let scores = &request.scores;

    let bio_hazard = scores
        .bio_hazard_score
        .map(|score| format!("\n- Bio-Hazard Score: {score:.1}/100"))
        .unwrap_or_default();

    format!(
        "Act as a Senior Public Health Official.\n\
         LOCAL DIAGNOSTICS:\n\
         - Severity Score: {severity:.1}/100{bio_hazard}\n\
         - Safety Status: {status}\n\
         \n\
         WATER QUALITY DATASET:\n\
         - B.O.D: {bod} mg/l (Target < 3)\n\
         - D.O.: {dissolved_oxygen} mg/l (Target > 4)\n\
         - pH: {acidity}\n\
         - Fecal Coliform: {fecal} MPN/100ml\n\
         - Total Coliform: {total} MPN/100ml\n\
         - Conductivity: {conductivity} µmhos/cm\n\
         - Nitrate-N: {nitrate} mg/l\n\
         \n\
         LOCATION: {location} ({category})\n\
         \n\
         YOUR TASK:\n\
         1. Provide a diagnostic biological risk summary.\n\
         2. Explain how the B.O.D and coliform levels relate to disease risk.\n\
         3. Give 3 specific probabilistic disease risks.\n\
         4. Name the most likely root cause, one counterfactual and one policy recommendation.\n\
         5. Answer as JSON.",
        severity = scores.severity_score,
        status = scores.status,
        bod = reading.bod,
        dissolved_oxygen = reading.dissolved_oxygen,
        acidity = reading.acidity,
        fecal = reading.fecal_coliform,
        total = reading.total_coliform,
        conductivity = reading.conductivity,
        nitrate = reading.nitrate,
        location = reading.location.name,
        category = reading.category,
    )
}

/// `generateContent` request body with a JSON response schema
pub fn generate_content_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "aiSummary": { "type": "STRING" },
                    "confidence": { "type": "NUMBER" },
                    "diseaseRisks": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "disease": { "type": "STRING" },
                                "probability": { "type": "NUMBER" },
                                "description": { "type": "STRING" }
                            },
                            "required": ["disease", "probability", "description"]
                        }
                    },
                    "rootCause": { "type": "STRING" },
                    "counterfactual": { "type": "STRING" },
                    "policyRecommendation": { "type": "STRING" }
                },
                "required": ["aiSummary", "diseaseRisks"]
            }
        }
    })
}

/// Decode the first candidate of a `generateContent` answer
pub fn parse_generate_content(answer: &Value) -> Result<NarrativeResponse, NarrativeError> {
    let text = answer
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| NarrativeError::Malformed("answer has no candidate text".into()))?;

    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| NarrativeError::Malformed(format!("candidate text is not a narrative: {e}")))
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquai_core::{Location, SensorReading};
    use aquai_scoring::{LocalScores, SafetyStatus};

    fn request() -> NarrativeRequest {
        let reading = SensorReading::builder()
            .id("MAN-POLL1")
            .bod(12.5)
            .fecal_coliform(15000.0)
            .total_coliform(38000.0)
            .location(Location::new(28.61, 77.23, "Yamuna at Okhla"))
            .build();
        let scores = LocalScores {
            severity_score: 92.0,
            bio_hazard_score: Some(88.5),
            status: SafetyStatus::Critical,
            confidence: 0.88,
            reliability_index: 94.0,
        };
        NarrativeRequest::new(&reading, scores)
    }

    fn answer(text: &str) -> Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    #[test]
    fn prompt_carries_scores_and_readings() {
        let prompt = build_prompt(&request());
        assert!(prompt.starts_with("Act as a Senior Public Health Official."));
        assert!(prompt.contains("Severity Score: 92.0/100"));
        assert!(prompt.contains("Bio-Hazard Score: 88.5/100"));
        assert!(prompt.contains("Safety Status: CRITICAL"));
        assert!(prompt.contains("B.O.D: 12.5 mg/l"));
        assert!(prompt.contains("Fecal Coliform: 15000 MPN/100ml"));
        assert!(prompt.contains("LOCATION: Yamuna at Okhla"));
    }

    #[test]
    fn body_requests_json() {
        let body = generate_content_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        let required = &body["generationConfig"]["responseSchema"]["required"];
        assert_eq!(required, &json!(["aiSummary", "diseaseRisks"]));
    }

    #[test]
    fn parses_candidate_text() {
        let text = r#"{
            "aiSummary": "Sewage ingress upstream.",
            "confidence": 0.9,
            "diseaseRisks": [{"disease": "Cholera", "probability": 0.7, "description": "fecal load"}],
            "rootCause": "Untreated drain outfall"
        }"#;
        let narrative = parse_generate_content(&answer(text)).unwrap();
        assert_eq!(narrative.ai_summary, "Sewage ingress upstream.");
        assert_eq!(narrative.disease_risks.len(), 1);
        assert_eq!(narrative.root_cause.as_deref(), Some("Untreated drain outfall"));
        assert!(narrative.counterfactual.is_none());
    }

    #[test]
    fn strips_code_fences() {
        let fenced = "```json\n{\"aiSummary\": \"ok\"}\n```";
        let narrative = parse_generate_content(&answer(fenced)).unwrap();
        assert_eq!(narrative.ai_summary, "ok");
        assert!(narrative.disease_risks.is_empty());
        assert_eq!(strip_code_fence("  plain  "), "plain");
    }

    #[test]
    fn malformed_answers() {
        assert!(matches!(
            parse_generate_content(&json!({ "candidates": [] })),
            Err(NarrativeError::Malformed(_))
        ));
        assert!(matches!(
            parse_generate_content(&answer("not json")),
            Err(NarrativeError::Malformed(_))
        ));
    }

    #[test]
    fn error_mapping() {
        let err = narrative_error(HttpError::ServerError { status: 403, message: "denied".into() });
        assert_eq!(err, NarrativeError::Status { status: 403, message: "denied".into() });
        assert!(matches!(narrative_error(HttpError::Request("refused".into())), NarrativeError::Transport(_)));
    }

    #[test]
    fn endpoint_uses_model() {
        let provider = GeminiNarrativeProvider::new(&NarrativeSettings::new("key")).unwrap();
        assert_eq!(provider.endpoint(), "/v1beta/models/gemini-3-flash-preview:generateContent");
        assert_eq!(provider.name(), "gemini");
    }
}
