use crate::error::WorkflowError;
use crate::job::{JobSlot, JobSnapshot, JobState};
use crate::token_count::{TokenCountSession, TokenCountState};
use crate::traits::StudioGateway;
use crate::util::lock;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use toonstudio_core::api::{QueryRequest, QueryResponse};
use toonstudio_core::config::ClientConfig;
use toonstudio_core::metrics::ConversionMetrics;
use toonstudio_core::pricing::{Cost, PricingConfig, estimate_cost};
use toonstudio_core::text::sanitize_answer;
use toonstudio_core::types::DataFormat;

pub const MISSING_QUESTION: &str = "Please enter a question";
pub const MISSING_DATA: &str = "Please provide data to analyze";

pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "What's the average age?",
    "List all names",
    "How many items?",
    "Summarize data",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryInput {
    pub data_text: String,
    pub data_format: DataFormat,
    pub question: String,
}

/// Token usage as reported by the service. Totals are never recomputed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenBreakdown {
    pub data_tokens: u64,
    pub question_tokens: u64,
    pub template_tokens: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl From<&QueryResponse> for TokenBreakdown {
    fn from(resp: &QueryResponse) -> Self {
        Self {
            data_tokens: resp.breakdown.data_tokens,
            question_tokens: resp.breakdown.question_tokens,
            template_tokens: resp.breakdown.template_tokens,
            prompt_tokens: resp.prompt_tokens,
            completion_tokens: resp.completion_tokens,
            total_tokens: resp.total_llm_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Sanitized for display.
    pub answer: String,
    pub data_format: DataFormat,
    pub breakdown: TokenBreakdown,
    /// Always derived locally from the breakdown.
    pub cost: Cost,
    /// JSON vs TOON size of the submitted data, when the service reports it.
    pub comparison: Option<ConversionMetrics>,
    pub conversion_status: Option<String>,
    pub exec_ms: Option<f64>,
}

impl QueryOutcome {
    fn from_response(resp: QueryResponse, pricing: &PricingConfig) -> Self {
        let breakdown = TokenBreakdown::from(&resp);
        let cost = estimate_cost(pricing, breakdown.prompt_tokens, breakdown.completion_tokens);
        let comparison = match (resp.json_data_tokens, resp.toon_data_tokens) {
            (Some(json), Some(toon)) => {
                let mut m = ConversionMetrics::from_counts(json, toon);
                if let Some(savings) = resp.data_savings_tokens {
                    m.savings = savings;
                }
                if let Some(percent) = resp.data_savings_percent {
                    m.savings_percent = percent;
                }
                Some(m)
            }
            _ => None,
        };

        Self {
            answer: sanitize_answer(&resp.answer),
            data_format: resp.data_format,
            breakdown,
            cost,
            comparison,
            conversion_status: resp.conversion_status,
            exec_ms: resp.exec_ms,
        }
    }
}

pub type QueryState = JobState<QueryOutcome>;

/// Question-answering panel: live size feedback for the data plus one query job.
pub struct QueryWorkflow {
    gateway: Arc<dyn StudioGateway>,
    pricing: PricingConfig,
    input: Mutex<QueryInput>,
    counter: TokenCountSession,
    job: JobSlot<QueryOutcome>,
}

impl QueryWorkflow {
    pub fn new(gateway: Arc<dyn StudioGateway>, cfg: &ClientConfig) -> Self {
        Self {
            counter: TokenCountSession::new(gateway.clone(), cfg.debounce_window()),
            gateway,
            pricing: cfg.pricing,
            input: Mutex::new(QueryInput::default()),
            job: JobSlot::new("query"),
        }
    }

    /// Updates the data and feeds the live token counter. Needs a tokio runtime.
    pub fn set_data_text(&self, text: impl Into<String>) {
        let text = text.into();
        lock(&self.input).data_text = text.clone();
        self.counter.on_text_changed(text);
    }

    /// Replaces the whole input without touching the live token counter.
    pub fn set_input(&self, input: QueryInput) {
        *lock(&self.input) = input;
    }

    pub fn set_data_format(&self, format: DataFormat) {
        lock(&self.input).data_format = format;
    }

    pub fn set_question(&self, question: impl Into<String>) {
        lock(&self.input).question = question.into();
    }

    /// Adopts one of `EXAMPLE_QUESTIONS`. Returns false for an unknown index.
    pub fn use_example_question(&self, index: usize) -> bool {
        match EXAMPLE_QUESTIONS.get(index) {
            Some(q) => {
                self.set_question(*q);
                true
            }
            None => false,
        }
    }

    pub fn input(&self) -> QueryInput {
        lock(&self.input).clone()
    }

    pub fn token_count(&self) -> TokenCountState {
        self.counter.state()
    }

    pub fn token_counter(&self) -> &TokenCountSession {
        &self.counter
    }

    /// Runs the query for the current input.
    ///
    /// An empty question or empty data fails immediately without contacting the service.
    pub async fn trigger(&self) -> QueryState {
        let input = self.input();

        if input.question.trim().is_empty() {
            self.job
                .reject(WorkflowError::Validation(MISSING_QUESTION.into()));
            return self.job.state();
        }
        if input.data_text.trim().is_empty() {
            self.job.reject(WorkflowError::Validation(MISSING_DATA.into()));
            return self.job.state();
        }

        let generation = self.job.begin();
        let req = QueryRequest {
            data_text: input.data_text,
            question: input.question,
            data_format: input.data_format,
        };

        let state = match self.gateway.query(&req).await {
            Ok(resp) => JobState::Succeeded(QueryOutcome::from_response(resp, &self.pricing)),
            Err(e) => {
                log::info!("query failed: {e}");
                JobState::Failed(WorkflowError::from(e))
            }
        };
        self.job.settle(generation, state);
        self.job.state()
    }

    pub fn state(&self) -> QueryState {
        self.job.state()
    }

    pub fn snapshot(&self) -> JobSnapshot<QueryOutcome> {
        self.job.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<JobSnapshot<QueryOutcome>> {
        self.job.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordedCall, ScriptedGateway, http_error, query_response};
    use std::time::Duration;
    use toonstudio_core::api::CountResponse;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn workflow(gw: &Arc<ScriptedGateway>) -> QueryWorkflow {
        QueryWorkflow::new(gw.clone(), &ClientConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn empty_question_fails_without_remote_call() {
        let gw = Arc::new(ScriptedGateway::new());
        let wf = workflow(&gw);
        wf.set_data_text("[1,2,3]");
        wf.set_question("   ");

        let state = wf.trigger().await;
        assert_eq!(
            state,
            JobState::Failed(WorkflowError::Validation(MISSING_QUESTION.into()))
        );
        assert!(!gw.calls().iter().any(|c| matches!(c, RecordedCall::Query(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_data_fails_without_remote_call() {
        let gw = Arc::new(ScriptedGateway::new());
        let wf = workflow(&gw);
        wf.set_question("How many items?");

        let state = wf.trigger().await;
        assert_eq!(state.error().unwrap().to_string(), MISSING_DATA);
        assert!(state.error().unwrap().is_validation());
        assert!(gw.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn success_sanitizes_answer_and_derives_cost() {
        let gw = Arc::new(ScriptedGateway::new());
        let mut resp = query_response("Answer:\n```json\n{\"avg\":27.5}\n```");
        resp.prompt_tokens = 1_000_000;
        resp.completion_tokens = 1_000_000;
        resp.total_llm_tokens = 7; // taken as reported
        gw.push_query(ms(50), Ok(resp));

        let wf = workflow(&gw);
        wf.set_data_text(r#"[{"age":30},{"age":25}]"#);
        wf.set_data_format(DataFormat::Toon);
        assert!(wf.use_example_question(0));

        let state = wf.trigger().await;
        let out = state.result().unwrap();
        assert_eq!(out.answer, "{\"avg\":27.5}");
        assert_eq!(out.cost.to_string(), "0.750000");
        assert_eq!(out.breakdown.total_tokens, 7);
        assert_eq!(out.breakdown.template_tokens, 90);
        assert_eq!(out.comparison, None);

        let sent = gw
            .calls()
            .into_iter()
            .find_map(|c| match c {
                RecordedCall::Query(q) => Some(q),
                _ => None,
            })
            .unwrap();
        assert_eq!(sent.question, "What's the average age?");
        assert_eq!(sent.data_format, DataFormat::Toon);
    }

    #[tokio::test(start_paused = true)]
    async fn comparison_prefers_reported_savings() {
        let gw = Arc::new(ScriptedGateway::new());
        let mut resp = query_response("2");
        resp.json_data_tokens = Some(40);
        resp.toon_data_tokens = Some(25);
        resp.data_savings_percent = Some(37.0);
        gw.push_query(ms(5), Ok(resp));

        let wf = workflow(&gw);
        wf.set_data_text("[1]");
        wf.set_question("How many items?");
        let state = wf.trigger().await;

        let cmp = state.result().unwrap().comparison.unwrap();
        assert_eq!(cmp.savings, 15);
        approx::assert_relative_eq!(cmp.savings_percent, 37.0);
    }

    #[tokio::test(start_paused = true)]
    async fn remote_failure_surfaces_detail() {
        let gw = Arc::new(ScriptedGateway::new());
        gw.push_query(ms(5), Err(http_error(500, "Gemini API key not configured")));
        let wf = workflow(&gw);
        wf.set_data_text("[1]");
        wf.set_question("Summarize data");

        let state = wf.trigger().await;
        assert_eq!(
            state,
            JobState::Failed(WorkflowError::Remote("Gemini API key not configured".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn validation_failure_supersedes_in_flight_query() {
        let gw = Arc::new(ScriptedGateway::new());
        gw.push_query(ms(2000), Ok(query_response("late")));
        let wf = Arc::new(workflow(&gw));
        wf.set_data_text("[1]");
        wf.set_question("List all names");

        let in_flight = {
            let wf = wf.clone();
            tokio::spawn(async move { wf.trigger().await })
        };
        tokio::time::sleep(ms(10)).await;
        wf.set_question("");
        wf.trigger().await;
        in_flight.await.unwrap();

        assert!(wf.state().error().unwrap().is_validation());
    }

    #[tokio::test(start_paused = true)]
    async fn data_edits_drive_live_token_count_independently() {
        let gw = Arc::new(ScriptedGateway::new());
        gw.push_count(ms(20), Ok(CountResponse { count: 12 }));
        let wf = workflow(&gw);

        wf.set_data_text("[");
        wf.set_data_text("[{\"id\": 1}]");
        tokio::time::sleep(ms(1100)).await;

        assert_eq!(wf.token_count().last_accepted_count, Some(12));
        assert_eq!(gw.count_calls(), vec!["[{\"id\": 1}]".to_string()]);
        assert_eq!(wf.state(), JobState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn set_input_leaves_token_counter_idle() {
        let gw = Arc::new(ScriptedGateway::new());
        gw.push_query(ms(3000), Ok(query_response("2")));
        let wf = workflow(&gw);

        wf.set_input(QueryInput {
            data_text: "[1,2]".into(),
            data_format: DataFormat::Json,
            question: "How many items?".into(),
        });
        let state = wf.trigger().await;
        tokio::time::sleep(ms(2000)).await;

        assert_eq!(state.result().unwrap().answer, "2");
        assert!(gw.count_calls().is_empty());
        assert_eq!(wf.token_count(), TokenCountState::default());
    }

    #[test]
    fn unknown_example_index_is_ignored() {
        let gw = Arc::new(ScriptedGateway::new());
        let wf = workflow(&gw);
        assert!(!wf.use_example_question(EXAMPLE_QUESTIONS.len()));
        assert_eq!(wf.input().question, "");
    }
}
