//! Submission handling.
//!
//! One submission is one synchronous exchange: validate the query, perform
//! the single outbound call, extract the display text, record the exchange.
//! Any error is logged with full detail and propagated; the conversation is
//! modified only after every fallible step has succeeded, so a failed call
//! leaves it byte-for-byte unchanged.

use kbchat_core::AppResult;
use kbchat_retrieval::{extract_display_text, QueryOptions, QueryRequest, RetrievalClient};

use crate::session::Conversation;

/// Submit one query against the retrieval service.
///
/// The conversation's session token, when present, is threaded into the
/// request for multi-turn context; the token returned by the service is
/// adopted for the next turn. Returns the display text that was recorded.
pub async fn submit(
    query: &str,
    options: QueryOptions,
    conversation: &mut Conversation,
    client: &dyn RetrievalClient,
) -> AppResult<String> {
    match run_exchange(query, options, conversation, client).await {
        Ok(display_text) => Ok(display_text),
        Err(e) => {
            tracing::error!(
                provider = client.provider_name(),
                error = %e,
                "Submission failed; conversation left unchanged"
            );
            Err(e)
        }
    }
}

async fn run_exchange(
    query: &str,
    options: QueryOptions,
    conversation: &mut Conversation,
    client: &dyn RetrievalClient,
) -> AppResult<String> {
    let mut request = QueryRequest::new(query, options)?;
    if let Some(session_id) = conversation.session_id() {
        request = request.with_session(session_id);
    }

    tracing::info!(provider = client.provider_name(), "Submitting query");

    let response = client.retrieve_and_generate(&request).await?;
    let display_text = extract_display_text(&response)?;

    if let Some(session_id) = response.session_id {
        conversation.set_session_id(session_id);
    }
    conversation.record_exchange(query, &display_text);

    Ok(display_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbchat_core::{AppError, AppResult};
    use kbchat_retrieval::wire::{
        Citation, GeneratedOutput, ReferenceLocation, RetrieveAndGenerateResponse,
        RetrievedReference, S3Location,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted client: pops one canned result per call and records every
    /// request it sees.
    struct MockRetrievalClient {
        results: Mutex<VecDeque<AppResult<RetrieveAndGenerateResponse>>>,
        requests: Mutex<Vec<QueryRequest>>,
    }

    impl MockRetrievalClient {
        fn new(results: Vec<AppResult<RetrieveAndGenerateResponse>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, index: usize) -> QueryRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    #[async_trait::async_trait]
    impl RetrievalClient for MockRetrievalClient {
        fn provider_name(&self) -> &str {
            "mock"
        }

        async fn retrieve_and_generate(
            &self,
            request: &QueryRequest,
        ) -> AppResult<RetrieveAndGenerateResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Retrieval("no scripted result".to_string())))
        }
    }

    fn answer(text: &str, session_id: Option<&str>) -> RetrieveAndGenerateResponse {
        RetrieveAndGenerateResponse {
            output: Some(GeneratedOutput {
                text: Some(text.to_string()),
            }),
            citations: vec![],
            session_id: session_id.map(str::to_string),
        }
    }

    fn answer_with_reference(text: &str, uri: &str) -> RetrieveAndGenerateResponse {
        RetrieveAndGenerateResponse {
            output: Some(GeneratedOutput {
                text: Some(text.to_string()),
            }),
            citations: vec![Citation {
                retrieved_references: vec![RetrievedReference {
                    location: Some(ReferenceLocation {
                        location_type: Some("S3".to_string()),
                        s3_location: Some(S3Location {
                            uri: uri.to_string(),
                        }),
                    }),
                }],
            }],
            session_id: None,
        }
    }

    #[tokio::test]
    async fn test_two_submissions_order_newest_first() {
        let client = MockRetrievalClient::new(vec![
            Ok(answer("first answer", None)),
            Ok(answer("second answer", None)),
        ]);
        let mut conversation = Conversation::new();

        submit("first question", QueryOptions::default(), &mut conversation, &client)
            .await
            .unwrap();
        submit("second question", QueryOptions::default(), &mut conversation, &client)
            .await
            .unwrap();

        let entries = conversation.entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].text, "second answer");
        assert_eq!(entries[1].text, "second question");
        assert_eq!(entries[2].text, "first answer");
        assert_eq!(entries[3].text, "first question");
    }

    #[tokio::test]
    async fn test_reference_is_part_of_recorded_text() {
        let client = MockRetrievalClient::new(vec![Ok(answer_with_reference(
            "The answer is 42.",
            "s3://bucket/doc.pdf",
        ))]);
        let mut conversation = Conversation::new();

        let display_text = submit(
            "what is the answer?",
            QueryOptions::default(),
            &mut conversation,
            &client,
        )
        .await
        .unwrap();

        assert_eq!(display_text, "The answer is 42.\n\nReference:\ns3://bucket/doc.pdf");
        assert_eq!(conversation.entries()[0].text, display_text);
    }

    #[tokio::test]
    async fn test_failed_call_leaves_conversation_unchanged() {
        let client = MockRetrievalClient::new(vec![
            Ok(answer("first answer", Some("session-1"))),
            Err(AppError::Retrieval("simulated timeout".to_string())),
        ]);
        let mut conversation = Conversation::new();

        submit("first question", QueryOptions::default(), &mut conversation, &client)
            .await
            .unwrap();
        let len_before = conversation.len();

        let result = submit(
            "second question",
            QueryOptions::default(),
            &mut conversation,
            &client,
        )
        .await;

        assert!(matches!(result, Err(AppError::Retrieval(_))));
        assert_eq!(conversation.len(), len_before);
        // Session token from the successful turn survives the failure.
        assert_eq!(conversation.session_id(), Some("session-1"));
    }

    #[tokio::test]
    async fn test_empty_query_never_reaches_the_client() {
        let client = MockRetrievalClient::new(vec![Ok(answer("unused", None))]);
        let mut conversation = Conversation::new();

        let result = submit("   ", QueryOptions::default(), &mut conversation, &client).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(client.calls(), 0);
        assert!(conversation.is_empty());
    }

    #[tokio::test]
    async fn test_session_token_is_threaded_into_next_request() {
        let client = MockRetrievalClient::new(vec![
            Ok(answer("first answer", Some("session-1"))),
            Ok(answer("second answer", Some("session-1"))),
        ]);
        let mut conversation = Conversation::new();

        submit("first question", QueryOptions::default(), &mut conversation, &client)
            .await
            .unwrap();
        submit("second question", QueryOptions::default(), &mut conversation, &client)
            .await
            .unwrap();

        assert!(client.request(0).session_id.is_none());
        assert_eq!(client.request(1).session_id.as_deref(), Some("session-1"));
    }

    #[tokio::test]
    async fn test_extraction_failure_leaves_conversation_unchanged() {
        let client = MockRetrievalClient::new(vec![Ok(RetrieveAndGenerateResponse {
            output: None,
            citations: vec![],
            session_id: Some("session-1".to_string()),
        })]);
        let mut conversation = Conversation::new();

        let result = submit("a question", QueryOptions::default(), &mut conversation, &client).await;

        assert!(matches!(result, Err(AppError::Extraction(_))));
        assert!(conversation.is_empty());
        // A response we could not extract from must not update the session.
        assert!(conversation.session_id().is_none());
    }
}
