use crate::{fetch, Tool};
use async_trait::async_trait;
use lenz_core::error::ToolError;
use lenz_core::message::{MessageSink, ToolMessage};
use lenz_core::params::{Credentials, RandomParams};
use lenz_core::photo::{PhotoDetail, PhotoRecord};
use serde::Serialize;
use serde_json::Value;
use unsplash_provider::UnsplashClient;

/// Random photo retrieval.
///
/// Emits a summary line, one binary payload per downloaded photo, a JSON
/// result envelope, and the `random_photos` and `photo_details` output
/// variables, in that order.
pub struct RandomTool {
    client: UnsplashClient,
}

#[derive(Debug, Clone, Serialize)]
struct RandomEnvelope {
    photos: Vec<PhotoRecord>,
    error: Option<String>,
    parameters: Option<RandomParams>,
    photo_details: Vec<PhotoDetail>,
}

impl RandomTool {
    pub fn new(client: UnsplashClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for RandomTool {
    fn name(&self) -> &'static str {
        "unsplash_random"
    }

    async fn invoke(
        &self,
        tool_parameters: &Value,
        credentials: &Credentials,
        sink: &mut (dyn MessageSink + Send),
    ) {
        let params = match RandomParams::from_value(tool_parameters) {
            Ok(params) => params,
            Err(err) => {
                emit_failure(sink, &err, None);
                return;
            }
        };

        tracing::info!(count = params.count, query = ?params.query, "requesting random photos");
        let results = match self
            .client
            .random_photos(&credentials.access_key, &params)
            .await
        {
            Ok(results) => results,
            Err(err) => {
                emit_failure(sink, &err, Some(&params));
                return;
            }
        };

        let filters = filter_summary(&params);
        sink.emit(ToolMessage::text(format!(
            "Retrieved {} random photos ({filters})",
            results.len()
        )));

        if results.is_empty() {
            let envelope = RandomEnvelope {
                photos: Vec::new(),
                error: None,
                parameters: Some(params),
                photo_details: Vec::new(),
            };
            sink.emit(ToolMessage::json(&envelope));
            sink.emit(ToolMessage::variable("random_photos", &envelope.photos));
            return;
        }

        let (photos, photo_details) =
            fetch::collect_photos(&self.client, &results, "unsplash_random_", sink).await;

        let envelope = RandomEnvelope {
            photos,
            error: None,
            parameters: Some(params),
            photo_details,
        };
        sink.emit(ToolMessage::json(&envelope));
        sink.emit(ToolMessage::variable("random_photos", &envelope.photos));
        sink.emit(ToolMessage::variable("photo_details", &envelope.photo_details));
    }
}

fn emit_failure(
    sink: &mut (dyn MessageSink + Send),
    err: &ToolError,
    params: Option<&RandomParams>,
) {
    tracing::error!(error = %err, "random photo invocation failed");
    let message = err.user_message();
    sink.emit(ToolMessage::text(message.clone()));
    sink.emit(ToolMessage::json(&RandomEnvelope {
        photos: Vec::new(),
        error: Some(message),
        parameters: params.cloned(),
        photo_details: Vec::new(),
    }));
    sink.emit(ToolMessage::variable("random_photos", &Vec::<PhotoRecord>::new()));
}

fn filter_summary(params: &RandomParams) -> String {
    let mut filters = Vec::new();
    if let Some(query) = &params.query {
        filters.push(format!("query='{query}'"));
    }
    if let Some(orientation) = &params.orientation {
        filters.push(format!("orientation='{orientation}'"));
    }
    if let Some(color) = &params.color {
        filters.push(format!("color='{color}'"));
    }

    if filters.is_empty() {
        "no filters applied".to_string()
    } else {
        filters.join(", ")
    }
}
