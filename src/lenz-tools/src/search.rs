use crate::{fetch, Tool};
use async_trait::async_trait;
use lenz_core::error::ToolError;
use lenz_core::message::{MessageSink, ToolMessage};
use lenz_core::params::{Credentials, SearchParams};
use lenz_core::photo::{PhotoDetail, PhotoRecord};
use serde::Serialize;
use serde_json::Value;
use unsplash_provider::UnsplashClient;

/// Keyword photo search.
///
/// Emits a summary line, one binary payload per downloaded photo, a JSON
/// result envelope, and the `photos`, `photo_details` and `total_results`
/// output variables, in that order.
pub struct SearchTool {
    client: UnsplashClient,
}

#[derive(Debug, Clone, Serialize)]
struct SearchEnvelope {
    photos: Vec<PhotoRecord>,
    total: u64,
    total_pages: u64,
    error: Option<String>,
    search_parameters: Option<SearchParams>,
    photo_details: Vec<PhotoDetail>,
}

impl SearchTool {
    pub fn new(client: UnsplashClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &'static str {
        "unsplash_search"
    }

    async fn invoke(
        &self,
        tool_parameters: &Value,
        credentials: &Credentials,
        sink: &mut (dyn MessageSink + Send),
    ) {
        let params = match SearchParams::from_value(tool_parameters) {
            Ok(params) => params,
            Err(err) => {
                emit_failure(sink, &err, None);
                return;
            }
        };

        tracing::info!(query = %params.query, per_page = params.per_page, "searching Unsplash");
        let response = match self
            .client
            .search_photos(&credentials.access_key, &params)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                emit_failure(sink, &err, Some(&params));
                return;
            }
        };

        let total = response.total.unwrap_or(0);
        let total_pages = response.total_pages.unwrap_or(0);
        let results = response.results.unwrap_or_default();
        let filters = filter_summary(&params);

        let summary = if total > 0 {
            format!(
                "Found {total} photos for {filters}. Showing {} results.",
                results.len()
            )
        } else {
            format!("No photos found for {filters}. Please try different keywords.")
        };
        sink.emit(ToolMessage::text(summary));

        if results.is_empty() {
            // The empty envelope reports zero totals even when the summary
            // line quoted a nonzero upstream count.
            let envelope = SearchEnvelope {
                photos: Vec::new(),
                total: 0,
                total_pages: 0,
                error: None,
                search_parameters: Some(params),
                photo_details: Vec::new(),
            };
            sink.emit(ToolMessage::json(&envelope));
            sink.emit(ToolMessage::variable("photos", &envelope.photos));
            sink.emit(ToolMessage::variable("total_results", &0u64));
            return;
        }

        let (photos, photo_details) =
            fetch::collect_photos(&self.client, &results, "unsplash_", sink).await;

        let envelope = SearchEnvelope {
            photos,
            total,
            total_pages,
            error: None,
            search_parameters: Some(params),
            photo_details,
        };
        sink.emit(ToolMessage::json(&envelope));
        sink.emit(ToolMessage::variable("photos", &envelope.photos));
        sink.emit(ToolMessage::variable("photo_details", &envelope.photo_details));
        sink.emit(ToolMessage::variable("total_results", &envelope.total));
    }
}

fn emit_failure(
    sink: &mut (dyn MessageSink + Send),
    err: &ToolError,
    params: Option<&SearchParams>,
) {
    tracing::error!(error = %err, "search invocation failed");
    let message = err.user_message();
    sink.emit(ToolMessage::text(message.clone()));
    sink.emit(ToolMessage::json(&SearchEnvelope {
        photos: Vec::new(),
        total: 0,
        total_pages: 0,
        error: Some(message),
        search_parameters: params.cloned(),
        photo_details: Vec::new(),
    }));
    sink.emit(ToolMessage::variable("photos", &Vec::<PhotoRecord>::new()));
    sink.emit(ToolMessage::variable("total_results", &0u64));
}

fn filter_summary(params: &SearchParams) -> String {
    let mut summary = format!("query='{}'", params.query);
    if let Some(orientation) = &params.orientation {
        summary.push_str(&format!(", orientation='{orientation}'"));
    }
    if let Some(color) = &params.color {
        summary.push_str(&format!(", color='{color}'"));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_summary_lists_present_filters_in_order() {
        let params = SearchParams {
            query: "mountains".into(),
            per_page: 2,
            orientation: Some("portrait".into()),
            color: Some("blue".into()),
        };
        assert_eq!(
            filter_summary(&params),
            "query='mountains', orientation='portrait', color='blue'"
        );
    }

    #[test]
    fn filter_summary_omits_absent_filters() {
        let params = SearchParams {
            query: "mountains".into(),
            per_page: 10,
            orientation: None,
            color: None,
        };
        assert_eq!(filter_summary(&params), "query='mountains'");
    }
}
