// Resume analysis API: multipart upload extraction plus model-graded reports.
// All text extraction goes through extract; all model calls through llm_client.

pub mod handlers;
