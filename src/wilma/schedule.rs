use crate::config::FetchConfig;
use crate::errors::AppResult;
use crate::models::ResourceType;
use crate::ui;
use crate::wilma::auth::Session;
use reqwest::Url;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Builds the schedule query URL for one resource type and date.
///
/// The date appears twice (`p` and `f`, period start and finish) because the
/// API takes a range and this tool always queries a single day.
pub fn schedule_url(base_url: &Url, resource_type: ResourceType, date: &str) -> AppResult<Url> {
    let mut url = base_url.join("schedule/index_json")?;
    url.query_pairs_mut()
        .append_pair("p", date)
        .append_pair("f", date)
        .append_pair(resource_type.as_str(), "all");
    Ok(url)
}

/// Output file path for one resource type and date.
fn output_file(output_path: &Path, resource_type: ResourceType, date: &str) -> PathBuf {
    output_path.join(format!("{}-{date}-data.json", resource_type.as_str()))
}

async fn send_request(session: &Session, url: &Url) -> reqwest::Result<String> {
    session.client().get(url.clone()).send().await?.text().await
}

/// Issues the schedule request, retrying on transport failure.
///
/// Connection errors, timeouts, and truncated bodies are retried after
/// `retry_delay`; with the default `max_attempts` of `None` the loop never
/// gives up, which is the tool's at-least-once delivery contract. HTTP error
/// statuses are not transport failures: the body is returned for any
/// response the server manages to send.
async fn fetch_with_retry(
    session: &Session,
    url: &Url,
    config: &FetchConfig,
) -> AppResult<String> {
    let mut attempt: u32 = 1;
    loop {
        match send_request(session, url).await {
            Ok(body) => return Ok(body),
            Err(e) => {
                if let Some(max_attempts) = config.max_attempts {
                    if attempt >= max_attempts.get() {
                        error!(
                            url = %url,
                            attempts = attempt,
                            error = %e,
                            "Schedule request failed, retry ceiling reached"
                        );
                        return Err(e.into());
                    }
                }
                warn!(
                    url = %url,
                    attempt = attempt,
                    delay_secs = config.retry_delay.as_secs_f64(),
                    error = %e,
                    "Schedule request failed, retrying after delay"
                );
                tokio::time::sleep(config.retry_delay).await;
                attempt += 1;
            }
        }
    }
}

/// Downloads the schedule for every date in the range and writes one JSON
/// file per date under `output_path`.
///
/// Each body is validated as JSON and then written verbatim to
/// `<output_path>/<resource_type>-<date>-data.json`, overwriting any existing
/// file. A body that is not valid JSON and any filesystem failure abort the
/// whole run; no files are written for the remaining dates. After each
/// processed date the loop pauses for `request_delay`.
pub async fn fetch_schedules(
    session: &Session,
    resource_type: ResourceType,
    dates: &[String],
    output_path: &Path,
    config: &FetchConfig,
) -> AppResult<()> {
    if dates.is_empty() {
        info!("Date range is empty, nothing to fetch");
        return Ok(());
    }

    let pb = ui::create_progress_bar(dates.len() as u64)?;

    for date in dates {
        let url = schedule_url(session.base_url(), resource_type, date)?;
        let body = fetch_with_retry(session, &url, config).await?;

        // Validation only; the raw body is what gets persisted.
        serde_json::from_str::<serde_json::Value>(&body)?;

        let file_path = output_file(output_path, resource_type, date);
        if let Err(e) = tokio::fs::write(&file_path, body.as_bytes()).await {
            error!(
                path = %file_path.display(),
                error = %e,
                "Writing output file failed, aborting run"
            );
            return Err(e.into());
        }

        info!(
            resource_type = resource_type.as_str(),
            date = date.as_str(),
            "Processed schedule"
        );
        pb.inc(1);

        tokio::time::sleep(config.request_delay).await;
    }

    pb.finish_with_message("all dates processed");
    Ok(())
}
