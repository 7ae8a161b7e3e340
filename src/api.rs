use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use reqwest::Client;

use crate::form::SubmissionPayload;
use crate::project::{Project, ProjectStatus};

/// Simulated latency for the endpoints that aren't wired up yet.
const MOCK_DELAY: Duration = Duration::from_millis(1000);

/// Client for the generation service. Remote script fetching is a real HTTP
/// GET; generation, auth, and preview refresh are simulated with a delay and
/// a fabricated response until the backend exists.
#[derive(Clone)]
pub struct StudioClient {
    client: Client,
}

impl StudioClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Retrieve the document at `url` as script text.
    pub async fn fetch_script(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "script fetch failed with status: {}",
                response.status()
            ));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(anyhow!("fetched document was empty"));
        }
        Ok(text)
    }

    /// Kick off video generation for a submitted script.
    pub async fn generate(&self, payload: SubmissionPayload) -> Result<Project> {
        tokio::time::sleep(MOCK_DELAY).await;

        let topic = payload.script.content_text();
        tracing::info!(
            style = payload.options.style.as_str(),
            language = payload.options.language.as_str(),
            voice = payload.options.voice.as_str(),
            visual_style = payload.options.visual_style.as_str(),
            "generation accepted"
        );

        Ok(Project {
            id: mock_id(),
            script_id: mock_id(),
            script: topic.clone(),
            topic,
            status: ProjectStatus::Processing,
            audio_url: Some("/mock/audio.mp3".to_string()),
            visual_url: Some("/mock/visual.png".to_string()),
            video_url: Some("/mock/video.mp4".to_string()),
        })
    }

    pub async fn authenticate(&self, email: &str) -> Result<()> {
        tracing::info!(email, "authenticating");
        tokio::time::sleep(MOCK_DELAY).await;
        Ok(())
    }

    pub async fn refresh_preview(&self, project_id: &str) -> Result<()> {
        tracing::info!(project_id, "refreshing preview");
        tokio::time::sleep(MOCK_DELAY).await;
        Ok(())
    }
}

impl Default for StudioClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Eight base-36 chars off the clock, the same shape the service uses for
/// project and script ids.
fn mock_id() -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut n = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut out = [0u8; 8];
    for slot in out.iter_mut() {
        *slot = ALPHABET[(n % 36) as usize];
        n /= 36;
    }
    out.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormOptions, ScriptSource};

    #[test]
    fn test_mock_id_shape() {
        let id = mock_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_generate_fabricates_processing_project() {
        tokio::time::pause();
        let client = StudioClient::new();
        let payload = SubmissionPayload {
            options: FormOptions::default(),
            script: ScriptSource::Text {
                content: "a".repeat(60),
            },
        };

        let handle = tokio::spawn(async move { client.generate(payload).await });
        tokio::time::advance(MOCK_DELAY).await;
        let project = handle.await.expect("join").expect("generate");

        assert_eq!(project.status, ProjectStatus::Processing);
        assert_eq!(project.topic, "a".repeat(60));
        assert_eq!(project.script, project.topic);
        assert_eq!(project.video_url.as_deref(), Some("/mock/video.mp4"));
        assert_eq!(project.id.len(), 8);
    }
}
