use serde::{Deserialize, Serialize};

/// Rows shown per page of the project table.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Processing,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Processing => "processing",
            ProjectStatus::Completed => "completed",
        }
    }
}

/// One generation job as the backend reports it. Artifact URLs stay `None`
/// until the corresponding stage has produced something.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub topic: String,
    pub status: ProjectStatus,
    pub script_id: String,
    #[serde(default)]
    pub script: String,
    pub audio_url: Option<String>,
    pub visual_url: Option<String>,
    pub video_url: Option<String>,
}

/// In-memory project listing backing the table view. Newest first.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows shown until the real listing endpoint lands.
    pub fn with_mock_data() -> Self {
        let row = |id: &str, topic: &str, status, script_id: &str, video: Option<&str>| Project {
            id: id.to_string(),
            topic: topic.to_string(),
            status,
            script_id: script_id.to_string(),
            script: String::new(),
            audio_url: None,
            visual_url: None,
            video_url: video.map(str::to_string),
        };
        Self {
            projects: vec![
                row(
                    "a1b2c3d4",
                    "Quantum Mechanics",
                    ProjectStatus::Completed,
                    "s1d2f3",
                    Some("/mock/video1.mp4"),
                ),
                row(
                    "e5f6g7h8",
                    "DNA Replication",
                    ProjectStatus::Processing,
                    "s4d5f6",
                    None,
                ),
                row(
                    "i9j0k1l2",
                    "Black Holes",
                    ProjectStatus::Completed,
                    "s7d8f9",
                    Some("/mock/video2.mp4"),
                ),
                row(
                    "m3n4o5p6",
                    "Climate Change",
                    ProjectStatus::Draft,
                    "s0d1f2",
                    None,
                ),
                row(
                    "q7r8s9t0",
                    "Photosynthesis",
                    ProjectStatus::Completed,
                    "s3d4f5",
                    Some("/mock/video3.mp4"),
                ),
            ],
        }
    }

    pub fn insert_front(&mut self, project: Project) {
        self.projects.insert(0, project);
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Case-insensitive topic search, preserving listing order.
    pub fn filtered(&self, query: &str) -> Vec<&Project> {
        let query = query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.topic.to_lowercase().contains(&query))
            .collect()
    }

    /// Number of pages the filtered listing spans; never zero, so page
    /// navigation always has a valid target.
    pub fn total_pages(&self, query: &str) -> usize {
        self.filtered(query).len().div_ceil(PAGE_SIZE).max(1)
    }

    /// One-based page window over the filtered listing.
    pub fn page(&self, query: &str, page: usize) -> Vec<&Project> {
        let filtered = self.filtered(query);
        let page = page.clamp(1, self.total_pages(query));
        filtered
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: usize) -> ProjectStore {
        let mut store = ProjectStore::new();
        for i in 0..n {
            store.insert_front(Project {
                id: format!("id{i}"),
                topic: format!("Topic {i}"),
                status: ProjectStatus::Draft,
                script_id: format!("s{i}"),
                script: String::new(),
                audio_url: None,
                visual_url: None,
                video_url: None,
            });
        }
        store
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = ProjectStore::with_mock_data();
        let hits = store.filtered("dna");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].topic, "DNA Replication");
        // Empty query matches everything.
        assert_eq!(store.filtered("").len(), 5);
        assert!(store.filtered("no such topic").is_empty());
    }

    #[test]
    fn test_pagination_windows() {
        let store = store_with(23);
        assert_eq!(store.total_pages(""), 3);
        assert_eq!(store.page("", 1).len(), 10);
        assert_eq!(store.page("", 2).len(), 10);
        assert_eq!(store.page("", 3).len(), 3);
    }

    #[test]
    fn test_page_is_clamped() {
        let store = store_with(5);
        assert_eq!(store.total_pages(""), 1);
        // Out-of-range requests land on the nearest valid page.
        assert_eq!(store.page("", 0).len(), 5);
        assert_eq!(store.page("", 99).len(), 5);
    }

    #[test]
    fn test_empty_store_has_one_page() {
        let store = ProjectStore::new();
        assert_eq!(store.total_pages(""), 1);
        assert!(store.page("", 1).is_empty());
    }

    #[test]
    fn test_insert_front_puts_newest_first() {
        let mut store = ProjectStore::with_mock_data();
        store.insert_front(Project {
            id: "new00001".to_string(),
            topic: "Plate Tectonics".to_string(),
            status: ProjectStatus::Processing,
            script_id: "s9f9f9".to_string(),
            script: String::new(),
            audio_url: None,
            visual_url: None,
            video_url: None,
        });
        assert_eq!(store.page("", 1)[0].id, "new00001");
    }
}
