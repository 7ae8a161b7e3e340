use crate::project::ProjectStatus;

// Static overview data. The analytics endpoints don't exist yet; these
// mirror what the real service is expected to report.

pub struct Stat {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

pub fn stats() -> Vec<Stat> {
    vec![
        Stat {
            title: "Total Videos",
            value: "42",
            change: "+12%",
        },
        Stat {
            title: "Processing",
            value: "7",
            change: "+3%",
        },
        Stat {
            title: "Completed",
            value: "35",
            change: "+18%",
        },
        Stat {
            title: "Storage Used",
            value: "68%",
            change: "+5%",
        },
    ]
}

pub struct RecentProject {
    pub title: &'static str,
    pub status: ProjectStatus,
    pub progress: u16,
    pub date: &'static str,
    pub views: u32,
}

pub fn recent_projects() -> Vec<RecentProject> {
    vec![
        RecentProject {
            title: "Quantum Mechanics Explained",
            status: ProjectStatus::Completed,
            progress: 100,
            date: "2 hours ago",
            views: 128,
        },
        RecentProject {
            title: "DNA Replication Process",
            status: ProjectStatus::Processing,
            progress: 65,
            date: "5 hours ago",
            views: 0,
        },
        RecentProject {
            title: "Black Holes and Spacetime",
            status: ProjectStatus::Completed,
            progress: 100,
            date: "1 day ago",
            views: 342,
        },
        RecentProject {
            title: "Climate Change Effects",
            status: ProjectStatus::Draft,
            progress: 20,
            date: "2 days ago",
            views: 0,
        },
    ]
}

pub struct Activity {
    pub user: &'static str,
    pub action: &'static str,
    pub project: &'static str,
    pub time: &'static str,
}

pub fn activities() -> Vec<Activity> {
    vec![
        Activity {
            user: "You",
            action: "created a new video",
            project: "Quantum Mechanics Explained",
            time: "2 hours ago",
        },
        Activity {
            user: "System",
            action: "completed processing",
            project: "Quantum Mechanics Explained",
            time: "1 hour ago",
        },
        Activity {
            user: "You",
            action: "started a new video",
            project: "DNA Replication Process",
            time: "5 hours ago",
        },
        Activity {
            user: "System",
            action: "is processing",
            project: "DNA Replication Process",
            time: "4 hours ago",
        },
        Activity {
            user: "You",
            action: "viewed analytics for",
            project: "Black Holes and Spacetime",
            time: "Yesterday",
        },
    ]
}

pub struct UsageMeter {
    pub label: &'static str,
    pub detail: &'static str,
    pub percent: u16,
}

pub fn usage_meters() -> Vec<UsageMeter> {
    vec![
        UsageMeter {
            label: "Storage",
            detail: "6.8 GB / 10 GB",
            percent: 68,
        },
        UsageMeter {
            label: "Video Processing",
            detail: "42 / 100 videos",
            percent: 42,
        },
        UsageMeter {
            label: "API Calls",
            detail: "8,542 / 10,000 calls",
            percent: 85,
        },
    ]
}
