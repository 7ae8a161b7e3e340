use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;

use crate::notify::{NotificationSink, Toast};

pub const MIN_SCRIPT_CHARS: usize = 50;
pub const MAX_SCRIPT_CHARS: usize = 5000;
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("url pattern compiles"));

const ALLOWED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Which script source feeds the next submission. Switching keeps the other
/// two drafts intact, so nothing is lost by tabbing around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Text,
    Url,
    File,
}

impl InputSource {
    pub fn all() -> [InputSource; 3] {
        [InputSource::Text, InputSource::Url, InputSource::File]
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputSource::Text => "Text Input",
            InputSource::Url => "URL",
            InputSource::File => "File Upload",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching,
    Done,
}

// Per-field validation errors. Display strings are shown to the user
// verbatim, inline under the field.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("Script is required")]
    Required,
    #[error("Script must be at least 50 characters")]
    TooShort,
    #[error("Script cannot exceed 5000 characters")]
    TooLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("URL is required")]
    Required,
    #[error("Please enter a valid URL")]
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("File is required")]
    Required,
    #[error("Only PDF, DOC, or DOCX files are allowed")]
    UnsupportedType,
    #[error("File size cannot exceed 5MB")]
    TooLarge,
}

/// The active source failed its gate at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please provide a valid script")]
pub struct InvalidScript;

pub fn validate_text(text: &str) -> Result<(), TextError> {
    if text.is_empty() {
        return Err(TextError::Required);
    }
    let len = text.chars().count();
    if len < MIN_SCRIPT_CHARS {
        return Err(TextError::TooShort);
    }
    if len > MAX_SCRIPT_CHARS {
        return Err(TextError::TooLong);
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), UrlError> {
    if url.is_empty() {
        return Err(UrlError::Required);
    }
    if !URL_RE.is_match(url) {
        return Err(UrlError::Invalid);
    }
    Ok(())
}

pub fn validate_file(file: Option<&ScriptFile>) -> Result<(), FileError> {
    let file = file.ok_or(FileError::Required)?;
    if !ALLOWED_MIME_TYPES.contains(&file.mime.as_str()) {
        return Err(FileError::UnsupportedType);
    }
    if file.size > MAX_FILE_BYTES {
        return Err(FileError::TooLarge);
    }
    Ok(())
}

/// A locally selected script document. The picker filters by extension, but
/// the MIME tag and size recorded here are what validation actually checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl ScriptFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime: mime_for_path(path).to_string(),
            size: metadata.len(),
            path: path.to_path_buf(),
            name,
        })
    }
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

// Generation options, each a closed set with a default.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Simple,
    Popular,
    Advanced,
}

impl Style {
    pub fn all() -> [Style; 3] {
        [Style::Simple, Style::Popular, Style::Advanced]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Simple => "simple",
            Style::Popular => "popular",
            Style::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|v| v.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Style::Simple => "Simple",
            Style::Popular => "Popular",
            Style::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Vietnamese,
    Spanish,
}

impl Language {
    pub fn all() -> [Language; 3] {
        [Language::English, Language::Vietnamese, Language::Spanish]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Vietnamese => "vi",
            Language::Spanish => "es",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|v| v.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Vietnamese => "Vietnamese",
            Language::Spanish => "Spanish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    #[default]
    Joanna,
    Matthew,
    Salli,
}

impl Voice {
    pub fn all() -> [Voice; 3] {
        [Voice::Joanna, Voice::Matthew, Voice::Salli]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Joanna => "Joanna",
            Voice::Matthew => "Matthew",
            Voice::Salli => "Salli",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|v| v.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        self.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualStyle {
    #[default]
    Modern,
    Cartoon,
    Realistic,
}

impl VisualStyle {
    pub fn all() -> [VisualStyle; 3] {
        [VisualStyle::Modern, VisualStyle::Cartoon, VisualStyle::Realistic]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualStyle::Modern => "modern",
            VisualStyle::Cartoon => "cartoon",
            VisualStyle::Realistic => "realistic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|v| v.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VisualStyle::Modern => "Modern",
            VisualStyle::Cartoon => "Cartoon",
            VisualStyle::Realistic => "Realistic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormOptions {
    pub style: Style,
    pub language: Language,
    pub voice: Voice,
    pub visual_style: VisualStyle,
}

/// Resolved script content, tagged by the source that produced it so the
/// backend never has to guess which fields are populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Text { content: String },
    Url { content: String },
    File { name: String, path: PathBuf },
}

impl ScriptSource {
    /// Text handed to the generation pipeline. File uploads are passed
    /// through unparsed, so only a placeholder names them here.
    pub fn content_text(&self) -> String {
        match self {
            ScriptSource::Text { content } | ScriptSource::Url { content } => content.clone(),
            ScriptSource::File { name, .. } => format!("Content from file: {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub options: FormOptions,
    pub script: ScriptSource,
}

/// State behind the "Create Video" form: one draft per input source, the
/// fetch status of the URL branch, and the last validation outcome per
/// field. Only the handlers on this type mutate it.
#[derive(Debug, Default)]
pub struct VideoForm {
    pub source: InputSource,
    pub script_text: String,
    pub script_url: String,
    pub script_file: Option<ScriptFile>,
    pub fetched_text: String,
    pub fetch_status: FetchStatus,
    pub text_error: Option<TextError>,
    pub url_error: Option<UrlError>,
    pub file_error: Option<FileError>,
    pub options: FormOptions,
}

impl VideoForm {
    pub fn new(options: FormOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Activate a source. Drafts of the other sources are left alone.
    pub fn select_source(&mut self, source: InputSource) {
        self.source = source;
    }

    /// Re-validate after the script text changed.
    pub fn text_changed(&mut self) {
        self.text_error = validate_text(&self.script_text).err();
    }

    /// Re-validate after the URL changed. An emptied field shows no error
    /// until the user touches it again.
    pub fn url_changed(&mut self) {
        self.url_error = if self.script_url.is_empty() {
            None
        } else {
            validate_url(&self.script_url).err()
        };
    }

    pub fn select_file(&mut self, file: ScriptFile) {
        self.script_file = Some(file);
        self.file_error = validate_file(self.script_file.as_ref()).err();
    }

    pub fn can_fetch(&self) -> bool {
        self.fetch_status != FetchStatus::Fetching && !self.script_url.is_empty()
    }

    /// Gate a fetch attempt. Returns true when the caller should start the
    /// retrieval; at most one fetch is in flight at a time.
    pub fn begin_fetch(&mut self) -> bool {
        if !self.can_fetch() {
            return false;
        }
        if let Err(err) = validate_url(&self.script_url) {
            self.url_error = Some(err);
            return false;
        }
        self.url_error = None;
        self.fetch_status = FetchStatus::Fetching;
        true
    }

    pub fn fetch_succeeded(&mut self, content: String) {
        self.fetched_text = content;
        self.fetch_status = FetchStatus::Done;
    }

    /// A failed fetch keeps whatever content the last successful fetch
    /// produced; only a fresh success overwrites it.
    pub fn fetch_failed(&mut self) {
        self.fetch_status = if self.fetched_text.is_empty() {
            FetchStatus::Idle
        } else {
            FetchStatus::Done
        };
    }

    /// Resolve the active source into a payload, re-running its validation
    /// as the authoritative gate regardless of what live validation last
    /// said.
    pub fn resolve(&mut self) -> Result<SubmissionPayload, InvalidScript> {
        let script = match self.source {
            InputSource::Text => {
                self.text_error = validate_text(&self.script_text).err();
                if self.text_error.is_some() {
                    return Err(InvalidScript);
                }
                ScriptSource::Text {
                    content: self.script_text.clone(),
                }
            }
            InputSource::Url => {
                // URL validity alone is not enough: only a completed fetch
                // counts as content.
                if self.fetched_text.is_empty() {
                    return Err(InvalidScript);
                }
                ScriptSource::Url {
                    content: self.fetched_text.clone(),
                }
            }
            InputSource::File => {
                self.file_error = validate_file(self.script_file.as_ref()).err();
                if self.file_error.is_some() {
                    return Err(InvalidScript);
                }
                let file = self.script_file.as_ref().ok_or(InvalidScript)?;
                ScriptSource::File {
                    name: file.name.clone(),
                    path: file.path.clone(),
                }
            }
        };
        Ok(SubmissionPayload {
            options: self.options,
            script,
        })
    }
}

/// Submit the form: either one destructive toast fires and the sink is never
/// invoked, or `on_submit` runs exactly once followed by one success toast.
/// Returns whether the submission went through.
pub fn submit<S, F>(form: &mut VideoForm, notifications: &mut S, on_submit: F) -> bool
where
    S: NotificationSink,
    F: FnOnce(SubmissionPayload),
{
    match form.resolve() {
        Err(err) => {
            notifications.notify(Toast::destructive("Error", err.to_string()));
            false
        }
        Ok(payload) => {
            on_submit(payload);
            notifications.notify(Toast::new("Success", "Video generation started!"));
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    #[derive(Default)]
    struct RecordingSink {
        toasts: Vec<Toast>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&mut self, toast: Toast) {
            self.toasts.push(toast);
        }
    }

    fn pdf(size: u64) -> ScriptFile {
        ScriptFile {
            path: PathBuf::from("/tmp/script.pdf"),
            name: "script.pdf".to_string(),
            mime: "application/pdf".to_string(),
            size,
        }
    }

    #[test]
    fn test_text_validation_bounds() {
        assert_eq!(validate_text(""), Err(TextError::Required));
        assert_eq!(validate_text(&"a".repeat(49)), Err(TextError::TooShort));
        assert_eq!(validate_text(&"a".repeat(50)), Ok(()));
        assert_eq!(validate_text(&"a".repeat(5000)), Ok(()));
        assert_eq!(validate_text(&"a".repeat(5001)), Err(TextError::TooLong));
    }

    #[test]
    fn test_url_format() {
        assert_eq!(validate_url(""), Err(UrlError::Required));
        assert_eq!(validate_url("example.com/doc"), Err(UrlError::Invalid));
        assert_eq!(validate_url("ftp://example.com"), Err(UrlError::Invalid));
        assert_eq!(validate_url("https://"), Err(UrlError::Invalid));
        assert_eq!(validate_url("http://x"), Ok(()));
        assert_eq!(validate_url("https://example.com/doc"), Ok(()));
    }

    #[test]
    fn test_file_validation() {
        assert_eq!(validate_file(None), Err(FileError::Required));

        let mut png = pdf(10);
        png.mime = "image/png".to_string();
        // Wrong type fails regardless of size.
        assert_eq!(validate_file(Some(&png)), Err(FileError::UnsupportedType));

        // Right type but over 5MB fails regardless of type.
        assert_eq!(
            validate_file(Some(&pdf(MAX_FILE_BYTES + 1))),
            Err(FileError::TooLarge)
        );

        assert_eq!(validate_file(Some(&pdf(MAX_FILE_BYTES))), Ok(()));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a/b.PDF")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("x.doc")), "application/msword");
        assert_eq!(
            mime_for_path(Path::new("x.docx")),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(mime_for_path(Path::new("x.txt")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_source_switch_preserves_drafts() {
        let mut form = VideoForm::default();
        form.script_text = "draft text".to_string();
        form.script_url = "https://example.com".to_string();
        form.select_file(pdf(100));

        form.select_source(InputSource::Url);
        form.select_source(InputSource::File);
        form.select_source(InputSource::Text);

        assert_eq!(form.script_text, "draft text");
        assert_eq!(form.script_url, "https://example.com");
        assert_eq!(form.script_file, Some(pdf(100)));
    }

    #[test]
    fn test_submit_blocked_on_short_text() {
        let mut form = VideoForm::default();
        form.script_text = "too short".to_string();
        let mut sink = RecordingSink::default();
        let mut calls = 0;

        let ok = submit(&mut form, &mut sink, |_| calls += 1);

        assert!(!ok);
        assert_eq!(calls, 0);
        assert_eq!(sink.toasts.len(), 1);
        assert_eq!(sink.toasts[0].severity, Severity::Destructive);
        assert_eq!(sink.toasts[0].description, "Please provide a valid script");
    }

    #[test]
    fn test_submit_uses_fetched_content() {
        let mut form = VideoForm::default();
        form.select_source(InputSource::Url);
        form.script_url = "https://example.com/doc".to_string();
        assert!(form.begin_fetch());
        form.fetch_succeeded("Fetched script: quantum mechanics is neat.".to_string());

        let mut sink = RecordingSink::default();
        let mut payloads = Vec::new();
        let ok = submit(&mut form, &mut sink, |p| payloads.push(p));

        assert!(ok);
        assert_eq!(payloads.len(), 1);
        assert_eq!(
            payloads[0].script,
            ScriptSource::Url {
                content: "Fetched script: quantum mechanics is neat.".to_string()
            }
        );
        assert_eq!(sink.toasts.len(), 1);
        assert_eq!(sink.toasts[0].severity, Severity::Default);
        assert_eq!(sink.toasts[0].description, "Video generation started!");
    }

    #[test]
    fn test_url_submit_requires_completed_fetch() {
        let mut form = VideoForm::default();
        form.select_source(InputSource::Url);
        // A well-formed URL with no completed fetch must not resolve.
        form.script_url = "https://example.com/doc".to_string();
        assert_eq!(form.resolve(), Err(InvalidScript));
    }

    #[test]
    fn test_refetch_blocked_while_fetching() {
        let mut form = VideoForm::default();
        form.script_url = "https://example.com/doc".to_string();
        assert!(form.begin_fetch());
        assert_eq!(form.fetch_status, FetchStatus::Fetching);
        assert!(!form.begin_fetch());
    }

    #[test]
    fn test_fetch_failure_keeps_prior_content() {
        let mut form = VideoForm::default();
        form.script_url = "https://example.com/doc".to_string();
        assert!(form.begin_fetch());
        form.fetch_succeeded("first".to_string());

        assert!(form.begin_fetch());
        form.fetch_failed();
        assert_eq!(form.fetched_text, "first");
        assert_eq!(form.fetch_status, FetchStatus::Done);

        // With nothing fetched yet, a failure returns to idle.
        let mut fresh = VideoForm::default();
        fresh.script_url = "https://example.com/doc".to_string();
        assert!(fresh.begin_fetch());
        fresh.fetch_failed();
        assert_eq!(fresh.fetch_status, FetchStatus::Idle);
    }

    #[test]
    fn test_fetch_requires_valid_url() {
        let mut form = VideoForm::default();
        form.script_url = "not a url".to_string();
        assert!(!form.begin_fetch());
        assert_eq!(form.url_error, Some(UrlError::Invalid));
        assert_eq!(form.fetch_status, FetchStatus::Idle);
    }

    #[test]
    fn test_file_submission_carries_placeholder_and_reference() {
        let mut form = VideoForm::default();
        form.select_source(InputSource::File);
        form.select_file(pdf(1024));

        let payload = form.resolve().expect("file resolves");
        assert_eq!(
            payload.script,
            ScriptSource::File {
                name: "script.pdf".to_string(),
                path: PathBuf::from("/tmp/script.pdf"),
            }
        );
        assert_eq!(
            payload.script.content_text(),
            "Content from file: script.pdf"
        );
    }

    #[test]
    fn test_oversize_file_flagged_at_selection() {
        let mut form = VideoForm::default();
        // A 6 MB PDF fails the moment it is picked, before any submit.
        form.select_file(pdf(6 * 1024 * 1024));
        assert_eq!(form.file_error, Some(FileError::TooLarge));

        form.select_source(InputSource::File);
        assert_eq!(form.resolve(), Err(InvalidScript));
    }

    #[test]
    fn test_url_change_clears_error_when_emptied() {
        let mut form = VideoForm::default();
        form.script_url = "bogus".to_string();
        form.url_changed();
        assert_eq!(form.url_error, Some(UrlError::Invalid));

        form.script_url.clear();
        form.url_changed();
        assert_eq!(form.url_error, None);
    }

    #[test]
    fn test_option_round_trips() {
        for style in Style::all() {
            assert_eq!(Style::from_str(style.as_str()), Some(style));
        }
        for language in Language::all() {
            assert_eq!(Language::from_str(language.as_str()), Some(language));
        }
        for voice in Voice::all() {
            assert_eq!(Voice::from_str(voice.as_str()), Some(voice));
        }
        for visual in VisualStyle::all() {
            assert_eq!(VisualStyle::from_str(visual.as_str()), Some(visual));
        }
        assert_eq!(Style::from_str("bogus"), None);
    }
}
