//! Session integration tests.

use std::io;
use std::path::Path;
use std::sync::Arc;

use aarogya_core::config::{AppConfig, MessagesConfig};
use aarogya_core::suggestions::SuggestionTable;
use aarogya_core::{DiagnosisRecord, Notice, NoticeKind, Presenter, SymptomMatcher, Theme, ThemeStore};
use aarogya_suggest::{
    FetchResult, FileSource, Session, SuggestStatus, SuggestionFetcher, TableSource,
};
use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Notify;

/// Presenter that records every call.
#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Diagnosis(String),
    Suggestions(Vec<String>),
    Notice(NoticeKind, String),
    Clear,
    Theme(Theme),
}

impl Presenter for Recorder {
    fn show_diagnosis(&mut self, record: &DiagnosisRecord) -> io::Result<()> {
        self.events.push(Event::Diagnosis(record.condition.clone()));
        Ok(())
    }

    fn show_suggestions(&mut self, tests: &[String]) -> io::Result<()> {
        self.events.push(Event::Suggestions(tests.to_vec()));
        Ok(())
    }

    fn show_notice(&mut self, notice: &Notice) -> io::Result<()> {
        self.events.push(Event::Notice(notice.kind, notice.message.clone()));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.events.push(Event::Clear);
        Ok(())
    }

    fn apply_theme(&mut self, theme: Theme) -> io::Result<()> {
        self.events.push(Event::Theme(theme));
        Ok(())
    }
}

fn write_table(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("symptomTestData.json");
    std::fs::write(
        &path,
        r#"{"headache": ["CT Scan", "Blood Test"], "sore throat": ["Throat Swab"]}"#,
    )
    .unwrap();
    path
}

fn session_for(table_path: &Path) -> Session<Recorder> {
    let fetcher = SuggestionFetcher::new(Arc::new(FileSource::new(table_path)));
    Session::new(SymptomMatcher::new(), Arc::new(fetcher), Recorder::default())
}

/// Source that blocks each load until released.
struct GatedSource {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl TableSource for GatedSource {
    async fn load(&self) -> FetchResult<SuggestionTable> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(vec![("headache", vec!["CT Scan"])].into_iter().collect())
    }

    fn describe(&self) -> String {
        "gated".into()
    }
}

#[test]
fn test_diagnose_renders_record() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&write_table(dir.path()));

    session.diagnose("Fever, cough").unwrap();
    session.diagnose("tired").unwrap();

    assert_eq!(
        session.presenter().events,
        vec![
            Event::Diagnosis("Flu or COVID-19".into()),
            Event::Diagnosis("General Viral Infection".into()),
        ]
    );
    assert_eq!(session.state().last_query.as_deref(), Some("tired"));
    assert!(session.state().results_visible);
}

#[test]
fn test_diagnose_blank_prompts() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&write_table(dir.path()));

    session.diagnose("   ").unwrap();

    assert_eq!(
        session.presenter().events,
        vec![Event::Notice(NoticeKind::Info, "Please enter a symptom first.".into())]
    );
    assert!(!session.state().results_visible);
}

#[tokio::test]
async fn test_suggest_found() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&write_table(dir.path()));

    let status = session.suggest("  Headache ").await.unwrap();

    assert_eq!(status, SuggestStatus::Found(2));
    assert_eq!(
        session.presenter().events.last(),
        Some(&Event::Suggestions(vec!["CT Scan".into(), "Blood Test".into()]))
    );
    assert!(session.state().results_visible);
}

#[tokio::test]
async fn test_suggest_not_found_with_hint() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&write_table(dir.path()));

    let status = session.suggest("headach").await.unwrap();

    assert_eq!(status, SuggestStatus::NotFound);
    assert_eq!(
        session.presenter().events,
        vec![Event::Notice(
            NoticeKind::Info,
            "No test suggestions found for the entered symptom. Did you mean: headache?".into()
        )]
    );
}

#[tokio::test]
async fn test_suggest_not_found_plain() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&write_table(dir.path()));

    let status = session.suggest("unknown").await.unwrap();

    assert_eq!(status, SuggestStatus::NotFound);
    assert_eq!(
        session.presenter().events,
        vec![Event::Notice(
            NoticeKind::Info,
            "No test suggestions found for the entered symptom.".into()
        )]
    );
}

#[tokio::test]
async fn test_suggest_blank_does_not_fetch() {
    // the table file does not exist, so any fetch would fail
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&dir.path().join("missing.json"));

    let status = session.suggest("").await.unwrap();

    assert_eq!(status, SuggestStatus::EmptyInput);
    assert_eq!(
        session.presenter().events,
        vec![Event::Notice(NoticeKind::Info, "Please enter a symptom first.".into())]
    );
}

#[tokio::test]
async fn test_fetch_failure_is_recoverable() {
    let dir = TempDir::new().unwrap();
    let table_path = dir.path().join("symptomTestData.json");
    let mut session = session_for(&table_path).with_messages(MessagesConfig {
        fetch_error: "Could not load suggestions.".into(),
        ..MessagesConfig::default()
    });

    let status = session.suggest("headache").await.unwrap();
    assert_eq!(status, SuggestStatus::Failed);
    assert_eq!(
        session.presenter().events.last(),
        Some(&Event::Notice(NoticeKind::Error, "Could not load suggestions.".into()))
    );

    // no retry happened, but the next request works once the file exists
    write_table(dir.path());
    let status = session.suggest("headache").await.unwrap();
    assert_eq!(status, SuggestStatus::Found(2));
}

#[tokio::test]
async fn test_malformed_table_is_fetch_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("symptomTestData.json");
    std::fs::write(&path, r#"{"headache": "CT Scan"}"#).unwrap();
    let mut session = session_for(&path);

    assert_eq!(session.suggest("headache").await.unwrap(), SuggestStatus::Failed);
}

#[tokio::test]
async fn test_reset_clears_state() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&write_table(dir.path()));

    session.suggest("headache").await.unwrap();
    session.reset().unwrap();

    assert_eq!(session.presenter().events.last(), Some(&Event::Clear));
    assert_eq!(session.state().last_query, None);
    assert!(!session.state().results_visible);
}

#[test]
fn test_theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("theme");
    let mut session = session_for(&write_table(dir.path()))
        .with_theme_store(ThemeStore::new(&store_path));

    assert_eq!(session.state().theme, Theme::Dark);
    session.start().unwrap();

    assert_eq!(session.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(ThemeStore::new(&store_path).load(), Theme::Light);

    // a new session picks up the stored preference
    let session = session_for(&write_table(dir.path()))
        .with_theme_store(ThemeStore::new(&store_path));
    assert_eq!(session.state().theme, Theme::Light);
}

#[tokio::test]
async fn test_from_config() {
    let dir = TempDir::new().unwrap();
    write_table(dir.path());

    let mut config = AppConfig::default();
    config.suggestions.data_dir = dir.path().to_path_buf();
    config.theme.store_path = dir.path().join("theme");
    config.messages.no_suggestions = "Nothing found.".into();

    let mut session = Session::from_config(&config, Recorder::default()).unwrap();

    assert_eq!(session.suggest("sore throat").await.unwrap(), SuggestStatus::Found(1));
    assert_eq!(session.suggest("cough").await.unwrap(), SuggestStatus::NotFound);
    assert_eq!(
        session.presenter().events.last(),
        Some(&Event::Notice(NoticeKind::Info, "Nothing found.".into()))
    );
}

#[tokio::test]
async fn test_superseded_suggest_renders_nothing() {
    let gated = Arc::new(GatedSource {
        started: Notify::new(),
        release: Notify::new(),
    });
    let fetcher = Arc::new(SuggestionFetcher::new(gated.clone()));

    let mut stale = Session::new(
        SymptomMatcher::new(),
        Arc::clone(&fetcher),
        Recorder::default(),
    );
    stale.diagnose("tired").unwrap();
    let state_before = stale.state().clone();
    let events_before = stale.presenter().events.clone();

    let stale = tokio::spawn(async move {
        let status = stale.suggest("headache").await.unwrap();
        (status, stale)
    });
    gated.started.notified().await;

    let fresh = {
        let fetcher = Arc::clone(&fetcher);
        tokio::spawn(async move {
            let mut session = Session::new(SymptomMatcher::new(), fetcher, Recorder::default());
            let status = session.suggest("headache").await.unwrap();
            (status, session)
        })
    };
    gated.started.notified().await;

    // only the newer request is still waiting on the source
    gated.release.notify_waiters();

    let (stale_status, stale) = stale.await.unwrap();
    assert_eq!(stale_status, SuggestStatus::Superseded);
    assert_eq!(stale.presenter().events, events_before);
    assert_eq!(stale.state(), &state_before);

    let (fresh_status, fresh) = fresh.await.unwrap();
    assert_eq!(fresh_status, SuggestStatus::Found(1));
    assert_eq!(
        fresh.presenter().events,
        vec![
            Event::Notice(NoticeKind::Success, "Suggested tests for \"headache\":".into()),
            Event::Suggestions(vec!["CT Scan".into()]),
        ]
    );
    assert_eq!(fresh.state().last_query.as_deref(), Some("headache"));
}
