//! Presentation boundary.
//!
//! The matcher never renders anything itself; it hands records, suggestion
//! lists and notices to a [`Presenter`].

use std::io::{self, Write};

use crate::models::{DiagnosisRecord, Theme};

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    fn label(self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        }
    }
}

/// Short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Render target for matcher output.
pub trait Presenter {
    fn show_diagnosis(&mut self, record: &DiagnosisRecord) -> io::Result<()>;
    fn show_suggestions(&mut self, tests: &[String]) -> io::Result<()>;
    fn show_notice(&mut self, notice: &Notice) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
    fn apply_theme(&mut self, theme: Theme) -> io::Result<()>;
}

/// Plain-text presenter writing to any `Write`.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn show_diagnosis(&mut self, record: &DiagnosisRecord) -> io::Result<()> {
        writeln!(self.out, "Possible condition: {}", record.condition)?;
        writeln!(self.out, "Recommended tests:")?;
        for test in &record.recommended_tests {
            writeln!(self.out, "  - {}", test)?;
        }
        writeln!(self.out, "Consult: {}", record.recommended_specialist)
    }

    fn show_suggestions(&mut self, tests: &[String]) -> io::Result<()> {
        for test in tests {
            writeln!(self.out, "  - {}", test)?;
        }
        Ok(())
    }

    fn show_notice(&mut self, notice: &Notice) -> io::Result<()> {
        writeln!(self.out, "[{}] {}", notice.kind.label(), notice.message)
    }

    fn clear(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn apply_theme(&mut self, theme: Theme) -> io::Result<()> {
        writeln!(self.out, "Theme: {}", theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut TextPresenter<Vec<u8>>) -> io::Result<()>>(f: F) -> String {
        let mut presenter = TextPresenter::new(Vec::new());
        f(&mut presenter).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_render_diagnosis() {
        let record = DiagnosisRecord::general_viral_infection();
        let text = render(|p| p.show_diagnosis(&record));

        assert_eq!(
            text,
            "Possible condition: General Viral Infection\n\
             Recommended tests:\n\
             \x20 - CBC (Complete Blood Count)\n\
             \x20 - Throat Swab\n\
             \x20 - Rapid Antigen Test\n\
             Consult: General Physician\n"
        );
    }

    #[test]
    fn test_render_suggestions_and_notice() {
        let text = render(|p| {
            p.show_suggestions(&["CT Scan".into(), "Blood Test".into()])?;
            p.show_notice(&Notice::error("Error fetching suggestions."))
        });

        assert_eq!(text, "  - CT Scan\n  - Blood Test\n[error] Error fetching suggestions.\n");
    }

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::info("a").kind, NoticeKind::Info);
        assert_eq!(Notice::success("b").kind, NoticeKind::Success);
        assert_eq!(Notice::error(String::from("c")).message, "c");

        let text = render(|p| {
            p.show_notice(&Notice::info("Please enter a symptom first."))?;
            p.show_notice(&Notice::success("Suggested tests for \"fever\":"))
        });
        assert_eq!(
            text,
            "[info] Please enter a symptom first.\n[ok] Suggested tests for \"fever\":\n"
        );
    }

    #[test]
    fn test_render_theme() {
        assert_eq!(render(|p| p.apply_theme(Theme::Light)), "Theme: light\n");
    }
}
