//! Stage report rendering.
//!
//! The presenter is picked once at startup and injected into the pipeline.

use std::fmt;
use std::str::FromStr;

/// Renders a titled stage report for a human reader.
pub trait Presenter: Send + Sync {
    /// Format a report without printing it.
    fn format(&self, title: &str, content: &str) -> String;

    /// Print a report to stdout.
    fn render(&self, title: &str, content: &str) {
        print!("{}", self.format(title, content));
    }
}

/// Terminal layout: upper-cased bracketed title between rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainPresenter;

impl Presenter for PlainPresenter {
    fn format(&self, title: &str, content: &str) -> String {
        format!(
            "\n[{}]\n{}\n{}\n{}\n",
            title.to_uppercase(),
            "=".repeat(40),
            content,
            "-".repeat(40)
        )
    }
}

/// Markdown layout for viewers that render it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownPresenter;

impl Presenter for MarkdownPresenter {
    fn format(&self, title: &str, content: &str) -> String {
        format!("### {title}\n\n{content}\n\n---\n")
    }
}

/// Which presenter to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenterKind {
    #[default]
    Plain,
    Markdown,
}

impl PresenterKind {
    pub fn build(self) -> Box<dyn Presenter> {
        match self {
            Self::Plain => Box::new(PlainPresenter),
            Self::Markdown => Box::new(MarkdownPresenter),
        }
    }
}

impl FromStr for PresenterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "markdown" | "md" | "rich" => Ok(Self::Markdown),
            other => Err(format!("unknown presenter {other:?} (expected plain or markdown)")),
        }
    }
}

impl fmt::Display for PresenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_layout() {
        let out = PlainPresenter.format("Analyst Report", "body");
        assert!(out.starts_with("\n[ANALYST REPORT]\n"));
        assert!(out.contains(&"=".repeat(40)));
        assert!(out.contains("\nbody\n"));
        assert!(out.ends_with(&format!("{}\n", "-".repeat(40))));
    }

    #[test]
    fn markdown_layout() {
        let out = MarkdownPresenter.format("Compliance Audit", "all good");
        assert_eq!(out, "### Compliance Audit\n\nall good\n\n---\n");
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("PLAIN".parse::<PresenterKind>().unwrap(), PresenterKind::Plain);
        assert_eq!("rich".parse::<PresenterKind>().unwrap(), PresenterKind::Markdown);
        assert!("html".parse::<PresenterKind>().is_err());
    }

    #[test]
    fn kind_display_roundtrips() {
        for kind in [PresenterKind::Plain, PresenterKind::Markdown] {
            assert_eq!(kind.to_string().parse::<PresenterKind>().unwrap(), kind);
        }
    }
}
