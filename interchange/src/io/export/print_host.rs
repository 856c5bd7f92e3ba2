use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;

use super::print_export::PrintDocument;

/// Host environment that performs the actual print flow.
///
/// Implementations open a print dialog, hand the document to a browser, or
/// spool it somewhere. Each call corresponds to one user-initiated print.
pub trait PrintHost {
    fn print(&mut self, document: &PrintDocument) -> anyhow::Result<()>;
}

/// Spools print documents as `.html` files into a directory.
///
/// Every print gets its own file: a title that was already spooled, or whose
/// file already exists, gets a numeric suffix (`report-2.html`).
#[derive(Debug, Clone)]
pub struct FilePrintHost {
    dir: PathBuf,
    printed: Vec<PathBuf>,
}

impl FilePrintHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            printed: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, oldest first
    pub fn printed(&self) -> &[PathBuf] {
        &self.printed
    }

    fn stem(title: &str) -> String {
        let stem: String = title
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        if stem.is_empty() {
            "export".to_string()
        } else {
            stem
        }
    }

    /// First free `<stem>.html`, `<stem>-2.html`, ... in the spool directory
    fn next_path(&self, title: &str) -> PathBuf {
        let stem = Self::stem(title);
        let mut path = self.dir.join(format!("{}.html", stem));
        let mut n = 2;
        while path.exists() || self.printed.contains(&path) {
            path = self.dir.join(format!("{}-{}.html", stem, n));
            n += 1;
        }
        path
    }
}

impl PrintHost for FilePrintHost {
    fn print(&mut self, document: &PrintDocument) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create print directory {}", self.dir.display()))?;

        let path = self.next_path(&document.title);
        fs::write(&path, &document.html)
            .with_context(|| format!("Failed to write print document {}", path.display()))?;

        info!("🖨️ Spooled print document to {}", path.display());
        self.printed.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn document(title: &str) -> PrintDocument {
        PrintDocument {
            title: title.to_string(),
            html: "<html><body><table></table></body></html>".to_string(),
        }
    }

    #[test]
    fn test_writes_html_file_named_after_title() {
        let temp_dir = TempDir::new().unwrap();
        let mut host = FilePrintHost::new(temp_dir.path().join("spool"));

        host.print(&document("Merchant Report")).unwrap();

        let expected = temp_dir.path().join("spool").join("merchant_report.html");
        assert_eq!(host.printed(), &[expected.clone()]);
        assert_eq!(
            fs::read_to_string(expected).unwrap(),
            "<html><body><table></table></body></html>"
        );
    }

    #[test]
    fn test_repeated_title_gets_a_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut host = FilePrintHost::new(temp_dir.path());

        let first = PrintDocument {
            title: "Report".to_string(),
            html: "<p>first</p>".to_string(),
        };
        let second = PrintDocument {
            title: "Report".to_string(),
            html: "<p>second</p>".to_string(),
        };
        host.print(&first).unwrap();
        host.print(&second).unwrap();

        let report = temp_dir.path().join("report.html");
        let report_2 = temp_dir.path().join("report-2.html");
        assert_eq!(host.printed(), &[report.clone(), report_2.clone()]);
        assert_eq!(fs::read_to_string(report).unwrap(), "<p>first</p>");
        assert_eq!(fs::read_to_string(report_2).unwrap(), "<p>second</p>");
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("report.html"), "older").unwrap();

        let mut host = FilePrintHost::new(temp_dir.path());
        host.print(&document("Report")).unwrap();

        assert_eq!(fs::read_to_string(temp_dir.path().join("report.html")).unwrap(), "older");
        assert_eq!(host.printed(), &[temp_dir.path().join("report-2.html")]);
    }

    #[test]
    fn test_blank_title_uses_default_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut host = FilePrintHost::new(temp_dir.path());
        host.print(&document("  ")).unwrap();
        assert!(temp_dir.path().join("export.html").exists());
    }

    #[test]
    fn test_unwritable_directory_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "occupied").unwrap();

        let mut host = FilePrintHost::new(blocker.join("spool"));
        let err = host.print(&document("Export")).unwrap_err();
        assert!(err.to_string().contains("Failed to create print directory"));
        assert!(host.printed().is_empty());
    }
}
