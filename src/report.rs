// Downloadable PDF report produced by `/generate_pdf`.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// PDF bytes plus the file name they are offered under. The bytes are kept
/// exactly as the backend returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    file_name: String,
    bytes: Vec<u8>,
}

impl ReportArtifact {
    /// Wrap the report for `query`; the file is named `"{query}_report.pdf"`.
    pub fn new(query: &str, bytes: Vec<u8>) -> Self {
        ReportArtifact {
            file_name: format!("{query}_report.pdf"),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:` URI carrying the PDF, usable as an HTML download link target.
    pub fn data_uri(&self) -> String {
        format!("data:application/pdf;base64,{}", STANDARD.encode(&self.bytes))
    }

    /// Write the report into `dir` (created if missing) and return the full
    /// path of the written file. Path separators in the name are replaced so
    /// the file always lands directly inside `dir`.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let on_disk: String = self
            .file_name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        let path = dir.join(on_disk);
        fs::write(&path, &self.bytes)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), bytes = self.bytes.len(), "report saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDF: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n";

    #[test]
    fn file_name_follows_query() {
        let a = ReportArtifact::new("AI in healthcare", PDF.to_vec());
        assert_eq!(a.file_name(), "AI in healthcare_report.pdf");
        assert_eq!(a.len(), PDF.len());
    }

    #[test]
    fn data_uri_decodes_to_original_bytes() {
        let a = ReportArtifact::new("q", PDF.to_vec());
        let uri = a.data_uri();
        let payload = uri.strip_prefix("data:application/pdf;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), PDF);
    }

    #[test]
    fn save_creates_directory_and_writes_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("reports");
        let a = ReportArtifact::new("battery chemistry", PDF.to_vec());

        let path = a.save_to(&out).unwrap();

        assert_eq!(path, out.join("battery chemistry_report.pdf"));
        assert_eq!(fs::read(&path).unwrap(), PDF);
    }

    #[test]
    fn save_keeps_slashes_out_of_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let a = ReportArtifact::new("TCP/IP vs QUIC", PDF.to_vec());

        let path = a.save_to(tmp.path()).unwrap();

        assert_eq!(a.file_name(), "TCP/IP vs QUIC_report.pdf");
        assert_eq!(path, tmp.path().join("TCP_IP vs QUIC_report.pdf"));
        assert!(path.exists());
    }
}
