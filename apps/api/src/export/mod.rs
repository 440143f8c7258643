//! PDF export: lay out the rendered document, draw it and hand back the bytes.
//!
//! Only one export runs at a time. [`ExportGuard`] owns the in-flight flag
//! and clears it on drop, so every exit path releases it.

pub mod handlers;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod photo;

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::cv::{is_h2a, CvData, VisaType};
use crate::templates::Document;

use self::layout::{layout_document, PageLayout};
use self::photo::prepare_photo;

#[derive(Debug, Error)]
pub enum ExportError {
    /// No visa type yet, so there is no document to render.
    #[error("Select a visa type before exporting.")]
    TargetMissing,

    #[error("The CV is not ready for export.")]
    NotReady(Vec<String>),

    #[error("An export is already running.")]
    AlreadyRunning,

    #[error("export worker failed: {0}")]
    Worker(String),
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct PdfFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub width: f32,
    pub height: f32,
}

/// Holds the in-flight flag for the duration of one export.
pub struct ExportGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExportGuard<'a> {
    pub fn acquire(flag: &'a AtomicBool) -> Result<Self, ExportError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::AlreadyRunning)?;
        Ok(Self { flag })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// `<name>_<H2A|H2B>.pdf`. The name is trimmed, whitespace runs become `_`
/// and everything but ASCII letters, digits, `_` and `-` is dropped. An empty
/// result becomes `cv`.
pub fn export_filename(full_name: &str, visa_type: Option<VisaType>) -> String {
    let mut name = String::new();
    let mut in_space = false;
    for c in full_name.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            name.push(c);
        }
    }
    if name.is_empty() {
        name.push_str("cv");
    }

    let code = if is_h2a(visa_type) {
        VisaType::H2A.code()
    } else {
        VisaType::H2B.code()
    };
    format!("{name}_{code}.pdf")
}

/// Lays out and draws `doc`. CPU-bound; callers run it off the async runtime.
pub fn render_pdf(doc: &Document, data: &CvData, filename: String) -> PdfFile {
    let page: PageLayout = layout_document(doc);
    debug!(
        items = page.items.len(),
        height = page.height,
        landscape = page.is_landscape(),
        "page laid out"
    );

    let photo = if doc.photo.filled {
        match prepare_photo(&data.personal_info.photo_data_url, doc.photo.size) {
            Ok(jpeg) => Some(jpeg),
            Err(e) => {
                warn!("photo could not be embedded, drawing placeholder: {e}");
                None
            }
        }
    } else {
        None
    };

    let bytes = pdf::write_pdf(&page, photo.as_ref());
    PdfFile {
        filename,
        bytes,
        width: page.width,
        height: page.height,
    }
}
