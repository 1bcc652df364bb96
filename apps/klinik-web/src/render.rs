//! # HTML Rendering
//!
//! Layout, sidebar, notice boxes and tables shared by every page.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ 📋 Menu      │  💊 Sistem Informasi Manajemen Obat                      │
//! │              │  Aplikasi Manajemen Obat Berbasis QR Code                │
//! │ 📊 Dashboard │  ──────────────────────────────────────────              │
//! │ 📷 Scan ...  │  <h2>page heading</h2>                                   │
//! │ 🖼️ Scan ...  │  ┌────────────────────────────────────────┐              │
//! │ 🔳 Generate  │  │ notice (success/info/warning/error)    │              │
//! │ ➕ Tambah    │  └────────────────────────────────────────┘              │
//! │ ✏️ Edit      │  page body (forms, tables, images)                       │
//! │ 🗑️ Hapus     │                                                          │
//! │ 📁 Data      │                                                          │
//! │ 🕒 Riwayat   │                                                          │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! All text coming from files or forms goes through [`escape`].

use std::fmt::Write as _;

use axum::response::Html;

use crate::error::PageError;
use crate::pages::Page;

const STYLE: &str = r#"
body { margin: 0; font-family: 'Poppins', system-ui, sans-serif; background: #f7f9fb; display: flex; min-height: 100vh; }
nav { width: 240px; background: linear-gradient(180deg, #0f766e, #065f46); color: white; padding: 20px 12px; }
nav .sidebar-title { font-size: 18px; font-weight: 600; margin-bottom: 15px; }
nav a { display: block; color: white; text-decoration: none; padding: 8px 12px; border-radius: 8px; }
nav a:hover, nav a.active { background-color: rgba(255,255,255,0.15); }
main { flex: 1; padding: 24px 40px; }
.caption { color: #6b7280; margin-top: -12px; }
.notice { padding: 12px 16px; border-radius: 8px; margin: 12px 0; }
.notice.success { background: #dcfce7; color: #166534; }
.notice.info { background: #dbeafe; color: #1e40af; }
.notice.warning { background: #fef9c3; color: #854d0e; }
.notice.error { background: #fee2e2; color: #991b1b; }
.metrics { display: flex; gap: 24px; }
.metric { background: white; border-radius: 8px; padding: 16px 24px; flex: 1; }
.metric .label { color: #6b7280; font-size: 14px; }
.metric .value { font-size: 28px; font-weight: 600; }
table { border-collapse: collapse; background: white; width: 100%; }
th, td { border: 1px solid #e5e7eb; padding: 6px 10px; text-align: left; }
form.stacked label { display: block; margin-top: 10px; }
form.stacked input, form.stacked select { padding: 6px; min-width: 280px; }
button { margin-top: 12px; padding: 8px 16px; border-radius: 8px; border: 1px solid #0f766e; background: white; cursor: pointer; }
"#;

// =============================================================================
// Escaping
// =============================================================================

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Percent-encodes one URL path segment or query value.
pub fn encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => {
                let _ = write!(out, "%{other:02X}");
            }
        }
    }
    out
}

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// Inline message box. The text is escaped when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="notice {}">{}</div>"#,
            self.kind.class(),
            escape(&self.text).replace('\n', "<br>")
        )
    }
}

// =============================================================================
// Building Blocks
// =============================================================================

/// Dashboard metric card.
pub fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
        escape(label),
        escape(value)
    )
}

/// Table with a header row. Every cell is escaped.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table><thead><tr>");
    for header in headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// `<select>` over medicine codes, `selected` preselected.
pub fn code_select(name: &str, codes: &[&str], selected: &str) -> String {
    let mut html = format!(r#"<select name="{}" onchange="this.form.submit()">"#, escape(name));
    for code in codes {
        let mark = if *code == selected { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape(code),
            mark
        );
    }
    html.push_str("</select>");
    html
}

// =============================================================================
// Layout
// =============================================================================

/// Options for one rendered page.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// Sidebar entry to highlight and heading to show.
    pub page: Option<Page>,

    /// Notices shown above the body, in order.
    pub notices: Vec<Notice>,

    /// Reload the page after this many milliseconds.
    pub refresh_ms: Option<u64>,

    /// Inner HTML (already escaped where needed).
    pub body: String,
}

impl PageView {
    pub fn new(page: Page) -> Self {
        PageView {
            page: Some(page),
            ..PageView::default()
        }
    }

    pub fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn notices(mut self, notices: impl IntoIterator<Item = Notice>) -> Self {
        self.notices.extend(notices);
        self
    }

    pub fn refresh(mut self, ms: u64) -> Self {
        self.refresh_ms = Some(ms);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Renders the full document inside the sidebar layout.
    pub fn render(&self, clinic_name: &str) -> Html<String> {
        let mut html = String::with_capacity(4096);
        html.push_str("<!DOCTYPE html><html lang=\"id\"><head><meta charset=\"utf-8\">");
        if let Some(ms) = self.refresh_ms {
            let seconds = ms.div_ceil(1000).max(1);
            let _ = write!(html, r#"<meta http-equiv="refresh" content="{seconds}">"#);
        }
        let _ = write!(html, "<title>{}</title>", escape(clinic_name));
        let _ = write!(html, "<style>{STYLE}</style></head><body>");

        html.push_str(&sidebar(self.page));

        html.push_str("<main><h1>💊 Sistem Informasi Manajemen Obat</h1>");
        let _ = write!(
            html,
            r#"<p class="caption">{} · Aplikasi Manajemen Obat Berbasis QR Code</p>"#,
            escape(clinic_name)
        );
        if let Some(page) = self.page {
            let _ = write!(html, "<h2>{} {}</h2>", page.icon(), escape(page.heading()));
        }
        for notice in &self.notices {
            html.push_str(&notice.to_html());
        }
        html.push_str(&self.body);
        html.push_str("</main></body></html>");

        Html(html)
    }
}

fn sidebar(active: Option<Page>) -> String {
    let mut html = String::from(r#"<nav><div class="sidebar-title">📋 Menu Aplikasi</div>"#);
    for page in Page::ALL {
        let class = if Some(page) == active { r#" class="active""# } else { "" };
        let _ = write!(
            html,
            r#"<a href="{}"{}>{} {}</a>"#,
            page.path(),
            class,
            page.icon(),
            escape(page.label())
        );
    }
    html.push_str("</nav>");
    html
}

/// Error document for a failed handler.
pub fn error_page(err: &PageError) -> Html<String> {
    PageView::default()
        .notice(Notice::error(err.message.clone()))
        .body(format!(
            r#"<p class="caption">{}</p><p><a href="{}">Kembali ke Dashboard</a></p>"#,
            err.code.as_str(),
            Page::Dashboard.path()
        ))
        .render(crate::DEFAULT_CLINIC_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Obat\" & 'Co'</b>"), "&lt;b&gt;&quot;Obat&quot; &amp; &#39;Co&#39;&lt;/b&gt;");
        assert_eq!(escape("Paracetamol"), "Paracetamol");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("A1"), "A1");
        assert_eq!(encode_component("obat batuk"), "obat%20batuk");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn test_notice_escapes_text() {
        let html = Notice::warning("<script>").to_html();
        assert_eq!(html, r#"<div class="notice warning">&lt;script&gt;</div>"#);
    }

    #[test]
    fn test_table_rows() {
        let html = table(&["Kode", "Nama"], &[vec!["A1".into(), "Para<cetamol>".into()]]);
        assert!(html.contains("<th>Kode</th>"));
        assert!(html.contains("<td>Para&lt;cetamol&gt;</td>"));
    }

    #[test]
    fn test_layout_marks_active_page_and_refresh() {
        let Html(html) = PageView::new(Page::ScanCamera).refresh(500).render("Klinik Sehat");

        assert!(html.contains(r#"<meta http-equiv="refresh" content="1">"#));
        assert!(html.contains(r#"<a href="/scan-kamera" class="active">"#));
        assert!(html.contains("Scan QR Menggunakan Kamera"));
        for page in Page::ALL {
            assert!(html.contains(page.label()));
        }
    }

    #[test]
    fn test_code_select_marks_selection() {
        let html = code_select("kode", &["A1", "B2"], "B2");
        assert!(html.contains(r#"<option value="B2" selected>B2</option>"#));
        assert!(html.contains(r#"<option value="A1">A1</option>"#));
    }
}
