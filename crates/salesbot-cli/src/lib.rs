use salesbot_core::models::Document;
use salesbot_core::{AnnotatedDocument, AppError, ErrorMetadata, LogLevel};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

const SHOP_WIDTH: usize = 20;
const FILE_WIDTH: usize = 32;

/// Where the PDF can be opened: its S3 object when known, else the backend's
/// `/uploads/{filename}` route (relative when no backend URL is configured).
pub fn document_link(doc: &Document, api_url: Option<&str>) -> String {
    match &doc.s3_url {
        Some(url) if !url.is_empty() => url.clone(),
        _ => format!("{}/uploads/{}", api_url.unwrap_or(""), doc.filename),
    }
}

/// Render presented rows as a fixed-width table.
///
/// Rows near expiry are marked with `!` in the first column; a disabled trigger is
/// shown with its label in parentheses.
pub fn render_table(rows: &[AnnotatedDocument], api_url: Option<&str>) -> String {
    let header = [
        " ", "Shop", "File", "Valid From", "Valid To", "Uploaded", "Validity", "Action", "Link",
    ];
    let mut lines: Vec<[String; 9]> = Vec::with_capacity(rows.len() + 1);
    lines.push(header.map(str::to_string));

    for row in rows {
        let doc = &row.document;
        let action = if row.trigger_enabled {
            row.trigger_label.to_string()
        } else {
            format!("({})", row.trigger_label)
        };
        lines.push([
            if row.near_expiry { "!" } else { " " }.to_string(),
            truncate_string(&doc.shop_name, SHOP_WIDTH),
            truncate_string(&doc.filename, FILE_WIDTH),
            doc.valid_from.clone(),
            doc.valid_to.clone(),
            doc.upload_day().to_string(),
            row.validity.to_string(),
            action,
            document_link(doc, api_url),
        ]);
    }

    let mut widths = [0usize; 9];
    for line in &lines {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out.push_str(&format!("{} document(s)\n", rows.len()));
    out
}

/// Log a command failure at the level its error type asks for.
pub fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => {
            let message = app_err.client_message();
            let hint = app_err.suggested_action().unwrap_or("");
            match app_err.log_level() {
                LogLevel::Debug | LogLevel::Warn => {
                    tracing::warn!(code = app_err.error_code(), hint, "{}", message)
                }
                LogLevel::Error => {
                    tracing::error!(code = app_err.error_code(), hint, error = ?err, "{}", message)
                }
            }
        }
        None => tracing::error!(error = ?err, "Command failed"),
    }
}


/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
