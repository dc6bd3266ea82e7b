//! HTML announcement text for a build.
//!
//! Only `<b>`, `<code>` and `<a>` are emitted, which is the subset the Bot API
//! accepts under `parse_mode: HTML`. Every value that came from build metadata
//! or the environment is escaped before interpolation. Link targets (the
//! download URL and the maintainer profile) are inserted as-is.

use crate::artifact::ArtifactRecord;
use crate::settings::Settings;

const GIB: f64 = (1u64 << 30) as f64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    pub hashtag: String,
}

/// Escape `& < > " '` the same way Python's `html.escape` does.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Bytes to GiB with two decimals, e.g. `3221225472` -> `"3.00"`.
pub fn format_size_gb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / GIB)
}

pub fn format(
    record: &ArtifactRecord,
    device: &str,
    maintainer: &str,
    settings: &Settings,
) -> Announcement {
    let brand = escape_html(&settings.brand);
    let device_h = escape_html(device);
    let filename = escape_html(&record.filename);
    let version = escape_html(&record.version);
    let romtype = escape_html(&record.romtype);
    let maintainer_h = escape_html(maintainer);
    let size = format_size_gb(record.size);
    let profile = format!("{}{}", settings.profile_base, maintainer);
    let download = &record.url;
    let hashtag = format!("#{device_h}");

    let text = format!(
        "
<b>🚀 {brand} Update Released</b>

📱 <b>Device:</b> <code>{device_h}</code>
📦 <b>Filename:</b> <code>{filename}</code>
🧩 <b>Version:</b> <code>{version}</code>
🏷 <b>Type:</b> <code>{romtype}</code>
💾 <b>Size:</b> <code>{size} GB</code>
👤 <b>Maintainer:</b> <a href=\"{profile}\">{maintainer_h}</a>

⬇️ <b><a href=\"{download}\">Download</a></b>

{hashtag}

— <b>{brand}</b> —
"
    );

    Announcement { text, hashtag }
}
