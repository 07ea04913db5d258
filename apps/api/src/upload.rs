//! Request-scoped staging of uploaded files.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::extraction::DocumentKind;

/// Reduces a client-supplied filename to `[A-Za-z0-9_.-]`.
/// Path separators and whitespace become `_`; leading and trailing `.`/`_` are stripped.
pub fn secure_filename(filename: &str) -> String {
    let unseparated: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = unseparated.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Writes `data` to a uniquely named file in `dir`. The file is removed when
/// the returned handle is dropped.
pub fn stage_upload(
    dir: &Path,
    filename: &str,
    kind: DocumentKind,
    data: &[u8],
) -> std::io::Result<NamedTempFile> {
    let safe_name = secure_filename(filename);
    let stem = safe_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(safe_name.as_str());
    let prefix = format!("{stem}-");
    let suffix = format!(".{}", kind.extension());

    let mut file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .tempfile_in(dir)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(file)
}
