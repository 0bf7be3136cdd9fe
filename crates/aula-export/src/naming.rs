/// Maximum number of title characters carried into a file name.
const TITLE_CHARS: usize = 20;

/// Build an export file name from a plan title, e.g.
/// `"Frações: parte 1"` + `"pdf"` → `plano_Frações_parte_1.pdf`.
///
/// Takes the first 20 characters of the title, keeps letters, digits, `-`
/// and `_`, turns whitespace runs into a single `_` and drops everything
/// else.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let mut stem = String::new();
    let mut pending_sep = false;

    for c in title.trim().chars().take(TITLE_CHARS) {
        if c.is_whitespace() {
            pending_sep = !stem.is_empty();
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            if pending_sep {
                stem.push('_');
                pending_sep = false;
            }
            stem.push(c);
        }
    }

    if stem.is_empty() {
        format!("plano.{extension}")
    } else {
        format!("plano_{stem}.{extension}")
    }
}
