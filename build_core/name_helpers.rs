//! Name transformation helpers used to generate idiomatic Rust code.
//==================================================================================NAME_HELPERS
/// Convert a plan name (`"us915"`, `"EU 868"`, `"as923-1"`) into a
/// `SCREAMING_SNAKE_CASE` constant identifier.
///
/// Separators collapse into a single `_`; a leading digit is prefixed with
/// `PLAN_` so the result is always a valid identifier.
pub(crate) fn to_const_ident(name: &str) -> String {
    let mut buffer = String::new();
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !buffer.is_empty() {
                buffer.push('_');
            }
            pending_separator = false;
            buffer.push(c.to_ascii_uppercase());
        } else {
            pending_separator = true;
        }
    }

    if buffer.is_empty() || buffer.starts_with(|c: char| c.is_ascii_digit()) {
        buffer.insert_str(0, "PLAN_");
    }

    if RESERVED_IDENTS.contains(&buffer.as_str()) {
        buffer.push_str("_PLAN");
    }

    buffer
}

/// Constants the generated module already defines.
const RESERVED_IDENTS: &[&str] = &["DEFAULT_PLAN", "ALL_PLANS", "SELF"];
