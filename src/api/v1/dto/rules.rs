//! Field rules shared by request DTOs.

pub const MAX_FIELD_LEN: usize = 128;
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().count() <= MAX_FIELD_LEN
}

pub fn is_email(value: &str) -> bool {
    if value.len() > MAX_FIELD_LEN || value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

pub fn is_password(value: &str) -> bool {
    let len = value.chars().count();
    (MIN_PASSWORD_LEN..=MAX_FIELD_LEN).contains(&len)
}

pub fn is_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    digits >= 6
        && value.len() <= 20
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '))
}
