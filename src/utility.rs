use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("Invalid hex color regex"));

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Usernames follow the original product rule: at least two visible characters.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().chars().count() < 2 {
        return Err(validation_error("username_too_short", "Имя слишком короткое"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 4 {
        return Err(validation_error("password_too_short", "Пароль минимум 4 символа"));
    }
    Ok(())
}

pub fn validate_avatar_color(color: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR.is_match(color) {
        return Err(validation_error(
            "invalid_avatar_color",
            "Цвет должен быть в формате #RRGGBB",
        ));
    }
    Ok(())
}
