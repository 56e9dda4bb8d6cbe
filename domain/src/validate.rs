//! Lightweight input validation helpers. Keep logic minimal and deterministic.

use crate::CoffeeError;
use crate::Size;

/// Validate a coffee name: non-empty after trimming and of reasonable length.
/// No duplicate-name constraint; the catalog may hold several records with
/// the same name.
pub fn validate_name(s: &str) -> Result<(), CoffeeError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CoffeeError::InvalidName("empty".into()));
    }
    if trimmed.len() > 200 {
        return Err(CoffeeError::InvalidName("too long".into()));
    }
    Ok(())
}

/// Parse a size string using the schema member set, case-insensitively.
pub fn parse_size(s: &str) -> Result<Size, CoffeeError> {
    Size::parse(s).ok_or_else(|| {
        CoffeeError::InvalidSize(format!(
            "unknown size '{}' (expected SHORT, TALL, GRANDE or VENTI)",
            s
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation_basic() {
        assert!(validate_name("Caffè Americano").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn size_parsing_delegates() {
        assert!(matches!(parse_size("venti"), Ok(Size::Venti)));
        assert!(matches!(
            parse_size("mega"),
            Err(CoffeeError::InvalidSize(_))
        ));
    }
}
