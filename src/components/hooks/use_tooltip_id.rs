use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Unique DOM id for a field's tooltip, e.g. `email_invalid_tooltip_3`.
pub fn use_tooltip_id(field: &str) -> String {
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let field = field.trim();
    if field.is_empty() {
        format!("invalid_tooltip_{n}")
    } else {
        format!("{field}_invalid_tooltip_{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let a = use_tooltip_id("email");
        let b = use_tooltip_id("email");
        assert_ne!(a, b);
        assert!(a.starts_with("email_invalid_tooltip_"));
        assert!(use_tooltip_id("  ").starts_with("invalid_tooltip_"));
    }
}
