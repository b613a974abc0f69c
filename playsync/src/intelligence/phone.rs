/// Canonicalize a contact identifier into the aggregation key.
///
/// Keeps ASCII digits and `+`. A bare number that starts with `country_code`
/// (optionally behind the `00`/`0` dialling prefix) gets a leading `+`, so
/// `972-50-123-4567`, `0972501234567` and `+972501234567` all agree. Local
/// numbers are otherwise left alone. Non-numeric sentinels such as `bot`
/// collapse to the empty string.
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let filtered: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if filtered.starts_with('+') || country_code.is_empty() {
        return filtered;
    }

    let international = filtered.trim_start_matches('0');
    if international.starts_with(country_code) {
        format!("+{international}")
    } else {
        filtered
    }
}

/// True when a normalized key carries no digits and cannot name a participant.
pub fn is_unknown_key(key: &str) -> bool {
    !key.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CC: &str = "972";

    #[test]
    fn test_equivalent_forms_normalize_identically() {
        let expected = "+972501234567";
        assert_eq!(normalize_phone("972-50-123-4567", CC), expected);
        assert_eq!(normalize_phone("+972501234567", CC), expected);
        assert_eq!(normalize_phone("0972501234567", CC), expected);
        assert_eq!(normalize_phone("00972 50 123 4567", CC), expected);
        assert_eq!(normalize_phone(" +972 (50) 123-4567 ", CC), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["972501234567", "0501234567", "+15551234567", "bot", ""] {
            let once = normalize_phone(raw, CC);
            assert_eq!(normalize_phone(&once, CC), once, "input {raw:?}");
        }
    }

    #[test]
    fn test_local_numbers_keep_leading_zero() {
        assert_eq!(normalize_phone("050-123-4567", CC), "0501234567");
    }

    #[test]
    fn test_other_country_codes_pass_through() {
        assert_eq!(normalize_phone("+1 (555) 123-4567", CC), "+15551234567");
        assert_eq!(normalize_phone("15551234567", CC), "15551234567");
        assert_eq!(normalize_phone("15551234567", "1"), "+15551234567");
    }

    #[test]
    fn test_sentinels_collapse_to_unknown() {
        assert_eq!(normalize_phone("bot", CC), "");
        assert_eq!(normalize_phone("unknown", CC), "");
        assert!(is_unknown_key(&normalize_phone("bot", CC)));
        assert!(is_unknown_key("+"));
        assert!(!is_unknown_key("+972501234567"));
    }

    #[test]
    fn test_whatsapp_jid_suffix_is_stripped() {
        assert_eq!(
            normalize_phone("972501234567@s.whatsapp.net", CC),
            "+972501234567"
        );
    }
}
