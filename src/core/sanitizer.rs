//! Input normalization for free-text request fields
//!
//! Every function here is pure and total: it always returns a usable value.
//! Shape validation (is the key a phone number, an email, ...) is left to
//! the payment network.

/// Scheme prefix stripped from routing keys, matched case-insensitively
pub const PIX_KEY_SCHEME: &str = "pix://";

/// Reference emitted when normalization leaves nothing behind
pub const REFERENCE_FALLBACK: &str = "DEPX";

/// Maximum length of the transaction reference (tag `62.05`)
pub const REFERENCE_MAX_LEN: usize = 25;

/// Normalize a routing key
///
/// Removes every `+`, then strips leading `pix://` tokens (any case) and
/// surrounding whitespace until neither is left.
///
/// ```
/// use depix_bridge::core::sanitizer::normalize_pix_key;
///
/// assert_eq!(normalize_pix_key("PIX://+55 11 99999-9999 "), "55 11 99999-9999");
/// ```
pub fn normalize_pix_key(raw: &str) -> String {
    let without_plus: String = raw.chars().filter(|&c| c != '+').collect();
    let mut key = without_plus.trim();

    while let Some(prefix) = key.get(..PIX_KEY_SCHEME.len()) {
        if !prefix.eq_ignore_ascii_case(PIX_KEY_SCHEME) {
            break;
        }
        key = key[PIX_KEY_SCHEME.len()..].trim();
    }

    key.to_string()
}

/// Normalize a transaction reference
///
/// Uppercases, keeps only `[0-9A-Z./_-]`, truncates to 25 characters and
/// substitutes [`REFERENCE_FALLBACK`] for an empty result.
pub fn normalize_reference(raw: &str) -> String {
    let reference: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| matches!(c, '0'..='9' | 'A'..='Z' | '.' | '-' | '/' | '_'))
        .take(REFERENCE_MAX_LEN)
        .collect();

    if reference.is_empty() {
        REFERENCE_FALLBACK.to_string()
    } else {
        reference
    }
}

/// Normalize merchant name or city text
///
/// Uppercases, folds Portuguese accented letters to plain ASCII, drops any
/// other non-printable or non-ASCII character, trims and truncates to
/// `max_len` characters. The result may be empty.
pub fn normalize_merchant_text(raw: &str, max_len: usize) -> String {
    let folded: String = raw
        .to_uppercase()
        .chars()
        .filter_map(fold_ascii)
        .collect();

    folded.trim().chars().take(max_len).collect::<String>().trim_end().to_string()
}

fn fold_ascii(c: char) -> Option<char> {
    let folded = match c {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        c if c == ' ' || c.is_ascii_graphic() => c,
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain_phone("11999999999", "11999999999")]
    #[case::international_phone("+5511999999999", "5511999999999")]
    #[case::scheme_lowercase("pix://11999999999", "11999999999")]
    #[case::scheme_uppercase("PIX://11999999999", "11999999999")]
    #[case::scheme_mixed_case("Pix://fulano@example.com", "fulano@example.com")]
    #[case::scheme_and_plus("pix://+5511999999999", "5511999999999")]
    #[case::surrounding_whitespace("  fulano@example.com \t", "fulano@example.com")]
    #[case::every_plus_removed("+55+11+9", "55119")]
    #[case::repeated_scheme("pix://pix://abc", "abc")]
    #[case::scheme_after_whitespace("  pix:// abc", "abc")]
    #[case::scheme_not_at_start("abc pix://def", "abc pix://def")]
    #[case::random_key(
        "123e4567-e12b-12d1-a456-426655440000",
        "123e4567-e12b-12d1-a456-426655440000"
    )]
    #[case::empty("", "")]
    fn test_normalize_pix_key(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_pix_key(raw), expected);
    }

    #[rstest]
    #[case::uppercases("order42", "ORDER42")]
    #[case::drops_spaces("Order 42", "ORDER42")]
    #[case::keeps_allowed_symbols("a.b-c/d_e", "A.B-C/D_E")]
    #[case::drops_accents("Pedição", "PEDIO")]
    #[case::drops_punctuation("#1!@$%", "1")]
    #[case::truncates(
        "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123",
        "ABCDEFGHIJKLMNOPQRSTUVWXY"
    )]
    #[case::exactly_max("ABCDEFGHIJKLMNOPQRSTUVWXY", "ABCDEFGHIJKLMNOPQRSTUVWXY")]
    #[case::empty_falls_back("", "DEPX")]
    #[case::all_removed_falls_back("!!! ###", "DEPX")]
    fn test_normalize_reference(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_reference(raw), expected);
    }

    #[rstest]
    #[case::uppercases("Shop", 25, "SHOP")]
    #[case::folds_accents("São Paulo", 15, "SAO PAULO")]
    #[case::folds_cedilla("Açaí do João", 25, "ACAI DO JOAO")]
    #[case::truncates_city("Rio de Janeiro Capital", 15, "RIO DE JANEIRO")]
    #[case::truncates_name(
        "Loja de Conveniência Central do Brasil",
        25,
        "LOJA DE CONVENIENCIA CENT"
    )]
    #[case::drops_control_chars("Shop\n\tOne", 25, "SHOPONE")]
    #[case::drops_other_unicode("Café ☕", 25, "CAFE")]
    #[case::empty("", 25, "")]
    fn test_normalize_merchant_text(#[case] raw: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(normalize_merchant_text(raw, max), expected);
    }
}
