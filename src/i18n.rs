// ==========================================
// Road appraisal - i18n
// ==========================================
// rust-i18n; Ukrainian (default) and English.
// The i18n! macro is invoked in lib.rs.
// ==========================================

/// Current locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switches the locale ("uk" or "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translates a key
///
/// # Example
/// ```no_run
/// use road_appraisal::i18n::t;
/// let label = t("work_type.capital_repair");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translates a key and substitutes `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use road_appraisal::i18n::t_with_args;
/// let msg = t_with_args("history.summary", &[("count", "12")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// Serialises tests that touch the global locale
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
