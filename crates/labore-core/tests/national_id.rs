use labore_core::national_id::{digits, format, is_valid, mask_for_log, strip_punctuation};

#[test]
fn known_valid_cpf_passes() {
    assert!(is_valid("12345678909"));
    assert!(is_valid("123.456.789-09"));
}

#[test]
fn repeated_digits_fail() {
    for d in 0..=9 {
        let cpf = d.to_string().repeat(11);
        assert!(!is_valid(&cpf), "{cpf} should be rejected");
    }
}

#[test]
fn wrong_length_fails() {
    assert!(!is_valid("1234567890"));
    assert!(!is_valid("123.456.789-0"));
    assert!(!is_valid("123456789091"));
    assert!(!is_valid(""));
}

#[test]
fn wrong_check_digit_fails() {
    assert!(!is_valid("12345678908"));
    assert!(!is_valid("12345678919"));
}

#[test]
fn mask_grows_with_input() {
    assert_eq!(format("123"), "123");
    assert_eq!(format("1234"), "123.4");
    assert_eq!(format("123456"), "123.456");
    assert_eq!(format("1234567"), "123.456.7");
    assert_eq!(format("123456789"), "123.456.789");
    assert_eq!(format("1234567890"), "123.456.789-0");
    assert_eq!(format("12345678909"), "123.456.789-09");
}

#[test]
fn mask_drops_extra_digits() {
    assert_eq!(format("1234567890999"), "123.456.789-09");
}

#[test]
fn mask_is_idempotent() {
    for raw in ["1", "1234", "1234567", "12345678909"] {
        let once = format(raw);
        assert_eq!(format(&digits(&once)), once);
        assert_eq!(format(&once), once);
    }
}

#[test]
fn strip_only_removes_mask_characters() {
    assert_eq!(strip_punctuation(" 123.456.789-09 "), "12345678909");
    assert_eq!(strip_punctuation("123 456"), "123 456");
}

#[test]
fn log_mask_hides_everything_but_prefix() {
    assert_eq!(mask_for_log("123.456.789-09"), "123.***.***-**");
}
