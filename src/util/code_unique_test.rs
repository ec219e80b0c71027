use super::*;

// =============================================================
// is_valid_code_unique
// =============================================================

#[test]
fn accepts_well_formed_code() {
    assert!(is_valid_code_unique("LSH-25-SA000001"));
    assert!(is_valid_code_unique("ABC-00-ZZ999999"));
}

#[test]
fn rejects_lowercase() {
    assert!(!is_valid_code_unique("lsh-25-sa000001"));
    assert!(!is_valid_code_unique("LSH-25-sa000001"));
}

#[test]
fn rejects_wrong_segment_lengths() {
    assert!(!is_valid_code_unique("LSH-255-SA00001"));
    assert!(!is_valid_code_unique("LS-25-SA000001"));
    assert!(!is_valid_code_unique("LSH-25-SA0000011"));
    assert!(!is_valid_code_unique("LSH-25-S0000001"));
}

#[test]
fn rejects_wrong_separator_count() {
    assert!(!is_valid_code_unique("LSH25SA000001"));
    assert!(!is_valid_code_unique("LSH-25-SA-000001"));
    assert!(!is_valid_code_unique(""));
}

#[test]
fn rejects_digits_in_letter_positions() {
    assert!(!is_valid_code_unique("L5H-25-SA000001"));
    assert!(!is_valid_code_unique("LSH-2A-SA000001"));
    assert!(!is_valid_code_unique("LSH-25-SAX00001"));
}

#[test]
fn rejects_non_ascii() {
    assert!(!is_valid_code_unique("LSÉ-25-SA000001"));
}

// =============================================================
// normalize_code_input
// =============================================================

#[test]
fn normalize_uppercases_and_strips_whitespace() {
    assert_eq!(normalize_code_input(" lsh-25-sa000001 "), "LSH-25-SA000001");
    assert_eq!(normalize_code_input("LSH -25- SA000001"), "LSH-25-SA000001");
}

#[test]
fn normalized_input_can_become_valid() {
    assert!(is_valid_code_unique(&normalize_code_input("lsh-25-sa000001")));
}
