use super::*;

#[test]
fn single_input_stays_current() {
    let d = Debouncer::new();
    let token = d.begin();
    assert!(d.is_current(token));
}

#[test]
fn rapid_inputs_keep_only_the_last() {
    let d = Debouncer::new();
    let first = d.begin();
    let second = d.begin();
    let third = d.begin();

    assert!(!d.is_current(first));
    assert!(!d.is_current(second));
    assert!(d.is_current(third));
}

#[test]
fn clones_share_the_counter() {
    let d = Debouncer::new();
    let clone = d.clone();

    let stale = d.begin();
    let fresh = clone.begin();

    assert!(!d.is_current(stale));
    assert!(d.is_current(fresh));
    assert!(clone.is_current(fresh));
}
