use super::*;

#[test]
fn releases_latest_value_after_quiet_period() {
    let t0 = Instant::now();
    let quiet = Duration::from_millis(200);
    let mut d = Debouncer::new(quiet);

    d.push(1, t0);
    d.push(2, t0 + Duration::from_millis(100));
    assert_eq!(d.take_ready(t0 + Duration::from_millis(250)), None);
    assert!(d.is_pending());
    assert_eq!(d.take_ready(t0 + Duration::from_millis(300)), Some(2));
    assert!(!d.is_pending());
    assert_eq!(d.take_ready(t0 + Duration::from_secs(5)), None);
}
