use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpinError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SpinError::asset("x").to_string().contains("asset error:"));
    assert!(SpinError::render("x").to_string().contains("render error:"));
    assert!(SpinError::encode("x").to_string().contains("encode error:"));
    assert!(
        SpinError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpinError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
