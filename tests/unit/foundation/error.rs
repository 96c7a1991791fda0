use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RastileError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        RastileError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RastileError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        RastileError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RastileError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
