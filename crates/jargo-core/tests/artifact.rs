use jargo_core::artifact::Artifact;

#[test]
fn test_artifact_serde_round_trip() {
    let artifact = Artifact::new("com.google.guava", "guava", "32.0.0-jre");
    let json = serde_json::to_string(&artifact).unwrap();
    let back: Artifact = serde_json::from_str(&json).unwrap();
    assert_eq!(back, artifact);
}

#[test]
fn test_artifacts_differing_only_in_version_share_identity() {
    let a = Artifact::new("org.example", "lib", "1.0");
    let b = Artifact::new("org.example", "lib", "2.0");
    assert_ne!(a, b);
    assert_eq!(a.identity(), b.identity());
}
