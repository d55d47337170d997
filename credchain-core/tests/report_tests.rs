//! Integration tests for report construction.

use credchain_core::{CredentialKind, CredentialSource, ProbeResult, ResolutionReport};

#[test]
fn test_exhausted_report_keeps_every_attempt() {
    let candidates = vec![
        CredentialSource::cookie_file("cookies.txt"),
        CredentialSource::proxy("http://p:8080"),
        CredentialSource::None,
    ];

    let mut builder = ResolutionReport::<()>::builder();
    for source in candidates {
        assert!(builder.record(source, ProbeResult::failure("Sign in to confirm")));
    }
    let report = builder.finish();

    assert!(!report.is_resolved());
    assert_eq!(report.attempts().len(), 3);
    let kinds: Vec<_> = report.attempts().iter().map(|a| a.source().kind()).collect();
    assert_eq!(
        kinds,
        vec![CredentialKind::CookieFile, CredentialKind::Proxy, CredentialKind::None]
    );
}

#[test]
fn test_report_json_shape() {
    let mut builder = ResolutionReport::builder();
    builder.record(CredentialSource::None, ProbeResult::success("ok"));
    let json = serde_json::to_value(builder.finish()).unwrap();

    assert_eq!(json["winner_index"], 0);
    assert_eq!(json["attempts"][0]["position"], 1);
    assert_eq!(json["attempts"][0]["source"]["kind"], "none");
    assert_eq!(json["attempts"][0]["result"]["status"], "success");
}
