// Model tests: status codes, record decoding and verdict mapping

use ifstate_check::error::ClassifyError;
use ifstate_check::models::*;

#[test]
fn status_codes_map_to_mib_names() {
    let names: Vec<&str> = (1..=7)
        .map(|c| IfStatus::from_code(c).unwrap().as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "up",
            "down",
            "testing",
            "unknown",
            "dormant",
            "notPresent",
            "lowerLayerDown"
        ]
    );
    for code in 1..=7 {
        assert_eq!(IfStatus::from_code(code).unwrap().code(), code);
    }
}

#[test]
fn status_codes_outside_domain_are_rejected() {
    for code in [0, 8, -1, 255] {
        assert_eq!(IfStatus::from_code(code), None, "code {code}");
    }
}

#[test]
fn raw_interface_decodes_into_record() {
    let record = InterfaceRecord::try_from(RawInterface::new("uplink CORE", "ae0", 1, 2)).unwrap();
    assert_eq!(
        record,
        InterfaceRecord::new("uplink CORE", "ae0", IfStatus::Up, IfStatus::Down)
    );
    assert_eq!(record.role(), Some(Role::Core));
}

#[test]
fn empty_label_is_valid() {
    let record = InterfaceRecord::try_from(RawInterface::new("", "ae0", 1, 1)).unwrap();
    assert_eq!(record.label, "");
    assert_eq!(record.role(), None);
}

#[test]
fn out_of_range_status_is_invalid_record() {
    let err = InterfaceRecord::try_from(RawInterface::new("x CORE", "ae0", 0, 1)).unwrap_err();
    let ClassifyError::InvalidRecord { name, reason } = err;
    assert_eq!(name, "ae0");
    assert!(reason.contains("ifOperStatus"), "{reason}");

    let err = InterfaceRecord::try_from(RawInterface::new("x CORE", "ae0", 1, 8)).unwrap_err();
    assert!(err.to_string().contains("ifAdminStatus code 8"), "{err}");
}

#[test]
fn missing_columns_are_invalid_record() {
    let mut raw = RawInterface::new("x CORE", "ae0", 1, 1);
    raw.label = None;
    let err = InterfaceRecord::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("missing ifAlias"));

    let mut raw = RawInterface::new("x CORE", "ae0", 1, 1);
    raw.admin_status = None;
    let err = InterfaceRecord::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("missing ifAdminStatus"));

    let raw = RawInterface {
        name: None,
        ..RawInterface::new("x CORE", "ae0", 1, 1)
    };
    let err = InterfaceRecord::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("missing ifName"));
}

#[test]
fn verdict_exit_codes_and_headings() {
    assert_eq!(Verdict::Ok.exit_code(), 0);
    assert_eq!(Verdict::Warning.exit_code(), 1);
    assert_eq!(Verdict::Critical.exit_code(), 2);
    assert_eq!(Verdict::Ok.heading(), "Everything OK");
    assert_eq!(Verdict::Warning.heading(), "Warning!");
    assert_eq!(Verdict::Critical.heading(), "Critical!");
}

#[test]
fn verdict_from_counts_prefers_alarms() {
    assert_eq!(Verdict::from_counts(0, 0), Verdict::Ok);
    assert_eq!(Verdict::from_counts(0, 3), Verdict::Warning);
    assert_eq!(Verdict::from_counts(1, 0), Verdict::Critical);
    assert_eq!(Verdict::from_counts(2, 5), Verdict::Critical);
}

#[test]
fn severity_orders_by_badness() {
    assert!(Severity::None < Severity::Warning);
    assert!(Severity::Warning < Severity::Critical);
    assert_eq!(Finding::critical("x").severity, Severity::Critical);
    assert_eq!(Finding::warning("y").to_string(), "y");
}
