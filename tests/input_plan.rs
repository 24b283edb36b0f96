//! Input-file parsing: shape, ordering, overrides, and the fail-fast
//! validation that runs before any browser is launched.

use std::io::Write;

use govfill::{Error, FieldEntry, FillPlan};

#[test]
fn parses_fields_in_file_order() {
    let plan = FillPlan::parse(
        "[portal]\n\
         url = https://portal.example.gov/apply\n\
         \n\
         [fields]\n\
         first_name = Jane\n\
         last_name = Doe\n\
         city = Springfield\n",
    )
    .expect("valid input");

    assert_eq!(plan.url, "https://portal.example.gov/apply");
    let names: Vec<_> = plan.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["first_name", "last_name", "city"]);
    assert_eq!(plan.fields[0].value, "Jane");
}

#[test]
fn derives_selector_from_field_name() {
    assert_eq!(
        FieldEntry::default_selector("first_name"),
        "[name=\"first_name\"], #first_name"
    );
}

#[test]
fn selector_override_applies_to_named_field_only() {
    let plan = FillPlan::parse(
        "[portal]\n\
         url = https://portal.example.gov\n\
         \n\
         [fields]\n\
         first_name = Jane\n\
         last_name = Doe\n\
         \n\
         [selectors]\n\
         first_name = input#applicant-first-name\n",
    )
    .expect("valid input");

    assert_eq!(plan.fields[0].selector, "input#applicant-first-name");
    assert_eq!(
        plan.fields[1].selector,
        FieldEntry::default_selector("last_name")
    );
}

#[test]
fn submit_selector_defaults_and_overrides() {
    let default = FillPlan::parse(
        "[portal]\nurl = https://portal.example.gov\n\n[fields]\na = 1\n",
    )
    .expect("valid input");
    assert_eq!(default.submit_selector, "button[type='submit']");

    let custom = FillPlan::parse(
        "[portal]\n\
         url = https://portal.example.gov\n\
         submit = input#send-application ; portal uses an input control\n\
         \n\
         [fields]\n\
         a = 1\n",
    )
    .expect("valid input");
    assert_eq!(custom.submit_selector, "input#send-application");
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let plan = FillPlan::parse(
        "# applicant details\n\
         ; maintained by the casework team\n\
         [portal]\n\
         url = https://portal.example.gov\n\
         \n\
         [fields]\n\
         first_name = Jane\n",
    )
    .expect("valid input");
    assert_eq!(plan.fields.len(), 1);
}

#[test]
fn missing_url_is_rejected() {
    let err = FillPlan::parse("[portal]\n\n[fields]\na = 1\n").expect_err("no url");
    match err {
        Error::ConfigError(msg) => assert!(msg.contains("url"), "message was: {msg}"),
        other => panic!("expected ConfigError, got {other}"),
    }
}

#[test]
fn empty_fields_section_is_rejected() {
    let err = FillPlan::parse("[portal]\nurl = https://x.example\n\n[fields]\n")
        .expect_err("no fields");
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn duplicate_field_is_rejected() {
    let err = FillPlan::parse(
        "[portal]\nurl = https://x.example\n\n[fields]\nname = a\nname = b\n",
    )
    .expect_err("duplicate key");
    match err {
        Error::ConfigError(msg) => assert!(msg.contains("duplicate"), "message was: {msg}"),
        other => panic!("expected ConfigError, got {other}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let err = FillPlan::parse("[portals]\nurl = https://x.example\n").expect_err("typo section");
    match err {
        Error::ConfigError(msg) => assert!(msg.contains("[portals]"), "message was: {msg}"),
        other => panic!("expected ConfigError, got {other}"),
    }
}

#[test]
fn selector_for_unconfigured_field_is_rejected() {
    let err = FillPlan::parse(
        "[portal]\n\
         url = https://x.example\n\
         \n\
         [fields]\n\
         a = 1\n\
         \n\
         [selectors]\n\
         b = #b\n",
    )
    .expect_err("selector without field");
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn empty_key_is_rejected() {
    let err = FillPlan::parse("[fields]\n= orphan value\n").expect_err("empty key");
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn key_outside_any_section_is_rejected() {
    let err = FillPlan::parse("url = https://x.example\n").expect_err("no section header");
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn malformed_line_reports_its_line_number() {
    let err = FillPlan::parse("[portal]\nurl = https://x.example\nnot a key value line\n")
        .expect_err("bad line");
    match err {
        Error::ConfigError(msg) => assert!(msg.contains("line 3"), "message was: {msg}"),
        other => panic!("expected ConfigError, got {other}"),
    }
}

#[test]
fn load_reads_an_input_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "[portal]\nurl = https://portal.example.gov\n\n[fields]\nfirst_name = Jane"
    )
    .expect("write");

    let plan = FillPlan::load(file.path()).expect("load succeeds");
    assert_eq!(plan.fields[0].value, "Jane");
}

#[test]
fn load_reports_a_missing_file() {
    let err = FillPlan::load("definitely/not/here.ini").expect_err("missing file");
    match err {
        Error::ConfigError(msg) => assert!(msg.contains("not/here.ini"), "message was: {msg}"),
        other => panic!("expected ConfigError, got {other}"),
    }
}
