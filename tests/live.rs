//! Live end-to-end check against a real Chrome/Chromium install, so it is
//! ignored by default. Run with: cargo test --test live -- --ignored

use govfill::{ChromeSessionFactory, FillOptions, FillPlan, FormFiller, PortalBrowser};

const FORM_PAGE: &str = "data:text/html,<form>\
<input name='first_name'><input name='last_name'>\
<select name='state'><option value=''></option><option value='CA'>CA</option></select>\
<button type='submit'>Apply</button></form>";

#[tokio::test]
#[ignore]
async fn fills_a_local_form() {
    let plan = FillPlan::parse(&format!(
        "[portal]\nurl = {FORM_PAGE}\n\n[fields]\nfirst_name = Jane\nlast_name = Doe\nstate = CA\n"
    ))
    .expect("valid input");

    let factory =
        ChromeSessionFactory::new(PortalBrowser::builder().headless(true).build_config());
    let options = FillOptions {
        verify: true,
        ..Default::default()
    };

    let report = FormFiller::new(plan, options)
        .run(&factory)
        .await
        .expect("fill run");

    assert_eq!(report.filled, ["first_name", "last_name", "state"]);
    assert!(!report.submitted);
}
