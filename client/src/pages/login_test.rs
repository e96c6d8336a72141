use super::*;

#[test]
fn missing_redirect_goes_to_dashboard() {
    assert_eq!(return_target(None), "/dashboard");
}

#[test]
fn relative_redirect_is_honoured() {
    assert_eq!(return_target(Some("/create".to_owned())), "/create");
}

#[test]
fn external_redirect_is_ignored() {
    assert_eq!(return_target(Some("https://evil.example/phish".to_owned())), "/dashboard");
}

#[test]
fn request_trims_email_but_not_password() {
    let request = login_request("  a@b.com ", " pw ");
    assert_eq!(request.email, "a@b.com");
    assert_eq!(request.password, " pw ");
}

#[test]
fn submit_label_reflects_pending() {
    assert_eq!(submit_label(true), "Signing in...");
    assert_eq!(submit_label(false), "Sign In");
}
