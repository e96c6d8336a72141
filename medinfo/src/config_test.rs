use super::*;

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ApiConfig::new("https://api.example.test/api///");
    assert_eq!(cfg.base_url(), "https://api.example.test/api");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    assert_eq!(ApiConfig::new("   "), ApiConfig::default());
    assert_eq!(ApiConfig::default().base_url(), DEFAULT_API_URL);
}

#[test]
fn url_joins_with_and_without_leading_slash() {
    let cfg = ApiConfig::new("http://h/api");
    assert_eq!(cfg.url("/auth/me"), "http://h/api/auth/me");
    assert_eq!(cfg.url("info"), "http://h/api/info");
}

#[test]
fn from_env_reads_override() {
    let key = API_URL_ENV;
    unsafe { std::env::set_var(key, "https://meds.example.test/api/") };
    assert_eq!(ApiConfig::from_env().base_url(), "https://meds.example.test/api");
    unsafe { std::env::remove_var(key) };
    assert_eq!(ApiConfig::from_env(), ApiConfig::default());
}
