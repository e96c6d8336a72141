use super::*;

#[test]
fn path_without_query_is_unchanged() {
    assert_eq!(path_with_query("/create", ""), "/create");
}

#[test]
fn query_is_appended_once() {
    assert_eq!(path_with_query("/dashboard", "page=2"), "/dashboard?page=2");
    assert_eq!(path_with_query("/dashboard", "?page=2"), "/dashboard?page=2");
}
