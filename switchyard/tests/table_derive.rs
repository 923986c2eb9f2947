//! `#[derive(Table)]` route tables.
#![cfg(feature = "macros")]

use switchyard::{Key, Router, RouterError, Table, Value};

#[derive(Table, Clone, Copy, Debug)]
#[table(module = "user")]
enum UserRoute {
    Login,
    Logout,
    #[route("profile/detail")]
    Profile,
    AvatarUrl,
}

#[derive(Table)]
enum Bare {
    Ping,
}

#[test]
fn test_derived_keys() {
    assert_eq!(UserRoute::Login.url(), Some(Key::from("user/login")));
    assert_eq!(UserRoute::Profile.url(), Some(Key::from("user/profile/detail")));
    assert_eq!(UserRoute::AvatarUrl.url(), Some(Key::from("user/avatar_url")));
    assert_eq!(Bare::Ping.url(), Some(Key::from("ping")));
}

#[test]
fn test_urls_lists_every_route() {
    assert_eq!(
        UserRoute::URLS,
        &[
            "user/login",
            "user/logout",
            "user/profile/detail",
            "user/avatar_url"
        ]
    );
}

#[test]
fn test_derived_table_drives_router() {
    let router = Router::new();
    router.register_action(&UserRoute::Login, |_, _| Ok(())).unwrap();
    router
        .register_value(&UserRoute::Profile, |key, _| Ok(Value::new(key.to_string())))
        .unwrap();

    assert_eq!(router.perform(&UserRoute::Login, None), Ok(()));
    assert_eq!(
        router.perform(&UserRoute::Logout, None),
        Err(RouterError::HandlerNotFound {
            key: Key::from("user/logout")
        })
    );
    assert_eq!(
        router.get::<String>(&UserRoute::Profile, None),
        Ok("user/profile/detail".to_string())
    );
    assert_eq!(
        router.perform(&None::<UserRoute>, None),
        Err(RouterError::KeyMissing)
    );
}

#[derive(Table)]
#[table(module = "net")]
enum NetRoute {
    HTTPStatus,
    ParseIOError,
}

#[test]
fn test_acronyms_split_into_words() {
    assert_eq!(NetRoute::HTTPStatus.url(), Some(Key::from("net/http_status")));
    assert_eq!(NetRoute::ParseIOError.url(), Some(Key::from("net/parse_io_error")));
    assert_eq!(NetRoute::URLS, &["net/http_status", "net/parse_io_error"]);
}
