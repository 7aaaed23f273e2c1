use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};

use campus_core::domain::{
    DISCUSSION_FORUM_TYPE, DiscussionForum, DiscussionTopic, FORUMS_TOOL_ID, Site, SiteMember,
    ToolConfiguration, User,
};
use campus_core::ports::{BaseRepository, ForumRepository};
use campus_core::time::TimeZoneConfig;
use campus_infra::InMemoryForumRepository;
use campus_shared::ERROR_XML;
use campus_shared::dto::SessionResponse;

use super::configure_routes;
use crate::state::{Adapters, AppState};

const PASSWORD: &str = "correct horse";

struct Fixture {
    state: AppState,
    forums: Arc<InMemoryForumRepository>,
}

fn site(id: &str, with_forums_tool: bool) -> Site {
    Site {
        id: id.to_string(),
        title: id.to_uppercase(),
        tools: if with_forums_tool {
            vec![ToolConfiguration {
                id: format!("{id}-forums"),
                tool_id: FORUMS_TOOL_ID.to_string(),
                title: "Forums".to_string(),
            }]
        } else {
            Vec::new()
        },
        members: vec![
            SiteMember {
                user_eid: "prof".to_string(),
                role: "maintain".to_string(),
            },
            SiteMember {
                user_eid: "student".to_string(),
                role: "access".to_string(),
            },
        ],
    }
}

async fn fixture() -> Fixture {
    let forums = Arc::new(InMemoryForumRepository::new());
    let adapters = Adapters {
        forums: forums.clone(),
        ..Adapters::in_memory()
    };
    let state = AppState::with_adapters(
        adapters,
        TimeZoneConfig {
            default_timezone: Some("UTC".to_string()),
            cache_ttl: None,
        },
        Duration::from_secs(300),
    );

    let hash = state.passwords.hash(PASSWORD).unwrap();
    for (eid, super_user) in [("prof", false), ("student", false), ("admin", true)] {
        let user = User::new(eid.to_string(), eid.to_string(), hash.clone())
            .with_super_user(super_user);
        state.users.save(user).await.unwrap();
    }
    state.sites.put_site(site("chem-101", true)).await;
    state.sites.put_site(site("art-200", false)).await;

    Fixture { state, forums }
}

macro_rules! app {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($fixture.state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $eid:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(serde_json::json!({ "eid": $eid, "password": PASSWORD }))
            .to_request();
        let resp: SessionResponse = test::call_and_read_body_json(&$app, req).await;
        resp.session_id
    }};
}

macro_rules! get_text {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri(&$uri).to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
    }};
}

fn add_message_uri(session: &str, site: &str, forum: &str, topic: &str, title: &str) -> String {
    format!(
        "/api/forums/addMessage?sessionid={session}&context={site}&forum={forum}&topic={topic}&user=prof&title={title}&body=hello"
    )
}

#[actix_rt::test]
async fn test_login_rejects_wrong_password() {
    let fx = fixture().await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/session")
        .set_json(serde_json::json!({ "eid": "prof", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/session")
        .set_json(serde_json::json!({ "eid": "ghost", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_add_message_then_list() {
    let fx = fixture().await;
    let app = app!(fx);
    let prof = login!(app, "prof");

    let body = get_text!(app, add_message_uri(&prof, "chem-101", "General", "Intro", "Hi"));
    assert_eq!(body, "Success");

    let req = test::TestRequest::post()
        .uri("/api/forums/addMessage")
        .set_form([
            ("sessionid", prof.as_str()),
            ("context", "chem-101"),
            ("forum", "General"),
            ("topic", "Intro"),
            ("user", "prof"),
            ("title", "Re: Hi"),
            ("body", "again"),
        ])
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "Success");

    let xml = get_text!(
        app,
        format!("/api/forums/getForumsInSite?sessionid={prof}&siteId=chem-101")
    );
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><forumlist><forum id=""#));
    assert!(xml.contains("<title>General</title>"));
    assert!(xml.contains(
        "<title>Intro</title></topic></topiclist><topiclistTotal>1</topiclistTotal></forum>"
    ));
    assert!(xml.ends_with("<forumlistTotal>1</forumlistTotal></forumlist>"));
}

#[actix_rt::test]
async fn test_listing_two_forums() {
    let fx = fixture().await;
    let app = app!(fx);
    let prof = login!(app, "prof");

    get_text!(app, add_message_uri(&prof, "chem-101", "General", "Intro", "Hi"));
    let area = fx
        .forums
        .find_area("chem-101", DISCUSSION_FORUM_TYPE)
        .await
        .unwrap()
        .unwrap();
    let labs = fx
        .forums
        .save_forum(DiscussionForum::new(area.id, "chem-101", "Labs", "prof"))
        .await
        .unwrap();
    fx.forums
        .save_topic(DiscussionTopic::new(labs.id, "Week 1", "prof"))
        .await
        .unwrap();

    let admin = login!(app, "admin");
    let xml = get_text!(
        app,
        format!("/api/forums/getForumsInSite?sessionid={admin}&siteId=chem-101")
    );
    assert!(xml.contains("<forumlistTotal>2</forumlistTotal>"));
    assert_eq!(xml.matches("<topiclistTotal>1</topiclistTotal>").count(), 2);
}

#[actix_rt::test]
async fn test_listing_denied_for_non_maintainer() {
    let fx = fixture().await;
    let app = app!(fx);
    let prof = login!(app, "prof");
    get_text!(app, add_message_uri(&prof, "chem-101", "General", "Intro", "Hi"));

    let student = login!(app, "student");
    let body = get_text!(
        app,
        format!("/api/forums/getForumsInSite?sessionid={student}&siteId=chem-101")
    );
    assert_eq!(body, ERROR_XML);

    let body = get_text!(
        app,
        format!("/api/forums/getForumsInSite?sessionid={prof}&siteId=unknown")
    );
    assert_eq!(body, ERROR_XML);
}

#[actix_rt::test]
async fn test_missing_tool_is_described() {
    let fx = fixture().await;
    let app = app!(fx);
    let prof = login!(app, "prof");

    let body = get_text!(app, add_message_uri(&prof, "art-200", "General", "Intro", "Hi"));
    assert_eq!(body, "Tool sakai.forums not found in site=art-200");

    let body = get_text!(
        app,
        format!("/api/forums/getForumsInSite?sessionid={prof}&siteId=art-200")
    );
    assert_eq!(body, "Tool sakai.forums not found in site=art-200");

    let body = get_text!(app, add_message_uri(&prof, "unknown", "General", "Intro", "Hi"));
    assert_eq!(body, "Failure");
}

#[actix_rt::test]
async fn test_invalid_session_is_401() {
    let fx = fixture().await;
    let app = app!(fx);
    let prof = login!(app, "prof");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/session?sessionid={prof}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    for uri in [
        add_message_uri(&prof, "chem-101", "General", "Intro", "Hi"),
        format!("/api/forums/getForumsInSite?sessionid={prof}&siteId=chem-101"),
        "/api/time/zone".to_string(),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[actix_rt::test]
async fn test_time_zone_roundtrip() {
    let fx = fixture().await;
    let app = app!(fx);
    let prof = login!(app, "prof");

    let req = test::TestRequest::get()
        .uri("/api/time/zone")
        .insert_header(("X-Session-Id", prof.as_str()))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["timezone"], "UTC");

    let req = test::TestRequest::put()
        .uri(&format!("/api/time/zone?sessionid={prof}"))
        .set_json(serde_json::json!({ "timezone": "Asia/Tokyo" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["timezone"], "Asia/Tokyo");

    let req = test::TestRequest::put()
        .uri(&format!("/api/time/zone?sessionid={prof}"))
        .set_json(serde_json::json!({ "timezone": "Mars/Olympus" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/time/zone?sessionid={prof}"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["timezone"], "Asia/Tokyo");
}

#[actix_rt::test]
async fn test_health() {
    let fx = fixture().await;
    let app = app!(fx);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["default_timezone"], "UTC");
}
