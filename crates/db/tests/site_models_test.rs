//! Pages, settings, blog, timeline, leads and session rows.

use chrono::{Duration, Utc};
use db::DbService;
use db::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use db::models::lead::{CreateLead, Lead, LeadSource, WizardData};
use db::models::page::{CreatePage, Page, Section, SectionKind, SectionStyles};
use db::models::session::Session;
use db::models::setting::{Setting, SettingKind, UpsertSetting};
use db::models::timeline_event::{CreateTimelineEvent, TimelineEvent};
use db::models::user::User;

fn section(id: &str, order: i64) -> Section {
    Section {
        id: id.into(),
        kind: SectionKind::Content,
        title: format!("section {id}"),
        content: "<p>hi</p>".into(),
        order,
        styles: SectionStyles::default(),
    }
}

#[tokio::test]
async fn page_sections_round_trip() {
    let db = DbService::new_in_memory().await.unwrap();

    let page = Page::create(
        &db.pool,
        &CreatePage {
            title: "About".into(),
            slug: None,
            content: String::new(),
            sections: vec![section("a", 1), section("b", 2)],
            is_published: true,
        },
    )
    .await
    .unwrap();

    let sections = page.parsed_sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].id, "a");
    assert_eq!(sections[1].order, 2);

    let replaced = Page::update_sections(&db.pool, page.id, &[section("b", 1)])
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(replaced.parsed_sections().len(), 1);
}

#[tokio::test]
async fn publish_transition_stamps_published_at() {
    let db = DbService::new_in_memory().await.unwrap();

    let post = BlogPost::create(
        &db.pool,
        &CreateBlogPost {
            title: "Draft".into(),
            slug: None,
            content: "<p>body</p>".into(),
            tags: vec!["rust".into()],
            published: false,
        },
    )
    .await
    .unwrap();
    assert!(post.published_at.is_none());

    let published = BlogPost::update(
        &db.pool,
        post.id,
        &UpdateBlogPost {
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            tags: post.parsed_tags(),
            published: true,
        },
    )
    .await
    .unwrap()
    .expect("row exists");
    assert!(published.published_at.is_some());

    // Only published posts are visible on the public blog.
    let visible = BlogPost::find_published(&db.pool).await.unwrap();
    assert_eq!(visible.len(), 1);

    let unpublished = BlogPost::update(
        &db.pool,
        post.id,
        &UpdateBlogPost {
            title: post.title.clone(),
            slug: post.slug,
            content: post.content,
            tags: vec![],
            published: false,
        },
    )
    .await
    .unwrap()
    .expect("row exists");
    assert!(unpublished.published_at.is_none());
}

#[tokio::test]
async fn setting_upsert_overwrites_by_key() {
    let db = DbService::new_in_memory().await.unwrap();

    Setting::upsert(
        &db.pool,
        &UpsertSetting {
            key: "hero_title".into(),
            value: "We build things".into(),
            kind: SettingKind::String,
        },
    )
    .await
    .unwrap();

    let updated = Setting::upsert(
        &db.pool,
        &UpsertSetting {
            key: "hero_title".into(),
            value: "We ship things".into(),
            kind: SettingKind::String,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.value, "We ship things");

    assert_eq!(Setting::find_all(&db.pool).await.unwrap().len(), 1);
}

#[test]
fn json_setting_rejects_malformed_value() {
    let bad = UpsertSetting {
        key: "process_steps".into(),
        value: "[1,2".into(),
        kind: SettingKind::Json,
    };
    assert!(bad.validate().is_err());

    let good = UpsertSetting {
        value: "[1,2]".into(),
        ..bad
    };
    assert!(good.validate().is_ok());
}

#[tokio::test]
async fn timeline_appends_after_last_position() {
    let db = DbService::new_in_memory().await.unwrap();

    for year in [2019, 2021] {
        TimelineEvent::create(
            &db.pool,
            &CreateTimelineEvent {
                year,
                title: format!("{year}"),
                description: "milestone".into(),
                tag: None,
                position: None,
            },
        )
        .await
        .unwrap();
    }

    let events = TimelineEvent::find_all(&db.pool).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].position, 1);
    assert_eq!(events[1].position, 2);
}

#[tokio::test]
async fn lead_wizard_data_round_trips() {
    let db = DbService::new_in_memory().await.unwrap();

    let lead = Lead::create(
        &db.pool,
        &CreateLead {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            company: None,
            message: None,
            source: LeadSource::Wizard,
            wizard_data: Some(WizardData {
                project_type: "saas".into(),
                goals: vec!["mvp".into(), "launch".into()],
                budget: "10-25k".into(),
                timeline: "q3".into(),
            }),
        },
    )
    .await
    .unwrap();

    let data = lead.parsed_wizard_data().expect("wizard data present");
    assert_eq!(data.goals, vec!["mvp", "launch"]);
    assert_eq!(Lead::count(&db.pool).await.unwrap(), 1);
}

#[tokio::test]
async fn session_lookup_and_expiry() {
    let db = DbService::new_in_memory().await.unwrap();

    let user = User::create(&db.pool, "admin@example.com", "$argon2id$stub")
        .await
        .unwrap();

    let fresh = Session::create(
        &db.pool,
        user.id,
        "hash-a",
        Utc::now() + Duration::hours(12),
    )
    .await
    .unwrap();
    assert!(!fresh.is_expired(Utc::now()));

    let stale = Session::create(&db.pool, user.id, "hash-b", Utc::now() - Duration::hours(1))
        .await
        .unwrap();
    assert!(stale.is_expired(Utc::now()));

    let found = Session::find_by_token_hash(&db.pool, "hash-a")
        .await
        .unwrap();
    assert!(found.is_some());

    let swept = Session::delete_expired(&db.pool, Utc::now()).await.unwrap();
    assert_eq!(swept, 1);
    assert!(
        Session::find_by_token_hash(&db.pool, "hash-b")
            .await
            .unwrap()
            .is_none()
    );
}
