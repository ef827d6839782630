//! CRUD and JSON sub-document behavior for the content entities.

use db::DbService;
use db::models::case_study::{CaseStudy, CreateCaseStudy, ResultMetric};
use db::models::job::{CreateJob, Job};
use db::models::product::{CreateProduct, Product};
use db::models::service::{CreateService, Faq, PackageOffering, Service, UpdateService};
use uuid::Uuid;

fn sample_service() -> CreateService {
    CreateService {
        name: "Cloud Migration".into(),
        slug: None,
        description: "Lift and modernize".into(),
        category: "infrastructure".into(),
        outcomes: vec!["lower cost".into(), "faster deploys".into()],
        packages: vec![PackageOffering {
            name: "Starter".into(),
            features: vec!["assessment".into(), "runbook".into()],
        }],
        related_services: vec!["devops-enablement".into()],
        faqs: vec![Faq {
            question: "How long?".into(),
            answer: "Six weeks.".into(),
        }],
    }
}

#[tokio::test]
async fn json_sub_fields_round_trip_in_order() {
    let db = DbService::new_in_memory().await.unwrap();

    let created = Service::create(&db.pool, &sample_service()).await.unwrap();
    let fetched = Service::find_by_id(&db.pool, created.id)
        .await
        .unwrap()
        .expect("row exists");

    assert_eq!(
        fetched.parsed_outcomes(),
        vec!["lower cost".to_string(), "faster deploys".to_string()]
    );
    assert_eq!(fetched.parsed_packages().len(), 1);
    assert_eq!(fetched.parsed_packages()[0].features, vec!["assessment", "runbook"]);
    assert_eq!(fetched.parsed_faqs()[0].question, "How long?");
}

#[tokio::test]
async fn slug_is_derived_from_name_when_absent() {
    let db = DbService::new_in_memory().await.unwrap();

    let created = Service::create(&db.pool, &sample_service()).await.unwrap();
    assert_eq!(created.slug, "cloud-migration");

    let by_slug = Service::find_by_slug(&db.pool, "cloud-migration")
        .await
        .unwrap();
    assert!(by_slug.is_some());
}

#[tokio::test]
async fn duplicate_slug_is_rejected_by_unique_index() {
    let db = DbService::new_in_memory().await.unwrap();

    Service::create(&db.pool, &sample_service()).await.unwrap();
    let err = Service::create(&db.pool, &sample_service())
        .await
        .expect_err("second create must fail");

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected database error, got {other:?}"),
    }

    // The first row is untouched.
    let all = Service::find_all(&db.pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn update_replaces_sub_documents() {
    let db = DbService::new_in_memory().await.unwrap();
    let created = Service::create(&db.pool, &sample_service()).await.unwrap();

    let update = UpdateService {
        name: created.name.clone(),
        slug: created.slug.clone(),
        description: created.description.clone(),
        category: created.category.clone(),
        outcomes: vec!["just one".into()],
        packages: vec![],
        related_services: vec![],
        faqs: vec![],
    };
    let updated = Service::update(&db.pool, created.id, &update)
        .await
        .unwrap()
        .expect("row exists");

    assert_eq!(updated.parsed_outcomes(), vec!["just one".to_string()]);
    assert!(updated.parsed_packages().is_empty());
}

#[tokio::test]
async fn update_of_missing_row_returns_none() {
    let db = DbService::new_in_memory().await.unwrap();

    let update = UpdateService {
        name: "x".into(),
        slug: "x".into(),
        description: "x".into(),
        category: "x".into(),
        outcomes: vec![],
        packages: vec![],
        related_services: vec![],
        faqs: vec![],
    };
    let result = Service::update(&db.pool, Uuid::new_v4(), &update)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_of_missing_row_leaves_others_untouched() {
    let db = DbService::new_in_memory().await.unwrap();
    Service::create(&db.pool, &sample_service()).await.unwrap();

    let affected = Service::delete(&db.pool, Uuid::new_v4()).await.unwrap();
    assert_eq!(affected, 0);
    assert_eq!(Service::find_all(&db.pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn featured_products_view_returns_exactly_featured_rows() {
    let db = DbService::new_in_memory().await.unwrap();

    let featured = CreateProduct {
        name: "A".into(),
        slug: None,
        tagline: None,
        description: "featured one".into(),
        category: Default::default(),
        status: Default::default(),
        is_featured: true,
        source_url: None,
        demo_url: None,
        tech_stack: vec![],
        screenshots: vec![],
        features: vec![],
        pricing: None,
        changelog: vec![],
    };
    let plain = CreateProduct {
        name: "B".into(),
        is_featured: false,
        description: "plain one".into(),
        ..featured.clone()
    };

    Product::create(&db.pool, &featured).await.unwrap();
    Product::create(&db.pool, &plain).await.unwrap();

    let rows = Product::find_featured(&db.pool).await.unwrap();
    let names: Vec<&str> = rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A"]);
}

#[tokio::test]
async fn open_jobs_view_excludes_closed_roles() {
    let db = DbService::new_in_memory().await.unwrap();

    let open = CreateJob {
        title: "Rust Engineer".into(),
        slug: None,
        department: "Engineering".into(),
        location: "Remote".into(),
        employment_type: "full-time".into(),
        responsibilities: vec!["ship".into()],
        requirements: vec![],
        nice_to_have: vec![],
        is_open: true,
    };
    let closed = CreateJob {
        title: "Office Manager".into(),
        is_open: false,
        ..open.clone()
    };

    Job::create(&db.pool, &open).await.unwrap();
    Job::create(&db.pool, &closed).await.unwrap();

    let rows = Job::find_open(&db.pool).await.unwrap();
    let titles: Vec<&str> = rows.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, ["Rust Engineer"]);

    // The closed role is still there for the admin table.
    assert_eq!(Job::find_all(&db.pool).await.unwrap().len(), 2);
}

#[tokio::test]
async fn case_study_industry_filter() {
    let db = DbService::new_in_memory().await.unwrap();

    for (title, industry) in [("Alpha", "fintech"), ("Beta", "health"), ("Gamma", "fintech")] {
        CaseStudy::create(
            &db.pool,
            &CreateCaseStudy {
                title: title.into(),
                slug: None,
                client: "Acme".into(),
                industry: industry.into(),
                problem: "p".into(),
                result: "r".into(),
                results: vec![ResultMetric {
                    metric: "-40%".into(),
                    label: "cost".into(),
                }],
                tech_stack: vec![],
                tags: vec![],
            },
        )
        .await
        .unwrap();
    }

    let fintech = CaseStudy::find_by_industry(&db.pool, "fintech").await.unwrap();
    assert_eq!(fintech.len(), 2);
    assert!(fintech.iter().all(|cs| cs.industry == "fintech"));

    let industries = CaseStudy::industries(&db.pool).await.unwrap();
    assert_eq!(industries, ["fintech", "health"]);
}
