//! Integration tests for contact, newsletter, team and dashboard repositories.

use assert_matches::assert_matches;
use sqlx::PgPool;
use tola_db::models::contact::{ContactFilter, CreateContact};
use tola_db::models::subscriber::{SubscribeOutcome, SubscriberFilter};
use tola_db::models::team_member::{CreateTeamMember, UpdateTeamMember};
use tola_db::repositories::{ContactRepo, StatsRepo, SubscriberRepo, TeamMemberRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscribe_twice_reactivates(pool: PgPool) {
    let first = SubscriberRepo::subscribe(&pool, "a@example.com", Some("Ann"))
        .await
        .unwrap();
    assert_matches!(first, SubscribeOutcome::Created(ref s) if s.active);

    assert!(SubscriberRepo::unsubscribe(&pool, "a@example.com").await.unwrap());
    let inactive = SubscriberRepo::list(&pool, &SubscriberFilter { active: Some(false) })
        .await
        .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].email, "a@example.com");

    let second = SubscriberRepo::subscribe(&pool, "a@example.com", None).await.unwrap();
    assert_matches!(second, SubscribeOutcome::Reactivated(ref s) if s.active && s.name.as_deref() == Some("Ann"));

    let all = SubscriberRepo::list(&pool, &SubscriberFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsubscribe_unknown_address(pool: PgPool) {
    assert!(!SubscriberRepo::unsubscribe(&pool, "nobody@example.com").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_responded_flow(pool: PgPool) {
    let input = CreateContact {
        name: " Bob ".to_string(),
        email: "bob@example.com".to_string(),
        phone: None,
        subject: "Quote".to_string(),
        message: "Need 40m2".to_string(),
    };
    let contact = ContactRepo::create(&pool, &input).await.unwrap();
    assert_eq!(contact.name, "Bob");
    assert!(!contact.responded);

    let stats = StatsRepo::dashboard(&pool).await.unwrap();
    assert_eq!(stats.unresponded_contacts, 1);

    ContactRepo::set_responded(&pool, contact.id, true).await.unwrap().unwrap();
    let filter = ContactFilter {
        responded: Some(false),
    };
    assert!(ContactRepo::list(&pool, &filter).await.unwrap().is_empty());

    let stats = StatsRepo::dashboard(&pool).await.unwrap();
    assert_eq!(stats.unresponded_contacts, 0);
    assert_eq!(stats.tiles, 0);

    assert!(ContactRepo::delete(&pool, contact.id).await.unwrap());
    assert!(ContactRepo::set_responded(&pool, contact.id, true).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_members_hide_inactive(pool: PgPool) {
    let member = |name: &str, order| CreateTeamMember {
        name: name.to_string(),
        position: "Installer".to_string(),
        bio: None,
        image: None,
        email: None,
        phone: None,
        display_order: Some(order),
        active: None,
    };
    let zed = TeamMemberRepo::create(&pool, &member("Zed", 1)).await.unwrap();
    TeamMemberRepo::create(&pool, &member("Amy", 2)).await.unwrap();

    let listed = TeamMemberRepo::list(&pool, false).await.unwrap();
    assert_eq!(listed[0].name, "Zed");

    let deactivate = UpdateTeamMember {
        active: Some(false),
        ..Default::default()
    };
    TeamMemberRepo::update(&pool, zed.id, &deactivate).await.unwrap().unwrap();

    assert_eq!(TeamMemberRepo::list(&pool, false).await.unwrap().len(), 1);
    assert_eq!(TeamMemberRepo::list(&pool, true).await.unwrap().len(), 2);
}
