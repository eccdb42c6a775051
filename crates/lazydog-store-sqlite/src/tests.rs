//! Integration tests for the catalog running on `SqliteStore`.

use chrono::Utc;
use lazydog_core::{
  Catalog, Error,
  actor::Actor,
  authz::EntityKind,
  feedback::{Rating, Score},
  moderation::{Flag, FlagQuery, FlagStatus, FlagTarget, ReviewDecision},
  resource::{NewResource, Resource, ResourceQuery, ResourceUpdate},
  store::CatalogStore,
  taxonomy::CategoryUpdate,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn catalog() -> Catalog<SqliteStore> {
  Catalog::new(SqliteStore::open_in_memory().await.expect("in-memory store"))
}

async fn actor(c: &Catalog<SqliteStore>, name: &str) -> Actor {
  c.register_actor(name.into(), false).await.unwrap()
}

async fn moderator(c: &Catalog<SqliteStore>, name: &str) -> Actor {
  c.register_actor(name.into(), true).await.unwrap()
}

fn new_resource(title: &str, url: &str) -> NewResource {
  NewResource {
    title:       title.into(),
    description: "A thorough walkthrough of the topic.".into(),
    url:         url.into(),
    category_id: None,
    tag_ids:     vec![],
  }
}

async fn resource(c: &Catalog<SqliteStore>, owner: &Actor, title: &str, url: &str) -> Resource {
  c.create_resource(owner.actor_id, new_resource(title, url)).await.unwrap()
}

fn is_conflict(err: &Error, expected: &str) -> bool {
  matches!(err, Error::Conflict(msg) if msg == expected)
}

fn is_forbidden(err: &Error) -> bool { matches!(err, Error::Forbidden(_)) }

// ─── Actors ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_and_get_actor() {
  let c = catalog().await;
  let alice = actor(&c, "  alice ").await;
  assert_eq!(alice.username, "alice");

  let fetched = c.get_actor(alice.actor_id).await.unwrap();
  assert_eq!(fetched.actor_id, alice.actor_id);
  assert!(!fetched.is_moderator);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
  let c = catalog().await;
  actor(&c, "alice").await;
  let err = c.register_actor("alice".into(), false).await.unwrap_err();
  assert!(is_conflict(&err, "username taken"), "{err:?}");
}

#[tokio::test]
async fn missing_actor_is_not_found() {
  let c = catalog().await;
  let err = c.get_actor(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Actor, .. }));
}

#[tokio::test]
async fn actor_cannot_delete_someone_else() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let bob = actor(&c, "bob").await;

  let err = c.delete_actor(alice.actor_id, bob.actor_id).await.unwrap_err();
  assert!(is_forbidden(&err));
  c.delete_actor(alice.actor_id, alice.actor_id).await.unwrap();
  assert!(c.get_actor(alice.actor_id).await.is_err());
}

// ─── Resources ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_resource_with_tags_in_order() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let rust = c.create_tag("Rust".into(), String::new()).await.unwrap();
  let web = c.create_tag("Web".into(), String::new()).await.unwrap();

  let mut input = new_resource("Axum guide", "https://example.com/axum");
  input.tag_ids = vec![web.tag_id, rust.tag_id, web.tag_id];
  let created = c.create_resource(alice.actor_id, input).await.unwrap();
  assert_eq!(created.tag_ids, vec![web.tag_id, rust.tag_id]);
  assert_eq!(created.score_count, 0);

  let fetched = c.get_resource(created.resource_id).await.unwrap();
  assert_eq!(fetched.title, "Axum guide");
  assert_eq!(fetched.tag_ids, vec![web.tag_id, rust.tag_id]);
}

#[tokio::test]
async fn duplicate_url_conflicts_across_owners() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let bob = actor(&c, "bob").await;
  resource(&c, &alice, "Guide", "https://example.com/a").await;

  let err = c
    .create_resource(bob.actor_id, new_resource("Other", "https://example.com/a"))
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "url already registered"), "{err:?}");
}

#[tokio::test]
async fn url_uniqueness_uses_normalized_form() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let bob = actor(&c, "bob").await;
  let stored = resource(&c, &alice, "Guide", "https://Example.com/a").await;
  assert_eq!(stored.url, "https://example.com/a");

  let err = c
    .create_resource(bob.actor_id, new_resource("Other", "HTTPS://EXAMPLE.COM/a"))
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "url already registered"), "{err:?}");

  let err = c
    .create_resource(bob.actor_id, new_resource("Other", "https://exa<mple>.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Invalid(_)), "{err:?}");
}

#[tokio::test]
async fn title_is_unique_per_owner_only() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let bob = actor(&c, "bob").await;
  resource(&c, &alice, "Guide", "https://example.com/a").await;

  let err = c
    .create_resource(alice.actor_id, new_resource("Guide", "https://example.com/b"))
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "title already used"), "{err:?}");

  resource(&c, &bob, "Guide", "https://example.com/c").await;
}

#[tokio::test]
async fn invalid_resource_fields_rejected() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;

  let mut short = new_resource("Guide", "https://example.com/a");
  short.description = "too short".into();
  assert!(matches!(
    c.create_resource(alice.actor_id, short).await,
    Err(Error::Invalid(_))
  ));

  assert!(matches!(
    c.create_resource(alice.actor_id, new_resource("Guide", "ftp://example.com")).await,
    Err(Error::Invalid(_))
  ));
}

#[tokio::test]
async fn update_resource_requires_owner_and_keeps_identity_unique() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let bob = actor(&c, "bob").await;
  let first = resource(&c, &alice, "First", "https://example.com/1").await;
  resource(&c, &alice, "Second", "https://example.com/2").await;

  let rename = |title: &str| ResourceUpdate { title: Some(title.into()), ..Default::default() };

  let err = c
    .update_resource(first.resource_id, bob.actor_id, rename("Mine now"))
    .await
    .unwrap_err();
  assert!(is_forbidden(&err));

  let err = c
    .update_resource(first.resource_id, alice.actor_id, rename("Second"))
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "title already used"));

  // Re-saving its own title is not a conflict.
  let same = c
    .update_resource(first.resource_id, alice.actor_id, rename("First"))
    .await
    .unwrap();
  assert_eq!(same.title, "First");
}

#[tokio::test]
async fn list_resources_filters_by_owner_category_and_tag() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let bob = actor(&c, "bob").await;
  let mod_ = moderator(&c, "mod").await;
  let category = c
    .create_category(mod_.actor_id, "rust".into(), String::new())
    .await
    .unwrap();
  let tag = c.create_tag("Async".into(), String::new()).await.unwrap();

  let mut tagged = new_resource("Tagged", "https://example.com/t");
  tagged.category_id = Some(category.category_id);
  tagged.tag_ids = vec![tag.tag_id];
  c.create_resource(alice.actor_id, tagged).await.unwrap();
  resource(&c, &alice, "Plain", "https://example.com/p").await;
  resource(&c, &bob, "Bobs", "https://example.com/b").await;

  let all = c.list_resources(ResourceQuery::default()).await.unwrap();
  assert_eq!(all.len(), 3);

  let alices = c
    .list_resources(ResourceQuery { owner_id: Some(alice.actor_id), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(alices.len(), 2);

  let in_category = c
    .list_resources(ResourceQuery { category_id: Some(category.category_id), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(in_category.len(), 1);
  assert_eq!(in_category[0].title, "Tagged");

  let with_tag = c
    .list_resources(ResourceQuery { tag_id: Some(tag.tag_id), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(with_tag.len(), 1);
  assert_eq!(with_tag[0].tag_ids, vec![tag.tag_id]);

  let page = c
    .list_resources(ResourceQuery { limit: Some(2), offset: Some(2), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn set_resource_tags_replaces_links() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let a = c.create_tag("A".into(), String::new()).await.unwrap();
  let b = c.create_tag("B".into(), String::new()).await.unwrap();
  let mut input = new_resource("Guide", "https://example.com/g");
  input.tag_ids = vec![a.tag_id];
  let r = c.create_resource(alice.actor_id, input).await.unwrap();

  c.set_resource_tags(r.resource_id, alice.actor_id, vec![b.tag_id]).await.unwrap();
  assert_eq!(c.get_resource(r.resource_id).await.unwrap().tag_ids, vec![b.tag_id]);

  let err = c
    .set_resource_tags(r.resource_id, alice.actor_id, vec![Uuid::new_v4()])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Tag, .. }));
  assert_eq!(c.get_resource(r.resource_id).await.unwrap().tag_ids, vec![b.tag_id]);
}

// ─── Ratings and aggregates ──────────────────────────────────────────────────

#[tokio::test]
async fn ratings_maintain_aggregate() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  let scores = [3, 3, 4, 3];
  let mut ratings = Vec::new();
  for (i, score) in scores.into_iter().enumerate() {
    let rater = actor(&c, &format!("rater{i}")).await;
    ratings.push(c.create_rating(rater.actor_id, r.resource_id, score).await.unwrap());
  }

  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!(fetched.score_count, 4);
  // 13 / 4 = 3.25 ties to the even digit
  assert_eq!(fetched.average_score, 3.2);

  let first = &ratings[0];
  c.update_rating(first.rating_id, first.actor_id, 5).await.unwrap();
  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!(fetched.score_count, 4);
  assert_eq!(fetched.average_score, 3.8);

  for rating in &ratings {
    c.delete_rating(rating.rating_id, rating.actor_id).await.unwrap();
  }
  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!(fetched.score_count, 0);
  assert_eq!(fetched.average_score, 0.0);
}

#[tokio::test]
async fn deleting_highest_rating_lowers_average() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  let mut ratings = Vec::new();
  for (i, score) in [3, 4, 5].into_iter().enumerate() {
    let rater = actor(&c, &format!("rater{i}")).await;
    ratings.push(c.create_rating(rater.actor_id, r.resource_id, score).await.unwrap());
  }
  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!((fetched.average_score, fetched.score_count), (4.0, 3));

  let five = &ratings[2];
  c.delete_rating(five.rating_id, five.actor_id).await.unwrap();
  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!((fetched.average_score, fetched.score_count), (3.5, 2));
}

#[tokio::test]
async fn owner_cannot_rate_own_resource() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  let err = c.create_rating(owner.actor_id, r.resource_id, 5).await.unwrap_err();
  assert!(is_forbidden(&err));
  assert_eq!(c.get_resource(r.resource_id).await.unwrap().score_count, 0);
}

#[tokio::test]
async fn second_rating_conflicts_and_leaves_aggregate_alone() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let rater = actor(&c, "rater").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  c.create_rating(rater.actor_id, r.resource_id, 2).await.unwrap();
  let err = c.create_rating(rater.actor_id, r.resource_id, 5).await.unwrap_err();
  assert!(is_conflict(&err, "already rated"));

  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!(fetched.score_count, 1);
  assert_eq!(fetched.average_score, 2.0);
}

#[tokio::test]
async fn out_of_range_score_is_invalid_and_writes_nothing() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let rater = actor(&c, "rater").await;
  let newcomer = actor(&c, "newcomer").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;
  let rating = c.create_rating(rater.actor_id, r.resource_id, 4).await.unwrap();
  let before = c.list_ratings(r.resource_id).await.unwrap();

  for score in [0, 6, -1] {
    let err = c.create_rating(newcomer.actor_id, r.resource_id, score).await.unwrap_err();
    assert!(matches!(err, Error::Invalid(_)), "score {score}: {err:?}");
  }
  for score in [9, 0] {
    let err = c.update_rating(rating.rating_id, rater.actor_id, score).await.unwrap_err();
    assert!(matches!(err, Error::Invalid(_)), "score {score}: {err:?}");
  }

  assert_eq!(c.list_ratings(r.resource_id).await.unwrap(), before);
  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!((fetched.average_score, fetched.score_count), (4.0, 1));
}

#[tokio::test]
async fn only_rating_owner_may_change_it() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let rater = actor(&c, "rater").await;
  let other = actor(&c, "other").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;
  let rating = c.create_rating(rater.actor_id, r.resource_id, 4).await.unwrap();

  assert!(is_forbidden(&c.update_rating(rating.rating_id, other.actor_id, 1).await.unwrap_err()));
  assert!(is_forbidden(&c.delete_rating(rating.rating_id, other.actor_id).await.unwrap_err()));
  assert_eq!(c.list_ratings(r.resource_id).await.unwrap().len(), 1);
}

// ─── Bookmarks ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn bookmarks_are_unique_and_listed_newest_first() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let reader = actor(&c, "reader").await;
  let first = resource(&c, &owner, "First", "https://example.com/1").await;
  let second = resource(&c, &owner, "Second", "https://example.com/2").await;

  c.create_bookmark(reader.actor_id, first.resource_id).await.unwrap();
  c.create_bookmark(reader.actor_id, second.resource_id).await.unwrap();
  let err = c.create_bookmark(reader.actor_id, first.resource_id).await.unwrap_err();
  assert!(is_conflict(&err, "already bookmarked"));

  let listed = c.list_bookmarks(reader.actor_id).await.unwrap();
  let ids: Vec<_> = listed.iter().map(|b| b.resource_id).collect();
  assert_eq!(ids, vec![second.resource_id, first.resource_id]);

  let err = c.delete_bookmark(listed[0].bookmark_id, owner.actor_id).await.unwrap_err();
  assert!(is_forbidden(&err));
  c.delete_bookmark(listed[0].bookmark_id, reader.actor_id).await.unwrap();
  assert_eq!(c.list_bookmarks(reader.actor_id).await.unwrap().len(), 1);
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn comments_belong_to_their_author() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let reader = actor(&c, "reader").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  let comment = c
    .create_comment(reader.actor_id, r.resource_id, "Helpful, thanks".into())
    .await
    .unwrap();
  let err = c
    .update_comment(comment.comment_id, owner.actor_id, "Edited".into())
    .await
    .unwrap_err();
  assert!(is_forbidden(&err));

  let edited = c
    .update_comment(comment.comment_id, reader.actor_id, "Very helpful".into())
    .await
    .unwrap();
  assert_eq!(edited.content, "Very helpful");

  let listed = c.list_comments(r.resource_id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].content, "Very helpful");

  c.delete_comment(comment.comment_id, reader.actor_id).await.unwrap();
  assert!(c.list_comments(r.resource_id).await.unwrap().is_empty());
}

// ─── Flags ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn flag_requires_exactly_one_target() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let reader = actor(&c, "reader").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;
  let comment = c
    .create_comment(owner.actor_id, r.resource_id, "First!".into())
    .await
    .unwrap();

  let neither = c.create_flag(reader.actor_id, None, None, "spam".into()).await;
  assert!(matches!(neither, Err(Error::Invalid(_))));

  let both = c
    .create_flag(reader.actor_id, Some(r.resource_id), Some(comment.comment_id), "spam".into())
    .await;
  assert!(matches!(both, Err(Error::Invalid(_))));

  let flag = c
    .create_flag(reader.actor_id, None, Some(comment.comment_id), "spam".into())
    .await
    .unwrap();
  assert_eq!(flag.target, FlagTarget::Comment(comment.comment_id));
  assert_eq!(flag.status, FlagStatus::Pending);
}

#[tokio::test]
async fn duplicate_flag_conflicts() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let reader = actor(&c, "reader").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  c.create_flag(reader.actor_id, Some(r.resource_id), None, "broken link".into())
    .await
    .unwrap();
  let err = c
    .create_flag(reader.actor_id, Some(r.resource_id), None, "still broken".into())
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "already flagged"));
}

#[tokio::test]
async fn flag_review_lifecycle() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let reader = actor(&c, "reader").await;
  let mod_ = moderator(&c, "mod").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;
  let flag = c
    .create_flag(reader.actor_id, Some(r.resource_id), None, "off topic".into())
    .await
    .unwrap();

  let err = c
    .review_flag(flag.flag_id, reader.actor_id, ReviewDecision::Reviewed)
    .await
    .unwrap_err();
  assert!(is_forbidden(&err));

  let reviewed = c
    .review_flag(flag.flag_id, mod_.actor_id, ReviewDecision::Rejected)
    .await
    .unwrap();
  assert_eq!(reviewed.status, FlagStatus::Rejected);
  assert_eq!(reviewed.reviewed_by, Some(mod_.actor_id));
  assert!(reviewed.reviewed_at.is_some());

  let again = c
    .review_flag(flag.flag_id, mod_.actor_id, ReviewDecision::Reviewed)
    .await
    .unwrap_err();
  assert!(matches!(again, Error::Invalid(_)));

  let stored = c.get_flag(flag.flag_id).await.unwrap();
  assert_eq!(stored.status, FlagStatus::Rejected);

  let by_status = |status| FlagQuery { status: Some(status), ..FlagQuery::default() };
  assert!(c.list_flags(by_status(FlagStatus::Pending)).await.unwrap().is_empty());
  assert_eq!(c.list_flags(by_status(FlagStatus::Rejected)).await.unwrap().len(), 1);
  assert_eq!(c.list_flags(FlagQuery::default()).await.unwrap().len(), 1);

  assert!(is_forbidden(&c.delete_flag(flag.flag_id, owner.actor_id).await.unwrap_err()));
  c.delete_flag(flag.flag_id, mod_.actor_id).await.unwrap();
  assert!(c.list_flags(FlagQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn flags_filter_by_actor_and_target() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let alice = actor(&c, "alice").await;
  let bob = actor(&c, "bob").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;
  let other = resource(&c, &owner, "Other", "https://example.com/o").await;
  let comment = c
    .create_comment(owner.actor_id, r.resource_id, "Updated the examples".into())
    .await
    .unwrap();

  let alice_on_r = c
    .create_flag(alice.actor_id, Some(r.resource_id), None, "spam".into())
    .await
    .unwrap();
  let bob_on_r = c
    .create_flag(bob.actor_id, Some(r.resource_id), None, "spam".into())
    .await
    .unwrap();
  let alice_on_comment = c
    .create_flag(alice.actor_id, None, Some(comment.comment_id), "rude".into())
    .await
    .unwrap();
  c.create_flag(bob.actor_id, Some(other.resource_id), None, "dead link".into())
    .await
    .unwrap();

  let ids = |flags: Vec<Flag>| {
    flags.into_iter().map(|f| f.flag_id).collect::<Vec<_>>()
  };

  let by_alice = FlagQuery { actor_id: Some(alice.actor_id), ..FlagQuery::default() };
  assert_eq!(
    ids(c.list_flags(by_alice).await.unwrap()),
    vec![alice_on_comment.flag_id, alice_on_r.flag_id]
  );

  let on_r = FlagQuery { resource_id: Some(r.resource_id), ..FlagQuery::default() };
  assert_eq!(ids(c.list_flags(on_r).await.unwrap()), vec![bob_on_r.flag_id, alice_on_r.flag_id]);

  let on_comment = FlagQuery { comment_id: Some(comment.comment_id), ..FlagQuery::default() };
  assert_eq!(ids(c.list_flags(on_comment).await.unwrap()), vec![alice_on_comment.flag_id]);

  let bob_on_r_pending = FlagQuery {
    actor_id: Some(bob.actor_id),
    resource_id: Some(r.resource_id),
    status: Some(FlagStatus::Pending),
    ..FlagQuery::default()
  };
  assert_eq!(ids(c.list_flags(bob_on_r_pending).await.unwrap()), vec![bob_on_r.flag_id]);
  assert_eq!(c.list_flags(FlagQuery::default()).await.unwrap().len(), 4);
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn category_names_are_normalized_and_case_insensitive() {
  let c = catalog().await;
  let mod_ = moderator(&c, "mod").await;

  let category = c
    .create_category(mod_.actor_id, "  web   development ".into(), String::new())
    .await
    .unwrap();
  assert_eq!(category.name, "Web Development");

  let err = c
    .create_category(mod_.actor_id, "WEB DEVELOPMENT".into(), String::new())
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "category exists"));
}

#[tokio::test]
async fn only_moderators_create_categories() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let err = c
    .create_category(alice.actor_id, "Rust".into(), String::new())
    .await
    .unwrap_err();
  assert!(is_forbidden(&err));
  assert!(c.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn rename_category_checks_uniqueness() {
  let c = catalog().await;
  let mod_ = moderator(&c, "mod").await;
  let rust = c.create_category(mod_.actor_id, "Rust".into(), String::new()).await.unwrap();
  c.create_category(mod_.actor_id, "Go".into(), String::new()).await.unwrap();

  let err = c
    .rename_category(rust.category_id, mod_.actor_id, "go".into())
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "category exists"));

  let renamed = c
    .rename_category(rust.category_id, mod_.actor_id, "rust lang".into())
    .await
    .unwrap();
  assert_eq!(renamed.name, "Rust Lang");

  let described = c
    .update_category_description(rust.category_id, mod_.actor_id, "Systems".into())
    .await
    .unwrap();
  assert_eq!(described.description, "Systems");
  assert_eq!(c.get_category(rust.category_id).await.unwrap().name, "Rust Lang");
}

#[tokio::test]
async fn category_update_is_all_or_nothing() {
  let c = catalog().await;
  let mod_ = moderator(&c, "mod").await;
  let rust = c.create_category(mod_.actor_id, "Rust".into(), "Systems".into()).await.unwrap();
  c.create_category(mod_.actor_id, "Go".into(), String::new()).await.unwrap();

  let err = c
    .update_category(rust.category_id, mod_.actor_id, CategoryUpdate {
      name:        Some("rust lang".into()),
      description: Some("x".repeat(501)),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Invalid(_)), "{err:?}");

  let err = c
    .update_category(rust.category_id, mod_.actor_id, CategoryUpdate {
      name:        Some("GO".into()),
      description: Some("Memory safety".into()),
    })
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "category exists"), "{err:?}");

  let stored = c.get_category(rust.category_id).await.unwrap();
  assert_eq!((stored.name.as_str(), stored.description.as_str()), ("Rust", "Systems"));

  let updated = c
    .update_category(rust.category_id, mod_.actor_id, CategoryUpdate {
      name:        Some("rust lang".into()),
      description: Some("Memory safety".into()),
    })
    .await
    .unwrap();
  assert_eq!((updated.name.as_str(), updated.description.as_str()), ("Rust Lang", "Memory safety"));
}

#[tokio::test]
async fn deleting_category_unsets_resource_category() {
  let c = catalog().await;
  let alice = actor(&c, "alice").await;
  let mod_ = moderator(&c, "mod").await;
  let category = c.create_category(mod_.actor_id, "Rust".into(), String::new()).await.unwrap();
  let mut input = new_resource("Guide", "https://example.com/g");
  input.category_id = Some(category.category_id);
  let r = c.create_resource(alice.actor_id, input).await.unwrap();

  c.delete_category(category.category_id, mod_.actor_id).await.unwrap();
  assert_eq!(c.get_resource(r.resource_id).await.unwrap().category_id, None);
}

// ─── Tags ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn tag_slugs_get_numbered_suffixes() {
  let c = catalog().await;
  let slugs = [
    c.create_tag("Python".into(), String::new()).await.unwrap().slug,
    c.create_tag("PYTHON".into(), String::new()).await.unwrap().slug,
    c.create_tag("python!".into(), String::new()).await.unwrap().slug,
  ];
  assert_eq!(slugs, ["python", "python-1", "python-2"]);

  let found = c.get_tag_by_slug("python-1".into()).await.unwrap();
  assert_eq!(found.name, "PYTHON");
}

#[tokio::test]
async fn duplicate_tag_name_conflicts() {
  let c = catalog().await;
  c.create_tag("Rust".into(), String::new()).await.unwrap();
  let err = c.create_tag(" Rust ".into(), String::new()).await.unwrap_err();
  assert!(is_conflict(&err, "tag exists"));
}

#[tokio::test]
async fn rename_tag_keeps_slug() {
  let c = catalog().await;
  let mod_ = moderator(&c, "mod").await;
  let alice = actor(&c, "alice").await;
  let tag = c.create_tag("Rust".into(), String::new()).await.unwrap();

  let err = c.rename_tag(tag.tag_id, alice.actor_id, "Rustlang".into()).await.unwrap_err();
  assert!(is_forbidden(&err));

  let renamed = c.rename_tag(tag.tag_id, mod_.actor_id, "Rustlang".into()).await.unwrap();
  assert_eq!(renamed.name, "Rustlang");
  assert_eq!(renamed.slug, "rust");
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
  let c = catalog().await;
  let err = c.get_tag_by_slug("nope".into()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Tag, ref key } if key == "nope"));
}

// ─── Cascades ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_resource_removes_dependents() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let reader = actor(&c, "reader").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;
  c.create_rating(reader.actor_id, r.resource_id, 4).await.unwrap();
  c.create_bookmark(reader.actor_id, r.resource_id).await.unwrap();
  c.create_comment(reader.actor_id, r.resource_id, "Nice".into()).await.unwrap();
  c.create_flag(reader.actor_id, Some(r.resource_id), None, "dupe".into()).await.unwrap();

  let err = c.delete_resource(r.resource_id, reader.actor_id).await.unwrap_err();
  assert!(is_forbidden(&err));
  c.delete_resource(r.resource_id, owner.actor_id).await.unwrap();

  assert!(c.list_bookmarks(reader.actor_id).await.unwrap().is_empty());
  assert!(c.list_flags(FlagQuery::default()).await.unwrap().is_empty());
  assert!(matches!(
    c.list_ratings(r.resource_id).await,
    Err(Error::NotFound { kind: EntityKind::Resource, .. })
  ));
}

#[tokio::test]
async fn deleting_rater_recomputes_aggregates() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let kept = actor(&c, "kept").await;
  let leaving = actor(&c, "leaving").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;
  c.create_rating(kept.actor_id, r.resource_id, 2).await.unwrap();
  c.create_rating(leaving.actor_id, r.resource_id, 5).await.unwrap();
  assert_eq!(c.get_resource(r.resource_id).await.unwrap().average_score, 3.5);

  c.delete_actor(leaving.actor_id, leaving.actor_id).await.unwrap();

  let fetched = c.get_resource(r.resource_id).await.unwrap();
  assert_eq!(fetched.score_count, 1);
  assert_eq!(fetched.average_score, 2.0);
}

#[tokio::test]
async fn deleting_owner_removes_their_resources() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let mod_ = moderator(&c, "mod").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  c.delete_actor(owner.actor_id, mod_.actor_id).await.unwrap();
  assert!(matches!(
    c.get_resource(r.resource_id).await,
    Err(Error::NotFound { kind: EntityKind::Resource, .. })
  ));
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_unit_rolls_back() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let ghost = Actor::new("ghost", false).unwrap();
  let ghost_id = ghost.actor_id;

  let result: lazydog_core::Result<()> = store
    .transact(move |tx| {
      tx.insert_actor(&ghost)?;
      Err(Error::invalid("abort"))
    })
    .await;
  assert!(matches!(result, Err(Error::Invalid(_))));

  let after = store.transact(move |tx| tx.get_actor(ghost_id)).await.unwrap();
  assert!(after.is_none());
}

#[tokio::test]
async fn storage_constraint_reports_conflict() {
  let c = catalog().await;
  let owner = actor(&c, "owner").await;
  let rater = actor(&c, "rater").await;
  let r = resource(&c, &owner, "Guide", "https://example.com/g").await;

  // Bypass the guard and write the same pair twice.
  let now = Utc::now();
  let rating = |score| Rating {
    rating_id: Uuid::new_v4(),
    actor_id: rater.actor_id,
    resource_id: r.resource_id,
    score: Score::new(score).unwrap(),
    created_at: now,
    updated_at: now,
  };
  let (first, second) = (rating(3), rating(4));

  let err = c
    .store()
    .transact(move |tx| {
      tx.insert_rating(&first)?;
      tx.insert_rating(&second)
    })
    .await
    .unwrap_err();
  assert!(is_conflict(&err, "already rated"), "{err:?}");
  assert!(c.list_ratings(r.resource_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn racing_connections_admit_one_rating() {
  let path = std::env::temp_dir().join(format!("lazydog-race-{}.db", Uuid::new_v4()));
  let a = Catalog::new(SqliteStore::open(&path).await.unwrap());
  let b = Catalog::new(SqliteStore::open(&path).await.unwrap());

  let owner = a.register_actor("owner".into(), false).await.unwrap();
  let rater = a.register_actor("rater".into(), false).await.unwrap();
  let r = a
    .create_resource(owner.actor_id, new_resource("Guide", "https://example.com/g"))
    .await
    .unwrap();

  let (left, right) = tokio::join!(
    a.create_rating(rater.actor_id, r.resource_id, 1),
    b.create_rating(rater.actor_id, r.resource_id, 5),
  );
  let outcomes = [left, right];
  assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
  assert!(
    outcomes
      .iter()
      .filter_map(|o| o.as_ref().err())
      .all(|e| is_conflict(e, "already rated"))
  );
  assert_eq!(b.get_resource(r.resource_id).await.unwrap().score_count, 1);

  drop((a, b));
  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
