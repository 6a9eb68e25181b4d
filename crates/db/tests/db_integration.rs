//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `moviecat_test`)
//!   `TEST_DB_PASSWORD` (default: `moviecat_test`)
//!   `TEST_DB_NAME` (default: `moviecat_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use moviecat_db::entities::{
    actor, category, content_node, home_page, image, movie, movie_shot, rating, rating_star, review,
};
use moviecat_db::repositories::{
    ActorRepository, CategoryRepository, ContentNodeRepository, GalleryRepository,
    HomePageRepository, ImageRepository, MovieRelations, MovieRepository, NodeMove,
    RatingRepository, ReviewRepository,
};
use moviecat_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

fn node(id: &str, parent: Option<&content_node::Model>, slug: &str) -> content_node::ActiveModel {
    let parent_path = parent.map_or("/", |p| p.url_path.as_str());
    content_node::ActiveModel {
        id: Set(id.to_string()),
        parent_id: Set(parent.map(|p| p.id.clone())),
        slug: Set(slug.to_string()),
        title: Set(slug.to_string()),
        url_path: Set(format!("{parent_path}{slug}/")),
        live: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
    }
}

fn movie(id: &str, node_id: &str, category_id: Option<&str>) -> movie::ActiveModel {
    movie::ActiveModel {
        id: Set(id.to_string()),
        node_id: Set(node_id.to_string()),
        tagline: Set(String::new()),
        description: Set(String::new()),
        image_id: Set(None),
        year: Set(movie::DEFAULT_YEAR),
        country: Set("USA".to_string()),
        world_premiere: Set(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()),
        budget: Set(0),
        fees_in_usa: Set(0),
        fees_in_world: Set(0),
        category_id: Set(category_id.map(ToString::to_string)),
    }
}

fn actor(id: &str, node_id: &str) -> actor::ActiveModel {
    actor::ActiveModel {
        id: Set(id.to_string()),
        node_id: Set(node_id.to_string()),
        age: Set(50),
        description: Set(String::new()),
        image_id: Set(None),
    }
}

fn image(id: &str) -> image::ActiveModel {
    image::ActiveModel {
        id: Set(id.to_string()),
        title: Set("Still".to_string()),
        file: Set(format!("original_images/{id}.jpg")),
        width: Set(640),
        height: Set(480),
        created_at: Set(Utc::now().into()),
    }
}

fn shot(id: &str, movie_id: &str, image_id: &str, sort_order: i32) -> movie_shot::ActiveModel {
    movie_shot::ActiveModel {
        id: Set(id.to_string()),
        movie_id: Set(movie_id.to_string()),
        image_id: Set(image_id.to_string()),
        description: Set(String::new()),
        sort_order: Set(Some(sort_order)),
    }
}

fn review(id: &str, movie_id: &str, parent_id: Option<&str>) -> review::ActiveModel {
    review::ActiveModel {
        id: Set(id.to_string()),
        movie_id: Set(movie_id.to_string()),
        parent_id: Set(parent_id.map(ToString::to_string)),
        email: Set("viewer@example.com".to_string()),
        name: Set("Viewer".to_string()),
        text: Set("Loved it".to_string()),
        sort_order: Set(None),
        created_at: Set(Utc::now().into()),
    }
}

/// A fresh connection to the test database, separate from the one that ran
/// the migrations.
async fn connect(db: &TestDatabase) -> Arc<DatabaseConnection> {
    Arc::new(
        Database::connect(&db.config.database_url())
            .await
            .expect("Failed to connect to test database"),
    )
}

async fn seed_movie(conn: &Arc<DatabaseConnection>, category_id: Option<&str>) -> movie::Model {
    let repo = MovieRepository::new(Arc::clone(conn));
    let (movie, _) = repo
        .create(
            node("n-movie", None, "the-matrix"),
            movie("m1", "n-movie", category_id),
            MovieRelations::default(),
        )
        .await
        .expect("Failed to create movie");
    movie
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_top_level_reviews_exclude_replies() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;
    let movie = seed_movie(&conn, None).await;

    let reviews = ReviewRepository::new(Arc::clone(&conn));
    reviews.create(review("a", &movie.id, None)).await.unwrap();
    reviews.create(review("b", &movie.id, Some("a"))).await.unwrap();
    reviews.create(review("c", &movie.id, None)).await.unwrap();

    let top: Vec<String> = reviews
        .find_top_level(&movie.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(top, vec!["a".to_string(), "c".to_string()]);

    // Deleting a parent promotes its replies
    reviews.delete("a").await.unwrap();
    let orphan = reviews.get_by_id("b").await.unwrap();
    assert!(orphan.parent_id.is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_top_level_reviews_follow_sort_order() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;
    let movie = seed_movie(&conn, None).await;

    let reviews = ReviewRepository::new(Arc::clone(&conn));
    let mut first = review("ra", &movie.id, None);
    first.sort_order = Set(Some(1));
    let mut second = review("rc", &movie.id, None);
    second.sort_order = Set(Some(0));
    reviews.create(first).await.unwrap();
    reviews.create(second).await.unwrap();
    reviews.create(review("rb", &movie.id, Some("ra"))).await.unwrap();

    let top: Vec<String> = reviews
        .find_top_level(&movie.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(top, vec!["rc".to_string(), "ra".to_string()]);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_shots_follow_sort_order_not_id() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;
    let movie = seed_movie(&conn, None).await;
    ImageRepository::new(Arc::clone(&conn))
        .create(image("img1"))
        .await
        .unwrap();

    let gallery = GalleryRepository::new(Arc::clone(&conn));
    gallery.create(shot("s_a", &movie.id, "img1", 2)).await.unwrap();
    gallery.create(shot("s_c", &movie.id, "img1", 1)).await.unwrap();
    gallery.create(shot("s_b", &movie.id, "img1", 0)).await.unwrap();

    let order: Vec<String> = gallery
        .find_by_movie(&movie.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(order, vec!["s_b", "s_c", "s_a"]);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_movie_removes_children() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;
    let movie = seed_movie(&conn, None).await;

    ImageRepository::new(Arc::clone(&conn))
        .create(image("img1"))
        .await
        .unwrap();
    GalleryRepository::new(Arc::clone(&conn))
        .create(shot("s1", &movie.id, "img1", 0))
        .await
        .unwrap();

    let ratings = RatingRepository::new(Arc::clone(&conn));
    ratings
        .create_star(rating_star::ActiveModel {
            id: Set("star5".to_string()),
            value: Set(5),
            sort_order: Set(None),
        })
        .await
        .unwrap();
    ratings
        .create_rating(rating::ActiveModel {
            id: Set("r1".to_string()),
            ip: Set("127.0.0.1".to_string()),
            star_id: Set("star5".to_string()),
            movie_id: Set(movie.id.clone()),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    ReviewRepository::new(Arc::clone(&conn))
        .create(review("a", &movie.id, None))
        .await
        .unwrap();

    MovieRepository::new(Arc::clone(&conn))
        .delete(&movie)
        .await
        .unwrap();

    assert!(movie_shot::Entity::find().all(conn.as_ref()).await.unwrap().is_empty());
    assert!(rating::Entity::find().all(conn.as_ref()).await.unwrap().is_empty());
    assert!(review::Entity::find().all(conn.as_ref()).await.unwrap().is_empty());
    // Stars and images are shared and survive
    assert_eq!(rating_star::Entity::find().all(conn.as_ref()).await.unwrap().len(), 1);
    assert_eq!(image::Entity::find().all(conn.as_ref()).await.unwrap().len(), 1);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_actor_keeps_movie_and_clears_credits() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;

    let actors = ActorRepository::new(Arc::clone(&conn));
    let (lana, _) = actors
        .create(node("n-lana", None, "lana-wachowski"), actor("a1", "n-lana"))
        .await
        .unwrap();

    let movies = MovieRepository::new(Arc::clone(&conn));
    let (movie, _) = movies
        .create(
            node("n-movie", None, "the-matrix"),
            movie("m1", "n-movie", None),
            MovieRelations {
                actor_ids: Some(vec![lana.id.clone()]),
                director_ids: Some(vec![lana.id.clone()]),
                genre_ids: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(actors.find_cast(&movie.id).await.unwrap().len(), 1);

    actors.delete(&lana).await.unwrap();

    assert!(movies.find_by_id(&movie.id).await.unwrap().is_some());
    assert!(actors.find_cast(&movie.id).await.unwrap().is_empty());
    assert!(actors.find_directors(&movie.id).await.unwrap().is_empty());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_image_clears_poster_and_drops_shots() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;

    let images = ImageRepository::new(Arc::clone(&conn));
    images.create(image("poster")).await.unwrap();
    images.create(image("still")).await.unwrap();

    let mut with_poster = movie("m1", "n-movie", None);
    with_poster.image_id = Set(Some("poster".to_string()));
    let movies = MovieRepository::new(Arc::clone(&conn));
    let (movie, _) = movies
        .create(
            node("n-movie", None, "the-matrix"),
            with_poster,
            MovieRelations::default(),
        )
        .await
        .unwrap();

    let gallery = GalleryRepository::new(Arc::clone(&conn));
    gallery.create(shot("s1", &movie.id, "poster", 0)).await.unwrap();
    gallery.create(shot("s2", &movie.id, "still", 1)).await.unwrap();

    images.delete("poster").await.unwrap();

    let movie = movies.get_by_id(&movie.id).await.unwrap();
    assert!(movie.image_id.is_none());
    let remaining: Vec<String> = gallery
        .find_by_movie(&movie.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(remaining, vec!["s2"]);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_category_keeps_movie() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;

    let categories = CategoryRepository::new(Arc::clone(&conn));
    categories
        .create(category::ActiveModel {
            id: Set("cat1".to_string()),
            name: Set("Feature".to_string()),
            description: Set(String::new()),
        })
        .await
        .unwrap();
    let movie = seed_movie(&conn, Some("cat1")).await;

    categories.delete("cat1").await.unwrap();

    let movie = MovieRepository::new(Arc::clone(&conn))
        .get_by_id(&movie.id)
        .await
        .unwrap();
    assert!(movie.category_id.is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_node_rename_rewrites_descendant_paths() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;
    let nodes = ContentNodeRepository::new(Arc::clone(&conn));

    let root = nodes.create(node("root", None, "films")).await.unwrap();
    nodes.create(node("child", Some(&root), "the-matrix")).await.unwrap();

    nodes
        .relocate(NodeMove {
            node: root,
            title: "Movies".to_string(),
            slug: "movies".to_string(),
            url_path: "/movies/".to_string(),
        })
        .await
        .unwrap();

    let child = nodes.get_by_id("child").await.unwrap();
    assert_eq!(child.url_path, "/movies/the-matrix/");
    assert!(nodes.find_by_url_path("/films/the-matrix/").await.unwrap().is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_catalog_pages_are_recognised_by_node() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;
    let nodes = ContentNodeRepository::new(Arc::clone(&conn));

    ActorRepository::new(Arc::clone(&conn))
        .create(node("n-actor", None, "keanu-reeves"), actor("a1", "n-actor"))
        .await
        .unwrap();
    seed_movie(&conn, None).await;
    let plain = nodes.create(node("n-plain", None, "about")).await.unwrap();

    assert!(nodes.is_catalog_page("n-actor").await.unwrap());
    assert!(nodes.is_catalog_page("n-movie").await.unwrap());
    assert!(!nodes.is_catalog_page(&plain.id).await.unwrap());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_home_page_removes_subtree() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = connect(&db).await;
    let nodes = ContentNodeRepository::new(Arc::clone(&conn));
    let pages = HomePageRepository::new(Arc::clone(&conn));

    let (home, home_node) = pages
        .create(
            node("n-home", None, "home"),
            home_page::ActiveModel {
                id: Set("h1".to_string()),
                node_id: Set("n-home".to_string()),
                body: Set("<p>Welcome</p>".to_string()),
            },
        )
        .await
        .unwrap();
    nodes.create(node("n-about", Some(&home_node), "about")).await.unwrap();
    assert!(!nodes.is_catalog_page(&home_node.id).await.unwrap());

    pages.delete(&home).await.unwrap();

    assert!(pages.find_by_id("h1").await.unwrap().is_none());
    assert!(nodes.find_by_id("n-about").await.unwrap().is_none());

    db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}
