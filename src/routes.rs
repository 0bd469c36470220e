//! The fruit handlers and the route table.
//!
//! Each handler is one store round trip followed by one response: render a
//! view on success, or redirect after a write. Failures propagate with `?`
//! and become 400 pages in `IntoResponse`.

use std::sync::Arc;

use crate::error::Error;
use crate::fruit::FruitInput;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::FruitStore;
use crate::views;

/// Builds the application router around the process-wide store handle.
///
/// `/fruits/new` and `/fruits/seed` must never be captured as `{id}`
/// values; matchit's static-over-parameter precedence guarantees that
/// regardless of registration order.
pub fn router(store: Arc<dyn FruitStore>) -> Router {
    Router::new(store)
        .get("/fruits/seed", seed)
        .get("/fruits/new", new_form)
        .get("/fruits", index)
        .get("/fruits/{id}/edit", edit_form)
        .get("/fruits/{id}", show)
        .post("/fruits", create)
        .put("/fruits/{id}", update)
        .delete("/fruits/{id}", destroy)
        .fallback(fallback)
}

/// The fixture set inserted by `GET /fruits/seed`. Seeding never
/// deduplicates; two calls mean six records.
fn seed_fruits() -> Vec<FruitInput> {
    vec![
        FruitInput {
            name: "grapefruit".into(),
            color: "pink".into(),
            ready_to_eat: true,
        },
        FruitInput {
            name: "grape".into(),
            color: "purple".into(),
            ready_to_eat: false,
        },
        FruitInput {
            name: "avocado".into(),
            color: "green".into(),
            ready_to_eat: true,
        },
    ]
}

fn id(req: &Request) -> &str {
    // Matched `{id}` routes always carry the parameter; an empty fallback
    // simply fails id parsing and surfaces as NotFound.
    req.param("id").unwrap_or_default()
}

// GET /fruits/seed
async fn seed(store: Arc<dyn FruitStore>, _req: Request) -> Result<Response, Error> {
    store.create_many(seed_fruits()).await?;
    Ok(Response::redirect("/fruits"))
}

// GET /fruits
async fn index(store: Arc<dyn FruitStore>, _req: Request) -> Result<Response, Error> {
    let fruits = store.find_all().await?;
    Ok(Response::html(views::index(&fruits)))
}

// GET /fruits/new
async fn new_form(_store: Arc<dyn FruitStore>, _req: Request) -> Result<Response, Error> {
    Ok(Response::html(views::new()))
}

// GET /fruits/{id}/edit
async fn edit_form(store: Arc<dyn FruitStore>, req: Request) -> Result<Response, Error> {
    let fruit = store.find_by_id(id(&req)).await?;
    Ok(Response::html(views::edit(&fruit)))
}

// GET /fruits/{id}
async fn show(store: Arc<dyn FruitStore>, req: Request) -> Result<Response, Error> {
    let fruit = store.find_by_id(id(&req)).await?;
    Ok(Response::html(views::show(&fruit)))
}

// POST /fruits
async fn create(store: Arc<dyn FruitStore>, req: Request) -> Result<Response, Error> {
    let input = FruitInput::from_form(req.body())?;
    store.create_one(input).await?;
    Ok(Response::redirect("/fruits"))
}

// PUT /fruits/{id}
async fn update(store: Arc<dyn FruitStore>, req: Request) -> Result<Response, Error> {
    let input = FruitInput::from_form(req.body())?;
    let fruit = store.update_by_id(id(&req), input).await?;
    Ok(Response::redirect(format!("/fruits/{}", fruit.id.to_hex())))
}

// DELETE /fruits/{id}
async fn destroy(store: Arc<dyn FruitStore>, req: Request) -> Result<Response, Error> {
    store.delete_by_id(id(&req)).await?;
    Ok(Response::redirect("/fruits"))
}

// GET anything else
async fn fallback(_store: Arc<dyn FruitStore>, _req: Request) -> Result<Response, Error> {
    Ok(Response::html(views::fallback()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::store::MemoryStore;
    use bytes::Bytes;
    use http::StatusCode;

    fn app() -> (Arc<MemoryStore>, Router) {
        let store = Arc::new(MemoryStore::new());
        let router = router(store.clone());
        (store, router)
    }

    fn get(path: &str) -> Request {
        Request::new(Method::Get, path, Bytes::new())
    }

    fn with_body(method: Method, path: &str, body: &str) -> Request {
        Request::new(method, path, Bytes::from(body.to_owned()))
    }

    #[tokio::test]
    async fn seeding_an_empty_store_inserts_the_three_fixtures() {
        let (store, router) = app();
        let res = router.dispatch(get("/fruits/seed")).await;
        assert_eq!(res.status_code(), StatusCode::FOUND);
        assert_eq!(res.location(), Some("/fruits"));

        let fruits = store.find_all().await.unwrap();
        let summary: Vec<_> = fruits
            .iter()
            .map(|f| (f.name.as_str(), f.color.as_str(), f.ready_to_eat))
            .collect();
        assert_eq!(
            summary,
            [
                ("grapefruit", "pink", true),
                ("grape", "purple", false),
                ("avocado", "green", true),
            ]
        );
    }

    #[tokio::test]
    async fn seeding_twice_doubles_up_without_deduplication() {
        let (store, router) = app();
        router.dispatch(get("/fruits/seed")).await;
        router.dispatch(get("/fruits/seed")).await;
        assert_eq!(store.find_all().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn created_fruit_shows_up_on_the_index_page() {
        let (store, router) = app();
        let res = router
            .dispatch(with_body(Method::Post, "/fruits", "name=kiwi&color=brown"))
            .await;
        assert_eq!(res.status_code(), StatusCode::FOUND);
        assert_eq!(res.location(), Some("/fruits"));

        // No readyToEat field submitted: coerced to false.
        let fruits = store.find_all().await.unwrap();
        assert_eq!(fruits.len(), 1);
        assert_eq!(fruits[0].name, "kiwi");
        assert!(!fruits[0].ready_to_eat);

        let index = router.dispatch(get("/fruits")).await;
        assert_eq!(index.status_code(), StatusCode::OK);
        assert!(String::from_utf8_lossy(index.body()).contains("kiwi"));
    }

    #[tokio::test]
    async fn checked_box_creates_a_ready_fruit() {
        let (store, router) = app();
        router
            .dispatch(with_body(
                Method::Post,
                "/fruits",
                "name=mango&color=orange&readyToEat=on",
            ))
            .await;
        assert!(store.find_all().await.unwrap()[0].ready_to_eat);
    }

    #[tokio::test]
    async fn update_redirects_to_the_detail_page() {
        let (store, router) = app();
        router.dispatch(get("/fruits/seed")).await;
        let id = store.find_all().await.unwrap()[0].id.to_hex();

        let res = router
            .dispatch(with_body(
                Method::Put,
                &format!("/fruits/{id}"),
                "name=pomelo&color=yellow",
            ))
            .await;
        assert_eq!(res.status_code(), StatusCode::FOUND);
        assert_eq!(res.location(), Some(format!("/fruits/{id}").as_str()));

        let updated = store.find_by_id(&id).await.unwrap();
        assert_eq!(updated.name, "pomelo");
        assert_eq!(updated.color, "yellow");
        assert!(!updated.ready_to_eat);
    }

    #[tokio::test]
    async fn delete_removes_the_record_and_redirects_to_the_index() {
        let (store, router) = app();
        router.dispatch(get("/fruits/seed")).await;
        let id = store.find_all().await.unwrap()[0].id.to_hex();

        let res = router
            .dispatch(Request::new(
                Method::Delete,
                format!("/fruits/{id}"),
                Bytes::new(),
            ))
            .await;
        assert_eq!(res.status_code(), StatusCode::FOUND);
        assert_eq!(res.location(), Some("/fruits"));
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn detail_and_edit_pages_render_the_record() {
        let (store, router) = app();
        router.dispatch(get("/fruits/seed")).await;
        let id = store.find_all().await.unwrap()[0].id.to_hex();

        let detail = router.dispatch(get(&format!("/fruits/{id}"))).await;
        assert_eq!(detail.status_code(), StatusCode::OK);
        assert!(String::from_utf8_lossy(detail.body()).contains("grapefruit"));

        let edit = router.dispatch(get(&format!("/fruits/{id}/edit"))).await;
        assert_eq!(edit.status_code(), StatusCode::OK);
        assert!(String::from_utf8_lossy(edit.body()).contains("_method=PUT"));
    }

    #[tokio::test]
    async fn unknown_ids_surface_as_400_with_the_error_text() {
        let (_store, router) = app();
        let res = router
            .dispatch(get("/fruits/000000000000000000000000"))
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(res.body()).contains("no fruit with id"));
    }

    #[tokio::test]
    async fn the_creation_form_never_touches_the_store() {
        let (_store, router) = app();
        let res = router.dispatch(get("/fruits/new")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert!(String::from_utf8_lossy(res.body()).contains("form"));
    }

    #[tokio::test]
    async fn malformed_create_bodies_are_400() {
        let (store, router) = app();
        let res = router
            .dispatch(with_body(Method::Post, "/fruits", "color=green"))
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmatched_paths_get_the_fixed_fallback_with_200() {
        let (_store, router) = app();
        let res = router.dispatch(get("/bogus")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        let body = String::from_utf8_lossy(res.body());
        assert!(body.contains("/fruits"));
        assert!(body.contains("/vegetables"));
    }
}
