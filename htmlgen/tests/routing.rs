use htmlgen::routing::{Resolved, ReverseError, Route, Router, DYNAMIC_ROUTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    PathBefore,
    Bar,
    ConfirmArgs,
    PathAfter,
}

fn baz(path: &str) -> Option<Resolved> {
    (path == "baz/").then(|| Resolved::new().arg("a").arg("b").kwarg("a", "1").kwarg("b", "2"))
}

fn router() -> Router<View> {
    Router::new()
        .route(
            Route::path("path_before/", View::PathBefore)
                .unwrap()
                .name("path_before_name"),
        )
        .route(Route::dynamic(
            |path| (path == "bar/").then(Resolved::new),
            View::Bar,
        ))
        .route(Route::dynamic(baz, View::ConfirmArgs))
        .route(
            Route::include(
                "included/",
                Router::new().route(Route::dynamic(baz, View::ConfirmArgs)),
            )
            .unwrap(),
        )
        .route(
            Route::path("path_after/", View::PathAfter)
                .unwrap()
                .name("path_after_name"),
        )
        .route(
            Route::path("path_after/<value>/", View::PathAfter)
                .unwrap()
                .name("path_after_name"),
        )
}

#[test]
fn test_paths_around_dynamic_routes() {
    let router = router();
    assert_eq!(*router.resolve("/path_before/").unwrap().view, View::PathBefore);
    assert_eq!(*router.resolve("/path_after/").unwrap().view, View::PathAfter);
    assert!(router.resolve("/nowhere/").is_none());
}

#[test]
fn test_dynamic_route() {
    let router = router();
    let found = router.resolve("/bar/").unwrap();
    assert_eq!(*found.view, View::Bar);
    assert_eq!(found.route, DYNAMIC_ROUTE);
    assert!(found.args.is_empty());
    assert_eq!(found.url_name, None);
}

#[test]
fn test_dynamic_route_arguments() {
    let router = router();
    for path in ["/baz/", "/included/baz/"] {
        let found = router.resolve(path).unwrap();
        assert_eq!(*found.view, View::ConfirmArgs);
        assert_eq!(found.args, ["a", "b"]);
        assert_eq!(found.kwargs["b"], "2");
    }
    assert_eq!(
        router.resolve("/included/baz/").unwrap().route,
        format!("included/{DYNAMIC_ROUTE}")
    );
}

#[test]
fn test_path_arguments() {
    let router = router();
    let found = router.resolve("/path_after/BAZ/").unwrap();
    assert_eq!(found.kwargs["value"], "BAZ");
    assert_eq!(found.route, "path_after/<value>/");
    assert_eq!(found.url_name, Some("path_after_name"));
}

#[test]
fn test_reverse() {
    let router = router();
    assert_eq!(router.reverse("path_before_name", &[]).unwrap(), "/path_before/");
    assert_eq!(
        router.reverse("path_after_name", &[("value", "BAZ")]).unwrap(),
        "/path_after/BAZ/"
    );
    assert_eq!(router.reverse("path_after_name", &[]).unwrap(), "/path_after/");
    assert_eq!(
        router.reverse("missing", &[]),
        Err(ReverseError::UnknownName {
            name: "missing".to_string()
        })
    );
    assert!(matches!(
        router.reverse("path_after_name", &[("other", "x")]),
        Err(ReverseError::NoMatch { .. })
    ));
}

#[test]
fn test_nested_reverse_with_converters() {
    let router: Router<&str> = Router::new().route(
        Route::include(
            "blog/<slug:blog>/",
            Router::new().route(
                Route::path("posts/<int:id>/", "post")
                    .unwrap()
                    .name("post"),
            ),
        )
        .unwrap(),
    );

    let found = router.resolve("/blog/news/posts/12/").unwrap();
    assert_eq!(*found.view, "post");
    assert_eq!(found.kwargs["blog"], "news");
    assert_eq!(found.kwargs["id"], "12");
    assert_eq!(found.route, "blog/<slug:blog>/posts/<int:id>/");
    assert!(router.resolve("/blog/news/posts/x/").is_none());

    assert_eq!(
        router.reverse("post", &[("id", "12"), ("blog", "news")]).unwrap(),
        "/blog/news/posts/12/"
    );
    assert!(router.reverse("post", &[("id", "x"), ("blog", "news")]).is_err());
}

#[test]
fn test_pushed_routes_resolve_in_order() {
    let mut router = Router::new();
    router.push(Route::path("first/", 1).unwrap().name("first"));
    router.push(Route::path("first/", 2).unwrap());
    router.push(Route::path("second/<int:id>/", 3).unwrap().name("second"));
    assert_eq!(*router.resolve("/first/").unwrap().view, 1);
    assert_eq!(router.resolve("/second/7/").unwrap().kwargs["id"], "7");
    assert_eq!(
        router.reverse("second", &[("id", "7")]).unwrap(),
        "/second/7/"
    );
}
