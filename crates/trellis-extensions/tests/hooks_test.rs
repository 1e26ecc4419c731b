//! End-to-end tests for URL and template hooks.

use std::sync::Arc;

use trellis_core::config::extensions::ExtensionsConfig;
use trellis_extensions::{
    ExtensionInfo, ExtensionManager, TemplateHook, TemplateHookRegistry, UrlHook,
};
use trellis_routing::pattern::RoutePattern;
use trellis_routing::request::{RequestContext, TemplateContext};
use trellis_routing::resolver::RouteResolver;

fn pattern(name: &str, template: &str) -> Arc<RoutePattern> {
    Arc::new(RoutePattern::named(name, template).unwrap())
}

fn context(path: &str) -> TemplateContext {
    TemplateContext::new(RequestContext::new(path))
}

#[tokio::test]
async fn url_hook_install_and_shutdown_restores_prior_state() {
    let manager = ExtensionManager::new(ExtensionsConfig::default());
    let resolver = manager.directory().default_resolver();

    resolver.install(&[pattern("home", "/")]).await;
    let before = resolver.patterns().await;

    let hook = UrlHook::install(
        "acme.reviews",
        manager.directory(),
        manager.config(),
        vec![
            pattern("review-list", "/reviews/"),
            pattern("review-detail", "/reviews/{id}/"),
        ],
    )
    .await
    .unwrap();

    assert_eq!(resolver.pattern_count().await, 3);
    assert!(resolver.resolve("/reviews/9/").await.is_some());

    hook.shutdown().await.unwrap();

    let after = resolver.patterns().await;
    assert_eq!(after.len(), before.len());
    assert!(Arc::ptr_eq(&after[0], &before[0]));
    assert!(resolver.resolve("/reviews/9/").await.is_none());
}

#[tokio::test]
async fn url_hook_uses_configured_parent_resolver() {
    let manager = ExtensionManager::new(ExtensionsConfig {
        extension_root_urlconf: Some("extensions".to_string()),
        site_root_urlconf: None,
    });
    let parent = Arc::new(RouteResolver::new());
    manager.directory().insert("extensions", parent.clone()).await;

    let _hook = UrlHook::install(
        "acme.reviews",
        manager.directory(),
        manager.config(),
        vec![pattern("review-list", "/reviews/")],
    )
    .await
    .unwrap();

    assert_eq!(parent.pattern_count().await, 1);
    assert_eq!(manager.directory().default_resolver().pattern_count().await, 0);
}

#[tokio::test]
async fn url_hook_fails_without_configured_resolver() {
    let manager = ExtensionManager::new(ExtensionsConfig {
        extension_root_urlconf: Some("missing".to_string()),
        site_root_urlconf: None,
    });

    let result = UrlHook::install(
        "acme.reviews",
        manager.directory(),
        manager.config(),
        vec![pattern("review-list", "/reviews/")],
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn url_hook_shutdown_errors_when_pattern_removed_externally() {
    let manager = ExtensionManager::new(ExtensionsConfig::default());
    let resolver = manager.directory().default_resolver();

    let hook = UrlHook::install(
        "acme.reviews",
        manager.directory(),
        manager.config(),
        vec![pattern("review-list", "/reviews/")],
    )
    .await
    .unwrap();

    // Something else pulls the pattern out from under the hook.
    resolver.remove(&hook.patterns()[0].clone()).await.unwrap();

    assert!(hook.shutdown().await.is_err());
}

#[tokio::test]
async fn url_hook_double_shutdown_errors() {
    let manager = ExtensionManager::new(ExtensionsConfig::default());

    let hook = UrlHook::install(
        "acme.reviews",
        manager.directory(),
        manager.config(),
        vec![pattern("review-list", "/reviews/")],
    )
    .await
    .unwrap();

    hook.shutdown().await.unwrap();
    assert!(hook.shutdown().await.is_err());
}

#[tokio::test]
async fn hooks_for_returns_hooks_in_registration_order() {
    let registry = Arc::new(TemplateHookRegistry::new());
    let resolver = Arc::new(RouteResolver::new());

    let first = TemplateHook::install(
        "acme.reviews",
        registry.clone(),
        resolver.clone(),
        "nav-bar",
        "reviews/nav.html",
        Vec::new(),
    )
    .await;
    let second = TemplateHook::install(
        "acme.badges",
        registry.clone(),
        resolver.clone(),
        "nav-bar",
        "badges/nav.html",
        Vec::new(),
    )
    .await;

    let hooks = registry.hooks_for("nav-bar").await;
    assert_eq!(hooks.len(), 2);
    assert!(Arc::ptr_eq(&hooks[0], &first));
    assert!(Arc::ptr_eq(&hooks[1], &second));

    assert!(registry.hooks_for("footer").await.is_empty());
}

#[tokio::test]
async fn template_hook_without_restrictions_applies_everywhere() {
    let registry = Arc::new(TemplateHookRegistry::new());
    let resolver = Arc::new(RouteResolver::new());

    let hook = TemplateHook::install(
        "acme.reviews",
        registry,
        resolver,
        "nav-bar",
        "reviews/nav.html",
        Vec::new(),
    )
    .await;

    assert!(hook.applies_to(&context("/anything/at/all/")).await);
    assert!(hook.applies_to(&context("/")).await);
}

#[tokio::test]
async fn restricted_template_hook_matches_reversed_url_with_kwargs() {
    let registry = Arc::new(TemplateHookRegistry::new());
    let resolver = Arc::new(RouteResolver::new());
    resolver
        .install(&[pattern("review-detail", "/reviews/{id}/")])
        .await;

    let hook = TemplateHook::install(
        "acme.reviews",
        registry,
        resolver,
        "sidebar",
        "reviews/sidebar.html",
        vec!["review-detail".to_string()],
    )
    .await;

    let on_detail = TemplateContext::new(
        RequestContext::new("/reviews/42/").with_kwarg("id", "42"),
    );
    assert!(hook.applies_to(&on_detail).await);

    let on_other_detail = TemplateContext::new(
        RequestContext::new("/reviews/42/").with_kwarg("id", "7"),
    );
    assert!(!hook.applies_to(&on_other_detail).await);

    assert!(!hook.applies_to(&context("/dashboard/")).await);
}

#[tokio::test]
async fn restricted_template_hook_falls_back_to_no_arg_reversal() {
    let registry = Arc::new(TemplateHookRegistry::new());
    let resolver = Arc::new(RouteResolver::new());
    resolver.install(&[pattern("review-list", "/reviews/")]).await;

    let hook = TemplateHook::install(
        "acme.reviews",
        registry,
        resolver,
        "sidebar",
        "reviews/sidebar.html",
        vec!["review-list".to_string()],
    )
    .await;

    // The stashed kwargs do not fit `review-list`, so the no-arg retry
    // is what produces the match.
    let ctx = TemplateContext::new(
        RequestContext::new("/reviews/").with_kwarg("id", "42"),
    );
    assert!(hook.applies_to(&ctx).await);
}

#[tokio::test]
async fn unreversible_route_names_are_skipped_silently() {
    let registry = Arc::new(TemplateHookRegistry::new());
    let resolver = Arc::new(RouteResolver::new());
    resolver.install(&[pattern("review-list", "/reviews/")]).await;

    let hook = TemplateHook::install(
        "acme.reviews",
        registry,
        resolver,
        "sidebar",
        "reviews/sidebar.html",
        vec!["no-such-route".to_string(), "review-list".to_string()],
    )
    .await;

    assert!(hook.applies_to(&context("/reviews/")).await);
    assert!(!hook.applies_to(&context("/elsewhere/")).await);
}

#[tokio::test]
async fn template_hook_shutdown_removes_only_that_instance() {
    let registry = Arc::new(TemplateHookRegistry::new());
    let resolver = Arc::new(RouteResolver::new());

    let first = TemplateHook::install(
        "acme.reviews",
        registry.clone(),
        resolver.clone(),
        "nav-bar",
        "reviews/nav.html",
        Vec::new(),
    )
    .await;
    let second = TemplateHook::install(
        "acme.badges",
        registry.clone(),
        resolver.clone(),
        "nav-bar",
        "badges/nav.html",
        Vec::new(),
    )
    .await;

    first.shutdown().await.unwrap();

    let hooks = registry.hooks_for("nav-bar").await;
    assert_eq!(hooks.len(), 1);
    assert!(Arc::ptr_eq(&hooks[0], &second));

    // Removed exactly once; a second shutdown is an error.
    assert!(first.shutdown().await.is_err());

    second.shutdown().await.unwrap();
    assert!(registry.hooks_for("nav-bar").await.is_empty());
}

#[tokio::test]
async fn manager_shuts_down_every_hook_of_an_extension() {
    let manager = ExtensionManager::new(ExtensionsConfig::default());
    let resolver = manager.directory().default_resolver();

    manager
        .register_extension(ExtensionInfo::new("acme.reviews", "Reviews", "1.0.0"))
        .await
        .unwrap();

    let url_hook = UrlHook::install(
        "acme.reviews",
        manager.directory(),
        manager.config(),
        vec![pattern("review-list", "/reviews/")],
    )
    .await
    .unwrap();
    let template_hook = TemplateHook::install(
        "acme.reviews",
        manager.template_hooks().clone(),
        resolver.clone(),
        "nav-bar",
        "reviews/nav.html",
        Vec::new(),
    )
    .await;

    manager.attach_hook(Arc::new(url_hook)).await.unwrap();
    manager.attach_hook(template_hook).await.unwrap();
    assert_eq!(manager.hook_count("acme.reviews").await, 2);

    manager.shutdown_extension("acme.reviews").await.unwrap();

    assert_eq!(resolver.pattern_count().await, 0);
    assert!(manager.template_hooks().hooks_for("nav-bar").await.is_empty());
    assert!(!manager.is_enabled("acme.reviews").await);
    assert_eq!(manager.hook_count("acme.reviews").await, 0);
}

#[tokio::test]
async fn duplicate_extension_registration_errors() {
    let manager = ExtensionManager::new(ExtensionsConfig::default());

    manager
        .register_extension(ExtensionInfo::new("acme.reviews", "Reviews", "1.0.0"))
        .await
        .unwrap();
    let result = manager
        .register_extension(ExtensionInfo::new("acme.reviews", "Reviews", "1.0.1"))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn attach_hook_requires_registered_extension() {
    let manager = ExtensionManager::new(ExtensionsConfig::default());

    let hook = TemplateHook::install(
        "unknown.ext",
        manager.template_hooks().clone(),
        manager.directory().default_resolver(),
        "nav-bar",
        "x/nav.html",
        Vec::new(),
    )
    .await;

    assert!(manager.attach_hook(hook).await.is_err());
}
