use std::error::Error;

use common::{TestContext, expired_token, location, set_cookie, token, token_signed_by};
use reqwest::{StatusCode, header::COOKIE, redirect::Policy};
use storegate_web::ctx::resolver::AUTH_TOKEN_COOKIE;
use storegated::api::{PageView, SessionView};

mod common;

#[tokio::test]
async fn test_missing_credential_goes_to_login() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    for path in ["/dashboard", "/dashboard/orders", "/dashboard/orders/12"] {
        let response = ctx.client.get(ctx.url(path)).send().await?;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&response), "/login");
    }
    Ok(())
}

#[tokio::test]
async fn test_agent_permissions() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;
    let agent = token("agent");

    let response = ctx
        .client
        .get(ctx.url("/dashboard/orders"))
        .bearer_auth(&agent)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let page: PageView = response.json().await?;
    assert_eq!(page.resource, "orders");
    assert_eq!(page.role, "agent");
    assert_eq!(page.resources, ["orders", "customers", "ads"]);

    let response = ctx
        .client
        .get(ctx.url("/dashboard"))
        .bearer_auth(&agent)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/forbidden");

    let response = ctx
        .client
        .get(ctx.url("/dashboard/products/3"))
        .bearer_auth(&agent)
        .send()
        .await?;
    assert_eq!(location(&response), "/forbidden");
    Ok(())
}

#[tokio::test]
async fn test_admin_home_and_item() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;
    let admin = token("admin");

    let page: PageView = ctx
        .client
        .get(ctx.url("/dashboard"))
        .bearer_auth(&admin)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(page.resource, "dashboard");

    let page: PageView = ctx
        .client
        .get(ctx.url("/dashboard/products/3"))
        .bearer_auth(&admin)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(page.resource, "products");
    assert_eq!(page.id.as_deref(), Some("3"));
    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_fail_closed() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let tokens = [
        token_signed_by(b"some-other-secret", "superadmin"),
        expired_token("superadmin"),
        String::from("not-a-token"),
        token("guest"),
    ];
    for bad in tokens {
        let response = ctx
            .client
            .get(ctx.url("/dashboard/orders"))
            .bearer_auth(&bad)
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/forbidden");
    }
    Ok(())
}

#[tokio::test]
async fn test_bad_cookie_is_removed() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()?;

    let cookies = [
        expired_token("admin"),
        token_signed_by(b"forged", "superadmin"),
    ];
    for bad in cookies {
        let response = client
            .get(ctx.url("/dashboard/orders"))
            .header(COOKIE, format!("{AUTH_TOKEN_COOKIE}={bad}"))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/forbidden");

        let removal = set_cookie(&response).expect("auth cookie removal");
        assert!(removal.starts_with(&format!("{AUTH_TOKEN_COOKIE}=;")), "{removal}");
        assert!(removal.contains("Max-Age=0"), "{removal}");
    }
    Ok(())
}

#[tokio::test]
async fn test_ungated_paths_bypass() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx.client.get(ctx.url("/health")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.client.get(ctx.url("/forbidden")).send().await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx.client.get(ctx.url("/login")).send().await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_session_cookie() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx.client.get(ctx.url("/me")).send().await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = ctx
        .client
        .post(ctx.url("/session"))
        .json(&serde_json::json!({ "access_token": token("superadmin") }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).expect("auth cookie");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(cookie.contains("SameSite=Lax"), "{cookie}");
    let session: SessionView = response.json().await?;
    assert_eq!(session.role, "superadmin");

    // The cookie now carries the credential.
    let response = ctx.client.get(ctx.url("/dashboard/settings")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let me: SessionView = ctx.client.get(ctx.url("/me")).send().await?.json().await?;
    assert_eq!(me.user, "user-1");

    let response = ctx.client.delete(ctx.url("/session")).send().await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.client.get(ctx.url("/dashboard/settings")).send().await?;
    assert_eq!(location(&response), "/login");
    Ok(())
}

#[tokio::test]
async fn test_session_rejects_forged_token() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/session"))
        .json(&serde_json::json!({ "access_token": token_signed_by(b"forged", "admin") }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = ctx.client.get(ctx.url("/dashboard/orders")).send().await?;
    assert_eq!(location(&response), "/login");
    Ok(())
}
