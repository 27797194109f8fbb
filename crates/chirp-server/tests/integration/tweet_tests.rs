use serde_json::json;

use super::common::{delete, get, post_json, put_json, setup_test_app};
use axum::body::Body;
use axum::http::{Request, StatusCode};

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_tweet_lifecycle() {
    let app = setup_test_app();

    let (status, body) = app
        .send(post_json("/tweets", json!({ "message": "Hello world" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["id"], 1);
    assert_eq!(body["tweet"]["message"], "Hello world");
    assert!(body["tweet"]["createdAt"].is_string());
    assert!(body["tweet"]["updatedAt"].is_string());

    let (status, body) = app.send(get("/tweets/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweetId"]["id"], 1);
    assert_eq!(body["tweetId"]["message"], "Hello world");

    let (status, body) = app.send(delete("/tweets/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = app.send(get("/tweets/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Tweet not found");
    assert_eq!(
        body["message"],
        "Tweet with the id of 1 could not be found."
    );
}

#[tokio::test]
async fn test_list_tweets_in_creation_order() {
    let app = setup_test_app();

    let (status, body) = app.send(get("/tweets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tweets": [] }));

    for message in ["first", "second", "third"] {
        let (status, _) = app
            .send(post_json("/tweets", json!({ "message": message })))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.send(get("/tweets")).await;
    assert_eq!(status, StatusCode::OK);
    let tweets = body["tweets"].as_array().unwrap();
    let messages: Vec<_> = tweets.iter().map(|t| t["message"].as_str().unwrap()).collect();
    assert_eq!(messages, ["first", "second", "third"]);
    let ids: Vec<_> = tweets.iter().map(|t| t["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let app = setup_test_app();

    app.send(post_json("/tweets", json!({ "message": "one" }))).await;
    app.send(delete("/tweets/1")).await;

    let (_, body) = app
        .send(post_json("/tweets", json!({ "message": "two" })))
        .await;
    assert_eq!(body["tweet"]["id"], 2);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_create_tweet_rejects_falsy_message() {
    let app = setup_test_app();

    for body in [json!({ "message": "" }), json!({}), json!({ "message": null })] {
        let (status, response) = app.send(post_json("/tweets", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["title"], "Bad request");
        assert_eq!(response["message"], "Bad request.");
        assert_eq!(response["errors"], json!(["Your tweet can't be empty"]));
    }

    let (_, body) = app.send(get("/tweets")).await;
    assert_eq!(body["tweets"], json!([]));
}

#[tokio::test]
async fn test_create_tweet_length_boundary() {
    let app = setup_test_app();

    let (status, body) = app
        .send(post_json("/tweets", json!({ "message": "a".repeat(281) })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!(["Your tweet can't be longer than 280 characters"])
    );

    let (status, body) = app
        .send(post_json("/tweets", json!({ "message": "a".repeat(280) })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["message"].as_str().unwrap().len(), 280);
}

#[tokio::test]
async fn test_length_counts_characters_not_bytes() {
    let app = setup_test_app();

    let message = "é".repeat(280);
    let (status, body) = app
        .send(post_json("/tweets", json!({ "message": message })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["message"], message);
}

#[tokio::test]
async fn test_presentation_selectors_do_not_count() {
    let app = setup_test_app();

    let hearts = "\u{2764}\u{FE0F}".repeat(200);
    let (status, body) = app
        .send(post_json("/tweets", json!({ "message": hearts })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["message"], hearts);
}

#[tokio::test]
async fn test_nul_message_is_bad_request() {
    let app = setup_test_app();

    for message in ["\0", "before\0after"] {
        let (status, body) = app
            .send(post_json("/tweets", json!({ "message": message })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"], json!(["Your tweet can't contain null characters"]));
    }

    let (status, _) = app
        .send(put_json("/tweets/1", json!({ "message": "\0" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_message_stored_verbatim() {
    let app = setup_test_app();

    let message = "  <b>spaces</b> & \"quotes\"  ";
    let (status, body) = app
        .send(post_json("/tweets", json!({ "message": message })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["message"], message);

    let (_, body) = app.send(get("/tweets/1")).await;
    assert_eq!(body["tweetId"]["message"], message);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_test_app();

    let request = Request::post("/tweets")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Bad request");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_is_rejected_as_json() {
    let app = setup_test_app();

    let request = Request::post("/tweets")
        .body(Body::from(r#"{"message":"hi"}"#))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["title"], "Bad request");
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_tweet_keeps_identity() {
    let app = setup_test_app();

    let (_, created) = app
        .send(post_json("/tweets", json!({ "message": "draft" })))
        .await;

    let (status, body) = app
        .send(put_json("/tweets/1", json!({ "message": "final" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["id"], 1);
    assert_eq!(body["tweet"]["message"], "final");
    assert_eq!(body["tweet"]["createdAt"], created["tweet"]["createdAt"]);

    let (_, body) = app.send(get("/tweets/1")).await;
    assert_eq!(body["tweetId"]["message"], "final");
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = setup_test_app();

    let (status, body) = app
        .send(put_json("/tweets/42", json!({ "message": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Your tweet can't be empty"]));
}

#[tokio::test]
async fn test_update_and_delete_missing_tweet() {
    let app = setup_test_app();

    let (status, body) = app
        .send(put_json("/tweets/42", json!({ "message": "hi" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Tweet not found");
    assert_eq!(
        body["message"],
        "Tweet with the id of 42 could not be found."
    );

    let (status, body) = app.send(delete("/tweets/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Tweet not found");
}

// ============================================================================
// Route matching
// ============================================================================

#[tokio::test]
async fn test_collection_accepts_trailing_slash() {
    let app = setup_test_app();

    let (status, body) = app
        .send(post_json("/tweets/", json!({ "message": "slash" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["id"], 1);

    let (status, body) = app.send(get("/tweets/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweets"][0]["message"], "slash");
}

#[tokio::test]
async fn test_non_numeric_id_is_unknown_route() {
    let app = setup_test_app();

    let requests = [
        get("/tweets/abc"),
        put_json("/tweets/abc", json!({ "message": "hi" })),
        delete("/tweets/abc"),
        get("/tweets/12abc"),
    ];

    for request in requests {
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["title"], "Resource Not Found");
        assert_eq!(body["message"], "The requested resource couldn't be found.");
    }
}

#[tokio::test]
async fn test_unsupported_method_is_json_not_found() {
    let app = setup_test_app();

    let request = Request::patch("/tweets/1").body(Body::empty()).unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Resource Not Found");

    let (status, body) = app.send(delete("/tweets")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Resource Not Found");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = setup_test_app();

    let (status, body) = app.send(get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Resource Not Found");
    assert!(body["stack"].is_string());
}
