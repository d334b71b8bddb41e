//! End-to-end behaviour of URL builders and request functions.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use typed_api::{
    ApiError, ConfigError, Endpoint, EndpointDescriptor, FnTransport, JsonTransport,
    ParameterError, RestMethod, RouteSchema, Shape, Transport, TransportError, TypedApi,
    UrlBuilder, ValueDomain,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Call = (String, RestMethod, Value);

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for Recorder {
    async fn fetch(
        &self,
        url: &str,
        method: RestMethod,
        body: Value,
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push((url.to_string(), method, body.clone()));
        Ok(json!({ "url": url, "method": method, "body": body }))
    }
}

fn users_schema() -> RouteSchema {
    RouteSchema::builder()
        .endpoint(
            "/users",
            RestMethod::Get,
            EndpointDescriptor::new()
                .query_param("nameIncludes", ValueDomain::String)
                .query_param("minAge", ValueDomain::Number),
        )
        .endpoint(
            "/users",
            RestMethod::Post,
            EndpointDescriptor::new()
                .query_param("nameIncludes", ValueDomain::String)
                .query_param("suffix", ValueDomain::String)
                .body(
                    Shape::new()
                        .required("name", ValueDomain::String)
                        .required("age", ValueDomain::Number),
                ),
        )
        .endpoint(
            "/users/:userId",
            RestMethod::Get,
            EndpointDescriptor::new().path_param("userId", ValueDomain::Number),
        )
        .endpoint("/random", RestMethod::Get, EndpointDescriptor::new())
        .endpoint(
            "/foo",
            RestMethod::Put,
            EndpointDescriptor::new().body(Shape::new().required("foo", ValueDomain::String)),
        )
        .build()
        .unwrap()
}

fn endpoint_schema() -> RouteSchema {
    RouteSchema::builder()
        .endpoint(
            "/api/endpoint",
            RestMethod::Get,
            EndpointDescriptor::new()
                .query_param("a", ValueDomain::String)
                .query_param("b", ValueDomain::one_of(["b1", "b2"])),
        )
        .endpoint(
            "/api/endpoint",
            RestMethod::Post,
            EndpointDescriptor::new().query_param("b", ValueDomain::one_of(["b2", "b3"])),
        )
        .build()
        .unwrap()
}

#[test]
fn method_agnostic_urls_use_the_shared_query() {
    let urls = UrlBuilder::new(endpoint_schema());
    let endpoint = urls.route("/api/endpoint", None).unwrap();

    assert_eq!(endpoint.url_with_query(&(), &json!({ "b": "b2" })).unwrap(), "/api/endpoint?b=b2");

    let err = endpoint.url_with_query(&(), &json!({ "b": "b1" })).unwrap_err();
    assert!(matches!(err, ParameterError::InvalidValue { .. }));

    let err = endpoint.url_with_query(&(), &json!({ "a": "a" })).unwrap_err();
    assert!(matches!(err, ParameterError::UnknownQueryKey { .. }));
}

#[test]
fn method_specific_urls_use_that_methods_query() {
    let urls = UrlBuilder::new(endpoint_schema()).with_prefix("/v1");
    let get = urls.route("/api/endpoint", Some(RestMethod::Get)).unwrap();

    assert_eq!(
        get.url_with_query(&(), &json!({ "a": "a", "b": "b1" })).unwrap(),
        "/v1/api/endpoint?a=a&b=b1"
    );
}

#[test]
fn users_query_intersection() {
    let urls = UrlBuilder::new(users_schema());
    let users = urls.route("/users", None).unwrap();

    let keys: Vec<&str> = users.query_shape().keys().collect();
    assert_eq!(keys, ["nameIncludes"]);

    let get = urls.route("/users", Some(RestMethod::Get)).unwrap();
    assert_eq!(
        get.url_with_query(&(), &json!({ "nameIncludes": "Fre", "minAge": 40 })).unwrap(),
        "/users?nameIncludes=Fre&minAge=40"
    );

    let user = urls.route("/users/:userId", None).unwrap();
    assert_eq!(user.url(&json!({ "userId": 7 })).unwrap(), "/users/7");
}

#[test]
fn unknown_routes_are_rejected_up_front() {
    let api = TypedApi::with_transport(users_schema(), Recorder::default());
    assert!(matches!(api.get("/nope").unwrap_err(), ConfigError::UnknownRoute { .. }));
    assert!(matches!(api.post("/random").unwrap_err(), ConfigError::UnknownMethod { .. }));
}

#[tokio::test]
async fn post_hands_body_to_transport() {
    let api = TypedApi::with_transport(users_schema(), Recorder::default());

    let response: Value = api
        .post("/users")
        .unwrap()
        .call_with(&(), &json!({ "name": "Fred", "age": 42 }))
        .await
        .unwrap();

    assert_eq!(
        api.transport().calls(),
        vec![("/users".to_string(), RestMethod::Post, json!({ "name": "Fred", "age": 42 }))]
    );
    assert_eq!(response["method"], "post");
}

#[tokio::test]
async fn generic_request_matches_method_accessor() {
    let api = TypedApi::with_transport(users_schema(), Recorder::default());

    let _: Value = api
        .request(RestMethod::Post, "/users")
        .unwrap()
        .call_with(&(), &json!({ "name": "Fred", "age": 42 }))
        .await
        .unwrap();
    let _: Value = api
        .put("/foo")
        .unwrap()
        .call_with(&(), &json!({ "foo": "bar" }))
        .await
        .unwrap();

    let calls = api.transport().calls();
    assert_eq!(calls[0].1, RestMethod::Post);
    assert_eq!(calls[1], ("/foo".to_string(), RestMethod::Put, json!({ "foo": "bar" })));
}

#[tokio::test]
async fn query_methods_send_null_body() {
    let api = TypedApi::with_transport(users_schema(), Recorder::default()).with_prefix("/api");

    let _: Value = api
        .get("/users")
        .unwrap()
        .call_with(&(), &json!({ "nameIncludes": "Fre", "minAge": 40 }))
        .await
        .unwrap();
    let _: Value = api.get("/random").unwrap().call(&()).await.unwrap();

    assert_eq!(
        api.transport().calls(),
        vec![
            ("/api/users?nameIncludes=Fre&minAge=40".to_string(), RestMethod::Get, Value::Null),
            ("/api/random".to_string(), RestMethod::Get, Value::Null),
        ]
    );
}

#[tokio::test]
async fn closures_work_as_transports() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let transport = FnTransport::new(move |url: String, method: RestMethod, _body: Value| {
        log.lock().unwrap().push(format!("{method} {url}"));
        async move { Ok::<_, TransportError>(json!({ "name": "Fred", "age": 42 })) }
    });

    let api = TypedApi::with_transport(users_schema(), transport);
    let user: Value = api
        .get("/users/:userId")
        .unwrap()
        .call(&json!({ "userId": 1 }))
        .await
        .unwrap();

    assert_eq!(user["name"], "Fred");
    assert_eq!(*seen.lock().unwrap(), ["get /users/1"]);
}

#[tokio::test]
async fn transport_errors_are_passed_through() {
    #[derive(Debug, thiserror::Error)]
    #[error("offline")]
    struct Offline;

    let transport = FnTransport::new(|_url: String, _method: RestMethod, _body: Value| async {
        Err::<Value, _>(TransportError::new(Offline))
    });

    let api = TypedApi::with_transport(users_schema(), transport);
    let err = api.get("/random").unwrap().call::<Value, _>(&()).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    let inner = err.as_transport().expect("transport error");
    assert!(inner.downcast_ref::<Offline>().is_some());
}

#[derive(Serialize)]
struct UserPath {
    #[serde(rename = "userId")]
    user_id: u64,
}

#[derive(Debug, PartialEq, Deserialize)]
struct User {
    name: String,
    age: u32,
}

struct GetUser;

impl Endpoint for GetUser {
    const ROUTE: &'static str = "/users/:userId";
    const METHOD: RestMethod = RestMethod::Get;
    type PathParams = UserPath;
    type Input = ();
    type Response = User;
}

#[derive(Serialize)]
struct NewUser<'a> {
    name: &'a str,
    age: u32,
}

struct CreateUser;

impl Endpoint for CreateUser {
    const ROUTE: &'static str = "/users";
    const METHOD: RestMethod = RestMethod::Post;
    type PathParams = ();
    type Input = NewUser<'static>;
    type Response = User;
}

#[tokio::test]
async fn json_transport_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/42"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "Fred", "age": 42 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "Fred", "age": 42 })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "name": "Fred", "age": 42 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("nameIncludes", "Fr ed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = TypedApi::with_transport(users_schema(), JsonTransport::new().unwrap())
        .with_prefix(format!("{}/api", server.uri()));

    let user = api
        .endpoint::<GetUser>()
        .unwrap()
        .call(&UserPath { user_id: 42 }, None)
        .await
        .unwrap();
    assert_eq!(
        user,
        User {
            name: "Fred".to_string(),
            age: 42
        }
    );

    let created = api
        .endpoint::<CreateUser>()
        .unwrap()
        .call(&(), Some(&NewUser { name: "Fred", age: 42 }))
        .await
        .unwrap();
    assert_eq!(created.name, "Fred");

    let found: Vec<User> = api
        .get("/users")
        .unwrap()
        .call_with(&(), &json!({ "nameIncludes": "Fr ed" }))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn default_constructor_uses_json_transport() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/foo"))
        .and(body_json(json!({ "foo": "bar" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let api = TypedApi::new(users_schema()).unwrap().with_prefix(server.uri());
    let reply: Value = api
        .put("/foo")
        .unwrap()
        .call_with(&(), &json!({ "foo": "bar" }))
        .await
        .unwrap();

    assert_eq!(reply, json!({ "ok": true }));
}
