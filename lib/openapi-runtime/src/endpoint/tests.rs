use std::sync::{Arc, LazyLock};

use http::Method;
use indexmap::IndexMap;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::{FieldValue, Record, TransformConfig, ValueObject};

#[derive(Debug)]
enum Status {
    Available,
    Sold,
}

impl ValueObject for Status {
    fn to_value(&self) -> Value {
        match self {
            Self::Available => json!("available"),
            Self::Sold => json!("sold"),
        }
    }
}

#[derive(Debug)]
struct Tag {
    id: i64,
    name: &'static str,
}

impl Record for Tag {
    fn to_structure(&self) -> Value {
        json!({ "id": self.id, "name": self.name })
    }
}

// What a generated endpoint looks like
static UPDATE_PET: LazyLock<Arc<EndpointDescriptor>> = LazyLock::new(|| {
    Arc::new(
        EndpointDescriptor::new(Method::POST, "/pets/{petId}/status/{status}")
            .with_route_params(["petId", "status"])
            .with_param_whitelist(["dryRun", "tags[]", "status"]),
    )
});

#[derive(Debug, Clone)]
struct UpdatePet(Endpoint);

impl UpdatePet {
    fn new(pet_id: i64, status: Status) -> Result<Self, EndpointError> {
        let endpoint = Endpoint::new(Arc::clone(&UPDATE_PET)).with_params(Some(
            Params::new()
                .add_param("petId", pet_id)
                .add_param("status", FieldValue::value_object(status)),
        ))?;
        Ok(Self(endpoint))
    }
}

fn endpoint() -> Endpoint {
    Endpoint::new(Arc::clone(&UPDATE_PET))
}

fn params(value: Value) -> Option<Params> {
    Some(Params::try_from(value).expect("object params"))
}

fn payload(value: Value) -> Option<Payload> {
    Some(Payload::try_from(value).expect("valid payload"))
}

#[test]
fn should_expose_method() {
    assert_eq!(endpoint().method(), &Method::POST);
}

#[test]
fn should_build_generated_endpoint() {
    let UpdatePet(endpoint) = UpdatePet::new(42, Status::Sold).expect("valid endpoint");

    assert_eq!(endpoint.uri().expect("resolved"), "pets/42/status/sold");
    insta::assert_debug_snapshot!(endpoint.params(), @r#"
    {
        "status": String("sold"),
    }
    "#);
}

#[test]
fn should_keep_whitelisted_params_without_nulls() {
    let endpoint = endpoint()
        .with_params(params(json!({
            "petId": 1,
            "dryRun": true,
            "tags": ["dog"],
            "status": null,
        })))
        .expect("valid params");

    assert_eq!(
        Value::Object(endpoint.params().into_iter().collect()),
        json!({ "dryRun": true, "tags": ["dog"] })
    );
}

#[test]
fn should_ignore_absent_params() {
    let endpoint = endpoint()
        .with_params(params(json!({ "dryRun": false })))
        .expect("valid params")
        .with_params(None)
        .expect("absent params");

    assert_eq!(endpoint.params().get("dryRun"), Some(&json!(false)));
}

#[test]
fn should_replace_params_wholesale() {
    let endpoint = endpoint()
        .with_params(params(json!({ "dryRun": false, "petId": 3 })))
        .expect("valid params")
        .with_params(params(json!({ "tags": ["cat"] })))
        .expect("valid params");

    assert!(endpoint.params().get("dryRun").is_none());
    assert!(endpoint.uri().is_err());
}

#[rstest]
fn should_accept_any_subset_of_whitelist_and_route_params(
    #[values(None, Some(json!(true)), Some(Value::Null))] dry_run: Option<Value>,
    #[values(None, Some(json!(["dog", "cat"])))] tags: Option<Value>,
    #[values(None, Some(json!(42)))] pet_id: Option<Value>,
    #[values(None, Some(json!("sold")))] status: Option<Value>,
) {
    let input = [
        ("dryRun", dry_run),
        ("tags", tags),
        ("petId", pet_id),
        ("status", status),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|value| (name, value)))
    .collect::<Vec<_>>();
    let expected = input
        .iter()
        .filter(|(name, value)| *name != "petId" && !value.is_null())
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect::<IndexMap<_, _>>();

    let endpoint = endpoint()
        .with_params(Some(input.into_iter().collect()))
        .expect("every key is whitelisted or a route parameter");

    assert_eq!(endpoint.params(), expected);
}

#[test]
fn should_reject_unknown_param() {
    let result = endpoint().with_params(params(json!({ "petId": 1, "offset": 3 })));

    let error = result.expect_err("offset is unknown");
    insta::assert_snapshot!(error, @r#"Parameter "offset" is not allowed. Allowed parameters: dryRun, tags, status, petId"#);
}

#[test]
fn should_reject_every_unknown_param() {
    let result = endpoint().with_params(params(json!({ "limit": 1, "offset": 3 })));

    let Err(EndpointError::InvalidParameter { invalid, allowed }) = result else {
        panic!("expected an invalid parameter error");
    };
    assert_eq!(invalid, ["limit", "offset"]);
    assert_eq!(allowed, ["dryRun", "tags", "status", "petId"]);
}

#[test]
fn should_reject_marked_name() {
    let result = endpoint().with_params(params(json!({ "tags[]": ["dog"] })));

    assert!(matches!(result, Err(EndpointError::InvalidParameter { .. })));
}

#[test]
fn should_snake_case_params_before_validation() {
    let descriptor = EndpointDescriptor::new(Method::GET, "/pets/{pet_id}")
        .with_route_params(["pet_id"])
        .with_param_whitelist(["page_size"]);

    let endpoint = Endpoint::new(descriptor)
        .with_snake_cased_params(true)
        .with_params(params(json!({ "petId": 9, "pageSize": 20 })))
        .expect("snake cased params are valid");

    assert_eq!(endpoint.uri().expect("resolved"), "pets/9");
    assert_eq!(endpoint.params().get("page_size"), Some(&json!(20)));
}

#[test]
fn should_unwrap_value_objects() {
    let endpoint = endpoint()
        .with_params(Some(
            Params::new()
                .add_param("petId", 5)
                .add_param("status", FieldValue::value_object(Status::Available)),
        ))
        .expect("valid params");

    assert_eq!(endpoint.uri().expect("resolved"), "pets/5/status/available");
}

#[test]
fn should_resolve_uri() {
    let descriptor =
        EndpointDescriptor::new(Method::GET, "/things/{id}/sub").with_route_params(["id"]);

    let endpoint = Endpoint::new(descriptor)
        .with_params(params(json!({ "id": "42" })))
        .expect("valid params");

    assert_eq!(endpoint.uri().expect("resolved"), "things/42/sub");
}

#[test]
fn should_fail_fast_on_missing_route_param() {
    let endpoint = endpoint()
        .with_params(params(json!({ "petId": 1 })))
        .expect("valid params");

    let result = endpoint.uri();

    assert!(matches!(
        result,
        Err(EndpointError::MissingRouteParam { name, .. }) if name == "status"
    ));
}

#[test]
fn should_clean_body() {
    let endpoint = endpoint().with_body(payload(json!({ "a": null, "b": [], "c": 1 })));

    assert_eq!(endpoint.body().map(Payload::to_json), Some(json!({ "c": 1 })));
}

#[derive(Debug)]
struct Unset;

impl ValueObject for Unset {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

#[derive(Debug)]
struct NoTags;

impl Record for NoTags {
    fn to_structure(&self) -> Value {
        json!([])
    }
}

#[test]
fn should_drop_value_objects_resolving_to_null() {
    let body: Payload = [
        ("a", FieldValue::value_object(Unset)),
        ("b", FieldValue::from(1)),
        ("c", FieldValue::value_object(Status::Available)),
    ]
    .into_iter()
    .collect();

    let endpoint = endpoint().with_body(Some(body));

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "b": 1, "c": "available" }))
    );
}

#[test]
fn should_drop_records_resolving_to_empty_array() {
    let form_data: Payload = [
        ("tags", FieldValue::record(NoTags)),
        ("tag", FieldValue::record(Tag { id: 1, name: "dog" })),
    ]
    .into_iter()
    .collect();

    let endpoint = endpoint().with_form_data(Some(form_data));

    assert_eq!(
        endpoint.form_data().map(Payload::to_json),
        Some(json!({ "tag": { "id": 1, "name": "dog" } }))
    );
}

#[test]
fn should_compact_list_body_with_null_value_objects() {
    let body = Payload::from(vec![
        FieldValue::value_object(Unset),
        FieldValue::record(NoTags),
        FieldValue::from("kept"),
    ]);

    let endpoint = endpoint().with_body(Some(body));

    assert_eq!(endpoint.body().map(Payload::to_json), Some(json!(["kept"])));
}

#[test]
fn should_keep_null_body() {
    let endpoint = endpoint()
        .with_body(payload(json!({ "c": 1 })))
        .with_body(None);

    assert!(endpoint.body().is_none());
}

#[test]
fn should_snake_case_body() {
    let endpoint = endpoint()
        .with_snake_cased_body(true)
        .with_body(payload(json!({ "someKey": 1 })));

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "some_key": 1 }))
    );
}

#[test]
fn should_not_reprocess_stored_body() {
    let endpoint = endpoint()
        .with_body(payload(json!({ "someKey": 1 })))
        .with_snake_cased_body(true);

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "someKey": 1 }))
    );
}

#[test]
fn should_strip_reserved_prefix() {
    let endpoint = endpoint().with_body(payload(json!({ "_1": "one", "name": "x" })));

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "1": "one", "name": "x" }))
    );
}

#[test]
fn should_strip_reserved_prefix_before_snake_casing() {
    let endpoint = endpoint()
        .with_snake_cased_body(true)
        .with_body(payload(json!({ "_firstName": "Ada" })));

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "first_name": "Ada" }))
    );
}

#[test]
fn should_use_configured_prefix() {
    let descriptor = EndpointDescriptor::new(Method::POST, "/items")
        .with_config(TransformConfig::default().with_reserved_prefix("n_"));

    let endpoint = Endpoint::new(descriptor).with_body(payload(json!({ "n_2": 2, "_3": 3 })));

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "2": 2, "_3": 3 }))
    );
}

#[test]
fn should_convert_records_in_list_body() {
    let body = Payload::from(vec![
        FieldValue::record(Tag { id: 1, name: "dog" }),
        FieldValue::from(Value::Null),
        FieldValue::from("plain"),
    ]);

    let endpoint = endpoint().with_body(Some(body));

    let Some(Payload::List(items)) = endpoint.body() else {
        panic!("expected a list body");
    };
    assert!(items.iter().all(|item| matches!(item, FieldValue::Json(_))));
    insta::assert_debug_snapshot!(endpoint.body().map(Payload::to_json), @r#"
    Some(
        Array [
            Object {
                "id": Number(1),
                "name": String("dog"),
            },
            String("plain"),
        ],
    )
    "#);
}

#[test]
fn should_keep_records_in_keyed_body() {
    let body: Payload = [("tag", FieldValue::record(Tag { id: 2, name: "cat" }))]
        .into_iter()
        .collect();

    let endpoint = endpoint().with_body(Some(body));

    assert!(matches!(
        endpoint.body().and_then(|body| body.get("tag")),
        Some(FieldValue::Record(_))
    ));
    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "tag": { "id": 2, "name": "cat" } }))
    );
}

#[rstest]
#[case::keyed(json!({ "a": null, "bKey": [], "cKey": { "d": null }, "_e": [1] }))]
#[case::list(json!([null, [], 1, { "a": 1 }]))]
#[case::empty(json!({}))]
fn should_clean_body_idempotently(#[case] input: Value) {
    let once = endpoint()
        .with_snake_cased_body(true)
        .with_body(payload(input.clone()));
    let twice = once.clone().with_body(payload(input));

    assert_eq!(
        once.body().map(Payload::to_json),
        twice.body().map(Payload::to_json)
    );
}

#[test]
fn should_clean_form_data_independently() {
    let endpoint = endpoint()
        .with_snake_cased_form_data(true)
        .with_body(payload(json!({ "bodyKey": 1 })))
        .with_form_data(payload(json!({ "formKey": "x", "empty": [], "gone": null })));

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "bodyKey": 1 }))
    );
    assert_eq!(
        endpoint.form_data().map(Payload::to_json),
        Some(json!({ "form_key": "x" }))
    );
}

#[test]
fn should_start_from_descriptor_flags() {
    let descriptor = EndpointDescriptor::new(Method::POST, "/items").with_snake_cased_body(true);

    let endpoint = Endpoint::from(descriptor).with_body(payload(json!({ "itemName": "x" })));

    assert_eq!(
        endpoint.body().map(Payload::to_json),
        Some(json!({ "item_name": "x" }))
    );
}

#[test]
fn should_build_request_options() {
    let endpoint = endpoint()
        .with_params(params(json!({
            "petId": 1,
            "status": "sold",
            "dryRun": true,
            "tags": ["dog", "cat"],
        })))
        .expect("valid params")
        .with_body(payload(json!({ "name": "Doggy", "photo": null })))
        .with_form_data(payload(json!({ "note": "hi" })));

    let options = endpoint.to_request_options().expect("valid options");

    insta::assert_debug_snapshot!(options, @r#"
    RequestOptions {
        query: [
            (
                "dryRun",
                "true",
            ),
            (
                "status",
                "sold",
            ),
            (
                "tags[]",
                "dog",
            ),
            (
                "tags[]",
                "cat",
            ),
        ],
        headers: {},
        json: Some(
            Object {
                "name": String("Doggy"),
            },
        ),
        form: Some(
            Object {
                "note": String("hi"),
            },
        ),
    }
    "#);
}

#[test]
fn should_not_leak_route_params_into_query() {
    let descriptor = EndpointDescriptor::new(Method::DELETE, "/pets/{petId}")
        .with_route_params(["petId"])
        .with_param_whitelist(["force"]);

    let options = Endpoint::new(descriptor)
        .with_params(params(json!({ "petId": 3, "force": true })))
        .expect("valid params")
        .to_request_options()
        .expect("valid options");

    assert_eq!(options.query(), [("force".to_string(), "true".to_string())]);
    assert!(options.json().is_none());
}
