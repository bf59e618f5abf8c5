//! Integration tests for three-way patch calculation.
//!
//! Covers the reconciliation scenarios a declarative tool runs into: user
//! changes, independent live edits, drift on untouched fields, masked fields,
//! and inputs that cannot be processed at all.
use anyhow::{Result, anyhow, ensure};
use patch_maker::{
    BaseJsonMergePatcher, JsonMergePatcher, Maker, PatchMaker, PatchMakerError, PatchResult,
    default_patch_maker, ignore_field, ignore_pointer, ignore_status_fields,
};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};
use test_helpers::json::canonical;

#[fixture]
fn maker() -> PatchMaker {
    default_patch_maker()
}

fn to_anyhow<T>(result: patch_maker::PatchMakerResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}

struct Scenario {
    original: Value,
    modified: Value,
    current: Value,
    patch: Value,
    patched: Value,
    empty: bool,
}

#[rstest]
#[case::user_change(Scenario {
    original: json!({"a": 1}),
    modified: json!({"a": 2}),
    current: json!({"a": 1}),
    patch: json!({"a": 2}),
    patched: json!({"a": 2}),
    empty: false,
})]
#[case::independent_live_edit(Scenario {
    original: json!({"a": 1}),
    modified: json!({"a": 1}),
    current: json!({"a": 1, "b": 9}),
    patch: json!({}),
    patched: json!({"a": 1, "b": 9}),
    empty: true,
})]
#[case::drift_on_untouched_field(Scenario {
    original: json!({"a": 1, "b": 1}),
    modified: json!({"a": 2, "b": 1}),
    current: json!({"a": 1, "b": 9}),
    patch: json!({"a": 2}),
    patched: json!({"a": 2, "b": 9}),
    empty: false,
})]
#[case::user_removes_field(Scenario {
    original: json!({"a": 1, "labels": {"team": "x", "tier": "web"}}),
    modified: json!({"a": 1, "labels": {"team": "x"}}),
    current: json!({"a": 1, "labels": {"team": "x", "tier": "web", "owner": "ops"}}),
    patch: json!({"labels": {"tier": null}}),
    patched: json!({"a": 1, "labels": {"team": "x", "owner": "ops"}}),
    empty: false,
})]
#[case::first_apply_without_original(Scenario {
    original: Value::Null,
    modified: json!({"spec": {"replicas": 2}}),
    current: json!({"spec": {"replicas": 1}, "status": {"ready": 1}}),
    patch: json!({"spec": {"replicas": 2}}),
    patched: json!({"spec": {"replicas": 2}, "status": {"ready": 1}}),
    empty: false,
})]
fn reconciliation_scenarios(maker: PatchMaker, #[case] scenario: Scenario) -> Result<()> {
    let result = to_anyhow(maker.calculate(
        &scenario.current,
        &scenario.modified,
        &scenario.original,
        &[],
    ))?;
    let patch: Value = result.patch_value()?;
    ensure!(
        patch == scenario.patch,
        "expected patch {} but observed {patch}",
        scenario.patch
    );
    ensure!(
        result.patched() == &scenario.patched,
        "expected patched {} but observed {}",
        scenario.patched,
        result.patched()
    );
    ensure!(result.is_empty() == scenario.empty, "unexpected is_empty");
    Ok(())
}

#[rstest]
#[case(json!({}))]
#[case(json!({"a": 1}))]
#[case(json!({"spec": {"containers": [{"name": "app", "image": "v1"}]}, "n": null}))]
fn identical_inputs_yield_empty_patch(maker: PatchMaker, #[case] doc: Value) -> Result<()> {
    let result = to_anyhow(maker.calculate(&doc, &doc, &doc, &[]))?;
    ensure!(result.is_empty(), "patch was {}", String::from_utf8_lossy(result.patch()));
    ensure!(canonical(result.patched()) == canonical(&doc), "patched drifted");
    Ok(())
}

#[rstest]
#[case(json!({"a": 1, "b": {"c": 1}}), json!({"a": 2, "b": {"c": 1, "d": 4}}), json!({"a": 1, "b": {"c": 3}, "x": 1}))]
#[case(json!({"keep": true, "drop": 1}), json!({"keep": true}), json!({"keep": false, "drop": 1}))]
#[case(json!({}), json!({"list": [3, 2, 1]}), json!({"list": [1]}))]
fn patch_applied_to_current_reproduces_patched(
    maker: PatchMaker,
    #[case] original: Value,
    #[case] modified: Value,
    #[case] current: Value,
) -> Result<()> {
    let result = to_anyhow(maker.calculate(&current, &modified, &original, &[]))?;
    let reapplied = BaseJsonMergePatcher.merge_patch(&canonical(&current), result.patch())?;
    ensure!(
        reapplied == canonical(result.patched()),
        "re-applying {} gave {}",
        String::from_utf8_lossy(result.patch()),
        String::from_utf8_lossy(&reapplied)
    );
    Ok(())
}

#[rstest]
fn masked_field_is_preserved_when_nothing_changes(maker: PatchMaker) -> Result<()> {
    let current = json!({"metadata": {"name": "web", "resourceVersion": "812"}, "spec": 1});
    let modified = json!({"metadata": {"name": "web"}, "spec": 1});
    let version = ignore_pointer("/metadata/resourceVersion")?;
    let result = to_anyhow(maker.calculate(&current, &modified, &modified, &[&version]))?;
    ensure!(result.is_empty(), "expected empty patch");
    ensure!(result.patched() == &current, "masked field leaked");
    Ok(())
}

#[rstest]
fn status_is_ignored_and_preserved(maker: PatchMaker) -> Result<()> {
    let current = json!({"spec": {"size": 1}, "status": {"phase": "Running"}});
    let modified = json!({"spec": {"size": 2}, "status": {}});
    let original = json!({"spec": {"size": 1}});
    let result = to_anyhow(maker.calculate(
        &current,
        &modified,
        &original,
        &[&ignore_status_fields()],
    ))?;
    ensure!(
        result.patch_value()? == json!({"spec": {"size": 2}}),
        "status leaked into the patch"
    );
    ensure!(
        result.patched() == &json!({"spec": {"size": 2}, "status": {"phase": "Running"}}),
        "status was not preserved"
    );
    Ok(())
}

#[rstest]
fn semantically_identical_documents_collapse(maker: PatchMaker) -> Result<()> {
    let current: Value = serde_json::from_str(r#"{ "b": [1, 2], "a": {"y": 1, "x": 2} }"#)?;
    let modified: Value = serde_json::from_str(r#"{"a":{"x":2,"y":1},"b":[1,2]}"#)?;
    let result = to_anyhow(maker.calculate(&current, &modified, &Value::Null, &[]))?;
    ensure!(result.is_empty(), "expected canonical empty patch");
    Ok(())
}

#[rstest]
fn result_keeps_option_output_and_original(maker: PatchMaker) -> Result<()> {
    let result: PatchResult<Value> = to_anyhow(maker.calculate(
        &json!({"a": 1, "secret": "x"}),
        &json!({"a": 2, "secret": "y"}),
        &json!({"a": 1, "secret": "y"}),
        &[&ignore_field("secret")],
    ))?;
    ensure!(result.current() == br#"{"a":1}"#, "current not transformed");
    ensure!(result.modified() == br#"{"a":2}"#, "modified not transformed");
    ensure!(
        result.original() == br#"{"a":1,"secret":"y"}"#,
        "original must bypass options"
    );
    ensure!(result.to_string().contains("Original: {\"a\":1,\"secret\":\"y\"}"));
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Broken;

impl Serialize for Broken {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("not representable"))
    }
}

#[rstest]
fn unserialisable_current_is_an_encoding_error(maker: PatchMaker) {
    let err = maker
        .calculate(&Broken, &json!({}), &json!({}), &[])
        .expect_err("current cannot be serialised");
    assert!(matches!(err.as_ref(), PatchMakerError::Encoding { .. }));
}

#[rstest]
fn non_object_documents_fail_patch_generation(maker: PatchMaker) {
    let err = maker
        .calculate(&json!([1, 2]), &json!({}), &json!({}), &[])
        .expect_err("arrays cannot be merge patched three ways");
    assert!(matches!(
        err.as_ref(),
        PatchMakerError::PatchGeneration { .. }
    ));
}

#[rstest]
fn maker_is_shareable_across_threads(maker: PatchMaker) -> Result<()> {
    let handles: Vec<_> = (0..4_u8)
        .map(|n| {
            let maker = maker.clone();
            std::thread::spawn(move || {
                maker
                    .calculate(&json!({"n": 0}), &json!({"n": n}), &json!({"n": 0}), &[])
                    .map(|result| result.into_patched())
            })
        })
        .collect();
    for (n, handle) in handles.into_iter().enumerate() {
        let patched = handle
            .join()
            .map_err(|_| anyhow!("worker panicked"))?
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(patched == json!({"n": n}), "thread {n} saw {patched}");
    }
    Ok(())
}
