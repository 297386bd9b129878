use serde_json::json;

use super::{compose_err, compose_ok};
use crate::{Avus, CollectionDetails, CollectionSizes, Collections};

#[test]
fn composes_collection_listing() {
    let collections: Collections = compose_ok(json!([
        {"id": "C000000001", "title": "MRI scans", "creator": "jmelius@maastrichtuniversity.nl",
         "size": "1048576", "numFiles": 12, "PID": "21.T12996/P000000010C000000001"},
        {"id": "C000000002", "title": "Questionnaires"}
    ]));
    assert_eq!(collections.len(), 2);
    let first = &collections.collections[0];
    assert_eq!(first.size, 1_048_576);
    assert_eq!(first.num_files, 12);
    assert_eq!(first.pid, "21.T12996/P000000010C000000001");
    let second = &collections.collections[1];
    assert_eq!(second.size, 0);
    assert_eq!(second.pid, "");
}

#[test]
fn collection_details_compose_external_pids_and_managers() {
    let details: CollectionDetails = compose_ok(json!({
        "collection": "C000000001",
        "title": "MRI scans",
        "creator": "jmelius@maastrichtuniversity.nl",
        "byteSize": "2048",
        "numFiles": "3",
        "PID": "21.T12996/P000000010C000000001",
        "enableArchive": "true",
        "enableOpenAccessExport": "false",
        "externalPIDs": [
            {"repository": "Dataverse", "pid": "doi:10.34894/ABC123"},
            {"repository": "Figshare", "value": "10.6084/m9.figshare.1"}
        ],
        "managers": {"users": [{"userName": "psuppers", "userId": "10069"}]}
    }));
    assert_eq!(details.id, "C000000001");
    assert_eq!(details.byte_size, 2048);
    assert_eq!(details.num_files, 3);
    assert!(details.enable_archive);
    assert!(!details.enable_unarchive);
    assert_eq!(details.external_pids.len(), 2);
    assert_eq!(details.external_pids.pids[1].pid, "10.6084/m9.figshare.1");
    assert_eq!(details.managers.users.users[0].user_name, "psuppers");
}

#[test]
fn collection_details_empty_flag_text_reads_as_false() {
    let details: CollectionDetails = compose_ok(json!({
        "collection": "C000000001",
        "title": "MRI scans",
        "enableArchive": "",
        "enableOpenAccessExport": ""
    }));
    assert!(!details.enable_archive);
    assert!(!details.enable_open_access_export);
}

#[test]
fn collection_sizes_must_be_whole_in_either_form() {
    let whole: Collections = compose_ok(json!([{"id": "C000000001", "title": "A", "size": 2048.0}]));
    assert_eq!(whole.collections[0].size, 2048);

    for size in [json!(1.9), json!("1.9")] {
        let err = compose_err::<Collections>(json!([{"id": "C000000001", "title": "A", "size": size}]));
        assert!(err.to_string().contains("whole non-negative"), "{err}");
    }
}

#[test]
fn collection_details_require_collection_key() {
    let err = compose_err::<CollectionDetails>(json!({"title": "MRI scans"}));
    assert!(err.is_missing_key());
    assert_eq!(err.shape, "CollectionDetails");
}

#[test]
fn collection_sizes_sum_per_resource() {
    let sizes: CollectionSizes = compose_ok(json!({"replRescUM01": 1.5, "arcRescSURF01": 2.0}));
    assert_eq!(sizes.get("replRescUM01"), Some(1.5));
    assert_eq!(sizes.total(), 3.5);
}

#[test]
fn avus_default_unit_and_lookup() {
    let avus: Avus = compose_ok(json!([
        {"attribute": "title", "value": "MRI scans"},
        {"attribute": "numFiles", "value": 12, "unit": "files"}
    ]));
    assert_eq!(avus.avus[0].unit, "");
    assert_eq!(avus.value_of("numFiles"), Some("12"));
    assert_eq!(avus.value_of("missing"), None);
}
