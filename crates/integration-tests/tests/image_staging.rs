//! Image staging through the form: size limits, preview lifecycle, and the
//! mark/restore round-trip invariant.

use leafpress_admin::{IncomingFile, ProductForm, StagingOutcome};
use leafpress_core::ImageRef;
use leafpress_integration_tests::stored_product;

const ONE_MIB: usize = 1024 * 1024;
const LIMIT: u64 = 5 * 1024 * 1024;

fn png(name: &str, len: usize) -> IncomingFile {
    IncomingFile {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0u8; len],
    }
}

#[test]
fn oversized_files_never_reach_the_staged_list() {
    let mut form = ProductForm::new(LIMIT);

    let outcome = form.stage_files(vec![
        png("ok-1.png", ONE_MIB),
        png("too-big.png", 6 * ONE_MIB),
        png("ok-2.png", ONE_MIB),
    ]);

    assert_eq!(outcome, StagingOutcome { accepted: 2, rejected: 1 });

    let staged: Vec<&str> = form
        .images()
        .pending_upload()
        .iter()
        .map(|s| s.file_name.as_str())
        .collect();
    assert_eq!(staged, vec!["ok-1.png", "ok-2.png"]);
    assert_eq!(form.preview_registry().live_count(), 2);
}

#[test]
fn staging_n_files_appends_n_previews_in_order() {
    let mut form = ProductForm::new(LIMIT);

    form.stage_files(vec![png("a.png", 16)]);
    form.stage_files(vec![png("b.png", 16), png("c.png", 16)]);

    let staged: Vec<&str> = form
        .images()
        .pending_upload()
        .iter()
        .map(|s| s.file_name.as_str())
        .collect();
    assert_eq!(staged, vec!["a.png", "b.png", "c.png"]);
    assert_eq!(form.preview_registry().live_count(), 3);

    // Every staged file's preview URI dereferences to its bytes.
    for image in form.images().pending_upload() {
        assert!(form.preview_registry().resolve(image.preview.uri()).is_some());
    }
}

#[test]
fn removing_one_staged_file_releases_exactly_its_preview() {
    let mut form = ProductForm::new(LIMIT);
    form.stage_files(vec![png("a.png", 16), png("b.png", 16), png("c.png", 16)]);

    let removed_uri = form
        .images()
        .pending_upload()
        .get(1)
        .map(|s| s.preview.uri().to_string())
        .expect("staged file at index 1");

    assert!(form.remove_staged(1));

    // The removed file's URI is revoked; the others still resolve.
    assert!(form.preview_registry().resolve(&removed_uri).is_none());
    assert_eq!(form.preview_registry().live_count(), 2);

    let staged: Vec<&str> = form
        .images()
        .pending_upload()
        .iter()
        .map(|s| s.file_name.as_str())
        .collect();
    assert_eq!(staged, vec!["a.png", "c.png"]);
}

#[test]
fn mark_then_restore_is_a_round_trip() {
    let product = stored_product("p1", &["/a.png", "/b.png", "/c.png"]);
    let mut form = ProductForm::load(LIMIT, &product);

    let before_current: Vec<ImageRef> = form.images().current().to_vec();
    let target = ImageRef::new("/b.png");

    assert!(form.mark_for_deletion(&target));
    assert!(form.restore(&target));

    // Same membership, same order, nothing pending: an exact round-trip.
    let after: Vec<ImageRef> = form.images().current().to_vec();
    assert_eq!(after, before_current);
    assert!(form.images().pending_delete().is_empty());

    // Restoring something never marked is a no-op.
    assert!(!form.restore(&ImageRef::new("/zzz.png")));
}

#[test]
fn teardown_releases_every_preview() {
    let mut form = ProductForm::new(LIMIT);
    form.stage_files(vec![png("a.png", 16), png("b.png", 16)]);

    let registry = form.preview_registry().clone();
    assert_eq!(registry.live_count(), 2);

    // Abandoning the form mid-edit is an ordinary exit path.
    drop(form);
    assert_eq!(registry.live_count(), 0);
}
