mod helpers;

use autolot_core::AppError;
use autolot_db::ListingRepository;
use autolot_services::{
    AssetUploader, ClientContext, ImagePayload, ListingComposer, ListingLifecycleManager,
    UploadSession,
};
use autolot_storage::keys::image_key;
use autolot_storage::MemoryBlobStore;
use helpers::{jpeg_payload, test_env, test_identity, valid_form, FlakyDeleteBlobStore, ScriptedDocumentStore};
use std::sync::Arc;

async fn create_listing(ctx: &ClientContext, image_count: usize) -> autolot_core::models::ListingRecord {
    let uploader = AssetUploader::for_context(ctx);
    let session = UploadSession::new();
    for _ in 0..image_count {
        let (content_type, data) = jpeg_payload();
        uploader
            .dispatch_upload(&session, &ctx.identity, ImagePayload::new(content_type, data))
            .join()
            .await
            .unwrap()
            .unwrap();
    }
    ListingComposer::new(ctx.clone())
        .submit(&valid_form(), &session)
        .await
        .unwrap()
}

#[tokio::test]
async fn delete_removes_record_then_blobs() {
    let env = test_env();
    let record = create_listing(&env.ctx, 2).await;
    assert_eq!(env.blobs.len().await, 2);

    let manager = ListingLifecycleManager::new(env.ctx.clone());
    let report = manager.delete_listing(&record).await.unwrap();

    assert!(report.is_clean());
    assert_eq!(report.images_attempted, 2);
    assert!(env.ctx.listings.get(&record.id).await.unwrap().is_none());
    assert!(env.blobs.is_empty().await);
}

#[tokio::test]
async fn repeated_delete_is_a_noop_with_empty_report() {
    let env = test_env();
    let record = create_listing(&env.ctx, 1).await;

    let manager = ListingLifecycleManager::new(env.ctx.clone());
    manager.delete_listing(&record).await.unwrap();

    // Second delete: record and blobs are already absent.
    let report = manager.delete_by_id(&record.id).await.unwrap();
    assert!(report.is_clean());
    assert_eq!(report.images_attempted, 0);

    // Deleting the full record again also succeeds; absent blobs are Ok.
    let report = manager.delete_listing(&record).await.unwrap();
    assert!(report.is_clean());
}

#[tokio::test]
async fn owner_query_never_returns_a_deleted_listing() {
    let blobs = Arc::new(FlakyDeleteBlobStore::new());
    let docs = Arc::new(ScriptedDocumentStore::new());
    let ctx = ClientContext::new(
        test_identity(),
        ListingRepository::new(docs),
        blobs.clone(),
    );
    let record = create_listing(&ctx, 2).await;

    // Every blob delete fails; the record must still disappear.
    for image in &record.images {
        blobs.fail_on(image_key(&image.owner_id, &image.name));
    }

    let manager = ListingLifecycleManager::new(ctx.clone());
    let report = manager.delete_listing(&record).await.unwrap();

    assert_eq!(report.failures.len(), 2);
    let listings = ctx.listings.list_by_owner(&ctx.identity.id).await.unwrap();
    assert!(listings.is_empty());
}

#[tokio::test]
async fn partial_blob_failure_never_blocks_sibling_deletes() {
    let blobs = Arc::new(FlakyDeleteBlobStore::new());
    let docs = Arc::new(ScriptedDocumentStore::new());
    let ctx = ClientContext::new(
        test_identity(),
        ListingRepository::new(docs),
        blobs.clone(),
    );
    let record = create_listing(&ctx, 3).await;

    let victim = &record.images[1];
    let victim_key = image_key(&victim.owner_id, &victim.name);
    blobs.fail_on(victim_key.clone());

    let manager = ListingLifecycleManager::new(ctx);
    let report = manager.delete_listing(&record).await.unwrap();

    assert_eq!(report.images_attempted, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reference.name, victim.name);

    // Siblings were deleted; the failed one is an orphan left for the sweep.
    for image in &record.images {
        let key = image_key(&image.owner_id, &image.name);
        assert_eq!(blobs.contains(&key).await, key == victim_key);
    }
}

#[tokio::test]
async fn failed_document_delete_leaves_blobs_untouched() {
    let docs = Arc::new(ScriptedDocumentStore::failing_deletes());
    let env_blobs = Arc::new(MemoryBlobStore::new());
    let ctx = ClientContext::new(
        test_identity(),
        ListingRepository::new(docs),
        env_blobs.clone(),
    );
    let record = create_listing(&ctx, 2).await;

    let manager = ListingLifecycleManager::new(ctx);
    let result = manager.delete_listing(&record).await;

    assert!(matches!(result, Err(AppError::StoreDelete(_))));
    // Document-first ordering: no blob deletion is attempted when the record
    // could not be removed, so the listing stays fully intact.
    assert_eq!(env_blobs.len().await, 2);
}

#[tokio::test]
async fn cancelled_dispatch_leaves_the_listing_intact() {
    let env = test_env();
    let record = create_listing(&env.ctx, 1).await;

    let manager = ListingLifecycleManager::new(env.ctx.clone());
    // Current-thread runtime: the task has not started, so the cancel is
    // observed at the first checkpoint, before the document delete.
    let handle = manager.dispatch_delete(record.clone());
    handle.cancel();

    let result = handle.join().await.unwrap();
    assert!(matches!(result, Err(AppError::Cancelled)));
    assert!(env.ctx.listings.get(&record.id).await.unwrap().is_some());
    assert_eq!(env.blobs.len().await, 1);
}

#[tokio::test]
async fn dispatched_delete_runs_to_completion() {
    let env = test_env();
    let record = create_listing(&env.ctx, 2).await;

    let manager = ListingLifecycleManager::new(env.ctx.clone());
    let report = manager
        .dispatch_delete(record.clone())
        .join()
        .await
        .unwrap()
        .unwrap();

    assert!(report.is_clean());
    assert!(env.ctx.listings.get(&record.id).await.unwrap().is_none());
    assert!(env.blobs.is_empty().await);
}
